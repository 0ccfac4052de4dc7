//! Parse error types.

use std::ops::Range;

use stencil_lexer::{LexError, Token};
use thiserror::Error;

/// Token kind reported when input ends mid-statement
pub const END_OF_INPUT: &str = "$end";

/// Parse failure.
///
/// Parsing stops at the first token the grammar cannot accept; there is no
/// recovery.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// The grammar cannot extend the current statement with this token
    #[error("Unexpected `{kind}'")]
    UnexpectedToken {
        /// Token kind, or [`END_OF_INPUT`]
        kind: &'static str,
        /// Byte span of the offending token; empty at end of input
        span: Range<usize>,
    },

    /// The lexer rejected the input before the parser could see a token
    #[error(transparent)]
    Lexing(#[from] LexError),

    /// A grammar rule's builder rejected the operands its own shape read
    #[error("Malformed rule for `{mnemonic}'")]
    MalformedRule {
        mnemonic: &'static str,
        /// Span of the statement's mnemonic
        span: Range<usize>,
    },
}

impl ParseError {
    pub fn unexpected(token: &Token, span: Range<usize>) -> Self {
        ParseError::UnexpectedToken {
            kind: token.kind(),
            span,
        }
    }

    pub fn end_of_input(at: usize) -> Self {
        ParseError::UnexpectedToken {
            kind: END_OF_INPUT,
            span: at..at,
        }
    }

    /// Kind name shown in front of the message
    pub fn name(&self) -> &'static str {
        match self {
            ParseError::UnexpectedToken { .. } | ParseError::MalformedRule { .. } => "ParseError",
            ParseError::Lexing(_) => "LexingError",
        }
    }

    /// Token kind the parser stopped at, if it got that far
    pub fn token_kind(&self) -> Option<&'static str> {
        match self {
            ParseError::UnexpectedToken { kind, .. } => Some(kind),
            ParseError::Lexing(_) | ParseError::MalformedRule { .. } => None,
        }
    }

    pub fn span(&self) -> Range<usize> {
        match self {
            ParseError::UnexpectedToken { span, .. } | ParseError::MalformedRule { span, .. } => {
                span.clone()
            }
            ParseError::Lexing(e) => e.span.clone(),
        }
    }
}
