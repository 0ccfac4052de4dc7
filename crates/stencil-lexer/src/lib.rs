// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for the stencil language.
//!
//! This crate provides tokenization of stencil source code using logos.
//!
//! # Design
//!
//! - `Token`: the eight instruction mnemonics plus the three numeric literal kinds
//! - Whitespace is insignificant and never produces a token
//! - `Lexer`: lazy, single-pass token stream carrying byte spans; it stops
//!   for good after reporting the first unrecognized input
//!
//! # Examples
//!
//! ```
//! # use stencil_lexer::*;
//! let tokens: Vec<Token> = lex("STO 37 -452.11 PR 37")
//!     .map(|result| result.map(|spanned| spanned.token))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(tokens[0], Token::Sto);
//! assert_eq!(tokens[2], Token::Real(-452.11));
//! ```

use logos::Logos;
use std::fmt;
use std::ops::Range;
use thiserror::Error;

/// Stencil language token.
///
/// Mnemonics are matched as whole words: any identifier-shaped run of
/// characters that is not exactly one of the eight mnemonics is rejected as
/// a whole, so `SMXF` is a lexing error rather than `SMX` followed by junk.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"\s+")] // Skip whitespace
pub enum Token {
    // === Mnemonics ===
    /// Mnemonic `STO` (store register)
    #[token("STO")]
    Sto,
    /// Mnemonic `PR` (print register)
    #[token("PR")]
    Pr,
    /// Mnemonic `ADD` (add to register)
    #[token("ADD")]
    Add,
    /// Mnemonic `CMX` (create matrix)
    #[token("CMX")]
    Cmx,
    /// Mnemonic `PMX` (print matrix)
    #[token("PMX")]
    Pmx,
    /// Mnemonic `SMX` (set matrix contents)
    #[token("SMX")]
    Smx,
    /// Mnemonic `PDE` (apply stencil)
    #[token("PDE")]
    Pde,
    /// Mnemonic `BNE` (branch if register not equal)
    #[token("BNE")]
    Bne,

    // === Literals ===
    /// Non-negative integer literal (e.g. `20`, `0020`)
    ///
    /// Values that overflow `i64` fail the callback and surface as a
    /// lexing error at the literal.
    #[regex(r"[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    PosInt(i64),

    /// Negative integer literal (e.g. `-78`, `-078`)
    #[regex(r"-[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    NegInt(i64),

    /// Real literal with a mandatory integer part (e.g. `23.`, `-0.456`)
    ///
    /// `.4` and `-.4` are not reals.
    #[regex(r"-?[0-9]+\.[0-9]*", |lex| lex.slice().parse::<f64>().ok())]
    Real(f64),

    /// Identifier-shaped input that is not a mnemonic. Never emitted.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |_| false)]
    Unrecognized,
}

impl Token {
    /// Grammar kind name of this token, as reported in parse errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Sto => "STO",
            Token::Pr => "PR",
            Token::Add => "ADD",
            Token::Cmx => "CMX",
            Token::Pmx => "PMX",
            Token::Smx => "SMX",
            Token::Pde => "PDE",
            Token::Bne => "BNE",
            Token::PosInt(_) => "POS_INT",
            Token::NegInt(_) => "NEG_INT",
            Token::Real(_) => "REAL",
            Token::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// Check whether this token is one of the eight instruction mnemonics.
    pub fn is_mnemonic(&self) -> bool {
        matches!(
            self,
            Token::Sto
                | Token::Pr
                | Token::Add
                | Token::Cmx
                | Token::Pmx
                | Token::Smx
                | Token::Pde
                | Token::Bne
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::PosInt(n) | Token::NegInt(n) => write!(f, "{}", n),
            // Debug keeps the decimal point on integral reals
            Token::Real(x) => write!(f, "{:?}", x),
            other => f.write_str(other.kind()),
        }
    }
}

/// A token with its byte span in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub span: Range<usize>,
}

impl Spanned {
    pub fn new(token: Token, span: Range<usize>) -> Self {
        Self { token, span }
    }
}

/// Unrecognized input encountered while lexing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unrecognized input `{slice}' at byte {}", span.start)]
pub struct LexError {
    /// Byte span of the rejected input
    pub span: Range<usize>,
    /// The rejected source text
    pub slice: String,
}

/// Lazy token stream over a source string.
///
/// Yields tokens in source order. After the first `LexError` the stream is
/// exhausted; it cannot be restarted.
pub struct Lexer<'src> {
    inner: logos::Lexer<'src, Token>,
    failed: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            inner: Token::lexer(source),
            failed: false,
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Spanned, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.inner.next()? {
            Ok(token) => Some(Ok(Spanned::new(token, self.inner.span()))),
            Err(()) => {
                self.failed = true;
                Some(Err(LexError {
                    span: self.inner.span(),
                    slice: self.inner.slice().to_string(),
                }))
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenize source code lazily.
pub fn lex(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}
