//! Token stream wrapper for the hand-written parser.

use std::iter::Peekable;

use stencil_lexer::{LexError, Spanned, Token};
use stencil_runtime::NumericValue;

use super::ParseError;

/// Lazy token stream with one token of lookahead.
///
/// Pulls from the lexer on demand, so a lexing failure surfaces exactly
/// when the parser reaches it. Tracks the end of the last consumed token
/// so end-of-input errors can point somewhere useful.
pub struct TokenStream<I>
where
    I: Iterator<Item = Result<Spanned, LexError>>,
{
    tokens: Peekable<I>,
    last_end: usize,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Result<Spanned, LexError>>,
{
    pub fn new(tokens: I) -> Self {
        Self {
            tokens: tokens.peekable(),
            last_end: 0,
        }
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&mut self) -> Result<Option<&Token>, ParseError> {
        match self.tokens.peek() {
            None => Ok(None),
            Some(Ok(spanned)) => Ok(Some(&spanned.token)),
            Some(Err(e)) => Err(e.clone().into()),
        }
    }

    /// Consume the current token, failing at end of input.
    pub fn advance(&mut self) -> Result<Spanned, ParseError> {
        match self.tokens.next() {
            None => Err(ParseError::end_of_input(self.last_end)),
            Some(Ok(spanned)) => {
                self.last_end = spanned.span.end;
                Ok(spanned)
            }
            Some(Err(e)) => Err(e.into()),
        }
    }

    pub fn at_end(&mut self) -> Result<bool, ParseError> {
        Ok(self.peek()?.is_none())
    }

    /// Byte offset just past the last consumed token
    pub fn position(&self) -> usize {
        self.last_end
    }

    /// Register or matrix index: `POS_INT`
    pub fn expect_index(&mut self) -> Result<u64, ParseError> {
        let value = self.expect_pos_int()?;
        // POS_INT never carries a sign
        Ok(value.unsigned_abs())
    }

    /// `POS_INT`
    pub fn expect_pos_int(&mut self) -> Result<i64, ParseError> {
        let Spanned { token, span } = self.advance()?;
        match token {
            Token::PosInt(value) => Ok(value),
            other => Err(ParseError::unexpected(&other, span)),
        }
    }

    /// `POS_INT | NEG_INT`
    pub fn expect_int(&mut self) -> Result<i64, ParseError> {
        let Spanned { token, span } = self.advance()?;
        match token {
            Token::PosInt(value) | Token::NegInt(value) => Ok(value),
            other => Err(ParseError::unexpected(&other, span)),
        }
    }

    /// `POS_INT | NEG_INT | REAL`, keeping the integer/real tag
    pub fn expect_number(&mut self) -> Result<NumericValue, ParseError> {
        let Spanned { token, span } = self.advance()?;
        number_value(token).ok_or_else(|| ParseError::unexpected(&token, span))
    }

    /// One or more numbers, stopping before the next non-number token
    pub fn expect_numbers(&mut self) -> Result<Vec<f64>, ParseError> {
        let mut values = vec![self.expect_number()?.as_f64()];
        while let Some(value) = self.peek()?.copied().and_then(number_value) {
            values.push(value.as_f64());
            self.advance()?;
        }
        Ok(values)
    }
}

fn number_value(token: Token) -> Option<NumericValue> {
    match token {
        Token::PosInt(value) | Token::NegInt(value) => Some(NumericValue::Integer(value)),
        Token::Real(value) => Some(NumericValue::Real(value)),
        _ => None,
    }
}
