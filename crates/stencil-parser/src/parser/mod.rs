//! Hand-written parser for stencil programs.
//!
//! ## Architecture
//!
//! - `stream`: lazy TokenStream with one token of lookahead
//! - `error`: ParseError
//! - `grammar`: build-once production table, one rule per mnemonic
//!
//! A program is one or more statements with no separators. Parsing stops
//! at the first token no production can accept.

mod error;
pub mod grammar;
mod stream;

pub use error::{ParseError, END_OF_INPUT};
use stream::TokenStream;

use stencil_lexer::{LexError, Spanned};
use stencil_runtime::{Instruction, Program};
use tracing::debug;

/// Parse a token sequence into a program.
///
/// Tokens are pulled lazily, so a lexing failure is reported only once the
/// parser reaches it.
pub fn parse<I>(tokens: I) -> Result<Program, ParseError>
where
    I: IntoIterator<Item = Result<Spanned, LexError>>,
{
    let mut stream = TokenStream::new(tokens.into_iter());
    let mut instructions = vec![parse_statement(&mut stream)?];
    while !stream.at_end()? {
        instructions.push(parse_statement(&mut stream)?);
    }
    debug!(
        instructions = instructions.len(),
        bytes = stream.position(),
        "program parsed"
    );
    Ok(Program::new(instructions))
}

/// Lex and parse source text.
pub fn parse_source(source: &str) -> Result<Program, ParseError> {
    parse(stencil_lexer::lex(source))
}

fn parse_statement<I>(stream: &mut TokenStream<I>) -> Result<Instruction, ParseError>
where
    I: Iterator<Item = Result<Spanned, LexError>>,
{
    let Spanned { token, span } = stream.advance()?;
    match grammar::production_for(&token) {
        Some(production) => production.parse(stream, span),
        None => Err(ParseError::unexpected(&token, span)),
    }
}
