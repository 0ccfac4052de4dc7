//! Matrix-literal reader
//!
//! Plain-text matrices: one row per line, numbers separated by spaces or
//! tabs. The first row fixes the column count. A trailing newline is
//! optional and empty input reads as a 0x0 matrix.
//!
//! ```text
//! 11.7 52
//! -34 -12.2
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use logos::Logos;
use thiserror::Error;
use tracing::debug;

use crate::matrix::Matrix;

#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t\r\x0C\x0B]+")]
enum LiteralToken {
    #[regex(r"-?[0-9]+(\.[0-9]*)?", |lex| lex.slice().parse::<f64>().ok())]
    Number(f64),

    #[token("\n")]
    Newline,
}

impl LiteralToken {
    fn kind(&self) -> &'static str {
        match self {
            LiteralToken::Number(_) => "NUMBER",
            LiteralToken::Newline => "NEWLINE",
        }
    }
}

/// Errors reading a matrix literal
#[derive(Debug, Error)]
pub enum LiteralError {
    #[error("Inconsistent columns in current row ({got_cols}) from those in the first row ({expected_cols})")]
    Inconsistent { expected_cols: usize, got_cols: usize },

    #[error("Unexpected `{kind}'")]
    Unexpected { kind: &'static str },

    #[error("Unrecognized input `{slice}' at byte {offset}")]
    Lexing { slice: String, offset: usize },

    #[error("failed to read matrix literal {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LiteralError {
    /// Kind name shown in front of the message
    pub fn name(&self) -> &'static str {
        match self {
            LiteralError::Inconsistent { .. } => "InconsistentMatrixDimensions",
            LiteralError::Unexpected { .. } => "ParseError",
            LiteralError::Lexing { .. } => "LexingError",
            LiteralError::Io { .. } => "IoError",
        }
    }
}

/// Accumulates rows, enforcing the first row's width on the rest
#[derive(Default)]
struct RowBuilder {
    cols: Option<usize>,
    rows: usize,
    contents: Vec<f64>,
    current: Vec<f64>,
}

impl RowBuilder {
    fn finish_row(&mut self) -> Result<(), LiteralError> {
        let got_cols = self.current.len();
        match self.cols {
            None => self.cols = Some(got_cols),
            Some(expected_cols) if expected_cols != got_cols => {
                return Err(LiteralError::Inconsistent {
                    expected_cols,
                    got_cols,
                });
            }
            Some(_) => {}
        }
        self.rows += 1;
        self.contents.append(&mut self.current);
        Ok(())
    }

    fn build(self) -> Matrix {
        let cols = self.cols.unwrap_or(0);
        Matrix::new(self.rows as i64, cols as i64, self.contents)
    }
}

/// Read a matrix from literal text
pub fn from_str(text: &str) -> Result<Matrix, LiteralError> {
    let mut lexer = LiteralToken::lexer(text);
    let mut builder = RowBuilder::default();

    while let Some(token) = lexer.next() {
        let token = token.map_err(|()| LiteralError::Lexing {
            slice: lexer.slice().to_string(),
            offset: lexer.span().start,
        })?;
        match token {
            LiteralToken::Number(value) => builder.current.push(value),
            LiteralToken::Newline if builder.current.is_empty() => {
                return Err(LiteralError::Unexpected { kind: token.kind() });
            }
            LiteralToken::Newline => builder.finish_row()?,
        }
    }
    if !builder.current.is_empty() {
        builder.finish_row()?;
    }

    let matrix = builder.build();
    debug!(dimensions = ?matrix.dimensions(), "matrix literal read");
    Ok(matrix)
}

/// Read a matrix from a literal file
pub fn from_path(path: impl AsRef<Path>) -> Result<Matrix, LiteralError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LiteralError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    from_str(&text)
}

impl FromStr for Matrix {
    type Err = LiteralError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        from_str(text)
    }
}
