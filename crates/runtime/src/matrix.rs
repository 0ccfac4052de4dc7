//! Matrix storage
//!
//! Flat row-major 2-D container with bounds-checked and toroidal element
//! access, plus the text renderings used by `PMX`.

use std::fmt;

use crate::error::{Error, IndexError, Result};
use crate::types::MatrixStyle;

/// A 2-D matrix of reals stored row-major.
///
/// `contents` is either empty (created but not yet populated) or holds
/// exactly `rows * cols` values.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: i64,
    cols: i64,
    contents: Vec<f64>,
}

impl Matrix {
    /// Build a matrix from existing contents.
    ///
    /// Callers are responsible for `contents` being empty or `rows * cols`
    /// long; use [`Matrix::set`] when the count comes from user input.
    pub fn new(rows: i64, cols: i64, contents: Vec<f64>) -> Self {
        debug_assert!(
            contents.is_empty() || contents.len() as u128 == element_count(rows, cols)
        );
        Self {
            rows,
            cols,
            contents,
        }
    }

    /// A matrix with declared dimensions and no contents yet
    pub fn unpopulated(rows: i64, cols: i64) -> Self {
        Self::new(rows, cols, Vec::new())
    }

    pub fn rows(&self) -> i64 {
        self.rows
    }

    pub fn cols(&self) -> i64 {
        self.cols
    }

    pub fn dimensions(&self) -> (i64, i64) {
        (self.rows, self.cols)
    }

    pub fn contents(&self) -> &[f64] {
        &self.contents
    }

    pub fn is_populated(&self) -> bool {
        !self.contents.is_empty()
    }

    /// Number of values a full population requires.
    ///
    /// Exact for any `i64` dimensions, so it may exceed `usize::MAX`.
    pub fn capacity(&self) -> u128 {
        element_count(self.rows, self.cols)
    }

    /// Replace the whole contents.
    ///
    /// Fails with `ArgumentCount` unless exactly `rows * cols` values are
    /// given, leaving the matrix untouched.
    pub fn set(&mut self, contents: Vec<f64>) -> Result<()> {
        let required = self.capacity();
        if contents.len() as u128 != required {
            return Err(Error::ArgumentCount {
                required,
                given: contents.len(),
            });
        }
        self.contents = contents;
        Ok(())
    }

    /// Fail unless the matrix holds values
    pub fn ensure_populated(&self) -> std::result::Result<(), IndexError> {
        if self.is_populated() {
            Ok(())
        } else {
            Err(IndexError::Unpopulated {
                rows: self.rows,
                cols: self.cols,
            })
        }
    }

    /// Bounds-checked element access with `[row, col]`.
    ///
    /// Negative indices are rejected; see [`Matrix::get_wraparound`].
    pub fn get(&self, indices: &[i64]) -> std::result::Result<f64, IndexError> {
        let (row, col) = split_indices(indices)?;
        if row < 0 || col < 0 {
            return Err(IndexError::Negative { row, col });
        }
        if row >= self.rows || col >= self.cols {
            return Err(IndexError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.contents
            .get((row * self.cols + col) as usize)
            .copied()
            .ok_or(IndexError::Unpopulated {
                rows: self.rows,
                cols: self.cols,
            })
    }

    /// Toroidal element access: each index wraps modulo its dimension,
    /// always landing in `[0, dim)` regardless of sign.
    pub fn get_wraparound(&self, indices: &[i64]) -> std::result::Result<f64, IndexError> {
        let (row, col) = split_indices(indices)?;
        if self.rows <= 0 || self.cols <= 0 {
            return Err(IndexError::Unpopulated {
                rows: self.rows,
                cols: self.cols,
            });
        }
        self.get(&[row.rem_euclid(self.rows), col.rem_euclid(self.cols)])
    }

    /// Render with the given style
    pub fn render(&self, style: MatrixStyle) -> String {
        match style {
            MatrixStyle::Plain => self.to_string(),
            MatrixStyle::Aligned => self.aligned().to_string(),
        }
    }

    /// Column-aligned rendering adapter
    pub fn aligned(&self) -> Aligned<'_> {
        Aligned(self)
    }

    fn write_rows(&self, f: &mut fmt::Formatter<'_>, cells: &[String]) -> fmt::Result {
        if !self.is_populated() {
            return write!(
                f,
                "Unpopulated matrix of dimensions ({}, {})",
                self.rows, self.cols
            );
        }
        let cols = self.cols as usize;
        let last = self.rows as usize - 1;
        for (r, row) in cells.chunks(cols).enumerate() {
            f.write_str(if r == 0 { "[[" } else { " [" })?;
            f.write_str(&row.join(" "))?;
            f.write_str("]")?;
            if r == last {
                f.write_str("]")?;
            } else {
                f.write_str("\n")?;
            }
        }
        Ok(())
    }
}

fn element_count(rows: i64, cols: i64) -> u128 {
    // Both factors are below 2^63, so the product fits
    u128::from(rows.max(0).unsigned_abs()) * u128::from(cols.max(0).unsigned_abs())
}

fn split_indices(indices: &[i64]) -> std::result::Result<(i64, i64), IndexError> {
    match indices {
        [row, col] => Ok((*row, *col)),
        _ => Err(IndexError::Arity {
            given: indices.len(),
        }),
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells: Vec<String> = self.contents.iter().map(|v| v.to_string()).collect();
        self.write_rows(f, &cells)
    }
}

/// Displays a matrix with integer parts right-justified and fractional
/// parts left-justified across the whole matrix.
pub struct Aligned<'a>(&'a Matrix);

impl fmt::Display for Aligned<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let matrix = self.0;
        let parts: Vec<(String, Option<String>)> = matrix
            .contents
            .iter()
            .map(|v| {
                let text = v.to_string();
                match text.split_once('.') {
                    Some((int, frac)) => (int.to_string(), Some(frac.to_string())),
                    None => (text, None),
                }
            })
            .collect();

        let int_width = parts.iter().map(|(int, _)| int.len()).max().unwrap_or(0);
        let frac_width = parts
            .iter()
            .filter_map(|(_, frac)| frac.as_ref().map(String::len))
            .max()
            .unwrap_or(0);

        let cells: Vec<String> = parts
            .iter()
            .map(|(int, frac)| {
                let mut cell = format!("{int:>int_width$}");
                if frac_width > 0 {
                    match frac {
                        Some(frac) => cell.push_str(&format!(".{frac:<frac_width$}")),
                        None => cell.push_str(&" ".repeat(frac_width + 1)),
                    }
                }
                cell
            })
            .collect();
        matrix.write_rows(f, &cells)
    }
}
