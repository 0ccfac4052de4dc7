//! Stencil application
//!
//! Convolves a small odd-by-odd weight matrix over a matrix with toroidal
//! boundaries. The matrix is first padded into a halo resampled from the
//! original with wraparound indexing, so the convolution itself never reads
//! out of bounds.
//!
//! Each output cell is `matrix[r][c] + Σ stencil[i][j] * halo[r + i][c + j]`:
//! the unweighted center value seeds the accumulator and the full weighted
//! sum (including any weight on the stencil's own center) is added to it.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::error::{Error, IndexError, Result};
use crate::matrix::Matrix;

/// Apply `stencil` to `matrix`, convolving rows in parallel.
///
/// Neither input is modified; the result has the dimensions of `matrix`.
pub fn apply_stencil(stencil: &Matrix, matrix: &Matrix) -> Result<Matrix> {
    apply_stencil_with(stencil, matrix, true)
}

/// Apply `stencil` to `matrix`, optionally on the rayon pool.
///
/// Every cell accumulates its terms in the same order either way, so the
/// parallel and sequential results are bit-identical.
#[instrument(skip_all, fields(stencil = ?stencil.dimensions(), matrix = ?matrix.dimensions()))]
pub fn apply_stencil_with(stencil: &Matrix, matrix: &Matrix, parallel: bool) -> Result<Matrix> {
    let (stencil_rows, stencil_cols) = stencil.dimensions();
    if stencil_rows % 2 == 0 || stencil_cols % 2 == 0 {
        return Err(Error::InvalidStencilDimensions {
            rows: stencil_rows,
            cols: stencil_cols,
        });
    }
    stencil.ensure_populated()?;
    matrix.ensure_populated()?;

    let row_layers = (stencil_rows - 1) / 2;
    let col_layers = (stencil_cols - 1) / 2;
    let halo = build_halo(matrix, row_layers, col_layers)?;
    debug!(halo = ?halo.dimensions(), parallel, "halo built");

    let (rows, cols) = matrix.dimensions();
    let mut contents = vec![0.0; matrix.contents().len()];
    let convolve = |(r, row): (usize, &mut [f64])| -> std::result::Result<(), IndexError> {
        let r = r as i64;
        for (c, cell) in row.iter_mut().enumerate() {
            let c = c as i64;
            let mut acc = halo.get(&[r + row_layers, c + col_layers])?;
            for st_r in 0..stencil_rows {
                for st_c in 0..stencil_cols {
                    acc += stencil.get(&[st_r, st_c])? * halo.get(&[r + st_r, c + st_c])?;
                }
            }
            *cell = acc;
        }
        Ok(())
    };

    if parallel {
        contents
            .par_chunks_mut(cols as usize)
            .enumerate()
            .try_for_each(convolve)?;
    } else {
        contents
            .chunks_mut(cols as usize)
            .enumerate()
            .try_for_each(convolve)?;
    }

    Ok(Matrix::new(rows, cols, contents))
}

/// Pad `matrix` by `row_layers` / `col_layers` on every side.
///
/// Every halo cell, the interior included, is read from the original matrix
/// with wraparound indexing.
fn build_halo(
    matrix: &Matrix,
    row_layers: i64,
    col_layers: i64,
) -> std::result::Result<Matrix, IndexError> {
    let (rows, cols) = matrix.dimensions();
    let halo_rows = rows + 2 * row_layers;
    let halo_cols = cols + 2 * col_layers;
    let mut contents = Vec::with_capacity((halo_rows * halo_cols) as usize);
    for r in -row_layers..rows + row_layers {
        for c in -col_layers..cols + col_layers {
            contents.push(matrix.get_wraparound(&[r, c])?);
        }
    }
    Ok(Matrix::new(halo_rows, halo_cols, contents))
}
