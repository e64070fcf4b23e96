//! Reduced row-echelon form over exact rationals, plus the identity and augmentation
//! helpers needed to read a null space off the reduced matrix.
//!
//! All arithmetic is done on `malachite::Rational`, so a reduced entry is zero exactly
//! when it is mathematically zero.
use malachite::Rational;
use malachite::num::basic::traits::{One, Zero};
use nalgebra::DMatrix;

/// n×n identity matrix
pub fn identity(n: usize) -> DMatrix<Rational> {
    DMatrix::from_fn(n, n, |i, j| if i == j { Rational::ONE } else { Rational::ZERO })
}

/// `[left | right]`; both matrices must have the same number of rows
pub fn augment(left: &DMatrix<Rational>, right: &DMatrix<Rational>) -> DMatrix<Rational> {
    assert_eq!(
        left.nrows(),
        right.nrows(),
        "augmented blocks must have the same number of rows"
    );
    let left_columns = left.ncols();
    DMatrix::from_fn(left.nrows(), left_columns + right.ncols(), |i, j| {
        if j < left_columns {
            left[(i, j)].clone()
        } else {
            right[(i, j - left_columns)].clone()
        }
    })
}

/// `[matrix | I]` with an identity block as tall as the matrix
pub fn augment_with_identity(matrix: &DMatrix<Rational>) -> DMatrix<Rational> {
    augment(matrix, &identity(matrix.nrows()))
}

/// integer matrix given row by row, promoted to rationals
pub fn rational_matrix(rows: &[Vec<i64>]) -> DMatrix<Rational> {
    let ncols = rows.first().map_or(0, |row| row.len());
    DMatrix::from_fn(rows.len(), ncols, |i, j| Rational::from(rows[i][j]))
}

/// Gauss–Jordan elimination to reduced row-echelon form.
///
/// Columns are processed left to right. The pivot is the first nonzero entry at or
/// below the current pivot row; a column without one is skipped without advancing the
/// row. The pivot row is scaled to a leading 1 and the column is cleared in every other
/// row, above and below.
pub fn reduced_row_echelon_form(matrix: &DMatrix<Rational>) -> DMatrix<Rational> {
    let mut reduced = matrix.clone();
    let (row_count, column_count) = reduced.shape();
    let mut pivot_row = 0;
    let mut pivot_column = 0;
    while pivot_row < row_count && pivot_column < column_count {
        let Some(found) =
            (pivot_row..row_count).find(|&i| reduced[(i, pivot_column)] != Rational::ZERO)
        else {
            pivot_column += 1;
            continue;
        };
        reduced.swap_rows(pivot_row, found);

        // entries left of the pivot are already zero in the pivot row
        let pivot = reduced[(pivot_row, pivot_column)].clone();
        for j in pivot_column..column_count {
            let scaled = &reduced[(pivot_row, j)] / &pivot;
            reduced[(pivot_row, j)] = scaled;
        }

        for i in 0..row_count {
            if i == pivot_row {
                continue;
            }
            let factor = reduced[(i, pivot_column)].clone();
            if factor == Rational::ZERO {
                continue;
            }
            for j in pivot_column..column_count {
                let delta = &factor * &reduced[(pivot_row, j)];
                reduced[(i, j)] -= delta;
            }
        }

        pivot_row += 1;
        pivot_column += 1;
    }
    reduced
}

/// true when the first `width` entries of the row are all zero
pub fn is_zero_prefix(matrix: &DMatrix<Rational>, row: usize, width: usize) -> bool {
    (0..width).all(|j| matrix[(row, j)] == Rational::ZERO)
}
