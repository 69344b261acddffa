//! Core data model.
//!
//! Ingestion produces a [`Grid`]: a rectangular, immutable block of `i32` cells with at least one
//! row and one column.

use serde::Serialize;

use crate::error::MatrixViolation;

/// Validated rectangular grid of 32-bit signed integers.
///
/// Cells are stored row-major. A `Grid` can only be built through the validator or
/// [`Grid::from_rows`], both of which guarantee `row_count >= 1`, `col_count >= 1`, and equal row
/// lengths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    row_count: usize,
    col_count: usize,
    cells: Vec<i32>,
}

impl Grid {
    /// Build from row-major storage whose shape the caller has already checked.
    pub(crate) fn from_parts(row_count: usize, col_count: usize, cells: Vec<i32>) -> Self {
        debug_assert!(row_count >= 1 && col_count >= 1);
        debug_assert_eq!(cells.len(), row_count * col_count);
        Self {
            row_count,
            col_count,
            cells,
        }
    }

    /// Create a grid from nested rows.
    ///
    /// Fails with [`MatrixViolation::Empty`] when there are no rows or the first row is empty, and
    /// with [`MatrixViolation::ColumnMismatch`] (1-based row) for the first row whose length
    /// differs from the first.
    pub fn from_rows(rows: Vec<Vec<i32>>) -> Result<Self, MatrixViolation> {
        let col_count = match rows.first() {
            Some(first) if !first.is_empty() => first.len(),
            _ => return Err(MatrixViolation::Empty),
        };

        let mut cells = Vec::with_capacity(rows.len() * col_count);
        for (idx, row) in rows.iter().enumerate() {
            if row.len() != col_count {
                return Err(MatrixViolation::ColumnMismatch {
                    row: idx + 1,
                    expected: col_count,
                    found: row.len(),
                });
            }
            cells.extend_from_slice(row);
        }

        Ok(Self::from_parts(rows.len(), col_count, cells))
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns.
    pub fn col_count(&self) -> usize {
        self.col_count
    }

    /// Total number of cells (`row_count * col_count`).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell at 0-based `(row, col)`, if in bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<i32> {
        if row >= self.row_count || col >= self.col_count {
            return None;
        }
        self.cells.get(row * self.col_count + col).copied()
    }

    /// Row at 0-based index `row`, if in bounds.
    pub fn row(&self, row: usize) -> Option<&[i32]> {
        let start = row.checked_mul(self.col_count)?;
        self.cells.get(start..start + self.col_count)
    }

    /// Iterate rows in order.
    pub fn rows(&self) -> impl Iterator<Item = &[i32]> + '_ {
        self.cells.chunks_exact(self.col_count)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[i32] {
        &self.cells
    }

    /// Copy out as nested rows.
    pub fn to_rows(&self) -> Vec<Vec<i32>> {
        self.rows().map(<[i32]>::to_vec).collect()
    }
}
