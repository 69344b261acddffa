//! Reductions over every cell of a [`crate::types::Grid`].

use crate::error::Overflow;
use crate::types::Grid;

/// Built-in reductions over all cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReduceOp {
    /// Sum of all cells.
    Sum,
    /// Product of all cells.
    Product,
}

/// Reduce all cells of `grid` using a built-in [`ReduceOp`].
pub fn reduce(grid: &Grid, op: ReduceOp) -> Result<i32, Overflow> {
    match op {
        ReduceOp::Sum => sum(grid),
        ReduceOp::Product => multiply(grid),
    }
}

/// Sum of all cells in row-major order.
///
/// Accumulates in `i128`, so only the final value is range-checked. Fails with [`Overflow::Sum`]
/// if it falls outside `[i32::MIN, i32::MAX]`.
pub fn sum(grid: &Grid) -> Result<i32, Overflow> {
    let total: i128 = grid.cells().iter().map(|&v| i128::from(v)).sum();
    i32::try_from(total).map_err(|_| Overflow::Sum)
}

/// Product of all cells in row-major order.
///
/// Fails with [`Overflow::Product`] if the product falls outside the `i32` range. Returns early
/// once the running magnitude passes `2^31`. Without zeros the magnitude never shrinks, so this
/// agrees with checking only the final product. Any zero yields `0`.
pub fn multiply(grid: &Grid) -> Result<i32, Overflow> {
    const MAX_MAGNITUDE: u64 = 1 << 31;

    let cells = grid.cells();
    if cells.contains(&0) {
        return Ok(0);
    }

    // |acc| <= 2^31 and |v| <= 2^31, so each step fits in i64.
    let mut acc: i64 = 1;
    for &v in cells {
        acc *= i64::from(v);
        if acc.unsigned_abs() > MAX_MAGNITUDE {
            return Err(Overflow::Product);
        }
    }
    i32::try_from(acc).map_err(|_| Overflow::Product)
}
