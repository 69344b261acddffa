//! Transforms over a validated [`crate::types::Grid`].
//!
//! Every function here is pure and assumes the grid invariants hold; none re-validate.
//!
//! - [`transpose()`]: swap rows and columns
//! - [`flatten()`]: all cells as one comma-joined line
//! - [`render()`]: canonical comma/newline text
//! - [`sum()`], [`multiply()`], [`reduce()`]: aggregates that fail with
//!   [`crate::error::Overflow`] outside the `i32` range
//!
//! ## Example
//!
//! ```rust
//! use csv_matrix::processing::{flatten, multiply, render, sum, transpose};
//! use csv_matrix::types::Grid;
//!
//! let g = Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
//! assert_eq!(render(&transpose(&g)), "1,3\n2,4\n");
//! assert_eq!(flatten(&g), "1,2,3,4");
//! assert_eq!(sum(&g), Ok(10));
//! assert_eq!(multiply(&g), Ok(24));
//! ```

pub mod reduce;
pub mod render;
pub mod transpose;

pub use reduce::{multiply, reduce, sum, ReduceOp};
pub use render::{flatten, render};
pub use transpose::transpose;
