//! `csv-matrix` ingests a rectangular grid of integers submitted as comma-separated text,
//! validates it strictly, and runs a small set of deterministic transforms over it.
//!
//! The flow is one-way: raw bytes, then a validated [`types::Grid`], then a transform result,
//! then rendered text or a number.
//!
//! ## What is accepted
//!
//! - The declared content type must be exactly `text/csv` ([`ingestion::CSV_CONTENT_TYPE`]).
//! - Lines are separated by `\n` (or `\r\n`); cells by `,`. Every line must have the same number
//!   of cells as the first.
//! - Every cell is a base-10 integer in the `i32` range. No whitespace, no quoting.
//!
//! The first violation in row-major order is reported as an [`error::MatrixViolation`] whose
//! message names the 1-based row and column.
//!
//! ## Quick example: ingest and transform
//!
//! ```rust
//! use csv_matrix::ingestion::{parse_csv, CSV_CONTENT_TYPE};
//! use csv_matrix::processing::{flatten, multiply, render, sum, transpose};
//!
//! # fn main() -> Result<(), csv_matrix::MatrixError> {
//! let grid = parse_csv(Some(&b"1,2,3\n4,5,6\n7,8,9"[..]), Some(CSV_CONTENT_TYPE))?;
//!
//! assert_eq!(render(&grid), "1,2,3\n4,5,6\n7,8,9\n");
//! assert_eq!(render(&transpose(&grid)), "1,4,7\n2,5,8\n3,6,9\n");
//! assert_eq!(flatten(&grid), "1,2,3,4,5,6,7,8,9");
//! assert_eq!(sum(&grid)?, 45);
//! assert_eq!(multiply(&grid)?, 362880);
//! # Ok(())
//! # }
//! ```
//!
//! ## Service layer
//!
//! [`service::MatrixService`] bundles ingestion and a transform behind a named
//! [`service::Operation`], reports outcomes to an optional [`observability::MatrixObserver`], and
//! can collapse the outcome into a serializable [`service::Response`]:
//!
//! ```rust
//! use csv_matrix::service::{Body, MatrixService, Operation, Status};
//!
//! let svc = MatrixService::default();
//! let resp = svc.handle(Operation::Sum, Some(&b"1,2\n3,x"[..]), Some("text/csv"));
//! assert_eq!(resp.status, Status::ClientError);
//! assert_eq!(resp.body, Body::Number(-1));
//! assert_eq!(
//!     resp.failure.unwrap().message,
//!     "Invalid integer value at row 2, column 2"
//! );
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: the validator
//! - [`types`]: the [`types::Grid`] data model
//! - [`processing`]: transpose/flatten/render/sum/multiply
//! - [`service`]: operation dispatch and response mapping
//! - [`observability`]: observer trait plus stderr/file/composite observers
//! - [`error`]: error types

pub mod error;
pub mod ingestion;
pub mod observability;
pub mod processing;
pub mod service;
pub mod types;

pub use error::{MatrixError, MatrixResult};
