//! Ingestion and validation of uploaded grids.
//!
//! [`parse_csv`] is the entrypoint: it takes the raw upload bytes and the declared content type
//! and returns a validated [`crate::types::Grid`] or the first violation found.
//! [`parse_csv_from_reader`] does the same for a stream.

pub mod csv;

pub use csv::{parse_csv, parse_csv_from_reader, CSV_CONTENT_TYPE};
