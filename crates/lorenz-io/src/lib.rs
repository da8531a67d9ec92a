//! lorenz-io - Tabular data boundary for lorenz
//!
//! This crate provides the table capability consumed by `lorenz-stats`
//! and the backends that implement it:
//!
//! - **DataFrame**: owned column-oriented table
//! - **RecordTable**: row-oriented numeric records
//! - **CSV**: comma/tab separated files with type inference
//!
//! # Design
//!
//! All backends implement the `TabularData` trait. Consumers never branch
//! on the concrete backend; they only ask for numeric columns by name.

pub mod frame;
pub mod records;
pub mod schema;
pub mod table;

#[cfg(feature = "csv")]
pub mod csv_reader;

pub use frame::*;
pub use records::*;
pub use schema::*;
pub use table::*;

#[cfg(feature = "csv")]
pub use csv_reader::CsvReader;
