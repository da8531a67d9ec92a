//! lorenz-stats - Gini coefficient and Lorenz curve computation
//!
//! This crate measures how concentrated an outcome is across weighted,
//! ranked records:
//!
//! - **Gini**: twice the area between the Lorenz curve and the diagonal
//! - **Lorenz curve**: cumulative outcome share against cumulative weight share
//! - **Columns**: stable ordering, normalization and running totals
//!
//! # Design
//!
//! Input arrives through `lorenz_io::TabularData`, so any table backend can
//! be measured without the computation knowing which one it is. Selected
//! columns are copied into owned vectors before sorting; the caller's table
//! is never modified. Rendering is left to the caller, who receives the
//! curve as plain data.

pub mod columns;
pub mod error;
pub mod gini;
pub mod lorenz;

pub use error::*;
pub use gini::*;
pub use lorenz::*;
