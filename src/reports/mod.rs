//! Report generation for computed repository metrics
//!
//! Every generator walks the same static column table, so the formats always agree on
//! which values appear and in what order.
//!
//! # Implementation Model
//!
//! Three report generators are provided, each accessed through a `generate` function:
//! - **CSV**: The primary output, one row per repository with the `TOTAL` row last
//! - **JSON**: An array of objects keyed by column id
//! - **Console**: An aligned listing of the `TOTAL` row grouped by section
//!
//! Not-applicable values are rendered as `N/A` in every format.

mod console;
mod csv;
mod json;

pub use console::generate as generate_console;
pub use csv::generate as generate_csv;
pub use json::generate as generate_json;
