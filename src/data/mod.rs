//! Data module - workbook loading and sheet schema

mod loader;
pub mod schema;

pub use loader::{LoadError, Workbook};
