//! Shared domain types for the Pink Morsel sales pipeline.
//!
//! Holds the record and aggregate models, the error type, number formatting
//! helpers and the command-line settings used by every other crate.

pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;

pub use error::{Result, SalesError};
