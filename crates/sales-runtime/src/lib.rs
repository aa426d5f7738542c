//! Runtime layer for the Pink Morsel tools.
//!
//! Resolves transform inputs, runs the pipeline and owns the loaded dataset
//! that the report and dashboard query.

pub mod dataset;
pub mod pipeline;

pub use sales_core as core;
pub use sales_data as data;
