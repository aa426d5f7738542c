//! Data layer for the Pink Morsel sales pipeline.
//!
//! Discovers and reads raw daily sales files, derives the normalized
//! `Sales,Date,Region` artifact and aggregates it into daily series and
//! before/after KPIs.

pub mod aggregator;
pub mod reader;
pub mod transform;

pub use sales_core as core;
