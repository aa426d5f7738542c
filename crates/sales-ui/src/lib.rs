//! Terminal dashboard for Pink Morsel sales.
//!
//! Provides themes, the header, region picker and KPI card components, the
//! daily sales chart and the application event loop, built on [`ratatui`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod themes;

pub use sales_core as core;
