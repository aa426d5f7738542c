//! Reusable dashboard widgets.

pub mod header;
pub mod kpi_cards;
pub mod region_picker;
