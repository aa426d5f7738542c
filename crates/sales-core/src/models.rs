use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SalesError;

/// The only product carried into the normalized output.
pub const TARGET_PRODUCT: &str = "pink morsel";

/// Date of the Pink Morsel price increase. Sales on this date count as "after".
pub const PRICE_CHANGE_CUTOFF: NaiveDate = match NaiveDate::from_ymd_opt(2021, 1, 15) {
    Some(date) => date,
    None => panic!("invalid price change cutoff"),
};

// ── Region ────────────────────────────────────────────────────────────────────

/// Sales region as it appears in the source data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    North,
    East,
    South,
    West,
}

impl Region {
    /// All regions, in the order the dashboard lists them.
    pub const ALL: [Region; 4] = [Region::North, Region::East, Region::South, Region::West];

    /// Lowercase name used in CSV files.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::North => "north",
            Region::East => "east",
            Region::South => "south",
            Region::West => "west",
        }
    }

    /// Capitalised name used for display labels.
    pub fn label(self) -> &'static str {
        match self {
            Region::North => "North",
            Region::East => "East",
            Region::South => "South",
            Region::West => "West",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = SalesError;

    /// Exact lowercase match, as written in the data files.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "north" => Ok(Region::North),
            "east" => Ok(Region::East),
            "south" => Ok(Region::South),
            "west" => Ok(Region::West),
            other => Err(SalesError::Config(format!("unknown region '{other}'"))),
        }
    }
}

// ── RegionFilter ──────────────────────────────────────────────────────────────

/// Selects which records a query aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegionFilter {
    #[default]
    All,
    Only(Region),
}

impl RegionFilter {
    /// Every legal filter value, `All` first.
    pub const CHOICES: [RegionFilter; 5] = [
        RegionFilter::All,
        RegionFilter::Only(Region::North),
        RegionFilter::Only(Region::East),
        RegionFilter::Only(Region::South),
        RegionFilter::Only(Region::West),
    ];

    /// `true` when `region` passes this filter.
    pub fn matches(self, region: Region) -> bool {
        match self {
            RegionFilter::All => true,
            RegionFilter::Only(r) => r == region,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RegionFilter::All => "All",
            RegionFilter::Only(r) => r.label(),
        }
    }
}

impl fmt::Display for RegionFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegionFilter::All => f.write_str("all"),
            RegionFilter::Only(r) => write!(f, "{r}"),
        }
    }
}

impl FromStr for RegionFilter {
    type Err = SalesError;

    /// Case-insensitive, accepts `all` or any region name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        if lower == "all" {
            return Ok(RegionFilter::All);
        }
        lower.parse::<Region>().map(RegionFilter::Only)
    }
}

// ── Records ───────────────────────────────────────────────────────────────────

/// One row from a raw daily sales file.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSalesRecord {
    pub product: String,
    /// Price text exactly as ingested, e.g. `"$3.00"`.
    pub price: String,
    pub quantity: u64,
    pub date: NaiveDate,
    pub region: Region,
    /// File the row was read from.
    pub source: Arc<Path>,
    /// 1-based line number within `source` (the header is line 1).
    pub line: u64,
}

/// A sales row reduced to amount, date and region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedSalesRecord {
    #[serde(rename = "Sales", with = "rust_decimal::serde::str")]
    pub sales: Decimal,
    #[serde(rename = "Date")]
    pub date: NaiveDate,
    #[serde(rename = "Region")]
    pub region: Region,
}

impl NormalizedSalesRecord {
    pub fn new(sales: Decimal, date: NaiveDate, region: Region) -> Self {
        Self {
            sales,
            date,
            region,
        }
    }
}

// ── Aggregates ────────────────────────────────────────────────────────────────

/// Total sales for one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySalesPoint {
    pub date: NaiveDate,
    pub total_sales: Decimal,
}

/// Before/after KPIs around the price change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesMetrics {
    pub before_sales: Decimal,
    pub after_sales: Decimal,
    /// `((after - before) / before) * 100`, or `0` when `before` is zero.
    pub percent_change: Decimal,
}

/// Result of one aggregation query.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SalesSummary {
    pub series: Vec<DailySalesPoint>,
    pub metrics: SalesMetrics,
}

impl SalesSummary {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}
