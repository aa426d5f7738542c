//! The loaded normalized artifact, queried once per region filter.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use sales_core::error::Result;
use sales_core::models::{NormalizedSalesRecord, RegionFilter, SalesSummary};
use sales_data::aggregator::SalesAggregator;
use sales_data::reader::read_normalized_records;
use tracing::info;

/// Normalized records loaded once at startup and shared by reference.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    path: Option<PathBuf>,
    records: Vec<NormalizedSalesRecord>,
}

impl SalesDataset {
    /// Read the normalized CSV at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let records = read_normalized_records(path)?;
        info!("Loaded {} normalized records from {}", records.len(), path.display());
        Ok(Self {
            path: Some(path.to_path_buf()),
            records,
        })
    }

    /// Wrap records that are already in memory.
    pub fn from_records(records: Vec<NormalizedSalesRecord>) -> Self {
        Self {
            path: None,
            records,
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn records(&self) -> &[NormalizedSalesRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Daily series and KPIs for `filter`.
    pub fn query(&self, filter: RegionFilter) -> SalesSummary {
        SalesAggregator::aggregate(&self.records, filter)
    }

    /// Earliest and latest sale dates, if any records are loaded.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.records.iter().map(|r| r.date).min()?;
        let max = self.records.iter().map(|r| r.date).max()?;
        Some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sales_core::error::SalesError;
    use sales_core::models::Region;
    use tempfile::TempDir;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_load_and_query() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("formatted_sales_output.csv");
        std::fs::write(
            &path,
            "Sales,Date,Region\n5,2021-01-10,north\n3,2021-01-20,north\n8,2021-01-20,south\n",
        )
        .unwrap();

        let dataset = SalesDataset::load(&path).unwrap();
        assert_eq!(dataset.records().len(), 3);
        assert_eq!(dataset.path(), Some(path.as_path()));

        let north = dataset.query(RegionFilter::Only(Region::North));
        assert_eq!(north.metrics.before_sales, Decimal::from(5));
        assert_eq!(north.metrics.after_sales, Decimal::from(3));
        assert_eq!(north.metrics.percent_change, Decimal::from(-40));

        let all = dataset.query(RegionFilter::All);
        assert_eq!(all.series.len(), 2);
        assert_eq!(all.series[1].total_sales, Decimal::from(11));
    }

    #[test]
    fn test_load_missing_file_is_ingest_error() {
        let dir = TempDir::new().unwrap();
        let err = SalesDataset::load(&dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, SalesError::FileNotFound(_)));
    }

    #[test]
    fn test_query_unmatched_region_is_empty() {
        let dataset = SalesDataset::from_records(vec![NormalizedSalesRecord::new(
            Decimal::from(10),
            date("2021-02-01"),
            Region::East,
        )]);
        let summary = dataset.query(RegionFilter::Only(Region::North));
        assert!(summary.is_empty());
        assert!(summary.metrics.percent_change.is_zero());
    }

    #[test]
    fn test_date_range() {
        assert_eq!(SalesDataset::default().date_range(), None);

        let dataset = SalesDataset::from_records(vec![
            NormalizedSalesRecord::new(Decimal::ONE, date("2021-01-20"), Region::West),
            NormalizedSalesRecord::new(Decimal::ONE, date("2020-12-01"), Region::West),
        ]);
        assert_eq!(
            dataset.date_range(),
            Some((date("2020-12-01"), date("2021-01-20")))
        );
    }
}
