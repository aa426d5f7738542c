//! Plain-text rendering for the `transform` and `report` subcommands.

use std::fmt::Write;

use sales_core::formatting::{format_currency, format_percent};
use sales_core::models::{RegionFilter, SalesSummary, PRICE_CHANGE_CUTOFF};
use sales_data::transform::TransformResult;

/// One-paragraph summary of a transform run.
pub fn render_transform_summary(result: &TransformResult) -> String {
    format!(
        "Read {} rows from {} files\nKept {} Pink Morsel rows\nWrote {}\n",
        result.rows_read,
        result.files_read,
        result.rows_kept(),
        result.output_path.display()
    )
}

/// Daily table followed by the before/after KPIs.
pub fn render_text_report(region: RegionFilter, summary: &SalesSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Pink Morsel sales (region: {})", region.label());
    let _ = writeln!(out);

    if summary.is_empty() {
        let _ = writeln!(out, "No sales data for region: {}", region.label());
        return out;
    }

    let _ = writeln!(out, "{:<12} {:>16}", "Date", "Sales");
    for point in &summary.series {
        let _ = writeln!(
            out,
            "{:<12} {:>16}",
            point.date.to_string(),
            format_currency(point.total_sales)
        );
    }

    let metrics = &summary.metrics;
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "{:<20} {:>16}",
        format!("Before {}:", PRICE_CHANGE_CUTOFF),
        format_currency(metrics.before_sales)
    );
    let _ = writeln!(
        out,
        "{:<20} {:>16}",
        format!("From {}:", PRICE_CHANGE_CUTOFF),
        format_currency(metrics.after_sales)
    );
    let _ = writeln!(
        out,
        "{:<20} {:>16}",
        "Change:",
        format_percent(metrics.percent_change)
    );
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use sales_core::models::{DailySalesPoint, Region, SalesMetrics};
    use std::path::PathBuf;

    fn summary() -> SalesSummary {
        SalesSummary {
            series: vec![
                DailySalesPoint {
                    date: NaiveDate::from_ymd_opt(2021, 1, 10).unwrap(),
                    total_sales: Decimal::from(5),
                },
                DailySalesPoint {
                    date: NaiveDate::from_ymd_opt(2021, 1, 20).unwrap(),
                    total_sales: Decimal::from(3),
                },
            ],
            metrics: SalesMetrics {
                before_sales: Decimal::from(5),
                after_sales: Decimal::from(3),
                percent_change: Decimal::from(-40),
            },
        }
    }

    #[test]
    fn test_text_report_lists_days_and_kpis() {
        let text = render_text_report(RegionFilter::Only(Region::North), &summary());

        assert!(text.starts_with("Pink Morsel sales (region: North)\n"));
        assert!(text.contains("2021-01-10"));
        assert!(text.contains("$5.00"));
        assert!(text.contains("Before 2021-01-15:"));
        assert!(text.contains("From 2021-01-15:"));
        assert!(text.contains("-40.00%"));
    }

    #[test]
    fn test_text_report_empty_summary() {
        let text = render_text_report(RegionFilter::Only(Region::East), &SalesSummary::default());
        assert!(text.contains("No sales data for region: East"));
        assert!(!text.contains("Change:"));
    }

    #[test]
    fn test_transform_summary() {
        let result = TransformResult {
            records: vec![],
            files_read: 3,
            rows_read: 42,
            output_path: PathBuf::from("formatted_sales_output.csv"),
        };
        let text = render_transform_summary(&result);
        assert!(text.contains("Read 42 rows from 3 files"));
        assert!(text.contains("Kept 0 Pink Morsel rows"));
        assert!(text.contains("formatted_sales_output.csv"));
    }
}
