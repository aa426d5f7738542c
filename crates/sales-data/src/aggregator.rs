//! Daily totals and before/after KPIs for one region filter.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sales_core::models::{
    DailySalesPoint, NormalizedSalesRecord, RegionFilter, SalesMetrics, SalesSummary,
    PRICE_CHANGE_CUTOFF,
};
use tracing::{debug, warn};

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that turns normalized records into a [`SalesSummary`].
pub struct SalesAggregator;

impl SalesAggregator {
    /// Aggregate `records` for `filter` around the fixed price change date.
    pub fn aggregate(records: &[NormalizedSalesRecord], filter: RegionFilter) -> SalesSummary {
        Self::aggregate_with_cutoff(records, filter, PRICE_CHANGE_CUTOFF)
    }

    /// Same as [`aggregate`](Self::aggregate) with an explicit cutoff.
    /// Records dated on `cutoff` count as "after".
    pub fn aggregate_with_cutoff(
        records: &[NormalizedSalesRecord],
        filter: RegionFilter,
        cutoff: NaiveDate,
    ) -> SalesSummary {
        let filtered: Vec<&NormalizedSalesRecord> =
            records.iter().filter(|r| filter.matches(r.region)).collect();

        if filtered.is_empty() {
            warn!("No sales records match region filter '{}'", filter);
            return SalesSummary::default();
        }

        let series = Self::daily_totals(&filtered);
        let metrics = Self::calculate_metrics(&filtered, cutoff);
        debug!(
            "Aggregated {} records into {} days for '{}'",
            filtered.len(),
            series.len(),
            filter
        );

        SalesSummary { series, metrics }
    }

    /// One point per distinct date, ascending.
    pub fn daily_totals(records: &[&NormalizedSalesRecord]) -> Vec<DailySalesPoint> {
        let mut map: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();

        for record in records {
            let total = map.entry(record.date).or_default();
            *total = accumulate(*total, record.sales);
        }

        map.into_iter()
            .map(|(date, total_sales)| DailySalesPoint { date, total_sales })
            .collect()
    }

    /// Before/after totals split at `cutoff` plus the percent change.
    pub fn calculate_metrics(records: &[&NormalizedSalesRecord], cutoff: NaiveDate) -> SalesMetrics {
        let (before_sales, after_sales) =
            records
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(before, after), r| {
                    if r.date < cutoff {
                        (accumulate(before, r.sales), after)
                    } else {
                        (before, accumulate(after, r.sales))
                    }
                });

        SalesMetrics {
            before_sales,
            after_sales,
            percent_change: Self::percent_change(before_sales, after_sales),
        }
    }

    /// `((after - before) / before) * 100`, or exactly zero when `before` is zero.
    pub fn percent_change(before: Decimal, after: Decimal) -> Decimal {
        if before.is_zero() {
            return Decimal::ZERO;
        }
        after
            .checked_sub(before)
            .and_then(|delta| delta.checked_div(before))
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .unwrap_or(Decimal::ZERO)
    }
}

/// Add `amount` to `total`, clamping at the decimal range instead of panicking.
fn accumulate(total: Decimal, amount: Decimal) -> Decimal {
    total.checked_add(amount).unwrap_or_else(|| {
        warn!("Sales total overflowed; clamping at {} + {}", total, amount);
        total.saturating_add(amount)
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
