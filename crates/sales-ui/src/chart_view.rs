//! Daily sales line chart with the price change marker.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use ratatui::{
    layout::Rect,
    symbols::Marker,
    text::{Line, Span, Text},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use sales_core::error::SalesError;
use sales_core::formatting::format_number;
use sales_core::models::{DailySalesPoint, PRICE_CHANGE_CUTOFF};

use crate::themes::Theme;

pub const CHART_TITLE: &str = " Daily Pink Morsel Sales ";

/// Points drawn for the dashed cutoff marker.
const CUTOFF_DASHES: usize = 24;

// ── ChartStyle ────────────────────────────────────────────────────────────────

/// How the daily series is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartStyle {
    #[default]
    Line,
    Markers,
}

impl ChartStyle {
    fn graph_type(self) -> GraphType {
        match self {
            ChartStyle::Line => GraphType::Line,
            ChartStyle::Markers => GraphType::Scatter,
        }
    }

    fn marker(self) -> Marker {
        match self {
            ChartStyle::Line => Marker::Braille,
            ChartStyle::Markers => Marker::Dot,
        }
    }
}

impl fmt::Display for ChartStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartStyle::Line => f.write_str("line"),
            ChartStyle::Markers => f.write_str("markers"),
        }
    }
}

impl FromStr for ChartStyle {
    type Err = SalesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "line" => Ok(ChartStyle::Line),
            "markers" => Ok(ChartStyle::Markers),
            other => Err(SalesError::Config(format!("unknown chart style '{other}'"))),
        }
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Render `series` as a chart, with the cutoff drawn as a dashed vertical line.
pub fn render_sales_chart(
    frame: &mut Frame,
    area: Rect,
    series: &[DailySalesPoint],
    style: ChartStyle,
    theme: &Theme,
) {
    let points: Vec<(f64, f64)> = series
        .iter()
        .map(|p| (day_number(p.date), p.total_sales.to_f64().unwrap_or(0.0)))
        .collect();

    let cutoff_x = day_number(PRICE_CHANGE_CUTOFF);
    let (x_min, x_max) = x_bounds(&points, cutoff_x);
    let y_max = y_upper_bound(&points);

    let cutoff_points: Vec<(f64, f64)> = (0..CUTOFF_DASHES)
        .map(|i| (cutoff_x, y_max * i as f64 / (CUTOFF_DASHES - 1) as f64))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("Sales")
            .marker(style.marker())
            .graph_type(style.graph_type())
            .style(theme.chart_line)
            .data(&points),
        Dataset::default()
            .name("Price increase")
            .marker(Marker::Dot)
            .graph_type(GraphType::Scatter)
            .style(theme.cutoff)
            .data(&cutoff_points),
    ];

    let x_axis = Axis::default()
        .title(Span::styled("Date", theme.label))
        .style(theme.chart_axis)
        .bounds([x_min, x_max])
        .labels([
            date_label(x_min),
            PRICE_CHANGE_CUTOFF.to_string(),
            date_label(x_max),
        ]);

    let y_axis = Axis::default()
        .title(Span::styled("Total Sales ($)", theme.label))
        .style(theme.chart_axis)
        .bounds([0.0, y_max])
        .labels(y_labels(y_max));

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.border)
                .title(Span::styled(CHART_TITLE, theme.header)),
        )
        .style(theme.text)
        .x_axis(x_axis)
        .y_axis(y_axis);

    frame.render_widget(chart, area);
}

/// Placeholder shown instead of the chart when the filter matched nothing.
pub fn render_no_data(frame: &mut Frame, area: Rect, region_label: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("No sales data for region: {region_label}"),
            theme.warning,
        )),
        Line::from(""),
        Line::from(Span::styled("Pick another region with ←/→ or 1-5.", theme.dim)),
        Line::from(Span::styled("Press 'q' or Ctrl+C to exit", theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(Text::from(text))
            .centered()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border)
                    .title(Span::styled(CHART_TITLE, theme.header)),
            ),
        area,
    );
}

// ── Internal helpers ──────────────────────────────────────────────────────────

fn day_number(date: NaiveDate) -> f64 {
    date.num_days_from_ce() as f64
}

fn date_label(day: f64) -> String {
    NaiveDate::from_num_days_from_ce_opt(day.round() as i32)
        .map(|d| d.to_string())
        .unwrap_or_default()
}

/// Date range covering the series and the cutoff, never zero-width.
fn x_bounds(points: &[(f64, f64)], cutoff_x: f64) -> (f64, f64) {
    let min = points.iter().map(|p| p.0).fold(cutoff_x, f64::min);
    let max = points.iter().map(|p| p.0).fold(cutoff_x, f64::max);
    if max - min < 1.0 {
        (min - 1.0, max + 1.0)
    } else {
        (min, max)
    }
}

/// 10% headroom above the largest daily total.
fn y_upper_bound(points: &[(f64, f64)]) -> f64 {
    let max = points.iter().map(|p| p.1).fold(0.0, f64::max);
    if max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

fn y_labels(y_max: f64) -> Vec<String> {
    [0.0, y_max / 2.0, y_max]
        .into_iter()
        .map(|v| {
            rust_decimal::Decimal::from_f64_retain(v)
                .map(|d| format_number(d, 0))
                .unwrap_or_default()
        })
        .collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
