//! The three before/after KPI cards shown under the chart.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use sales_core::formatting::{format_currency, format_percent};
use sales_core::models::SalesMetrics;

use crate::themes::Theme;

pub const BEFORE_TITLE: &str = " Sales before 15 Jan 2021 ";
pub const AFTER_TITLE: &str = " Sales from 15 Jan 2021 ";
pub const CHANGE_TITLE: &str = " Change ";

/// Render before, after and percent change side by side into `area`.
pub fn render_kpi_cards(frame: &mut Frame, area: Rect, metrics: &SalesMetrics, theme: &Theme) {
    let [before, after, change] = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .areas(area);

    render_card(
        frame,
        before,
        BEFORE_TITLE,
        Span::styled(format_currency(metrics.before_sales), theme.value),
        theme,
    );
    render_card(
        frame,
        after,
        AFTER_TITLE,
        Span::styled(format_currency(metrics.after_sales), theme.value),
        theme,
    );
    render_card(
        frame,
        change,
        CHANGE_TITLE,
        Span::styled(
            format_percent(metrics.percent_change),
            theme.change_style(metrics.percent_change),
        ),
        theme,
    );
}

fn render_card(frame: &mut Frame, area: Rect, title: &str, value: Span<'static>, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(Span::styled(title.to_string(), theme.label));
    frame.render_widget(
        Paragraph::new(Line::from(value))
            .alignment(Alignment::Center)
            .block(block),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
