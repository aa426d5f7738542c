//! Dashboard state and event loop.
//!
//! [`App`] owns the theme, chart style, region picker and the summary for the
//! currently selected region. The summary is recomputed from the dataset
//! whenever the selection changes.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use sales_core::models::{RegionFilter, SalesSummary};
use sales_runtime::dataset::SalesDataset;
use tracing::debug;

use crate::chart_view::{self, ChartStyle};
use crate::components::header::Header;
use crate::components::kpi_cards::render_kpi_cards;
use crate::components::region_picker::RegionPicker;
use crate::themes::Theme;

pub const HELP_TEXT: &str = "←/→ or h/l: change region  1-5: jump  q: quit";

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the sales dashboard.
pub struct App {
    pub theme: Theme,
    pub chart_style: ChartStyle,
    pub picker: RegionPicker,
    /// Summary for `picker.selected()`.
    pub summary: SalesSummary,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, chart_style: ChartStyle, region: RegionFilter) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            chart_style,
            picker: RegionPicker::new(region),
            summary: SalesSummary::default(),
            should_quit: false,
        }
    }

    /// Recompute the summary for the current selection.
    pub fn refresh(&mut self, dataset: &SalesDataset) {
        let region = self.picker.selected();
        self.summary = dataset.query(region);
        debug!(
            "Dashboard region '{}': {} days",
            region,
            self.summary.series.len()
        );
    }

    /// Apply one key press. Returns `true` when the selected region changed.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let before = self.picker.selected();
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.picker.next(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => self.picker.prev(),
            KeyCode::Char(c @ '1'..='5') => {
                let index = c as usize - '1' as usize;
                self.picker.select(index);
            }
            _ => {}
        }
        self.picker.selected() != before
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Run the dashboard until `q`, `Esc` or `Ctrl+C`.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout on the current
    /// thread.
    pub fn run(mut self, dataset: &SalesDataset) -> io::Result<()> {
        self.refresh(dataset);

        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key) {
                            self.refresh(dataset);
                        }
                    }
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the whole dashboard into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let [header, picker, chart, cards, help] = Layout::vertical([
            Constraint::Length(4),
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        frame.render_widget(Paragraph::new(Header::new(&self.theme).to_lines()), header);
        frame.render_widget(Paragraph::new(self.picker.to_line(&self.theme)), picker);

        if self.summary.is_empty() {
            chart_view::render_no_data(frame, chart, self.picker.selected().label(), &self.theme);
        } else {
            chart_view::render_sales_chart(
                frame,
                chart,
                &self.summary.series,
                self.chart_style,
                &self.theme,
            );
        }

        render_kpi_cards(frame, cards, &self.summary.metrics, &self.theme);

        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(HELP_TEXT, self.theme.dim))).centered(),
            help,
        );
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
