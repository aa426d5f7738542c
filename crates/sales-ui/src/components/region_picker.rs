use ratatui::text::{Line, Span};
use sales_core::models::RegionFilter;

use crate::themes::Theme;

/// Single-choice selector over [`RegionFilter::CHOICES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionPicker {
    index: usize,
}

impl RegionPicker {
    /// Start with `initial` selected.
    pub fn new(initial: RegionFilter) -> Self {
        let index = RegionFilter::CHOICES
            .iter()
            .position(|c| *c == initial)
            .unwrap_or(0);
        Self { index }
    }

    pub fn selected(&self) -> RegionFilter {
        RegionFilter::CHOICES[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move right, wrapping to the first choice.
    pub fn next(&mut self) {
        self.index = (self.index + 1) % RegionFilter::CHOICES.len();
    }

    /// Move left, wrapping to the last choice.
    pub fn prev(&mut self) {
        let len = RegionFilter::CHOICES.len();
        self.index = (self.index + len - 1) % len;
    }

    /// Jump to `index`. Returns `false` and leaves the selection unchanged
    /// when it is out of range.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= RegionFilter::CHOICES.len() {
            return false;
        }
        self.index = index;
        true
    }

    /// `Filter by Region:  (•) All  ( ) North ...`
    pub fn to_line<'a>(&self, theme: &Theme) -> Line<'a> {
        let mut spans = vec![Span::styled("Filter by Region: ", theme.label)];
        for (i, choice) in RegionFilter::CHOICES.iter().enumerate() {
            let (mark, style) = if i == self.index {
                ("(•)", theme.selected)
            } else {
                ("( )", theme.unselected)
            };
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("{mark} {}", choice.label()), style));
        }
        Line::from(spans).centered()
    }
}

impl Default for RegionPicker {
    fn default() -> Self {
        Self::new(RegionFilter::All)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
