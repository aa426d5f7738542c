use crate::themes::Theme;
use ratatui::text::{Line, Span};

/// Dashboard title.
pub const TITLE: &str = "Soul Foods Pink Morsel Sales Visualiser";

/// The question the dashboard answers.
pub const QUESTION: &str =
    "Were sales higher before or after the January 15, 2021 price increase?";

/// Dashboard header rendering four lines:
///
/// 1. Application title.
/// 2. The before/after question.
/// 3. A 60-column `=` separator.
/// 4. An empty line.
pub struct Header<'a> {
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    /// Render the header as exactly four lines.
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        vec![
            Line::from(Span::styled(TITLE, self.theme.header)).centered(),
            Line::from(Span::styled(QUESTION, self.theme.question)).centered(),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)).centered(),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_to_lines_count() {
        let theme = Theme::dark();
        assert_eq!(Header::new(&theme).to_lines().len(), 4);
    }

    #[test]
    fn test_header_title_and_question() {
        let theme = Theme::dark();
        let lines = Header::new(&theme).to_lines();

        assert_eq!(text(&lines[0]), "Soul Foods Pink Morsel Sales Visualiser");
        assert!(
            text(&lines[1]).contains("January 15, 2021"),
            "question line must name the price increase date, got: {}",
            text(&lines[1])
        );
    }

    #[test]
    fn test_header_separator_line() {
        let theme = Theme::light();
        let lines = Header::new(&theme).to_lines();
        let sep = text(&lines[2]);

        assert_eq!(sep.chars().count(), 60);
        assert!(sep.chars().all(|c| c == '='));
        assert!(text(&lines[3]).is_empty());
    }
}
