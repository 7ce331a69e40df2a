//! Footer with key hints for whatever has focus.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};
use crate::ui::theme::theme;

/// Render the hint line for `context`, with an optional status on the right.
pub fn render_context_help(frame: &mut Frame, area: Rect, context: KeyContext, status: &str) {
    let hints = get_context_hints(context);
    let status_width = status.chars().count() as u16;
    let [hints_area, status_area] =
        Layout::horizontal([Constraint::Fill(1), Constraint::Length(status_width)]).areas(area);

    frame.render_widget(Paragraph::new(Line::from(parse_hints_to_spans(hints))), hints_area);
    if !status.is_empty() {
        let status = Paragraph::new(Span::styled(status.to_string(), theme().muted_style()))
            .alignment(Alignment::Right);
        frame.render_widget(status, status_area);
    }
}

/// Parse hint text into styled spans.
///
/// Highlights the key portion (in brackets) differently from the description.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(current.clone(), theme().muted_style()));
                    current.clear();
                }
                in_bracket = true;
                current.push(c);
            }
            ']' => {
                current.push(c);
                if in_bracket {
                    spans.push(Span::styled(
                        current.clone(),
                        Style::default().fg(theme().accent),
                    ));
                    current.clear();
                    in_bracket = false;
                }
            }
            _ => {
                current.push(c);
            }
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, theme().muted_style()));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hints_to_spans_simple() {
        let hints = "[Tab] next";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 2);
    }

    #[test]
    fn test_parse_hints_to_spans_multiple_keys() {
        let hints = "[j/k] row  [s] sort  [Space] select";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 6);
        assert_eq!(spans[2].content, "[s]");
    }

    #[test]
    fn test_parse_hints_to_spans_empty() {
        let hints = "";
        let spans = parse_hints_to_spans(hints);
        assert!(spans.is_empty());
    }

    #[test]
    fn test_unclosed_bracket_is_plain_text() {
        let spans = parse_hints_to_spans("[Tab next");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].content, "[Tab next");
    }

    #[test]
    fn test_parse_hints_to_spans_no_brackets() {
        let hints = "just text";
        let spans = parse_hints_to_spans(hints);
        assert_eq!(spans.len(), 1);
    }
}
