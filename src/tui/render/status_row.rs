use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::io::KeyValueStore;
use crate::tui::app::{App, InputKind, Mode};
use crate::util::unicode::{display_width, truncate_to_width};

use super::board_view::with_cursor;

const NAVIGATE_HINTS: &str = "\u{2190}\u{2191}\u{2192}\u{2193} move  e edit  a add  c column  d delete  t theme  q quit";

/// Render the status row (bottom of screen)
pub fn render_status_row<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let (left, hint): (Vec<Span>, &str) = match app.mode {
        Mode::Input => {
            let label = match &app.input_kind {
                Some(InputKind::Card { column_id }) => {
                    let title = app
                        .workspace
                        .tree()
                        .column(column_id)
                        .map_or(column_id.as_str(), |c| c.title.as_str());
                    format!("New card in \"{}\": ", title)
                }
                Some(InputKind::Column) | None => "New column: ".to_string(),
            };
            (
                vec![
                    Span::styled(label, dim_style),
                    Span::styled(with_cursor(&app.edit_buffer, app.edit_cursor), text_style),
                ],
                "Enter add  Esc close",
            )
        }
        Mode::Edit => (
            vec![Span::styled("editing", dim_style)],
            "Enter save  Esc revert",
        ),
        Mode::Confirm => (Vec::new(), "y confirm  n cancel"),
        Mode::Navigate if app.workspace.drag().is_active() => (
            vec![Span::styled("moving card", text_style)],
            "release to drop  Esc cancel",
        ),
        Mode::Navigate => {
            let message = app
                .status_message
                .as_deref()
                .map(|m| vec![Span::styled(m.to_string(), text_style)])
                .unwrap_or_default();
            (message, NAVIGATE_HINTS)
        }
    };

    let mut spans = left;
    let used: usize = spans.iter().map(|s| display_width(&s.content)).sum();
    let show_hint = app.config.ui.show_key_hints || app.mode != Mode::Navigate;
    if show_hint && used + 2 < width {
        let hint = truncate_to_width(hint, width - used - 2);
        let padding = width - used - display_width(&hint);
        spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        spans.push(Span::styled(hint, dim_style));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}
