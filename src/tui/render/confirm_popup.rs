use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::io::KeyValueStore;
use crate::tui::app::App;
use crate::util::unicode::wrap_text;

const POPUP_WIDTH: u16 = 48;

/// Render the yes/no popup for a pending destructive action
pub fn render_confirm_popup<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let pending = match &app.confirm {
        Some(pending) => pending,
        None => return,
    };

    let bg = app.theme.background;
    let header_style = Style::default()
        .fg(app.theme.danger)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let key_style = Style::default().fg(app.theme.highlight).bg(bg);
    let dim_style = Style::default().fg(app.theme.dim).bg(bg);

    let popup_w = POPUP_WIDTH.min(area.width.saturating_sub(2));
    let text_w = popup_w.saturating_sub(6) as usize;

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(" Confirm", header_style)),
        Line::from(""),
    ];
    for row in wrap_text(&pending.prompt, text_w) {
        lines.push(Line::from(Span::styled(format!("  {}", row), text_style)));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("  ", dim_style),
        Span::styled("y", key_style),
        Span::styled(" confirm  ", dim_style),
        Span::styled("n", key_style),
        Span::styled(" cancel", dim_style),
    ]));

    let popup_h = (lines.len() as u16 + 2).min(area.height);
    let overlay = centered_rect_fixed(popup_w, popup_h, area);
    frame.render_widget(Clear, overlay);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.danger).bg(bg))
        .style(Style::default().bg(bg));
    frame.render_widget(Paragraph::new(lines).block(block), overlay);
}

fn centered_rect_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::ConfirmAction;
    use crate::tui::render::test_helpers::*;

    #[test]
    fn popup_shows_prompt_and_keys() {
        let mut app = seeded_app();
        let pending = app
            .workspace
            .request(ConfirmAction::DeleteColumn("col-1".into()))
            .unwrap();
        app.confirm = Some(pending);
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert!(output.contains("Confirm"));
        assert!(output.contains("\"To Do\" has 2 cards."));
        assert!(output.contains("y confirm  n cancel"));
    }

    #[test]
    fn nothing_pending_draws_nothing() {
        let app = seeded_app();
        let output = render_to_string(TERM_W, TERM_H, |frame, area| {
            render_confirm_popup(frame, &app, area);
        });
        assert_eq!(output, "");
    }
}
