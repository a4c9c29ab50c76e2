pub mod board_view;
pub mod confirm_popup;
pub mod status_row;

#[cfg(test)]
pub mod test_helpers;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::io::KeyValueStore;

use super::app::{App, Mode};

/// Main render function. Dispatches to sub-renderers
pub fn render<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>) {
    let area = frame.area();

    // Background fill
    let bg_style = Style::default().bg(app.theme.background);
    frame.render_widget(Block::default().style(bg_style), area);

    // Layout: title bar | board | status row
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // title + spacer
            Constraint::Min(1),    // board
            Constraint::Length(1), // status row
        ])
        .split(area);

    render_title_bar(frame, app, chunks[0]);
    board_view::render_board(frame, app, chunks[1]);
    status_row::render_status_row(frame, app, chunks[2]);

    if app.mode == Mode::Confirm {
        confirm_popup::render_confirm_popup(frame, app, area);
    }
}

fn render_title_bar<S: KeyValueStore>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let bg = app.theme.background;
    let counts = app.workspace.tree().card_counts();
    let cards: usize = counts.iter().sum();
    let line = Line::from(vec![
        Span::styled(
            " lanes",
            Style::default()
                .fg(app.theme.highlight)
                .bg(bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                "  {} column{} \u{00B7} {} card{}",
                counts.len(),
                if counts.len() == 1 { "" } else { "s" },
                cards,
                if cards == 1 { "" } else { "s" },
            ),
            Style::default().fg(app.theme.dim).bg(bg),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(Style::default().bg(bg)), area);
}
