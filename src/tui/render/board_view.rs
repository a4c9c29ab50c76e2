use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::io::KeyValueStore;
use crate::tui::app::{App, HitRegion, HitTarget, Mode};
use crate::util::unicode::{display_width, truncate_to_width, wrap_text};
use crate::visual::{Bounds, CardElement, ColumnElement, LayoutMetrics, layout};

pub const COLUMN_WIDTH: u16 = 24;
pub const COLUMN_GAP: u16 = 1;
const HEADER_ROWS: u16 = 2;
const FOOTER_ROWS: u16 = 1;
/// Text cells inside a card's border; a spacer and the delete glyph use the rest
const CARD_TEXT_WIDTH: usize = (COLUMN_WIDTH - 4) as usize;
const ADD_COLUMN_MIN_WIDTH: u16 = 10;

pub const DELETE_GLYPH: &str = "\u{2715}";
pub const CURSOR_GLYPH: &str = "\u{258C}";

/// Display rows of a card's text. Hard line breaks are honored, then each
/// line is soft-wrapped to the card width.
pub fn card_rows(text: &str) -> Vec<String> {
    text.split('\n')
        .flat_map(|line| wrap_text(line, CARD_TEXT_WIDTH))
        .collect()
}

/// Rows a card with `text` occupies, border included
pub fn card_height(text: &str) -> u16 {
    card_rows(text).len() as u16 + 2
}

/// `text` with the cursor glyph inserted at byte `cursor`
pub fn with_cursor(text: &str, cursor: usize) -> String {
    let at = if text.is_char_boundary(cursor) {
        cursor
    } else {
        text.len()
    };
    let mut out = String::with_capacity(text.len() + CURSOR_GLYPH.len());
    out.push_str(&text[..at]);
    out.push_str(CURSOR_GLYPH);
    out.push_str(&text[at..]);
    out
}

/// How many whole columns fit in `width` cells
pub fn visible_columns(width: u16) -> usize {
    ((width + COLUMN_GAP) / (COLUMN_WIDTH + COLUMN_GAP)).max(1) as usize
}

/// Adjust the horizontal scroll so the selected column is on screen.
pub fn scroll_to_selection(offset: usize, selected: usize, visible: usize) -> usize {
    if selected < offset {
        selected
    } else if selected >= offset + visible {
        selected + 1 - visible
    } else {
        offset
    }
}

/// Portion of `bounds` inside `area`, in whole cells
fn clip(bounds: &Bounds, area: Rect) -> Option<Rect> {
    let x0 = bounds.x.max(area.x as f64);
    let y0 = bounds.y.max(area.y as f64);
    let x1 = (bounds.x + bounds.width).min(area.right() as f64);
    let y1 = bounds.bottom().min(area.bottom() as f64);
    if x1 <= x0 || y1 <= y0 {
        return None;
    }
    Some(Rect::new(
        x0 as u16,
        y0 as u16,
        (x1 - x0) as u16,
        (y1 - y0) as u16,
    ))
}

/// Lay the board out in `area`, draw it, and record the clickable regions.
///
/// Layout writes fresh bounds into the visual tree, so pointer hit-testing
/// and insertion-point resolution always see what was last drawn.
pub fn render_board<S: KeyValueStore>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let visible = visible_columns(area.width);
    app.column_offset = scroll_to_selection(
        app.column_offset.min(app.selection.column),
        app.selection.column,
        visible,
    );

    let stride = (COLUMN_WIDTH + COLUMN_GAP) as f64;
    let metrics = LayoutMetrics {
        origin_x: area.x as f64 - app.column_offset as f64 * stride,
        origin_y: area.y as f64,
        column_width: COLUMN_WIDTH as f64,
        column_gap: COLUMN_GAP as f64,
        column_height: area.height as f64,
        header_height: HEADER_ROWS as f64,
        footer_height: FOOTER_ROWS as f64,
        card_gap: 0.0,
    };
    let editing = app.mode == Mode::Edit;
    let cursor = app.edit_cursor;
    layout(app.workspace.tree_mut(), &metrics, |card| {
        let rows = if editing && card.editing {
            card_height(&with_cursor(&card.text, cursor))
        } else {
            card_height(&card.text)
        };
        rows as f64
    });

    let mut regions = Vec::new();
    let app_ref: &App<S> = app;
    let tree = app_ref.workspace.tree();
    for (idx, column) in tree.columns.iter().enumerate().skip(app_ref.column_offset) {
        let Some(rect) = clip(&column.bounds, area) else {
            break;
        };
        render_column(frame, app_ref, idx, column, rect, &mut regions);
    }

    // Trailing slot for a new column
    let shown = tree.columns.len().saturating_sub(app_ref.column_offset) as u16;
    let slot_x = area.x.saturating_add(shown.saturating_mul(COLUMN_WIDTH + COLUMN_GAP));
    let room = area.right().saturating_sub(slot_x);
    if room >= ADD_COLUMN_MIN_WIDTH && area.height >= 3 {
        let slot = Rect::new(slot_x, area.y, room.min(COLUMN_WIDTH), 3);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(app_ref.theme.dim).bg(app_ref.theme.background));
        let label = Paragraph::new(Span::styled(
            " + column",
            Style::default().fg(app_ref.theme.dim),
        ))
        .block(block)
        .style(Style::default().bg(app_ref.theme.background));
        frame.render_widget(label, slot);
        regions.push(HitRegion {
            area: slot,
            target: HitTarget::AddColumn,
        });
    }

    app.hit_regions = regions;
}

fn render_column<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    idx: usize,
    column: &ColumnElement,
    rect: Rect,
    regions: &mut Vec<HitRegion>,
) {
    let theme = &app.theme;
    let bg = theme.background;
    let accent = theme.column_color(&column.color);
    let dim_style = Style::default().fg(theme.dim).bg(bg);
    let is_selected = idx == app.selection.column;

    // Header: ● Title (count)            ✕
    let header = Rect::new(rect.x, rect.y, rect.width, 1);
    let title = if column.editing_title {
        with_cursor(&app.edit_buffer, app.edit_cursor)
    } else {
        column.title.clone()
    };
    let count = format!(" ({})", column.cards.len());
    let budget = (rect.width as usize).saturating_sub(2 + display_width(&count) + 2);
    let mut title_style = Style::default()
        .fg(accent)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    if is_selected && app.selection.card.is_none() {
        title_style = title_style.add_modifier(Modifier::REVERSED);
    }
    let spans = vec![
        Span::styled("\u{25CF} ", Style::default().fg(accent).bg(bg)),
        Span::styled(truncate_to_width(&title, budget), title_style),
        Span::styled(count, dim_style),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), header);

    if !column.editing_title && rect.width >= 4 {
        let glyph = Rect::new(rect.right() - 1, rect.y, 1, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                DELETE_GLYPH,
                Style::default().fg(theme.danger).bg(bg),
            )),
            glyph,
        );
        regions.push(HitRegion {
            area: glyph,
            target: HitTarget::DeleteColumn(column.id.clone()),
        });
    }
    regions.push(HitRegion {
        area: header,
        target: HitTarget::ColumnHeader(column.id.clone()),
    });

    if rect.height < 2 {
        return;
    }
    let rule = Rect::new(rect.x, rect.y + 1, rect.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "\u{2500}".repeat(rect.width as usize),
            Style::default().fg(accent).bg(bg),
        )),
        rule,
    );

    // Cards
    let list_bottom = column.list_bounds.bottom();
    let mut hidden = 0;
    for (i, card) in column.cards.iter().enumerate() {
        if card.bounds.bottom() > list_bottom {
            hidden += 1;
            continue;
        }
        let Some(card_rect) = clip(&card.bounds, rect) else {
            continue;
        };
        let selected = is_selected && app.selection.card == Some(i);
        render_card(frame, app, card, card_rect, selected, regions);
    }

    // Footer: + add card
    if rect.height < HEADER_ROWS + FOOTER_ROWS {
        return;
    }
    let footer = Rect::new(rect.x, rect.bottom() - 1, rect.width, 1);
    let mut spans = vec![Span::styled("+ add card", dim_style)];
    if hidden > 0 {
        let more = format!("+{} more", hidden);
        let pad = (rect.width as usize).saturating_sub(10 + display_width(&more));
        spans.push(Span::styled(" ".repeat(pad), dim_style));
        spans.push(Span::styled(more, dim_style));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), footer);
    regions.push(HitRegion {
        area: Rect::new(footer.x, footer.y, footer.width.min(10), 1),
        target: HitTarget::AddCard(column.id.clone()),
    });
}

fn render_card<S: KeyValueStore>(
    frame: &mut Frame,
    app: &App<S>,
    card: &CardElement,
    rect: Rect,
    selected: bool,
    regions: &mut Vec<HitRegion>,
) {
    let theme = &app.theme;
    let (border_color, border_type) = if card.dragging {
        (theme.drag_border, BorderType::Double)
    } else if selected || card.editing {
        (theme.selection_border, BorderType::Rounded)
    } else {
        (theme.dim, BorderType::Rounded)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color).bg(theme.surface))
        .style(Style::default().bg(theme.surface));
    let inner = block.inner(rect);

    let text = if card.editing {
        with_cursor(&card.text, app.edit_cursor)
    } else {
        card.text.clone()
    };
    let text_style = if card.dragging {
        Style::default()
            .fg(theme.dim)
            .bg(theme.surface)
            .add_modifier(Modifier::ITALIC)
    } else {
        Style::default().fg(theme.text).bg(theme.surface)
    };
    let lines: Vec<Line> = card_rows(&text)
        .into_iter()
        .map(|row| Line::from(Span::styled(row, text_style)))
        .collect();

    frame.render_widget(block, rect);
    frame.render_widget(Paragraph::new(lines), inner);

    if card.shows_delete() && inner.width >= 2 && inner.height >= 1 {
        let glyph = Rect::new(inner.right() - 1, inner.y, 1, 1);
        frame.render_widget(
            Paragraph::new(Span::styled(
                DELETE_GLYPH,
                Style::default().fg(theme.danger).bg(theme.surface),
            )),
            glyph,
        );
        regions.push(HitRegion {
            area: glyph,
            target: HitTarget::DeleteCard(card.id),
        });
    }
    regions.push(HitRegion {
        area: rect,
        target: HitTarget::Card(card.id),
    });
}
