use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Terminal cells occupied by `s`. Tabs are rendered as 4 cells.
pub fn display_width(s: &str) -> usize {
    s.graphemes(true).map(grapheme_width).sum()
}

fn grapheme_width(g: &str) -> usize {
    if g == "\t" {
        4
    } else {
        UnicodeWidthStr::width(g)
    }
}

/// Shorten `s` to at most `max_cells` cells, ending in `…` when cut.
pub fn truncate_to_width(s: &str, max_cells: usize) -> String {
    if max_cells == 0 {
        return String::new();
    }
    if display_width(s) <= max_cells {
        return s.to_string();
    }
    let budget = max_cells - 1;
    let mut used = 0;
    let mut out = String::new();
    for g in s.graphemes(true) {
        let w = grapheme_width(g);
        if used + w > budget {
            break;
        }
        used += w;
        out.push_str(g);
    }
    out.push('\u{2026}');
    out
}

/// Byte offset of the grapheme after the one at `byte_offset`, or `None`
/// at the end of the string.
pub fn next_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset >= s.len() {
        return None;
    }
    let step = s[byte_offset..]
        .grapheme_indices(true)
        .nth(1)
        .map_or(s.len() - byte_offset, |(i, _)| i);
    Some(byte_offset + step)
}

/// Byte offset of the grapheme before `byte_offset`, or `None` at the start.
pub fn prev_grapheme_boundary(s: &str, byte_offset: usize) -> Option<usize> {
    if byte_offset == 0 {
        return None;
    }
    s[..byte_offset]
        .grapheme_indices(true)
        .next_back()
        .map(|(i, _)| i)
}

/// Start of the word left of `byte_offset`, skipping trailing whitespace.
pub fn word_boundary_left(s: &str, byte_offset: usize) -> usize {
    let graphemes: Vec<(usize, &str)> = s[..byte_offset].grapheme_indices(true).collect();
    let is_space = |g: &str| g.chars().all(char::is_whitespace);
    let mut idx = graphemes.len();
    while idx > 0 && is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    while idx > 0 && !is_space(graphemes[idx - 1].1) {
        idx -= 1;
    }
    graphemes.get(idx).map_or(byte_offset, |(i, _)| *i)
}

/// Soft-wrap `text` into rows of at most `width` cells.
///
/// Breaks after whitespace where possible and falls back to splitting a
/// word that is wider than a whole row. Leading whitespace on continuation
/// rows is dropped. Always returns at least one row.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 || display_width(text) <= width {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for word in text.split_word_bounds() {
        let is_space = word.chars().all(char::is_whitespace);
        let w = display_width(word);

        if row_width + w <= width {
            if !(is_space && row.is_empty() && !rows.is_empty()) {
                row.push_str(word);
                row_width += w;
            }
            continue;
        }
        if is_space {
            rows.push(std::mem::take(&mut row));
            row_width = 0;
            continue;
        }
        if !row.is_empty() && w <= width {
            rows.push(std::mem::take(&mut row));
            row.push_str(word);
            row_width = w;
            continue;
        }
        // Word wider than what is left: split it across rows
        for g in word.graphemes(true) {
            let gw = grapheme_width(g);
            if row_width + gw > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                row_width = 0;
            }
            row.push_str(g);
            row_width += gw;
        }
    }
    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    for r in rows.iter_mut() {
        let trimmed = r.trim_end().len();
        r.truncate(trimmed);
    }
    rows
}
