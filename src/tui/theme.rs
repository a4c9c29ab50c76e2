use ratatui::style::Color;

use crate::model::{ThemePreference, UiConfig};

/// Parsed color theme for the TUI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub background: Color,
    /// Card box fill
    pub surface: Color,
    pub text: Color,
    pub text_bright: Color,
    pub dim: Color,
    pub highlight: Color,
    pub danger: Color,
    pub selection_border: Color,
    /// Border of the card currently being dragged
    pub drag_border: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Theme {
            background: Color::Rgb(0x0F, 0x17, 0x2A),
            surface: Color::Rgb(0x1E, 0x29, 0x3B),
            text: Color::Rgb(0xCB, 0xD5, 0xE1),
            text_bright: Color::Rgb(0xF8, 0xFA, 0xFC),
            dim: Color::Rgb(0x64, 0x74, 0x8B),
            highlight: Color::Rgb(0xFB, 0x41, 0x96),
            danger: Color::Rgb(0xEF, 0x44, 0x44),
            selection_border: Color::Rgb(0xFB, 0x41, 0x96),
            drag_border: Color::Rgb(0x38, 0xBD, 0xF8),
        }
    }

    pub fn light() -> Self {
        Theme {
            background: Color::Rgb(0xF8, 0xFA, 0xFC),
            surface: Color::Rgb(0xFF, 0xFF, 0xFF),
            text: Color::Rgb(0x33, 0x41, 0x55),
            text_bright: Color::Rgb(0x0F, 0x17, 0x2A),
            dim: Color::Rgb(0x94, 0xA3, 0xB8),
            highlight: Color::Rgb(0xDB, 0x27, 0x77),
            danger: Color::Rgb(0xDC, 0x26, 0x26),
            selection_border: Color::Rgb(0xDB, 0x27, 0x77),
            drag_border: Color::Rgb(0x02, 0x84, 0xC7),
        }
    }

    /// Build the palette for `pref`, then apply `[ui.colors]` overrides.
    /// Unknown keys and unparseable values are ignored.
    pub fn from_config(pref: ThemePreference, ui: &UiConfig) -> Self {
        let mut theme = match pref {
            ThemePreference::Dark => Theme::dark(),
            ThemePreference::Light => Theme::light(),
        };
        for (key, value) in &ui.colors {
            let Some(color) = parse_hex_color(value) else {
                continue;
            };
            match key.as_str() {
                "background" => theme.background = color,
                "surface" => theme.surface = color,
                "text" => theme.text = color,
                "text_bright" => theme.text_bright = color,
                "dim" => theme.dim = color,
                "highlight" => theme.highlight = color,
                "danger" => theme.danger = color,
                "selection_border" => theme.selection_border = color,
                "drag_border" => theme.drag_border = color,
                _ => {}
            }
        }
        theme
    }

    /// Accent color of a column, from its stored `#rrggbb` value
    pub fn column_color(&self, hex: &str) -> Color {
        parse_hex_color(hex).unwrap_or(self.text)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::dark()
    }
}

/// Parse a hex color string like "#10b981" into an RGB Color
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_palette_colors() {
        assert_eq!(parse_hex_color("#ef4444"), Some(Color::Rgb(0xEF, 0x44, 0x44)));
        assert_eq!(parse_hex_color("#10B981"), Some(Color::Rgb(0x10, 0xB9, 0x81)));
        assert_eq!(parse_hex_color("10b981"), None);
        assert_eq!(parse_hex_color("#10b9"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
        assert_eq!(parse_hex_color("#ééé"), None);
    }

    #[test]
    fn preference_selects_palette() {
        let ui = UiConfig::default();
        assert_eq!(Theme::from_config(ThemePreference::Dark, &ui), Theme::dark());
        assert_eq!(Theme::from_config(ThemePreference::Light, &ui), Theme::light());
        assert_ne!(Theme::dark().background, Theme::light().background);
    }

    #[test]
    fn overrides_apply_on_top_of_palette() {
        let mut ui = UiConfig::default();
        ui.colors.insert("highlight".into(), "#123456".into());
        ui.colors.insert("bogus".into(), "#000000".into());
        ui.colors.insert("text".into(), "not a color".into());

        let theme = Theme::from_config(ThemePreference::Light, &ui);
        assert_eq!(theme.highlight, Color::Rgb(0x12, 0x34, 0x56));
        assert_eq!(theme.text, Theme::light().text);
    }

    #[test]
    fn column_color_falls_back_to_text() {
        let theme = Theme::dark();
        assert_eq!(theme.column_color("#3b82f6"), Color::Rgb(0x3B, 0x82, 0xF6));
        assert_eq!(theme.column_color("blue"), theme.text);
    }
}
