//! TUI color palettes and line styles.
//!
//! Two palettes, one per [`ThemeMode`]. Pure data, consumed by the
//! rendering layer. Color semantics:
//! - Green: the prompt and the input cursor
//! - Cyan: headers and the ASCII banner
//! - Yellow: entry titles and info labels
//! - Dim: dates, hints, diagnostics

use ratatui::style::{Color, Modifier, Style};

use crate::output::LineStyle;
use crate::preference::ThemeMode;

/// Colors of one theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Page behind the terminal window.
    pub page: Color,
    /// Terminal window background.
    pub window: Color,
    pub text: Color,
    pub dim: Color,
    pub prompt: Color,
    pub header: Color,
    pub subheader: Color,
    pub border: Color,
}

pub const DARK: Palette = Palette {
    page: Color::Rgb(18, 18, 24),
    window: Color::Rgb(30, 30, 30),
    text: Color::Rgb(220, 220, 220),
    dim: Color::Rgb(128, 128, 128),
    prompt: Color::Rgb(80, 250, 123),
    header: Color::Rgb(139, 233, 253),
    subheader: Color::Rgb(241, 250, 140),
    border: Color::Rgb(68, 71, 90),
};

pub const LIGHT: Palette = Palette {
    page: Color::Rgb(245, 245, 240),
    window: Color::Rgb(253, 253, 250),
    text: Color::Rgb(40, 40, 40),
    dim: Color::Rgb(120, 120, 120),
    prompt: Color::Rgb(22, 130, 60),
    header: Color::Rgb(0, 110, 160),
    subheader: Color::Rgb(150, 100, 0),
    border: Color::Rgb(190, 190, 190),
};

/// Window-chrome dots: close, minimize, fullscreen.
pub const DOT_CLOSE: Style = Style::new().fg(Color::Rgb(255, 95, 86));
pub const DOT_MINIMIZE: Style = Style::new().fg(Color::Rgb(255, 189, 46));
pub const DOT_FULLSCREEN: Style = Style::new().fg(Color::Rgb(39, 201, 63));

pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Dark => DARK,
        ThemeMode::Light => LIGHT,
    }
}

/// Style for one line of terminal output.
pub fn line_style(palette: &Palette, style: LineStyle) -> Style {
    let base = Style::new().bg(palette.window);
    match style {
        LineStyle::Prompt => base.fg(palette.prompt),
        LineStyle::Header => base.fg(palette.header).add_modifier(Modifier::BOLD),
        LineStyle::Subheader => base.fg(palette.subheader).add_modifier(Modifier::BOLD),
        LineStyle::Dim => base.fg(palette.dim),
        LineStyle::Ascii => base.fg(palette.header),
        LineStyle::InfoLine => base.fg(palette.subheader),
        LineStyle::Plain => base.fg(palette.text),
    }
}

/// Page background and body text.
pub fn page_style(palette: &Palette) -> Style {
    Style::new().bg(palette.page).fg(palette.text)
}

/// Footer / help line.
pub fn help_style(palette: &Palette) -> Style {
    Style::new().bg(palette.page).fg(palette.dim)
}

/// Key names inside the help line.
pub fn key_style(palette: &Palette) -> Style {
    Style::new().bg(palette.page).fg(palette.header)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palettes_differ_per_mode() {
        assert_eq!(palette(ThemeMode::Dark), DARK);
        assert_eq!(palette(ThemeMode::Light), LIGHT);
        assert_ne!(DARK.window, LIGHT.window);
    }

    #[test]
    fn headers_are_bold() {
        let style = line_style(&DARK, LineStyle::Header);
        assert!(style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(style.fg, Some(DARK.header));
    }

    #[test]
    fn every_line_sits_on_the_window_background() {
        for style in [
            LineStyle::Prompt,
            LineStyle::Header,
            LineStyle::Subheader,
            LineStyle::Dim,
            LineStyle::Ascii,
            LineStyle::InfoLine,
            LineStyle::Plain,
        ] {
            assert_eq!(line_style(&LIGHT, style).bg, Some(LIGHT.window));
        }
    }

    #[test]
    fn dim_lines_use_dim_color() {
        assert_eq!(line_style(&DARK, LineStyle::Dim).fg, Some(DARK.dim));
    }
}
