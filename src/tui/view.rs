//! Rendering: map App state to ratatui widget trees.
//!
//! Widget-building functions are pure (state in, widgets out); the only
//! effect is Frame::render_widget() which writes to the terminal buffer.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::content::Profile;
use crate::engine::Engine;

use super::state::{App, Screen};
use super::theme::{self, Palette};

/// Block drawn after the pending input while the line is armed.
const CURSOR: &str = "█";

// ============================================================================
// DISPATCH
// ============================================================================

/// Render the whole frame.
pub fn render(app: &App, frame: &mut Frame) {
    let palette = theme::palette(app.theme);
    let area = frame.area();

    frame.render_widget(Block::new().style(theme::page_style(&palette)), area);

    let chunks = Layout::vertical([
        Constraint::Min(0),    // page
        Constraint::Length(1), // help
    ])
    .split(area);

    render_landing(app.engine.content().profile(), &palette, frame, chunks[0]);

    if app.screen() == Screen::Terminal {
        let window = window_area(&app.engine, chunks[0]);
        render_terminal(&app.engine, &palette, frame, window);
    }

    frame.render_widget(render_help(app.screen(), &palette), chunks[1]);
}

// ============================================================================
// SHARED LAYOUT
// ============================================================================

/// Help line showing the keybindings of the current screen.
fn render_help(screen: Screen, palette: &Palette) -> Paragraph<'static> {
    let bindings: &[(&str, &str)] = match screen {
        Screen::Landing => &[
            ("t", "open terminal"),
            ("d", "theme"),
            ("q", "quit"),
        ],
        Screen::Terminal => &[
            ("Esc", "close"),
            ("^N", "minimize"),
            ("^F", "fullscreen"),
            ("^D", "theme"),
            ("^C", "quit"),
        ],
    };

    let mut spans = vec![Span::styled(" ", theme::help_style(palette))];
    for (key, label) in bindings {
        spans.push(Span::styled(format!("[{key}] "), theme::key_style(palette)));
        spans.push(Span::styled(format!("{label}  "), theme::help_style(palette)));
    }
    Paragraph::new(Line::from(spans)).style(theme::help_style(palette))
}

/// A rectangle of `percent_x` × `percent_y` centered in `area`.
fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let height = (u32::from(area.height) * u32::from(percent_y) / 100) as u16;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Where the terminal window goes: all of `area` in fullscreen, a
/// centered window otherwise, a small one while minimizing.
fn window_area(engine: &Engine, area: Rect) -> Rect {
    if engine.is_minimizing() {
        centered(area, 40, 30)
    } else if engine.session().fullscreen {
        area
    } else {
        centered(area, 85, 85)
    }
}

// ============================================================================
// SCREEN: LANDING
// ============================================================================

fn render_landing(profile: &Profile, palette: &Palette, frame: &mut Frame, area: Rect) {
    let header = Style::new().fg(palette.header);
    let label = Style::new().fg(palette.subheader);

    let mut lines = vec![Line::from("")];
    lines.extend(
        profile
            .banner
            .iter()
            .map(|row| Line::from(Span::styled(format!("  {row}"), header))),
    );
    lines.push(Line::from(""));
    for field in &profile.info {
        lines.push(Line::from(vec![
            Span::styled(format!("  {:<10}", field.label), label),
            Span::raw(field.value.clone()),
        ]));
    }
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("  Press "),
        Span::styled("t", Style::new().fg(palette.prompt)),
        Span::raw(" to open the terminal."),
    ]));

    let paragraph = Paragraph::new(lines).style(theme::page_style(palette));
    frame.render_widget(paragraph, area);
}

// ============================================================================
// SCREEN: TERMINAL
// ============================================================================

fn render_terminal(engine: &Engine, palette: &Palette, frame: &mut Frame, area: Rect) {
    let window_style = Style::new().bg(palette.window).fg(palette.text);
    let title = Line::from(vec![
        Span::styled(" ● ", theme::DOT_CLOSE),
        Span::styled("● ", theme::DOT_MINIMIZE),
        Span::styled("● ", theme::DOT_FULLSCREEN),
        Span::styled(
            format!(" {}@{}: ~ ", engine.content().profile().user, engine.content().profile().host),
            Style::new().fg(palette.dim),
        ),
    ]);
    let block = Block::new()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(palette.border))
        .title(title)
        .style(window_style);

    let inner = block.inner(area);
    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let paragraph = Paragraph::new(terminal_lines(engine, palette))
        .style(window_style)
        .wrap(Wrap { trim: false });
    let offset = tail_offset(&paragraph, inner);
    frame.render_widget(paragraph.scroll((offset, 0)), inner);
}

/// Rows to scroll so the last wrapped row sits at the bottom of `area`.
fn tail_offset(paragraph: &Paragraph, area: Rect) -> u16 {
    let rows = paragraph.line_count(area.width);
    let hidden = rows.saturating_sub(usize::from(area.height));
    u16::try_from(hidden).unwrap_or(u16::MAX)
}

/// Every output line plus the input line when armed, oldest first.
fn terminal_lines(engine: &Engine, palette: &Palette) -> Vec<Line<'static>> {
    let mut lines: Vec<Line> = engine
        .output()
        .lines()
        .iter()
        .map(|line| Line::from(Span::styled(line.text.clone(), theme::line_style(palette, line.style))))
        .collect();

    let session = engine.session();
    if session.active && session.input_armed {
        let prompt = Style::new().fg(palette.prompt).bg(palette.window);
        let text = Style::new().fg(palette.text).bg(palette.window);
        lines.push(Line::from(vec![
            Span::styled(format!("{} ", engine.prompt()), prompt),
            Span::styled(session.pending_input.clone(), text),
            Span::styled(CURSOR, prompt),
        ]));
    }
    lines
}

// ============================================================================
// TESTS
// ============================================================================
