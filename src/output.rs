//! Output buffer and line renderer.
//!
//! The buffer is the terminal's scrollback: an append-only list of styled
//! lines, cleared as a whole. Lines are addressed through [`LineHandle`]s
//! so the typing scheduler can keep revealing characters into the line it
//! created without looking it up again.

use serde::Serialize;

/// Visual class of a line. The view maps each to a theme style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineStyle {
    Prompt,
    Header,
    Subheader,
    Dim,
    Ascii,
    InfoLine,
    #[default]
    Plain,
}

/// A line of text waiting to be printed or typed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledLine {
    pub text: String,
    pub style: LineStyle,
}

impl StyledLine {
    pub fn new(text: impl Into<String>, style: LineStyle) -> Self {
        StyledLine {
            text: text.into(),
            style,
        }
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Plain)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::new(text, LineStyle::Dim)
    }

    /// An empty spacer line.
    pub fn blank() -> Self {
        Self::new("", LineStyle::Plain)
    }
}

/// Address of a line inside one epoch of the buffer.
///
/// A handle from before a [`OutputBuffer::clear`] is stale and writes
/// through it are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineHandle {
    epoch: u64,
    index: usize,
}

/// The terminal scrollback.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    lines: Vec<StyledLine>,
    epoch: u64,
    revision: u64,
}

impl OutputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fully rendered line.
    pub fn append_line(&mut self, line: StyledLine) -> LineHandle {
        let handle = LineHandle {
            epoch: self.epoch,
            index: self.lines.len(),
        };
        self.lines.push(line);
        self.touch();
        handle
    }

    /// Append an empty line that the typing scheduler fills in.
    pub fn append_animated_line(&mut self, style: LineStyle) -> LineHandle {
        self.append_line(StyledLine::new(String::new(), style))
    }

    /// Reveal one more character of an animated line.
    ///
    /// Returns false if the handle belongs to a cleared epoch.
    pub fn reveal(&mut self, handle: LineHandle, ch: char) -> bool {
        if handle.epoch != self.epoch {
            return false;
        }
        match self.lines.get_mut(handle.index) {
            Some(line) => {
                line.text.push(ch);
                self.touch();
                true
            }
            None => false,
        }
    }

    /// Drop every line and invalidate outstanding handles.
    pub fn clear(&mut self) {
        self.lines.clear();
        self.epoch += 1;
        self.touch();
    }

    pub fn lines(&self) -> &[StyledLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Text of a live line.
    pub fn text(&self, handle: LineHandle) -> Option<&str> {
        if handle.epoch != self.epoch {
            return None;
        }
        self.lines.get(handle.index).map(|l| l.text.as_str())
    }

    /// Monotonic counter bumped on every mutation. The host redraws when
    /// it changes; the view always anchors to the newest line.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn touch(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_line_keeps_order_and_style() {
        let mut out = OutputBuffer::new();
        out.append_line(StyledLine::new("# Header", LineStyle::Header));
        out.append_line(StyledLine::dim("note"));
        assert_eq!(out.len(), 2);
        assert_eq!(out.lines()[0].style, LineStyle::Header);
        assert_eq!(out.lines()[1].text, "note");
    }

    #[test]
    fn animated_line_grows_through_its_handle() {
        let mut out = OutputBuffer::new();
        let handle = out.append_animated_line(LineStyle::Prompt);
        assert_eq!(out.text(handle), Some(""));
        assert!(out.reveal(handle, 'h'));
        assert!(out.reveal(handle, 'i'));
        assert_eq!(out.text(handle), Some("hi"));
        assert_eq!(out.lines()[0].style, LineStyle::Prompt);
    }

    #[test]
    fn stale_handle_is_ignored_after_clear() {
        let mut out = OutputBuffer::new();
        let old = out.append_animated_line(LineStyle::Plain);
        out.clear();
        out.append_line(StyledLine::plain("fresh"));

        assert!(!out.reveal(old, 'x'));
        assert_eq!(out.text(old), None);
        assert_eq!(out.lines()[0].text, "fresh");
    }

    #[test]
    fn every_mutation_bumps_revision() {
        let mut out = OutputBuffer::new();
        let r0 = out.revision();
        let h = out.append_animated_line(LineStyle::Plain);
        let r1 = out.revision();
        out.reveal(h, 'a');
        let r2 = out.revision();
        out.clear();
        let r3 = out.revision();
        assert!(r0 < r1 && r1 < r2 && r2 < r3);
    }

    #[test]
    fn line_style_serializes_kebab_case() {
        let json = serde_json::to_string(&LineStyle::InfoLine).unwrap();
        assert_eq!(json, "\"info-line\"");
    }
}
