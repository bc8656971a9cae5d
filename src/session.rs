//! Terminal session state.
//!
//! One open-to-close lifetime of the terminal overlay. Owned by the
//! engine; mutated by the input editor and the dispatcher's plans.

/// Cosmetic menu label. Selects the trailing hint only; every command is
/// accepted in both states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Menu {
    #[default]
    Main,
    Sub,
}

/// Mutable runtime state of the terminal.
#[derive(Debug, Default)]
pub struct TerminalSession {
    /// The overlay is open and accepting work.
    pub active: bool,
    /// Visual flag owned by the window chrome.
    pub fullscreen: bool,
    pub menu: Menu,
    /// An animation is in flight; keyboard input is ignored.
    pub is_typing: bool,
    /// The input cursor line is shown and accepts keys.
    pub input_armed: bool,
    pub pending_input: String,
    pub history: Vec<String>,
    /// Index into `history`; `history.len()` means past-end.
    pub history_cursor: usize,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new session. History and its cursor survive from earlier
    /// sessions.
    pub fn open(&mut self) {
        self.active = true;
        self.is_typing = false;
        self.menu = Menu::Main;
        self.input_armed = false;
        self.pending_input.clear();
    }

    /// Stop the session. Menu reset happens later, when the fade finishes.
    pub fn close(&mut self) {
        self.active = false;
        self.is_typing = false;
        self.fullscreen = false;
        self.input_armed = false;
    }

    /// Forget everything, history included.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Show the input cursor line with an empty command.
    pub fn arm_input(&mut self) {
        self.input_armed = true;
        self.pending_input.clear();
    }

    /// Keys other than Escape are handled only in this state.
    pub fn accepts_input(&self) -> bool {
        self.active && !self.is_typing && self.input_armed
    }

    pub fn history_past_end(&self) -> bool {
        self.history_cursor >= self.history.len()
    }
}
