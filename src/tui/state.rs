//! TUI state algebra: the host's types, zero effects.
//!
//! The terminal itself lives in [`Engine`]; the host adds the page around
//! it (theme, quit flag) and the vocabulary the event loop speaks.

use crossterm::event::KeyEvent;

use crate::engine::Engine;
use crate::editor::Key;
use crate::preference::ThemeMode;

// ============================================================================
// APP EVENTS
// ============================================================================

/// Everything the event loop can receive from its channel.
///
/// Two producers feed a single mpsc channel:
/// - A key reader thread sends `Key` and `Resize`
/// - A ticker thread sends `Tick` at a fixed frame interval
///
/// Key events go through `map_key → update`; ticks advance the engine clock.
#[derive(Debug)]
pub enum AppEvent {
    /// A terminal key event from the crossterm reader thread.
    Key(KeyEvent),
    /// The terminal was resized.
    Resize,
    /// Frame timer fired.
    Tick,
}

// ============================================================================
// APPLICATION STATE
// ============================================================================

/// Top-level TUI model.
#[derive(Debug)]
pub struct App {
    /// The fake terminal overlay.
    pub engine: Engine,
    /// Active color scheme.
    pub theme: ThemeMode,
    /// Set to true when the app should exit on the next loop turn.
    pub should_quit: bool,
}

/// Which view is on screen. Derived from the engine, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The static page with the open trigger.
    Landing,
    /// The terminal window over the page.
    Terminal,
}

/// What a frame shows, minus the pending input line.
///
/// The event loop redraws when this changes between ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameStamp {
    pub revision: u64,
    pub screen: Screen,
    pub minimizing: bool,
    pub fullscreen: bool,
    pub input_armed: bool,
    pub theme: ThemeMode,
}

// ============================================================================
// ACTIONS
// ============================================================================

/// Semantic user action, decoupled from raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Open or close the terminal overlay.
    ToggleTerminal,
    /// Switch between light and dark.
    ToggleTheme,
    /// Window chrome: shrink, then close.
    Minimize,
    /// Window chrome: fill the screen.
    ToggleFullscreen,
    /// Window chrome: close.
    CloseTerminal,
    /// A key for the terminal's input line.
    Input(Key),
    /// Quit the application.
    Quit,
}

// ============================================================================
// TRANSITIONS
// ============================================================================

/// Result of applying an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// State changed in place; keep running.
    Continue,
    /// Quit the application.
    Quit,
    /// Execute a side effect at the effects boundary.
    Effect(Effect),
}

/// Side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Persist the theme preference.
    SaveTheme(ThemeMode),
}

// ============================================================================
// CONSTRUCTORS
// ============================================================================

impl App {
    pub fn new(engine: Engine, theme: ThemeMode) -> Self {
        App {
            engine,
            theme,
            should_quit: false,
        }
    }

    pub fn screen(&self) -> Screen {
        if self.engine.is_visible() {
            Screen::Terminal
        } else {
            Screen::Landing
        }
    }

    pub fn frame_stamp(&self) -> FrameStamp {
        let session = self.engine.session();
        FrameStamp {
            revision: self.engine.output().revision(),
            screen: self.screen(),
            minimizing: self.engine.is_minimizing(),
            fullscreen: session.fullscreen,
            input_armed: session.input_armed,
            theme: self.theme,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
