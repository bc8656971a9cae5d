//! Input line editor: keystrokes → pending command line.
//!
//! Operates on the session's `pending_input`, `history` and
//! `history_cursor`. It does not print anything itself; what the host
//! should do next comes back as an [`EditOutcome`].

use crate::dispatch::{complete, normalize};
use crate::session::TerminalSession;

/// Keys the terminal understands, independent of the host's key type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Backspace,
    Up,
    Down,
    Tab,
    Escape,
}

/// Result of feeding one key to the editor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    /// Not handled; the host may act on the key.
    Ignored,
    /// Handled. `pending_input` may have changed.
    Consumed,
    /// A command line was entered; carries the normalized text.
    Submit(String),
    /// Escape: the session should close.
    Close,
    /// Tab found several candidates; `pending_input` is unchanged.
    ShowMatches {
        attempt: String,
        matches: Vec<&'static str>,
    },
}

/// Apply one key to the session's input line.
pub fn handle_key(session: &mut TerminalSession, key: Key) -> EditOutcome {
    if !session.active {
        return EditOutcome::Ignored;
    }
    // Escape closes even mid-animation; every other key waits for the prompt.
    if key == Key::Escape {
        return EditOutcome::Close;
    }
    if !session.accepts_input() {
        return EditOutcome::Ignored;
    }

    match key {
        Key::Enter => submit(session),
        Key::Backspace => {
            session.pending_input.pop();
            EditOutcome::Consumed
        }
        Key::Up => {
            history_back(session);
            EditOutcome::Consumed
        }
        Key::Down => {
            history_forward(session);
            EditOutcome::Consumed
        }
        Key::Tab => autocomplete(session),
        Key::Char(c) if !c.is_control() => {
            session.pending_input.push(c);
            EditOutcome::Consumed
        }
        Key::Char(_) => EditOutcome::Consumed,
        Key::Escape => EditOutcome::Close,
    }
}

fn submit(session: &mut TerminalSession) -> EditOutcome {
    let trimmed = session.pending_input.trim();
    if !trimmed.is_empty() {
        session.history.push(trimmed.to_string());
        session.history_cursor = session.history.len();
    }
    let command = normalize(&session.pending_input);
    session.pending_input.clear();
    session.input_armed = false;
    EditOutcome::Submit(command)
}

fn history_back(session: &mut TerminalSession) {
    if session.history_cursor > 0 {
        session.history_cursor -= 1;
        load_history(session);
    }
}

fn history_forward(session: &mut TerminalSession) {
    if session.history_cursor + 1 < session.history.len() {
        session.history_cursor += 1;
        load_history(session);
    } else {
        session.history_cursor = session.history.len();
        session.pending_input.clear();
    }
}

fn load_history(session: &mut TerminalSession) {
    if let Some(entry) = session.history.get(session.history_cursor) {
        session.pending_input = entry.clone();
    }
}

fn autocomplete(session: &mut TerminalSession) -> EditOutcome {
    let matches = complete(&session.pending_input);
    match matches.as_slice() {
        [] => EditOutcome::Consumed,
        [only] => {
            session.pending_input = (*only).to_string();
            EditOutcome::Consumed
        }
        _ => EditOutcome::ShowMatches {
            attempt: session.pending_input.clone(),
            matches,
        },
    }
}

// ============================================================================
// TESTS
// ============================================================================
