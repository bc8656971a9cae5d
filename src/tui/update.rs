//! State transitions: (App, Action) → Transition.
//!
//! No terminal and no filesystem here. The engine is mutated in place
//! (it is a plain state machine); anything touching the outside world is
//! returned as an [`Effect`] for the effects boundary.

use std::time::Duration;

use tracing::debug;

use crate::engine::KeyOutcome;

use super::state::{Action, App, Effect, Transition};

/// Apply one action.
pub fn update(app: &mut App, action: Action) -> Transition {
    match action {
        Action::Quit => Transition::Quit,
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            debug!(theme = %app.theme, "theme toggled");
            Transition::Effect(Effect::SaveTheme(app.theme))
        }
        Action::ToggleTerminal => {
            app.engine.toggle_session();
            Transition::Continue
        }
        Action::Minimize => {
            app.engine.minimize();
            Transition::Continue
        }
        Action::ToggleFullscreen => {
            app.engine.toggle_fullscreen();
            Transition::Continue
        }
        Action::CloseTerminal => {
            if app.engine.session().active {
                app.engine.close_session();
            }
            Transition::Continue
        }
        Action::Input(key) => {
            if app.engine.handle_key(key) == KeyOutcome::Ignored {
                debug!(?key, "key ignored by terminal");
            }
            Transition::Continue
        }
    }
}

/// Let the engine clock run for `elapsed`.
pub fn handle_tick(app: &mut App, elapsed: Duration) {
    app.engine.advance(elapsed);
}

// ============================================================================
// TESTS
// ============================================================================
