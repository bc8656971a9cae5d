//! TUI effects boundary: event loop, terminal lifecycle, key mapping.
//!
//! This is the only module with side effects. It wires the state layers
//! (state, update, view) to the real terminal via crossterm and ratatui.
//!
//! Architecture: two producer threads feed a single mpsc channel.
//! - Key reader thread: forwards crossterm key and resize events
//! - Ticker thread: sends a `Tick` every frame interval
//! The event loop consumes from the channel. Ticks measure real elapsed
//! time and hand it to the engine, so a slow frame never slows typing.

use std::io;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::content::ContentStore;
use crate::editor::Key;
use crate::engine::Engine;
use crate::error::Result;
use crate::preference::{self, ThemeMode};

use super::state::{Action, App, AppEvent, Effect, FrameStamp, Screen, Transition};
use super::update::{handle_tick, update};
use super::view::render;

/// Interval between ticks, and so the redraw rate while typing.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

// ============================================================================
// KEY MAPPING
// ============================================================================

/// Map a crossterm key event to a semantic Action.
///
/// Returns None for keys that don't map to any action on this screen.
pub fn map_key(key: KeyEvent, screen: Screen) -> Option<Action> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match (key.code, screen) {
            (KeyCode::Char('c'), _) => Some(Action::Quit),
            (KeyCode::Char('t'), _) => Some(Action::ToggleTerminal),
            (KeyCode::Char('d'), _) => Some(Action::ToggleTheme),
            (KeyCode::Char('n'), Screen::Terminal) => Some(Action::Minimize),
            (KeyCode::Char('f'), Screen::Terminal) => Some(Action::ToggleFullscreen),
            (KeyCode::Char('w'), Screen::Terminal) => Some(Action::CloseTerminal),
            _ => None,
        };
    }

    match screen {
        Screen::Landing => match key.code {
            KeyCode::Char('t') | KeyCode::Enter => Some(Action::ToggleTerminal),
            KeyCode::Char('d') => Some(Action::ToggleTheme),
            KeyCode::Char('q') => Some(Action::Quit),
            _ => None,
        },
        Screen::Terminal => {
            if key.modifiers.contains(KeyModifiers::ALT) {
                return None;
            }
            let input = match key.code {
                KeyCode::Char(c) => Key::Char(c),
                KeyCode::Enter => Key::Enter,
                KeyCode::Backspace => Key::Backspace,
                KeyCode::Up => Key::Up,
                KeyCode::Down => Key::Down,
                KeyCode::Tab => Key::Tab,
                KeyCode::Esc => Key::Escape,
                _ => return None,
            };
            Some(Action::Input(input))
        }
    }
}

// ============================================================================
// TERMINAL LIFECYCLE
// ============================================================================

/// Set up the terminal for TUI mode.
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode.
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Install a panic hook that restores the terminal before printing the panic.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}

// ============================================================================
// BACKGROUND THREADS
// ============================================================================

/// Spawn a thread that reads crossterm events and forwards them to the channel.
fn spawn_key_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        loop {
            let event = match event::read() {
                Ok(Event::Key(key)) => AppEvent::Key(key),
                Ok(Event::Resize(..)) => AppEvent::Resize,
                Ok(_) => continue,
                Err(_) => break,
            };
            if tx.send(event).is_err() {
                break; // receiver dropped, TUI is shutting down
            }
        }
    });
}

/// Spawn a thread that sends a tick every `interval`.
fn spawn_ticker(tx: mpsc::Sender<AppEvent>, interval: Duration) {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            if tx.send(AppEvent::Tick).is_err() {
                break;
            }
        }
    });
}

// ============================================================================
// EVENT LOOP
// ============================================================================

/// Build the initial App: content, stored or forced theme, engine.
pub fn build_app(config: &AppConfig) -> Result<App> {
    let content = ContentStore::load(config.content_path.as_deref())?;
    let theme = preference::resolve_theme(
        config.theme_override,
        preference::load_theme(&config.preference_path),
        preference::system_theme(),
    );

    let mut engine = Engine::new(content, config.engine);
    if config.open_on_start {
        engine.open_session();
    }
    Ok(App::new(engine, theme))
}

/// Run the interactive terminal until the user quits.
pub fn run(config: AppConfig) -> Result<()> {
    let mut app = build_app(&config)?;
    info!(theme = %app.theme, tick = ?config.engine.tick, "starting");

    install_panic_hook();
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &config);
    restore_terminal()?;

    info!("exiting");
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    config: &AppConfig,
) -> Result<()> {
    let (tx, rx) = mpsc::channel::<AppEvent>();

    spawn_key_reader(tx.clone());
    spawn_ticker(tx, FRAME_INTERVAL);

    let mut last_tick = Instant::now();
    let mut drawn: Option<FrameStamp> = None;

    loop {
        let stamp = app.frame_stamp();
        if drawn != Some(stamp) {
            terminal.draw(|frame| render(app, frame))?;
            drawn = Some(stamp);
        }

        if app.should_quit {
            break;
        }

        // Block on next event from any producer
        let event = match rx.recv() {
            Ok(e) => e,
            Err(_) => break, // all senders dropped
        };

        match event {
            AppEvent::Key(key) => {
                if let Some(action) = map_key(key, app.screen()) {
                    match update(app, action) {
                        Transition::Continue => {}
                        Transition::Quit => app.should_quit = true,
                        Transition::Effect(effect) => handle_effect(effect, config),
                    }
                    // pending input is not part of the stamp
                    drawn = None;
                }
            }
            AppEvent::Resize => drawn = None,
            AppEvent::Tick => {
                let now = Instant::now();
                handle_tick(app, now.duration_since(last_tick));
                last_tick = now;
            }
        }
    }

    Ok(())
}

// ============================================================================
// EFFECT HANDLING
// ============================================================================

/// Handle a side effect requested by a transition.
fn handle_effect(effect: Effect, config: &AppConfig) {
    match effect {
        Effect::SaveTheme(theme) => save_theme(config, theme),
    }
}

fn save_theme(config: &AppConfig, theme: ThemeMode) {
    if let Err(e) = preference::save_theme(&config.preference_path, theme) {
        warn!(error = %e, "could not save theme preference");
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use tempfile::TempDir;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    #[test]
    fn ctrl_c_quits_everywhere() {
        assert_eq!(map_key(ctrl('c'), Screen::Landing), Some(Action::Quit));
        assert_eq!(map_key(ctrl('c'), Screen::Terminal), Some(Action::Quit));
    }

    #[test]
    fn ctrl_t_toggles_everywhere() {
        assert_eq!(map_key(ctrl('t'), Screen::Landing), Some(Action::ToggleTerminal));
        assert_eq!(map_key(ctrl('t'), Screen::Terminal), Some(Action::ToggleTerminal));
    }

    #[test]
    fn landing_keys() {
        assert_eq!(map_key(press(KeyCode::Char('t')), Screen::Landing), Some(Action::ToggleTerminal));
        assert_eq!(map_key(press(KeyCode::Enter), Screen::Landing), Some(Action::ToggleTerminal));
        assert_eq!(map_key(press(KeyCode::Char('d')), Screen::Landing), Some(Action::ToggleTheme));
        assert_eq!(map_key(press(KeyCode::Char('q')), Screen::Landing), Some(Action::Quit));
        assert_eq!(map_key(press(KeyCode::Char('z')), Screen::Landing), None);
    }

    #[test]
    fn window_chrome_only_on_terminal() {
        assert_eq!(map_key(ctrl('n'), Screen::Terminal), Some(Action::Minimize));
        assert_eq!(map_key(ctrl('f'), Screen::Terminal), Some(Action::ToggleFullscreen));
        assert_eq!(map_key(ctrl('w'), Screen::Terminal), Some(Action::CloseTerminal));
        assert_eq!(map_key(ctrl('n'), Screen::Landing), None);
        assert_eq!(map_key(ctrl('w'), Screen::Landing), None);
    }

    #[test]
    fn terminal_letters_are_input_not_shortcuts() {
        assert_eq!(
            map_key(press(KeyCode::Char('q')), Screen::Terminal),
            Some(Action::Input(Key::Char('q')))
        );
        assert_eq!(
            map_key(press(KeyCode::Char('t')), Screen::Terminal),
            Some(Action::Input(Key::Char('t')))
        );
    }

    #[test]
    fn terminal_editing_keys_map_to_input() {
        let cases = [
            (KeyCode::Enter, Key::Enter),
            (KeyCode::Backspace, Key::Backspace),
            (KeyCode::Up, Key::Up),
            (KeyCode::Down, Key::Down),
            (KeyCode::Tab, Key::Tab),
            (KeyCode::Esc, Key::Escape),
        ];
        for (code, key) in cases {
            assert_eq!(map_key(press(code), Screen::Terminal), Some(Action::Input(key)));
        }
        assert_eq!(map_key(press(KeyCode::Left), Screen::Terminal), None);
    }

    #[test]
    fn shifted_letters_are_input() {
        let key = KeyEvent::new(KeyCode::Char('H'), KeyModifiers::SHIFT);
        assert_eq!(map_key(key, Screen::Terminal), Some(Action::Input(Key::Char('H'))));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut key = press(KeyCode::Char('t'));
        key.kind = KeyEventKind::Release;
        assert_eq!(map_key(key, Screen::Landing), None);
    }

    #[test]
    fn build_app_prefers_theme_override() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("preferences.json");
        preference::save_theme(&path, ThemeMode::Light).unwrap();

        let config = AppConfig {
            preference_path: path.clone(),
            ..AppConfig::default()
        };
        assert_eq!(build_app(&config).unwrap().theme, ThemeMode::Light);

        let forced = AppConfig {
            preference_path: path,
            theme_override: Some(ThemeMode::Dark),
            ..AppConfig::default()
        };
        assert_eq!(build_app(&forced).unwrap().theme, ThemeMode::Dark);
    }

    #[test]
    fn build_app_can_open_immediately() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            engine: EngineConfig::with_tick(Duration::ZERO),
            preference_path: dir.path().join("preferences.json"),
            open_on_start: true,
            ..AppConfig::default()
        };
        let app = build_app(&config).unwrap();
        assert_eq!(app.screen(), Screen::Terminal);
        assert_eq!(
            app.theme,
            preference::system_theme().unwrap_or(ThemeMode::Dark)
        );
    }

    #[test]
    fn saving_theme_writes_preference_file() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            preference_path: dir.path().join("prefs").join("preferences.json"),
            ..AppConfig::default()
        };
        handle_effect(Effect::SaveTheme(ThemeMode::Light), &config);
        assert_eq!(preference::load_theme(&config.preference_path), Some(ThemeMode::Light));
    }
}
