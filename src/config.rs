//! Runtime configuration.
//!
//! `EngineConfig` holds the timing constants of the terminal. `AppConfig`
//! is what the CLI resolves before starting the interactive host.

use std::path::PathBuf;
use std::time::Duration;

use crate::preference::ThemeMode;

/// Per-character typing delay.
pub const DEFAULT_TICK: Duration = Duration::from_millis(3);

/// Pause between opening the overlay and the welcome sequence.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_millis(100);

/// Fade-out before the closed terminal's buffer is wiped.
pub const DEFAULT_FADE_DELAY: Duration = Duration::from_millis(300);

/// Shrink animation before a minimize turns into a close.
pub const DEFAULT_MINIMIZE_DELAY: Duration = Duration::from_millis(500);

/// Timing of the terminal engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Interval between revealed characters. Zero types instantly.
    pub tick: Duration,
    pub settle_delay: Duration,
    pub fade_delay: Duration,
    pub minimize_delay: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick: DEFAULT_TICK,
            settle_delay: DEFAULT_SETTLE_DELAY,
            fade_delay: DEFAULT_FADE_DELAY,
            minimize_delay: DEFAULT_MINIMIZE_DELAY,
        }
    }
}

impl EngineConfig {
    /// Default timing with a custom typing speed.
    pub fn with_tick(tick: Duration) -> Self {
        Self {
            tick,
            ..Default::default()
        }
    }
}

/// Everything the interactive host needs to start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    /// Alternate content file; `None` uses the built-in CV.
    pub content_path: Option<PathBuf>,
    /// Where the theme preference is stored.
    pub preference_path: PathBuf,
    /// Theme forced from the command line, overriding the stored one.
    pub theme_override: Option<ThemeMode>,
    /// Open the terminal overlay immediately instead of the landing page.
    pub open_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            content_path: None,
            preference_path: crate::preference::default_preference_path(),
            theme_override: None,
            open_on_start: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_page_timings() {
        let config = EngineConfig::default();
        assert_eq!(config.tick, Duration::from_millis(3));
        assert_eq!(config.settle_delay, Duration::from_millis(100));
        assert_eq!(config.fade_delay, Duration::from_millis(300));
        assert_eq!(config.minimize_delay, Duration::from_millis(500));
    }

    #[test]
    fn with_tick_keeps_other_delays() {
        let config = EngineConfig::with_tick(Duration::ZERO);
        assert!(config.tick.is_zero());
        assert_eq!(config.fade_delay, DEFAULT_FADE_DELAY);
    }
}
