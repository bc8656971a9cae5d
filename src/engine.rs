//! The terminal engine: session, scrollback, typing and timers in one
//! single-threaded object.
//!
//! The host feeds it two kinds of input:
//! - keys, through [`Engine::handle_key`] and the window-chrome methods
//! - elapsed time, through [`Engine::advance`]
//!
//! Everything else (dispatching plans, revealing characters, firing the
//! settle/fade/minimize delays) happens inside those calls. Nothing here
//! blocks or spawns; the host owns the clock.

use std::collections::VecDeque;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::content::ContentStore;
use crate::dispatch::{self, Step};
use crate::editor::{self, EditOutcome, Key};
use crate::output::OutputBuffer;
use crate::sections;
use crate::session::{Menu, TerminalSession};
use crate::typing::{Typist, TypingStatus};

/// Whether the engine took a key. Consumed keys must not reach the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Consumed,
    Ignored,
}

/// A deferred action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerKind {
    /// Settle delay elapsed: start the welcome sequence.
    Welcome,
    /// Fade elapsed: wipe the hidden buffer and reset the menu.
    FinishClose,
    /// Minimize animation elapsed: close.
    FinishMinimize,
}

#[derive(Debug)]
struct Timer {
    kind: TimerKind,
    remaining: Duration,
}

/// The terminal overlay and everything it owns.
#[derive(Debug)]
pub struct Engine {
    config: EngineConfig,
    content: ContentStore,
    session: TerminalSession,
    output: OutputBuffer,
    typist: Typist,
    plan: VecDeque<Step>,
    timers: Vec<Timer>,
    visible: bool,
    minimizing: bool,
    /// Elapsed time not yet spent on typing ticks.
    backlog: Duration,
}

impl Engine {
    pub fn new(content: ContentStore, config: EngineConfig) -> Self {
        Engine {
            config,
            content,
            session: TerminalSession::new(),
            output: OutputBuffer::new(),
            typist: Typist::new(),
            plan: VecDeque::new(),
            timers: Vec::new(),
            visible: false,
            minimizing: false,
            backlog: Duration::ZERO,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    pub fn session(&self) -> &TerminalSession {
        &self.session
    }

    pub fn output(&self) -> &OutputBuffer {
        &self.output
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The overlay is shown. False as soon as a close starts.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// The minimize animation is running.
    pub fn is_minimizing(&self) -> bool {
        self.minimizing
    }

    /// No plan, animation, or timer is pending.
    pub fn is_idle(&self) -> bool {
        self.plan.is_empty() && !self.typist.is_busy() && self.timers.is_empty()
    }

    /// The prompt shown on the input line.
    pub fn prompt(&self) -> String {
        self.content.profile().prompt()
    }

    // ------------------------------------------------------------------
    // Lifecycle
    // ------------------------------------------------------------------

    /// Open the overlay: fresh state, empty buffer, welcome after the settle delay.
    pub fn open_session(&mut self) {
        info!("terminal opened");
        self.session.open();
        self.typist.cancel();
        self.plan.clear();
        // a pending fade from the previous close must not wipe this session
        self.timers.clear();
        self.output.clear();
        self.visible = true;
        self.minimizing = false;
        self.backlog = Duration::ZERO;
        self.schedule(TimerKind::Welcome, self.config.settle_delay);
    }

    /// Close the overlay. Any animation stops on its next tick; the buffer
    /// is wiped once the fade delay has passed.
    pub fn close_session(&mut self) {
        info!(typing = self.session.is_typing, "terminal closed");
        self.session.close();
        self.plan.clear();
        self.timers.clear();
        self.visible = false;
        self.minimizing = false;
        self.schedule(TimerKind::FinishClose, self.config.fade_delay);
    }

    /// The external open/close trigger.
    pub fn toggle_session(&mut self) {
        if self.session.active {
            self.close_session();
        } else {
            self.open_session();
        }
    }

    /// Window chrome: shrink, then close.
    pub fn minimize(&mut self) {
        if !self.session.active || self.minimizing {
            return;
        }
        debug!("terminal minimizing");
        self.minimizing = true;
        self.schedule(TimerKind::FinishMinimize, self.config.minimize_delay);
    }

    /// Window chrome: purely visual flag.
    pub fn toggle_fullscreen(&mut self) {
        if self.session.active {
            self.session.fullscreen = !self.session.fullscreen;
        }
    }

    // ------------------------------------------------------------------
    // Input
    // ------------------------------------------------------------------

    /// Feed one key to the input line.
    pub fn handle_key(&mut self, key: Key) -> KeyOutcome {
        match editor::handle_key(&mut self.session, key) {
            EditOutcome::Ignored => KeyOutcome::Ignored,
            EditOutcome::Consumed => KeyOutcome::Consumed,
            EditOutcome::Close => {
                self.close_session();
                KeyOutcome::Consumed
            }
            EditOutcome::Submit(command) => {
                debug!(command = %command, "dispatching");
                let steps = dispatch::plan(&command, &self.content);
                self.run_plan(steps);
                KeyOutcome::Consumed
            }
            EditOutcome::ShowMatches { attempt, matches } => {
                let profile = self.content.profile();
                self.output.append_line(sections::prompt_echo(profile, &attempt));
                self.output.append_line(sections::completions(&matches));
                KeyOutcome::Consumed
            }
        }
    }

    // ------------------------------------------------------------------
    // Time
    // ------------------------------------------------------------------

    /// Let `elapsed` pass: fire due timers and spend whole ticks on typing.
    ///
    /// An animation started by a timer in this call gets its first tick on
    /// the next call.
    pub fn advance(&mut self, elapsed: Duration) {
        let was_busy = self.typist.is_busy();
        self.fire_timers(elapsed);

        if !self.typist.is_busy() {
            self.backlog = Duration::ZERO;
            return;
        }

        if self.config.tick.is_zero() {
            while self.typist.is_busy() {
                self.tick_typing();
            }
            return;
        }

        if was_busy {
            self.backlog += elapsed;
        }
        while self.backlog >= self.config.tick && self.typist.is_busy() {
            self.backlog -= self.config.tick;
            self.tick_typing();
        }
        if !self.typist.is_busy() {
            self.backlog = Duration::ZERO;
        }
    }

    fn schedule(&mut self, kind: TimerKind, delay: Duration) {
        self.timers.push(Timer {
            kind,
            remaining: delay,
        });
    }

    fn fire_timers(&mut self, elapsed: Duration) {
        let mut due = Vec::new();
        self.timers.retain_mut(|timer| {
            timer.remaining = timer.remaining.saturating_sub(elapsed);
            if timer.remaining.is_zero() {
                due.push(timer.kind);
                false
            } else {
                true
            }
        });

        for kind in due {
            match kind {
                TimerKind::Welcome => {
                    if self.session.active {
                        let steps = dispatch::welcome_plan(&self.content);
                        self.run_plan(steps);
                    }
                }
                TimerKind::FinishClose => {
                    self.output.clear();
                    self.session.menu = Menu::Main;
                }
                TimerKind::FinishMinimize => {
                    self.minimizing = false;
                    if self.session.active {
                        self.close_session();
                    }
                }
            }
        }
    }

    fn tick_typing(&mut self) {
        match self.typist.tick(self.session.active, &mut self.output) {
            TypingStatus::Done => {
                self.session.is_typing = false;
                self.drive();
            }
            TypingStatus::Cancelled => {
                debug!("animation cancelled");
                self.session.is_typing = false;
                self.plan.clear();
            }
            TypingStatus::Running | TypingStatus::Idle => {}
        }
    }

    // ------------------------------------------------------------------
    // Plans
    // ------------------------------------------------------------------

    fn run_plan(&mut self, steps: Vec<Step>) {
        self.plan.extend(steps);
        self.drive();
    }

    /// Execute steps until one has to wait for the typing scheduler.
    fn drive(&mut self) {
        while !self.typist.is_busy() {
            if !self.session.active {
                self.plan.clear();
                return;
            }
            let Some(step) = self.plan.pop_front() else {
                return;
            };
            match step {
                Step::Print(line) => {
                    self.output.append_line(line);
                }
                Step::Type(lines) => {
                    self.session.is_typing = true;
                    self.session.input_armed = false;
                    self.typist.type_lines(lines);
                }
                Step::SetMenu(menu) => self.session.menu = menu,
                Step::ArmInput => self.session.arm_input(),
                Step::Clear => self.output.clear(),
                Step::Close => self.close_session(),
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Section;
    use crate::output::{LineStyle, StyledLine};

    const TICK: Duration = Duration::from_millis(3);

    fn engine() -> Engine {
        Engine::new(ContentStore::builtin(), EngineConfig::default())
    }

    fn settle(engine: &mut Engine) {
        for _ in 0..200_000 {
            if engine.is_idle() {
                return;
            }
            engine.advance(TICK);
        }
        panic!("engine never went idle");
    }

    fn opened() -> Engine {
        let mut engine = engine();
        engine.open_session();
        settle(&mut engine);
        engine
    }

    fn submit(engine: &mut Engine, text: &str) {
        for c in text.chars() {
            assert_eq!(engine.handle_key(Key::Char(c)), KeyOutcome::Consumed);
        }
        assert_eq!(engine.handle_key(Key::Enter), KeyOutcome::Consumed);
        settle(engine);
    }

    fn texts(engine: &Engine) -> Vec<String> {
        engine.output().lines().iter().map(|l| l.text.clone()).collect()
    }

    fn expected_lines(steps: &[Step]) -> Vec<StyledLine> {
        let mut lines = Vec::new();
        for step in steps {
            match step {
                Step::Print(line) => lines.push(line.clone()),
                Step::Type(typed) => lines.extend(typed.iter().cloned()),
                _ => {}
            }
        }
        lines
    }

    #[test]
    fn welcome_waits_for_settle_delay() {
        let mut engine = engine();
        engine.open_session();
        assert!(engine.is_visible());
        assert!(engine.output().is_empty());

        engine.advance(Duration::from_millis(99));
        assert!(engine.output().is_empty());
        assert!(!engine.session().is_typing);

        engine.advance(Duration::from_millis(1));
        assert!(engine.session().is_typing);
    }

    #[test]
    fn open_ends_on_main_menu_with_armed_input() {
        let engine = opened();
        let expected = expected_lines(&dispatch::welcome_plan(engine.content()));
        assert_eq!(engine.output().lines(), expected.as_slice());
        assert_eq!(engine.session().menu, Menu::Main);
        assert!(engine.session().input_armed);
        assert!(!engine.session().is_typing);
    }

    #[test]
    fn final_output_independent_of_tick_granularity() {
        let mut fine = engine();
        fine.open_session();
        settle(&mut fine);

        let mut coarse = engine();
        coarse.open_session();
        for _ in 0..50 {
            coarse.advance(Duration::from_secs(1));
        }
        assert!(coarse.is_idle());

        let mut instant = Engine::new(ContentStore::builtin(), EngineConfig::with_tick(Duration::ZERO));
        instant.open_session();
        instant.advance(Duration::from_millis(100));
        assert!(instant.is_idle());

        assert_eq!(fine.output().lines(), coarse.output().lines());
        assert_eq!(fine.output().lines(), instant.output().lines());
    }

    #[test]
    fn keys_ignored_while_typing() {
        let mut engine = engine();
        engine.open_session();
        engine.advance(Duration::from_millis(100));
        engine.advance(TICK);
        assert!(engine.session().is_typing);
        assert_eq!(engine.handle_key(Key::Char('x')), KeyOutcome::Ignored);
        assert!(engine.session().pending_input.is_empty());
    }

    #[test]
    fn section_command_enters_sub_menu() {
        let mut engine = opened();
        submit(&mut engine, "contact");

        assert_eq!(engine.session().menu, Menu::Sub);
        assert!(engine.session().input_armed);
        let lines = texts(&engine);
        assert!(lines.contains(&"konstantin@portfolio:~$ contact".to_string()));
        assert!(lines.contains(&sections::BACK_HINT.to_string()));
    }

    #[test]
    fn volunteering_aliases_render_identical_blocks() {
        let mut bodies = Vec::new();
        for input in ["3", "volunteer", "volunteering"] {
            let mut engine = opened();
            let before = engine.output().len();
            submit(&mut engine, input);
            // drop the echo, keep everything after it
            bodies.push(engine.output().lines()[before + 1..].to_vec());
        }
        assert_eq!(bodies[0], bodies[1]);
        assert_eq!(bodies[1], bodies[2]);
        let expected = sections::section(&ContentStore::builtin(), Section::Volunteering);
        assert_eq!(bodies[0][..expected.len()], expected[..]);
    }

    #[test]
    fn unknown_command_prints_two_lines_and_keeps_menu() {
        let mut engine = opened();
        submit(&mut engine, "contact");
        let before = engine.output().len();

        submit(&mut engine, "foo");

        let lines = engine.output().lines();
        assert_eq!(lines.len(), before + 3);
        assert_eq!(lines[before].text, "konstantin@portfolio:~$ foo");
        assert_eq!(lines[before + 1], StyledLine::dim("bash: foo: command not found"));
        assert_eq!(lines[before + 2], StyledLine::dim(sections::HELP_HINT));
        assert_eq!(engine.session().menu, Menu::Sub);
        assert!(engine.session().input_armed);
    }

    #[test]
    fn empty_enter_prints_bare_prompt() {
        let mut engine = opened();
        let before = engine.output().len();
        submit(&mut engine, "");
        assert_eq!(engine.output().len(), before + 1);
        assert_eq!(
            engine.output().lines()[before],
            StyledLine::new("konstantin@portfolio:~$", LineStyle::Prompt)
        );
        assert!(engine.session().input_armed);
    }

    #[test]
    fn clear_leaves_only_the_main_menu() {
        let mut engine = opened();
        submit(&mut engine, "experience");
        submit(&mut engine, "clear");

        let expected = sections::main_menu(engine.content());
        assert_eq!(engine.output().lines(), expected.as_slice());
        assert_eq!(engine.session().menu, Menu::Main);
    }

    #[test]
    fn help_returns_to_main_menu() {
        let mut engine = opened();
        submit(&mut engine, "languages");
        assert_eq!(engine.session().menu, Menu::Sub);
        submit(&mut engine, "help");
        assert_eq!(engine.session().menu, Menu::Main);
    }

    #[test]
    fn exit_closes_and_wipes_after_fade() {
        let mut engine = opened();
        submit(&mut engine, "contact");
        let before = engine.output().len();
        for c in "exit".chars() {
            engine.handle_key(Key::Char(c));
        }
        engine.handle_key(Key::Enter);

        assert!(!engine.session().active);
        assert!(!engine.is_visible());
        // echo printed, nothing else
        assert_eq!(engine.output().len(), before + 1);
        assert_eq!(engine.session().menu, Menu::Sub);

        engine.advance(Duration::from_millis(300));
        assert!(engine.output().is_empty());
        assert_eq!(engine.session().menu, Menu::Main);
    }

    #[test]
    fn closing_mid_animation_leaves_a_prefix() {
        let mut engine = engine();
        engine.open_session();
        engine.advance(Duration::from_millis(100));
        for _ in 0..40 {
            engine.advance(TICK);
        }
        engine.close_session();
        let snapshot = engine.output().lines().to_vec();

        engine.advance(TICK);
        engine.advance(TICK);
        assert_eq!(engine.output().lines(), snapshot.as_slice());
        assert!(!engine.session().is_typing);

        let queued = sections::welcome(engine.content());
        assert!(!snapshot.is_empty() && snapshot.len() < queued.len());
        for (shown, full) in snapshot.iter().zip(&queued) {
            assert_eq!(shown.style, full.style);
            assert!(full.text.starts_with(&shown.text));
        }
    }

    #[test]
    fn escape_cancels_running_animation() {
        let mut engine = engine();
        engine.open_session();
        engine.advance(Duration::from_millis(100));
        engine.advance(TICK);
        assert!(engine.session().is_typing);

        assert_eq!(engine.handle_key(Key::Escape), KeyOutcome::Consumed);
        assert!(!engine.session().active);
        let len = engine.output().len();
        engine.advance(TICK);
        assert_eq!(engine.output().len(), len);
    }

    #[test]
    fn reopen_during_fade_is_not_wiped() {
        let mut engine = opened();
        engine.close_session();
        engine.advance(Duration::from_millis(100));
        engine.open_session();
        engine.advance(Duration::from_millis(100));
        // the old fade would have fired 200ms into this
        engine.advance(Duration::from_millis(300));
        assert_eq!(
            engine.output().lines()[0].text,
            "konstantin@portfolio:~$ neofetch"
        );
        settle(&mut engine);
        assert!(engine.session().input_armed);
    }

    #[test]
    fn history_survives_reopen() {
        let mut engine = opened();
        submit(&mut engine, "contact");
        engine.close_session();
        settle(&mut engine);
        engine.open_session();
        settle(&mut engine);

        engine.handle_key(Key::Up);
        assert_eq!(engine.session().pending_input, "contact");
    }

    #[test]
    fn tab_with_several_matches_prints_them() {
        let mut engine = opened();
        let before = engine.output().len();
        engine.handle_key(Key::Char('e'));
        assert_eq!(engine.handle_key(Key::Tab), KeyOutcome::Consumed);

        let lines = texts(&engine);
        assert_eq!(lines.len(), before + 2);
        assert_eq!(lines[before], "konstantin@portfolio:~$ e");
        assert_eq!(lines[before + 1], "experience  education  exit");
        assert_eq!(engine.session().pending_input, "e");
        assert!(engine.session().input_armed);
    }

    #[test]
    fn minimize_closes_after_animation() {
        let mut engine = opened();
        engine.minimize();
        assert!(engine.is_minimizing());
        assert!(engine.session().active);

        engine.advance(Duration::from_millis(499));
        assert!(engine.session().active);
        engine.advance(Duration::from_millis(1));
        assert!(!engine.session().active);
        assert!(!engine.is_minimizing());
    }

    #[test]
    fn fullscreen_toggles_only_while_open_and_resets_on_close() {
        let mut engine = engine();
        engine.toggle_fullscreen();
        assert!(!engine.session().fullscreen);

        engine.open_session();
        engine.toggle_fullscreen();
        assert!(engine.session().fullscreen);
        engine.close_session();
        assert!(!engine.session().fullscreen);
    }

    #[test]
    fn toggle_session_flips_state() {
        let mut engine = engine();
        engine.toggle_session();
        assert!(engine.session().active);
        engine.toggle_session();
        assert!(!engine.session().active);
    }

    #[test]
    fn keys_ignored_when_closed() {
        let mut engine = engine();
        assert_eq!(engine.handle_key(Key::Char('a')), KeyOutcome::Ignored);
        assert_eq!(engine.handle_key(Key::Escape), KeyOutcome::Ignored);
    }
}
