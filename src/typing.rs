//! Typing scheduler: reveals queued lines one character per tick.
//!
//! An explicit state machine instead of a chain of timer callbacks. The
//! host decides when a tick happens; the scheduler decides what a tick
//! does. Cancellation is cooperative: every tick first checks whether the
//! session is still active, and an inactive session drops the whole
//! remaining queue, not just the current line.

use std::collections::VecDeque;

use crate::output::{LineHandle, OutputBuffer, StyledLine};

/// What one tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypingStatus {
    /// Nothing was queued.
    Idle,
    /// A character was revealed; more ticks are needed.
    Running,
    /// The last queued line is fully shown.
    Done,
    /// The session went inactive; the rest of the queue was dropped.
    Cancelled,
}

/// The line currently being revealed.
#[derive(Debug)]
struct Reveal {
    handle: LineHandle,
    remaining: VecDeque<char>,
}

/// Sequences lines through the renderer with a per-character delay.
#[derive(Debug, Default)]
pub struct Typist {
    queue: VecDeque<StyledLine>,
    current: Option<Reveal>,
    busy: bool,
}

impl Typist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an animation.
    ///
    /// Only one animation may be outstanding. Returns false and queues
    /// nothing if one is already running.
    pub fn type_lines(&mut self, lines: impl IntoIterator<Item = StyledLine>) -> bool {
        if self.busy {
            return false;
        }
        self.queue.extend(lines);
        self.busy = true;
        true
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Lines not yet started.
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Abandon everything, including a half-revealed line.
    pub fn cancel(&mut self) {
        self.queue.clear();
        self.current = None;
        self.busy = false;
    }

    /// Advance the animation by one tick.
    pub fn tick(&mut self, active: bool, out: &mut OutputBuffer) -> TypingStatus {
        if !self.busy {
            return TypingStatus::Idle;
        }
        if !active {
            self.cancel();
            return TypingStatus::Cancelled;
        }

        loop {
            if let Some(reveal) = self.current.as_mut() {
                if let Some(ch) = reveal.remaining.pop_front() {
                    if out.reveal(reveal.handle, ch) {
                        return TypingStatus::Running;
                    }
                }
                // finished, or the buffer was cleared under us
                self.current = None;
            }

            let Some(line) = self.queue.pop_front() else {
                self.busy = false;
                return TypingStatus::Done;
            };

            let handle = out.append_animated_line(line.style);
            if !line.text.is_empty() {
                self.current = Some(Reveal {
                    handle,
                    remaining: line.text.chars().collect(),
                });
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
    use crate::output::LineStyle;

    fn lines() -> Vec<StyledLine> {
        vec![
            StyledLine::new("$ cat", LineStyle::Prompt),
            StyledLine::blank(),
            StyledLine::new("# Title", LineStyle::Header),
        ]
    }

    fn run_to_end(typist: &mut Typist, out: &mut OutputBuffer) -> (TypingStatus, usize) {
        let mut ticks = 0;
        loop {
            ticks += 1;
            match typist.tick(true, out) {
                TypingStatus::Running => continue,
                status => return (status, ticks),
            }
        }
    }

    #[test]
    fn idle_when_nothing_queued() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        assert_eq!(typist.tick(true, &mut out), TypingStatus::Idle);
        assert!(out.is_empty());
    }

    #[test]
    fn reveals_one_character_per_tick() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        typist.type_lines(vec![StyledLine::plain("abc")]);

        assert_eq!(typist.tick(true, &mut out), TypingStatus::Running);
        assert_eq!(out.lines()[0].text, "a");
        assert_eq!(typist.tick(true, &mut out), TypingStatus::Running);
        assert_eq!(out.lines()[0].text, "ab");
        assert_eq!(typist.tick(true, &mut out), TypingStatus::Running);
        assert_eq!(out.lines()[0].text, "abc");
        assert_eq!(typist.tick(true, &mut out), TypingStatus::Done);
        assert!(!typist.is_busy());
    }

    #[test]
    fn final_buffer_matches_input_lines() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        typist.type_lines(lines());

        let (status, _) = run_to_end(&mut typist, &mut out);

        assert_eq!(status, TypingStatus::Done);
        assert_eq!(out.lines(), lines().as_slice());
    }

    #[test]
    fn empty_line_takes_no_tick() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        typist.type_lines(vec![StyledLine::blank(), StyledLine::blank()]);

        assert_eq!(typist.tick(true, &mut out), TypingStatus::Done);
        assert_eq!(out.len(), 2);
        assert!(out.lines().iter().all(|l| l.text.is_empty()));
    }

    #[test]
    fn tick_count_is_one_per_character_plus_one() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        typist.type_lines(lines());
        let chars: usize = lines().iter().map(|l| l.text.chars().count()).sum();

        let (_, ticks) = run_to_end(&mut typist, &mut out);
        assert_eq!(ticks, chars + 1);
    }

    #[test]
    fn inactive_session_cancels_whole_queue() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        typist.type_lines(lines());

        for _ in 0..3 {
            typist.tick(true, &mut out);
        }
        assert_eq!(typist.tick(false, &mut out), TypingStatus::Cancelled);
        assert!(!typist.is_busy());
        assert_eq!(typist.queued(), 0);

        // Only a prefix of the first line made it out
        assert_eq!(out.len(), 1);
        assert_eq!(out.lines()[0].text, "$ c");

        // Nothing more appears afterwards
        assert_eq!(typist.tick(true, &mut out), TypingStatus::Idle);
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn second_animation_is_refused_while_busy() {
        let mut typist = Typist::new();
        typist.type_lines(lines());
        assert!(!typist.type_lines(vec![StyledLine::plain("late")]));
        assert_eq!(typist.queued(), 3);
    }

    #[test]
    fn multibyte_characters_reveal_whole() {
        let mut typist = Typist::new();
        let mut out = OutputBuffer::new();
        typist.type_lines(vec![StyledLine::plain("ćž")]);
        typist.tick(true, &mut out);
        assert_eq!(out.lines()[0].text, "ć");
        typist.tick(true, &mut out);
        assert_eq!(out.lines()[0].text, "ćž");
    }
}
