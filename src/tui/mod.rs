//! Interactive host: a page with a fake terminal window over it.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: data types (App, Action, Transition)
//! - `update`: transitions, no I/O
//! - `view`: rendering
//! - `theme`: palettes
//! - `run`: effects (terminal, threads, preference file)

pub mod run;
pub mod state;
pub mod theme;
pub mod update;
pub mod view;
