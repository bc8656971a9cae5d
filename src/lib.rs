//! cv-term: a personal portfolio rendered as an interactive fake terminal.

pub mod config;
pub mod content;
pub mod dispatch;
pub mod editor;
pub mod engine;
pub mod error;
pub mod logging;
pub mod output;
pub mod preference;
pub mod report;
pub mod sections;
pub mod session;
pub mod tui;
pub mod typing;

pub use error::{Error, Result};
