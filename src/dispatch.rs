//! Command dispatcher: normalized command text → plan of steps.
//!
//! Dispatch is pure. It never touches the session; it describes what
//! should happen as an ordered [`Step`] list and the engine runs it.
//! The menu state is not consulted: every command works from anywhere.

use crate::content::{ContentStore, Section};
use crate::output::StyledLine;
use crate::sections;
use crate::session::Menu;

/// Words the Tab key completes against, in listing order.
pub const VOCABULARY: [&str; 12] = [
    "contact",
    "experience",
    "volunteer",
    "volunteering",
    "education",
    "languages",
    "clear",
    "exit",
    "quit",
    "help",
    "menu",
    "./menu.sh",
];

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Show(Section),
    Clear,
    Exit,
    Menu,
    Empty,
    Unknown(String),
}

impl Command {
    /// Parse already-normalized (trimmed, lower-cased) input.
    pub fn parse(input: &str) -> Self {
        match input {
            "" => Command::Empty,
            "1" | "contact" => Command::Show(Section::Contact),
            "2" | "experience" => Command::Show(Section::Experience),
            "3" | "volunteer" | "volunteering" => Command::Show(Section::Volunteering),
            "4" | "education" => Command::Show(Section::Education),
            "5" | "languages" => Command::Show(Section::Languages),
            "0" | "clear" => Command::Clear,
            "exit" | "quit" => Command::Exit,
            "help" | "menu" | "./menu.sh" => Command::Menu,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// Trim and lower-case raw input the way the prompt does before dispatch.
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// One unit of work in a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// Append a finished line immediately.
    Print(StyledLine),
    /// Animate lines through the typing scheduler; the plan waits for it.
    Type(Vec<StyledLine>),
    /// Set the cosmetic menu label.
    SetMenu(Menu),
    /// Show the input cursor line with an empty command.
    ArmInput,
    /// Wipe the output buffer.
    Clear,
    /// Close the session.
    Close,
}

/// Build the plan for a normalized (trimmed, lower-cased) command line.
///
/// The echo repeats the input as typed, so `3` and `volunteering` differ
/// only in their first step.
pub fn plan(input: &str, store: &ContentStore) -> Vec<Step> {
    let profile = store.profile();
    let command = Command::parse(input);

    if command == Command::Empty {
        return vec![Step::Print(sections::bare_prompt(profile)), Step::ArmInput];
    }

    let mut steps = vec![Step::Print(sections::prompt_echo(profile, input))];
    match command {
        Command::Show(section) => steps.extend(section_plan(store, section)),
        Command::Clear => {
            steps.push(Step::Clear);
            steps.extend(menu_plan(store));
        }
        Command::Exit => steps.push(Step::Close),
        Command::Menu => steps.extend(menu_plan(store)),
        Command::Unknown(text) => {
            steps.extend(sections::not_found(&text).into_iter().map(Step::Print));
            steps.push(Step::ArmInput);
        }
        Command::Empty => {}
    }
    steps
}

/// Main menu: label, typed overview, input.
pub fn menu_plan(store: &ContentStore) -> Vec<Step> {
    vec![
        Step::SetMenu(Menu::Main),
        Step::Type(sections::main_menu(store)),
        Step::ArmInput,
    ]
}

/// Welcome greeting followed by the main menu.
pub fn welcome_plan(store: &ContentStore) -> Vec<Step> {
    let mut steps = vec![Step::Type(sections::welcome(store))];
    steps.extend(menu_plan(store));
    steps
}

/// Section body, then the "return to menu" hint in the Sub state.
fn section_plan(store: &ContentStore, section: Section) -> Vec<Step> {
    vec![
        Step::Type(sections::section(store, section)),
        Step::SetMenu(Menu::Sub),
        Step::Type(sections::back_hint()),
        Step::ArmInput,
    ]
}

/// Vocabulary words starting with `prefix` (compared lower-cased).
///
/// An empty prefix matches nothing.
pub fn complete(prefix: &str) -> Vec<&'static str> {
    let prefix = prefix.to_lowercase();
    if prefix.is_empty() {
        return Vec::new();
    }
    VOCABULARY
        .iter()
        .copied()
        .filter(|word| word.starts_with(&prefix))
        .collect()
}

// ============================================================================
// TESTS
// ============================================================================
