//! Section formatting: content store data in, styled lines out.
//!
//! Pure functions shared by the dispatcher (which types the lines) and
//! the `show` command (which prints them at once).

use crate::content::{ContactField, ContentStore, Entry, Profile, Proficiency, Section};
use crate::output::{LineStyle, StyledLine};

/// Slots in the proficiency bar.
pub const BAR_WIDTH: usize = 5;

/// Hint printed after every section body.
pub const BACK_HINT: &str = "  Type \"./menu.sh\" to return | \"clear\" | \"exit\"";

/// Second diagnostic line for an unknown command.
pub const HELP_HINT: &str = "Type \"help\" for available commands.";

// ============================================================================
// PROMPTS
// ============================================================================

/// `user@host:~$ cmd`, the echo of a command line.
pub fn prompt_echo(profile: &Profile, command: &str) -> StyledLine {
    StyledLine::new(format!("{} {}", profile.prompt(), command), LineStyle::Prompt)
}

/// The prompt with nothing after it, printed for an empty command.
pub fn bare_prompt(profile: &Profile) -> StyledLine {
    StyledLine::new(profile.prompt(), LineStyle::Prompt)
}

/// The fake shell command that "produces" a section.
fn section_command(section: Section) -> &'static str {
    match section {
        Section::Contact => "cat ~/.contact",
        Section::Experience => "cat ~/experience.log",
        Section::Volunteering => "cat ~/volunteer.log",
        Section::Education => "cat ~/education.md",
        Section::Languages => "locale -a",
    }
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Contact => "Contact Information",
        Section::Experience => "Work Experience",
        Section::Volunteering => "Volunteering",
        Section::Education => "Education",
        Section::Languages => "Languages",
    }
}

// ============================================================================
// FIXED SCREENS
// ============================================================================

/// The `neofetch` greeting typed when a session opens.
pub fn welcome(store: &ContentStore) -> Vec<StyledLine> {
    let profile = store.profile();
    let mut lines = vec![prompt_echo(profile, "neofetch"), StyledLine::blank()];
    lines.extend(
        profile
            .banner
            .iter()
            .map(|row| StyledLine::new(row.clone(), LineStyle::Ascii)),
    );
    lines.push(StyledLine::blank());
    lines.extend(profile.info.iter().map(|f| {
        StyledLine::new(labeled(f, 10), LineStyle::InfoLine)
    }));
    lines.push(StyledLine::blank());
    lines
}

/// The command overview typed on open, `help` and `clear`.
pub fn main_menu(store: &ContentStore) -> Vec<StyledLine> {
    let mut lines = vec![
        prompt_echo(store.profile(), "./menu.sh"),
        StyledLine::blank(),
        StyledLine::new("  Available commands:", LineStyle::Header),
        StyledLine::blank(),
    ];
    for section in Section::ALL {
        let (name, blurb) = menu_entry(section);
        lines.push(StyledLine::plain(format!(
            "    [{}] {:<11}- {}",
            section.number(),
            name,
            blurb
        )));
    }
    lines.push(StyledLine::blank());
    lines.push(StyledLine::dim("    [0] clear      - Clear terminal"));
    lines.push(StyledLine::dim("    [ESC] exit     - Close terminal"));
    lines.push(StyledLine::blank());
    lines
}

fn menu_entry(section: Section) -> (&'static str, &'static str) {
    match section {
        Section::Contact => ("contact", "View contact information"),
        Section::Experience => ("experience", "View work experience"),
        Section::Volunteering => ("volunteer", "View volunteering"),
        Section::Education => ("education", "View education"),
        Section::Languages => ("languages", "View language skills"),
    }
}

/// Trailing hint after a section body.
pub fn back_hint() -> Vec<StyledLine> {
    vec![StyledLine::dim(BACK_HINT), StyledLine::blank()]
}

/// The two diagnostic lines for an unrecognized command.
pub fn not_found(command: &str) -> Vec<StyledLine> {
    vec![
        StyledLine::dim(format!("bash: {command}: command not found")),
        StyledLine::dim(HELP_HINT),
    ]
}

/// Autocomplete candidates on one line.
pub fn completions(matches: &[&str]) -> StyledLine {
    StyledLine::dim(matches.join("  "))
}

// ============================================================================
// SECTIONS
// ============================================================================

/// Full output of a section command: prelude, header, body.
pub fn section(store: &ContentStore, section: Section) -> Vec<StyledLine> {
    let mut lines = vec![
        prompt_echo(store.profile(), section_command(section)),
        StyledLine::blank(),
        StyledLine::new(format!("# {}", section_title(section)), LineStyle::Header),
        StyledLine::blank(),
    ];

    match section {
        Section::Contact => {
            lines.extend(store.contact().iter().map(|f| StyledLine::plain(labeled(f, 20))));
            lines.push(StyledLine::blank());
        }
        Section::Experience | Section::Volunteering | Section::Education => {
            for entry in store.entries(section).unwrap_or_default() {
                lines.extend(entry_block(entry));
            }
        }
        Section::Languages => {
            for skill in store.languages() {
                let level = skill.proficiency.label();
                lines.push(StyledLine::plain(format!(
                    "  {:<15} {}  {}",
                    skill.name,
                    proficiency_bar(level),
                    level
                )));
            }
            lines.push(StyledLine::blank());
        }
    }

    lines
}

/// One formatted block per entry. Absent optional fields are skipped.
pub fn entry_block(entry: &Entry) -> Vec<StyledLine> {
    let mut lines = vec![
        StyledLine::new(format!("  ## {}", entry.title), LineStyle::Subheader),
        StyledLine::plain(format!("     {}", entry.organization)),
    ];

    let dates = match &entry.location {
        Some(location) => format!("     {} | {}", entry.date_range, location),
        None => format!("     {}", entry.date_range),
    };
    lines.push(StyledLine::dim(dates));

    if let Some(email) = &entry.contact_email {
        lines.push(StyledLine::dim(format!("     Contact: {email}")));
    }
    lines.push(StyledLine::blank());

    if let Some(description) = &entry.description {
        lines.push(StyledLine::dim(format!("     {description}")));
        lines.push(StyledLine::blank());
    }

    lines
}

/// `[=====]`-style bar for a proficiency label. Unknown labels get one slot.
pub fn proficiency_bar(level: &str) -> String {
    let filled = level
        .parse::<Proficiency>()
        .map(Proficiency::filled_slots)
        .unwrap_or(1)
        .min(BAR_WIDTH);
    format!("[{}{}]", "=".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

/// `  Label:` padded to `width` columns, then the value.
fn labeled(field: &ContactField, width: usize) -> String {
    format!("  {:<width$}{}", format!("{}:", field.label), field.value)
}

// ============================================================================
// TESTS
// ============================================================================
