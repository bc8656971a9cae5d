//! Non-animated rendering of a single section for `cv-term show`.
//!
//! Pure functions: (ContentStore, Section, OutputFormat) → String.

use serde::Serialize;

use crate::content::{ContactField, ContentStore, Entry, LanguageSkill, Section};
use crate::error::Result;
use crate::sections;

/// Output format for `show`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// The same lines the terminal types, without styling.
    #[default]
    Plain,
    /// The section's records as JSON.
    Json,
}

/// Format one section for output.
pub fn format_section(store: &ContentStore, section: Section, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(format_plain(store, section)),
        OutputFormat::Json => format_json(store, section),
    }
}

// ============================================================================
// PLAIN FORMAT
// ============================================================================

fn format_plain(store: &ContentStore, section: Section) -> String {
    // First line is the prompt echo, meaningless outside the terminal.
    let body = sections::section(store, section);
    let mut out = String::new();
    for line in body.iter().skip(1).skip_while(|l| l.text.is_empty()) {
        out.push_str(line.text.trim_end());
        out.push('\n');
    }
    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
#[serde(untagged)]
enum Records<'a> {
    Contact(&'a [ContactField]),
    Entries(&'a [Entry]),
    Languages(&'a [LanguageSkill]),
}

#[derive(Serialize)]
struct SectionReport<'a> {
    section: Section,
    records: Records<'a>,
}

fn format_json(store: &ContentStore, section: Section) -> Result<String> {
    let records = match section {
        Section::Contact => Records::Contact(store.contact()),
        Section::Languages => Records::Languages(store.languages()),
        Section::Experience | Section::Volunteering | Section::Education => {
            Records::Entries(store.entries(section).unwrap_or_default())
        }
    };
    let json = serde_json::to_string_pretty(&SectionReport { section, records })?;
    Ok(json)
}

// ============================================================================
// TESTS
// ============================================================================
