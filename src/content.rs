//! Content store: the CV data the terminal prints.
//!
//! Read-only for the lifetime of the process. The built-in store is plain
//! Rust data, so its shape is checked by the compiler. An alternate store
//! can be loaded once at startup from JSON; after that nothing mutates it.

use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Error, Result};

// ============================================================================
// SECTIONS
// ============================================================================

/// A CV section addressable from the command line and the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Contact,
    Experience,
    Volunteering,
    Education,
    Languages,
}

impl Section {
    /// All sections in menu order.
    pub const ALL: [Section; 5] = [
        Section::Contact,
        Section::Experience,
        Section::Volunteering,
        Section::Education,
        Section::Languages,
    ];

    /// Canonical lower-case name.
    pub fn name(self) -> &'static str {
        match self {
            Section::Contact => "contact",
            Section::Experience => "experience",
            Section::Volunteering => "volunteering",
            Section::Education => "education",
            Section::Languages => "languages",
        }
    }

    /// Menu number shown next to the section in the main menu.
    pub fn number(self) -> u8 {
        match self {
            Section::Contact => 1,
            Section::Experience => 2,
            Section::Volunteering => 3,
            Section::Education => 4,
            Section::Languages => 5,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Section {
    type Err = Error;

    /// Accepts the canonical name, the menu number, and `volunteer`.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "1" | "contact" => Ok(Section::Contact),
            "2" | "experience" => Ok(Section::Experience),
            "3" | "volunteer" | "volunteering" => Ok(Section::Volunteering),
            "4" | "education" => Ok(Section::Education),
            "5" | "languages" => Ok(Section::Languages),
            _ => Err(Error::UnknownSection(s.to_string())),
        }
    }
}

// ============================================================================
// RECORDS
// ============================================================================

/// One job, volunteering role, or degree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub title: String,
    pub organization: String,
    pub date_range: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A labeled line of the contact card ("Email (Personal)", "LinkedIn", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactField {
    pub label: String,
    pub value: String,
}

/// Language proficiency, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Proficiency {
    #[serde(rename = "Elementary")]
    Elementary,
    #[serde(rename = "Limited Working")]
    LimitedWorking,
    #[serde(rename = "Full Professional")]
    FullProfessional,
    #[serde(rename = "Native")]
    Native,
}

impl Proficiency {
    /// Display label, also the accepted parse form.
    pub fn label(self) -> &'static str {
        match self {
            Proficiency::Elementary => "Elementary",
            Proficiency::LimitedWorking => "Limited Working",
            Proficiency::FullProfessional => "Full Professional",
            Proficiency::Native => "Native",
        }
    }

    /// Number of filled slots in the 5-slot proficiency bar.
    ///
    /// Limited Working maps to 2, not 3: the scale is not linear.
    pub fn filled_slots(self) -> usize {
        match self {
            Proficiency::Elementary => 1,
            Proficiency::LimitedWorking => 2,
            Proficiency::FullProfessional => 4,
            Proficiency::Native => 5,
        }
    }
}

impl fmt::Display for Proficiency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error for a proficiency label outside the fixed scale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownProficiency(pub String);

impl FromStr for Proficiency {
    type Err = UnknownProficiency;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Elementary" => Ok(Proficiency::Elementary),
            "Limited Working" => Ok(Proficiency::LimitedWorking),
            "Full Professional" => Ok(Proficiency::FullProfessional),
            "Native" => Ok(Proficiency::Native),
            other => Err(UnknownProficiency(other.to_string())),
        }
    }
}

/// A spoken language and how well it is spoken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageSkill {
    pub name: String,
    pub proficiency: Proficiency,
}

/// Who the terminal belongs to: prompt identity and welcome banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// User part of the prompt (`user@host:~$`).
    pub user: String,
    /// Host part of the prompt.
    pub host: String,
    /// ASCII-art banner printed by the welcome sequence.
    pub banner: Vec<String>,
    /// `neofetch`-style key/value lines under the banner.
    pub info: Vec<ContactField>,
}

impl Profile {
    /// The prompt prefix without a trailing space, e.g. `konstantin@portfolio:~$`.
    pub fn prompt(&self) -> String {
        format!("{}@{}:~$", self.user, self.host)
    }
}

// ============================================================================
// STORE
// ============================================================================

/// The complete, immutable CV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentStore {
    profile: Profile,
    contact: Vec<ContactField>,
    experience: Vec<Entry>,
    volunteering: Vec<Entry>,
    education: Vec<Entry>,
    languages: Vec<LanguageSkill>,
}

impl ContentStore {
    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn contact(&self) -> &[ContactField] {
        &self.contact
    }

    pub fn experience(&self) -> &[Entry] {
        &self.experience
    }

    pub fn volunteering(&self) -> &[Entry] {
        &self.volunteering
    }

    pub fn education(&self) -> &[Entry] {
        &self.education
    }

    pub fn languages(&self) -> &[LanguageSkill] {
        &self.languages
    }

    /// Entries of a list section. `None` for contact and languages,
    /// which are not entry lists.
    pub fn entries(&self, section: Section) -> Option<&[Entry]> {
        match section {
            Section::Experience => Some(&self.experience),
            Section::Volunteering => Some(&self.volunteering),
            Section::Education => Some(&self.education),
            Section::Contact | Section::Languages => None,
        }
    }

    /// Load a store from a JSON file with the same shape as [`ContentStore`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| Error::Content {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| Error::Content {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// The file at `path` if given, otherwise the built-in CV.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                let store = Self::from_json_file(path)?;
                info!(path = %path.display(), "loaded content file");
                Ok(store)
            }
            None => Ok(Self::builtin()),
        }
    }

    /// The CV compiled into the binary.
    pub fn builtin() -> Self {
        ContentStore {
            profile: Profile {
                user: "konstantin".into(),
                host: "portfolio".into(),
                banner: vec![
                    "  _  __                _              _   _       ".into(),
                    " | |/ /___  _ __  ___| |_ __ _ _ __ | |_(_)_ __  ".into(),
                    " | ' // _ \\| '_ \\/ __| __/ _` | '_ \\| __| | '_ \\ ".into(),
                    " | . \\ (_) | | | \\__ \\ || (_| | | | | |_| | | | |".into(),
                    " |_|\\_\\___/|_| |_|___/\\__\\__,_|_| |_|\\__|_|_| |_|".into(),
                ],
                info: vec![
                    field("OS", "Student @ TUM"),
                    field("Degree", "B.Sc. Information Engineering"),
                    field("Location", "Belgrade | Heilbronn"),
                    field("Uptime", "Since Dec 2005"),
                ],
            },
            contact: vec![
                field("Email (Personal)", "konstantin.colovic@gmail.com"),
                field("Email (University)", "konstantin.colovic@tum.de"),
                field("LinkedIn", "linkedin.com/in/konstantincolovic"),
                field("Location", "Belgrade, Serbia | Heilbronn, Germany"),
            ],
            experience: vec![
                Entry {
                    title: "Student Research Assistant".into(),
                    organization: "TUM - Chair of Computer Architecture and Operating Systems (CAOS)"
                        .into(),
                    date_range: "Oct 2025 - Present".into(),
                    location: Some("Heilbronn, Germany".into()),
                    contact_email: Some("colk@cit.tum.de".into()),
                    description: Some(
                        "Benchmarking and optimizing computationally intensive operations on \
                         RISC-V development boards using vector extensions."
                            .into(),
                    ),
                },
                Entry {
                    title: "Tutor in Fundamentals of Programming".into(),
                    organization: "TUM - Chair of Software Engineering".into(),
                    date_range: "Sep 2025 - Present".into(),
                    location: Some("Heilbronn, Germany".into()),
                    contact_email: None,
                    description: Some(
                        "Creating and distributing programming exercises for 1st semester \
                         Information Engineering students."
                            .into(),
                    ),
                },
            ],
            volunteering: vec![
                Entry {
                    title: "Head of University Politics Department".into(),
                    organization: "TUM Student Council Heilbronn (Fachschaft)".into(),
                    date_range: "Dec 2024 - Present".into(),
                    location: None,
                    contact_email: Some("colovic@hn.fs.tum.de".into()),
                    description: Some(
                        "Advocating for student interests in committees and council assemblies."
                            .into(),
                    ),
                },
                Entry {
                    title: "Head of IT Team".into(),
                    organization: "TEDxHeilbronn".into(),
                    date_range: "Jun 2025 - Present".into(),
                    location: None,
                    contact_email: None,
                    description: Some("Leading the IT team for TEDxHeilbronn events.".into()),
                },
            ],
            education: vec![
                Entry {
                    title: "B.Sc. Information Engineering".into(),
                    organization: "Technical University of Munich".into(),
                    date_range: "Aug 2024 - Present".into(),
                    location: None,
                    contact_email: Some("konstantin.colovic@tum.de".into()),
                    description: None,
                },
                Entry {
                    title: "High School Diploma".into(),
                    organization: "Third Belgrade Grammar School".into(),
                    date_range: "Sep 2020 - Jun 2024".into(),
                    location: None,
                    contact_email: None,
                    description: None,
                },
            ],
            languages: vec![
                language("English", Proficiency::FullProfessional),
                language("Serbo-Croatian", Proficiency::Native),
                language("German", Proficiency::LimitedWorking),
                language("French", Proficiency::Elementary),
            ],
        }
    }
}

impl Default for ContentStore {
    fn default() -> Self {
        Self::builtin()
    }
}

fn field(label: &str, value: &str) -> ContactField {
    ContactField {
        label: label.into(),
        value: value.into(),
    }
}

fn language(name: &str, proficiency: Proficiency) -> LanguageSkill {
    LanguageSkill {
        name: name.into(),
        proficiency,
    }
}

// ============================================================================
// TESTS
// ============================================================================
