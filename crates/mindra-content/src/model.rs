//! Course data model.
//!
//! Field names on the wire match the stored catalog documents: questions use
//! `q` and `answerIndex`, and optional fields default when missing.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Level
// ============================================================================

/// Course difficulty. Unknown labels are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    /// No prior knowledge expected.
    #[default]
    Beginner,
    /// Some familiarity expected.
    Intermediate,
    /// Solid familiarity expected.
    Advanced,
    /// Any other label.
    Other(String),
}

impl Level {
    /// Parse a level label, case-insensitively. Empty text means Beginner.
    pub fn parse(label: &str) -> Self {
        let label = label.trim();
        match label.to_ascii_lowercase().as_str() {
            "" | "beginner" => Level::Beginner,
            "intermediate" => Level::Intermediate,
            "advanced" => Level::Advanced,
            _ => Level::Other(label.to_string()),
        }
    }

    /// The display label.
    pub fn as_str(&self) -> &str {
        match self {
            Level::Beginner => "Beginner",
            Level::Intermediate => "Intermediate",
            Level::Advanced => "Advanced",
            Level::Other(label) => label,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Level {
    fn from(label: String) -> Self {
        Level::parse(&label)
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Other(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

// ============================================================================
// Quiz questions
// ============================================================================

/// A multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    /// Question text.
    pub q: String,
    /// Answer options, in display order.
    pub options: Vec<String>,
    /// Index of the correct option.
    #[serde(rename = "answerIndex")]
    pub answer_index: usize,
}

impl QuizQuestion {
    /// Create a question.
    pub fn new<S: Into<String>>(q: S, options: Vec<String>, answer_index: usize) -> Self {
        Self {
            q: q.into(),
            options,
            answer_index,
        }
    }

    /// Whether `choice` is the correct option index.
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.answer_index
    }

    /// The text of the correct option, if the answer index is in range.
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.answer_index).map(String::as_str)
    }
}

// ============================================================================
// Modules and courses
// ============================================================================

/// Media attached to a module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Video URL; empty when there is none.
    #[serde(default)]
    pub video: String,
}

/// A lesson within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Id, unique within the owning course.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Lesson body (HTML).
    #[serde(default)]
    pub content: String,
    /// Optional media attachments.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media: Option<Media>,
    /// Inline quiz; may be empty.
    #[serde(default)]
    pub quiz: Vec<QuizQuestion>,
}

/// A course in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// Slug-derived id, unique within the catalog.
    pub id: String,
    /// Display title.
    pub title: String,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Difficulty level.
    #[serde(default)]
    pub level: Level,
    /// Modules in reading order.
    #[serde(default)]
    pub modules: Vec<Module>,
}

impl Course {
    /// Look up a module by id. With duplicate ids the first one wins.
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.iter().find(|m| m.id == id)
    }

    /// Position of the module with `id`.
    pub fn module_index(&self, id: &str) -> Option<usize> {
        self.modules.iter().position(|m| m.id == id)
    }

    /// Ids of all modules, in order.
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.modules.iter().map(|m| m.id.as_str())
    }
}

/// The replaceable fields of a course: everything but its id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDraft {
    /// Display title.
    pub title: String,
    /// One-line summary.
    pub summary: String,
    /// Difficulty level.
    pub level: Level,
    /// Modules in reading order, ids already assigned.
    pub modules: Vec<Module>,
}

impl CourseDraft {
    /// Attach an id, producing a course.
    pub fn into_course(self, id: String) -> Course {
        Course {
            id,
            title: self.title,
            summary: self.summary,
            level: self.level,
            modules: self.modules,
        }
    }
}
