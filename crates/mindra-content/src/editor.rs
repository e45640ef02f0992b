//! Course authoring sessions.
//!
//! An [`EditorSession`] mirrors the authoring form: raw text fields for the
//! course, a list of module drafts, and per-module question drafts whose
//! options are typed as one `|`-separated string, with `\|` for a literal
//! bar. Nothing is persisted until [`EditorSession::commit`], which checks the
//! admin capability, validates and normalizes the draft, then creates or
//! updates the course. Dropping a session discards it.
//!
//! Normalization rules applied at commit:
//!
//! - questions with empty text are dropped, even if they have options
//! - untitled modules are named `Module <position>`
//! - existing module ids are kept; new ones are `<slug>-mod-<position>`,
//!   suffixed with `-1`, `-2`, … if that id is already used in the course

use mindra_core::util::ids::{IdAllocator, slugify_or};
use mindra_core::{AdminCapability, Error, Result};

use crate::model::{Course, CourseDraft, Level, Media, Module, QuizQuestion};
use crate::repository::CourseRepository;

/// Separator between options in a question's option text.
pub const OPTION_SEPARATOR: char = '|';

/// Escape character in option text. `\|`, `\\` and an escaped whitespace
/// character stand for themselves; any other backslash is literal.
pub const OPTION_ESCAPE: char = '\\';

/// Id base used when a module title has no usable characters.
const FALLBACK_MODULE_SLUG: &str = "module";

/// Split option text on unescaped [`OPTION_SEPARATOR`]s, trimming unescaped
/// whitespace from each entry and dropping empty ones.
///
/// # Examples
///
/// ```
/// use mindra_content::editor::split_options;
///
/// assert_eq!(split_options(" for | id || name "), vec!["for", "id", "name"]);
/// assert_eq!(split_options(r"a \|\| b | c"), vec!["a || b", "c"]);
/// assert!(split_options(" | ").is_empty());
/// ```
pub fn split_options(source: &str) -> Vec<String> {
    let mut options = Vec::new();
    // (char, escaped) pairs of the option being read
    let mut current: Vec<(char, bool)> = Vec::new();
    let mut chars = source.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            OPTION_ESCAPE => match chars.peek().copied() {
                Some(next) if is_escapable(next) => {
                    chars.next();
                    current.push((next, true));
                }
                _ => current.push((c, false)),
            },
            OPTION_SEPARATOR => push_option(&mut options, std::mem::take(&mut current)),
            _ => current.push((c, false)),
        }
    }
    push_option(&mut options, current);
    options
}

/// Join options back into editable option text that [`split_options`] reads
/// back unchanged.
///
/// # Examples
///
/// ```
/// use mindra_content::editor::{join_options, split_options};
///
/// let options = vec!["a || b".to_string(), " padded ".to_string()];
/// assert_eq!(split_options(&join_options(&options)), options);
/// ```
pub fn join_options(options: &[String]) -> String {
    let separator = format!(" {OPTION_SEPARATOR} ");
    options
        .iter()
        .map(|option| escape_option(option))
        .collect::<Vec<_>>()
        .join(separator.as_str())
}

fn is_escapable(c: char) -> bool {
    c == OPTION_SEPARATOR || c == OPTION_ESCAPE || c.is_whitespace()
}

fn escape_option(option: &str) -> String {
    let body = option.trim();
    let (lead, rest) = option.split_at(option.len() - option.trim_start().len());
    let trail = &rest[body.len()..];

    let mut escaped = String::with_capacity(option.len() + 2);
    for c in lead.chars() {
        escaped.push(OPTION_ESCAPE);
        escaped.push(c);
    }
    for c in body.chars() {
        if c == OPTION_SEPARATOR || c == OPTION_ESCAPE {
            escaped.push(OPTION_ESCAPE);
        }
        escaped.push(c);
    }
    for c in trail.chars() {
        escaped.push(OPTION_ESCAPE);
        escaped.push(c);
    }
    escaped
}

fn push_option(options: &mut Vec<String>, chars: Vec<(char, bool)>) {
    let is_padding = |&(c, escaped): &(char, bool)| !escaped && c.is_whitespace();
    let Some(start) = chars.iter().position(|c| !is_padding(c)) else {
        return;
    };
    let end = chars.iter().rposition(|c| !is_padding(c)).unwrap_or(start);
    options.push(chars[start..=end].iter().map(|&(c, _)| c).collect());
}

// ============================================================================
// Drafts
// ============================================================================

/// A question as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionDraft {
    /// Question text.
    pub text: String,
    /// Options as one separated string.
    pub options: String,
    /// Index of the correct option.
    pub answer_index: usize,
}

impl QuestionDraft {
    /// Create a question draft.
    pub fn new(text: impl Into<String>, options: impl Into<String>, answer_index: usize) -> Self {
        Self {
            text: text.into(),
            options: options.into(),
            answer_index,
        }
    }

    /// Populate a draft from a stored question.
    pub fn from_question(question: &QuizQuestion) -> Self {
        Self {
            text: question.q.clone(),
            options: join_options(&question.options),
            answer_index: question.answer_index,
        }
    }
}

/// A module as typed into the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleDraft {
    /// Id of the module being edited; `None` for a new module.
    pub id: Option<String>,
    /// Title; may be empty.
    pub title: String,
    /// Lesson body (HTML).
    pub content: String,
    /// Media carried over from the stored module.
    pub media: Option<Media>,
    /// Question drafts in order.
    pub questions: Vec<QuestionDraft>,
}

impl ModuleDraft {
    /// Create a draft for a new module.
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Default::default()
        }
    }

    /// Populate a draft from a stored module, keeping its id.
    pub fn from_module(module: &Module) -> Self {
        Self {
            id: Some(module.id.clone()),
            title: module.title.clone(),
            content: module.content.clone(),
            media: module.media.clone(),
            questions: module.quiz.iter().map(QuestionDraft::from_question).collect(),
        }
    }

    /// Append a question draft.
    pub fn with_question(mut self, question: QuestionDraft) -> Self {
        self.questions.push(question);
        self
    }
}

// ============================================================================
// Commit results
// ============================================================================

/// Whether a commit created a course or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitKind {
    /// A new course was added.
    Created,
    /// An existing course was replaced.
    Updated,
}

/// The result of a successful commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitOutcome {
    /// What happened.
    pub kind: CommitKind,
    /// The course as stored.
    pub course: Course,
}

// ============================================================================
// EditorSession
// ============================================================================

/// Transient, form-shaped draft of a course.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorSession {
    editing: Option<String>,
    /// Course title; required.
    pub title: String,
    /// Course summary.
    pub summary: String,
    /// Level label; empty means Beginner.
    pub level: String,
    /// Module drafts in order.
    pub modules: Vec<ModuleDraft>,
}

impl EditorSession {
    /// Start a session for a new course.
    pub fn new() -> Self {
        Self {
            level: Level::Beginner.to_string(),
            ..Default::default()
        }
    }

    /// Start a session editing `course`.
    pub fn for_course(course: &Course) -> Self {
        Self {
            editing: Some(course.id.clone()),
            title: course.title.clone(),
            summary: course.summary.clone(),
            level: course.level.to_string(),
            modules: course.modules.iter().map(ModuleDraft::from_module).collect(),
        }
    }

    /// Id of the course being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Append a module draft.
    pub fn add_module(&mut self, module: ModuleDraft) -> &mut Self {
        self.modules.push(module);
        self
    }

    /// Remove and return the module draft at `index`.
    pub fn remove_module(&mut self, index: usize) -> Option<ModuleDraft> {
        (index < self.modules.len()).then(|| self.modules.remove(index))
    }

    /// Validate and normalize the session into a course draft.
    pub fn build(&self) -> Result<CourseDraft> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::validation_field("title", "Title required"));
        }

        // Existing ids are reserved first so generated ids never steal them.
        let mut ids = IdAllocator::new();
        let kept_ids: Vec<Option<String>> = self
            .modules
            .iter()
            .map(|draft| {
                draft
                    .id
                    .as_deref()
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(|id| ids.claim(id))
            })
            .collect();

        let mut modules = Vec::with_capacity(self.modules.len());
        for (index, (draft, kept_id)) in self.modules.iter().zip(kept_ids).enumerate() {
            let position = index + 1;
            let module_title = match draft.title.trim() {
                "" => format!("Module {position}"),
                t => t.to_string(),
            };
            let id = kept_id.unwrap_or_else(|| {
                let base = format!(
                    "{}-mod-{position}",
                    slugify_or(&module_title, FALLBACK_MODULE_SLUG)
                );
                ids.claim(&base)
            });

            modules.push(Module {
                id,
                quiz: build_quiz(position, &draft.questions)?,
                title: module_title,
                content: draft.content.clone(),
                media: draft.media.clone(),
            });
        }

        Ok(CourseDraft {
            title: title.to_string(),
            summary: self.summary.trim().to_string(),
            level: Level::parse(&self.level),
            modules,
        })
    }

    /// Commit the session to `repo`.
    ///
    /// Fails with [`Error::Permission`] unless `capability` grants admin, and
    /// with [`Error::Validation`] for an invalid draft. Neither failure
    /// touches the repository.
    pub fn commit(
        &self,
        repo: &mut CourseRepository,
        capability: &dyn AdminCapability,
    ) -> Result<CommitOutcome> {
        if !capability.is_admin() {
            return Err(Error::permission("commit course", "admin capability"));
        }

        let draft = self.build()?;
        match &self.editing {
            Some(id) => Ok(CommitOutcome {
                kind: CommitKind::Updated,
                course: repo.update(id, draft)?,
            }),
            None => Ok(CommitOutcome {
                kind: CommitKind::Created,
                course: repo.create(draft)?,
            }),
        }
    }
}

fn build_quiz(module_position: usize, drafts: &[QuestionDraft]) -> Result<Vec<QuizQuestion>> {
    let mut quiz = Vec::with_capacity(drafts.len());
    for (index, draft) in drafts.iter().enumerate() {
        let text = draft.text.trim();
        if text.is_empty() {
            log::debug!(
                "Dropping untitled question {} in module {module_position}",
                index + 1
            );
            continue;
        }

        let field = format!("modules[{module_position}].quiz[{}]", index + 1);
        let options = split_options(&draft.options);
        if options.is_empty() {
            return Err(Error::validation_field(field, "at least one option is required"));
        }
        if draft.answer_index >= options.len() {
            return Err(Error::validation_field(
                field,
                format!(
                    "answer index {} is out of range for {} options",
                    draft.answer_index,
                    options.len()
                ),
            ));
        }

        quiz.push(QuizQuestion::new(text, options, draft.answer_index));
    }
    Ok(quiz)
}
