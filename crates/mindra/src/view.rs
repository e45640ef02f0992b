//! Immutable read models handed to a renderer.
//!
//! Everything here is an owned copy; holding a snapshot never blocks or
//! observes later changes to the [`App`](crate::App).

use mindra_auth::SessionUser;
use mindra_content::{Course, Media, QuizQuestion};
use mindra_learn::{AnswerFeedback, CompletionSummary, QuizSession, QuizState};
use serde::Serialize;

/// One catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCard {
    /// Course id.
    pub id: String,
    /// Course title.
    pub title: String,
    /// Course summary.
    pub summary: String,
    /// Level label.
    pub level: String,
    /// Number of modules.
    pub module_count: usize,
}

impl From<&Course> for CourseCard {
    fn from(course: &Course) -> Self {
        Self {
            id: course.id.clone(),
            title: course.title.clone(),
            summary: course.summary.clone(),
            level: course.level.to_string(),
            module_count: course.modules.len(),
        }
    }
}

/// One module of the open course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleView {
    /// Module id.
    pub id: String,
    /// Module title.
    pub title: String,
    /// HTML body.
    pub content: String,
    /// Attached media, if any.
    pub media: Option<Media>,
    /// Number of quiz questions.
    pub quiz_len: usize,
    /// Whether the signed-in user completed it.
    pub completed: bool,
}

/// The open course with the current user's completion flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseView {
    /// Course id.
    pub id: String,
    /// Course title.
    pub title: String,
    /// Course summary.
    pub summary: String,
    /// Level label.
    pub level: String,
    /// Modules in order.
    pub modules: Vec<ModuleView>,
    /// Index of the selected module.
    pub current_module: usize,
    /// Completed versus total modules.
    pub progress: CompletionSummary,
}

impl CourseView {
    /// The selected module, if the course has any.
    pub fn selected(&self) -> Option<&ModuleView> {
        self.modules.get(self.current_module)
    }
}

/// The active quiz.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    /// Course the quiz belongs to.
    pub course_id: String,
    /// Quizzed module.
    pub module_id: String,
    /// Title of the quizzed module.
    pub module_title: String,
    /// Current state.
    pub state: QuizState,
    /// Question being asked, if not finished.
    pub question: Option<QuizQuestion>,
    /// Feedback once the current question is answered.
    pub feedback: Option<AnswerFeedback>,
}

impl From<&QuizSession> for QuizView {
    fn from(session: &QuizSession) -> Self {
        Self {
            course_id: session.course_id().to_string(),
            module_id: session.module_id().to_string(),
            module_title: session.module_title().to_string(),
            state: session.state(),
            question: session.current_question().cloned(),
            feedback: session.feedback().cloned(),
        }
    }
}

/// Everything a renderer needs to draw the app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppSnapshot {
    /// Signed-in user.
    pub user: Option<SessionUser>,
    /// Whether the admin capability is held.
    pub is_admin: bool,
    /// The catalog.
    pub courses: Vec<CourseCard>,
    /// The open course, if any.
    pub open_course: Option<CourseView>,
    /// The active quiz, if any.
    pub quiz: Option<QuizView>,
}

/// Completion of one course for the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseReport {
    /// Course id.
    pub course_id: String,
    /// Course title.
    pub title: String,
    /// Completed versus total modules.
    pub summary: CompletionSummary,
}
