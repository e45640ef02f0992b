//! Quiz evaluation.
//!
//! A [`QuizSession`] walks a module's questions once, in order:
//!
//! ```text
//! Asking(0, 0) --answer--> Asking(0, 0) + feedback --next--> Asking(1, s) ... --next--> Finished(s, n)
//! ```
//!
//! Answering shows feedback but does not advance; `next` advances and adds a
//! point if the answer was correct. Only the first answer to a question
//! counts, further answers are rejected. Skipping a question (calling `next`
//! without answering) scores nothing. An empty quiz starts out finished.
//!
//! Sessions are never persisted; dropping one discards the attempt.

use std::fmt;

use mindra_content::{Module, QuizQuestion};
use mindra_core::{Error, Result};
use serde::Serialize;

/// Where a quiz session stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum QuizState {
    /// Showing question `index`; `score` counts earlier questions.
    Asking {
        /// Zero-based question index.
        index: usize,
        /// Correct answers so far.
        score: usize,
    },
    /// Every question has been passed.
    Finished {
        /// Correct answers.
        score: usize,
        /// Number of questions.
        total: usize,
    },
}

impl QuizState {
    /// Returns `true` in the terminal state.
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Finished { .. })
    }
}

impl fmt::Display for QuizState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Asking { index, score } => write!(f, "asking #{} (score {score})", index + 1),
            Self::Finished { score, total } => write!(f, "finished {score}/{total}"),
        }
    }
}

/// Feedback for a submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerFeedback {
    /// Zero-based index of the answered question.
    pub question_index: usize,
    /// The option chosen.
    pub chosen: usize,
    /// Whether the choice was correct.
    pub correct: bool,
    /// Text of the correct option, if the stored answer index is in range.
    pub correct_option: Option<String>,
}

/// Final result of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuizOutcome {
    /// Correct answers.
    pub score: usize,
    /// Number of questions.
    pub total: usize,
}

impl QuizOutcome {
    /// A finished quiz with at least one correct answer completes its module.
    pub fn earns_completion(&self) -> bool {
        self.score > 0
    }
}

/// One attempt at a module's quiz.
#[derive(Debug, Clone)]
pub struct QuizSession {
    course_id: String,
    module_id: String,
    module_title: String,
    questions: Vec<QuizQuestion>,
    state: QuizState,
    answered: Option<AnswerFeedback>,
}

impl QuizSession {
    /// Start a session over the quiz of `module` in course `course_id`.
    pub fn new(course_id: impl Into<String>, module: &Module) -> Self {
        let state = if module.quiz.is_empty() {
            QuizState::Finished { score: 0, total: 0 }
        } else {
            QuizState::Asking { index: 0, score: 0 }
        };
        Self {
            course_id: course_id.into(),
            module_id: module.id.clone(),
            module_title: module.title.clone(),
            questions: module.quiz.clone(),
            state,
            answered: None,
        }
    }

    /// Id of the course the module belongs to.
    pub fn course_id(&self) -> &str {
        &self.course_id
    }

    /// Id of the quizzed module.
    pub fn module_id(&self) -> &str {
        &self.module_id
    }

    /// Title of the quizzed module.
    pub fn module_title(&self) -> &str {
        &self.module_title
    }

    /// Number of questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Returns `true` if the quiz has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Current state.
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// The question being asked, if not finished.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match self.state {
            QuizState::Asking { index, .. } => self.questions.get(index),
            QuizState::Finished { .. } => None,
        }
    }

    /// Feedback for the current question, once answered.
    pub fn feedback(&self) -> Option<&AnswerFeedback> {
        self.answered.as_ref()
    }

    /// The outcome, once finished.
    pub fn outcome(&self) -> Option<QuizOutcome> {
        match self.state {
            QuizState::Finished { score, total } => Some(QuizOutcome { score, total }),
            QuizState::Asking { .. } => None,
        }
    }

    /// Submit `choice` for the current question.
    ///
    /// The question locks after the first accepted answer; later answers are
    /// rejected with [`Error::InvalidState`]. A choice outside the option
    /// list is rejected with [`Error::Validation`] and does not lock.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerFeedback> {
        let QuizState::Asking { index, .. } = self.state else {
            return Err(Error::invalid_state("quiz is finished"));
        };
        if self.answered.is_some() {
            return Err(Error::invalid_state(format!(
                "question {} already answered",
                index + 1
            )));
        }
        let question = self
            .questions
            .get(index)
            .ok_or_else(|| Error::invalid_state(format!("question {} missing", index + 1)))?;
        if choice >= question.options.len() {
            return Err(Error::validation_field(
                "choice",
                format!(
                    "option {choice} does not exist; question has {} options",
                    question.options.len()
                ),
            ));
        }

        let feedback = AnswerFeedback {
            question_index: index,
            chosen: choice,
            correct: question.is_correct(choice),
            correct_option: question.correct_option().map(str::to_string),
        };
        log::debug!(
            "Quiz {}: question {} answered, correct={}",
            self.module_id,
            index + 1,
            feedback.correct
        );
        self.answered = Some(feedback.clone());
        Ok(feedback)
    }

    /// Move past the current question, scoring its answer.
    pub fn next(&mut self) -> Result<QuizState> {
        let QuizState::Asking { index, score } = self.state else {
            return Err(Error::invalid_state("quiz is finished"));
        };

        let earned = self.answered.take().is_some_and(|f| f.correct);
        let score = score + usize::from(earned);
        let index = index + 1;

        self.state = if index >= self.questions.len() {
            QuizState::Finished {
                score,
                total: self.questions.len(),
            }
        } else {
            QuizState::Asking { index, score }
        };
        Ok(self.state)
    }
}
