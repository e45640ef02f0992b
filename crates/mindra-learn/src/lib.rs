//! # mindra-learn
//!
//! Progress tracking and quiz evaluation.
//!
//! - [`progress`]: Per-user completion flags
//! - [`quiz`]: The quiz state machine

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod progress;
pub mod quiz;

pub use progress::{CompletionSummary, CourseProgress, ProgressTracker, UserProgress};
pub use quiz::{AnswerFeedback, QuizOutcome, QuizSession, QuizState};
