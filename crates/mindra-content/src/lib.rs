//! # mindra-content
//!
//! Course model, catalog, and authoring for Mindra.
//!
//! - [`model`]: Courses, modules, and quiz questions as stored
//! - [`repository`]: The ordered course catalog
//! - [`editor`]: Form-shaped drafts that validate and commit courses
//! - [`seed`]: Built-in courses for an empty catalog

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod editor;
pub mod model;
pub mod repository;
pub mod seed;

pub use editor::{CommitKind, CommitOutcome, EditorSession, ModuleDraft, QuestionDraft};
pub use model::{Course, CourseDraft, Level, Media, Module, QuizQuestion};
pub use repository::CourseRepository;
