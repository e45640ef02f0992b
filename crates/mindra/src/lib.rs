//! Mindra learning platform: umbrella crate.
//!
//! Re-exports the component crates and provides [`App`], the explicit
//! application state that replaces ad-hoc globals.

#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod app;
mod error;
pub mod view;

pub use mindra_auth as auth;
pub use mindra_content as content;
pub use mindra_core as core;
pub use mindra_learn as learn;

pub use app::App;
pub use error::{Error, Result};
pub use mindra_core::MindraConfig;
pub use view::{AppSnapshot, CourseCard, CourseReport, CourseView, ModuleView, QuizView};
