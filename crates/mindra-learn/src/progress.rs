//! Per-user completion tracking.
//!
//! All users share one document in the store:
//! `email -> course id -> module id -> completed`. Every write replaces the
//! whole document. A user entry of the wrong shape is dropped on read without
//! affecting anyone else's. Operations that change progress need a signed-in
//! user and fail with [`Error::Permission`] otherwise; reads for a signed-out
//! caller simply see no progress.

use std::collections::BTreeMap;

use mindra_content::Course;
use mindra_core::store::{Store, keys};
use mindra_core::{Error, Result};
use serde::Serialize;

/// Completion flags for one course, keyed by module id.
pub type CourseProgress = BTreeMap<String, bool>;

/// Completion flags for one user, keyed by course id.
pub type UserProgress = BTreeMap<String, CourseProgress>;

type ProgressDocument = BTreeMap<String, UserProgress>;

/// Completed versus total modules of one course.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CompletionSummary {
    /// Modules marked complete.
    pub done: usize,
    /// Modules in the course.
    pub total: usize,
}

impl CompletionSummary {
    /// Returns `true` if every module is complete (and there is at least one).
    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.done == self.total
    }
}

/// Reads and writes completion flags.
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    store: Store,
}

impl ProgressTracker {
    /// Create a tracker over `store`.
    pub fn new(store: Store) -> Self {
        Self { store }
    }

    /// All progress of `user`; empty when signed out or nothing is recorded.
    pub fn get(&self, user: Option<&str>) -> UserProgress {
        let Some(email) = user else {
            return UserProgress::new();
        };
        self.document().remove(email).unwrap_or_default()
    }

    /// Whether `user` completed `module_id` of `course_id`.
    pub fn is_complete(&self, user: Option<&str>, course_id: &str, module_id: &str) -> bool {
        self.get(user)
            .get(course_id)
            .and_then(|course| course.get(module_id))
            .copied()
            .unwrap_or(false)
    }

    /// Flip the completion flag and return its new value.
    pub fn toggle(&self, user: Option<&str>, course_id: &str, module_id: &str) -> Result<bool> {
        let email = require_user(user, "toggle completion")?;
        let mut document = self.document();
        let flag = document
            .entry(email.to_string())
            .or_default()
            .entry(course_id.to_string())
            .or_default()
            .entry(module_id.to_string())
            .or_insert(false);
        *flag = !*flag;
        let value = *flag;

        self.write(&document)?;
        log::info!("{email}: {course_id}/{module_id} -> {value}");
        Ok(value)
    }

    /// Set the completion flag.
    pub fn mark_complete(
        &self,
        user: Option<&str>,
        course_id: &str,
        module_id: &str,
        completed: bool,
    ) -> Result<()> {
        let email = require_user(user, "record completion")?;
        let mut document = self.document();
        document
            .entry(email.to_string())
            .or_default()
            .entry(course_id.to_string())
            .or_default()
            .insert(module_id.to_string(), completed);

        self.write(&document)?;
        log::info!("{email}: {course_id}/{module_id} = {completed}");
        Ok(())
    }

    /// Count completed modules of `course`. Flags for modules no longer in
    /// the course are not counted.
    pub fn summary(&self, user: Option<&str>, course: &Course) -> CompletionSummary {
        let progress = self.get(user);
        let flags = progress.get(&course.id);
        let done = course
            .module_ids()
            .filter(|id| flags.and_then(|f| f.get(*id)).copied().unwrap_or(false))
            .count();
        CompletionSummary {
            done,
            total: course.modules.len(),
        }
    }

    /// Drop every user's flags for modules that are no longer part of
    /// `course`. Returns the number of flags removed.
    pub fn prune_course(&self, course: &Course) -> Result<usize> {
        let mut document = self.document();
        let mut removed = 0;
        for user_progress in document.values_mut() {
            if let Some(flags) = user_progress.get_mut(&course.id) {
                let before = flags.len();
                flags.retain(|module_id, _| course.module(module_id).is_some());
                removed += before - flags.len();
            }
        }

        if removed > 0 {
            self.write(&document)?;
            log::info!("Pruned {removed} orphaned progress flags for '{}'", course.id);
        }
        Ok(removed)
    }

    fn document(&self) -> ProgressDocument {
        self.store.load_entries(keys::PROGRESS).unwrap_or_default()
    }

    fn write(&self, document: &ProgressDocument) -> Result<()> {
        self.store.set(keys::PROGRESS, document)
    }
}

fn require_user<'a>(user: Option<&'a str>, action: &str) -> Result<&'a str> {
    user.ok_or_else(|| Error::permission(action, "a signed-in user"))
}
