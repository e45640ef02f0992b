//! The course catalog.
//!
//! [`CourseRepository`] keeps the catalog in memory, in creation order, and
//! flushes the whole sequence to the store after every change. A change whose
//! flush fails is rolled back so memory and store stay in step.

use mindra_core::store::{Store, keys};
use mindra_core::util::ids::{IdAllocator, slugify_or};
use mindra_core::{Error, Result};

use crate::model::{Course, CourseDraft};
use crate::seed::default_courses;

/// Id base used when a title has no usable characters.
const FALLBACK_COURSE_ID: &str = "course";

/// Ordered, persisted list of courses.
#[derive(Debug, Clone)]
pub struct CourseRepository {
    store: Store,
    courses: Vec<Course>,
    seed_defaults: bool,
}

impl CourseRepository {
    /// Load the catalog, seeding the built-in courses if none is stored.
    pub fn load(store: Store) -> Result<Self> {
        Self::load_with(store, true)
    }

    /// Load the catalog. With `seed_defaults` false, a missing catalog is
    /// simply empty and nothing is written.
    pub fn load_with(store: Store, seed_defaults: bool) -> Result<Self> {
        let mut repo = Self {
            store,
            courses: Vec::new(),
            seed_defaults,
        };
        repo.load_all()?;
        Ok(repo)
    }

    /// Re-read the catalog from the store.
    ///
    /// Courses of the wrong shape are dropped individually. A missing catalog,
    /// or one that is not an array, is replaced by the seed set (and the seed
    /// is persisted) when seeding is enabled.
    pub fn load_all(&mut self) -> Result<&[Course]> {
        match self.store.load_items::<Course>(keys::COURSES) {
            Some(courses) => {
                log::debug!("Loaded {} courses", courses.len());
                self.courses = courses;
            }
            None if self.seed_defaults => {
                let courses = default_courses();
                self.store.set(keys::COURSES, &courses)?;
                log::info!("Seeded catalog with {} default courses", courses.len());
                self.courses = courses;
            }
            None => {
                log::debug!("No stored catalog; starting empty");
                self.courses = Vec::new();
            }
        }
        Ok(&self.courses)
    }

    /// All courses in creation order.
    pub fn all(&self) -> &[Course] {
        &self.courses
    }

    /// Number of courses.
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Returns `true` if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Look up a course by id.
    pub fn find_by_id(&self, id: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    /// Add a course built from `draft`, with an id derived from its title.
    ///
    /// The id is the title's slug; if that is taken, `-1`, `-2`, … is
    /// appended until it is unique.
    pub fn create(&mut self, draft: CourseDraft) -> Result<Course> {
        let mut ids = IdAllocator::with_taken(self.courses.iter().map(|c| c.id.clone()));
        let id = ids.claim(&slugify_or(&draft.title, FALLBACK_COURSE_ID));
        let course = draft.into_course(id);

        self.courses.push(course.clone());
        if let Err(e) = self.flush() {
            self.courses.pop();
            return Err(e);
        }

        log::info!("Created course '{}'", course.id);
        Ok(course)
    }

    /// Replace the title, summary, level, and modules of course `id`.
    ///
    /// Returns [`Error::NotFound`] without touching anything if `id` is unknown.
    pub fn update(&mut self, id: &str, draft: CourseDraft) -> Result<Course> {
        let index = self
            .courses
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| Error::not_found("course", id))?;

        let updated = draft.into_course(id.to_string());
        let previous = std::mem::replace(&mut self.courses[index], updated.clone());
        if let Err(e) = self.flush() {
            self.courses[index] = previous;
            return Err(e);
        }

        log::info!("Updated course '{id}'");
        Ok(updated)
    }

    fn flush(&self) -> Result<()> {
        self.store.set(keys::COURSES, &self.courses)
    }
}
