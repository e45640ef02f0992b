//! Slug and id utilities.
//!
//! Course and module ids are slugs derived from titles. When a slug is
//! already taken, [`IdAllocator`] appends `-1`, `-2`, … until it finds a
//! free one.

use std::collections::HashSet;

/// Derive a slug from a title.
///
/// Performs the following transformations:
/// 1. Converts to lowercase
/// 2. Collapses every run of non-alphanumeric characters into one hyphen
/// 3. Strips leading/trailing hyphens
///
/// Only ASCII letters and digits survive.
///
/// # Examples
///
/// ```
/// use mindra_core::util::ids::slugify;
///
/// assert_eq!(slugify("HTML & Semantic Markup"), "html-semantic-markup");
/// assert_eq!(slugify("  Intro  "), "intro");
/// assert_eq!(slugify("C++ / Rust!"), "c-rust");
/// assert_eq!(slugify("!!!"), "");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for c in title.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// Slugify `title`, using `fallback` when the title has no usable characters.
pub fn slugify_or(title: &str, fallback: &str) -> String {
    let slug = slugify(title);
    if slug.is_empty() {
        fallback.to_string()
    } else {
        slug
    }
}

/// Hands out ids that are unique within one scope.
///
/// Seed it with the ids already in use, then [`claim`](Self::claim) a base
/// id for every new entity.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    taken: HashSet<String>,
}

impl IdAllocator {
    /// Create an allocator with no ids in use.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an allocator with the given ids already in use.
    pub fn with_taken<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            taken: ids.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns `true` if `id` is already in use.
    pub fn contains(&self, id: &str) -> bool {
        self.taken.contains(id)
    }

    /// Claim `base`, or the first of `base-1`, `base-2`, … that is free.
    ///
    /// # Examples
    ///
    /// ```
    /// use mindra_core::util::ids::IdAllocator;
    ///
    /// let mut ids = IdAllocator::with_taken(["intro"]);
    /// assert_eq!(ids.claim("intro"), "intro-1");
    /// assert_eq!(ids.claim("intro"), "intro-2");
    /// assert_eq!(ids.claim("outro"), "outro");
    /// ```
    pub fn claim(&mut self, base: &str) -> String {
        let mut candidate = base.to_string();
        let mut suffix = 0usize;
        while self.taken.contains(&candidate) {
            suffix += 1;
            candidate = format!("{base}-{suffix}");
        }
        self.taken.insert(candidate.clone());
        candidate
    }
}
