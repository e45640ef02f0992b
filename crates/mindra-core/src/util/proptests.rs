//! Property-based tests for slug and id utilities.
