//! Common test utilities and harness for Mindra integration tests.

#![allow(dead_code)]

use mindra::content::{EditorSession, ModuleDraft, QuestionDraft};
use mindra::{App, MindraConfig};
use tempfile::TempDir;

/// Admin secret used by every harness.
pub const SECRET: &str = "test-secret";

/// Test harness owning an [`App`] and, for on-disk runs, its data directory.
pub struct TestHarness {
    /// The app under test.
    pub app: App,
    config: MindraConfig,
    dir: Option<TempDir>,
}

impl TestHarness {
    /// Creates a harness over an in-memory store with the default courses.
    pub fn new() -> Self {
        Self::with_config(config(None))
    }

    /// Creates a harness whose documents live in a temporary directory.
    pub fn on_disk() -> Self {
        let dir = tempfile::tempdir().expect("temp dir");
        let config = config(Some(&dir));
        let app = App::open(config.clone()).expect("app opens");
        Self {
            app,
            config,
            dir: Some(dir),
        }
    }

    /// Creates a harness from an explicit configuration.
    pub fn with_config(config: MindraConfig) -> Self {
        let app = App::open(config.clone()).expect("app opens");
        Self {
            app,
            config,
            dir: None,
        }
    }

    /// Reopens the app over the same data directory, as after a restart.
    pub fn reopen(&mut self) {
        assert!(self.dir.is_some(), "reopen needs an on-disk harness");
        self.app = App::open(self.config.clone()).expect("app reopens");
    }

    /// Signs up and signs in `email`.
    pub fn learner(mut self, email: &str) -> Self {
        self.app.register(email, "password").expect("register");
        self
    }

    /// Grants the admin capability.
    pub fn admin(self) -> Self {
        assert!(self.app.elevate(SECRET));
        self
    }

    /// Names of the recorded telemetry events, oldest first.
    pub fn event_names(&self) -> Vec<String> {
        self.app
            .telemetry()
            .events()
            .into_iter()
            .map(|e| e.name)
            .collect()
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

fn config(dir: Option<&TempDir>) -> MindraConfig {
    MindraConfig {
        data_dir: dir.map(|d| d.path().to_path_buf()),
        admin_secret: SECRET.to_string(),
        ..Default::default()
    }
}

/// An editor session for a two-module course titled `title`.
pub fn two_module_session(title: &str) -> EditorSession {
    let mut session = EditorSession::new();
    session.title = title.to_string();
    session.summary = "Written in a test".to_string();
    session.level = "advanced".to_string();
    session
        .add_module(
            ModuleDraft::new("Basics", "<p>basics</p>")
                .with_question(QuestionDraft::new("Pick b", "a | b | c", 1)),
        )
        .add_module(ModuleDraft::new("", "<p>untitled</p>"));
    session
}
