//! Integration tests for the admin-only course editor.

use mindra::Error;
use mindra::content::{CommitKind, Level, ModuleDraft, QuestionDraft};
use mindra::core::Error as CoreError;

use crate::common::{SECRET, TestHarness, two_module_session};

#[test]
fn test_commit_without_admin_is_denied() {
    let mut h = TestHarness::new();
    let err = h
        .app
        .commit_editor(&two_module_session("Rust Basics"))
        .unwrap_err();

    assert!(matches!(err, Error::Core(CoreError::Permission { .. })));
    assert_eq!(h.app.courses().len(), 2);
}

#[test]
fn test_permission_checked_before_validation() {
    let mut h = TestHarness::new();
    let session = h.app.new_editor();
    let err = h.app.commit_editor(&session).unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::Permission { .. })));
}

#[test]
fn test_wrong_secret_does_not_elevate() {
    let h = TestHarness::new();
    assert!(!h.app.elevate("guess"));
    assert!(!h.app.is_admin());
    assert!(h.app.elevate(SECRET));
    h.app.drop_admin().unwrap();
    assert!(!h.app.snapshot().is_admin);
}

#[test]
fn test_create_course() {
    let mut h = TestHarness::new().admin();
    let outcome = h.app.commit_editor(&two_module_session("Rust Basics")).unwrap();

    assert_eq!(outcome.kind, CommitKind::Created);
    let course = outcome.course;
    assert_eq!(course.id, "rust-basics");
    assert_eq!(course.level, Level::Advanced);
    assert_eq!(course.modules[0].id, "basics-mod-1");
    assert_eq!(course.modules[1].title, "Module 2");
    assert_eq!(course.modules[1].id, "module-2-mod-2");
    assert_eq!(course.modules[0].quiz[0].options, vec!["a", "b", "c"]);

    assert_eq!(h.app.courses().last(), Some(&course));
    assert_eq!(h.event_names().last().unwrap(), "create_course");
}

#[test]
fn test_create_same_title_twice() {
    let mut h = TestHarness::new().admin();
    let first = h.app.commit_editor(&two_module_session("Intro")).unwrap();
    let second = h.app.commit_editor(&two_module_session("Intro")).unwrap();
    assert_eq!(first.course.id, "intro");
    assert_eq!(second.course.id, "intro-1");
}

#[test]
fn test_empty_title_is_validation_error() {
    let mut h = TestHarness::new().admin();
    let mut session = two_module_session("x");
    session.title = "   ".to_string();

    let err = h.app.commit_editor(&session).unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::Validation { .. })));
    assert_eq!(h.app.courses().len(), 2);
}

#[test]
fn test_blank_question_is_dropped() {
    let mut h = TestHarness::new().admin();
    let mut session = two_module_session("Drops");
    session.modules[1] = ModuleDraft::new("Second", "")
        .with_question(QuestionDraft::new("", "x | y | z", 0));

    let course = h.app.commit_editor(&session).unwrap().course;
    assert!(course.modules[1].quiz.is_empty());
}

#[test]
fn test_answer_index_out_of_range_is_rejected() {
    let mut h = TestHarness::new().admin();
    let mut session = two_module_session("Bad Answer");
    session.modules[0].questions[0].answer_index = 3;

    let err = h.app.commit_editor(&session).unwrap_err();
    assert!(matches!(
        err,
        Error::Core(CoreError::Validation { ref field, .. })
            if field.as_deref() == Some("modules[1].quiz[1]")
    ));
}

#[test]
fn test_edit_course_keeps_id_and_prunes_progress() {
    let mut h = TestHarness::new().admin().learner("ada@example.com");
    h.app.toggle_completion("course-html-basics", "html-intro").unwrap();
    h.app.toggle_completion("course-html-basics", "html-forms").unwrap();

    let mut session = h.app.editor_for("course-html-basics").unwrap();
    assert_eq!(session.editing(), Some("course-html-basics"));
    session.title = "HTML Essentials".to_string();
    session.remove_module(1).unwrap();

    let outcome = h.app.commit_editor(&session).unwrap();
    assert_eq!(outcome.kind, CommitKind::Updated);
    assert_eq!(outcome.course.id, "course-html-basics");
    assert_eq!(h.app.courses()[0].title, "HTML Essentials");
    assert_eq!(h.app.courses().len(), 2);

    let progress = h.app.progress().get(Some("ada@example.com"));
    let flags = &progress["course-html-basics"];
    assert!(flags.contains_key("html-intro"));
    assert!(!flags.contains_key("html-forms"));
    assert_eq!(h.event_names().last().unwrap(), "edit_course");
}

#[test]
fn test_edit_round_trip_is_lossless() {
    let mut h = TestHarness::new().admin();
    let before = h.app.courses()[1].clone();
    let session = h.app.editor_for(&before.id).unwrap();
    let after = h.app.commit_editor(&session).unwrap().course;
    assert_eq!(after, before);
}

#[test]
fn test_edit_clamps_open_module_and_drops_orphaned_quiz() {
    let mut h = TestHarness::new().admin();
    h.app.open_course("course-html-basics").unwrap();
    h.app.select_module(1).unwrap();
    h.app.start_quiz().unwrap();

    let mut session = h.app.editor_for("course-html-basics").unwrap();
    session.remove_module(1).unwrap();
    h.app.commit_editor(&session).unwrap();

    assert!(h.app.quiz().is_none());
    assert_eq!(h.app.course_view().unwrap().current_module, 0);
}

#[test]
fn test_editor_for_missing_course() {
    let h = TestHarness::new();
    assert!(matches!(
        h.app.editor_for("nope"),
        Err(Error::Core(CoreError::NotFound { .. }))
    ));
}
