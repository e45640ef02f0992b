//! Integration tests for browsing, completion, and quizzes.

use mindra::Error;
use mindra::content::{EditorSession, ModuleDraft, QuestionDraft};
use mindra::core::Error as CoreError;
use mindra::learn::QuizState;

use crate::common::TestHarness;

fn two_question_course(harness: &mut TestHarness) -> String {
    let mut session = EditorSession::new();
    session.title = "Two Questions".to_string();
    session.add_module(
        ModuleDraft::new("Only", "<p>only</p>")
            .with_question(QuestionDraft::new("First?", "right | wrong", 0))
            .with_question(QuestionDraft::new("Second?", "wrong | right", 1)),
    );
    harness.app.commit_editor(&session).unwrap().course.id
}

// ----------------------------------------------------------------------------
// Navigation
// ----------------------------------------------------------------------------

#[test]
fn test_open_course_starts_at_first_module() {
    let mut h = TestHarness::new();
    let view = h.app.open_course("course-html-basics").unwrap();

    assert_eq!(view.title, "HTML & Semantic Markup");
    assert_eq!(view.level, "Beginner");
    assert_eq!(view.current_module, 0);
    assert_eq!(view.selected().unwrap().id, "html-intro");
    assert_eq!(view.progress.total, 2);
    assert!(h.app.snapshot().open_course.is_some());
}

#[test]
fn test_snapshot_lists_catalog() {
    let h = TestHarness::new();
    let snapshot = h.app.snapshot();

    assert!(snapshot.user.is_none());
    assert!(!snapshot.is_admin);
    let ids: Vec<_> = snapshot.courses.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["course-html-basics", "course-js-practical"]);
    assert_eq!(snapshot.courses[0].module_count, 2);
    assert!(snapshot.open_course.is_none());
    assert!(snapshot.quiz.is_none());
}

// ----------------------------------------------------------------------------
// Completion
// ----------------------------------------------------------------------------

#[test]
fn test_toggle_requires_sign_in() {
    let mut h = TestHarness::new();
    let err = h
        .app
        .toggle_completion("course-html-basics", "html-intro")
        .unwrap_err();
    assert!(matches!(err, Error::Core(CoreError::Permission { .. })));
    assert!(!h.event_names().contains(&"toggle_complete".to_string()));
}

#[test]
fn test_toggle_twice_restores_state() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.open_course("course-html-basics").unwrap();

    assert!(h.app.toggle_completion("course-html-basics", "html-intro").unwrap());
    let view = h.app.course_view().unwrap();
    assert!(view.modules[0].completed);
    assert_eq!(view.progress.done, 1);

    assert!(!h.app.toggle_completion("course-html-basics", "html-intro").unwrap());
    assert!(!h.app.course_view().unwrap().modules[0].completed);
}

#[test]
fn test_progress_is_per_user() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.toggle_completion("course-js-practical", "js-dom").unwrap();
    h.app.logout().unwrap();
    h.app.register("bob@example.com", "pw").unwrap();

    let report = h.app.progress_report().unwrap();
    assert!(report.iter().all(|r| r.summary.done == 0));

    h.app.logout().unwrap();
    h.app.login("ada@example.com", "password").unwrap();
    let report = h.app.progress_report().unwrap();
    assert_eq!(report[1].course_id, "course-js-practical");
    assert!(report[1].summary.is_complete());
}

#[test]
fn test_progress_report_requires_sign_in() {
    let h = TestHarness::new();
    assert!(matches!(
        h.app.progress_report(),
        Err(Error::Core(CoreError::Permission { .. }))
    ));
}

// ----------------------------------------------------------------------------
// Quizzes
// ----------------------------------------------------------------------------

#[test]
fn test_quiz_all_correct_records_completion() {
    let mut h = TestHarness::new().admin().learner("ada@example.com");
    let course_id = two_question_course(&mut h);
    h.app.open_course(&course_id).unwrap();

    assert_eq!(h.app.start_quiz().unwrap(), QuizState::Asking { index: 0, score: 0 });
    assert!(h.app.answer_quiz(0).unwrap().correct);
    h.app.next_question().unwrap();
    assert!(h.app.answer_quiz(1).unwrap().correct);
    assert_eq!(
        h.app.next_question().unwrap(),
        QuizState::Finished { score: 2, total: 2 }
    );

    let module_id = h.app.course_view().unwrap().modules[0].id.clone();
    assert!(h.app.progress().is_complete(Some("ada@example.com"), &course_id, &module_id));
}

#[test]
fn test_quiz_all_wrong_records_nothing() {
    let mut h = TestHarness::new().admin().learner("ada@example.com");
    let course_id = two_question_course(&mut h);
    h.app.open_course(&course_id).unwrap();

    h.app.start_quiz().unwrap();
    assert!(!h.app.answer_quiz(1).unwrap().correct);
    h.app.next_question().unwrap();
    assert!(!h.app.answer_quiz(0).unwrap().correct);
    assert_eq!(
        h.app.next_question().unwrap(),
        QuizState::Finished { score: 0, total: 2 }
    );

    assert_eq!(h.app.course_view().unwrap().progress.done, 0);
    assert_eq!(h.event_names().last().unwrap(), "finish_quiz");
}

#[test]
fn test_quiz_all_wrong_keeps_prior_completion() {
    let mut h = TestHarness::new().learner("ada@example.com");
    assert!(
        h.app
            .toggle_completion("course-html-basics", "html-intro")
            .unwrap()
    );
    h.app.open_course("course-html-basics").unwrap();

    h.app.start_quiz().unwrap();
    assert!(!h.app.answer_quiz(1).unwrap().correct);
    assert_eq!(
        h.app.next_question().unwrap(),
        QuizState::Finished { score: 0, total: 1 }
    );

    let view = h.app.course_view().unwrap();
    assert!(view.selected().unwrap().completed);
    assert_eq!(view.progress.done, 1);
}

#[test]
fn test_quiz_second_answer_rejected() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.open_course("course-js-practical").unwrap();
    h.app.start_quiz().unwrap();

    assert!(!h.app.answer_quiz(0).unwrap().correct);
    assert!(matches!(
        h.app.answer_quiz(1),
        Err(Error::Core(CoreError::InvalidState(_)))
    ));
    assert_eq!(
        h.app.next_question().unwrap(),
        QuizState::Finished { score: 0, total: 1 }
    );
}

#[test]
fn test_quiz_signed_out_is_not_recorded() {
    let mut h = TestHarness::new();
    h.app.open_course("course-html-basics").unwrap();
    h.app.start_quiz().unwrap();
    h.app.answer_quiz(0).unwrap();
    assert!(h.app.next_question().unwrap().is_finished());

    h.app.register("ada@example.com", "pw").unwrap();
    assert_eq!(h.app.course_view().unwrap().progress.done, 0);
}

#[test]
fn test_quiz_view_in_snapshot() {
    let mut h = TestHarness::new();
    h.app.open_course("course-html-basics").unwrap();
    h.app.start_quiz().unwrap();
    h.app.answer_quiz(1).unwrap();

    let quiz = h.app.snapshot().quiz.unwrap();
    assert_eq!(quiz.module_id, "html-intro");
    assert_eq!(quiz.question.unwrap().q, "Which tag defines a paragraph?");
    let feedback = quiz.feedback.unwrap();
    assert!(!feedback.correct);
    assert_eq!(feedback.correct_option.as_deref(), Some("<p>"));

    assert!(h.app.close_quiz().is_some());
    assert!(h.app.snapshot().quiz.is_none());
}

#[test]
fn test_quiz_telemetry_sequence() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.open_course("course-html-basics").unwrap();
    h.app.start_quiz().unwrap();
    h.app.answer_quiz(0).unwrap();
    h.app.next_question().unwrap();

    assert_eq!(
        h.event_names(),
        vec![
            "app_init",
            "register",
            "open_course",
            "start_quiz",
            "quiz_answer",
            "finish_quiz"
        ]
    );
    let events = h.app.telemetry().events();
    let answer = &events[4];
    assert_eq!(answer.user.as_deref(), Some("ada@example.com"));
    assert_eq!(answer.payload["moduleId"], "html-intro");
    assert_eq!(answer.payload["qIndex"], 0);
    assert_eq!(answer.payload["correct"], true);
    assert_eq!(events[5].payload["score"], 1);
}
