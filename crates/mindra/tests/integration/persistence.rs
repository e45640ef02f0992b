//! Integration tests for state that must survive a restart.

use mindra::MindraConfig;
use mindra::core::store::keys;

use crate::common::{TestHarness, two_module_session};

#[test]
fn test_created_course_survives_restart() {
    let mut h = TestHarness::on_disk().admin();
    let created = h
        .app
        .commit_editor(&two_module_session("Persistent"))
        .unwrap()
        .course;

    h.reopen();
    assert_eq!(h.app.courses().len(), 3);
    assert_eq!(h.app.courses().last(), Some(&created));
}

#[test]
fn test_session_and_progress_survive_restart() {
    let mut h = TestHarness::on_disk().learner("ada@example.com");
    h.app.toggle_completion("course-js-practical", "js-dom").unwrap();

    h.reopen();
    assert_eq!(h.app.current_user().unwrap().email, "ada@example.com");
    let report = h.app.progress_report().unwrap();
    assert_eq!(report[1].summary.done, 1);
}

#[test]
fn test_admin_flag_survives_restart_until_dropped() {
    let mut h = TestHarness::on_disk().admin();
    h.reopen();
    assert!(h.app.is_admin());

    h.app.drop_admin().unwrap();
    h.reopen();
    assert!(!h.app.is_admin());
}

#[test]
fn test_documents_use_prefixed_keys() {
    let h = TestHarness::on_disk().learner("ada@example.com");
    assert_eq!(h.app.store().prefix(), "mindra_");
    assert!(h.app.store().contains(keys::COURSES));
    assert!(h.app.store().contains(keys::USER));
    assert!(h.app.store().contains(keys::TELEMETRY));
}

#[test]
fn test_telemetry_is_capped() {
    let config = MindraConfig {
        telemetry_capacity: 3,
        ..Default::default()
    };
    let mut h = TestHarness::with_config(config);
    for _ in 0..5 {
        h.app.open_course("course-html-basics").unwrap();
    }

    let events = h.app.telemetry().events();
    assert_eq!(events.len(), 3);
    assert!(events.iter().all(|e| e.name == "open_course"));
}

#[test]
fn test_corrupt_catalog_is_reseeded_on_open() {
    let mut h = TestHarness::on_disk();
    h.app.store().set(keys::COURSES, &"not a catalog").unwrap();

    h.reopen();
    assert_eq!(h.app.courses().len(), 2);
}
