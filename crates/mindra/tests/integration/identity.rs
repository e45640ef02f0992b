//! Integration tests for registration, sign-in, and sign-out.

use mindra::Error;
use mindra::auth::AuthError;

use crate::common::TestHarness;

#[test]
fn test_register_signs_in_and_tracks() {
    let mut h = TestHarness::new();
    let user = h.app.register("  Ada@Example.com ", "pw").unwrap();

    assert_eq!(user.email, "ada@example.com");
    assert_eq!(user.name, "ada");
    assert_eq!(h.app.snapshot().user, Some(user));

    let events = h.app.telemetry().events();
    let register = events.last().unwrap();
    assert_eq!(register.name, "register");
    assert_eq!(register.payload["email"], "ada@example.com");
    assert_eq!(register.user.as_deref(), Some("ada@example.com"));
}

#[test]
fn test_register_existing_account() {
    let mut h = TestHarness::new().learner("ada@example.com");
    let err = h.app.register("ada@example.com", "other").unwrap_err();
    assert!(matches!(err, Error::Auth(AuthError::AccountExists(_))));
    assert!(err.is_user_facing());
}

#[test]
fn test_login_with_bad_credentials() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.logout().unwrap();

    assert!(matches!(
        h.app.login("ada@example.com", "wrong"),
        Err(Error::Auth(AuthError::InvalidCredentials))
    ));
    assert!(matches!(
        h.app.login("", "password"),
        Err(Error::Auth(AuthError::MissingCredentials))
    ));
    assert!(h.app.current_user().is_none());
}

#[test]
fn test_logout_tracks_user_then_clears_session() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.open_course("course-html-basics").unwrap();
    h.app.start_quiz().unwrap();
    h.app.logout().unwrap();

    assert!(h.app.current_user().is_none());
    assert!(h.app.quiz().is_none());

    let events = h.app.telemetry().events();
    let logout = events.last().unwrap();
    assert_eq!(logout.name, "logout");
    assert_eq!(logout.payload["email"], "ada@example.com");
    assert_eq!(logout.user.as_deref(), Some("ada@example.com"));
}

#[test]
fn test_login_after_logout() {
    let mut h = TestHarness::new().learner("ada@example.com");
    h.app.logout().unwrap();
    let user = h.app.login("ADA@example.com", "password").unwrap();
    assert_eq!(user.email, "ada@example.com");
    assert_eq!(h.event_names().last().unwrap(), "login");
}
