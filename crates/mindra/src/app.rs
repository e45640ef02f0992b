//! Application state and user-level operations.
//!
//! [`App`] owns every component plus the navigation state (open course,
//! selected module, active quiz). Each operation runs to completion and
//! leaves the store consistent; renderers read [`AppSnapshot`]s.

use mindra_auth::{AdminGate, AuthGate, SessionUser};
use mindra_content::{CommitKind, CommitOutcome, Course, CourseRepository, EditorSession, Module};
use mindra_core::store::Store;
use mindra_core::{MindraConfig, TelemetrySink};
use mindra_learn::{AnswerFeedback, ProgressTracker, QuizOutcome, QuizSession, QuizState};
use serde_json::{Value, json};

use crate::error::Result;
use crate::view::{AppSnapshot, CourseCard, CourseReport, CourseView, ModuleView, QuizView};

type CoreError = mindra_core::Error;

/// The open course and selected module.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Navigation {
    course_id: String,
    module_index: usize,
}

/// The Mindra application.
#[derive(Debug)]
pub struct App {
    config: MindraConfig,
    store: Store,
    courses: CourseRepository,
    progress: ProgressTracker,
    auth: AuthGate,
    admin: AdminGate,
    telemetry: TelemetrySink,
    navigation: Option<Navigation>,
    quiz: Option<QuizSession>,
}

impl App {
    /// Open the app with the store described by `config`.
    pub fn open(config: MindraConfig) -> Result<Self> {
        let store = config.open_store()?;
        Self::with_store(config, store)
    }

    /// Open the app over an already-built store.
    pub fn with_store(config: MindraConfig, store: Store) -> Result<Self> {
        config.validate()?;
        let courses = CourseRepository::load_with(store.clone(), config.seed_default_courses)?;
        let app = Self {
            progress: ProgressTracker::new(store.clone()),
            auth: AuthGate::new(store.clone()),
            admin: AdminGate::new(store.clone(), config.admin_secret.clone()),
            telemetry: TelemetrySink::new(store.clone(), config.telemetry_capacity),
            courses,
            store,
            config,
            navigation: None,
            quiz: None,
        };

        log::info!(
            "Mindra ready: {} courses, user {:?}",
            app.courses.len(),
            app.user_email()
        );
        app.track("app_init", json!({}));
        Ok(app)
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    /// Active configuration.
    pub fn config(&self) -> &MindraConfig {
        &self.config
    }

    /// The underlying document store.
    pub fn store(&self) -> &Store {
        &self.store
    }

    /// The telemetry sink.
    pub fn telemetry(&self) -> &TelemetrySink {
        &self.telemetry
    }

    /// The progress tracker.
    pub fn progress(&self) -> &ProgressTracker {
        &self.progress
    }

    /// The catalog in creation order.
    pub fn courses(&self) -> &[Course] {
        self.courses.all()
    }

    /// The signed-in user.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.auth.current_user()
    }

    /// Whether the admin capability is held.
    pub fn is_admin(&self) -> bool {
        self.admin.is_admin()
    }

    /// The active quiz session.
    pub fn quiz(&self) -> Option<&QuizSession> {
        self.quiz.as_ref()
    }

    /// Immutable view of everything a renderer needs.
    pub fn snapshot(&self) -> AppSnapshot {
        AppSnapshot {
            user: self.current_user(),
            is_admin: self.is_admin(),
            courses: self.courses.all().iter().map(CourseCard::from).collect(),
            open_course: self.course_view(),
            quiz: self.quiz.as_ref().map(QuizView::from),
        }
    }

    // ------------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------------

    /// Open course `id` at its first module. Discards any active quiz.
    pub fn open_course(&mut self, id: &str) -> Result<CourseView> {
        let course_id = self.find_course(id)?.id.clone();
        self.navigation = Some(Navigation {
            course_id,
            module_index: 0,
        });
        self.quiz = None;

        self.track("open_course", json!({ "courseId": id }));
        self.current_view()
    }

    /// Select module `index` of the open course. Discards any active quiz.
    pub fn select_module(&mut self, index: usize) -> Result<CourseView> {
        let navigation = self
            .navigation
            .as_mut()
            .ok_or_else(|| CoreError::invalid_state("no course is open"))?;
        let module_count = self
            .courses
            .find_by_id(&navigation.course_id)
            .map_or(0, |c| c.modules.len());
        if index >= module_count {
            return Err(CoreError::validation_field(
                "module",
                format!("module {index} out of range; course has {module_count} modules"),
            )
            .into());
        }

        navigation.module_index = index;
        self.quiz = None;
        self.current_view()
    }

    /// Close the open course and any quiz.
    pub fn close_course(&mut self) {
        self.navigation = None;
        self.quiz = None;
    }

    /// The open course, if any.
    pub fn course_view(&self) -> Option<CourseView> {
        let navigation = self.navigation.as_ref()?;
        let course = self.courses.find_by_id(&navigation.course_id)?;
        Some(self.build_view(course, navigation.module_index))
    }

    // ------------------------------------------------------------------------
    // Progress
    // ------------------------------------------------------------------------

    /// Flip the signed-in user's completion flag for a module.
    pub fn toggle_completion(&mut self, course_id: &str, module_id: &str) -> Result<bool> {
        let course = self.find_course(course_id)?;
        if course.module(module_id).is_none() {
            return Err(CoreError::not_found("module", module_id).into());
        }

        let user = self.user_email();
        let value = self.progress.toggle(user.as_deref(), course_id, module_id)?;
        self.track(
            "toggle_complete",
            json!({ "courseId": course_id, "moduleId": module_id, "value": value }),
        );
        Ok(value)
    }

    /// Completion of every course for the signed-in user.
    pub fn progress_report(&self) -> Result<Vec<CourseReport>> {
        let user = self
            .user_email()
            .ok_or_else(|| CoreError::permission("view progress", "a signed-in user"))?;
        Ok(self
            .courses
            .all()
            .iter()
            .map(|course| CourseReport {
                course_id: course.id.clone(),
                title: course.title.clone(),
                summary: self.progress.summary(Some(&user), course),
            })
            .collect())
    }

    // ------------------------------------------------------------------------
    // Quiz
    // ------------------------------------------------------------------------

    /// Start a quiz on the selected module, replacing any active one.
    pub fn start_quiz(&mut self) -> Result<QuizState> {
        let (course, module) = self.selected_module()?;
        let session = QuizSession::new(course.id.clone(), module);
        self.track("start_quiz", json!({ "moduleId": module.id }));

        let state = session.state();
        self.quiz = Some(session);
        Ok(state)
    }

    /// Answer the current question of the active quiz.
    pub fn answer_quiz(&mut self, choice: usize) -> Result<AnswerFeedback> {
        let session = self.active_quiz()?;
        let feedback = session.answer(choice)?;
        let module_id = session.module_id().to_string();

        self.track(
            "quiz_answer",
            json!({
                "moduleId": module_id,
                "qIndex": feedback.question_index,
                "correct": feedback.correct,
            }),
        );
        Ok(feedback)
    }

    /// Advance the active quiz. Finishing records completion for a signed-in
    /// user who scored at least one point.
    pub fn next_question(&mut self) -> Result<QuizState> {
        let session = self.active_quiz()?;
        let state = session.next()?;
        if let Some(outcome) = session.outcome() {
            let course_id = session.course_id().to_string();
            let module_id = session.module_id().to_string();
            self.finish_quiz(&course_id, &module_id, outcome)?;
        }
        Ok(state)
    }

    /// Discard the active quiz.
    pub fn close_quiz(&mut self) -> Option<QuizSession> {
        self.quiz.take()
    }

    /// The finish event is tracked even when recording completion fails.
    fn finish_quiz(&self, course_id: &str, module_id: &str, outcome: QuizOutcome) -> Result<()> {
        let recorded = if !outcome.earns_completion() {
            Ok(())
        } else if let Some(email) = self.user_email() {
            self.progress.mark_complete(Some(&email), course_id, module_id, true)
        } else {
            log::info!("Quiz on {module_id} passed while signed out; not recorded");
            Ok(())
        };
        if let Err(e) = &recorded {
            log::warn!("Could not record completion of {course_id}/{module_id}: {e}");
        }
        self.track(
            "finish_quiz",
            json!({ "moduleId": module_id, "score": outcome.score }),
        );
        recorded.map_err(Into::into)
    }

    // ------------------------------------------------------------------------
    // Authoring
    // ------------------------------------------------------------------------

    /// A blank editor session for a new course.
    pub fn new_editor(&self) -> EditorSession {
        EditorSession::new()
    }

    /// An editor session pre-filled from course `course_id`.
    pub fn editor_for(&self, course_id: &str) -> Result<EditorSession> {
        Ok(EditorSession::for_course(self.find_course(course_id)?))
    }

    /// Commit an editor session. Requires the admin capability.
    ///
    /// Updating a course drops every user's completion flags for modules it
    /// no longer has, and re-clamps the navigation if that course is open.
    pub fn commit_editor(&mut self, session: &EditorSession) -> Result<CommitOutcome> {
        let outcome = session.commit(&mut self.courses, &self.admin)?;
        let course = &outcome.course;

        match outcome.kind {
            CommitKind::Created => {
                self.track("create_course", json!({ "courseId": course.id }));
            }
            CommitKind::Updated => {
                if let Err(e) = self.progress.prune_course(course) {
                    log::warn!("Could not prune progress for '{}': {e}", course.id);
                }
                self.refresh_navigation(course);
                self.track("edit_course", json!({ "courseId": course.id }));
            }
        }
        Ok(outcome)
    }

    fn refresh_navigation(&mut self, course: &Course) {
        if let Some(navigation) = self.navigation.as_mut().filter(|n| n.course_id == course.id) {
            navigation.module_index = navigation
                .module_index
                .min(course.modules.len().saturating_sub(1));
        }
        let quiz_orphaned = self
            .quiz
            .as_ref()
            .is_some_and(|q| q.course_id() == course.id && course.module(q.module_id()).is_none());
        if quiz_orphaned {
            self.quiz = None;
        }
    }

    // ------------------------------------------------------------------------
    // Identity
    // ------------------------------------------------------------------------

    /// Create an account and sign it in.
    pub fn register(&mut self, email: &str, password: &str) -> Result<SessionUser> {
        let user = self.auth.register(email, password)?;
        self.track("register", json!({ "email": user.email }));
        Ok(user)
    }

    /// Sign in.
    pub fn login(&mut self, email: &str, password: &str) -> Result<SessionUser> {
        let user = self.auth.login(email, password)?;
        self.track("login", json!({ "email": user.email }));
        Ok(user)
    }

    /// Sign out and discard any active quiz.
    pub fn logout(&mut self) -> Result<()> {
        self.track("logout", json!({ "email": self.user_email() }));
        self.auth.logout()?;
        self.quiz = None;
        Ok(())
    }

    /// Request the admin capability with the shared secret.
    pub fn elevate(&self, password: &str) -> bool {
        self.admin.try_elevate(password)
    }

    /// Give up the admin capability.
    pub fn drop_admin(&self) -> Result<()> {
        Ok(self.admin.revoke()?)
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    fn user_email(&self) -> Option<String> {
        self.auth.current_user().map(|u| u.email)
    }

    fn track(&self, name: &str, payload: Value) {
        let user = self.user_email();
        self.telemetry.track(name, payload, user.as_deref());
    }

    fn find_course(&self, id: &str) -> Result<&Course> {
        Ok(self
            .courses
            .find_by_id(id)
            .ok_or_else(|| CoreError::not_found("course", id))?)
    }

    fn selected_module(&self) -> Result<(&Course, &Module)> {
        let navigation = self
            .navigation
            .as_ref()
            .ok_or_else(|| CoreError::invalid_state("no course is open"))?;
        let course = self.find_course(&navigation.course_id)?;
        let module = course
            .modules
            .get(navigation.module_index)
            .ok_or_else(|| {
                CoreError::invalid_state(format!("course '{}' has no modules", course.id))
            })?;
        Ok((course, module))
    }

    fn active_quiz(&mut self) -> Result<&mut QuizSession> {
        Ok(self
            .quiz
            .as_mut()
            .ok_or_else(|| CoreError::invalid_state("no quiz is active"))?)
    }

    fn current_view(&self) -> Result<CourseView> {
        Ok(self
            .course_view()
            .ok_or_else(|| CoreError::invalid_state("no course is open"))?)
    }

    fn build_view(&self, course: &Course, module_index: usize) -> CourseView {
        let user = self.user_email();
        let progress = self.progress.get(user.as_deref());
        let flags = progress.get(&course.id);

        CourseView {
            id: course.id.clone(),
            title: course.title.clone(),
            summary: course.summary.clone(),
            level: course.level.to_string(),
            modules: course
                .modules
                .iter()
                .map(|module| ModuleView {
                    id: module.id.clone(),
                    title: module.title.clone(),
                    content: module.content.clone(),
                    media: module.media.clone(),
                    quiz_len: module.quiz.len(),
                    completed: flags
                        .and_then(|f| f.get(&module.id))
                        .copied()
                        .unwrap_or(false),
                })
                .collect(),
            current_module: module_index,
            progress: self.progress.summary(user.as_deref(), course),
        }
    }
}
