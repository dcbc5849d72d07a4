//! Main application orchestrator.

use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame, widgets::Widget};
use tokio::sync::mpsc;
use tokio::time::interval;
use tracing::{debug, error, info, warn};

use crate::application::dto::{ResolvedSession, SubmitReviewRequest};
use crate::application::services::{NotificationManager, PreviewRegistry};
use crate::application::use_cases::{ResolveSessionUseCase, SubmitReviewUseCase};
use crate::domain::entities::ReviewForm;
use crate::domain::errors::{AuthError, DEFAULT_FAILURE_MESSAGE, ReviewError};
use crate::domain::ports::{ReviewPort, ReviewReceipt, SessionPort, TokenStoragePort};
use crate::domain::NotificationLevel;
use crate::infrastructure::config::{AppConfig, StateConfig};
use crate::presentation::events::{EventHandler, EventResult};
use super::notification_popup::NotificationPopup;
use super::review_form_screen::{
    PickerOptions, ReviewFormAction, ReviewFormScreen, SessionStatus,
};
use super::review_list_screen::{
    ReviewListAction, ReviewListScreen, SubmittedReview,
};

const TICK_RATE: Duration = Duration::from_millis(250);

#[derive(Debug)]
enum Action {
    SessionResolved {
        mount: u64,
        result: Result<Option<ResolvedSession>, AuthError>,
    },
    SubmitFinished {
        form: ReviewForm,
        image_count: usize,
        result: Result<ReviewReceipt, ReviewError>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    AddReview,
    ReviewList,
}

enum CurrentScreen {
    AddReview(Box<ReviewFormScreen>),
    ReviewList(ReviewListScreen),
}

impl CurrentScreen {
    const fn route(&self) -> Route {
        match self {
            Self::AddReview(_) => Route::AddReview,
            Self::ReviewList(_) => Route::ReviewList,
        }
    }
}

/// Toast for a failed submission.
fn submission_feedback(error: &ReviewError) -> (NotificationLevel, &'static str, String) {
    match error {
        ReviewError::MissingFields { .. } => (
            NotificationLevel::Warn,
            "Missing required fields",
            "Please fill in all required fields.".to_string(),
        ),
        ReviewError::InvalidDate { value } => (
            NotificationLevel::Warn,
            "Invalid date",
            format!("Start date must look like 2024-05-01, got \"{value}\"."),
        ),
        ReviewError::LoginRequired => (
            NotificationLevel::Warn,
            "Login required",
            "You need to log in to submit a review.".to_string(),
        ),
        ReviewError::Rejected { .. } => (NotificationLevel::Error, "Error", error.to_string()),
        ReviewError::ImageEncoding { path, .. } => (
            NotificationLevel::Error,
            "Error",
            format!("Could not read image {}.", path.display()),
        ),
        ReviewError::Network { .. } | ReviewError::Unexpected { .. } => (
            NotificationLevel::Error,
            "Error",
            DEFAULT_FAILURE_MESSAGE.to_string(),
        ),
    }
}

pub struct App {
    state: AppState,
    screen: CurrentScreen,
    history: Vec<Route>,
    submit_use_case: SubmitReviewUseCase,
    resolve_session_use_case: ResolveSessionUseCase,
    cli_token: Option<String>,
    session: Option<ResolvedSession>,
    mount_generation: u64,
    previews: Arc<PreviewRegistry>,
    picker: PickerOptions,
    notifications: NotificationManager,
    submitted: Vec<SubmittedReview>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(
        review_port: Arc<dyn ReviewPort>,
        session_port: Arc<dyn SessionPort>,
        storage_port: Arc<dyn TokenStoragePort>,
        config: &AppConfig,
        state: &StateConfig,
    ) -> Self {
        let submit_use_case = SubmitReviewUseCase::new(review_port);
        let resolve_session_use_case =
            ResolveSessionUseCase::new(session_port, storage_port, config.remember_token);
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let previews = Arc::new(PreviewRegistry::new());

        let start_dir = state
            .last_image_dir
            .clone()
            .filter(|dir| dir.is_dir())
            .unwrap_or_else(|| config.effective_start_dir());
        let picker = PickerOptions {
            start_dir,
            show_hidden: config.ui.show_hidden_files,
        };

        Self {
            state: AppState::Running,
            screen: CurrentScreen::AddReview(Box::new(ReviewFormScreen::new(
                previews.clone(),
                picker.clone(),
            ))),
            history: Vec::new(),
            submit_use_case,
            resolve_session_use_case,
            cli_token: config.token.clone(),
            session: None,
            mount_generation: 0,
            previews,
            picker,
            notifications: NotificationManager::new(config.notification_duration()),
            submitted: Vec::new(),
            action_tx,
            action_rx,
        }
    }

    /// Runs until the user quits. Returns state to persist.
    ///
    /// # Errors
    /// Returns error if drawing to the terminal fails.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<StateConfig> {
        self.mount();
        self.run_event_loop(terminal).await?;

        self.remember_picker_dir();
        info!(submitted = self.submitted.len(), "Application exiting normally");
        Ok(StateConfig {
            last_image_dir: Some(self.picker.start_dir.clone()),
        })
    }

    async fn run_event_loop(&mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        let mut terminal_events = EventStream::new();
        let mut tick_interval = interval(TICK_RATE);

        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                _ = tick_interval.tick() => {
                    if self.notifications.has_notifications() {
                        self.notifications.tick();
                        terminal.draw(|frame| self.render(frame))?;
                    }
                }

                Some(Ok(event)) = terminal_events.next() => {
                    if self.handle_terminal_event(event) == EventResult::Exit {
                        self.state = AppState::Exiting;
                    }
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        Ok(())
    }

    fn handle_terminal_event(&mut self, event: Event) -> EventResult {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            _ => EventResult::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> EventResult {
        if EventHandler::is_quit_event(&key) {
            return EventResult::Exit;
        }
        if EventHandler::is_dismiss_event(&key) && self.notifications.dismiss() {
            return EventResult::Consumed;
        }

        match &mut self.screen {
            CurrentScreen::AddReview(screen) => match screen.handle_key(key) {
                ReviewFormAction::Submit => {
                    self.submit();
                    EventResult::Consumed
                }
                ReviewFormAction::Cancel => self.go_back(),
                ReviewFormAction::None => EventResult::Continue,
            },
            CurrentScreen::ReviewList(screen) => match screen.handle_key(key) {
                ReviewListAction::NewReview => {
                    self.navigate(Route::AddReview);
                    EventResult::Consumed
                }
                ReviewListAction::Back => self.go_back(),
                ReviewListAction::None => EventResult::Continue,
            },
        }
    }

    /// Runs when the add-review screen appears: looks up the session and
    /// pings storage initialization.
    fn mount(&mut self) {
        self.mount_generation += 1;
        self.session = None;
        let mount = self.mount_generation;
        debug!(mount, "Mounting review form");

        let resolve = self.resolve_session_use_case.clone();
        let cli_token = self.cli_token.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = resolve.execute(cli_token).await;
            let _ = tx.send(Action::SessionResolved { mount, result });
        });

        let submit = self.submit_use_case.clone();
        tokio::spawn(async move {
            submit.ensure_storage().await;
        });
    }

    fn submit(&mut self) {
        let CurrentScreen::AddReview(screen) = &mut self.screen else {
            return;
        };
        let Some(draft) = screen.begin_submit() else {
            return;
        };

        let (user_id, token) = self.session.as_ref().map_or((None, None), |resolved| {
            (
                Some(resolved.session.user_id().clone()),
                Some(resolved.token.clone()),
            )
        });

        let form = draft.form.clone();
        let image_count = draft.images.len();
        let request = SubmitReviewRequest::new(draft.form)
            .with_images(draft.images)
            .with_user(user_id)
            .with_token(token);

        let use_case = self.submit_use_case.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = use_case.execute(request).await;
            let _ = tx.send(Action::SubmitFinished {
                form,
                image_count,
                result,
            });
        });
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::SessionResolved { mount, result } => {
                if mount != self.mount_generation {
                    debug!(mount, current = self.mount_generation, "Ignoring stale session result");
                    return;
                }
                self.apply_session(result);
            }
            Action::SubmitFinished {
                form,
                image_count,
                result,
            } => {
                if let CurrentScreen::AddReview(screen) = &mut self.screen {
                    screen.finish_submit();
                }
                match result {
                    Ok(receipt) => {
                        info!(review_id = ?receipt.review_id, "Review submitted");
                        self.notifications
                            .success("Review submitted", "Your review was submitted successfully.");
                        self.submitted.push(SubmittedReview::from_form(
                            &form,
                            image_count,
                            receipt.review_id,
                        ));
                        self.navigate(Route::ReviewList);
                    }
                    Err(e) => {
                        if e.is_validation_error() {
                            debug!(error = %e, "Submission blocked");
                        } else {
                            error!(error = %e, "Submission failed");
                        }
                        let (level, title, message) = submission_feedback(&e);
                        self.notifications.notify(level, title, message);
                    }
                }
            }
        }
    }

    fn apply_session(&mut self, result: Result<Option<ResolvedSession>, AuthError>) {
        let status = match result {
            Ok(Some(resolved)) => {
                info!(
                    user = %resolved.session.user_id(),
                    source = %resolved.source,
                    persisted = resolved.token_persisted,
                    "Session resolved"
                );
                let name = resolved.session.display_name().to_string();
                self.session = Some(resolved);
                SessionStatus::SignedIn(name)
            }
            Ok(None) => {
                info!("No active session");
                SessionStatus::SignedOut
            }
            Err(e) => {
                // Surfaces later as "login required" if the user submits.
                warn!(error = %e, "Session lookup failed");
                SessionStatus::SignedOut
            }
        };
        if let CurrentScreen::AddReview(screen) = &mut self.screen {
            screen.set_session(status);
        }
    }

    fn remember_picker_dir(&mut self) {
        if let CurrentScreen::AddReview(screen) = &self.screen {
            self.picker.start_dir = screen.picker_dir().to_path_buf();
        }
    }

    fn enter(&mut self, route: Route) {
        self.remember_picker_dir();
        debug!(?route, "Entering route");
        self.screen = match route {
            Route::AddReview => CurrentScreen::AddReview(Box::new(ReviewFormScreen::new(
                self.previews.clone(),
                self.picker.clone(),
            ))),
            Route::ReviewList => {
                CurrentScreen::ReviewList(ReviewListScreen::new(self.submitted.clone()))
            }
        };
        if route == Route::AddReview {
            self.mount();
        }
    }

    /// Opens `route`. A route already in the history is rewound to rather
    /// than stacked again, so the history never holds duplicates.
    fn navigate(&mut self, route: Route) {
        if let Some(pos) = self.history.iter().position(|r| *r == route) {
            self.history.truncate(pos);
        }
        self.history.push(self.screen.route());
        self.enter(route);
    }

    /// Returns to the previous route, or exits when there is none.
    fn go_back(&mut self) -> EventResult {
        match self.history.pop() {
            Some(route) => {
                self.enter(route);
                EventResult::Consumed
            }
            None => EventResult::Exit,
        }
    }

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let buf = frame.buffer_mut();

        match &mut self.screen {
            CurrentScreen::AddReview(screen) => screen.render(area, buf),
            CurrentScreen::ReviewList(screen) => screen.render(area, buf),
        }

        if let Some(notification) = self.notifications.current_notification() {
            NotificationPopup::new(notification)
                .remaining(self.notifications.pending().saturating_sub(1))
                .render(area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::dto::TokenSource;
    use crate::domain::entities::{AccessToken, ReviewField, Session, UserId};
    use crate::domain::ports::mocks::{
        MockReviewPort, MockReviewResponse, MockSessionPort, MockTokenStorage,
    };
    use crossterm::event::{KeyCode, KeyModifiers};
    use test_case::test_case;

    fn make_app(review_port: Arc<MockReviewPort>) -> App {
        let config = AppConfig {
            ui: crate::infrastructure::config::UiConfig {
                start_dir: Some(std::env::temp_dir()),
                ..Default::default()
            },
            ..Default::default()
        };
        App::new(
            review_port,
            Arc::new(MockSessionPort::new()),
            Arc::new(MockTokenStorage::new()),
            &config,
            &StateConfig::default(),
        )
    }

    fn resolved_session() -> ResolvedSession {
        ResolvedSession {
            session: Session::new(UserId::new("user-9").unwrap(), None),
            token: AccessToken::new_unchecked("header.payload.signature"),
            source: TokenSource::Keyring,
            token_persisted: false,
        }
    }

    /// Lets the session lookup started by `mount` finish.
    async fn settle_mount(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        assert!(matches!(action, Action::SessionResolved { .. }));
        app.handle_action(action);
    }

    async fn finish_submit(app: &mut App) {
        let action = app.action_rx.recv().await.unwrap();
        assert!(matches!(action, Action::SubmitFinished { .. }));
        app.handle_action(action);
    }

    fn fill_required(app: &mut App) {
        let CurrentScreen::AddReview(screen) = &mut app.screen else {
            panic!("expected form");
        };
        let key = |code| KeyEvent::new(code, KeyModifiers::NONE);
        screen.handle_key(key(KeyCode::Right));
        for (tabs, text) in [(1, "Desk"), (6, "Great"), (1, "Solid and tidy")] {
            for _ in 0..tabs {
                screen.handle_key(key(KeyCode::Tab));
            }
            for c in text.chars() {
                screen.handle_key(key(KeyCode::Char(c)));
            }
        }
    }

    fn ctrl_s() -> KeyEvent {
        KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL)
    }

    #[tokio::test]
    async fn test_app_starts_on_form_without_session() {
        let port = Arc::new(MockReviewPort::accepting());
        let mut app = make_app(port);
        app.mount();
        settle_mount(&mut app).await;

        assert_eq!(app.screen.route(), Route::AddReview);
        assert!(app.session.is_none());
    }

    #[tokio::test]
    async fn test_successful_submit_navigates_to_list() {
        let port = Arc::new(MockReviewPort::accepting());
        let mut app = make_app(port.clone());
        app.mount();
        settle_mount(&mut app).await;
        app.session = Some(resolved_session());
        fill_required(&mut app);

        assert_eq!(app.handle_key(ctrl_s()), EventResult::Consumed);
        finish_submit(&mut app).await;

        assert_eq!(port.submission_count(), 1);
        assert_eq!(port.submissions.lock()[0].user_id, "user-9");
        assert_eq!(app.screen.route(), Route::ReviewList);
        assert_eq!(app.submitted.len(), 1);
        assert_eq!(app.submitted[0].review_id.as_deref(), Some("rev-1"));
        let toast = app.notifications.current_notification().unwrap();
        assert_eq!(toast.level, NotificationLevel::Success);
    }

    #[tokio::test]
    async fn test_missing_fields_make_no_call() {
        let port = Arc::new(MockReviewPort::accepting());
        let mut app = make_app(port.clone());
        app.mount();
        settle_mount(&mut app).await;
        app.session = Some(resolved_session());

        app.handle_key(ctrl_s());
        finish_submit(&mut app).await;

        assert_eq!(port.submission_count(), 0);
        assert_eq!(app.screen.route(), Route::AddReview);
        assert_eq!(
            app.notifications.current_notification().unwrap().title,
            "Missing required fields"
        );
        let CurrentScreen::AddReview(screen) = &app.screen else {
            panic!("expected form");
        };
        assert!(!screen.is_loading());
    }

    #[tokio::test]
    async fn test_no_session_makes_no_call() {
        let port = Arc::new(MockReviewPort::accepting());
        let mut app = make_app(port.clone());
        app.mount();
        settle_mount(&mut app).await;
        fill_required(&mut app);

        app.handle_key(ctrl_s());
        finish_submit(&mut app).await;

        assert_eq!(port.submission_count(), 0);
        assert_eq!(
            app.notifications.current_notification().unwrap().title,
            "Login required"
        );
    }

    #[tokio::test]
    async fn test_rejection_shows_server_message() {
        let port = Arc::new(MockReviewPort::new(MockReviewResponse::Rejected {
            status: 422,
            error: Some("Duplicate review".to_string()),
        }));
        let mut app = make_app(port);
        app.mount();
        settle_mount(&mut app).await;
        app.session = Some(resolved_session());
        fill_required(&mut app);

        app.handle_key(ctrl_s());
        finish_submit(&mut app).await;

        let toast = app.notifications.current_notification().unwrap();
        assert_eq!(toast.level, NotificationLevel::Error);
        assert_eq!(toast.message, "Duplicate review");
        assert_eq!(app.screen.route(), Route::AddReview);
    }

    #[tokio::test]
    async fn test_cancel_without_history_exits() {
        let mut app = make_app(Arc::new(MockReviewPort::accepting()));

        let result = app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));

        assert_eq!(result, EventResult::Exit);
    }

    #[tokio::test]
    async fn test_list_new_review_then_back() {
        let mut app = make_app(Arc::new(MockReviewPort::accepting()));
        app.navigate(Route::ReviewList);
        assert_eq!(app.screen.route(), Route::ReviewList);

        app.handle_key(KeyEvent::new(KeyCode::Char('n'), KeyModifiers::NONE));
        assert_eq!(app.screen.route(), Route::AddReview);

        app.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.screen.route(), Route::ReviewList);
    }

    #[tokio::test]
    async fn test_repeated_cycles_keep_history_bounded() {
        let mut app = make_app(Arc::new(MockReviewPort::accepting()));

        for _ in 0..5 {
            app.navigate(Route::ReviewList);
            app.navigate(Route::AddReview);
        }

        assert_eq!(app.history, vec![Route::ReviewList]);
        let esc = KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.handle_key(esc), EventResult::Consumed);
        assert_eq!(app.screen.route(), Route::ReviewList);
        assert_eq!(app.handle_key(esc), EventResult::Exit);
    }

    #[tokio::test]
    async fn test_session_lookup_failure_is_only_logged() {
        let mut session_port = MockSessionPort::new();
        session_port
            .expect_fetch_session()
            .returning(|_| Err(AuthError::network("connection refused")));
        let config = AppConfig {
            token: Some("header.payload.signature".to_string()),
            ..Default::default()
        };
        let mut app = App::new(
            Arc::new(MockReviewPort::accepting()),
            Arc::new(session_port),
            Arc::new(MockTokenStorage::new()),
            &config,
            &StateConfig::default(),
        );

        app.mount();
        settle_mount(&mut app).await;

        assert!(app.session.is_none());
        assert!(!app.notifications.has_notifications());
    }

    #[tokio::test]
    async fn test_storage_ping_failure_shows_nothing() {
        let port = Arc::new(MockReviewPort::new(MockReviewResponse::NetworkFailure(
            "offline".to_string(),
        )));
        let mut app = make_app(port.clone());
        app.mount();
        settle_mount(&mut app).await;

        for _ in 0..50 {
            if *port.storage_pings.lock() > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*port.storage_pings.lock(), 1);
        assert!(!app.notifications.has_notifications());
    }

    #[tokio::test]
    async fn test_stale_session_result_is_ignored() {
        let mut app = make_app(Arc::new(MockReviewPort::accepting()));
        app.mount_generation = 3;

        app.handle_action(Action::SessionResolved {
            mount: 2,
            result: Ok(Some(resolved_session())),
        });

        assert!(app.session.is_none());
    }

    #[tokio::test]
    async fn test_mount_pings_storage() {
        let port = Arc::new(MockReviewPort::accepting());
        let mut app = make_app(port.clone());
        app.mount();
        settle_mount(&mut app).await;

        for _ in 0..50 {
            if *port.storage_pings.lock() > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(*port.storage_pings.lock(), 1);
    }

    #[tokio::test]
    async fn test_dismiss_drops_toast() {
        let mut app = make_app(Arc::new(MockReviewPort::accepting()));
        app.notifications.notify(NotificationLevel::Info, "Hello", "World");

        let result = app.handle_key(KeyEvent::new(KeyCode::Char('d'), KeyModifiers::CONTROL));

        assert_eq!(result, EventResult::Consumed);
        assert!(!app.notifications.has_notifications());
    }

    #[test_case(ReviewError::missing_fields(vec![ReviewField::Platform]), NotificationLevel::Warn, "Missing required fields" ; "missing fields")]
    #[test_case(ReviewError::LoginRequired, NotificationLevel::Warn, "Login required" ; "login required")]
    #[test_case(ReviewError::rejected(500, None), NotificationLevel::Error, "Error" ; "rejected")]
    #[test_case(ReviewError::network("refused"), NotificationLevel::Error, "Error" ; "network")]
    fn test_submission_feedback(error: ReviewError, level: NotificationLevel, title: &str) {
        let (got_level, got_title, message) = submission_feedback(&error);
        assert_eq!(got_level, level);
        assert_eq!(got_title, title);
        assert!(!message.is_empty());
    }

    #[test]
    fn test_network_failure_uses_default_message() {
        let (_, _, message) = submission_feedback(&ReviewError::network("connection refused"));
        assert_eq!(message, DEFAULT_FAILURE_MESSAGE);
    }
}
