use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tracing::{error, warn};

use crate::api::ActivitiesApi;
use crate::view::{render_catalog, ListArea};

pub const SIGNUP_NOTICE_TTL: Duration = Duration::from_secs(5);
pub const UNREGISTER_NOTICE_TTL: Duration = Duration::from_secs(3);

pub const SIGNUP_FAILED_FALLBACK: &str = "Failed to sign up. Please try again.";
pub const UNREGISTER_FAILED_FALLBACK: &str = "Failed to unregister. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Success => "success",
            NoticeKind::Error => "error",
        }
    }
}

/// Transient message shown under the signup form until its timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub kind: NoticeKind,
}

/// Events delivered back to the board from spawned timers. The `seq`
/// identifies which notice the timer was armed for, so an expiry that
/// outlived its notice hides nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    NoticeExpired { seq: u64 },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub email: String,
    pub activity: String,
}

/// Asks the user to approve an unregister before any request is sent.
pub trait ConfirmUnregister {
    fn confirm(&mut self, activity: &str, email: &str) -> bool;
}

/// View state for the activities page. Owns the list area, the signup
/// form and the current notice; all mutation goes through the methods
/// here.
pub struct ActivityBoard<A> {
    api: A,
    list: ListArea,
    form: SignupForm,
    notice: Option<Notice>,
    notice_seq: u64,
    events: UnboundedSender<BoardEvent>,
}

impl<A: ActivitiesApi> ActivityBoard<A> {
    pub fn new(api: A, events: UnboundedSender<BoardEvent>) -> Self {
        Self {
            api,
            list: ListArea::Loading,
            form: SignupForm::default(),
            notice: None,
            notice_seq: 0,
            events,
        }
    }

    pub fn list(&self) -> &ListArea {
        &self.list
    }

    pub fn form(&self) -> &SignupForm {
        &self.form
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Fetches the catalog and swaps the list area wholesale. On failure
    /// the previous content is discarded and the static failure text
    /// takes its place.
    pub async fn load_catalog(&mut self) {
        match self.api.fetch_catalog().await {
            Ok(catalog) => {
                self.list = ListArea::Loaded(render_catalog(&catalog));
            }
            Err(e) => {
                error!("activities fetch failed: {}", e);
                self.list = ListArea::Failed;
            }
        }
    }

    pub fn set_signup_email(&mut self, email: &str) {
        self.form.email = email.trim().to_string();
    }

    pub fn select_activity(&mut self, name: &str) {
        self.form.activity = name.trim().to_string();
    }

    /// Submits the current form. On success the form is cleared and the
    /// catalog reloaded; on failure the form keeps its values so the
    /// user can retry.
    pub async fn submit_signup(&mut self) {
        let email = self.form.email.clone();
        let activity = self.form.activity.clone();

        match self.api.signup(&activity, &email).await {
            Ok(message) => {
                self.show_notice(message, NoticeKind::Success, SIGNUP_NOTICE_TTL);
                self.form = SignupForm::default();
                self.load_catalog().await;
            }
            Err(e) => {
                warn!("signup for '{}' failed: {}", activity, e);
                let text = e
                    .detail()
                    .map(str::to_owned)
                    .unwrap_or_else(|| SIGNUP_FAILED_FALLBACK.to_string());
                self.show_notice(text, NoticeKind::Error, SIGNUP_NOTICE_TTL);
            }
        }
    }

    /// Removes a participant after the gate approves. A declined
    /// confirmation sends nothing and changes nothing.
    pub async fn submit_unregister(
        &mut self,
        activity: &str,
        email: &str,
        gate: &mut dyn ConfirmUnregister,
    ) {
        if !gate.confirm(activity, email) {
            return;
        }

        match self.api.unregister(activity, email).await {
            Ok(message) => {
                self.show_notice(message, NoticeKind::Success, UNREGISTER_NOTICE_TTL);
                self.load_catalog().await;
            }
            Err(e) => {
                warn!("unregister of '{}' from '{}' failed: {}", email, activity, e);
                let text = e
                    .detail()
                    .map(str::to_owned)
                    .unwrap_or_else(|| UNREGISTER_FAILED_FALLBACK.to_string());
                self.show_notice(text, NoticeKind::Error, UNREGISTER_NOTICE_TTL);
            }
        }
    }

    pub fn handle_event(&mut self, event: BoardEvent) {
        match event {
            // Only the timer armed for the notice still on screen may
            // hide it; expiries from replaced notices are ignored.
            BoardEvent::NoticeExpired { seq } => {
                if seq == self.notice_seq {
                    self.notice = None;
                }
            }
        }
    }

    fn show_notice(&mut self, text: String, kind: NoticeKind, ttl: Duration) {
        self.notice_seq += 1;
        self.notice = Some(Notice { text, kind });

        let events = self.events.clone();
        let seq = self.notice_seq;
        tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let _ = events.send(BoardEvent::NoticeExpired { seq });
        });
    }
}
