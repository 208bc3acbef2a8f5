//! User-facing notices for operation outcomes.

use superstore_auth::SessionEvent;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

/// One transient message shown to the operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }
}

/// Map a session lifecycle event to the notice it should surface, if any.
/// Routine events (ready, refresh success) stay silent.
pub fn notice_for(event: &SessionEvent) -> Option<Notice> {
    match event {
        SessionEvent::AuthError { reason } => {
            Some(Notice::error(format!("sign-in failed: {reason}")))
        }
        SessionEvent::RefreshError { reason } => {
            Some(Notice::error(format!("session refresh failed: {reason}")))
        }
        SessionEvent::TokenExpired => Some(Notice::info("session expired")),
        SessionEvent::Logout => Some(Notice::info("signed out")),
        SessionEvent::Ready { .. }
        | SessionEvent::AuthSuccess
        | SessionEvent::RefreshSuccess => None,
    }
}
