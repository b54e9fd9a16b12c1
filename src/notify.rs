//! Toast notifications
//!
//! Owned by [`crate::AppState`]. Time is passed in explicitly; the UI calls
//! `expire` from its frame or timer callback.

use serde::{Deserialize, Serialize};

/// Default on-screen time for shorthand toasts
pub const DEFAULT_DURATION_MS: f64 = 3000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    #[default]
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    pub message: String,
    pub kind: NotificationKind,
    /// Unix ms after which the toast is dropped; `None` stays until removed
    pub expires_at: Option<f64>,
}

/// Visible notifications, oldest first
#[derive(Debug, Clone, Default)]
pub struct Notifications {
    items: Vec<Notification>,
    last_id: u64,
}

impl Notifications {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a toast; `duration_ms <= 0` keeps it until removed. Returns its id.
    pub fn notify(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        duration_ms: f64,
        now_ms: f64,
    ) -> String {
        self.last_id += 1;
        let id = self.last_id.to_string();
        let expires_at = (duration_ms > 0.0).then_some(now_ms + duration_ms);
        self.items.push(Notification {
            id: id.clone(),
            message: message.into(),
            kind,
            expires_at,
        });
        id
    }

    pub fn success(&mut self, message: impl Into<String>, now_ms: f64) -> String {
        self.notify(message, NotificationKind::Success, DEFAULT_DURATION_MS, now_ms)
    }

    pub fn error(&mut self, message: impl Into<String>, now_ms: f64) -> String {
        self.notify(message, NotificationKind::Error, DEFAULT_DURATION_MS, now_ms)
    }

    pub fn warning(&mut self, message: impl Into<String>, now_ms: f64) -> String {
        self.notify(message, NotificationKind::Warning, DEFAULT_DURATION_MS, now_ms)
    }

    pub fn info(&mut self, message: impl Into<String>, now_ms: f64) -> String {
        self.notify(message, NotificationKind::Info, DEFAULT_DURATION_MS, now_ms)
    }

    /// Remove by id; false if it was already gone
    pub fn remove(&mut self, id: &str) -> bool {
        match self.items.iter().position(|n| n.id == id) {
            Some(index) => {
                self.items.remove(index);
                true
            }
            None => false,
        }
    }

    /// Drop toasts whose time is up; returns how many went
    pub fn expire(&mut self, now_ms: f64) -> usize {
        let before = self.items.len();
        self.items
            .retain(|n| n.expires_at.is_none_or(|deadline| now_ms < deadline));
        before - self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
