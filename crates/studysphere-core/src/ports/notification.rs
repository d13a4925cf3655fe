//! Notification port (driven/secondary port)
//!
//! This module defines the interface for surfacing transient feedback to
//! the user: provider error messages after a failed submission, the
//! registration-success message, and the busy indicator shown while a
//! request is in flight. Implementations may print to a terminal, raise a
//! toast, or update form widgets.
//!
//! ## Design Notes
//!
//! - Uses `anyhow::Result` because delivery is adapter-specific.
//! - Notifications are fire-and-forget and auto-dismissing; the caller
//!   does not wait for user interaction, and a delivery failure never
//!   fails the authentication flow itself.

use serde::{Deserialize, Serialize};

/// Priority level for a notification
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationPriority {
    /// Informational, shown unobtrusively
    #[default]
    Normal,
    /// Error feedback, shown prominently
    High,
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            NotificationPriority::Normal => "normal",
            NotificationPriority::High => "high",
        };
        write!(f, "{}", s)
    }
}

/// A transient notification to display to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Title of the notification (short, descriptive)
    pub title: String,
    /// Body text. For provider failures this is the provider's raw
    /// message, passed through verbatim.
    pub body: String,
    /// Priority level affecting how the notification is displayed
    pub priority: NotificationPriority,
    /// Category for grouping/filtering (e.g., "auth", "error")
    pub category: String,
}

impl Notification {
    /// Creates a new notification with the given title and body
    ///
    /// Uses `Normal` priority and an empty category by default.
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            priority: NotificationPriority::Normal,
            category: String::new(),
        }
    }

    /// Sets the priority level
    pub fn with_priority(mut self, priority: NotificationPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the category
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Creates an auth-flow notification
    pub fn auth(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body).with_category("auth")
    }

    /// Creates an error notification with High priority
    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(title, body)
            .with_priority(NotificationPriority::High)
            .with_category("error")
    }

    /// Returns true if this is an error notification
    pub fn is_error(&self) -> bool {
        self.priority == NotificationPriority::High
    }
}

/// Port trait for transient user feedback
///
/// ## Implementation Notes
///
/// - `notify` delivers a one-shot, auto-dismissing notification.
/// - `set_busy(true)` corresponds to disabling the submit controls and
///   showing a busy indicator; `set_busy(false)` re-enables them. The flow
///   guarantees the two calls bracket every dispatched submission.
/// - Implementations should handle delivery failures gracefully; the flow
///   logs and continues.
#[async_trait::async_trait]
pub trait INotificationService: Send + Sync {
    /// Delivers a transient notification to the user
    ///
    /// # Arguments
    /// * `notification` - The notification content and metadata
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()>;

    /// Shows or hides the busy indicator
    ///
    /// # Arguments
    /// * `busy` - true while a submission is in flight
    async fn set_busy(&self, busy: bool) -> anyhow::Result<()>;
}
