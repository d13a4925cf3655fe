//! Terminal notification adapter
//!
//! Implements the notification port for the CLI: transient messages from
//! the authentication flow are printed to the terminal, and the busy
//! indicator is reduced to a one-line progress message.

use studysphere_core::ports::{INotificationService, Notification};

/// Prints flow notifications to the terminal
pub struct ConsoleNotifier {
    json: bool,
}

impl ConsoleNotifier {
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

#[async_trait::async_trait]
impl INotificationService for ConsoleNotifier {
    async fn notify(&self, notification: &Notification) -> anyhow::Result<()> {
        if self.json {
            eprintln!(
                "{}",
                serde_json::json!({
                    "notification": {
                        "title": notification.title,
                        "body": notification.body,
                        "error": notification.is_error(),
                    }
                })
            );
        } else if notification.is_error() {
            eprintln!("\u{2717} {}: {}", notification.title, notification.body);
        } else {
            eprintln!("  {}: {}", notification.title, notification.body);
        }
        Ok(())
    }

    async fn set_busy(&self, busy: bool) -> anyhow::Result<()> {
        if busy && !self.json {
            eprintln!("  Working...");
        }
        Ok(())
    }
}
