//! Email-backed confirmation notifications.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use registra_core::submission::{Notification, Notifier, NotifyError};
use registra_shared::{EmailService, SubmissionEmail};

/// Sends submission confirmations through [`EmailService`].
///
/// Without an API key nothing is sent and every notification succeeds.
#[derive(Clone)]
pub struct EmailNotifier {
    email: Arc<EmailService>,
}

impl EmailNotifier {
    /// Creates a notifier sending through `email`.
    #[must_use]
    pub const fn new(email: Arc<EmailService>) -> Self {
        Self { email }
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        if !self.email.is_enabled() {
            info!(
                form = notification.kind.slug(),
                id = %notification.record_id,
                "email disabled, confirmation not sent"
            );
            return Ok(());
        }

        let copy = notification.kind.email_copy();
        let content = SubmissionEmail {
            display_name: &notification.display_name,
            headline: copy.headline,
            body: copy.body,
            action_label: copy.action_label,
            action_url: &notification.continuation_url,
        };
        self.email
            .send_submission_received(&notification.to, copy.subject, &content)
            .await
            .map_err(|e| NotifyError::Delivery(e.to_string()))?;

        debug!(form = notification.kind.slug(), id = %notification.record_id, "confirmation sent");
        Ok(())
    }
}
