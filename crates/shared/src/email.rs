//! Email service for sending transactional emails.
//!
//! Uses `lettre` for SMTP transport. The default relay is Resend's SMTP
//! endpoint, which takes the literal username `resend` and the API key as
//! password.

use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor, message::header::ContentType,
    transport::smtp::authentication::Credentials,
};
use thiserror::Error;

use crate::config::EmailConfig;

/// Email service errors.
#[derive(Debug, Error)]
pub enum EmailError {
    /// Sending is disabled because no API key is configured.
    #[error("Email sending is disabled: no API key configured")]
    Disabled,
    /// Failed to build email message.
    #[error("Failed to build email: {0}")]
    BuildError(String),
    /// Failed to send email.
    #[error("Failed to send email: {0}")]
    SendError(String),
    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

/// Content of the "we received your submission" email.
#[derive(Debug, Clone)]
pub struct SubmissionEmail<'a> {
    /// Name used in the greeting.
    pub display_name: &'a str,
    /// Headline shown at the top of the message.
    pub headline: &'a str,
    /// One paragraph explaining what happens next.
    pub body: &'a str,
    /// Call-to-action label.
    pub action_label: &'a str,
    /// Where the call-to-action points.
    pub action_url: &'a str,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    /// Creates a new email service.
    #[must_use]
    pub const fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Whether this service will actually send anything.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Public site base URL used for continuation links.
    #[must_use]
    pub fn frontend_url(&self) -> &str {
        &self.config.frontend_url
    }

    /// Creates an SMTP transport.
    fn create_transport(&self) -> Result<AsyncSmtpTransport<Tokio1Executor>, EmailError> {
        let api_key = self
            .config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(EmailError::Disabled)?;
        let creds = Credentials::new(self.config.smtp_username.clone(), api_key);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendError(e.to_string()))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();
        Ok(transport)
    }

    /// Sends the confirmation email for a stored submission.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_submission_received(
        &self,
        to_email: &str,
        subject: &str,
        content: &SubmissionEmail<'_>,
    ) -> Result<(), EmailError> {
        let html = render_submission_email(content);
        self.send_html(to_email, subject, &html).await
    }

    /// Sends an HTML email.
    ///
    /// # Errors
    ///
    /// Returns an error if the email cannot be sent.
    pub async fn send_html(
        &self,
        to_email: &str,
        subject: &str,
        html: &str,
    ) -> Result<(), EmailError> {
        let email = self.build_message(to_email, subject, html)?;

        let transport = self.create_transport()?;
        transport
            .send(email)
            .await
            .map_err(|e| EmailError::SendError(e.to_string()))?;

        Ok(())
    }

    fn build_message(
        &self,
        to_email: &str,
        subject: &str,
        html: &str,
    ) -> Result<Message, EmailError> {
        let from = format!("{} <{}>", self.config.from_name, self.config.from_email);

        Message::builder()
            .from(
                from.parse()
                    .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?,
            )
            .to(to_email
                .parse()
                .map_err(|e| EmailError::InvalidAddress(format!("{e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| EmailError::BuildError(e.to_string()))
    }
}

/// Renders the submission confirmation as a self-contained HTML document.
///
/// Every field is escaped; the display name in particular comes straight
/// from the form.
#[must_use]
pub fn render_submission_email(content: &SubmissionEmail<'_>) -> String {
    let name = htmlescape::encode_minimal(content.display_name);
    let headline = htmlescape::encode_minimal(content.headline);
    let body = htmlescape::encode_minimal(content.body);
    let label = htmlescape::encode_minimal(content.action_label);
    let url = htmlescape::encode_attribute(content.action_url);

    format!(
        r#"<!DOCTYPE html>
<html lang="es">
  <head>
    <meta charset="utf-8">
    <title>{headline}</title>
  </head>
  <body style="margin:0;padding:0;background:#f4f5f7;font-family:Helvetica,Arial,sans-serif;color:#1f2933;">
    <table role="presentation" width="100%" cellpadding="0" cellspacing="0">
      <tr>
        <td align="center" style="padding:32px 16px;">
          <table role="presentation" width="560" cellpadding="0" cellspacing="0" style="background:#ffffff;border-radius:8px;padding:32px;">
            <tr><td><h1 style="font-size:22px;margin:0 0 16px;">{headline}</h1></td></tr>
            <tr><td><p style="font-size:15px;line-height:1.5;">Hola {name},</p></td></tr>
            <tr><td><p style="font-size:15px;line-height:1.5;">{body}</p></td></tr>
            <tr>
              <td style="padding:24px 0;">
                <a href="{url}" style="background:#0b5cff;color:#ffffff;padding:12px 20px;border-radius:6px;text-decoration:none;">{label}</a>
              </td>
            </tr>
            <tr><td><p style="font-size:12px;color:#7b8794;">Si no enviaste este formulario, puedes ignorar este mensaje.</p></td></tr>
          </table>
        </td>
      </tr>
    </table>
  </body>
</html>
"#
    )
}

#[cfg(test)]
#[path = "email_tests.rs"]
mod tests;
