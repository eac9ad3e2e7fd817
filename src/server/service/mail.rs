//! Outgoing email.
//!
//! `MailService` renders the account emails (invitation, password reset, account
//! deleted) and hands them to a `Mailer`. The SMTP mailer is used when SMTP is
//! configured; otherwise mails are only logged.

use async_trait::async_trait;
use lettre::{
    address::AddressError,
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::sync::Arc;

use crate::server::{
    config::SmtpConfig,
    error::{internal::InternalError, AppError},
};

/// Sender shown on every email.
pub const MAIL_FROM: &str = "\"Dealer Desk\" <no-reply@dealerdesk.com>";

/// Rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Delivery backend for rendered emails.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> Result<(), AppError>;
}

/// Delivers mail over SMTP with STARTTLS.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    pub fn new(config: &SmtpConfig) -> Result<Self, AppError> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| InternalError::Mail(e.to_string()))?
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        Ok(Self { transport })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), AppError> {
        let from: Mailbox = MAIL_FROM
            .parse()
            .map_err(|e: AddressError| InternalError::Mail(e.to_string()))?;
        let to: Mailbox = mail
            .to
            .parse()
            .map_err(|e: AddressError| InternalError::Mail(e.to_string()))?;

        let message = Message::builder()
            .from(from)
            .to(to)
            .subject(mail.subject)
            .header(ContentType::TEXT_HTML)
            .body(mail.html)
            .map_err(|e| InternalError::Mail(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| InternalError::Mail(e.to_string()))?;

        Ok(())
    }
}

/// Fallback used when SMTP is not configured: logs instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), AppError> {
        tracing::info!(
            to = %mail.to,
            subject = %mail.subject,
            "SMTP not configured, email not sent"
        );
        tracing::debug!("{}", mail.html);

        Ok(())
    }
}

/// Escapes text interpolated into an HTML email body.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Renders account emails and sends them through the configured mailer.
#[derive(Clone)]
pub struct MailService {
    mailer: Arc<dyn Mailer>,
    frontend_url: String,
}

impl MailService {
    /// Creates a new MailService.
    ///
    /// # Arguments
    /// - `mailer` - Delivery backend
    /// - `frontend_url` - Base URL used to build activation and reset links
    pub fn new(mailer: Arc<dyn Mailer>, frontend_url: String) -> Self {
        Self {
            mailer,
            frontend_url: frontend_url.trim_end_matches('/').to_string(),
        }
    }

    /// Sends the invitation email with the activation link.
    pub async fn send_verification(
        &self,
        to: &str,
        first_name: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let link = format!("{}/activate?token={}", self.frontend_url, token);
        let first_name = escape_html(first_name);
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; color: #333; line-height: 1.6;">
  <p>Hi {first_name},</p>
  <p>You’ve been added to <strong>Dealer Desk</strong> by an administrator.</p><br/>
  <p>To access your account, please activate it by clicking the link below:</p>
  <p style="margin: 10px 0px;">
    <a href="{link}" style="background-color: #0DCF89; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block; font-weight: bold;">Activate My Account</a>
  </p>
  <p><strong>This link is valid for 24 hours.</strong> After that, it will expire for security reasons.</p>
  <p>Once you click the link, you’ll be taken to a secure page to set your password and complete the activation process.</p><br/>
  <p>If you weren’t expecting this invitation, you can safely ignore this message.</p><br/>
  <p>Best regards,<br/>The <strong>Dealer Desk</strong> Team</p>
</div>"#
        );

        self.mailer
            .send(OutgoingMail {
                to: to.to_string(),
                subject: "You’ve Been Invited – Activate Your Account".to_string(),
                html,
            })
            .await
    }

    /// Sends the password reset email. The link expires with the 10 minute reset token.
    pub async fn send_password_reset(
        &self,
        to: &str,
        first_name: &str,
        token: &str,
    ) -> Result<(), AppError> {
        let link = format!("{}/reset-password?token={}", self.frontend_url, token);
        let first_name = escape_html(first_name);
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; color: #333; padding: 40px; max-width: 600px;">
  <h2 style="color: #0DCF89; margin-bottom: 16px;">Password Reset Request</h2>
  <p style="color: #555; line-height: 1.6;">Hi dear {first_name},</p>
  <p style="color: #555; line-height: 1.6;">We received a request to reset your password. Click the button below to set a new password. If you did not request this, you can safely ignore this email.</p>
  <p style="color: #999; font-size: 12px; margin-top: 30px;"><b>This link is valid for 10 minutes. After that, it will expire for security reasons.</b></p>
  <a href="{link}" style="display: inline-block; background-color: #0DCF89; color: white; padding: 12px 24px; border-radius: 6px; text-decoration: none; font-weight: bold; margin-top: 20px;">Reset Password</a>
</div>"#
        );

        self.mailer
            .send(OutgoingMail {
                to: to.to_string(),
                subject: "Reset Your Dealer Desk Password".to_string(),
                html,
            })
            .await
    }

    pub async fn send_account_deleted(&self, to: &str, first_name: &str) -> Result<(), AppError> {
        let first_name = escape_html(first_name);
        let address = escape_html(to);
        let html = format!(
            r#"<div style="font-family: Arial, sans-serif; color: #333; line-height: 1.6;">
  <p>Hi {first_name},</p>
  <p>This email confirms that your account with <strong>Dealer Desk</strong> ({address}) has been deleted.</p>
  <p>If you have any questions, please contact the super admin.</p><br/>
  <p>Sincerely,<br/>The <strong>Dealer Desk</strong> Team</p>
</div>"#
        );

        self.mailer
            .send(OutgoingMail {
                to: to.to_string(),
                subject: "Your Account with Dealer Desk Has Been Deleted".to_string(),
                html,
            })
            .await
    }
}

/// Mailer that keeps every message in memory for assertions.
#[cfg(test)]
#[derive(Clone, Default)]
pub struct RecordingMailer {
    sent: Arc<std::sync::Mutex<Vec<OutgoingMail>>>,
}

#[cfg(test)]
impl RecordingMailer {
    pub fn sent(&self) -> Vec<OutgoingMail> {
        self.sent.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), AppError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

/// Mailer whose transport always fails.
#[cfg(test)]
pub struct FailingMailer;

#[cfg(test)]
#[async_trait]
impl Mailer for FailingMailer {
    async fn send(&self, _mail: OutgoingMail) -> Result<(), AppError> {
        Err(InternalError::Mail("connection refused".to_string()).into())
    }
}
