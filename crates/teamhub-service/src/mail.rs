//! Verification mail delivery.

use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::info;

use teamhub_core::config::MailConfig;
use teamhub_core::error::{AppError, ErrorKind};
use teamhub_core::result::AppResult;

/// Sends verification codes over SMTP. When mail is disabled in config
/// the code is logged instead, which is what development and tests use.
pub struct Mailer {
    config: MailConfig,
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
}

impl std::fmt::Debug for Mailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mailer")
            .field("enabled", &self.config.enabled)
            .finish()
    }
}

impl Mailer {
    /// Build a mailer from configuration.
    pub fn new(config: MailConfig) -> AppResult<Self> {
        let transport = if config.enabled {
            let relay = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Mail,
                        format!("Invalid SMTP relay '{}'", config.smtp_host),
                        e,
                    )
                })?
                .credentials(Credentials::new(
                    config.smtp_username.clone(),
                    config.smtp_password.clone(),
                ))
                .build();
            Some(relay)
        } else {
            None
        };

        Ok(Self { config, transport })
    }

    /// Send a verification code to an address.
    pub async fn send_verification(&self, to: &str, code: &str) -> AppResult<()> {
        let Some(transport) = &self.transport else {
            info!(to, code, "Mail disabled, verification code logged");
            return Ok(());
        };

        let from: Mailbox = self.config.from_address.parse().map_err(|e| {
            AppError::with_source(
                ErrorKind::Mail,
                format!("Invalid from address '{}'", self.config.from_address),
                e,
            )
        })?;
        let to_mailbox: Mailbox = to.parse().map_err(|e| {
            AppError::with_source(ErrorKind::Mail, format!("Invalid recipient '{to}'"), e)
        })?;

        let email = Message::builder()
            .from(from)
            .to(to_mailbox)
            .subject("TeamHub email verification")
            .body(format!(
                "Your TeamHub verification code is {code}. It is valid for one signup attempt."
            ))
            .map_err(|e| AppError::with_source(ErrorKind::Mail, "Failed to build mail", e))?;

        transport
            .send(email)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Mail, "Failed to send mail", e))?;

        info!(to, "Verification mail sent");
        Ok(())
    }
}
