//! Delivery of verification codes

use crate::models::User;
use thiserror::Error;
use tracing::info;

/// Delivery failure reported by a notifier.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct NotifyError(pub String);

/// Sends a verification code to the account owner.
pub trait OtpNotifier: Send + Sync {
    fn send_verification(&self, user: &User, code: &str) -> Result<(), NotifyError>;
}

/// Writes codes to the structured log instead of sending mail.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

impl OtpNotifier for LogNotifier {
    fn send_verification(&self, user: &User, code: &str) -> Result<(), NotifyError> {
        info!(email = %user.email, code, "Verification code issued");
        Ok(())
    }
}
