//! Finding delivery
//!
//! The auditor only depends on the [`Notifier`] contract. Delivery is
//! fire-and-forget: failures are reported to the caller once, never retried.

pub mod telegram;

pub use telegram::TelegramNotifier;

use crate::utils::NotifyError;
use async_trait::async_trait;

/// Delivers one issue for one hostname
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, hostname: &str, message: &str) -> Result<(), NotifyError>;
}

/// Chat message text for a finding
pub fn format_message(hostname: &str, message: &str) -> String {
    format!("Domain: {}\nIssue: {}", hostname, message)
}

/// Notifier used for dry runs: logs the message instead of sending it
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, hostname: &str, message: &str) -> Result<(), NotifyError> {
        tracing::info!("[dry-run] {}", format_message(hostname, message).replace('\n', " | "));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_message() {
        assert_eq!(
            format_message("example.com", "Certificate expiring soon"),
            "Domain: example.com\nIssue: Certificate expiring soon"
        );
    }

    #[tokio::test]
    async fn test_log_notifier_never_fails() {
        assert!(LogNotifier.send("example.com", "TLS 1.0 is deprecated but supported").await.is_ok());
    }
}
