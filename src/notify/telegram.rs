//! Telegram bot notifier
//!
//! POSTs `chat_id` and `text` as a form to `{api_base}/bot{token}/sendMessage`.

use super::{format_message, Notifier};
use crate::config::NotifySettings;
use crate::utils::{ConfigError, NotifyError};
use async_trait::async_trait;

/// Sends findings to a Telegram chat
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    /// Build a notifier from settings; token and chat id are required
    pub fn new(settings: &NotifySettings) -> Result<Self, ConfigError> {
        let token = required(&settings.bot_token, "notify.bot_token")?;
        let chat_id = required(&settings.chat_id, "notify.chat_id")?;

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "notify".to_string(),
                message: format!("Failed to build HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: format!(
                "{}/bot{}/sendMessage",
                settings.api_base.trim_end_matches('/'),
                token
            ),
            chat_id,
        })
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, hostname: &str, message: &str) -> Result<(), NotifyError> {
        let text = format_message(hostname, message);
        let response = self
            .client
            .post(&self.endpoint)
            .form(&[("chat_id", self.chat_id.as_str()), ("text", text.as_str())])
            .send()
            .await
            // without_url keeps the bot token out of logs
            .map_err(|e| NotifyError::Request {
                message: e.without_url().to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

fn required(value: &Option<String>, key: &str) -> Result<String, ConfigError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ConfigError::MissingRequired {
            key: key.to_string(),
        })
}
