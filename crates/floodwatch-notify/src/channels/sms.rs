use crate::NotificationChannel;
use anyhow::Result;
use async_trait::async_trait;
use floodwatch_common::types::AlertItem;
use tracing;

/// SMS delivery through the Africa's Talking messaging API.
pub struct SmsChannel {
    client: reqwest::Client,
    gateway_url: String,
    username: String,
    api_key: String,
    sender_id: String,
    /// Default recipients for scheduler-driven notifications. Broadcasts
    /// pass their own subscriber list to [`SmsChannel::send_message`].
    recipients: Vec<String>,
}

impl SmsChannel {
    pub fn new(
        gateway_url: Option<String>,
        username: &str,
        api_key: &str,
        sender_id: &str,
        recipients: Vec<String>,
    ) -> Self {
        Self {
            client: reqwest::Client::new(),
            gateway_url: gateway_url
                .unwrap_or_else(|| "https://api.africastalking.com/version1/messaging".to_string()),
            username: username.to_string(),
            api_key: api_key.to_string(),
            sender_id: sender_id.to_string(),
            recipients,
        }
    }

    fn format_message(alert: &AlertItem) -> String {
        format!("[FLOOD ALERT] {}: {}", alert.title, alert.description)
    }

    /// Send one message to the given phone numbers, retrying up to 3 times
    /// with exponential backoff.
    pub async fn send_message(&self, phones: &[String], message: &str) -> Result<()> {
        if phones.is_empty() {
            return Ok(());
        }

        let to = phones.join(",");
        let params = [
            ("username", self.username.as_str()),
            ("to", to.as_str()),
            ("message", message),
            ("from", self.sender_id.as_str()),
        ];

        let mut last_err = None;
        for attempt in 0..3u32 {
            match self
                .client
                .post(&self.gateway_url)
                .header("apiKey", &self.api_key)
                .form(&params)
                .send()
                .await
            {
                Ok(resp) if resp.status().is_success() => {
                    last_err = None;
                    break;
                }
                Ok(resp) => {
                    let status = resp.status();
                    tracing::warn!(
                        attempt = attempt + 1,
                        status = %status,
                        "SMS gateway returned error, retrying"
                    );
                    last_err = Some(anyhow::anyhow!("HTTP {status}"));
                }
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        error = %e,
                        "SMS send failed, retrying"
                    );
                    last_err = Some(e.into());
                }
            }
            if attempt < 2 {
                tokio::time::sleep(std::time::Duration::from_millis(100 * 2u64.pow(attempt)))
                    .await;
            }
        }

        match last_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl NotificationChannel for SmsChannel {
    async fn send(&self, alert: &AlertItem) -> Result<()> {
        let message = Self::format_message(alert);
        if let Err(e) = self.send_message(&self.recipients, &message).await {
            tracing::error!(error = %e, "SMS failed after 3 retries");
            return Err(e);
        }
        Ok(())
    }

    fn channel_name(&self) -> &str {
        "sms"
    }
}
