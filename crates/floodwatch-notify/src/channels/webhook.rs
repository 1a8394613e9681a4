use crate::NotificationChannel;
use anyhow::Result;
use async_trait::async_trait;
use floodwatch_common::types::AlertItem;
use tracing;

/// Push delivery through generic webhook endpoints. Each configured URL
/// receives the alert as a JSON document; this is the system-push analog
/// for front ends that relay to their notification service.
pub struct WebhookChannel {
    client: reqwest::Client,
    urls: Vec<String>,
}

impl WebhookChannel {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            urls,
        }
    }

    fn render_body(alert: &AlertItem) -> serde_json::Value {
        serde_json::json!({
            "id": alert.id,
            "title": alert.title,
            "body": alert.description,
            "severity": alert.severity.to_string(),
            "source": alert.source.to_string(),
            "timestamp": alert.timestamp.to_rfc3339(),
        })
    }
}

#[async_trait]
impl NotificationChannel for WebhookChannel {
    async fn send(&self, alert: &AlertItem) -> Result<()> {
        let body = Self::render_body(alert);

        for url in &self.urls {
            let mut last_err = None;
            for attempt in 0..3u32 {
                match self.client.post(url.as_str()).json(&body).send().await {
                    Ok(resp) if resp.status().is_success() => {
                        last_err = None;
                        break;
                    }
                    Ok(resp) => {
                        let status = resp.status();
                        tracing::warn!(
                            attempt = attempt + 1,
                            status = %status,
                            "Webhook returned non-success status, retrying"
                        );
                        last_err = Some(anyhow::anyhow!("HTTP {status}"));
                    }
                    Err(e) => {
                        tracing::warn!(
                            attempt = attempt + 1,
                            error = %e,
                            "Webhook send failed, retrying"
                        );
                        last_err = Some(e.into());
                    }
                }
                if attempt < 2 {
                    tokio::time::sleep(std::time::Duration::from_millis(
                        100 * 2u64.pow(attempt),
                    ))
                    .await;
                }
            }

            if let Some(e) = last_err {
                tracing::error!(url = %url, error = %e, "Webhook failed after 3 retries");
            }
        }

        Ok(())
    }

    fn channel_name(&self) -> &str {
        "webhook"
    }
}
