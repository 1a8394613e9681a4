//! Notification delivery for newly-arrived alert items.
//!
//! Alert items are routed to one or more [`NotificationChannel`]
//! implementations based on severity. Built-in channels cover the SMS
//! gateway (Africa's Talking) and webhook push relays.

pub mod channels;
pub mod manager;
pub mod routing;

#[cfg(test)]
mod tests;

use anyhow::Result;
use async_trait::async_trait;
use floodwatch_common::types::AlertItem;

/// A notification delivery channel that sends alert items to an external
/// service (SMS gateway, push relay).
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    /// Delivers the alert item through this channel.
    ///
    /// # Errors
    ///
    /// Returns an error if delivery fails after retries (if applicable).
    async fn send(&self, alert: &AlertItem) -> Result<()>;

    /// Returns the channel type name (e.g., `"sms"`, `"webhook"`).
    fn channel_name(&self) -> &str;
}

pub use channels::sms::SmsChannel;
pub use channels::webhook::WebhookChannel;
pub use manager::NotificationManager;
pub use routing::ChannelRoute;
