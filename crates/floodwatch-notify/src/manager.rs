use crate::routing::ChannelRoute;
use crate::NotificationChannel;
use floodwatch_common::types::AlertItem;
use tracing;

pub struct NotificationManager {
    channels: Vec<Box<dyn NotificationChannel>>,
    routes: Vec<ChannelRoute>,
}

impl NotificationManager {
    pub fn new(channels: Vec<Box<dyn NotificationChannel>>, routes: Vec<ChannelRoute>) -> Self {
        Self { channels, routes }
    }

    /// Fan one alert item out to every channel whose severity threshold it
    /// meets. Channel failures are logged, never propagated: a broken
    /// gateway must not take the poll loop down with it.
    pub async fn notify(&self, item: &AlertItem) {
        for route in &self.routes {
            if !route.should_send(item.severity) {
                continue;
            }

            if let Some(channel) = self.channels.get(route.channel_index) {
                if let Err(e) = channel.send(item).await {
                    tracing::error!(
                        channel = channel.channel_name(),
                        error = %e,
                        "Failed to send notification"
                    );
                }
            }
        }
    }

    pub fn channels(&self) -> &[Box<dyn NotificationChannel>] {
        &self.channels
    }
}
