use crate::manager::NotificationManager;
use crate::routing::ChannelRoute;
use crate::NotificationChannel;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use floodwatch_common::types::{AlertItem, AlertSource, Severity};
use std::sync::{Arc, Mutex};

struct RecordingChannel {
    name: &'static str,
    sent: Arc<Mutex<Vec<String>>>,
    fail: bool,
}

#[async_trait]
impl NotificationChannel for RecordingChannel {
    async fn send(&self, alert: &AlertItem) -> Result<()> {
        if self.fail {
            anyhow::bail!("gateway down");
        }
        self.sent.lock().unwrap().push(alert.id.clone());
        Ok(())
    }

    fn channel_name(&self) -> &str {
        self.name
    }
}

fn item(id: &str, severity: Severity) -> AlertItem {
    AlertItem {
        id: id.to_string(),
        title: "Red alert Flood in Namibia".to_string(),
        description: "Cuvelai basin".to_string(),
        severity,
        source: AlertSource::Gdacs,
        timestamp: Utc::now(),
    }
}

#[test]
fn routes_gate_on_minimum_severity() {
    let route = ChannelRoute {
        min_severity: Severity::Medium,
        channel_index: 0,
    };
    assert!(!route.should_send(Severity::Low));
    assert!(route.should_send(Severity::Medium));
    assert!(route.should_send(Severity::High));
}

#[tokio::test]
async fn manager_sends_only_to_channels_whose_threshold_is_met() {
    let push_sent = Arc::new(Mutex::new(Vec::new()));
    let sms_sent = Arc::new(Mutex::new(Vec::new()));

    let manager = NotificationManager::new(
        vec![
            Box::new(RecordingChannel {
                name: "push",
                sent: push_sent.clone(),
                fail: false,
            }),
            Box::new(RecordingChannel {
                name: "sms",
                sent: sms_sent.clone(),
                fail: false,
            }),
        ],
        vec![
            ChannelRoute {
                min_severity: Severity::Low,
                channel_index: 0,
            },
            ChannelRoute {
                min_severity: Severity::High,
                channel_index: 1,
            },
        ],
    );

    manager.notify(&item("a-1", Severity::Medium)).await;
    manager.notify(&item("a-2", Severity::High)).await;

    assert_eq!(*push_sent.lock().unwrap(), vec!["a-1", "a-2"]);
    assert_eq!(*sms_sent.lock().unwrap(), vec!["a-2"]);
}

#[tokio::test]
async fn channel_failure_does_not_stop_remaining_routes() {
    let sent = Arc::new(Mutex::new(Vec::new()));

    let manager = NotificationManager::new(
        vec![
            Box::new(RecordingChannel {
                name: "broken",
                sent: Arc::new(Mutex::new(Vec::new())),
                fail: true,
            }),
            Box::new(RecordingChannel {
                name: "push",
                sent: sent.clone(),
                fail: false,
            }),
        ],
        vec![
            ChannelRoute {
                min_severity: Severity::Low,
                channel_index: 0,
            },
            ChannelRoute {
                min_severity: Severity::Low,
                channel_index: 1,
            },
        ],
    );

    manager.notify(&item("a-3", Severity::High)).await;
    assert_eq!(*sent.lock().unwrap(), vec!["a-3"]);
}

#[tokio::test]
async fn route_with_dangling_channel_index_is_ignored() {
    let manager = NotificationManager::new(
        vec![],
        vec![ChannelRoute {
            min_severity: Severity::Low,
            channel_index: 5,
        }],
    );
    // Must not panic
    manager.notify(&item("a-4", Severity::High)).await;
    assert!(manager.channels().is_empty());
}
