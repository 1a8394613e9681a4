use floodwatch_common::types::Severity;

pub struct ChannelRoute {
    pub min_severity: Severity,
    pub channel_index: usize,
}

impl ChannelRoute {
    pub fn should_send(&self, item_severity: Severity) -> bool {
        item_severity >= self.min_severity
    }
}
