use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters describing the work done by one layout context.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    containers: u64,
    rects: u64,
    planned_rects: u64,
    dropped_containers: u64,
    orphan_requests: u64,
    peak_depth: usize,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_container(&mut self, depth: usize) {
        self.containers = self.containers.saturating_add(1);
        self.peak_depth = self.peak_depth.max(depth);
    }

    pub fn record_rect(&mut self, planned: bool) {
        self.rects = self.rects.saturating_add(1);
        if planned {
            self.planned_rects = self.planned_rects.saturating_add(1);
        }
    }

    pub fn record_dropped_container(&mut self) {
        self.dropped_containers = self.dropped_containers.saturating_add(1);
    }

    pub fn record_orphan_request(&mut self) {
        self.orphan_requests = self.orphan_requests.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            containers: self.containers,
            rects: self.rects,
            planned_rects: self.planned_rects,
            adhoc_rects: self.rects - self.planned_rects,
            dropped_containers: self.dropped_containers,
            orphan_requests: self.orphan_requests,
            peak_depth: self.peak_depth,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub containers: u64,
    pub rects: u64,
    pub planned_rects: u64,
    pub adhoc_rects: u64,
    pub dropped_containers: u64,
    pub orphan_requests: u64,
    pub peak_depth: usize,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("containers".to_string(), json!(self.containers));
        map.insert("rects".to_string(), json!(self.rects));
        map.insert("planned_rects".to_string(), json!(self.planned_rects));
        map.insert("adhoc_rects".to_string(), json!(self.adhoc_rects));
        map.insert(
            "dropped_containers".to_string(),
            json!(self.dropped_containers),
        );
        map.insert("orphan_requests".to_string(), json!(self.orphan_requests));
        map.insert("peak_depth".to_string(), json!(self.peak_depth));
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_splits_planned_and_adhoc() {
        let mut metrics = LayoutMetrics::new();
        metrics.record_container(1);
        metrics.record_container(3);
        metrics.record_container(2);
        metrics.record_rect(true);
        metrics.record_rect(false);
        metrics.record_rect(false);
        metrics.record_dropped_container();

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.containers, 3);
        assert_eq!(snapshot.peak_depth, 3);
        assert_eq!(snapshot.planned_rects, 1);
        assert_eq!(snapshot.adhoc_rects, 2);
        assert_eq!(snapshot.dropped_containers, 1);

        let event = snapshot.to_log_event("cursor_layout::metrics");
        assert_eq!(event.message, "layout_metrics");
        assert_eq!(event.fields["rects"], json!(3));
    }
}
