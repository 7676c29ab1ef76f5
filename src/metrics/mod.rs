use crate::logging::{LogEvent, LogFields, LogLevel};
use serde_json::json;

/// Counters accumulated across layout, paint and scroll operations.
#[derive(Debug, Default, Clone)]
pub struct LayoutMetrics {
    layout_passes: u64,
    nested_passes: u64,
    paints: u64,
    children_painted: u64,
    children_culled: u64,
    scroll_changes: u64,
}

impl LayoutMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_layout(&mut self) {
        self.layout_passes = self.layout_passes.saturating_add(1);
    }

    pub fn record_nested_layout(&mut self) {
        self.nested_passes = self.nested_passes.saturating_add(1);
    }

    pub fn record_paint(&mut self, painted: usize, culled: usize) {
        self.paints = self.paints.saturating_add(1);
        self.children_painted = self.children_painted.saturating_add(painted as u64);
        self.children_culled = self.children_culled.saturating_add(culled as u64);
    }

    pub fn record_scroll(&mut self) {
        self.scroll_changes = self.scroll_changes.saturating_add(1);
    }

    pub fn snapshot(&self) -> MetricSnapshot {
        MetricSnapshot {
            layout_passes: self.layout_passes,
            nested_passes: self.nested_passes,
            paints: self.paints,
            children_painted: self.children_painted,
            children_culled: self.children_culled,
            scroll_changes: self.scroll_changes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSnapshot {
    pub layout_passes: u64,
    pub nested_passes: u64,
    pub paints: u64,
    pub children_painted: u64,
    pub children_culled: u64,
    pub scroll_changes: u64,
}

impl MetricSnapshot {
    pub fn to_log_event(&self, target: &str) -> LogEvent {
        LogEvent::with_fields(LogLevel::Info, target, "layout_metrics", self.as_fields())
    }

    pub fn as_fields(&self) -> LogFields {
        let mut map = LogFields::new();
        map.insert("layout_passes".to_string(), json!(self.layout_passes));
        map.insert("nested_passes".to_string(), json!(self.nested_passes));
        map.insert("paints".to_string(), json!(self.paints));
        map.insert("children_painted".to_string(), json!(self.children_painted));
        map.insert("children_culled".to_string(), json!(self.children_culled));
        map.insert("scroll_changes".to_string(), json!(self.scroll_changes));
        map
    }
}
