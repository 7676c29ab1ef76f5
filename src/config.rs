use serde::Deserialize;

use crate::error::Result;

/// Configuration knobs shared by every container in a tree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Pixels moved by a line-up/line-down scroll or an arrow key.
    pub line_step: i32,
    /// Pixels moved by a page scroll. Fixed, not derived from content.
    pub page_size: i32,
    /// Target used for "scroll to end"; clamped to the real range.
    pub end_sentinel: i32,
    /// Upper bound on re-layouts triggered from within a single layout pass.
    pub max_layout_passes: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            line_step: 5,
            page_size: 40,
            end_sentinel: 9999,
            max_layout_passes: 4,
        }
    }
}

impl EngineConfig {
    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
