use std::cell::RefCell;

use serde_json::Value;

use super::scrollbar::ScrollbarPeer;
use super::surface::Image;
use crate::config::EngineConfig;
use crate::geometry::Rect;
use crate::logging::{LogLevel, Logger};
use crate::metrics::LayoutMetrics;

/// 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn parse_hex(raw: &str) -> Option<Self> {
        let hex = raw.strip_prefix('#')?;
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

/// Symbolic colours resolved by the host's current theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThemeColor {
    WindowBackground,
    DialogBackground,
    ControlBackgroundNormal,
    ControlBackgroundHover,
    ControlBackgroundDisabled,
}

impl ThemeColor {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "window" => Some(Self::WindowBackground),
            "dialog" => Some(Self::DialogBackground),
            "control" => Some(Self::ControlBackgroundNormal),
            "control-hover" => Some(Self::ControlBackgroundHover),
            "control-disabled" => Some(Self::ControlBackgroundDisabled),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemMetrics {
    /// Width of a vertical scrollbar.
    pub scrollbar_width: i32,
}

impl Default for SystemMetrics {
    fn default() -> Self {
        Self { scrollbar_width: 16 }
    }
}

/// The manager that owns a visual tree.
pub trait Host {
    fn theme_color(&self, color: ThemeColor) -> Color;

    fn metrics(&self) -> SystemMetrics {
        SystemMetrics::default()
    }

    /// Create a vertical scrollbar peer. `None` means the platform refused.
    fn create_scrollbar(&self) -> Option<Box<dyn ScrollbarPeer>>;

    fn load_bitmap(&self, _name: &str) -> Option<Box<dyn Image>> {
        None
    }

    /// Ask for `rect` to be repainted.
    fn invalidate(&self, rect: Rect);

    /// Ask for the whole tree to be laid out again.
    fn request_layout(&self);
}

/// Read-only bundle handed to every tree operation.
pub struct Context<'a> {
    pub host: &'a dyn Host,
    pub config: &'a EngineConfig,
    logger: Option<&'a Logger>,
    metrics: Option<&'a RefCell<LayoutMetrics>>,
}

impl<'a> Context<'a> {
    pub fn new(host: &'a dyn Host, config: &'a EngineConfig) -> Self {
        Self {
            host,
            config,
            logger: None,
            metrics: None,
        }
    }

    pub fn with_logger(mut self, logger: &'a Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: &'a RefCell<LayoutMetrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn log(&self, level: LogLevel, target: &str, message: &str) {
        self.log_fields(level, target, message, []);
    }

    /// Logging failures never interrupt layout.
    pub fn log_fields(
        &self,
        level: LogLevel,
        target: &str,
        message: &str,
        fields: impl IntoIterator<Item = (String, Value)>,
    ) {
        if let Some(logger) = self.logger {
            let _ = logger.log_with_fields(level, target, message, fields);
        }
    }

    pub(crate) fn record(&self, f: impl FnOnce(&mut LayoutMetrics)) {
        if let Some(cell) = self.metrics {
            if let Ok(mut metrics) = cell.try_borrow_mut() {
                f(&mut metrics);
            }
        }
    }
}
