//! Defaults applied by every container that does not bring its own values.

use serde::{Deserialize, Serialize};

use crate::error::{LayoutError, Result};
use crate::geometry::Padding;
use crate::layout::Align;

/// Default maximum container nesting depth.
pub const MAX_STACK: usize = 16;

/// Largest `max_depth` a config may ask for.
pub const MAX_DEPTH_LIMIT: usize = 1024;

/// Layout defaults read on every `begin_row` / `begin_column`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Padding for containers opened without explicit padding.
    pub padding: Padding,
    /// Gap for containers opened without an explicit gap.
    pub gap: f32,
    /// Cross-axis alignment used by `LayoutContext::rect`.
    pub align: Align,
    /// Maximum container nesting depth.
    pub max_depth: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            padding: Padding::all(10.0),
            gap: 10.0,
            align: Align::Center,
            max_depth: MAX_STACK,
        }
    }
}

impl LayoutConfig {
    pub fn set_default_padding(&mut self, padding: Padding) {
        self.padding = padding;
    }

    pub fn set_default_padding_all(&mut self, value: f32) {
        self.padding = Padding::all(value);
    }

    pub fn set_default_gap(&mut self, gap: f32) {
        self.gap = gap;
    }

    pub fn set_default_align(&mut self, align: Align) {
        self.align = align;
    }

    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: LayoutConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(LayoutError::InvalidConfig(format!(
                "gap must be a finite, non-negative number (got {})",
                self.gap
            )));
        }
        if !self.padding.is_finite() {
            return Err(LayoutError::InvalidConfig(
                "padding must be finite".to_string(),
            ));
        }
        if self.max_depth == 0 || self.max_depth > MAX_DEPTH_LIMIT {
            return Err(LayoutError::InvalidConfig(format!(
                "max_depth must be between 1 and {MAX_DEPTH_LIMIT} (got {})",
                self.max_depth
            )));
        }
        Ok(())
    }
}
