use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Tunable constants for resolving, routing and scheduling connector lines.
///
/// Distances are page pixels, budgets are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Overlays are only drawn when the viewport is at least this wide.
    pub min_viewport_width: f64,
    pub stroke_width: f64,
    pub opacity: f64,
    /// Distance below the section top where `center-path` lines turn toward the viewport midpoint.
    pub center_turn_offset: f64,
    /// Distance below the section top where `default` lines turn horizontally.
    pub default_turn_offset: f64,
    /// Smallest horizontal run a `default` line may have past its anchor column.
    pub min_gap: f64,
    pub fallback_offset_x: f64,
    pub fallback_offset_y: f64,
    /// Share of the viewport width used as the `default` horizontal target when no container exists.
    pub fallback_x_ratio: f64,
    pub mount_budget_ms: u64,
    pub intersection_budget_ms: u64,
    /// Element id of the overlay itself; its document position is subtracted from every target.
    pub overlay_id: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            min_viewport_width: 1471.0,
            stroke_width: 2.0,
            opacity: 0.6,
            center_turn_offset: 48.0,
            default_turn_offset: 48.0,
            min_gap: 24.0,
            fallback_offset_x: 160.0,
            fallback_offset_y: 100.0,
            fallback_x_ratio: 0.25,
            mount_budget_ms: 2500,
            intersection_budget_ms: 1500,
            overlay_id: "decorative-lines".to_string(),
        }
    }
}

impl EngineConfig {
    /// Applies a (possibly partial) JSON object on top of the defaults.
    pub fn from_value(overrides: &Value) -> Result<Self> {
        let mut base = serde_json::to_value(Self::default())?;
        deep_merge_value(&mut base, overrides);
        let config: Self = serde_json::from_value(base)?;
        config.validate()?;
        tracing::trace!(?config, "engine config resolved");
        Ok(config)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: Value = serde_json::from_str(text)?;
        if !overrides.is_object() {
            return Err(Error::InvalidConfig {
                message: "expected a JSON object".to_string(),
            });
        }
        Self::from_value(&overrides)
    }

    pub fn validate(&self) -> Result<()> {
        let distances = [
            ("min_viewport_width", self.min_viewport_width),
            ("stroke_width", self.stroke_width),
            ("center_turn_offset", self.center_turn_offset),
            ("default_turn_offset", self.default_turn_offset),
            ("min_gap", self.min_gap),
            ("fallback_offset_x", self.fallback_offset_x),
            ("fallback_offset_y", self.fallback_offset_y),
        ];
        for (name, v) in distances {
            if !v.is_finite() || v < 0.0 {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be a finite, non-negative number (got {v})"),
                });
            }
        }
        for (name, v) in [
            ("opacity", self.opacity),
            ("fallback_x_ratio", self.fallback_x_ratio),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::InvalidConfig {
                    message: format!("{name} must be within 0..=1 (got {v})"),
                });
            }
        }
        if self.overlay_id.trim().is_empty() {
            return Err(Error::InvalidConfig {
                message: "overlay_id must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn deep_merge_value(base: &mut Value, incoming: &Value) {
    match (base, incoming) {
        (Value::Object(base_map), Value::Object(in_map)) => {
            for (key, in_value) in in_map {
                match base_map.get_mut(key) {
                    Some(base_value) => deep_merge_value(base_value, in_value),
                    None => {
                        base_map.insert(key.clone(), in_value.clone());
                    }
                }
            }
        }
        (base_slot, in_value) => {
            *base_slot = in_value.clone();
        }
    }
}
