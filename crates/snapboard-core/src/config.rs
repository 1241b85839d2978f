//! Tunable parameters for snapping and gesture recognition.
//!
//! Every field has a default, so a JSON document only needs to name the
//! values it overrides:
//!
//! ```
//! use snapboard_core::BoardConfig;
//!
//! let config = BoardConfig::from_json(r#"{ "snap": { "snap_threshold": 30.0 } }"#).unwrap();
//! assert_eq!(config.snap.snap_threshold, 30.0);
//! assert_eq!(config.snap.visual_threshold, 35.0);
//! ```

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Snap engine thresholds and damping factors (canvas units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    /// Distance below which a guide is active and pulls the shape.
    pub snap_threshold: f64,
    /// Distance below which the pull is strong.
    pub magnetic_threshold: f64,
    /// Distance below which a guide is visible at all.
    pub visual_threshold: f64,
    /// Cumulative drag distance needed to break a lock.
    pub unlock_threshold: f64,
    /// Damping applied while moving freely.
    pub free_damping: f64,
    /// Damping applied while locked.
    pub locked_damping: f64,
    /// Base blend factor toward a guide.
    pub strength_blend: f64,
    /// Extra pull per unit of snap strength inside the magnetic zone.
    pub strong_pull_gain: f64,
    /// Snap strength a lock requires.
    pub lock_strength: f64,
    /// Largest raw-to-snapped offset at which a lock may engage.
    pub lock_max_offset: f64,
    /// Per-axis movements smaller than this get extra smoothing.
    pub micro_movement: f64,
    /// Preview pull factor inside the magnetic zone.
    pub preview_strong_pull: f64,
    /// Preview pull factor inside the visual zone.
    pub preview_weak_pull: f64,
    /// Radius for snapping a free point to other shapes' snap points.
    pub target_snap_radius: f64,
    /// Delay before guide lines fade out, in milliseconds.
    pub fade_delay_ms: u64,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            snap_threshold: 25.0,
            magnetic_threshold: 15.0,
            visual_threshold: 35.0,
            unlock_threshold: 20.0,
            free_damping: 0.8,
            locked_damping: 0.95,
            strength_blend: 0.3,
            strong_pull_gain: 0.4,
            lock_strength: 0.8,
            lock_max_offset: 5.0,
            micro_movement: 2.0,
            preview_strong_pull: 0.8,
            preview_weak_pull: 0.2,
            target_snap_radius: 10.0,
            fade_delay_ms: 200,
        }
    }
}

impl SnapConfig {
    /// Guide fade-out delay.
    pub fn fade_delay(&self) -> Duration {
        Duration::from_millis(self.fade_delay_ms)
    }

    /// Check that thresholds are positive and ordered and factors are fractions.
    pub fn validate(&self) -> ConfigResult<()> {
        positive("snap_threshold", self.snap_threshold)?;
        positive("magnetic_threshold", self.magnetic_threshold)?;
        positive("visual_threshold", self.visual_threshold)?;
        positive("unlock_threshold", self.unlock_threshold)?;
        non_negative("lock_max_offset", self.lock_max_offset)?;
        non_negative("micro_movement", self.micro_movement)?;
        non_negative("target_snap_radius", self.target_snap_radius)?;

        if self.magnetic_threshold > self.snap_threshold {
            return Err(invalid(
                "magnetic_threshold",
                format!(
                    "{} exceeds snap_threshold {}",
                    self.magnetic_threshold, self.snap_threshold
                ),
            ));
        }
        if self.snap_threshold > self.visual_threshold {
            return Err(invalid(
                "snap_threshold",
                format!(
                    "{} exceeds visual_threshold {}",
                    self.snap_threshold, self.visual_threshold
                ),
            ));
        }

        fraction("free_damping", self.free_damping)?;
        fraction("locked_damping", self.locked_damping)?;
        fraction("strength_blend", self.strength_blend)?;
        fraction("strong_pull_gain", self.strong_pull_gain)?;
        fraction("lock_strength", self.lock_strength)?;
        fraction("preview_strong_pull", self.preview_strong_pull)?;
        fraction("preview_weak_pull", self.preview_weak_pull)?;
        Ok(())
    }
}

/// Gesture recognition parameters (canvas units).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Side of the square resize-handle hit region around the bottom-right corner.
    pub resize_handle_size: f64,
    /// Hit tolerance around line shapes.
    pub line_hit_tolerance: f64,
    /// Pointer travel before a press turns into a drag instead of a tap.
    pub drag_slop: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            resize_handle_size: crate::hit_test::RESIZE_HANDLE_SIZE,
            line_hit_tolerance: crate::hit_test::LINE_HIT_TOLERANCE,
            drag_slop: 4.0,
        }
    }
}

impl GestureConfig {
    pub fn validate(&self) -> ConfigResult<()> {
        positive("resize_handle_size", self.resize_handle_size)?;
        non_negative("line_hit_tolerance", self.line_hit_tolerance)?;
        non_negative("drag_slop", self.drag_slop)?;
        Ok(())
    }
}

/// Complete board configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub snap: SnapConfig,
    pub gesture: GestureConfig,
}

impl BoardConfig {
    /// Parse and validate a JSON configuration.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.snap.validate()?;
        self.gesture.validate()
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

fn positive(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must not be negative")))
    }
}

fn fraction(field: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be within [0, 1]")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BoardConfig::default().validate().is_ok());
        assert_eq!(SnapConfig::default().fade_delay(), Duration::from_millis(200));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BoardConfig::from_json(r#"{ "gesture": { "drag_slop": 0.0 } }"#).unwrap();
        assert!((config.gesture.drag_slop - 0.0).abs() < f64::EPSILON);
        assert!((config.gesture.resize_handle_size - 20.0).abs() < f64::EPSILON);
        assert_eq!(config.snap, SnapConfig::default());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut config = BoardConfig::default();
        config.snap.unlock_threshold = 42.0;
        let json = config.to_json().unwrap();
        assert_eq!(BoardConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_malformed_json() {
        let err = BoardConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_threshold_order_rejected() {
        let config = SnapConfig {
            magnetic_threshold: 30.0,
            ..SnapConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "magnetic_threshold", .. }));

        let config = SnapConfig {
            visual_threshold: 20.0,
            ..SnapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "snap_threshold", .. })
        ));
    }

    #[test]
    fn test_damping_out_of_range_rejected() {
        let config = SnapConfig {
            locked_damping: 1.5,
            ..SnapConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid { field: "locked_damping", .. })
        ));
    }

    #[test]
    fn test_negative_handle_size_rejected() {
        let config = GestureConfig {
            resize_handle_size: -1.0,
            ..GestureConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
