//! Zone settings.
//!
//! Immutable after load. The host reads these from its config file; defaults
//! match the values shipped with existing deployments.
//!
//! Two independent radii are configured:
//! - the **zone radius**, the size of the PvP area itself, and
//! - the **exclusion radius**, the area scanned for unauthorized neighboring
//!   anchors before a zone may be created. It never affects the zone's size.

use serde::{Deserialize, Serialize};

/// Clamp a radius to its configured bounds.
///
/// The max bound is applied first, then the min bound, so the min bound wins
/// when `min > max` is misconfigured. The multiplier must already be applied
/// by the caller; bounds are never applied before it.
#[must_use]
pub fn clamp_radius(value: f32, min: f32, max: f32) -> f32 {
    let mut radius = value;
    if radius > max {
        radius = max;
    }
    if radius < min {
        radius = min;
    }
    radius
}

/// Configuration for zone sizing, removal delay, and marker appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneSettings {
    /// Base radius of the PvP zone.
    pub zone_base_radius: f32,

    /// Minimum radius of the PvP zone.
    pub zone_min_radius: f32,

    /// Maximum radius of the PvP zone.
    pub zone_max_radius: f32,

    /// Multiplier applied to the base zone radius.
    pub zone_radius_multiplier: f32,

    /// Base radius of the exclusion check.
    pub exclusion_base_radius: f32,

    /// Minimum radius of the exclusion check.
    pub exclusion_min_radius: f32,

    /// Maximum radius of the exclusion check.
    pub exclusion_max_radius: f32,

    /// Multiplier applied to the base exclusion radius.
    pub exclusion_radius_multiplier: f32,

    /// Delay before a scheduled zone removal fires, in seconds.
    pub removal_delay_seconds: f64,

    /// Marker color as an HTML color string.
    pub marker_color: String,

    /// Marker alpha.
    pub marker_alpha: f32,

    /// Marker size.
    pub marker_size: f32,
}

impl Default for ZoneSettings {
    fn default() -> Self {
        Self {
            zone_base_radius: 40.0,
            zone_min_radius: 30.0,
            zone_max_radius: 80.0,
            zone_radius_multiplier: 1.0,
            exclusion_base_radius: 100.0,
            exclusion_min_radius: 50.0,
            exclusion_max_radius: 300.0,
            exclusion_radius_multiplier: 1.0,
            removal_delay_seconds: 180.0,
            marker_color: "#FF0000".to_string(),
            marker_alpha: 0.4,
            marker_size: 0.75,
        }
    }
}

impl ZoneSettings {
    /// Effective radius of a newly created zone.
    #[must_use]
    pub fn zone_radius(&self) -> f32 {
        clamp_radius(
            self.zone_base_radius * self.zone_radius_multiplier,
            self.zone_min_radius,
            self.zone_max_radius,
        )
    }

    /// Effective radius of the exclusion check around a candidate anchor.
    #[must_use]
    pub fn exclusion_radius(&self) -> f32 {
        clamp_radius(
            self.exclusion_base_radius * self.exclusion_radius_multiplier,
            self.exclusion_min_radius,
            self.exclusion_max_radius,
        )
    }
}
