//! Contact angles between the baseline and the droplet tangents.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::line::{Line, Slope};

/// Finite stand-in for a vertical slope.
pub const VERTICAL_SLOPE_SURROGATE: f64 = 1e12;

/// Angle-calculator settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AngleConfig {
    /// Slope substituted for vertical lines and tangents before `atan`.
    pub vertical_slope_surrogate: f64,
}

impl Default for AngleConfig {
    fn default() -> Self {
        Self {
            vertical_slope_surrogate: VERTICAL_SLOPE_SURROGATE,
        }
    }
}

impl AngleConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.vertical_slope_surrogate.is_finite() && self.vertical_slope_surrogate > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "angle.vertical_slope_surrogate must be finite and > 0, got {}",
                self.vertical_slope_surrogate
            )));
        }
        Ok(())
    }
}

/// Left, right and mean contact angles in degrees, each in `[0, 180]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AngleResult {
    /// Angle at the left contact.
    pub left_deg: f64,
    /// Angle at the right contact.
    pub right_deg: f64,
    /// Arithmetic mean of the two sides.
    pub mean_deg: f64,
}

/// Angle in degrees between two slopes.
///
/// `|atan(m_t) − atan(m_b)|`, reflected to `2π − v` when above `π`.
pub fn angle_between_deg(baseline: Slope, tangent: Slope, surrogate: f64) -> f64 {
    let mb = baseline.to_finite(surrogate);
    let mt = tangent.to_finite(surrogate);
    let mut v = (mt.atan() - mb.atan()).abs();
    if v > std::f64::consts::PI {
        v = 2.0 * std::f64::consts::PI - v;
    }
    v.to_degrees()
}

/// Contact angles for both sides of the droplet.
pub fn contact_angles(baseline: &Line, left: Slope, right: Slope, surrogate: f64) -> AngleResult {
    let mb = baseline.slope();
    let left_deg = angle_between_deg(mb, left, surrogate);
    let right_deg = angle_between_deg(mb, right, surrogate);
    AngleResult {
        left_deg,
        right_deg,
        mean_deg: 0.5 * (left_deg + right_deg),
    }
}
