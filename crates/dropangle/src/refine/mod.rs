//! Sub-pixel contact refinement.
//!
//! A contact candidate is moved along the normal of its tangent to the
//! strongest intensity transition within a short profile. The peak of the
//! profile derivative is localised with a three-point parabola.

mod profile;

pub use profile::{
    central_derivative_into, parabolic_vertex, sample_along_normal, strongest_transition,
    NormalProfile, PARABOLA_DENOM_EPS,
};

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::field::IntensityField;

/// Normal-profile sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RefineConfig {
    /// Number of samples along the normal (odd, at least 3).
    pub profile_len: usize,
    /// Distance between samples in pixels.
    pub spacing: f64,
}

impl Default for RefineConfig {
    fn default() -> Self {
        Self {
            profile_len: 31,
            spacing: 0.7,
        }
    }
}

impl RefineConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if self.profile_len < 3 || self.profile_len % 2 == 0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "refine.profile_len must be odd and >= 3, got {}",
                self.profile_len
            )));
        }
        if !(self.spacing.is_finite() && self.spacing > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "refine.spacing must be > 0, got {}",
                self.spacing
            )));
        }
        Ok(())
    }
}

/// How the refined offset was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RefineOutcome {
    /// Parabolic sub-sample interpolation around the derivative peak.
    Interpolated,
    /// Peak at the first or last eligible sample; integer offset returned.
    WindowEdge,
    /// Parabola too flat to trust; integer offset returned.
    FlatPeak,
    /// Profile has no intensity change; point left unchanged.
    NoTransition,
    /// Invalid parameters or direction; point left unchanged.
    Skipped,
}

/// Result of refining one contact point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RefinedContact {
    /// Refined position.
    pub point: [f64; 2],
    /// Signed displacement along the normal, in pixels.
    pub offset: f64,
    /// How `offset` was obtained.
    pub outcome: RefineOutcome,
}

impl RefinedContact {
    fn unchanged(point: [f64; 2], outcome: RefineOutcome) -> Self {
        Self {
            point,
            offset: 0.0,
            outcome,
        }
    }
}

/// Refine `point` along the normal of `tangent_dir`.
///
/// The normal is the tangent rotated by 90° (`(−t_y, t_x)`). `tangent_dir`
/// does not need to be unit length. The function is pure and never fails;
/// degraded cases are reported through [`RefineOutcome`].
pub fn refine_contact(
    point: [f64; 2],
    tangent_dir: [f64; 2],
    field: &IntensityField,
    cfg: &RefineConfig,
) -> RefinedContact {
    if cfg.validate().is_err() {
        return RefinedContact::unchanged(point, RefineOutcome::Skipped);
    }
    let norm = tangent_dir[0].hypot(tangent_dir[1]);
    if !(norm.is_finite() && norm > 0.0) || !(point[0].is_finite() && point[1].is_finite()) {
        return RefinedContact::unchanged(point, RefineOutcome::Skipped);
    }
    let normal = [-tangent_dir[1] / norm, tangent_dir[0] / norm];

    let prof = sample_along_normal(field, point, normal, cfg.profile_len, cfg.spacing);
    let mut deriv = vec![0.0; prof.len()];
    central_derivative_into(&prof.values, &mut deriv);

    let Some(imax) = strongest_transition(&deriv) else {
        return RefinedContact::unchanged(point, RefineOutcome::NoTransition);
    };

    let n = prof.len();
    let (offset, outcome) = if imax == 1 || imax == n - 2 {
        (prof.offsets[imax], RefineOutcome::WindowEdge)
    } else {
        match parabolic_vertex(deriv[imax - 1], deriv[imax], deriv[imax + 1]) {
            Ok(dt) => (
                prof.offsets[imax] + dt * cfg.spacing,
                RefineOutcome::Interpolated,
            ),
            Err(_) => (prof.offsets[imax], RefineOutcome::FlatPeak),
        }
    };

    RefinedContact {
        point: [point[0] + normal[0] * offset, point[1] + normal[1] * offset],
        offset,
        outcome,
    }
}

/// Refined position only; see [`refine_contact`].
pub fn refine(
    point: [f64; 2],
    tangent_dir: [f64; 2],
    field: &IntensityField,
    profile_len: usize,
    spacing: f64,
) -> [f64; 2] {
    refine_contact(
        point,
        tangent_dir,
        field,
        &RefineConfig {
            profile_len,
            spacing,
        },
    )
    .point
}
