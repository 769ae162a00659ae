//! Silhouette-size confidence score.

use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceConfig {
    /// Fraction of the image area at which confidence saturates at 1.
    pub reference_area_fraction: f64,
}

impl Default for ConfidenceConfig {
    fn default() -> Self {
        Self {
            reference_area_fraction: 0.02,
        }
    }
}

impl ConfidenceConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(self.reference_area_fraction.is_finite() && self.reference_area_fraction > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "confidence.reference_area_fraction must be > 0, got {}",
                self.reference_area_fraction
            )));
        }
        Ok(())
    }
}

/// Unsigned shoelace area of the closed polygon through `points`.
pub fn polygon_area(points: &[[f64; 2]]) -> f64 {
    if points.len() < 3 {
        return 0.0;
    }
    let mut acc = 0.0;
    for (i, p) in points.iter().enumerate() {
        let q = points[(i + 1) % points.len()];
        acc += p[0] * q[1] - q[0] * p[1];
    }
    0.5 * acc.abs()
}

/// Boundary area relative to `reference_area_fraction · width · height`,
/// clamped to `[0, 1]`.
pub fn confidence(
    boundary: &[[f64; 2]],
    width: usize,
    height: usize,
    cfg: &ConfidenceConfig,
) -> f64 {
    let reference = cfg.reference_area_fraction * (width as f64) * (height as f64);
    if reference.is_nan() || reference <= 0.0 {
        return 0.0;
    }
    let c = polygon_area(boundary) / reference;
    if c.is_finite() {
        c.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn shoelace_area_of_square_either_orientation() {
        let sq = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert_relative_eq!(polygon_area(&sq), 100.0);
        let mut rev = sq;
        rev.reverse();
        assert_relative_eq!(polygon_area(&rev), 100.0);
        assert_eq!(polygon_area(&sq[..2]), 0.0);
    }

    #[test]
    fn confidence_saturates() {
        let cfg = ConfidenceConfig::default();
        // Reference area for 100×100 is 200 px².
        let small = [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0]];
        assert_relative_eq!(confidence(&small, 100, 100, &cfg), 0.5);
        let big = [[0.0, 0.0], [50.0, 0.0], [50.0, 50.0], [0.0, 50.0]];
        assert_relative_eq!(confidence(&big, 100, 100, &cfg), 1.0);
        assert_eq!(confidence(&[], 100, 100, &cfg), 0.0);
    }
}
