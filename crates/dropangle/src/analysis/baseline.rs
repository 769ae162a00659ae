//! Baseline estimation from the lowest part of the silhouette.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::line::{fit_line_ransac, LineFit, LineRansacConfig};

/// Baseline point selection and robust fit settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BaselineConfig {
    /// Points with `y` at or above this percentile of boundary `y` are used.
    pub bottom_percentile: f64,
    /// Below this many selected points the whole boundary is used instead.
    pub min_points: usize,
    pub ransac: LineRansacConfig,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            bottom_percentile: 70.0,
            min_points: 6,
            ransac: LineRansacConfig::default(),
        }
    }
}

impl BaselineConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !(0.0..=100.0).contains(&self.bottom_percentile) {
            return Err(AnalysisError::InvalidConfig(format!(
                "baseline.bottom_percentile must be in [0, 100], got {}",
                self.bottom_percentile
            )));
        }
        if !(self.ransac.inlier_threshold.is_finite() && self.ransac.inlier_threshold > 0.0) {
            return Err(AnalysisError::InvalidConfig(format!(
                "baseline.ransac.inlier_threshold must be > 0, got {}",
                self.ransac.inlier_threshold
            )));
        }
        Ok(())
    }
}

/// Baseline line plus the size of the point set it was fitted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BaselineFit {
    /// Robust line fit over the selected points.
    pub fit: LineFit,
    /// Number of boundary points passed to the line fit.
    pub n_points: usize,
}

/// Percentile of `values` with linear interpolation between order statistics.
///
/// `p` is in percent. Returns `None` for an empty slice.
pub fn percentile(values: &[f64], p: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = (p.clamp(0.0, 100.0) / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Boundary points lying in the bottom band of the silhouette.
///
/// Image y grows downward, so the bottom band is `y >= P(bottom_percentile)`.
/// Falls back to the whole boundary when fewer than `min_points` survive.
pub fn baseline_points(boundary: &[[f64; 2]], cfg: &BaselineConfig) -> Vec<[f64; 2]> {
    let ys: Vec<f64> = boundary.iter().map(|p| p[1]).collect();
    let Some(y_thresh) = percentile(&ys, cfg.bottom_percentile) else {
        return Vec::new();
    };
    let bottom: Vec<[f64; 2]> = boundary
        .iter()
        .copied()
        .filter(|p| p[1] >= y_thresh)
        .collect();
    if bottom.len() < cfg.min_points {
        tracing::debug!(
            selected = bottom.len(),
            min_points = cfg.min_points,
            "too few bottom points; fitting baseline to the whole boundary"
        );
        return boundary.to_vec();
    }
    bottom
}

/// Select the bottom band and fit the baseline with RANSAC.
pub fn fit_baseline<R: Rng + ?Sized>(
    boundary: &[[f64; 2]],
    cfg: &BaselineConfig,
    rng: &mut R,
) -> Result<BaselineFit, AnalysisError> {
    let pts = baseline_points(boundary, cfg);
    let fit = fit_line_ransac(&pts, &cfg.ransac, rng)?;
    tracing::debug!(
        n_points = pts.len(),
        inliers = fit.num_inliers,
        method = ?fit.method,
        line = ?fit.line,
        "baseline fitted"
    );
    Ok(BaselineFit {
        fit,
        n_points: pts.len(),
    })
}
