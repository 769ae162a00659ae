//! RANSAC wrapper for outlier-robust line fitting.

use rand::prelude::*;
use serde::{Deserialize, Serialize};

use super::fit::fit_line_tls;
use super::types::{Line, NormalLine};
use crate::error::AnalysisError;

/// Configuration for RANSAC line fitting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LineRansacConfig {
    /// Number of two-point hypotheses to draw.
    pub max_iters: usize,
    /// Perpendicular distance (pixels) below which a point is an inlier.
    pub inlier_threshold: f64,
    /// RNG seed for reproducibility.
    pub seed: u64,
}

impl Default for LineRansacConfig {
    fn default() -> Self {
        Self {
            max_iters: 400,
            inlier_threshold: 3.5,
            seed: 42,
        }
    }
}

/// How the returned line was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineFitMethod {
    /// Best two-point consensus hypothesis.
    Ransac,
    /// Orthogonal regression over all points (no valid hypothesis was drawn).
    TotalLeastSquares,
}

/// Result of a robust line fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    /// Fitted line.
    pub line: Line,
    /// Normalized form of the fitted line.
    pub normal: NormalLine,
    /// Number of points within the inlier threshold of the line.
    pub num_inliers: usize,
    /// Which estimator produced the line.
    pub method: LineFitMethod,
}

/// Fit a line robustly using two-point RANSAC with an explicit random source.
///
/// Each round draws two distinct indices, skips coincident points, and
/// counts points strictly closer than `inlier_threshold`. The first
/// hypothesis with the highest count wins. When no hypothesis could be
/// formed the fit falls back to total least squares over all points.
pub fn fit_line_ransac<R: Rng + ?Sized>(
    points: &[[f64; 2]],
    config: &LineRansacConfig,
    rng: &mut R,
) -> Result<LineFit, AnalysisError> {
    let n = points.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            stage: "baseline line fit",
            needed: 2,
            got: n,
        });
    }

    let pairs = (0..config.max_iters).map(|_| sample_pair(rng, n));
    match best_consensus(points, pairs, config.inlier_threshold) {
        Some((normal, num_inliers)) => Ok(LineFit {
            line: normal.to_line(),
            normal,
            num_inliers,
            method: LineFitMethod::Ransac,
        }),
        None => {
            tracing::debug!("no valid line hypothesis in {} rounds", config.max_iters);
            let normal = fit_line_tls(points)?;
            Ok(LineFit {
                line: normal.to_line(),
                normal,
                num_inliers: count_inliers(&normal, points, config.inlier_threshold),
                method: LineFitMethod::TotalLeastSquares,
            })
        }
    }
}

/// Fit a line robustly with a request-local RNG seeded from `config.seed`.
pub fn fit_line_ransac_seeded(
    points: &[[f64; 2]],
    config: &LineRansacConfig,
) -> Result<LineFit, AnalysisError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    fit_line_ransac(points, config, &mut rng)
}

/// Score each index pair's line; a later hypothesis replaces the current
/// best only with strictly more inliers.
fn best_consensus(
    points: &[[f64; 2]],
    pairs: impl Iterator<Item = (usize, usize)>,
    threshold: f64,
) -> Option<(NormalLine, usize)> {
    let mut best: Option<(NormalLine, usize)> = None;
    for (i, j) in pairs {
        let Some(candidate) = NormalLine::through(points[i], points[j]) else {
            continue;
        };
        let inliers = count_inliers(&candidate, points, threshold);
        if best.map_or(true, |(_, count)| inliers > count) {
            best = Some((candidate, inliers));
        }
    }
    best
}

fn count_inliers(line: &NormalLine, points: &[[f64; 2]], threshold: f64) -> usize {
    points
        .iter()
        .filter(|&&p| line.distance(p) < threshold)
        .count()
}

/// Draw two distinct indices from `0..n` (`n >= 2`).
fn sample_pair<R: Rng + ?Sized>(rng: &mut R, n: usize) -> (usize, usize) {
    debug_assert!(n >= 2);
    let i = rng.gen_range(0..n);
    let mut j = rng.gen_range(0..n - 1);
    if j >= i {
        j += 1;
    }
    (i, j)
}
