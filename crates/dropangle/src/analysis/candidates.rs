//! Contact candidates: where the baseline meets the droplet outline.
//!
//! Candidates come from a typed fallback chain:
//! 1. [`CandidateSource::Intersection`]: ellipse ∩ baseline, inside the field.
//! 2. [`CandidateSource::NearestBoundary`]: x-extremes of the boundary points
//!    closest to the baseline.
//! 3. [`CandidateSource::Duplicated`]: a single surviving intersection plus a
//!    copy shifted along x.

use serde::{Deserialize, Serialize};

use crate::conic::{intersect_ellipse_line, Ellipse};
use crate::error::AnalysisError;
use crate::field::IntensityField;
use crate::line::Line;

/// Candidate selection settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CandidateConfig {
    /// How many boundary points closest to the baseline the fallback considers.
    pub nearest_points: usize,
    /// x shift of the synthesized second candidate.
    pub duplicate_offset_px: f64,
}

impl Default for CandidateConfig {
    fn default() -> Self {
        Self {
            nearest_points: 200,
            duplicate_offset_px: 1.0,
        }
    }
}

impl CandidateConfig {
    /// Reject a non-finite duplicate offset.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.duplicate_offset_px.is_finite() {
            return Err(AnalysisError::InvalidConfig(format!(
                "candidates.duplicate_offset_px must be finite, got {}",
                self.duplicate_offset_px
            )));
        }
        Ok(())
    }
}

/// Side of the droplet a contact belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactSide {
    /// Smaller x.
    Left,
    /// Larger x.
    Right,
}

/// A contact point estimate and its side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactCandidate {
    /// Coarse contact position in image pixels.
    pub point: [f64; 2],
    /// Which side of the droplet the point belongs to.
    pub side: ContactSide,
}

/// Which step of the fallback chain produced the candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    /// Both points are ellipse ∩ baseline intersections inside the field.
    Intersection,
    /// x-extremes of the boundary points nearest the baseline.
    NearestBoundary,
    /// One intersection plus a copy shifted along x.
    Duplicated,
}

/// Left and right candidates, ordered by x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidatePair {
    /// Candidate with the smaller x.
    pub left: ContactCandidate,
    /// Candidate with the larger x.
    pub right: ContactCandidate,
    /// Fallback step that produced the pair.
    pub source: CandidateSource,
}

impl CandidatePair {
    fn from_points(a: [f64; 2], b: [f64; 2], source: CandidateSource) -> Self {
        let (l, r) = if b[0] < a[0] { (b, a) } else { (a, b) };
        Self {
            left: ContactCandidate {
                point: l,
                side: ContactSide::Left,
            },
            right: ContactCandidate {
                point: r,
                side: ContactSide::Right,
            },
            source,
        }
    }

    /// Left then right.
    pub fn iter(&self) -> impl Iterator<Item = &ContactCandidate> {
        [&self.left, &self.right].into_iter()
    }
}

/// Intersections of `ellipse` and `baseline` that lie inside `field`.
pub fn field_intersections(
    ellipse: &Ellipse,
    baseline: &Line,
    field: &IntensityField,
) -> Vec<[f64; 2]> {
    intersect_ellipse_line(ellipse, baseline)
        .into_iter()
        .filter(|&p| field.contains(p))
        .collect()
}

/// Minimum-x and maximum-x points among the `k` boundary points closest to
/// `baseline`.
///
/// Ties in distance keep boundary order; ties in x keep the first point.
pub fn nearest_boundary_extremes(
    boundary: &[[f64; 2]],
    baseline: &Line,
    k: usize,
) -> Result<([f64; 2], [f64; 2]), AnalysisError> {
    let mut by_dist: Vec<(f64, [f64; 2])> =
        boundary.iter().map(|&p| (baseline.distance(p), p)).collect();
    by_dist.sort_by(|a, b| a.0.total_cmp(&b.0));
    by_dist.truncate(k);
    if by_dist.len() < 2 {
        return Err(AnalysisError::DegenerateGeometry(
            "fewer than two boundary points near the baseline",
        ));
    }

    let mut left = by_dist[0].1;
    let mut right = by_dist[0].1;
    for &(_, p) in &by_dist[1..] {
        if p[0] < left[0] {
            left = p;
        }
        if p[0] > right[0] {
            right = p;
        }
    }
    Ok((left, right))
}

/// Run the candidate fallback chain.
pub fn find_candidates(
    ellipse: &Ellipse,
    baseline: &Line,
    boundary: &[[f64; 2]],
    field: &IntensityField,
    cfg: &CandidateConfig,
) -> Result<CandidatePair, AnalysisError> {
    let inters = field_intersections(ellipse, baseline, field);
    if inters.len() >= 2 {
        return Ok(CandidatePair::from_points(
            inters[0],
            inters[1],
            CandidateSource::Intersection,
        ));
    }

    match nearest_boundary_extremes(boundary, baseline, cfg.nearest_points) {
        Ok((l, r)) => {
            tracing::warn!(
                intersections = inters.len(),
                "baseline does not cut the ellipse twice inside the image; using nearest boundary points"
            );
            return Ok(CandidatePair::from_points(
                l,
                r,
                CandidateSource::NearestBoundary,
            ));
        }
        Err(e) => tracing::debug!("nearest-boundary fallback failed: {}", e),
    }

    match inters.as_slice() {
        [p] => {
            tracing::warn!("single contact candidate; duplicating it along x");
            let q = [p[0] + cfg.duplicate_offset_px, p[1]];
            Ok(CandidatePair::from_points(*p, q, CandidateSource::Duplicated))
        }
        _ => Err(AnalysisError::InsufficientData {
            stage: "contact candidates",
            needed: 1,
            got: inters.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::blank_field;
    use approx::assert_relative_eq;

    #[test]
    fn intersections_are_ordered_left_to_right() {
        let e = Ellipse::axis_aligned(100.0, 80.0, 40.0, 30.0);
        let pair = find_candidates(
            &e,
            &Line::horizontal(100.0),
            &[],
            &blank_field(200, 200),
            &CandidateConfig::default(),
        )
        .unwrap();
        assert_eq!(pair.source, CandidateSource::Intersection);
        assert!(pair.left.point[0] < pair.right.point[0]);
        assert_eq!(pair.left.side, ContactSide::Left);
        assert_eq!(pair.right.side, ContactSide::Right);
        assert_relative_eq!(pair.left.point[0] + pair.right.point[0], 200.0, epsilon = 1e-9);
    }

    #[test]
    fn intersections_outside_field_are_dropped() {
        let e = Ellipse::axis_aligned(10.0, 50.0, 30.0, 20.0);
        let pts = field_intersections(&e, &Line::horizontal(50.0), &blank_field(100, 100));
        assert_eq!(pts.len(), 1);
        assert_relative_eq!(pts[0][0], 40.0, epsilon = 1e-9);
    }

    #[test]
    fn missed_ellipse_uses_nearest_boundary() {
        let e = Ellipse::axis_aligned(50.0, 40.0, 20.0, 10.0);
        let boundary = vec![
            [30.0, 60.0],
            [45.0, 20.0],
            [70.0, 61.0],
            [55.0, 62.0],
            [10.0, 5.0],
        ];
        let cfg = CandidateConfig {
            nearest_points: 3,
            ..Default::default()
        };
        let field = blank_field(100, 100);
        let pair = find_candidates(&e, &Line::horizontal(61.0), &boundary, &field, &cfg).unwrap();
        assert_eq!(pair.source, CandidateSource::NearestBoundary);
        assert_eq!(pair.left.point, [30.0, 60.0]);
        assert_eq!(pair.right.point, [70.0, 61.0]);
    }

    #[test]
    fn single_intersection_is_duplicated() {
        let e = Ellipse::axis_aligned(10.0, 50.0, 30.0, 20.0);
        let cfg = CandidateConfig {
            nearest_points: 1,
            duplicate_offset_px: 1.0,
        };
        let field = blank_field(100, 100);
        let pair = find_candidates(&e, &Line::horizontal(50.0), &[[40.0, 50.0]], &field, &cfg)
            .unwrap();
        assert_eq!(pair.source, CandidateSource::Duplicated);
        assert_relative_eq!(pair.left.point[0], 40.0, epsilon = 1e-9);
        assert_relative_eq!(pair.right.point[0], 41.0, epsilon = 1e-9);
        assert_relative_eq!(pair.right.point[1], 50.0, epsilon = 1e-9);
    }

    #[test]
    fn nothing_usable_is_insufficient() {
        let e = Ellipse::axis_aligned(50.0, 40.0, 20.0, 10.0);
        let err = find_candidates(
            &e,
            &Line::horizontal(90.0),
            &[[1.0, 1.0]],
            &blank_field(100, 100),
            &CandidateConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { got: 0, .. }));
    }
}
