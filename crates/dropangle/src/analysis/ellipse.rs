//! Coarse ellipse: supplied → direct least-squares fit → bounding box.

use serde::{Deserialize, Serialize};

use crate::conic::{fit_ellipse_lstsq, Ellipse};
use crate::error::AnalysisError;

/// Which step of the fallback chain produced the coarse ellipse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EllipseSource {
    /// Valid ellipse passed in by the caller.
    Supplied,
    /// Algebraic least-squares fit to the boundary.
    DirectFit,
    /// Unrotated ellipse inscribed in the boundary's bounding box.
    BoundingBox,
}

/// Resolve the coarse ellipse for an analysis.
pub fn coarse_ellipse(
    boundary: &[[f64; 2]],
    supplied: Option<Ellipse>,
) -> Result<(Ellipse, EllipseSource), AnalysisError> {
    if let Some(e) = supplied {
        if e.is_valid() {
            return Ok((e, EllipseSource::Supplied));
        }
        tracing::warn!(?e, "supplied ellipse is invalid; fitting boundary instead");
    }

    if let Some(e) = fit_ellipse_lstsq(boundary).filter(Ellipse::is_valid) {
        tracing::debug!(
            cx = e.cx,
            cy = e.cy,
            a = e.a,
            b = e.b,
            angle = e.angle,
            "direct ellipse fit"
        );
        return Ok((e, EllipseSource::DirectFit));
    }

    match Ellipse::from_bounding_box(boundary) {
        Some(e) => {
            tracing::warn!(
                n = boundary.len(),
                "ellipse fit failed; using bounding-box ellipse"
            );
            Ok((e, EllipseSource::BoundingBox))
        }
        None => Err(AnalysisError::InsufficientData {
            stage: "coarse ellipse",
            needed: 1,
            got: boundary.len(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn valid_supplied_ellipse_wins() {
        let e = Ellipse::axis_aligned(10.0, 10.0, 3.0, 2.0);
        let other = Ellipse::axis_aligned(50.0, 40.0, 20.0, 10.0).sample_points(40);
        let (got, src) = coarse_ellipse(&other, Some(e)).unwrap();
        assert_eq!(src, EllipseSource::Supplied);
        assert_eq!(got, e);
    }

    #[test]
    fn invalid_supplied_ellipse_falls_back_to_fit() {
        let truth = Ellipse::axis_aligned(50.0, 40.0, 20.0, 10.0);
        let bad = Ellipse::axis_aligned(0.0, 0.0, -1.0, 2.0);
        let (got, src) = coarse_ellipse(&truth.sample_points(40), Some(bad)).unwrap();
        assert_eq!(src, EllipseSource::DirectFit);
        assert_relative_eq!(got.cx, 50.0, epsilon = 1e-6);
        assert_relative_eq!(got.a, 20.0, epsilon = 1e-6);
    }

    #[test]
    fn collinear_boundary_uses_bounding_box() {
        let pts: Vec<[f64; 2]> = (0..10).map(|i| [10.0 + i as f64, 30.0]).collect();
        let (got, src) = coarse_ellipse(&pts, None).unwrap();
        assert_eq!(src, EllipseSource::BoundingBox);
        assert_relative_eq!(got.cx, 14.5);
        assert_relative_eq!(got.cy, 30.0);
        assert_relative_eq!(got.a, 5.0);
        assert_relative_eq!(got.b, 0.5);
        assert_eq!(got.angle, 0.0);
    }

    #[test]
    fn empty_boundary_is_insufficient() {
        assert!(matches!(
            coarse_ellipse(&[], None),
            Err(AnalysisError::InsufficientData { .. })
        ));
    }
}
