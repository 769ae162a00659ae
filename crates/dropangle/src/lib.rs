//! dropangle: contact-angle estimation for sessile droplets.
//!
//! Given a droplet silhouette (ordered boundary points) and a grayscale
//! intensity field, the pipeline stages are:
//!
//! 0. **Preprocess** – optional histogram equalization and Gaussian smoothing
//!    when the field is built from a decoded image ([`prepare_field`]).
//! 1. **Ellipse** – coarse ellipse: caller-supplied, direct least-squares
//!    fit, or bounding box.
//! 2. **Baseline** – RANSAC line fit to the lowest band of the silhouette.
//! 3. **Candidates** – analytic ellipse ∩ baseline, with nearest-boundary and
//!    duplication fallbacks.
//! 4. **Refine** – sub-pixel contact localisation along the tangent normal.
//! 5. **Angles** – baseline vs. ellipse tangent at each refined contact.
//!
//! # Public API
//! - [`ContactAngleAnalyzer`] as the primary entry point
//! - [`AnalysisConfig`] for tuning
//! - the geometric primitives in [`line`], [`conic`], [`refine`] and [`angle`]
//!
//! Image decoding and contour extraction are left to the caller.

pub mod analysis;
mod analyzer;
pub mod angle;
mod config;
pub mod conic;
mod error;
mod field;
pub mod line;
mod preprocess;
pub mod refine;

#[cfg(test)]
pub(crate) mod test_utils;

pub use analysis::{
    BaselineReport, CandidateSource, ContactAngleResult, ContactReport, ContactSide,
    EllipseSource,
};
pub use analyzer::ContactAngleAnalyzer;
pub use angle::AngleResult;
pub use config::AnalysisConfig;
pub use conic::Ellipse;
pub use error::AnalysisError;
pub use field::IntensityField;
pub use line::{Line, Slope};
pub use preprocess::{prepare_field, PreprocessConfig};
pub use refine::RefineOutcome;

/// Ellipse parameters for serialization (center + geometry).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EllipseParams {
    /// Center (x, y) in image pixel coordinates.
    pub center_xy: [f64; 2],
    /// Semi-axes [a, b] in pixels.
    pub semi_axes: [f64; 2],
    /// Rotation angle in radians.
    pub angle: f64,
}

impl From<Ellipse> for EllipseParams {
    fn from(e: Ellipse) -> Self {
        Self {
            center_xy: [e.cx, e.cy],
            semi_axes: [e.a, e.b],
            angle: e.angle,
        }
    }
}

impl From<EllipseParams> for Ellipse {
    fn from(p: EllipseParams) -> Self {
        Self {
            cx: p.center_xy[0],
            cy: p.center_xy[1],
            a: p.semi_axes[0].abs(),
            b: p.semi_axes[1].abs(),
            angle: p.angle,
        }
    }
}
