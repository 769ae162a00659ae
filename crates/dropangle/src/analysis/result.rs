use serde::{Deserialize, Serialize};

use super::{CandidateSource, ContactSide, EllipseSource};
use crate::angle::AngleResult;
use crate::line::{Line, LineFitMethod, Slope};
use crate::refine::RefineOutcome;
use crate::EllipseParams;

/// One contact point, before and after refinement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContactReport {
    /// Left or right contact.
    pub side: ContactSide,
    /// Candidate from the fallback chain, before refinement.
    pub approx: [f64; 2],
    /// Refined contact point.
    pub refined: [f64; 2],
    /// Signed displacement along the tangent normal, in pixels.
    pub offset_px: f64,
    /// How the refinement step ended.
    pub refinement: RefineOutcome,
    /// Ellipse tangent slope at the refined point.
    pub tangent: Slope,
    /// Contact angle on this side, in degrees.
    pub angle_deg: f64,
}

/// Fitted baseline and its support.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineReport {
    /// Fitted substrate line.
    pub line: Line,
    /// Points within the inlier threshold of `line`.
    pub num_inliers: usize,
    /// Points passed to the fit.
    pub n_points: usize,
    /// Estimator that produced `line`.
    pub method: LineFitMethod,
}

/// Full contact-angle result for a single droplet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactAngleResult {
    /// Contact with the smaller x.
    pub left: ContactReport,
    /// Contact with the larger x.
    pub right: ContactReport,
    /// Substrate line fit.
    pub baseline: BaselineReport,
    /// Coarse ellipse used for intersection and tangents.
    pub ellipse: EllipseParams,
    /// Where the coarse ellipse came from.
    pub ellipse_source: EllipseSource,
    /// Which candidate fallback step produced the contacts.
    pub candidate_source: CandidateSource,
    /// Contact angles in degrees.
    pub angles: AngleResult,
    /// Silhouette-size confidence in `[0, 1]`.
    pub confidence: f64,
    /// Field dimensions [width, height].
    pub image_size: [usize; 2],
}

impl ContactAngleResult {
    /// `true` when any stage fell back from its primary method.
    pub fn is_degraded(&self) -> bool {
        self.ellipse_source == EllipseSource::BoundingBox
            || self.candidate_source != CandidateSource::Intersection
            || self.baseline.method != LineFitMethod::Ransac
            || [self.left.refinement, self.right.refinement]
                .iter()
                .any(|o| matches!(o, RefineOutcome::Skipped))
    }
}
