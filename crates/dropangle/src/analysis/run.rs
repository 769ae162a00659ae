//! Top-level orchestrator: ellipse → baseline → candidates → refine → angles.

use rand::Rng;

use super::baseline::fit_baseline;
use super::candidates::{find_candidates, ContactCandidate};
use super::confidence::confidence;
use super::ellipse::coarse_ellipse;
use super::result::{BaselineReport, ContactAngleResult, ContactReport};
use crate::angle::contact_angles;
use crate::config::AnalysisConfig;
use crate::conic::{tangent_slope, Ellipse};
use crate::error::AnalysisError;
use crate::field::IntensityField;
use crate::line::Slope;
use crate::refine::{refine_contact, RefineConfig, RefineOutcome, RefinedContact};

/// Refine one candidate and evaluate the tangent at the refined point.
pub fn refine_candidate(
    candidate: &ContactCandidate,
    ellipse: &Ellipse,
    field: &IntensityField,
    cfg: &RefineConfig,
) -> (RefinedContact, Slope) {
    let coarse_tangent = tangent_slope(candidate.point, ellipse);
    let refined = refine_contact(
        candidate.point,
        coarse_tangent.unit_direction(),
        field,
        cfg,
    );
    match refined.outcome {
        RefineOutcome::Skipped => tracing::warn!(
            side = ?candidate.side,
            point = ?candidate.point,
            "contact refinement skipped"
        ),
        outcome => tracing::debug!(
            side = ?candidate.side,
            ?outcome,
            offset = refined.offset,
            "contact refined"
        ),
    }
    (refined, tangent_slope(refined.point, ellipse))
}

pub(crate) fn run<R: Rng + ?Sized>(
    boundary: &[[f64; 2]],
    field: &IntensityField,
    supplied: Option<Ellipse>,
    config: &AnalysisConfig,
    rng: &mut R,
) -> Result<ContactAngleResult, AnalysisError> {
    config.validate()?;

    let finite: Vec<[f64; 2]> = boundary
        .iter()
        .copied()
        .filter(|p| p[0].is_finite() && p[1].is_finite())
        .collect();
    if finite.len() != boundary.len() {
        tracing::warn!(
            dropped = boundary.len() - finite.len(),
            "ignoring non-finite boundary points"
        );
    }
    let boundary = finite.as_slice();

    let (ellipse, ellipse_source) = coarse_ellipse(boundary, supplied)?;
    let baseline = fit_baseline(boundary, &config.baseline, rng)?;
    let line = baseline.fit.line;

    let pair = find_candidates(
        &ellipse,
        &line,
        boundary,
        field,
        &config.candidates,
    )?;
    tracing::debug!(
        source = ?pair.source,
        left = ?pair.left.point,
        right = ?pair.right.point,
        "contact candidates"
    );

    let (left_ref, left_tangent) = refine_candidate(&pair.left, &ellipse, field, &config.refine);
    let (right_ref, right_tangent) =
        refine_candidate(&pair.right, &ellipse, field, &config.refine);

    let angles = contact_angles(
        &line,
        left_tangent,
        right_tangent,
        config.angle.vertical_slope_surrogate,
    );
    let confidence = confidence(boundary, field.width(), field.height(), &config.confidence);

    tracing::info!(
        left_deg = angles.left_deg,
        right_deg = angles.right_deg,
        mean_deg = angles.mean_deg,
        confidence,
        "contact angles"
    );

    let report = |c: &ContactCandidate, r: RefinedContact, tangent: Slope, angle_deg: f64| {
        ContactReport {
            side: c.side,
            approx: c.point,
            refined: r.point,
            offset_px: r.offset,
            refinement: r.outcome,
            tangent,
            angle_deg,
        }
    };

    Ok(ContactAngleResult {
        left: report(&pair.left, left_ref, left_tangent, angles.left_deg),
        right: report(&pair.right, right_ref, right_tangent, angles.right_deg),
        baseline: BaselineReport {
            line,
            num_inliers: baseline.fit.num_inliers,
            n_points: baseline.n_points,
            method: baseline.fit.method,
        },
        ellipse: ellipse.into(),
        ellipse_source,
        candidate_source: pair.source,
        angles,
        confidence,
        image_size: [field.width(), field.height()],
    })
}
