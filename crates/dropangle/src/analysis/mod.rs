//! Per-request analysis pipeline.
//!
//! Wires the geometric primitives into one run over a droplet silhouette:
//! coarse ellipse → baseline → contact candidates → sub-pixel refinement →
//! contact angles → confidence.
//!
//! Every degraded path is an explicit step of a typed fallback chain
//! ([`EllipseSource`], [`CandidateSource`], [`crate::refine::RefineOutcome`])
//! and is reported in the [`ContactAngleResult`]. Only missing geometry is
//! returned as an error.

mod baseline;
mod candidates;
mod confidence;
mod ellipse;
mod result;
mod run;

pub use baseline::{baseline_points, fit_baseline, percentile, BaselineConfig, BaselineFit};
pub use candidates::{
    field_intersections, find_candidates, nearest_boundary_extremes, CandidateConfig,
    CandidatePair, CandidateSource, ContactCandidate, ContactSide,
};
pub use confidence::{confidence, polygon_area, ConfidenceConfig};
pub use ellipse::{coarse_ellipse, EllipseSource};
pub use result::{BaselineReport, ContactAngleResult, ContactReport};
pub use run::refine_candidate;

pub(crate) use run::run;
