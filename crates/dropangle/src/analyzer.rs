//! High-level analysis API.
//!
//! [`ContactAngleAnalyzer`] is the primary entry point. It wraps an
//! [`AnalysisConfig`] and runs the full pipeline on one droplet per call.

use rand::prelude::*;

use crate::analysis::ContactAngleResult;
use crate::config::AnalysisConfig;
use crate::conic::Ellipse;
use crate::error::AnalysisError;
use crate::field::IntensityField;

/// Primary analysis interface.
///
/// Create once, analyze many droplets. Holds no per-request state; each call
/// owns its random source.
///
/// # Examples
///
/// ```no_run
/// use dropangle::{ContactAngleAnalyzer, IntensityField};
///
/// let field = IntensityField::new(640, 480, vec![0.0; 640 * 480]).unwrap();
/// let boundary: Vec<[f64; 2]> = Vec::new();
/// let analyzer = ContactAngleAnalyzer::new();
/// match analyzer.analyze(&boundary, &field, None) {
///     Ok(r) => println!("mean angle {:.2}°", r.angles.mean_deg),
///     Err(e) => eprintln!("{}", e),
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct ContactAngleAnalyzer {
    config: AnalysisConfig,
}

impl ContactAngleAnalyzer {
    /// Create an analyzer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with full config control.
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Access the current configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Mutable access to configuration for post-construction tuning.
    pub fn config_mut(&mut self) -> &mut AnalysisConfig {
        &mut self.config
    }

    /// Analyze one droplet with a request-local RNG seeded from
    /// `config.baseline.ransac.seed`.
    ///
    /// `ellipse` is the caller's coarse ellipse; `None` (or an invalid one)
    /// triggers the direct-fit / bounding-box fallback.
    pub fn analyze(
        &self,
        boundary: &[[f64; 2]],
        field: &IntensityField,
        ellipse: Option<Ellipse>,
    ) -> Result<ContactAngleResult, AnalysisError> {
        let mut rng = StdRng::seed_from_u64(self.config.baseline.ransac.seed);
        self.analyze_with_rng(boundary, field, ellipse, &mut rng)
    }

    /// Analyze one droplet with an explicit random source.
    pub fn analyze_with_rng<R: Rng + ?Sized>(
        &self,
        boundary: &[[f64; 2]],
        field: &IntensityField,
        ellipse: Option<Ellipse>,
        rng: &mut R,
    ) -> Result<ContactAngleResult, AnalysisError> {
        crate::analysis::run(boundary, field, ellipse, &self.config, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{CandidateSource, EllipseSource};
    use crate::line::{Line, LineFitMethod};
    use crate::test_utils::{droplet_boundary, droplet_field};
    use approx::assert_relative_eq;

    fn droplet() -> (Ellipse, Vec<[f64; 2]>, IntensityField) {
        let e = Ellipse::axis_aligned(100.0, 80.0, 40.0, 30.0);
        let boundary = droplet_boundary(&e, 100.0, 240, 1.0);
        let field = droplet_field(201, 160, &e, 100.0);
        (e, boundary, field)
    }

    fn tight_analyzer() -> ContactAngleAnalyzer {
        let mut analyzer = ContactAngleAnalyzer::new();
        analyzer.config_mut().baseline.ransac.inlier_threshold = 0.5;
        analyzer
    }

    #[test]
    fn symmetric_droplet_end_to_end() {
        let (e, boundary, field) = droplet();
        let r = tight_analyzer()
            .analyze(&boundary, &field, Some(e))
            .unwrap();

        assert_eq!(r.ellipse_source, EllipseSource::Supplied);
        assert_eq!(r.candidate_source, CandidateSource::Intersection);
        assert_eq!(r.baseline.method, LineFitMethod::Ransac);
        let Line::Sloped { slope, intercept } = r.baseline.line else {
            panic!("baseline should be sloped");
        };
        assert_relative_eq!(slope, 0.0, epsilon = 1e-12);
        assert_relative_eq!(intercept, 100.0, epsilon = 1e-9);

        assert!(r.left.refined[0] < r.right.refined[0]);
        assert_relative_eq!(r.angles.left_deg, r.angles.right_deg, epsilon = 1e-6);
        assert_relative_eq!(r.left.angle_deg, r.angles.left_deg);
        assert!((0.0..=1.0).contains(&r.confidence));
        assert_eq!(r.image_size, [201, 160]);
        assert!(!r.is_degraded());
    }

    #[test]
    fn fitted_ellipse_stays_symmetric() {
        let (_, boundary, field) = droplet();
        let r = tight_analyzer().analyze(&boundary, &field, None).unwrap();
        assert_ne!(r.ellipse_source, EllipseSource::Supplied);
        assert!(r.angles.left_deg.is_finite() && r.angles.right_deg.is_finite());
        assert!((r.angles.left_deg - r.angles.right_deg).abs() < 0.5);
    }

    #[test]
    fn same_seed_same_result() {
        let (e, boundary, field) = droplet();
        let analyzer = ContactAngleAnalyzer::new();
        let a = analyzer.analyze(&boundary, &field, Some(e)).unwrap();
        let b = analyzer.analyze(&boundary, &field, Some(e)).unwrap();
        assert_eq!(a.angles, b.angles);
        assert_eq!(a.baseline, b.baseline);

        let mut rng = StdRng::seed_from_u64(analyzer.config().baseline.ransac.seed);
        let c = analyzer
            .analyze_with_rng(&boundary, &field, Some(e), &mut rng)
            .unwrap();
        assert_eq!(a.angles, c.angles);
    }

    #[test]
    fn non_finite_boundary_points_are_ignored() {
        let (e, boundary, field) = droplet();
        let mut noisy = Vec::with_capacity(boundary.len() + 8);
        for (i, &p) in boundary.iter().enumerate() {
            noisy.push(p);
            if i % 40 == 0 {
                noisy.push([f64::NAN, p[1]]);
                noisy.push([p[0], f64::INFINITY]);
            }
        }
        noisy.push([f64::NEG_INFINITY, 100.0]);

        let analyzer = tight_analyzer();
        for supplied in [Some(e), None] {
            let clean = analyzer.analyze(&boundary, &field, supplied).unwrap();
            let r = analyzer.analyze(&noisy, &field, supplied).unwrap();
            assert!(r.angles.left_deg.is_finite());
            assert!(r.angles.right_deg.is_finite());
            assert!(r.confidence.is_finite());
            assert_eq!(r.angles, clean.angles);
            assert_eq!(r.baseline, clean.baseline);
            assert_eq!(r.ellipse_source, clean.ellipse_source);
        }
    }

    #[test]
    fn missing_geometry_is_an_error() {
        let (_, _, field) = droplet();
        let err = ContactAngleAnalyzer::new()
            .analyze(&[[5.0, 5.0]], &field, None)
            .unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let (e, boundary, field) = droplet();
        let mut analyzer = ContactAngleAnalyzer::new();
        analyzer.config_mut().refine.spacing = 0.0;
        assert!(matches!(
            analyzer.analyze(&boundary, &field, Some(e)),
            Err(AnalysisError::InvalidConfig(_))
        ));
    }

    #[test]
    fn result_serializes_to_json() {
        let (e, boundary, field) = droplet();
        let r = ContactAngleAnalyzer::new()
            .analyze(&boundary, &field, Some(e))
            .unwrap();
        let json = serde_json::to_string(&r).unwrap();
        assert!(json.contains("\"candidate_source\":\"intersection\""));
        let back: ContactAngleResult = serde_json::from_str(&json).unwrap();
        assert_relative_eq!(back.angles.mean_deg, r.angles.mean_deg, epsilon = 1e-9);
        assert_eq!(back.left.refinement, r.left.refinement);
    }
}
