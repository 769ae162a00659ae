//! Analysis configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::{BaselineConfig, CandidateConfig, ConfidenceConfig};
use crate::angle::AngleConfig;
use crate::error::AnalysisError;
use crate::preprocess::PreprocessConfig;
use crate::refine::RefineConfig;

/// Top-level configuration for [`crate::ContactAngleAnalyzer`].
///
/// Every section has defaults, so a JSON file only needs the fields it
/// overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Image preprocessing used by [`crate::prepare_field`].
    pub preprocess: PreprocessConfig,
    /// Baseline point selection and RANSAC line fit.
    pub baseline: BaselineConfig,
    /// Contact candidate fallback chain.
    pub candidates: CandidateConfig,
    /// Normal-profile refinement.
    pub refine: RefineConfig,
    /// Angle calculator.
    pub angle: AngleConfig,
    /// Silhouette-area confidence.
    pub confidence: ConfidenceConfig,
}

impl AnalysisConfig {
    /// Load from a JSON file and validate.
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let data = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check parameter ranges across all sections.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.preprocess.validate()?;
        self.baseline.validate()?;
        self.candidates.validate()?;
        self.refine.validate()?;
        self.angle.validate()?;
        self.confidence.validate()?;
        Ok(())
    }
}
