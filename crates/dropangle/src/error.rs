//! Error taxonomy for the contact-angle engine.

/// Errors produced by the estimation stages.
///
/// Only [`AnalysisError::InsufficientData`] (and input validation errors) ever
/// escape a full analysis. `DegenerateGeometry` and `NumericUnderflow` are
/// produced by individual stages and consumed by the fallback chain.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Too little usable geometry for the requested stage.
    InsufficientData {
        /// Stage that rejected the input.
        stage: &'static str,
        /// Required minimum number of items.
        needed: usize,
        /// Provided number of items.
        got: usize,
    },
    /// The geometry has no usable solution (e.g. line misses the ellipse).
    DegenerateGeometry(&'static str),
    /// A finite-difference or parabola denominator is too small to trust.
    NumericUnderflow {
        /// The rejected denominator.
        denominator: f64,
    },
    /// Intensity buffer does not match its declared dimensions.
    InvalidField {
        /// Declared width.
        width: usize,
        /// Declared height.
        height: usize,
        /// Actual buffer length.
        len: usize,
    },
    /// Configuration rejected by validation.
    InvalidConfig(String),
}

impl std::fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientData { stage, needed, got } => {
                write!(f, "{}: insufficient data, need {}, got {}", stage, needed, got)
            }
            Self::DegenerateGeometry(what) => write!(f, "degenerate geometry: {}", what),
            Self::NumericUnderflow { denominator } => {
                write!(f, "numeric underflow: denominator {:e}", denominator)
            }
            Self::InvalidField { width, height, len } => write!(
                f,
                "invalid intensity field: {}x{} needs {} samples, got {}",
                width,
                height,
                width.saturating_mul(*height),
                len
            ),
            Self::InvalidConfig(msg) => write!(f, "invalid config: {}", msg),
        }
    }
}

impl std::error::Error for AnalysisError {}
