//! Ellipse / conic primitives.
//!
//! Implements:
//! - Conversion between general conic coefficients and geometric ellipse parameters.
//! - Analytic ellipse–line intersection for any rotation.
//! - Tangent slope from the implicit-function gradient.
//! - A coarse algebraic least-squares ellipse fit and a bounding-box fallback.

mod fit;
mod intersect;
mod tangent;
mod types;

pub use fit::{fit_conic_lstsq, fit_ellipse_lstsq, MIN_FIT_POINTS};
pub use intersect::intersect_ellipse_line;
pub use tangent::{implicit_gradient, tangent_slope};
pub use types::{conic_to_ellipse, ellipse_to_conic, ConicCoeffs, Ellipse};
