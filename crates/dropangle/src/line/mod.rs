//! Line primitives and robust baseline fitting.
//!
//! Implements:
//! - `Line` / `Slope` tagged representations (vertical is a variant, not `∞`).
//! - Unit-normal `NormalLine` used internally for distances.
//! - Two-point RANSAC with an injectable RNG and a total-least-squares fallback.

mod fit;
mod ransac;
mod types;

pub use fit::fit_line_tls;
pub use ransac::{
    fit_line_ransac, fit_line_ransac_seeded, LineFit, LineFitMethod, LineRansacConfig,
};
pub use types::{Line, NormalLine, Slope, VERTICAL_EPS};
