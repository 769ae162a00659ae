//! Intensity profiles sampled along a normal, and peak helpers.

use crate::error::AnalysisError;
use crate::field::IntensityField;

/// Below this `|denominator|` the parabola through three derivative samples
/// is treated as flat.
pub const PARABOLA_DENOM_EPS: f64 = 1e-8;

/// Intensities sampled at signed offsets along a direction.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalProfile {
    /// Signed offsets from the centre point, in pixels.
    pub offsets: Vec<f64>,
    /// Sampled intensities, one per offset.
    pub values: Vec<f64>,
}

impl NormalProfile {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no samples were taken.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Sample `len` values centred on `p` along unit `normal`, `spacing` px apart.
///
/// Offsets run from `-(len/2)·spacing` to `+(len/2)·spacing`.
pub fn sample_along_normal(
    field: &IntensityField,
    p: [f64; 2],
    normal: [f64; 2],
    len: usize,
    spacing: f64,
) -> NormalProfile {
    let half = (len / 2) as f64;
    let mut offsets = Vec::with_capacity(len);
    let mut values = Vec::with_capacity(len);
    for i in 0..len {
        let t = (i as f64 - half) * spacing;
        values.push(field.sample(p[0] + normal[0] * t, p[1] + normal[1] * t));
        offsets.push(t);
    }
    NormalProfile { offsets, values }
}

/// Central difference `(v[i+1] − v[i−1]) / 2` per sample.
///
/// The two end samples have no central difference and are set to zero.
pub fn central_derivative_into(values: &[f64], out: &mut [f64]) {
    let n = values.len();
    debug_assert_eq!(out.len(), n);
    out.iter_mut().for_each(|v| *v = 0.0);
    if n < 3 {
        return;
    }
    for i in 1..n - 1 {
        out[i] = 0.5 * (values[i + 1] - values[i - 1]);
    }
}

/// Index of the largest `|derivative|` among the interior samples.
///
/// The first maximum wins on ties. Returns `None` for fewer than three
/// samples or when the interior derivative is identically zero.
pub fn strongest_transition(derivative: &[f64]) -> Option<usize> {
    let n = derivative.len();
    if n < 3 {
        return None;
    }
    let mut best = 1usize;
    let mut best_abs = derivative[1].abs();
    for (i, d) in derivative.iter().enumerate().take(n - 1).skip(2) {
        if d.abs() > best_abs {
            best = i;
            best_abs = d.abs();
        }
    }
    (best_abs > 1e-12).then_some(best)
}

/// Vertex of the parabola through `(−1, y1)`, `(0, y2)`, `(1, y3)`.
///
/// The result is clamped to `[−1, 1]`.
pub fn parabolic_vertex(y1: f64, y2: f64, y3: f64) -> Result<f64, AnalysisError> {
    let denominator = 2.0 * (y1 - 2.0 * y2 + y3);
    if denominator.is_nan() || denominator.abs() < PARABOLA_DENOM_EPS {
        return Err(AnalysisError::NumericUnderflow { denominator });
    }
    Ok(((y1 - y3) / denominator).clamp(-1.0, 1.0))
}
