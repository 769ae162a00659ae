//! Coarse algebraic least-squares ellipse fit.

use nalgebra::{DMatrix, DVector};

use super::types::{ConicCoeffs, Ellipse};

/// Minimum number of points for the five-parameter conic fit.
pub const MIN_FIT_POINTS: usize = 5;

/// Fit `A x² + B xy + C y² + D x + E y = 1` in normalized coordinates.
///
/// Points are shifted to their centroid and scaled so the mean distance to
/// it is √2; the solution is mapped back to image coordinates. Returns
/// `None` for too few points, a rank-deficient system, or a non-ellipse.
pub fn fit_conic_lstsq(points: &[[f64; 2]]) -> Option<ConicCoeffs> {
    let n = points.len();
    if n < MIN_FIT_POINTS {
        return None;
    }

    let (mx, my, s) = normalization_params(points);

    let mut design = DMatrix::<f64>::zeros(n, 5);
    for (i, p) in points.iter().enumerate() {
        let x = (p[0] - mx) * s;
        let y = (p[1] - my) * s;
        design[(i, 0)] = x * x;
        design[(i, 1)] = x * y;
        design[(i, 2)] = y * y;
        design[(i, 3)] = x;
        design[(i, 4)] = y;
    }
    let rhs = DVector::<f64>::from_element(n, 1.0);

    let svd = design.svd(true, true);
    let sv_max = svd.singular_values.max();
    if !(sv_max.is_finite() && sv_max > 0.0) || svd.singular_values.min() <= sv_max * 1e-12 {
        return None;
    }
    let sol = svd.solve(&rhs, 1e-12).ok()?;
    let (qa, qb, qc, qd, qe) = (sol[0], sol[1], sol[2], sol[3], sol[4]);

    // Substitute x_n = s (x − mx), y_n = s (y − my).
    let s2 = s * s;
    let a = qa * s2;
    let b = qb * s2;
    let c = qc * s2;
    let d = -2.0 * a * mx - b * my + qd * s;
    let e = -b * mx - 2.0 * c * my + qe * s;
    let f = a * mx * mx + b * mx * my + c * my * my - qd * s * mx - qe * s * my - 1.0;

    let conic = ConicCoeffs([a, b, c, d, e, f]);
    conic.is_ellipse().then_some(conic)
}

/// Fit an ellipse and return geometric parameters.
pub fn fit_ellipse_lstsq(points: &[[f64; 2]]) -> Option<Ellipse> {
    fit_conic_lstsq(points)?.to_ellipse()
}

/// Returns (mean_x, mean_y, scale).
fn normalization_params(points: &[[f64; 2]]) -> (f64, f64, f64) {
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p[0]).sum::<f64>() / n;
    let my = points.iter().map(|p| p[1]).sum::<f64>() / n;
    let mean_dist = points
        .iter()
        .map(|p| (p[0] - mx).hypot(p[1] - my))
        .sum::<f64>()
        / n;
    let scale = if mean_dist > 1e-15 {
        std::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    (mx, my, scale)
}
