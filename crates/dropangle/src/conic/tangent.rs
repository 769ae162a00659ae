//! Tangent slope of an ellipse from its implicit-function gradient.

use super::types::Ellipse;
use crate::line::Slope;

const VERTICAL_GRADIENT_EPS: f64 = 1e-12;

/// Gradient of the ellipse's implicit function at `p`, in image axes.
///
/// The point does not need to lie on the ellipse.
pub fn implicit_gradient(p: [f64; 2], ellipse: &Ellipse) -> [f64; 2] {
    let [xr, yr] = ellipse.to_local(p);
    let local = [
        2.0 * xr / (ellipse.a * ellipse.a),
        2.0 * yr / (ellipse.b * ellipse.b),
    ];
    ellipse.rotate_to_image(local)
}

/// Tangent slope `−(∂F/∂x)/(∂F/∂y)` of the level curve of the ellipse's
/// implicit function through `p`.
///
/// Returns [`Slope::Vertical`] when `∂F/∂y` vanishes.
pub fn tangent_slope(p: [f64; 2], ellipse: &Ellipse) -> Slope {
    let [fx, fy] = implicit_gradient(p, ellipse);
    if fy.abs() < VERTICAL_GRADIENT_EPS {
        return Slope::Vertical;
    }
    Slope::from_f64(-fx / fy)
}
