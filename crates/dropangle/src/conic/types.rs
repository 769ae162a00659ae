//! Ellipse and general-conic types with conversions.

use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// General conic: A x² + B xy + C y² + D x + E y + F = 0
/// Stored as [A, B, C, D, E, F].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConicCoeffs(pub [f64; 6]);

/// Geometric ellipse in image pixel coordinates.
///
/// `a` is the semi-axis along the rotated x axis and `b` the semi-axis along
/// the rotated y axis; neither is required to be the larger one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    /// Center x.
    pub cx: f64,
    /// Center y.
    pub cy: f64,
    /// Semi-axis along the ellipse's own x axis.
    pub a: f64,
    /// Semi-axis along the ellipse's own y axis.
    pub b: f64,
    /// Rotation of the ellipse's x axis from image +x, in radians.
    pub angle: f64,
}

impl ConicCoeffs {
    /// Algebraic distance of a point (x, y) to this conic.
    pub fn algebraic_distance(&self, x: f64, y: f64) -> f64 {
        let [a, b, c, d, e, f] = self.0;
        a * x * x + b * x * y + c * y * y + d * x + e * y + f
    }

    /// Check whether the conic represents an ellipse (discriminant B²−4AC < 0).
    pub fn is_ellipse(&self) -> bool {
        let [a, b, c, ..] = self.0;
        b * b - 4.0 * a * c < 0.0
    }

    /// Convert to geometric ellipse parameters.
    /// Returns `None` if the conic is not a proper ellipse.
    pub fn to_ellipse(self) -> Option<Ellipse> {
        conic_to_ellipse(&self)
    }
}

impl Ellipse {
    /// Construct an axis-aligned ellipse.
    pub fn axis_aligned(cx: f64, cy: f64, a: f64, b: f64) -> Self {
        Self {
            cx,
            cy,
            a,
            b,
            angle: 0.0,
        }
    }

    /// Ellipse inscribed in the bounding box of `points`, unrotated.
    ///
    /// Points are pixel centres, so each half-extent is padded by half a pixel
    /// (a single column still yields `a = 0.5`). Returns `None` for an empty
    /// or non-finite point set.
    pub fn from_bounding_box(points: &[[f64; 2]]) -> Option<Self> {
        let first = points.first()?;
        let (mut x0, mut y0, mut x1, mut y1) = (first[0], first[1], first[0], first[1]);
        for p in &points[1..] {
            x0 = x0.min(p[0]);
            y0 = y0.min(p[1]);
            x1 = x1.max(p[0]);
            y1 = y1.max(p[1]);
        }
        let e = Self::axis_aligned(
            0.5 * (x0 + x1),
            0.5 * (y0 + y1),
            0.5 * (x1 - x0) + 0.5,
            0.5 * (y1 - y0) + 0.5,
        );
        e.is_valid().then_some(e)
    }

    /// Check basic validity: positive semi-axes, finite values.
    pub fn is_valid(&self) -> bool {
        self.a > 0.0
            && self.b > 0.0
            && self.a.is_finite()
            && self.b.is_finite()
            && self.cx.is_finite()
            && self.cy.is_finite()
            && self.angle.is_finite()
    }

    /// Map an image point into the ellipse frame (centred, unrotated).
    #[inline]
    pub fn to_local(&self, p: [f64; 2]) -> [f64; 2] {
        self.rotate_to_local([p[0] - self.cx, p[1] - self.cy])
    }

    /// Rotate a vector from image axes into the ellipse frame.
    #[inline]
    pub fn rotate_to_local(&self, v: [f64; 2]) -> [f64; 2] {
        let (s, c) = self.angle.sin_cos();
        [c * v[0] + s * v[1], -s * v[0] + c * v[1]]
    }

    /// Rotate a vector from the ellipse frame back to image axes.
    #[inline]
    pub fn rotate_to_image(&self, v: [f64; 2]) -> [f64; 2] {
        let (s, c) = self.angle.sin_cos();
        [c * v[0] - s * v[1], s * v[0] + c * v[1]]
    }

    /// Implicit function `F(p) = x'²/a² + y'²/b² − 1` (zero on the boundary).
    pub fn implicit(&self, p: [f64; 2]) -> f64 {
        let [xr, yr] = self.to_local(p);
        xr * xr / (self.a * self.a) + yr * yr / (self.b * self.b) - 1.0
    }

    /// Convert to general conic coefficients.
    pub fn to_conic(self) -> ConicCoeffs {
        ellipse_to_conic(&self)
    }

    /// Sample `n` points on the ellipse boundary.
    pub fn sample_points(&self, n: usize) -> Vec<[f64; 2]> {
        (0..n)
            .map(|i| {
                let t = 2.0 * std::f64::consts::PI * (i as f64) / (n as f64);
                self.point_at(t)
            })
            .collect()
    }

    /// Boundary point at parametric angle `t`.
    pub fn point_at(&self, t: f64) -> [f64; 2] {
        let v = self.rotate_to_image([self.a * t.cos(), self.b * t.sin()]);
        [self.cx + v[0], self.cy + v[1]]
    }
}

/// Convert general conic coefficients to geometric ellipse parameters.
///
/// The returned ellipse is canonicalized with `a ≥ b` and angle in (−π/2, π/2].
/// Returns `None` if the conic does not represent a proper ellipse.
pub fn conic_to_ellipse(c: &ConicCoeffs) -> Option<Ellipse> {
    let [a, b, c_coeff, d, e, f] = c.0;

    let disc = b * b - 4.0 * a * c_coeff;
    if !disc.is_finite() || disc >= 0.0 {
        return None;
    }

    let m = Matrix3::new(
        a,
        b / 2.0,
        d / 2.0,
        b / 2.0,
        c_coeff,
        e / 2.0,
        d / 2.0,
        e / 2.0,
        f,
    );
    if m.determinant().abs() < 1e-15 {
        return None;
    }

    // Center: gradient of the conic vanishes.
    let denom = -disc;
    let cx = (b * e - 2.0 * c_coeff * d) / denom;
    let cy = (b * d - 2.0 * a * e) / denom;

    let angle = if (a - c_coeff).abs() < 1e-15 {
        if b > 0.0 {
            std::f64::consts::FRAC_PI_4
        } else if b < 0.0 {
            -std::f64::consts::FRAC_PI_4
        } else {
            0.0
        }
    } else {
        0.5 * b.atan2(a - c_coeff)
    };

    // Eigenvalues of the quadratic part give the squared inverse semi-axes.
    let sum = a + c_coeff;
    let diff = ((a - c_coeff).powi(2) + b * b).sqrt();
    let lambda1 = (sum + diff) / 2.0;
    let lambda2 = (sum - diff) / 2.0;

    let f_center = c.algebraic_distance(cx, cy);
    if f_center.abs() < 1e-15 {
        return None;
    }

    let a_sq = -f_center / lambda1;
    let b_sq = -f_center / lambda2;
    if a_sq <= 0.0 || b_sq <= 0.0 {
        return None;
    }

    let (semi_a, semi_b, angle) = if a_sq >= b_sq {
        (a_sq.sqrt(), b_sq.sqrt(), angle)
    } else {
        (b_sq.sqrt(), a_sq.sqrt(), angle + std::f64::consts::FRAC_PI_2)
    };

    let e = Ellipse {
        cx,
        cy,
        a: semi_a,
        b: semi_b,
        angle: normalize_angle(angle),
    };
    e.is_valid().then_some(e)
}

/// Convert geometric ellipse parameters to general conic coefficients.
pub fn ellipse_to_conic(e: &Ellipse) -> ConicCoeffs {
    let (sin_a, cos_a) = e.angle.sin_cos();
    let a2 = e.a * e.a;
    let b2 = e.b * e.b;

    let ca = cos_a * cos_a / a2 + sin_a * sin_a / b2;
    let cb = 2.0 * cos_a * sin_a * (1.0 / a2 - 1.0 / b2);
    let cc = sin_a * sin_a / a2 + cos_a * cos_a / b2;
    let cd = -2.0 * ca * e.cx - cb * e.cy;
    let ce = -cb * e.cx - 2.0 * cc * e.cy;
    let cf = ca * e.cx * e.cx + cb * e.cx * e.cy + cc * e.cy * e.cy - 1.0;

    ConicCoeffs([ca, cb, cc, cd, ce, cf])
}

/// Normalize angle to (−π/2, π/2].
fn normalize_angle(mut angle: f64) -> f64 {
    use std::f64::consts::{FRAC_PI_2, PI};
    while angle > FRAC_PI_2 {
        angle -= PI;
    }
    while angle <= -FRAC_PI_2 {
        angle += PI;
    }
    angle
}
