//! Analytic ellipse–line intersection.

use super::types::Ellipse;
use crate::line::Line;

const DEGENERATE_COEFF: f64 = 1e-12;

/// Intersect an ellipse with a line.
///
/// The line is parametrized (by x for sloped lines, by y for vertical ones)
/// and substituted into the ellipse's rotated implicit form, giving
/// `A t² + B t + C = 0`. Points are rebuilt from the line parametrization,
/// so they lie exactly on the line.
///
/// Returns 0, 1 or 2 points. A tangent line yields two numerically identical
/// points; they are not collapsed.
pub fn intersect_ellipse_line(ellipse: &Ellipse, line: &Line) -> Vec<[f64; 2]> {
    let (p0, dir) = line.parametrization();
    let u0 = ellipse.to_local(p0);
    let ud = ellipse.rotate_to_local(dir);

    let inv_a2 = 1.0 / (ellipse.a * ellipse.a);
    let inv_b2 = 1.0 / (ellipse.b * ellipse.b);

    let qa = ud[0] * ud[0] * inv_a2 + ud[1] * ud[1] * inv_b2;
    let qb = 2.0 * (u0[0] * ud[0] * inv_a2 + u0[1] * ud[1] * inv_b2);
    let qc = u0[0] * u0[0] * inv_a2 + u0[1] * u0[1] * inv_b2 - 1.0;

    let at = |t: f64| [p0[0] + t * dir[0], p0[1] + t * dir[1]];

    if qa.abs() < DEGENERATE_COEFF {
        if qb.abs() < DEGENERATE_COEFF {
            return Vec::new();
        }
        return vec![at(-qc / qb)];
    }

    let disc = qb * qb - 4.0 * qa * qc;
    if !disc.is_finite() || disc < 0.0 {
        return Vec::new();
    }
    let sq = disc.sqrt();
    vec![at((-qb + sq) / (2.0 * qa)), at((-qb - sq) / (2.0 * qa))]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sorted_by_x(mut pts: Vec<[f64; 2]>) -> Vec<[f64; 2]> {
        pts.sort_by(|a, b| a[0].total_cmp(&b[0]));
        pts
    }

    #[test]
    fn horizontal_axis_hits_vertices() {
        let e = Ellipse::axis_aligned(0.0, 0.0, 10.0, 5.0);
        let pts = sorted_by_x(intersect_ellipse_line(&e, &Line::horizontal(0.0)));
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0][0], -10.0, epsilon = 1e-9);
        assert_relative_eq!(pts[0][1], 0.0, epsilon = 1e-12);
        assert_relative_eq!(pts[1][0], 10.0, epsilon = 1e-9);
        assert_relative_eq!(pts[1][1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn distant_line_misses() {
        let e = Ellipse::axis_aligned(0.0, 0.0, 10.0, 5.0);
        assert!(intersect_ellipse_line(&e, &Line::horizontal(100.0)).is_empty());
    }

    #[test]
    fn tangent_line_gives_two_identical_points() {
        let e = Ellipse::axis_aligned(0.0, 0.0, 10.0, 5.0);
        let pts = intersect_ellipse_line(&e, &Line::horizontal(5.0));
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0][0], pts[1][0], epsilon = 1e-6);
        assert_relative_eq!(pts[0][0], 0.0, epsilon = 1e-6);
    }

    #[test]
    fn vertical_line_is_solved_in_y() {
        let e = Ellipse::axis_aligned(50.0, 40.0, 10.0, 5.0);
        let mut pts = intersect_ellipse_line(&e, &Line::Vertical { x: 50.0 });
        pts.sort_by(|a, b| a[1].total_cmp(&b[1]));
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0][0], 50.0);
        assert_relative_eq!(pts[0][1], 35.0, epsilon = 1e-9);
        assert_relative_eq!(pts[1][1], 45.0, epsilon = 1e-9);
    }

    #[test]
    fn rotated_ellipse_major_axis_line() {
        let angle = 0.7f64;
        let e = Ellipse {
            cx: 120.0,
            cy: 90.0,
            a: 40.0,
            b: 12.0,
            angle,
        };
        let slope = angle.tan();
        let line = Line::from_slope_intercept(slope, e.cy - slope * e.cx);
        let pts = sorted_by_x(intersect_ellipse_line(&e, &line));
        assert_eq!(pts.len(), 2);
        assert_relative_eq!(pts[0][0], e.cx - e.a * angle.cos(), epsilon = 1e-8);
        assert_relative_eq!(pts[0][1], e.cy - e.a * angle.sin(), epsilon = 1e-8);
        assert_relative_eq!(pts[1][0], e.cx + e.a * angle.cos(), epsilon = 1e-8);
        assert_relative_eq!(pts[1][1], e.cy + e.a * angle.sin(), epsilon = 1e-8);
    }

    #[test]
    fn intersections_lie_on_both_curves() {
        let e = Ellipse {
            cx: 60.0,
            cy: 70.0,
            a: 25.0,
            b: 18.0,
            angle: -0.4,
        };
        let line = Line::from_slope_intercept(0.1, 75.0);
        let pts = intersect_ellipse_line(&e, &line);
        assert_eq!(pts.len(), 2);
        for p in pts {
            assert!(e.implicit(p).abs() < 1e-9);
            assert!(line.distance(p) < 1e-9);
        }
    }
}
