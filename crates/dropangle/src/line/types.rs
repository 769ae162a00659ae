//! Line and slope types.
//!
//! Vertical lines and vertical tangents are explicit variants rather than
//! infinite floats; `+∞` only appears at the float-valued boundary
//! ([`Slope::to_f64`], [`Line::slope_intercept`]).

use serde::{Deserialize, Serialize};

/// `|b|` at or below which a normalized line is reported as vertical.
pub const VERTICAL_EPS: f64 = 1e-6;

/// Slope of a line or tangent in image coordinates (y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slope {
    /// `dy/dx = m`.
    Finite(f64),
    /// Parallel to the y axis.
    Vertical,
}

impl Slope {
    /// Build from a float, mapping non-finite values to [`Slope::Vertical`].
    pub fn from_f64(m: f64) -> Self {
        if m.is_finite() {
            Self::Finite(m)
        } else {
            Self::Vertical
        }
    }

    /// Float view: `+∞` for vertical.
    pub fn to_f64(self) -> f64 {
        match self {
            Self::Finite(m) => m,
            Self::Vertical => f64::INFINITY,
        }
    }

    /// Finite view with vertical replaced by `surrogate`.
    pub fn to_finite(self, surrogate: f64) -> f64 {
        match self {
            Self::Finite(m) => m,
            Self::Vertical => surrogate,
        }
    }

    /// Returns `true` for [`Slope::Vertical`].
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Vertical)
    }

    /// Unit direction vector along the slope.
    ///
    /// Finite slopes point toward +x; vertical points up the image (`(0, -1)`).
    pub fn unit_direction(self) -> [f64; 2] {
        match self {
            Self::Finite(m) => {
                let n = m.hypot(1.0);
                [1.0 / n, m / n]
            }
            Self::Vertical => [0.0, -1.0],
        }
    }
}

/// Line in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Line {
    /// `y = slope * x + intercept`.
    Sloped {
        /// Slope `dy/dx`.
        slope: f64,
        /// Value of y at x = 0.
        intercept: f64,
    },
    /// `x = x`.
    Vertical {
        /// Constant x coordinate.
        x: f64,
    },
}

impl Line {
    /// Build from slope/intercept form. An infinite slope yields
    /// `Vertical { x: intercept }`.
    pub fn from_slope_intercept(slope: f64, intercept: f64) -> Self {
        if slope.is_finite() {
            Self::Sloped { slope, intercept }
        } else {
            Self::Vertical { x: intercept }
        }
    }

    /// Horizontal line `y = y0`.
    pub fn horizontal(y0: f64) -> Self {
        Self::Sloped {
            slope: 0.0,
            intercept: y0,
        }
    }

    /// Slope of the line.
    pub fn slope(&self) -> Slope {
        match *self {
            Self::Sloped { slope, .. } => Slope::Finite(slope),
            Self::Vertical { .. } => Slope::Vertical,
        }
    }

    /// `(slope, intercept)` pair; vertical lines give `(+∞, x)`.
    pub fn slope_intercept(&self) -> (f64, f64) {
        match *self {
            Self::Sloped { slope, intercept } => (slope, intercept),
            Self::Vertical { x } => (f64::INFINITY, x),
        }
    }

    /// y coordinate at `x`, or `None` for vertical lines.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        match *self {
            Self::Sloped { slope, intercept } => Some(slope * x + intercept),
            Self::Vertical { .. } => None,
        }
    }

    /// Perpendicular distance from `p` to the line.
    pub fn distance(&self, p: [f64; 2]) -> f64 {
        NormalLine::from(*self).distance(p)
    }

    /// A point on the line and the direction that parametrizes it.
    ///
    /// Sloped lines are parametrized by x (`(0, c) + x·(1, m)`), vertical lines
    /// by y (`(x, 0) + y·(0, 1)`).
    pub(crate) fn parametrization(&self) -> ([f64; 2], [f64; 2]) {
        match *self {
            Self::Sloped { slope, intercept } => ([0.0, intercept], [1.0, slope]),
            Self::Vertical { x } => ([x, 0.0], [0.0, 1.0]),
        }
    }
}

/// Line `a·x + b·y + c = 0` with `a² + b² = 1`, so the signed distance of a
/// point is simply `a·x + b·y + c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalLine {
    /// x component of the unit normal.
    pub a: f64,
    /// y component of the unit normal.
    pub b: f64,
    /// Offset.
    pub c: f64,
}

impl NormalLine {
    /// Line through two points, `None` when they coincide.
    pub fn through(p: [f64; 2], q: [f64; 2]) -> Option<Self> {
        let dx = q[0] - p[0];
        let dy = q[1] - p[1];
        let a = dy;
        let b = -dx;
        let n = a.hypot(b);
        if !n.is_finite() || n <= f64::EPSILON {
            return None;
        }
        let (a, b) = (a / n, b / n);
        Some(Self {
            a,
            b,
            c: -(a * p[0] + b * p[1]),
        })
    }

    /// Line through `p` with (not necessarily unit) normal `n`.
    pub fn from_point_normal(p: [f64; 2], n: [f64; 2]) -> Option<Self> {
        let len = n[0].hypot(n[1]);
        if !len.is_finite() || len <= f64::EPSILON {
            return None;
        }
        let (a, b) = (n[0] / len, n[1] / len);
        Some(Self {
            a,
            b,
            c: -(a * p[0] + b * p[1]),
        })
    }

    /// Signed distance of `p`.
    #[inline]
    pub fn signed_distance(&self, p: [f64; 2]) -> f64 {
        self.a * p[0] + self.b * p[1] + self.c
    }

    /// Unsigned distance of `p`.
    #[inline]
    pub fn distance(&self, p: [f64; 2]) -> f64 {
        self.signed_distance(p).abs()
    }

    /// Convert to slope/intercept form; `|b| ≤ 1e-6` is reported as vertical.
    pub fn to_line(&self) -> Line {
        if self.b.abs() > VERTICAL_EPS {
            Line::Sloped {
                slope: -self.a / self.b,
                intercept: -self.c / self.b,
            }
        } else {
            let x = if self.a != 0.0 { -self.c / self.a } else { 0.0 };
            Line::Vertical { x }
        }
    }
}

impl From<Line> for NormalLine {
    fn from(line: Line) -> Self {
        match line {
            Line::Sloped { slope, intercept } => {
                // m·x − y + c = 0
                let n = slope.hypot(1.0);
                Self {
                    a: slope / n,
                    b: -1.0 / n,
                    c: intercept / n,
                }
            }
            Line::Vertical { x } => Self {
                a: 1.0,
                b: 0.0,
                c: -x,
            },
        }
    }
}
