//! Total-least-squares (orthogonal regression) line fit.

use nalgebra::{Matrix2, SymmetricEigen};

use super::types::NormalLine;
use crate::error::AnalysisError;

/// Fit a line minimizing the sum of squared perpendicular distances.
///
/// The line passes through the centroid; its normal is the eigenvector of
/// the centred scatter matrix with the smallest eigenvalue.
pub fn fit_line_tls(points: &[[f64; 2]]) -> Result<NormalLine, AnalysisError> {
    let n = points.len();
    if n < 2 {
        return Err(AnalysisError::InsufficientData {
            stage: "total least squares line fit",
            needed: 2,
            got: n,
        });
    }

    let inv_n = 1.0 / n as f64;
    let mx = points.iter().map(|p| p[0]).sum::<f64>() * inv_n;
    let my = points.iter().map(|p| p[1]).sum::<f64>() * inv_n;

    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p[0] - mx;
        let dy = p[1] - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    let eig = SymmetricEigen::new(Matrix2::new(sxx, sxy, sxy, syy));
    let i_min = if eig.eigenvalues[0] <= eig.eigenvalues[1] {
        0
    } else {
        1
    };
    let normal = eig.eigenvectors.column(i_min);

    NormalLine::from_point_normal([mx, my], [normal[0], normal[1]])
        .ok_or(AnalysisError::DegenerateGeometry("line fit normal vanished"))
}
