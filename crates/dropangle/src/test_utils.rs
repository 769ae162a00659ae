//! Synthetic fields and boundaries shared by unit tests.

use crate::conic::Ellipse;
use crate::field::IntensityField;

pub(crate) const DROPLET_PIX: f32 = 50.0;
pub(crate) const BACKGROUND_PIX: f32 = 200.0;
pub(crate) const SUBSTRATE_PIX: f32 = 120.0;

/// Vertical step with area-sampled pixels: 0 left of `edge_x`, 255 right of it.
///
/// Pixel `i` covers `[i − 0.5, i + 0.5]`; its value is the covered fraction.
pub(crate) fn area_step_field(w: usize, h: usize, edge_x: f64) -> IntensityField {
    IntensityField::from_fn(w, h, |x, _| {
        (255.0 * (x as f64 + 0.5 - edge_x).clamp(0.0, 1.0)) as f32
    })
    .unwrap()
}

/// Uniform zero field, for stages that only need the field extent.
pub(crate) fn blank_field(w: usize, h: usize) -> IntensityField {
    IntensityField::new(w, h, vec![0.0; w * h]).unwrap()
}

/// Hard vertical step: 0 for columns below `edge_col`, 255 from it on.
pub(crate) fn hard_step_field(w: usize, h: usize, edge_col: usize) -> IntensityField {
    IntensityField::from_fn(w, h, |x, _| if x < edge_col { 0.0 } else { 255.0 }).unwrap()
}

fn droplet_value(x: f64, y: f64, ellipse: &Ellipse, baseline_y: f64) -> f32 {
    if y >= baseline_y {
        SUBSTRATE_PIX
    } else if ellipse.implicit([x, y]) <= 0.0 {
        DROPLET_PIX
    } else {
        BACKGROUND_PIX
    }
}

/// Dark droplet (ellipse cut by `y = baseline_y`) on a bright background,
/// substrate below the baseline. Pixels are 4×4 supersampled.
pub(crate) fn droplet_field(
    w: usize,
    h: usize,
    ellipse: &Ellipse,
    baseline_y: f64,
) -> IntensityField {
    const SS: usize = 4;
    let offsets: Vec<f64> = (0..SS)
        .map(|k| (k as f64 + 0.5) / SS as f64 - 0.5)
        .collect();
    IntensityField::from_fn(w, h, |x, y| {
        let mut acc = 0.0f32;
        for oy in &offsets {
            for ox in &offsets {
                acc += droplet_value(x as f64 + ox, y as f64 + oy, ellipse, baseline_y);
            }
        }
        acc / (SS * SS) as f32
    })
    .unwrap()
}

/// Silhouette of the truncated droplet: the ellipse arc at least `margin`
/// above the baseline, followed by 1 px spaced points along the baseline
/// between the two contacts.
pub(crate) fn droplet_boundary(
    ellipse: &Ellipse,
    baseline_y: f64,
    n_arc: usize,
    margin: f64,
) -> Vec<[f64; 2]> {
    let mut pts: Vec<[f64; 2]> = ellipse
        .sample_points(n_arc)
        .into_iter()
        .filter(|p| p[1] <= baseline_y - margin)
        .collect();

    let dy = (baseline_y - ellipse.cy) / ellipse.b;
    let half = ellipse.a * (1.0 - dy * dy).max(0.0).sqrt();
    let x0 = (ellipse.cx - half).ceil() as i64;
    let x1 = (ellipse.cx + half).floor() as i64;
    pts.extend((x0..=x1).map(|x| [x as f64, baseline_y]));
    pts
}
