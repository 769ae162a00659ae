//! Result overlay rendering.

use dropangle::{ContactAngleResult, ContactReport, Ellipse, Line};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_line_segment_mut};

const BOUNDARY: Rgb<u8> = Rgb([0, 255, 120]);
const ELLIPSE: Rgb<u8> = Rgb([255, 200, 0]);
const BASELINE: Rgb<u8> = Rgb([0, 200, 255]);
const CONTACT: Rgb<u8> = Rgb([255, 60, 60]);
const TANGENT: Rgb<u8> = Rgb([255, 200, 0]);

const ELLIPSE_SEGMENTS: usize = 90;
const CONTACT_RADIUS: i32 = 4;

fn to_f32(p: [f64; 2]) -> (f32, f32) {
    (p[0] as f32, p[1] as f32)
}

fn draw_closed_polyline(canvas: &mut RgbImage, pts: &[[f64; 2]], color: Rgb<u8>) {
    if pts.len() < 2 {
        return;
    }
    for (i, &p) in pts.iter().enumerate() {
        let q = pts[(i + 1) % pts.len()];
        draw_line_segment_mut(canvas, to_f32(p), to_f32(q), color);
    }
}

fn draw_baseline(canvas: &mut RgbImage, line: &Line) {
    let (w, h) = (canvas.width() as f64, canvas.height() as f64);
    let (a, b) = match *line {
        Line::Sloped { slope, intercept } => ([0.0, intercept], [w, slope * w + intercept]),
        Line::Vertical { x } => ([x, 0.0], [x, h]),
    };
    draw_line_segment_mut(canvas, to_f32(a), to_f32(b), BASELINE);
}

fn draw_contact(canvas: &mut RgbImage, contact: &ContactReport, half_len: f64) {
    let p = contact.refined;
    let d = contact.tangent.unit_direction();
    let a = [p[0] - d[0] * half_len, p[1] - d[1] * half_len];
    let b = [p[0] + d[0] * half_len, p[1] + d[1] * half_len];
    draw_line_segment_mut(canvas, to_f32(a), to_f32(b), TANGENT);
    draw_filled_circle_mut(
        canvas,
        (p[0].round() as i32, p[1].round() as i32),
        CONTACT_RADIUS,
        CONTACT,
    );
}

/// Draw boundary, ellipse, baseline, tangents and contact markers.
pub fn render(base: &RgbImage, boundary: &[[f64; 2]], result: &ContactAngleResult) -> RgbImage {
    let mut canvas = base.clone();
    let half_len = 0.25 * canvas.width().max(canvas.height()) as f64;

    if boundary.len() > 2 {
        draw_closed_polyline(&mut canvas, boundary, BOUNDARY);
    }
    let ellipse = Ellipse::from(result.ellipse);
    draw_closed_polyline(&mut canvas, &ellipse.sample_points(ELLIPSE_SEGMENTS), ELLIPSE);
    draw_baseline(&mut canvas, &result.baseline.line);
    draw_contact(&mut canvas, &result.left, half_len);
    draw_contact(&mut canvas, &result.right, half_len);
    canvas
}
