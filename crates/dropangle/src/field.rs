//! Read-only grayscale intensity field with clamped bilinear sampling.

use image::GrayImage;

use crate::error::AnalysisError;

/// 2D grid of brightness values, row-major, pixel centres at integer coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityField {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl IntensityField {
    /// Wrap a row-major buffer of `width * height` samples.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self, AnalysisError> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(data.len()) {
            return Err(AnalysisError::InvalidField {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a field by evaluating `f(x, y)` at every pixel.
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> f32,
    ) -> Result<Self, AnalysisError> {
        let mut data = Vec::with_capacity(width.saturating_mul(height));
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self::new(width, height, data)
    }

    /// Field width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at an integer pixel.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.data[y * self.width + x]
    }

    /// Whether `p` lies in `[0, width) × [0, height)`.
    pub fn contains(&self, p: [f64; 2]) -> bool {
        p[0] >= 0.0 && p[0] < self.width as f64 && p[1] >= 0.0 && p[1] < self.height as f64
    }

    /// Sample at a sub-pixel position.
    ///
    /// Inside `[0, w−1) × [0, h−1)` this is bilinear interpolation. Outside,
    /// the coordinates are clamped to the field and the nearest pixel is
    /// returned without interpolation. Non-finite coordinates sample pixel 0.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let x = if x.is_finite() { x } else { 0.0 };
        let y = if y.is_finite() { y } else { 0.0 };
        let w_max = (self.width - 1) as f64;
        let h_max = (self.height - 1) as f64;

        if x < 0.0 || x >= w_max || y < 0.0 || y >= h_max {
            let xi = x.clamp(0.0, w_max).round() as usize;
            let yi = y.clamp(0.0, h_max).round() as usize;
            return self.get(xi, yi) as f64;
        }

        let x0 = x.floor() as usize;
        let y0 = y.floor() as usize;
        let fx = x - x0 as f64;
        let fy = y - y0 as f64;

        let idx00 = y0 * self.width + x0;
        let idx01 = idx00 + self.width;
        let p00 = self.data[idx00] as f64;
        let p10 = self.data[idx00 + 1] as f64;
        let p01 = self.data[idx01] as f64;
        let p11 = self.data[idx01 + 1] as f64;

        let top = p00 * (1.0 - fx) + p10 * fx;
        let bottom = p01 * (1.0 - fx) + p11 * fx;
        top * (1.0 - fy) + bottom * fy
    }
}

impl TryFrom<&GrayImage> for IntensityField {
    type Error = AnalysisError;

    /// Intensities are kept on the 0–255 scale.
    fn try_from(img: &GrayImage) -> Result<Self, Self::Error> {
        let (w, h) = img.dimensions();
        let data = img.as_raw().iter().map(|&v| v as f32).collect();
        Self::new(w as usize, h as usize, data)
    }
}
