//! Image preprocessing: contrast normalisation and smoothing before the
//! intensity field is built.

use image::{GrayImage, ImageBuffer, Luma};
use serde::{Deserialize, Serialize};

use crate::error::AnalysisError;
use crate::field::IntensityField;

/// Preprocessing applied when building a field from a decoded image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessConfig {
    /// Gaussian blur sigma in pixels. `0` disables smoothing.
    pub blur_sigma: f32,
    /// Equalize the grayscale histogram before smoothing.
    pub equalize_histogram: bool,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            blur_sigma: 1.1,
            equalize_histogram: true,
        }
    }
}

impl PreprocessConfig {
    /// Check parameter ranges.
    pub fn validate(&self) -> Result<(), AnalysisError> {
        if !self.blur_sigma.is_finite() || self.blur_sigma < 0.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "preprocess.blur_sigma must be finite and >= 0, got {}",
                self.blur_sigma
            )));
        }
        Ok(())
    }
}

/// Build an [`IntensityField`] from a grayscale image.
///
/// Optional histogram equalization runs on the 8-bit image. Smoothing runs on
/// `f32` samples so the field keeps sub-level precision. Values stay on the
/// 0–255 scale.
pub fn prepare_field(
    img: &GrayImage,
    cfg: &PreprocessConfig,
) -> Result<IntensityField, AnalysisError> {
    cfg.validate()?;
    let (w, h) = img.dimensions();

    let equalized;
    let src = if cfg.equalize_histogram {
        equalized = imageproc::contrast::equalize_histogram(img);
        &equalized
    } else {
        img
    };

    if cfg.blur_sigma == 0.0 {
        return IntensityField::try_from(src);
    }

    let data: Vec<f32> = src.as_raw().iter().map(|&v| v as f32).collect();
    let len = data.len();
    let f = ImageBuffer::<Luma<f32>, Vec<f32>>::from_raw(w, h, data).ok_or(
        AnalysisError::InvalidField {
            width: w as usize,
            height: h as usize,
            len,
        },
    )?;
    let blurred = imageproc::filter::gaussian_blur_f32(&f, cfg.blur_sigma);
    tracing::debug!(
        sigma = cfg.blur_sigma,
        equalized = cfg.equalize_histogram,
        "preprocessed {}x{} image",
        w,
        h
    );
    IntensityField::new(w as usize, h as usize, blurred.into_raw())
}
