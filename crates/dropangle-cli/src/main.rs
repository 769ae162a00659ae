//! dropangle CLI: contact angle analysis for droplet photographs.

mod overlay;

use clap::{Args, Parser, Subcommand};
use dropangle::{prepare_field, AnalysisConfig, ContactAngleAnalyzer, Ellipse, EllipseParams};
use std::path::{Path, PathBuf};

type CliError = Box<dyn std::error::Error>;
type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "dropangle")]
#[command(about = "Estimate sessile-droplet contact angles from an image and its silhouette")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one droplet.
    Analyze(CliAnalyzeArgs),

    /// Print the default analysis configuration as JSON.
    DefaultConfig,
}

#[derive(Debug, Clone, Args)]
struct CliAnalyzeArgs {
    /// Path to the input image.
    #[arg(long)]
    image: PathBuf,

    /// Droplet boundary as a JSON array of [x, y] pixel points.
    #[arg(long)]
    boundary: PathBuf,

    /// Coarse ellipse as JSON ({"center_xy", "semi_axes", "angle"}).
    /// Fitted from the boundary when omitted.
    #[arg(long)]
    ellipse: Option<PathBuf>,

    /// Analysis configuration (JSON). Missing fields use defaults.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Path to write analysis results (JSON).
    #[arg(long)]
    out: PathBuf,

    /// Path to write an overlay image (PNG).
    #[arg(long)]
    overlay: Option<PathBuf>,

    /// Gaussian blur sigma applied before analysis (0 disables smoothing).
    #[arg(long)]
    blur_sigma: Option<f32>,

    /// Skip histogram equalization of the input image.
    #[arg(long)]
    no_equalize: bool,

    /// RANSAC seed for the baseline fit.
    #[arg(long)]
    seed: Option<u64>,

    /// Maximum RANSAC iterations for the baseline fit.
    #[arg(long)]
    ransac_iters: Option<usize>,

    /// RANSAC inlier threshold in pixels for the baseline fit.
    #[arg(long)]
    ransac_thresh_px: Option<f64>,

    /// Number of samples along the contact normal (odd).
    #[arg(long)]
    profile_len: Option<usize>,

    /// Sample spacing along the contact normal in pixels.
    #[arg(long)]
    profile_spacing: Option<f64>,
}

impl CliAnalyzeArgs {
    fn to_config(&self) -> CliResult<AnalysisConfig> {
        let mut cfg = match &self.config {
            Some(path) => AnalysisConfig::from_json_file(path).map_err(|e| -> CliError {
                format!("Failed to load config {}: {}", path.display(), e).into()
            })?,
            None => AnalysisConfig::default(),
        };

        if let Some(sigma) = self.blur_sigma {
            cfg.preprocess.blur_sigma = sigma;
        }
        if self.no_equalize {
            cfg.preprocess.equalize_histogram = false;
        }

        let ransac = &mut cfg.baseline.ransac;
        if let Some(seed) = self.seed {
            ransac.seed = seed;
        }
        if let Some(iters) = self.ransac_iters {
            ransac.max_iters = iters;
        }
        if let Some(thresh) = self.ransac_thresh_px {
            ransac.inlier_threshold = thresh;
        }
        if let Some(len) = self.profile_len {
            cfg.refine.profile_len = len;
        }
        if let Some(spacing) = self.profile_spacing {
            cfg.refine.spacing = spacing;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze(args) => run_analyze(&args),
        Commands::DefaultConfig => run_default_config(),
    }
}

// ── default-config ─────────────────────────────────────────────────────

fn run_default_config() -> CliResult<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&AnalysisConfig::default())?
    );
    Ok(())
}

// ── analyze ────────────────────────────────────────────────────────────

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> CliResult<T> {
    let data = std::fs::read_to_string(path).map_err(|e| -> CliError {
        format!("Failed to read {} {}: {}", what, path.display(), e).into()
    })?;
    serde_json::from_str(&data).map_err(|e| -> CliError {
        format!("Failed to parse {} {}: {}", what, path.display(), e).into()
    })
}

fn run_analyze(args: &CliAnalyzeArgs) -> CliResult<()> {
    let config = args.to_config()?;

    tracing::info!("Loading image: {}", args.image.display());
    let img = image::open(&args.image).map_err(|e| -> CliError {
        format!("Failed to open image {}: {}", args.image.display(), e).into()
    })?;
    let gray = img.to_luma8();
    let (w, h) = gray.dimensions();
    tracing::info!("Image size: {}x{}", w, h);
    let field = prepare_field(&gray, &config.preprocess)?;

    let boundary: Vec<[f64; 2]> = read_json(&args.boundary, "boundary")?;
    tracing::info!("Boundary points: {}", boundary.len());

    let ellipse = match &args.ellipse {
        Some(path) => {
            let params: EllipseParams = read_json(path, "ellipse")?;
            Some(Ellipse::from(params))
        }
        None => None,
    };

    let analyzer = ContactAngleAnalyzer::with_config(config);
    let result = analyzer.analyze(&boundary, &field, ellipse)?;

    tracing::info!(
        "Contact angles: left {:.2}°, right {:.2}°, mean {:.2}° (confidence {:.2})",
        result.angles.left_deg,
        result.angles.right_deg,
        result.angles.mean_deg,
        result.confidence
    );
    if result.is_degraded() {
        tracing::warn!(
            "Result used fallbacks: ellipse {:?}, candidates {:?}",
            result.ellipse_source,
            result.candidate_source
        );
    }

    let json = serde_json::to_string_pretty(&result)?;
    std::fs::write(&args.out, &json)?;
    tracing::info!("Results written to {}", args.out.display());

    if let Some(path) = &args.overlay {
        let canvas = overlay::render(&img.to_rgb8(), &boundary, &result);
        canvas.save(path).map_err(|e| -> CliError {
            format!("Failed to write overlay {}: {}", path.display(), e).into()
        })?;
        tracing::info!("Overlay written to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dropangle::IntensityField;
    use image::RgbImage;

    fn analyze_args(extra: &[&str]) -> CliAnalyzeArgs {
        let mut argv = vec![
            "dropangle",
            "analyze",
            "--image",
            "in.png",
            "--boundary",
            "b.json",
            "--out",
            "r.json",
        ];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Analyze(args) => args,
            Commands::DefaultConfig => panic!("expected analyze"),
        }
    }

    #[test]
    fn flags_override_config() {
        let cfg = analyze_args(&[
            "--seed",
            "7",
            "--ransac-iters",
            "50",
            "--ransac-thresh-px",
            "1.5",
            "--profile-len",
            "21",
            "--profile-spacing",
            "0.5",
            "--blur-sigma",
            "2.0",
            "--no-equalize",
        ])
        .to_config()
        .unwrap();
        assert_eq!(cfg.baseline.ransac.seed, 7);
        assert_eq!(cfg.baseline.ransac.max_iters, 50);
        assert_eq!(cfg.baseline.ransac.inlier_threshold, 1.5);
        assert_eq!(cfg.refine.profile_len, 21);
        assert_eq!(cfg.refine.spacing, 0.5);
        assert_eq!(cfg.preprocess.blur_sigma, 2.0);
        assert!(!cfg.preprocess.equalize_histogram);
    }

    #[test]
    fn defaults_smooth_and_equalize() {
        let cfg = analyze_args(&[]).to_config().unwrap();
        assert_eq!(cfg.preprocess.blur_sigma, 1.1);
        assert!(cfg.preprocess.equalize_histogram);
    }

    #[test]
    fn invalid_override_is_rejected() {
        assert!(analyze_args(&["--profile-len", "20"]).to_config().is_err());
        assert!(analyze_args(&["--blur-sigma=-1"]).to_config().is_err());
    }

    #[test]
    fn overlay_marks_contacts() {
        let e = Ellipse::axis_aligned(50.0, 40.0, 20.0, 15.0);
        let field = IntensityField::from_fn(100, 80, |x, y| {
            let (x, y) = (x as f64, y as f64);
            if y >= 50.0 {
                120.0
            } else if e.implicit([x, y]) <= 0.0 {
                50.0
            } else {
                200.0
            }
        })
        .unwrap();
        let mut boundary: Vec<[f64; 2]> = e
            .sample_points(120)
            .into_iter()
            .filter(|p| p[1] < 49.0)
            .collect();
        boundary.extend((37..=63).map(|x| [x as f64, 50.0]));
        let result = ContactAngleAnalyzer::new()
            .analyze(&boundary, &field, Some(e))
            .unwrap();

        let base = RgbImage::new(100, 80);
        let canvas = overlay::render(&base, &boundary, &result);
        let p = result.left.refined;
        let px = canvas.get_pixel(p[0].round() as u32, p[1].round() as u32);
        assert_eq!(*px, image::Rgb([255, 60, 60]));
    }
}
