//! CLI for leaf area measurement.
//!
//! Usage:
//!   foliar <image>                         # measure, save resultado_<image>
//!   foliar <image> --json                  # machine-readable result
//!   foliar <image> -o annotated.png        # choose the annotated output path
//!   foliar <image> --font DejaVuSans.ttf   # draw the area label too

use clap::Parser;
use foliar::{Annotator, MeasurementPipeline, Point, DEFAULT_MARKER_CM};
use log::{error, info, warn};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "foliar")]
#[command(author, version, about = "Leaf area measurement with a QR-code scale reference", long_about = None)]
struct Args {
    /// Input image file
    #[arg(required = true)]
    image: PathBuf,

    /// Output as JSON
    #[arg(short, long)]
    json: bool,

    /// Annotated image path (default: resultado_<input> beside the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Physical side length of the printed marker, in centimeters
    #[arg(long, default_value_t = DEFAULT_MARKER_CM, value_parser = parse_marker_cm)]
    marker_cm: f64,

    /// TTF/OTF font for the area label; without it only the outline is drawn
    #[arg(long)]
    font: Option<PathBuf>,

    /// Show debug output
    #[arg(short, long)]
    verbose: bool,
}

/// Output structure for JSON serialization
#[derive(Serialize)]
struct Output {
    image: String,
    width: u32,
    height: u32,
    area_cm2: f64,
    scale_cm_per_px: f64,
    area_px: f64,
    corners: [Point; 4],
    annotated: String,
}

#[derive(Serialize)]
struct FailureOutput {
    image: String,
    reason: foliar::MeasureFailure,
    error: String,
}

fn main() {
    let args = Args::parse();
    init_logger(args.verbose);

    if let Err(e) = run(&args) {
        error!("❌ {}", e);
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let img = image::open(&args.image)?.to_rgb8();
    let (width, height) = img.dimensions();

    let annotator = match args.font {
        Some(ref path) => match Annotator::with_font_file(path) {
            Ok(annotator) => annotator,
            Err(e) => {
                warn!("label font {:?} unusable ({}); skipping label", path, e);
                Annotator::new()
            }
        },
        None => Annotator::new(),
    };

    let pipeline = MeasurementPipeline::new()
        .with_marker_cm(args.marker_cm)
        .with_annotator(annotator);

    let measurement = match pipeline.measure(&img) {
        Ok(m) => m,
        Err(reason) => {
            if args.json {
                let failure = FailureOutput {
                    image: args.image.display().to_string(),
                    reason,
                    error: reason.to_string(),
                };
                println!("{}", serde_json::to_string_pretty(&failure)?);
            }
            return Err(Box::new(reason));
        }
    };

    let out_path = match args.output {
        Some(ref path) => path.clone(),
        None => default_output_path(&args.image),
    };
    measurement.annotated.save(&out_path)?;
    info!("✅ Imagem anotada salva em {}", out_path.display());

    let output = Output {
        image: args.image.display().to_string(),
        width,
        height,
        area_cm2: measurement.area_cm2,
        scale_cm_per_px: measurement.scale.cm_per_px(),
        area_px: measurement.area_px,
        corners: measurement.corners.points,
        annotated: out_path.display().to_string(),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", format_human_readable(&output));
    }

    Ok(())
}

/// A marker side that is zero, negative, or non-finite can never resolve a
/// scale, so it is rejected up front instead of surfacing later as a
/// degenerate-scale failure.
fn parse_marker_cm(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("marker side must be positive, got {}", raw))
    }
}

/// The reference deployment saved results as `resultado_<filename>` next to
/// the upload; the CLI keeps that convention for the annotated copy.
fn default_output_path(input: &Path) -> PathBuf {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("resultado_{}", name))
}

fn format_human_readable(output: &Output) -> String {
    let mut s = String::new();

    s.push_str(&format!(
        "Image: {} ({}x{})\n",
        output.image, output.width, output.height
    ));
    s.push_str(&format!(
        "Scale: {:.6} cm/pixel (marker corners at {})\n",
        output.scale_cm_per_px,
        output
            .corners
            .iter()
            .map(|p| format!("({:.0}, {:.0})", p.x, p.y))
            .collect::<Vec<_>>()
            .join(" "),
    ));
    s.push_str(&format!("Leaf area: {:.0} px²\n", output.area_px));
    s.push_str(&format!("Área da folha: {:.2} cm²\n", output.area_cm2));
    s.push_str(&format!("Annotated image: {}", output.annotated));

    s
}

fn init_logger(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_cm_defaults_when_absent() {
        let args = Args::try_parse_from(["foliar", "photo.jpg"]).unwrap();
        assert_eq!(args.marker_cm, DEFAULT_MARKER_CM);
    }

    #[test]
    fn marker_cm_accepts_positive_values() {
        let args = Args::try_parse_from(["foliar", "photo.jpg", "--marker-cm", "2.5"]).unwrap();
        assert_eq!(args.marker_cm, 2.5);
    }

    #[test]
    fn marker_cm_rejects_nonpositive_values() {
        assert!(Args::try_parse_from(["foliar", "photo.jpg", "--marker-cm", "0"]).is_err());
        assert!(Args::try_parse_from(["foliar", "photo.jpg", "--marker-cm=-3.6"]).is_err());
    }

    #[test]
    fn marker_cm_rejects_non_numbers() {
        assert!(Args::try_parse_from(["foliar", "photo.jpg", "--marker-cm", "wide"]).is_err());
    }
}
