use foliar::{FiducialLocator, QrLocator, ScaleEstimator, DEFAULT_MARKER_CM};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: {} <image> [marker-cm]", args[0]);
        std::process::exit(1);
    }
    env_logger::init();

    let path = &args[1];
    let marker_cm = match args.get(2) {
        Some(raw) => match raw.parse::<f64>() {
            Ok(v) if v > 0.0 => v,
            _ => {
                eprintln!("Invalid marker size: {}", raw);
                std::process::exit(1);
            }
        },
        None => DEFAULT_MARKER_CM,
    };

    println!("Loading image: {}", path);
    let img = image::open(path).expect("Failed to open image").to_rgb8();
    println!("  {}x{} pixels", img.width(), img.height());
    println!("  marker side: {} cm", marker_cm);

    println!("\nSearching for QR fiducial...");
    let corners = match QrLocator.locate(&img) {
        Some(corners) => corners,
        None => {
            println!("No fiducial found.");
            std::process::exit(2);
        }
    };

    println!("\nCorners:");
    for (i, p) in corners.points.iter().enumerate() {
        println!("  [{}] ({:8.2}, {:8.2})", i, p.x, p.y);
    }

    println!("\nEdge lengths (px):");
    for (i, len) in corners.edge_lengths().iter().enumerate() {
        println!("  edge {} -> {}: {:8.2}", i, (i + 1) % 4, len);
    }

    println!("\nEstimating scale...");
    match ScaleEstimator::new(marker_cm).estimate(&corners) {
        Ok(scale) => {
            println!("SUCCESS! Scale resolved:");
            println!("  {:.6} cm/pixel", scale.cm_per_px());
            println!("  {:.2} pixels/cm", 1.0 / scale.cm_per_px());
        }
        Err(e) => {
            println!("FAILED: {}", e);
            std::process::exit(2);
        }
    }
}
