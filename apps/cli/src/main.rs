// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: reconstruct wall axes from a floor-plan sketch and export DXF
//!
//! Runs the raster frontend (cleanup + Hough segments), the geometric
//! reconstruction (normalize, group, merge, collapse), and, when OCR items
//! are supplied, the structural/dimension classification, then writes the
//! wall axes to an ASCII DXF file.
//!
//! Usage:
//!   sketch-to-dxf <image_path> [options]

mod dxf;

use image::{GrayImage, ImageReader, Rgb, RgbImage};
use sketchplan_core::{
    classify_axes, reconstruct_wall_axes, AxisPartition, DimensionLine, OcrItem, Orientation,
    ReconstructionConfig, WallAxis,
};
use sketchplan_vision::{detect_segments, filter_near_axis, preprocess_sketch, LineDetectConfig, PreprocessConfig};
use std::env;
use std::fs;
use std::path::Path;

/// Defensive bound on the near-axis segment count before the O(n²) collapse
/// and classification stages; degenerate inputs (dense hatching, photos of
/// text) can explode the segment count.
const MAX_SEGMENT_COUNT: usize = 5000;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let image_path = &args[1];

    // Parse options
    let mut ocr_path: Option<String> = None;
    let mut output_path = String::from("plan.dxf");
    let mut debug_mode = false;
    let mut recon_config = ReconstructionConfig::default();
    let mut preprocess_config = PreprocessConfig::default();
    let mut detect_config = LineDetectConfig::default();

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--ocr" => {
                i += 1;
                ocr_path = Some(args[i].clone());
            }
            "--output" => {
                i += 1;
                output_path = args[i].clone();
            }
            "--colinear-tolerance" => {
                i += 1;
                recon_config.colinear_tolerance = parse_value(&args[i], "colinear tolerance");
            }
            "--merge-gap" => {
                i += 1;
                recon_config.merge_gap = parse_value(&args[i], "merge gap");
            }
            "--min-wall-length" => {
                i += 1;
                recon_config.min_wall_axis_length = parse_value(&args[i], "min wall length");
            }
            "--max-wall-thickness" => {
                i += 1;
                recon_config.max_wall_thickness = parse_value(&args[i], "max wall thickness");
            }
            "--max-dimension-offset" => {
                i += 1;
                recon_config.max_dimension_offset = parse_value(&args[i], "max dimension offset");
            }
            "--threshold" => {
                i += 1;
                preprocess_config.threshold = parse_value(&args[i], "threshold");
            }
            "--min-line-length" => {
                i += 1;
                detect_config.min_line_length = parse_value(&args[i], "min line length");
            }
            "--debug" => {
                debug_mode = true;
            }
            other => {
                eprintln!("Unknown option: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // Reject degenerate tolerances before any work happens
    if let Err(e) = recon_config.validate() {
        eprintln!("Error: invalid configuration: {}", e);
        std::process::exit(1);
    }

    println!("=== Sketch to DXF Wall-Axis Reconstruction ===");
    println!();

    // Step 1: Load image
    println!("[1/5] Loading sketch: {}", image_path);
    let img = ImageReader::open(image_path)
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot open image '{}': {}", image_path, e);
            std::process::exit(1);
        })
        .decode()
        .unwrap_or_else(|e| {
            eprintln!("Error: Cannot decode image '{}': {}", image_path, e);
            std::process::exit(1);
        });

    let grayscale: GrayImage = img.to_luma8();
    println!("  Image size: {}x{} pixels", grayscale.width(), grayscale.height());

    // Step 2: Preprocess and detect segments
    println!("[2/5] Detecting line segments...");
    let edges = preprocess_sketch(&grayscale, &preprocess_config);
    let raw = detect_segments(&edges, &detect_config);
    let segments = filter_near_axis(&raw, detect_config.axis_angle_tolerance_deg);
    tracing::info!(
        detected = raw.len(),
        near_axis = segments.len(),
        "segment detection complete"
    );
    println!("  Raw segments: {} ({} near-axis)", raw.len(), segments.len());

    if segments.is_empty() {
        eprintln!("Error: No line segments detected. Try a lower --threshold or --min-line-length.");
        std::process::exit(1);
    }
    if segments.len() > MAX_SEGMENT_COUNT {
        eprintln!(
            "Error: {} segments exceed the safety bound of {}; the input is probably not a floor plan.",
            segments.len(),
            MAX_SEGMENT_COUNT
        );
        std::process::exit(1);
    }

    // Step 3: Reconstruct wall axes
    println!("[3/5] Reconstructing wall axes...");
    let walls = reconstruct_wall_axes(&segments, &recon_config);
    println!("  Wall axes: {}", walls.len());

    // Step 4: Classify against recognized text, if provided
    println!("[4/5] Classifying walls vs. dimension lines...");
    let ocr_items = match &ocr_path {
        Some(path) => load_ocr_items(path),
        None => {
            println!("  No --ocr file given; all axes stay structural.");
            Vec::new()
        }
    };
    let AxisPartition {
        structural,
        dimensions,
    } = classify_axes(walls, &ocr_items, &recon_config);
    tracing::info!(
        structural = structural.len(),
        dimensions = dimensions.len(),
        "classification complete"
    );

    for (i, wall) in structural.iter().enumerate() {
        println!(
            "  W{:<3} {:?} coord={:7.1} range=[{:.1}, {:.1}]",
            i, wall.orientation, wall.coord, wall.start, wall.end
        );
    }
    for dim in &dimensions {
        println!(
            "  D    {:?} coord={:7.1} range=[{:.1}, {:.1}] value={} (score {:.2})",
            dim.orientation, dim.coord, dim.start, dim.end, dim.value, dim.score
        );
    }

    // Step 5: Export
    println!("[5/5] Writing DXF: {}", output_path);
    if let Err(e) = dxf::write_dxf(&output_path, &structural, &dimensions) {
        eprintln!("Error: Cannot write '{}': {}", output_path, e);
        std::process::exit(1);
    }

    if debug_mode {
        save_debug_overlay(&grayscale, &structural, &dimensions, &ocr_items, image_path);
    }

    println!();
    println!("Done: {} structural walls, {} dimension lines.", structural.len(), dimensions.len());
}

fn parse_value<T: std::str::FromStr>(arg: &str, what: &str) -> T {
    arg.parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid {} value '{}'", what, arg);
        std::process::exit(1);
    })
}

/// Load recognized-text items from a JSON file (array of objects with
/// `text`, `score`, and a 4-point `bbox`).
fn load_ocr_items(path: &str) -> Vec<OcrItem> {
    let data = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error: Cannot read OCR file '{}': {}", path, e);
        std::process::exit(1);
    });
    let items: Vec<OcrItem> = serde_json::from_str(&data).unwrap_or_else(|e| {
        eprintln!("Error: Cannot parse OCR file '{}': {}", path, e);
        std::process::exit(1);
    });
    println!("  Loaded {} recognized-text items from {}", items.len(), path);
    items
}

/// Save a debug overlay: structural walls green, dimension lines blue,
/// OCR boxes yellow.
fn save_debug_overlay(
    grayscale: &GrayImage,
    walls: &[WallAxis],
    dimensions: &[DimensionLine],
    ocr_items: &[OcrItem],
    input_path: &str,
) {
    let width = grayscale.width();
    let height = grayscale.height();

    let mut overlay = RgbImage::new(width, height);
    for (x, y, pixel) in grayscale.enumerate_pixels() {
        let v = pixel.0[0];
        overlay.put_pixel(x, y, Rgb([v, v, v]));
    }

    for wall in walls {
        let (x0, y0, x1, y1) = axis_pixels(wall.orientation, wall.coord, wall.start, wall.end);
        draw_line_rgb(&mut overlay, x0, y0, x1, y1, Rgb([0, 200, 0]), 1);
    }
    for dim in dimensions {
        let (x0, y0, x1, y1) = axis_pixels(dim.orientation, dim.coord, dim.start, dim.end);
        draw_line_rgb(&mut overlay, x0, y0, x1, y1, Rgb([0, 100, 255]), 1);
    }
    for item in ocr_items {
        for i in 0..4 {
            let a = item.bbox[i];
            let b = item.bbox[(i + 1) % 4];
            draw_line_rgb(
                &mut overlay,
                a.x as i32,
                a.y as i32,
                b.x as i32,
                b.y as i32,
                Rgb([255, 220, 0]),
                0,
            );
        }
    }

    let debug_path = Path::new(input_path)
        .with_extension("axes.png")
        .to_string_lossy()
        .to_string();
    overlay.save(&debug_path).unwrap_or_else(|e| {
        eprintln!("Warning: Could not save debug overlay: {}", e);
    });
    println!("  Debug overlay saved: {}", debug_path);
}

/// Endpoints of an axis in image pixel space (no vertical flip here).
fn axis_pixels(orientation: Orientation, coord: f64, start: f64, end: f64) -> (i32, i32, i32, i32) {
    match orientation {
        Orientation::Horizontal => (start as i32, coord as i32, end as i32, coord as i32),
        Orientation::Vertical => (coord as i32, start as i32, coord as i32, end as i32),
    }
}

fn draw_line_rgb(
    img: &mut RgbImage,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: Rgb<u8>,
    thickness: i32,
) {
    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;
    let mut x = x0;
    let mut y = y0;

    loop {
        for dy_off in -thickness..=thickness {
            for dx_off in -thickness..=thickness {
                let px = x + dx_off;
                let py = y + dy_off;
                if px >= 0 && px < img.width() as i32 && py >= 0 && py < img.height() as i32 {
                    img.put_pixel(px as u32, py as u32, color);
                }
            }
        }

        if x == x1 && y == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x += sx;
        }
        if e2 < dx {
            err += dx;
            y += sy;
        }
    }
}

fn print_usage() {
    println!(
        r#"Sketch to DXF Wall-Axis Reconstruction
======================================

Reconstructs structural wall axes from a hand-drawn floor-plan sketch and
writes them to an ASCII DXF file. With recognized-text input, dimension
annotation lines are separated from structural walls.

USAGE:
  sketch-to-dxf <image_path> [OPTIONS]

ARGUMENTS:
  <image_path>                 Path to the sketch image (PNG, JPEG)

OPTIONS:
  --ocr <path>                 JSON file with recognized-text items:
                               [{{"text": "3.50", "score": 0.95,
                                  "bbox": [{{"x":..,"y":..}}, ...4 points]}}]
  --output <path>              Output DXF path (default: plan.dxf)
  --colinear-tolerance <px>    Collinear grouping tolerance (default: 30)
  --merge-gap <px>             Max gap merged into one wall (default: 120)
  --min-wall-length <px>       Min final wall-axis length (default: 80)
  --max-wall-thickness <px>    Max parallel-collapse distance (default: 40)
  --max-dimension-offset <px>  Max text-to-wall distance (default: 40)
  --threshold <0-255>          Ink binarization threshold (default: 100)
  --min-line-length <px>       Min detected segment length (default: 50)
  --debug                      Save a PNG overlay next to the input
  -h, --help                   Show this help message

OUTPUT LAYERS:
  WALL_AXIS   structural wall centerlines (green)
  DIM_LINES   dimension annotation lines (blue)

EXAMPLES:
  sketch-to-dxf sketch.jpg --debug
  sketch-to-dxf sketch.jpg --ocr ocr_items.json --output plan.dxf
"#
    );
}
