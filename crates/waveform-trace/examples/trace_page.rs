//! Example: per-lane trace extraction on a rasterised chart page.
//!
//! Loads a page image, resamples it to the default A4 layout and runs grid
//! suppression plus column reduction on each lane separately, timing every
//! lane. Each column yields at most one `(x, y)` point with the origin at the
//! lane's bottom-left corner; normalized points are reported alongside.
//!
//! Results are written to a JSON file next to the input image.
//! Per-lane and total timing is printed to stdout.
//!
//! Run from the workspace root:
//!   cargo run -p waveform-trace --example trace_page -- --help
//!   cargo run -p waveform-trace --example trace_page -- --input data/page_0.png

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use image::ImageReader;
use serde::Serialize;
use waveform_trace::{
    GridSuppressConfig, Image, LaneExtractor, LayoutConfig, Rgb8, normalize_points,
    reduce_columns, rgb8_to_gray, suppress_grid_u8,
};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(about = "Extract waveform traces from every lane of a chart page")]
struct Args {
    /// Path to the page image (default: data/page_0.png)
    #[arg(long, default_value = "data/page_0.png")]
    input: String,

    /// Length a ruling must span to be removed as grid
    #[arg(long, default_value_t = 61)]
    ruling_len: usize,

    /// Adaptive threshold window
    #[arg(long, default_value_t = 35)]
    threshold_block: usize,

    /// Output JSON path (default: <input stem>_traces.json next to input)
    #[arg(long)]
    out: Option<String>,
}

// ── JSON DTOs ─────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct PointDto {
    x: usize,
    y: usize,
}

#[derive(Serialize)]
struct UnitPointDto {
    x: f32,
    y: f32,
}

#[derive(Serialize)]
struct LaneResult {
    lane: usize,
    region: [usize; 4],
    /// Wall-clock time for this lane's extraction, in milliseconds.
    elapsed_ms: f64,
    points: Vec<PointDto>,
    normalized: Vec<UnitPointDto>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_rgb8(path: &str) -> Result<Image<Rgb8>> {
    let rgb = ImageReader::open(path)
        .with_context(|| format!("opening {path}"))?
        .decode()
        .with_context(|| format!("decoding {path}"))?
        .into_rgb8();
    let (w, h) = (rgb.width() as usize, rgb.height() as usize);
    let data = rgb
        .into_raw()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    Image::from_vec(w, h, data).context("building page Image")
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let img_path = args.input.as_str();
    let out_path = match args.out {
        Some(out) => PathBuf::from(out),
        None => {
            let input = Path::new(img_path);
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            input.with_file_name(format!("{stem}_traces.json"))
        }
    };

    let source = load_rgb8(img_path)?;
    let filter = GridSuppressConfig {
        ruling_len: args.ruling_len,
        threshold_block: args.threshold_block,
        ..GridSuppressConfig::default()
    };
    let extractor = LaneExtractor::with_filter(LayoutConfig::default(), filter)
        .context("configuring extractor")?;
    let (page_w, page_h) = extractor.layout().page_size();

    println!(
        "loaded {img_path}: {}x{}, resampling to {page_w}x{page_h}",
        source.width(),
        source.height()
    );
    println!(
        "config: ruling_len={}, threshold_block={}",
        args.ruling_len, args.threshold_block
    );

    let total_start = Instant::now();
    let page = extractor
        .resample_rgb8(&source.as_view())
        .context("resampling page")?;
    let page_view = page.as_view();

    let lanes = extractor.layout().lanes();
    let mut results: Vec<LaneResult> = Vec::with_capacity(lanes.len());
    for (i, region) in lanes.iter().enumerate() {
        let t0 = Instant::now();
        let crop = region.crop(&page_view).context("cropping lane")?;
        let gray = rgb8_to_gray(&crop);
        let mask = suppress_grid_u8(&gray.as_view(), extractor.filter());
        let points = reduce_columns(&mask.as_view());
        let elapsed_ms = t0.elapsed().as_secs_f64() * 1e3;

        println!(
            "  lane {i}: {}/{} columns  ({elapsed_ms:.2} ms)",
            points.len(),
            region.width()
        );

        let normalized = normalize_points(&points, region.width(), region.height())
            .context("normalizing lane points")?
            .into_iter()
            .map(|p| UnitPointDto { x: p.x, y: p.y })
            .collect();

        results.push(LaneResult {
            lane: i,
            region: [region.left, region.top, region.right, region.bottom],
            elapsed_ms,
            points: points.iter().map(|p| PointDto { x: p.x, y: p.y }).collect(),
            normalized,
        });
    }

    println!(
        "resample + {} lanes: {:.2} ms",
        results.len(),
        total_start.elapsed().as_secs_f64() * 1e3
    );

    let json = serde_json::to_vec_pretty(&results).context("serializing lane results")?;
    fs::write(&out_path, json).with_context(|| format!("writing {}", out_path.display()))?;

    println!("{} lanes written to {}", results.len(), out_path.display());
    Ok(())
}
