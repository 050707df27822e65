use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use image::imageops::{self, FilterType};
use image::{GrayImage, Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use log::info;
use serde::{Deserialize, Serialize};
use wt_core::{Image, Point2u, Region, Rgb8};
use wt_lanes::{LaneExtractor, LaneTrace, LayoutConfig};
use wt_trace::GridSuppressConfig;

#[derive(Parser, Debug)]
#[command(name = "wt_extract")]
#[command(about = "Extract waveform traces from a rasterised chart page")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trace every lane of a page image and write CSV/PNG/JSON outputs
    #[command(name = "extract")]
    Extract(ExtractArgs),
    /// Print the built-in A4 layout as JSON
    #[command(name = "layout")]
    Layout(LayoutArgs),
}

#[derive(Args, Debug, Clone)]
struct ExtractArgs {
    /// Rasterised page (PNG, JPEG, ...) at any resolution
    #[arg(long, required = true)]
    input: PathBuf,
    /// Output directory, created if missing
    #[arg(long, default_value = "waveforms")]
    out: PathBuf,
    /// Layout JSON as written by the `layout` subcommand
    #[arg(long)]
    layout: Option<PathBuf>,
    /// Also write lane masks and grid estimates
    #[arg(long)]
    save_debug: bool,
    /// Also render each trace back into a PNG
    #[arg(long)]
    plot: bool,
    /// Supersampling factor for `--plot`
    #[arg(long, default_value_t = 4)]
    plot_scale: u32,
    #[command(flatten)]
    filter: FilterArgs,
}

#[derive(Args, Debug, Clone)]
struct FilterArgs {
    #[arg(long, default_value_t = 5)]
    blur_ksize: usize,
    #[arg(long, default_value_t = 35)]
    threshold_block: usize,
    #[arg(long, default_value_t = -5, allow_hyphen_values = true)]
    threshold_offset: i32,
    #[arg(long, default_value_t = 61)]
    ruling_len: usize,
    #[arg(long, default_value_t = 3)]
    open_size: usize,
    #[arg(long, default_value_t = 5)]
    close_size: usize,
}

#[derive(Args, Debug, Clone)]
struct LayoutArgs {
    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct RegionDto {
    left: usize,
    top: usize,
    right: usize,
    bottom: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LayoutFile {
    page_width: usize,
    page_height: usize,
    canvas: RegionDto,
    lanes: Vec<RegionDto>,
}

#[derive(Debug, Clone, Serialize)]
struct FilterDto {
    blur_ksize: usize,
    threshold_block: usize,
    threshold_offset: i32,
    ruling_len: usize,
    open_size: usize,
    close_size: usize,
}

#[derive(Debug, Clone, Serialize)]
struct LaneMeta {
    lane: usize,
    region: RegionDto,
    points: usize,
    columns: usize,
    csv: String,
}

#[derive(Debug, Clone, Serialize)]
struct MetaExtract {
    input: String,
    source_size: [usize; 2],
    page_size: [usize; 2],
    canvas: RegionDto,
    filter: FilterDto,
    lanes: Vec<LaneMeta>,
}

impl From<Region> for RegionDto {
    fn from(r: Region) -> Self {
        Self {
            left: r.left,
            top: r.top,
            right: r.right,
            bottom: r.bottom,
        }
    }
}

impl From<RegionDto> for Region {
    fn from(r: RegionDto) -> Self {
        Region::new(r.left, r.top, r.right, r.bottom)
    }
}

impl LayoutFile {
    fn from_layout(layout: &LayoutConfig) -> Self {
        Self {
            page_width: layout.page_width(),
            page_height: layout.page_height(),
            canvas: (*layout.canvas()).into(),
            lanes: layout.lanes().iter().map(|&r| r.into()).collect(),
        }
    }

    fn into_layout(self) -> Result<LayoutConfig> {
        LayoutConfig::new(
            self.page_width,
            self.page_height,
            self.canvas.into(),
            self.lanes.into_iter().map(Region::from).collect(),
        )
        .context("validating layout")
    }
}

impl From<&FilterArgs> for GridSuppressConfig {
    fn from(a: &FilterArgs) -> Self {
        Self {
            blur_ksize: a.blur_ksize,
            threshold_block: a.threshold_block,
            threshold_offset: a.threshold_offset,
            ruling_len: a.ruling_len,
            open_size: a.open_size,
            close_size: a.close_size,
        }
    }
}

impl From<&GridSuppressConfig> for FilterDto {
    fn from(c: &GridSuppressConfig) -> Self {
        Self {
            blur_ksize: c.blur_ksize,
            threshold_block: c.threshold_block,
            threshold_offset: c.threshold_offset,
            ruling_len: c.ruling_len,
            open_size: c.open_size,
            close_size: c.close_size,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Extract(args) => run_extract(args),
        Command::Layout(args) => run_layout(args),
    }
}

fn run_extract(args: ExtractArgs) -> Result<()> {
    ensure_file_exists(&args.input, "input")?;
    if args.plot && args.plot_scale == 0 {
        bail!("--plot-scale must be at least 1.");
    }

    let layout = match &args.layout {
        Some(path) => {
            ensure_file_exists(path, "layout")?;
            let file: LayoutFile = read_json(path)?;
            file.into_layout()
                .with_context(|| format!("loading layout {}", path.display()))?
        }
        None => LayoutConfig::default(),
    };
    let filter = GridSuppressConfig::from(&args.filter);
    let extractor = LaneExtractor::with_filter(layout, filter)
        .context("configuring extractor")?
        .keep_grid(args.save_debug);

    fs::create_dir_all(&args.out)
        .with_context(|| format!("creating output directory {}", args.out.display()))?;

    let source = load_input_rgb8(&args.input)?;
    let page = extractor
        .resample_rgb8(&source.as_view())
        .context("resampling page to the layout size")?;

    let canvas = extractor
        .layout()
        .canvas()
        .crop(&page.as_view())
        .context("cropping canvas")?;
    save_rgb_image(args.out.join("crop.png"), &canvas.to_image())?;

    let traces = extractor
        .extract_rgb8(&page.as_view())
        .context("extracting lanes")?;

    let mut lanes = Vec::with_capacity(traces.len());
    for trace in &traces {
        let n = trace.index + 1;
        let csv = format!("waveform_{n}.csv");
        write_points_csv(args.out.join(&csv), &trace.points)?;

        if args.save_debug {
            save_u8_image(args.out.join(format!("waveform_{n}.png")), &trace.mask)?;
            if let Some(grid) = &trace.grid {
                save_u8_image(args.out.join(format!("waveform_{n}_grid.png")), grid)?;
            }
        }
        if args.plot {
            let plot = render_trace_plot(trace, args.plot_scale)?;
            let path = args.out.join(format!("waveform_{n}_plot.png"));
            plot.save(&path)
                .with_context(|| format!("saving plot {}", path.display()))?;
        }

        info!(
            "lane {n}: {} points over {} columns -> {csv}",
            trace.points.len(),
            trace.region.width()
        );
        lanes.push(LaneMeta {
            lane: n,
            region: trace.region.into(),
            points: trace.points.len(),
            columns: trace.region.width(),
            csv,
        });
    }

    let layout = extractor.layout();
    write_json(
        args.out.join("meta.json"),
        &MetaExtract {
            input: args.input.display().to_string(),
            source_size: [source.width(), source.height()],
            page_size: [layout.page_width(), layout.page_height()],
            canvas: (*layout.canvas()).into(),
            filter: extractor.filter().into(),
            lanes,
        },
    )?;

    info!(
        "wrote {} lane traces to {}",
        traces.len(),
        args.out.display()
    );
    Ok(())
}

fn run_layout(args: LayoutArgs) -> Result<()> {
    let file = LayoutFile::from_layout(&LayoutConfig::default());
    match args.out {
        Some(path) => {
            write_json(path.clone(), &file)?;
            info!("wrote default layout to {}", path.display());
        }
        None => {
            let text = serde_json::to_string_pretty(&file).context("serializing layout")?;
            println!("{text}");
        }
    }
    Ok(())
}

fn load_input_rgb8(path: &Path) -> Result<Image<Rgb8>> {
    let dyn_img =
        image::open(path).with_context(|| format!("opening input image {}", path.display()))?;
    let rgb = dyn_img.to_rgb8();
    let (w, h) = rgb.dimensions();
    let data = rgb
        .into_raw()
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();

    Image::from_vec(w as usize, h as usize, data)
        .with_context(|| format!("constructing page image from {}", path.display()))
}

/// Rasterises the trace at `scale`x the lane size, then shrinks it back so
/// the polyline comes out antialiased.
fn render_trace_plot(trace: &LaneTrace, scale: u32) -> Result<RgbImage> {
    let (w, h) = dims_u32(trace.region.width(), trace.region.height())?;
    let (sw, sh) = (
        w.checked_mul(scale).context("plot width overflow")?,
        h.checked_mul(scale).context("plot height overflow")?,
    );

    let mut canvas = RgbImage::from_pixel(sw, sh, Rgb([255, 255, 255]));
    let ink = Rgb([20, 60, 160]);
    let s = scale as f32;
    let to_plot = |p: &Point2u| {
        (
            p.x as f32 * s + s * 0.5,
            (h as f32 - 1.0 - p.y as f32) * s + s * 0.5,
        )
    };

    for pair in trace.points.windows(2) {
        let (a, b) = (to_plot(&pair[0]), to_plot(&pair[1]));
        for k in 0..scale {
            let dy = k as f32 - s * 0.5;
            draw_line_segment_mut(&mut canvas, (a.0, a.1 + dy), (b.0, b.1 + dy), ink);
        }
    }

    if scale == 1 {
        return Ok(canvas);
    }
    Ok(imageops::resize(&canvas, w, h, FilterType::Lanczos3))
}

fn dims_u32(width: usize, height: usize) -> Result<(u32, u32)> {
    let w = u32::try_from(width).context("image width exceeds u32")?;
    let h = u32::try_from(height).context("image height exceeds u32")?;
    Ok((w, h))
}

fn save_rgb_image(path: PathBuf, img: &Image<Rgb8>) -> Result<()> {
    let (w, h) = dims_u32(img.width(), img.height())?;
    let raw = img.data().iter().flatten().copied().collect();
    let rgb = RgbImage::from_raw(w, h, raw).context("constructing RgbImage from raw bytes")?;
    rgb.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn save_u8_image(path: PathBuf, img: &Image<u8>) -> Result<()> {
    let (w, h) = dims_u32(img.width(), img.height())?;
    let gray = GrayImage::from_raw(w, h, img.data().to_vec())
        .context("constructing GrayImage from raw bytes")?;
    gray.save(&path)
        .with_context(|| format!("saving image {}", path.display()))
}

fn write_points_csv(path: PathBuf, points: &[Point2u]) -> Result<()> {
    let file = fs::File::create(&path).with_context(|| format!("creating {}", path.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "x,y").context("writing csv header")?;
    for p in points {
        writeln!(out, "{},{}", p.x, p.y).context("writing csv row")?;
    }
    out.flush()
        .with_context(|| format!("flushing {}", path.display()))
}

fn write_json(path: PathBuf, value: &impl Serialize) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value).context("serializing json")?;
    fs::write(&path, bytes).with_context(|| format!("writing json {}", path.display()))
}

fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T> {
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_slice(&data).with_context(|| format!("parsing json {}", path.display()))
}

fn ensure_file_exists(path: &Path, what: &str) -> Result<()> {
    if !path.exists() {
        bail!("{} file does not exist: {}", what, path.display());
    }
    if !path.is_file() {
        bail!("{} path is not a file: {}", what, path.display());
    }
    Ok(())
}
