use argh::FromArgs;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;

use canny::image::{EdgePlane, Frame, ImageSize};
use canny::imgproc::{parallel::ExecutionStrategy, Pipeline, PipelineConfig};

#[derive(FromArgs)]
/// Extract Canny edge maps from a batch of images
struct Args {
    /// path to an input image, can be repeated
    #[argh(option, short = 'i')]
    input: Vec<PathBuf>,

    /// directory where the edge maps are written
    #[argh(option, short = 'o', default = "PathBuf::from(\"edges\")")]
    output_dir: PathBuf,

    /// low hysteresis threshold
    #[argh(option)]
    low: Option<f32>,

    /// high hysteresis threshold
    #[argh(option)]
    high: Option<f32>,

    /// path to a json pipeline config
    #[argh(option, short = 'c')]
    config: Option<PathBuf>,

    /// run the simplified single threshold variant
    #[argh(switch)]
    simplified: bool,

    /// number of threads used by each frame
    #[argh(option)]
    threads: Option<usize>,
}

/// Read a pipeline config from a json file.
fn read_config(path: &Path) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// Merge the command line flags on top of the file config, if any.
fn build_config(args: &Args) -> Result<PipelineConfig, Box<dyn std::error::Error>> {
    let base = match &args.config {
        Some(path) => read_config(path)?,
        None => PipelineConfig::default(),
    };

    let low = args.low.unwrap_or(base.low_threshold());
    let high = args.high.unwrap_or(base.high_threshold());

    let mut config = if args.simplified {
        PipelineConfig::simplified(high)?
    } else {
        PipelineConfig::new(low, high)?
            .with_stages(base.stages())
            .with_luma(base.luma())
    };

    config = match args.threads {
        Some(n) => config.with_strategy(ExecutionStrategy::Fixed(n))?,
        None => config.with_strategy(base.strategy())?,
    };

    Ok(config)
}

fn read_frame(path: &Path) -> Result<Frame, Box<dyn std::error::Error>> {
    let rgba = image::open(path)?.to_rgba8();
    let size = ImageSize {
        width: rgba.width() as usize,
        height: rgba.height() as usize,
    };
    Ok(Frame::new(size, rgba.into_raw())?)
}

fn output_path(output_dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "frame".to_string());
    output_dir.join(format!("{stem}_edges.png"))
}

/// Wrap an edge plane into an 8-bit gray image without copying.
fn gray_image_from_edges(
    edges: EdgePlane,
) -> Result<image::GrayImage, Box<dyn std::error::Error>> {
    let width = u32::try_from(edges.width())?;
    let height = u32::try_from(edges.height())?;
    let gray = image::GrayImage::from_raw(width, height, edges.into_vec())
        .ok_or("edge plane does not match its size")?;
    Ok(gray)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Args = argh::from_env();
    if args.input.is_empty() {
        return Err("at least one --input image is required".into());
    }

    let config = build_config(&args)?;
    log::info!("pipeline config: {}", serde_json::to_string(&config)?);

    // decode all the frames before timing the pipeline
    let frames = args
        .input
        .iter()
        .map(|path| read_frame(path))
        .collect::<Result<Vec<_>, _>>()?;

    let pipeline = Pipeline::new(config);

    let start = Instant::now();
    let edge_planes = frames
        .par_iter()
        .map(|frame| pipeline.process(frame))
        .collect::<Result<Vec<_>, _>>()?;
    let elapsed = start.elapsed();

    let num_pixels: usize = frames.iter().map(|f| f.size().num_pixels()).sum();
    log::info!(
        "processed {} frames ({} pixels) in {:?}, {:.1} Mpx/s",
        frames.len(),
        num_pixels,
        elapsed,
        num_pixels as f64 / elapsed.as_secs_f64().max(f64::EPSILON) / 1e6
    );

    std::fs::create_dir_all(&args.output_dir)?;

    for (input, edges) in args.input.iter().zip(edge_planes) {
        let gray = gray_image_from_edges(edges)?;
        let path = output_path(&args.output_dir, input);
        gray.save(&path)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}
