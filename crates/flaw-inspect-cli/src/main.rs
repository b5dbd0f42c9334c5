//! Inspect a directory of belt frame stills and file per-object audit
//! crops by verdict.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{error, info, warn, LevelFilter};

use flaw_inspect::{
    DefectKind, InfluxSink, InspectionOutcome, InspectionPipeline, LogSink, PipelineError,
    PipelineParams, RunSummary, TelemetrySink,
};
use flaw_inspect_core::{calibrate, init_with_level, CalibrationContext, ColorImage};
use flaw_inspect_telemetry::{InfluxConfig, TelemetryError};

#[derive(Parser)]
#[command(name = "flaw-inspect")]
#[command(about = "Conveyor-belt product flaw inspection over captured frames", version)]
struct Cli {
    /// Directory of frame stills, inspected in filename order
    frames: PathBuf,

    /// Camera field of view in degrees (with --distance, replaces the
    /// fallback pixel scale)
    #[arg(long)]
    fov: Option<f64>,

    /// Camera-to-belt distance in millimeters
    #[arg(long)]
    distance: Option<f64>,

    /// JSON file overriding the default pipeline parameters
    #[arg(long)]
    params: Option<PathBuf>,

    /// Time-series store host
    #[arg(long, default_value = "127.0.0.1")]
    influx_host: String,

    /// Time-series store port
    #[arg(long, default_value_t = 8086)]
    influx_port: u16,

    /// Target database name
    #[arg(long, default_value = "Defect")]
    database: String,

    /// Log records instead of delivering them
    #[arg(long)]
    dry_run: bool,

    /// Output directory for per-verdict audit crops
    #[arg(long, default_value = "inspection-out")]
    out_dir: PathBuf,

    /// Enable debug logging
    #[arg(long, short)]
    verbose: bool,
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("frame decode failure: {0}")]
    Image(#[from] image::ImageError),
    #[error("parameter file is not valid JSON: {0}")]
    Params(#[from] serde_json::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error("no frames found in {0}")]
    NoFrames(PathBuf),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if init_with_level(level).is_err() {
        eprintln!("a logger is already installed");
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let params = load_params(cli.params.as_deref())?;
    let frame_paths = list_frames(&cli.frames)?;
    if frame_paths.is_empty() {
        return Err(CliError::NoFrames(cli.frames));
    }

    let first = load_frame(&frame_paths[0])?;
    let calibration = calibration_from(&cli, &first);
    prepare_out_dirs(&cli.out_dir)?;

    let frames = frame_paths.iter().filter_map(|path| match load_frame(path) {
        Ok(frame) => Some(frame),
        Err(err) => {
            warn!("skipping {}: {err}", path.display());
            None
        }
    });

    let summary = if cli.dry_run {
        info!("dry run: records are logged, not delivered");
        let mut pipeline = InspectionPipeline::new(params, calibration, LogSink);
        run_frames(&mut pipeline, frames, &cli.out_dir)?
    } else {
        let config = InfluxConfig {
            host: cli.influx_host.clone(),
            port: cli.influx_port,
            database: cli.database.clone(),
        };
        let sink = InfluxSink::connect(config)?;
        let mut pipeline = InspectionPipeline::new(params, calibration, sink);
        run_frames(&mut pipeline, frames, &cli.out_dir)?
    };

    info!(
        "inspected {} objects across {} frames",
        summary.objects_inspected, summary.frames_seen
    );
    Ok(())
}

fn run_frames<S: TelemetrySink>(
    pipeline: &mut InspectionPipeline<S>,
    frames: impl Iterator<Item = ColorImage>,
    out_dir: &Path,
) -> Result<RunSummary, PipelineError> {
    pipeline.run(frames, |outcome| {
        if let Err(err) = save_outcome(out_dir, outcome) {
            warn!(
                "could not save crops for object {}: {err}",
                outcome.record.object_number
            );
        }
        true
    })
}

fn load_params(path: Option<&Path>) -> Result<PipelineParams, CliError> {
    match path {
        Some(path) => Ok(serde_json::from_str(&fs::read_to_string(path)?)?),
        None => Ok(PipelineParams::default()),
    }
}

fn calibration_from(cli: &Cli, first_frame: &ColorImage) -> CalibrationContext {
    match (cli.fov, cli.distance) {
        (Some(fov), Some(distance)) => calibrate(
            fov,
            distance,
            first_frame.width as u32,
            first_frame.height as u32,
        ),
        _ => CalibrationContext::default(),
    }
}

/// Image files in the frame directory, in filename order.
fn list_frames(dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("png" | "jpg" | "jpeg" | "bmp")
            )
        })
        .collect();
    paths.sort();
    Ok(paths)
}

fn load_frame(path: &Path) -> Result<ColorImage, CliError> {
    let rgb = image::open(path)?.into_rgb8();
    Ok(ColorImage {
        width: rgb.width() as usize,
        height: rgb.height() as usize,
        data: rgb.into_raw(),
    })
}

fn verdict_dir(kind: DefectKind) -> &'static str {
    match kind {
        DefectKind::Orientation => "orientation",
        DefectKind::Color => "color",
        DefectKind::Crack => "crack",
    }
}

fn prepare_out_dirs(out_dir: &Path) -> Result<(), CliError> {
    for dir in ["orientation", "color", "crack", "no_defect"] {
        fs::create_dir_all(out_dir.join(dir))?;
    }
    Ok(())
}

fn save_crop(path: &Path, crop: &ColorImage) -> Result<(), CliError> {
    let buffer = image::RgbImage::from_raw(
        crop.width as u32,
        crop.height as u32,
        crop.data.clone(),
    );
    if let Some(buffer) = buffer {
        buffer.save(path)?;
    }
    Ok(())
}

fn save_outcome(out_dir: &Path, outcome: &InspectionOutcome) -> Result<(), CliError> {
    let n = outcome.record.object_number;
    for (kind, snapshot) in &outcome.snapshots {
        let path = out_dir
            .join(verdict_dir(*kind))
            .join(format!("object-{n}.png"));
        save_crop(&path, snapshot)?;
    }
    if let Some(crop) = &outcome.clean_crop {
        let path = out_dir.join("no_defect").join(format!("object-{n}.png"));
        save_crop(&path, crop)?;
    }
    Ok(())
}
