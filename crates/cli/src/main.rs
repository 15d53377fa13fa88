use std::path::{Path, PathBuf};
use std::process;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use clap::Parser;

use handsignal_core::detection::infrastructure::replay_detector::ReplayLandmarkDetector;
use handsignal_core::pipeline::events::LandmarkerEvent;
use handsignal_core::pipeline::infrastructure::threaded_stream_executor::ThreadedStreamExecutor;
use handsignal_core::pipeline::stream_executor::{StreamConfig, StreamExecutor};
use handsignal_core::preprocess::domain::frame_preparer::FramePreparer;
use handsignal_core::preprocess::infrastructure::cpu_frame_preparer::CpuFramePreparer;
use handsignal_core::shared::config::{Delegate, LandmarkerConfig};
use handsignal_core::shared::frame::Frame;
use handsignal_core::shared::rotation::Rotation;
use handsignal_core::signal::domain::control_colors::derive_control_colors;

/// Hand-landmark frame preparation and control-color derivation.
#[derive(Parser)]
#[command(name = "handsignal")]
struct Cli {
    /// Input image file (stands in for one captured frame).
    input: PathBuf,

    /// Write the prepared frame to this file.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Capture rotation metadata in degrees.
    #[arg(long, default_value = "0")]
    rotation: i32,

    /// Treat the capture as front-facing (mirror flip on prepare).
    #[arg(long)]
    mirror: bool,

    /// Mirror flip magnitude, in (0, 1].
    #[arg(long, default_value = "0.25")]
    scale: f32,

    /// Recorded landmark frames (JSON) to replay through the pipeline.
    #[arg(long)]
    landmarks: Option<PathBuf>,

    /// Maximum number of hands forwarded to the engine.
    #[arg(long, default_value = "1")]
    num_hands: usize,

    /// Detection/tracking/presence confidence threshold (0.0-1.0).
    #[arg(long, default_value = "0.4")]
    confidence: f32,

    /// Request the GPU delegate.
    #[arg(long)]
    gpu: bool,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = LandmarkerConfig {
        delegate: if cli.gpu { Delegate::Gpu } else { Delegate::Cpu },
        num_hands: cli.num_hands,
        min_confidence: cli.confidence,
        mirror_scale: cli.scale,
    };
    config.validate()?;

    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }

    let frame = load_frame(&cli.input, cli.rotation, cli.mirror)?;
    let preparer = CpuFramePreparer::new(config.mirror_scale);

    let prepared = preparer.prepare(&frame)?;
    log::info!(
        "Prepared frame: {}x{} -> {}x{}",
        frame.width(),
        frame.height(),
        prepared.width(),
        prepared.height()
    );

    if let Some(output) = &cli.output {
        save_frame(&prepared, output)?;
        log::info!("Output written to {}", output.display());
    }

    if let Some(landmarks) = &cli.landmarks {
        run_replay(&config, preparer, frame, landmarks)?;
    }

    Ok(())
}

/// Streams the captured frame through the pipeline once per recorded
/// landmark frame, printing the derived control colors.
fn run_replay(
    config: &LandmarkerConfig,
    preparer: CpuFramePreparer,
    frame: Frame,
    landmarks: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let detector = ReplayLandmarkDetector::from_path(landmarks)?;
    let total = detector.remaining();

    let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Frame>(1);
    let (event_tx, event_rx) = crossbeam_channel::unbounded::<LandmarkerEvent>();
    let stream_config = StreamConfig {
        options: config.summary(),
        cancelled: Arc::new(AtomicBool::new(false)),
    };

    let worker = std::thread::spawn(move || {
        ThreadedStreamExecutor::new()
            .execute(
                Box::new(preparer),
                Box::new(detector),
                frame_rx,
                event_tx,
                stream_config,
            )
            .map_err(|e| e.to_string())
    });

    for _ in 0..total {
        frame_tx
            .send(frame.clone())
            .map_err(|_| "Stream worker closed unexpectedly")?;
    }
    drop(frame_tx);

    for event in event_rx {
        match event {
            LandmarkerEvent::Created { options } => println!("{options}"),
            LandmarkerEvent::Results(result) => {
                let colors = derive_control_colors(result.hands());
                println!(
                    "[{}x{}] {:>4}ms  left {}  right {}",
                    result.input_height(),
                    result.input_width(),
                    result.inference_time_ms(),
                    colors.horizontal,
                    colors.vertical
                );
            }
            LandmarkerEvent::Error { message, .. } => log::error!("{message}"),
        }
    }

    worker.join().map_err(|_| "Stream worker panicked")??;
    Ok(())
}

fn load_frame(path: &Path, rotation: i32, mirror: bool) -> Result<Frame, Box<dyn std::error::Error>> {
    let rgba = image::open(path)?.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(Frame::new(
        rgba.into_raw(),
        width,
        height,
        Rotation::from_degrees(rotation),
        mirror,
        0,
    ))
}

fn save_frame(frame: &Frame, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let buffer =
        image::RgbaImage::from_raw(frame.width(), frame.height(), frame.data().to_vec())
            .ok_or("Prepared frame buffer does not match its dimensions")?;
    buffer.save(path)?;
    Ok(())
}
