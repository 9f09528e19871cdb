use std::path::{Path, PathBuf};

use angle_annotator_core::{
    overlay::format_degrees, polyline_angles, AnnotationSession, AnnotatorError, AppConfig, Point,
    SessionEvent,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod headless;

use headless::{HeadlessVideo, LogRenderer};

fn main() -> angle_annotator_core::Result<()> {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Measure { points, precision } => run_measure(&points, precision),
        Commands::Replay {
            script,
            config,
            no_camera,
        } => run_replay(&script, config.as_deref(), no_camera),
    }
}

fn run_measure(raw: &[String], precision: usize) -> angle_annotator_core::Result<()> {
    let points = raw
        .iter()
        .map(String::as_str)
        .map(parse_point)
        .collect::<angle_annotator_core::Result<Vec<_>>>()?;
    tracing::info!(count = points.len(), "measuring polyline");

    let angles = polyline_angles(&points);
    if angles.is_empty() {
        println!("at least three points are needed to measure an angle");
    }
    for (index, degrees) in angles.iter().enumerate() {
        let vertex = points[index + 1];
        println!(
            "vertex {} ({}, {}): {}",
            index + 1,
            vertex.x,
            vertex.y,
            format_degrees(*degrees, precision)
        );
    }
    Ok(())
}

fn run_replay(
    script: &Path,
    config: Option<&Path>,
    no_camera: bool,
) -> angle_annotator_core::Result<()> {
    let config = match config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let events: Vec<SessionEvent> = serde_json::from_str(&std::fs::read_to_string(script)?)?;
    tracing::info!(?script, events = events.len(), "replaying session script");

    let video = HeadlessVideo::new(!no_camera);
    let mut session = AnnotationSession::new(config, video, LogRenderer::default());
    let rejected = replay(&mut session, events)?;

    tracing::info!(
        rejected,
        frames = session.renderer().frames_rendered(),
        paused = session.video().is_paused(),
        playing = session.video().now_playing().unwrap_or("live feed"),
        "replay finished"
    );
    println!("{}", serde_json::to_string_pretty(&session.overlay())?);
    Ok(())
}

type HeadlessSession = AnnotationSession<HeadlessVideo, LogRenderer>;

/// Applies events in order, returning how many were rejected.
fn replay(
    session: &mut HeadlessSession,
    events: Vec<SessionEvent>,
) -> angle_annotator_core::Result<usize> {
    let mut rejected = 0;
    for (step, event) in events.into_iter().enumerate() {
        match session.handle(event) {
            Ok(outcome) => tracing::info!(step, ?outcome, "event handled"),
            Err(err) if err.is_rejection() => {
                rejected += 1;
                tracing::warn!(step, error = %err, "event rejected");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(rejected)
}

fn parse_point(value: &str) -> angle_annotator_core::Result<Point> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| AnnotatorError::msg(format!("expected `x,y`, got `{value}`")))?;
    let coordinate = |raw: &str| {
        raw.trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| AnnotatorError::msg(format!("invalid coordinate `{raw}` in `{value}`")))
    };
    Ok(Point::new(coordinate(x)?, coordinate(y)?))
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Measure angles on a paused video frame", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the interior angles of a polyline given as `x,y` pairs.
    Measure {
        /// Points in placement order, e.g. `0,0 10,0 10,10`.
        #[arg(required = true, allow_hyphen_values = true)]
        points: Vec<String>,
        /// Decimal places shown for each angle.
        #[arg(short, long, default_value_t = 2)]
        precision: usize,
    },
    /// Replay a JSON list of session events against a headless video source.
    Replay {
        /// Path to the event script.
        script: PathBuf,
        /// Optional JSON configuration file.
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Simulate a host without a camera stream.
        #[arg(long)]
        no_camera: bool,
    },
}
