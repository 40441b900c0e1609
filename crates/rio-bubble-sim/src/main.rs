//! rio-bubble-sim: drive a bubble engine headlessly and dump its frames.
//!
//! Reads an optional `BubbleConfig` and timeline script (both RON), samples
//! the engine at a fixed frame rate, and writes one JSON object per frame to
//! stdout. Logs go to stderr; set `RUST_LOG=rio_bubble=trace` to watch
//! transitions and circle reconciliation.

use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kurbo::Size;
use rio_bubble::{BubbleConfig, BubbleEngine};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod record;
mod script;

use record::FrameRecord;
use script::SimScript;

/// Upper bound on frames per run, about a day at 60 fps.
const MAX_FRAMES: f64 = 5_184_000.0;

#[derive(Parser, Debug)]
#[command(name = "rio-bubble-sim", about = "Sample Rio bubble animation frames as JSON lines")]
struct Args {
    /// BubbleConfig RON file (defaults when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Timeline script RON file (read → thinking → talking → read when omitted)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Frames per second
    #[arg(long, default_value_t = 60.0)]
    fps: f64,

    /// Only emit frames whose drawable content changed
    #[arg(long)]
    changes_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "rio_bubble=info,rio_bubble_sim=info,warn".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    anyhow::ensure!(args.fps > 0.0 && args.fps.is_finite(), "--fps must be positive");

    let config = match &args.config {
        Some(path) => {
            BubbleConfig::load(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => BubbleConfig::default(),
    };
    let script = match &args.script {
        Some(path) => {
            let text = std::fs::read_to_string(path).with_context(|| format!("reading script {}", path.display()))?;
            SimScript::from_ron_str(&text).with_context(|| format!("parsing script {}", path.display()))?
        }
        None => SimScript::default(),
    };

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let written = run(&config, &script, args.fps, args.changes_only, &mut out)?;
    out.flush()?;

    tracing::info!(frames = written, "simulation finished");
    Ok(())
}

/// Sample `script` at `fps` and write frames as JSON lines. Returns frames written.
fn run(config: &BubbleConfig, script: &SimScript, fps: f64, changes_only: bool, out: &mut impl Write) -> Result<usize> {
    anyhow::ensure!(
        script.duration.is_finite() && script.duration >= 0.0,
        "script duration must be finite and non-negative (got {})",
        script.duration
    );
    let frames = script.duration * fps;
    anyhow::ensure!(frames <= MAX_FRAMES, "script would produce {frames:.0} frames (limit {MAX_FRAMES})");

    let corner_radius = script.corner_radius.unwrap_or(config.bubble_corner_radius);
    let mut size = (script.width, script.height);
    let mut bubble_type = script.initial;

    let mut engine = BubbleEngine::new(script.initial, config.clone());
    engine.configure(Size::new(size.0, size.1), corner_radius, bubble_type, 0.0);
    if !engine.packing().is_valid {
        tracing::warn!(width = size.0, height = size.1, "outline could not be packed; frames use the error color");
    }

    let mut steps = script.steps.iter().peekable();
    let mut last: Option<FrameRecord> = None;
    let mut written = 0;
    let frame_count = frames.ceil() as u64;

    for n in 0..=frame_count {
        let now = n as f64 / fps;

        while let Some(step) = steps.next_if(|s| s.at <= now) {
            bubble_type = step.bubble_type;
            if let Some(new_size) = step.size {
                size = new_size;
            }
            tracing::info!(at = step.at, %bubble_type, "script step");
            engine.configure(Size::new(size.0, size.1), corner_radius, bubble_type, step.at);
        }

        let record = FrameRecord::from(&engine.sample_frame(now));
        if changes_only && last.as_ref().is_some_and(|prev| prev.same_drawable(&record)) {
            continue;
        }
        serde_json::to_writer(&mut *out, &record)?;
        out.write_all(b"\n")?;
        written += 1;
        last = Some(record);
    }

    Ok(written)
}
