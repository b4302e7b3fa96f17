use cutio_sync::EngineConfig;
use cutio_sync::player::gst_player::GstPlayerFactory;
use cutio_sync::player::surface::VideoSurface;
use cutio_sync::sync::clock::TimelineClock;
use cutio_sync::sync::driver::{TimelineDriver, TimelineEvent};
use cutio_sync::types::timeline::Timeline;

use anyhow::Context;
use clap::Parser;
use gstreamer as gst;
use log::{info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Headless preview: plays a timeline through GStreamer players kept in sync
/// by the timeline driver.
#[derive(Parser, Debug)]
#[command(name = "cutio-sync", version)]
struct Args {
    /// Timeline JSON file (tracks, clips, zoomClips)
    timeline: PathBuf,

    /// Engine config JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start position in milliseconds
    #[arg(short, long, default_value_t = 0)]
    start_ms: i64,

    /// Stop after this many seconds of wall-clock time
    #[arg(short = 'd', long)]
    run_secs: Option<u64>,

    /// Master volume (0-1)
    #[arg(long, default_value_t = 1.0)]
    volume: f64,

    #[arg(long)]
    mute: bool,

    /// Write the timeline back out with defaults filled in, then exit
    #[arg(long, value_name = "PATH")]
    write_timeline: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    gst::init().context("GStreamer init failed")?;

    let config = match &args.config {
        Some(path) => EngineConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    let timeline = Timeline::load_from_file(&args.timeline)
        .with_context(|| format!("Failed to load timeline {}", args.timeline.display()))?;
    info!(
        "Loaded {} tracks, {} clips, {}ms",
        timeline.tracks.len(),
        timeline.clips().count(),
        timeline.duration_ms()
    );

    if let Some(path) = &args.write_timeline {
        timeline
            .save_to_file(path)
            .with_context(|| format!("Failed to write timeline {}", path.display()))?;
        info!("Wrote timeline to {}", path.display());
        return Ok(());
    }

    let mut driver = TimelineDriver::new(GstPlayerFactory::new(&config), &config);
    driver.reconcile(&timeline);
    for id in driver.broken_clips() {
        warn!("Clip {} will not play", id);
    }

    let mut surfaces: HashMap<String, Arc<VideoSurface>> = HashMap::new();
    for (track, clip) in timeline.clips() {
        if !track.is_video() || !driver.is_mounted(&clip.id) {
            continue;
        }
        let surface = Arc::new(VideoSurface::new());
        driver.attach_surface(&clip.id, surface.clone())?;
        surfaces.insert(clip.id.clone(), surface);
    }

    let mut clock = TimelineClock::new(timeline.duration_ms());
    clock.set_volume(args.volume);
    clock.set_muted(args.mute);
    clock.seek(args.start_ms);
    driver.handle(&TimelineEvent::Scrubbed, &timeline, clock.state());

    if !clock.play() {
        info!("Nothing to play from {}ms", args.start_ms);
        return Ok(());
    }
    driver.handle(&TimelineEvent::PlaybackToggled, &timeline, clock.state());

    let tick = Duration::from_millis(config.tick_interval_ms.max(1));
    let deadline = args.run_secs.map(|secs| Instant::now() + Duration::from_secs(secs));
    while clock.state().is_playing {
        std::thread::sleep(tick);
        clock.update();
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            clock.pause();
        }
        let event = if clock.state().is_playing {
            TimelineEvent::Tick
        } else {
            TimelineEvent::PlaybackToggled
        };
        driver.handle(&event, &timeline, clock.state());
    }

    info!("Stopped at {}ms", clock.state().current_time_ms);
    for (id, surface) in &surfaces {
        info!(
            "Clip {}: {} frames, last at {:?}s",
            id,
            surface.frames_received(),
            surface.latest_timestamp()
        );
        if let Some(frame) = surface.take_frame() {
            info!("Clip {}: last frame {}x{}", id, frame.width, frame.height);
        }
    }
    Ok(())
}
