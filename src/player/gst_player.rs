use super::probe::MediaProbe;
use super::{FrameSink, MediaPlayer, PlayerFactory, VideoFrame};
use crate::config::EngineConfig;
use crate::error::SyncError;
use crate::types::media::Clip;

use gst::prelude::*;
use gstreamer as gst;
use gstreamer_app as gst_app;
use gstreamer_video as gst_video;
use log::{debug, info, warn};
use std::sync::{Arc, Mutex};

type SharedSink = Arc<Mutex<Option<Arc<dyn FrameSink>>>>;

/// A `playbin` decoding one clip source. Video goes to an RGBA appsink whose
/// frames are forwarded to the attached surface, audio to the default sink.
pub struct GstPlayer {
    playbin: gst::Element,
    bus: gst::Bus,
    surface: SharedSink,
    rate: f64,
    last_seek: f64,
}

impl GstPlayer {
    pub fn new(name: &str, path: &str) -> Result<Self, SyncError> {
        gst::init()?;

        let uri = gst::glib::filename_to_uri(path, None)?;
        let playbin = gst::ElementFactory::make("playbin")
            .name(name)
            .property("uri", uri.as_str())
            .build()?;

        let caps = gst_video::VideoCapsBuilder::new()
            .format(gst_video::VideoFormat::Rgba)
            .build();
        let appsink = gst_app::AppSink::builder()
            .caps(&caps)
            .max_buffers(1)
            .drop(true)
            .build();

        let surface: SharedSink = Arc::new(Mutex::new(None));
        let callback_surface = surface.clone();
        appsink.set_callbacks(
            gst_app::AppSinkCallbacks::builder()
                .new_sample(move |sink| {
                    let sample = sink.pull_sample().map_err(|_| gst::FlowError::Eos)?;
                    if let Ok(target) = callback_surface.lock() {
                        if let (Some(target), Some(frame)) =
                            (target.as_ref(), frame_from_sample(&sample))
                        {
                            target.push_frame(frame);
                        }
                    }
                    Ok(gst::FlowSuccess::Ok)
                })
                .build(),
        );
        playbin.set_property("video-sink", &appsink);

        let bus = playbin
            .bus()
            .ok_or_else(|| SyncError::Player("playbin has no bus".to_string()))?;

        // Preroll so the first seek lands on a decoded frame.
        playbin.set_state(gst::State::Paused)?;

        Ok(Self {
            playbin,
            bus,
            surface,
            rate: 1.0,
            last_seek: 0.0,
        })
    }

    fn seek_to(&self, seconds: f64, rate: f64) -> Result<(), SyncError> {
        let position = gst::ClockTime::from_nseconds((seconds.max(0.0) * 1_000_000_000.0) as u64);
        self.playbin.seek(
            rate,
            gst::SeekFlags::FLUSH | gst::SeekFlags::ACCURATE,
            gst::SeekType::Set,
            Some(position),
            gst::SeekType::None,
            gst::ClockTime::NONE,
        )?;
        Ok(())
    }
}

fn frame_from_sample(sample: &gst::Sample) -> Option<VideoFrame> {
    let buffer = sample.buffer()?;
    let info = gst_video::VideoInfo::from_caps(sample.caps()?).ok()?;
    let map = buffer.map_readable().ok()?;
    Some(VideoFrame {
        data: map.as_slice().to_vec(),
        width: info.width(),
        height: info.height(),
        timestamp: buffer
            .pts()
            .map(|pts| pts.nseconds() as f64 / 1_000_000_000.0)
            .unwrap_or(0.0),
    })
}

impl MediaPlayer for GstPlayer {
    fn current_time(&self) -> f64 {
        self.playbin
            .query_position::<gst::ClockTime>()
            .map(|position| position.nseconds() as f64 / 1_000_000_000.0)
            .unwrap_or(self.last_seek)
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.last_seek = seconds.max(0.0);
        if let Err(err) = self.seek_to(seconds, self.rate) {
            debug!("Seek of {} to {:.3}s failed: {}", self.playbin.name(), seconds, err);
        }
    }

    fn play(&mut self) -> Result<(), SyncError> {
        self.playbin.set_state(gst::State::Playing)?;
        Ok(())
    }

    fn pause(&mut self) {
        if let Err(err) = self.playbin.set_state(gst::State::Paused) {
            debug!("Pause of {} failed: {}", self.playbin.name(), err);
        }
    }

    fn is_paused(&self) -> bool {
        let (_, current, pending) = self.playbin.state(gst::ClockTime::ZERO);
        let target = if pending == gst::State::VoidPending {
            current
        } else {
            pending
        };
        target != gst::State::Playing
    }

    fn volume(&self) -> f64 {
        self.playbin.property::<f64>("volume")
    }

    fn set_volume(&mut self, volume: f64) {
        self.playbin.set_property("volume", volume.clamp(0.0, 1.0));
    }

    fn is_muted(&self) -> bool {
        self.playbin.property::<bool>("mute")
    }

    fn set_muted(&mut self, muted: bool) {
        self.playbin.set_property("mute", muted);
    }

    fn playback_rate(&self) -> f64 {
        self.rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        // `seek_to` always carries `self.rate`, so a rejected instant change
        // still lands on the next seek without repositioning now.
        self.rate = rate;
        let instant = self.playbin.seek(
            rate,
            gst::SeekFlags::INSTANT_RATE_CHANGE,
            gst::SeekType::None,
            gst::ClockTime::NONE,
            gst::SeekType::None,
            gst::ClockTime::NONE,
        );
        if let Err(err) = instant {
            debug!(
                "Instant rate change of {} to {} rejected ({}), deferred to next seek",
                self.playbin.name(),
                rate,
                err
            );
        }
    }

    fn attach_surface(&mut self, sink: Arc<dyn FrameSink>) {
        if let Ok(mut surface) = self.surface.lock() {
            *surface = Some(sink);
        }
    }

    fn detach_surface(&mut self) {
        if let Ok(mut surface) = self.surface.lock() {
            *surface = None;
        }
    }

    fn take_error(&mut self) -> Option<String> {
        let msg = self.bus.pop_filtered(&[gst::MessageType::Error])?;
        match msg.view() {
            gst::MessageView::Error(err) => Some(err.error().to_string()),
            _ => None,
        }
    }
}

impl Drop for GstPlayer {
    fn drop(&mut self) {
        if self.playbin.set_state(gst::State::Null).is_err() {
            warn!("Failed to shut down {}", self.playbin.name());
        }
    }
}

/// Builds a `GstPlayer` per clip, probing the source first when enabled.
pub struct GstPlayerFactory {
    probe: Option<MediaProbe>,
}

impl GstPlayerFactory {
    pub fn new(config: &EngineConfig) -> Self {
        let probe = config
            .probe_sources
            .then(|| MediaProbe::new(config.probe_timeout_secs, config.probe_cache_size));
        Self { probe }
    }
}

impl PlayerFactory for GstPlayerFactory {
    fn create(&mut self, clip: &Clip) -> Result<Box<dyn MediaPlayer>, SyncError> {
        if let Some(probe) = self.probe.as_mut() {
            let source = probe.probe(&clip.source_path)?;
            if let Some(source_ms) = source.duration_ms {
                let needed_ms = clip.source_end_ms();
                if needed_ms > source_ms {
                    warn!(
                        "Clip {} needs {}ms of {} but the source is {}ms long",
                        clip.id, needed_ms, clip.source_path, source_ms
                    );
                }
            }
        }
        let player = GstPlayer::new(&format!("clip-{}", clip.id), &clip.source_path)?;
        info!("Created player for clip {} ({})", clip.id, clip.source_path);
        Ok(Box::new(player))
    }
}
