use crate::error::SyncError;

use gstreamer as gst;
use gstreamer_pbutils as gst_pbutils;
use gst_pbutils::prelude::*;
use log::{debug, warn};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::Path;

/// What the probe learned about a source file.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceInfo {
    pub duration_ms: Option<i64>,
    pub has_video: bool,
    pub has_audio: bool,
}

/// Checks sources before a player is built for them, so a missing or
/// undecodable file shows up as a broken clip instead of a silent player.
pub struct MediaProbe {
    discoverer: Option<gst_pbutils::Discoverer>,
    timeout: gst::ClockTime,
    cache: LruCache<String, SourceInfo>,
}

impl MediaProbe {
    pub fn new(timeout_secs: u64, cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);
        Self {
            discoverer: None,
            timeout: gst::ClockTime::from_seconds(timeout_secs.max(1)),
            cache: LruCache::new(capacity),
        }
    }

    pub fn probe(&mut self, path: &str) -> Result<SourceInfo, SyncError> {
        if let Some(info) = self.cache.get(path) {
            return Ok(info.clone());
        }

        if !Path::new(path).exists() {
            return Err(SyncError::BrokenSource {
                path: path.to_string(),
                reason: "file does not exist".to_string(),
            });
        }

        let uri = gst::glib::filename_to_uri(path, None)?;
        let discoverer = match self.discoverer.take() {
            Some(discoverer) => discoverer,
            None => gst_pbutils::Discoverer::new(self.timeout)?,
        };
        let result = discoverer.discover_uri(&uri);
        self.discoverer = Some(discoverer);

        let discovered = result.map_err(|err| {
            warn!("Probe failed for {}: {}", path, err);
            SyncError::BrokenSource {
                path: path.to_string(),
                reason: err.to_string(),
            }
        })?;

        let info = SourceInfo {
            duration_ms: discovered.duration().map(|d| d.mseconds() as i64),
            has_video: !discovered.video_streams().is_empty(),
            has_audio: !discovered.audio_streams().is_empty(),
        };
        if !info.has_video && !info.has_audio {
            return Err(SyncError::BrokenSource {
                path: path.to_string(),
                reason: "no decodable streams".to_string(),
            });
        }

        debug!("Probed {}: {:?}", path, info);
        self.cache.put(path.to_string(), info.clone());
        Ok(info)
    }
}
