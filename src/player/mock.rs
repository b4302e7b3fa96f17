use super::{FrameSink, MediaPlayer, PlayerFactory, VideoFrame};
use crate::error::SyncError;
use crate::types::media::Clip;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// Everything a `MockPlayer` was asked to do, shared with the test.
#[derive(Debug, Default)]
pub struct MockLog {
    pub current_time: f64,
    pub paused: bool,
    pub volume: f64,
    pub muted: bool,
    pub rate: f64,
    pub seeks: Vec<f64>,
    pub plays: usize,
    pub pauses: usize,
    pub rate_changes: Vec<f64>,
    pub fail_play: bool,
    pub surface_attached: bool,
    pub pending_error: Option<String>,
}

pub type MockHandle = Rc<RefCell<MockLog>>;

pub struct MockPlayer {
    log: MockHandle,
}

impl MockPlayer {
    pub fn new() -> (Self, MockHandle) {
        let log = Rc::new(RefCell::new(MockLog {
            paused: true,
            volume: 1.0,
            rate: 1.0,
            ..MockLog::default()
        }));
        (MockPlayer { log: log.clone() }, log)
    }
}

impl MediaPlayer for MockPlayer {
    fn current_time(&self) -> f64 {
        self.log.borrow().current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        let mut log = self.log.borrow_mut();
        log.current_time = seconds;
        log.seeks.push(seconds);
    }

    fn play(&mut self) -> Result<(), SyncError> {
        let mut log = self.log.borrow_mut();
        log.plays += 1;
        if log.fail_play {
            return Err(SyncError::Player("play() rejected".to_string()));
        }
        log.paused = false;
        Ok(())
    }

    fn pause(&mut self) {
        let mut log = self.log.borrow_mut();
        log.pauses += 1;
        log.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.log.borrow().paused
    }

    fn volume(&self) -> f64 {
        self.log.borrow().volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.log.borrow_mut().volume = volume;
    }

    fn is_muted(&self) -> bool {
        self.log.borrow().muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.log.borrow_mut().muted = muted;
    }

    fn playback_rate(&self) -> f64 {
        self.log.borrow().rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        let mut log = self.log.borrow_mut();
        log.rate = rate;
        log.rate_changes.push(rate);
    }

    fn attach_surface(&mut self, sink: Arc<dyn FrameSink>) {
        self.log.borrow_mut().surface_attached = true;
        sink.push_frame(VideoFrame {
            data: vec![0; 4],
            width: 1,
            height: 1,
            timestamp: self.current_time(),
        });
    }

    fn detach_surface(&mut self) {
        self.log.borrow_mut().surface_attached = false;
    }

    fn take_error(&mut self) -> Option<String> {
        self.log.borrow_mut().pending_error.take()
    }
}

/// Hands out `MockPlayer`s and keeps their logs by clip id.
#[derive(Default)]
pub struct MockFactory {
    pub players: HashMap<String, MockHandle>,
    pub broken_sources: Vec<String>,
    pub created: usize,
}

impl MockFactory {
    pub fn log(&self, clip_id: &str) -> MockHandle {
        self.players[clip_id].clone()
    }
}

impl PlayerFactory for MockFactory {
    fn create(&mut self, clip: &Clip) -> Result<Box<dyn MediaPlayer>, SyncError> {
        if self.broken_sources.contains(&clip.source_path) {
            return Err(SyncError::BrokenSource {
                path: clip.source_path.clone(),
                reason: "no such file".to_string(),
            });
        }
        let (player, log) = MockPlayer::new();
        self.players.insert(clip.id.clone(), log);
        self.created += 1;
        Ok(Box::new(player))
    }
}
