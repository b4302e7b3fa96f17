//! Multi-track playback synchronization for the cutio editor.
//!
//! Every clip on the timeline gets its own media player running on its own
//! clock. [`sync::driver::TimelineDriver`] keeps those players in step with
//! the shared playhead: it aligns each player once when playback starts or
//! the clip becomes active, trusts the player's clock while playing, and
//! corrects drift while scrubbing.

pub mod config;
pub mod error;
pub mod ops;
pub mod player;
pub mod sync;
pub mod types;

pub use config::EngineConfig;
pub use error::SyncError;
pub use sync::controller::{ClipSyncController, SyncState};
pub use sync::driver::{TimelineDriver, TimelineEvent};
