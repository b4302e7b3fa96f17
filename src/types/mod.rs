pub mod blur;
pub mod media;
pub mod playback_state;
pub mod timeline;
pub mod track;
pub mod zoom;
