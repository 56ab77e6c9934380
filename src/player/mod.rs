//! The video player: a native `<video>` element wrapped in custom controls.
//!
//! [`VideoPlayer`] owns the canonical [`state::PlaybackState`]; the child
//! controls render from a snapshot of it and report back through
//! [`intent::Intent`] callbacks.

pub mod auto_hide;
pub mod intent;
pub mod interaction;
pub mod mapper;
pub mod platform;
pub mod progress_bar;
pub mod settings_menu;
pub mod state;
pub mod video_controls;
pub mod video_player;
pub mod volume_control;

pub use video_player::VideoPlayer;
