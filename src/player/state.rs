use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use yew::Reducible;

pub const INITIAL_VOLUME: f64 = 1.0;
const VOLUME_PRECISION: f64 = 1e6;

/// Playback speeds offered by the settings menu.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackRate {
    Quarter,
    Half,
    ThreeQuarters,
    #[default]
    Normal,
    OneAndQuarter,
    OneAndHalf,
    OneAndThreeQuarters,
    Double,
}

impl PlaybackRate {
    pub const ALL: [PlaybackRate; 8] = [
        PlaybackRate::Quarter,
        PlaybackRate::Half,
        PlaybackRate::ThreeQuarters,
        PlaybackRate::Normal,
        PlaybackRate::OneAndQuarter,
        PlaybackRate::OneAndHalf,
        PlaybackRate::OneAndThreeQuarters,
        PlaybackRate::Double,
    ];

    pub fn as_f64(self) -> f64 {
        match self {
            PlaybackRate::Quarter => 0.25,
            PlaybackRate::Half => 0.5,
            PlaybackRate::ThreeQuarters => 0.75,
            PlaybackRate::Normal => 1.0,
            PlaybackRate::OneAndQuarter => 1.25,
            PlaybackRate::OneAndHalf => 1.5,
            PlaybackRate::OneAndThreeQuarters => 1.75,
            PlaybackRate::Double => 2.0,
        }
    }

    pub fn label(self) -> String {
        match self {
            PlaybackRate::Normal => "Normal".to_string(),
            other => format!("{}x", other.as_f64()),
        }
    }
}

/// Quality labels. Purely cosmetic: selecting one never switches streams.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    #[default]
    Auto,
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::Auto,
        Quality::P1080,
        Quality::P720,
        Quality::P480,
        Quality::P360,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Quality::Auto => "auto",
            Quality::P1080 => "1080p",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A seek the element has not yet been told about. The generation changes
/// on every request so repeated seeks to the same time still reach the
/// element.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeekRequest {
    pub target: f64,
    pub generation: u64,
}

/// Notifications coming from the media element and the fullscreen API.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MediaEvent {
    LoadStart,
    CanPlay,
    Play,
    Pause,
    TimeUpdate(f64),
    LoadedMetadata(f64),
    Progress(f64),
    FullscreenChange(bool),
}

/// Everything that can change the canonical state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlayerAction {
    Media(MediaEvent),
    SeekTo(f64),
    Skip(f64),
    ChangeVolume(f64),
    ToggleMute,
    SetRate(PlaybackRate),
    SetQuality(Quality),
}

/// Canonical playback state, owned by the video player.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaybackState {
    pub current_time: f64,
    /// Seconds; 0 while unknown.
    pub duration: f64,
    pub buffered_end: f64,
    pub is_playing: bool,
    pub is_loading: bool,
    pub volume: f64,
    pub is_muted: bool,
    pub playback_rate: PlaybackRate,
    pub quality: Quality,
    pub is_fullscreen: bool,
    pub pending_seek: Option<SeekRequest>,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self {
            current_time: 0.0,
            duration: 0.0,
            buffered_end: 0.0,
            is_playing: false,
            is_loading: true,
            volume: INITIAL_VOLUME,
            is_muted: false,
            playback_rate: PlaybackRate::default(),
            quality: Quality::default(),
            is_fullscreen: false,
            pending_seek: None,
        }
    }
}

/// NaN, infinities and negatives all collapse to 0.
fn sanitize_seconds(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

impl PlaybackState {
    /// Volume as heard: 0 while muted, the stored level otherwise.
    pub fn effective_volume(&self) -> f64 {
        if self.is_muted {
            0.0
        } else {
            self.volume
        }
    }

    fn clamp_time(&self, time: f64) -> f64 {
        if time.is_nan() {
            return 0.0;
        }
        time.clamp(0.0, self.duration)
    }

    fn seek(&mut self, time: f64) {
        let target = self.clamp_time(time);
        let generation = self.pending_seek.map_or(1, |s| s.generation.wrapping_add(1));
        self.current_time = target;
        self.pending_seek = Some(SeekRequest { target, generation });
    }

    fn change_volume(&mut self, delta: f64) {
        if delta.is_nan() {
            return;
        }
        // Snap so repeated 0.1 steps land exactly on 0 and 1.
        let next = (((self.volume + delta) * VOLUME_PRECISION).round() / VOLUME_PRECISION).clamp(0.0, 1.0);
        self.volume = next;
        if next == 0.0 {
            self.is_muted = true;
        } else if self.is_muted {
            self.is_muted = false;
        }
    }

    fn apply_media(&mut self, event: MediaEvent) {
        match event {
            MediaEvent::LoadStart => self.is_loading = true,
            MediaEvent::CanPlay => self.is_loading = false,
            MediaEvent::Play => self.is_playing = true,
            MediaEvent::Pause => self.is_playing = false,
            MediaEvent::TimeUpdate(time) => {
                let time = sanitize_seconds(time);
                self.current_time = if self.duration > 0.0 { time.min(self.duration) } else { time };
            }
            MediaEvent::LoadedMetadata(duration) => {
                self.duration = sanitize_seconds(duration);
                if self.duration > 0.0 {
                    self.current_time = self.current_time.min(self.duration);
                }
            }
            MediaEvent::Progress(end) => self.buffered_end = sanitize_seconds(end),
            MediaEvent::FullscreenChange(active) => self.is_fullscreen = active,
        }
    }

    /// Applies one action and returns the successor state.
    pub fn apply(mut self, action: PlayerAction) -> Self {
        match action {
            PlayerAction::Media(event) => self.apply_media(event),
            PlayerAction::SeekTo(time) => self.seek(time),
            PlayerAction::Skip(seconds) => {
                let target = self.current_time + seconds;
                self.seek(target);
            }
            PlayerAction::ChangeVolume(delta) => self.change_volume(delta),
            PlayerAction::ToggleMute => self.is_muted = !self.is_muted,
            PlayerAction::SetRate(rate) => self.playback_rate = rate,
            PlayerAction::SetQuality(quality) => self.quality = quality,
        }
        self
    }
}

impl Reducible for PlaybackState {
    type Action = PlayerAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        Rc::new((*self).clone().apply(action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(duration: f64, current_time: f64) -> PlaybackState {
        PlaybackState::default()
            .apply(PlayerAction::Media(MediaEvent::LoadedMetadata(duration)))
            .apply(PlayerAction::Media(MediaEvent::TimeUpdate(current_time)))
    }

    fn with_volume(volume: f64, muted: bool) -> PlaybackState {
        PlaybackState { volume, is_muted: muted, ..PlaybackState::default() }
    }

    #[test]
    fn skip_back_clamps_at_zero() {
        let state = loaded(120.0, 5.0).apply(PlayerAction::Skip(-10.0));
        assert_eq!(state.current_time, 0.0);
        assert_eq!(state.pending_seek.map(|s| s.target), Some(0.0));
    }

    #[test]
    fn skip_forward_clamps_at_duration() {
        let state = loaded(120.0, 115.0).apply(PlayerAction::Skip(10.0));
        assert_eq!(state.current_time, 120.0);
    }

    #[test]
    fn seek_without_duration_stays_at_zero() {
        let state = PlaybackState::default().apply(PlayerAction::SeekTo(40.0));
        assert_eq!(state.current_time, 0.0);
    }

    #[test]
    fn repeated_seek_only_bumps_generation() {
        let first = loaded(200.0, 10.0).apply(PlayerAction::SeekTo(100.0));
        let second = first.clone().apply(PlayerAction::SeekTo(100.0));
        assert_eq!(second.current_time, first.current_time);
        assert_eq!(
            second.pending_seek.map(|s| s.target),
            first.pending_seek.map(|s| s.target)
        );
        assert_ne!(second.pending_seek, first.pending_seek);
        let strip = |s: &PlaybackState| PlaybackState { pending_seek: None, ..s.clone() };
        assert_eq!(strip(&first), strip(&second));
    }

    #[test]
    fn change_volume_clamps() {
        for (start, delta, expected) in [(0.5, 0.1, 0.6), (0.95, 0.1, 1.0), (0.05, -0.1, 0.0), (0.3, -2.0, 0.0)] {
            let state = with_volume(start, false).apply(PlayerAction::ChangeVolume(delta));
            assert!((state.volume - expected).abs() < 1e-9, "{start} + {delta}");
        }
    }

    #[test]
    fn volume_reaching_zero_mutes() {
        let state = with_volume(0.1, false).apply(PlayerAction::ChangeVolume(-0.1));
        assert_eq!(state.volume, 0.0);
        assert!(state.is_muted);
    }

    #[test]
    fn stepping_down_from_full_volume_mutes_at_zero() {
        let state = (0..10).fold(PlaybackState::default(), |state, _| {
            state.apply(PlayerAction::ChangeVolume(-0.1))
        });
        assert_eq!(state.volume, 0.0);
        assert!(state.is_muted);
        let state = (0..10).fold(state, |state, _| state.apply(PlayerAction::ChangeVolume(0.1)));
        assert_eq!(state.volume, 1.0);
        assert!(!state.is_muted);
    }

    #[test]
    fn nan_delta_leaves_volume_alone() {
        let state = with_volume(0.4, true).apply(PlayerAction::ChangeVolume(f64::NAN));
        assert_eq!(state.volume, 0.4);
        assert!(state.is_muted);
    }

    #[test]
    fn raising_volume_while_muted_unmutes() {
        let state = with_volume(0.4, true).apply(PlayerAction::ChangeVolume(0.1));
        assert!(!state.is_muted);
        let state = with_volume(0.4, true).apply(PlayerAction::ChangeVolume(0.0));
        assert!(!state.is_muted);
    }

    #[test]
    fn slider_delta_while_muted_lands_on_target_and_unmutes() {
        let state = with_volume(0.3, true);
        let target = 0.8;
        let state = state.clone().apply(PlayerAction::ChangeVolume(target - state.volume));
        assert!((state.volume - target).abs() < 1e-9);
        assert!(!state.is_muted);
    }

    #[test]
    fn toggle_mute_keeps_stored_volume() {
        let state = with_volume(0.6, false).apply(PlayerAction::ToggleMute);
        assert!(state.is_muted);
        assert_eq!(state.volume, 0.6);
        assert_eq!(state.effective_volume(), 0.0);
        let state = state.apply(PlayerAction::ToggleMute);
        assert!(!state.is_muted);
        assert_eq!(state.effective_volume(), 0.6);
    }

    #[test]
    fn media_events_drive_flags() {
        let state = PlaybackState::default()
            .apply(PlayerAction::Media(MediaEvent::CanPlay))
            .apply(PlayerAction::Media(MediaEvent::Play));
        assert!(!state.is_loading);
        assert!(state.is_playing);
        let state = state
            .apply(PlayerAction::Media(MediaEvent::Pause))
            .apply(PlayerAction::Media(MediaEvent::LoadStart));
        assert!(!state.is_playing);
        assert!(state.is_loading);
    }

    #[test]
    fn unknown_duration_is_treated_as_zero() {
        let state = PlaybackState::default()
            .apply(PlayerAction::Media(MediaEvent::LoadedMetadata(f64::INFINITY)));
        assert_eq!(state.duration, 0.0);
        let state = state.apply(PlayerAction::Media(MediaEvent::LoadedMetadata(f64::NAN)));
        assert_eq!(state.duration, 0.0);
    }

    #[test]
    fn progress_and_fullscreen_events() {
        let state = PlaybackState::default()
            .apply(PlayerAction::Media(MediaEvent::Progress(42.5)))
            .apply(PlayerAction::Media(MediaEvent::FullscreenChange(true)));
        assert_eq!(state.buffered_end, 42.5);
        assert!(state.is_fullscreen);
    }

    #[test]
    fn rate_and_quality_are_stored() {
        let state = PlaybackState::default()
            .apply(PlayerAction::SetRate(PlaybackRate::OneAndHalf))
            .apply(PlayerAction::SetQuality(Quality::P720));
        assert_eq!(state.playback_rate.as_f64(), 1.5);
        assert_eq!(state.quality.to_string(), "720p");
    }

    #[test]
    fn rate_labels() {
        assert_eq!(PlaybackRate::Normal.label(), "Normal");
        assert_eq!(PlaybackRate::Quarter.label(), "0.25x");
        assert_eq!(PlaybackRate::Double.label(), "2x");
    }

    #[test]
    fn quality_serializes_as_label() {
        let json = serde_json::to_string(&Quality::P1080).unwrap();
        assert_eq!(json, "\"1080p\"");
        let back: Quality = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(back, Quality::Auto);
    }
}
