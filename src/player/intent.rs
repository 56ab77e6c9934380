use super::state::{PlaybackRate, PlayerAction, Quality};

pub const SKIP_SECONDS: f64 = 10.0;
pub const VOLUME_STEP: f64 = 0.1;

/// One-way command from a control (button, key, slider) to the player.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Intent {
    TogglePlay,
    Skip(f64),
    SeekTo(f64),
    ChangeVolume(f64),
    ToggleMute,
    ChangePlaybackRate(PlaybackRate),
    ChangeQuality(Quality),
    ToggleFullscreen,
}

impl Intent {
    /// The state change this intent maps to, if any. Play/pause and
    /// fullscreen go through the platform and come back as events instead.
    pub fn as_action(self) -> Option<PlayerAction> {
        match self {
            Intent::TogglePlay | Intent::ToggleFullscreen => None,
            Intent::Skip(seconds) => Some(PlayerAction::Skip(seconds)),
            Intent::SeekTo(time) => Some(PlayerAction::SeekTo(time)),
            Intent::ChangeVolume(delta) => Some(PlayerAction::ChangeVolume(delta)),
            Intent::ToggleMute => Some(PlayerAction::ToggleMute),
            Intent::ChangePlaybackRate(rate) => Some(PlayerAction::SetRate(rate)),
            Intent::ChangeQuality(quality) => Some(PlayerAction::SetQuality(quality)),
        }
    }
}

/// Maps a `KeyboardEvent.code` to the intent it triggers.
pub fn shortcut_for(code: &str) -> Option<Intent> {
    match code {
        "Space" => Some(Intent::TogglePlay),
        "ArrowLeft" => Some(Intent::Skip(-SKIP_SECONDS)),
        "ArrowRight" => Some(Intent::Skip(SKIP_SECONDS)),
        "ArrowUp" => Some(Intent::ChangeVolume(VOLUME_STEP)),
        "ArrowDown" => Some(Intent::ChangeVolume(-VOLUME_STEP)),
        "KeyM" => Some(Intent::ToggleMute),
        "KeyF" => Some(Intent::ToggleFullscreen),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::state::PlaybackState;

    #[test]
    fn shortcut_table() {
        assert_eq!(shortcut_for("Space"), Some(Intent::TogglePlay));
        assert_eq!(shortcut_for("ArrowLeft"), Some(Intent::Skip(-10.0)));
        assert_eq!(shortcut_for("ArrowRight"), Some(Intent::Skip(10.0)));
        assert_eq!(shortcut_for("ArrowUp"), Some(Intent::ChangeVolume(0.1)));
        assert_eq!(shortcut_for("ArrowDown"), Some(Intent::ChangeVolume(-0.1)));
        assert_eq!(shortcut_for("KeyM"), Some(Intent::ToggleMute));
        assert_eq!(shortcut_for("KeyF"), Some(Intent::ToggleFullscreen));
        assert_eq!(shortcut_for("KeyK"), None);
        assert_eq!(shortcut_for("Enter"), None);
    }

    #[test]
    fn platform_intents_have_no_direct_action() {
        assert_eq!(Intent::TogglePlay.as_action(), None);
        assert_eq!(Intent::ToggleFullscreen.as_action(), None);
    }

    #[test]
    fn pressing_m_twice_restores_displayed_volume() {
        let action = shortcut_for("KeyM").and_then(Intent::as_action).unwrap();
        let state = PlaybackState { volume: 0.6, ..PlaybackState::default() };

        let muted = state.apply(action);
        assert!(muted.is_muted);
        assert_eq!((muted.effective_volume() * 100.0).round(), 0.0);

        let unmuted = muted.apply(action);
        assert!(!unmuted.is_muted);
        assert_eq!((unmuted.effective_volume() * 100.0).round(), 60.0);
    }
}
