//! Control overlay visibility. Pure; the player turns [`TimerCommand`]s
//! into a real `gloo_timers` timeout.

pub const HIDE_DELAY_MS: u32 = 3_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerCommand {
    /// Replace any running timer with a fresh one of this length.
    Arm(u32),
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ControlsVisibility {
    visible: bool,
    playing: bool,
}

impl Default for ControlsVisibility {
    fn default() -> Self {
        Self { visible: true, playing: false }
    }
}

impl ControlsVisibility {
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn show_and_rearm(&mut self) -> TimerCommand {
        self.visible = true;
        if self.playing {
            TimerCommand::Arm(HIDE_DELAY_MS)
        } else {
            TimerCommand::Cancel
        }
    }

    /// Pointer entered or moved over the player.
    pub fn pointer_activity(&mut self) -> TimerCommand {
        self.show_and_rearm()
    }

    /// Pointer left the player: hide at once while playing.
    pub fn pointer_left(&mut self) -> TimerCommand {
        if self.playing {
            self.visible = false;
        }
        TimerCommand::Cancel
    }

    pub fn playing_changed(&mut self, playing: bool) -> TimerCommand {
        self.playing = playing;
        self.show_and_rearm()
    }

    /// The inactivity timer fired.
    pub fn timer_elapsed(&mut self) {
        if self.playing {
            self.visible = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paused_player_never_arms_the_timer() {
        let mut vis = ControlsVisibility::default();
        assert_eq!(vis.pointer_activity(), TimerCommand::Cancel);
        assert_eq!(vis.playing_changed(false), TimerCommand::Cancel);
        assert!(vis.is_visible());
    }

    #[test]
    fn hides_after_inactivity_while_playing() {
        let mut vis = ControlsVisibility::default();
        assert_eq!(vis.playing_changed(true), TimerCommand::Arm(3_000));
        assert!(vis.is_visible());
        vis.timer_elapsed();
        assert!(!vis.is_visible());
    }

    #[test]
    fn pointer_movement_shows_and_rearms() {
        let mut vis = ControlsVisibility::default();
        vis.playing_changed(true);
        vis.timer_elapsed();
        assert_eq!(vis.pointer_activity(), TimerCommand::Arm(HIDE_DELAY_MS));
        assert!(vis.is_visible());
    }

    #[test]
    fn pausing_keeps_controls_visible() {
        let mut vis = ControlsVisibility::default();
        vis.playing_changed(true);
        vis.timer_elapsed();
        assert_eq!(vis.playing_changed(false), TimerCommand::Cancel);
        assert!(vis.is_visible());
        // A stale timeout after pausing must not hide anything.
        vis.timer_elapsed();
        assert!(vis.is_visible());
    }

    #[test]
    fn leaving_hides_only_while_playing() {
        let mut vis = ControlsVisibility::default();
        vis.pointer_left();
        assert!(vis.is_visible());
        vis.playing_changed(true);
        vis.pointer_left();
        assert!(!vis.is_visible());
    }
}
