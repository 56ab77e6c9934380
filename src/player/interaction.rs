//! Drag/hover state machine shared by the seek bar and the volume slider.
//!
//! Inputs carry the pointer position already mapped to the slider's value
//! space. `None` means the position cannot be mapped (no known duration),
//! in which case nothing is emitted and no preview is shown.

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum SliderState {
    #[default]
    Idle,
    Hovering(f64),
    Dragging { value: f64, moved: bool },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerInput {
    Down(Option<f64>),
    Move(Option<f64>),
    /// Release; carries the mapped value when released over the track.
    Up(Option<f64>),
    Leave,
}

/// Result of one transition: the next state and the value to emit, if any.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub next: SliderState,
    pub emit: Option<f64>,
}

impl Step {
    fn stay(next: SliderState) -> Self {
        Self { next, emit: None }
    }
}

impl SliderState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, SliderState::Dragging { .. })
    }

    /// Value under the pointer, while hovering or dragging.
    pub fn preview(&self) -> Option<f64> {
        match *self {
            SliderState::Idle => None,
            SliderState::Hovering(value) => Some(value),
            SliderState::Dragging { value, .. } => Some(value),
        }
    }

    pub fn step(self, input: PointerInput) -> Step {
        match (self, input) {
            (_, PointerInput::Down(Some(value))) => Step {
                next: SliderState::Dragging { value, moved: false },
                emit: Some(value),
            },
            (state, PointerInput::Down(None)) => Step::stay(state),

            (SliderState::Dragging { .. }, PointerInput::Move(Some(value))) => Step {
                next: SliderState::Dragging { value, moved: true },
                emit: Some(value),
            },
            (state @ SliderState::Dragging { .. }, PointerInput::Move(None)) => Step::stay(state),
            (_, PointerInput::Move(Some(value))) => Step::stay(SliderState::Hovering(value)),
            (_, PointerInput::Move(None)) => Step::stay(SliderState::Idle),

            (SliderState::Dragging { .. }, PointerInput::Up(Some(value))) => {
                Step::stay(SliderState::Hovering(value))
            }
            (SliderState::Dragging { .. }, PointerInput::Up(None)) => Step::stay(SliderState::Idle),
            (state, PointerInput::Up(_)) => Step::stay(state),

            // Leave is a no-op mid-drag: window listeners keep tracking the
            // pointer so the value can reach either end instead of sticking
            // at the track edge.
            (state @ SliderState::Dragging { .. }, PointerInput::Leave) => Step::stay(state),
            (_, PointerInput::Leave) => Step::stay(SliderState::Idle),
        }
    }
}
