//! Mapping from raw viewer input to sequencer commands
//!
//! The viewer surface reports taps, key presses, drags and hover changes;
//! `map_input` turns each into at most one `SequencerCommand`. Keeping this
//! pure means gesture handling never touches sequencer state directly.

/// Horizontal drag distance (px) beyond which a release counts as a swipe
pub const SWIPE_DISTANCE_THRESHOLD: f64 = 100.0;

/// Horizontal release velocity (px/ms) beyond which a release counts as a swipe
pub const SWIPE_VELOCITY_THRESHOLD: f64 = 0.5;

/// Discrete commands understood by the story sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequencerCommand {
    Advance,
    Retreat,
    Pause,
    Resume,
    Close,
}

/// Keys the viewer reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Other,
}

impl Key {
    /// Parse a DOM-style key name (`"ArrowRight"`, `" "`, `"Escape"`, ...)
    pub fn from_name(name: &str) -> Self {
        match name {
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            " " | "Space" | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            _ => Self::Other,
        }
    }
}

/// Raw input from the viewer surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NavigationInput {
    /// Tap or click at `x` on a surface `width` wide
    Tap { x: f64, width: f64 },
    KeyPress(Key),
    /// Horizontal drag released after moving `movement_x` px at `velocity_x`
    DragEnd { movement_x: f64, velocity_x: f64 },
    PointerDown,
    PointerUp,
    HoverEnter,
    HoverLeave,
}

/// Translate one input into the command it triggers, if any.
///
/// - left half tap, `ArrowLeft`, rightward swipe: retreat
/// - right half tap, `ArrowRight`, `Space`, leftward swipe: advance
/// - `Escape`: close
/// - pointer hold or hover: pause; release or leave: resume
pub fn map_input(input: NavigationInput) -> Option<SequencerCommand> {
    match input {
        NavigationInput::Tap { x, width } => {
            if x < width / 2.0 {
                Some(SequencerCommand::Retreat)
            } else {
                Some(SequencerCommand::Advance)
            }
        }
        NavigationInput::KeyPress(key) => match key {
            Key::ArrowRight | Key::Space => Some(SequencerCommand::Advance),
            Key::ArrowLeft => Some(SequencerCommand::Retreat),
            Key::Escape => Some(SequencerCommand::Close),
            Key::Other => None,
        },
        NavigationInput::DragEnd {
            movement_x,
            velocity_x,
        } => map_swipe(movement_x, velocity_x),
        NavigationInput::PointerDown | NavigationInput::HoverEnter => {
            Some(SequencerCommand::Pause)
        }
        NavigationInput::PointerUp | NavigationInput::HoverLeave => {
            Some(SequencerCommand::Resume)
        }
    }
}

fn map_swipe(movement_x: f64, velocity_x: f64) -> Option<SequencerCommand> {
    let is_swipe = movement_x.abs() > SWIPE_DISTANCE_THRESHOLD
        || velocity_x.abs() > SWIPE_VELOCITY_THRESHOLD;
    if !is_swipe {
        return None;
    }
    // A fast flick may barely move; fall back to the velocity's direction.
    let direction = if movement_x != 0.0 {
        movement_x
    } else {
        velocity_x
    };
    if direction > 0.0 {
        Some(SequencerCommand::Retreat)
    } else if direction < 0.0 {
        Some(SequencerCommand::Advance)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taps_split_at_centre() {
        let left = NavigationInput::Tap { x: 10.0, width: 400.0 };
        let right = NavigationInput::Tap { x: 200.0, width: 400.0 };
        assert_eq!(map_input(left), Some(SequencerCommand::Retreat));
        assert_eq!(map_input(right), Some(SequencerCommand::Advance));
    }

    #[test]
    fn keys() {
        let cases = [
            ("ArrowRight", Some(SequencerCommand::Advance)),
            (" ", Some(SequencerCommand::Advance)),
            ("ArrowLeft", Some(SequencerCommand::Retreat)),
            ("Escape", Some(SequencerCommand::Close)),
            ("Enter", None),
        ];
        for (name, expected) in cases {
            assert_eq!(
                map_input(NavigationInput::KeyPress(Key::from_name(name))),
                expected,
                "key {:?}",
                name
            );
        }
    }

    #[test]
    fn swipe_by_distance_or_velocity() {
        let long_left = NavigationInput::DragEnd {
            movement_x: -150.0,
            velocity_x: 0.1,
        };
        let flick_right = NavigationInput::DragEnd {
            movement_x: 20.0,
            velocity_x: 0.9,
        };
        assert_eq!(map_input(long_left), Some(SequencerCommand::Advance));
        assert_eq!(map_input(flick_right), Some(SequencerCommand::Retreat));
    }

    #[test]
    fn short_slow_drag_is_ignored() {
        let nudge = NavigationInput::DragEnd {
            movement_x: 100.0,
            velocity_x: 0.5,
        };
        assert_eq!(map_input(nudge), None);
    }

    #[test]
    fn hold_and_hover_pause() {
        assert_eq!(map_input(NavigationInput::PointerDown), Some(SequencerCommand::Pause));
        assert_eq!(map_input(NavigationInput::HoverEnter), Some(SequencerCommand::Pause));
        assert_eq!(map_input(NavigationInput::PointerUp), Some(SequencerCommand::Resume));
        assert_eq!(map_input(NavigationInput::HoverLeave), Some(SequencerCommand::Resume));
    }
}
