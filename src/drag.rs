//! Device-agnostic pointer input and drag-session state.
//!
//! Mouse and touch events are reduced to a [`PointerInput`] at the browser
//! boundary (see [`crate::input`]); nothing here knows which device produced
//! the event.

use crate::event::RangeCommitted;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// One of the two draggable handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handle {
    Start,
    End,
}

impl Handle {
    pub const ALL: [Handle; 2] = [Handle::Start, Handle::End];

    pub fn as_str(self) -> &'static str {
        match self {
            Handle::Start => "start",
            Handle::End => "end",
        }
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown slider handle '{0}'")]
pub struct UnknownHandle(pub String);

impl FromStr for Handle {
    type Err = UnknownHandle;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Handle::Start),
            "end" => Ok(Handle::End),
            other => Err(UnknownHandle(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// Gesture abandoned without a terminating up (touch cancel, window blur).
    Cancel,
}

/// A single pointer sample in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInput {
    pub phase: PointerPhase,
    /// Horizontal pointer position.
    pub x: f64,
    /// Left edge of the track at the time of the event.
    pub track_left_px: f64,
    /// Handle under the pointer, only meaningful for `Down`.
    pub target: Option<Handle>,
}

impl PointerInput {
    pub fn down(x: f64, track_left_px: f64, target: Option<Handle>) -> Self {
        Self {
            phase: PointerPhase::Down,
            x,
            track_left_px,
            target,
        }
    }

    pub fn moved(x: f64, track_left_px: f64) -> Self {
        Self {
            phase: PointerPhase::Move,
            x,
            track_left_px,
            target: None,
        }
    }

    pub fn up() -> Self {
        Self {
            phase: PointerPhase::Up,
            x: 0.0,
            track_left_px: 0.0,
            target: None,
        }
    }

    pub fn cancel() -> Self {
        Self {
            phase: PointerPhase::Cancel,
            ..Self::up()
        }
    }
}

/// Live gesture on one handle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    pub handle: Handle,
    /// Pointer position minus the handle's left edge at contact, kept for the
    /// whole gesture so the handle does not jump under the pointer.
    pub grab_offset_px: f64,
}

impl DragSession {
    /// Left-edge offset of the handle within the track for pointer `x`.
    pub fn raw_offset(&self, x: f64, track_left_px: f64) -> f64 {
        x - self.grab_offset_px - track_left_px
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
}

impl DragState {
    pub fn session(&self) -> Option<&DragSession> {
        match self {
            DragState::Idle => None,
            DragState::Dragging(session) => Some(session),
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging(_))
    }
}

/// What the host should do after feeding a pointer sample to the slider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerResponse {
    /// Suppress the browser's default action (text selection, scrolling).
    pub prevent_default: bool,
    /// Handle positions or highlight changed; redraw.
    pub redraw: bool,
    /// Set on the sample that ended a gesture. Subscribers have already been
    /// notified; hosts forward it to their own observers.
    pub committed: Option<RangeCommitted>,
}

impl PointerResponse {
    pub fn suppressed() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }

    pub fn redraw() -> Self {
        Self {
            redraw: true,
            ..Self::default()
        }
    }

    pub fn commit(event: RangeCommitted) -> Self {
        Self {
            prevent_default: true,
            redraw: true,
            committed: Some(event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handle_names_round_trip_through_strings() {
        for handle in Handle::ALL {
            assert_eq!(handle.as_str().parse::<Handle>(), Ok(handle));
        }
        assert_eq!(
            "thumb".parse::<Handle>(),
            Err(UnknownHandle("thumb".to_string()))
        );
    }

    #[test]
    fn grab_offset_is_preserved_in_raw_offset() {
        let session = DragSession {
            handle: Handle::Start,
            grab_offset_px: 4.0,
        };
        assert_eq!(session.raw_offset(119.0, 100.0), 15.0);
    }

    #[test]
    fn idle_has_no_session() {
        assert!(DragState::default().session().is_none());
        assert!(!DragState::Idle.is_dragging());
    }
}
