//! Browser boundary: turns DOM mouse and touch events into [`PointerInput`].

use crate::config::HANDLE_ATTRIBUTE;
use crate::drag::{Handle, PointerInput, PointerPhase};
use wasm_bindgen::JsCast;
use web_sys::{Element, EventTarget, MouseEvent, TouchEvent};

/// Handle named by the `data-name` attribute of the event target, if any.
pub fn handle_from_target(target: Option<EventTarget>) -> Option<Handle> {
    target?
        .dyn_into::<Element>()
        .ok()?
        .get_attribute(HANDLE_ATTRIBUTE)?
        .parse()
        .ok()
}

/// Current left edge of the track in viewport coordinates.
pub fn track_left(track: &Element) -> f64 {
    track.get_bounding_client_rect().left()
}

/// First active touch point, falling back to the touches that just ended.
fn touch_x(event: &TouchEvent) -> Option<f64> {
    event
        .touches()
        .get(0)
        .or_else(|| event.changed_touches().get(0))
        .map(|touch| f64::from(touch.client_x()))
}

pub fn from_mouse(phase: PointerPhase, event: &MouseEvent, track_left_px: f64) -> PointerInput {
    let target = match phase {
        PointerPhase::Down => handle_from_target(event.target()),
        _ => None,
    };
    PointerInput {
        phase,
        x: f64::from(event.client_x()),
        track_left_px,
        target,
    }
}

/// `None` when a down or move carries no touch point at all.
pub fn from_touch(
    phase: PointerPhase,
    event: &TouchEvent,
    track_left_px: f64,
) -> Option<PointerInput> {
    match phase {
        PointerPhase::Down => Some(PointerInput::down(
            touch_x(event)?,
            track_left_px,
            handle_from_target(event.target()),
        )),
        PointerPhase::Move => Some(PointerInput::moved(touch_x(event)?, track_left_px)),
        PointerPhase::Up => Some(PointerInput::up()),
        PointerPhase::Cancel => Some(PointerInput::cancel()),
    }
}
