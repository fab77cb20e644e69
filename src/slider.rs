//! Dual-handle range slider: state, drag state machine and commit events.
//!
//! A [`RangeSlider`] owns the configured bounds, the two handle values, the
//! measured track and the current drag session. Hosts feed it pointer samples
//! and read back a [`SliderLayout`] to position the handles and range bar.
//! Exactly one [`RangeCommitted`] is announced per completed gesture; values
//! assigned through [`RangeSlider::set_start`] and friends are silent.

use crate::config::{DEFAULT_END, DEFAULT_START};
use crate::drag::{DragSession, DragState, Handle, PointerInput, PointerPhase, PointerResponse};
use crate::error::SliderError;
use crate::event::{Emitter, ListenerId, RangeCommitted};
use crate::geometry::{Mapping, SliderConfig, TrackGeometry};
use log::{debug, info, warn};
use serde::Serialize;

/// Pixel positions for the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderLayout {
    pub start_px: f64,
    pub end_px: f64,
    pub range_left_px: f64,
    pub range_width_px: f64,
    /// Handle currently being dragged, drawn with the active highlight.
    pub active: Option<Handle>,
}

impl SliderLayout {
    pub fn thumb_px(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Start => self.start_px,
            Handle::End => self.end_px,
        }
    }

    pub fn is_active(&self, handle: Handle) -> bool {
        self.active == Some(handle)
    }
}

#[derive(Debug)]
pub struct RangeSlider {
    config: SliderConfig,
    start: f64,
    end: f64,
    track: Option<TrackGeometry>,
    drag: DragState,
    committed: Emitter<RangeCommitted>,
    destroyed: bool,
}

impl Default for RangeSlider {
    fn default() -> Self {
        let config = SliderConfig::default();
        Self {
            start: config.clamp(DEFAULT_START),
            end: config.clamp(DEFAULT_END),
            config,
            track: None,
            drag: DragState::Idle,
            committed: Emitter::default(),
            destroyed: false,
        }
    }
}

impl RangeSlider {
    pub fn new(config: SliderConfig) -> Result<Self, SliderError> {
        Self::with_range(config, DEFAULT_START, DEFAULT_END)
    }

    pub fn with_range(config: SliderConfig, start: f64, end: f64) -> Result<Self, SliderError> {
        config.validate()?;
        Ok(Self {
            start: config.clamp(start),
            end: config.clamp(end),
            config,
            ..Self::default()
        })
    }

    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Replace the bounds and step, re-clamping both handles. A rejected
    /// config leaves the slider untouched.
    pub fn set_config(&mut self, config: SliderConfig) -> Result<(), SliderError> {
        if let Err(err) = config.validate() {
            warn!("Rejected slider configuration: {}", err);
            return Err(err);
        }
        self.config = config;
        self.start = config.clamp(self.start);
        self.end = config.clamp(self.end);
        Ok(())
    }

    /// Swap the configuration and re-assign both values against it. Values
    /// are left untouched when the configuration is rejected.
    pub fn reconfigure(
        &mut self,
        config: SliderConfig,
        start: f64,
        end: f64,
    ) -> Result<(), SliderError> {
        self.set_config(config)?;
        self.set_start(start);
        self.set_end(end);
        Ok(())
    }

    /// Record the measured track. Called once the track has been laid out;
    /// pointer samples are ignored until then.
    pub fn initialize(
        &mut self,
        track_width_px: f64,
        thumb_width_px: f64,
    ) -> Result<(), SliderError> {
        if self.track.is_some() {
            return Err(SliderError::AlreadyInitialized);
        }
        let track = TrackGeometry::new(track_width_px, thumb_width_px)?;
        info!(
            "Slider track initialized: {}px wide, {}px of handle travel",
            track.track_width_px,
            track.max_range_px()
        );
        self.track = Some(track);
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.track.is_some()
    }

    pub fn track(&self) -> Option<&TrackGeometry> {
        self.track.as_ref()
    }

    fn mapping(&self) -> Option<Mapping<'_>> {
        self.track
            .as_ref()
            .map(|track| Mapping::new(&self.config, track))
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn value(&self, handle: Handle) -> f64 {
        match handle {
            Handle::Start => self.start,
            Handle::End => self.end,
        }
    }

    /// Width of the selection; handles may cross, so this is never negative.
    pub fn range_value(&self) -> f64 {
        (self.end - self.start).abs()
    }

    /// Assign `start`, clamped into the bounds. Returns the stored value.
    pub fn set_start(&mut self, value: f64) -> f64 {
        self.set_value(Handle::Start, value)
    }

    /// Assign `end`, clamped into the bounds. Returns the stored value.
    pub fn set_end(&mut self, value: f64) -> f64 {
        self.set_value(Handle::End, value)
    }

    pub fn set_value(&mut self, handle: Handle, value: f64) -> f64 {
        let clamped = self.config.clamp(value);
        match handle {
            Handle::Start => self.start = clamped,
            Handle::End => self.end = clamped,
        }
        clamped
    }

    /// Handle and range-bar positions, or `None` before [`initialize`](Self::initialize).
    pub fn layout(&self) -> Option<SliderLayout> {
        let mapping = self.mapping()?;
        let start_px = mapping.value_to_pixels(self.start);
        let end_px = mapping.value_to_pixels(self.end);
        Some(SliderLayout {
            start_px,
            end_px,
            range_left_px: start_px.min(end_px),
            range_width_px: (start_px - end_px).abs(),
            active: self.active_handle(),
        })
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn active_handle(&self) -> Option<Handle> {
        self.drag.session().map(|session| session.handle)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&RangeCommitted) + 'static) -> ListenerId {
        self.committed.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.committed.unsubscribe(id)
    }

    /// Drop listeners and any live gesture. Later pointer samples are no-ops.
    pub fn destroy(&mut self) {
        self.drag = DragState::Idle;
        self.committed.clear();
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn handle_pointer(&mut self, input: PointerInput) -> PointerResponse {
        match input.phase {
            PointerPhase::Down => self.pointer_down(input.x, input.track_left_px, input.target),
            PointerPhase::Move => self.pointer_move(input.x, input.track_left_px),
            PointerPhase::Up => self.pointer_up(),
            PointerPhase::Cancel => self.pointer_cancel(),
        }
    }

    pub fn pointer_down(
        &mut self,
        x: f64,
        track_left_px: f64,
        target: Option<Handle>,
    ) -> PointerResponse {
        if self.destroyed {
            return PointerResponse::default();
        }
        if let DragState::Dragging(session) = self.drag {
            debug!(
                "Ignoring pointer-down on {:?} while the {} handle is dragged",
                target, session.handle
            );
            return PointerResponse::suppressed();
        }
        let Some(handle) = target else {
            return PointerResponse::suppressed();
        };
        if !x.is_finite() || !track_left_px.is_finite() {
            debug!("Ignoring pointer-down at non-finite position {}/{}", x, track_left_px);
            return PointerResponse::default();
        }
        let Some(mapping) = self.mapping() else {
            debug!("Pointer-down before track geometry is known, ignoring");
            return PointerResponse::default();
        };

        let handle_left_px = track_left_px + mapping.value_to_pixels(self.value(handle));
        let grab_offset_px = x - handle_left_px;
        debug!("Drag started on {} handle (grab offset {}px)", handle, grab_offset_px);
        self.drag = DragState::Dragging(DragSession {
            handle,
            grab_offset_px,
        });
        PointerResponse::redraw()
    }

    pub fn pointer_move(&mut self, x: f64, track_left_px: f64) -> PointerResponse {
        if self.destroyed {
            return PointerResponse::default();
        }
        let Some(session) = self.drag.session().copied() else {
            return PointerResponse::suppressed();
        };
        if !x.is_finite() || !track_left_px.is_finite() {
            return PointerResponse::default();
        }
        let Some(mapping) = self.mapping() else {
            return PointerResponse::default();
        };

        let (value, _px) = mapping.settle(session.raw_offset(x, track_left_px));
        if value == self.value(session.handle) {
            return PointerResponse::default();
        }
        self.set_value(session.handle, value);
        PointerResponse::redraw()
    }

    pub fn pointer_up(&mut self) -> PointerResponse {
        if self.destroyed {
            return PointerResponse::default();
        }
        match self.finish_drag() {
            Some(event) => PointerResponse::commit(event),
            None => PointerResponse::suppressed(),
        }
    }

    /// Gesture abandoned without an up (touch cancel, window blur). Commits
    /// whatever range the drag reached, exactly as a pointer-up would.
    pub fn pointer_cancel(&mut self) -> PointerResponse {
        if self.destroyed || !self.is_dragging() {
            return PointerResponse::default();
        }
        debug!("Drag abandoned, committing current range");
        match self.finish_drag() {
            Some(event) => PointerResponse::commit(event),
            None => PointerResponse::default(),
        }
    }

    fn finish_drag(&mut self) -> Option<RangeCommitted> {
        let DragState::Dragging(session) = std::mem::take(&mut self.drag) else {
            return None;
        };
        let event = RangeCommitted::new(self.start, self.end);
        info!(
            "Range committed from {} handle: {} - {} (range {})",
            session.handle, event.start, event.end, event.range
        );
        self.committed.emit(&event);
        Some(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn slider(min: f64, max: f64, step: f64, start: f64, end: f64) -> RangeSlider {
        let config = SliderConfig::new(min, max, step).unwrap();
        let mut slider = RangeSlider::with_range(config, start, end).unwrap();
        slider.initialize(320.0, 20.0).unwrap();
        slider
    }

    fn record(slider: &mut RangeSlider) -> Rc<RefCell<Vec<RangeCommitted>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        slider.subscribe(move |event| sink.borrow_mut().push(*event));
        events
    }

    #[test]
    fn defaults_match_component_defaults() {
        let slider = RangeSlider::default();
        assert_eq!(slider.config(), &SliderConfig::default());
        assert_eq!((slider.start(), slider.end()), (0.0, 30.0));
        assert!(!slider.is_initialized());
        assert!(slider.layout().is_none());
    }

    #[test]
    fn rejects_invalid_bounds_at_construction() {
        let config = SliderConfig {
            min: 50.0,
            max: 50.0,
            step: 1.0,
        };
        assert!(RangeSlider::new(config).is_err());
    }

    #[test]
    fn set_config_reclamps_and_keeps_state_on_error() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 90.0);
        slider
            .set_config(SliderConfig::new(20.0, 80.0, 1.0).unwrap())
            .unwrap();
        assert_eq!((slider.start(), slider.end()), (20.0, 80.0));

        let bad = SliderConfig {
            min: 5.0,
            max: 1.0,
            step: 1.0,
        };
        assert!(slider.set_config(bad).is_err());
        assert_eq!(slider.config().min, 20.0);
    }

    #[test]
    fn initialize_only_once() {
        let mut slider = slider(0.0, 100.0, 1.0, 0.0, 30.0);
        assert_eq!(
            slider.initialize(500.0, 20.0),
            Err(SliderError::AlreadyInitialized)
        );
        assert_eq!(slider.track().unwrap().max_range_px(), 300.0);
    }

    #[test]
    fn setters_clamp_silently() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        let events = record(&mut slider);
        assert_eq!(slider.set_start(-20.0), 0.0);
        assert_eq!(slider.set_end(300.0), 100.0);
        assert_eq!(slider.set_start(f64::NAN), 0.0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn layout_tracks_values_and_crossing_handles() {
        let mut slider = slider(0.0, 100.0, 1.0, 60.0, 20.0);
        let layout = slider.layout().unwrap();
        assert_eq!((layout.start_px, layout.end_px), (180.0, 60.0));
        assert_eq!((layout.range_left_px, layout.range_width_px), (60.0, 120.0));
        assert_eq!(layout.active, None);

        slider.pointer_down(190.0, 0.0, Some(Handle::Start));
        assert!(slider.layout().unwrap().is_active(Handle::Start));
    }

    #[test]
    fn pointer_down_off_handle_is_suppressed() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        let response = slider.pointer_down(5.0, 0.0, None);
        assert!(response.prevent_default);
        assert!(!slider.is_dragging());
    }

    #[test]
    fn idle_move_and_up_are_suppressed_no_ops() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        let events = record(&mut slider);
        assert_eq!(slider.pointer_move(200.0, 0.0), PointerResponse::suppressed());
        assert_eq!(slider.pointer_up(), PointerResponse::suppressed());
        assert_eq!((slider.start(), slider.end()), (10.0, 50.0));
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn handlers_no_op_before_initialize() {
        let mut slider = RangeSlider::default();
        let response = slider.pointer_down(10.0, 0.0, Some(Handle::End));
        assert_eq!(response, PointerResponse::default());
        assert!(!slider.is_dragging());
    }

    #[test]
    fn grab_offset_keeps_handle_from_jumping() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        // start handle left edge sits at 100 + 30px; grabbed 6px inside it
        slider.pointer_down(136.0, 100.0, Some(Handle::Start));
        slider.pointer_move(136.0, 100.0);
        assert_eq!(slider.start(), 10.0);
        slider.pointer_move(166.0, 100.0);
        assert_eq!(slider.start(), 20.0);
    }

    #[test]
    fn second_pointer_down_is_rejected() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        slider.pointer_down(30.0, 0.0, Some(Handle::Start));
        let response = slider.pointer_down(150.0, 0.0, Some(Handle::End));
        assert!(response.prevent_default);
        assert_eq!(slider.active_handle(), Some(Handle::Start));
    }

    #[test]
    fn reconfigure_restores_values_lost_under_a_rejected_config() {
        let mut slider = RangeSlider::default();
        let empty = SliderConfig {
            min: 5.0,
            max: 5.0,
            step: 1.0,
        };
        assert!(slider.reconfigure(empty, 150.0, 400.0).is_err());
        assert_eq!((slider.start(), slider.end()), (0.0, 30.0));

        let wide = SliderConfig::new(100.0, 500.0, 10.0).unwrap();
        slider.reconfigure(wide, 150.0, 400.0).unwrap();
        assert_eq!(slider.config(), &wide);
        assert_eq!((slider.start(), slider.end()), (150.0, 400.0));

        slider.reconfigure(wide, 50.0, 900.0).unwrap();
        assert_eq!((slider.start(), slider.end()), (100.0, 500.0));
    }

    #[test]
    fn non_finite_pointer_down_starts_no_drag() {
        let mut slider = slider(0.0, 100.0, 1.0, 40.0, 80.0);
        let events = record(&mut slider);
        assert_eq!(
            slider.pointer_down(f64::NAN, 0.0, Some(Handle::Start)),
            PointerResponse::default()
        );
        assert_eq!(
            slider.pointer_down(120.0, f64::INFINITY, Some(Handle::Start)),
            PointerResponse::default()
        );
        assert!(!slider.is_dragging());

        slider.pointer_move(200.0, 0.0);
        assert_eq!(slider.pointer_up().committed, None);
        assert_eq!(slider.start(), 40.0);
        assert!(events.borrow().is_empty());
    }

    #[test]
    fn cancel_commits_exactly_once() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        let events = record(&mut slider);
        slider.pointer_down(150.0, 0.0, Some(Handle::End));
        slider.pointer_move(210.0, 0.0);
        let response = slider.pointer_cancel();
        assert_eq!(response.committed, Some(RangeCommitted::new(10.0, 70.0)));
        assert_eq!(slider.pointer_cancel(), PointerResponse::default());
        assert_eq!(slider.pointer_up(), PointerResponse::suppressed());
        assert_eq!(*events.borrow(), vec![RangeCommitted::new(10.0, 70.0)]);
    }

    #[test]
    fn destroy_silences_stale_handlers() {
        let mut slider = slider(0.0, 100.0, 1.0, 10.0, 50.0);
        let events = record(&mut slider);
        slider.pointer_down(30.0, 0.0, Some(Handle::Start));
        slider.destroy();
        assert_eq!(slider.pointer_move(90.0, 0.0), PointerResponse::default());
        assert_eq!(slider.pointer_up(), PointerResponse::default());
        assert_eq!(slider.start(), 10.0);
        assert!(events.borrow().is_empty());
        assert!(slider.is_destroyed());
    }

    #[test]
    fn handle_pointer_dispatches_on_phase() {
        let mut slider = slider(0.0, 100.0, 10.0, 0.0, 100.0);
        slider.handle_pointer(PointerInput::down(2.0, 0.0, Some(Handle::Start)));
        slider.handle_pointer(PointerInput::moved(71.0, 0.0));
        let response = slider.handle_pointer(PointerInput::up());
        assert_eq!(response.committed, Some(RangeCommitted::new(20.0, 100.0)));
    }
}
