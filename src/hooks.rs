use crate::drag::{PointerInput, PointerPhase, PointerResponse};
use crate::event::RangeCommitted;
use crate::geometry::SliderConfig;
use crate::input::{from_mouse, from_touch, track_left};
use crate::slider::{RangeSlider, SliderLayout};
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlElement, MouseEvent, TouchEvent, Window};
use yew::functional::UseForceUpdateHandle;
use yew::prelude::*;

/// Everything a slider view needs for one render.
#[derive(Clone)]
pub struct UseRangeSlider {
    pub start: f64,
    pub end: f64,
    /// `|end - start|`
    pub range_value: f64,
    /// `None` until the track has been measured.
    pub layout: Option<SliderLayout>,
    /// Configuration rejected by the core, shown instead of the track.
    pub error: Option<String>,
    /// Attach to the track element.
    pub track_ref: NodeRef,
    /// Attach to one thumb element; only its width is read.
    pub thumb_ref: NodeRef,
    pub on_mouse_down: Callback<MouseEvent>,
    pub on_touch_start: Callback<TouchEvent>,
}

/// Shared pieces the DOM listeners need to drive the slider.
#[derive(Clone)]
struct Driver {
    slider: Rc<RefCell<RangeSlider>>,
    onchange: Rc<RefCell<Callback<RangeCommitted>>>,
    track_ref: NodeRef,
    redraw: UseForceUpdateHandle,
}

impl Driver {
    fn dragging(&self) -> bool {
        self.slider
            .try_borrow()
            .map(|slider| slider.is_dragging())
            .unwrap_or(false)
    }

    fn track_left(&self) -> Option<f64> {
        self.track_ref.cast::<Element>().map(|track| track_left(&track))
    }

    /// Feed one sample to the core, then redraw and notify outside the borrow.
    fn dispatch(&self, input: PointerInput) -> PointerResponse {
        let response = match self.slider.try_borrow_mut() {
            Ok(mut slider) => slider.handle_pointer(input),
            Err(_) => {
                warn!("Slider busy, dropping {:?} sample", input.phase);
                return PointerResponse::default();
            }
        };
        if response.redraw {
            self.redraw.force_update();
        }
        if let Some(event) = response.committed {
            let onchange = self.onchange.borrow().clone();
            onchange.emit(event);
        }
        response
    }

    fn mouse(&self, phase: PointerPhase, event: &MouseEvent) {
        let track_left_px = match phase {
            PointerPhase::Down | PointerPhase::Move => match self.track_left() {
                Some(left) => left,
                None => return,
            },
            _ => 0.0,
        };
        if self.dispatch(from_mouse(phase, event, track_left_px)).prevent_default {
            event.prevent_default();
        }
    }

    fn touch(&self, phase: PointerPhase, event: &TouchEvent) {
        let track_left_px = self.track_left().unwrap_or_default();
        let Some(input) = from_touch(phase, event, track_left_px) else {
            return;
        };
        if self.dispatch(input).prevent_default {
            event.prevent_default();
        }
    }
}

/// Window-level listeners for the rest of a gesture; removed on drop.
///
/// Samples outside a gesture are not forwarded, so page scrolling and text
/// selection elsewhere keep their default behaviour.
struct WindowListeners {
    window: Window,
    mouse: Vec<(&'static str, Closure<dyn FnMut(MouseEvent)>)>,
    touch: Vec<(&'static str, Closure<dyn FnMut(TouchEvent)>)>,
    blur: Closure<dyn FnMut(Event)>,
}

impl WindowListeners {
    fn attach(driver: &Driver) -> Self {
        let window = gloo_utils::window();

        let mouse = [("mousemove", PointerPhase::Move), ("mouseup", PointerPhase::Up)]
            .into_iter()
            .map(|(name, phase)| {
                let driver = driver.clone();
                let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                    if driver.dragging() {
                        driver.mouse(phase, &event);
                    }
                });
                (name, closure)
            })
            .collect::<Vec<_>>();

        let touch = [
            ("touchmove", PointerPhase::Move),
            ("touchend", PointerPhase::Up),
            ("touchcancel", PointerPhase::Cancel),
        ]
        .into_iter()
        .map(|(name, phase)| {
            let driver = driver.clone();
            let closure = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
                if driver.dragging() {
                    driver.touch(phase, &event);
                }
            });
            (name, closure)
        })
        .collect::<Vec<_>>();

        // Losing focus mid-drag never delivers the up; commit instead of sticking.
        let blur = {
            let driver = driver.clone();
            Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                if driver.dragging() {
                    driver.dispatch(PointerInput::cancel());
                }
            })
        };

        let listeners = Self {
            window,
            mouse,
            touch,
            blur,
        };
        listeners.for_each(|window, name, callback| {
            if window.add_event_listener_with_callback(name, callback).is_err() {
                warn!("Failed to attach window '{}' listener", name);
            }
        });
        listeners
    }

    fn for_each(&self, mut f: impl FnMut(&Window, &str, &js_sys::Function)) {
        for (name, closure) in &self.mouse {
            f(&self.window, name, closure.as_ref().unchecked_ref());
        }
        for (name, closure) in &self.touch {
            f(&self.window, name, closure.as_ref().unchecked_ref());
        }
        f(&self.window, "blur", self.blur.as_ref().unchecked_ref());
    }
}

impl Drop for WindowListeners {
    fn drop(&mut self) {
        self.for_each(|window, name, callback| {
            let _ = window.remove_event_listener_with_callback(name, callback);
        });
    }
}

/// Custom hook owning a [`RangeSlider`] for a component instance.
///
/// Props flow in through `config`, `start` and `end`; programmatic changes
/// are applied silently. `onchange` fires once per completed drag.
#[hook]
pub fn use_range_slider(
    config: SliderConfig,
    start: f64,
    end: f64,
    onchange: Callback<RangeCommitted>,
) -> UseRangeSlider {
    let slider = use_mut_ref(|| RangeSlider::with_range(config, start, end).unwrap_or_default());
    let error = use_state(|| config.validate().err().map(|e| e.to_string()));
    let onchange_ref = use_mut_ref(|| onchange.clone());
    let track_ref = use_node_ref();
    let thumb_ref = use_node_ref();
    let redraw = use_force_update();

    // Latest callback for listeners registered on an earlier render
    *onchange_ref.borrow_mut() = onchange;

    // Props are re-applied so values dropped under a rejected config come back
    {
        let slider = slider.clone();
        let error = error.clone();
        use_effect_with(config, move |config| {
            let result = slider.borrow_mut().reconfigure(*config, start, end);
            error.set(result.err().map(|e| e.to_string()));
            || ()
        });
    }

    {
        let slider = slider.clone();
        let redraw = redraw.clone();
        use_effect_with((start, end), move |&(start, end)| {
            {
                let mut slider = slider.borrow_mut();
                slider.set_start(start);
                slider.set_end(end);
            }
            redraw.force_update();
            || ()
        });
    }

    let driver = Driver {
        slider: slider.clone(),
        onchange: onchange_ref,
        track_ref: track_ref.clone(),
        redraw: redraw.clone(),
    };

    // Measure once after the first layout, then listen until unmount
    {
        let driver = driver.clone();
        let thumb_ref = thumb_ref.clone();
        use_effect_with((), move |_| {
            let track = driver.track_ref.cast::<HtmlElement>();
            let thumb = thumb_ref.cast::<HtmlElement>();
            if let (Some(track), Some(thumb)) = (track, thumb) {
                let measured = driver.slider.borrow_mut().initialize(
                    f64::from(track.offset_width()),
                    f64::from(thumb.offset_width()),
                );
                match measured {
                    Ok(()) => driver.redraw.force_update(),
                    Err(err) => warn!("Slider track not usable: {}", err),
                }
            }
            let listeners = WindowListeners::attach(&driver);
            move || {
                drop(listeners);
                driver.slider.borrow_mut().destroy();
            }
        });
    }

    let on_mouse_down = {
        let driver = driver.clone();
        Callback::from(move |event: MouseEvent| driver.mouse(PointerPhase::Down, &event))
    };
    let on_touch_start = {
        let driver = driver.clone();
        Callback::from(move |event: TouchEvent| driver.touch(PointerPhase::Down, &event))
    };

    let current = slider.borrow();
    UseRangeSlider {
        start: current.start(),
        end: current.end(),
        range_value: current.range_value(),
        layout: current.layout(),
        error: (*error).clone(),
        track_ref,
        thumb_ref,
        on_mouse_down,
        on_touch_start,
    }
}
