//! JavaScript interop: exposes the slider core as a `RangeSlider` class for
//! hosts that render their own markup.
//!
//! Pointer methods return `true` when the host should call
//! `preventDefault()` on the originating DOM event.

use crate::drag::{Handle, PointerInput};
use crate::event::{Emitter, ListenerId, RangeCommitted};
use crate::geometry::SliderConfig;
use crate::slider::RangeSlider;
use crate::utils::coerce_number;
use log::warn;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;

/// Numbers pass through; strings are parsed; anything else is NaN.
fn js_number(value: &JsValue) -> f64 {
    value
        .as_f64()
        .or_else(|| value.as_string().map(|s| coerce_number(&s)))
        .unwrap_or(f64::NAN)
}

fn js_handle(name: Option<String>) -> Option<Handle> {
    name?.parse().ok()
}

#[wasm_bindgen(js_name = RangeSlider)]
pub struct JsRangeSlider {
    inner: RefCell<RangeSlider>,
    listeners: RefCell<Emitter<RangeCommitted>>,
}

#[wasm_bindgen(js_class = RangeSlider)]
impl JsRangeSlider {
    /// `config` is a partial `{min, max, step}` object; missing keys use defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<JsRangeSlider, JsError> {
        let config: SliderConfig = if config.is_undefined() || config.is_null() {
            SliderConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: RefCell::new(RangeSlider::new(config)?),
            listeners: RefCell::new(Emitter::default()),
        })
    }

    #[wasm_bindgen(js_name = setConfig)]
    pub fn set_config(&self, config: JsValue) -> Result<(), JsError> {
        let config: SliderConfig = serde_wasm_bindgen::from_value(config)?;
        self.inner.borrow_mut().set_config(config)?;
        Ok(())
    }

    pub fn initialize(&self, track_width_px: f64, thumb_width_px: f64) -> Result<(), JsError> {
        self.inner
            .borrow_mut()
            .initialize(track_width_px, thumb_width_px)?;
        Ok(())
    }

    #[wasm_bindgen(getter)]
    pub fn start(&self) -> f64 {
        self.inner.borrow().start()
    }

    #[wasm_bindgen(getter)]
    pub fn end(&self) -> f64 {
        self.inner.borrow().end()
    }

    #[wasm_bindgen(getter = rangeValue)]
    pub fn range_value(&self) -> f64 {
        self.inner.borrow().range_value()
    }

    /// Returns the clamped value actually stored.
    #[wasm_bindgen(js_name = setStart)]
    pub fn set_start(&self, value: JsValue) -> f64 {
        self.inner.borrow_mut().set_start(js_number(&value))
    }

    #[wasm_bindgen(js_name = setEnd)]
    pub fn set_end(&self, value: JsValue) -> f64 {
        self.inner.borrow_mut().set_end(js_number(&value))
    }

    /// `{startPx, endPx, rangeLeftPx, rangeWidthPx, active}` or `undefined`
    /// before `initialize`.
    pub fn layout(&self) -> Result<JsValue, JsError> {
        let Some(layout) = self.inner.borrow().layout() else {
            return Ok(JsValue::UNDEFINED);
        };
        Ok(serde_wasm_bindgen::to_value(&layout)?)
    }

    #[wasm_bindgen(js_name = onRangeCommitted)]
    pub fn on_range_committed(&self, callback: js_sys::Function) -> Result<u32, JsError> {
        let mut listeners = self
            .listeners
            .try_borrow_mut()
            .map_err(|_| JsError::new("cannot subscribe while notifying listeners"))?;
        let ListenerId(id) = listeners.subscribe(move |event: &RangeCommitted| {
            let payload = match serde_wasm_bindgen::to_value(event) {
                Ok(payload) => payload,
                Err(err) => {
                    warn!("Failed to serialize committed range: {}", err);
                    return;
                }
            };
            if let Err(err) = callback.call1(&JsValue::NULL, &payload) {
                warn!("Range listener threw: {:?}", err);
            }
        });
        Ok(id)
    }

    #[wasm_bindgen(js_name = offRangeCommitted)]
    pub fn off_range_committed(&self, id: u32) -> bool {
        self.listeners
            .try_borrow_mut()
            .map(|mut listeners| listeners.unsubscribe(ListenerId(id)))
            .unwrap_or(false)
    }

    /// `handle` is the `data-name` of the element under the pointer, if any.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, track_left_px: f64, handle: Option<String>) -> bool {
        self.dispatch(PointerInput::down(x, track_left_px, js_handle(handle)))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, track_left_px: f64) -> bool {
        self.dispatch(PointerInput::moved(x, track_left_px))
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) -> bool {
        self.dispatch(PointerInput::up())
    }

    #[wasm_bindgen(js_name = pointerCancel)]
    pub fn pointer_cancel(&self) -> bool {
        self.dispatch(PointerInput::cancel())
    }

    #[wasm_bindgen(getter = isDragging)]
    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().is_dragging()
    }

    /// Detach every listener; later pointer calls do nothing.
    pub fn destroy(&self) {
        self.inner.borrow_mut().destroy();
        if let Ok(mut listeners) = self.listeners.try_borrow_mut() {
            listeners.clear();
        }
    }
}

impl JsRangeSlider {
    // JS listeners may read the slider back, so they run after the borrow ends
    fn dispatch(&self, input: PointerInput) -> bool {
        let response = match self.inner.try_borrow_mut() {
            Ok(mut slider) => slider.handle_pointer(input),
            Err(_) => return false,
        };
        if let Some(event) = response.committed {
            match self.listeners.try_borrow_mut() {
                Ok(mut listeners) => listeners.emit(&event),
                Err(_) => warn!("Range committed while listeners were busy; dropped"),
            }
        }
        response.prevent_default
    }
}
