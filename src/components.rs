//! Yew view components for the range slider and its numeric companion.
//!
//! Positioning is handed to the stylesheet through CSS custom properties so
//! the components never touch element styles directly.

use crate::config::{
    ACTIVE_THUMB_COLOR, DEFAULT_END, DEFAULT_INPUT_END, DEFAULT_INPUT_MAX, DEFAULT_INPUT_MIN,
    DEFAULT_INPUT_START, DEFAULT_MAX, DEFAULT_MIN, DEFAULT_START, DEFAULT_STEP, DEFAULT_TITLE,
    INACTIVE_THUMB_COLOR, RANGE_LEFT_VAR, RANGE_WIDTH_VAR, THUMB_COLOR_VAR, THUMB_LEFT_VAR,
};
use crate::drag::Handle;
use crate::event::{RangeChanged, RangeCommitted};
use crate::geometry::SliderConfig;
use crate::hooks::use_range_slider;
use crate::range_input::RangeInput;
use crate::slider::SliderLayout;
use crate::utils::{format_px, format_value};
use web_sys::HtmlInputElement;
use yew::prelude::*;

/// Heading text, e.g. `"Price Range 40"`.
pub fn range_label(title: &str, range_value: f64) -> String {
    format!("{} Range {}", title, format_value(range_value))
}

/// Selected interval, e.g. `"10 - 50"`.
pub fn value_text(start: f64, end: f64) -> String {
    format!("{} - {}", format_value(start), format_value(end))
}

/// Inline style for one thumb. Position is omitted until the track is measured.
pub fn thumb_style(layout: Option<&SliderLayout>, handle: Handle) -> String {
    let color = match layout {
        Some(layout) if layout.is_active(handle) => ACTIVE_THUMB_COLOR,
        _ => INACTIVE_THUMB_COLOR,
    };
    match layout {
        Some(layout) => format!(
            "{}: {}; {}: {};",
            THUMB_LEFT_VAR,
            format_px(layout.thumb_px(handle)),
            THUMB_COLOR_VAR,
            color
        ),
        None => format!("{}: {};", THUMB_COLOR_VAR, color),
    }
}

/// Inline style for the bar spanning the two thumbs.
pub fn range_style(layout: Option<&SliderLayout>) -> String {
    let (left, width) = layout
        .map(|layout| (layout.range_left_px, layout.range_width_px))
        .unwrap_or_default();
    format!(
        "{}: {}; {}: {};",
        RANGE_LEFT_VAR,
        format_px(left),
        RANGE_WIDTH_VAR,
        format_px(width)
    )
}

#[derive(Properties, PartialEq)]
pub struct MultiSliderProps {
    #[prop_or(DEFAULT_MIN)]
    pub min: f64,
    #[prop_or(DEFAULT_MAX)]
    pub max: f64,
    #[prop_or(DEFAULT_STEP)]
    pub step: f64,
    #[prop_or(DEFAULT_START)]
    pub start: f64,
    #[prop_or(DEFAULT_END)]
    pub end: f64,
    #[prop_or_else(|| AttrValue::from(DEFAULT_TITLE))]
    pub title: AttrValue,
    /// Fired once per completed drag with the final range.
    #[prop_or_default]
    pub onchange: Callback<RangeCommitted>,
}

/// Dual-handle slider selecting `[start, end]` within `[min, max]`.
#[function_component(MultiSlider)]
pub fn multi_slider(props: &MultiSliderProps) -> Html {
    let config = SliderConfig {
        min: props.min,
        max: props.max,
        step: props.step,
    };
    let slider = use_range_slider(config, props.start, props.end, props.onchange.clone());
    let layout = slider.layout.as_ref();

    html! {
        <div class="multi-slider">
            <label class="slider-label">
                <span>{ range_label(&props.title, slider.range_value) }</span>
            </label>
            <span class="slider-value">{ value_text(slider.start, slider.end) }</span>
            if let Some(ref error) = slider.error {
                <div class="input-error">{ error }</div>
            }
            <div class="slider"
                ref={slider.track_ref.clone()}
                onmousedown={slider.on_mouse_down.clone()}
                ontouchstart={slider.on_touch_start.clone()}
            >
                <div class="range" style={range_style(layout)}></div>
                { for Handle::ALL.iter().map(|&handle| {
                    let node_ref = match handle {
                        Handle::Start => slider.thumb_ref.clone(),
                        Handle::End => NodeRef::default(),
                    };
                    html! {
                        <div
                            ref={node_ref}
                            class={classes!("thumb", handle.as_str())}
                            data-name={handle.as_str()}
                            style={thumb_style(layout, handle)}
                        ></div>
                    }
                }) }
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct RangeInputProps {
    #[prop_or(DEFAULT_INPUT_MIN)]
    pub min: f64,
    #[prop_or(DEFAULT_INPUT_MAX)]
    pub max: f64,
    #[prop_or(DEFAULT_INPUT_START)]
    pub start: f64,
    #[prop_or(DEFAULT_INPUT_END)]
    pub end: f64,
    #[prop_or_default]
    pub label: Option<AttrValue>,
    /// Fired for every accepted edit of either field.
    #[prop_or_default]
    pub onrangechange: Callback<RangeChanged>,
}

/// A refused edit: the message to show and the text the field reverts to.
#[derive(Debug, Clone, PartialEq)]
pub struct RejectedEdit {
    pub message: String,
    pub restore: String,
}

/// Apply the text typed into one of the two fields.
pub fn edit_field(
    state: &mut RangeInput,
    handle: Handle,
    text: &str,
) -> Result<RangeChanged, RejectedEdit> {
    let result = match handle {
        Handle::Start => state.change_start(text),
        Handle::End => state.change_end(text),
    };
    result.map_err(|err| RejectedEdit {
        message: err.to_string(),
        restore: format_value(match handle {
            Handle::Start => state.start,
            Handle::End => state.end,
        }),
    })
}

/// Pair of numeric inputs; an edit that would invert the range is refused.
#[function_component(RangeInputField)]
pub fn range_input_field(props: &RangeInputProps) -> Html {
    let state = use_mut_ref(|| RangeInput::new(props.min, props.max, props.start, props.end));
    let error = use_state(|| None::<String>);

    {
        let state = state.clone();
        let error = error.clone();
        use_effect_with(
            (props.min, props.max, props.start, props.end),
            move |&(min, max, start, end)| {
                *state.borrow_mut() = RangeInput::new(min, max, start, end);
                error.set(None);
                || ()
            },
        );
    }

    let on_edit = |handle: Handle| {
        let state = state.clone();
        let error = error.clone();
        let onrangechange = props.onrangechange.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let result = edit_field(&mut state.borrow_mut(), handle, &input.value());
            match result {
                Ok(changed) => {
                    error.set(None);
                    onrangechange.emit(changed);
                }
                Err(rejected) => {
                    input.set_value(&rejected.restore);
                    error.set(Some(rejected.message));
                }
            }
        })
    };

    let current = *state.borrow();
    html! {
        <div class="form-group range-input">
            if let Some(ref label) = props.label {
                <label>{ label.clone() }</label>
            }
            <div class="form-row">
                <input type="number"
                    class={if (*error).is_some() { "invalid" } else { "" }}
                    min={format_value(current.min)}
                    max={format_value(current.end)}
                    value={format_value(current.start)}
                    onchange={on_edit(Handle::Start)}
                />
                <span class="range-separator">{ "-" }</span>
                <input type="number"
                    class={if (*error).is_some() { "invalid" } else { "" }}
                    min={format_value(current.start)}
                    max={format_value(current.max)}
                    value={format_value(current.end)}
                    onchange={on_edit(Handle::End)}
                />
            </div>
            if let Some(ref err) = *error {
                <div class="input-error">{ err }</div>
            }
        </div>
    }
}
