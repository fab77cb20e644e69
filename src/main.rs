//! Demo application: a boat search filter panel built from range sliders.
//! Wires slider components to page state and shows the last committed range.

use log::info;
use multi_slider::components::{MultiSlider, RangeInputField};
use multi_slider::{RangeChanged, RangeCommitted};
use serde::Serialize;
use yew::prelude::*;

/// Filters gathered from the panel, as a parent would hand them to a search.
#[derive(Debug, Clone, PartialEq, Serialize)]
struct BoatFilters {
    price: (f64, f64),
    length: (f64, f64),
    year_built: (f64, f64),
    budget: (f64, f64),
}

impl Default for BoatFilters {
    fn default() -> Self {
        Self {
            price: (50_000.0, 400_000.0),
            length: (20.0, 60.0),
            year_built: (1995.0, 2015.0),
            budget: (0.0, 100_000.0),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Filter {
    Price,
    Length,
    YearBuilt,
}

impl Filter {
    fn apply(self, filters: &mut BoatFilters, event: &RangeCommitted) {
        let range = (event.start, event.end);
        match self {
            Filter::Price => filters.price = range,
            Filter::Length => filters.length = range,
            Filter::YearBuilt => filters.year_built = range,
        }
    }
}

/// Primary application component.
#[function_component(App)]
fn app() -> Html {
    let filters = use_state(BoatFilters::default);
    let last_event = use_state(|| None::<String>);

    let on_slider_change = |filter: Filter| {
        let filters = filters.clone();
        let last_event = last_event.clone();
        Callback::from(move |event: RangeCommitted| {
            info!("Filter updated: {} - {}", event.start, event.end);
            let mut next = (*filters).clone();
            filter.apply(&mut next, &event);
            filters.set(next);
            last_event.set(serde_json::to_string(&event).ok());
        })
    };

    let on_budget_change = {
        let filters = filters.clone();
        let last_event = last_event.clone();
        Callback::from(move |changed: RangeChanged| {
            let mut next = (*filters).clone();
            next.budget = (changed.start, changed.end);
            filters.set(next);
            last_event.set(serde_json::to_string(&changed).ok());
        })
    };

    let filters_json =
        serde_json::to_string_pretty(&*filters).unwrap_or_else(|e| format!("<{}>", e));

    html! {
        <div class="container">
            <h1>{ "Boat Search Filters" }</h1>
            <div class="filters">
                <MultiSlider
                    title="Price"
                    min={0.0} max={500_000.0} step={1_000.0}
                    start={filters.price.0} end={filters.price.1}
                    onchange={on_slider_change(Filter::Price)}
                />
                <MultiSlider
                    title="Length"
                    min={10.0} max={100.0} step={1.0}
                    start={filters.length.0} end={filters.length.1}
                    onchange={on_slider_change(Filter::Length)}
                />
                <MultiSlider
                    title="Year Built"
                    min={1980.0} max={2024.0} step={1.0}
                    start={filters.year_built.0} end={filters.year_built.1}
                    onchange={on_slider_change(Filter::YearBuilt)}
                />
                <RangeInputField
                    label="Budget"
                    start={filters.budget.0}
                    end={filters.budget.1}
                    onrangechange={on_budget_change}
                />
            </div>
            <div class="results-area">
                <h3>{ "Current filters" }</h3>
                <pre>{ filters_json }</pre>
                if let Some(ref event) = *last_event {
                    <div class="last-event">{ format!("Last change: {}", event) }</div>
                }
            </div>
        </div>
    }
}

/// Entry point: installs the panic hook and renders the App component.
fn main() {
    console_error_panic_hook::set_once();
    yew::Renderer::<App>::new().render();
}
