//! Dual-handle range slider for Yew and plain JavaScript hosts.
//!
//! The headless core ([`geometry`], [`drag`], [`slider`], [`range_input`])
//! has no DOM types and runs anywhere. The browser side ([`input`],
//! [`hooks`], [`components`], [`bindings`]) adapts mouse and touch events to
//! the core and renders through CSS custom properties.
//!
//! ```
//! use multi_slider::{Handle, RangeSlider, SliderConfig};
//!
//! let config = SliderConfig::new(0.0, 100.0, 1.0).unwrap();
//! let mut slider = RangeSlider::with_range(config, 10.0, 50.0).unwrap();
//! slider.initialize(320.0, 20.0).unwrap();
//!
//! slider.pointer_down(34.0, 0.0, Some(Handle::Start));
//! slider.pointer_move(19.0, 0.0);
//! let committed = slider.pointer_up().committed.unwrap();
//! assert_eq!((committed.start, committed.end, committed.range), (5.0, 50.0, 45.0));
//! ```

pub mod bindings;
pub mod components;
pub mod config;
pub mod drag;
pub mod error;
pub mod event;
pub mod geometry;
pub mod hooks;
pub mod input;
pub mod range_input;
pub mod slider;
pub mod utils;

pub use drag::{Handle, PointerInput, PointerPhase, PointerResponse};
pub use error::{RangeInputError, SliderError};
pub use event::{ListenerId, RangeChanged, RangeCommitted};
pub use geometry::{SliderConfig, TrackGeometry};
pub use range_input::RangeInput;
pub use slider::{RangeSlider, SliderLayout};
