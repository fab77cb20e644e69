//! Application-level configuration constants.

// Slider defaults
pub const DEFAULT_MIN: f64 = 0.0;
pub const DEFAULT_MAX: f64 = 100.0;
pub const DEFAULT_STEP: f64 = 1.0;
pub const DEFAULT_START: f64 = 0.0;
pub const DEFAULT_END: f64 = 30.0;
pub const DEFAULT_TITLE: &str = "Total";

// Range input defaults
pub const DEFAULT_INPUT_MIN: f64 = 0.0;
pub const DEFAULT_INPUT_MAX: f64 = 1_000_000.0;
pub const DEFAULT_INPUT_START: f64 = 0.0;
pub const DEFAULT_INPUT_END: f64 = 100_000.0;

// Thumb highlight colors
pub const ACTIVE_THUMB_COLOR: &str = "#bb202d";
pub const INACTIVE_THUMB_COLOR: &str = "#1b5297";

// CSS custom properties consumed by the stylesheet
pub const THUMB_LEFT_VAR: &str = "--thumb-left-position";
pub const THUMB_COLOR_VAR: &str = "--thumb-active-color";
pub const RANGE_LEFT_VAR: &str = "--range-left-position";
pub const RANGE_WIDTH_VAR: &str = "--range-width";

/// Decimal places kept for pixel offsets and quantized values.
pub const PRECISION_DECIMALS: i32 = 2;

/// Attribute carrying the handle name on thumb elements.
pub const HANDLE_ATTRIBUTE: &str = "data-name";
