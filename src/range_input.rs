//! Two numeric text fields editing the same `[start, end]` range.
//!
//! Unlike the slider, edits are validated rather than clamped: a start above
//! the current end (or an end below the current start) is refused outright.

use crate::config::{DEFAULT_INPUT_END, DEFAULT_INPUT_MAX, DEFAULT_INPUT_MIN, DEFAULT_INPUT_START};
use crate::error::RangeInputError;
use crate::event::RangeChanged;
use crate::utils::parse_float;
use log::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeInput {
    pub min: f64,
    pub max: f64,
    pub start: f64,
    pub end: f64,
}

impl Default for RangeInput {
    fn default() -> Self {
        Self {
            min: DEFAULT_INPUT_MIN,
            max: DEFAULT_INPUT_MAX,
            start: DEFAULT_INPUT_START,
            end: DEFAULT_INPUT_END,
        }
    }
}

fn parse_bounded(input: &str, lower: f64, upper: f64) -> Result<f64, RangeInputError> {
    let value = parse_float(input)
        .filter(|v| !v.is_nan())
        .ok_or_else(|| RangeInputError::NotANumber(input.trim().to_string()))?;
    if value < lower {
        return Err(RangeInputError::BelowLowerBound {
            value,
            bound: lower,
        });
    }
    if value > upper {
        return Err(RangeInputError::AboveUpperBound {
            value,
            bound: upper,
        });
    }
    Ok(value)
}

impl RangeInput {
    pub fn new(min: f64, max: f64, start: f64, end: f64) -> Self {
        Self {
            min,
            max,
            start,
            end,
        }
    }

    /// Accept a new start in `[min, end]`.
    pub fn change_start(&mut self, input: &str) -> Result<RangeChanged, RangeInputError> {
        let value = parse_bounded(input, self.min, self.end).inspect_err(|err| {
            debug!("Rejected start edit: {}", err);
        })?;
        self.start = value;
        Ok(self.snapshot())
    }

    /// Accept a new end in `[start, max]`.
    pub fn change_end(&mut self, input: &str) -> Result<RangeChanged, RangeInputError> {
        let value = parse_bounded(input, self.start, self.max).inspect_err(|err| {
            debug!("Rejected end edit: {}", err);
        })?;
        self.end = value;
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> RangeChanged {
        RangeChanged {
            start: self.start,
            end: self.end,
        }
    }
}
