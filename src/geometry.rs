//! Value ↔ pixel mapping for a fixed-width slider track.
//!
//! The handle's left edge travels across `[0, max_range_px]`, where
//! `max_range_px` is the track width minus the thumb width. Domain values in
//! `[min, max]` map linearly onto that interval. Pixel offsets and quantized
//! values are kept to two decimals so repeated conversions do not jitter.

use crate::config::{DEFAULT_MAX, DEFAULT_MIN, DEFAULT_STEP};
use crate::error::SliderError;
use crate::utils::{coerce_number, round2};
use serde::{Deserialize, Deserializer, Serialize};

/// Bounds and step of a slider.
///
/// Deserializes from a partial `{min, max, step}` object; missing fields take
/// the defaults and string fields are coerced like form attributes. Use [`SliderConfig::new`] or [`SliderConfig::validate`] before
/// mapping anything.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    #[serde(deserialize_with = "number_or_text")]
    pub min: f64,
    #[serde(deserialize_with = "number_or_text")]
    pub max: f64,
    #[serde(deserialize_with = "number_or_text")]
    pub step: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

// Text without a numeric prefix becomes NaN and is caught by `validate`.
fn number_or_text<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match NumberOrText::deserialize(deserializer)? {
        NumberOrText::Number(value) => value,
        NumberOrText::Text(text) => coerce_number(&text),
    })
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN,
            max: DEFAULT_MAX,
            step: DEFAULT_STEP,
        }
    }
}

impl SliderConfig {
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, SliderError> {
        let config = Self { min, max, step };
        config.validate()?;
        Ok(config)
    }

    /// Reject bounds that admit no mapping. The step is never rejected.
    pub fn validate(&self) -> Result<(), SliderError> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(SliderError::NonFiniteBounds {
                min: self.min,
                max: self.max,
            });
        }
        if self.max <= self.min {
            return Err(SliderError::InvalidBounds {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Step used for quantization, or `None` when quantization is disabled.
    pub fn quantum(&self) -> Option<f64> {
        (self.step.is_finite() && self.step > 0.0).then_some(self.step)
    }

    /// Clamp into `[min, max]`; NaN and infinities fall back to `min`.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() || value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Measured track and thumb widths.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrackGeometry {
    pub track_width_px: f64,
    pub thumb_width_px: f64,
}

impl TrackGeometry {
    pub fn new(track_width_px: f64, thumb_width_px: f64) -> Result<Self, SliderError> {
        let travel = track_width_px - thumb_width_px;
        if !travel.is_finite() || travel <= 0.0 || thumb_width_px < 0.0 {
            return Err(SliderError::DegenerateTrack {
                track_width_px,
                thumb_width_px,
            });
        }
        Ok(Self {
            track_width_px,
            thumb_width_px,
        })
    }

    /// Distance the handle's left edge can travel.
    pub fn max_range_px(&self) -> f64 {
        self.track_width_px - self.thumb_width_px
    }

    pub fn clamp_px(&self, px: f64) -> f64 {
        if px.is_nan() {
            return 0.0;
        }
        px.max(0.0).min(self.max_range_px())
    }
}

/// Geometry engine: a validated config paired with a measured track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapping<'a> {
    pub config: &'a SliderConfig,
    pub track: &'a TrackGeometry,
}

impl<'a> Mapping<'a> {
    pub fn new(config: &'a SliderConfig, track: &'a TrackGeometry) -> Self {
        Self { config, track }
    }

    /// Pixel offset of the handle's left edge for `value`.
    pub fn value_to_pixels(&self, value: f64) -> f64 {
        let clamped = self.config.clamp(value);
        round2((clamped - self.config.min) / self.config.span() * self.track.max_range_px())
    }

    /// Domain value at pixel offset `px`, snapped to `step` when it is positive.
    pub fn pixels_to_value(&self, px: f64, step: f64) -> f64 {
        let raw = px / self.track.max_range_px() * self.config.span() + self.config.min;
        let snapped = if step > 0.0 && step.is_finite() {
            (raw / step).round() * step
        } else {
            raw
        };
        round2(snapped)
    }

    /// Pixel offset after quantizing and clamping, so the drawn handle and the
    /// stored value always agree. Returns `(value, px)`.
    pub fn settle(&self, px: f64) -> (f64, f64) {
        let step = self.config.quantum().unwrap_or(0.0);
        let value = self
            .config
            .clamp(self.pixels_to_value(self.track.clamp_px(px), step));
        (value, self.value_to_pixels(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track_300() -> TrackGeometry {
        TrackGeometry::new(320.0, 20.0).unwrap()
    }

    #[test]
    fn config_coerces_numeric_text() {
        let config: SliderConfig =
            serde_json::from_str(r#"{"min":"10","max":"200","step":"5"}"#).unwrap();
        assert_eq!(config, SliderConfig::new(10.0, 200.0, 5.0).unwrap());

        let partial: SliderConfig = serde_json::from_str(r#"{"max":"50px","step":2}"#).unwrap();
        assert_eq!((partial.min, partial.max, partial.step), (0.0, 50.0, 2.0));

        let junk: SliderConfig =
            serde_json::from_str(r#"{"min":"low","max":"100","step":"any"}"#).unwrap();
        assert!(junk.min.is_nan());
        assert!(junk.validate().is_err());
        let stepless = SliderConfig { min: 0.0, ..junk };
        assert!(stepless.validate().is_ok());
        assert_eq!(stepless.quantum(), None);
    }

    #[test]
    fn config_rejects_inverted_or_empty_bounds() {
        assert_eq!(
            SliderConfig::new(10.0, 10.0, 1.0),
            Err(SliderError::InvalidBounds {
                min: 10.0,
                max: 10.0
            })
        );
        assert!(SliderConfig::new(5.0, 1.0, 1.0).is_err());
        assert!(matches!(
            SliderConfig::new(f64::NAN, 1.0, 1.0),
            Err(SliderError::NonFiniteBounds { .. })
        ));
    }

    #[test]
    fn non_positive_step_disables_quantization() {
        assert_eq!(SliderConfig::new(0.0, 1.0, 0.0).unwrap().quantum(), None);
        assert_eq!(SliderConfig::new(0.0, 1.0, -2.0).unwrap().quantum(), None);
        assert_eq!(SliderConfig::new(0.0, 1.0, f64::NAN).unwrap().quantum(), None);
        assert_eq!(SliderConfig::new(0.0, 1.0, 0.25).unwrap().quantum(), Some(0.25));
    }

    #[test]
    fn clamp_handles_out_of_range_and_non_finite() {
        let config = SliderConfig::default();
        assert_eq!(config.clamp(-5.0), 0.0);
        assert_eq!(config.clamp(150.0), 100.0);
        assert_eq!(config.clamp(42.0), 42.0);
        assert_eq!(config.clamp(f64::NAN), 0.0);
        assert_eq!(config.clamp(f64::INFINITY), 0.0);
    }

    #[test]
    fn track_must_leave_room_for_travel() {
        assert!(TrackGeometry::new(20.0, 20.0).is_err());
        assert!(TrackGeometry::new(10.0, 20.0).is_err());
        assert!(TrackGeometry::new(f64::NAN, 20.0).is_err());
        assert_eq!(track_300().max_range_px(), 300.0);
    }

    #[test]
    fn value_to_pixels_is_linear_and_clamped() {
        let config = SliderConfig::default();
        let track = track_300();
        let mapping = Mapping::new(&config, &track);
        assert_eq!(mapping.value_to_pixels(0.0), 0.0);
        assert_eq!(mapping.value_to_pixels(50.0), 150.0);
        assert_eq!(mapping.value_to_pixels(100.0), 300.0);
        assert_eq!(mapping.value_to_pixels(250.0), 300.0);
        assert_eq!(mapping.value_to_pixels(f64::NAN), 0.0);
        assert_eq!(mapping.value_to_pixels(1.0 / 3.0), 1.0);
    }

    #[test]
    fn value_to_pixels_honours_offset_minimum() {
        let config = SliderConfig::new(1990.0, 2020.0, 1.0).unwrap();
        let track = track_300();
        let mapping = Mapping::new(&config, &track);
        assert_eq!(mapping.value_to_pixels(2005.0), 150.0);
    }

    #[test]
    fn pixels_to_value_snaps_to_step() {
        let config = SliderConfig::new(0.0, 100.0, 10.0).unwrap();
        let track = track_300();
        let mapping = Mapping::new(&config, &track);
        assert_eq!(mapping.pixels_to_value(69.0, 10.0), 20.0);
        assert_eq!(mapping.pixels_to_value(81.0, 10.0), 30.0);
        assert_eq!(mapping.pixels_to_value(69.0, 0.0), 23.0);
    }

    #[test]
    fn settle_clamps_pixels_before_mapping() {
        let config = SliderConfig::default();
        let track = track_300();
        let mapping = Mapping::new(&config, &track);
        assert_eq!(mapping.settle(-40.0), (0.0, 0.0));
        assert_eq!(mapping.settle(900.0), (100.0, 300.0));
        assert_eq!(mapping.settle(15.0), (5.0, 15.0));
    }
}
