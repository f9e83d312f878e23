//! Easing helpers:
//! - linear
//! - power1.out (quadratic ease-out, the default)
//! - elastic.out(amplitude, period)

use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Maps linear progress in [0, 1] to eased progress. Elastic curves
/// overshoot 1 before settling; the endpoints are always exact.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Ease {
    Linear,
    #[default]
    Power1Out,
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    pub fn elastic(amplitude: f32, period: f32) -> Self {
        Ease::ElasticOut { amplitude, period }
    }

    pub fn apply(&self, p: f32) -> f32 {
        if p <= 0.0 {
            return 0.0;
        }
        if p >= 1.0 {
            return 1.0;
        }
        match *self {
            Ease::Linear => p,
            Ease::Power1Out => power1_out(p),
            Ease::ElasticOut { amplitude, period } => elastic_out(p, amplitude, period),
        }
    }
}

#[inline]
pub fn power1_out(p: f32) -> f32 {
    let inv = 1.0 - p;
    1.0 - inv * inv
}

/// Damped sine settling at 1. Amplitudes below 1 are raised to 1.
pub fn elastic_out(p: f32, amplitude: f32, period: f32) -> f32 {
    let a = amplitude.max(1.0);
    let period = if period > 0.0 { period } else { 0.3 };
    let shift = period / (2.0 * PI) * (1.0 / a).asin();
    a * 2f32.powf(-10.0 * p) * ((p - shift) * (2.0 * PI) / period).sin() + 1.0
}
