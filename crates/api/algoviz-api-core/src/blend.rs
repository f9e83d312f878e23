//! Blending utilities for Value types.
//! - f32 linear interpolation for floats
//! - visibility stays on for the whole tween if either endpoint is visible
//! - colors switch to the target as soon as the tween has started
//! - mismatched kinds fall back to step blending (t < 0.5 -> a else b)

use crate::Value;

/// Linear interpolation for f32
#[inline]
pub fn lerp_f(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Blend two Values at eased progress `t` (0 = a, 1 = b).
///
/// `t` may overshoot [0, 1] for elastic eases; floats follow it, discrete
/// kinds clamp.
pub fn blend_values(a: &Value, b: &Value, t: f32) -> Value {
    if t <= 0.0 && !matches!(a, Value::Float(_)) {
        return a.clone();
    }
    match (a, b) {
        (Value::Float(af), Value::Float(bf)) => Value::Float(lerp_f(*af, *bf, t)),
        (Value::Bool(av), Value::Bool(bv)) => {
            if t >= 1.0 {
                Value::Bool(*bv)
            } else {
                Value::Bool(*av || *bv)
            }
        }
        (Value::Color(_), Value::Color(bc)) => Value::Color(*bc),
        (a_val, b_val) => step_blend(a_val, b_val, t),
    }
}

/// Step blending for step-only types: choose a for t < 0.5, else b.
pub fn step_blend(a: &Value, b: &Value, t: f32) -> Value {
    if t < 0.5 {
        a.clone()
    } else {
        b.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Value};

    #[test]
    fn blend_floats() {
        let a = Value::Float(0.0);
        let b = Value::Float(1.0);
        assert_eq!(blend_values(&a, &b, 0.5), Value::Float(0.5));
        assert_eq!(blend_values(&a, &b, 1.2), Value::Float(1.2));
    }

    #[test]
    fn visibility_is_on_while_fading() {
        let hidden = Value::Bool(false);
        let shown = Value::Bool(true);
        assert_eq!(blend_values(&hidden, &shown, 0.0), hidden);
        assert_eq!(blend_values(&hidden, &shown, 0.1), shown);
        assert_eq!(blend_values(&shown, &hidden, 0.9), shown);
        assert_eq!(blend_values(&shown, &hidden, 1.0), hidden);
    }

    #[test]
    fn color_switches_once_started() {
        let a = Value::Color(Color::Black);
        let b = Value::Color(Color::Red);
        assert_eq!(blend_values(&a, &b, 0.0), a);
        assert_eq!(blend_values(&a, &b, 0.01), b);
    }

    #[test]
    fn step_mismatched() {
        let a = Value::Bool(false);
        let b = Value::Float(1.0);
        assert_eq!(step_blend(&a, &b, 0.25), a);
        assert_eq!(blend_values(&a, &b, 0.75), b);
    }
}
