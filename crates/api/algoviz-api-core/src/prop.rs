//! Animatable element properties and small ordered property sets.
//!
//! A `Props` keeps insertion order so that tweens write their properties in
//! a stable order; setting the same property twice replaces the earlier value.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::value::{Color, Value};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Prop {
    /// Horizontal offset in pixels.
    TranslateX,
    /// Vertical offset in pixels.
    TranslateY,
    Opacity,
    Scale,
    Visible,
    Color,
}

impl Prop {
    pub fn name(&self) -> &'static str {
        match self {
            Prop::TranslateX => "translateX",
            Prop::TranslateY => "translateY",
            Prop::Opacity => "opacity",
            Prop::Scale => "scale",
            Prop::Visible => "visible",
            Prop::Color => "color",
        }
    }

    /// Value an element is assumed to have before any tween touched it.
    pub fn initial(&self) -> Value {
        match self {
            Prop::TranslateX | Prop::TranslateY => Value::Float(0.0),
            Prop::Opacity | Prop::Scale => Value::Float(1.0),
            Prop::Visible => Value::Bool(true),
            Prop::Color => Value::Color(Color::Black),
        }
    }
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered property → value set used for tween endpoints.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Props(Vec<(Prop, Value)>);

impl Props {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Insert or replace a property value.
    pub fn set(&mut self, prop: Prop, value: impl Into<Value>) {
        let value = value.into();
        if let Some(slot) = self.0.iter_mut().find(|(p, _)| *p == prop) {
            slot.1 = value;
        } else {
            self.0.push((prop, value));
        }
    }

    pub fn with(mut self, prop: Prop, value: impl Into<Value>) -> Self {
        self.set(prop, value);
        self
    }

    pub fn translate_x(self, px: f32) -> Self {
        self.with(Prop::TranslateX, px)
    }

    pub fn translate_y(self, px: f32) -> Self {
        self.with(Prop::TranslateY, px)
    }

    pub fn opacity(self, v: f32) -> Self {
        self.with(Prop::Opacity, v)
    }

    pub fn scale(self, v: f32) -> Self {
        self.with(Prop::Scale, v)
    }

    pub fn visible(self, v: bool) -> Self {
        self.with(Prop::Visible, v)
    }

    pub fn color(self, c: Color) -> Self {
        self.with(Prop::Color, c)
    }

    pub fn get(&self, prop: Prop) -> Option<&Value> {
        self.0.iter().find(|(p, _)| *p == prop).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Prop, Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
