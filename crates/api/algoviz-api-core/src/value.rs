//! Value: runtime property values written to element handles.
//! Numeric values use f32, matching the animation timeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named tint used for pointers, cells and match feedback.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Red,
    Orange,
    Yellow,
    Pink,
    Purple,
    #[serde(rename = "lightgreen")]
    LightGreen,
    Black,
}

impl Color {
    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Red => "red",
            Color::Orange => "orange",
            Color::Yellow => "yellow",
            Color::Pink => "pink",
            Color::Purple => "purple",
            Color::LightGreen => "lightgreen",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown color name: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "white" => Ok(Color::White),
            "red" => Ok(Color::Red),
            "orange" => Ok(Color::Orange),
            "yellow" => Ok(Color::Yellow),
            "pink" => Ok(Color::Pink),
            "purple" => Ok(Color::Purple),
            "lightgreen" => Ok(Color::LightGreen),
            "black" => Ok(Color::Black),
            other => Err(ParseColorError(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "data")]
pub enum Value {
    /// Scalar float (translation, opacity, scale)
    Float(f32),

    /// Boolean (step), used for visibility
    Bool(bool),

    /// Named color (step)
    Color(Color),
}

impl Value {
    /// Convenience constructors
    pub fn f(v: f32) -> Self {
        Value::Float(v)
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<Color> for Value {
    fn from(c: Color) -> Self {
        Value::Color(c)
    }
}
