//! Core configuration for algoviz-animation-core.

use serde::{Deserialize, Serialize};

use algoviz_api_core::Color;

use crate::inputs::LoopMode;

/// Timing and styling knobs for the interpreter plus playback defaults.
/// Every field has a default, so partial JSON is accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Pixels per grid index.
    pub cell_width: f32,
    /// Duration of a tween that does not ask for one, in seconds.
    pub duration: f32,
    pub intro: IntroConfig,
    /// Peak scale for pointer pulses and highlights.
    pub pulse_scale: f32,
    /// Peak scale for cell/stack-slot pulses in the stack form.
    pub stack_pulse_scale: f32,
    /// Opacity of cells outside a focused range.
    pub dim_opacity: f32,
    pub error_color: Color,
    /// Tint applied to stack slots when they are pushed.
    pub slot_color: Color,
    pub playback: PlaybackConfig,
}

/// Staggered entrance of the primary cells.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntroConfig {
    pub duration: f32,
    pub stagger: f32,
    /// Vertical offset the cells rise from.
    pub slide: f32,
    pub amplitude: f32,
    pub period: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    pub loop_mode: LoopMode,
    /// Pause at the end of the schedule before looping, in seconds.
    pub restart_delay: f32,
    pub speed: f32,
    /// Start playing as soon as a rebuild succeeds.
    pub autoplay: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            cell_width: 20.0,
            duration: 0.3 * 1.5,
            intro: IntroConfig::default(),
            pulse_scale: 1.5,
            stack_pulse_scale: 2.0,
            dim_opacity: 0.2,
            error_color: Color::Red,
            slot_color: Color::Black,
            playback: PlaybackConfig::default(),
        }
    }
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            duration: 1.0,
            stagger: 0.1,
            slide: 10.0,
            amplitude: 1.0,
            period: 0.3,
        }
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            loop_mode: LoopMode::Loop,
            restart_delay: 1.0,
            speed: 1.0,
            autoplay: true,
        }
    }
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Pixel offset of grid index `x`.
    #[inline]
    pub fn x_px(&self, x: usize) -> f32 {
        x as f32 * self.cell_width
    }
}
