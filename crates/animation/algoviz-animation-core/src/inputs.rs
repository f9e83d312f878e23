//! Input contracts for the playback controller.
//!
//! Hosts either call the controller methods directly or send a
//! `PlayerCommand` through `TimelineController::apply`.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PlayerCommand {
    Play,
    Pause,
    Restart,
    Seek { time: f32 },
    SeekLabel { label: String },
    StepForward,
    StepBackward,
    SetSpeed { speed: f32 },
    SetLoopMode { mode: LoopMode },
}

#[derive(Copy, Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LoopMode {
    Once,
    #[default]
    Loop,
}
