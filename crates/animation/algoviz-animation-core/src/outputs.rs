//! Output contracts from the playback controller.
//!
//! Outputs carry the sampled property writes for this tick, keyed by target
//! handle, and a separate list of semantic events.

use serde::{Deserialize, Serialize};

use algoviz_api_core::WriteBatch;

use crate::controller::PlaybackState;

/// Discrete signals emitted between ticks and during stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CoreEvent {
    /// A rebuild produced a new program.
    Built {
        tweens: usize,
        labels: usize,
        duration: f32,
    },
    StateChanged {
        from: PlaybackState,
        to: PlaybackState,
    },
    Seeked {
        old_time: f32,
        new_time: f32,
    },
    LabelReached {
        label: String,
        time: f32,
    },
    /// End of schedule reached in loop mode; restart after `delay`.
    LoopScheduled {
        delay: f32,
    },
    Looped,
    Completed {
        time: f32,
    },
    Error {
        message: String,
    },
}

/// Outputs returned by TimelineController::update().
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: WriteBatch,
    #[serde(default)]
    pub events: Vec<CoreEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes = WriteBatch::new();
        self.events.clear();
    }
}
