use algoviz_algo_core::InputError;
use algoviz_animation_core::{InterpretError, PlaybackError};

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum VisualizationError {
    /// The host rendered a scene that has since been replaced
    #[error("Render ticket {ticket} is stale (current input is {current})")]
    StaleRender { ticket: u64, current: u64 },

    /// `attach` called twice for the same input, or before any input
    #[error("No render is pending")]
    NotAwaitingRender,

    #[error(transparent)]
    Interpret(#[from] InterpretError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    #[error(transparent)]
    Input(#[from] InputError),
}

impl VisualizationError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::StaleRender { .. } | Self::NotAwaitingRender => "render",
            Self::Interpret(e) => e.category(),
            Self::Playback(e) => e.category(),
            Self::Input(e) => e.category(),
        }
    }
}
