//! Error types for interpretation and playback

use algoviz_algo_core::{LogError, Namespace};

use crate::controller::PlaybackState;

/// Failure while turning an operation log into a timeline program.
/// The timeline is rolled back whenever one of these is returned.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum InterpretError {
    /// The resolver has no element for a logical id
    #[error("op {op_index}: no {namespace} element for '{id}'")]
    UnresolvedElement {
        op_index: usize,
        namespace: Namespace,
        id: String,
    },

    /// A cell index past the mounted grid
    #[error("op {op_index}: index {index} out of range (cells: {len})")]
    IndexOutOfRange {
        op_index: usize,
        index: usize,
        len: usize,
    },

    /// A focus range that does not fit the mounted grid
    #[error("op {op_index}: range {from}..={to} invalid for {len} cells")]
    InvalidRange {
        op_index: usize,
        from: usize,
        to: usize,
        len: usize,
    },

    /// The log failed validation before interpretation started
    #[error("malformed operation log: {0}")]
    MalformedLog(#[from] LogError),
}

impl InterpretError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnresolvedElement { .. } => "binding",
            Self::IndexOutOfRange { .. } | Self::InvalidRange { .. } => "range",
            Self::MalformedLog(_) => "log",
        }
    }
}

/// Rejected playback request.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error("Invalid transition: cannot {action} while {from}")]
    InvalidTransition {
        from: PlaybackState,
        action: &'static str,
    },

    #[error("Unknown label: {label}")]
    UnknownLabel { label: String },

    #[error("Invalid time value: {time}")]
    InvalidTime { time: f32 },
}

impl PlaybackError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "state",
            Self::UnknownLabel { .. } | Self::InvalidTime { .. } => "seek",
        }
    }
}
