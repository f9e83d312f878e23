//! Error types for input normalization and operation-log validation

use serde::{Deserialize, Serialize};

use crate::ids::Namespace;

/// Rejected shell input. Raised before an algorithm runs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum InputError {
    /// A comma-separated token did not parse as an integer
    #[error("Not a number: '{token}' at position {position}")]
    NotANumber { token: String, position: usize },

    /// Too many items after splitting
    #[error("Too many items: {count} (limit: {limit})")]
    TooLong { count: usize, limit: usize },

    /// Binary search needs ascending input
    #[error("Input is not sorted ascending at index {index}")]
    Unsorted { index: usize },
}

/// A broken operation log: the ops could not have come from a correct run.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum LogError {
    #[error("op {op_index}: {namespace} '{id}' referenced before it was created")]
    UnknownId {
        op_index: usize,
        namespace: Namespace,
        id: String,
    },

    #[error("op {op_index}: {namespace} '{id}' referenced after it was removed")]
    UseAfterRemove {
        op_index: usize,
        namespace: Namespace,
        id: String,
    },

    #[error("op {op_index}: {namespace} '{id}' created twice")]
    DuplicateCreate {
        op_index: usize,
        namespace: Namespace,
        id: String,
    },

    #[error("op {op_index}: swap of index {index} with itself")]
    DegenerateSwap { op_index: usize, index: usize },

    #[error("op {op_index}: focus range {from}..={to} is reversed")]
    InvalidFocus {
        op_index: usize,
        from: usize,
        to: usize,
    },

    #[error("log has no result op")]
    MissingResult,

    #[error("op {op_index}: result op is not the last op")]
    ResultNotLast { op_index: usize },
}

impl InputError {
    /// Get error category for logging
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotANumber { .. } => "parse",
            Self::TooLong { .. } | Self::Unsorted { .. } => "validation",
        }
    }
}

impl LogError {
    /// Index of the offending op, when there is one.
    pub fn op_index(&self) -> Option<usize> {
        match self {
            Self::UnknownId { op_index, .. }
            | Self::UseAfterRemove { op_index, .. }
            | Self::DuplicateCreate { op_index, .. }
            | Self::DegenerateSwap { op_index, .. }
            | Self::InvalidFocus { op_index, .. }
            | Self::ResultNotLast { op_index } => Some(*op_index),
            Self::MissingResult => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offender() {
        let e = LogError::UseAfterRemove {
            op_index: 4,
            namespace: Namespace::Pointer,
            id: "j-1".into(),
        };
        assert_eq!(
            e.to_string(),
            "op 4: pointer 'j-1' referenced after it was removed"
        );
        assert_eq!(e.op_index(), Some(4));
        assert_eq!(LogError::MissingResult.op_index(), None);
    }

    #[test]
    fn input_categories() {
        let e = InputError::NotANumber {
            token: "x".into(),
            position: 1,
        };
        assert_eq!(e.category(), "parse");
        assert_eq!(InputError::Unsorted { index: 2 }.category(), "validation");
    }
}
