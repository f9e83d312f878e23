//! Logical identifier scheme.
//!
//! Ids are derived from the input alone so a replay of the same input names
//! the same entities. The namespace tells a resolver which element family an
//! id lives in.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ops::{PointerId, XIndex};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Namespace {
    /// Cursors drawn above the input row.
    Pointer,
    /// Primary input cells.
    Cell,
    /// Auxiliary stack slots.
    Stack,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Namespace::Pointer => "pointer",
            Namespace::Cell => "cell",
            Namespace::Stack => "stack",
        })
    }
}

pub const CURSOR: &str = "cursor";
pub const LOW: &str = "low";
pub const HIGH: &str = "high";
pub const MIDDLE: &str = "middle";

/// Id of the input cell showing `label` at `index`, e.g. `"}-6"`.
pub fn cell_id(label: impl fmt::Display, index: XIndex) -> PointerId {
    format!("{label}-{index}")
}

pub fn stack_slot_id(n: usize) -> PointerId {
    format!("stack-{n}")
}

pub fn frame_pointer_id(n: usize) -> PointerId {
    format!("pid-{n}")
}

pub fn scan_pointer_id(call: usize) -> PointerId {
    format!("j-{call}")
}

pub fn pivot_pointer_id(call: usize) -> PointerId {
    format!("pivot-{call}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats() {
        assert_eq!(cell_id('}', 6), "}-6");
        assert_eq!(cell_id(12, 0), "12-0");
        assert_eq!(stack_slot_id(2), "stack-2");
        assert_eq!(frame_pointer_id(0), "pid-0");
        assert_eq!(scan_pointer_id(3), "j-3");
        assert_eq!(pivot_pointer_id(3), "pivot-3");
    }
}
