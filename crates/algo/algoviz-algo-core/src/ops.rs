//! Operation vocabulary shared by every instrumented algorithm.
//!
//! Ops serialize with a `kind` discriminant, e.g.
//! `{ "kind": "move", "id": "low", "x": 3 }`. Each algorithm emits a subset;
//! the interpreter matches the whole set exhaustively.

use serde::{Deserialize, Serialize};

use algoviz_api_core::Color;

/// Logical pointer / slot / cell identifier assigned by an algorithm.
pub type PointerId = String;

/// Grid position in cell units.
pub type XIndex = usize;

/// One pointer in a `create-many` batch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSpec {
    pub id: PointerId,
    pub x: XIndex,
    pub color: Color,
}

impl PointerSpec {
    pub fn new(id: impl Into<PointerId>, x: XIndex, color: Color) -> Self {
        Self {
            id: id.into(),
            x,
            color,
        }
    }
}

/// Final value carried by the terminal `result` op.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Outcome {
    Balanced(bool),
    Index(Option<usize>),
    Sorted(Vec<i64>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Op {
    Create {
        id: PointerId,
        x: XIndex,
        color: Color,
    },
    CreateMany {
        items: Vec<PointerSpec>,
    },
    Move {
        id: PointerId,
        x: XIndex,
    },
    Swap {
        a: XIndex,
        b: XIndex,
    },
    Focus {
        from: XIndex,
        to: XIndex,
    },
    HighlightIndex {
        index: XIndex,
    },
    HighlightPointer {
        id: PointerId,
    },
    Match {
        left: PointerId,
        right: PointerId,
    },
    NoneMatch {
        left: PointerId,
        right: PointerId,
    },
    AppendStack {
        id: PointerId,
        #[serde(rename = "char")]
        ch: char,
    },
    PopStack {
        id: PointerId,
    },
    #[serde(rename_all = "camelCase")]
    StackMatch {
        input_id: PointerId,
        stack_id: PointerId,
    },
    #[serde(rename_all = "camelCase")]
    StackNoneMatch {
        input_id: PointerId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stack_id: Option<PointerId>,
    },
    Remove {
        id: PointerId,
    },
    RemoveMany {
        ids: Vec<PointerId>,
    },
    Result {
        result: Outcome,
    },
}

impl Op {
    /// Kebab-case discriminant, as it appears in the serialized `kind` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Op::Create { .. } => "create",
            Op::CreateMany { .. } => "create-many",
            Op::Move { .. } => "move",
            Op::Swap { .. } => "swap",
            Op::Focus { .. } => "focus",
            Op::HighlightIndex { .. } => "highlight-index",
            Op::HighlightPointer { .. } => "highlight-pointer",
            Op::Match { .. } => "match",
            Op::NoneMatch { .. } => "none-match",
            Op::AppendStack { .. } => "append-stack",
            Op::PopStack { .. } => "pop-stack",
            Op::StackMatch { .. } => "stack-match",
            Op::StackNoneMatch { .. } => "stack-none-match",
            Op::Remove { .. } => "remove",
            Op::RemoveMany { .. } => "remove-many",
            Op::Result { .. } => "result",
        }
    }

    pub fn create(id: impl Into<PointerId>, x: XIndex, color: Color) -> Self {
        Op::Create {
            id: id.into(),
            x,
            color,
        }
    }

    pub fn mv(id: impl Into<PointerId>, x: XIndex) -> Self {
        Op::Move { id: id.into(), x }
    }

    pub fn remove(id: impl Into<PointerId>) -> Self {
        Op::Remove { id: id.into() }
    }
}

/// Count ops of one kind; handy for assertions and summaries.
pub fn count_kind(ops: &[Op], kind: &str) -> usize {
    ops.iter().filter(|op| op.kind() == kind).count()
}
