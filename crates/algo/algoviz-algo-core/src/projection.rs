//! Projections of a run that a shell needs before animating: which cells,
//! pointers and stack slots to mount.

use serde::{Deserialize, Serialize};

use algoviz_api_core::Color;

use crate::ids::cell_id;
use crate::ops::{Op, PointerId};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSpec {
    pub id: PointerId,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerRow {
    pub id: PointerId,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSlot {
    pub id: PointerId,
    #[serde(rename = "char")]
    pub ch: char,
}

/// One cell per character.
pub fn text_cells(input: &str) -> Vec<CellSpec> {
    input
        .chars()
        .enumerate()
        .map(|(i, c)| CellSpec {
            id: cell_id(c, i),
            label: c.to_string(),
        })
        .collect()
}

/// One cell per number.
pub fn number_cells(items: &[i64]) -> Vec<CellSpec> {
    items
        .iter()
        .enumerate()
        .map(|(i, n)| CellSpec {
            id: cell_id(n, i),
            label: n.to_string(),
        })
        .collect()
}

/// Every pointer the log creates, in creation order.
pub fn pointer_rows(ops: &[Op]) -> Vec<PointerRow> {
    let mut rows = Vec::new();
    for op in ops {
        match op {
            Op::Create { id, color, .. } => rows.push(PointerRow {
                id: id.clone(),
                color: *color,
            }),
            Op::CreateMany { items } => rows.extend(items.iter().map(|p| PointerRow {
                id: p.id.clone(),
                color: p.color,
            })),
            _ => {}
        }
    }
    rows
}

/// Grid columns the pointer row spans: one past the rightmost index any
/// pointer is placed at. Can exceed the cell count: a half-open search
/// starts `high` one slot past the last cell.
pub fn pointer_columns(ops: &[Op]) -> usize {
    ops.iter()
        .filter_map(|op| match op {
            Op::Create { x, .. } | Op::Move { x, .. } => Some(*x),
            Op::CreateMany { items } => items.iter().map(|p| p.x).max(),
            _ => None,
        })
        .max()
        .map_or(0, |x| x + 1)
}

/// Every stack slot the log pushes, in push order.
pub fn stack_slots(ops: &[Op]) -> Vec<StackSlot> {
    ops.iter()
        .filter_map(|op| match op {
            Op::AppendStack { id, ch } => Some(StackSlot {
                id: id.clone(),
                ch: *ch,
            }),
            _ => None,
        })
        .collect()
}
