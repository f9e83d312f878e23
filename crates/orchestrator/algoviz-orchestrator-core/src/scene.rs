//! What a host has to render before a run can be animated.

use serde::{Deserialize, Serialize};

use algoviz_algo_core::projection::{pointer_columns, pointer_rows, stack_slots};
use algoviz_algo_core::{CellSpec, Namespace, Op, PointerRow, StackSlot};
use algoviz_animation_core::{MapResolver, TargetHandle};

/// Handle of the result label in a headless mount.
pub const RESULT_HANDLE: &str = "result";

pub fn cell_handle(index: usize) -> TargetHandle {
    format!("cell/{index}")
}

pub fn pointer_handle(id: &str) -> TargetHandle {
    format!("pointer/{id}")
}

pub fn stack_handle(id: &str) -> TargetHandle {
    format!("stack/{id}")
}

/// Elements one run needs mounted: the input row, every pointer row the log
/// creates, and every stack slot it pushes.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub cells: Vec<CellSpec>,
    pub pointers: Vec<PointerRow>,
    pub stack: Vec<StackSlot>,
    /// Grid width to lay out: the cell count, widened when a pointer sits
    /// past the last cell.
    pub columns: usize,
}

impl Scene {
    pub fn from_run(cells: Vec<CellSpec>, ops: &[Op]) -> Self {
        Self {
            columns: cells.len().max(pointer_columns(ops)),
            cells,
            pointers: pointer_rows(ops),
            stack: stack_slots(ops),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty() && self.pointers.is_empty() && self.stack.is_empty()
    }

    /// Register a handle for every element, as a host without a real render
    /// tree would.
    pub fn mount(&self) -> MapResolver {
        let mut resolver = MapResolver::new();
        for (i, cell) in self.cells.iter().enumerate() {
            resolver.push_cell(cell.id.clone(), cell_handle(i));
        }
        for row in &self.pointers {
            resolver.insert(Namespace::Pointer, row.id.clone(), pointer_handle(&row.id));
        }
        for slot in &self.stack {
            resolver.insert(Namespace::Stack, slot.id.clone(), stack_handle(&slot.id));
        }
        resolver.set_result(RESULT_HANDLE);
        resolver
    }
}
