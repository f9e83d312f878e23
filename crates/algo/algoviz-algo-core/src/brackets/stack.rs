use algoviz_api_core::Color;

use super::{closer_for, is_closer};
use crate::ids::{cell_id, stack_slot_id, CURSOR};
use crate::ops::{Op, Outcome, PointerId};
use crate::projection::{text_cells, CellSpec};
use crate::run::{Algorithm, RunResult};

/// Scan left to right with a single cursor, pushing the expected closer of
/// every opener onto an auxiliary stack. Stops at the first mismatch.
///
/// Balanced iff no mismatch occurred and the stack is empty at the end.
pub fn balanced_stack(input: &str, ops: &mut Vec<Op>) -> bool {
    let mut stack: Vec<(char, PointerId)> = Vec::new();
    let mut pushes = 0usize;
    let mut mismatch = false;

    for (i, c) in input.chars().enumerate() {
        if i == 0 {
            ops.push(Op::create(CURSOR, 0, Color::Black));
        } else {
            ops.push(Op::mv(CURSOR, i));
        }

        if let Some(closer) = closer_for(c) {
            let id = stack_slot_id(pushes);
            pushes += 1;
            ops.push(Op::AppendStack {
                id: id.clone(),
                ch: closer,
            });
            stack.push((closer, id));
        } else if is_closer(c) {
            let input_id = cell_id(c, i);
            match stack.pop() {
                Some((expected, stack_id)) if expected == c => {
                    ops.push(Op::StackMatch {
                        input_id,
                        stack_id: stack_id.clone(),
                    });
                    ops.push(Op::PopStack { id: stack_id });
                }
                popped => {
                    ops.push(Op::StackNoneMatch {
                        input_id,
                        stack_id: popped.map(|(_, id)| id),
                    });
                    mismatch = true;
                    break;
                }
            }
        }
    }

    let balanced = !mismatch && stack.is_empty();
    ops.push(Op::Result {
        result: Outcome::Balanced(balanced),
    });
    balanced
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BalancedStack;

impl Algorithm for BalancedStack {
    type Input = String;
    type Output = bool;

    fn name(&self) -> &'static str {
        "balanced-stack"
    }

    fn run(&self, input: &String) -> RunResult<bool, String> {
        let mut ops = Vec::new();
        let result = balanced_stack(input, &mut ops);
        log::debug!("{}: input={input:?} result={result} ops={}", self.name(), ops.len());
        RunResult::new(result, input.clone(), ops)
    }

    fn cells(&self, input: &String) -> Vec<CellSpec> {
        text_cells(input)
    }
}
