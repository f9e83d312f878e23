//! Well-formedness check for operation logs.

use hashbrown::HashSet;

use crate::error::LogError;
use crate::ids::Namespace;
use crate::ops::Op;

/// Live/dead bookkeeping for one id namespace.
#[derive(Default)]
struct Lifetimes {
    live: HashSet<String>,
    dead: HashSet<String>,
}

impl Lifetimes {
    fn create(&mut self, ns: Namespace, id: &str, op_index: usize) -> Result<(), LogError> {
        if self.live.contains(id) || self.dead.contains(id) {
            return Err(LogError::DuplicateCreate {
                op_index,
                namespace: ns,
                id: id.to_string(),
            });
        }
        self.live.insert(id.to_string());
        Ok(())
    }

    fn touch(&self, ns: Namespace, id: &str, op_index: usize) -> Result<(), LogError> {
        if self.live.contains(id) {
            Ok(())
        } else if self.dead.contains(id) {
            Err(LogError::UseAfterRemove {
                op_index,
                namespace: ns,
                id: id.to_string(),
            })
        } else {
            Err(LogError::UnknownId {
                op_index,
                namespace: ns,
                id: id.to_string(),
            })
        }
    }

    fn kill(&mut self, ns: Namespace, id: &str, op_index: usize) -> Result<(), LogError> {
        self.touch(ns, id, op_index)?;
        self.live.remove(id);
        self.dead.insert(id.to_string());
        Ok(())
    }
}

/// Check that `ops` could have come from a correct run: ids used only while
/// live, no id created twice, no self-swap, ordered focus ranges, and exactly
/// one `result` which is the last op.
///
/// Cell ids and indices are not checked here; they depend on the mounted grid.
pub fn check_log(ops: &[Op]) -> Result<(), LogError> {
    let mut pointers = Lifetimes::default();
    let mut slots = Lifetimes::default();
    let ptr = Namespace::Pointer;
    let stk = Namespace::Stack;

    for (i, op) in ops.iter().enumerate() {
        match op {
            Op::Create { id, .. } => pointers.create(ptr, id, i)?,
            Op::CreateMany { items } => {
                for p in items {
                    pointers.create(ptr, &p.id, i)?;
                }
            }
            Op::Move { id, .. } | Op::HighlightPointer { id } => pointers.touch(ptr, id, i)?,
            Op::Match { left, right } | Op::NoneMatch { left, right } => {
                pointers.touch(ptr, left, i)?;
                pointers.touch(ptr, right, i)?;
            }
            Op::Remove { id } => pointers.kill(ptr, id, i)?,
            Op::RemoveMany { ids } => {
                for id in ids {
                    pointers.kill(ptr, id, i)?;
                }
            }
            Op::Swap { a, b } => {
                if a == b {
                    return Err(LogError::DegenerateSwap {
                        op_index: i,
                        index: *a,
                    });
                }
            }
            Op::Focus { from, to } => {
                if from > to {
                    return Err(LogError::InvalidFocus {
                        op_index: i,
                        from: *from,
                        to: *to,
                    });
                }
            }
            Op::HighlightIndex { .. } => {}
            Op::AppendStack { id, .. } => slots.create(stk, id, i)?,
            Op::PopStack { id } => slots.kill(stk, id, i)?,
            Op::StackMatch { stack_id, .. } => slots.touch(stk, stack_id, i)?,
            Op::StackNoneMatch { stack_id, .. } => {
                if let Some(id) = stack_id {
                    slots.touch(stk, id, i)?;
                }
            }
            Op::Result { .. } => {
                if i + 1 != ops.len() {
                    return Err(LogError::ResultNotLast { op_index: i });
                }
            }
        }
    }

    match ops.last() {
        Some(Op::Result { .. }) => Ok(()),
        _ => Err(LogError::MissingResult),
    }
}
