use algoviz_api_core::Color;

use super::{closer_for, is_closer};
use crate::ids::frame_pointer_id;
use crate::ops::{Op, Outcome};
use crate::projection::{text_cells, CellSpec};
use crate::run::{Algorithm, RunResult};

/// Deepest nesting the scan opens frames for. An opener past this depth
/// ends the scan as unbalanced, so arbitrary input cannot exhaust the stack.
pub(crate) const MAX_DEPTH: usize = 256;

/// Pointer tint per nesting depth, cycling.
const DEPTH_COLORS: [Color; 4] = [Color::Black, Color::Purple, Color::Orange, Color::LightGreen];

/// Shared scan state threaded through the recursive frames.
struct Scan<'a> {
    chars: Vec<char>,
    cursor: usize,
    frames: usize,
    ops: &'a mut Vec<Op>,
}

impl Scan<'_> {
    fn next_char(&mut self) -> Option<char> {
        let c = self.chars.get(self.cursor).copied();
        if c.is_some() {
            self.cursor += 1;
        }
        c
    }

    /// One call frame expecting `end` (None for the outermost frame).
    /// The frame owns one pointer for its lifetime.
    fn expect(&mut self, end: Option<char>, parent: Option<&str>, depth: usize) -> bool {
        let id = frame_pointer_id(self.frames);
        self.frames += 1;
        self.ops.push(Op::create(
            id.clone(),
            self.cursor,
            DEPTH_COLORS[depth % DEPTH_COLORS.len()],
        ));

        let ok = loop {
            let good = match self.next_char() {
                None => {
                    // Out of input with an opener still waiting on its closer.
                    if end.is_some() {
                        if let Some(p) = parent {
                            self.ops.push(Op::HighlightPointer { id: p.to_string() });
                        }
                    }
                    break end.is_none();
                }
                Some(c) if is_closer(c) => {
                    let matched = end == Some(c);
                    match parent {
                        Some(p) if matched => self.ops.push(Op::Match {
                            left: p.to_string(),
                            right: id.clone(),
                        }),
                        Some(p) => self.ops.push(Op::NoneMatch {
                            left: p.to_string(),
                            right: id.clone(),
                        }),
                        None => self.ops.push(Op::HighlightPointer { id: id.clone() }),
                    }
                    break matched;
                }
                Some(c) => match closer_for(c) {
                    Some(_) if depth >= MAX_DEPTH => {
                        log::warn!("nesting deeper than {MAX_DEPTH} at {}", self.cursor - 1);
                        self.ops.push(Op::HighlightPointer { id: id.clone() });
                        false
                    }
                    Some(closer) => self.expect(Some(closer), Some(&id), depth + 1),
                    None => true,
                },
            };
            if !good {
                break false;
            }
            if self.cursor < self.chars.len() {
                self.ops.push(Op::mv(id.clone(), self.cursor));
            }
        };

        self.ops.push(Op::remove(id));
        ok
    }
}

/// Recursive-descent bracket matching: one frame (and one pointer) per open
/// bracket plus the outermost frame. Input nested deeper than [`MAX_DEPTH`]
/// is reported unbalanced.
pub fn balanced_recursive(input: &str, ops: &mut Vec<Op>) -> bool {
    let mut scan = Scan {
        chars: input.chars().collect(),
        cursor: 0,
        frames: 0,
        ops,
    };
    let balanced = scan.expect(None, None, 0);
    scan.ops.push(Op::Result {
        result: Outcome::Balanced(balanced),
    });
    balanced
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BalancedRecursive;

impl Algorithm for BalancedRecursive {
    type Input = String;
    type Output = bool;

    fn name(&self) -> &'static str {
        "balanced-recursive"
    }

    fn run(&self, input: &String) -> RunResult<bool, String> {
        let mut ops = Vec::new();
        let result = balanced_recursive(input, &mut ops);
        log::debug!("{}: input={input:?} result={result} ops={}", self.name(), ops.len());
        RunResult::new(result, input.clone(), ops)
    }

    fn cells(&self, input: &String) -> Vec<CellSpec> {
        text_cells(input)
    }
}
