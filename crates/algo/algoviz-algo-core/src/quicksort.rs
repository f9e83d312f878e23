//! Lomuto quicksort with per-call scan and pivot pointers.

use algoviz_api_core::Color;

use crate::ids::{pivot_pointer_id, scan_pointer_id};
use crate::ops::{Op, Outcome};
use crate::projection::{number_cells, CellSpec};
use crate::run::{Algorithm, RunResult};

/// Per-run context threaded through the recursion.
struct Sorter<'a> {
    items: &'a mut [i64],
    calls: usize,
    ops: &'a mut Vec<Op>,
}

impl Sorter<'_> {
    /// Sort `items[lo..=hi]`. Callers never pass an empty range.
    fn sort(&mut self, lo: usize, hi: usize) {
        self.calls += 1;
        let call = self.calls;
        self.ops.push(Op::Focus { from: lo, to: hi });
        if lo >= hi {
            return;
        }
        let p = self.partition(lo, hi, call);
        if p > lo {
            self.sort(lo, p - 1);
        }
        if p < hi {
            self.sort(p + 1, hi);
        }
    }

    fn partition(&mut self, lo: usize, hi: usize, call: usize) -> usize {
        let scan = scan_pointer_id(call);
        let pivot_id = pivot_pointer_id(call);
        let pivot = self.items[hi];
        let mut i = lo;
        self.ops.push(Op::create(scan.clone(), lo, Color::Black));
        self.ops.push(Op::create(pivot_id.clone(), hi, Color::Purple));
        for j in lo..hi {
            self.ops.push(Op::mv(scan.clone(), j));
            if self.items[j] < pivot {
                self.swap(i, j);
                i += 1;
            }
        }
        self.swap(i, hi);
        self.ops.push(Op::remove(scan));
        self.ops.push(Op::remove(pivot_id));
        i
    }

    fn swap(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        self.ops.push(Op::Swap { a, b });
        self.items.swap(a, b);
    }
}

/// Sort `items` in place, ascending.
pub fn quick_sort(items: &mut [i64], ops: &mut Vec<Op>) {
    let n = items.len();
    {
        let mut sorter = Sorter {
            items: &mut *items,
            calls: 0,
            ops: &mut *ops,
        };
        if n > 0 {
            sorter.sort(0, n - 1);
        }
    }
    if n > 0 {
        ops.push(Op::Focus { from: 0, to: n - 1 });
    }
    ops.push(Op::Result {
        result: Outcome::Sorted(items.to_vec()),
    });
}

#[derive(Clone, Copy, Debug, Default)]
pub struct QuickSort;

impl Algorithm for QuickSort {
    type Input = Vec<i64>;
    type Output = Vec<i64>;

    fn name(&self) -> &'static str {
        "quick-sort"
    }

    fn run(&self, input: &Vec<i64>) -> RunResult<Vec<i64>, Vec<i64>> {
        let mut sorted = input.clone();
        let mut ops = Vec::new();
        quick_sort(&mut sorted, &mut ops);
        log::debug!("{}: len={} ops={}", self.name(), input.len(), ops.len());
        RunResult::new(sorted, input.clone(), ops)
    }

    fn cells(&self, input: &Vec<i64>) -> Vec<CellSpec> {
        number_cells(input)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::count_kind;

    fn sort(items: &[i64]) -> (Vec<i64>, Vec<Op>) {
        let mut v = items.to_vec();
        let mut ops = Vec::new();
        quick_sort(&mut v, &mut ops);
        (v, ops)
    }

    #[test]
    fn sorts_original_input() {
        let (v, ops) = sort(&[3, 2, 1, 5, 6, 7, 8]);
        assert_eq!(v, vec![1, 2, 3, 5, 6, 7, 8]);
        assert_eq!(
            ops.last(),
            Some(&Op::Result {
                result: Outcome::Sorted(vec![1, 2, 3, 5, 6, 7, 8])
            })
        );
    }

    #[test]
    fn two_element_trace() {
        let (v, ops) = sort(&[2, 1]);
        assert_eq!(v, vec![1, 2]);
        let expected = vec![
            Op::Focus { from: 0, to: 1 },
            Op::create("j-1", 0, Color::Black),
            Op::create("pivot-1", 1, Color::Purple),
            Op::mv("j-1", 0),
            Op::Swap { a: 0, b: 1 },
            Op::remove("j-1"),
            Op::remove("pivot-1"),
            Op::Focus { from: 1, to: 1 },
            Op::Focus { from: 0, to: 1 },
            Op::Result {
                result: Outcome::Sorted(vec![1, 2]),
            },
        ];
        assert_eq!(ops, expected);
    }

    #[test]
    fn swaps_are_never_degenerate() {
        let (_, ops) = sort(&[5, 1, 4, 1, 5, 9, 2, 6, 5, 3]);
        for op in &ops {
            if let Op::Swap { a, b } = op {
                assert_ne!(a, b);
            }
        }
        assert_eq!(count_kind(&ops, "create"), count_kind(&ops, "remove"));
    }

    #[test]
    fn empty_and_single() {
        let (v, ops) = sort(&[]);
        assert!(v.is_empty());
        assert_eq!(
            ops,
            vec![Op::Result {
                result: Outcome::Sorted(vec![])
            }]
        );

        let (_, ops) = sort(&[7]);
        assert_eq!(count_kind(&ops, "focus"), 2);
        assert_eq!(count_kind(&ops, "create"), 0);
    }

    #[test]
    fn run_keeps_original_input() {
        let run = QuickSort.run(&vec![3, 1, 2]);
        assert_eq!(run.input(), &vec![3, 1, 2]);
        assert_eq!(run.result(), &vec![1, 2, 3]);
    }
}
