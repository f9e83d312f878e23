//! Binary search with low/high/middle pointers.
//!
//! Both strategies narrow towards the leftmost index whose value is not less
//! than the target, so they agree on the returned index for every ascending
//! input, duplicates included.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use algoviz_api_core::Color;

use crate::ids::{HIGH, LOW, MIDDLE};
use crate::ops::{Op, Outcome, PointerSpec};
use crate::projection::{number_cells, CellSpec};
use crate::run::{Algorithm, RunResult};

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchStrategy {
    /// `low <= high`, `high = middle - 1` (high is an inclusive bound).
    #[default]
    Inclusive,
    /// `low < high`, `high = middle` (high is an exclusive bound). `high`
    /// starts at `len`, one column past the last cell; see
    /// [`pointer_columns`](crate::projection::pointer_columns).
    HalfOpen,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchInput {
    pub items: Vec<i64>,
    pub target: i64,
}

impl SearchInput {
    pub fn new(items: Vec<i64>, target: i64) -> Self {
        Self { items, target }
    }
}

/// Search `items` (ascending) for `target`. Not found is `None`.
pub fn binary_search(
    target: i64,
    items: &[i64],
    strategy: SearchStrategy,
    ops: &mut Vec<Op>,
) -> Option<usize> {
    let found = if items.is_empty() {
        None
    } else {
        let low = match strategy {
            SearchStrategy::Inclusive => search_inclusive(target, items, ops),
            SearchStrategy::HalfOpen => search_half_open(target, items, ops),
        };
        (low < items.len() && items[low] == target).then_some(low)
    };

    if let Some(index) = found {
        ops.push(Op::HighlightIndex { index });
    }
    ops.push(Op::Result {
        result: Outcome::Index(found),
    });
    found
}

fn place_middle(middle: usize, first: &mut bool, ops: &mut Vec<Op>) {
    if *first {
        ops.push(Op::create(MIDDLE, middle, Color::Purple));
        *first = false;
    } else {
        ops.push(Op::mv(MIDDLE, middle));
    }
}

/// Returns the final `low`.
fn search_inclusive(target: i64, items: &[i64], ops: &mut Vec<Op>) -> usize {
    let mut low = 0usize;
    let mut high = items.len() as i64 - 1;
    ops.push(Op::CreateMany {
        items: vec![
            PointerSpec::new(LOW, low, Color::Black),
            PointerSpec::new(HIGH, high as usize, Color::Orange),
        ],
    });

    let mut first = true;
    while (low as i64) <= high {
        let middle = (low + high as usize) / 2;
        place_middle(middle, &mut first, ops);
        match items[middle].cmp(&target) {
            Ordering::Less => {
                low = middle + 1;
                ops.push(Op::mv(LOW, low));
            }
            Ordering::Equal | Ordering::Greater => {
                high = middle as i64 - 1;
                // high stepping below index 0 leaves the grid; nothing to draw.
                if high >= 0 {
                    ops.push(Op::mv(HIGH, high as usize));
                }
            }
        }
    }
    low
}

/// Returns the final `low` (== `high`).
fn search_half_open(target: i64, items: &[i64], ops: &mut Vec<Op>) -> usize {
    let mut low = 0usize;
    let mut high = items.len();
    ops.push(Op::CreateMany {
        items: vec![
            PointerSpec::new(LOW, low, Color::Black),
            PointerSpec::new(HIGH, high, Color::Orange),
        ],
    });

    let mut first = true;
    while low < high {
        let middle = low + (high - low) / 2;
        place_middle(middle, &mut first, ops);
        if items[middle] < target {
            low = middle + 1;
            ops.push(Op::mv(LOW, low));
        } else {
            high = middle;
            ops.push(Op::mv(HIGH, high));
        }
    }
    low
}

#[derive(Clone, Copy, Debug, Default)]
pub struct BinarySearch {
    pub strategy: SearchStrategy,
}

impl BinarySearch {
    pub fn new(strategy: SearchStrategy) -> Self {
        Self { strategy }
    }
}

impl Algorithm for BinarySearch {
    type Input = SearchInput;
    type Output = Option<usize>;

    fn name(&self) -> &'static str {
        match self.strategy {
            SearchStrategy::Inclusive => "binary-search",
            SearchStrategy::HalfOpen => "binary-search-half-open",
        }
    }

    fn run(&self, input: &SearchInput) -> RunResult<Option<usize>, SearchInput> {
        let mut ops = Vec::new();
        let result = binary_search(input.target, &input.items, self.strategy, &mut ops);
        log::debug!(
            "{}: target={} len={} result={result:?} ops={}",
            self.name(),
            input.target,
            input.items.len(),
            ops.len()
        );
        RunResult::new(result, input.clone(), ops)
    }

    fn cells(&self, input: &SearchInput) -> Vec<CellSpec> {
        number_cells(&input.items)
    }
}
