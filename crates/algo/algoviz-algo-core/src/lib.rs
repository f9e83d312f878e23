//! algoviz-algo-core: instrumented algorithms and the operation log they emit.
//!
//! Every algorithm is a pure function of its input that appends [`Op`]s to a
//! caller-supplied log. The log is the only thing the animation layer sees.

pub mod binary_search;
pub mod brackets;
pub mod error;
pub mod ids;
pub mod input;
pub mod ops;
pub mod projection;
pub mod quicksort;
pub mod run;
pub mod validate;

pub use binary_search::{binary_search, BinarySearch, SearchInput, SearchStrategy};
pub use brackets::{balanced_recursive, balanced_stack, BalancedRecursive, BalancedStack};
pub use error::{InputError, LogError};
pub use ids::Namespace;
pub use ops::{Op, Outcome, PointerId, PointerSpec, XIndex};
pub use projection::{CellSpec, PointerRow, StackSlot};
pub use quicksort::{quick_sort, QuickSort};
pub use run::{Algorithm, RunResult};
pub use validate::check_log;
