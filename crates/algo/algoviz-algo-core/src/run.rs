//! Run results and the `Algorithm` contract.

use serde::{Deserialize, Serialize};

use crate::ops::Op;
use crate::projection::CellSpec;

/// Output of one algorithm invocation. Built once, never mutated; a new
/// input yields a new `RunResult`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunResult<R, I> {
    result: R,
    input: I,
    ops: Vec<Op>,
}

impl<R, I> RunResult<R, I> {
    pub fn new(result: R, input: I, ops: Vec<Op>) -> Self {
        Self { result, input, ops }
    }

    pub fn result(&self) -> &R {
        &self.result
    }

    pub fn input(&self) -> &I {
        &self.input
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }
}

/// An instrumented algorithm: pure, deterministic, and able to describe the
/// cell grid the shell should mount for a given input.
pub trait Algorithm {
    type Input: Clone;
    type Output: Clone;

    /// Short stable name, used in logs.
    fn name(&self) -> &'static str;

    fn run(&self, input: &Self::Input) -> RunResult<Self::Output, Self::Input>;

    /// Initial grid of primary input cells for `input`, in index order.
    fn cells(&self, input: &Self::Input) -> Vec<CellSpec>;
}
