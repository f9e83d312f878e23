//! Write operations produced by the animation core to describe property
//! writes into the host's elements, keyed by opaque target handles.
//!
//! WriteOp serializes to JSON as:
//!   { "target": "pointer/low", "prop": "translateX", "value": { "type": "Float", "data": 40.0 } }
//!
//! WriteBatch is a simple Vec<WriteOp> with helpers.

use crate::{Prop, Value};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteOp {
    pub target: String,
    pub prop: Prop,
    pub value: Value,
}

impl WriteOp {
    pub fn new(target: impl Into<String>, prop: Prop, value: Value) -> Self {
        Self {
            target: target.into(),
            prop,
            value,
        }
    }
}

/// A batch of write operations. The controller emits one per frame.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteBatch(pub Vec<WriteOp>);

impl WriteBatch {
    pub fn new() -> Self {
        WriteBatch(Vec::new())
    }

    pub fn push(&mut self, op: WriteOp) {
        self.0.push(op);
    }

    pub fn iter(&self) -> impl Iterator<Item = &WriteOp> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Last value written for `target`/`prop`, if any.
    pub fn get(&self, target: &str, prop: Prop) -> Option<&Value> {
        self.0
            .iter()
            .rev()
            .find(|op| op.target == target && op.prop == prop)
            .map(|op| &op.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_latest_write() {
        let mut b = WriteBatch::new();
        b.push(WriteOp::new("cell/0", Prop::Opacity, Value::f(0.2)));
        b.push(WriteOp::new("cell/0", Prop::Opacity, Value::f(1.0)));
        assert_eq!(b.get("cell/0", Prop::Opacity), Some(&Value::f(1.0)));
        assert_eq!(b.get("cell/1", Prop::Opacity), None);
    }

    #[test]
    fn serializes_with_target_prop_value() {
        let op = WriteOp::new("pointer/low", Prop::TranslateX, Value::f(40.0));
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["target"], "pointer/low");
        assert_eq!(json["prop"], "translateX");
        assert_eq!(json["value"]["type"], "Float");
    }
}
