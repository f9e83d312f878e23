//! algoviz-api-core: shared Value / Prop / WriteBatch vocabulary (engine-agnostic)

pub mod blend;
pub mod prop;
pub mod value;
pub mod write_ops;

pub use prop::{Prop, Props};
pub use value::{Color, Value};
pub use write_ops::{WriteBatch, WriteOp};
