//! algoviz animation core (engine-agnostic)
//!
//! Turns an operation log into a timeline program through an element
//! resolver, then plays that program back. Hosts drive the clock with
//! [`TimelineController::update`] and apply the returned property writes to
//! whatever elements they mounted.

pub mod binding;
pub mod config;
pub mod controller;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod interp;
pub mod interpreter;
pub mod outputs;
pub mod sampling;
pub mod timeline;

// Re-exports for consumers (hosts and the orchestrator)
pub use binding::{BindingTable, ElementKey, ElementResolver, MapResolver, TargetHandle};
pub use config::{Config, IntroConfig, PlaybackConfig};
pub use controller::{PendingTimer, PlaybackState, TimelineController, TimerAction};
pub use error::{InterpretError, PlaybackError};
pub use ids::{IdAllocator, TimerId, TweenId};
pub use inputs::{LoopMode, PlayerCommand};
pub use interp::Ease;
pub use interpreter::{apply, op_label, INTRO_LABEL, RESULT_LABEL};
pub use outputs::{CoreEvent, Outputs};
pub use sampling::sample;
pub use timeline::{Checkpoint, Position, Timeline, Tween, TweenKind, TweenOpts};
pub use algoviz_api_core::{Prop, Props, Value, WriteBatch};
