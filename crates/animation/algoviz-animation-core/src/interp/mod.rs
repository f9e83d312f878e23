//! Easing curves for tween progress.

pub mod functions;

pub use functions::Ease;
