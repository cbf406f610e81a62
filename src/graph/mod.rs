//! Rolling time-series plots of a tracked body.

pub mod plot;
pub mod queue;

pub use plot::{Component, Plot, Quantity};
pub use queue::{Sample, SampleBuffer};
