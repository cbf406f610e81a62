//! Core types describing simulated bodies and their kinematic state.

pub mod body;
pub mod shape;
pub mod types;

pub use body::{Body, BodyBuilder};
pub use shape::{Hitbox, Shape};
pub use types::{Acceleration, ForceSet, Position, Velocity};
