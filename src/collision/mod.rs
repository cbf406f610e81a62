//! Collision handling: arena boundaries, pairwise detection and resolution.

pub mod boundary;
pub mod detection;
pub mod resolution;

pub use boundary::{collide_with_bounds, BoundaryHits};
pub use detection::Detection;
pub use resolution::{CollisionPlanes, Impactor, Resolver};
