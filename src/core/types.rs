use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};

macro_rules! kinematic_vector {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub Vec2);

        impl $name {
            pub const ZERO: Self = Self(Vec2::ZERO);

            pub fn new(x: f32, y: f32) -> Self {
                Self(Vec2::new(x, y))
            }
        }

        impl Deref for $name {
            type Target = Vec2;

            fn deref(&self) -> &Vec2 {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Vec2 {
                &mut self.0
            }
        }

        impl From<Vec2> for $name {
            fn from(value: Vec2) -> Self {
                Self(value)
            }
        }
    };
}

kinematic_vector!(
    /// Location of a body's centre, in arena pixels (y grows downwards).
    Position
);
kinematic_vector!(
    /// Rate of change of [`Position`].
    Velocity
);
kinematic_vector!(
    /// Rate of change of [`Velocity`], derived from the net force each tick.
    Acceleration
);

impl Acceleration {
    /// Newton's second law.
    pub fn from_force(net_force: Vec2, mass: f32) -> Self {
        Self(net_force / mass)
    }
}

impl Velocity {
    pub fn advance(&mut self, acceleration: Acceleration, dt: f32) {
        self.0 += acceleration.0 * dt;
    }
}

impl Position {
    pub fn advance(&mut self, velocity: Velocity, dt: f32) {
        self.0 += velocity.0 * dt;
    }

    /// Where the body will be after `dt` if its velocity stays unchanged.
    pub fn predicted(&self, velocity: Velocity, dt: f32) -> Vec2 {
        self.0 + velocity.0 * dt
    }
}

/// The fixed set of forces summed into a body's net force each tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ForceSet {
    pub weight: Vec2,
    pub drag: Vec2,
    /// One-shot force from the user, cleared once a tick consumes it.
    pub input: Vec2,
}

impl ForceSet {
    pub fn net(&self) -> Vec2 {
        self.weight + self.drag + self.input
    }

    pub fn clear_input(&mut self) {
        self.input = Vec2::ZERO;
    }
}
