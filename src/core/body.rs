use glam::Vec2;
use serde::Serialize;

use super::{
    shape::{Hitbox, Shape},
    types::{Acceleration, ForceSet, Position, Velocity},
};
use crate::error::{Result, SandboxError};

/// A simulated circle or rectangle with its kinematic state and force set.
///
/// Kinematic vectors are `Copy` values, so every body owns its own state and
/// no two bodies can alias the same vector. Bodies serialize for snapshots
/// but are only constructed through [`BodyBuilder::build`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Body {
    pub(crate) colour: String,
    pub(crate) shape: Shape,
    pub(crate) mass: f32,
    pub(crate) drag_coefficient: f32,
    pub(crate) position: Position,
    pub(crate) velocity: Velocity,
    pub(crate) acceleration: Acceleration,
    pub(crate) forces: ForceSet,
    pub(crate) hitbox: Hitbox,
    pub(crate) initial_position: Position,
    pub(crate) time_since_spawned: f32,
    pub(crate) tracked: bool,
}

impl Body {
    pub fn builder(shape: Shape) -> BodyBuilder {
        BodyBuilder::new(shape)
    }

    pub fn circle(radius: f32) -> BodyBuilder {
        BodyBuilder::new(Shape::Circle { radius })
    }

    pub fn rectangle(width: f32, height: f32) -> BodyBuilder {
        BodyBuilder::new(Shape::Rectangle { width, height })
    }

    pub fn colour(&self) -> &str {
        &self.colour
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn drag_coefficient(&self) -> f32 {
        self.drag_coefficient
    }

    pub fn area(&self) -> f32 {
        self.shape.area()
    }

    pub fn position(&self) -> Vec2 {
        self.position.0
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity.0
    }

    pub fn acceleration(&self) -> Vec2 {
        self.acceleration.0
    }

    pub fn forces(&self) -> &ForceSet {
        &self.forces
    }

    pub fn net_force(&self) -> Vec2 {
        self.forces.net()
    }

    pub fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    pub fn initial_position(&self) -> Vec2 {
        self.initial_position.0
    }

    /// `0.5·m·|v|²`
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Magnitude of linear momentum, `m·|v|`.
    pub fn momentum(&self) -> f32 {
        self.mass * self.velocity.length()
    }

    pub fn displacement(&self) -> Vec2 {
        self.position.0 - self.initial_position.0
    }

    /// Simulated time since the body was spawned.
    pub fn elapsed(&self) -> f32 {
        self.time_since_spawned
    }

    pub fn is_tracked(&self) -> bool {
        self.tracked
    }

    pub fn set_tracked(&mut self, tracked: bool) {
        self.tracked = tracked;
    }

    pub fn half_extents(&self) -> Vec2 {
        self.shape.half_extents()
    }

    /// Top-left corner, as a renderer draws rectangles.
    pub fn corner(&self) -> Vec2 {
        self.position.0 - self.shape.half_extents()
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = Velocity(velocity);
    }

    pub fn set_position(&mut self, position: Vec2) {
        self.position = Position(position);
        self.update_hitbox();
    }

    /// Queues a force that acts for the next tick only.
    pub fn apply_input_force(&mut self, force: Vec2) {
        self.forces.input = force;
    }

    pub fn update_hitbox(&mut self) {
        self.hitbox = Hitbox::from_center(self.position.0, self.shape.hitbox_half_extents());
    }
}

/// Builder for [`Body`]; mass is derived from density × area at `build` time.
#[derive(Debug, Clone)]
pub struct BodyBuilder {
    shape: Shape,
    density: f32,
    colour: String,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
}

impl BodyBuilder {
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            density: 1.0,
            colour: String::from("black"),
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
        }
    }

    pub fn density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn colour(mut self, colour: impl Into<String>) -> Self {
        self.colour = colour.into();
        self
    }

    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Vec2::new(x, y);
        self
    }

    pub fn velocity(mut self, x: f32, y: f32) -> Self {
        self.velocity = Vec2::new(x, y);
        self
    }

    pub fn acceleration(mut self, x: f32, y: f32) -> Self {
        self.acceleration = Vec2::new(x, y);
        self
    }

    pub fn build(self) -> Result<Body> {
        self.shape.validate()?;
        let mass = self.density * self.shape.area();
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SandboxError::InvalidMass(mass));
        }

        let position = Position(self.position);
        Ok(Body {
            colour: self.colour,
            drag_coefficient: self.shape.drag_coefficient(),
            hitbox: Hitbox::from_center(self.position, self.shape.hitbox_half_extents()),
            shape: self.shape,
            mass,
            position,
            velocity: Velocity(self.velocity),
            acceleration: Acceleration(self.acceleration),
            forces: ForceSet::default(),
            initial_position: position,
            time_since_spawned: 0.0,
            tracked: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn mass_comes_from_density_and_area() {
        let circle = Body::circle(2.0).density(3.0).build().unwrap();
        assert!((circle.mass() - 12.0 * PI).abs() < 1e-4);

        let rect = Body::rectangle(2.0, 5.0).density(0.5).build().unwrap();
        assert_eq!(rect.mass(), 5.0);
        assert_eq!(rect.drag_coefficient(), 1.05);
    }

    #[test]
    fn non_positive_density_is_rejected() {
        assert!(matches!(
            Body::circle(1.0).density(0.0).build(),
            Err(SandboxError::InvalidMass(_))
        ));
        assert!(matches!(
            Body::circle(-1.0).build(),
            Err(SandboxError::InvalidDimension { .. })
        ));
    }

    #[test]
    fn derived_quantities() {
        let mut body = Body::rectangle(2.0, 2.0)
            .density(0.5)
            .position(10.0, 20.0)
            .velocity(3.0, 4.0)
            .build()
            .unwrap();

        assert_eq!(body.kinetic_energy(), 25.0);
        assert_eq!(body.momentum(), 10.0);
        assert_eq!(body.corner(), Vec2::new(9.0, 19.0));

        body.set_position(Vec2::new(13.0, 16.0));
        assert_eq!(body.displacement(), Vec2::new(3.0, -4.0));
        assert_eq!(body.hitbox().min, Vec2::new(12.0, 15.0));
        assert_eq!(body.initial_position(), Vec2::new(10.0, 20.0));
    }

    #[test]
    fn bodies_do_not_share_state() {
        let builder = Body::circle(1.0).velocity(1.0, 0.0);
        let mut a = builder.clone().build().unwrap();
        let b = builder.build().unwrap();

        a.set_velocity(Vec2::new(-5.0, 0.0));
        assert_eq!(b.velocity(), Vec2::new(1.0, 0.0));
    }
}
