use glam::Vec2;

use crate::core::Body;
use crate::utils::math::Vec2Ext;

/// Weight of a body in a y-down field of strength `gravity`.
pub fn weight(mass: f32, gravity: f32) -> Vec2 {
    Vec2::new(0.0, mass * gravity)
}

/// Quadratic drag opposing velocity, computed independently per axis.
///
/// A zero velocity component yields exactly zero drag on that axis.
pub fn drag(velocity: Vec2, air_density: f32, drag_coefficient: f32, cross_section: Vec2) -> Vec2 {
    -velocity.sign_or_zero() * 0.5 * air_density * drag_coefficient * cross_section * velocity * velocity
}

/// Refreshes the weight and drag slots of a body's force set.
///
/// The input slot is left alone: it is set externally and consumed by the
/// integrator.
pub fn accumulate(body: &mut Body, gravity: f32, air_density: f32) {
    body.forces.weight = weight(body.mass, gravity);
    body.forces.drag = drag(
        body.velocity.0,
        air_density,
        body.drag_coefficient,
        body.shape.cross_section(),
    );
}
