use crate::core::{types::Acceleration, Body};

/// Semi-implicit Euler stepping of a single body.
///
/// Acceleration is recomputed from the current force set, then velocity is
/// advanced with it, then position with the new velocity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Integrator;

impl Integrator {
    pub fn new() -> Self {
        Self
    }

    pub fn integrate(&self, body: &mut Body, dt: f32) {
        body.acceleration = Acceleration::from_force(body.forces.net(), body.mass);
        body.velocity.advance(body.acceleration, dt);
        body.position.advance(body.velocity, dt);
        body.forces.clear_input();
        body.time_since_spawned += dt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn input_force_acts_for_one_tick() {
        let mut body = Body::rectangle(1.0, 1.0).density(2.0).build().unwrap();
        body.apply_input_force(Vec2::new(4.0, 0.0));
        let integrator = Integrator::new();

        integrator.integrate(&mut body, 1.0);
        assert_eq!(body.acceleration(), Vec2::new(2.0, 0.0));
        assert_eq!(body.velocity(), Vec2::new(2.0, 0.0));
        assert_eq!(body.position(), Vec2::new(2.0, 0.0));
        assert_eq!(body.forces().input, Vec2::ZERO);

        integrator.integrate(&mut body, 1.0);
        assert_eq!(body.acceleration(), Vec2::ZERO);
        assert_eq!(body.velocity(), Vec2::new(2.0, 0.0));
        assert_eq!(body.position(), Vec2::new(4.0, 0.0));
        assert_eq!(body.elapsed(), 2.0);
    }
}
