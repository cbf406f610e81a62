use glam::Vec2;

use crate::core::Body;
use crate::utils::math::Vec2Ext;

/// Orthonormal basis aligned with the line joining two body centres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPlanes {
    /// Unit vector along the line of centres (the centre-joint plane).
    pub centre: Vec2,
    /// Unit vector perpendicular to `centre`.
    pub perpendicular: Vec2,
    /// Set when the centres share an x coordinate and the planes are the
    /// swapped coordinate axes.
    pub flipped: bool,
}

impl CollisionPlanes {
    /// Planes between two centres.
    ///
    /// Axis-aligned cases use the coordinate axes directly so no gradient
    /// `Δy/Δx` is ever formed; otherwise the line of centres is normalised.
    /// Coincident centres fall back to the horizontal basis.
    pub fn between(a: Vec2, b: Vec2) -> Self {
        let delta = a - b;
        if delta.x != 0.0 && delta.y != 0.0 {
            let centre = delta.normalize_or_zero() * delta.x.signum();
            if centre != Vec2::ZERO {
                return Self {
                    centre,
                    perpendicular: centre.perp(),
                    flipped: false,
                };
            }
        } else if delta.x == 0.0 && delta.y != 0.0 {
            return Self {
                centre: Vec2::Y,
                perpendicular: Vec2::X,
                flipped: true,
            };
        }
        Self {
            centre: Vec2::X,
            perpendicular: Vec2::Y,
            flipped: false,
        }
    }

    /// Splits a world-frame velocity into (centre, perpendicular) components.
    pub fn decompose(&self, velocity: Vec2) -> (f32, f32) {
        (
            velocity.component_along(self.centre),
            velocity.component_along(self.perpendicular),
        )
    }

    /// Recombines plane components into a world-frame velocity.
    pub fn recompose(&self, centre: f32, perpendicular: f32) -> Vec2 {
        if self.flipped {
            return Vec2::new(perpendicular, centre);
        }
        let combined = self.centre * centre + self.perpendicular * perpendicular;
        Vec2::new(
            combined.component_along(Vec2::X),
            combined.component_along(Vec2::Y),
        )
    }
}

/// Mass, position and velocity of one side of a collision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Impactor {
    pub mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
}

impl From<&Body> for Impactor {
    fn from(body: &Body) -> Self {
        Self {
            mass: body.mass(),
            position: body.position(),
            velocity: body.velocity(),
        }
    }
}

/// Closed-form impulse resolution along the line of centres.
pub struct Resolver;

impl Resolver {
    /// One-dimensional restitution response for velocities `u_a`, `u_b`
    /// along a shared axis. `e = 1` is elastic, `e = 0` perfectly inelastic.
    pub fn restitution_response(mass_a: f32, u_a: f32, mass_b: f32, u_b: f32, e: f32) -> (f32, f32) {
        let total_momentum = mass_a * u_a + mass_b * u_b;
        let total_mass = mass_a + mass_b;
        (
            (total_momentum + mass_b * e * (u_b - u_a)) / total_mass,
            (total_momentum + mass_a * e * (u_a - u_b)) / total_mass,
        )
    }

    /// Post-collision world-frame velocities of both impactors.
    ///
    /// Only the centre-plane components change; perpendicular components
    /// carry through untouched.
    pub fn post_collision_velocities(a: Impactor, b: Impactor, restitution: f32) -> (Vec2, Vec2) {
        debug_assert!(a.mass > 0.0 && b.mass > 0.0, "impactor masses must be positive");
        debug_assert!((0.0..=1.0).contains(&restitution), "restitution outside [0, 1]");

        let planes = CollisionPlanes::between(a.position, b.position);
        let (centre_a, perpendicular_a) = planes.decompose(a.velocity);
        let (centre_b, perpendicular_b) = planes.decompose(b.velocity);

        let (final_a, final_b) =
            Self::restitution_response(a.mass, centre_a, b.mass, centre_b, restitution);

        (
            planes.recompose(final_a, perpendicular_a),
            planes.recompose(final_b, perpendicular_b),
        )
    }

    /// Resolves a collision in place, writing both new velocities back.
    pub fn resolve(a: &mut Body, b: &mut Body, restitution: f32) {
        let (velocity_a, velocity_b) =
            Self::post_collision_velocities(Impactor::from(&*a), Impactor::from(&*b), restitution);
        a.set_velocity(velocity_a);
        b.set_velocity(velocity_b);
    }
}
