use glam::Vec2;

use crate::core::{Body, Shape};

/// One-step-ahead overlap tests between pairs of bodies.
///
/// Every test extrapolates both bodies by `dt` using their current
/// velocities; nothing sweeps continuously between ticks.
pub struct Detection;

impl Detection {
    /// Dispatches on the shape pair. Circle pairs use the directional sweep
    /// test, every other pairing compares extrapolated hitboxes.
    pub fn is_collision(a: &Body, b: &Body, dt: f32) -> bool {
        match (a.shape(), b.shape()) {
            (Shape::Circle { radius: radius_a }, Shape::Circle { radius: radius_b }) => {
                Self::circle_circle(
                    a.position.predicted(a.velocity, dt),
                    *radius_a,
                    b.position.predicted(b.velocity, dt),
                    *radius_b,
                )
            }
            _ => Self::hitboxes(a, b, dt),
        }
    }

    /// Tests whether the point on A's circumference nearest to B's centre lies
    /// inside B.
    ///
    /// The test is directional: callers wanting symmetric coverage check the
    /// pair in both orders.
    pub fn circle_circle(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
        let toward_b = (center_b - center_a).normalize_or_zero();
        let nearest = center_a + toward_b * radius_a;
        nearest.distance_squared(center_b) <= radius_b * radius_b
    }

    pub fn hitboxes(a: &Body, b: &Body, dt: f32) -> bool {
        let next_a = a.hitbox().translated(a.velocity() * dt);
        let next_b = b.hitbox().translated(b.velocity() * dt);
        next_a.overlaps(&next_b)
    }

    pub fn is_coincident(a: &Body, b: &Body) -> bool {
        a.position() == b.position()
    }

    /// Pushes `body` along +x by its half-extent so the pair no longer shares
    /// a centre.
    pub fn separate_coincident(body: &mut Body) {
        let offset = body.half_extents().x;
        body.position.x += offset;
        body.update_hitbox();
    }
}
