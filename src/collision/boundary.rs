use crate::{config::ArenaBounds, core::Body};

/// Which arena boundaries a body was reflected off during one check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BoundaryHits {
    pub side: bool,
    pub ground: bool,
    pub ceiling: bool,
}

impl BoundaryHits {
    pub fn any(&self) -> bool {
        self.side || self.ground || self.ceiling
    }

    pub fn count(&self) -> usize {
        self.side as usize + self.ground as usize + self.ceiling as usize
    }
}

/// Reflects a body off the side walls, the ground and the ceiling.
///
/// Crossings are tested on the position predicted one `dt` ahead. The ground
/// clamps the body onto its surface; the ceiling only reflects.
pub fn collide_with_bounds(
    body: &mut Body,
    bounds: &ArenaBounds,
    restitution: f32,
    dt: f32,
) -> BoundaryHits {
    let half = body.half_extents();
    let next = body.position.predicted(body.velocity, dt);
    let mut hits = BoundaryHits::default();

    if next.x + half.x > bounds.width() || next.x - half.x < 0.0 {
        body.velocity.x = -body.velocity.x * restitution;
        hits.side = true;
    }

    let ground_y = bounds.ground_y();
    if next.y + half.y > ground_y {
        body.position.y = ground_y - half.y;
        body.velocity.y = -body.velocity.y * restitution;
        hits.ground = true;
    } else if next.y - half.y < 0.0 {
        body.velocity.y = -body.velocity.y * restitution;
        hits.ceiling = true;
    }

    hits
}
