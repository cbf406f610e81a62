//! Additional math helpers layered on top of `glam`.

use glam::Vec2;

/// Vector operations the collision code needs beyond what `glam` offers.
pub trait Vec2Ext {
    /// Cosine of the angle between two vectors. Zero if either has no length.
    fn cos_angle(self, other: Vec2) -> f32;

    /// Signed length of the component of `self` along `axis`.
    fn component_along(self, axis: Vec2) -> f32;

    /// Per-axis sign where an exact zero stays zero.
    fn sign_or_zero(self) -> Vec2;
}

impl Vec2Ext for Vec2 {
    fn cos_angle(self, other: Vec2) -> f32 {
        if self == Vec2::ZERO || other == Vec2::ZERO {
            return 0.0;
        }
        self.dot(other) / (self.length() * other.length())
    }

    fn component_along(self, axis: Vec2) -> f32 {
        self.length() * self.cos_angle(axis)
    }

    fn sign_or_zero(self) -> Vec2 {
        Vec2::new(sign_or_zero(self.x), sign_or_zero(self.y))
    }
}

/// `f32::signum` maps `0.0` to `1.0`; drag needs it to vanish at rest.
pub fn sign_or_zero(value: f32) -> f32 {
    if value == 0.0 {
        0.0
    } else {
        value.signum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cos_angle_of_zero_vector_is_zero() {
        assert_eq!(Vec2::ZERO.cos_angle(Vec2::X), 0.0);
        assert_eq!(Vec2::Y.cos_angle(Vec2::ZERO), 0.0);
    }

    #[test]
    fn component_along_matches_projection() {
        let v = Vec2::new(3.0, 4.0);
        assert!((v.component_along(Vec2::X) - 3.0).abs() < 1e-5);
        assert!((v.component_along(Vec2::new(0.0, -2.0)) + 4.0).abs() < 1e-5);
        assert!((v.component_along(Vec2::new(1.0, 1.0)) - 7.0 / 2f32.sqrt()).abs() < 1e-5);
    }

    #[test]
    fn sign_keeps_zero() {
        assert_eq!(Vec2::new(-2.0, 0.0).sign_or_zero(), Vec2::new(-1.0, 0.0));
        assert_eq!(sign_or_zero(-0.0), 0.0);
    }
}
