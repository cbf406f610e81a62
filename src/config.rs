//! Global configuration constants and validated simulation settings.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SandboxError};

/// Default arena width in pixels.
pub const DEFAULT_ARENA_WIDTH: f32 = 640.0;

/// Default arena height in pixels.
pub const DEFAULT_ARENA_HEIGHT: f32 = 480.0;

/// Fraction of the arena height at which the ground plane sits.
pub const GROUND_FRACTION: f32 = 8.0 / 9.0;

/// Default integration timestep (in simulated seconds per tick).
pub const DEFAULT_TIME_STEP: f32 = 0.1;

/// Timestep substituted for a non-positive input when clamping.
pub const FALLBACK_TIME_STEP: f32 = 0.01;

/// Default gravitational field strength (y-down).
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Default air density, scaled to the pixel units of the arena.
pub const DEFAULT_AIR_DENSITY: f32 = 1.225e-3;

/// Default coefficient of restitution.
pub const DEFAULT_RESTITUTION: f32 = 1.0;

/// Drag coefficient of a sphere/circle.
pub const CIRCLE_DRAG_COEFFICIENT: f32 = 0.47;

/// Drag coefficient of a flat plate/rectangle.
pub const RECTANGLE_DRAG_COEFFICIENT: f32 = 1.05;

/// Pixels per metre when converting body state into plotted quantities.
pub const PIXELS_PER_METRE: f32 = 10.0;

/// Portion of a plot's width filled before it starts scrolling.
pub const PLOT_SCROLL_FRACTION: f32 = 250.0 / 320.0;

/// Wall-clock budget for a single tick at a 100 Hz frame rate.
pub const DEFAULT_FRAME_BUDGET_MS: f32 = 10.0;

/// Physical constants consumed by [`World::tick`](crate::world::World::tick).
///
/// # Builder Pattern
/// ```
/// use kinetic_sandbox::config::SimulationConstants;
///
/// let constants = SimulationConstants::new()
///     .with_restitution(0.5)
///     .with_gravity(0.0)
///     .with_time_step(0.05);
/// assert!(constants.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConstants {
    /// Coefficient of restitution in `[0, 1]`.
    pub restitution: f32,
    /// Gravitational field strength, `>= 0`, applied along +y.
    pub gravity: f32,
    /// Duration of one tick, `> 0`.
    pub time_step: f32,
    /// Density of the surrounding air, `>= 0`.
    pub air_density: f32,
}

impl Default for SimulationConstants {
    fn default() -> Self {
        Self::new()
    }
}

impl SimulationConstants {
    pub fn new() -> Self {
        Self {
            restitution: DEFAULT_RESTITUTION,
            gravity: DEFAULT_GRAVITY,
            time_step: DEFAULT_TIME_STEP,
            air_density: DEFAULT_AIR_DENSITY,
        }
    }

    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    pub fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    pub fn with_time_step(mut self, time_step: f32) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn with_air_density(mut self, air_density: f32) -> Self {
        self.air_density = air_density;
        self
    }

    /// Checks every constant against its valid range.
    pub fn validate(&self) -> Result<()> {
        if !(self.time_step.is_finite() && self.time_step > 0.0) {
            return Err(SandboxError::InvalidTimeStep(self.time_step));
        }
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(SandboxError::InvalidRestitution(self.restitution));
        }
        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(SandboxError::InvalidGravity(self.gravity));
        }
        if !(self.air_density.is_finite() && self.air_density >= 0.0) {
            return Err(SandboxError::InvalidAirDensity(self.air_density));
        }
        Ok(())
    }

    /// Coerces out-of-range values onto the nearest valid boundary.
    pub fn clamped(self) -> Self {
        let time_step = if self.time_step.is_finite() && self.time_step > 0.0 {
            self.time_step
        } else {
            warn!(
                "time step {} is not positive, falling back to {}",
                self.time_step, FALLBACK_TIME_STEP
            );
            FALLBACK_TIME_STEP
        };
        let restitution = if self.restitution.is_nan() {
            DEFAULT_RESTITUTION
        } else {
            self.restitution.clamp(0.0, 1.0)
        };
        let non_negative = |value: f32| if value.is_finite() { value.max(0.0) } else { 0.0 };

        Self {
            restitution,
            gravity: non_negative(self.gravity),
            time_step,
            air_density: non_negative(self.air_density),
        }
    }
}

/// Dimensions of the rectangular arena bodies move in.
///
/// Both sides are finite and positive. Deserialized values go through the
/// same check as [`ArenaBounds::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct ArenaBounds {
    width: f32,
    height: f32,
}

#[derive(Deserialize)]
struct RawBounds {
    width: f32,
    height: f32,
}

impl TryFrom<RawBounds> for ArenaBounds {
    type Error = SandboxError;

    fn try_from(raw: RawBounds) -> Result<Self> {
        Self::new(raw.width, raw.height)
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            width: DEFAULT_ARENA_WIDTH,
            height: DEFAULT_ARENA_HEIGHT,
        }
    }
}

impl ArenaBounds {
    pub fn new(width: f32, height: f32) -> Result<Self> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(SandboxError::InvalidBounds { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Y coordinate of the ground plane. The band below it is solid.
    pub fn ground_y(&self) -> f32 {
        self.height * GROUND_FRACTION
    }
}
