//! Ready-made scenarios: a set of bodies plus the constants they run under.

use std::ops::Range;

use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::{
    config::{ArenaBounds, SimulationConstants},
    core::Body,
    error::Result,
};

const SPEED_RANGE: Range<f32> = -50.0..50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Preset {
    Diffusion,
    AtmosphericDiffusion,
    OneToOneMassCollision,
    TwoToOneMassCollision,
    ThreeToOneMassCollision,
    OneToOneMassCollisionPartial,
    TwoToOneMassCollisionPartial,
    ThreeToOneMassCollisionPartial,
    OneToOneMassCollisionInelastic,
    TwoToOneMassCollisionInelastic,
    ThreeToOneMassCollisionInelastic,
    ThreeBallDrop,
    TerminalVelocity,
    StressTest,
    None,
}

impl Preset {
    pub const ALL: [Preset; 15] = [
        Preset::Diffusion,
        Preset::AtmosphericDiffusion,
        Preset::OneToOneMassCollision,
        Preset::TwoToOneMassCollision,
        Preset::ThreeToOneMassCollision,
        Preset::OneToOneMassCollisionPartial,
        Preset::TwoToOneMassCollisionPartial,
        Preset::ThreeToOneMassCollisionPartial,
        Preset::OneToOneMassCollisionInelastic,
        Preset::TwoToOneMassCollisionInelastic,
        Preset::ThreeToOneMassCollisionInelastic,
        Preset::ThreeBallDrop,
        Preset::TerminalVelocity,
        Preset::StressTest,
        Preset::None,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Diffusion => "diffusion",
            Preset::AtmosphericDiffusion => "atmosphericDiffusion",
            Preset::OneToOneMassCollision => "oneToOneMassCollision",
            Preset::TwoToOneMassCollision => "twoToOneMassCollision",
            Preset::ThreeToOneMassCollision => "threeToOneMassCollision",
            Preset::OneToOneMassCollisionPartial => "oneToOneMassCollisionPartial",
            Preset::TwoToOneMassCollisionPartial => "twoToOneMassCollisionPartial",
            Preset::ThreeToOneMassCollisionPartial => "threeToOneMassCollisionPartial",
            Preset::OneToOneMassCollisionInelastic => "oneToOneMassCollisionInelastic",
            Preset::TwoToOneMassCollisionInelastic => "twoToOneMassCollisionInelastic",
            Preset::ThreeToOneMassCollisionInelastic => "threeToOneMassCollisionInelastic",
            Preset::ThreeBallDrop => "threeBallDrop",
            Preset::TerminalVelocity => "terminalVelocity",
            Preset::StressTest => "stressTest",
            Preset::None => "none",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|preset| preset.name() == name)
    }

    /// Restitution, gravity, time step and air density the scenario runs with.
    pub fn constants(&self) -> SimulationConstants {
        let (restitution, gravity, time_step, air_density) = match self {
            Preset::Diffusion => (1.0, 0.0, 0.1, 0.0),
            Preset::AtmosphericDiffusion => (1.0, 9.81, 0.1, 0.0),
            Preset::OneToOneMassCollision
            | Preset::TwoToOneMassCollision
            | Preset::ThreeToOneMassCollision => (1.0, 0.0, 0.1, 0.0),
            Preset::OneToOneMassCollisionPartial
            | Preset::TwoToOneMassCollisionPartial
            | Preset::ThreeToOneMassCollisionPartial => (0.5, 0.0, 0.1, 0.0),
            Preset::OneToOneMassCollisionInelastic
            | Preset::TwoToOneMassCollisionInelastic
            | Preset::ThreeToOneMassCollisionInelastic => (0.0, 0.0, 0.1, 0.0),
            Preset::ThreeBallDrop => (1.0, 9.81, 0.05, 0.0),
            Preset::TerminalVelocity => (1.0, 9.81, 0.1, 1.225e-3),
            Preset::StressTest => (0.75, 100.0, 0.1, 15e-3),
            Preset::None => (1.0, 9.81, 0.1, 1.225e-3),
        };
        SimulationConstants {
            restitution,
            gravity,
            time_step,
            air_density,
        }
    }

    /// Builds the scenario's bodies inside `bounds`. Random placement is
    /// drawn from `seed`, so equal seeds give equal scenarios.
    pub fn bodies(&self, bounds: &ArenaBounds, seed: u64) -> Result<Vec<Body>> {
        let mut rng = StdRng::seed_from_u64(seed);
        let (width, height) = (bounds.width(), bounds.height());

        match self {
            Preset::Diffusion => {
                let row = bounds.ground_y() / 100.0;
                let mut bodies = Vec::with_capacity(200);
                for (colour, x_range) in [("red", 0.0..0.25 * width), ("green", 0.75 * width..width)] {
                    for i in 0..100 {
                        let x = rng.gen_range(x_range.clone());
                        bodies.push(
                            Body::circle(5.0)
                                .density(0.001)
                                .colour(colour)
                                .velocity(rng.gen_range(SPEED_RANGE), rng.gen_range(SPEED_RANGE))
                                .position(x, row * i as f32)
                                .build()?,
                        );
                    }
                }
                Ok(bodies)
            }
            Preset::AtmosphericDiffusion => {
                let mut bodies = Vec::with_capacity(198);
                for (colour, density) in [("red", 0.001), ("blue", 0.002), ("green", 0.003)] {
                    for _ in 0..66 {
                        bodies.push(
                            Body::circle(5.0)
                                .density(density)
                                .colour(colour)
                                .velocity(rng.gen_range(SPEED_RANGE), rng.gen_range(SPEED_RANGE))
                                .position(rng.gen_range(0.0..width), rng.gen_range(0.0..bounds.ground_y()))
                                .build()?,
                        );
                    }
                }
                Ok(bodies)
            }
            Preset::OneToOneMassCollision
            | Preset::OneToOneMassCollisionPartial
            | Preset::OneToOneMassCollisionInelastic => head_on_pair(bounds, 0.001),
            Preset::TwoToOneMassCollision
            | Preset::TwoToOneMassCollisionPartial
            | Preset::TwoToOneMassCollisionInelastic => head_on_pair(bounds, 0.002),
            Preset::ThreeToOneMassCollision
            | Preset::ThreeToOneMassCollisionPartial
            | Preset::ThreeToOneMassCollisionInelastic => head_on_pair(bounds, 0.003),
            Preset::ThreeBallDrop => [(5.0, "red", 0.0), (10.0, "yellow", 20.0), (15.0, "blue", 50.0)]
                .into_iter()
                .map(|(radius, colour, offset)| {
                    Body::circle(radius)
                        .density(0.1)
                        .colour(colour)
                        .position(0.5 * width, 0.25 * height + offset)
                        .build()
                })
                .collect(),
            Preset::TerminalVelocity => [(0.001, "red", 0.25), (0.002, "yellow", 0.5), (0.003, "blue", 0.75)]
                .into_iter()
                .map(|(density, colour, across)| {
                    Body::circle(10.0)
                        .density(density)
                        .colour(colour)
                        .position(across * width, 0.1 * height)
                        .build()
                })
                .collect(),
            Preset::StressTest => {
                let mut bodies = Vec::with_capacity(600);
                for colour in ["red", "green", "blue"] {
                    for _ in 0..200 {
                        bodies.push(
                            Body::circle(rng.gen_range(5.0..15.0))
                                .density(rng.gen_range(5.0..20.0))
                                .colour(colour)
                                .velocity(rng.gen_range(SPEED_RANGE), rng.gen_range(SPEED_RANGE))
                                .acceleration(rng.gen_range(SPEED_RANGE), rng.gen_range(SPEED_RANGE))
                                .position(rng.gen_range(0.0..width), rng.gen_range(0.0..bounds.ground_y()))
                                .build()?,
                        );
                    }
                }
                Ok(bodies)
            }
            Preset::None => Ok(Vec::new()),
        }
    }
}

/// Two r = 20 circles approaching head-on; the left one carries `density`.
fn head_on_pair(bounds: &ArenaBounds, density: f32) -> Result<Vec<Body>> {
    let y = 0.5 * bounds.height();
    Ok(vec![
        Body::circle(20.0)
            .density(density)
            .colour("red")
            .velocity(25.0, 0.0)
            .position(0.25 * bounds.width(), y)
            .build()?,
        Body::circle(20.0)
            .density(0.001)
            .colour("red")
            .velocity(-25.0, 0.0)
            .position(0.75 * bounds.width(), y)
            .build()?,
    ])
}
