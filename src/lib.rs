//! Kinetic Sandbox – a 2D rigid-body mechanics sandbox.
//!
//! Circles and rectangles move under gravity and quadratic drag, bounce off
//! the arena walls, ground and ceiling, and collide with each other through a
//! closed-form restitution response. The tracked body's kinematic history is
//! sampled into rolling buffers for plotting.

pub mod collision;
pub mod config;
pub mod core;
pub mod dynamics;
pub mod error;
pub mod graph;
pub mod presets;
pub mod utils;
pub mod world;

use std::time::Instant;

use log::debug;

pub use glam::Vec2;

pub use collision::{BoundaryHits, CollisionPlanes, Detection, Impactor, Resolver};
pub use config::{ArenaBounds, SimulationConstants};
pub use crate::core::{Body, BodyBuilder, Hitbox, Shape};
pub use dynamics::Integrator;
pub use error::{Result, SandboxError};
pub use graph::{Component, Plot, Quantity, Sample, SampleBuffer};
pub use presets::Preset;
pub use utils::math::Vec2Ext;
pub use world::{ResolutionMode, TickStats, World};

/// High-level wrapper that owns a [`World`] together with the plots fed
/// from its tracked body.
#[derive(Debug, Clone)]
pub struct Sandbox {
    world: World,
    plots: Vec<Plot>,
    frame_budget_ms: f32,
}

impl Default for Sandbox {
    fn default() -> Self {
        Self::new(SimulationConstants::default())
    }
}

impl Sandbox {
    /// Creates an empty sandbox running with the provided constants.
    pub fn new(constants: SimulationConstants) -> Self {
        Self::with_world(World::new(constants))
    }

    pub fn with_world(world: World) -> Self {
        Self {
            world,
            plots: Vec::new(),
            frame_budget_ms: config::DEFAULT_FRAME_BUDGET_MS,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Adds a body to the world and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.world.add_body(body)
    }

    /// Adds a plot and returns its index.
    pub fn add_plot(&mut self, plot: Plot) -> usize {
        self.plots.push(plot);
        self.plots.len() - 1
    }

    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    pub fn plot_mut(&mut self, index: usize) -> Option<&mut Plot> {
        self.plots.get_mut(index)
    }

    pub fn tracked(&self) -> Option<usize> {
        self.world.tracked()
    }

    pub fn tracked_body(&self) -> Option<&Body> {
        self.tracked().and_then(|index| self.world.body(index))
    }

    /// Switches plotting to another body. Every plot restarts empty.
    pub fn track(&mut self, index: usize) -> Result<()> {
        self.world.set_tracked(index)?;
        self.clear_plots();
        debug!("tracking body {index}");
        Ok(())
    }

    pub fn clear_plots(&mut self) {
        for plot in &mut self.plots {
            plot.clear();
        }
    }

    /// Wall-clock time one step may take before a warning is logged.
    pub fn set_frame_budget_ms(&mut self, budget_ms: f32) {
        self.frame_budget_ms = budget_ms;
    }

    /// Advances one tick and records a sample of the tracked body in every plot.
    pub fn step(&mut self) -> TickStats {
        let start = Instant::now();
        self.world.step();

        if let Some(index) = self.world.tracked() {
            if let Some(body) = self.world.body(index) {
                for plot in &mut self.plots {
                    plot.record(body);
                }
            }
        }

        utils::warn_if_tick_budget_exceeded(start.elapsed(), self.frame_budget_ms);
        self.world.last_tick_stats()
    }

    /// Replaces the world's bodies and constants with a preset scenario and
    /// tracks its first body.
    pub fn load_preset(&mut self, preset: Preset, seed: u64) -> Result<()> {
        let bodies = preset.bodies(self.world.bounds(), seed)?;
        self.world.set_constants(preset.constants())?;
        self.world.set_bodies(bodies);
        self.clear_plots();
        if !self.world.is_empty() {
            self.world.set_tracked(0)?;
        }
        debug!("loaded preset {} with {} bodies", preset.name(), self.world.len());
        Ok(())
    }
}
