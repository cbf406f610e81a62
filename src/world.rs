use glam::Vec2;
use log::{debug, trace, warn};

use crate::{
    collision::{collide_with_bounds, Detection, Impactor, Resolver},
    config::{ArenaBounds, SimulationConstants},
    core::Body,
    dynamics::{forces, Integrator},
    error::{Result, SandboxError},
    utils::logging::ScopedTimer,
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// How the all-pairs collision pass applies its results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Every ordered pair `(i, j)`, `i != j`, is checked in turn and resolved
    /// immediately, so later pairs see velocities written by earlier ones.
    #[default]
    Sequential,
    /// Velocities are snapshotted before the pass; each unordered pair is
    /// resolved once against the snapshot and the changes are summed and
    /// applied afterwards. Order independent, and allows parallel detection.
    Snapshot,
}

/// Counters describing the most recent tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickStats {
    pub bodies: usize,
    pub pair_checks: usize,
    pub collisions: usize,
    pub boundary_hits: usize,
}

/// The live collection of bodies plus the constants and arena they move in.
#[derive(Debug, Clone)]
pub struct World {
    bodies: Vec<Body>,
    constants: SimulationConstants,
    bounds: ArenaBounds,
    integrator: Integrator,
    resolution_mode: ResolutionMode,
    parallel_enabled: bool,
    elapsed: f32,
    last_stats: TickStats,
}

impl Default for World {
    fn default() -> Self {
        Self::new(SimulationConstants::default())
    }
}

impl World {
    /// Creates an empty world. Out-of-range constants are clamped.
    pub fn new(constants: SimulationConstants) -> Self {
        Self {
            bodies: Vec::new(),
            constants: constants.clamped(),
            bounds: ArenaBounds::default(),
            integrator: Integrator::new(),
            resolution_mode: ResolutionMode::default(),
            parallel_enabled: false,
            elapsed: 0.0,
            last_stats: TickStats::default(),
        }
    }

    pub fn with_bounds(mut self, bounds: ArenaBounds) -> Self {
        self.bounds = bounds;
        self
    }

    /// Adds a body and returns its index.
    pub fn add_body(&mut self, body: Body) -> usize {
        self.bodies.push(body);
        self.bodies.len() - 1
    }

    pub fn set_bodies(&mut self, bodies: Vec<Body>) {
        debug!("replacing {} bodies with {}", self.bodies.len(), bodies.len());
        self.bodies = bodies;
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn body_mut(&mut self, index: usize) -> Option<&mut Body> {
        self.bodies.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }

    /// Replaces the physical constants. Invalid input is refused and the
    /// previous constants stay in effect.
    pub fn set_constants(&mut self, constants: SimulationConstants) -> Result<()> {
        if let Err(err) = constants.validate() {
            warn!("rejected simulation constants: {err}");
            return Err(err);
        }
        debug!("simulation constants set to {constants:?}");
        self.constants = constants;
        Ok(())
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    /// Resizes the arena. Non-finite or non-positive sides are refused and
    /// the previous bounds stay in effect.
    pub fn set_bounds(&mut self, width: f32, height: f32) -> Result<()> {
        let bounds = match ArenaBounds::new(width, height) {
            Ok(bounds) => bounds,
            Err(err) => {
                warn!("rejected arena bounds: {err}");
                return Err(err);
            }
        };
        debug!("arena resized to {width}x{height}");
        self.bounds = bounds;
        Ok(())
    }

    pub fn resolution_mode(&self) -> ResolutionMode {
        self.resolution_mode
    }

    pub fn set_resolution_mode(&mut self, mode: ResolutionMode) {
        self.resolution_mode = mode;
    }

    /// Enables parallel pair detection. Only takes effect in
    /// [`ResolutionMode::Snapshot`] with the `parallel` feature compiled in.
    pub fn set_parallel_enabled(&mut self, enabled: bool) {
        self.parallel_enabled = enabled;
    }

    pub fn parallel_enabled(&self) -> bool {
        self.parallel_enabled
    }

    /// Queues a one-tick force on a body.
    pub fn apply_input_force(&mut self, index: usize, force: Vec2) -> Result<()> {
        let count = self.bodies.len();
        let body = self
            .bodies
            .get_mut(index)
            .ok_or(SandboxError::BodyOutOfRange { index, count })?;
        body.apply_input_force(force);
        Ok(())
    }

    /// Marks exactly one body as tracked.
    pub fn set_tracked(&mut self, index: usize) -> Result<()> {
        let count = self.bodies.len();
        if index >= count {
            return Err(SandboxError::BodyOutOfRange { index, count });
        }
        for (i, body) in self.bodies.iter_mut().enumerate() {
            body.set_tracked(i == index);
        }
        Ok(())
    }

    pub fn tracked(&self) -> Option<usize> {
        self.bodies.iter().position(Body::is_tracked)
    }

    /// Total simulated time advanced by this world.
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn last_tick_stats(&self) -> TickStats {
        self.last_stats
    }

    /// Advances by the configured time step.
    pub fn step(&mut self) {
        self.tick(self.constants.time_step);
    }

    /// Advances the simulation by one tick of length `dt`.
    ///
    /// Each body has its forces refreshed, is integrated, is reflected off
    /// the arena bounds and gets a fresh hitbox; then every pair is checked.
    /// A non-positive `dt` is ignored.
    pub fn tick(&mut self, dt: f32) {
        if !(dt.is_finite() && dt > 0.0) {
            warn!("ignoring tick with non-positive time step {dt}");
            return;
        }

        let _timer = ScopedTimer::new("world::tick");
        let SimulationConstants {
            restitution,
            gravity,
            air_density,
            ..
        } = self.constants;
        let mut stats = TickStats {
            bodies: self.bodies.len(),
            ..TickStats::default()
        };

        {
            let _timer = ScopedTimer::new("world::integrate");
            for body in self.bodies.iter_mut() {
                forces::accumulate(body, gravity, air_density);
                self.integrator.integrate(body, dt);
                stats.boundary_hits += collide_with_bounds(body, &self.bounds, restitution, dt).count();
                body.update_hitbox();
            }
        }

        {
            let _timer = ScopedTimer::new("world::collisions");
            match self.resolution_mode {
                ResolutionMode::Sequential => self.resolve_sequential(dt, restitution, &mut stats),
                ResolutionMode::Snapshot => self.resolve_snapshot(dt, restitution, &mut stats),
            }
        }

        self.elapsed += dt;
        self.last_stats = stats;
    }

    fn resolve_sequential(&mut self, dt: f32, restitution: f32, stats: &mut TickStats) {
        let count = self.bodies.len();
        for i in 0..count {
            for j in 0..count {
                if i == j {
                    continue;
                }
                stats.pair_checks += 1;
                if !Detection::is_collision(&self.bodies[i], &self.bodies[j], dt) {
                    continue;
                }

                let (a, b) = pair_mut(&mut self.bodies, i, j);
                if Detection::is_coincident(a, b) {
                    Detection::separate_coincident(a);
                }
                Resolver::resolve(a, b, restitution);
                stats.collisions += 1;
                trace!("resolved collision between bodies {i} and {j}");
            }
        }
    }

    fn resolve_snapshot(&mut self, dt: f32, restitution: f32, stats: &mut TickStats) {
        let count = self.bodies.len();
        let pairs = self.detect_pairs(dt);
        stats.pair_checks += count * count.saturating_sub(1);

        let mut snapshot: Vec<Impactor> = self.bodies.iter().map(Impactor::from).collect();
        let mut deltas = vec![Vec2::ZERO; count];

        for (i, j) in pairs {
            if Detection::is_coincident(&self.bodies[i], &self.bodies[j]) {
                Detection::separate_coincident(&mut self.bodies[i]);
                snapshot[i].position = self.bodies[i].position();
            }
            let (velocity_a, velocity_b) =
                Resolver::post_collision_velocities(snapshot[i], snapshot[j], restitution);
            deltas[i] += velocity_a - snapshot[i].velocity;
            deltas[j] += velocity_b - snapshot[j].velocity;
            stats.collisions += 1;
            trace!("resolved collision between bodies {i} and {j} against snapshot");
        }

        for (body, delta) in self.bodies.iter_mut().zip(deltas) {
            if delta != Vec2::ZERO {
                body.set_velocity(body.velocity() + delta);
            }
        }
    }

    /// Unordered pairs `(i, j)`, `i < j`, colliding in either direction.
    fn detect_pairs(&self, dt: f32) -> Vec<(usize, usize)> {
        let bodies = &self.bodies;
        let count = bodies.len();
        let collisions_from = move |i: usize| {
            ((i + 1)..count)
                .filter(move |&j| {
                    Detection::is_collision(&bodies[i], &bodies[j], dt)
                        || Detection::is_collision(&bodies[j], &bodies[i], dt)
                })
                .map(move |j| (i, j))
        };

        if self.parallel_enabled {
            #[cfg(feature = "parallel")]
            {
                return (0..count).into_par_iter().flat_map_iter(collisions_from).collect();
            }
        }

        (0..count).flat_map(collisions_from).collect()
    }
}

/// Disjoint mutable borrows of two distinct bodies.
fn pair_mut(bodies: &mut [Body], i: usize, j: usize) -> (&mut Body, &mut Body) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = bodies.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = bodies.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
