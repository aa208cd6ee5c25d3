//! Frame driver tying the three stages together
//!
//! `Simulation::step` runs integration, rebuilds the spatial grid and
//! resolves collisions, in that order, against a parameter and pointer
//! snapshot passed in by the caller.

use crate::bounds::Boundary;
use crate::collision::resolve_collisions;
use crate::engine::Particle;
use crate::integrator::integrate;
use crate::params::SimulationParameters;
use crate::pointer::PointerState;
use crate::spatial::SpatialGrid;
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Initial velocity components are drawn from `[-1, 1]` and scaled by this
pub const SEED_VELOCITY_SCALE: f32 = 2.0;

/// Counters describing one simulated frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub frame: u64,
    pub particles: usize,
    pub occupied_cells: usize,
    pub candidate_pairs: usize,
    pub collisions: usize,
}

/// Owns the particle list and everything that persists between frames
#[derive(Debug)]
pub struct Simulation {
    particles: Vec<Particle>,
    boundary: Boundary,
    grid: SpatialGrid,
    rng: SmallRng,
    frame: u64,
}

impl Simulation {
    /// Create a simulation over a `width` x `height` viewport and seed
    /// `params.particle_count` particles
    pub fn new(width: f32, height: f32, params: &SimulationParameters, seed: u64) -> Self {
        let boundary = Boundary::from_viewport(width, height);
        let mut sim = Self {
            particles: Vec::new(),
            grid: SpatialGrid::new(&boundary, cell_size(params.particle_size)),
            boundary,
            rng: SmallRng::seed_from_u64(seed),
            frame: 0,
        };
        sim.reseed(params);
        sim
    }

    /// Simulation over an explicit particle list, for callers that place
    /// particles themselves
    pub fn from_particles(width: f32, height: f32, particles: Vec<Particle>, seed: u64) -> Self {
        let boundary = Boundary::from_viewport(width, height);
        let radius = particles.first().map(|p| p.radius).unwrap_or(1.0);
        Self {
            particles,
            grid: SpatialGrid::new(&boundary, cell_size(radius)),
            boundary,
            rng: SmallRng::seed_from_u64(seed),
            frame: 0,
        }
    }

    /// Replace the particle list with `params.particle_count` fresh particles
    pub fn reseed(&mut self, params: &SimulationParameters) {
        let radius = params.particle_size;
        let limits = self.boundary.limits(radius);

        self.particles.clear();
        self.particles.reserve(params.particle_count);
        for _ in 0..params.particle_count {
            let pos = Vec2::new(
                symmetric(&mut self.rng, limits.x),
                symmetric(&mut self.rng, limits.y),
            );
            let vel = Vec2::new(
                symmetric(&mut self.rng, 1.0),
                symmetric(&mut self.rng, 1.0),
            ) * SEED_VELOCITY_SCALE;
            self.particles.push(Particle::new(pos, vel, radius));
        }
        self.frame = 0;

        log::debug!(
            "seeded {} particles (radius {}) in {}x{}",
            self.particles.len(),
            radius,
            self.boundary.width(),
            self.boundary.height()
        );
    }

    /// Take a new viewport size into account before the next frame
    pub fn resize(&mut self, width: f32, height: f32) {
        let boundary = Boundary::from_viewport(width, height);
        if boundary != self.boundary {
            log::debug!("boundary resized to {}x{}", boundary.width(), boundary.height());
            self.boundary = boundary;
        }
    }

    /// Advance the simulation by one frame
    pub fn step(&mut self, params: &SimulationParameters, pointer: &PointerState) -> FrameStats {
        let radius = params.particle_size;
        for particle in &mut self.particles {
            particle.radius = radius;
        }

        integrate(&mut self.particles, pointer, params, &self.boundary);

        let min_dist = 2.0 * radius;
        self.grid.rebuild(&self.particles, &self.boundary, cell_size(radius));
        let collisions = resolve_collisions(&mut self.particles, &self.grid, min_dist);

        self.frame += 1;
        let stats = FrameStats {
            frame: self.frame,
            particles: self.particles.len(),
            occupied_cells: self.grid.occupied_cells(),
            candidate_pairs: collisions.candidate_pairs,
            collisions: collisions.resolved,
        };
        log::trace!("{:?}", stats);
        stats
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    /// Frames stepped since the last reseed
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Total kinetic energy assuming unit masses
    pub fn kinetic_energy(&self) -> f32 {
        self.particles.iter().map(Particle::kinetic_energy).sum()
    }
}

/// Grid cells are one particle diameter wide
pub fn cell_size(radius: f32) -> f32 {
    2.0 * radius
}

fn symmetric(rng: &mut SmallRng, half_range: f32) -> f32 {
    if half_range <= 0.0 {
        return 0.0;
    }
    rng.gen_range(-half_range..=half_range)
}
