use glam::Vec2;

/// Opacity of a particle the pointer is not acting on
pub const BASE_OPACITY: f32 = 0.8;
/// Opacity of a particle at full pointer influence
pub const MAX_OPACITY: f32 = 1.0;

/// A particle in the simulation
///
/// Particles carry no identity and no display data. A presentation layer
/// that needs colors or handles keeps them in its own array, aligned with
/// the simulation's particle indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    /// Derived from pointer proximity, always in `[BASE_OPACITY, MAX_OPACITY]`
    pub opacity: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            opacity: BASE_OPACITY,
        }
    }

    pub fn at_rest(pos: Vec2, radius: f32) -> Self {
        Self::new(pos, Vec2::ZERO, radius)
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Kinetic energy assuming unit mass
    pub fn kinetic_energy(&self) -> f32 {
        0.5 * self.vel.length_squared()
    }
}
