use crate::bounds::Boundary;
use crate::engine::{Particle, BASE_OPACITY, MAX_OPACITY};
use crate::params::SimulationParameters;
use crate::pointer::{PointerMode, PointerState};
use glam::Vec2;

/// Pointer strengths are configured in small slider units
pub const POINTER_FORCE_SCALE: f32 = 100.0;
/// Fraction of the normal velocity kept after hitting a wall
pub const WALL_RESTITUTION: f32 = 0.9;

/// Advance every particle by one frame. Particles do not interact here.
pub fn integrate(
    particles: &mut [Particle],
    pointer: &PointerState,
    params: &SimulationParameters,
    boundary: &Boundary,
) {
    for particle in particles.iter_mut() {
        integrate_particle(particle, pointer, params, boundary);
    }
}

/// Advance a single particle by one frame
pub fn integrate_particle(
    particle: &mut Particle,
    pointer: &PointerState,
    params: &SimulationParameters,
    boundary: &Boundary,
) {
    apply_pointer(particle, pointer, params, boundary.interaction_radius());

    particle.vel.y -= params.gravity;
    particle.vel = particle.vel.clamp_length_max(params.max_speed);

    particle.pos += particle.vel;
    bounce_off_walls(particle, boundary);

    particle.vel *= params.friction;
    if particle.vel.length() < params.stop_threshold {
        particle.vel = Vec2::ZERO;
    }
}

/// Push the particle toward or away from the pointer and update its opacity
pub fn apply_pointer(
    particle: &mut Particle,
    pointer: &PointerState,
    params: &SimulationParameters,
    interaction_radius: f32,
) {
    particle.opacity = BASE_OPACITY;

    if !pointer.mode.is_active() {
        return;
    }

    let to_pointer = pointer.pos - particle.pos;
    let distance = to_pointer.length();
    if distance >= interaction_radius {
        return;
    }

    // Coincident with the pointer: no direction to push along
    let dir = to_pointer.normalize_or_zero();
    let closeness = 1.0 - distance / interaction_radius;
    let span = MAX_OPACITY - BASE_OPACITY;

    match pointer.mode {
        PointerMode::Attract => {
            particle.vel += dir * params.attraction_strength * POINTER_FORCE_SCALE;
            particle.opacity = BASE_OPACITY + span * closeness;
        }
        PointerMode::Repel => {
            particle.vel += dir * -params.repulsion_strength * POINTER_FORCE_SCALE;
            particle.opacity = BASE_OPACITY + span * (1.0 - closeness);
        }
        PointerMode::None => {}
    }
}

/// Clamp the particle inside the boundary, reflecting and damping the
/// velocity on each axis that hit a wall
pub fn bounce_off_walls(particle: &mut Particle, boundary: &Boundary) {
    let limits = boundary.limits(particle.radius);

    if particle.pos.x.abs() > limits.x {
        particle.pos.x = limits.x.copysign(particle.pos.x);
        particle.vel.x *= -WALL_RESTITUTION;
    }
    if particle.pos.y.abs() > limits.y {
        particle.pos.y = limits.y.copysign(particle.pos.y);
        particle.vel.y *= -WALL_RESTITUTION;
    }
}
