//! Tests for pairwise collision response and the grid narrow phase

use driftbox_core::bounds::Boundary;
use driftbox_core::collision::{resolve_collision, resolve_collisions};
use driftbox_core::spatial::{cell_distance, SpatialGrid};
use driftbox_core::tests::test_helpers::{
    approx_eq_f32, approx_eq_vec2, lattice, min_pair_distance, particle,
};
use glam::Vec2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

#[test]
fn test_fully_overlapping_pair_is_pushed_apart() {
    let mut a = particle(4.0, 0.0, 0.0, 0.0, 8.0);
    let mut b = particle(-4.0, 0.0, 0.0, 0.0, 8.0);

    assert!(resolve_collision(&mut a, &mut b, 16.0));

    assert!(approx_eq_f32(a.pos.distance(b.pos), 16.0, 1e-4));
    assert!(approx_eq_vec2(a.pos, Vec2::new(8.0, 0.0), 1e-4));
    assert!(approx_eq_vec2(b.pos, Vec2::new(-8.0, 0.0), 1e-4));
    assert_eq!(a.vel, Vec2::ZERO);
    assert_eq!(b.vel, Vec2::ZERO);
}

#[test]
fn test_diagonal_overlap_leaves_no_residual() {
    let mut a = particle(3.0, 4.0, 0.0, 0.0, 5.0);
    let mut b = particle(0.0, 0.0, 0.0, 0.0, 5.0);

    assert!(resolve_collision(&mut a, &mut b, 10.0));

    assert!(a.pos.distance(b.pos) >= 10.0 - 1e-4);
    // Each moved 2.5 along the (0.6, 0.8) normal
    assert!(approx_eq_vec2(a.pos, Vec2::new(4.5, 6.0), 1e-4));
    assert!(approx_eq_vec2(b.pos, Vec2::new(-1.5, -2.0), 1e-4));
}

#[test]
fn test_head_on_collision_exchanges_velocities() {
    let mut a = particle(-3.0, 0.0, 2.0, 0.0, 4.0);
    let mut b = particle(3.0, 0.0, -2.0, 0.0, 4.0);

    assert!(resolve_collision(&mut a, &mut b, 8.0));

    assert!(approx_eq_vec2(a.vel, Vec2::new(-2.0, 0.0), 1e-5));
    assert!(approx_eq_vec2(b.vel, Vec2::new(2.0, 0.0), 1e-5));
}

#[test]
fn test_tangential_velocity_is_untouched() {
    let mut a = particle(0.0, 3.0, 1.0, -1.0, 4.0);
    let mut b = particle(0.0, -3.0, -0.5, 1.0, 4.0);

    resolve_collision(&mut a, &mut b, 8.0);

    // Normal is +y: only y components exchange
    assert!(approx_eq_f32(a.vel.x, 1.0, 1e-6));
    assert!(approx_eq_f32(b.vel.x, -0.5, 1e-6));
    assert!(approx_eq_f32(a.vel.y, 1.0, 1e-6));
    assert!(approx_eq_f32(b.vel.y, -1.0, 1e-6));
}

#[test]
fn test_separating_pair_keeps_velocity() {
    let mut a = particle(2.0, 0.0, 1.0, 0.0, 4.0);
    let mut b = particle(-2.0, 0.0, -1.0, 0.0, 4.0);

    assert!(resolve_collision(&mut a, &mut b, 8.0));

    assert_eq!(a.vel, Vec2::new(1.0, 0.0));
    assert_eq!(b.vel, Vec2::new(-1.0, 0.0));
    assert!(approx_eq_f32(a.pos.distance(b.pos), 8.0, 1e-4));
}

#[test]
fn test_coincident_particles_are_left_alone() {
    let mut a = particle(5.0, 5.0, 1.0, 0.0, 4.0);
    let mut b = particle(5.0, 5.0, -1.0, 0.0, 4.0);

    assert!(!resolve_collision(&mut a, &mut b, 8.0));

    assert_eq!(a.pos, Vec2::new(5.0, 5.0));
    assert_eq!(b.pos, Vec2::new(5.0, 5.0));
    assert!(a.pos.is_finite() && a.vel.is_finite());
}

#[test]
fn test_touching_or_distant_pairs_are_ignored() {
    let mut a = particle(8.0, 0.0, -1.0, 0.0, 4.0);
    let mut b = particle(0.0, 0.0, 1.0, 0.0, 4.0);
    assert!(!resolve_collision(&mut a, &mut b, 8.0));
    assert_eq!(a.pos, Vec2::new(8.0, 0.0));
    assert_eq!(a.vel, Vec2::new(-1.0, 0.0));

    let mut c = particle(50.0, 50.0, 0.0, 0.0, 4.0);
    assert!(!resolve_collision(&mut b, &mut c, 8.0));
}

#[test]
fn test_narrow_phase_visits_each_neighbor_pair_once() {
    let radius = 4.0;
    let boundary = Boundary::from_viewport(120.0, 90.0);
    let limits = boundary.limits(radius);
    let mut rng = SmallRng::seed_from_u64(3);

    let mut particles: Vec<_> = (0..300)
        .map(|_| {
            particle(
                rng.gen_range(-limits.x..=limits.x),
                rng.gen_range(-limits.y..=limits.y),
                0.0,
                0.0,
                radius,
            )
        })
        .collect();
    let grid = SpatialGrid::build(&particles, &boundary, 2.0 * radius);

    let mut expected_pairs = 0;
    for (i, a) in particles.iter().enumerate() {
        for b in &particles[i + 1..] {
            if cell_distance(grid.cell_of(a.pos), grid.cell_of(b.pos)) <= 1 {
                expected_pairs += 1;
            }
        }
    }

    let stats = resolve_collisions(&mut particles, &grid, 2.0 * radius);
    assert_eq!(stats.candidate_pairs, expected_pairs);
    assert!(stats.resolved <= stats.candidate_pairs);
}

#[test]
fn test_narrow_phase_catches_back_left_diagonal_neighbor() {
    let boundary = Boundary::from_viewport(100.0, 100.0);
    // a sits in a cell up-left of b's cell: (cx - 1, cy + 1) from b
    let mut particles = vec![
        particle(-2.3, 2.3, 0.0, 0.0, 2.0),
        particle(-1.7, 1.7, 0.0, 0.0, 2.0),
    ];
    let grid = SpatialGrid::build(&particles, &boundary, 4.0);
    let cell_a = grid.cell_of(particles[0].pos);
    let cell_b = grid.cell_of(particles[1].pos);
    assert_eq!((cell_a.0 - cell_b.0, cell_a.1 - cell_b.1), (-1, 1));

    let stats = resolve_collisions(&mut particles, &grid, 4.0);

    assert_eq!(stats.candidate_pairs, 1);
    assert_eq!(stats.resolved, 1);
    assert!(particles[0].pos.distance(particles[1].pos) >= 4.0 - 1e-4);
}

#[test]
fn test_isolated_pairs_end_without_overlap() {
    let radius = 3.0;
    let boundary = Boundary::from_viewport(400.0, 400.0);
    // Pair centers 60 units apart, each pair overlapping by 2 units
    let mut particles = Vec::new();
    for k in 0..5 {
        let center = Vec2::new(-150.0 + 60.0 * k as f32, 0.0);
        particles.push(particle(center.x - 2.0, center.y, 0.0, 0.0, radius));
        particles.push(particle(center.x + 2.0, center.y, 0.0, 0.0, radius));
    }
    let grid = SpatialGrid::build(&particles, &boundary, 2.0 * radius);

    let stats = resolve_collisions(&mut particles, &grid, 2.0 * radius);

    assert_eq!(stats.resolved, 5);
    assert!(min_pair_distance(&particles) >= 2.0 * radius - 1e-4);
}

#[test]
fn test_spaced_lattice_has_no_collisions() {
    let radius = 2.0;
    let boundary = Boundary::from_viewport(200.0, 200.0);
    let mut particles = lattice(10, 10, 5.0, radius);
    let before = particles.clone();
    let grid = SpatialGrid::build(&particles, &boundary, 2.0 * radius);

    let stats = resolve_collisions(&mut particles, &grid, 2.0 * radius);

    assert_eq!(stats.resolved, 0);
    assert_eq!(particles, before);
}
