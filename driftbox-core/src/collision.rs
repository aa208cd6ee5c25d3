use crate::engine::Particle;
use crate::spatial::{CellCoord, SpatialGrid};

/// Cells checked against each cell besides itself. Only forward offsets are
/// listed, so every pair of adjacent cells is visited exactly once; the
/// missing `(-1, +1)` neighbor is covered by that cell's own `(+1, -1)`.
pub const FORWARD_NEIGHBORS: [CellCoord; 4] = [(1, -1), (1, 0), (1, 1), (0, 1)];

/// Counters from one narrow-phase pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionStats {
    /// Pairs handed to `resolve_collision`
    pub candidate_pairs: usize,
    /// Pairs that overlapped and were pushed apart
    pub resolved: usize,
}

/// Resolve an overlap between two equal-mass particles.
///
/// Returns `true` when the pair overlapped. Coincident particles are left
/// alone: there is no normal to separate them along.
pub fn resolve_collision(a: &mut Particle, b: &mut Particle, min_dist: f32) -> bool {
    let diff = a.pos - b.pos;
    let distance = diff.length();
    if distance == 0.0 || distance >= min_dist {
        return false;
    }

    let normal = diff / distance;
    let correction = normal * ((min_dist - distance) * 0.5);
    a.pos += correction;
    b.pos -= correction;

    let vel_along_normal = (a.vel - b.vel).dot(normal);
    if vel_along_normal < 0.0 {
        let impulse = normal * vel_along_normal;
        a.vel -= impulse;
        b.vel += impulse;
    }

    true
}

/// Run the narrow phase over every cell of `grid`.
///
/// Pairs are resolved one after another in a fixed order: cells in grid
/// order, pairs within a cell by index, then each forward neighbor in
/// `FORWARD_NEIGHBORS` order. A particle moved by one resolution is seen at
/// its new position by the next.
pub fn resolve_collisions(
    particles: &mut [Particle],
    grid: &SpatialGrid,
    min_dist: f32,
) -> CollisionStats {
    let mut stats = CollisionStats::default();

    for (cell, bucket) in grid.iter() {
        for (n, &i) in bucket.iter().enumerate() {
            for &j in &bucket[n + 1..] {
                resolve_indexed(particles, i, j, min_dist, &mut stats);
            }
        }

        for (dx, dy) in FORWARD_NEIGHBORS {
            let Some(neighbor) = grid.cell((cell.0 + dx, cell.1 + dy)) else {
                continue;
            };
            for &i in bucket {
                for &j in neighbor {
                    resolve_indexed(particles, i, j, min_dist, &mut stats);
                }
            }
        }
    }

    stats
}

fn resolve_indexed(
    particles: &mut [Particle],
    i: usize,
    j: usize,
    min_dist: f32,
    stats: &mut CollisionStats,
) {
    stats.candidate_pairs += 1;
    if let Some((a, b)) = pair_mut(particles, i, j) {
        if resolve_collision(a, b, min_dist) {
            stats.resolved += 1;
        }
    }
}

/// Two distinct mutable elements of a slice, in argument order
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> Option<(&mut T, &mut T)> {
    if i == j || i >= items.len() || j >= items.len() {
        return None;
    }
    if i < j {
        let (head, tail) = items.split_at_mut(j);
        Some((&mut head[i], &mut tail[0]))
    } else {
        let (head, tail) = items.split_at_mut(i);
        Some((&mut tail[0], &mut head[j]))
    }
}
