//! Uniform-grid broad phase
//!
//! Particles are bucketed by the cell their center falls in. With the cell
//! size equal to the particle diameter, any two particles that can overlap
//! sit in the same cell or in Chebyshev-adjacent cells, so the narrow phase
//! only has to look at a 3x3 neighborhood.
//!
//! Buckets live in a `BTreeMap` keyed by `(cx, cy)` so iteration order is
//! fixed (ascending `cx`, then `cy`) and a frame's collision outcome does not
//! depend on hashing.

use crate::bounds::Boundary;
use crate::engine::Particle;
use glam::Vec2;
use std::collections::BTreeMap;

/// Integer cell coordinate
pub type CellCoord = (i32, i32);

/// Per-frame mapping from cell coordinate to particle indices
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    cell_size: f32,
    origin_offset: Vec2,
    cells: BTreeMap<CellCoord, Vec<usize>>,
}

impl SpatialGrid {
    /// Empty grid over `boundary`. `cell_size` must be positive.
    pub fn new(boundary: &Boundary, cell_size: f32) -> Self {
        Self {
            cell_size,
            origin_offset: boundary.half_extents(),
            cells: BTreeMap::new(),
        }
    }

    /// Build a grid from the current particle positions
    pub fn build(particles: &[Particle], boundary: &Boundary, cell_size: f32) -> Self {
        let mut grid = Self::new(boundary, cell_size);
        grid.insert_all(particles);
        grid
    }

    /// Refill the grid for a new frame, keeping bucket allocations for cells
    /// that stay occupied
    pub fn rebuild(&mut self, particles: &[Particle], boundary: &Boundary, cell_size: f32) {
        self.cell_size = cell_size;
        self.origin_offset = boundary.half_extents();
        for bucket in self.cells.values_mut() {
            bucket.clear();
        }
        self.insert_all(particles);
        self.cells.retain(|_, bucket| !bucket.is_empty());
    }

    fn insert_all(&mut self, particles: &[Particle]) {
        for (idx, particle) in particles.iter().enumerate() {
            let cell = self.cell_of(particle.pos);
            self.cells.entry(cell).or_default().push(idx);
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Cell containing `pos`. Positions outside the boundary map to cells
    /// outside the nominal range, including negative ones.
    pub fn cell_of(&self, pos: Vec2) -> CellCoord {
        cell_coord(pos, self.origin_offset, self.cell_size)
    }

    /// Particle indices in `cell`, in particle order
    pub fn cell(&self, cell: CellCoord) -> Option<&[usize]> {
        self.cells.get(&cell).map(Vec::as_slice)
    }

    /// Occupied cells in iteration order
    pub fn iter(&self) -> impl Iterator<Item = (CellCoord, &[usize])> + '_ {
        self.cells
            .iter()
            .map(|(&cell, bucket)| (cell, bucket.as_slice()))
    }

    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of particles bucketed
    pub fn len(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// `floor((pos + offset) / cell_size)` per axis
pub fn cell_coord(pos: Vec2, origin_offset: Vec2, cell_size: f32) -> CellCoord {
    let shifted = ((pos + origin_offset) / cell_size).floor();
    (shifted.x as i32, shifted.y as i32)
}

/// Chebyshev distance between two cells
pub fn cell_distance(a: CellCoord, b: CellCoord) -> i32 {
    (a.0 - b.0).abs().max((a.1 - b.1).abs())
}
