//! The rectangle particles live in.

use glam::Vec2;

/// Axis-aligned rectangle centered at the origin, sized to the viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    width: f32,
    height: f32,
}

impl Boundary {
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }

    /// Largest absolute coordinate a particle center may reach on each axis.
    ///
    /// Floored at zero so a particle wider than the box sits at the center
    /// instead of oscillating between inverted limits.
    pub fn limits(&self, radius: f32) -> Vec2 {
        (self.half_extents() - Vec2::splat(radius)).max(Vec2::ZERO)
    }

    /// Distance from the pointer within which particles feel it
    pub fn interaction_radius(&self) -> f32 {
        self.width.min(self.height)
    }

    pub fn contains(&self, pos: Vec2, radius: f32) -> bool {
        let limits = self.limits(radius);
        pos.x.abs() <= limits.x && pos.y.abs() <= limits.y
    }
}
