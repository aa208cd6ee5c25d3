use glam::Vec2;

/// What the pointer currently does to nearby particles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    #[default]
    None,
    Attract,
    Repel,
}

impl PointerMode {
    pub fn is_active(&self) -> bool {
        !matches!(self, PointerMode::None)
    }
}

/// Pointer snapshot read by the simulation at the start of a frame
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerState {
    /// World coordinates
    pub pos: Vec2,
    pub mode: PointerMode,
}

impl PointerState {
    pub fn new(pos: Vec2, mode: PointerMode) -> Self {
        Self { pos, mode }
    }

    pub fn idle() -> Self {
        Self::default()
    }

    pub fn attract(pos: Vec2) -> Self {
        Self::new(pos, PointerMode::Attract)
    }

    pub fn repel(pos: Vec2) -> Self {
        Self::new(pos, PointerMode::Repel)
    }
}
