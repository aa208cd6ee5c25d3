pub mod bounds;
pub mod collision;
pub mod engine;
pub mod integrator;
pub mod params;
pub mod pointer;
pub mod simulation;
pub mod spatial;

pub use bounds::Boundary;
pub use collision::{resolve_collision, resolve_collisions, CollisionStats, FORWARD_NEIGHBORS};
pub use engine::{Particle, BASE_OPACITY, MAX_OPACITY};
pub use integrator::{integrate, integrate_particle};
pub use params::{ConfigError, ParamRange, SimulationParameters};
pub use pointer::{PointerMode, PointerState};
pub use simulation::{FrameStats, Simulation};
pub use spatial::{CellCoord, SpatialGrid};
