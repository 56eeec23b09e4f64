//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` per frame)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod obstacle;
pub mod segment;
pub mod skier;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::Rect;
pub use obstacle::{Obstacle, ObstacleKind, ObstacleManager, ObstacleReport};
pub use segment::{SegmentId, TerrainSegment};
pub use skier::{Skier, SkierState, SkierTransition};
pub use state::{GameEvent, GamePhase, GameState};
pub use terrain::{PointerInput, Terrain};
pub use tick::{TickInput, tick};
