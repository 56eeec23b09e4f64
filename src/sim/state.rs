//! Game state and session-level types
//!
//! One `GameState` owns everything that changes during a run. `tick` is the
//! only writer; renderers read it between ticks.

use serde::{Deserialize, Serialize};

use super::obstacle::ObstacleManager;
use super::segment::SegmentId;
use super::skier::Skier;
use super::terrain::Terrain;
use crate::highscores::HighScore;
use crate::tuning::Tuning;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active run
    Playing,
    /// Run ended; a draw press starts the next one
    GameOver,
}

/// Notable things that happened during a tick (for audio/HUD collaborators)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SegmentStarted { id: SegmentId },
    /// Ran off the end of a slope
    Launched,
    Jumped,
    Landed { smooth: bool },
    NearMiss { obstacle_id: u32, bonus: f32 },
    /// Hit an obstacle
    Crashed,
    /// Dropped below the bottom of the screen
    FellOff,
    GameOver { score: u64, new_record: bool },
    Restarted,
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Obstacle RNG seed
    pub seed: u64,
    pub phase: GamePhase,
    /// Frames simulated this run
    pub time_ticks: u64,
    pub terrain: Terrain,
    pub skier: Skier,
    pub obstacles: ObstacleManager,
    /// World scroll speed, fed back into every mover next frame
    pub scroll_speed: f32,
    /// Accumulated score; displayed truncated
    pub score: f32,
    pub high_score: HighScore,
    pub tuning: Tuning,
    /// Events from the most recent tick
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64, tuning: Tuning, high_score: HighScore) -> Self {
        Self {
            seed,
            phase: GamePhase::Playing,
            time_ticks: 0,
            terrain: Terrain::new(),
            skier: Skier::new(),
            obstacles: ObstacleManager::new(seed),
            scroll_speed: tuning.physics.starting_speed(),
            score: 0.0,
            high_score,
            tuning,
            events: Vec::new(),
        }
    }

    /// Start a fresh run, keeping the high score and tuning
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.time_ticks = 0;
        self.terrain.clear();
        self.skier.reset();
        self.obstacles.reset();
        self.scroll_speed = self.tuning.physics.starting_speed();
        self.score = 0.0;
    }

    /// Score as shown to the player
    pub fn score_display(&self) -> u64 {
        self.score.max(0.0) as u64
    }

    /// Scroll speed relative to the starting speed (parallax layers scale by this)
    pub fn speed_ratio(&self) -> f32 {
        self.scroll_speed / self.tuning.physics.base_scroll_speed
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
