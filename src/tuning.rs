//! Data-driven game balance
//!
//! Every physics constant and obstacle range lives here so a JSON file can
//! override them without a rebuild. Defaults come from [`crate::consts`].

use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Skier physics and scroll speed balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsTuning {
    pub gravity: f32,
    pub terminal_velocity: f32,
    pub base_scroll_speed: f32,
    pub min_scroll_speed: f32,
    pub max_scroll_speed: f32,
    pub slope_accel_factor: f32,
    pub friction: f32,
    pub launch_factor: f32,
    pub jump_factor: f32,
    pub uphill_jump_factor: f32,
    pub rotation_smoothing: f32,
    pub smooth_landing_threshold: f32,
    pub smooth_landing_bonus: f32,
    pub rough_landing_penalty: f32,
}

impl Default for PhysicsTuning {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            terminal_velocity: TERMINAL_VELOCITY,
            base_scroll_speed: BASE_SCROLL_SPEED,
            min_scroll_speed: MIN_SCROLL_SPEED,
            max_scroll_speed: MAX_SCROLL_SPEED,
            slope_accel_factor: SLOPE_ACCEL_FACTOR,
            friction: FRICTION,
            launch_factor: LAUNCH_FACTOR,
            jump_factor: JUMP_FACTOR,
            uphill_jump_factor: UPHILL_JUMP_FACTOR,
            rotation_smoothing: ROTATION_SMOOTHING,
            smooth_landing_threshold: SMOOTH_LANDING_THRESHOLD,
            smooth_landing_bonus: SMOOTH_LANDING_BONUS,
            rough_landing_penalty: ROUGH_LANDING_PENALTY,
        }
    }
}

impl PhysicsTuning {
    /// Clamp a scroll speed to the configured bounds
    #[inline]
    pub fn clamp_speed(&self, speed: f32) -> f32 {
        speed.clamp(self.min_scroll_speed, self.max_scroll_speed)
    }

    /// Scroll speed a run begins at
    pub fn starting_speed(&self) -> f32 {
        self.clamp_speed(self.base_scroll_speed)
    }
}

/// One difficulty step: from `after_frames` on, spawn every `interval` frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpawnTier {
    pub after_frames: u64,
    pub interval: u32,
}

/// Obstacle spawning, geometry and near-miss balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTuning {
    /// Sorted by `after_frames`, highest first
    pub spawn_tiers: Vec<SpawnTier>,
    pub airplane_unlock_frames: u64,
    pub airplane_odds: u32,

    pub gate_width: f32,
    pub gate_gap_height: f32,
    pub gate_gap_y: RangeInclusive<f32>,
    pub gate_spawn_offset: f32,

    pub airplane_size: f32,
    pub airplane_y: RangeInclusive<f32>,
    /// Leftward speed; the sign is applied at spawn
    pub airplane_speed: RangeInclusive<f32>,
    pub airplane_drift: RangeInclusive<f32>,
    pub airplane_spawn_offset: f32,

    pub skier_hitbox: f32,
    pub near_miss_distance: f32,
    pub near_miss_bonus: f32,

    pub offscreen_left: f32,
    pub offscreen_right: f32,
    pub offscreen_top: f32,
    pub offscreen_bottom: f32,
}

impl Default for ObstacleTuning {
    fn default() -> Self {
        Self {
            spawn_tiers: SPAWN_TIERS
                .iter()
                .map(|&(after_frames, interval)| SpawnTier { after_frames, interval })
                .collect(),
            airplane_unlock_frames: AIRPLANE_UNLOCK_FRAMES,
            airplane_odds: AIRPLANE_ODDS,
            gate_width: GATE_WIDTH,
            gate_gap_height: GATE_GAP_HEIGHT,
            gate_gap_y: GATE_GAP_Y_MIN..=GATE_GAP_Y_MAX,
            gate_spawn_offset: GATE_SPAWN_OFFSET,
            airplane_size: AIRPLANE_SIZE,
            airplane_y: AIRPLANE_Y_MIN..=AIRPLANE_Y_MAX,
            airplane_speed: AIRPLANE_SPEED_MIN..=AIRPLANE_SPEED_MAX,
            airplane_drift: -AIRPLANE_DRIFT..=AIRPLANE_DRIFT,
            airplane_spawn_offset: AIRPLANE_SPAWN_OFFSET,
            skier_hitbox: SKIER_HITBOX,
            near_miss_distance: NEAR_MISS_DISTANCE,
            near_miss_bonus: NEAR_MISS_BONUS,
            offscreen_left: OFFSCREEN_LEFT,
            offscreen_right: OFFSCREEN_RIGHT,
            offscreen_top: OFFSCREEN_TOP,
            offscreen_bottom: OFFSCREEN_BOTTOM,
        }
    }
}

impl ObstacleTuning {
    /// Frames between spawns once `elapsed` frames have passed
    pub fn spawn_interval(&self, elapsed: u64) -> u32 {
        self.spawn_tiers
            .iter()
            .find(|tier| elapsed >= tier.after_frames)
            .or(self.spawn_tiers.last())
            .map(|tier| tier.interval)
            .unwrap_or(u32::MAX)
    }
}

/// Distance score balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreTuning {
    pub airborne_multiplier: f32,
    pub fall_margin: f32,
}

impl Default for ScoreTuning {
    fn default() -> Self {
        Self {
            airborne_multiplier: AIRBORNE_SCORE_MULTIPLIER,
            fall_margin: FALL_MARGIN,
        }
    }
}

/// Complete balance sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    pub physics: PhysicsTuning,
    pub obstacles: ObstacleTuning,
    pub scoring: ScoreTuning,
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) if tuning.is_valid() => Some(tuning),
            Ok(_) => {
                log::warn!("Tuning rejected: inconsistent ranges");
                None
            }
            Err(e) => {
                log::warn!("Tuning parse error: {}", e);
                None
            }
        }
    }

    /// Load tuning from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => {
                if let Some(tuning) = Self::from_json(&json) {
                    log::info!("Loaded tuning from {}", path.display());
                    return tuning;
                }
            }
            Err(e) => log::info!("No tuning at {} ({}), using defaults", path.display(), e),
        }
        Self::default()
    }

    /// Ranges must be non-empty, speed bounds ordered and the starting speed inside them
    pub fn is_valid(&self) -> bool {
        let p = &self.physics;
        let o = &self.obstacles;
        let range_ok = |r: &RangeInclusive<f32>| r.start() <= r.end();

        p.min_scroll_speed > 0.0
            && p.min_scroll_speed <= p.max_scroll_speed
            && (p.min_scroll_speed..=p.max_scroll_speed).contains(&p.base_scroll_speed)
            && !o.spawn_tiers.is_empty()
            && o.spawn_tiers.iter().all(|t| t.interval > 0)
            && o.spawn_tiers.windows(2).all(|w| w[0].after_frames >= w[1].after_frames)
            && o.airplane_odds > 0
            && range_ok(&o.gate_gap_y)
            && range_ok(&o.airplane_y)
            && range_ok(&o.airplane_speed)
            && range_ok(&o.airplane_drift)
    }
}
