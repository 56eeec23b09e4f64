//! Obstacles: gates and airplanes
//!
//! Gates are walls with a gap that ride the terrain scroll; airplanes fly on
//! their own velocity and ignore it. Spawning speeds up in discrete tiers as
//! the run goes on. Passing close to an obstacle without touching it pays a
//! near-miss bonus, once per obstacle.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::tuning::ObstacleTuning;

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Full-height wall with a safe gap between `gap_y` and `gap_y + gap_height`
    Gate { gap_y: f32, gap_height: f32 },
    /// Free flyer moving by its own velocity each frame
    Airplane { velocity: Vec2 },
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    /// Cleared once it leaves the play area
    pub active: bool,
    /// Near-miss already evaluated
    pub scored: bool,
}

impl Obstacle {
    pub fn gate(x: f32, width: f32, gap_y: f32, gap_height: f32) -> Self {
        Self {
            id: 0,
            kind: ObstacleKind::Gate { gap_y, gap_height },
            pos: Vec2::new(x, 0.0),
            size: Vec2::new(width, SCREEN_HEIGHT),
            active: true,
            scored: false,
        }
    }

    pub fn airplane(pos: Vec2, size: Vec2, velocity: Vec2) -> Self {
        Self {
            id: 0,
            kind: ObstacleKind::Airplane { velocity },
            pos,
            size,
            active: true,
            scored: false,
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, self.size)
    }

    /// Solid parts of the obstacle (a gate has one bar above and one below its gap)
    pub fn hit_rects(&self) -> impl Iterator<Item = Rect> {
        let rects = match self.kind {
            ObstacleKind::Gate { gap_y, gap_height } => {
                let bottom = gap_y + gap_height;
                [
                    Some(Rect::new(Vec2::new(self.pos.x, 0.0), Vec2::new(self.size.x, gap_y))),
                    Some(Rect::new(
                        Vec2::new(self.pos.x, bottom),
                        Vec2::new(self.size.x, (SCREEN_HEIGHT - bottom).max(0.0)),
                    )),
                ]
            }
            ObstacleKind::Airplane { .. } => [Some(self.bounds()), None],
        };
        rects.into_iter().flatten()
    }

    /// Move one frame
    fn advance(&mut self, scroll_speed: f32) {
        match self.kind {
            ObstacleKind::Gate { .. } => self.pos.x -= scroll_speed,
            ObstacleKind::Airplane { velocity } => self.pos += velocity,
        }
    }

    /// Obstacle is at or behind the skier column
    fn passed(&self, skier_pos: Vec2) -> bool {
        match self.kind {
            ObstacleKind::Gate { .. } => self.pos.x < skier_pos.x,
            // Airplanes once their center is behind the skier
            ObstacleKind::Airplane { .. } => self.pos.x < skier_pos.x - self.size.x / 2.0,
        }
    }

    /// Skier slipped by within `threshold`
    fn near_miss(&self, skier_pos: Vec2, threshold: f32) -> bool {
        match self.kind {
            ObstacleKind::Gate { gap_y, gap_height } => {
                let to_top = skier_pos.y - gap_y;
                let to_bottom = gap_y + gap_height - skier_pos.y;
                to_top > 0.0 && to_bottom > 0.0 && (to_top < threshold || to_bottom < threshold)
            }
            ObstacleKind::Airplane { .. } => skier_pos.distance(self.bounds().center()) < threshold,
        }
    }
}

/// Result of one obstacle frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObstacleReport {
    /// Skier hit something this frame
    pub collision: bool,
    /// Sum of near-miss bonuses earned this frame
    pub near_miss_bonus: f32,
    /// Obstacles that paid a bonus this frame
    pub near_misses: Vec<u32>,
}

/// Spawns, moves, scores and prunes obstacles
#[derive(Debug, Clone)]
pub struct ObstacleManager {
    obstacles: Vec<Obstacle>,
    /// Frames since the last spawn
    spawn_timer: u32,
    /// Frames since the run started
    elapsed: u64,
    spawned_total: u64,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleManager {
    pub fn new(seed: u64) -> Self {
        Self {
            obstacles: Vec::new(),
            spawn_timer: 0,
            elapsed: 0,
            spawned_total: 0,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Drop every obstacle and restart the difficulty clock (RNG keeps going)
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.spawn_timer = 0;
        self.elapsed = 0;
    }

    /// Live obstacles in spawn order
    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Every obstacle ever spawned, including pruned ones
    pub fn spawned_total(&self) -> u64 {
        self.spawned_total
    }

    /// Add an obstacle, assigning it a fresh id
    pub fn push(&mut self, mut obstacle: Obstacle) {
        obstacle.id = self.next_entity_id();
        self.obstacles.push(obstacle);
        self.spawned_total += 1;
    }

    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Advance one frame against the skier at `skier_pos`
    pub fn update(&mut self, scroll_speed: f32, skier_pos: Vec2, tuning: &ObstacleTuning) -> ObstacleReport {
        self.elapsed += 1;
        self.spawn_timer += 1;

        if self.spawn_timer >= tuning.spawn_interval(self.elapsed) {
            self.spawn_timer = 0;
            self.spawn(tuning);
        }

        let mut report = ObstacleReport::default();
        let skier = Rect::centered(skier_pos, Vec2::splat(tuning.skier_hitbox));

        for o in &mut self.obstacles {
            o.advance(scroll_speed);

            let hit = o.hit_rects().any(|r| r.overlaps(&skier));
            report.collision |= hit;

            if !o.scored && o.passed(skier_pos) {
                o.scored = true;
                if !hit && o.near_miss(skier_pos, tuning.near_miss_distance) {
                    report.near_miss_bonus += tuning.near_miss_bonus;
                    report.near_misses.push(o.id);
                }
            }

            o.active = in_play_area(o.pos, tuning);
        }

        self.obstacles.retain(|o| o.active);
        report
    }

    fn spawn(&mut self, tuning: &ObstacleTuning) {
        let airplane = self.elapsed > tuning.airplane_unlock_frames && self.rng.random_ratio(1, tuning.airplane_odds);

        let obstacle = if airplane {
            let y = self.rng.random_range(tuning.airplane_y.clone());
            let speed = self.rng.random_range(tuning.airplane_speed.clone());
            let drift = self.rng.random_range(tuning.airplane_drift.clone());
            Obstacle::airplane(
                Vec2::new(SCREEN_WIDTH + tuning.airplane_spawn_offset, y),
                Vec2::splat(tuning.airplane_size),
                Vec2::new(-speed, drift),
            )
        } else {
            let gap_y = self.rng.random_range(tuning.gate_gap_y.clone());
            Obstacle::gate(
                SCREEN_WIDTH + tuning.gate_spawn_offset,
                tuning.gate_width,
                gap_y,
                tuning.gate_gap_height,
            )
        };

        log::debug!("Spawn {:?} at frame {}", obstacle.kind, self.elapsed);
        self.push(obstacle);
    }
}

/// Inside the viewport grown by the off-screen margins
fn in_play_area(pos: Vec2, tuning: &ObstacleTuning) -> bool {
    pos.x > -tuning.offscreen_left
        && pos.x < SCREEN_WIDTH + tuning.offscreen_right
        && pos.y > -tuning.offscreen_top
        && pos.y < SCREEN_HEIGHT + tuning.offscreen_bottom
}
