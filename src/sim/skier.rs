//! Skier physics
//!
//! The skier never moves horizontally; the world scrolls past a fixed screen
//! column instead. What the skier does control is the scroll speed: slopes
//! accelerate or brake it, landings reward or punish it, and the new value is
//! handed back to the caller every frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::terrain::Terrain;
use crate::consts::{SKIER_SPAWN_Y, SKIER_X};
use crate::tuning::PhysicsTuning;

/// Skier contact state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkierState {
    /// Glued to the terrain surface
    OnTerrain,
    /// Ballistic
    Airborne,
}

/// What happened to the skier this frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SkierTransition {
    /// Ran off the end of the terrain
    Launched { velocity_y: f32 },
    /// Jump input while on terrain
    Jumped { velocity_y: f32 },
    /// Touched down; `smooth` when the approach matched the slope
    Landed { smooth: bool },
}

/// The one skier of a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skier {
    pub pos: Vec2,
    pub velocity_y: f32,
    /// Visual tilt; on terrain it is the slope angle and doubles as the take-off angle
    pub rotation: f32,
    pub state: SkierState,
    /// Set by the last `update`
    #[serde(skip)]
    pub transition: Option<SkierTransition>,
}

impl Default for Skier {
    fn default() -> Self {
        Self {
            pos: Vec2::new(SKIER_X, SKIER_SPAWN_Y),
            velocity_y: 0.0,
            rotation: 0.0,
            // Drops onto the first slope drawn under it
            state: SkierState::Airborne,
            transition: None,
        }
    }
}

impl Skier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the spawn point
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn on_terrain(&self) -> bool {
        self.state == SkierState::OnTerrain
    }

    /// Advance one frame. Returns the scroll speed for the rest of this frame
    /// and the next one.
    pub fn update(&mut self, terrain: &Terrain, scroll_speed: f32, jump: bool, tuning: &PhysicsTuning) -> f32 {
        self.transition = None;
        match self.state {
            SkierState::OnTerrain => self.ride(terrain, scroll_speed, jump, tuning),
            SkierState::Airborne => self.fly(terrain, scroll_speed, tuning),
        }
    }

    fn ride(&mut self, terrain: &Terrain, mut speed: f32, jump: bool, tuning: &PhysicsTuning) -> f32 {
        let Some((height, id)) = terrain.height_at(self.pos.x) else {
            // Off the end: keep the exit angle from last frame
            self.velocity_y = self.rotation.sin() * speed * tuning.launch_factor;
            self.state = SkierState::Airborne;
            self.transition = Some(SkierTransition::Launched {
                velocity_y: self.velocity_y,
            });
            log::debug!("Launched off slope end, vy = {:.2}", self.velocity_y);
            return speed;
        };

        let angle = terrain.segment(id).map(|s| s.angle_at(self.pos.x)).unwrap_or(0.0);
        self.pos.y = height;
        self.rotation = angle;

        speed += angle.sin() * tuning.slope_accel_factor * speed;
        speed *= 1.0 - tuning.friction;
        speed = tuning.clamp_speed(speed);

        if jump {
            self.velocity_y = -speed * tuning.jump_factor;
            if angle < 0.0 {
                // Uphill ramp: sin is negative, so this adds lift
                self.velocity_y += angle.sin() * speed * tuning.uphill_jump_factor;
            }
            self.state = SkierState::Airborne;
            self.transition = Some(SkierTransition::Jumped {
                velocity_y: self.velocity_y,
            });
            log::debug!("Jump, vy = {:.2}", self.velocity_y);
        }

        speed
    }

    fn fly(&mut self, terrain: &Terrain, mut speed: f32, tuning: &PhysicsTuning) -> f32 {
        let ground = terrain.height_at(self.pos.x);

        self.velocity_y = (self.velocity_y + tuning.gravity).min(tuning.terminal_velocity);
        self.pos.y += self.velocity_y;

        let target = self.velocity_y.atan2(speed);
        self.rotation += (target - self.rotation) * tuning.rotation_smoothing;

        let Some((height, id)) = ground else {
            return speed;
        };
        if self.pos.y < height || self.velocity_y <= 0.0 {
            return speed;
        }

        let approach = self.velocity_y.atan2(speed);
        self.pos.y = height;
        self.velocity_y = 0.0;
        self.state = SkierState::OnTerrain;

        let slope = terrain.segment(id).map(|s| s.angle_at(self.pos.x)).unwrap_or(0.0);
        let smooth = (slope - approach).abs() < tuning.smooth_landing_threshold;
        if smooth {
            speed *= tuning.smooth_landing_bonus;
        } else {
            speed *= tuning.rough_landing_penalty;
        }
        speed = tuning.clamp_speed(speed);
        self.rotation = slope;
        self.transition = Some(SkierTransition::Landed { smooth });
        log::trace!("Landed (smooth: {}), speed {:.2}", smooth, speed);

        speed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn flat(y: f32) -> Terrain {
        let mut terrain = Terrain::new();
        terrain.push_points(vec![Vec2::new(0.0, y), Vec2::new(1000.0, y)]);
        terrain
    }

    #[test]
    fn test_starts_airborne_and_falls() {
        let mut skier = Skier::new();
        let tuning = PhysicsTuning::default();
        let speed = skier.update(&Terrain::new(), 18.0, false, &tuning);
        assert_eq!(speed, 18.0);
        assert_eq!(skier.state, SkierState::Airborne);
        assert_eq!(skier.velocity_y, tuning.gravity);
        assert_eq!(skier.pos.y, SKIER_SPAWN_Y + tuning.gravity);
    }

    #[test]
    fn test_terminal_velocity() {
        let mut skier = Skier {
            velocity_y: 29.9,
            ..Skier::new()
        };
        let tuning = PhysicsTuning::default();
        skier.update(&Terrain::new(), 18.0, false, &tuning);
        assert_eq!(skier.velocity_y, tuning.terminal_velocity);
    }

    #[test]
    fn test_flat_landing_is_smooth() {
        let terrain = flat(500.0);
        let tuning = PhysicsTuning::default();
        let mut skier = Skier {
            pos: Vec2::new(SKIER_X, 498.0),
            velocity_y: 2.0,
            rotation: 0.3,
            ..Skier::new()
        };

        let speed = skier.update(&terrain, 20.0, false, &tuning);
        assert_eq!(skier.state, SkierState::OnTerrain);
        assert_eq!(skier.pos.y, 500.0);
        assert_eq!(skier.velocity_y, 0.0);
        assert_eq!(skier.rotation, 0.0);
        assert!((speed - 22.0).abs() < 1e-4);
        assert_eq!(skier.transition, Some(SkierTransition::Landed { smooth: true }));
    }

    #[test]
    fn test_steep_dive_is_rough_landing() {
        let terrain = flat(500.0);
        let tuning = PhysicsTuning::default();
        let mut skier = Skier {
            pos: Vec2::new(SKIER_X, 480.0),
            velocity_y: 25.0,
            ..Skier::new()
        };

        let speed = skier.update(&terrain, 10.0, false, &tuning);
        assert_eq!(skier.state, SkierState::OnTerrain);
        assert!((speed - 9.5).abs() < 1e-4);
        assert_eq!(skier.transition, Some(SkierTransition::Landed { smooth: false }));
    }

    #[test]
    fn test_no_landing_while_rising() {
        let terrain = flat(500.0);
        let tuning = PhysicsTuning::default();
        let mut skier = Skier {
            pos: Vec2::new(SKIER_X, 520.0),
            velocity_y: -10.0,
            ..Skier::new()
        };
        skier.update(&terrain, 18.0, false, &tuning);
        assert_eq!(skier.state, SkierState::Airborne);
    }

    #[test]
    fn test_run_off_end_launches_along_exit_angle() {
        let tuning = PhysicsTuning::default();
        let mut terrain = Terrain::new();
        terrain.push_points(vec![Vec2::new(0.0, 500.0), Vec2::new(300.0, 400.0)]);
        let rotation = -0.3;
        let mut skier = Skier {
            pos: Vec2::new(SKIER_X, 400.0),
            rotation,
            state: SkierState::OnTerrain,
            ..Skier::new()
        };

        let speed = skier.update(&terrain, 20.0, false, &tuning);
        assert_eq!(speed, 20.0);
        assert_eq!(skier.state, SkierState::Airborne);
        let expected = rotation.sin() * 20.0 * tuning.launch_factor;
        assert!((skier.velocity_y - expected).abs() < 1e-5);
        assert!(matches!(skier.transition, Some(SkierTransition::Launched { .. })));
    }

    #[test]
    fn test_downhill_accelerates_uphill_brakes() {
        let tuning = PhysicsTuning::default();
        let mut down = Terrain::new();
        down.push_points(vec![Vec2::new(0.0, 100.0), Vec2::new(1000.0, 600.0)]);
        let mut up = Terrain::new();
        up.push_points(vec![Vec2::new(0.0, 600.0), Vec2::new(1000.0, 100.0)]);

        let mut skier = Skier {
            state: SkierState::OnTerrain,
            ..Skier::new()
        };
        let faster = skier.update(&down, 20.0, false, &tuning);
        assert!(faster > 20.0);
        assert_eq!(skier.pos.y, 300.0);
        assert!(skier.rotation > 0.0);

        let mut skier = Skier {
            state: SkierState::OnTerrain,
            ..Skier::new()
        };
        let slower = skier.update(&up, 20.0, false, &tuning);
        assert!(slower < 20.0);
    }

    #[test]
    fn test_jump_with_uphill_bonus() {
        let tuning = PhysicsTuning::default();
        let flat_terrain = flat(500.0);
        let mut skier = Skier {
            state: SkierState::OnTerrain,
            ..Skier::new()
        };
        let speed = skier.update(&flat_terrain, 20.0, true, &tuning);
        assert_eq!(skier.state, SkierState::Airborne);
        assert!((skier.velocity_y + speed * tuning.jump_factor).abs() < 1e-5);
        let flat_vy = skier.velocity_y;

        let mut ramp = Terrain::new();
        ramp.push_points(vec![Vec2::new(0.0, 700.0), Vec2::new(1000.0, 300.0)]);
        let mut skier = Skier {
            state: SkierState::OnTerrain,
            ..Skier::new()
        };
        skier.update(&ramp, 20.0, true, &tuning);
        assert!(skier.velocity_y < flat_vy);
    }

    #[test]
    fn test_airborne_rotation_eases() {
        let tuning = PhysicsTuning::default();
        let mut skier = Skier {
            velocity_y: 10.0,
            ..Skier::new()
        };
        skier.update(&Terrain::new(), 18.0, false, &tuning);
        let target = (10.0 + tuning.gravity).atan2(18.0);
        assert!(skier.rotation > 0.0 && skier.rotation < target);
    }

    proptest! {
        #[test]
        fn prop_speed_stays_in_bounds(
            y0 in 0.0f32..1080.0,
            y1 in 0.0f32..1080.0,
            speed in 6.0f32..55.0,
            vy in -30.0f32..30.0,
            skier_y in 0.0f32..1080.0,
            on_terrain in any::<bool>(),
            jump in any::<bool>(),
        ) {
            let tuning = PhysicsTuning::default();
            let mut terrain = Terrain::new();
            terrain.push_points(vec![Vec2::new(0.0, y0), Vec2::new(800.0, y1)]);
            let mut skier = Skier {
                pos: Vec2::new(SKIER_X, skier_y),
                velocity_y: vy,
                state: if on_terrain { SkierState::OnTerrain } else { SkierState::Airborne },
                ..Skier::new()
            };
            let mut speed = speed;
            for _ in 0..20 {
                speed = skier.update(&terrain, speed, jump, &tuning);
                prop_assert!(speed >= tuning.min_scroll_speed && speed <= tuning.max_scroll_speed);
            }
        }
    }
}
