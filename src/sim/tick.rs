//! Per-frame simulation step
//!
//! Order matters: terrain scrolls with last frame's speed, the skier turns
//! the terrain under it into this frame's speed, and the obstacles move with
//! that new speed.

use serde::{Deserialize, Serialize};

use super::skier::SkierTransition;
use super::state::{GameEvent, GamePhase, GameState};
use super::terrain::PointerInput;
use crate::consts::SCREEN_HEIGHT;

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// Draw button and pointer
    pub pointer: PointerInput,
    /// Jump went down this frame
    pub jump: bool,
}

/// Advance the game state by one frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.events.clear();

    if state.phase == GamePhase::GameOver {
        if input.pointer.pressed {
            state.reset();
            state.events.push(GameEvent::Restarted);
            log::info!("Run restarted");
        }
        return;
    }

    state.time_ticks += 1;

    if let Some(id) = state.terrain.update(&input.pointer, state.scroll_speed) {
        state.events.push(GameEvent::SegmentStarted { id });
    }

    state.scroll_speed =
        state
            .skier
            .update(&state.terrain, state.scroll_speed, input.jump, &state.tuning.physics);
    match state.skier.transition {
        Some(SkierTransition::Launched { .. }) => state.events.push(GameEvent::Launched),
        Some(SkierTransition::Jumped { .. }) => state.events.push(GameEvent::Jumped),
        Some(SkierTransition::Landed { smooth }) => state.events.push(GameEvent::Landed { smooth }),
        None => {}
    }

    let report = state
        .obstacles
        .update(state.scroll_speed, state.skier.pos, &state.tuning.obstacles);
    let per_obstacle = state.tuning.obstacles.near_miss_bonus;
    for &obstacle_id in &report.near_misses {
        state.events.push(GameEvent::NearMiss {
            obstacle_id,
            bonus: per_obstacle,
        });
    }

    state.score += report.near_miss_bonus;
    let distance = state.speed_ratio();
    state.score += if state.skier.on_terrain() {
        distance
    } else {
        distance * state.tuning.scoring.airborne_multiplier
    };

    let fell = state.skier.pos.y > SCREEN_HEIGHT + state.tuning.scoring.fall_margin;
    if fell {
        state.events.push(GameEvent::FellOff);
    }
    if report.collision {
        state.events.push(GameEvent::Crashed);
    }
    if fell || report.collision {
        game_over(state);
    }
}

fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    let score = state.score_display();
    let new_record = state.high_score.submit(score);
    log::info!(
        "Game over at frame {}: score {} (best {}{})",
        state.time_ticks,
        score,
        state.high_score.best,
        if new_record { ", new record" } else { "" }
    );
    state.events.push(GameEvent::GameOver { score, new_record });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::highscores::HighScore;
    use crate::sim::obstacle::Obstacle;
    use crate::sim::skier::SkierState;
    use crate::tuning::Tuning;
    use glam::Vec2;

    fn new_state() -> GameState {
        GameState::new(12345, Tuning::default(), HighScore::default())
    }

    fn flat_ground(state: &mut GameState, y: f32) {
        state
            .terrain
            .push_points(vec![Vec2::new(0.0, y), Vec2::new(SCREEN_WIDTH, y)]);
    }

    #[test]
    fn test_skier_lands_and_scores() {
        let mut state = new_state();
        flat_ground(&mut state, 500.0);

        let mut landing = None;
        for _ in 0..120 {
            tick(&mut state, &TickInput::default());
            landing = landing.or(state.events.iter().find_map(|e| match e {
                GameEvent::Landed { smooth } => Some(*smooth),
                _ => None,
            }));
            if state.skier.on_terrain() {
                break;
            }
        }
        // A 480 px drop arrives far steeper than flat ground
        assert_eq!(landing, Some(false));
        assert_eq!(state.skier.pos.y, 500.0);
        assert!(state.scroll_speed < BASE_SCROLL_SPEED);
        assert!(state.score > 0.0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_airborne_scores_double() {
        let mut state = new_state();
        tick(&mut state, &TickInput::default());
        assert!((state.score - 2.0).abs() < 1e-6);

        let mut state = new_state();
        flat_ground(&mut state, SKIER_SPAWN_Y);
        state.skier.state = SkierState::OnTerrain;
        tick(&mut state, &TickInput::default());
        assert!((state.score - state.speed_ratio()).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_base_speed_starts_clamped() {
        let mut tuning = Tuning::default();
        tuning.physics.base_scroll_speed = 100.0;
        let mut state = GameState::new(1, tuning, HighScore::default());
        assert_eq!(state.scroll_speed, MAX_SCROLL_SPEED);

        // Airborne frames pass the speed through untouched
        tick(&mut state, &TickInput::default());
        assert!(state.scroll_speed <= MAX_SCROLL_SPEED);

        state.reset();
        assert_eq!(state.scroll_speed, MAX_SCROLL_SPEED);
    }

    #[test]
    fn test_fall_below_screen_ends_run() {
        let mut state = GameState::new(1, Tuning::default(), HighScore::new(3));
        state.score = 41.7;
        state.skier.pos.y = SCREEN_HEIGHT + FALL_MARGIN;
        state.skier.velocity_y = 5.0;

        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::FellOff));
        assert!(state.events.contains(&GameEvent::GameOver {
            score: 43,
            new_record: true
        }));
        assert_eq!(state.high_score.best, 43);
    }

    #[test]
    fn test_lower_score_keeps_record() {
        let mut state = GameState::new(1, Tuning::default(), HighScore::new(1000));
        state.skier.pos.y = SCREEN_HEIGHT + 500.0;
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());
        assert_eq!(state.high_score.best, 1000);
    }

    #[test]
    fn test_collision_ends_run() {
        let mut state = new_state();
        state
            .obstacles
            .push(Obstacle::gate(SKIER_X + 5.0, GATE_WIDTH, 600.0, GATE_GAP_HEIGHT));
        tick(&mut state, &TickInput::default());
        assert!(state.events.contains(&GameEvent::Crashed));
        assert!(state.is_over());
    }

    #[test]
    fn test_game_over_is_frozen_until_press() {
        let mut state = new_state();
        state.skier.pos.y = SCREEN_HEIGHT + 500.0;
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());

        let frozen_ticks = state.time_ticks;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, frozen_ticks);
        assert!(state.events.is_empty());

        let press = TickInput {
            pointer: PointerInput {
                pos: Vec2::new(100.0, 100.0),
                pressed: true,
                down: true,
                released: false,
            },
            jump: false,
        };
        tick(&mut state, &press);
        assert_eq!(state.events, vec![GameEvent::Restarted]);
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0.0);
        assert_eq!(state.scroll_speed, BASE_SCROLL_SPEED);
        assert_eq!(state.skier.pos, Vec2::new(SKIER_X, SKIER_SPAWN_Y));
        // The restart press does not also start a slope
        assert!(state.terrain.segments().is_empty());
    }

    #[test]
    fn test_drawing_emits_segment_started() {
        let mut state = new_state();
        let press = TickInput {
            pointer: PointerInput {
                pos: Vec2::new(800.0, 600.0),
                pressed: true,
                down: true,
                released: false,
            },
            jump: false,
        };
        tick(&mut state, &press);
        assert!(matches!(state.events[0], GameEvent::SegmentStarted { .. }));
        assert_eq!(state.terrain.segments().len(), 1);
    }

    #[test]
    fn test_scroll_speed_feeds_obstacles() {
        let mut state = new_state();
        flat_ground(&mut state, SKIER_SPAWN_Y);
        state.skier.state = SkierState::OnTerrain;
        state
            .obstacles
            .push(Obstacle::gate(1000.0, GATE_WIDTH, 0.0, SCREEN_HEIGHT - 10.0));
        tick(&mut state, &TickInput::default());
        let gate_x = state.obstacles.obstacles()[0].pos.x;
        assert!((gate_x - (1000.0 - state.scroll_speed)).abs() < 1e-4);
    }
}
