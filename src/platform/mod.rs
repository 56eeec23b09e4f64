//! Platform abstraction layer
//!
//! The simulation only ever sees one [`TickInput`] per frame and is only ever
//! looked at through a [`Presenter`]. Windowing, audio and real pointer
//! devices plug in behind these two traits; the headless runner uses the
//! scripted and logging versions below.

use std::collections::VecDeque;

use glam::Vec2;

use crate::sim::{GameEvent, GameState, PointerInput, TickInput};

/// Produces the input for each frame
pub trait InputSource {
    /// Input for the next frame
    fn next_input(&mut self) -> TickInput;

    /// Nothing more will ever be pressed
    fn is_exhausted(&self) -> bool {
        false
    }
}

/// Receives the state after every frame
pub trait Presenter {
    fn present(&mut self, state: &GameState);
}

/// Pre-recorded input, one entry per frame, idle once it runs out
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
    /// Where the pointer was last seen, so idle frames don't teleport it
    pointer_pos: Vec2,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames left in the script
    pub fn remaining(&self) -> usize {
        self.frames.len()
    }

    /// Do nothing for `frames` frames
    pub fn wait(mut self, frames: usize) -> Self {
        let idle = self.idle();
        self.frames.extend(std::iter::repeat_n(idle, frames));
        self
    }

    /// Press the draw button for a single frame (restarts after game over)
    pub fn tap(mut self, pos: Vec2) -> Self {
        self.pointer_pos = pos;
        self.frames.push_back(pointer_frame(pos, true, true, false));
        self.frames.push_back(pointer_frame(pos, false, false, true));
        self
    }

    /// Draw one stroke through `points`, one point per frame
    pub fn stroke(mut self, points: &[Vec2]) -> Self {
        let Some((&first, rest)) = points.split_first() else {
            return self;
        };
        self.frames.push_back(pointer_frame(first, true, true, false));
        for &p in rest {
            self.frames.push_back(pointer_frame(p, false, true, false));
        }
        let last = rest.last().copied().unwrap_or(first);
        self.frames.push_back(pointer_frame(last, false, false, true));
        self.pointer_pos = last;
        self
    }

    /// Straight stroke from `from` to `to` split into `steps` drags
    pub fn line(self, from: Vec2, to: Vec2, steps: usize) -> Self {
        let steps = steps.max(1);
        let points: Vec<Vec2> = (0..=steps)
            .map(|i| from.lerp(to, i as f32 / steps as f32))
            .collect();
        self.stroke(&points)
    }

    /// Press jump for one frame
    pub fn jump(mut self) -> Self {
        let mut input = self.idle();
        input.jump = true;
        self.frames.push_back(input);
        self
    }

    fn idle(&self) -> TickInput {
        TickInput {
            pointer: PointerInput {
                pos: self.pointer_pos,
                ..Default::default()
            },
            jump: false,
        }
    }
}

fn pointer_frame(pos: Vec2, pressed: bool, down: bool, released: bool) -> TickInput {
    TickInput {
        pointer: PointerInput {
            pos,
            pressed,
            down,
            released,
        },
        jump: false,
    }
}

impl InputSource for ScriptedInput {
    fn next_input(&mut self) -> TickInput {
        self.frames.pop_front().unwrap_or_else(|| self.idle())
    }

    fn is_exhausted(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Presenter that writes a status line to the log
#[derive(Debug, Clone)]
pub struct LogPresenter {
    /// Frames between status lines
    pub every: u64,
    frames: u64,
}

impl LogPresenter {
    pub fn new(every: u64) -> Self {
        Self {
            every: every.max(1),
            frames: 0,
        }
    }
}

impl Presenter for LogPresenter {
    fn present(&mut self, state: &GameState) {
        self.frames += 1;

        for event in &state.events {
            match event {
                GameEvent::NearMiss { bonus, .. } => log::info!("Near miss! +{}", bonus),
                GameEvent::Landed { smooth: false } => log::info!("Rough landing"),
                GameEvent::Crashed => log::info!("Crashed into an obstacle"),
                GameEvent::FellOff => log::info!("Fell off the mountain"),
                other => log::debug!("{:?}", other),
            }
        }

        if self.frames % self.every == 0 {
            log::info!(
                "frame {:>5} | score {:>6} | best {:>6} | speed {:>5.1} | y {:>6.1} {:?} | {} obstacle(s)",
                state.time_ticks,
                state.score_display(),
                state.high_score.best,
                state.scroll_speed,
                state.skier.pos.y,
                state.skier.state,
                state.obstacles.obstacles().len(),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stroke_presses_drags_releases() {
        let mut input = ScriptedInput::new().line(Vec2::new(100.0, 100.0), Vec2::new(300.0, 200.0), 4);
        assert_eq!(input.remaining(), 6);

        let first = input.next_input();
        assert!(first.pointer.pressed && first.pointer.down);
        for _ in 0..4 {
            let drag = input.next_input();
            assert!(!drag.pointer.pressed && drag.pointer.down);
        }
        let last = input.next_input();
        assert!(last.pointer.released && !last.pointer.down);
        assert_eq!(last.pointer.pos, Vec2::new(300.0, 200.0));
        assert!(input.is_exhausted());
    }

    #[test]
    fn test_idle_after_script() {
        let mut input = ScriptedInput::new().jump().wait(2);
        assert!(input.next_input().jump);
        let a = input.next_input();
        let b = input.next_input();
        assert_eq!(a, b);
        let idle = input.next_input();
        assert!(!idle.jump && !idle.pointer.pressed);
    }
}
