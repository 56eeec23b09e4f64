//! Session controller
//!
//! Wraps a [`GameState`] with the store its high score came from. The
//! simulation raises the record in memory; the session writes it back, once
//! per run that sets one.

use crate::highscores::HighScore;
use crate::persistence::ScoreStore;
use crate::platform::{InputSource, Presenter};
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;

/// How a headless run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames stepped, including frozen game-over frames
    pub frames: u64,
    /// Final displayed score of the last run
    pub score: u64,
    pub high_score: u64,
    /// Some run in this session set a record
    pub new_record: bool,
}

pub struct Session<S: ScoreStore> {
    state: GameState,
    store: S,
}

impl<S: ScoreStore> Session<S> {
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Self {
        let high_score = HighScore::load(&store);
        log::info!("New session (seed {}, best {})", seed, high_score.best);
        Self {
            state: GameState::new(seed, tuning, high_score),
            store,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Step one frame and persist a new record if this frame set one
    pub fn frame(&mut self, input: &TickInput) -> &[GameEvent] {
        tick(&mut self.state, input);

        let new_record = self
            .state
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::GameOver { new_record: true, .. }));
        if new_record {
            self.state.high_score.save(&mut self.store);
        }

        &self.state.events
    }

    /// Drive the session until the run ends with no more scripted input, or
    /// `max_frames` have passed.
    pub fn run(&mut self, input: &mut impl InputSource, presenter: &mut impl Presenter, max_frames: u64) -> RunSummary {
        let mut frames = 0;
        let mut new_record = false;
        let mut last_score = 0;

        while frames < max_frames {
            let tick_input = input.next_input();
            for event in self.frame(&tick_input) {
                if let GameEvent::GameOver { score, new_record: record } = *event {
                    last_score = score;
                    new_record |= record;
                }
            }
            presenter.present(&self.state);
            frames += 1;

            if self.state.is_over() && input.is_exhausted() {
                break;
            }
        }

        if !self.state.is_over() {
            last_score = self.state.score_display();
        }

        RunSummary {
            frames,
            score: last_score,
            high_score: self.state.high_score.best,
            new_record,
        }
    }
}
