//! Slope Rider entry point
//!
//! Runs a scripted headless session: draws a few slopes, rides them, and
//! keeps the best score on disk. A windowed front end drives the same
//! `Session` through its own `InputSource` and `Presenter`.

#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

#[cfg(not(target_arch = "wasm32"))]
use glam::Vec2;

#[cfg(not(target_arch = "wasm32"))]
use slope_rider::persistence::FileScoreStore;
#[cfg(not(target_arch = "wasm32"))]
use slope_rider::platform::{LogPresenter, ScriptedInput};
#[cfg(not(target_arch = "wasm32"))]
use slope_rider::{Session, Settings, Tuning};

/// A long downhill under the skier, a jump off its end, then a landing ramp
#[cfg(not(target_arch = "wasm32"))]
fn demo_script() -> ScriptedInput {
    ScriptedInput::new()
        .line(Vec2::new(300.0, 200.0), Vec2::new(1900.0, 650.0), 40)
        .wait(30)
        .jump()
        .wait(20)
        .line(Vec2::new(1000.0, 700.0), Vec2::new(1900.0, 900.0), 30)
        .wait(120)
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Slope Rider (headless) starting...");

    let settings = Settings::load(Path::new(Settings::FILE_NAME));
    let tuning = Tuning::load(&settings.tuning_path);
    let seed = settings.effective_seed();
    let store = FileScoreStore::new(&settings.high_score_path);

    let mut session = Session::new(seed, tuning, store);
    let mut input = demo_script();
    let mut presenter = LogPresenter::new(60);

    let summary = session.run(&mut input, &mut presenter, settings.max_frames);
    log::info!(
        "Finished after {} frames: score {}, best {}{}",
        summary.frames,
        summary.score,
        summary.high_score,
        if summary.new_record { " (new record)" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // No headless runner in the browser; a web front end drives `Session` itself
}
