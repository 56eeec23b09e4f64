//! Slope Rider - draw the mountain, ride the mountain
//!
//! Core modules:
//! - `sim`: Frame simulation (terrain, skier physics, obstacles, game state)
//! - `session`: Session controller wiring the sim to a high score store
//! - `platform`: Input/presentation seams for the windowing layer
//! - `persistence`: High score storage
//! - `tuning`: Data-driven game balance

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use highscores::HighScore;
pub use session::Session;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Viewport dimensions (screen space, Y grows downward)
    pub const SCREEN_WIDTH: f32 = 1920.0;
    pub const SCREEN_HEIGHT: f32 = 1080.0;

    /// Skier is pinned to this screen column; the world scrolls past it
    pub const SKIER_X: f32 = 400.0;
    pub const SKIER_SPAWN_Y: f32 = 20.0;
    /// Side length of the square skier hit box
    pub const SKIER_HITBOX: f32 = 48.0;

    /// Per-frame downward acceleration while airborne
    pub const GRAVITY: f32 = 0.5;
    pub const TERMINAL_VELOCITY: f32 = 30.0;

    /// Scroll speed (pixels per frame)
    pub const BASE_SCROLL_SPEED: f32 = 18.0;
    pub const MIN_SCROLL_SPEED: f32 = 6.0;
    pub const MAX_SCROLL_SPEED: f32 = 55.0;

    pub const SLOPE_ACCEL_FACTOR: f32 = 0.35;
    pub const FRICTION: f32 = 0.003;
    /// Run-off launch: vy = sin(exit angle) * speed * LAUNCH_FACTOR
    pub const LAUNCH_FACTOR: f32 = 1.2;
    pub const JUMP_FACTOR: f32 = 0.8;
    /// Extra kick when jumping off an uphill ramp
    pub const UPHILL_JUMP_FACTOR: f32 = 0.5;
    /// Exponential smoothing factor for airborne tilt
    pub const ROTATION_SMOOTHING: f32 = 0.1;

    /// Max |approach - slope| angle (radians) for a smooth landing
    pub const SMOOTH_LANDING_THRESHOLD: f32 = 0.5;
    pub const SMOOTH_LANDING_BONUS: f32 = 1.1;
    pub const ROUGH_LANDING_PENALTY: f32 = 0.95;

    /// Obstacle spawn tiers: (frames elapsed, frames between spawns)
    pub const SPAWN_TIERS: [(u64, u32); 4] = [(7200, 60), (3600, 120), (1800, 200), (0, 300)];
    /// Airplanes join the mix once this many frames have elapsed
    pub const AIRPLANE_UNLOCK_FRAMES: u64 = 1800;
    /// 1-in-N chance of an airplane per spawn once unlocked
    pub const AIRPLANE_ODDS: u32 = 3;

    pub const GATE_WIDTH: f32 = 40.0;
    pub const GATE_GAP_HEIGHT: f32 = 150.0;
    pub const GATE_GAP_Y_MIN: f32 = 200.0;
    pub const GATE_GAP_Y_MAX: f32 = 800.0;
    pub const GATE_SPAWN_OFFSET: f32 = 20.0;

    pub const AIRPLANE_SIZE: f32 = 80.0;
    pub const AIRPLANE_Y_MIN: f32 = 100.0;
    pub const AIRPLANE_Y_MAX: f32 = 800.0;
    pub const AIRPLANE_SPEED_MIN: f32 = 3.0;
    pub const AIRPLANE_SPEED_MAX: f32 = 8.0;
    pub const AIRPLANE_DRIFT: f32 = 2.0;
    pub const AIRPLANE_SPAWN_OFFSET: f32 = 40.0;

    pub const NEAR_MISS_DISTANCE: f32 = 80.0;
    pub const NEAR_MISS_BONUS: f32 = 50.0;

    /// Obstacles are dropped once they leave the viewport grown by these margins
    pub const OFFSCREEN_LEFT: f32 = 100.0;
    pub const OFFSCREEN_RIGHT: f32 = 180.0;
    pub const OFFSCREEN_TOP: f32 = 200.0;
    pub const OFFSCREEN_BOTTOM: f32 = 220.0;

    /// Game over once the skier drops this far below the viewport
    pub const FALL_MARGIN: f32 = 64.0;
    /// Score multiplier while airborne
    pub const AIRBORNE_SCORE_MULTIPLIER: f32 = 2.0;
}

/// Linear interpolation between `a` and `b`
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

