//! Quantum Dino - dashboard arcade core
//!
//! Core modules:
//! - `sim`: Deterministic side-scroller simulation (physics, spawning, difficulty)
//! - `store`: Local CRUD stores for projects, tasks, quick links and writeups
//! - `app`: Owned application state (derived views, notifications)
//! - `platform`: Browser/native platform abstraction
//! - `settings` / `highscores`: Persisted preferences and leaderboard

pub mod app;
pub mod highscores;
pub mod notify;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod store;

pub use app::AppState;
pub use highscores::HighScores;
pub use settings::{Settings, Theme};

/// Game configuration constants
pub mod consts {
    /// Simulation tick duration (60 Hz). Per-frame tunables are expressed per tick.
    pub const FRAME_MS: f32 = 1000.0 / 60.0;
    /// Largest frame delta accepted by the frame clock (tab switches, debugger stops)
    pub const MAX_FRAME_MS: f32 = 100.0;
    /// Maximum ticks per display frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Play field dimensions (canvas pixels)
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 300.0;
    pub const GROUND_Y: f32 = 250.0;

    /// Dino placement and size
    pub const DINO_X: f32 = 50.0;
    pub const DINO_WIDTH: f32 = 44.0;
    pub const DINO_HEIGHT: f32 = 47.0;

    /// Downward acceleration per frame (pixels/frame²)
    pub const GRAVITY: f32 = 0.8;
    /// Initial vertical velocity of a jump (negative is up)
    pub const JUMP_VELOCITY: f32 = -15.0;

    /// Speed at the start of a run (pixels/frame)
    pub const INITIAL_GAME_SPEED: f32 = 6.0;
    pub const GAME_SPEED_INCREMENT: f32 = 0.001;
    pub const DIFFICULTY_ACCELERATION: f32 = 0.0005;

    /// Minimum obstacle speed at creation
    pub const MIN_OBSTACLE_SPEED: f32 = 3.0;

    /// Quantum phasing duration after picking up a quantum power-up
    pub const QUANTUM_DURATION_MS: f32 = 5000.0;
    /// Distance bonus for phasing through an obstacle
    pub const PHASE_BONUS: f32 = 500.0;

    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;
}

/// Clamp `v` into `[lo, hi]`.
///
/// Unlike `f32::clamp` this never panics when `lo > hi`; the upper bound wins.
#[inline]
pub fn clamp(v: f32, lo: f32, hi: f32) -> f32 {
    v.max(lo).min(hi)
}
