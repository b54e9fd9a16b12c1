//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed 60 Hz timestep (`FrameClock` absorbs display frame rate)
//! - Seeded RNG only (callers pass `&mut impl Rng`)
//! - No rendering or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{DEFAULT_PADDING_X, DEFAULT_PADDING_Y, check_collision, check_collision_padded};
pub use difficulty::{RampCurve, difficulty_ramp, next_game_speed};
pub use physics::{jump, tick_quantum, update_dino_physics};
pub use spawn::{
    create_obstacle, create_power_up, obstacle_spacing, should_spawn_obstacle,
    should_spawn_power_up,
};
pub use state::{
    Dino, GameEvent, GameObject, GamePhase, GameState, Obstacle, ObstacleKind, PowerUp,
    PowerUpKind, Rect,
};
pub use tick::{FrameClock, TickInput, tick};
