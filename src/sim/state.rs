//! Game state and core simulation types
//!
//! Entities are plain axis-aligned rectangles in canvas pixels. `y` is the
//! entity's anchor row: the dino and cacti rest at `y == GROUND_Y`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// Right edge x coordinate
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }
}

/// Anything with a bounding box
pub trait GameObject {
    fn bounds(&self) -> Rect;
}

impl GameObject for Rect {
    fn bounds(&self) -> Rect {
        *self
    }
}

/// The player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dino {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub velocity_y: f32,
    pub is_jumping: bool,
    /// Quantum phasing: obstacles pass through harmlessly
    pub is_quantum: bool,
    /// Remaining phasing time (ms)
    pub quantum_timer: f32,
}

impl Dino {
    /// A grounded dino at the default position
    pub fn new(ground_y: f32) -> Self {
        Self {
            x: DINO_X,
            y: ground_y,
            width: DINO_WIDTH,
            height: DINO_HEIGHT,
            velocity_y: 0.0,
            is_jumping: false,
            is_quantum: false,
            quantum_timer: 0.0,
        }
    }
}

impl GameObject for Dino {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Cactus,
    Bird,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: ObstacleKind,
    /// Leftward pixels per frame, fixed at spawn
    pub speed: f32,
    pub active: bool,
}

impl GameObject for Obstacle {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    Quantum,
    Health,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUp {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub kind: PowerUpKind,
}

impl GameObject for PowerUp {
    fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Macro state of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    Running,
    Paused,
    /// Out of lives
    Ended,
}

/// Things that happened during a tick, for audio/HUD/toasts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Jumped,
    Landed,
    ObstacleSpawned(ObstacleKind),
    PowerUpSpawned(PowerUpKind),
    PowerUpCollected(PowerUpKind),
    /// Obstacle passed through while quantum
    PhasedThrough,
    /// Obstacle hit; carries lives left
    Hit { lives: u8 },
    GameOver { score: u64 },
}

/// Complete state of one run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub dino: Dino,
    /// In spawn order; the last one is the most recently spawned
    pub obstacles: Vec<Obstacle>,
    pub power_ups: Vec<PowerUp>,
    pub game_speed: f32,
    pub elapsed_ms: f32,
    pub last_power_up_ms: f32,
    /// Distance travelled in pixels, plus phasing bonuses
    pub distance: f32,
    pub lives: u8,
    pub frames: u64,
    events: Vec<GameEvent>,
}

impl GameState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Running,
            dino: Dino::new(GROUND_Y),
            obstacles: Vec::new(),
            power_ups: Vec::new(),
            game_speed: INITIAL_GAME_SPEED,
            elapsed_ms: 0.0,
            last_power_up_ms: 0.0,
            distance: 0.0,
            lives: START_LIVES,
            frames: 0,
            events: Vec::new(),
        }
    }

    /// Throw away the current run and start over
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting run (seed {seed})");
        *self = Self::new(seed);
    }

    /// Displayed score
    pub fn score(&self) -> u64 {
        (self.distance / 10.0).max(0.0) as u64
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::Ended
    }

    /// x of the most recently spawned obstacle still on the field
    pub fn last_obstacle_x(&self) -> Option<f32> {
        self.obstacles.last().map(|o| o.x)
    }

    pub(crate) fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
