//! Obstacle and power-up spawning
//!
//! Obstacles use a spacing policy: the next one appears at the right edge
//! once the previous one has moved far enough in. Faster play widens the
//! gap. Power-ups use a jittered cooldown and never overlap each other.

use rand::Rng;

use super::difficulty::difficulty_ramp;
use super::state::{Obstacle, ObstacleKind, PowerUp, PowerUpKind};
use crate::clamp;
use crate::consts::MIN_OBSTACLE_SPEED;

const BASE_SPACING: f32 = 260.0;
const SPACING_PER_SPEED: f32 = 12.0;
const SPACING_SPEED_MIN: f32 = 4.0;
const SPACING_SPEED_MAX: f32 = 24.0;

const BIRD_CHANCE_BASE: f32 = 0.15;
const BIRD_CHANCE_PER_RAMP: f32 = 0.12;
const BIRD_CHANCE_MAX: f32 = 0.5;
/// Bird altitudes above the ground line
const BIRD_LIFTS: [f32; 3] = [70.0, 110.0, 150.0];

const BIRD_SIZE: (f32, f32) = (50.0, 40.0);
const CACTUS_SIZE: (f32, f32) = (40.0, 50.0);

const POWER_UP_COOLDOWN_MS: f32 = 20_000.0;
const POWER_UP_JITTER_MS: f32 = 6_000.0;
const QUANTUM_CHANCE: f64 = 0.65;
const POWER_UP_LIFTS: [f32; 3] = [40.0, 90.0, 140.0];
const POWER_UP_SIZE: f32 = 34.0;

/// Desired horizontal gap between successive obstacles at `game_speed`
pub fn obstacle_spacing(game_speed: f32) -> f32 {
    BASE_SPACING + clamp(game_speed, SPACING_SPEED_MIN, SPACING_SPEED_MAX) * SPACING_PER_SPEED
}

/// Whether a new obstacle should enter at the right edge this frame
///
/// The first obstacle always spawns immediately.
pub fn should_spawn_obstacle(canvas_width: f32, last_obstacle_x: Option<f32>, game_speed: f32) -> bool {
    match last_obstacle_x {
        None => true,
        Some(x) => x < canvas_width - obstacle_spacing(game_speed),
    }
}

/// Build an obstacle just off the right edge
///
/// Birds get more likely as the ramp climbs.
pub fn create_obstacle<R: Rng + ?Sized>(
    rng: &mut R,
    canvas_width: f32,
    ground_y: f32,
    game_speed: f32,
    elapsed_ms: f32,
) -> Obstacle {
    let ramp = difficulty_ramp(elapsed_ms);

    let bird_chance = clamp(
        BIRD_CHANCE_BASE + ramp * BIRD_CHANCE_PER_RAMP,
        BIRD_CHANCE_BASE,
        BIRD_CHANCE_MAX,
    );
    let is_bird = rng.random::<f32>() < bird_chance;

    let (kind, (width, height), y) = if is_bird {
        let lift = BIRD_LIFTS[rng.random_range(0..BIRD_LIFTS.len())];
        (ObstacleKind::Bird, BIRD_SIZE, ground_y - lift)
    } else {
        (ObstacleKind::Cactus, CACTUS_SIZE, ground_y)
    };

    let speed = (game_speed + ramp * 0.8).floor().max(MIN_OBSTACLE_SPEED);

    Obstacle {
        x: canvas_width,
        y,
        width,
        height,
        kind,
        speed,
        active: true,
    }
}

/// Whether a power-up should spawn this frame
///
/// Never while one is already on the field. Otherwise spawns once the time
/// since the last one beats a freshly drawn `random·20s + random·6s`.
pub fn should_spawn_power_up<R: Rng + ?Sized>(
    rng: &mut R,
    elapsed_ms: f32,
    last_power_up_ms: f32,
    active_power_ups: usize,
) -> bool {
    if active_power_ups > 0 {
        return false;
    }
    let threshold =
        rng.random::<f32>() * POWER_UP_COOLDOWN_MS + rng.random::<f32>() * POWER_UP_JITTER_MS;
    elapsed_ms - last_power_up_ms > threshold
}

/// Build a power-up just off the right edge
pub fn create_power_up<R: Rng + ?Sized>(rng: &mut R, canvas_width: f32, ground_y: f32) -> PowerUp {
    let kind = if rng.random_bool(QUANTUM_CHANCE) {
        PowerUpKind::Quantum
    } else {
        PowerUpKind::Health
    };
    let lift = POWER_UP_LIFTS[rng.random_range(0..POWER_UP_LIFTS.len())];

    PowerUp {
        x: canvas_width,
        y: ground_y - lift,
        width: POWER_UP_SIZE,
        height: POWER_UP_SIZE,
        kind,
    }
}
