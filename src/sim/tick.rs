//! Fixed timestep simulation tick
//!
//! `tick` advances exactly one 60 Hz frame. `FrameClock` turns variable
//! display frame times into whole ticks so jump arcs and scroll speeds do
//! not depend on the refresh rate.

use super::collision::check_collision;
use super::difficulty::next_game_speed;
use super::physics::{jump, tick_quantum, update_dino_physics};
use super::spawn::{create_obstacle, create_power_up, should_spawn_obstacle, should_spawn_power_up};
use super::state::{GameEvent, GamePhase, GameState, PowerUpKind};
use crate::consts::*;

/// Input commands for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump (space/up/tap). Ignored while airborne.
    pub jump: bool,
    /// Pause toggle
    pub pause: bool,
}

/// Accumulates display frame time and runs whole simulation ticks
///
/// One-shot inputs stay queued until a tick consumes them, so a jump
/// pressed on a short 144 Hz frame is not lost.
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    pending: TickInput,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `input` and run as many ticks as `dt_ms` covers; returns the count
    pub fn advance(&mut self, state: &mut GameState, input: &TickInput, dt_ms: f32) -> u32 {
        self.pending.jump |= input.jump;
        self.pending.pause |= input.pause;

        // First rAF frames can hand us NaN
        if !dt_ms.is_finite() {
            return 0;
        }
        self.accumulator += dt_ms.clamp(0.0, MAX_FRAME_MS);

        let mut substeps = 0;
        while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
            let input = std::mem::take(&mut self.pending);
            tick(state, &input);
            self.accumulator -= FRAME_MS;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(FRAME_MS);
        }
        substeps
    }

    /// Drop queued time and input (on restart)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Advance the run by one fixed `FRAME_MS` frame
pub fn tick(state: &mut GameState, input: &TickInput) {
    if input.pause {
        match state.phase {
            GamePhase::Running => {
                state.phase = GamePhase::Paused;
                log::debug!("Paused at {:.0} ms", state.elapsed_ms);
                return;
            }
            GamePhase::Paused => state.phase = GamePhase::Running,
            GamePhase::Ended => {}
        }
    }

    if state.phase != GamePhase::Running {
        return;
    }

    let dt_ms = FRAME_MS;
    // Speed and scroll formulas are per 60 Hz frame
    let dt = 1.0;

    state.frames += 1;
    state.elapsed_ms += dt_ms;
    state.game_speed = next_game_speed(
        state.game_speed,
        dt,
        state.elapsed_ms,
        GAME_SPEED_INCREMENT,
        DIFFICULTY_ACCELERATION,
    );
    state.distance += state.game_speed * dt;

    spawn_entities(state);

    // Player
    if input.jump {
        let before = state.dino;
        state.dino = jump(&state.dino, JUMP_VELOCITY);
        if state.dino.is_jumping && !before.is_jumping {
            state.push_event(GameEvent::Jumped);
        }
    }
    let before = state.dino;
    state.dino = update_dino_physics(&state.dino, GRAVITY, GROUND_Y);
    if before.is_jumping && !state.dino.is_jumping {
        state.push_event(GameEvent::Landed);
    }
    state.dino = tick_quantum(&state.dino, dt_ms);

    // Scroll the field
    let game_speed = state.game_speed;
    for obstacle in &mut state.obstacles {
        obstacle.x -= obstacle.speed * dt;
        if obstacle.x + obstacle.width < 0.0 {
            obstacle.active = false;
        }
    }
    state.obstacles.retain(|o| o.active);
    for power_up in &mut state.power_ups {
        power_up.x -= game_speed * dt;
    }
    state.power_ups.retain(|p| p.x + p.width >= 0.0);

    resolve_collisions(state);
}

fn spawn_entities(state: &mut GameState) {
    if should_spawn_obstacle(CANVAS_WIDTH, state.last_obstacle_x(), state.game_speed) {
        let obstacle = create_obstacle(
            &mut state.rng,
            CANVAS_WIDTH,
            GROUND_Y,
            state.game_speed,
            state.elapsed_ms,
        );
        log::debug!(
            "Spawned {:?} at y={} speed={}",
            obstacle.kind,
            obstacle.y,
            obstacle.speed
        );
        state.push_event(GameEvent::ObstacleSpawned(obstacle.kind));
        state.obstacles.push(obstacle);
    }

    if should_spawn_power_up(
        &mut state.rng,
        state.elapsed_ms,
        state.last_power_up_ms,
        state.power_ups.len(),
    ) {
        let power_up = create_power_up(&mut state.rng, CANVAS_WIDTH, GROUND_Y);
        log::debug!("Spawned {:?} power-up at y={}", power_up.kind, power_up.y);
        state.last_power_up_ms = state.elapsed_ms;
        state.push_event(GameEvent::PowerUpSpawned(power_up.kind));
        state.power_ups.push(power_up);
    }
}

fn resolve_collisions(state: &mut GameState) {
    // Pickups first so a quantum grab can save the same frame
    let dino = state.dino;
    let (collected, remaining): (Vec<_>, Vec<_>) = std::mem::take(&mut state.power_ups)
        .into_iter()
        .partition(|p| check_collision(&dino, p));
    state.power_ups = remaining;

    for power_up in collected {
        match power_up.kind {
            PowerUpKind::Quantum => {
                state.dino.is_quantum = true;
                state.dino.quantum_timer = QUANTUM_DURATION_MS;
            }
            PowerUpKind::Health => {
                state.lives = (state.lives + 1).min(MAX_LIVES);
            }
        }
        state.push_event(GameEvent::PowerUpCollected(power_up.kind));
    }

    let dino = state.dino;
    let mut hits = 0u8;
    let mut phased = 0u32;
    for obstacle in state.obstacles.iter_mut().filter(|o| o.active) {
        if !check_collision(&dino, &*obstacle) {
            continue;
        }
        obstacle.active = false;
        if dino.is_quantum {
            phased += 1;
        } else {
            hits += 1;
        }
    }
    state.obstacles.retain(|o| o.active);

    for _ in 0..phased {
        state.distance += PHASE_BONUS;
        state.push_event(GameEvent::PhasedThrough);
    }

    for _ in 0..hits {
        state.lives = state.lives.saturating_sub(1);
        state.push_event(GameEvent::Hit { lives: state.lives });
        if state.lives == 0 {
            state.phase = GamePhase::Ended;
            let score = state.score();
            log::info!(
                "Run over: score {} after {:.1}s (seed {})",
                score,
                state.elapsed_ms / 1000.0,
                state.seed
            );
            state.push_event(GameEvent::GameOver { score });
            break;
        }
    }
}
