//! JS-facing game handle
//!
//! The Svelte canvas component owns the animation loop and rendering; it
//! calls `tick` once per `requestAnimationFrame` with the elapsed time and
//! draws from `frame_json`.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::highscores::HighScores;
use crate::settings::Settings;
use crate::sim::{Dino, FrameClock, GameEvent, GameState, Obstacle, PowerUp, TickInput};

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Quantum Dino core loaded");
}

/// Everything the renderer needs for one frame
#[derive(Serialize)]
struct FrameView<'a> {
    dino: &'a Dino,
    obstacles: &'a [Obstacle],
    power_ups: &'a [PowerUp],
    score: u64,
    lives: u8,
    game_speed: f32,
    elapsed_ms: f32,
    over: bool,
    events: Vec<GameEvent>,
}

#[wasm_bindgen]
pub struct DinoGame {
    state: GameState,
    clock: FrameClock,
    input: TickInput,
    settings: Settings,
    highscores: HighScores,
    recorded: bool,
}

#[wasm_bindgen]
impl DinoGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> DinoGame {
        DinoGame {
            state: GameState::new(u64::from(seed)),
            clock: FrameClock::new(),
            input: TickInput::default(),
            settings: Settings::load(),
            highscores: HighScores::load(),
            recorded: false,
        }
    }

    /// Queue a jump for the next tick
    pub fn jump(&mut self) {
        self.input.jump = true;
    }

    /// Queue a pause toggle for the next tick
    pub fn toggle_pause(&mut self) {
        self.input.pause = true;
    }

    /// Advance by a display frame of `dt_ms`; runs zero or more fixed ticks
    pub fn tick(&mut self, dt_ms: f32) {
        self.clock.advance(&mut self.state, &self.input, dt_ms);
        // One-shot inputs, the clock holds them until a tick runs
        self.input = TickInput::default();

        if self.state.is_over() && !self.recorded {
            self.recorded = true;
            let rank = self.highscores.record_run(
                &self.settings,
                self.state.score(),
                f64::from(self.state.elapsed_ms),
                crate::platform::now_ms(),
            );
            if let Some(rank) = rank {
                log::info!("New high score, rank {rank}");
            }
        }
    }

    /// Serialized [`FrameView`]; drains queued events
    pub fn frame_json(&mut self) -> String {
        let events = self.state.drain_events();
        let view = FrameView {
            dino: &self.state.dino,
            obstacles: &self.state.obstacles,
            power_ups: &self.state.power_ups,
            score: self.state.score(),
            lives: self.state.lives,
            game_speed: self.state.game_speed,
            elapsed_ms: self.state.elapsed_ms,
            over: self.state.is_over(),
            events,
        };
        serde_json::to_string(&view).unwrap_or_else(|e| {
            log::warn!("Frame serialization failed: {e}");
            String::from("{}")
        })
    }

    pub fn restart(&mut self, seed: u32) {
        self.state.restart(u64::from(seed));
        self.clock.reset();
        self.input = TickInput::default();
        // Pick up preference changes made between runs
        self.settings = Settings::load();
        self.recorded = false;
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    /// Best recorded score; f64 keeps u64 scores exact up to 2^53 in JS
    pub fn best_score(&self) -> f64 {
        self.highscores.top_score().map_or(0.0, |s| s as f64)
    }
}
