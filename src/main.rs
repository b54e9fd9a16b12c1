//! Quantum Dino entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively
//! this runs a headless autopilot session, useful for tuning.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(12345u64);
    let max_frames = args.next().and_then(|s| s.parse().ok()).unwrap_or(60 * 60 * 5u64);

    log::info!("Quantum Dino (native) autopilot, seed {seed}, up to {max_frames} frames");

    let mut state = quantum_dino::sim::GameState::new(seed);
    let mut stats = Stats::default();
    while !state.is_over() && state.frames < max_frames {
        let input = autopilot(&state);
        // One loop iteration is one fixed tick
        quantum_dino::sim::tick(&mut state, &input);
        stats.record(&state.drain_events());
    }

    println!(
        "seed {seed}: score {} in {} ({} frames), lives {}, speed {:.2}",
        state.score(),
        quantum_dino::highscores::format_survival(f64::from(state.elapsed_ms)),
        state.frames,
        state.lives,
        state.game_speed
    );
    let settings = quantum_dino::Settings::load();
    let mut board = quantum_dino::HighScores::load();
    if let Some(rank) = board.record_run(
        &settings,
        state.score(),
        f64::from(state.elapsed_ms),
        quantum_dino::platform::now_ms(),
    ) {
        log::info!("Run ranks #{rank} on the leaderboard");
    }

    println!(
        "jumps {}, obstacles {}, power-ups {}/{} collected, hits {}, phased {}",
        stats.jumps, stats.obstacles, stats.collected, stats.power_ups, stats.hits, stats.phased
    );
}

/// Jump when the nearest ground obstacle ahead is within reach
#[cfg(not(target_arch = "wasm32"))]
fn autopilot(state: &quantum_dino::sim::GameState) -> quantum_dino::sim::TickInput {
    use quantum_dino::sim::ObstacleKind;

    let dino = &state.dino;
    let reach = state.game_speed * 14.0;
    let threat = state
        .obstacles
        .iter()
        .filter(|o| o.kind == ObstacleKind::Cactus || o.y + o.height > dino.y - 20.0)
        .filter(|o| o.x + o.width > dino.x)
        .any(|o| o.x - (dino.x + dino.width) < reach);

    quantum_dino::sim::TickInput {
        jump: threat && !dino.is_quantum,
        ..Default::default()
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[derive(Default)]
struct Stats {
    jumps: u32,
    obstacles: u32,
    power_ups: u32,
    collected: u32,
    hits: u32,
    phased: u32,
}

#[cfg(not(target_arch = "wasm32"))]
impl Stats {
    fn record(&mut self, events: &[quantum_dino::sim::GameEvent]) {
        use quantum_dino::sim::GameEvent;
        for event in events {
            match event {
                GameEvent::Jumped => self.jumps += 1,
                GameEvent::ObstacleSpawned(_) => self.obstacles += 1,
                GameEvent::PowerUpSpawned(_) => self.power_ups += 1,
                GameEvent::PowerUpCollected(_) => self.collected += 1,
                GameEvent::Hit { .. } => self.hits += 1,
                GameEvent::PhasedThrough => self.phased += 1,
                GameEvent::Landed | GameEvent::GameOver { .. } => {}
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::start, this is just to satisfy the compiler
}
