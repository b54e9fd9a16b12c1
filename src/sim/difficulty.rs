//! Difficulty ramp and game speed
//!
//! The ramp is a dimensionless multiplier (>= 1) derived only from elapsed
//! run time. Spawning and speed both scale with it.

/// Sigmoid slope (per second)
const SIGMOID_K: f32 = 0.0015;
/// Sigmoid midpoint (seconds)
const SIGMOID_MIDPOINT_S: f32 = 180.0;
/// Sigmoid span above 1.0
const SIGMOID_SPAN: f32 = 2.5;

/// Linear ramp: +1 per minute...
const LINEAR_MS_PER_STEP: f32 = 60_000.0;
/// ...capped at +4
const LINEAR_MAX_STEPS: f32 = 4.0;

/// Ramp policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RampCurve {
    /// `1 + 2.5·σ(k·(t − x0))`, approaches 3.5 smoothly
    #[default]
    Sigmoid,
    /// `1 + min(4, ms / 60000)`, hard cap at 5
    Linear,
}

impl RampCurve {
    pub fn ramp(self, elapsed_ms: f32) -> f32 {
        match self {
            RampCurve::Sigmoid => {
                let t = elapsed_ms / 1000.0;
                let sigmoid = 1.0 / (1.0 + (-SIGMOID_K * (t - SIGMOID_MIDPOINT_S)).exp());
                1.0 + sigmoid * SIGMOID_SPAN
            }
            RampCurve::Linear => 1.0 + (elapsed_ms / LINEAR_MS_PER_STEP).min(LINEAR_MAX_STEPS),
        }
    }

    /// Upper bound of `ramp` for non-negative input
    pub fn max_ramp(self) -> f32 {
        match self {
            RampCurve::Sigmoid => 1.0 + SIGMOID_SPAN,
            RampCurve::Linear => 1.0 + LINEAR_MAX_STEPS,
        }
    }
}

/// Difficulty ramp used by the game (sigmoid)
#[inline]
pub fn difficulty_ramp(elapsed_ms: f32) -> f32 {
    RampCurve::Sigmoid.ramp(elapsed_ms)
}

/// Advance game speed by one (frame-scaled) step
///
/// `dt` is in frames (1.0 at 60 Hz). Non-decreasing for non-negative
/// constants and `dt`.
pub fn next_game_speed(
    game_speed: f32,
    dt: f32,
    elapsed_ms: f32,
    speed_increment: f32,
    acceleration: f32,
) -> f32 {
    let ramp = difficulty_ramp(elapsed_ms);
    game_speed
        + speed_increment * dt * (0.4 + ramp * 0.35)
        + acceleration * dt * ramp * 0.25
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sigmoid_midpoint() {
        // Half the span at three minutes
        let r = difficulty_ramp(180_000.0);
        assert!((r - 2.25).abs() < 1e-4);
    }

    #[test]
    fn test_linear_cap() {
        assert_eq!(RampCurve::Linear.ramp(0.0), 1.0);
        assert!((RampCurve::Linear.ramp(60_000.0) - 2.0).abs() < 1e-6);
        assert_eq!(RampCurve::Linear.ramp(10.0 * 60_000.0), 5.0);
    }

    #[test]
    fn test_speed_grows() {
        let mut speed = 6.0;
        let mut elapsed = 0.0;
        for _ in 0..600 {
            let next = next_game_speed(speed, 1.0, elapsed, 0.001, 0.0005);
            assert!(next > speed);
            speed = next;
            elapsed += 1000.0 / 60.0;
        }
        assert!(speed < 8.0, "ten seconds should not double the speed: {speed}");
    }

    #[test]
    fn test_speed_zero_dt_is_stationary() {
        assert_eq!(next_game_speed(7.5, 0.0, 90_000.0, 0.001, 0.0005), 7.5);
    }

    proptest! {
        #[test]
        fn prop_ramp_monotonic(t1 in 0u32..7_200_000, dt in 0u32..600_000) {
            let a = t1 as f32;
            let b = (t1 + dt) as f32;
            prop_assert!(difficulty_ramp(b) >= difficulty_ramp(a));
            prop_assert!(RampCurve::Linear.ramp(b) >= RampCurve::Linear.ramp(a));
        }

        #[test]
        fn prop_ramp_bounded(t in 0.0f32..1.0e9) {
            for curve in [RampCurve::Sigmoid, RampCurve::Linear] {
                let r = curve.ramp(t);
                prop_assert!(r >= 1.0);
                prop_assert!(r <= curve.max_ramp());
            }
        }

        #[test]
        fn prop_speed_non_decreasing(speed in 0.0f32..50.0, dt in 0.0f32..6.0, t in 0.0f32..1.0e7) {
            prop_assert!(next_game_speed(speed, dt, t, 0.001, 0.0005) >= speed);
        }
    }
}
