//! Player physics
//!
//! Every function takes the dino by reference and returns the next value,
//! so callers can compare before/after to detect transitions (landing,
//! quantum expiry).

use super::state::Dino;

/// Apply one frame of gravity and resolve ground contact.
///
/// Gravity is a positive (downward) acceleration per frame. Only `y`,
/// `velocity_y` and `is_jumping` change.
pub fn update_dino_physics(dino: &Dino, gravity: f32, ground_y: f32) -> Dino {
    let mut next = *dino;
    next.velocity_y += gravity;
    next.y += next.velocity_y;
    if next.y >= ground_y {
        next.y = ground_y;
        next.velocity_y = 0.0;
        next.is_jumping = false;
    }
    next
}

/// Start a jump if grounded; airborne dinos are returned unchanged
pub fn jump(dino: &Dino, jump_velocity: f32) -> Dino {
    if dino.is_jumping {
        return *dino;
    }
    Dino {
        velocity_y: jump_velocity,
        is_jumping: true,
        ..*dino
    }
}

/// Count the quantum timer down by `dt_ms`, clearing phasing when it runs out
pub fn tick_quantum(dino: &Dino, dt_ms: f32) -> Dino {
    if !dino.is_quantum {
        return *dino;
    }
    let remaining = dino.quantum_timer - dt_ms;
    if remaining <= 0.0 {
        Dino {
            is_quantum: false,
            quantum_timer: 0.0,
            ..*dino
        }
    } else {
        Dino {
            quantum_timer: remaining,
            ..*dino
        }
    }
}
