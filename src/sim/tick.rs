//! Per-frame spin update
//!
//! One call to [`tick`] per display frame. Cruising holds speed until the spin's
//! target turn count, a short buffer of light friction follows, then friction
//! decays the wheel exponentially until it drops under the stop threshold.

use super::resolve::{Outcome, resolve_outcome};
use super::state::{RandomSource, SpinPhase, Wheel};
use crate::consts::{MAX_CRUISE_FACTOR, MAX_EFFECTIVE_FRICTION};

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickResult {
    /// No spin running; the frame clock can stop calling
    Idle,
    /// Still turning
    Spinning { turns: f64, velocity: f64 },
    /// The wheel came to rest on this tick
    Stopped(Outcome),
}

/// Advance the wheel by one frame
pub fn tick<R: RandomSource + ?Sized>(wheel: &mut Wheel, rng: &mut R) -> TickResult {
    if !wheel.phase().is_active() {
        return TickResult::Idle;
    }

    let (spin, settings) = wheel.physics_mut();
    let turns = spin.turns();

    match spin.phase {
        SpinPhase::Cruising => {
            if turns < spin.target_turns {
                // Near-constant speed with a little wobble
                let decay = (settings.cruise_decay + rng.next_signed() * settings.cruise_jitter)
                    .clamp(0.0, MAX_CRUISE_FACTOR);
                spin.velocity *= decay;
            } else if turns < spin.target_turns + settings.buffer_turns {
                spin.velocity *= settings.buffer_decay;
            } else {
                spin.phase = SpinPhase::Decelerating;
                log::debug!("Switching to deceleration after {:.1} turns", turns);
            }
        }
        SpinPhase::Decelerating => {
            let friction = (settings.friction + rng.next_signed() * settings.friction_jitter)
                .clamp(0.0, MAX_EFFECTIVE_FRICTION);
            spin.velocity *= friction;
        }
        SpinPhase::Idle | SpinPhase::Stopped => {}
    }

    spin.travelled += spin.velocity;
    spin.ticks += 1;

    let stalled = spin.velocity.abs() < settings.min_velocity;
    let out_of_budget = spin.ticks >= settings.max_ticks;
    if !(stalled || out_of_budget) {
        return TickResult::Spinning {
            turns: spin.turns(),
            velocity: spin.velocity,
        };
    }

    if !stalled {
        log::warn!(
            "Spin hit the {} tick budget at velocity {:.5}; forcing a stop",
            settings.max_ticks,
            spin.velocity
        );
    }
    spin.phase = SpinPhase::Stopped;
    let (turns, ticks, velocity) = (spin.turns(), spin.ticks, spin.velocity);

    log::info!(
        "Wheel stopped after {:.1} turns ({} ticks, final velocity {:.5})",
        turns,
        ticks,
        velocity
    );

    let outcome = resolve_outcome(wheel.raw_rotation(), wheel.segments(), turns, ticks);
    wheel.settle();
    TickResult::Stopped(outcome)
}

/// Drive the current spin to rest, one tick per iteration.
///
/// Returns `None` if no spin was running.
pub fn run_to_completion<R: RandomSource + ?Sized>(wheel: &mut Wheel, rng: &mut R) -> Option<Outcome> {
    loop {
        match tick(wheel, rng) {
            TickResult::Idle => return None,
            TickResult::Spinning { .. } => {}
            TickResult::Stopped(outcome) => return Some(outcome),
        }
    }
}
