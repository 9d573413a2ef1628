//! Decision Wheel - a spinning wheel that picks one of N choices
//!
//! Core modules:
//! - `sim`: Deterministic spin simulation (segments, physics tick, pointer resolution)
//! - `settings`: Suspense presets and physics tunables
//! - `tally`: Per-label result statistics for fairness checks

pub mod settings;
pub mod sim;
pub mod tally;

pub use settings::{SettingsError, SpinSettings, SuspenseLevel, TurnRange};
pub use tally::ResultTally;

use glam::DVec2;

/// Wheel configuration constants
pub mod consts {
    use std::f64::consts::FRAC_PI_2;

    /// Pointer direction in wheel coordinates (straight up on a y-down canvas)
    pub const POINTER_ANGLE: f64 = -FRAC_PI_2;

    /// Segment count bounds
    pub const MIN_SEGMENTS: usize = 2;
    pub const MAX_SEGMENTS: usize = 8;
    /// Longest label kept (chars)
    pub const MAX_LABEL_CHARS: usize = 50;

    /// Initial spin impulse (radians per tick)
    pub const BASE_IMPULSE: f64 = 0.08;
    /// Random bonus on top of the impulse, as a fraction of it (0 to 40%)
    pub const IMPULSE_VARIATION: f64 = 0.4;

    /// Per-tick decay while cruising toward the target turn count
    pub const CRUISE_DECAY: f64 = 0.9999;
    /// Symmetric jitter applied to the cruise decay (decay + jitter stays <= 1)
    pub const CRUISE_JITTER: f64 = 0.0001;
    /// Upper clamp for a jittered cruise factor; cruising never speeds the wheel up
    pub const MAX_CRUISE_FACTOR: f64 = 1.0;
    /// Light friction applied in the buffer window after the target
    pub const BUFFER_DECAY: f64 = 0.992;
    /// Length of the buffer window (turns)
    pub const BUFFER_TURNS: f64 = 1.5;

    /// Friction coefficient for the final spin-down
    pub const FRICTION: f64 = 0.982;
    /// Symmetric jitter applied to the friction coefficient
    pub const FRICTION_JITTER: f64 = 0.0015;
    /// Upper clamp for a jittered friction coefficient (must stay below 1)
    pub const MAX_EFFECTIVE_FRICTION: f64 = 0.9995;

    /// Velocity below which the wheel is considered stopped
    pub const MIN_VELOCITY: f64 = 0.0008;
    /// Velocity that maps to full motion-blur intensity
    pub const MAX_VELOCITY: f64 = 0.8;
    /// Hard tick budget per spin (~200 s at 60 Hz)
    pub const MAX_SPIN_TICKS: u32 = 12_000;

    /// Default target turn range
    pub const DEFAULT_MIN_TURNS: f64 = 4.0;
    pub const DEFAULT_MAX_TURNS: f64 = 8.0;
    /// Narrowest allowed turn range. The random target has to cover at least a
    /// full turn or the resting angle depends on where the spin started.
    pub const MIN_TURN_SPREAD: f64 = 1.0;

    /// Display refresh used by the paced frame clock
    pub const FRAME_RATE: f64 = 60.0;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(std::f64::consts::TAU)
}

/// Normalize a signed angle difference to (-π, π]
#[inline]
pub fn wrap_signed(mut angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    if !angle.is_finite() {
        return angle;
    }
    while angle > PI {
        angle -= TAU;
    }
    while angle <= -PI {
        angle += TAU;
    }
    angle
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}
