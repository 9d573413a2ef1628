//! Wheel state and core simulation types
//!
//! A [`Wheel`] is the single owner of the segment set, the resting angle and the
//! live spin. Callers hold it by value and drive it through `&mut`, which is what
//! keeps ticks from overlapping and limits the wheel to one spin at a time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::segment::SegmentSet;
use crate::normalize_angle;
use crate::settings::SpinSettings;

/// Current phase of a spin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpinPhase {
    /// No spin running; `spin()` is accepted
    #[default]
    Idle,
    /// Sustained speed until the target turn count is reached
    Cruising,
    /// Exponential spin-down under friction
    Decelerating,
    /// Velocity fell below the threshold; the outcome is being resolved
    Stopped,
}

impl SpinPhase {
    pub fn is_active(&self) -> bool {
        matches!(self, SpinPhase::Cruising | SpinPhase::Decelerating)
    }
}

/// Source of uniform samples in [0, 1).
///
/// Every random draw a spin makes goes through this, so tests can script them.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;

    /// Uniform sample in [-1, 1)
    fn next_signed(&mut self) -> f64 {
        self.next_unit() * 2.0 - 1.0
    }
}

impl<R: Rng> RandomSource for R {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

/// RNG seed wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Per-spin mutable record; back to `Default` between spins
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpinState {
    pub phase: SpinPhase,
    /// Signed angle travelled since the spin began (radians)
    pub travelled: f64,
    /// Angular velocity (radians per tick)
    pub velocity: f64,
    /// Turn count at which cruising ends, drawn once per spin
    pub target_turns: f64,
    /// Ticks elapsed in this spin
    pub ticks: u32,
}

impl SpinState {
    /// Full turns travelled so far
    #[inline]
    pub fn turns(&self) -> f64 {
        self.travelled.abs() / std::f64::consts::TAU
    }
}

/// The wheel: segments, angle, live spin and physics settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Wheel {
    segments: SegmentSet,
    /// Angle at which the current spin started, in [0, 2π)
    base_rotation: f64,
    spin: SpinState,
    settings: SpinSettings,
}

impl Default for Wheel {
    fn default() -> Self {
        Self::new(SegmentSet::default(), SpinSettings::default())
    }
}

impl Wheel {
    pub fn new(segments: SegmentSet, settings: SpinSettings) -> Self {
        Self {
            segments,
            base_rotation: 0.0,
            spin: SpinState::default(),
            settings,
        }
    }

    /// Build from raw labels (sanitized) with the given settings
    pub fn with_labels<S: AsRef<str>>(labels: &[S], settings: SpinSettings) -> Self {
        Self::new(SegmentSet::from_labels(labels), settings)
    }

    pub fn segments(&self) -> &SegmentSet {
        &self.segments
    }

    pub fn settings(&self) -> &SpinSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SpinSettings {
        &mut self.settings
    }

    pub fn spin_state(&self) -> &SpinState {
        &self.spin
    }

    pub(crate) fn spin_state_mut(&mut self) -> &mut SpinState {
        &mut self.spin
    }

    /// Live spin alongside the settings that drive it
    pub(crate) fn physics_mut(&mut self) -> (&mut SpinState, &SpinSettings) {
        (&mut self.spin, &self.settings)
    }

    pub fn phase(&self) -> SpinPhase {
        self.spin.phase
    }

    pub fn is_spinning(&self) -> bool {
        self.spin.phase != SpinPhase::Idle
    }

    /// Unnormalized wheel angle: resting angle plus this spin's travel
    pub fn raw_rotation(&self) -> f64 {
        self.base_rotation + self.spin.travelled
    }

    /// Wheel angle in [0, 2π) for drawing
    pub fn rotation(&self) -> f64 {
        normalize_angle(self.raw_rotation())
    }

    /// Turns travelled in the current spin (0 when idle)
    pub fn turns(&self) -> f64 {
        self.spin.turns()
    }

    /// Speed as a fraction of `max_velocity`, clamped to [0, 1], for motion blur.
    /// 0 when `max_velocity` is not positive.
    pub fn spin_intensity(&self) -> f64 {
        let max = self.settings.max_velocity;
        if !(max > 0.0) {
            return 0.0;
        }
        (self.spin.velocity.abs() / max).clamp(0.0, 1.0)
    }

    /// Replace the labels.
    ///
    /// While idle the wheel also returns to angle 0. Mid-spin the angle is kept
    /// and the running spin resolves against the new set.
    pub fn set_labels<S: AsRef<str>>(&mut self, labels: &[S]) {
        self.segments = SegmentSet::from_labels(labels);
        if !self.is_spinning() {
            self.base_rotation = 0.0;
        }
        log::debug!("Segments now: {:?}", self.segments.labels().collect::<Vec<_>>());
    }

    /// Start a spin. Returns `false` (and changes nothing) if one is already running.
    pub fn spin<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.is_spinning() {
            log::debug!("Spin ignored: wheel already spinning");
            return false;
        }

        let s = &self.settings;
        let velocity = s.base_impulse + rng.next_unit() * s.base_impulse * s.impulse_variation;
        let target_turns = s.turn_range.lerp(rng.next_unit());

        self.base_rotation = self.rotation();
        self.spin = SpinState {
            phase: SpinPhase::Cruising,
            travelled: 0.0,
            velocity,
            target_turns,
            ticks: 0,
        };

        log::debug!(
            "Spin started: velocity {:.4}, target {:.1} turns",
            velocity,
            target_turns
        );
        true
    }

    /// Fold the finished spin into the resting angle and return to idle
    pub(crate) fn settle(&mut self) {
        self.base_rotation = self.rotation();
        self.spin = SpinState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    /// Always yields the same sample
    struct Constant(f64);

    impl RandomSource for Constant {
        fn next_unit(&mut self) -> f64 {
            self.0
        }
    }

    #[test]
    fn test_spin_initializes_state() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.phase(), SpinPhase::Idle);

        assert!(wheel.spin(&mut Constant(0.5)));
        let spin = wheel.spin_state();
        assert_eq!(spin.phase, SpinPhase::Cruising);
        // 0.08 + 0.5 * 0.08 * 0.4
        assert!((spin.velocity - 0.096).abs() < 1e-12);
        assert!((spin.target_turns - 6.0).abs() < 1e-12);
        assert_eq!(spin.ticks, 0);
    }

    #[test]
    fn test_second_spin_is_ignored() {
        let mut wheel = Wheel::default();
        assert!(wheel.spin(&mut Constant(0.0)));
        let before = wheel.spin_state().clone();

        assert!(!wheel.spin(&mut Constant(0.9)));
        assert_eq!(wheel.spin_state(), &before);
    }

    #[test]
    fn test_pcg_is_a_random_source() {
        let mut a = RngState::new(7).to_rng();
        let mut b = RngState::new(7).to_rng();
        for _ in 0..16 {
            let x = a.next_unit();
            assert!((0.0..1.0).contains(&x));
            assert_eq!(x, b.next_unit());
        }
    }

    #[test]
    fn test_set_labels_while_idle_resets_angle() {
        let mut wheel = Wheel::default();
        wheel.base_rotation = 1.25;
        wheel.set_labels(&["A", "B", "C"]);
        assert_eq!(wheel.segments().len(), 3);
        assert_eq!(wheel.rotation(), 0.0);
    }

    #[test]
    fn test_set_labels_mid_spin_keeps_angle() {
        let mut wheel = Wheel::default();
        wheel.spin(&mut Constant(0.0));
        wheel.spin_state_mut().travelled = 2.0;
        wheel.set_labels(&["A", "B"]);
        assert!(wheel.is_spinning());
        assert!((wheel.rotation() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_spin_start_normalizes_resting_angle() {
        let mut wheel = Wheel::default();
        wheel.base_rotation = 3.0 * TAU + 0.5;
        wheel.spin(&mut Constant(0.0));
        assert!((wheel.raw_rotation() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_spin_intensity_clamped() {
        let mut wheel = Wheel::default();
        assert_eq!(wheel.spin_intensity(), 0.0);
        wheel.spin(&mut Constant(0.0));
        assert!((wheel.spin_intensity() - 0.1).abs() < 1e-12);
        wheel.spin_state_mut().velocity = 5.0;
        assert_eq!(wheel.spin_intensity(), 1.0);
    }

    #[test]
    fn test_spin_intensity_without_max_velocity() {
        let settings = SpinSettings {
            max_velocity: 0.0,
            ..Default::default()
        };
        let mut wheel = Wheel::new(SegmentSet::default(), settings);
        assert_eq!(wheel.spin_intensity(), 0.0);
        wheel.spin(&mut Constant(0.5));
        assert_eq!(wheel.spin_intensity(), 0.0);

        wheel.settings_mut().max_velocity = f64::NAN;
        assert_eq!(wheel.spin_intensity(), 0.0);
    }
}
