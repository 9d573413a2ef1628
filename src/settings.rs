//! Spin settings and suspense presets
//!
//! Everything here is plain data with serde defaults, so a partial JSON file only
//! overrides the fields it names.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from building or loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("invalid turn range {min}..={max}: need 0 <= min <= max, both finite")]
    InvalidTurnRange { min: f64, max: f64 },
    #[error("turn range {min}..={max} is too narrow: max - min must be at least one turn")]
    NarrowTurnRange { min: f64, max: f64 },
    #[error("cruise_decay + cruise_jitter must not exceed 1, got {decay} + {jitter}")]
    CruiseSpeedsUp { decay: f64, jitter: f64 },
    #[error("{name} must lie strictly between 0 and 1, got {value}")]
    CoefficientOutOfRange { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("max_ticks must be at least 1")]
    ZeroTickBudget,
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Suspense presets: how many turns the wheel cruises before slowing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SuspenseLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl SuspenseLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            SuspenseLevel::Low => "Low",
            SuspenseLevel::Medium => "Medium",
            SuspenseLevel::High => "High",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(SuspenseLevel::Low),
            "medium" | "med" => Some(SuspenseLevel::Medium),
            "high" => Some(SuspenseLevel::High),
            _ => None,
        }
    }

    /// Target turn range for this preset
    pub fn turn_range(&self) -> TurnRange {
        match self {
            SuspenseLevel::Low => TurnRange { min: 3.0, max: 5.0 },
            SuspenseLevel::Medium => TurnRange { min: 6.0, max: 8.0 },
            SuspenseLevel::High => TurnRange { min: 8.0, max: 12.0 },
        }
    }
}

/// Bounds for the per-spin random target turn count
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TurnRange {
    pub min: f64,
    pub max: f64,
}

impl Default for TurnRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TURNS,
            max: DEFAULT_MAX_TURNS,
        }
    }
}

impl TurnRange {
    pub fn new(min: f64, max: f64) -> Result<Self, SettingsError> {
        let range = Self { min, max };
        range.validate()?;
        Ok(range)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.min.is_finite() && self.max.is_finite()) || self.min < 0.0 || self.min > self.max {
            return Err(SettingsError::InvalidTurnRange {
                min: self.min,
                max: self.max,
            });
        }
        if self.max - self.min < MIN_TURN_SPREAD {
            return Err(SettingsError::NarrowTurnRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Map a unit sample in [0, 1) onto the range
    #[inline]
    pub fn lerp(&self, t: f64) -> f64 {
        self.min + t * (self.max - self.min)
    }
}

/// Spin physics tunables.
///
/// Velocities are radians per tick; decays and friction are per-tick multipliers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpinSettings {
    /// Target turn range (the externally adjustable knob)
    pub turn_range: TurnRange,

    // === Impulse ===
    pub base_impulse: f64,
    /// Random bonus as a fraction of `base_impulse`
    pub impulse_variation: f64,

    // === Cruise ===
    pub cruise_decay: f64,
    pub cruise_jitter: f64,
    pub buffer_decay: f64,
    /// Turns of light friction between the target and the spin-down
    pub buffer_turns: f64,

    // === Spin-down ===
    pub friction: f64,
    pub friction_jitter: f64,
    pub min_velocity: f64,
    /// Velocity treated as full intensity for motion blur
    pub max_velocity: f64,
    /// Force-stop after this many ticks
    pub max_ticks: u32,
}

impl Default for SpinSettings {
    fn default() -> Self {
        Self {
            turn_range: TurnRange::default(),

            base_impulse: BASE_IMPULSE,
            impulse_variation: IMPULSE_VARIATION,

            cruise_decay: CRUISE_DECAY,
            cruise_jitter: CRUISE_JITTER,
            buffer_decay: BUFFER_DECAY,
            buffer_turns: BUFFER_TURNS,

            friction: FRICTION,
            friction_jitter: FRICTION_JITTER,
            min_velocity: MIN_VELOCITY,
            max_velocity: MAX_VELOCITY,
            max_ticks: MAX_SPIN_TICKS,
        }
    }
}

impl SpinSettings {
    /// Default physics with a preset's turn range
    pub fn from_preset(level: SuspenseLevel) -> Self {
        let mut settings = Self::default();
        settings.apply_preset(level);
        settings
    }

    pub fn apply_preset(&mut self, level: SuspenseLevel) {
        self.turn_range = level.turn_range();
        log::info!(
            "Suspense level set to {} ({}-{} turns)",
            level.as_str(),
            self.turn_range.min,
            self.turn_range.max
        );
    }

    /// Check every tunable is in a range where a spin is guaranteed to end
    pub fn validate(&self) -> Result<(), SettingsError> {
        self.turn_range.validate()?;

        for (name, value) in [
            ("base_impulse", self.base_impulse),
            ("min_velocity", self.min_velocity),
            ("max_velocity", self.max_velocity),
            ("buffer_turns", self.buffer_turns),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::NotPositive { name, value });
            }
        }

        for (name, value) in [
            ("friction", self.friction),
            ("buffer_decay", self.buffer_decay),
        ] {
            if !(value > 0.0 && value < 1.0) {
                return Err(SettingsError::CoefficientOutOfRange { name, value });
            }
        }

        // Cruise may hover at 1 but must not grow the wheel on average
        if !(self.cruise_decay > 0.0 && self.cruise_decay <= 1.0) {
            return Err(SettingsError::CoefficientOutOfRange {
                name: "cruise_decay",
                value: self.cruise_decay,
            });
        }

        for (name, value) in [
            ("impulse_variation", self.impulse_variation),
            ("cruise_jitter", self.cruise_jitter),
            ("friction_jitter", self.friction_jitter),
        ] {
            if !(value.is_finite() && value >= 0.0 && value < 1.0) {
                return Err(SettingsError::CoefficientOutOfRange { name, value });
            }
        }

        if self.cruise_decay + self.cruise_jitter > MAX_CRUISE_FACTOR {
            return Err(SettingsError::CruiseSpeedsUp {
                decay: self.cruise_decay,
                jitter: self.cruise_jitter,
            });
        }

        if self.max_ticks == 0 {
            return Err(SettingsError::ZeroTickBudget);
        }
        Ok(())
    }

    /// Parse and validate settings from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, SettingsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json).inspect_err(|e| {
            log::warn!("Rejected settings file {}: {}", path.display(), e);
        })?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
