//! Deterministic spin simulation
//!
//! All wheel logic lives here. Like any fixed-step simulation it stays pure:
//! - One update per frame, no wall-clock time
//! - Randomness only through an injected `RandomSource`
//! - No rendering or platform dependencies

pub mod resolve;
pub mod segment;
pub mod state;
pub mod tick;

pub use resolve::{Outcome, resolve, resolve_outcome};
pub use segment::{DEFAULT_LABELS, PLACEHOLDER_LABELS, Segment, SegmentSet, normalize_labels, segments};
pub use state::{RandomSource, RngState, SpinPhase, SpinState, Wheel};
pub use tick::{TickResult, run_to_completion, tick};
