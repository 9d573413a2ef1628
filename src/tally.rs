//! Result tally for fairness checks
//!
//! Counts wins per label across spins and compares them against what the
//! segment widths predict.

use serde::{Deserialize, Serialize};

use crate::sim::{Outcome, SegmentSet};

/// Log the distribution every this many spins
pub const LOG_EVERY: u64 = 10;

/// Wins recorded for one label
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub label: String,
    pub count: u64,
}

/// A label's share of all recorded spins
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Share {
    pub label: String,
    pub count: u64,
    /// Percentage of all spins (0-100)
    pub percent: f64,
}

/// Win counts by label, in first-win order
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResultTally {
    pub entries: Vec<TallyEntry>,
}

impl ResultTally {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Record a completed spin. Identical labels share one counter.
    pub fn record(&mut self, outcome: &Outcome) {
        match self.entries.iter_mut().find(|e| e.label == outcome.label) {
            Some(entry) => entry.count += 1,
            None => self.entries.push(TallyEntry {
                label: outcome.label.clone(),
                count: 1,
            }),
        }

        let total = self.total();
        if total % LOG_EVERY == 0 {
            log::info!("Fairness statistics after {} spins: {}", total, self.summary());
        }
    }

    /// Wins for a label (0 if it never won)
    pub fn count(&self, label: &str) -> u64 {
        self.entries
            .iter()
            .find(|e| e.label == label)
            .map(|e| e.count)
            .unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|e| e.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear all counts
    pub fn reset(&mut self) {
        self.entries.clear();
        log::info!("Statistics reset");
    }

    /// Each label's count and percentage
    pub fn distribution(&self) -> Vec<Share> {
        let total = self.total();
        self.entries
            .iter()
            .map(|e| Share {
                label: e.label.clone(),
                count: e.count,
                percent: if total == 0 {
                    0.0
                } else {
                    e.count as f64 * 100.0 / total as f64
                },
            })
            .collect()
    }

    /// Pearson chi-square statistic against `segments`.
    ///
    /// A label's expected share is the fraction of segments carrying it, so
    /// duplicated labels expect proportionally more wins. Labels absent from
    /// `segments` are ignored. Returns 0 when nothing was recorded.
    pub fn chi_square(&self, segments: &SegmentSet) -> f64 {
        let total = self.total() as f64;
        if total == 0.0 {
            return 0.0;
        }

        let mut labels: Vec<&str> = segments.labels().collect();
        labels.sort_unstable();
        labels.dedup();

        let n = segments.len() as f64;
        labels
            .into_iter()
            .map(|label| {
                let share = segments.labels().filter(|l| *l == label).count() as f64 / n;
                let expected = total * share;
                let observed = self.count(label) as f64;
                (observed - expected).powi(2) / expected
            })
            .sum()
    }

    /// One-line "label: count (pct%)" listing
    pub fn summary(&self) -> String {
        self.distribution()
            .iter()
            .map(|s| format!("{}: {} ({:.1}%)", s.label, s.count, s.percent))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
