//! Segment geometry for the wheel
//!
//! In wheel-local (unrotated) coordinates, segment `i` of `n` covers
//! `[i * arc, (i + 1) * arc)` with `arc = 2π / n`. Every segment has the same width.

use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::consts::{MAX_LABEL_CHARS, MAX_SEGMENTS, MIN_SEGMENTS};
use crate::polar_to_cartesian;

/// Labels offered when the caller does not provide any
pub const DEFAULT_LABELS: [&str; 4] = ["Oui", "Non", "Plus tard", "Demander un avis"];

/// Substituted when fewer than two usable labels remain after sanitizing
pub const PLACEHOLDER_LABELS: [&str; 2] = ["Choix 1", "Choix 2"];

/// One labeled angular slice of the wheel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub label: String,
    /// Start angle (radians, wheel-local)
    pub start_angle: f64,
    /// End angle (radians, wheel-local, exclusive)
    pub end_angle: f64,
}

impl Segment {
    /// Angular width of the segment
    #[inline]
    pub fn arc_width(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Mid-arc angle in wheel-local coordinates
    #[inline]
    pub fn center_angle(&self) -> f64 {
        self.start_angle + self.arc_width() / 2.0
    }

    /// Check if a wheel-local angle falls in `[start, end)`
    pub fn contains_angle(&self, theta: f64) -> bool {
        let theta = crate::normalize_angle(theta);
        theta >= self.start_angle && theta < self.end_angle
    }

    /// Point at mid-arc, `radius` from the hub, where a renderer anchors the label
    pub fn label_anchor(&self, radius: f64) -> DVec2 {
        polar_to_cartesian(radius, self.center_angle())
    }
}

/// Sanitize raw labels: trim, drop empties, cap length and count.
///
/// Fewer than two usable labels yields [`PLACEHOLDER_LABELS`] so the wheel is always spinnable.
pub fn normalize_labels<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let labels: Vec<String> = raw
        .iter()
        .map(|s| s.as_ref().trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.chars().take(MAX_LABEL_CHARS).collect::<String>())
        .map(|s| s.trim_end().to_string())
        .take(MAX_SEGMENTS)
        .collect();

    if labels.len() < MIN_SEGMENTS {
        return PLACEHOLDER_LABELS.iter().map(|s| s.to_string()).collect();
    }
    labels
}

/// Build equal-width segments from already-normalized labels
pub fn segments<S: AsRef<str>>(labels: &[S]) -> Vec<Segment> {
    let n = labels.len();
    let arc = TAU / n as f64;
    labels
        .iter()
        .enumerate()
        .map(|(i, label)| Segment {
            label: label.as_ref().to_string(),
            start_angle: i as f64 * arc,
            // Close the circle exactly so no angle falls past the last segment
            end_angle: if i + 1 == n { TAU } else { (i + 1) as f64 * arc },
        })
        .collect()
}

/// The wheel's current ordered segments.
///
/// Owned outright: replacing the labels builds a new set, so a clone taken
/// earlier never observes the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentSet {
    segments: Vec<Segment>,
}

impl Default for SegmentSet {
    fn default() -> Self {
        Self::from_labels(&DEFAULT_LABELS)
    }
}

impl SegmentSet {
    /// Sanitize `raw` and derive the segments
    pub fn from_labels<S: AsRef<str>>(raw: &[S]) -> Self {
        let labels = normalize_labels(raw);
        Self {
            segments: segments(&labels),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always false: a set holds at least two segments
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Width shared by every segment
    #[inline]
    pub fn arc_width(&self) -> f64 {
        TAU / self.segments.len() as f64
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    pub fn as_slice(&self) -> &[Segment] {
        &self.segments
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(|s| s.label.as_str())
    }
}

impl<'a> IntoIterator for &'a SegmentSet {
    type Item = &'a Segment;
    type IntoIter = std::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    #[test]
    fn test_normalize_trims_and_drops_empty() {
        let labels = normalize_labels(&["  Oui ", "", "   ", "Non"]);
        assert_eq!(labels, vec!["Oui".to_string(), "Non".to_string()]);
    }

    #[test]
    fn test_normalize_placeholder_when_too_few() {
        assert_eq!(normalize_labels(&["Seul"]), vec!["Choix 1", "Choix 2"]);
        assert_eq!(normalize_labels::<&str>(&[]), vec!["Choix 1", "Choix 2"]);
        assert_eq!(normalize_labels(&[" ", "\t"]), vec!["Choix 1", "Choix 2"]);
    }

    #[test]
    fn test_normalize_caps_count_and_length() {
        let raw: Vec<String> = (0..12).map(|i| format!("c{i}")).collect();
        let labels = normalize_labels(&raw);
        assert_eq!(labels.len(), MAX_SEGMENTS);
        assert_eq!(labels[7], "c7");

        let long = "é".repeat(80);
        let labels = normalize_labels(&[long.as_str(), "b"]);
        assert_eq!(labels[0].chars().count(), MAX_LABEL_CHARS);
    }

    #[test]
    fn test_duplicates_allowed() {
        let set = SegmentSet::from_labels(&["A", "A", "B"]);
        assert_eq!(set.len(), 3);
        assert_eq!(set.labels().collect::<Vec<_>>(), vec!["A", "A", "B"]);
    }

    #[test]
    fn test_four_segments_geometry() {
        let set = SegmentSet::default();
        assert_eq!(set.len(), 4);
        let seg = set.get(1).unwrap();
        assert_eq!(seg.label, "Non");
        assert!((seg.start_angle - PI / 2.0).abs() < 1e-12);
        assert!((seg.center_angle() - 3.0 * PI / 4.0).abs() < 1e-12);
        assert!(seg.contains_angle(PI / 2.0));
        assert!(!seg.contains_angle(PI));
    }

    #[test]
    fn test_label_anchor_mid_arc() {
        let set = SegmentSet::from_labels(&["A", "B"]);
        // Segment 0 spans [0, π), mid-arc straight along +y
        let p = set.get(0).unwrap().label_anchor(10.0);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 10.0).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_segments_tile_circle(n in 2usize..=8) {
            let labels: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
            let segs = segments(&labels);
            let arc = TAU / n as f64;

            prop_assert_eq!(segs.len(), n);
            prop_assert!(segs[0].start_angle.abs() < 1e-12);
            prop_assert!((segs[n - 1].end_angle - TAU).abs() < 1e-9);
            for pair in segs.windows(2) {
                prop_assert_eq!(pair[0].end_angle, pair[1].start_angle);
            }
            for seg in &segs {
                prop_assert!((seg.arc_width() - arc).abs() < 1e-9);
            }
        }

        #[test]
        fn prop_every_angle_in_exactly_one_segment(n in 2usize..=8, theta in 0.0f64..TAU) {
            let labels: Vec<String> = (0..n).map(|i| format!("L{i}")).collect();
            let segs = segments(&labels);
            let hits = segs.iter().filter(|s| s.contains_angle(theta)).count();
            prop_assert_eq!(hits, 1);
        }
    }
}
