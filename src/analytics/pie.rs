//! Pie chart geometry.
//!
//! Segments sweep clockwise in screen coordinates (y grows downward),
//! starting at twelve o'clock. Angles are in radians.

use core::f64::consts::{FRAC_PI_2, PI, TAU};

use serde::Serialize;

/// Angle of twelve o'clock, where the first segment starts.
pub const START_ANGLE: f64 = -FRAC_PI_2;

/// One slice of a pie chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieSegment {
    /// Label of the slice.
    pub label: String,
    /// Weight of the slice after sanitizing (negative or non-finite inputs
    /// become `0.0`).
    pub amount: f64,
    /// Share of the whole, `0.0..=100.0`.
    pub percentage: f64,
    /// Angle where the slice begins.
    pub start_angle: f64,
    /// Angle where the slice ends; equals the next slice's start.
    pub end_angle: f64,
}

impl PieSegment {
    /// Angular width of the slice.
    #[inline]
    #[must_use]
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Returns `true` if an SVG arc for this slice needs the large-arc flag.
    #[inline]
    #[must_use]
    pub fn is_large_arc(&self) -> bool {
        self.sweep() > PI
    }
}

/// Lays out `entries` as consecutive slices in input order.
///
/// The first slice starts at [`START_ANGLE`] and the last one ends at
/// exactly `START_ANGLE + TAU`. A single entry yields a full circle. When
/// the weights add up to zero (including empty input) no slices are
/// returned.
#[inline]
#[must_use]
pub fn pie_segments<L, I>(entries: I) -> Vec<PieSegment>
where
    L: Into<String>,
    I: IntoIterator<Item = (L, f64)>,
{
    let weighted: Vec<(String, f64)> = entries
        .into_iter()
        .map(|(label, amount)| {
            let weight = if amount.is_finite() && amount > 0.0_f64 {
                amount
            } else {
                0.0_f64
            };
            (label.into(), weight)
        })
        .collect();

    let total: f64 = weighted.iter().map(|&(_, weight)| weight).sum();
    if total <= 0.0_f64 {
        return Vec::new();
    }

    let last = weighted.len().saturating_sub(1);
    let mut cumulative = 0.0_f64;
    let mut start_angle = START_ANGLE;
    let mut segments = Vec::with_capacity(weighted.len());
    for (position, (label, weight)) in weighted.into_iter().enumerate() {
        cumulative += weight;
        let end_angle = if position == last {
            START_ANGLE + TAU
        } else {
            TAU.mul_add(cumulative / total, START_ANGLE)
        };
        segments.push(PieSegment {
            label,
            amount: weight,
            percentage: weight / total * 100.0,
            start_angle,
            end_angle,
        });
        start_angle = end_angle;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_entry_is_full_circle() {
        let segments = pie_segments([("Food", 42.0)]);
        assert_eq!(segments.len(), 1);
        assert!((segments[0].start_angle - START_ANGLE).abs() < f64::EPSILON);
        assert!((segments[0].sweep() - TAU).abs() < 1e-12);
        assert!((segments[0].percentage - 100.0).abs() < f64::EPSILON);
        assert!(segments[0].is_large_arc());
    }

    #[test]
    fn all_zero_or_empty_is_empty() {
        assert!(pie_segments([("Food", 0.0), ("Bills", 0.0)]).is_empty());
        assert!(pie_segments(Vec::<(String, f64)>::new()).is_empty());
    }

    #[test]
    fn angles_span_exactly_full_turn() {
        let segments = pie_segments([
            ("Food", 85.5),
            ("Entertainment", 15.99),
            ("Bills", 0.1),
            ("Shopping", 1.0 / 3.0),
        ]);
        let swept: f64 = segments.iter().map(PieSegment::sweep).sum();
        assert!((swept - TAU).abs() < 1e-9);
        let last = segments.last().unwrap();
        assert!((last.end_angle - (START_ANGLE + TAU)).abs() < f64::EPSILON);
    }

    #[test]
    fn segments_are_contiguous_and_monotonic() {
        let segments = pie_segments([("a", 1.0), ("b", 0.0), ("c", 3.0)]);
        assert_eq!(segments.len(), 3);
        for pair in segments.windows(2) {
            assert!((pair[0].end_angle - pair[1].start_angle).abs() < f64::EPSILON);
        }
        for segment in &segments {
            assert!(segment.end_angle >= segment.start_angle);
        }
        assert!((segments[1].sweep() - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quarter_and_three_quarters() {
        let segments = pie_segments([("a", 25.0), ("b", 75.0)]);
        assert!((segments[0].end_angle - 0.0).abs() < 1e-12);
        assert!((segments[0].percentage - 25.0).abs() < 1e-12);
        assert!(!segments[0].is_large_arc());
        assert!(segments[1].is_large_arc());
    }

    #[test]
    fn negative_and_non_finite_weights_count_as_zero() {
        let segments = pie_segments([("a", -5.0), ("b", f64::NAN), ("c", 2.0)]);
        assert!((segments[0].amount - 0.0).abs() < f64::EPSILON);
        assert!((segments[1].amount - 0.0).abs() < f64::EPSILON);
        assert!((segments[2].sweep() - TAU).abs() < 1e-12);
    }
}
