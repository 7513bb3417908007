//! Chart math for the progress donut and the allocation rollups.
//!
//! Everything here is a pure function from catalog data to drawing inputs;
//! rendering lives with the consumers (the stats command and the TUI).

use std::f64::consts::PI;

use crate::query::{parse_cost, AggregateCounts};
use crate::task::Task;

/// Completed/skipped/pending shares of the catalog, out of 100.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Percentages {
    pub completed: f64,
    pub skipped: f64,
    pub pending: f64,
}

impl Percentages {
    /// Shares of the full catalog. An empty catalog yields all zeros.
    pub fn from_counts(counts: &AggregateCounts) -> Self {
        let total = counts.total();
        if total == 0 {
            return Percentages::default();
        }
        let total = total as f64;
        Percentages {
            completed: counts.completed as f64 * 100.0 / total,
            skipped: counts.skipped as f64 * 100.0 / total,
            pending: counts.pending as f64 * 100.0 / total,
        }
    }
}

/// Which slice of the donut a segment colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Completed,
    Skipped,
    Pending,
}

/// One arc of the donut, in radians from the positive x axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DonutSegment {
    pub kind: SegmentKind,
    pub start_angle: f64,
    pub end_angle: f64,
}

/// Arc segments for completed, skipped and pending, in that order,
/// starting at angle zero. The pending segment always closes the circle;
/// percentages that do not sum to 100 are not clamped.
pub fn donut_segments(p: &Percentages) -> [DonutSegment; 3] {
    let completed_end = p.completed / 100.0 * 2.0 * PI;
    let skipped_end = completed_end + p.skipped / 100.0 * 2.0 * PI;
    [
        DonutSegment {
            kind: SegmentKind::Completed,
            start_angle: 0.0,
            end_angle: completed_end,
        },
        DonutSegment {
            kind: SegmentKind::Skipped,
            start_angle: completed_end,
            end_angle: skipped_end,
        },
        DonutSegment {
            kind: SegmentKind::Pending,
            start_angle: skipped_end,
            end_angle: 2.0 * PI,
        },
    ]
}

/// Total estimated minutes per category, in first-seen catalog order.
pub fn time_allocation(catalog: &[Task]) -> Vec<(String, u32)> {
    let mut rows: Vec<(String, u32)> = Vec::new();
    for task in catalog {
        match rows.iter_mut().find(|(c, _)| c == &task.category) {
            Some((_, minutes)) => *minutes += task.time.total_minutes(),
            None => rows.push((task.category.clone(), task.time.total_minutes())),
        }
    }
    rows
}

/// Total estimated dollars per category, in first-seen catalog order.
/// Costs that do not parse contribute nothing.
pub fn budget_allocation(catalog: &[Task]) -> Vec<(String, u32)> {
    let mut rows: Vec<(String, u32)> = Vec::new();
    for task in catalog {
        let dollars = parse_cost(&task.cost).unwrap_or(0);
        match rows.iter_mut().find(|(c, _)| c == &task.category) {
            Some((_, total)) => *total += dollars,
            None => rows.push((task.category.clone(), dollars)),
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Frequency;
    use crate::task::TaskTime;

    fn task(category: &str, cost: &str, time: TaskTime) -> Task {
        Task {
            id: 0,
            title: "t".to_string(),
            category: category.to_string(),
            frequency: Frequency::Monthly,
            frequency_detail: "1".to_string(),
            cost: cost.to_string(),
            time,
            description: String::new(),
            resources: Vec::new(),
            recommendation: Default::default(),
            completed: false,
            skipped: false,
            created_at_utc: 0,
            updated_at_utc: 0,
        }
    }

    #[test]
    fn test_percentages_of_empty_catalog_are_zero() {
        let p = Percentages::from_counts(&AggregateCounts::default());
        assert_eq!(p, Percentages::default());
    }

    #[test]
    fn test_percentages_sum_to_one_hundred() {
        let counts = AggregateCounts { pending: 17, completed: 15, skipped: 7 };
        let p = Percentages::from_counts(&counts);
        let sum = p.completed + p.skipped + p.pending;
        assert!((sum - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_donut_segments_are_contiguous_and_close_the_circle() {
        let p = Percentages { completed: 42.0, skipped: 18.0, pending: 40.0 };
        let [completed, skipped, pending] = donut_segments(&p);
        assert_eq!(completed.start_angle, 0.0);
        assert_eq!(completed.end_angle, skipped.start_angle);
        assert_eq!(skipped.end_angle, pending.start_angle);
        assert!((pending.end_angle - 2.0 * PI).abs() < 1e-12);
        let completed_share = (completed.end_angle - completed.start_angle) / (2.0 * PI);
        assert!((completed_share - 0.42).abs() < 1e-9);
    }

    #[test]
    fn test_allocations_keep_first_seen_order() {
        let catalog = vec![
            task("Website", "$10", TaskTime::new(1, 0)),
            task("Social Media", "$5", TaskTime::new(0, 15)),
            task("Website", "$25+", TaskTime::new(0, 30)),
        ];
        assert_eq!(
            time_allocation(&catalog),
            vec![("Website".to_string(), 90), ("Social Media".to_string(), 15)]
        );
        assert_eq!(
            budget_allocation(&catalog),
            vec![("Website".to_string(), 35), ("Social Media".to_string(), 5)]
        );
    }
}
