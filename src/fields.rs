//! Enumerations and field types for playbook tasks.
//!
//! This module defines the closed vocabularies used to classify and filter
//! marketing tasks: recurrence frequencies, filter selections, sort keys,
//! and the DIY/agency/consultant recommendation for the resource guide.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How often a marketing task recurs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Frequency {
    #[serde(alias = "One Time")]
    OneTime,
    #[serde(alias = "Daily")]
    Daily,
    #[serde(alias = "Weekly")]
    Weekly,
    #[serde(alias = "Monthly")]
    Monthly,
    #[serde(alias = "Yearly")]
    Yearly,
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::OneTime
    }
}

impl Frequency {
    /// Ordinal used by the frequency sort key (most frequent first).
    pub fn rank(self) -> u8 {
        match self {
            Frequency::Daily => 0,
            Frequency::Weekly => 1,
            Frequency::Monthly => 2,
            Frequency::Yearly => 3,
            Frequency::OneTime => 4,
        }
    }
}

/// Frequency filter selection. `All` imposes no constraint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum FrequencyFilter {
    OneTime,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    // Unknown values fall back to All rather than hiding every task.
    // serde requires the catch-all variant to be declared last.
    #[default]
    #[serde(other)]
    All,
}

impl FrequencyFilter {
    /// Whether a task with the given frequency passes this filter.
    pub fn matches(self, frequency: Frequency) -> bool {
        match self {
            FrequencyFilter::All => true,
            FrequencyFilter::OneTime => frequency == Frequency::OneTime,
            FrequencyFilter::Daily => frequency == Frequency::Daily,
            FrequencyFilter::Weekly => frequency == Frequency::Weekly,
            FrequencyFilter::Monthly => frequency == Frequency::Monthly,
            FrequencyFilter::Yearly => frequency == Frequency::Yearly,
        }
    }

    /// Cycle to the next filter value (used by the TUI filter key).
    pub fn next(self) -> Self {
        match self {
            FrequencyFilter::All => FrequencyFilter::OneTime,
            FrequencyFilter::OneTime => FrequencyFilter::Daily,
            FrequencyFilter::Daily => FrequencyFilter::Weekly,
            FrequencyFilter::Weekly => FrequencyFilter::Monthly,
            FrequencyFilter::Monthly => FrequencyFilter::Yearly,
            FrequencyFilter::Yearly => FrequencyFilter::All,
        }
    }
}

/// Completion status filter selection. `All` imposes no constraint.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    Pending,
    Completed,
    Skipped,
    #[default]
    #[serde(other)]
    All,
}

impl StatusFilter {
    /// Whether a task with the given flags passes this filter.
    pub fn matches(self, completed: bool, skipped: bool) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !completed && !skipped,
            StatusFilter::Completed => completed,
            StatusFilter::Skipped => skipped,
        }
    }

    /// Cycle to the next filter value (used by the TUI status key).
    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Pending,
            StatusFilter::Pending => StatusFilter::Completed,
            StatusFilter::Completed => StatusFilter::Skipped,
            StatusFilter::Skipped => StatusFilter::All,
        }
    }
}

/// Available sort orderings for task lists within a category.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Frequency,
    Time,
    Cost,
    /// Original catalog order.
    #[default]
    #[serde(other)]
    Catalog,
}

impl SortKey {
    /// Cycle to the next sort key (used by the TUI sort key).
    pub fn next(self) -> Self {
        match self {
            SortKey::Catalog => SortKey::Frequency,
            SortKey::Frequency => SortKey::Time,
            SortKey::Time => SortKey::Cost,
            SortKey::Cost => SortKey::Catalog,
        }
    }
}

/// Recommended way to get a task done, shown in the resource guide.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Recommendation {
    Agency,
    Consultant,
    #[default]
    #[serde(other)]
    Diy,
}

/// Parse a frequency filter from free text.
/// Unrecognized values mean "no constraint" so a bad value never hides tasks.
pub fn parse_frequency_filter(s: &str) -> FrequencyFilter {
    match s.trim().to_lowercase().as_str() {
        "one-time" | "onetime" | "one time" => FrequencyFilter::OneTime,
        "daily" => FrequencyFilter::Daily,
        "weekly" => FrequencyFilter::Weekly,
        "monthly" => FrequencyFilter::Monthly,
        "yearly" => FrequencyFilter::Yearly,
        _ => FrequencyFilter::All,
    }
}

/// Parse a status filter from free text. Unrecognized values mean "no constraint".
pub fn parse_status_filter(s: &str) -> StatusFilter {
    match s.trim().to_lowercase().as_str() {
        "pending" => StatusFilter::Pending,
        "completed" | "done" => StatusFilter::Completed,
        "skipped" => StatusFilter::Skipped,
        _ => StatusFilter::All,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecognized_filters_fail_open() {
        assert_eq!(parse_frequency_filter("fortnightly"), FrequencyFilter::All);
        assert_eq!(parse_frequency_filter(""), FrequencyFilter::All);
        assert_eq!(parse_status_filter("archived"), StatusFilter::All);
        assert_eq!(parse_frequency_filter("One Time"), FrequencyFilter::OneTime);
        assert_eq!(parse_status_filter(" Done "), StatusFilter::Completed);
    }

    #[test]
    fn test_serde_unknown_filter_falls_back_to_all() {
        let f: FrequencyFilter = serde_json::from_str("\"quarterly\"").unwrap();
        assert_eq!(f, FrequencyFilter::All);
        let s: StatusFilter = serde_json::from_str("\"deferred\"").unwrap();
        assert_eq!(s, StatusFilter::All);
        let k: SortKey = serde_json::from_str("\"alphabetical\"").unwrap();
        assert_eq!(k, SortKey::Catalog);
        let r: Recommendation = serde_json::from_str("\"freelancer\"").unwrap();
        assert_eq!(r, Recommendation::Diy);
    }

    #[test]
    fn test_serde_known_values_still_round_trip() {
        let f: FrequencyFilter = serde_json::from_str("\"weekly\"").unwrap();
        assert_eq!(f, FrequencyFilter::Weekly);
        let s: StatusFilter = serde_json::from_str("\"skipped\"").unwrap();
        assert_eq!(s, StatusFilter::Skipped);
        let r: Recommendation = serde_json::from_str("\"consultant\"").unwrap();
        assert_eq!(r, Recommendation::Consultant);
    }

    #[test]
    fn test_filter_cycles_return_to_all() {
        let mut f = FrequencyFilter::All;
        for _ in 0..6 {
            f = f.next();
        }
        assert_eq!(f, FrequencyFilter::All);

        let mut s = StatusFilter::All;
        for _ in 0..4 {
            s = s.next();
        }
        assert_eq!(s, StatusFilter::All);
    }
}
