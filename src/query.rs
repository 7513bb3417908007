//! Catalog querying: the filter, grouping and counting engine behind every
//! task view.
//!
//! `query` applies the search/frequency/status predicates conjunctively,
//! partitions the survivors by category in first-seen order, and returns
//! them together with catalog-wide aggregate counts. It is a pure function
//! of its inputs; the CLI list command and the TUI dashboard both render
//! straight from its output.

use std::collections::HashMap;

use crate::fields::{FrequencyFilter, SortKey, StatusFilter};
use crate::task::Task;

/// Filter criteria for a catalog query. The default value imposes no
/// constraint and returns the whole catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    /// Case-insensitive substring match against task titles.
    /// Empty or whitespace-only text matches everything.
    pub search: String,
    pub frequency: FrequencyFilter,
    pub status: StatusFilter,
    pub sort: SortKey,
}

/// Tasks of one category that survived the filters.
///
/// Produced fresh on every query; never empty.
#[derive(Debug, PartialEq)]
pub struct TaskGroup<'a> {
    pub category: &'a str,
    pub tasks: Vec<&'a Task>,
}

/// Catalog-wide totals. Always computed over the full catalog so badge
/// numbers never move when the user changes filters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateCounts {
    pub pending: usize,
    pub completed: usize,
    pub skipped: usize,
}

impl AggregateCounts {
    pub fn total(self) -> usize {
        self.pending + self.completed + self.skipped
    }
}

/// Output of [`query`]: filtered groups plus unfiltered counts.
#[derive(Debug, PartialEq)]
pub struct QueryResult<'a> {
    pub groups: Vec<TaskGroup<'a>>,
    pub counts: AggregateCounts,
}

/// Count pending, completed and skipped tasks over the whole catalog.
///
/// Pending is counted directly rather than derived from the total, so a
/// hand-edited playbook file carrying both flags on one task still counts
/// instead of underflowing.
pub fn aggregate_counts(catalog: &[Task]) -> AggregateCounts {
    AggregateCounts {
        pending: catalog.iter().filter(|t| t.is_pending()).count(),
        completed: catalog.iter().filter(|t| t.completed).count(),
        skipped: catalog.iter().filter(|t| t.skipped).count(),
    }
}

/// Run the predicate pipeline over the catalog and group the survivors.
///
/// Survivors keep their catalog order (unless a sort key is set) and
/// categories appear in the order they first occur in the catalog.
/// Categories with no matching tasks are not emitted.
pub fn query<'a>(catalog: &'a [Task], criteria: &Criteria) -> QueryResult<'a> {
    let needle = criteria.search.trim().to_lowercase();

    let survivors = catalog.iter().filter(|t| {
        if !needle.is_empty() && !t.title.to_lowercase().contains(&needle) {
            return false;
        }
        if !criteria.frequency.matches(t.frequency) {
            return false;
        }
        if !criteria.status.matches(t.completed, t.skipped) {
            return false;
        }
        true
    });

    let mut groups: Vec<TaskGroup> = Vec::new();
    let mut group_index: HashMap<&str, usize> = HashMap::new();
    for task in survivors {
        let idx = *group_index.entry(task.category.as_str()).or_insert_with(|| {
            groups.push(TaskGroup {
                category: task.category.as_str(),
                tasks: Vec::new(),
            });
            groups.len() - 1
        });
        groups[idx].tasks.push(task);
    }

    for group in groups.iter_mut() {
        sort_tasks(&mut group.tasks, criteria.sort);
    }

    QueryResult {
        groups,
        counts: aggregate_counts(catalog),
    }
}

/// Order tasks within a group by the requested key.
///
/// The sort is stable: tasks with equal keys keep their relative catalog
/// order. `Catalog` leaves the order untouched.
fn sort_tasks(tasks: &mut [&Task], key: SortKey) {
    match key {
        SortKey::Catalog => {}
        SortKey::Frequency => tasks.sort_by_key(|t| t.frequency.rank()),
        SortKey::Time => tasks.sort_by_key(|t| t.time.total_minutes()),
        // Unparsable costs sort last.
        SortKey::Cost => tasks.sort_by_key(|t| parse_cost(&t.cost).unwrap_or(u32::MAX)),
    }
}

/// Parse a display cost such as "$15" or "$25+" into whole dollars.
pub fn parse_cost(s: &str) -> Option<u32> {
    s.trim()
        .trim_start_matches('$')
        .trim_end_matches('+')
        .parse()
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Frequency;
    use crate::task::{TaskDraft, TaskTime};

    fn task(id: u64, title: &str, category: &str, frequency: Frequency) -> Task {
        Task {
            id,
            title: title.to_string(),
            category: category.to_string(),
            frequency,
            frequency_detail: "1".to_string(),
            cost: "$0".to_string(),
            time: TaskTime::new(0, 30),
            description: String::new(),
            resources: Vec::new(),
            recommendation: Default::default(),
            completed: false,
            skipped: false,
            created_at_utc: 0,
            updated_at_utc: 0,
        }
    }

    fn fixture() -> Vec<Task> {
        let seo = task(1, "SEO Audit", "Website", Frequency::Monthly);
        let mut post = task(2, "Post Update", "Social Media", Frequency::Daily);
        post.completed = true;
        vec![seo, post]
    }

    #[test]
    fn test_search_filters_and_counts_stay_catalog_wide() {
        let catalog = fixture();
        let result = query(
            &catalog,
            &Criteria {
                search: "seo".to_string(),
                ..Default::default()
            },
        );
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].category, "Website");
        assert_eq!(result.groups[0].tasks.len(), 1);
        assert_eq!(result.groups[0].tasks[0].id, 1);
        assert_eq!(
            result.counts,
            AggregateCounts { pending: 1, completed: 1, skipped: 0 }
        );
    }

    #[test]
    fn test_status_filter_selects_completed() {
        let catalog = fixture();
        let result = query(
            &catalog,
            &Criteria {
                status: StatusFilter::Completed,
                ..Default::default()
            },
        );
        assert_eq!(result.groups.len(), 1);
        assert_eq!(result.groups[0].category, "Social Media");
        assert_eq!(result.groups[0].tasks[0].id, 2);
        // Filters never change the badge totals.
        assert_eq!(
            result.counts,
            AggregateCounts { pending: 1, completed: 1, skipped: 0 }
        );
    }

    #[test]
    fn test_aggregate_invariance_under_filtering() {
        let catalog = fixture();
        let unfiltered = query(&catalog, &Criteria::default());
        for criteria in [
            Criteria { search: "update".into(), ..Default::default() },
            Criteria { frequency: FrequencyFilter::Yearly, ..Default::default() },
            Criteria { status: StatusFilter::Skipped, ..Default::default() },
        ] {
            assert_eq!(query(&catalog, &criteria).counts, unfiltered.counts);
        }
    }

    #[test]
    fn test_query_is_idempotent() {
        let catalog = fixture();
        let criteria = Criteria { search: " seo ".into(), ..Default::default() };
        assert_eq!(query(&catalog, &criteria), query(&catalog, &criteria));
    }

    #[test]
    fn test_whitespace_search_matches_everything() {
        let catalog = fixture();
        let result = query(
            &catalog,
            &Criteria { search: "   ".into(), ..Default::default() },
        );
        let total: usize = result.groups.iter().map(|g| g.tasks.len()).sum();
        assert_eq!(total, catalog.len());
    }

    #[test]
    fn test_no_empty_groups_and_first_seen_order() {
        let catalog = vec![
            task(1, "Refresh homepage", "Website", Frequency::Monthly),
            task(2, "Reply to reviews", "Local Listings", Frequency::Weekly),
            task(3, "Update metadata", "Website", Frequency::Yearly),
            task(4, "Boost a post", "Social Media", Frequency::Weekly),
        ];
        let result = query(
            &catalog,
            &Criteria { frequency: FrequencyFilter::Weekly, ..Default::default() },
        );
        let categories: Vec<&str> = result.groups.iter().map(|g| g.category).collect();
        assert_eq!(categories, vec!["Local Listings", "Social Media"]);
        assert!(result.groups.iter().all(|g| !g.tasks.is_empty()));
    }

    #[test]
    fn test_sort_is_stable_within_equal_keys() {
        let mut a = task(1, "First weekly", "Website", Frequency::Weekly);
        let mut b = task(2, "Second weekly", "Website", Frequency::Weekly);
        let c = task(3, "A daily", "Website", Frequency::Daily);
        a.cost = "$10".to_string();
        b.cost = "$10".to_string();
        let catalog = vec![a, b, c];

        let by_frequency = query(
            &catalog,
            &Criteria { sort: SortKey::Frequency, ..Default::default() },
        );
        let ids: Vec<u64> = by_frequency.groups[0].tasks.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);

        let by_cost = query(
            &catalog,
            &Criteria { sort: SortKey::Cost, ..Default::default() },
        );
        let ids: Vec<u64> = by_cost.groups[0].tasks.iter().map(|t| t.id).collect();
        // Equal costs keep catalog order; $0 daily sorts first.
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_counts_tolerate_conflicting_flags_from_disk() {
        // The toggles keep the flags exclusive, but a hand-edited file
        // can carry both. Counting must not panic.
        let mut broken = task(1, "Conflicted", "Website", Frequency::Monthly);
        broken.completed = true;
        broken.skipped = true;
        let catalog = vec![broken, task(2, "Fine", "Website", Frequency::Monthly)];

        let counts = aggregate_counts(&catalog);
        assert_eq!(counts.pending, 1);
        assert_eq!(counts.completed, 1);
        assert_eq!(counts.skipped, 1);

        let result = query(&catalog, &Criteria::default());
        assert_eq!(result.counts, counts);
    }

    #[test]
    fn test_parse_cost() {
        assert_eq!(parse_cost("$0"), Some(0));
        assert_eq!(parse_cost("$15"), Some(15));
        assert_eq!(parse_cost("$25+"), Some(25));
        assert_eq!(parse_cost("free"), None);
    }

    #[test]
    fn test_draft_defaults() {
        let draft = TaskDraft::default();
        assert_eq!(draft.frequency, Frequency::OneTime);
        assert_eq!(draft.time, TaskTime::new(0, 30));
    }
}
