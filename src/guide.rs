//! Resource guide content: DIY, agency and consultant options for a task.
//!
//! The guide is static copy; the only logic is highlighting the section
//! matching the task's recommendation.

use crate::fields::Recommendation;
use crate::task::Task;

/// A labelled external link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideLink {
    pub name: &'static str,
    pub url: &'static str,
}

/// A fair-pricing comparison row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricingRow {
    pub item: &'static str,
    pub price: &'static str,
}

pub const DIY_LINKS: &[GuideLink] = &[
    GuideLink { name: "Step-by-step Guide", url: "https://example.com/diy-guide" },
    GuideLink { name: "YouTube Tutorial", url: "https://youtube.com" },
];

pub const AGENCY_PRICING: &[PricingRow] = &[
    PricingRow { item: "Small Website Project", price: "$3,000 - $4,500" },
    PricingRow { item: "Monthly Social Media", price: "$400 - $900/mo" },
];

pub const CONSULTANT_PRICING: &[PricingRow] = &[
    PricingRow { item: "Consultation Session", price: "$75 - $200/hr" },
    PricingRow { item: "Ongoing Strategy", price: "$500 - $1,500/mo" },
];

pub const AGENCY_TIPS: &[&str] = &[
    "Request clear deliverables in your contract.",
    "Ask for recent case studies and references.",
    "Clarify ownership of creative assets.",
];

pub const CONSULTANT_TIPS: &[&str] = &[
    "Choose a consultant with experience in your industry.",
    "Align on expected outcomes before commencing.",
    "Check for relevant certifications.",
];

/// Subscription-versus-agency comparison shown on the dashboard.
pub const FAIR_PRICING: &[(&str, &str, &str)] = &[
    ("Our Monthly Fee", "$99/mo", "Unlimited business profiles"),
    ("Avg Agency Cost", "$1,200/mo", "For comparable services"),
    ("Your Savings", "92%", "Compared to agencies"),
];

/// One of the three ways to get a task done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuideSection {
    pub title: &'static str,
    pub recommendation: Recommendation,
    pub highlighted: bool,
    pub links: &'static [GuideLink],
    pub pricing: &'static [PricingRow],
    pub tips: &'static [&'static str],
}

/// Build the three guide sections for a task, highlighting the one that
/// matches its recommendation.
pub fn resource_guide(task: &Task) -> [GuideSection; 3] {
    let section = |title, recommendation, links, pricing, tips| GuideSection {
        title,
        recommendation,
        highlighted: task.recommendation == recommendation,
        links,
        pricing,
        tips,
    };
    [
        section("Do It Yourself", Recommendation::Diy, DIY_LINKS, &[], &[]),
        section(
            "Get Help: Agency",
            Recommendation::Agency,
            &[],
            AGENCY_PRICING,
            AGENCY_TIPS,
        ),
        section(
            "Get Help: Consultant",
            Recommendation::Consultant,
            &[],
            CONSULTANT_PRICING,
            CONSULTANT_TIPS,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::Frequency;
    use crate::task::TaskTime;

    fn task_with(recommendation: Recommendation) -> Task {
        Task {
            id: 1,
            title: "Refresh ad creative".to_string(),
            category: "Paid Advertising".to_string(),
            frequency: Frequency::Monthly,
            frequency_detail: "1".to_string(),
            cost: "$20".to_string(),
            time: TaskTime::new(1, 30),
            description: String::new(),
            resources: Vec::new(),
            recommendation,
            completed: false,
            skipped: false,
            created_at_utc: 0,
            updated_at_utc: 0,
        }
    }

    #[test]
    fn test_exactly_one_section_is_highlighted() {
        for recommendation in [
            Recommendation::Diy,
            Recommendation::Agency,
            Recommendation::Consultant,
        ] {
            let sections = resource_guide(&task_with(recommendation));
            let highlighted: Vec<_> =
                sections.iter().filter(|s| s.highlighted).collect();
            assert_eq!(highlighted.len(), 1);
            assert_eq!(highlighted[0].recommendation, recommendation);
        }
    }

    #[test]
    fn test_sections_keep_fixed_order() {
        let sections = resource_guide(&task_with(Recommendation::Agency));
        let titles: Vec<&str> = sections.iter().map(|s| s.title).collect();
        assert_eq!(
            titles,
            vec!["Do It Yourself", "Get Help: Agency", "Get Help: Consultant"]
        );
    }
}
