use serde::{Deserialize, Serialize};

use super::tier::AnalysisTier;

/// Where in the lap, or in which aspect of the car, a problem shows up.
///
/// The declaration order is the display order used by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Entry,
    MidCorner,
    Exit,
    Stability,
    Balance,
    Wear,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Entry => write!(f, "Corner Entry"),
            Category::MidCorner => write!(f, "Mid-Corner"),
            Category::Exit => write!(f, "Corner Exit"),
            Category::Stability => write!(f, "Stability"),
            Category::Balance => write!(f, "Balance"),
            Category::Wear => write!(f, "Tire Wear"),
        }
    }
}

/// How urgently a recommendation should be acted on.
///
/// Ordered from least to most urgent so `max` picks the most urgent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
            Severity::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// A single piece of setup advice.
///
/// Recommendations are built fresh on every evaluation and are never
/// mutated in place; later stages only reorder, filter or clone them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Catalog rule that produced this recommendation
    pub rule_id: String,
    /// Short headline, e.g. "Add a rear wing"
    pub title: String,
    /// The handling problem being addressed, e.g. "entry understeer"
    pub problem: String,
    pub category: Category,
    pub severity: Severity,
    /// Setup changes in the order they should be tried
    pub solutions: Vec<String>,
    /// Why the changes help; blank when hidden by the analysis tier
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub rationale: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub important: Option<String>,
    /// Lowest analysis tier that shows this recommendation
    pub tier: AnalysisTier,
}

impl Recommendation {
    pub fn new(
        rule_id: &str,
        title: impl Into<String>,
        problem: impl Into<String>,
        category: Category,
        severity: Severity,
    ) -> Self {
        Self {
            rule_id: rule_id.to_string(),
            title: title.into(),
            problem: problem.into(),
            category,
            severity,
            solutions: Vec::new(),
            rationale: String::new(),
            caution: None,
            important: None,
            tier: AnalysisTier::Basic,
        }
    }

    pub fn solution(mut self, solution: impl Into<String>) -> Self {
        self.solutions.push(solution.into());
        self
    }

    pub fn rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    pub fn caution(mut self, caution: impl Into<String>) -> Self {
        self.caution = Some(caution.into());
        self
    }

    pub fn important(mut self, important: impl Into<String>) -> Self {
        self.important = Some(important.into());
        self
    }

    pub fn tier(mut self, tier: AnalysisTier) -> Self {
        self.tier = tier;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Critical > Severity::High);
        assert!(Severity::High > Severity::Medium);
        assert!(Severity::Medium > Severity::Low);
        assert_eq!(
            [Severity::Low, Severity::Critical, Severity::Medium]
                .into_iter()
                .max(),
            Some(Severity::Critical)
        );
    }

    #[test]
    fn test_category_display_order() {
        let mut categories = vec![
            Category::Wear,
            Category::Exit,
            Category::Entry,
            Category::Balance,
            Category::MidCorner,
            Category::Stability,
        ];
        categories.sort();
        assert_eq!(
            categories,
            vec![
                Category::Entry,
                Category::MidCorner,
                Category::Exit,
                Category::Stability,
                Category::Balance,
                Category::Wear,
            ]
        );
    }

    #[test]
    fn test_builder_fills_fields() {
        let rec = Recommendation::new(
            "entry-understeer",
            "Free up the front on entry",
            "entry understeer",
            Category::Entry,
            Severity::High,
        )
        .solution("Soften front springs")
        .rationale("More front grip")
        .caution("Mind the splitter")
        .tier(AnalysisTier::Standard);

        assert_eq!(rec.solutions, vec!["Soften front springs".to_string()]);
        assert_eq!(rec.rationale, "More front grip");
        assert_eq!(rec.caution.as_deref(), Some("Mind the splitter"));
        assert_eq!(rec.important, None);
        assert_eq!(rec.tier, AnalysisTier::Standard);
    }

    #[test]
    fn test_serializes_with_camel_case_and_skips_hidden_fields() {
        let rec = Recommendation::new(
            "splitter-low",
            "Raise the splitter",
            "splitter height",
            Category::Wear,
            Severity::Medium,
        )
        .solution("Raise splitter to at least 2.0\"");

        let json = serde_json::to_value(&rec).unwrap();
        assert_eq!(json["ruleId"], "splitter-low");
        assert_eq!(json["category"], "wear");
        assert_eq!(json["severity"], "medium");
        assert!(json.get("rationale").is_none());
        assert!(json.get("caution").is_none());
        assert!(json.get("important").is_none());
    }
}
