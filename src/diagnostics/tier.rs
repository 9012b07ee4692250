use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::recommendation::{Category, Recommendation};

/// The entitlement level that decides how much analysis a caller sees.
///
/// Tiers are ordered, each one showing everything the previous one shows.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum AnalysisTier {
    #[default]
    #[serde(alias = "free")]
    Basic,
    Standard,
    Advanced,
    Premium,
}

impl AnalysisTier {
    pub const ALL: [AnalysisTier; 4] = [
        AnalysisTier::Basic,
        AnalysisTier::Standard,
        AnalysisTier::Advanced,
        AnalysisTier::Premium,
    ];

    fn shows_rationale(&self) -> bool {
        *self >= AnalysisTier::Standard
    }

    fn shows_caution(&self) -> bool {
        *self >= AnalysisTier::Standard
    }

    fn shows_important(&self) -> bool {
        *self >= AnalysisTier::Advanced
    }
}

impl std::fmt::Display for AnalysisTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisTier::Basic => write!(f, "basic"),
            AnalysisTier::Standard => write!(f, "standard"),
            AnalysisTier::Advanced => write!(f, "advanced"),
            AnalysisTier::Premium => write!(f, "premium"),
        }
    }
}

impl std::str::FromStr for AnalysisTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "basic" | "free" => Ok(AnalysisTier::Basic),
            "standard" => Ok(AnalysisTier::Standard),
            "advanced" => Ok(AnalysisTier::Advanced),
            "premium" => Ok(AnalysisTier::Premium),
            _ => Err(format!("unknown analysis tier '{s}'")),
        }
    }
}

/// Cut the aggregated recommendations down to what `tier` is entitled to.
///
/// This only drops whole recommendations and hides detail fields; it never
/// changes severity or the relative order of what it keeps. The basic tier
/// keeps one recommendation per category, the most severe, with the first
/// one winning ties.
pub fn select(recommendations: &[Recommendation], tier: AnalysisTier) -> Vec<Recommendation> {
    let visible = recommendations.iter().filter(|rec| rec.tier <= tier);

    let kept: Vec<&Recommendation> = if tier == AnalysisTier::Basic {
        let visible: Vec<&Recommendation> = visible.collect();
        let mut top_per_category: HashMap<Category, usize> = HashMap::new();
        for (index, rec) in visible.iter().enumerate() {
            top_per_category
                .entry(rec.category)
                .and_modify(|best| {
                    if rec.severity > visible[*best].severity {
                        *best = index;
                    }
                })
                .or_insert(index);
        }
        visible
            .iter()
            .enumerate()
            .filter(|(index, rec)| top_per_category.get(&rec.category) == Some(index))
            .map(|(_, rec)| *rec)
            .collect()
    } else {
        visible.collect()
    };

    kept.into_iter().map(|rec| redact(rec, tier)).collect()
}

fn redact(rec: &Recommendation, tier: AnalysisTier) -> Recommendation {
    let mut shown = rec.clone();
    if !tier.shows_rationale() {
        shown.rationale.clear();
    }
    if !tier.shows_caution() {
        shown.caution = None;
    }
    if !tier.shows_important() {
        shown.important = None;
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::recommendation::Severity;

    fn rec(id: &str, category: Category, severity: Severity, tier: AnalysisTier) -> Recommendation {
        Recommendation::new(id, id, id, category, severity)
            .solution("Do something")
            .rationale("Because")
            .caution("Carefully")
            .important("Really")
            .tier(tier)
    }

    fn ids(recs: &[Recommendation]) -> Vec<&str> {
        recs.iter().map(|r| r.rule_id.as_str()).collect()
    }

    fn sample() -> Vec<Recommendation> {
        vec![
            rec("entry-a", Category::Entry, Severity::Medium, AnalysisTier::Basic),
            rec("entry-b", Category::Entry, Severity::High, AnalysisTier::Basic),
            rec("entry-c", Category::Entry, Severity::High, AnalysisTier::Basic),
            rec("exit-a", Category::Exit, Severity::Low, AnalysisTier::Basic),
            rec("exit-std", Category::Exit, Severity::Critical, AnalysisTier::Standard),
            rec("balance-adv", Category::Balance, Severity::Medium, AnalysisTier::Advanced),
            rec("shock-prem", Category::Stability, Severity::Low, AnalysisTier::Premium),
        ]
    }

    #[test]
    fn test_tier_parsing_and_ordering() {
        assert_eq!("free".parse::<AnalysisTier>(), Ok(AnalysisTier::Basic));
        assert_eq!("Premium".parse::<AnalysisTier>(), Ok(AnalysisTier::Premium));
        assert!("gold".parse::<AnalysisTier>().is_err());
        assert!(AnalysisTier::Basic < AnalysisTier::Standard);
        assert!(AnalysisTier::Advanced < AnalysisTier::Premium);

        let tier: AnalysisTier = serde_json::from_str("\"free\"").unwrap();
        assert_eq!(tier, AnalysisTier::Basic);
    }

    #[test]
    fn test_basic_keeps_most_severe_per_category() {
        let selected = select(&sample(), AnalysisTier::Basic);
        // entry-b beats entry-c on the tie because it comes first
        assert_eq!(ids(&selected), vec!["entry-b", "exit-a"]);
    }

    #[test]
    fn test_basic_hides_detail_fields() {
        let selected = select(&sample(), AnalysisTier::Basic);
        for rec in &selected {
            assert!(rec.rationale.is_empty());
            assert!(rec.caution.is_none());
            assert!(rec.important.is_none());
            assert!(!rec.solutions.is_empty());
        }
    }

    #[test]
    fn test_standard_shows_caution_but_not_important() {
        let selected = select(&sample(), AnalysisTier::Standard);
        assert_eq!(
            ids(&selected),
            vec!["entry-a", "entry-b", "entry-c", "exit-a", "exit-std"]
        );
        for rec in &selected {
            assert_eq!(rec.rationale, "Because");
            assert!(rec.caution.is_some());
            assert!(rec.important.is_none());
        }
    }

    #[test]
    fn test_premium_shows_everything_unchanged() {
        let all = sample();
        let selected = select(&all, AnalysisTier::Premium);
        assert_eq!(selected, all);
    }

    #[test]
    fn test_select_never_changes_severity() {
        let all = sample();
        for tier in AnalysisTier::ALL {
            for rec in select(&all, tier) {
                let original = all.iter().find(|r| r.rule_id == rec.rule_id).unwrap();
                assert_eq!(original.severity, rec.severity);
                assert_eq!(original.solutions, rec.solutions);
            }
        }
    }

    #[test]
    fn test_select_on_empty_is_empty() {
        for tier in AnalysisTier::ALL {
            assert!(select(&[], tier).is_empty());
        }
    }
}
