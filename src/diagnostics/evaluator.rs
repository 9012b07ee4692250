use log::debug;

use super::catalog::{Rule, RuleContext};
use super::metrics::DerivedMetrics;
use super::profile::{ConfigurationProfile, SymptomProfile, TrackContext};
use super::recommendation::Recommendation;

/// Run every rule against the inputs and collect what matched.
///
/// Output follows catalog order. Nothing is deduplicated or reordered here,
/// and a rule whose numeric inputs are missing or unparseable simply does
/// not match.
pub fn evaluate(
    rules: &[Rule],
    config: &ConfigurationProfile,
    symptoms: &SymptomProfile,
    track: &TrackContext,
    metrics: &DerivedMetrics,
) -> Vec<Recommendation> {
    let ctx = RuleContext {
        config,
        symptoms,
        track,
        metrics,
    };

    rules
        .iter()
        .filter(|rule| (rule.applies)(&ctx))
        .map(|rule| {
            debug!("Rule {} matched ({:?})", rule.id, rule.group);
            let mut recommendation = (rule.recommend)(&ctx);
            recommendation.rule_id = rule.id.to_string();
            recommendation.tier = rule.tier;
            recommendation
        })
        .collect()
}
