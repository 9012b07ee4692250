use log::debug;
use serde::{Deserialize, Serialize};

pub mod aggregator;
pub mod catalog;
pub mod evaluator;
pub mod metrics;
pub mod profile;
pub mod recommendation;
pub mod tier;

pub use aggregator::{Conflict, aggregate, find_conflicts, group_by_category};
pub use catalog::{Rule, RuleGroup, catalog};
pub use evaluator::evaluate;
pub use metrics::{ComponentKind, DerivedMetrics, DownforceLevel, compute_metrics};
pub use profile::{ConfigurationProfile, Symptom, SymptomProfile, TrackContext};
pub use recommendation::{Category, Recommendation, Severity};
pub use tier::{AnalysisTier, select};

/// Produce the setup advice a caller at `tier` is entitled to.
///
/// Pure and stateless: the same inputs always give the same list, in the
/// same order. An empty list means no rule matched, not that something
/// went wrong.
pub fn run_diagnostics(
    config: &ConfigurationProfile,
    symptoms: &SymptomProfile,
    track: &TrackContext,
    tier: AnalysisTier,
) -> Vec<Recommendation> {
    let metrics = compute_metrics(config);
    let matched = evaluate(catalog(), config, symptoms, track, &metrics);
    debug!("{} rules matched before tier selection", matched.len());
    select(&aggregate(matched), tier)
}

/// A diagnostic job as read from a batch file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DiagnosticRequest {
    /// Name of the setup being diagnosed, echoed in the report
    pub setup_name: Option<String>,
    pub config: ConfigurationProfile,
    pub symptoms: SymptomProfile,
    pub track: TrackContext,
    /// Overrides the engine's default tier when set
    pub tier: Option<AnalysisTier>,
}

/// Everything the engine has to say about one setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticReport {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub setup_name: Option<String>,
    pub tier: AnalysisTier,
    pub metrics: DerivedMetrics,
    pub recommendations: Vec<Recommendation>,
    /// Contradictory solutions among the shown recommendations
    pub conflicts: Vec<Conflict>,
}

impl DiagnosticReport {
    pub fn is_clean(&self) -> bool {
        self.recommendations.is_empty()
    }
}

/// Runs diagnostics on behalf of a caller with a fixed entitlement.
///
/// Holds no state between calls beyond the tier it was created with.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiagnosticEngine {
    tier: AnalysisTier,
}

impl DiagnosticEngine {
    pub fn new(tier: AnalysisTier) -> Self {
        Self { tier }
    }

    pub fn tier(&self) -> AnalysisTier {
        self.tier
    }

    pub fn recommendations(
        &self,
        config: &ConfigurationProfile,
        symptoms: &SymptomProfile,
        track: &TrackContext,
    ) -> Vec<Recommendation> {
        run_diagnostics(config, symptoms, track, self.tier)
    }

    /// Build a full report, including metrics and any conflicting advice.
    pub fn report(
        &self,
        config: &ConfigurationProfile,
        symptoms: &SymptomProfile,
        track: &TrackContext,
    ) -> DiagnosticReport {
        let recommendations = self.recommendations(config, symptoms, track);
        DiagnosticReport {
            setup_name: None,
            tier: self.tier,
            metrics: compute_metrics(config),
            conflicts: find_conflicts(&recommendations),
            recommendations,
        }
    }

    /// Handle a batch request, honouring its tier override.
    pub fn handle(&self, request: &DiagnosticRequest) -> DiagnosticReport {
        let engine = request.tier.map(DiagnosticEngine::new).unwrap_or(*self);
        let mut report = engine.report(&request.config, &request.symptoms, &request.track);
        report.setup_name = request.setup_name.clone();
        report
    }
}
