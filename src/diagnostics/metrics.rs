use serde::{Deserialize, Serialize};

use super::profile::{ConfigurationProfile, TrackCategory};

/// Splitter height at or above which the splitter adds only its base load.
const SPLITTER_REFERENCE_HEIGHT_IN: f64 = 4.0;
const SPLITTER_BASE_WEIGHT: f64 = 10.0;
const SPLITTER_HEIGHT_WEIGHT: f64 = 5.0;
const WING_ANGLE_WEIGHT: f64 = 2.0;
const WING_ANGLE_MAX_DEG: f64 = 30.0;
const CANARD_WEIGHT: f64 = 5.0;
const CANARD_MAX_COUNT: f64 = 8.0;

const MEDIUM_DOWNFORCE_THRESHOLD: f64 = 20.0;
const HIGH_DOWNFORCE_THRESHOLD: f64 = 45.0;

const NEUTRAL_AERO_BALANCE: u8 = 50;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DownforceLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl std::fmt::Display for DownforceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownforceLevel::Low => write!(f, "Low"),
            DownforceLevel::Medium => write!(f, "Medium"),
            DownforceLevel::High => write!(f, "High"),
        }
    }
}

/// Suspension components whose adjustment size depends on the track type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentKind {
    Spring,
    SwayBar,
}

/// Values derived from the raw setup before any rule runs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DerivedMetrics {
    pub downforce_level: DownforceLevel,
    /// Weighted total used to classify `downforce_level`
    pub downforce_score: f64,
    /// Front share of the aero load, 0-100. 50 when there is no aero data.
    pub aero_balance_percent_front: u8,
}

impl Default for DerivedMetrics {
    fn default() -> Self {
        Self {
            downforce_level: DownforceLevel::Low,
            downforce_score: 0.0,
            aero_balance_percent_front: NEUTRAL_AERO_BALANCE,
        }
    }
}

/// Compute the derived aero metrics for a setup.
///
/// Never fails: any aero field that is missing or does not parse simply
/// contributes nothing.
pub fn compute_metrics(config: &ConfigurationProfile) -> DerivedMetrics {
    let aero = &config.aero;

    let splitter_force = aero
        .splitter_height()
        .map(|height| {
            let drop = (SPLITTER_REFERENCE_HEIGHT_IN - height.value)
                .clamp(0.0, SPLITTER_REFERENCE_HEIGHT_IN);
            SPLITTER_BASE_WEIGHT + SPLITTER_HEIGHT_WEIGHT * drop
        })
        .unwrap_or(0.0);
    let canard_force = aero
        .canard_count()
        .map(|count| count.clamp(0.0, CANARD_MAX_COUNT).floor() * CANARD_WEIGHT)
        .unwrap_or(0.0);
    let wing_force = aero
        .rear_wing_angle()
        .map(|angle| angle.value.clamp(0.0, WING_ANGLE_MAX_DEG) * WING_ANGLE_WEIGHT)
        .unwrap_or(0.0);

    let front = splitter_force + canard_force;
    let rear = wing_force;
    let downforce_score = front + rear;

    DerivedMetrics {
        downforce_level: classify_downforce(downforce_score),
        downforce_score,
        aero_balance_percent_front: aero_balance(front, rear),
    }
}

fn classify_downforce(score: f64) -> DownforceLevel {
    if score < MEDIUM_DOWNFORCE_THRESHOLD {
        DownforceLevel::Low
    } else if score < HIGH_DOWNFORCE_THRESHOLD {
        DownforceLevel::Medium
    } else {
        DownforceLevel::High
    }
}

fn aero_balance(front: f64, rear: f64) -> u8 {
    let total = front + rear;
    if total <= 0.0 {
        return NEUTRAL_AERO_BALANCE;
    }
    (front / total * 100.0).round().clamp(0.0, 100.0) as u8
}

/// How much bigger or smaller an adjustment should be on a given track type.
///
/// Combinations without an entry use 1.0.
pub fn track_adjustment_multiplier(track: TrackCategory, component: ComponentKind) -> f64 {
    match (track, component) {
        (TrackCategory::Superspeedway, ComponentKind::Spring) => 1.5,
        (TrackCategory::OvalIntermediate, ComponentKind::Spring) => 1.3,
        (TrackCategory::OvalShort, ComponentKind::Spring) => 1.2,
        (TrackCategory::DragStrip, ComponentKind::Spring) => 0.7,
        (TrackCategory::Autocross, ComponentKind::SwayBar) => 1.3,
        (TrackCategory::OvalShort, ComponentKind::SwayBar) => 1.2,
        (TrackCategory::DragStrip, ComponentKind::SwayBar) => 0.5,
        _ => 1.0,
    }
}

/// Scale a base click/step count for the track, rounding to whole clicks.
pub fn adjusted_clicks(base_clicks: u32, track: TrackCategory, component: ComponentKind) -> u32 {
    (base_clicks as f64 * track_adjustment_multiplier(track, component)).round() as u32
}
