//! The fixed catalog of setup rules.
//!
//! Each rule pairs a predicate over the diagnostic inputs with a template
//! that builds the recommendation. Rules never see each other's output and
//! the catalog order is the tie-break order for everything downstream.

use serde::{Deserialize, Serialize};

use super::metrics::{ComponentKind, DerivedMetrics, adjusted_clicks};
use super::profile::{
    AeroConfiguration, ConfigurationProfile, EndPlateSize, Measurement, SurfaceCondition,
    Symptom, SymptomProfile, TemperatureBand, TireCompound, TrackCategory, TrackContext,
};
use super::recommendation::{Category, Recommendation, Severity};
use super::tier::AnalysisTier;

// Aero thresholds, splitter heights in inches and wing angles in degrees
const SPLITTER_LOW_IN: f64 = 2.0;
const SPLITTER_HIGH_IN: f64 = 4.0;
const WING_HIGH_DEG: f64 = 15.0;
const WING_LOW_DEG: f64 = 5.0;
const STABILITY_WING_DEG: f64 = 10.0;
const ENTRY_UNDERSTEER_SPLITTER_IN: f64 = 3.0;
const ENTRY_UNDERSTEER_WING_DEG: f64 = 12.0;
const EXIT_OVERSTEER_WING_DEG: f64 = 10.0;
const ENTRY_OVERSTEER_SPLITTER_IN: f64 = 2.0;
const CROSS_WEIGHT_TOLERANCE_PCT: f64 = 2.0;

/// Concern a rule belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RuleGroup {
    /// Spring, damper, sway bar and ride height advice keyed off symptoms
    SuspensionBalance,
    /// Observations about the fitted aero devices alone
    AeroBalance,
    /// Symptoms that are best cured with an aero change
    SymptomAero,
    /// Click-level damper changes for tires and track conditions
    ShockTuning,
}

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub config: &'a ConfigurationProfile,
    pub symptoms: &'a SymptomProfile,
    pub track: &'a TrackContext,
    pub metrics: &'a DerivedMetrics,
}

impl<'a> RuleContext<'a> {
    fn has(&self, symptom: Symptom) -> bool {
        self.symptoms.has(symptom)
    }

    fn aero(&self) -> AeroConfiguration {
        self.config.aero.configuration()
    }

    /// Splitter height, only when the configuration has front aero.
    fn splitter(&self) -> Option<Measurement<'a>> {
        if !self.config.aero.has_front_aero() {
            return None;
        }
        self.config.aero.splitter_height()
    }

    /// Wing angle, only when the configuration has a rear wing.
    fn wing(&self) -> Option<Measurement<'a>> {
        if !self.config.aero.has_rear_wing() {
            return None;
        }
        self.config.aero.rear_wing_angle()
    }

    fn splitter_above(&self, threshold: f64) -> bool {
        self.splitter().is_some_and(|h| h.value > threshold)
    }

    fn splitter_below(&self, threshold: f64) -> bool {
        self.splitter().is_some_and(|h| h.value < threshold)
    }

    fn wing_above(&self, threshold: f64) -> bool {
        self.wing().is_some_and(|a| a.value > threshold)
    }

    fn wing_below(&self, threshold: f64) -> bool {
        self.wing().is_some_and(|a| a.value < threshold)
    }

    /// Splitter height as the user typed it.
    fn splitter_text(&self) -> &'a str {
        self.splitter().map(|h| h.raw).unwrap_or("?")
    }

    /// Wing angle as the user typed it.
    fn wing_text(&self) -> &'a str {
        self.wing().map(|a| a.raw).unwrap_or("?")
    }

    fn clicks(&self, base: u32, component: ComponentKind) -> u32 {
        adjusted_clicks(base, self.track.category, component).max(1)
    }
}

/// One entry of the catalog.
pub struct Rule {
    pub id: &'static str,
    pub group: RuleGroup,
    /// Lowest analysis tier that shows this rule's output
    pub tier: AnalysisTier,
    pub applies: fn(&RuleContext) -> bool,
    pub recommend: fn(&RuleContext) -> Recommendation,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("group", &self.group)
            .field("tier", &self.tier)
            .finish()
    }
}

fn plural(count: u32, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// The full rule catalog in evaluation order.
pub fn catalog() -> &'static [Rule] {
    &CATALOG
}

static CATALOG: [Rule; 32] = [
    // Suspension balance
    Rule {
        id: "entry-understeer",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Basic,
        applies: |ctx| ctx.has(Symptom::EntryUndersteer),
        recommend: entry_understeer,
    },
    Rule {
        id: "entry-oversteer",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Basic,
        applies: |ctx| ctx.has(Symptom::EntryOversteer),
        recommend: entry_oversteer,
    },
    Rule {
        id: "mid-corner-understeer",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Basic,
        applies: |ctx| ctx.has(Symptom::MidCornerUndersteer),
        recommend: mid_corner_understeer,
    },
    Rule {
        id: "mid-corner-oversteer",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Basic,
        applies: |ctx| ctx.has(Symptom::MidCornerOversteer),
        recommend: mid_corner_oversteer,
    },
    Rule {
        id: "exit-understeer",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Basic,
        applies: |ctx| ctx.has(Symptom::ExitUndersteer),
        recommend: exit_understeer,
    },
    Rule {
        id: "exit-oversteer",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Basic,
        applies: |ctx| ctx.has(Symptom::ExitOversteer),
        recommend: exit_oversteer,
    },
    Rule {
        id: "braking-instability",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.has(Symptom::BrakingInstability),
        recommend: braking_instability,
    },
    Rule {
        id: "high-speed-rear-toe",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.has(Symptom::WanderingHighSpeed),
        recommend: high_speed_rear_toe,
    },
    Rule {
        id: "inside-tire-wear",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Advanced,
        applies: |ctx| ctx.has(Symptom::InsideTireWear),
        recommend: inside_tire_wear,
    },
    Rule {
        id: "outside-tire-wear",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Advanced,
        applies: |ctx| ctx.has(Symptom::OutsideTireWear),
        recommend: outside_tire_wear,
    },
    Rule {
        id: "cross-weight-imbalance",
        group: RuleGroup::SuspensionBalance,
        tier: AnalysisTier::Advanced,
        applies: |ctx| {
            matches!(
                ctx.track.category,
                TrackCategory::RoadCourse | TrackCategory::Autocross
            ) && ctx
                .config
                .corner_balance
                .cross_weight()
                .is_some_and(|cross| (cross - 50.0).abs() > CROSS_WEIGHT_TOLERANCE_PCT)
        },
        recommend: cross_weight_imbalance,
    },
    // Aero balance
    Rule {
        id: "aero-front-only",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.aero() == AeroConfiguration::FrontOnly,
        recommend: aero_front_only,
    },
    Rule {
        id: "aero-rear-only",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.aero() == AeroConfiguration::RearWing,
        recommend: aero_rear_only,
    },
    Rule {
        id: "aero-balanced",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.aero() == AeroConfiguration::Full,
        recommend: aero_balanced,
    },
    Rule {
        id: "splitter-too-low",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.splitter_below(SPLITTER_LOW_IN),
        recommend: splitter_too_low,
    },
    Rule {
        id: "splitter-high",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.splitter_above(SPLITTER_HIGH_IN),
        recommend: splitter_high,
    },
    Rule {
        id: "wing-angle-high",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.wing_above(WING_HIGH_DEG),
        recommend: wing_angle_high,
    },
    Rule {
        id: "wing-angle-low",
        group: RuleGroup::AeroBalance,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.wing_below(WING_LOW_DEG),
        recommend: wing_angle_low,
    },
    // Symptom to aero
    Rule {
        id: "high-speed-add-rear-wing",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Basic,
        applies: |ctx| {
            ctx.has(Symptom::WanderingHighSpeed)
                && matches!(
                    ctx.aero(),
                    AeroConfiguration::None | AeroConfiguration::FrontOnly
                )
        },
        recommend: high_speed_add_rear_wing,
    },
    Rule {
        id: "high-speed-increase-wing",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Basic,
        applies: |ctx| {
            ctx.has(Symptom::WanderingHighSpeed)
                && ctx.config.aero.has_rear_wing()
                && ctx.wing_below(STABILITY_WING_DEG)
        },
        recommend: high_speed_increase_wing,
    },
    Rule {
        id: "entry-understeer-lower-splitter",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Standard,
        applies: |ctx| {
            ctx.has(Symptom::EntryUndersteer) && ctx.splitter_above(ENTRY_UNDERSTEER_SPLITTER_IN)
        },
        recommend: entry_understeer_lower_splitter,
    },
    Rule {
        id: "entry-understeer-reduce-wing",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Standard,
        applies: |ctx| {
            ctx.has(Symptom::EntryUndersteer) && ctx.wing_above(ENTRY_UNDERSTEER_WING_DEG)
        },
        recommend: entry_understeer_reduce_wing,
    },
    Rule {
        id: "exit-oversteer-increase-wing",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.has(Symptom::ExitOversteer) && ctx.wing_below(EXIT_OVERSTEER_WING_DEG),
        recommend: exit_oversteer_increase_wing,
    },
    Rule {
        id: "exit-oversteer-end-plates",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Standard,
        applies: |ctx| {
            ctx.has(Symptom::ExitOversteer)
                && ctx.config.aero.end_plate_size() == Some(EndPlateSize::Small)
        },
        recommend: exit_oversteer_end_plates,
    },
    Rule {
        id: "mid-corner-aero-balance",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Standard,
        applies: |ctx| ctx.has(Symptom::MidCornerUndersteer),
        recommend: mid_corner_aero_balance,
    },
    Rule {
        id: "entry-oversteer-raise-splitter",
        group: RuleGroup::SymptomAero,
        tier: AnalysisTier::Standard,
        applies: |ctx| {
            ctx.has(Symptom::EntryOversteer) && ctx.splitter_below(ENTRY_OVERSTEER_SPLITTER_IN)
        },
        recommend: entry_oversteer_raise_splitter,
    },
    // Shock tuning
    Rule {
        id: "slick-compression",
        group: RuleGroup::ShockTuning,
        tier: AnalysisTier::Premium,
        applies: |ctx| ctx.config.tires.compound_class() == Some(TireCompound::Slick),
        recommend: slick_compression,
    },
    Rule {
        id: "semi-slick-compression",
        group: RuleGroup::ShockTuning,
        tier: AnalysisTier::Premium,
        applies: |ctx| ctx.config.tires.compound_class() == Some(TireCompound::SemiSlick),
        recommend: semi_slick_compression,
    },
    Rule {
        id: "drag-radial-extension",
        group: RuleGroup::ShockTuning,
        tier: AnalysisTier::Premium,
        applies: |ctx| ctx.config.tires.compound_class() == Some(TireCompound::DragRadial),
        recommend: drag_radial_extension,
    },
    Rule {
        id: "wet-surface-rebound",
        group: RuleGroup::ShockTuning,
        tier: AnalysisTier::Premium,
        applies: |ctx| {
            matches!(
                ctx.track.surface,
                SurfaceCondition::Wet | SurfaceCondition::Damp
            )
        },
        recommend: wet_surface_rebound,
    },
    Rule {
        id: "hot-track-damping",
        group: RuleGroup::ShockTuning,
        tier: AnalysisTier::Premium,
        applies: |ctx| ctx.track.temperature == TemperatureBand::Hot,
        recommend: hot_track_damping,
    },
    Rule {
        id: "cold-track-damping",
        group: RuleGroup::ShockTuning,
        tier: AnalysisTier::Premium,
        applies: |ctx| ctx.track.temperature == TemperatureBand::Cold,
        recommend: cold_track_damping,
    },
];

fn entry_understeer(_ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "entry-understeer",
        "Free up the front on turn-in",
        Symptom::EntryUndersteer.to_string(),
        Category::Entry,
        Severity::High,
    )
    .solution("Soften front springs")
    .solution("Soften front compression damping")
    .solution("Lower front ride height")
    .rationale(
        "On entry the car pitches forward onto the front tires. Softer front springs and \
         compression let the front take a set and build grip instead of skating across the \
         surface.",
    )
    .caution(
        "Never raise front ride height to fix entry oversteer; it unloads the splitter and \
         makes the entry worse.",
    )
    .important(
        "Light front contact with the ground under heavy braking is acceptable at this ride \
         height. Only raise the front if the splitter is being damaged.",
    )
}

fn entry_oversteer(ctx: &RuleContext) -> Recommendation {
    let steps = ctx.clicks(1, ComponentKind::SwayBar);
    Recommendation::new(
        "entry-oversteer",
        "Calm the rear on turn-in",
        Symptom::EntryOversteer.to_string(),
        Category::Entry,
        Severity::High,
    )
    .solution("Move brake bias forward")
    .solution("Soften rear rebound damping")
    .solution(format!("Stiffen front sway bar by {}", plural(steps, "step")))
    .rationale(
        "The rear goes light as weight moves forward under braking. Keeping more braking on the \
         front axle and letting the rear extend slower keeps load on the rear tires.",
    )
    .caution("Do not raise front ride height to cure entry oversteer.")
}

fn mid_corner_understeer(ctx: &RuleContext) -> Recommendation {
    let steps = ctx.clicks(1, ComponentKind::SwayBar);
    Recommendation::new(
        "mid-corner-understeer",
        "Support the front through the apex",
        Symptom::MidCornerUndersteer.to_string(),
        Category::MidCorner,
        Severity::High,
    )
    .solution("Stiffen front springs")
    .solution(format!("Stiffen front sway bar by {}", plural(steps, "step")))
    .solution("Increase front spring preload")
    .rationale(
        "At steady state the front rolls too far and runs the outside tire off its camber. More \
         front roll stiffness keeps the contact patch flat.",
    )
    .important(
        "This is the opposite of the entry and exit understeer fixes. Mid-corner understeer is \
         notoriously hard to self-diagnose; make sure the push is not left over from corner entry \
         before stiffening the front.",
    )
}

fn mid_corner_oversteer(ctx: &RuleContext) -> Recommendation {
    let steps = ctx.clicks(1, ComponentKind::SwayBar);
    Recommendation::new(
        "mid-corner-oversteer",
        "Settle the rear through the apex",
        Symptom::MidCornerOversteer.to_string(),
        Category::MidCorner,
        Severity::Medium,
    )
    .solution(format!("Soften rear sway bar by {}", plural(steps, "step")))
    .solution("Soften rear springs")
    .rationale("Less rear roll stiffness shifts lateral load transfer forward and adds rear grip.")
}

fn exit_understeer(ctx: &RuleContext) -> Recommendation {
    let steps = ctx.clicks(1, ComponentKind::SwayBar);
    Recommendation::new(
        "exit-understeer",
        "Help the car rotate on power",
        Symptom::ExitUndersteer.to_string(),
        Category::Exit,
        Severity::Medium,
    )
    .solution(format!("Stiffen rear sway bar by {}", plural(steps, "step")))
    .solution("Soften front rebound damping")
    .rationale(
        "As the car squats on throttle the front unloads. Slower front rebound holds the nose \
         down and a stiffer rear bar lets the rear rotate.",
    )
}

fn exit_oversteer(ctx: &RuleContext) -> Recommendation {
    let steps = ctx.clicks(1, ComponentKind::SwayBar);
    Recommendation::new(
        "exit-oversteer",
        "Put the power down",
        Symptom::ExitOversteer.to_string(),
        Category::Exit,
        Severity::High,
    )
    .solution("Soften rear springs")
    .solution("Soften rear compression damping")
    .solution("Lower rear ride height")
    .solution(format!("Soften rear sway bar by {}", plural(steps, "step")))
    .rationale(
        "Under throttle the car squats onto the rear. A softer, lower rear lets the rear tires \
         take the load gradually instead of breaking loose.",
    )
    .caution(
        "Use ride height sensitivity to check the spring direction first: if small rear ride \
         height changes swing the balance a lot the rear spring is too stiff, if they barely \
         register it may be too soft.",
    )
}

fn braking_instability(_ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "braking-instability",
        "Stabilize the car under braking",
        Symptom::BrakingInstability.to_string(),
        Category::Stability,
        Severity::High,
    )
    .solution("Move brake bias forward")
    .solution("Stiffen front compression damping")
    .solution("Check rear toe for toe-in")
    .rationale(
        "A rear that locks first or a nose that dives too fast both make the car step around \
         under braking.",
    )
}

fn high_speed_rear_toe(_ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "high-speed-rear-toe",
        "Check rear toe",
        Symptom::WanderingHighSpeed.to_string(),
        Category::Stability,
        Severity::Medium,
    )
    .solution("Set rear toe to 1/16\" total toe-in")
    .solution("Check for bump steer at the rear")
    .rationale("Rear toe-out makes the car wander at speed regardless of the aero package.")
}

fn inside_tire_wear(ctx: &RuleContext) -> Recommendation {
    let mut rec = Recommendation::new(
        "inside-tire-wear",
        "Even out inside edge wear",
        Symptom::InsideTireWear.to_string(),
        Category::Wear,
        Severity::Low,
    );
    rec = match ctx.config.alignment.camber.front_average() {
        Some(camber) => rec.solution(format!(
            "Reduce negative camber from {camber:.1}° by 0.5°"
        )),
        None => rec.solution("Reduce negative camber by 0.5°"),
    };
    rec.solution("Reduce front toe-out")
        .rationale(
            "Too much negative camber or toe-out loads the inside shoulder on the straights.",
        )
        .important(
            "Confirm with a pyrometer: the inside edge should run 5-10°F hotter than the \
             outside, not more.",
        )
}

fn outside_tire_wear(ctx: &RuleContext) -> Recommendation {
    let mut rec = Recommendation::new(
        "outside-tire-wear",
        "Even out outside edge wear",
        Symptom::OutsideTireWear.to_string(),
        Category::Wear,
        Severity::Low,
    );
    rec = match ctx.config.alignment.camber.front_average() {
        Some(camber) => rec.solution(format!(
            "Increase negative camber from {camber:.1}° by 0.5°"
        )),
        None => rec.solution("Increase negative camber by 0.5°"),
    };
    rec.solution("Increase tire pressure by 1 psi")
        .rationale("The tire is rolling onto its shoulder in the corners.")
}

fn cross_weight_imbalance(ctx: &RuleContext) -> Recommendation {
    let cross = ctx.config.corner_balance.cross_weight().unwrap_or(50.0);
    Recommendation::new(
        "cross-weight-imbalance",
        "Square up the corner weights",
        "cross weight",
        Category::Balance,
        Severity::Medium,
    )
    .solution(format!("Adjust cross weight from {cross:.1}% toward 50%"))
    .rationale(
        "On a track that turns both ways, cross weight away from 50% makes the car handle \
         differently in left and right handers.",
    )
}

fn aero_front_only(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "aero-front-only",
        "Front-only aero",
        "aero imbalance",
        Category::Balance,
        Severity::Medium,
    )
    .solution("Add a rear wing to balance the front downforce")
    .rationale(format!(
        "All of the aero load is at the front ({}% front). The car will understeer more as speed \
         rises and can become loose at the rear on fast corners.",
        ctx.metrics.aero_balance_percent_front
    ))
}

fn aero_rear_only(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "aero-rear-only",
        "Rear-only aero",
        "aero imbalance",
        Category::Balance,
        Severity::Medium,
    )
    .solution("Add a front splitter to balance the rear wing")
    .rationale(format!(
        "All of the aero load is at the rear ({}% front). Expect high-speed understeer and a \
         balance that shifts toward oversteer as the wing stalls in traffic.",
        ctx.metrics.aero_balance_percent_front
    ))
}

fn aero_balanced(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "aero-balanced",
        "Balanced aero package",
        "aero balance",
        Category::Balance,
        Severity::Low,
    )
    .solution("Tune balance with small wing angle or splitter height changes")
    .rationale(format!(
        "Front and rear aero are both fitted ({}% front, {} downforce), so the high-speed balance \
         can be trimmed without changing mechanical grip.",
        ctx.metrics.aero_balance_percent_front,
        ctx.metrics.downforce_level.to_string().to_lowercase()
    ))
}

fn splitter_too_low(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "splitter-too-low",
        "Splitter will scrape",
        "splitter height",
        Category::Wear,
        Severity::Medium,
    )
    .solution(format!(
        "Raise front splitter from {}\" to at least {SPLITTER_LOW_IN:.1}\"",
        ctx.splitter_text()
    ))
    .rationale(
        "Below 2\" the splitter will hit curbs and bumps, wearing it away and upsetting the car.",
    )
    .caution("Check splitter mounts for damage after every session at this height.")
}

fn splitter_high(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "splitter-high",
        "Splitter is high",
        "splitter height",
        Category::Balance,
        Severity::Low,
    )
    .solution(format!(
        "Lower front splitter from {}\" toward {SPLITTER_HIGH_IN:.1}\" if the track allows",
        ctx.splitter_text()
    ))
    .rationale("A high splitter clears curbs easily but makes little front downforce.")
}

fn wing_angle_high(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "wing-angle-high",
        "Wing angle costs top speed",
        "wing drag",
        Category::Balance,
        Severity::Medium,
    )
    .solution(format!(
        "Reduce rear wing angle from {}° to {WING_HIGH_DEG:.0}° or less on fast tracks",
        ctx.wing_text()
    ))
    .rationale("Above 15° the drag penalty grows faster than the downforce gain.")
}

fn wing_angle_low(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "wing-angle-low",
        "Conservative wing angle",
        "wing grip",
        Category::Balance,
        Severity::Low,
    )
    .solution(format!(
        "Increase rear wing angle from {}° if the rear lacks grip in fast corners",
        ctx.wing_text()
    ))
    .rationale("Below 5° the wing makes little rear grip; it is a low-drag, conservative setting.")
}

fn high_speed_add_rear_wing(_ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "high-speed-add-rear-wing",
        "Add a rear wing",
        Symptom::WanderingHighSpeed.to_string(),
        Category::Stability,
        Severity::Critical,
    )
    .solution("Install a rear wing set at 8-12°")
    .solution("Fit medium end plates")
    .rationale(
        "Without rear downforce the center of pressure sits ahead of the center of gravity, so \
         the car has no aerodynamic yaw stability and wanders at speed. A rear wing moves the \
         center of pressure rearward and loads the rear tires as speed rises.",
    )
    .caution(
        "Re-check the high-speed balance after fitting; the car will understeer more in \
         fast corners.",
    )
}

fn high_speed_increase_wing(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "high-speed-increase-wing",
        "Increase rear wing angle",
        Symptom::WanderingHighSpeed.to_string(),
        Category::Stability,
        Severity::High,
    )
    .solution(format!(
        "Increase rear wing angle from {}° to 10-15°",
        ctx.wing_text()
    ))
    .rationale(
        "The current angle leaves too little rear load to keep the car straight at speed. \
         10-15° gives stable rear downforce before drag becomes significant.",
    )
}

fn entry_understeer_lower_splitter(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "entry-understeer-lower-splitter",
        "Lower the splitter",
        Symptom::EntryUndersteer.to_string(),
        Category::Entry,
        Severity::Medium,
    )
    .solution(format!(
        "Lower front splitter from {}\" to 2.0-2.5\"",
        ctx.splitter_text()
    ))
    .rationale("A lower splitter works closer to the ground and adds front downforce on turn-in.")
}

fn entry_understeer_reduce_wing(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "entry-understeer-reduce-wing",
        "Take some rear wing out",
        Symptom::EntryUndersteer.to_string(),
        Category::Entry,
        Severity::Medium,
    )
    .solution(format!(
        "Reduce rear wing angle from {}° to 8-12°",
        ctx.wing_text()
    ))
    .rationale("Too much rear wing moves the aero balance rearward and pushes the front on entry.")
}

fn exit_oversteer_increase_wing(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "exit-oversteer-increase-wing",
        "Add rear wing",
        Symptom::ExitOversteer.to_string(),
        Category::Exit,
        Severity::Medium,
    )
    .solution(format!(
        "Increase rear wing angle from {}° to 10-14°",
        ctx.wing_text()
    ))
    .rationale("More rear downforce plants the driven wheels on corner exit.")
}

fn exit_oversteer_end_plates(_ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "exit-oversteer-end-plates",
        "Upgrade end plates",
        Symptom::ExitOversteer.to_string(),
        Category::Exit,
        Severity::Low,
    )
    .solution("Upgrade end plates from small to medium or large")
    .rationale("Larger end plates cut wing-tip vortices so the wing keeps working in yaw.")
}

fn mid_corner_aero_balance(_ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "mid-corner-aero-balance",
        "Shift aero balance forward",
        Symptom::MidCornerUndersteer.to_string(),
        Category::MidCorner,
        Severity::Medium,
    )
    .solution("Reduce rear wing angle by 2°")
    .solution("Lower front splitter by 0.25\"")
    .rationale("Either change moves the aero balance forward for more front grip at the apex.")
    .important("Make one of these changes at a time, not both.")
}

fn entry_oversteer_raise_splitter(ctx: &RuleContext) -> Recommendation {
    Recommendation::new(
        "entry-oversteer-raise-splitter",
        "Raise the splitter",
        Symptom::EntryOversteer.to_string(),
        Category::Entry,
        Severity::Medium,
    )
    .solution(format!(
        "Raise front splitter from {}\" to 2.0-2.5\"",
        ctx.splitter_text()
    ))
    .rationale(
        "A very low splitter makes the front bite too hard under braking and swings the rear.",
    )
}

fn slick_compression(ctx: &RuleContext) -> Recommendation {
    let clicks = ctx.clicks(2, ComponentKind::Spring);
    Recommendation::new(
        "slick-compression",
        "Damping for slicks",
        "tire compound",
        Category::Balance,
        Severity::Low,
    )
    .solution(format!(
        "Stiffen compression damping by {} all around",
        plural(clicks, "click")
    ))
    .rationale(
        "Slicks generate more grip and load; extra compression controls the added body motion.",
    )
}

fn semi_slick_compression(ctx: &RuleContext) -> Recommendation {
    let clicks = ctx.clicks(1, ComponentKind::Spring);
    Recommendation::new(
        "semi-slick-compression",
        "Damping for semi-slicks",
        "tire compound",
        Category::Balance,
        Severity::Low,
    )
    .solution(format!(
        "Soften compression damping by {} all around",
        plural(clicks, "click")
    ))
    .rationale("Semi-slick sidewalls are softer; less compression lets the tire stay in contact.")
}

fn drag_radial_extension(ctx: &RuleContext) -> Recommendation {
    let clicks = ctx.clicks(3, ComponentKind::Spring);
    Recommendation::new(
        "drag-radial-extension",
        "Launch damping for drag radials",
        "tire compound",
        Category::Exit,
        Severity::Low,
    )
    .solution(format!(
        "Soften front extension damping by {}",
        plural(clicks, "click")
    ))
    .solution("Stiffen rear extension damping to hold the rear down at launch")
    .rationale("Drag radials want fast weight transfer to the rear when the car launches.")
}

fn wet_surface_rebound(ctx: &RuleContext) -> Recommendation {
    let base = if ctx.track.surface == SurfaceCondition::Wet {
        2
    } else {
        1
    };
    let clicks = ctx.clicks(base, ComponentKind::Spring);
    Recommendation::new(
        "wet-surface-rebound",
        "Damping for a low-grip surface",
        "track surface",
        Category::Stability,
        Severity::Low,
    )
    .solution(format!(
        "Soften rebound damping by {} all around",
        plural(clicks, "click")
    ))
    .rationale("On a wet or damp surface softer rebound keeps the tires in contact over bumps.")
}

fn hot_track_damping(ctx: &RuleContext) -> Recommendation {
    let clicks = ctx.clicks(1, ComponentKind::Spring);
    Recommendation::new(
        "hot-track-damping",
        "Damping for a hot track",
        "track temperature",
        Category::Stability,
        Severity::Low,
    )
    .solution(format!(
        "Stiffen overall damping by {}",
        plural(clicks, "click")
    ))
    .rationale("Damper oil thins in the heat; one more click restores the baseline feel.")
}

fn cold_track_damping(ctx: &RuleContext) -> Recommendation {
    let clicks = ctx.clicks(1, ComponentKind::Spring);
    Recommendation::new(
        "cold-track-damping",
        "Damping for a cold track",
        "track temperature",
        Category::Stability,
        Severity::Low,
    )
    .solution(format!(
        "Soften overall damping by {}",
        plural(clicks, "click")
    ))
    .rationale("Cold oil is thicker and a cold track has less grip; soften to keep compliance.")
}
