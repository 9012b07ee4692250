use serde::{Deserialize, Serialize};

/// Parse an optional form field into a finite number.
///
/// Form state carries numbers as text. Empty strings, text that does not
/// parse, and `NaN`/infinite values are all treated as absent.
pub fn parse_numeric(raw: &Option<String>) -> Option<f64> {
    Measurement::from_field(raw).map(|m| m.value)
}

/// A numeric form field that parsed successfully.
///
/// Keeps the trimmed text the user typed so recommendation templates can
/// quote it back verbatim ("6", not "6.0").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Measurement<'a> {
    pub raw: &'a str,
    pub value: f64,
}

impl<'a> Measurement<'a> {
    pub fn from_field(raw: &'a Option<String>) -> Option<Self> {
        let raw = raw.as_deref()?.trim();
        let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
        Some(Self { raw, value })
    }
}

/// Normalize free-form enum text ("Rear Wing", "rear_wing") to "rear-wing".
fn normalize_choice(raw: &Option<String>) -> Option<String> {
    let text = raw.as_deref()?.trim();
    if text.is_empty() {
        return None;
    }
    Some(
        text.to_lowercase()
            .split(|c: char| c.is_whitespace() || c == '_' || c == '-')
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("-"),
    )
}

/// A value per wheel: left-front, right-front, left-rear, right-rear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CornerValues {
    pub lf: Option<String>,
    pub rf: Option<String>,
    pub lr: Option<String>,
    pub rr: Option<String>,
}

impl CornerValues {
    /// Average of the two front corners that parse, if any.
    pub fn front_average(&self) -> Option<f64> {
        average([&self.lf, &self.rf])
    }

    /// Average of the two rear corners that parse, if any.
    pub fn rear_average(&self) -> Option<f64> {
        average([&self.lr, &self.rr])
    }
}

fn average<const N: usize>(fields: [&Option<String>; N]) -> Option<f64> {
    let values: Vec<f64> = fields.into_iter().filter_map(parse_numeric).collect();
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SuspensionSettings {
    pub front_spring_rate: Option<String>,
    pub rear_spring_rate: Option<String>,
    pub front_ride_height: Option<String>,
    pub rear_ride_height: Option<String>,
    pub front_sway_bar: Option<String>,
    pub rear_sway_bar: Option<String>,
    /// Compression damper clicks per corner
    pub compression_clicks: CornerValues,
    /// Rebound damper clicks per corner
    pub rebound_clicks: CornerValues,
    pub reservoir_pressure: Option<String>,
}

/// Inner, middle and outer tread temperatures of one tire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoneTemperatures {
    pub inner: Option<String>,
    pub middle: Option<String>,
    pub outer: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TireTemperatures {
    pub lf: ZoneTemperatures,
    pub rf: ZoneTemperatures,
    pub lr: ZoneTemperatures,
    pub rr: ZoneTemperatures,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TireSettings {
    pub front_size: Option<String>,
    pub rear_size: Option<String>,
    pub pressures: CornerValues,
    pub temperatures: TireTemperatures,
    pub compound: Option<String>,
    pub heat_cycles: Option<String>,
}

impl TireSettings {
    pub fn compound_class(&self) -> Option<TireCompound> {
        TireCompound::parse(&self.compound)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AeroSettings {
    /// Which aero devices are fitted: none, front-only, rear-wing or full
    pub aero_configuration: Option<String>,
    /// Splitter height in inches
    pub splitter_height: Option<String>,
    pub splitter_angle: Option<String>,
    pub splitter_material: Option<String>,
    /// Rear wing angle in degrees
    pub rear_wing_angle: Option<String>,
    pub end_plate_size: Option<String>,
    pub diffuser_type: Option<String>,
    pub canard_count: Option<String>,
}

impl AeroSettings {
    pub fn splitter_height(&self) -> Option<Measurement<'_>> {
        Measurement::from_field(&self.splitter_height)
    }

    pub fn rear_wing_angle(&self) -> Option<Measurement<'_>> {
        Measurement::from_field(&self.rear_wing_angle)
    }

    pub fn canard_count(&self) -> Option<f64> {
        parse_numeric(&self.canard_count)
    }

    pub fn end_plate_size(&self) -> Option<EndPlateSize> {
        EndPlateSize::parse(&self.end_plate_size)
    }

    /// The fitted aero devices.
    ///
    /// An explicit configuration wins. Otherwise it is inferred from which
    /// aero fields carry a usable number.
    pub fn configuration(&self) -> AeroConfiguration {
        if let Some(configuration) = AeroConfiguration::parse(&self.aero_configuration) {
            return configuration;
        }

        let has_front = self.splitter_height().is_some()
            || self.canard_count().is_some_and(|count| count > 0.0);
        let has_rear = self.rear_wing_angle().is_some();
        match (has_front, has_rear) {
            (true, true) => AeroConfiguration::Full,
            (true, false) => AeroConfiguration::FrontOnly,
            (false, true) => AeroConfiguration::RearWing,
            (false, false) => AeroConfiguration::None,
        }
    }

    pub fn has_front_aero(&self) -> bool {
        matches!(
            self.configuration(),
            AeroConfiguration::FrontOnly | AeroConfiguration::Full
        )
    }

    pub fn has_rear_wing(&self) -> bool {
        matches!(
            self.configuration(),
            AeroConfiguration::RearWing | AeroConfiguration::Full
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlignmentSettings {
    pub toe: CornerValues,
    pub camber: CornerValues,
    pub caster: CornerValues,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CornerBalance {
    pub weights: CornerValues,
    pub cross_weight_percent: Option<String>,
}

impl CornerBalance {
    /// Cross weight as entered, or computed from the four corner weights
    /// when every corner is present.
    pub fn cross_weight(&self) -> Option<f64> {
        if let Some(cross) = parse_numeric(&self.cross_weight_percent) {
            return Some(cross);
        }
        let lf = parse_numeric(&self.weights.lf)?;
        let rf = parse_numeric(&self.weights.rf)?;
        let lr = parse_numeric(&self.weights.lr)?;
        let rr = parse_numeric(&self.weights.rr)?;
        let total = lf + rf + lr + rr;
        if total <= 0.0 {
            return None;
        }
        Some((rf + lr) / total * 100.0).filter(|v| v.is_finite())
    }
}

/// Everything the user entered about the car's setup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigurationProfile {
    pub suspension: SuspensionSettings,
    pub tires: TireSettings,
    pub aero: AeroSettings,
    pub alignment: AlignmentSettings,
    pub corner_balance: CornerBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AeroConfiguration {
    None,
    FrontOnly,
    RearWing,
    Full,
}

impl AeroConfiguration {
    pub fn parse(raw: &Option<String>) -> Option<Self> {
        match normalize_choice(raw)?.as_str() {
            "none" | "no-aero" => Some(Self::None),
            "front-only" | "front" | "splitter" | "front-splitter" => Some(Self::FrontOnly),
            "rear-wing" | "rear-only" | "rear" | "wing" => Some(Self::RearWing),
            "full" | "both" | "front-and-rear" | "splitter-and-wing" => Some(Self::Full),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EndPlateSize {
    Small,
    Medium,
    Large,
}

impl EndPlateSize {
    pub fn parse(raw: &Option<String>) -> Option<Self> {
        match normalize_choice(raw)?.as_str() {
            "small" | "s" => Some(Self::Small),
            "medium" | "m" => Some(Self::Medium),
            "large" | "l" => Some(Self::Large),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TireCompound {
    Slick,
    SemiSlick,
    DragRadial,
}

impl TireCompound {
    pub fn parse(raw: &Option<String>) -> Option<Self> {
        match normalize_choice(raw)?.as_str() {
            "slick" | "slicks" => Some(Self::Slick),
            "semi-slick" | "semi-slicks" | "r-compound" => Some(Self::SemiSlick),
            "drag" | "drag-radial" | "drag-slick" => Some(Self::DragRadial),
            _ => None,
        }
    }
}

/// Handling problems a driver can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Symptom {
    EntryUndersteer,
    EntryOversteer,
    MidCornerUndersteer,
    MidCornerOversteer,
    ExitUndersteer,
    ExitOversteer,
    WanderingHighSpeed,
    BrakingInstability,
    InsideTireWear,
    OutsideTireWear,
}

impl Symptom {
    pub const ALL: [Symptom; 10] = [
        Symptom::EntryUndersteer,
        Symptom::EntryOversteer,
        Symptom::MidCornerUndersteer,
        Symptom::MidCornerOversteer,
        Symptom::ExitUndersteer,
        Symptom::ExitOversteer,
        Symptom::WanderingHighSpeed,
        Symptom::BrakingInstability,
        Symptom::InsideTireWear,
        Symptom::OutsideTireWear,
    ];
}

impl std::fmt::Display for Symptom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Symptom::EntryUndersteer => write!(f, "entry understeer"),
            Symptom::EntryOversteer => write!(f, "entry oversteer"),
            Symptom::MidCornerUndersteer => write!(f, "mid-corner understeer"),
            Symptom::MidCornerOversteer => write!(f, "mid-corner oversteer"),
            Symptom::ExitUndersteer => write!(f, "exit understeer"),
            Symptom::ExitOversteer => write!(f, "exit oversteer"),
            Symptom::WanderingHighSpeed => write!(f, "high-speed instability"),
            Symptom::BrakingInstability => write!(f, "braking instability"),
            Symptom::InsideTireWear => write!(f, "inside tire wear"),
            Symptom::OutsideTireWear => write!(f, "outside tire wear"),
        }
    }
}

/// The handling problems reported for a run.
///
/// Any combination of flags is valid, including none. `notes` is free text
/// for a separate analysis service and is never read by the rule engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SymptomProfile {
    pub entry_understeer: bool,
    pub entry_oversteer: bool,
    pub mid_corner_understeer: bool,
    pub mid_corner_oversteer: bool,
    pub exit_understeer: bool,
    pub exit_oversteer: bool,
    pub wandering_high_speed: bool,
    pub braking_instability: bool,
    pub inside_tire_wear: bool,
    pub outside_tire_wear: bool,
    pub notes: String,
}

impl SymptomProfile {
    pub fn from_symptoms(symptoms: impl IntoIterator<Item = Symptom>) -> Self {
        let mut profile = Self::default();
        for symptom in symptoms {
            profile.set(symptom, true);
        }
        profile
    }

    pub fn set(&mut self, symptom: Symptom, value: bool) {
        *self.flag_mut(symptom) = value;
    }

    pub fn has(&self, symptom: Symptom) -> bool {
        match symptom {
            Symptom::EntryUndersteer => self.entry_understeer,
            Symptom::EntryOversteer => self.entry_oversteer,
            Symptom::MidCornerUndersteer => self.mid_corner_understeer,
            Symptom::MidCornerOversteer => self.mid_corner_oversteer,
            Symptom::ExitUndersteer => self.exit_understeer,
            Symptom::ExitOversteer => self.exit_oversteer,
            Symptom::WanderingHighSpeed => self.wandering_high_speed,
            Symptom::BrakingInstability => self.braking_instability,
            Symptom::InsideTireWear => self.inside_tire_wear,
            Symptom::OutsideTireWear => self.outside_tire_wear,
        }
    }

    /// Reported symptoms in declaration order.
    pub fn active(&self) -> Vec<Symptom> {
        Symptom::ALL
            .into_iter()
            .filter(|symptom| self.has(*symptom))
            .collect()
    }

    fn flag_mut(&mut self, symptom: Symptom) -> &mut bool {
        match symptom {
            Symptom::EntryUndersteer => &mut self.entry_understeer,
            Symptom::EntryOversteer => &mut self.entry_oversteer,
            Symptom::MidCornerUndersteer => &mut self.mid_corner_understeer,
            Symptom::MidCornerOversteer => &mut self.mid_corner_oversteer,
            Symptom::ExitUndersteer => &mut self.exit_understeer,
            Symptom::ExitOversteer => &mut self.exit_oversteer,
            Symptom::WanderingHighSpeed => &mut self.wandering_high_speed,
            Symptom::BrakingInstability => &mut self.braking_instability,
            Symptom::InsideTireWear => &mut self.inside_tire_wear,
            Symptom::OutsideTireWear => &mut self.outside_tire_wear,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackCategory {
    #[default]
    RoadCourse,
    OvalShort,
    OvalIntermediate,
    Superspeedway,
    DragStrip,
    Autocross,
}

impl TrackCategory {
    pub fn is_oval(&self) -> bool {
        matches!(
            self,
            TrackCategory::OvalShort
                | TrackCategory::OvalIntermediate
                | TrackCategory::Superspeedway
        )
    }
}

impl std::fmt::Display for TrackCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackCategory::RoadCourse => write!(f, "Road Course"),
            TrackCategory::OvalShort => write!(f, "Short Oval"),
            TrackCategory::OvalIntermediate => write!(f, "Intermediate Oval"),
            TrackCategory::Superspeedway => write!(f, "Superspeedway"),
            TrackCategory::DragStrip => write!(f, "Drag Strip"),
            TrackCategory::Autocross => write!(f, "Autocross"),
        }
    }
}

impl std::str::FromStr for TrackCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_choice(&Some(s.to_string())).as_deref() {
            Some("road-course" | "road") => Ok(Self::RoadCourse),
            Some("oval-short" | "short-oval") => Ok(Self::OvalShort),
            Some("oval-intermediate" | "intermediate-oval") => Ok(Self::OvalIntermediate),
            Some("superspeedway") => Ok(Self::Superspeedway),
            Some("drag-strip" | "drag") => Ok(Self::DragStrip),
            Some("autocross") => Ok(Self::Autocross),
            _ => Err(format!("unknown track category '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SurfaceCondition {
    #[default]
    Dry,
    Damp,
    Wet,
}

impl std::str::FromStr for SurfaceCondition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "dry" => Ok(Self::Dry),
            "damp" => Ok(Self::Damp),
            "wet" => Ok(Self::Wet),
            _ => Err(format!("unknown surface condition '{s}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemperatureBand {
    Cold,
    #[default]
    Mild,
    Hot,
}

impl std::str::FromStr for TemperatureBand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cold" => Ok(Self::Cold),
            "mild" => Ok(Self::Mild),
            "hot" => Ok(Self::Hot),
            _ => Err(format!("unknown temperature band '{s}'")),
        }
    }
}

/// Where and in what conditions the car is running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackContext {
    pub category: TrackCategory,
    pub surface: SurfaceCondition,
    pub temperature: TemperatureBand,
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_parse_numeric_is_total_and_finite(raw in any::<String>()) {
            if let Some(value) = parse_numeric(&Some(raw)) {
                prop_assert!(value.is_finite());
            }
        }

        #[test]
        fn prop_cross_weight_is_finite(
            lf in any::<String>(),
            rf in "-?[0-9]{1,6}",
            lr in "-?[0-9]{1,6}",
            rr in "-?[0-9]{1,6}",
        ) {
            let balance = CornerBalance {
                weights: CornerValues {
                    lf: Some(lf),
                    rf: Some(rf),
                    lr: Some(lr),
                    rr: Some(rr),
                },
                cross_weight_percent: None,
            };
            if let Some(cross) = balance.cross_weight() {
                prop_assert!(cross.is_finite());
            }
        }
    }
}
