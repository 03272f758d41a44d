//! Charger tier classification.
//!
//! ChargePoint does not report a power level, so the tier is inferred from
//! the hardware model string. The station-group name then decorates the
//! tier with a legend used by the map's colour key.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Models (or model fragments) that identify DC fast chargers.
const LEVEL_3_MODELS: &[&str] = &[
    "CPE250",
    "CPE200",
    "EXPRESS",
    "EXPRESS 200",
    "EXPRESS 250",
    "DCFC",
    "TRITIUM",
    "PK350",
    "ABB",
    "BTC",
    "RTM",
    "HPC",
];

/// Models (or model fragments) that identify AC Level 2 chargers.
const LEVEL_2_MODELS: &[&str] = &[
    "CT4020",
    "CT4025",
    "CT4000",
    "CT4010",
    "CT4011",
    "CT500",
    "CT600",
    "CT-4000",
    "CPF25",
    "CPF50",
    "CPF32",
    "CT4010-HD2",
    "CT2000",
    "WALLBOX",
];

/// Free-text phrases that also mark a Level 3 model.
const LEVEL_3_PHRASES: &[&str] = &["LEVEL 3", "DC FAST", "FAST"];

/// Free-text phrases that also mark a Level 2 model.
const LEVEL_2_PHRASES: &[&str] = &["LEVEL 2", " L2"];

static PUBLIC_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bPublic Stations\b").expect("static regex is valid"));

static SOLAR_GROUP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bSolar Stations\b").expect("static regex is valid"));

/// Coarse power tier of a station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ChargerType {
    #[serde(rename = "Level 2")]
    Level2,
    #[serde(rename = "Level 3")]
    Level3,
    /// Network gateway hardware; not something a vehicle can plug into.
    #[serde(rename = "Gateway (Not a Charger)")]
    Gateway,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl ChargerType {
    /// Classify a station by its hardware model string.
    ///
    /// Matching is case-insensitive substring containment. A model that
    /// mentions `GW` without any known charger model is a gateway. Level 3
    /// keywords are checked before Level 2 ones.
    pub fn classify(model: Option<&str>) -> Self {
        let model = model.unwrap_or_default().to_uppercase();
        let contains_any = |needles: &[&str]| needles.iter().any(|n| model.contains(n));

        let level_3 = contains_any(LEVEL_3_MODELS);
        let level_2 = contains_any(LEVEL_2_MODELS);

        if model.contains("GW") && !level_3 && !level_2 {
            return ChargerType::Gateway;
        }
        if level_3 || contains_any(LEVEL_3_PHRASES) {
            return ChargerType::Level3;
        }
        if level_2 || contains_any(LEVEL_2_PHRASES) {
            return ChargerType::Level2;
        }
        ChargerType::Unknown
    }

    /// Human-readable label, as written to the CSV outputs.
    pub fn label(&self) -> &'static str {
        match self {
            ChargerType::Level2 => "Level 2",
            ChargerType::Level3 => "Level 3",
            ChargerType::Gateway => "Gateway (Not a Charger)",
            ChargerType::Unknown => "Unknown",
        }
    }

    /// Map legend for this tier given the station-group name.
    ///
    /// Gateways have no legend entry. Otherwise the label gains
    /// `" - Public Stations"` and/or `" - Solar"` when the group name
    /// mentions public or solar stations.
    pub fn legend(&self, group_name: Option<&str>) -> Option<String> {
        if *self == ChargerType::Gateway {
            return None;
        }

        let group = group_name.unwrap_or_default();
        let mut label = self.label().to_string();
        if PUBLIC_GROUP.is_match(group) {
            label.push_str(" - Public Stations");
        }
        if SOLAR_GROUP.is_match(group) {
            label.push_str(" - Solar");
        }
        Some(label)
    }
}

impl fmt::Display for ChargerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
