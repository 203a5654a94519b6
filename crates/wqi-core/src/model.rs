use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A water-quality parameter, in canonical order.
///
/// The derived `Ord` follows declaration order, so a `BTreeMap<Parameter, _>`
/// iterates ph, do, turbidity, tds, nitrate, temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Parameter {
    #[serde(rename = "ph", alias = "pH")]
    Ph,
    #[serde(rename = "do", alias = "dissolvedOxygen", alias = "dissolved_oxygen")]
    DissolvedOxygen,
    #[serde(rename = "turbidity")]
    Turbidity,
    #[serde(rename = "tds")]
    Tds,
    #[serde(rename = "nitrate")]
    Nitrate,
    #[serde(rename = "temperature")]
    Temperature,
}

impl Parameter {
    pub const ALL: [Parameter; 6] = [
        Parameter::Ph,
        Parameter::DissolvedOxygen,
        Parameter::Turbidity,
        Parameter::Tds,
        Parameter::Nitrate,
        Parameter::Temperature,
    ];

    /// Key used in JSON bodies and standard tables.
    pub fn key(&self) -> &'static str {
        match self {
            Parameter::Ph => "ph",
            Parameter::DissolvedOxygen => "do",
            Parameter::Turbidity => "turbidity",
            Parameter::Tds => "tds",
            Parameter::Nitrate => "nitrate",
            Parameter::Temperature => "temperature",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Ph => "pH",
            Parameter::DissolvedOxygen => "Dissolved Oxygen",
            Parameter::Turbidity => "Turbidity",
            Parameter::Tds => "TDS",
            Parameter::Nitrate => "Nitrate",
            Parameter::Temperature => "Temperature",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Parameter::Ph => "",
            Parameter::DissolvedOxygen | Parameter::Tds | Parameter::Nitrate => "mg/L",
            Parameter::Turbidity => "NTU",
            Parameter::Temperature => "°C",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Parameter> {
        let lower = s.trim().to_lowercase().replace([' ', '_'], "");
        match lower.as_str() {
            "ph" => Some(Parameter::Ph),
            "do" | "dissolvedoxygen" => Some(Parameter::DissolvedOxygen),
            "turbidity" | "turbidityntu" => Some(Parameter::Turbidity),
            "tds" | "totaldissolvedsolids" => Some(Parameter::Tds),
            "nitrate" | "no3" => Some(Parameter::Nitrate),
            "temperature" | "temp" | "temperaturec" => Some(Parameter::Temperature),
            _ => None,
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A set of water-quality readings. `None` means "not measured".
///
/// Deserializes from the `/calculate` request body; `null` and missing keys
/// are both treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Measurement {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph: Option<Decimal>,
    #[serde(
        rename = "do",
        alias = "dissolvedOxygen",
        alias = "dissolved_oxygen",
        skip_serializing_if = "Option::is_none"
    )]
    pub dissolved_oxygen: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbidity: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tds: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nitrate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<Decimal>,
}

impl Measurement {
    pub fn get(&self, parameter: Parameter) -> Option<Decimal> {
        match parameter {
            Parameter::Ph => self.ph,
            Parameter::DissolvedOxygen => self.dissolved_oxygen,
            Parameter::Turbidity => self.turbidity,
            Parameter::Tds => self.tds,
            Parameter::Nitrate => self.nitrate,
            Parameter::Temperature => self.temperature,
        }
    }

    pub fn set(&mut self, parameter: Parameter, value: Option<Decimal>) {
        let slot = match parameter {
            Parameter::Ph => &mut self.ph,
            Parameter::DissolvedOxygen => &mut self.dissolved_oxygen,
            Parameter::Turbidity => &mut self.turbidity,
            Parameter::Tds => &mut self.tds,
            Parameter::Nitrate => &mut self.nitrate,
            Parameter::Temperature => &mut self.temperature,
        };
        *slot = value;
    }

    /// Builder-style setter.
    pub fn with(mut self, parameter: Parameter, value: Decimal) -> Self {
        self.set(parameter, Some(value));
        self
    }

    /// Present readings in canonical parameter order.
    pub fn readings(&self) -> impl Iterator<Item = (Parameter, Decimal)> + '_ {
        Parameter::ALL
            .into_iter()
            .filter_map(|p| self.get(p).map(|v| (p, v)))
    }

    pub fn is_empty(&self) -> bool {
        self.readings().next().is_none()
    }
}
