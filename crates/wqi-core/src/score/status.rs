use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label used for locations without any scored sample.
pub const NO_DATA_LABEL: &str = "No Data";

/// Severity band of a WQI value, ordered from cleanest to worst.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusBand {
    #[serde(rename = "Excellent")]
    Excellent,
    #[serde(rename = "Good")]
    Good,
    #[serde(rename = "Poor")]
    Poor,
    #[serde(rename = "Very Poor")]
    VeryPoor,
    #[serde(rename = "Unfit for Consumption")]
    Unfit,
}

/// Symbolic color tag for a severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityColor {
    Success,
    Primary,
    Warning,
    Danger,
    Dark,
    /// Only used for "No Data".
    Secondary,
}

impl StatusBand {
    pub const ALL: [StatusBand; 5] = [
        StatusBand::Excellent,
        StatusBand::Good,
        StatusBand::Poor,
        StatusBand::VeryPoor,
        StatusBand::Unfit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            StatusBand::Excellent => "Excellent",
            StatusBand::Good => "Good",
            StatusBand::Poor => "Poor",
            StatusBand::VeryPoor => "Very Poor",
            StatusBand::Unfit => "Unfit for Consumption",
        }
    }

    pub fn color(&self) -> SeverityColor {
        match self {
            StatusBand::Excellent => SeverityColor::Success,
            StatusBand::Good => SeverityColor::Primary,
            StatusBand::Poor => SeverityColor::Warning,
            StatusBand::VeryPoor => SeverityColor::Danger,
            StatusBand::Unfit => SeverityColor::Dark,
        }
    }

    /// 0 for Excellent up to 4 for Unfit.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// Inclusive upper bound of the band; `None` for the open-ended last band.
    pub fn upper_bound(&self) -> Option<Decimal> {
        match self {
            StatusBand::Excellent => Some(Decimal::from(25)),
            StatusBand::Good => Some(Decimal::from(50)),
            StatusBand::Poor => Some(Decimal::from(75)),
            StatusBand::VeryPoor => Some(Decimal::from(100)),
            StatusBand::Unfit => None,
        }
    }

    pub fn safety_message(&self) -> &'static str {
        match self {
            StatusBand::Excellent => "✅ Safe for daily use.",
            StatusBand::Good => "✅ Generally safe, with minor concerns.",
            StatusBand::Poor => "⚠️ Use with caution. Consider treatment before drinking.",
            StatusBand::VeryPoor => "❌ Not safe for drinking without proper treatment.",
            StatusBand::Unfit => "❌ Not safe for drinking. Water quality is very poor.",
        }
    }
}

impl fmt::Display for StatusBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl SeverityColor {
    pub fn tag(&self) -> &'static str {
        match self {
            SeverityColor::Success => "success",
            SeverityColor::Primary => "primary",
            SeverityColor::Warning => "warning",
            SeverityColor::Danger => "danger",
            SeverityColor::Dark => "dark",
            SeverityColor::Secondary => "secondary",
        }
    }

    pub fn hue(&self) -> &'static str {
        match self {
            SeverityColor::Success => "green",
            SeverityColor::Primary => "blue",
            SeverityColor::Warning => "yellow",
            SeverityColor::Danger => "red",
            SeverityColor::Dark => "black",
            SeverityColor::Secondary => "grey",
        }
    }

    pub fn default_hex(&self) -> &'static str {
        match self {
            SeverityColor::Success => "#28a745",
            SeverityColor::Primary => "#0d6efd",
            SeverityColor::Warning => "#ffc107",
            SeverityColor::Danger => "#dc3545",
            SeverityColor::Dark => "#343a40",
            SeverityColor::Secondary => "#6c757d",
        }
    }
}

impl fmt::Display for SeverityColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Classify a WQI value. Bands are checked in ascending order and bounds
/// are inclusive, so 25.00 is Excellent and 25.01 is Good.
pub fn classify(index: Decimal) -> StatusBand {
    StatusBand::ALL
        .into_iter()
        .find(|band| band.upper_bound().map_or(true, |bound| index <= bound))
        .unwrap_or(StatusBand::Unfit)
}

/// Label and color for an index that may be missing.
pub fn classify_optional(index: Option<Decimal>) -> (&'static str, SeverityColor) {
    match index {
        Some(value) => {
            let band = classify(value);
            (band.label(), band.color())
        }
        None => (NO_DATA_LABEL, SeverityColor::Secondary),
    }
}
