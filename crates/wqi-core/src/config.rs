//! Dashboard configuration: the object served at `/config`.
//!
//! A config is loaded and validated once, then passed explicitly to whatever
//! needs it. Nothing here is global.

use crate::error::WqiError;
use crate::geo::Coordinate;
use crate::score::status::{SeverityColor, StatusBand};
use crate::standards::builtin::{self, DEFAULT_PRESET};
use crate::standards::schema::StandardTable;
use crate::standards::validate_table;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Hex used when a color tag has no entry in the color map.
pub const FALLBACK_HEX: &str = "#343a40";

/// Where the scoring table comes from: a preset name or an inline table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StandardsSource {
    Preset(String),
    Inline(StandardTable),
}

impl Default for StandardsSource {
    fn default() -> Self {
        StandardsSource::Preset(DEFAULT_PRESET.to_string())
    }
}

impl StandardsSource {
    pub fn resolve(&self) -> Result<StandardTable, WqiError> {
        match self {
            StandardsSource::Preset(name) => builtin::load_preset(name),
            StandardsSource::Inline(table) => {
                validate_table(table)?;
                Ok(table.clone())
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Total of the doughnut chart; the remainder segment is `baseline - index`.
    pub baseline: Decimal,
    pub cutout: String,
}

impl Default for ChartConfig {
    fn default() -> Self {
        ChartConfig {
            baseline: Decimal::from(150),
            cutout: "70%".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub click_zoom: u8,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            default_center: Coordinate {
                lat: 20.5937,
                lng: 78.9629,
            },
            default_zoom: 5,
            click_zoom: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Severity tag -> hex color.
    pub colors: BTreeMap<SeverityColor, String>,
    pub standards: StandardsSource,
    pub chart: ChartConfig,
    /// How often the sensor page polls for a new reading.
    pub polling_interval_ms: u64,
    /// Index value at the right end of the color scale.
    pub scale_max: Decimal,
    /// Severity tag -> safety message.
    pub safety_messages: BTreeMap<SeverityColor, String>,
    pub map: MapConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let colors = [
            SeverityColor::Success,
            SeverityColor::Primary,
            SeverityColor::Warning,
            SeverityColor::Danger,
            SeverityColor::Dark,
            SeverityColor::Secondary,
        ]
        .into_iter()
        .map(|c| (c, c.default_hex().to_string()))
        .collect();

        let safety_messages = StatusBand::ALL
            .into_iter()
            .map(|band| (band.color(), band.safety_message().to_string()))
            .collect();

        DashboardConfig {
            colors,
            standards: StandardsSource::default(),
            chart: ChartConfig::default(),
            polling_interval_ms: 5000,
            scale_max: Decimal::from(120),
            safety_messages,
            map: MapConfig::default(),
        }
    }
}

impl DashboardConfig {
    /// The scoring table this config points at.
    pub fn standard_table(&self) -> Result<StandardTable, WqiError> {
        self.standards.resolve()
    }

    pub fn hex_for(&self, color: SeverityColor) -> &str {
        self.colors
            .get(&color)
            .map(String::as_str)
            .unwrap_or(FALLBACK_HEX)
    }

    pub fn safety_message(&self, band: StatusBand) -> &str {
        self.safety_messages
            .get(&band.color())
            .map(String::as_str)
            .unwrap_or_else(|| band.safety_message())
    }

    /// Marker position on the color scale, as a percentage of its width.
    pub fn scale_position(&self, index: Decimal) -> Decimal {
        let clamped = index.max(Decimal::ZERO).min(self.scale_max);
        clamped / self.scale_max * Decimal::ONE_HUNDRED
    }

    /// `[score, remainder]` segments for the doughnut chart.
    pub fn chart_segments(&self, index: Decimal) -> [Decimal; 2] {
        [index, (self.chart.baseline - index).max(Decimal::ZERO)]
    }
}

/// Load a dashboard config from a JSON file.
pub fn load_config(path: &Path) -> Result<DashboardConfig, WqiError> {
    let content = std::fs::read_to_string(path).map_err(|e| WqiError::ConfigLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let config: DashboardConfig =
        serde_json::from_str(&content).map_err(|e| WqiError::ConfigLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_config(&config)?;
    log::info!("loaded dashboard config from {}", path.display());
    Ok(config)
}

/// Parse a dashboard config from a JSON string (no file path context).
pub fn parse_config_str(json: &str) -> Result<DashboardConfig, WqiError> {
    let config: DashboardConfig = serde_json::from_str(json)?;
    validate_config(&config)?;
    Ok(config)
}

pub fn validate_config(config: &DashboardConfig) -> Result<(), WqiError> {
    config
        .standards
        .resolve()
        .map_err(|e| WqiError::ConfigInvalid(format!("standards: {e}")))?;

    if config.scale_max <= Decimal::ZERO {
        return Err(WqiError::ConfigInvalid(format!(
            "scale_max must be positive, got {}",
            config.scale_max
        )));
    }

    if config.chart.baseline <= Decimal::ZERO {
        return Err(WqiError::ConfigInvalid(format!(
            "chart.baseline must be positive, got {}",
            config.chart.baseline
        )));
    }

    if config.polling_interval_ms == 0 {
        return Err(WqiError::ConfigInvalid(
            "polling_interval_ms must be positive".into(),
        ));
    }

    for (color, hex) in &config.colors {
        if !is_hex_color(hex) {
            return Err(WqiError::ConfigInvalid(format!(
                "color '{}' has invalid hex value '{}'",
                color, hex
            )));
        }
    }

    Ok(())
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parameter;
    use rust_decimal_macros::dec;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = parse_config_str("{}").unwrap();
        assert_eq!(config.polling_interval_ms, 5000);
        assert_eq!(config.scale_max, dec!(120));
        assert_eq!(config.hex_for(SeverityColor::Danger), "#dc3545");
        let table = config.standard_table().unwrap();
        assert_eq!(table.ideal(Parameter::Turbidity), Some(dec!(0)));
    }

    #[test]
    fn test_preset_by_name() {
        let config = parse_config_str(r#"{ "standards": "field" }"#).unwrap();
        let table = config.standard_table().unwrap();
        assert_eq!(table.ideal(Parameter::Turbidity), Some(dec!(1)));
    }

    #[test]
    fn test_inline_table() {
        let json = r#"{
            "standards": {
                "name": "Inline",
                "version": "1",
                "parameters": { "ph": { "ideal": 7, "standard": 9 } }
            }
        }"#;
        let config = parse_config_str(json).unwrap();
        let table = config.standard_table().unwrap();
        assert_eq!(table.parameters.len(), 1);
    }

    #[test]
    fn test_invalid_inline_table_rejected() {
        let json = r#"{
            "standards": {
                "name": "Inline",
                "version": "1",
                "parameters": { "ph": { "ideal": 7, "standard": 7 } }
            }
        }"#;
        assert!(matches!(
            parse_config_str(json),
            Err(WqiError::ConfigInvalid(_))
        ));
    }

    #[test]
    fn test_unknown_preset_rejected() {
        assert!(parse_config_str(r#"{ "standards": "nope" }"#).is_err());
    }

    #[test]
    fn test_bad_hex_rejected() {
        let json = r#"{ "colors": { "success": "green" } }"#;
        assert!(parse_config_str(json).is_err());
    }

    #[test]
    fn test_zero_scale_rejected() {
        assert!(parse_config_str(r#"{ "scale_max": 0 }"#).is_err());
    }

    #[test]
    fn test_missing_color_falls_back() {
        let config = parse_config_str(r#"{ "colors": {} }"#).unwrap();
        assert_eq!(config.hex_for(SeverityColor::Success), FALLBACK_HEX);
    }

    #[test]
    fn test_scale_position_clamps() {
        let config = DashboardConfig::default();
        assert_eq!(config.scale_position(dec!(60)), dec!(50));
        assert_eq!(config.scale_position(dec!(-5)), dec!(0));
        assert_eq!(config.scale_position(dec!(500)), dec!(100));
    }

    #[test]
    fn test_chart_segments() {
        let config = DashboardConfig::default();
        assert_eq!(config.chart_segments(dec!(40)), [dec!(40), dec!(110)]);
        assert_eq!(config.chart_segments(dec!(180)), [dec!(180), dec!(0)]);
    }

    #[test]
    fn test_safety_message_override() {
        let json = r#"{ "safety_messages": { "warning": "Boil before use." } }"#;
        let config = parse_config_str(json).unwrap();
        assert_eq!(config.safety_message(StatusBand::Poor), "Boil before use.");
        assert_eq!(
            config.safety_message(StatusBand::Excellent),
            StatusBand::Excellent.safety_message()
        );
    }
}
