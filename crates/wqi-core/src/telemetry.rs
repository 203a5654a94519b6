use crate::error::WqiError;
use crate::model::Measurement;
use crate::score::engine::round2;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// IST, the dashboard's display timezone.
const DISPLAY_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// A reading from the field sensor.
///
/// `GET /api/iot` serves `temperature_c`, `ph`, `turbidity` and `timestamp`.
/// Ingest payloads may carry turbidity under `turbidity_ntu` or
/// `turbidity_percent` instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IotReading {
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub temperature_c: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub ph: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub turbidity: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub turbidity_ntu: Option<Decimal>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "rust_decimal::serde::float_option::serialize"
    )]
    pub turbidity_percent: Option<Decimal>,
    /// Naive UTC.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
}

impl IotReading {
    /// Turbidity from `turbidity`, then `turbidity_ntu`, then `turbidity_percent`.
    pub fn effective_turbidity(&self) -> Option<Decimal> {
        self.turbidity
            .or(self.turbidity_ntu)
            .or(self.turbidity_percent)
    }

    /// Check an ingest payload: temperature and some turbidity value are required.
    pub fn validate_ingest(&self) -> Result<(), WqiError> {
        if self.temperature_c.is_none() {
            return Err(WqiError::InvalidReading(
                "missing 'temperature_c'".into(),
            ));
        }
        if self.effective_turbidity().is_none() {
            return Err(WqiError::InvalidReading(
                "provide 'turbidity' (or 'turbidity_ntu') or 'turbidity_percent'".into(),
            ));
        }
        Ok(())
    }

    /// Parse an ingest payload and return its served form. Payloads that
    /// fail [`IotReading::validate_ingest`] are rejected.
    pub fn ingest(json: &[u8]) -> Result<IotReading, WqiError> {
        let raw: IotReading = serde_json::from_slice(json)?;
        raw.validate_ingest()?;
        Ok(raw.latest_view())
    }

    /// The served form: values rounded to 2 places, turbidity resolved.
    pub fn latest_view(&self) -> IotReading {
        IotReading {
            temperature_c: self.temperature_c.map(round2),
            ph: self.ph.map(round2),
            turbidity: self.effective_turbidity().map(round2),
            turbidity_ntu: None,
            turbidity_percent: None,
            timestamp: self.timestamp,
        }
    }

    /// Readings the sensor reports, as a measurement. Unreported parameters
    /// stay absent rather than being filled with ideal values.
    pub fn to_measurement(&self) -> Measurement {
        Measurement {
            ph: self.ph,
            turbidity: self.effective_turbidity(),
            temperature: self.temperature_c,
            ..Default::default()
        }
    }

    /// Timestamp in the display timezone.
    pub fn local_timestamp(&self) -> Option<DateTime<FixedOffset>> {
        let offset = FixedOffset::east_opt(DISPLAY_OFFSET_SECS)?;
        self.timestamp
            .map(|ts| ts.and_utc().with_timezone(&offset))
    }

    pub fn display_timestamp(&self) -> Option<String> {
        self.local_timestamp()
            .map(|ts| ts.format("%d/%m/%Y, %I:%M:%S %p").to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Parameter;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_served_reading() {
        let json = r#"{
            "temperature_c": 27.456,
            "ph": 7.8,
            "turbidity": 3.2,
            "timestamp": "2024-05-01T10:15:30.123456"
        }"#;
        let reading: IotReading = serde_json::from_str(json).unwrap();
        assert_eq!(reading.temperature_c, Some(dec!(27.456)));
        assert!(reading.timestamp.is_some());
        assert!(reading.validate_ingest().is_ok());
    }

    #[test]
    fn test_missing_temperature_rejected() {
        let reading: IotReading = serde_json::from_str(r#"{"turbidity": 3}"#).unwrap();
        let err = reading.validate_ingest().unwrap_err();
        assert!(err.to_string().contains("temperature_c"));
    }

    #[test]
    fn test_missing_turbidity_rejected() {
        let reading: IotReading = serde_json::from_str(r#"{"temperature_c": 25}"#).unwrap();
        assert!(reading.validate_ingest().is_err());
    }

    #[test]
    fn test_ingest_rejects_incomplete_payload() {
        let err = IotReading::ingest(br#"{"ph": 7.2}"#).unwrap_err();
        assert!(matches!(err, WqiError::InvalidReading(_)));
        assert!(err.to_string().contains("temperature_c"));

        let err = IotReading::ingest(br#"{"temperature_c": 25, "ph": 7.2}"#).unwrap_err();
        assert!(matches!(err, WqiError::InvalidReading(_)));
    }

    #[test]
    fn test_ingest_returns_served_form() {
        let reading =
            IotReading::ingest(br#"{"temperature_c": 26.456, "turbidity_ntu": 3}"#).unwrap();
        assert_eq!(reading.temperature_c, Some(dec!(26.46)));
        assert_eq!(reading.turbidity, Some(dec!(3)));
        assert_eq!(reading.turbidity_ntu, None);
    }

    #[test]
    fn test_served_reading_serializes_numbers() {
        let reading = IotReading {
            temperature_c: Some(dec!(27.46)),
            ph: Some(dec!(7.8)),
            turbidity: Some(dec!(3.2)),
            ..Default::default()
        };
        let json = serde_json::to_value(&reading).unwrap();
        for (key, expected) in [("temperature_c", 27.46), ("ph", 7.8), ("turbidity", 3.2)] {
            let value = json[key].as_f64().unwrap();
            assert!((value - expected).abs() < 1e-9, "{key} = {value}");
        }
        assert!(json.get("turbidity_ntu").is_none());
    }

    #[test]
    fn test_turbidity_fallback_order() {
        let reading = IotReading {
            temperature_c: Some(dec!(25)),
            turbidity_ntu: Some(dec!(4)),
            turbidity_percent: Some(dec!(12)),
            ..Default::default()
        };
        assert_eq!(reading.effective_turbidity(), Some(dec!(4)));

        let percent_only = IotReading {
            temperature_c: Some(dec!(25)),
            turbidity_percent: Some(dec!(12)),
            ..Default::default()
        };
        assert_eq!(percent_only.effective_turbidity(), Some(dec!(12)));
        assert!(percent_only.validate_ingest().is_ok());
    }

    #[test]
    fn test_to_measurement_leaves_lab_parameters_absent() {
        let reading = IotReading {
            temperature_c: Some(dec!(26)),
            ph: Some(dec!(7.4)),
            turbidity_ntu: Some(dec!(2)),
            ..Default::default()
        };
        let m = reading.to_measurement();
        assert_eq!(m.get(Parameter::Temperature), Some(dec!(26)));
        assert_eq!(m.get(Parameter::Turbidity), Some(dec!(2)));
        assert_eq!(m.get(Parameter::DissolvedOxygen), None);
        assert_eq!(m.get(Parameter::Tds), None);
    }

    #[test]
    fn test_latest_view_rounds() {
        let reading = IotReading {
            temperature_c: Some(dec!(27.456)),
            turbidity_percent: Some(dec!(10.005)),
            ..Default::default()
        };
        let view = reading.latest_view();
        assert_eq!(view.temperature_c.unwrap().to_string(), "27.46");
        assert_eq!(view.turbidity, Some(dec!(10.01)));
        assert_eq!(view.turbidity_percent, None);
    }

    #[test]
    fn test_display_timestamp_in_ist() {
        let reading: IotReading =
            serde_json::from_str(r#"{"timestamp": "2024-05-01T10:15:30"}"#).unwrap();
        assert_eq!(
            reading.display_timestamp().as_deref(),
            Some("01/05/2024, 03:45:30 PM")
        );
    }
}
