//! JSON bodies exchanged with the dashboard backend.
//!
//! The request body of `POST /calculate` is [`crate::model::Measurement`] and
//! the body of `GET /api/iot` is [`crate::telemetry::IotReading`].

use crate::error::WqiError;
use crate::score::outcome::WqiResult;
use crate::score::status::{SeverityColor, StatusBand};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Response of `POST /calculate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    #[serde(with = "rust_decimal::serde::float")]
    pub wqi: Decimal,
    pub status: StatusBand,
    pub color: SeverityColor,
}

impl From<&WqiResult> for CalculateResponse {
    fn from(result: &WqiResult) -> Self {
        CalculateResponse {
            wqi: result.index,
            status: result.status,
            color: result.color,
        }
    }
}

/// One entry of `GET /api/locations`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationSummary {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub wqi: Option<Decimal>,
    /// Band label, or "No Data" when the location has no scored sample.
    pub status: String,
    pub color: SeverityColor,
}

/// Response of `GET /api/wqi?lat=&lng=`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestWqi {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "rust_decimal::serde::float")]
    pub wqi: Decimal,
    pub status: StatusBand,
    pub color: SeverityColor,
}

/// Error object returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl From<&WqiError> for ApiError {
    fn from(err: &WqiError) -> Self {
        ApiError {
            error: err.to_string(),
            detail: None,
        }
    }
}
