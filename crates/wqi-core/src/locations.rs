use crate::api::{LocationSummary, NearestWqi};
use crate::error::WqiError;
use crate::geo::{haversine_km, Coordinate};
use crate::model::{Measurement, Parameter};
use crate::score::engine::compute_index;
use crate::score::status::{classify, classify_optional};
use crate::standards::schema::StandardTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

const REFERENCE_LOCATIONS_JSON: &str = include_str!("../../../data/reference-locations.json");

/// A monitored water body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    /// Town or district, shown in parentheses after the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Stored index. Takes precedence over `sample`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wqi: Option<Decimal>,
    /// Latest sample, scored on demand when no index is stored.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample: Option<Measurement>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Location {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }

    pub fn display_name(&self) -> String {
        match &self.area {
            Some(area) => format!("{} ({})", self.name, area),
            None => self.name.clone(),
        }
    }

    pub fn resolve_wqi(&self, table: &StandardTable) -> Option<Decimal> {
        self.wqi
            .or_else(|| self.sample.as_ref().map(|m| compute_index(m, table)))
    }

    pub fn summarize(&self, table: &StandardTable) -> LocationSummary {
        let wqi = self.resolve_wqi(table);
        let (status, color) = classify_optional(wqi);
        LocationSummary {
            name: self.display_name(),
            latitude: self.latitude,
            longitude: self.longitude,
            wqi,
            status: status.to_string(),
            color,
        }
    }
}

/// A location together with its distance from the query point.
#[derive(Debug, Clone, Copy)]
pub struct Nearest<'a> {
    pub location: &'a Location,
    pub distance_km: f64,
}

impl Nearest<'_> {
    /// The found location's index in the `/api/wqi` shape.
    pub fn to_wqi(&self, table: &StandardTable) -> Result<NearestWqi, WqiError> {
        let location = self.location;
        let wqi = location
            .resolve_wqi(table)
            .ok_or_else(|| WqiError::NoScoredSample {
                name: location.display_name(),
            })?;
        let status = classify(wqi);
        Ok(NearestWqi {
            latitude: location.latitude,
            longitude: location.longitude,
            wqi,
            status,
            color: status.color(),
        })
    }
}

/// Built-in reference monitoring sites.
pub fn reference_locations() -> Result<Vec<Location>, WqiError> {
    let locations: Vec<Location> = serde_json::from_str(REFERENCE_LOCATIONS_JSON)?;
    Ok(locations)
}

/// Load locations from a JSON array file.
pub fn load_locations(path: &Path) -> Result<Vec<Location>, WqiError> {
    let content = std::fs::read_to_string(path).map_err(|e| WqiError::LocationsLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let locations: Vec<Location> =
        serde_json::from_str(&content).map_err(|e| WqiError::LocationsLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    for location in &locations {
        location.coordinate().validate().map_err(|e| WqiError::LocationsLoad {
            path: path.to_path_buf(),
            reason: format!("{}: {}", location.name, e),
        })?;
    }
    log::info!("loaded {} location(s) from {}", locations.len(), path.display());
    Ok(locations)
}

/// Find the location closest to `point`. The first of equally distant
/// locations wins.
pub fn nearest(locations: &[Location], point: Coordinate) -> Result<Nearest<'_>, WqiError> {
    point.validate()?;

    let mut best: Option<Nearest<'_>> = None;
    for location in locations {
        let distance_km = haversine_km(point, location.coordinate());
        if best.map_or(true, |b| distance_km < b.distance_km) {
            best = Some(Nearest {
                location,
                distance_km,
            });
        }
    }

    best.ok_or(WqiError::NoLocations)
}

/// Index of the location closest to `point`, as served by `/api/wqi`.
pub fn nearest_wqi(
    locations: &[Location],
    point: Coordinate,
    table: &StandardTable,
) -> Result<NearestWqi, WqiError> {
    let found = nearest(locations, point)?;
    log::debug!(
        "nearest to ({}, {}) is '{}' at {:.1} km",
        point.lat,
        point.lng,
        found.location.name,
        found.distance_km
    );
    found.to_wqi(table)
}

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "Location Name")]
    name: &'a str,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "WQI")]
    wqi: Option<Decimal>,
    #[serde(rename = "Status")]
    status: &'a str,
    #[serde(rename = "pH")]
    ph: Option<Decimal>,
    #[serde(rename = "DO (mg/L)")]
    dissolved_oxygen: Option<Decimal>,
    #[serde(rename = "TDS (mg/L)")]
    tds: Option<Decimal>,
    #[serde(rename = "Turbidity (NTU)")]
    turbidity: Option<Decimal>,
    #[serde(rename = "Nitrate (mg/L)")]
    nitrate: Option<Decimal>,
    #[serde(rename = "Temperature (C)")]
    temperature: Option<Decimal>,
    #[serde(rename = "Category")]
    category: Option<&'a str>,
}

/// Export locations with their resolved index as CSV.
pub fn write_csv<W: Write>(
    locations: &[Location],
    table: &StandardTable,
    writer: W,
) -> Result<(), WqiError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for location in locations {
        let summary = location.summarize(table);
        let reading = |parameter: Parameter| {
            location.sample.as_ref().and_then(|s| s.get(parameter))
        };
        csv_writer.serialize(CsvRow {
            name: &summary.name,
            latitude: summary.latitude,
            longitude: summary.longitude,
            wqi: summary.wqi,
            status: &summary.status,
            ph: reading(Parameter::Ph),
            dissolved_oxygen: reading(Parameter::DissolvedOxygen),
            tds: reading(Parameter::Tds),
            turbidity: reading(Parameter::Turbidity),
            nitrate: reading(Parameter::Nitrate),
            temperature: reading(Parameter::Temperature),
            category: location.category.as_deref(),
        })?;
    }
    csv_writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::score::status::{SeverityColor, StatusBand, NO_DATA_LABEL};
    use crate::standards::builtin::load_preset;
    use rust_decimal_macros::dec;

    fn site(name: &str, lat: f64, lng: f64, wqi: Option<Decimal>) -> Location {
        Location {
            name: name.into(),
            area: None,
            latitude: lat,
            longitude: lng,
            wqi,
            sample: None,
            category: None,
        }
    }

    #[test]
    fn test_reference_locations_load() {
        let locations = reference_locations().unwrap();
        assert_eq!(locations.len(), 15);
        assert!(locations.iter().all(|l| l.coordinate().validate().is_ok()));
    }

    #[test]
    fn test_nearest_picks_closest() {
        let locations = vec![
            site("North", 26.7, 88.4, Some(dec!(30))),
            site("South", 22.5, 88.3, Some(dec!(70))),
        ];
        let found = nearest(&locations, Coordinate::new(22.6, 88.4)).unwrap();
        assert_eq!(found.location.name, "South");
        assert!(found.distance_km < 20.0);
    }

    #[test]
    fn test_nearest_tie_keeps_first() {
        let locations = vec![
            site("A", 10.0, 10.0, None),
            site("B", 10.0, 10.0, None),
        ];
        let found = nearest(&locations, Coordinate::new(0.0, 0.0)).unwrap();
        assert_eq!(found.location.name, "A");
    }

    #[test]
    fn test_nearest_empty() {
        let err = nearest(&[], Coordinate::new(0.0, 0.0)).unwrap_err();
        assert!(matches!(err, WqiError::NoLocations));
    }

    #[test]
    fn test_nearest_invalid_point() {
        let locations = vec![site("A", 10.0, 10.0, None)];
        let err = nearest(&locations, Coordinate::new(95.0, 0.0)).unwrap_err();
        assert!(matches!(err, WqiError::InvalidCoordinate(_)));
    }

    #[test]
    fn test_nearest_wqi_classifies() {
        let table = load_preset("drinking").unwrap();
        let locations = vec![site("Lake", 22.5, 88.3, Some(dec!(80)))];
        let result = nearest_wqi(&locations, Coordinate::new(22.5, 88.3), &table).unwrap();
        assert_eq!(result.status, StatusBand::VeryPoor);
        assert_eq!(result.color, SeverityColor::Danger);
    }

    #[test]
    fn test_found_site_scored_without_second_search() {
        let table = load_preset("drinking").unwrap();
        let locations = vec![
            site("North", 26.7, 88.4, Some(dec!(30))),
            site("South", 22.5, 88.3, Some(dec!(70))),
        ];
        let found = nearest(&locations, Coordinate::new(22.6, 88.4)).unwrap();
        let result = found.to_wqi(&table).unwrap();
        assert_eq!(result.latitude, found.location.latitude);
        assert_eq!(result.wqi, dec!(70));
        assert_eq!(result.status, StatusBand::Poor);
    }

    #[test]
    fn test_nearest_wqi_without_sample() {
        let table = load_preset("drinking").unwrap();
        let locations = vec![site("Pond", 22.5, 88.3, None)];
        let err = nearest_wqi(&locations, Coordinate::new(22.5, 88.3), &table).unwrap_err();
        assert!(matches!(err, WqiError::NoScoredSample { .. }));
    }

    #[test]
    fn test_summary_scores_sample_when_no_stored_index() {
        let table = load_preset("drinking").unwrap();
        let mut location = site("Well", 22.5, 88.3, None);
        location.sample = Some(Measurement::default().with(Parameter::Nitrate, dec!(45)));
        let summary = location.summarize(&table);
        assert_eq!(summary.wqi, Some(dec!(100)));
        assert_eq!(summary.status, "Very Poor");
    }

    #[test]
    fn test_summary_no_data() {
        let table = load_preset("drinking").unwrap();
        let summary = site("Empty", 22.5, 88.3, None).summarize(&table);
        assert_eq!(summary.status, NO_DATA_LABEL);
        assert_eq!(summary.color, SeverityColor::Secondary);
    }

    #[test]
    fn test_display_name_with_area() {
        let mut location = site("Hooghly River", 22.57, 88.36, None);
        location.area = Some("Kolkata".into());
        assert_eq!(location.display_name(), "Hooghly River (Kolkata)");
    }

    #[test]
    fn test_write_csv() {
        let table = load_preset("drinking").unwrap();
        let mut sampled = site("Canal", 22.7, 88.5, None);
        sampled.sample = Some(
            Measurement::default()
                .with(Parameter::Ph, dec!(7.2))
                .with(Parameter::Tds, dec!(300)),
        );
        let locations = vec![
            site("Lake", 22.5, 88.3, Some(dec!(45))),
            site("Pond", 22.6, 88.4, None),
            sampled,
        ];
        let mut out = Vec::new();
        write_csv(&locations, &table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines[0],
            "Location Name,Latitude,Longitude,WQI,Status,pH,DO (mg/L),TDS (mg/L),\
             Turbidity (NTU),Nitrate (mg/L),Temperature (C),Category"
        );
        assert_eq!(lines[1], "Lake,22.5,88.3,45,Good,,,,,,,");
        assert_eq!(lines[2], "Pond,22.6,88.4,,No Data,,,,,,,");
        assert!(lines[3].starts_with("Canal,22.7,88.5,"));
        assert!(lines[3].ends_with(",7.2,,300,,,,"));
    }
}
