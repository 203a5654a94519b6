use crate::model::{Measurement, Parameter};
use crate::score::outcome::Reason;
use crate::standards::schema::StandardTable;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Maximum number of reasons returned by default.
pub const DEFAULT_REASON_LIMIT: usize = 3;

/// Which parameter set, ordering and wording to use for explanations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExplainProfile {
    /// Full laboratory panel of six parameters.
    #[default]
    Laboratory,
    /// Reduced set reported by the field sensor.
    Sensor,
}

impl ExplainProfile {
    pub fn from_str_loose(s: &str) -> Option<ExplainProfile> {
        match s.trim().to_lowercase().as_str() {
            "laboratory" | "lab" | "full" => Some(ExplainProfile::Laboratory),
            "sensor" | "iot" => Some(ExplainProfile::Sensor),
            _ => None,
        }
    }

    /// Parameters considered, in tie-breaking order.
    pub fn parameters(&self) -> &'static [Parameter] {
        match self {
            ExplainProfile::Laboratory => &[
                Parameter::Ph,
                Parameter::DissolvedOxygen,
                Parameter::Turbidity,
                Parameter::Tds,
                Parameter::Nitrate,
                Parameter::Temperature,
            ],
            ExplainProfile::Sensor => &[
                Parameter::Temperature,
                Parameter::Ph,
                Parameter::Turbidity,
            ],
        }
    }

    fn all_clear_message(&self) -> &'static str {
        match self {
            ExplainProfile::Laboratory => {
                "All measured parameters are close to ideal levels for clean water."
            }
            ExplainProfile::Sensor => {
                "Current sensor readings are close to comfortable levels for clean water."
            }
        }
    }

    fn message(&self, parameter: Parameter, observed: Decimal, ideal: Decimal) -> &'static str {
        match (self, parameter) {
            (ExplainProfile::Laboratory, Parameter::Ph) if observed > ideal => {
                "The pH is higher than the ideal level, which can make the water slightly more basic."
            }
            (ExplainProfile::Laboratory, Parameter::Ph) => {
                "The pH is lower than the ideal level, which can make the water slightly more acidic."
            }
            (ExplainProfile::Sensor, Parameter::Ph) if observed > ideal => {
                "The pH is higher than the ideal level, making the water slightly more basic."
            }
            (ExplainProfile::Sensor, Parameter::Ph) => {
                "The pH is lower than the ideal level, making the water slightly more acidic."
            }
            (_, Parameter::DissolvedOxygen) => {
                "Dissolved oxygen is lower than ideal, which can be a sign of stressed water quality."
            }
            (ExplainProfile::Laboratory, Parameter::Turbidity) => {
                "The water looks more cloudy (higher turbidity), which can indicate suspended particles."
            }
            (ExplainProfile::Sensor, Parameter::Turbidity) => {
                "The water looks more cloudy (higher turbidity), which can indicate tiny floating particles."
            }
            (_, Parameter::Tds) => {
                "Total dissolved solids are higher than ideal, meaning more salts and minerals in the water."
            }
            (_, Parameter::Nitrate) => {
                "Nitrate levels are higher, often linked to runoff from farms or waste."
            }
            (ExplainProfile::Laboratory, Parameter::Temperature) => {
                "The temperature is away from the comfortable range, which can affect how healthy the water is."
            }
            (ExplainProfile::Sensor, Parameter::Temperature) => {
                "The water temperature is away from the comfortable range, which can affect how healthy the water feels."
            }
        }
    }
}

/// Scores at or below this are treated as "close to ideal".
pub fn significance_threshold() -> Decimal {
    Decimal::new(1, 1)
}

/// How far a reading strays from ideal, in the direction that matters.
pub fn severity_score(parameter: Parameter, observed: Decimal, ideal: Decimal) -> Decimal {
    let delta = observed.saturating_sub(ideal);
    let excess = delta.max(Decimal::ZERO);
    match parameter {
        Parameter::Ph => delta.abs(),
        Parameter::DissolvedOxygen => ideal.saturating_sub(observed).max(Decimal::ZERO),
        Parameter::Turbidity => excess,
        Parameter::Tds => excess / Decimal::from(50),
        Parameter::Nitrate => excess / Decimal::from(2),
        Parameter::Temperature => delta.abs() / Decimal::from(2),
    }
}

/// Rank the parameters that stray furthest from ideal.
///
/// Only parameters that are both measured and present in `table` are scored.
/// Returns at most `limit` reasons, most severe first, keeping the profile's
/// order among equal scores. If nothing scores above the significance
/// threshold, a single all-clear reason is returned instead.
pub fn explain(
    measurement: &Measurement,
    table: &StandardTable,
    profile: ExplainProfile,
    limit: usize,
) -> Vec<Reason> {
    let mut scored: Vec<(Parameter, Decimal, Decimal, Decimal)> = profile
        .parameters()
        .iter()
        .filter_map(|&parameter| {
            let observed = measurement.get(parameter)?;
            let ideal = table.ideal(parameter)?;
            let score = severity_score(parameter, observed, ideal);
            Some((parameter, observed, ideal, score))
        })
        .collect();

    // sort_by is stable, so ties keep profile order
    scored.sort_by(|a, b| b.3.cmp(&a.3));

    let threshold = significance_threshold();
    scored.retain(|(_, _, _, score)| *score > threshold);

    if scored.is_empty() {
        return vec![Reason {
            parameter: None,
            score: Decimal::ZERO,
            message: profile.all_clear_message().to_string(),
        }];
    }

    scored
        .into_iter()
        .take(limit)
        .map(|(parameter, observed, ideal, score)| Reason {
            parameter: Some(parameter),
            score,
            message: profile.message(parameter, observed, ideal).to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::standards::builtin::load_preset;
    use rust_decimal_macros::dec;

    fn full_sample() -> Measurement {
        Measurement {
            ph: Some(dec!(7.0)),
            dissolved_oxygen: Some(dec!(14.6)),
            turbidity: Some(dec!(0)),
            tds: Some(dec!(0)),
            nitrate: Some(dec!(0)),
            temperature: Some(dec!(25)),
        }
    }

    #[test]
    fn test_ideal_sample_is_all_clear() {
        let table = load_preset("drinking").unwrap();
        let reasons = explain(&full_sample(), &table, ExplainProfile::Laboratory, 3);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].is_all_clear());
        assert!(reasons[0].message.starts_with("All measured parameters"));
    }

    #[test]
    fn test_empty_measurement_is_all_clear() {
        let table = load_preset("drinking").unwrap();
        let reasons = explain(&Measurement::default(), &table, ExplainProfile::Sensor, 3);
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].message.starts_with("Current sensor readings"));
    }

    #[test]
    fn test_ranked_most_severe_first() {
        let table = load_preset("drinking").unwrap();
        let mut m = full_sample();
        m.ph = Some(dec!(8.0)); // 1.0
        m.tds = Some(dec!(400)); // 8.0
        m.nitrate = Some(dec!(10)); // 5.0
        m.dissolved_oxygen = Some(dec!(12.6)); // 2.0
        let reasons = explain(&m, &table, ExplainProfile::Laboratory, DEFAULT_REASON_LIMIT);
        let params: Vec<Parameter> = reasons.iter().filter_map(|r| r.parameter).collect();
        assert_eq!(
            params,
            vec![Parameter::Tds, Parameter::Nitrate, Parameter::DissolvedOxygen]
        );
        assert_eq!(reasons[0].score, dec!(8));
    }

    #[test]
    fn test_never_more_than_limit() {
        let table = load_preset("drinking").unwrap();
        let m = Measurement {
            ph: Some(dec!(9)),
            dissolved_oxygen: Some(dec!(2)),
            turbidity: Some(dec!(20)),
            tds: Some(dec!(900)),
            nitrate: Some(dec!(80)),
            temperature: Some(dec!(35)),
        };
        let reasons = explain(&m, &table, ExplainProfile::Laboratory, DEFAULT_REASON_LIMIT);
        assert_eq!(reasons.len(), 3);
        assert!(reasons.iter().all(|r| !r.is_all_clear()));

        // a zero limit on a bad sample is silence, not an all-clear
        assert!(explain(&m, &table, ExplainProfile::Laboratory, 0).is_empty());
    }

    #[test]
    fn test_ties_keep_profile_order() {
        let table = load_preset("drinking").unwrap();
        // temperature |27 - 25| / 2 = 1.0, ph |8 - 7| = 1.0
        let m = Measurement {
            ph: Some(dec!(8)),
            temperature: Some(dec!(27)),
            ..Default::default()
        };
        let lab = explain(&m, &table, ExplainProfile::Laboratory, 3);
        assert_eq!(lab[0].parameter, Some(Parameter::Ph));
        assert_eq!(lab[1].parameter, Some(Parameter::Temperature));

        let sensor = explain(&m, &table, ExplainProfile::Sensor, 3);
        assert_eq!(sensor[0].parameter, Some(Parameter::Temperature));
        assert_eq!(sensor[1].parameter, Some(Parameter::Ph));
    }

    #[test]
    fn test_threshold_is_exclusive() {
        let table = load_preset("drinking").unwrap();
        // pH deviation of exactly 0.1 does not qualify
        let m = Measurement::default().with(Parameter::Ph, dec!(7.1));
        let reasons = explain(&m, &table, ExplainProfile::Laboratory, 3);
        assert!(reasons[0].is_all_clear());

        let m = Measurement::default().with(Parameter::Ph, dec!(7.11));
        let reasons = explain(&m, &table, ExplainProfile::Laboratory, 3);
        assert_eq!(reasons[0].parameter, Some(Parameter::Ph));
    }

    #[test]
    fn test_ph_template_branches_on_sign() {
        let table = load_preset("drinking").unwrap();
        let high = explain(
            &Measurement::default().with(Parameter::Ph, dec!(8.2)),
            &table,
            ExplainProfile::Laboratory,
            3,
        );
        assert!(high[0].message.contains("more basic"));

        let low = explain(
            &Measurement::default().with(Parameter::Ph, dec!(6.0)),
            &table,
            ExplainProfile::Sensor,
            3,
        );
        assert!(low[0].message.contains("more acidic"));
    }

    #[test]
    fn test_sensor_profile_ignores_lab_parameters() {
        let table = load_preset("drinking").unwrap();
        let m = Measurement::default().with(Parameter::Nitrate, dec!(90));
        let reasons = explain(&m, &table, ExplainProfile::Sensor, 3);
        assert!(reasons[0].is_all_clear());
    }

    #[test]
    fn test_field_table_tolerates_baseline_turbidity() {
        let m = Measurement::default().with(Parameter::Turbidity, dec!(1.0));
        let drinking = load_preset("drinking").unwrap();
        let field = load_preset("field").unwrap();
        let strict = explain(&m, &drinking, ExplainProfile::Sensor, 3);
        assert_eq!(strict[0].parameter, Some(Parameter::Turbidity));
        let tolerant = explain(&m, &field, ExplainProfile::Sensor, 3);
        assert!(tolerant[0].is_all_clear());
    }

    #[test]
    fn test_severity_scores() {
        assert_eq!(severity_score(Parameter::Tds, dec!(600), dec!(0)), dec!(12));
        assert_eq!(severity_score(Parameter::Nitrate, dec!(5), dec!(0)), dec!(2.5));
        assert_eq!(severity_score(Parameter::DissolvedOxygen, dec!(16), dec!(14.6)), dec!(0));
        assert_eq!(severity_score(Parameter::Temperature, dec!(21), dec!(25)), dec!(2));
    }

    #[test]
    fn test_severity_saturates_on_extreme_readings() {
        assert_eq!(severity_score(Parameter::Ph, Decimal::MIN, dec!(7)), Decimal::MAX);
        assert_eq!(
            severity_score(Parameter::DissolvedOxygen, Decimal::MIN, dec!(14.6)),
            Decimal::MAX
        );
        let table = load_preset("drinking").unwrap();
        let m = Measurement::default().with(Parameter::Ph, Decimal::MAX);
        let reasons = explain(&m, &table, ExplainProfile::Laboratory, DEFAULT_REASON_LIMIT);
        assert_eq!(reasons[0].parameter, Some(Parameter::Ph));
    }
}
