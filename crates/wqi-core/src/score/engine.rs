use crate::model::{Measurement, Parameter};
use crate::score::outcome::{IndexBreakdown, SubIndex};
use crate::standards::schema::{ParameterStandard, StandardTable};
use rust_decimal::{Decimal, RoundingStrategy};

/// Compute the Water Quality Index of a measurement.
///
/// Parameters absent from the measurement contribute to neither the
/// numerator nor the denominator. A measurement with no scored parameter
/// yields `0.00`.
pub fn compute_index(measurement: &Measurement, table: &StandardTable) -> Decimal {
    compute_breakdown(measurement, table).index
}

/// Compute the index along with every sub-index that went into it.
pub fn compute_breakdown(measurement: &Measurement, table: &StandardTable) -> IndexBreakdown {
    let k = weight_constant(table);

    let mut total_qw = Decimal::ZERO;
    let mut total_w = Decimal::ZERO;
    let mut sub_indices = Vec::new();

    for (&parameter, entry) in &table.parameters {
        let Some(observed) = measurement.get(parameter) else {
            continue;
        };

        let weight = k / entry.standard;
        let qi = quality_rating(parameter, observed, entry);

        total_qw = total_qw.saturating_add(qi.saturating_mul(weight));
        total_w += weight;

        sub_indices.push(SubIndex {
            parameter,
            observed,
            quality_rating: round2(qi),
            weight,
        });
    }

    let unscored: Vec<Parameter> = measurement
        .readings()
        .map(|(parameter, _)| parameter)
        .filter(|parameter| table.get(*parameter).is_none())
        .collect();
    for parameter in &unscored {
        log::debug!(
            "{} is not in standard table '{}', skipping",
            parameter.key(),
            table.name
        );
    }

    let index = if total_w.is_zero() {
        round2(Decimal::ZERO)
    } else {
        round2(total_qw.checked_div(total_w).unwrap_or(Decimal::MAX))
    };

    IndexBreakdown {
        index,
        sub_indices,
        unscored,
    }
}

/// `K = 1 / Σ(1 / standard)` over every parameter in the table.
///
/// The table must have passed validation (all standards positive).
pub fn weight_constant(table: &StandardTable) -> Decimal {
    let inverse_sum: Decimal = table
        .parameters
        .values()
        .map(|entry| Decimal::ONE / entry.standard)
        .fold(Decimal::ZERO, |acc, inverse| acc.saturating_add(inverse));
    if inverse_sum.is_zero() {
        return Decimal::ZERO;
    }
    Decimal::ONE / inverse_sum
}

/// Sub-index of a single reading, floored at zero.
///
/// Temperature is scored on its absolute deviation from ideal; every other
/// parameter on the signed deviation, so readings "better than ideal" score 0.
/// Ratings beyond the `Decimal` range saturate at `Decimal::MAX`.
pub fn quality_rating(parameter: Parameter, observed: Decimal, entry: &ParameterStandard) -> Decimal {
    let deviation = match parameter {
        Parameter::Temperature => observed.saturating_sub(entry.ideal).abs(),
        _ => observed.saturating_sub(entry.ideal),
    };
    let range = entry.standard.saturating_sub(entry.ideal);
    let qi = deviation
        .checked_div(range)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if deviation.is_sign_negative() == range.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::ZERO
        });
    qi.max(Decimal::ZERO)
}

/// Round half away from zero to exactly 2 decimal places.
pub fn round2(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}
