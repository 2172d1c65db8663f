use serde::Serialize;

use crate::error::{AnalysisError, Result};
use crate::models::{SameDaySubset, TempField, TemperatureRecord};

/// Position of one value inside a same-day historical series.
#[derive(Debug, Clone, Serialize)]
pub struct RankResult {
    /// 1-based position, most extreme first.
    pub rank: usize,
    /// 0-100 scale, 0 = most extreme.
    pub percentile: f64,
    pub population: usize,
    /// The record at sorted position 0.
    pub record_holder: TemperatureRecord,
}

/// Sorts subset references by `field`, tie-breaking by date ascending so
/// that equal temperatures rank deterministically (earliest date wins).
fn sorted_refs<'a>(
    subset: &SameDaySubset<'a>,
    field: TempField,
    ascending: bool,
) -> Vec<&'a TemperatureRecord> {
    let mut refs = subset.records().to_vec();
    refs.sort_by(|a, b| {
        let by_value = a.field(field).total_cmp(&b.field(field));
        let by_value = if ascending { by_value } else { by_value.reverse() };
        by_value.then_with(|| a.date.cmp(&b.date))
    });
    refs
}

/// Ranks `value` inside the subset's `field` series.
///
/// The value must actually occur in the series; ranking a value the table
/// never produced fails with `ValueNotFound` rather than returning a
/// meaningless position.
pub fn rank_and_percentile(
    subset: &SameDaySubset<'_>,
    field: TempField,
    value: f64,
    ascending: bool,
) -> Result<RankResult> {
    if subset.is_empty() {
        return Err(AnalysisError::EmptySelection(format!(
            "no records for {}",
            subset.describe()
        )));
    }

    let sorted = sorted_refs(subset, field, ascending);
    let index = sorted
        .iter()
        .position(|r| r.field(field) == value)
        .ok_or_else(|| AnalysisError::ValueNotFound {
            field: field.label().to_string(),
            value,
        })?;

    let rank = index + 1;
    let population = sorted.len();
    let percentile = 100.0 * (rank as f64 - 1.0) / population as f64;

    Ok(RankResult {
        rank,
        percentile,
        population,
        record_holder: sorted[0].clone(),
    })
}

/// The most extreme record of the subset for `field`.
pub fn extreme_record(
    subset: &SameDaySubset<'_>,
    field: TempField,
    ascending: bool,
) -> Result<TemperatureRecord> {
    if subset.is_empty() {
        return Err(AnalysisError::EmptySelection(format!(
            "no records for {}",
            subset.describe()
        )));
    }

    Ok(sorted_refs(subset, field, ascending)[0].clone())
}

/// The `n` most extreme records for `field`, most extreme first. An empty
/// subset yields an empty vec.
pub fn top_n(
    subset: &SameDaySubset<'_>,
    field: TempField,
    ascending: bool,
    n: usize,
) -> Vec<TemperatureRecord> {
    sorted_refs(subset, field, ascending)
        .into_iter()
        .take(n)
        .cloned()
        .collect()
}
