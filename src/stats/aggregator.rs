//! OD Aggregator Module
//! Sums value per origin-destination pair and ranks the pairs.

use crate::data::{float_values, string_values, DESTINATION, ORIGIN};
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::HashMap;

/// Output column holding the summed value.
pub const VALUE_MILLION_USD: &str = "value_million_usd";

/// Summed value for one origin-destination pair.
#[derive(Debug, Clone, PartialEq)]
pub struct OdTotal {
    pub origin: Option<String>,
    pub destination: Option<String>,
    pub total: f64,
}

/// Groups and ranks OD pairs.
pub struct OdAggregator;

impl OdAggregator {
    /// Group `df` by (origin, destination) and sum `value_col`, skipping
    /// missing cells. Sorted by total descending; equal totals fall back to
    /// origin then destination ascending. At most `limit` rows are kept.
    pub fn top_pairs(df: &DataFrame, value_col: &str, limit: usize) -> PolarsResult<Vec<OdTotal>> {
        let origins = string_values(df, ORIGIN)?;
        let destinations = string_values(df, DESTINATION)?;
        let values = float_values(df, value_col)?;

        let mut sums: HashMap<(Option<String>, Option<String>), f64> = HashMap::new();
        for ((origin, destination), value) in origins.into_iter().zip(destinations).zip(values) {
            *sums.entry((origin, destination)).or_insert(0.0) += value.unwrap_or(0.0);
        }

        let mut totals: Vec<OdTotal> = sums
            .into_iter()
            .map(|((origin, destination), total)| OdTotal {
                origin,
                destination,
                total,
            })
            .collect();
        totals.sort_by(Self::ranking);
        totals.truncate(limit);
        Ok(totals)
    }

    fn ranking(a: &OdTotal, b: &OdTotal) -> Ordering {
        b.total
            .total_cmp(&a.total)
            .then_with(|| a.origin.cmp(&b.origin))
            .then_with(|| a.destination.cmp(&b.destination))
    }

    /// Summary table: ["origin", "destination", "value_million_usd"].
    pub fn to_dataframe(totals: &[OdTotal]) -> PolarsResult<DataFrame> {
        let origins: Vec<Option<String>> = totals.iter().map(|t| t.origin.clone()).collect();
        let destinations: Vec<Option<String>> =
            totals.iter().map(|t| t.destination.clone()).collect();
        let values: Vec<f64> = totals.iter().map(|t| t.total).collect();

        DataFrame::new(vec![
            Column::new(ORIGIN.into(), origins),
            Column::new(DESTINATION.into(), destinations),
            Column::new(VALUE_MILLION_USD.into(), values),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::VALUE;

    fn od(origin: &str, destination: &str, total: f64) -> OdTotal {
        OdTotal {
            origin: Some(origin.to_string()),
            destination: Some(destination.to_string()),
            total,
        }
    }

    #[test]
    fn sums_and_ranks_pairs() {
        let df = df!(
            ORIGIN => ["CA", "NY", "CA", "WA"],
            DESTINATION => ["TX", "FL", "TX", "OR"],
            VALUE => [Some(10.0), Some(30.0), Some(25.0), None]
        )
        .unwrap();

        let totals = OdAggregator::top_pairs(&df, VALUE, 10).unwrap();
        assert_eq!(
            totals,
            vec![od("CA", "TX", 35.0), od("NY", "FL", 30.0), od("WA", "OR", 0.0)]
        );
    }

    #[test]
    fn ties_break_on_origin_then_destination() {
        let df = df!(
            ORIGIN => ["NY", "AZ", "AZ"],
            DESTINATION => ["FL", "UT", "NV"],
            VALUE => [5.0, 5.0, 5.0]
        )
        .unwrap();

        let totals = OdAggregator::top_pairs(&df, VALUE, 10).unwrap();
        assert_eq!(
            totals,
            vec![od("AZ", "NV", 5.0), od("AZ", "UT", 5.0), od("NY", "FL", 5.0)]
        );
    }

    #[test]
    fn keeps_only_limit_rows() {
        let origins: Vec<String> = (0..15).map(|i| format!("S{i:02}")).collect();
        let destinations = vec!["TX".to_string(); 15];
        let values: Vec<f64> = (0..15).map(f64::from).collect();
        let df = df!(ORIGIN => origins, DESTINATION => destinations, VALUE => values).unwrap();

        let totals = OdAggregator::top_pairs(&df, VALUE, 10).unwrap();
        assert_eq!(totals.len(), 10);
        assert_eq!(totals[0], od("S14", "TX", 14.0));
        assert_eq!(totals[9], od("S05", "TX", 5.0));
    }

    #[test]
    fn aggregating_a_summary_again_is_stable() {
        let df = df!(
            ORIGIN => ["CA", "CA", "NY", "NY", "OR"],
            DESTINATION => ["TX", "TX", "FL", "FL", "WA"],
            VALUE => [1.5, 2.5, 3.0, 4.0, 0.5]
        )
        .unwrap();

        let first = OdAggregator::top_pairs(&df, VALUE, 10).unwrap();
        let summary = OdAggregator::to_dataframe(&first).unwrap();
        let second = OdAggregator::top_pairs(&summary, VALUE_MILLION_USD, 10).unwrap();
        assert_eq!(first, second);
    }
}
