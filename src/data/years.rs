//! Year-Value Column Detector
//! Finds wide per-year value columns such as `value_2022` or `current_value_2024`.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

/// Years accepted as value-column suffixes.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 2000..=2099;

#[derive(Error, Debug)]
pub enum YearColumnError {
    #[error("No years could be inferred from value columns: {}", .columns.join(", "))]
    NoYearsInferred { columns: Vec<String> },
}

fn value_column_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^(current_)?value_(\d{4})$").expect("static value column pattern")
    })
}

/// Year to source column, ordered by year.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YearColumns {
    columns: BTreeMap<i32, String>,
}

impl YearColumns {
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn get(&self, year: i32) -> Option<&str> {
        self.columns.get(&year).map(String::as_str)
    }

    pub fn years(&self) -> Vec<i32> {
        self.columns.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (i32, &str)> {
        self.columns.iter().map(|(y, c)| (*y, c.as_str()))
    }
}

/// Scans column names for year-value columns.
pub struct YearColumnDetector;

impl YearColumnDetector {
    /// Build the year map. `current_value_YYYY` wins over `value_YYYY`.
    ///
    /// An empty map means the table carries no value-year columns at all.
    /// Columns shaped like value columns whose year falls outside
    /// [`YEAR_RANGE`] are an error when nothing else qualifies.
    pub fn detect(columns: &[String]) -> Result<YearColumns, YearColumnError> {
        let mut chosen: BTreeMap<i32, (bool, String)> = BTreeMap::new();
        let mut rejected = Vec::new();

        for name in columns {
            let Some(caps) = value_column_pattern().captures(name) else {
                continue;
            };
            let is_current = caps.get(1).is_some();
            let year = caps[2].parse::<i32>().ok().filter(|y| YEAR_RANGE.contains(y));
            let Some(year) = year else {
                rejected.push(name.clone());
                continue;
            };

            match chosen.get(&year) {
                Some((true, _)) => {}
                Some((false, _)) if !is_current => {}
                _ => {
                    chosen.insert(year, (is_current, name.clone()));
                }
            }
        }

        if chosen.is_empty() && !rejected.is_empty() {
            return Err(YearColumnError::NoYearsInferred { columns: rejected });
        }

        Ok(YearColumns {
            columns: chosen
                .into_iter()
                .map(|(year, (_, name))| (year, name))
                .collect(),
        })
    }
}
