//! Injury Aggregation Module
//! Group-and-sum transformations over the injury table (reshape for accident types).

use crate::data::regions;
use crate::data::schema::*;
use polars::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AggregateError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Which description represents a sector whose rows disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DescriptionPolicy {
    /// First non-null description in table order
    #[default]
    First,
    /// Alphabetically smallest description
    Min,
}

/// DAFW total for one sector code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectorAggregate {
    pub sector_code: String,
    pub description: Option<String>,
    pub total_dafw_cases: i64,
}

/// Number of establishments reporting exactly one case of an accident type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccidentTypeCount {
    pub accident_type: String,
    pub count: u64,
}

/// DAFW total for one US state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAggregate {
    pub state: String,
    pub state_name: String,
    pub total_dafw_cases: i64,
    pub hover_text: String,
}

impl StateAggregate {
    pub fn new(state: String, state_name: String, total_dafw_cases: i64) -> Self {
        let hover_text = format!("{}<br>Total DAFW Cases: {}", state_name, total_dafw_cases);
        Self {
            state,
            state_name,
            total_dafw_cases,
            hover_text,
        }
    }
}

/// Stateless aggregations; every call recomputes from the table.
pub struct InjuryAggregator;

impl InjuryAggregator {
    /// Sum DAFW cases per sector code. Rows without a sector code are dropped.
    ///
    /// DAFW values that are not integers fail the aggregation.
    /// Output is sorted by sector code (as text).
    pub fn sector_totals(
        df: &DataFrame,
        policy: DescriptionPolicy,
    ) -> Result<Vec<SectorAggregate>, AggregateError> {
        let description = match policy {
            DescriptionPolicy::First => col(DESCRIPTION).drop_nulls().first(),
            DescriptionPolicy::Min => col(DESCRIPTION).min(),
        };

        let out = df
            .clone()
            .lazy()
            .select([
                col(SECTORS_CODE).cast(DataType::String),
                col(TOTAL_DAFW_CASES).strict_cast(DataType::Int64),
                col(DESCRIPTION).cast(DataType::String),
            ])
            .filter(col(SECTORS_CODE).is_not_null())
            .group_by_stable([col(SECTORS_CODE)])
            .agg([col(TOTAL_DAFW_CASES).sum(), description])
            .collect()?;

        let codes = out.column(SECTORS_CODE)?.str()?;
        let totals = out.column(TOTAL_DAFW_CASES)?.i64()?;
        let descriptions = out.column(DESCRIPTION)?.str()?;

        let mut sectors: Vec<SectorAggregate> = codes
            .into_iter()
            .zip(totals)
            .zip(descriptions)
            .filter_map(|((code, total), description)| {
                Some(SectorAggregate {
                    sector_code: code?.to_string(),
                    description: description.map(str::to_string),
                    total_dafw_cases: total.unwrap_or(0),
                })
            })
            .collect();

        sectors.sort_by(|a, b| a.sector_code.cmp(&b.sector_code));
        Ok(sectors)
    }

    /// Reshape the four injury columns into long format.
    ///
    /// Output columns: the five id columns, "accident_type", "count"
    pub fn melt_accident_types(df: &DataFrame) -> Result<DataFrame, AggregateError> {
        let frames: Vec<LazyFrame> = ACCIDENT_TYPE_COLUMNS
            .iter()
            .map(|&value_col| {
                let mut exprs: Vec<Expr> = ACCIDENT_ID_COLUMNS.iter().map(|&c| col(c)).collect();
                exprs.push(lit(value_col).alias(ACCIDENT_TYPE));
                exprs.push(col(value_col).cast(DataType::Float64).alias(COUNT));
                df.clone().lazy().select(exprs)
            })
            .collect();

        Ok(concat(frames, UnionArgs::default())?.collect()?)
    }

    /// Count, per accident type, the rows whose value is exactly 1.
    ///
    /// Types are not exclusive: one row may count towards several types.
    /// Sorted by count descending, then by type name.
    pub fn accident_distribution(df: &DataFrame) -> Result<Vec<AccidentTypeCount>, AggregateError> {
        let long = Self::melt_accident_types(df)?;

        let out = long
            .lazy()
            .filter(col(COUNT).eq(lit(1.0)))
            .group_by([col(ACCIDENT_TYPE)])
            .agg([len().alias(COUNT)])
            .collect()?;

        let types = out.column(ACCIDENT_TYPE)?.str()?;
        let counts = out.column(COUNT)?.cast(&DataType::UInt64)?;
        let counts = counts.u64()?;

        let mut distribution: Vec<AccidentTypeCount> = types
            .into_iter()
            .zip(counts)
            .filter_map(|(accident_type, count)| {
                Some(AccidentTypeCount {
                    accident_type: accident_type?.to_string(),
                    count: count.unwrap_or(0),
                })
            })
            .collect();

        distribution.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.accident_type.cmp(&b.accident_type))
        });
        Ok(distribution)
    }

    /// Sum DAFW cases per state, decorated with the full state name.
    ///
    /// Codes missing from the lookup get a null name and drop out of the
    /// grouping. Output is sorted by state code.
    pub fn state_totals(df: &DataFrame) -> Result<Vec<StateAggregate>, AggregateError> {
        let states = df.column(STATE)?.cast(&DataType::String)?;
        let codes: Vec<Option<String>> = states
            .str()?
            .into_iter()
            .map(|code| code.map(str::to_string))
            .collect();
        let names: Vec<Option<&'static str>> = codes
            .iter()
            .map(|code| code.as_deref().and_then(regions::state_name))
            .collect();

        let frame = DataFrame::new(vec![
            Column::new(STATE.into(), codes),
            Column::new(STATE_NAME.into(), names),
            df.column(TOTAL_DAFW_CASES)?.strict_cast(&DataType::Int64)?,
        ])?;

        let out = frame
            .lazy()
            .filter(col(STATE).is_not_null().and(col(STATE_NAME).is_not_null()))
            .group_by_stable([col(STATE), col(STATE_NAME)])
            .agg([col(TOTAL_DAFW_CASES).sum()])
            .collect()?;

        let codes = out.column(STATE)?.str()?;
        let names = out.column(STATE_NAME)?.str()?;
        let totals = out.column(TOTAL_DAFW_CASES)?.i64()?;

        let mut aggregates: Vec<StateAggregate> = codes
            .into_iter()
            .zip(names)
            .zip(totals)
            .filter_map(|((code, name), total)| {
                Some(StateAggregate::new(
                    code?.to_string(),
                    name?.to_string(),
                    total.unwrap_or(0),
                ))
            })
            .collect();

        aggregates.sort_by(|a, b| a.state.cmp(&b.state));
        Ok(aggregates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::{injury_frame, single_row};

    fn count_of(distribution: &[AccidentTypeCount], accident_type: &str) -> u64 {
        distribution
            .iter()
            .find(|c| c.accident_type == accident_type)
            .map(|c| c.count)
            .unwrap_or(0)
    }

    #[test]
    fn sector_totals_sum_each_code() {
        let sectors = InjuryAggregator::sector_totals(&injury_frame(), DescriptionPolicy::First).unwrap();

        let summary: Vec<(&str, i64)> = sectors
            .iter()
            .map(|s| (s.sector_code.as_str(), s.total_dafw_cases))
            .collect();
        assert_eq!(summary, vec![("11", 8), ("23", 3), ("31", 0)]);
    }

    #[test]
    fn sector_description_follows_policy() {
        let df = injury_frame();

        let first = InjuryAggregator::sector_totals(&df, DescriptionPolicy::First).unwrap();
        assert_eq!(first[0].description.as_deref(), Some("Farming"));

        let min = InjuryAggregator::sector_totals(&df, DescriptionPolicy::Min).unwrap();
        assert_eq!(min[0].description.as_deref(), Some("Agriculture"));
    }

    #[test]
    fn sector_totals_skip_null_codes_and_first_null_description() {
        let df = df!(
            SECTORS_CODE => [None, Some(42i64), Some(42)],
            TOTAL_DAFW_CASES => [100i64, 4, 6],
            DESCRIPTION => [Some("Orphan"), None, Some("Retail")],
        )
        .unwrap();

        let sectors = InjuryAggregator::sector_totals(&df, DescriptionPolicy::First).unwrap();
        assert_eq!(
            sectors,
            vec![SectorAggregate {
                sector_code: "42".to_string(),
                description: Some("Retail".to_string()),
                total_dafw_cases: 10,
            }]
        );
    }

    #[test]
    fn sector_totals_match_direct_filter() {
        let df = injury_frame();
        let sectors = InjuryAggregator::sector_totals(&df, DescriptionPolicy::First).unwrap();

        let codes: Vec<Option<i64>> = df.column(SECTORS_CODE).unwrap().i64().unwrap().into_iter().collect();
        let dafw: Vec<Option<i64>> = df.column(TOTAL_DAFW_CASES).unwrap().i64().unwrap().into_iter().collect();
        for sector in &sectors {
            let expected: i64 = codes
                .iter()
                .zip(&dafw)
                .filter(|(c, _)| c.map(|c| c.to_string()) == Some(sector.sector_code.clone()))
                .map(|(_, v)| v.unwrap_or(0))
                .sum();
            assert_eq!(sector.total_dafw_cases, expected);
        }
    }

    #[test]
    fn melt_keeps_id_columns() {
        let long = InjuryAggregator::melt_accident_types(&injury_frame()).unwrap();
        assert_eq!(long.height(), 20);
        for id in ACCIDENT_ID_COLUMNS {
            assert!(long.column(id).is_ok(), "missing {id}");
        }
    }

    #[test]
    fn accident_distribution_counts_unit_values() {
        let distribution = InjuryAggregator::accident_distribution(&injury_frame()).unwrap();

        let order: Vec<(&str, u64)> = distribution
            .iter()
            .map(|c| (c.accident_type.as_str(), c.count))
            .collect();
        assert_eq!(
            order,
            vec![
                (TOTAL_DJTR_CASES, 3),
                (TOTAL_OTHER_CASES, 3),
                (TOTAL_DEATHS, 2),
                (TOTAL_DAFW_CASES, 1),
            ]
        );
    }

    #[test]
    fn accident_types_are_not_exclusive() {
        let distribution = InjuryAggregator::accident_distribution(&single_row(1, 0, 1, 0)).unwrap();

        assert_eq!(count_of(&distribution, TOTAL_DEATHS), 1);
        assert_eq!(count_of(&distribution, TOTAL_DJTR_CASES), 1);
        assert_eq!(count_of(&distribution, TOTAL_DAFW_CASES), 0);
        assert_eq!(count_of(&distribution, TOTAL_OTHER_CASES), 0);
        assert_eq!(distribution.len(), 2);
    }

    #[test]
    fn accident_counts_are_bounded_by_rows() {
        let df = injury_frame();
        let distribution = InjuryAggregator::accident_distribution(&df).unwrap();

        let rows = df.height() as u64;
        assert!(distribution.iter().all(|c| c.count <= rows));
        assert!(distribution.iter().map(|c| c.count).sum::<u64>() <= 4 * rows);
    }

    #[test]
    fn state_totals_scenario() {
        let df = df!(
            STATE => ["CA", "CA", "NY"],
            TOTAL_DAFW_CASES => [5i64, 3, 2],
        )
        .unwrap();

        let states = InjuryAggregator::state_totals(&df).unwrap();
        assert_eq!(
            states,
            vec![
                StateAggregate::new("CA".to_string(), "California".to_string(), 8),
                StateAggregate::new("NY".to_string(), "New York".to_string(), 2),
            ]
        );
        assert_eq!(states[0].hover_text, "California<br>Total DAFW Cases: 8");
    }

    #[test]
    fn state_totals_drop_unknown_codes() {
        let states = InjuryAggregator::state_totals(&injury_frame()).unwrap();

        let codes: Vec<&str> = states.iter().map(|s| s.state.as_str()).collect();
        assert_eq!(codes, vec!["CA", "NY", "TX"]);
        for state in &states {
            assert_eq!(Some(state.state_name.as_str()), regions::state_name(&state.state));
        }
    }

    #[test]
    fn missing_column_surfaces_as_error() {
        let df = df!(STATE => ["CA"]).unwrap();
        assert!(InjuryAggregator::state_totals(&df).is_err());
        assert!(InjuryAggregator::sector_totals(&df, DescriptionPolicy::First).is_err());
    }

    #[test]
    fn non_numeric_dafw_is_an_error() {
        let df = df!(
            SECTORS_CODE => [11i64, 23],
            STATE => ["CA", "NY"],
            TOTAL_DAFW_CASES => ["5", "abc"],
            DESCRIPTION => ["Farming", "Construction"],
        )
        .unwrap();

        assert!(InjuryAggregator::sector_totals(&df, DescriptionPolicy::First).is_err());
        assert!(InjuryAggregator::state_totals(&df).is_err());
    }
}
