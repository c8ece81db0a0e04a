//! Dropdown Lookup Module
//! Builds "{code} - {label}" options and resolves a selection back to a DAFW total.

use crate::data::aggregate::{AggregateError, StateAggregate};
use crate::data::schema::*;
use polars::prelude::*;
use std::collections::HashSet;
use thiserror::Error;

/// Separator between code and label in an option string.
pub const OPTION_SEPARATOR: &str = " - ";

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("State {0:?} is not among the state options")]
    UnknownState(String),
    #[error("Sector {0:?} is not among the sector options")]
    UnknownSector(String),
    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl From<PolarsError> for LookupError {
    fn from(e: PolarsError) -> Self {
        LookupError::Aggregate(e.into())
    }
}

/// Resolved state dropdown selection.
#[derive(Debug, Clone, PartialEq)]
pub struct StateSelection {
    pub display: String,
    pub state: String,
    pub state_name: String,
    pub total_dafw_cases: i64,
}

impl StateSelection {
    pub fn summary(&self) -> String {
        format!(
            "Total DAFW Cases for {} ({}): {}",
            self.state, self.state_name, self.total_dafw_cases
        )
    }
}

/// Resolved sector dropdown selection.
#[derive(Debug, Clone, PartialEq)]
pub struct SectorSelection {
    pub display: String,
    pub sector_code: String,
    pub total_dafw_cases: i64,
}

impl SectorSelection {
    pub fn summary(&self) -> String {
        format!(
            "Total DAFW Cases for sector {}: {}",
            self.sector_code, self.total_dafw_cases
        )
    }
}

/// Code part of an option string.
fn option_code(display: &str) -> &str {
    display.split(OPTION_SEPARATOR).next().unwrap_or(display)
}

/// Keep the first occurrence of each option.
fn dedup_in_order(options: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = HashSet::new();
    options
        .into_iter()
        .filter(|option| seen.insert(option.clone()))
        .collect()
}

pub struct StateLookup;

impl StateLookup {
    /// "{code} - {name}" for every aggregated state.
    pub fn options(states: &[StateAggregate]) -> Vec<String> {
        dedup_in_order(
            states
                .iter()
                .map(|s| format!("{}{}{}", s.state, OPTION_SEPARATOR, s.state_name)),
        )
    }

    /// Resolve a selection by exact code match against the aggregate.
    pub fn select(states: &[StateAggregate], display: &str) -> Result<StateSelection, LookupError> {
        let code = option_code(display);
        let state = states
            .iter()
            .find(|s| s.state == code)
            .ok_or_else(|| LookupError::UnknownState(display.to_string()))?;

        Ok(StateSelection {
            display: display.to_string(),
            state: state.state.clone(),
            state_name: state.state_name.clone(),
            total_dafw_cases: state.total_dafw_cases,
        })
    }
}

pub struct SectorLookup;

impl SectorLookup {
    /// "{code} - {description}" for every table row, first occurrence order.
    ///
    /// A sector listed under two descriptions yields two options.
    pub fn options(df: &DataFrame) -> Result<Vec<String>, LookupError> {
        let out = df
            .clone()
            .lazy()
            .select([
                col(SECTORS_CODE).cast(DataType::String),
                col(DESCRIPTION).cast(DataType::String),
            ])
            .collect()?;

        let codes = out.column(SECTORS_CODE)?.str()?;
        let descriptions = out.column(DESCRIPTION)?.str()?;

        Ok(dedup_in_order(
            codes
                .into_iter()
                .zip(descriptions)
                .filter_map(|(code, description)| {
                    Some(format!("{}{}{}", code?, OPTION_SEPARATOR, description?))
                }),
        ))
    }

    /// Resolve a selection, summing DAFW cases over the table for its code.
    pub fn select(
        df: &DataFrame,
        options: &[String],
        display: &str,
    ) -> Result<SectorSelection, LookupError> {
        if !options.iter().any(|o| o == display) {
            return Err(LookupError::UnknownSector(display.to_string()));
        }
        let code = option_code(display);

        let out = df
            .clone()
            .lazy()
            .filter(col(SECTORS_CODE).cast(DataType::String).eq(lit(code)))
            .select([col(TOTAL_DAFW_CASES).strict_cast(DataType::Int64).sum()])
            .collect()?;
        let total = out.column(TOTAL_DAFW_CASES)?.i64()?.get(0).unwrap_or(0);

        Ok(SectorSelection {
            display: display.to_string(),
            sector_code: code.to_string(),
            total_dafw_cases: total,
        })
    }
}
