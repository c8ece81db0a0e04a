//! Shared test tables.

use crate::data::schema::*;
use polars::prelude::*;

/// Five establishments across three sectors and four state codes.
///
/// Sector 11 appears with two descriptions ("Farming" first), and "ZZ" is
/// not a US state code.
pub fn injury_frame() -> DataFrame {
    df!(
        SECTORS_CODE => [11i64, 11, 23, 23, 31],
        SUBSECTORS_CODE => [111i64, 112, 236, 237, 311],
        ESTABLISHMENT_TYPE => [1i64, 2, 1, 3, 1],
        STATE => ["CA", "CA", "NY", "TX", "ZZ"],
        ANNUAL_AVERAGE_EMPLOYEES => [10i64, 20, 5, 50, 8],
        TOTAL_HOURS_WORKED => [20000i64, 41000, 9000, 99000, 15000],
        TOTAL_DEATHS => [0i64, 1, 0, 0, 1],
        TOTAL_DAFW_CASES => [5i64, 3, 2, 1, 0],
        TOTAL_DJTR_CASES => [1i64, 0, 1, 0, 1],
        TOTAL_OTHER_CASES => [0i64, 1, 1, 1, 0],
        TOTAL_CASES => [6i64, 5, 4, 2, 2],
        DESCRIPTION => ["Farming", "Agriculture", "Construction", "Construction", "Manufacturing"],
    )
    .unwrap()
}

/// A single establishment with the given injury columns.
pub fn single_row(deaths: i64, dafw: i64, djtr: i64, other: i64) -> DataFrame {
    df!(
        SECTORS_CODE => [11i64],
        SUBSECTORS_CODE => [111i64],
        ESTABLISHMENT_TYPE => [1i64],
        STATE => ["CA"],
        ANNUAL_AVERAGE_EMPLOYEES => [10i64],
        TOTAL_HOURS_WORKED => [20000i64],
        TOTAL_DEATHS => [deaths],
        TOTAL_DAFW_CASES => [dafw],
        TOTAL_DJTR_CASES => [djtr],
        TOTAL_OTHER_CASES => [other],
        TOTAL_CASES => [deaths + dafw + djtr + other],
        DESCRIPTION => ["Agriculture"],
    )
    .unwrap()
}
