//! Column names of the OSHA ITA injury dataset.

pub const SECTORS_CODE: &str = "sectors_code";
pub const SUBSECTORS_CODE: &str = "subsectors_code";
pub const ESTABLISHMENT_TYPE: &str = "establishment_type";
pub const STATE: &str = "state";
pub const ANNUAL_AVERAGE_EMPLOYEES: &str = "annual_average_employees";
pub const TOTAL_HOURS_WORKED: &str = "total_hours_worked";
pub const TOTAL_DEATHS: &str = "total_deaths";
pub const TOTAL_DAFW_CASES: &str = "total_dafw_cases";
pub const TOTAL_DJTR_CASES: &str = "total_djtr_cases";
pub const TOTAL_OTHER_CASES: &str = "total_other_cases";
pub const TOTAL_CASES: &str = "total_cases";
pub const DESCRIPTION: &str = "description";

/// Derived columns
pub const STATE_NAME: &str = "description_state";
pub const ACCIDENT_TYPE: &str = "accident_type";
pub const COUNT: &str = "count";

/// Columns read by at least one aggregation or lookup.
pub const EXPECTED_COLUMNS: [&str; 12] = [
    SECTORS_CODE,
    SUBSECTORS_CODE,
    ESTABLISHMENT_TYPE,
    STATE,
    ANNUAL_AVERAGE_EMPLOYEES,
    TOTAL_HOURS_WORKED,
    TOTAL_DEATHS,
    TOTAL_DAFW_CASES,
    TOTAL_DJTR_CASES,
    TOTAL_OTHER_CASES,
    TOTAL_CASES,
    DESCRIPTION,
];

/// Injury columns reshaped into the accident-type distribution.
pub const ACCIDENT_TYPE_COLUMNS: [&str; 4] = [
    TOTAL_DEATHS,
    TOTAL_DAFW_CASES,
    TOTAL_DJTR_CASES,
    TOTAL_OTHER_CASES,
];

/// Key columns carried through the accident-type reshape.
pub const ACCIDENT_ID_COLUMNS: [&str; 5] = [
    SECTORS_CODE,
    SUBSECTORS_CODE,
    ANNUAL_AVERAGE_EMPLOYEES,
    ESTABLISHMENT_TYPE,
    TOTAL_HOURS_WORKED,
];

/// Columns of the correlation heatmap, in display order.
pub const CORRELATION_COLUMNS: [&str; 8] = [
    ANNUAL_AVERAGE_EMPLOYEES,
    ESTABLISHMENT_TYPE,
    TOTAL_HOURS_WORKED,
    TOTAL_DEATHS,
    TOTAL_DAFW_CASES,
    TOTAL_DJTR_CASES,
    TOTAL_OTHER_CASES,
    TOTAL_CASES,
];
