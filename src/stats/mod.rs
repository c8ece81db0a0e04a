//! Stats module - Correlation matrix

mod correlation;

pub use correlation::{CorrelationCalculator, CorrelationMatrix};
