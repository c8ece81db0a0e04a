//! Data module - CSV loading, aggregation and lookups

mod aggregate;
mod loader;
mod lookup;
pub mod regions;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;

pub use aggregate::{
    AccidentTypeCount, AggregateError, DescriptionPolicy, InjuryAggregator, SectorAggregate,
    StateAggregate,
};
pub use loader::{DataLoader, Dataset, TablePreview};
pub use lookup::{LookupError, SectorLookup, SectorSelection, StateLookup, StateSelection};
