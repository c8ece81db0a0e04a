//! Command-line configuration.

use crate::data::DescriptionPolicy;
use crate::web::RenderOptions;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Workplace injury dashboard server.
#[derive(Debug, Clone, Parser)]
#[command(version, about)]
pub struct Config {
    /// CSV file with one injury report per establishment
    #[arg(long, env = "INJURY_DATA", default_value = "ITA_OSHA_Combined.csv")]
    pub data: PathBuf,

    /// Read at most this many rows
    #[arg(long)]
    pub max_rows: Option<usize>,

    /// Address to serve the dashboard on
    #[arg(long, env = "INJURY_BIND", default_value = "127.0.0.1:8501")]
    pub bind: SocketAddr,

    /// Rows shown by "Show the dataset"
    #[arg(long, default_value_t = 100)]
    pub preview_rows: usize,

    /// Description shown for a sector listed under several descriptions
    #[arg(long, value_enum, default_value_t = SectorDescription::First)]
    pub sector_description: SectorDescription,
}

/// Command-line names for [`DescriptionPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SectorDescription {
    /// First non-null description in table order
    First,
    /// Alphabetically smallest description
    Min,
}

impl From<SectorDescription> for DescriptionPolicy {
    fn from(value: SectorDescription) -> Self {
        match value {
            SectorDescription::First => DescriptionPolicy::First,
            SectorDescription::Min => DescriptionPolicy::Min,
        }
    }
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            preview_rows: self.preview_rows,
            description_policy: self.sector_description.into(),
        }
    }
}
