//! Charts module - SVG chart rendering

mod accident_pie;
mod heatmap;
pub mod palette;
mod sector_bar;
mod state_map;
mod svg;

pub use accident_pie::AccidentPieChart;
pub use heatmap::CorrelationHeatmap;
pub use sector_bar::SectorBarChart;
pub use state_map::StateMapChart;
pub use svg::{escape_xml, ChartError};

use palette::TEXT_DARK;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// The four dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Sectors,
    Accidents,
    Correlation,
    States,
}

impl ChartKind {
    pub const ALL: [ChartKind; 4] = [
        ChartKind::Sectors,
        ChartKind::Accidents,
        ChartKind::Correlation,
        ChartKind::States,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ChartKind::Sectors => "sectors",
            ChartKind::Accidents => "accidents",
            ChartKind::Correlation => "correlation",
            ChartKind::States => "states",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Sectors => sector_bar::TITLE,
            ChartKind::Accidents => accident_pie::TITLE,
            ChartKind::Correlation => heatmap::TITLE,
            ChartKind::States => state_map::TITLE,
        }
    }

    /// Parse "sectors.svg" style file names.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let slug = name.strip_suffix(".svg")?;
        Self::ALL.into_iter().find(|kind| kind.slug() == slug)
    }
}

/// Titled empty chart for aggregates with nothing to draw.
pub(crate) fn placeholder_svg(title: &str, width: u32, height: u32) -> Result<String, ChartError> {
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        let centered = Pos::new(HPos::Center, VPos::Center);
        root.draw(&Text::new(
            title.to_string(),
            (width as i32 / 2, 35),
            ("sans-serif", 24).into_font().color(&TEXT_DARK).pos(centered),
        ))?;
        root.draw(&Text::new(
            "No data",
            (width as i32 / 2, height as i32 / 2),
            ("sans-serif", 16).into_font().color(&TEXT_DARK).pos(centered),
        ))?;
        root.present()?;
    }
    Ok(svg)
}
