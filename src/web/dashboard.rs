//! Dashboard Render Pass
//! One pure function from (dataset, widget selections) to everything the page shows.

use crate::charts::{
    AccidentPieChart, ChartError, ChartKind, CorrelationHeatmap, SectorBarChart, StateMapChart,
};
use crate::data::schema::CORRELATION_COLUMNS;
use crate::data::{
    AccidentTypeCount, AggregateError, Dataset, DescriptionPolicy, InjuryAggregator, LookupError,
    SectorAggregate, SectorLookup, SectorSelection, StateAggregate, StateLookup, StateSelection,
    TablePreview,
};
use crate::stats::{CorrelationCalculator, CorrelationMatrix};
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Aggregation failed: {0}")]
    Aggregate(#[from] AggregateError),
    #[error("Lookup failed: {0}")]
    Lookup(#[from] LookupError),
    #[error(transparent)]
    Chart(#[from] ChartError),
    #[error("Render task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Unknown chart: {0}")]
    UnknownChart(String),
}

/// Widget state sent by the page on every change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardParams {
    /// Checkbox value; present when ticked
    pub show_data: Option<String>,
    pub state: Option<String>,
    pub sector: Option<String>,
}

impl DashboardParams {
    pub fn shows_dataset(&self) -> bool {
        matches!(self.show_data.as_deref(), Some("on" | "true" | "1"))
    }

    fn selected_state(&self) -> Option<&str> {
        self.state.as_deref().filter(|s| !s.is_empty())
    }

    fn selected_sector(&self) -> Option<&str> {
        self.sector.as_deref().filter(|s| !s.is_empty())
    }
}

/// Server-wide rendering settings.
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub preview_rows: usize,
    pub description_policy: DescriptionPolicy,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            preview_rows: 100,
            description_policy: DescriptionPolicy::First,
        }
    }
}

/// Everything a single page render needs.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub row_count: usize,
    pub preview: Option<TablePreview>,
    pub sector_chart: String,
    pub accident_chart: String,
    pub correlation_chart: String,
    pub state_chart: String,
    pub state_options: Vec<String>,
    pub state_selection: Option<StateSelection>,
    pub sector_options: Vec<String>,
    pub sector_selection: Option<SectorSelection>,
}

impl DashboardView {
    pub fn chart(&self, kind: ChartKind) -> &str {
        match kind {
            ChartKind::Sectors => &self.sector_chart,
            ChartKind::Accidents => &self.accident_chart,
            ChartKind::Correlation => &self.correlation_chart,
            ChartKind::States => &self.state_chart,
        }
    }
}

pub struct Dashboard;

impl Dashboard {
    /// Recompute every aggregate and chart from the table.
    ///
    /// Without an explicit selection a dropdown resolves to its first option.
    pub fn render(
        dataset: &Dataset,
        options: &RenderOptions,
        params: &DashboardParams,
    ) -> Result<DashboardView, DashboardError> {
        let df = dataset.frame();

        let sectors = Self::sectors(dataset, options)?;
        let accidents = Self::accidents(dataset)?;
        let correlation = Self::correlation(dataset)?;
        let states = Self::states(dataset)?;

        let state_options = StateLookup::options(&states);
        let state_selection = params
            .selected_state()
            .or(state_options.first().map(String::as_str))
            .map(|display| StateLookup::select(&states, display))
            .transpose()?;

        let sector_options = SectorLookup::options(df)?;
        let sector_selection = params
            .selected_sector()
            .or(sector_options.first().map(String::as_str))
            .map(|display| SectorLookup::select(df, &sector_options, display))
            .transpose()?;

        Ok(DashboardView {
            row_count: dataset.row_count(),
            preview: params
                .shows_dataset()
                .then(|| dataset.preview(options.preview_rows)),
            sector_chart: SectorBarChart::render(&sectors)?,
            accident_chart: AccidentPieChart::render(&accidents)?,
            correlation_chart: CorrelationHeatmap::render(&correlation)?,
            state_chart: StateMapChart::render(&states)?,
            state_options,
            state_selection,
            sector_options,
            sector_selection,
        })
    }

    /// Render one chart on its own.
    pub fn render_chart(
        dataset: &Dataset,
        options: &RenderOptions,
        kind: ChartKind,
    ) -> Result<String, DashboardError> {
        let svg = match kind {
            ChartKind::Sectors => SectorBarChart::render(&Self::sectors(dataset, options)?)?,
            ChartKind::Accidents => AccidentPieChart::render(&Self::accidents(dataset)?)?,
            ChartKind::Correlation => CorrelationHeatmap::render(&Self::correlation(dataset)?)?,
            ChartKind::States => StateMapChart::render(&Self::states(dataset)?)?,
        };
        Ok(svg)
    }

    pub fn sectors(
        dataset: &Dataset,
        options: &RenderOptions,
    ) -> Result<Vec<SectorAggregate>, DashboardError> {
        Ok(InjuryAggregator::sector_totals(
            dataset.frame(),
            options.description_policy,
        )?)
    }

    pub fn accidents(dataset: &Dataset) -> Result<Vec<AccidentTypeCount>, DashboardError> {
        Ok(InjuryAggregator::accident_distribution(dataset.frame())?)
    }

    pub fn correlation(dataset: &Dataset) -> Result<CorrelationMatrix, DashboardError> {
        CorrelationCalculator::compute(dataset.frame(), &CORRELATION_COLUMNS)
            .map_err(|e| DashboardError::Aggregate(e.into()))
    }

    pub fn states(dataset: &Dataset) -> Result<Vec<StateAggregate>, DashboardError> {
        Ok(InjuryAggregator::state_totals(dataset.frame())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::fixtures::injury_frame;

    fn params(state: Option<&str>, sector: Option<&str>, show_data: bool) -> DashboardParams {
        DashboardParams {
            show_data: show_data.then(|| "on".to_string()),
            state: state.map(str::to_string),
            sector: sector.map(str::to_string),
        }
    }

    #[test]
    fn defaults_to_first_options() {
        let dataset = Dataset::from_frame(injury_frame());
        let view = Dashboard::render(&dataset, &RenderOptions::default(), &DashboardParams::default())
            .unwrap();

        assert_eq!(view.row_count, 5);
        assert!(view.preview.is_none());
        assert_eq!(view.state_options, vec!["CA - California", "NY - New York", "TX - Texas"]);
        assert_eq!(view.state_selection.unwrap().total_dafw_cases, 8);
        assert_eq!(view.sector_selection.unwrap().display, "11 - Farming");
    }

    #[test]
    fn honours_selections_and_preview() {
        let dataset = Dataset::from_frame(injury_frame());
        let options = RenderOptions {
            preview_rows: 2,
            ..RenderOptions::default()
        };
        let view = Dashboard::render(
            &dataset,
            &options,
            &params(Some("NY - New York"), Some("23 - Construction"), true),
        )
        .unwrap();

        assert_eq!(view.preview.unwrap().rows.len(), 2);
        assert_eq!(
            view.state_selection.unwrap().summary(),
            "Total DAFW Cases for NY (New York): 2"
        );
        assert_eq!(
            view.sector_selection.unwrap().summary(),
            "Total DAFW Cases for sector 23: 3"
        );
    }

    #[test]
    fn empty_selection_falls_back_to_default() {
        let dataset = Dataset::from_frame(injury_frame());
        let view = Dashboard::render(
            &dataset,
            &RenderOptions::default(),
            &params(Some(""), Some(""), false),
        )
        .unwrap();
        assert_eq!(view.state_selection.unwrap().state, "CA");
    }

    #[test]
    fn unknown_selection_fails_the_render() {
        let dataset = Dataset::from_frame(injury_frame());
        let result = Dashboard::render(
            &dataset,
            &RenderOptions::default(),
            &params(Some("ZZ - Nowhere"), None, false),
        );
        assert!(matches!(result, Err(DashboardError::Lookup(LookupError::UnknownState(_)))));
    }

    #[test]
    fn checkbox_values() {
        assert!(params(None, None, true).shows_dataset());
        assert!(!params(None, None, false).shows_dataset());
        let off = DashboardParams {
            show_data: Some("off".to_string()),
            ..DashboardParams::default()
        };
        assert!(!off.shows_dataset());
    }

    #[test]
    fn each_chart_renders_alone() {
        let dataset = Dataset::from_frame(injury_frame());
        for kind in ChartKind::ALL {
            let svg = Dashboard::render_chart(&dataset, &RenderOptions::default(), kind).unwrap();
            assert!(svg.contains(kind.title()), "{kind:?}");
        }
    }
}
