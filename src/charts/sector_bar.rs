//! Bar chart of DAFW cases per sector.

use crate::charts::palette::{self, Colorbar, BAR_BORDER, TEXT_DARK};
use crate::charts::svg::{with_hover_regions, HoverRegion};
use crate::charts::{placeholder_svg, ChartError};
use crate::data::SectorAggregate;
use plotters::prelude::*;

pub const TITLE: &str = "DAFW Cases per Sector";

const WIDTH: u32 = 900;
const HEIGHT: u32 = 500;
const COLORBAR_SPACE: u32 = 110;

pub struct SectorBarChart;

impl SectorBarChart {
    /// Bar height and color both encode the sector total; hover shows the description.
    pub fn render(sectors: &[SectorAggregate]) -> Result<String, ChartError> {
        if sectors.is_empty() {
            return placeholder_svg(TITLE, WIDTH, HEIGHT);
        }

        let n = sectors.len() as i32;
        let max_total = sectors
            .iter()
            .map(|s| s.total_dafw_cases)
            .max()
            .unwrap_or(0) as f64;
        let min_total = sectors
            .iter()
            .map(|s| s.total_dafw_cases)
            .min()
            .unwrap_or(0) as f64;
        let y_max = (max_total * 1.1).max(1.0);
        let codes: Vec<&str> = sectors.iter().map(|s| s.sector_code.as_str()).collect();

        let mut svg = String::new();
        let mut regions = Vec::with_capacity(sectors.len());
        {
            let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE)?;
            let (plot_area, _) = root.split_horizontally((WIDTH - COLORBAR_SPACE) as i32);

            let mut chart = ChartBuilder::on(&plot_area)
                .caption(TITLE, ("sans-serif", 24).into_font().color(&TEXT_DARK))
                .margin(15)
                .x_label_area_size(45)
                .y_label_area_size(70)
                .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .x_labels(codes.len())
                .x_label_formatter(&|v| match v {
                    SegmentValue::CenterOf(i) => codes
                        .get(*i as usize)
                        .map(|c| c.to_string())
                        .unwrap_or_default(),
                    _ => String::new(),
                })
                .y_label_formatter(&|v| palette::format_tick(*v))
                .x_desc("Sector Code")
                .y_desc("Total DAFW Cases")
                .draw()?;

            chart.draw_series(sectors.iter().enumerate().map(|(i, s)| {
                let color = palette::viridis(palette::normalize(
                    s.total_dafw_cases as f64,
                    min_total,
                    max_total,
                ));
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), 0.0),
                        (SegmentValue::Exact(i as i32 + 1), s.total_dafw_cases as f64),
                    ],
                    color.filled(),
                )
            }))?;

            chart.draw_series(sectors.iter().enumerate().map(|(i, s)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(i as i32), 0.0),
                        (SegmentValue::Exact(i as i32 + 1), s.total_dafw_cases as f64),
                    ],
                    BAR_BORDER.stroke_width(1),
                )
            }))?;

            for (i, s) in sectors.iter().enumerate() {
                let top_left =
                    chart.backend_coord(&(SegmentValue::Exact(i as i32), s.total_dafw_cases as f64));
                let bottom_right = chart.backend_coord(&(SegmentValue::Exact(i as i32 + 1), 0.0));
                regions.push(HoverRegion::rect(top_left, bottom_right, Self::hover_text(s)));
            }

            Colorbar {
                title: "Total DAFW Cases",
                min: min_total,
                max: max_total,
                origin: (WIDTH as i32 - COLORBAR_SPACE as i32 + 15, 80),
                width: 18,
                height: HEIGHT as i32 - 160,
            }
            .draw(&root)?;

            root.present()?;
        }

        Ok(with_hover_regions(svg, &regions))
    }

    fn hover_text(sector: &SectorAggregate) -> String {
        format!(
            "Sector Code: {}\nTotal DAFW Cases: {}\ndescription: {}",
            sector.sector_code,
            sector.total_dafw_cases,
            sector.description.as_deref().unwrap_or("")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sector(code: &str, description: &str, total: i64) -> SectorAggregate {
        SectorAggregate {
            sector_code: code.to_string(),
            description: Some(description.to_string()),
            total_dafw_cases: total,
        }
    }

    #[test]
    fn renders_bars_with_descriptions() {
        let svg = SectorBarChart::render(&[
            sector("11", "Agriculture", 8),
            sector("23", "Construction", 3),
        ])
        .unwrap();

        assert!(svg.contains("<svg"));
        assert!(svg.contains(TITLE));
        assert!(svg.contains("description: Agriculture"));
        assert!(svg.contains("description: Construction"));
        assert_eq!(svg.matches(r#"class="hover""#).count(), 2);
    }

    #[test]
    fn empty_input_renders_placeholder() {
        let svg = SectorBarChart::render(&[]).unwrap();
        assert!(svg.contains("No data"));
    }
}
