//! Correlation heatmap with values overlaid on each cell.

use crate::charts::palette::{self, Colorbar, LAND_GRAY, TEXT_DARK};
use crate::charts::svg::{with_hover_regions, HoverRegion};
use crate::charts::{placeholder_svg, ChartError};
use crate::stats::CorrelationMatrix;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const TITLE: &str = "Correlation Matrix";

const WIDTH: u32 = 900;
const HEIGHT: u32 = 760;
const COLORBAR_SPACE: u32 = 100;

pub struct CorrelationHeatmap;

impl CorrelationHeatmap {
    /// Cell label: value rounded to two decimals, blank when undefined.
    pub fn cell_label(value: f64) -> String {
        if value.is_nan() {
            String::new()
        } else {
            let rounded = (value * 100.0).round() / 100.0;
            // Avoid "-0.00"
            format!("{:.2}", if rounded == 0.0 { 0.0 } else { rounded })
        }
    }

    pub fn render(matrix: &CorrelationMatrix) -> Result<String, ChartError> {
        if matrix.size() == 0 {
            return placeholder_svg(TITLE, WIDTH, HEIGHT);
        }

        let n = matrix.size() as i32;
        let (min, max) = matrix.value_range();
        let names = &matrix.columns;

        let mut svg = String::new();
        let mut regions = Vec::with_capacity(matrix.size() * matrix.size());
        {
            let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE)?;
            let (plot_area, _) = root.split_horizontally((WIDTH - COLORBAR_SPACE) as i32);

            let mut chart = ChartBuilder::on(&plot_area)
                .caption(TITLE, ("sans-serif", 24).into_font().color(&TEXT_DARK))
                .margin(15)
                .x_label_area_size(170)
                .y_label_area_size(180)
                .build_cartesian_2d((0..n).into_segmented(), (0..n).into_segmented())?;

            let label = |v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) => names.get(*i as usize).cloned().unwrap_or_default(),
                _ => String::new(),
            };

            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(matrix.size())
                .y_labels(matrix.size())
                .x_label_formatter(&label)
                .y_label_formatter(&label)
                .x_label_style(
                    ("sans-serif", 12)
                        .into_font()
                        .transform(FontTransform::Rotate90)
                        .color(&TEXT_DARK),
                )
                .y_label_style(("sans-serif", 12).into_font().color(&TEXT_DARK))
                .x_desc("Variables")
                .y_desc("Variables")
                .axis_desc_style(("sans-serif", 18).into_font().color(&TEXT_DARK))
                .draw()?;

            let cells: Vec<(i32, i32, f64)> = (0..n)
                .flat_map(|row| (0..n).map(move |col| (row, col)))
                .map(|(row, col)| (row, col, matrix.get(row as usize, col as usize)))
                .collect();

            chart.draw_series(cells.iter().map(|&(row, col, value)| {
                Rectangle::new(
                    [
                        (SegmentValue::Exact(col), SegmentValue::Exact(row)),
                        (SegmentValue::Exact(col + 1), SegmentValue::Exact(row + 1)),
                    ],
                    Self::cell_color(value, min, max).filled(),
                )
            }))?;

            chart.draw_series(cells.iter().map(|&(row, col, value)| {
                Text::new(
                    Self::cell_label(value),
                    (SegmentValue::CenterOf(col), SegmentValue::CenterOf(row)),
                    ("sans-serif", 13)
                        .into_font()
                        .color(&palette::contrast_text(Self::cell_color(value, min, max)))
                        .pos(Pos::new(HPos::Center, VPos::Center)),
                )
            }))?;

            for &(row, col, value) in &cells {
                let a = chart.backend_coord(&(SegmentValue::Exact(col), SegmentValue::Exact(row)));
                let b = chart.backend_coord(&(
                    SegmentValue::Exact(col + 1),
                    SegmentValue::Exact(row + 1),
                ));
                regions.push(HoverRegion::rect(
                    a,
                    b,
                    format!(
                        "x: {}\ny: {}\nz: {}",
                        names[col as usize],
                        names[row as usize],
                        Self::cell_label(value)
                    ),
                ));
            }

            Colorbar {
                title: "",
                min,
                max,
                origin: (WIDTH as i32 - COLORBAR_SPACE as i32 + 10, 70),
                width: 18,
                height: HEIGHT as i32 - 280,
            }
            .draw(&root)?;

            root.present()?;
        }

        Ok(with_hover_regions(svg, &regions))
    }

    fn cell_color(value: f64, min: f64, max: f64) -> RGBColor {
        if value.is_nan() {
            LAND_GRAY
        } else {
            palette::viridis(palette::normalize(value, min, max))
        }
    }
}
