//! Pie chart of the accident-type distribution.

use crate::charts::palette::{contrast_text, CATEGORY_PALETTE, TEXT_DARK};
use crate::charts::svg::{with_hover_regions, HoverRegion};
use crate::charts::{placeholder_svg, ChartError};
use crate::data::AccidentTypeCount;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

pub const TITLE: &str = "Accidents Distribution";

const WIDTH: u32 = 800;
const HEIGHT: u32 = 500;
const RADIUS: f64 = 170.0;
/// Slices narrower than this share get no inline percentage.
const MIN_LABEL_SHARE: f64 = 0.03;

pub struct AccidentPieChart;

impl AccidentPieChart {
    pub fn render(counts: &[AccidentTypeCount]) -> Result<String, ChartError> {
        let total: u64 = counts.iter().map(|c| c.count).sum();
        if total == 0 {
            return placeholder_svg(TITLE, WIDTH, HEIGHT);
        }

        let center = (WIDTH as i32 / 2 - 90, HEIGHT as i32 / 2 + 20);
        let mut svg = String::new();
        let mut regions = Vec::with_capacity(counts.len());
        {
            let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE)?;

            root.draw(&Text::new(
                TITLE,
                (WIDTH as i32 / 2, 35),
                ("sans-serif", 24)
                    .into_font()
                    .color(&TEXT_DARK)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;

            // Clockwise from twelve o'clock
            let mut angle = -FRAC_PI_2;
            for (idx, count) in counts.iter().enumerate() {
                let share = count.count as f64 / total as f64;
                let sweep = share * TAU;
                let color = CATEGORY_PALETTE[idx % CATEGORY_PALETTE.len()];
                let points = Self::wedge_points(center, RADIUS, angle, angle + sweep);

                root.draw(&Polygon::new(points.clone(), color.filled()))?;
                let mut outline = points.clone();
                outline.push(center);
                root.draw(&PathElement::new(outline, WHITE.stroke_width(1)))?;

                if share >= MIN_LABEL_SHARE {
                    let mid = angle + sweep / 2.0;
                    let label_at = (
                        center.0 + (RADIUS * 0.65 * mid.cos()) as i32,
                        center.1 + (RADIUS * 0.65 * mid.sin()) as i32,
                    );
                    root.draw(&Text::new(
                        format!("{:.1}%", share * 100.0),
                        label_at,
                        ("sans-serif", 14)
                            .into_font()
                            .color(&contrast_text(color))
                            .pos(Pos::new(HPos::Center, VPos::Center)),
                    ))?;
                }

                regions.push(HoverRegion::polygon(
                    points,
                    format!(
                        "accident_type={}\ncount={}\n{:.1}%",
                        count.accident_type,
                        count.count,
                        share * 100.0
                    ),
                ));
                angle += sweep;
            }

            // Legend
            let legend_x = center.0 + RADIUS as i32 + 60;
            for (idx, count) in counts.iter().enumerate() {
                let y = 120 + idx as i32 * 26;
                let color = CATEGORY_PALETTE[idx % CATEGORY_PALETTE.len()];
                root.draw(&Rectangle::new(
                    [(legend_x, y - 7), (legend_x + 14, y + 7)],
                    color.filled(),
                ))?;
                root.draw(&Text::new(
                    count.accident_type.clone(),
                    (legend_x + 22, y),
                    ("sans-serif", 13)
                        .into_font()
                        .color(&TEXT_DARK)
                        .pos(Pos::new(HPos::Left, VPos::Center)),
                ))?;
            }

            root.present()?;
        }

        Ok(with_hover_regions(svg, &regions))
    }

    /// Center followed by points along the arc from `start` to `end` (radians).
    fn wedge_points(center: (i32, i32), radius: f64, start: f64, end: f64) -> Vec<(i32, i32)> {
        let segments = ((end - start).abs() / (PI / 90.0)).ceil().max(1.0) as usize;
        let mut points = Vec::with_capacity(segments + 2);
        points.push(center);
        for k in 0..=segments {
            let a = start + (end - start) * k as f64 / segments as f64;
            points.push((
                center.0 + (radius * a.cos()).round() as i32,
                center.1 + (radius * a.sin()).round() as i32,
            ));
        }
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(accident_type: &str, count: u64) -> AccidentTypeCount {
        AccidentTypeCount {
            accident_type: accident_type.to_string(),
            count,
        }
    }

    #[test]
    fn renders_one_slice_per_type() {
        let svg = AccidentPieChart::render(&[
            count("total_djtr_cases", 3),
            count("total_deaths", 1),
        ])
        .unwrap();

        assert!(svg.contains(TITLE));
        assert!(svg.contains("75.0%"));
        assert!(svg.contains("25.0%"));
        assert!(svg.contains("accident_type=total_deaths"));
        assert_eq!(svg.matches(r#"class="hover""#).count(), 2);
    }

    #[test]
    fn wedge_starts_at_center_and_spans_arc() {
        let points = AccidentPieChart::wedge_points((100, 100), 50.0, -FRAC_PI_2, 0.0);
        assert_eq!(points[0], (100, 100));
        assert_eq!(points[1], (100, 50));
        assert_eq!(*points.last().unwrap(), (150, 100));
    }

    #[test]
    fn all_zero_counts_render_placeholder() {
        let svg = AccidentPieChart::render(&[]).unwrap();
        assert!(svg.contains("No data"));
    }
}
