//! Choropleth of DAFW cases per state, drawn as a tile-grid map of the US.
//!
//! Every state is a square tile placed roughly where the state sits on the
//! map. Tiles are shaded by the state's total and carry the raw total as a
//! text label at the tile centroid.

use crate::charts::palette::{self, Colorbar, LAND_GRAY, TEXT_DARK};
use crate::charts::svg::{with_hover_regions, HoverRegion};
use crate::charts::ChartError;
use crate::data::StateAggregate;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

pub const TITLE: &str = "Total DAFW Cases per State";

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 700;
const TILE: i32 = 68;
const GAP: i32 = 4;
const ORIGIN: (i32, i32) = (40, 90);

/// (postal code, column, row)
pub const TILE_GRID: [(&str, i32, i32); 50] = [
    ("AK", 0, 0),
    ("ME", 10, 0),
    ("WI", 5, 1),
    ("VT", 9, 1),
    ("NH", 10, 1),
    ("WA", 0, 2),
    ("ID", 1, 2),
    ("MT", 2, 2),
    ("ND", 3, 2),
    ("MN", 4, 2),
    ("IL", 5, 2),
    ("MI", 6, 2),
    ("NY", 8, 2),
    ("MA", 9, 2),
    ("OR", 0, 3),
    ("NV", 1, 3),
    ("WY", 2, 3),
    ("SD", 3, 3),
    ("IA", 4, 3),
    ("IN", 5, 3),
    ("OH", 6, 3),
    ("PA", 7, 3),
    ("NJ", 8, 3),
    ("CT", 9, 3),
    ("RI", 10, 3),
    ("CA", 0, 4),
    ("UT", 1, 4),
    ("CO", 2, 4),
    ("NE", 3, 4),
    ("MO", 4, 4),
    ("KY", 5, 4),
    ("WV", 6, 4),
    ("VA", 7, 4),
    ("MD", 8, 4),
    ("DE", 9, 4),
    ("AZ", 1, 5),
    ("NM", 2, 5),
    ("KS", 3, 5),
    ("AR", 4, 5),
    ("TN", 5, 5),
    ("NC", 6, 5),
    ("SC", 7, 5),
    ("OK", 3, 6),
    ("LA", 4, 6),
    ("MS", 5, 6),
    ("AL", 6, 6),
    ("GA", 7, 6),
    ("HI", 0, 7),
    ("TX", 3, 7),
    ("FL", 8, 7),
];

pub struct StateMapChart;

impl StateMapChart {
    /// Pixel bounds of a state's tile.
    pub fn tile_bounds(code: &str) -> Option<((i32, i32), (i32, i32))> {
        TILE_GRID
            .iter()
            .find(|(c, _, _)| *c == code)
            .map(|&(_, col, row)| {
                let x = ORIGIN.0 + col * (TILE + GAP);
                let y = ORIGIN.1 + row * (TILE + GAP);
                ((x, y), (x + TILE, y + TILE))
            })
    }

    /// Geometric center of a state's tile.
    pub fn centroid(code: &str) -> Option<(i32, i32)> {
        Self::tile_bounds(code).map(|((x0, y0), (x1, y1))| ((x0 + x1) / 2, (y0 + y1) / 2))
    }

    pub fn render(states: &[StateAggregate]) -> Result<String, ChartError> {
        let min = states.iter().map(|s| s.total_dafw_cases).min().unwrap_or(0) as f64;
        let max = states.iter().map(|s| s.total_dafw_cases).max().unwrap_or(0) as f64;

        let mut svg = String::new();
        let mut regions = Vec::with_capacity(states.len());
        {
            let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
            root.fill(&WHITE)?;

            root.draw(&Text::new(
                TITLE,
                (WIDTH as i32 / 2, 40),
                ("sans-serif", 24)
                    .into_font()
                    .color(&TEXT_DARK)
                    .pos(Pos::new(HPos::Center, VPos::Center)),
            ))?;

            for &(code, _, _) in TILE_GRID.iter() {
                let Some((top_left, bottom_right)) = Self::tile_bounds(code) else {
                    continue;
                };
                let state = states.iter().find(|s| s.state == code);
                let fill = match state {
                    Some(s) => palette::viridis(palette::normalize(s.total_dafw_cases as f64, min, max)),
                    None => LAND_GRAY,
                };

                root.draw(&Rectangle::new([top_left, bottom_right], fill.filled()))?;
                root.draw(&Rectangle::new([top_left, bottom_right], BLACK.stroke_width(1)))?;
                root.draw(&Text::new(
                    code,
                    ((top_left.0 + bottom_right.0) / 2, top_left.1 + 4),
                    ("sans-serif", 11)
                        .into_font()
                        .color(&palette::contrast_text(fill))
                        .pos(Pos::new(HPos::Center, VPos::Top)),
                ))?;

                if let (Some(s), Some(center)) = (state, Self::centroid(code)) {
                    root.draw(&Text::new(
                        s.total_dafw_cases.to_string(),
                        center,
                        ("sans-serif", 12)
                            .into_font()
                            .color(&palette::contrast_text(fill))
                            .pos(Pos::new(HPos::Center, VPos::Center)),
                    ))?;
                    regions.push(HoverRegion::rect(
                        top_left,
                        bottom_right,
                        format!(
                            "{}\n{}\n{}",
                            s.state,
                            s.total_dafw_cases,
                            s.hover_text.replace("<br>", "\n")
                        ),
                    ));
                }
            }

            Colorbar {
                title: "Total DAFW Cases",
                min,
                max,
                origin: (WIDTH as i32 - 110, 120),
                width: 18,
                height: HEIGHT as i32 - 240,
            }
            .draw(&root)?;

            root.present()?;
        }

        Ok(with_hover_regions(svg, &regions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::regions::STATE_NAMES;

    #[test]
    fn every_state_has_one_tile() {
        for (code, _) in STATE_NAMES {
            assert_eq!(
                TILE_GRID.iter().filter(|(c, _, _)| *c == code).count(),
                1,
                "{code}"
            );
        }
    }

    #[test]
    fn tiles_do_not_overlap() {
        let mut cells: Vec<(i32, i32)> = TILE_GRID.iter().map(|&(_, c, r)| (c, r)).collect();
        cells.sort();
        cells.dedup();
        assert_eq!(cells.len(), TILE_GRID.len());
    }

    #[test]
    fn centroid_is_tile_center() {
        let ((x0, y0), (x1, y1)) = StateMapChart::tile_bounds("CA").unwrap();
        assert_eq!(StateMapChart::centroid("CA"), Some(((x0 + x1) / 2, (y0 + y1) / 2)));
        assert_eq!(StateMapChart::centroid("ZZ"), None);
    }

    #[test]
    fn labels_and_hover_text_per_state() {
        let svg = StateMapChart::render(&[
            StateAggregate::new("CA".to_string(), "California".to_string(), 8),
            StateAggregate::new("NY".to_string(), "New York".to_string(), 2),
        ])
        .unwrap();

        assert!(svg.contains(TITLE));
        assert!(svg.contains("California\nTotal DAFW Cases: 8"));
        assert!(svg.contains("New York\nTotal DAFW Cases: 2"));
        assert_eq!(svg.matches(r#"class="hover""#).count(), 2);
    }
}
