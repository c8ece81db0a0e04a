//! Color scales and the shared colorbar legend.

use crate::charts::ChartError;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

/// Viridis sampled at ten evenly spaced stops.
const VIRIDIS: [RGBColor; 10] = [
    RGBColor(68, 1, 84),
    RGBColor(72, 40, 120),
    RGBColor(62, 73, 137),
    RGBColor(49, 104, 142),
    RGBColor(38, 130, 142),
    RGBColor(31, 158, 137),
    RGBColor(53, 183, 121),
    RGBColor(110, 206, 88),
    RGBColor(181, 222, 43),
    RGBColor(253, 231, 37),
];

/// Qualitative palette for categorical slices
pub const CATEGORY_PALETTE: [RGBColor; 10] = [
    RGBColor(99, 110, 250),  // Blue
    RGBColor(239, 85, 59),   // Red
    RGBColor(0, 204, 150),   // Green
    RGBColor(171, 99, 250),  // Purple
    RGBColor(255, 161, 90),  // Orange
    RGBColor(25, 211, 243),  // Cyan
    RGBColor(255, 102, 146), // Pink
    RGBColor(182, 232, 128), // Light green
    RGBColor(255, 151, 255), // Magenta
    RGBColor(254, 203, 82),  // Yellow
];

pub const BAR_BORDER: RGBColor = RGBColor(47, 79, 79); // DarkSlateGrey
pub const LAND_GRAY: RGBColor = RGBColor(211, 211, 211);
pub const TEXT_DARK: RGBColor = RGBColor(42, 63, 95);

/// Map `t` in [0, 1] onto Viridis; out-of-range values clamp, NaN maps to the low end.
pub fn viridis(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let pos = t * (VIRIDIS.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = (lower + 1).min(VIRIDIS.len() - 1);
    let frac = pos - lower as f64;

    let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (a, b) = (VIRIDIS[lower], VIRIDIS[upper]);
    RGBColor(lerp(a.0, b.0), lerp(a.1, b.1), lerp(a.2, b.2))
}

/// Position of `value` within `[min, max]`; a degenerate range maps to the top.
pub fn normalize(value: f64, min: f64, max: f64) -> f64 {
    if max > min {
        (value - min) / (max - min)
    } else {
        1.0
    }
}

/// Black or white, whichever reads better on `background`.
pub fn contrast_text(background: RGBColor) -> RGBColor {
    let luminance =
        0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    if luminance > 150.0 {
        BLACK
    } else {
        WHITE
    }
}

/// Round a raw tick step up to 1, 2 or 5 times a power of ten.
pub fn nice_step(range: f64, target_steps: usize) -> f64 {
    if range <= 0.0 || target_steps == 0 {
        return 1.0;
    }
    let raw_step = range / target_steps as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let normalized = raw_step / magnitude;

    let nice = if normalized <= 1.0 {
        1.0
    } else if normalized <= 2.0 {
        2.0
    } else if normalized <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice * magnitude
}

/// Format a tick label without trailing zeros.
pub fn format_tick(value: f64) -> String {
    if value.fract().abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        let formatted = format!("{:.2}", value);
        formatted.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Vertical Viridis colorbar with a title above it.
pub struct Colorbar<'a> {
    pub title: &'a str,
    pub min: f64,
    pub max: f64,
    /// Top-left corner in pixels
    pub origin: (i32, i32),
    pub width: i32,
    pub height: i32,
}

impl<'a> Colorbar<'a> {
    const STEPS: i32 = 64;

    pub fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), ChartError> {
        let (x, y) = self.origin;

        area.draw(&Text::new(
            self.title.to_string(),
            (x, y - 12),
            ("sans-serif", 13).into_font().color(&TEXT_DARK),
        ))?;

        // Gradient, high values on top
        let slice = (self.height as f64 / Self::STEPS as f64).ceil() as i32;
        for step in 0..Self::STEPS {
            let t = 1.0 - step as f64 / (Self::STEPS - 1) as f64;
            let top = y + (step as f64 * self.height as f64 / Self::STEPS as f64) as i32;
            area.draw(&Rectangle::new(
                [(x, top), (x + self.width, (top + slice).min(y + self.height))],
                viridis(t).filled(),
            ))?;
        }
        area.draw(&Rectangle::new(
            [(x, y), (x + self.width, y + self.height)],
            BLACK.mix(0.4).stroke_width(1),
        ))?;

        // Ticks
        let label_style = ("sans-serif", 11)
            .into_font()
            .color(&TEXT_DARK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        let range = self.max - self.min;
        let ticks: Vec<f64> = if range > 0.0 {
            let step = nice_step(range, 5);
            let first = (self.min / step).ceil() * step;
            (0..)
                .map(|k| first + k as f64 * step)
                .take_while(|v| *v <= self.max + step * 1e-9)
                .collect()
        } else {
            vec![self.min]
        };

        for tick in ticks {
            let ty = y + ((1.0 - normalize(tick, self.min, self.max)) * self.height as f64) as i32;
            area.draw(&PathElement::new(
                vec![(x + self.width, ty), (x + self.width + 4, ty)],
                BLACK.stroke_width(1),
            ))?;
            area.draw(&Text::new(
                format_tick(tick),
                (x + self.width + 7, ty),
                label_style.clone(),
            ))?;
        }

        Ok(())
    }
}
