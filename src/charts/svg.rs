//! SVG output helpers: hover tooltips layered over a rendered chart.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("Chart drawing failed: {0}")]
    Drawing(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for ChartError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        ChartError::Drawing(e.to_string())
    }
}

/// Pixel region of a chart element.
#[derive(Debug, Clone, PartialEq)]
pub enum HoverShape {
    Rect {
        top_left: (i32, i32),
        bottom_right: (i32, i32),
    },
    Polygon(Vec<(i32, i32)>),
}

/// Invisible element carrying a native SVG tooltip.
#[derive(Debug, Clone, PartialEq)]
pub struct HoverRegion {
    pub shape: HoverShape,
    pub text: String,
}

impl HoverRegion {
    pub fn rect(a: (i32, i32), b: (i32, i32), text: impl Into<String>) -> Self {
        Self {
            shape: HoverShape::Rect {
                top_left: (a.0.min(b.0), a.1.min(b.1)),
                bottom_right: (a.0.max(b.0), a.1.max(b.1)),
            },
            text: text.into(),
        }
    }

    pub fn polygon(points: Vec<(i32, i32)>, text: impl Into<String>) -> Self {
        Self {
            shape: HoverShape::Polygon(points),
            text: text.into(),
        }
    }

    fn to_svg(&self) -> String {
        let title = format!("<title>{}</title>", escape_xml(&self.text));
        match &self.shape {
            HoverShape::Rect {
                top_left,
                bottom_right,
            } => format!(
                r#"<rect class="hover" x="{}" y="{}" width="{}" height="{}" fill-opacity="0" pointer-events="all">{}</rect>"#,
                top_left.0,
                top_left.1,
                bottom_right.0 - top_left.0,
                bottom_right.1 - top_left.1,
                title
            ),
            HoverShape::Polygon(points) => {
                let points: Vec<String> = points.iter().map(|(x, y)| format!("{},{}", x, y)).collect();
                format!(
                    r#"<polygon class="hover" points="{}" fill-opacity="0" pointer-events="all">{}</polygon>"#,
                    points.join(" "),
                    title
                )
            }
        }
    }
}

/// Escape text for XML content and attribute values.
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Append the hover regions as the topmost layer of `svg`.
pub fn with_hover_regions(mut svg: String, regions: &[HoverRegion]) -> String {
    if regions.is_empty() {
        return svg;
    }
    let overlay: String = regions.iter().map(HoverRegion::to_svg).collect();
    match svg.rfind("</svg>") {
        Some(pos) => svg.insert_str(pos, &overlay),
        None => svg.push_str(&overlay),
    }
    svg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlay_goes_before_closing_tag() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><rect/></svg>"#.to_string();
        let regions = vec![HoverRegion::rect((10, 40), (30, 5), "A & B")];

        let out = with_hover_regions(svg, &regions);
        assert!(out.ends_with("</rect></svg>"));
        assert!(out.contains(r#"x="10" y="5" width="20" height="35""#));
        assert!(out.contains("<title>A &amp; B</title>"));
    }

    #[test]
    fn polygon_points() {
        let region = HoverRegion::polygon(vec![(0, 0), (10, 0), (5, 8)], "slice");
        assert!(region.to_svg().contains(r#"points="0,0 10,0 5,8""#));
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_xml(r#"<b>"x"</b>"#), "&lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }
}
