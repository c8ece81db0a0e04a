//! HTML page generation
//!
//! Renders the dashboard as a single self-contained page. Every widget lives
//! in one GET form that resubmits on change, so each interaction is a fresh
//! render pass on the server.

use crate::charts::{escape_xml as escape, ChartKind};
use crate::data::TablePreview;
use crate::web::dashboard::{DashboardParams, DashboardView};

pub const PAGE_TITLE: &str = "Work Related Injuries Dashboard";

/// Render the full dashboard page.
pub fn render_page(view: &DashboardView, params: &DashboardParams) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{css}</style>
</head>
<body>
    {sidebar}
    <main class="content">
        <h1 id="top">{title}</h1>
        <p class="intro">Welcome to our project dashboard. Here are some data visualizations we created through the exploration of our dataset. The dataset used comes from Kaggle, specifically from the United States government data for 2020.</p>
        <form method="get" action="/" id="widgets">
            {dataset}
            {charts}
            {lookups}
        </form>
    </main>
</body>
</html>"#,
        title = PAGE_TITLE,
        css = inline_css(),
        sidebar = render_sidebar(),
        dataset = render_dataset_section(view, params),
        charts = render_charts(view),
        lookups = render_lookups(view),
    )
}

/// Render a failed render pass.
pub fn render_error_page(message: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{title} - Error</title>
    <style>{css}</style>
</head>
<body>
    <main class="content">
        <h1>{title}</h1>
        <div class="error"><strong>Error:</strong> {message}</div>
        <p><a href="/">Back to the dashboard</a></p>
    </main>
</body>
</html>"#,
        title = PAGE_TITLE,
        css = inline_css(),
        message = escape(message),
    )
}

fn render_sidebar() -> String {
    r##"<aside class="sidebar">
        <h2>Build dashboards with Streamlit</h2>
        <ul>
            <li><a href="#dataset">Load and showcase data</a></li>
            <li><a href="#sectors">DAFW cases per sector</a></li>
            <li><a href="#accidents">Accidents distribution</a></li>
            <li><a href="#correlation">Correlation matrix</a></li>
            <li><a href="#states">DAFW cases per state</a></li>
            <li><a href="#lookups">Input data</a></li>
        </ul>
        <p class="attribution">Made with 💖 by <a href="https://jedha.co">Jedha</a></p>
    </aside>"##
        .to_string()
}

fn render_dataset_section(view: &DashboardView, params: &DashboardParams) -> String {
    let checked = if params.shows_dataset() { " checked" } else { "" };
    let table = view
        .preview
        .as_ref()
        .map(|preview| render_preview_table(preview, view.row_count))
        .unwrap_or_default();

    format!(
        r#"<section id="dataset">
                <label class="checkbox"><input type="checkbox" name="show_data" onchange="this.form.submit()"{checked}> Show the dataset</label>
                {table}
            </section>"#
    )
}

fn render_preview_table(preview: &TablePreview, row_count: usize) -> String {
    let headers: String = preview
        .headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    let rows: String = preview
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape(cell)))
                .collect();
            format!("<tr>{cells}</tr>")
        })
        .collect();

    format!(
        r#"<p class="caption">Showing {shown} of {total} rows</p>
                <div class="table-wrap"><table><thead><tr>{headers}</tr></thead><tbody>{rows}</tbody></table></div>"#,
        shown = preview.rows.len(),
        total = row_count,
    )
}

fn render_charts(view: &DashboardView) -> String {
    ChartKind::ALL
        .into_iter()
        .map(|kind| {
            format!(
                r#"<section id="{id}" class="chart" aria-label="{title}">{svg}</section>"#,
                id = kind.slug(),
                title = kind.title(),
                svg = view.chart(kind),
            )
        })
        .collect()
}

fn render_select(name: &str, label: &str, options: &[String], selected: Option<&str>) -> String {
    let options: String = options
        .iter()
        .map(|option| {
            let marker = if Some(option.as_str()) == selected {
                " selected"
            } else {
                ""
            };
            let option = escape(option);
            format!(r#"<option value="{option}"{marker}>{option}</option>"#)
        })
        .collect();

    format!(
        r#"<label class="select">{label}<select name="{name}" onchange="this.form.submit()">{options}</select></label>"#,
        label = escape(label),
    )
}

fn render_lookups(view: &DashboardView) -> String {
    let state_select = render_select(
        "state",
        "Select a state you want to see total DAFW cases:",
        &view.state_options,
        view.state_selection.as_ref().map(|s| s.display.as_str()),
    );
    let state_summary = view
        .state_selection
        .as_ref()
        .map(|s| s.summary())
        .unwrap_or_else(|| "No states available".to_string());

    let sector_select = render_select(
        "sector",
        "Select a sector you want to see total DAFW cases:",
        &view.sector_options,
        view.sector_selection.as_ref().map(|s| s.display.as_str()),
    );
    let sector_summary = view
        .sector_selection
        .as_ref()
        .map(|s| s.summary())
        .unwrap_or_else(|| "No sectors available".to_string());

    format!(
        r#"<section id="lookups">
                {state_select}
                <p class="result">{state_summary}</p>
                {sector_select}
                <p class="result">{sector_summary}</p>
            </section>"#,
        state_summary = escape(&state_summary),
        sector_summary = escape(&sector_summary),
    )
}

fn inline_css() -> &'static str {
    r#"
body { margin: 0; font-family: "Source Sans Pro", sans-serif; color: #31333f; display: flex; }
.sidebar { width: 260px; min-height: 100vh; background: #f0f2f6; padding: 24px; box-sizing: border-box; position: sticky; top: 0; align-self: flex-start; }
.sidebar h2 { font-size: 1.1rem; }
.sidebar ul { padding-left: 18px; line-height: 1.8; }
.attribution { margin-top: 40px; font-size: 0.9rem; }
.content { flex: 1; max-width: 1040px; margin: 0 auto; padding: 24px 40px; }
h1 { text-align: center; }
.intro { font-size: 1.05rem; }
section { margin: 28px 0; }
.chart svg { max-width: 100%; height: auto; }
.checkbox, .select { display: block; margin: 12px 0; }
.select select { display: block; margin-top: 6px; min-width: 320px; padding: 6px; }
.result { font-weight: 600; }
.caption { color: #808495; font-size: 0.9rem; }
.table-wrap { max-height: 420px; overflow: auto; border: 1px solid #e6e9ef; }
table { border-collapse: collapse; font-size: 0.85rem; }
th, td { padding: 4px 8px; border-bottom: 1px solid #e6e9ef; white-space: nowrap; text-align: right; }
th { position: sticky; top: 0; background: #fafafa; }
.error { background: #ffe6e6; border: 1px solid #ff4b4b; padding: 12px 16px; border-radius: 4px; }
"#
}
