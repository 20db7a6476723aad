// 📈 Reporter - Plotly figures rendered to standalone HTML pages
//
// Each chart is a Plotly figure (data + layout + optional animation frames)
// serialized with serde_json and embedded in a page that loads plotly.js,
// either from the CDN or inlined from a local copy.

use crate::aggregator::{ContinentYearTotal, CountryTotal, CountryYearTotal};
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const PLOTLY_JS_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Plotly's sequential Plasma scale
const PLASMA: [&str; 10] = [
    "#0d0887", "#46039f", "#7201a8", "#9c179e", "#bd3786", "#d8576b", "#ed7953", "#fb9f3a",
    "#fdca26", "#f0f921",
];

// ============================================================================
// PLOTLY.JS SOURCE
// ============================================================================

/// How a page gets the plotly.js library
#[derive(Debug, Clone, Default, PartialEq)]
pub enum PlotlyScript {
    /// Script tag pointing at the CDN (needs network when opened)
    #[default]
    Cdn,
    /// Library source inlined into the page (opens offline)
    Inline(String),
}

impl PlotlyScript {
    /// Read a local plotly.js bundle to inline
    pub fn from_file(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plotly.js: {}", path.display()))?;
        Ok(PlotlyScript::Inline(source))
    }

    fn tag(&self) -> String {
        match self {
            PlotlyScript::Cdn => {
                format!(r#"<script src="{}" charset="utf-8"></script>"#, PLOTLY_JS_URL)
            }
            PlotlyScript::Inline(source) => {
                format!("<script type=\"text/javascript\">\n{}\n</script>", source)
            }
        }
    }
}

// ============================================================================
// FIGURE
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Value>,
    pub layout: Value,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub frames: Vec<Value>,
}

impl Figure {
    /// Title text from the layout (used as the page title)
    pub fn title(&self) -> &str {
        self.layout["title"]["text"].as_str().unwrap_or("Chart")
    }

    /// Render as a standalone HTML page
    pub fn to_html(&self, plotly: &PlotlyScript) -> Result<String> {
        let figure_json = serde_json::to_string(self).context("Failed to serialize figure")?;
        // Keep "</script>" inside string values from closing the script tag
        let figure_json = figure_json.replace("</", "<\\/");

        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<!-- generated by visa-stats {version} at {generated} -->
<title>{title}</title>
{plotly}
</head>
<body>
<div id="chart" class="plotly-graph-div" style="height:100%; width:100%;"></div>
<script type="text/javascript">
var figure = {figure};
Plotly.newPlot("chart", figure.data, figure.layout, {{"responsive": true}}).then(function () {{
    if (figure.frames) {{
        Plotly.addFrames("chart", figure.frames);
    }}
}});
</script>
</body>
</html>
"#,
            version = env!("CARGO_PKG_VERSION"),
            generated = Utc::now().to_rfc3339(),
            title = escape_html(self.title()),
            plotly = plotly.tag(),
            figure = figure_json,
        ))
    }

    /// Write the HTML page, replacing any previous file
    pub fn write_html(&self, path: &Path, plotly: &PlotlyScript) -> Result<()> {
        let html = self.to_html(plotly)?;
        std::fs::write(path, html)
            .with_context(|| format!("Failed to write chart: {}", path.display()))?;
        info!(path = %path.display(), title = self.title(), "Wrote chart");
        Ok(())
    }
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn plasma_colorscale() -> Value {
    let steps = PLASMA.len() - 1;
    Value::Array(
        PLASMA
            .iter()
            .enumerate()
            .map(|(i, color)| json!([i as f64 / steps as f64, color]))
            .collect(),
    )
}

// ============================================================================
// CHART BUILDERS
// ============================================================================

/// Grouped bar chart: one bar trace per continent, years on the x axis
pub fn continent_year_chart(totals: &[ContinentYearTotal]) -> Figure {
    let mut by_continent: BTreeMap<&str, (Vec<i32>, Vec<Option<f64>>)> = BTreeMap::new();

    for total in totals {
        // No x position for rows without a year
        let Some(year) = total.year else { continue };
        let (years, values) = by_continent.entry(total.continent.as_str()).or_default();
        years.push(year);
        values.push(total.visa_issued);
    }

    let data = by_continent
        .into_iter()
        .map(|(continent, (years, values))| {
            json!({
                "type": "bar",
                "name": continent,
                "legendgroup": continent,
                "x": years,
                "y": values,
                "hovertemplate": "continent=%{fullData.name}<br>year=%{x}<br>visa_issued=%{y}<extra></extra>",
            })
        })
        .collect();

    Figure {
        data,
        layout: json!({
            "title": { "text": "Number of visa issued in Japan between 2006 and 2017" },
            "barmode": "group",
            "xaxis": { "title": { "text": "Year" } },
            "yaxis": { "title": { "text": "Number of visa issued" } },
            "legend": { "title": { "text": "Continent" } },
        }),
        frames: Vec::new(),
    }
}

/// Bar chart of the top countries, one trace per country so each gets its own colour
pub fn top_countries_chart(totals: &[CountryTotal], year: i32, limit: usize) -> Figure {
    let data = totals
        .iter()
        .map(|total| {
            json!({
                "type": "bar",
                "name": total.country,
                "legendgroup": total.country,
                "x": [total.country],
                "y": [total.visa_issued],
                "hovertemplate": "country=%{x}<br>visa_issued=%{y}<extra></extra>",
            })
        })
        .collect();

    Figure {
        data,
        layout: json!({
            "title": { "text": format!("Top {} countries with most issued visa in {}", limit, year) },
            "barmode": "relative",
            "xaxis": { "title": { "text": "Country" } },
            "yaxis": { "title": { "text": "Number of visa issued" } },
            "legend": { "title": { "text": "Country" } },
        }),
        frames: Vec::new(),
    }
}

/// Colour range for the year map: min and max over every frame
///
/// Falls back to (0, 0) for an empty table.
pub fn color_range(totals: &[CountryYearTotal]) -> (f64, f64) {
    let values = totals.iter().filter_map(|t| t.visa_issued);
    let (min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });

    if min.is_finite() && max.is_finite() {
        (min, max)
    } else {
        (0.0, 0.0)
    }
}

fn choropleth_trace(rows: &[&CountryYearTotal]) -> Value {
    let countries: Vec<&str> = rows.iter().map(|t| t.country.as_str()).collect();
    let values: Vec<Option<f64>> = rows.iter().map(|t| t.visa_issued).collect();

    json!({
        "type": "choropleth",
        "locationmode": "country names",
        "locations": countries,
        "z": values,
        "hovertext": countries,
        "coloraxis": "coloraxis",
        "hovertemplate": "<b>%{hovertext}</b><br>visa_issued=%{z}<extra></extra>",
    })
}

/// Animated choropleth: one frame per year, slider plus play/pause buttons
pub fn year_map_chart(totals: &[CountryYearTotal]) -> Figure {
    let mut by_year: BTreeMap<i32, Vec<&CountryYearTotal>> = BTreeMap::new();
    for total in totals {
        if let Some(year) = total.year {
            by_year.entry(year).or_default().push(total);
        }
    }

    let frames: Vec<Value> = by_year
        .iter()
        .map(|(year, rows)| {
            json!({
                "name": year.to_string(),
                "data": [choropleth_trace(rows)],
            })
        })
        .collect();

    let data = by_year
        .values()
        .next()
        .map(|rows| vec![choropleth_trace(rows)])
        .unwrap_or_default();

    let steps: Vec<Value> = by_year
        .keys()
        .map(|year| {
            json!({
                "label": year.to_string(),
                "method": "animate",
                "args": [[year.to_string()], {
                    "mode": "immediate",
                    "frame": { "duration": 0, "redraw": true },
                    "transition": { "duration": 0 },
                }],
            })
        })
        .collect();

    let (cmin, cmax) = color_range(totals);

    Figure {
        data,
        layout: json!({
            "title": { "text": "Yearly visa issued by countries" },
            "geo": { "showframe": false, "showcoastlines": true },
            "coloraxis": {
                "colorscale": plasma_colorscale(),
                "cmin": cmin,
                "cmax": cmax,
                "colorbar": { "title": { "text": "visa_issued" } },
            },
            "sliders": [{
                "active": 0,
                "currentvalue": { "prefix": "year=" },
                "len": 0.9,
                "x": 0.1,
                "steps": steps,
            }],
            "updatemenus": [{
                "type": "buttons",
                "direction": "left",
                "showactive": false,
                "x": 0.1,
                "xanchor": "right",
                "y": 0,
                "yanchor": "top",
                "buttons": [
                    {
                        "label": "&#9654;",
                        "method": "animate",
                        "args": [null, {
                            "frame": { "duration": 500, "redraw": true },
                            "fromcurrent": true,
                            "transition": { "duration": 500, "easing": "linear" },
                        }],
                    },
                    {
                        "label": "&#9724;",
                        "method": "animate",
                        "args": [[null], {
                            "mode": "immediate",
                            "frame": { "duration": 0, "redraw": true },
                            "transition": { "duration": 0 },
                        }],
                    },
                ],
            }],
        }),
        frames,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn cyt(year: Option<i32>, continent: &str, value: f64) -> ContinentYearTotal {
        ContinentYearTotal {
            year,
            continent: continent.to_string(),
            visa_issued: Some(value),
        }
    }

    fn country_year(year: i32, country: &str, value: Option<f64>) -> CountryYearTotal {
        CountryYearTotal {
            year: Some(year),
            country: country.to_string(),
            visa_issued: value,
        }
    }

    #[test]
    fn test_continent_chart_one_trace_per_continent() {
        let figure = continent_year_chart(&[
            cyt(Some(2016), "Asia", 400.0),
            cyt(Some(2016), "Europe", 50.0),
            cyt(Some(2017), "Asia", 1400.0),
            cyt(None, "Asia", 3.0),
        ]);

        assert_eq!(figure.data.len(), 2);
        assert_eq!(figure.data[0]["name"], "Asia");
        assert_eq!(figure.data[0]["x"], json!([2016, 2017]));
        assert_eq!(figure.data[0]["y"], json!([400.0, 1400.0]));
        assert_eq!(figure.layout["barmode"], "group");
        assert_eq!(figure.title(), "Number of visa issued in Japan between 2006 and 2017");
        assert_eq!(figure.layout["legend"]["title"]["text"], "Continent");
    }

    #[test]
    fn test_top_countries_chart_titles() {
        let totals: Vec<CountryTotal> = (0..10)
            .map(|i| CountryTotal {
                country: format!("Country {}", i),
                visa_issued: Some(100.0 - i as f64),
            })
            .collect();

        let figure = top_countries_chart(&totals, 2017, 10);

        assert_eq!(figure.data.len(), 10);
        assert_eq!(figure.title(), "Top 10 countries with most issued visa in 2017");
        assert_eq!(figure.layout["xaxis"]["title"]["text"], "Country");
        assert_eq!(figure.data[0]["x"], json!(["Country 0"]));
    }

    #[test]
    fn test_year_map_frames_per_year() {
        let figure = year_map_chart(&[
            country_year(2016, "Japan", Some(10.0)),
            country_year(2016, "China", Some(30.0)),
            country_year(2017, "Japan", Some(50.0)),
        ]);

        assert_eq!(figure.frames.len(), 2);
        assert_eq!(figure.frames[0]["name"], "2016");
        assert_eq!(figure.frames[1]["data"][0]["locations"], json!(["Japan"]));
        assert_eq!(figure.data[0]["locationmode"], "country names");
        assert_eq!(figure.layout["sliders"][0]["steps"].as_array().unwrap().len(), 2);
        assert_eq!(figure.layout["coloraxis"]["cmin"], 10.0);
        assert_eq!(figure.layout["coloraxis"]["cmax"], 50.0);
    }

    #[test]
    fn test_color_range_ignores_absent() {
        assert_eq!(
            color_range(&[
                country_year(2016, "Japan", None),
                country_year(2016, "China", Some(7.0)),
            ]),
            (7.0, 7.0)
        );
        assert_eq!(color_range(&[]), (0.0, 0.0));
    }

    #[test]
    fn test_html_embeds_figure() {
        let figure = top_countries_chart(
            &[CountryTotal { country: "</script>".to_string(), visa_issued: Some(1.0) }],
            2017,
            10,
        );
        let html = figure.to_html(&PlotlyScript::Cdn).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(PLOTLY_JS_URL));
        assert!(html.contains("<title>Top 10 countries with most issued visa in 2017</title>"));
        assert!(html.contains("<\\/script>"));
        assert_eq!(html.matches("</script>").count(), 2);
    }

    #[test]
    fn test_inline_plotly_needs_no_network() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = dir.path().join("plotly.min.js");
        std::fs::write(&bundle, "window.Plotly = {};").unwrap();

        let plotly = PlotlyScript::from_file(&bundle).unwrap();
        let html = year_map_chart(&[]).to_html(&plotly).unwrap();

        assert!(html.contains("window.Plotly = {};"));
        assert!(!html.contains(PLOTLY_JS_URL));
        assert!(PlotlyScript::from_file(&dir.path().join("missing.js")).is_err());
    }

    #[test]
    fn test_empty_map_has_no_frames() {
        let figure = year_map_chart(&[]);
        assert!(figure.data.is_empty());
        assert!(figure.frames.is_empty());

        let json = serde_json::to_value(&figure).unwrap();
        assert!(json.get("frames").is_none());
    }
}
