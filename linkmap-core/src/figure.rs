//! Plotly-compatible figure assembly.
//!
//! The structs here serialize to the plotly object model (traces plus a
//! page layout), so the output renders with stock plotly.js. Nothing is
//! persisted by this module; the CLI decides what to do with the HTML.

use crate::layout::Point;
use serde::Serialize;

/// Fixed canvas size, a presentation invariant.
const CANVAS_WIDTH: u32 = 800;
const CANVAS_HEIGHT: u32 = 800;

const EDGE_COLOUR: &str = "rgb(110,110,110)";
const MARKER_OUTLINE_COLOUR: &str = "rgb(50,50,50)";
const DEGREE_TEXT_COLOUR: &str = "rgb(255,255,255)";

/// A scatter trace. `None` entries in `x`/`y` serialize to JSON null,
/// which plotly treats as a gap between line segments.
#[derive(Debug, Clone, Serialize)]
pub struct Scatter {
    pub x: Vec<Option<f64>>,
    pub y: Vec<Option<f64>>,
    pub mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<String>>,
    pub hoverinfo: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub textfont: Option<TextFont>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LineStyle {
    pub color: &'static str,
    pub width: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Marker {
    pub symbol: &'static str,
    pub size: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<String>>,
    pub line: LineStyle,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextFont {
    pub color: &'static str,
}

/// A fully suppressed axis: no line, grid, ticks, or title.
#[derive(Debug, Clone, Serialize)]
pub struct Axis {
    pub showline: bool,
    pub zeroline: bool,
    pub showgrid: bool,
    pub showticklabels: bool,
    pub title: &'static str,
}

impl Axis {
    fn hidden() -> Self {
        Self {
            showline: false,
            zeroline: false,
            showgrid: false,
            showticklabels: false,
            title: "",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Font {
    pub size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Margin {
    pub l: u32,
    pub r: u32,
    pub b: u32,
    pub t: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FigureLayout {
    pub title: &'static str,
    pub font: Font,
    pub showlegend: bool,
    pub autosize: bool,
    pub width: u32,
    pub height: u32,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub margin: Margin,
    pub hovermode: &'static str,
}

impl Default for FigureLayout {
    fn default() -> Self {
        Self {
            title: "",
            font: Font { size: 12 },
            showlegend: false,
            autosize: false,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
            xaxis: Axis::hidden(),
            yaxis: Axis::hidden(),
            margin: Margin {
                l: 40,
                r: 40,
                b: 85,
                t: 100,
            },
            hovermode: "closest",
        }
    }
}

/// A renderable figure: the present layers plus the page layout.
#[derive(Debug, Clone, Serialize)]
pub struct Figure {
    pub data: Vec<Scatter>,
    pub layout: FigureLayout,
}

impl Figure {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Render a standalone HTML page that draws the figure with plotly.js
    /// loaded from a CDN.
    pub fn to_html(&self) -> serde_json::Result<String> {
        let data = serde_json::to_string(&self.data)?;
        let layout = serde_json::to_string(&self.layout)?;
        Ok(format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>linkmap</title>
    <script src="https://cdn.plot.ly/plotly-2.27.0.min.js"></script>
</head>
<body>
    <div id="graph"></div>
    <script>
        Plotly.newPlot("graph", {data}, {layout});
    </script>
</body>
</html>
"#
        ))
    }
}

/// Assemble a figure from pre-computed pieces.
///
/// Layers, in draw order: edge segments, node markers, and an optional
/// out-degree text overlay (shown only when `show_degree_labels` is set).
/// Absent layers are dropped from the data list entirely rather than
/// rendered empty, so `figure.data.len()` equals the number of present
/// layers.
pub fn assemble_figure(
    labels: &[&str],
    edges: &[(usize, usize)],
    points: &[Point],
    colors: Option<&[String]>,
    degrees: Option<&[usize]>,
    show_degree_labels: bool,
) -> Figure {
    let edge_layer = (!edges.is_empty()).then(|| edge_trace(edges, points));
    let node_layer = (!labels.is_empty()).then(|| node_trace(labels, points, colors));
    let degree_layer = degrees
        .filter(|_| show_degree_labels)
        .map(|d| degree_trace(d, points));

    let layers = [edge_layer, node_layer, degree_layer];
    Figure {
        data: layers.into_iter().flatten().collect(),
        layout: FigureLayout::default(),
    }
}

/// Every edge contributes its two endpoints followed by a gap marker, so
/// the segments render disconnected.
fn edge_trace(edges: &[(usize, usize)], points: &[Point]) -> Scatter {
    let mut x = Vec::with_capacity(edges.len() * 3);
    let mut y = Vec::with_capacity(edges.len() * 3);
    for &(a, b) in edges {
        x.extend([Some(points[a].x), Some(points[b].x), None]);
        y.extend([Some(points[a].y), Some(points[b].y), None]);
    }
    Scatter {
        x,
        y,
        mode: "lines",
        name: None,
        line: Some(LineStyle {
            color: EDGE_COLOUR,
            width: 1.0,
        }),
        marker: None,
        text: None,
        hoverinfo: "none",
        textfont: None,
    }
}

fn node_trace(labels: &[&str], points: &[Point], colors: Option<&[String]>) -> Scatter {
    Scatter {
        x: points.iter().map(|p| Some(p.x)).collect(),
        y: points.iter().map(|p| Some(p.y)).collect(),
        mode: "markers",
        name: Some("ntw"),
        line: None,
        marker: Some(Marker {
            symbol: "circle",
            size: 15,
            color: colors.map(<[String]>::to_vec),
            line: LineStyle {
                color: MARKER_OUTLINE_COLOUR,
                width: 0.5,
            },
        }),
        text: Some(labels.iter().map(|&l| l.to_string()).collect()),
        hoverinfo: "text",
        textfont: None,
    }
}

fn degree_trace(degrees: &[usize], points: &[Point]) -> Scatter {
    Scatter {
        x: points.iter().map(|p| Some(p.x)).collect(),
        y: points.iter().map(|p| Some(p.y)).collect(),
        mode: "text",
        name: None,
        line: None,
        marker: None,
        text: Some(degrees.iter().map(usize::to_string).collect()),
        hoverinfo: "none",
        textfont: Some(TextFont {
            color: DEGREE_TEXT_COLOUR,
        }),
    }
}
