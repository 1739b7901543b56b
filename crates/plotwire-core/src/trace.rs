//! Graphical primitives of the wire document.
//!
//! Every struct serializes with the visualization library's key names; optional fields are
//! skipped rather than written as `null`.

use crate::datum::Datum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    #[serde(rename = "v")]
    Vertical,
    #[serde(rename = "h")]
    Horizontal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mode {
    #[serde(rename = "markers")]
    Markers,
    #[serde(rename = "lines")]
    Lines,
    #[serde(rename = "lines+markers")]
    LinesAndMarkers,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineShape {
    Linear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Fill {
    ToNextY,
}

/// A scalar applied to every point, or one value per point.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    One(T),
    Many(Vec<T>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerLine {
    pub width: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Marker {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<OneOrMany<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<OneOrMany<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<MarkerLine>,
}

impl Marker {
    /// Scatter-style point: size 10 with a thin white outline.
    pub fn outlined() -> Self {
        Self {
            line: Some(MarkerLine {
                width: 1.0,
                color: "#fff".to_string(),
            }),
            size: Some(OneOrMany::One(10.0)),
            ..Self::default()
        }
    }

    pub fn colored(color: impl Into<String>) -> Self {
        Self {
            color: Some(OneOrMany::One(color.into())),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct LineStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<LineShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<String>,
}

impl LineStyle {
    pub fn linear() -> Self {
        Self {
            shape: Some(LineShape::Linear),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorBarKind {
    Data,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorBar {
    #[serde(rename = "type")]
    pub kind: ErrorBarKind,
    pub visible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetric: Option<bool>,
    pub array: Vec<f64>,
    pub arrayminus: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl ErrorBar {
    /// Asymmetric bars around `center`: `array[i] = high[i] - center[i]` and
    /// `arrayminus[i] = center[i] - low[i]`.
    ///
    /// All three slices must have the same length; callers validate that first.
    pub fn asymmetric(center: &[f64], low: &[f64], high: &[f64]) -> Self {
        Self {
            kind: ErrorBarKind::Data,
            visible: true,
            symmetric: None,
            array: high.iter().zip(center).map(|(h, c)| h - c).collect(),
            arrayminus: center.iter().zip(low).map(|(c, l)| c - l).collect(),
            color: None,
            thickness: None,
            width: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarTrace {
    pub orientation: Orientation,
    pub x: Vec<Datum>,
    pub y: Vec<Datum>,
    pub width: f64,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_x: Option<ErrorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBar>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxTrace {
    pub orientation: Orientation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub marker: Marker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notched: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Datum>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Datum>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterTrace {
    pub mode: Mode,
    pub x: Vec<Datum>,
    pub y: Vec<Datum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_y: Option<ErrorBar>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Fill>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fillcolor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
}

impl ScatterTrace {
    pub fn new(mode: Mode, x: Vec<Datum>, y: Vec<Datum>) -> Self {
        Self {
            mode,
            x,
            y,
            name: None,
            marker: None,
            line: None,
            error_y: None,
            fill: None,
            fillcolor: None,
            showlegend: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Trace {
    Bar(BarTrace),
    Box(BoxTrace),
    Scatter(ScatterTrace),
}

impl Trace {
    pub fn name(&self) -> Option<&str> {
        match self {
            Trace::Bar(t) => t.name.as_deref(),
            Trace::Box(t) => t.name.as_deref(),
            Trace::Scatter(t) => t.name.as_deref(),
        }
    }

    pub fn as_bar(&self) -> Option<&BarTrace> {
        match self {
            Trace::Bar(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&BoxTrace> {
        match self {
            Trace::Box(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_scatter(&self) -> Option<&ScatterTrace> {
        match self {
            Trace::Scatter(t) => Some(t),
            _ => None,
        }
    }
}
