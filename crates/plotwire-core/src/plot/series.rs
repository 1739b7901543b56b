//! The series chart: a whole figure described at once, one trace per series.

use super::check_len;
use crate::Result;
use crate::datum::Datum;
use crate::figure::Figure;
use crate::layout::AxisId;
use crate::trace::{BarTrace, Marker, Mode, Orientation, ScatterTrace, Trace};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesKind {
    Bar,
    /// Connected points.
    #[default]
    Curve,
    /// Unconnected points.
    Scatter,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Series {
    pub xs: Vec<Datum>,
    pub ys: Vec<Datum>,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct SeriesChart {
    pub kind: SeriesKind,
    pub series: Vec<Series>,
    pub title: Option<String>,
    pub xlabel: Option<String>,
    pub ylabel: Option<String>,
    pub x_range: Option<[f64; 2]>,
    pub y_range: Option<[f64; 2]>,
}

impl Figure {
    pub fn from_series_chart(chart: &SeriesChart) -> Result<Figure> {
        for series in &chart.series {
            check_len("series ys", series.xs.len(), series.ys.len())?;
        }

        let mut fig = Figure::new();
        for series in &chart.series {
            let (x, y, name) = (series.xs.clone(), series.ys.clone(), series.label.clone());
            let trace = match chart.kind {
                SeriesKind::Bar => Trace::Bar(BarTrace {
                    orientation: Orientation::Vertical,
                    x,
                    y,
                    width: 0.8,
                    marker: Marker::default(),
                    name,
                    error_x: None,
                    error_y: None,
                }),
                SeriesKind::Curve | SeriesKind::Scatter => {
                    let mode = match chart.kind {
                        SeriesKind::Scatter => Mode::Markers,
                        _ => Mode::Lines,
                    };
                    let mut trace = ScatterTrace::new(mode, x, y);
                    trace.name = name;
                    Trace::Scatter(trace)
                }
            };
            fig.push_trace(trace);
        }

        if let Some(title) = &chart.title {
            fig.set_title(title.clone());
        }
        for (id, label, range) in [
            (AxisId::X, &chart.xlabel, chart.x_range),
            (AxisId::Y, &chart.ylabel, chart.y_range),
        ] {
            let axis = fig.layout_mut().axis_mut(id);
            axis.title = label.clone();
            axis.range = range;
        }
        fig.layout_mut().showlegend = chart.series.iter().any(|s| s.label.is_some());
        Ok(fig)
    }
}
