use super::{check_len, numbers};
use crate::Result;
use crate::color::DEFAULT_LINE_COLOR;
use crate::datum::{Datum, IntoSeries, numeric};
use crate::figure::Figure;
use crate::mapper::{ColorMapper, SizeMapper, StyleMapper};
use crate::style;
use crate::trace::{ErrorBar, Fill, LineStyle, Marker, Mode, ScatterTrace, Trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CiStyle {
    /// A translucent band between two extra, legend-less line traces.
    Band,
    /// Asymmetric error bars on the line trace itself.
    Bars,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConfidenceInterval {
    pub style: CiStyle,
    pub y_min: Vec<f64>,
    pub y_max: Vec<f64>,
}

/// Facets of [`Figure::line`]. A line call draws one line, so each facet is a single key.
#[derive(Default)]
pub struct LineSpec<'a> {
    pub color: Option<(Datum, &'a dyn ColorMapper)>,
    pub size: Option<(Datum, &'a dyn SizeMapper)>,
    pub style: Option<(Datum, &'a dyn StyleMapper)>,
    pub ci: Option<ConfidenceInterval>,
    pub label: Option<String>,
}

fn band_edge(x: Vec<Datum>, y: &[f64]) -> ScatterTrace {
    let mut trace = ScatterTrace::new(Mode::Lines, x, numbers(y));
    trace.line = Some(LineStyle {
        width: Some(0.0),
        ..LineStyle::linear()
    });
    trace.showlegend = Some(false);
    trace
}

impl Figure {
    pub fn line(
        &mut self,
        x: impl IntoSeries,
        y: impl IntoSeries,
        spec: LineSpec<'_>,
    ) -> Result<()> {
        let x = x.into_series("x")?;
        let y = y.into_series("y")?;
        check_len("line y", x.len(), y.len())?;
        if let Some(ci) = &spec.ci {
            check_len("line y_min", x.len(), ci.y_min.len())?;
            check_len("line y_max", x.len(), ci.y_max.len())?;
        }
        let y_numeric = match &spec.ci {
            Some(ci) if ci.style == CiStyle::Bars => Some(numeric(&y, "y")?),
            _ => None,
        };

        let resolved_style = spec
            .style
            .as_ref()
            .map(|(key, mapper)| style::style(*mapper, key))
            .unwrap_or_default();
        let mode = if resolved_style.marker.is_some() {
            Mode::LinesAndMarkers
        } else {
            Mode::Lines
        };

        let line_color = spec
            .color
            .as_ref()
            .map(|(key, mapper)| style::color(*mapper, key))
            .unwrap_or(DEFAULT_LINE_COLOR);
        let line_width = spec
            .size
            .as_ref()
            .map(|(key, mapper)| style::line_width(*mapper, key));

        let mut trace = ScatterTrace::new(mode, x.clone(), y);
        trace.name = spec.label;
        trace.line = Some(LineStyle {
            color: Some(line_color.to_hex_string()),
            width: line_width,
            dash: resolved_style.dashes.as_deref().map(style::dash_pattern),
            ..LineStyle::linear()
        });
        if let Some(symbol) = resolved_style.marker {
            trace.marker = Some(Marker {
                symbol: Some(symbol),
                ..Marker::outlined()
            });
        }

        if let Some(ci) = spec.ci {
            match (ci.style, y_numeric) {
                (CiStyle::Band, _) => {
                    let upper = band_edge(x.clone(), &ci.y_max);
                    let mut lower = band_edge(x, &ci.y_min);
                    lower.fill = Some(Fill::ToNextY);
                    lower.fillcolor = Some(line_color.with_alpha(0.2).to_hex_string());
                    self.push_trace(Trace::Scatter(upper));
                    self.push_trace(Trace::Scatter(lower));
                }
                (CiStyle::Bars, Some(center)) => {
                    let mut bars = ErrorBar::asymmetric(&center, &ci.y_min, &ci.y_max);
                    bars.color = Some(line_color.to_hex_string());
                    bars.thickness = line_width;
                    trace.error_y = Some(bars);
                }
                (CiStyle::Bars, None) => {}
            }
        }

        self.push_trace(Trace::Scatter(trace));
        Ok(())
    }
}
