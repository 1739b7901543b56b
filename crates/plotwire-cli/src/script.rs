//! Figure scripts: a JSON array of draw and layout operations replayed onto one figure.
//!
//! ```json
//! [
//!   {"op": "bar", "positions": [0, 1], "values": [10, 20], "colors": ["#f00", "#0f0"]},
//!   {"op": "set_xlabel", "text": "bucket"}
//! ]
//! ```

use plotwire::mapper::{CycleStyleMapper, LinearSizeMapper, PaletteColorMapper};
use plotwire::{
    BarSpec, BoxPlotSpec, BoxStyle, CiStyle, ColorMapper, ConfidenceInterval, Datum, Facet, Figure,
    GroupedBoxPlotSpec, LegendVerbosity, LineSpec, Orientation, Rgba, ScatterSpec, SeriesChart,
    SizeMapper, StyleMapper, StyleSpec, Variables,
};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Op {
    BeginFigure,
    Bar(BarOp),
    BoxPlot(BoxPlotOp),
    GroupedBoxPlot(GroupedBoxPlotOp),
    Scatter(ScatterOp),
    Line(LineOp),
    SeriesChart(SeriesChart),
    SetTitle { text: String },
    SetXlabel { text: String },
    SetYlabel { text: String },
    SetXticks { values: Vec<Datum> },
    SetYticks { values: Vec<Datum> },
    SetXtickLabels { labels: Vec<String> },
    SetYtickLabels { labels: Vec<String> },
    SetXlim { min: f64, max: f64 },
    SetYlim { min: f64, max: f64 },
    DisableXaxisGrid,
    DisableYaxisGrid,
    Legend {
        title: String,
        #[serde(default)]
        loc: Option<String>,
    },
    AddLegend {
        #[serde(default)]
        verbosity: Verbosity,
    },
    InvertYaxis,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verbosity {
    #[default]
    Brief,
    Full,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BarOp {
    #[serde(default)]
    positions: Vec<f64>,
    #[serde(default)]
    group_names: Option<Vec<String>>,
    values: Vec<f64>,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    orientation: Orientation,
    #[serde(default)]
    label: Option<String>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    conf_int: Option<Vec<(f64, f64)>>,
    #[serde(default)]
    error_color: Option<String>,
    #[serde(default)]
    error_width: Option<f64>,
    #[serde(default)]
    cap_size: Option<f64>,
}

/// Box appearance; every field falls back to [`BoxStyle::default`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoxStyleOp {
    gray: Option<String>,
    width: Option<f64>,
    flier_size: Option<f64>,
    whisker: Option<f64>,
    notch: bool,
    dodge: bool,
}

impl BoxStyleOp {
    fn into_style(self) -> BoxStyle {
        let default = BoxStyle::default();
        BoxStyle {
            gray: self.gray,
            width: self.width.unwrap_or(default.width),
            flier_size: self.flier_size.unwrap_or(default.flier_size),
            whisker: self.whisker.unwrap_or(default.whisker),
            notch: self.notch,
            dodge: self.dodge,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoxPlotOp {
    groups: Vec<Vec<f64>>,
    group_names: Vec<String>,
    #[serde(default)]
    orientation: Orientation,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    style: BoxStyleOp,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GroupedBoxPlotOp {
    data: Vec<Vec<Vec<f64>>>,
    group_names: Vec<String>,
    color_names: Vec<String>,
    #[serde(default)]
    orientation: Orientation,
    #[serde(default)]
    colors: Vec<String>,
    #[serde(default)]
    style: BoxStyleOp,
}

/// A named facet column of a scatter op.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Column {
    #[serde(default)]
    name: Option<String>,
    values: Vec<Datum>,
}

/// Scatter op. Colors come from the category10 palette, styles cycle marker symbols and sizes
/// are min-max normalized.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScatterOp {
    x: serde_json::Value,
    y: serde_json::Value,
    #[serde(default)]
    color: Option<Column>,
    #[serde(default)]
    style: Option<Column>,
    #[serde(default)]
    size: Option<Column>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CiStyleOp {
    Band,
    Bars,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CiOp {
    style: CiStyleOp,
    y_min: Vec<f64>,
    y_max: Vec<f64>,
}

/// Line op. Styling is given directly rather than through facet keys.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineOp {
    x: serde_json::Value,
    y: serde_json::Value,
    #[serde(default)]
    color: Option<Rgba>,
    /// Normalized size in `[0, 1]`.
    #[serde(default)]
    size: Option<f64>,
    #[serde(default)]
    marker: Option<String>,
    #[serde(default)]
    dashes: Option<Vec<f64>>,
    #[serde(default)]
    ci: Option<CiOp>,
    #[serde(default)]
    label: Option<String>,
}

pub fn parse(json: &str) -> serde_json::Result<Vec<Op>> {
    serde_json::from_str(json)
}

/// Replays `ops` onto `fig`, stopping at the first failing op.
pub fn replay(fig: &mut Figure, ops: Vec<Op>) -> plotwire::Result<()> {
    for op in ops {
        apply(fig, op)?;
    }
    Ok(())
}

fn apply(fig: &mut Figure, op: Op) -> plotwire::Result<()> {
    match op {
        Op::BeginFigure => fig.begin(),
        Op::Bar(op) => fig.bar(bar_spec(op))?,
        Op::BoxPlot(op) => fig.box_plot(BoxPlotSpec {
            groups: op.groups,
            group_names: op.group_names,
            orientation: op.orientation,
            colors: op.colors,
            style: op.style.into_style(),
        })?,
        Op::GroupedBoxPlot(op) => fig.grouped_box_plot(GroupedBoxPlotSpec {
            data: op.data,
            group_names: op.group_names,
            color_names: op.color_names,
            orientation: op.orientation,
            colors: op.colors,
            style: op.style.into_style(),
        })?,
        Op::Scatter(op) => scatter(fig, op)?,
        Op::Line(op) => line(fig, op)?,
        Op::SeriesChart(chart) => *fig = Figure::from_series_chart(&chart)?,
        Op::SetTitle { text } => fig.set_title(text),
        Op::SetXlabel { text } => fig.set_xlabel(text),
        Op::SetYlabel { text } => fig.set_ylabel(text),
        Op::SetXticks { values } => fig.set_xticks(values)?,
        Op::SetYticks { values } => fig.set_yticks(values)?,
        Op::SetXtickLabels { labels } => fig.set_xtick_labels(labels),
        Op::SetYtickLabels { labels } => fig.set_ytick_labels(labels),
        Op::SetXlim { min, max } => fig.set_xlim(min, max),
        Op::SetYlim { min, max } => fig.set_ylim(min, max),
        Op::DisableXaxisGrid => fig.disable_xaxis_grid(),
        Op::DisableYaxisGrid => fig.disable_yaxis_grid(),
        Op::Legend { title, loc } => fig.legend(title, loc.as_deref()),
        Op::AddLegend { verbosity } => fig.add_legend(match verbosity {
            Verbosity::Brief => LegendVerbosity::Brief,
            Verbosity::Full => LegendVerbosity::Full,
        }),
        Op::InvertYaxis => fig.invert_yaxis(),
    }
    Ok(())
}

fn bar_spec(op: BarOp) -> BarSpec {
    let mut spec = BarSpec::new(op.positions, op.values);
    spec.group_names = op.group_names;
    spec.colors = op.colors;
    spec.orientation = op.orientation;
    spec.label = op.label;
    if let Some(width) = op.width {
        spec.width = width;
    }
    spec.conf_int = op.conf_int;
    spec.error_color = op.error_color;
    spec.error_width = op.error_width;
    spec.cap_size = op.cap_size;
    spec
}

fn scatter(fig: &mut Figure, op: ScatterOp) -> plotwire::Result<()> {
    let palette = op
        .color
        .as_ref()
        .map(|c| PaletteColorMapper::new(&c.values));
    let markers = op
        .style
        .as_ref()
        .map(|c| CycleStyleMapper::new(&c.values).with_dashes(false));
    let sizes = op
        .size
        .as_ref()
        .map(|c| LinearSizeMapper::from_series(&c.values));

    let variables = Variables {
        color: op.color.as_ref().and_then(|c| c.name.clone()),
        style: op.style.as_ref().and_then(|c| c.name.clone()),
        size: op.size.as_ref().and_then(|c| c.name.clone()),
    };
    let spec = ScatterSpec {
        color: op
            .color
            .zip(palette.as_ref())
            .map(|(c, m)| Facet::new(c.values, m as &dyn ColorMapper)),
        style: op
            .style
            .zip(markers.as_ref())
            .map(|(c, m)| Facet::new(c.values, m as &dyn StyleMapper)),
        size: op
            .size
            .zip(sizes.as_ref())
            .map(|(c, m)| Facet::new(c.values, m as &dyn SizeMapper)),
        variables,
    };
    fig.scatter(op.x, op.y, spec)
}

fn line(fig: &mut Figure, op: LineOp) -> plotwire::Result<()> {
    let color = op.color.map(|rgba| move |_: &Datum| rgba);
    let size = op.size.map(|v| move |_: &Datum| v);
    let style = (op.marker.is_some() || op.dashes.is_some()).then(|| {
        let spec = StyleSpec {
            marker: op.marker.clone(),
            dashes: op.dashes.clone(),
        };
        move |_: &Datum| spec.clone()
    });
    let key = Datum::Missing;

    let spec = LineSpec {
        color: color
            .as_ref()
            .map(|m| (key.clone(), m as &dyn ColorMapper)),
        size: size.as_ref().map(|m| (key.clone(), m as &dyn SizeMapper)),
        style: style.as_ref().map(|m| (key.clone(), m as &dyn StyleMapper)),
        ci: op.ci.map(|ci| ConfidenceInterval {
            style: match ci.style {
                CiStyleOp::Band => CiStyle::Band,
                CiStyleOp::Bars => CiStyle::Bars,
            },
            y_min: ci.y_min,
            y_max: ci.y_max,
        }),
        label: op.label,
    };
    fig.line(op.x, op.y, spec)
}
