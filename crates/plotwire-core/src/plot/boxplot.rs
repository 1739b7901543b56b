use super::{check_len, labels, numbers};
use crate::Result;
use crate::figure::Figure;
use crate::layout::AxisId;
use crate::trace::{BoxTrace, LineStyle, Marker, OneOrMany, Orientation, Trace};

/// Shared box appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxStyle {
    /// Outline color of every box. Default: library default.
    pub gray: Option<String>,
    /// Box width. Accepted for parity with other backends; the document has no counterpart.
    pub width: f64,
    /// Outlier marker size. Default: 5.
    pub flier_size: f64,
    /// Whisker reach in IQRs. The visualization library fixes this at 1.5.
    pub whisker: f64,
    /// Draw notched boxes. Default: false.
    pub notch: bool,
    /// Dodge boxes of different colors. Grouped box plots always dodge.
    pub dodge: bool,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            gray: None,
            width: 0.8,
            flier_size: 5.0,
            whisker: 1.5,
            notch: false,
            dodge: false,
        }
    }
}

/// Arguments of [`Figure::box_plot`]: one box per group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxPlotSpec {
    pub groups: Vec<Vec<f64>>,
    /// One name per group.
    pub group_names: Vec<String>,
    pub orientation: Orientation,
    /// One display color per group; missing entries fall back to the library default.
    pub colors: Vec<String>,
    pub style: BoxStyle,
}

/// Arguments of [`Figure::grouped_box_plot`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GroupedBoxPlotSpec {
    /// `data[color][group]` holds the raw values of one box.
    pub data: Vec<Vec<Vec<f64>>>,
    pub group_names: Vec<String>,
    /// One name per color facet, index-aligned with `data`.
    pub color_names: Vec<String>,
    pub orientation: Orientation,
    /// One display color per color facet.
    pub colors: Vec<String>,
    pub style: BoxStyle,
}

fn box_trace(
    name: Option<String>,
    color: Option<&String>,
    orientation: Orientation,
    style: &BoxStyle,
) -> BoxTrace {
    BoxTrace {
        orientation,
        name,
        marker: Marker {
            color: color.cloned().map(OneOrMany::One),
            size: Some(OneOrMany::One(style.flier_size)),
            ..Marker::default()
        },
        line: style.gray.as_ref().map(|gray| LineStyle {
            color: Some(gray.clone()),
            ..LineStyle::default()
        }),
        notched: style.notch.then_some(true),
        x: None,
        y: None,
    }
}

fn log_unsupported_whisker(style: &BoxStyle) {
    if style.whisker != 1.5 {
        tracing::debug!(
            whisker = style.whisker,
            "box whisker length is fixed at 1.5 IQR by the visualization library"
        );
    }
}

impl Figure {
    pub fn box_plot(&mut self, spec: BoxPlotSpec) -> Result<()> {
        let BoxPlotSpec {
            groups,
            group_names,
            orientation,
            colors,
            style,
        } = spec;
        check_len("box plot group names", groups.len(), group_names.len())?;
        log_unsupported_whisker(&style);

        let mut traces: Vec<Trace> = groups
            .iter()
            .zip(group_names)
            .enumerate()
            .map(|(i, (values, name))| {
                let mut trace = box_trace(Some(name), colors.get(i), orientation, &style);
                match orientation {
                    Orientation::Vertical => trace.y = Some(numbers(values)),
                    Orientation::Horizontal => trace.x = Some(numbers(values)),
                }
                Trace::Box(trace)
            })
            .collect();

        // Horizontal categories stack bottom-up; reverse so the first group ends on top.
        if orientation == Orientation::Horizontal {
            traces.reverse();
        }

        self.extend_traces(traces);
        Ok(())
    }

    pub fn grouped_box_plot(&mut self, spec: GroupedBoxPlotSpec) -> Result<()> {
        let GroupedBoxPlotSpec {
            mut data,
            mut group_names,
            color_names,
            orientation,
            colors,
            style,
        } = spec;
        check_len("grouped box plot colors", color_names.len(), data.len())?;
        for per_color in &data {
            check_len("grouped box plot groups", group_names.len(), per_color.len())?;
        }
        log_unsupported_whisker(&style);

        self.layout_mut().group_boxes();
        if orientation == Orientation::Horizontal {
            self.layout_mut().axis_mut(AxisId::X).zeroline = Some(false);
            for per_color in &mut data {
                per_color.reverse();
            }
            group_names.reverse();
        }

        let traces: Vec<Trace> = color_names
            .into_iter()
            .zip(&data)
            .enumerate()
            .map(|(i, (color_name, per_group))| {
                let categories: Vec<String> = group_names
                    .iter()
                    .zip(per_group)
                    .flat_map(|(name, values)| std::iter::repeat_n(name.clone(), values.len()))
                    .collect();
                let values: Vec<f64> = per_group.iter().flatten().copied().collect();

                let mut trace = box_trace(Some(color_name), colors.get(i), orientation, &style);
                match orientation {
                    Orientation::Vertical => {
                        trace.y = Some(numbers(&values));
                        trace.x = Some(labels(&categories));
                    }
                    Orientation::Horizontal => {
                        trace.x = Some(numbers(&values));
                        trace.y = Some(labels(&categories));
                    }
                }
                Trace::Box(trace)
            })
            .collect();

        self.extend_traces(traces);
        Ok(())
    }
}
