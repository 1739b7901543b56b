use super::{check_len, labels, numbers};
use crate::Result;
use crate::figure::Figure;
use crate::trace::{BarTrace, ErrorBar, Marker, OneOrMany, Orientation, Trace};

/// Arguments of [`Figure::bar`].
#[derive(Debug, Clone, PartialEq)]
pub struct BarSpec {
    /// Bar positions on the category axis.
    pub positions: Vec<f64>,
    /// Categorical labels. When present they replace `positions` on the category axis and the
    /// layout switches to grouped bars.
    pub group_names: Option<Vec<String>>,
    /// Bar lengths, index-aligned with the category axis.
    pub values: Vec<f64>,
    /// Display colors (`"#f00"`, `"#1f77b4"`), already resolved by the caller.
    pub colors: Vec<String>,
    /// Default: vertical.
    pub orientation: Orientation,
    /// Legend entry. Default: none.
    pub label: Option<String>,
    /// Bar width in axis units. Default: 0.8.
    pub width: f64,
    /// `(low, high)` per value; produces an asymmetric error bar on the value axis.
    pub conf_int: Option<Vec<(f64, f64)>>,
    /// Error bar color. Only used with `conf_int`.
    pub error_color: Option<String>,
    /// Error bar line thickness. Only used with `conf_int`.
    pub error_width: Option<f64>,
    /// Error bar cap width. Only used with `conf_int`.
    pub cap_size: Option<f64>,
}

impl BarSpec {
    pub fn new(positions: Vec<f64>, values: Vec<f64>) -> Self {
        Self {
            positions,
            group_names: None,
            values,
            colors: Vec::new(),
            orientation: Orientation::Vertical,
            label: None,
            width: 0.8,
            conf_int: None,
            error_color: None,
            error_width: None,
            cap_size: None,
        }
    }
}

impl Figure {
    pub fn bar(&mut self, spec: BarSpec) -> Result<()> {
        let BarSpec {
            positions,
            group_names,
            values,
            colors,
            orientation,
            label,
            width,
            conf_int,
            error_color,
            error_width,
            cap_size,
        } = spec;

        let grouped = group_names.is_some();
        let category = match &group_names {
            Some(names) => labels(names),
            None => numbers(&positions),
        };
        check_len("bar values", category.len(), values.len())?;

        let error_bar = match conf_int {
            Some(ci) => {
                check_len("bar confidence intervals", values.len(), ci.len())?;
                let (low, high): (Vec<f64>, Vec<f64>) = ci.into_iter().unzip();
                let mut bar = ErrorBar::asymmetric(&values, &low, &high);
                bar.symmetric = Some(false);
                bar.color = error_color;
                bar.thickness = error_width;
                bar.width = cap_size;
                Some(bar)
            }
            None => None,
        };

        let value_axis = numbers(&values);
        let (x, y) = match orientation {
            Orientation::Vertical => (category, value_axis),
            Orientation::Horizontal => (value_axis, category),
        };

        let mut trace = BarTrace {
            orientation,
            x,
            y,
            width,
            marker: Marker {
                color: Some(OneOrMany::Many(colors)),
                ..Marker::default()
            },
            name: label,
            error_x: None,
            error_y: None,
        };
        match orientation {
            Orientation::Vertical => trace.error_y = error_bar,
            Orientation::Horizontal => trace.error_x = error_bar,
        }

        self.push_trace(Trace::Bar(trace));
        if grouped {
            self.layout_mut().group_bars();
        }
        Ok(())
    }
}
