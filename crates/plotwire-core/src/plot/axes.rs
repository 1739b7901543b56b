use crate::Result;
use crate::datum::{Datum, IntoSeries};
use crate::figure::Figure;
use crate::layout::{AxisId, TickMode, Title};
use crate::trace::Trace;

/// How much a legend should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LegendVerbosity {
    #[default]
    Brief,
    /// One entry per distinct facet value. Not supported; falls back to `Brief`.
    Full,
}

impl Figure {
    pub fn set_title(&mut self, text: impl Into<String>) {
        self.layout_mut().title = Some(Title { text: text.into() });
    }

    pub fn set_xlabel(&mut self, text: impl Into<String>) {
        self.layout_mut().axis_mut(AxisId::X).title = Some(text.into());
    }

    pub fn set_ylabel(&mut self, text: impl Into<String>) {
        self.layout_mut().axis_mut(AxisId::Y).title = Some(text.into());
    }

    pub fn set_xticks(&mut self, ticks: impl IntoSeries) -> Result<()> {
        self.set_ticks(AxisId::X, ticks.into_series("xticks")?);
        Ok(())
    }

    pub fn set_yticks(&mut self, ticks: impl IntoSeries) -> Result<()> {
        self.set_ticks(AxisId::Y, ticks.into_series("yticks")?);
        Ok(())
    }

    fn set_ticks(&mut self, id: AxisId, ticks: Vec<Datum>) {
        let axis = self.layout_mut().axis_mut(id);
        axis.tickmode = Some(TickMode::Array);
        axis.tickvals = Some(ticks);
    }

    pub fn set_xtick_labels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.set_tick_labels(AxisId::X, labels.into_iter().map(Into::into).collect());
    }

    pub fn set_ytick_labels<S: Into<String>>(&mut self, labels: impl IntoIterator<Item = S>) {
        self.set_tick_labels(AxisId::Y, labels.into_iter().map(Into::into).collect());
    }

    fn set_tick_labels(&mut self, id: AxisId, labels: Vec<String>) {
        let axis = self.layout_mut().axis_mut(id);
        axis.tickmode = Some(TickMode::Array);
        axis.ticktext = Some(labels);
    }

    pub fn set_xlim(&mut self, min: f64, max: f64) {
        self.layout_mut().axis_mut(AxisId::X).range = Some([min, max]);
    }

    pub fn set_ylim(&mut self, min: f64, max: f64) {
        self.layout_mut().axis_mut(AxisId::Y).range = Some([min, max]);
    }

    pub fn disable_xaxis_grid(&mut self) {
        self.layout_mut().axis_mut(AxisId::X).showgrid = Some(false);
    }

    pub fn disable_yaxis_grid(&mut self) {
        self.layout_mut().axis_mut(AxisId::Y).showgrid = Some(false);
    }

    /// Shows the legend under `title`. The library places legends itself, so `loc` is ignored.
    pub fn legend(&mut self, title: impl Into<String>, loc: Option<&str>) {
        if let Some(loc) = loc {
            tracing::debug!(loc, "legend location is not configurable; ignoring");
        }
        let layout = self.layout_mut();
        layout.showlegend = true;
        layout.set_legend_title(title);
    }

    pub fn add_legend(&mut self, verbosity: LegendVerbosity) {
        if verbosity == LegendVerbosity::Full {
            tracing::warn!("full legend verbosity is not supported; using the brief legend");
        }
        self.layout_mut().showlegend = true;
    }

    /// Flips the y axis of what has been drawn so far.
    ///
    /// Bar traces reverse their `y` values, box groups reverse their trace order and explicit y
    /// tick labels are reversed. Calling it twice restores the figure.
    pub fn invert_yaxis(&mut self) {
        for trace in self.traces_mut().iter_mut() {
            if let Trace::Bar(bar) = trace {
                bar.y.reverse();
            }
        }
        if self.layout().boxes_grouped() {
            self.traces_mut().reverse();
        }
        if let Some(labels) = self
            .layout_mut()
            .yaxis
            .as_mut()
            .and_then(|axis| axis.ticktext.as_mut())
        {
            labels.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{BarSpec, BoxPlotSpec, GroupedBoxPlotSpec};
    use serde_json::json;

    #[test]
    fn setters_merge_into_one_axis_record() {
        let mut fig = Figure::new();
        fig.set_xlabel("time");
        fig.set_xlim(0.0, 10.0);
        fig.set_xticks(vec![0.0, 5.0, 10.0]).unwrap();
        fig.set_xtick_labels(["start", "mid", "end"]);
        fig.disable_xaxis_grid();

        assert_eq!(
            serde_json::to_value(fig.layout()).unwrap(),
            json!({
                "showlegend": false,
                "xaxis": {
                    "title": "time",
                    "range": [0.0, 10.0],
                    "tickmode": "array",
                    "tickvals": [0.0, 5.0, 10.0],
                    "ticktext": ["start", "mid", "end"],
                    "showgrid": false
                }
            })
        );
    }

    #[test]
    fn tick_labels_alone_switch_to_array_ticks() {
        let mut fig = Figure::new();
        fig.set_ytick_labels(["low", "high"]);
        assert_eq!(
            serde_json::to_value(fig.layout()).unwrap(),
            json!({
                "showlegend": false,
                "yaxis": {"tickmode": "array", "ticktext": ["low", "high"]}
            })
        );
    }

    #[test]
    fn invalid_ticks_leave_the_axis_unset() {
        let mut fig = Figure::new();
        assert!(fig.set_yticks(json!({"a": 1})).is_err());
        assert!(fig.layout().yaxis.is_none());
    }

    #[test]
    fn legend_sets_title_and_visibility() {
        let mut fig = Figure::new();
        fig.legend("Kind", Some("upper right"));
        assert!(fig.layout().showlegend);
        assert_eq!(
            serde_json::to_value(&fig.layout().legend).unwrap(),
            json!({"title": {"text": "Kind"}})
        );
    }

    #[test]
    fn full_legend_degrades_to_brief() {
        let mut fig = Figure::new();
        fig.add_legend(LegendVerbosity::Full);
        assert!(fig.layout().showlegend);
        assert!(fig.layout().legend.is_none());
    }

    #[test]
    fn inverting_twice_restores_bars_and_tick_labels() {
        let mut fig = Figure::new();
        let mut spec = BarSpec::new(vec![0.0, 1.0, 2.0], vec![1.0, 2.0, 3.0]);
        spec.group_names = Some(vec!["a".into(), "b".into(), "c".into()]);
        spec.orientation = crate::Orientation::Horizontal;
        fig.bar(spec).unwrap();
        fig.set_ytick_labels(["a", "b", "c"]);
        let before = fig.clone();

        fig.invert_yaxis();
        let bar = fig.traces()[0].as_bar().unwrap();
        assert_eq!(serde_json::to_value(&bar.y).unwrap(), json!(["c", "b", "a"]));
        assert_eq!(
            fig.layout().yaxis.as_ref().unwrap().ticktext,
            Some(vec!["c".to_string(), "b".to_string(), "a".to_string()])
        );

        fig.invert_yaxis();
        assert_eq!(fig, before);
    }

    #[test]
    fn inverting_reverses_traces_only_in_box_group_mode() {
        let mut plain = Figure::new();
        plain
            .box_plot(BoxPlotSpec {
                groups: vec![vec![1.0], vec![2.0]],
                group_names: vec!["a".into(), "b".into()],
                ..BoxPlotSpec::default()
            })
            .unwrap();
        let before = plain.clone();
        plain.invert_yaxis();
        assert_eq!(plain, before);

        let mut grouped = Figure::new();
        grouped
            .grouped_box_plot(GroupedBoxPlotSpec {
                data: vec![vec![vec![1.0]], vec![vec![2.0]]],
                group_names: vec!["g".into()],
                color_names: vec!["red".into(), "blue".into()],
                ..GroupedBoxPlotSpec::default()
            })
            .unwrap();
        let before = grouped.clone();
        grouped.invert_yaxis();
        let names: Vec<_> = grouped.traces().iter().filter_map(|t| t.name()).collect();
        assert_eq!(names, vec!["blue", "red"]);
        grouped.invert_yaxis();
        assert_eq!(grouped, before);
    }
}
