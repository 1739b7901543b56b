use crate::layout::Layout;
use crate::trace::Trace;
use serde::Serialize;

/// One in-progress chart: an ordered trace list and its layout.
///
/// Builders in [`crate::plot`] only append traces and merge layout fields; [`Figure::begin`] is
/// the single reset point. Cloning a figure is the way to snapshot it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Figure {
    traces: Vec<Trace>,
    layout: Layout,
}

impl Figure {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops every trace and resets the layout to `{showlegend: false}`.
    pub fn begin(&mut self) {
        self.traces.clear();
        self.layout = Layout::default();
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub(crate) fn push_trace(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    pub(crate) fn extend_traces(&mut self, traces: impl IntoIterator<Item = Trace>) {
        self.traces.extend(traces);
    }

    pub(crate) fn traces_mut(&mut self) -> &mut Vec<Trace> {
        &mut self.traces
    }

    pub(crate) fn layout_mut(&mut self) -> &mut Layout {
        &mut self.layout
    }

    pub fn document(&self) -> Document<'_> {
        Document {
            traces: &self.traces,
            layout: &self.layout,
        }
    }
}

/// Borrowed wire view: `{"traces": [...], "layout": {...}}`.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Document<'a> {
    pub traces: &'a [Trace],
    pub layout: &'a Layout,
}

impl Document<'_> {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn traces_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.traces)
    }

    pub fn layout_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self.layout)
    }
}
