use super::check_len;
use crate::Result;
use crate::datum::{Datum, IntoSeries};
use crate::figure::Figure;
use crate::grouping::{group_indices, values_at};
use crate::mapper::{ColorMapper, SizeMapper, StyleMapper};
use crate::style;
use crate::trace::{Marker, Mode, OneOrMany, ScatterTrace, Trace};

/// A per-point facet vector and the mapper that resolves its values.
pub struct Facet<'a, M: ?Sized> {
    pub values: Vec<Datum>,
    pub mapper: &'a M,
}

impl<'a, M: ?Sized> Facet<'a, M> {
    pub fn new(values: Vec<Datum>, mapper: &'a M) -> Self {
        Self { values, mapper }
    }
}

/// Source column names of the facets, used for the legend title.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Variables {
    pub color: Option<String>,
    pub style: Option<String>,
    pub size: Option<String>,
}

/// Facets of [`Figure::scatter`]. With neither `color` nor `style` the scatter is a single
/// ungrouped trace.
#[derive(Default)]
pub struct ScatterSpec<'a> {
    pub color: Option<Facet<'a, dyn ColorMapper + 'a>>,
    pub style: Option<Facet<'a, dyn StyleMapper + 'a>>,
    pub size: Option<Facet<'a, dyn SizeMapper + 'a>>,
    pub variables: Variables,
}

fn point_trace(x: Vec<Datum>, y: Vec<Datum>) -> ScatterTrace {
    let mut trace = ScatterTrace::new(Mode::Markers, x, y);
    trace.marker = Some(Marker::outlined());
    trace
}

fn dedup_join(parts: Vec<String>) -> String {
    let mut seen: Vec<String> = Vec::with_capacity(parts.len());
    for p in parts {
        if !seen.contains(&p) {
            seen.push(p);
        }
    }
    seen.join(", ")
}

impl Figure {
    pub fn scatter(
        &mut self,
        x: impl IntoSeries,
        y: impl IntoSeries,
        spec: ScatterSpec<'_>,
    ) -> Result<()> {
        let x = x.into_series("x")?;
        let y = y.into_series("y")?;
        check_len("scatter y", x.len(), y.len())?;
        if let Some(f) = &spec.color {
            check_len("scatter color", x.len(), f.values.len())?;
        }
        if let Some(f) = &spec.style {
            check_len("scatter style", x.len(), f.values.len())?;
        }
        if let Some(f) = &spec.size {
            check_len("scatter size", x.len(), f.values.len())?;
        }

        if spec.color.is_some() || spec.style.is_some() {
            self.grouped_scatter(x, y, spec);
            return Ok(());
        }

        let mut trace = point_trace(x, y);
        if let (Some(size), Some(marker)) = (&spec.size, trace.marker.as_mut()) {
            marker.size = Some(OneOrMany::Many(style::point_sizes(
                size.mapper,
                &size.values,
            )));
        }
        self.push_trace(Trace::Scatter(trace));
        Ok(())
    }

    fn grouped_scatter(&mut self, x: Vec<Datum>, y: Vec<Datum>, spec: ScatterSpec<'_>) {
        let ScatterSpec {
            color,
            style: style_facet,
            size,
            variables,
        } = spec;
        self.layout_mut().showlegend = true;

        let groups = group_indices(
            x.len(),
            color.as_ref().map(|f| f.values.as_slice()),
            style_facet.as_ref().map(|f| f.values.as_slice()),
        );

        let mut legend_title: Vec<String> = Vec::new();
        for group in groups {
            let mut trace = point_trace(values_at(&x, &group.indices), values_at(&y, &group.indices));
            let mut marker = trace.marker.take().unwrap_or_else(Marker::outlined);

            if let Some(size) = &size {
                let keys = values_at(&size.values, &group.indices);
                marker.size = Some(OneOrMany::Many(style::point_sizes(size.mapper, &keys)));
            }

            let mut name: Vec<String> = Vec::new();
            if let (Some(key), Some(facet)) = (&group.key.color, &color) {
                marker.color = Some(OneOrMany::One(style::hex(facet.mapper, key)));
                name.push(key.to_string());
                legend_title.extend(variables.color.clone());
            }
            if let (Some(key), Some(facet)) = (&group.key.style, &style_facet) {
                marker.symbol = style::style(facet.mapper, key).marker;
                name.push(key.to_string());
                legend_title.extend(variables.style.clone());
            }

            if !name.is_empty() {
                trace.name = Some(dedup_join(name));
            }
            trace.marker = Some(marker);
            self.push_trace(Trace::Scatter(trace));
        }

        if !legend_title.is_empty() {
            self.layout_mut().set_legend_title(dedup_join(legend_title));
        }
    }
}
