#![forbid(unsafe_code)]

//! Plotly-style chart documents (headless, no I/O).
//!
//! A [`Figure`] accumulates traces and one layout record through draw calls
//! ([`Figure::bar`], [`Figure::box_plot`], [`Figure::scatter`], [`Figure::line`], ...) and
//! serializes to the `{traces, layout}` document consumed by the visualization library.
//!
//! Facet values (color, size, style) are resolved through caller-supplied mappers; see
//! [`mapper`].

pub mod color;
pub mod datum;
pub mod error;
pub mod figure;
pub mod grouping;
pub mod layout;
pub mod mapper;
pub mod plot;
pub mod style;
pub mod trace;

pub use color::Rgba;
pub use datum::{Datum, IntoSeries};
pub use error::{Error, Result};
pub use figure::{Document, Figure};
pub use layout::{Axis, AxisId, Layout};
pub use mapper::{ColorMapper, SizeMapper, StyleMapper, StyleSpec};
pub use plot::{
    BarSpec, BoxPlotSpec, BoxStyle, CiStyle, ConfidenceInterval, Facet, GroupedBoxPlotSpec,
    LegendVerbosity, LineSpec, ScatterSpec, Series, SeriesChart, SeriesKind, Variables,
};
pub use trace::{Orientation, Trace};
