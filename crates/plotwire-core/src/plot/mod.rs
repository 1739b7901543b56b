//! Draw calls against a [`Figure`](crate::Figure).
//!
//! Each builder validates its whole input before touching the figure, so a failing call appends
//! nothing and leaves the layout as it was.

mod axes;
mod bar;
mod boxplot;
mod line;
mod scatter;
mod series;

pub use axes::LegendVerbosity;
pub use bar::BarSpec;
pub use boxplot::{BoxPlotSpec, BoxStyle, GroupedBoxPlotSpec};
pub use line::{CiStyle, ConfidenceInterval, LineSpec};
pub use scatter::{Facet, ScatterSpec, Variables};
pub use series::{Series, SeriesChart, SeriesKind};

use crate::datum::Datum;
use crate::{Error, Result};

fn check_len(what: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(Error::LengthMismatch {
            what,
            expected,
            actual,
        })
    }
}

fn numbers(values: &[f64]) -> Vec<Datum> {
    values.iter().copied().map(Datum::Number).collect()
}

fn labels(values: &[String]) -> Vec<Datum> {
    values.iter().cloned().map(Datum::Label).collect()
}
