//! Lookup interfaces for color/size/style facets.
//!
//! The statistical side of a chart (palette selection, size normalization, marker assignment) is
//! owned by the caller; builders only need a lookup from a facet value to a display value. The
//! concrete mappers below are minimal ones for the CLI and tests.

use crate::color::{CATEGORY10, DEFAULT_LINE_COLOR, Rgba};
use crate::datum::Datum;
use indexmap::IndexSet;

pub trait ColorMapper {
    fn color(&self, key: &Datum) -> Rgba;
}

/// Returns a normalized size in `[0, 1]`.
pub trait SizeMapper {
    fn size(&self, key: &Datum) -> f64;
}

/// A resolved style: an optional marker symbol name and an optional dash pattern.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleSpec {
    pub marker: Option<String>,
    pub dashes: Option<Vec<f64>>,
}

pub trait StyleMapper {
    fn style(&self, key: &Datum) -> StyleSpec;
}

impl<F: Fn(&Datum) -> Rgba> ColorMapper for F {
    fn color(&self, key: &Datum) -> Rgba {
        self(key)
    }
}

impl<F: Fn(&Datum) -> f64> SizeMapper for F {
    fn size(&self, key: &Datum) -> f64 {
        self(key)
    }
}

impl<F: Fn(&Datum) -> StyleSpec> StyleMapper for F {
    fn style(&self, key: &Datum) -> StyleSpec {
        self(key)
    }
}

fn levels<'a>(values: impl IntoIterator<Item = &'a Datum>) -> IndexSet<Datum> {
    values.into_iter().cloned().collect()
}

/// Assigns palette entries to levels in first-seen order, cycling when the palette runs out.
#[derive(Debug, Clone)]
pub struct PaletteColorMapper {
    levels: IndexSet<Datum>,
    palette: Vec<Rgba>,
}

impl PaletteColorMapper {
    pub fn new(values: &[Datum]) -> Self {
        let palette = CATEGORY10
            .iter()
            .filter_map(|hex| hex.parse().ok())
            .collect();
        Self::with_palette(values, palette)
    }

    pub fn with_palette(values: &[Datum], palette: Vec<Rgba>) -> Self {
        Self {
            levels: levels(values),
            palette,
        }
    }
}

impl ColorMapper for PaletteColorMapper {
    fn color(&self, key: &Datum) -> Rgba {
        match (self.levels.get_index_of(key), self.palette.len()) {
            (Some(i), n) if n > 0 => self.palette[i % n],
            _ => DEFAULT_LINE_COLOR,
        }
    }
}

/// Min-max normalization over the numeric values of a facet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearSizeMapper {
    min: f64,
    max: f64,
}

impl LinearSizeMapper {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn from_series(values: &[Datum]) -> Self {
        let (min, max) = values
            .iter()
            .filter_map(Datum::as_f64)
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v), hi.max(v))
            });
        if min > max {
            return Self::new(0.0, 1.0);
        }
        Self::new(min, max)
    }
}

impl SizeMapper for LinearSizeMapper {
    fn size(&self, key: &Datum) -> f64 {
        let Some(v) = key.as_f64() else {
            return 0.0;
        };
        let span = self.max - self.min;
        if span <= 0.0 {
            return 0.5;
        }
        ((v - self.min) / span).clamp(0.0, 1.0)
    }
}

const MARKERS: [&str; 8] = [
    "circle",
    "x",
    "square",
    "cross",
    "diamond",
    "triangle-up",
    "triangle-down",
    "star",
];

/// Cycles marker symbols and dash patterns over levels in first-seen order.
#[derive(Debug, Clone)]
pub struct CycleStyleMapper {
    levels: IndexSet<Datum>,
    markers: bool,
    dashes: bool,
}

impl CycleStyleMapper {
    pub fn new(values: &[Datum]) -> Self {
        Self {
            levels: levels(values),
            markers: true,
            dashes: true,
        }
    }

    pub fn with_markers(mut self, markers: bool) -> Self {
        self.markers = markers;
        self
    }

    pub fn with_dashes(mut self, dashes: bool) -> Self {
        self.dashes = dashes;
        self
    }

    fn dash_for(i: usize) -> Vec<f64> {
        match i % 5 {
            0 => Vec::new(),
            1 => vec![4.0, 1.5],
            2 => vec![1.0, 1.0],
            3 => vec![3.0, 1.25, 1.5, 1.25],
            _ => vec![5.0, 1.0, 1.0, 1.0],
        }
    }
}

impl StyleMapper for CycleStyleMapper {
    fn style(&self, key: &Datum) -> StyleSpec {
        let Some(i) = self.levels.get_index_of(key) else {
            return StyleSpec::default();
        };
        StyleSpec {
            marker: self
                .markers
                .then(|| MARKERS[i % MARKERS.len()].to_string()),
            dashes: self.dashes.then(|| Self::dash_for(i)),
        }
    }
}
