//! Normalization of facet lookups into document primitives.

use crate::color::Rgba;
use crate::datum::Datum;
use crate::mapper::{ColorMapper, SizeMapper, StyleMapper, StyleSpec};

const POINT_SIZE_MIN: f64 = 6.0;
const POINT_SIZE_MAX: f64 = 12.0;

pub fn hex(mapper: &dyn ColorMapper, key: &Datum) -> String {
    mapper.color(key).to_hex_string()
}

pub fn color(mapper: &dyn ColorMapper, key: &Datum) -> Rgba {
    mapper.color(key)
}

/// Maps a normalized size onto the `[6, 12]` marker size range.
pub fn scale_point_size(normalized: f64) -> f64 {
    POINT_SIZE_MIN + normalized * (POINT_SIZE_MAX - POINT_SIZE_MIN)
}

pub fn point_sizes(mapper: &dyn SizeMapper, keys: &[Datum]) -> Vec<f64> {
    keys.iter()
        .map(|k| scale_point_size(mapper.size(k)))
        .collect()
}

pub fn line_width(mapper: &dyn SizeMapper, key: &Datum) -> f64 {
    2.0 + 2.0 * mapper.size(key)
}

pub fn style(mapper: &dyn StyleMapper, key: &Datum) -> StyleSpec {
    mapper.style(key)
}

/// Dash lengths become a CSS-like `"4px,1.5px"` list; an empty pattern is a solid line.
pub fn dash_pattern(dashes: &[f64]) -> String {
    if dashes.is_empty() {
        return "solid".to_string();
    }
    dashes
        .iter()
        .map(|d| format!("{d}px"))
        .collect::<Vec<_>>()
        .join(",")
}
