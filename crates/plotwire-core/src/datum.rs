//! Scalar values carried by trace geometry and facet vectors.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One element of an `x`/`y` sequence or of a facet vector.
///
/// Serializes as a bare JSON number, string or `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Datum {
    Number(f64),
    Label(String),
    Missing,
}

impl Datum {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Datum::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_label(&self) -> Option<&str> {
        match self {
            Datum::Label(s) => Some(s.as_str()),
            _ => None,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Null => Some(Datum::Missing),
            Value::Number(n) => n.as_f64().map(Datum::Number),
            Value::String(s) => Some(Datum::Label(s.clone())),
            Value::Bool(b) => Some(Datum::Label(b.to_string())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }

    // -0.0 and every NaN payload collapse to a single key.
    fn number_bits(n: f64) -> u64 {
        if n == 0.0 {
            0
        } else if n.is_nan() {
            f64::NAN.to_bits()
        } else {
            n.to_bits()
        }
    }
}

impl PartialEq for Datum {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Datum::Number(a), Datum::Number(b)) => {
                Self::number_bits(*a) == Self::number_bits(*b)
            }
            (Datum::Label(a), Datum::Label(b)) => a == b,
            (Datum::Missing, Datum::Missing) => true,
            _ => false,
        }
    }
}

impl Eq for Datum {}

impl Hash for Datum {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Datum::Number(n) => Self::number_bits(*n).hash(state),
            Datum::Label(s) => s.hash(state),
            Datum::Missing => {}
        }
    }
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Datum::Number(n) => write!(f, "{n}"),
            Datum::Label(s) => f.write_str(s),
            Datum::Missing => f.write_str("null"),
        }
    }
}

impl From<f64> for Datum {
    fn from(value: f64) -> Self {
        Datum::Number(value)
    }
}

impl From<i64> for Datum {
    fn from(value: i64) -> Self {
        Datum::Number(value as f64)
    }
}

impl From<&str> for Datum {
    fn from(value: &str) -> Self {
        Datum::Label(value.to_string())
    }
}

impl From<String> for Datum {
    fn from(value: String) -> Self {
        Datum::Label(value)
    }
}

/// Conversion of caller data into a flat `Datum` sequence.
///
/// Typed Rust vectors always convert. JSON input only converts when it is an array of scalars;
/// the error names the argument the data was passed as (`x`, `y`, `color`, ...).
pub trait IntoSeries {
    fn into_series(self, argument: &'static str) -> Result<Vec<Datum>>;
}

impl IntoSeries for Vec<Datum> {
    fn into_series(self, _argument: &'static str) -> Result<Vec<Datum>> {
        Ok(self)
    }
}

impl IntoSeries for &[Datum] {
    fn into_series(self, _argument: &'static str) -> Result<Vec<Datum>> {
        Ok(self.to_vec())
    }
}

impl IntoSeries for Vec<f64> {
    fn into_series(self, _argument: &'static str) -> Result<Vec<Datum>> {
        Ok(self.into_iter().map(Datum::Number).collect())
    }
}

impl IntoSeries for &[f64] {
    fn into_series(self, _argument: &'static str) -> Result<Vec<Datum>> {
        Ok(self.iter().copied().map(Datum::Number).collect())
    }
}

impl IntoSeries for Vec<String> {
    fn into_series(self, _argument: &'static str) -> Result<Vec<Datum>> {
        Ok(self.into_iter().map(Datum::Label).collect())
    }
}

impl IntoSeries for Vec<&str> {
    fn into_series(self, _argument: &'static str) -> Result<Vec<Datum>> {
        Ok(self.into_iter().map(Datum::from).collect())
    }
}

impl IntoSeries for &Value {
    fn into_series(self, argument: &'static str) -> Result<Vec<Datum>> {
        let invalid = || Error::InvalidSeries {
            argument,
            value: self.to_string(),
        };
        let Value::Array(items) = self else {
            return Err(invalid());
        };
        items
            .iter()
            .map(|v| Datum::from_json(v).ok_or_else(invalid))
            .collect()
    }
}

impl IntoSeries for Value {
    fn into_series(self, argument: &'static str) -> Result<Vec<Datum>> {
        (&self).into_series(argument)
    }
}

/// Reads a series as numbers, failing on the first label or missing value.
pub fn numeric(series: &[Datum], argument: &'static str) -> Result<Vec<f64>> {
    series
        .iter()
        .enumerate()
        .map(|(index, d)| d.as_f64().ok_or(Error::NonNumeric { argument, index }))
        .collect()
}
