/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/cuts.rs
 *
 * Authors: Jared Vann
 */

use std::cmp::Ordering;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

use crate::{ColumnData, DataFrame, Error, Result, Value};

#[derive(Clone, Copy, Debug, Deserialize, Serialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum CutKind {
    Greater,
    Less,
    Equal,
}

impl CutKind {
    fn accepts(self, ordering: Ordering) -> bool {
        match self {
            CutKind::Greater => ordering == Ordering::Greater,
            CutKind::Less => ordering == Ordering::Less,
            CutKind::Equal => ordering == Ordering::Equal,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            CutKind::Greater => ">",
            CutKind::Less => "<",
            CutKind::Equal => "==",
        }
    }
}

impl FromStr for CutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<CutKind> {
        match s {
            "greater" | ">" => Ok(CutKind::Greater),
            "less" | "<" => Ok(CutKind::Less),
            "equal" | "==" | "=" => Ok(CutKind::Equal),
            other => Err(Error::InvalidCutKind(other.to_owned())),
        }
    }
}

/// Row filter `key <kind> value` over a single column.
///
/// The field aliases accept cut lists written with the `cut_key`,
/// `cut_value` and `cut_type` names used by the analysis scripts.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Cut {
    #[serde(alias = "cut_key")]
    pub key: String,
    #[serde(alias = "cut_value")]
    pub value: Value,
    #[serde(alias = "cut_type")]
    pub kind: CutKind,
}

impl Cut {
    pub fn new<S: Into<String>>(key: S, kind: CutKind, value: Value) -> Cut {
        Cut {
            key: key.into(),
            value,
            kind,
        }
    }

    pub fn mask(&self, frame: &DataFrame) -> Result<BitVec> {
        let column = frame.column(&self.key)?;
        let kind = self.kind;

        let mask = match (&column.data, self.value) {
            (ColumnData::Bool(v), Value::Bool(b)) => build_mask(v, kind, |x| Some(x.cmp(&b))),
            (ColumnData::Bool(_), _) | (_, Value::Bool(_)) => {
                return Err(Error::TypeMismatch {
                    column: self.key.clone(),
                    type_name: column.data.type_name(),
                    value: self.value,
                })
            }
            // Integer against integer compares exactly
            (ColumnData::I32(v), Value::Int(n)) => build_mask(v, kind, |x| Some(i64::from(*x).cmp(&n))),
            (ColumnData::I64(v), Value::Int(n)) => build_mask(v, kind, |x| Some(x.cmp(&n))),
            (ColumnData::U32(v), Value::Int(n)) => build_mask(v, kind, |x| Some(i64::from(*x).cmp(&n))),
            (ColumnData::U64(v), Value::Int(n)) => build_mask(v, kind, |x| Some(i128::from(*x).cmp(&i128::from(n)))),
            // Anything involving a float compares as f64, NaN never passes
            (ColumnData::I32(v), value) => float_mask(v, kind, value, |x| f64::from(*x)),
            (ColumnData::I64(v), value) => float_mask(v, kind, value, |x| *x as f64),
            (ColumnData::U32(v), value) => float_mask(v, kind, value, |x| f64::from(*x)),
            (ColumnData::U64(v), value) => float_mask(v, kind, value, |x| *x as f64),
            (ColumnData::F32(v), value) => float_mask(v, kind, value, |x| f64::from(*x)),
            (ColumnData::F64(v), value) => float_mask(v, kind, value, |x| *x),
        };

        Ok(mask)
    }

    pub fn apply(&self, frame: &DataFrame) -> Result<DataFrame> {
        frame.filter(&self.mask(frame)?)
    }
}

fn build_mask<T, F>(values: &[T], kind: CutKind, compare: F) -> BitVec
where
    F: Fn(&T) -> Option<Ordering>,
{
    let mut mask = BitVec::from_elem(values.len(), false);

    for (i, x) in values.iter().enumerate() {
        if compare(x).map_or(false, |o| kind.accepts(o)) {
            mask.set(i, true);
        }
    }

    mask
}

fn float_mask<T, F>(values: &[T], kind: CutKind, value: Value, widen: F) -> BitVec
where
    F: Fn(&T) -> f64,
{
    // Bool values were rejected before reaching here
    let target = value.as_f64().unwrap_or(f64::NAN);
    build_mask(values, kind, |x| widen(x).partial_cmp(&target))
}

impl fmt::Display for Cut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.key, self.kind.symbol(), self.value)
    }
}

impl FromStr for Cut {
    type Err = Error;

    /// Parses `key>value`, `key<value` or `key==value`.
    fn from_str(s: &str) -> Result<Cut> {
        if s.contains("!=") {
            return Err(Error::InvalidCutKind("!=".to_owned()));
        }

        let (pos, op) = ["==", ">", "<", "="]
            .iter()
            .filter_map(|op| s.find(op).map(|pos| (pos, *op)))
            .min_by_key(|(pos, _)| *pos)
            .ok_or_else(|| Error::InvalidCut(s.to_owned()))?;

        let key = s[..pos].trim();
        let value = s[pos + op.len()..].trim();

        if key.is_empty() || value.is_empty() {
            return Err(Error::InvalidCut(s.to_owned()));
        }

        Ok(Cut::new(key, op.parse()?, value.parse()?))
    }
}

pub fn apply_cuts(frame: DataFrame, cuts: &[Cut]) -> Result<DataFrame> {
    let mut frame = frame;

    for cut in cuts {
        frame = cut.apply(&frame)?;
    }

    Ok(frame)
}

/// A cut list as stored in a TOML file:
///
/// ```toml
/// [[cuts]]
/// key = "energy"
/// value = 10.0
/// kind = "greater"
/// ```
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct CutList {
    #[serde(default)]
    pub cuts: Vec<Cut>,
}

impl CutList {
    pub fn from_toml(string: &str) -> Result<CutList> {
        Ok(toml::from_str(string)?)
    }

    pub fn read<P: AsRef<Path>>(path: P) -> Result<CutList> {
        CutList::from_toml(&fs::read_to_string(path)?)
    }
}
