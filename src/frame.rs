/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/frame.rs
 *
 * Authors: Jared Vann
 */

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// Runs `$body` against the vector inside any variant, binding it to `$v`
macro_rules! with_values {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ColumnData::Bool($v) => $body,
            ColumnData::I32($v) => $body,
            ColumnData::I64($v) => $body,
            ColumnData::U32($v) => $body,
            ColumnData::U64($v) => $body,
            ColumnData::F32($v) => $body,
            ColumnData::F64($v) => $body,
        }
    };
}

// Same as `with_values!` but wraps the result back into the same variant
macro_rules! map_values {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ColumnData::Bool($v) => ColumnData::Bool($body),
            ColumnData::I32($v) => ColumnData::I32($body),
            ColumnData::I64($v) => ColumnData::I64($body),
            ColumnData::U32($v) => ColumnData::U32($body),
            ColumnData::U64($v) => ColumnData::U64($body),
            ColumnData::F32($v) => ColumnData::F32($body),
            ColumnData::F64($v) => ColumnData::F64($body),
        }
    };
}

/// A scalar used on the right hand side of a cut.
#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
}

impl Value {
    pub fn as_f64(self) -> Option<f64> {
        match self {
            Value::Bool(_) => None,
            Value::Int(n) => Some(n as f64),
            Value::Float(x) => Some(x),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
        }
    }
}

impl FromStr for Value {
    type Err = Error;

    fn from_str(s: &str) -> Result<Value> {
        let s = s.trim();

        match s {
            "true" | "True" => return Ok(Value::Bool(true)),
            "false" | "False" => return Ok(Value::Bool(false)),
            _ => {}
        }

        if let Ok(n) = s.parse::<i64>() {
            Ok(Value::Int(n))
        } else if let Ok(x) = s.parse::<f64>() {
            Ok(Value::Float(x))
        } else {
            Err(Error::InvalidCut(s.to_owned()))
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    I32(Vec<i32>),
    I64(Vec<i64>),
    U32(Vec<u32>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            ColumnData::Bool(_) => "bool",
            ColumnData::I32(_) => "i32",
            ColumnData::I64(_) => "i64",
            ColumnData::U32(_) => "u32",
            ColumnData::U64(_) => "u64",
            ColumnData::F32(_) => "f32",
            ColumnData::F64(_) => "f64",
        }
    }

    pub fn filter(&self, mask: &BitVec) -> ColumnData {
        map_values!(self, v => v.iter().zip(mask.iter()).filter(|(_, keep)| *keep).map(|(x, _)| *x).collect())
    }

    fn append(&mut self, other: &ColumnData) -> bool {
        match (self, other) {
            (ColumnData::Bool(a), ColumnData::Bool(b)) => a.extend_from_slice(b),
            (ColumnData::I32(a), ColumnData::I32(b)) => a.extend_from_slice(b),
            (ColumnData::I64(a), ColumnData::I64(b)) => a.extend_from_slice(b),
            (ColumnData::U32(a), ColumnData::U32(b)) => a.extend_from_slice(b),
            (ColumnData::U64(a), ColumnData::U64(b)) => a.extend_from_slice(b),
            (ColumnData::F32(a), ColumnData::F32(b)) => a.extend_from_slice(b),
            (ColumnData::F64(a), ColumnData::F64(b)) => a.extend_from_slice(b),
            _ => return false,
        }

        true
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn new<S: Into<String>>(name: S, data: ColumnData) -> Column {
        Column { name: name.into(), data }
    }
}

/// An ordered set of equal-length, uniquely named columns.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataFrame {
    columns: Vec<Column>,
}

impl DataFrame {
    pub fn new(columns: Vec<Column>) -> Result<DataFrame> {
        let mut seen = HashSet::new();

        for column in &columns {
            if !seen.insert(column.name.as_str()) {
                return Err(Error::DuplicateColumn(column.name.clone()));
            }
        }

        if let Some(first) = columns.first() {
            let expected = first.data.len();

            for column in &columns {
                if column.data.len() != expected {
                    return Err(Error::LengthMismatch {
                        column: column.name.clone(),
                        expected,
                        found: column.data.len(),
                    });
                }
            }
        }

        Ok(DataFrame { columns })
    }

    pub fn height(&self) -> usize {
        self.columns.first().map_or(0, |c| c.data.len())
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| Error::MissingColumn(name.to_owned()))
    }

    pub fn select(&self, names: &[&str]) -> Result<DataFrame> {
        let columns = names.iter().map(|name| self.column(name).map(Column::clone)).collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    pub fn filter(&self, mask: &BitVec) -> Result<DataFrame> {
        if mask.len() != self.height() {
            return Err(Error::LengthMismatch {
                column: "<row mask>".to_owned(),
                expected: self.height(),
                found: mask.len(),
            });
        }

        let columns = self
            .columns
            .iter()
            .map(|c| Column::new(c.name.clone(), c.data.filter(mask)))
            .collect();

        Ok(DataFrame { columns })
    }

    // Columns are matched by name; the first table's column order is kept
    pub fn concat(frames: Vec<DataFrame>) -> Result<DataFrame> {
        let mut frames = frames.into_iter();
        let mut result = frames.next().ok_or(Error::NoFrames)?;

        for frame in frames {
            if frame.width() != result.width() {
                return Err(Error::SchemaMismatch(format!(
                    "expected {} columns, found {}",
                    result.width(),
                    frame.width()
                )));
            }

            for column in result.columns.iter_mut() {
                let other = frame.column(&column.name)?;

                if !column.data.append(&other.data) {
                    return Err(Error::SchemaMismatch(format!(
                        "column '{}' is {} in one table and {} in another",
                        column.name,
                        column.data.type_name(),
                        other.data.type_name()
                    )));
                }
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new("RunID", ColumnData::U32(vec![1, 1, 2])),
            Column::new("energy", ColumnData::F64(vec![5.0, 15.0, 25.0])),
        ])
        .unwrap()
    }

    #[test]
    fn rejects_ragged_columns() {
        let err = DataFrame::new(vec![
            Column::new("a", ColumnData::I32(vec![1, 2])),
            Column::new("b", ColumnData::I32(vec![1])),
        ])
        .unwrap_err();

        match err {
            Error::LengthMismatch { column, expected, found } => {
                assert_eq!(column, "b");
                assert_eq!(expected, 2);
                assert_eq!(found, 1);
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = DataFrame::new(vec![
            Column::new("a", ColumnData::I32(vec![1])),
            Column::new("a", ColumnData::F64(vec![1.0])),
        ])
        .unwrap_err();

        assert!(matches!(err, Error::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn filter_keeps_masked_rows() {
        let mut mask = BitVec::from_elem(3, false);
        mask.set(0, true);
        mask.set(2, true);

        let filtered = sample().filter(&mask).unwrap();

        assert_eq!(filtered.height(), 2);
        assert_eq!(filtered.column("RunID").unwrap().data, ColumnData::U32(vec![1, 2]));
        assert_eq!(filtered.column("energy").unwrap().data, ColumnData::F64(vec![5.0, 25.0]));
    }

    #[test]
    fn filter_can_drop_every_row() {
        let filtered = sample().filter(&BitVec::from_elem(3, false)).unwrap();

        assert_eq!(filtered.height(), 0);
        assert_eq!(filtered.column_names(), vec!["RunID", "energy"]);
        assert!(filtered.columns().iter().all(|c| c.data.is_empty()));
    }

    #[test]
    fn filter_rejects_wrong_mask_length() {
        let mask = BitVec::from_elem(2, true);
        assert!(sample().filter(&mask).is_err());
    }

    #[test]
    fn concat_matches_columns_by_name() {
        let other = DataFrame::new(vec![
            Column::new("energy", ColumnData::F64(vec![35.0])),
            Column::new("RunID", ColumnData::U32(vec![3])),
        ])
        .unwrap();

        let stacked = DataFrame::concat(vec![sample(), other]).unwrap();

        assert_eq!(stacked.column_names(), vec!["RunID", "energy"]);
        assert_eq!(stacked.column("RunID").unwrap().data, ColumnData::U32(vec![1, 1, 2, 3]));
        assert_eq!(stacked.column("energy").unwrap().data, ColumnData::F64(vec![5.0, 15.0, 25.0, 35.0]));
    }

    #[test]
    fn concat_rejects_type_changes() {
        let other = DataFrame::new(vec![
            Column::new("RunID", ColumnData::I64(vec![3])),
            Column::new("energy", ColumnData::F64(vec![35.0])),
        ])
        .unwrap();

        assert!(matches!(DataFrame::concat(vec![sample(), other]), Err(Error::SchemaMismatch(_))));
    }

    #[test]
    fn concat_of_nothing_fails() {
        assert!(matches!(DataFrame::concat(Vec::new()), Err(Error::NoFrames)));
    }

    #[test]
    fn select_reorders_columns() {
        let selected = sample().select(&["energy"]).unwrap();
        assert_eq!(selected.column_names(), vec!["energy"]);
        assert!(matches!(sample().select(&["missing"]), Err(Error::MissingColumn(_))));
    }

    #[test]
    fn parses_values() {
        assert_eq!("10".parse::<Value>().unwrap(), Value::Int(10));
        assert_eq!("-0.5".parse::<Value>().unwrap(), Value::Float(-0.5));
        assert_eq!("1e3".parse::<Value>().unwrap(), Value::Float(1000.0));
        assert_eq!(" true ".parse::<Value>().unwrap(), Value::Bool(true));
        assert!("abc".parse::<Value>().is_err());
    }
}
