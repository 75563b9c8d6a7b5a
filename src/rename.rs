/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/rename.rs
 *
 * Authors: Jared Vann
 */

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

use lazy_static::lazy_static;

use crate::{Column, DataFrame, Result};

lazy_static! {
    /// Labels of the reconstruction HDF5 tables mapped onto the names used by the ROOT trees.
    pub static ref DEFAULT_RENAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("RunID", "run_id");
        m.insert("EventID", "frame_index");
        m.insert("TrigCount", "event_counter_trigger");
        m
    };
}

/// Returns a copy of `frame` with every column found in `map` relabelled.
pub fn rename_columns<K, V>(frame: &DataFrame, map: &HashMap<K, V>) -> Result<DataFrame>
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
{
    let columns = frame
        .columns()
        .iter()
        .map(|c| match map.get(c.name.as_str()) {
            Some(new_name) => Column::new(new_name.as_ref(), c.data.clone()),
            None => c.clone(),
        })
        .collect();

    DataFrame::new(columns)
}

pub fn rename_h5_columns(frame: &DataFrame) -> Result<DataFrame> {
    rename_columns(frame, &*DEFAULT_RENAMES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ColumnData, Error};

    fn reco() -> DataFrame {
        DataFrame::new(vec![
            Column::new("RunID", ColumnData::U32(vec![7, 7])),
            Column::new("EventID", ColumnData::U64(vec![100, 101])),
            Column::new("TrigCount", ColumnData::I64(vec![3, 4])),
            Column::new("energy", ColumnData::F32(vec![1.5, 2.5])),
        ])
        .unwrap()
    }

    #[test]
    fn default_map_relabels_only_known_columns() {
        let renamed = rename_h5_columns(&reco()).unwrap();

        assert_eq!(renamed.column_names(), vec!["run_id", "frame_index", "event_counter_trigger", "energy"]);
        assert_eq!(renamed.column("frame_index").unwrap().data, ColumnData::U64(vec![100, 101]));
        assert_eq!(renamed.column("energy").unwrap().data, ColumnData::F32(vec![1.5, 2.5]));
    }

    #[test]
    fn unmatched_map_is_identity() {
        let mut map = HashMap::new();
        map.insert("zenith".to_owned(), "cos_zenith".to_owned());

        assert_eq!(rename_columns(&reco(), &map).unwrap(), reco());
    }

    #[test]
    fn colliding_rename_is_rejected() {
        let mut map = HashMap::new();
        map.insert("RunID", "energy");

        assert!(matches!(rename_columns(&reco(), &map), Err(Error::DuplicateColumn(name)) if name == "energy"));
    }
}
