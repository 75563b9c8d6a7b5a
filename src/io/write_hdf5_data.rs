/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/io/write_hdf5_data.rs
 *
 * Authors: Jared Vann
 */

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use hdf5::types::VarLenUnicode;
use hdf5::{Group, H5Type};

use super::read_hdf5_data::COLUMNS_ATTR;
use crate::{format_elapsed, ColumnData, DataFrame, Error, Result, HDF5_KEY};

fn write_values<T: H5Type>(group: &Group, name: &str, values: &[T]) -> Result<()> {
    group.new_dataset::<T>().shape(values.len()).create(name)?.write_raw(values)?;
    Ok(())
}

pub fn write_hdf5_file<P: AsRef<Path>>(df: &DataFrame, path: P) -> Result<()> {
    let file = hdf5::File::create(path)?;
    let group = file.create_group(HDF5_KEY)?;

    let mut names = Vec::with_capacity(df.width());

    for column in df.columns() {
        let name = &column.name;

        if name.is_empty() || name.contains('/') || name == "." {
            return Err(Error::InvalidColumnName(name.clone()));
        }

        match &column.data {
            ColumnData::Bool(v) => write_values(&group, name, v)?,
            ColumnData::I32(v) => write_values(&group, name, v)?,
            ColumnData::I64(v) => write_values(&group, name, v)?,
            ColumnData::U32(v) => write_values(&group, name, v)?,
            ColumnData::U64(v) => write_values(&group, name, v)?,
            ColumnData::F32(v) => write_values(&group, name, v)?,
            ColumnData::F64(v) => write_values(&group, name, v)?,
        }

        names.push(name.parse::<VarLenUnicode>().map_err(|_| Error::InvalidColumnName(name.clone()))?);
    }

    group
        .new_attr::<VarLenUnicode>()
        .shape(names.len())
        .create(COLUMNS_ATTR)?
        .write_raw(&names)?;

    Ok(())
}

pub fn save_to_hdf5<P: AsRef<Path>>(df: &DataFrame, filename: &str, folder: P) -> Result<PathBuf> {
    println!("Exporting the table to an HDF5 file as: {}", filename);
    let start = Instant::now();

    let path = folder.as_ref().join(filename);
    write_hdf5_file(df, &path)?;

    println!("{}", format!("Table written to an HDF5 file as: {}", filename).bold());
    println!("Exporting time: {}\n", format_elapsed(start.elapsed()));

    Ok(path)
}
