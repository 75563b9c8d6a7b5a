/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/io/write_root_data.rs
 *
 * Authors: Jared Vann
 */

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use oxyroot::{RootFile, WriterTree};

use crate::error::root_error;
use crate::{format_elapsed, ColumnData, DataFrame, Result};

pub fn write_root_file<P: AsRef<Path>>(df: &DataFrame, path: P, tree: &str) -> Result<()> {
    let mut file = RootFile::create(path.as_ref()).map_err(root_error)?;
    let mut writer = WriterTree::new(tree);

    for column in df.columns() {
        let name = column.name.as_str();

        // Branch providers are consumed by the writer, so each gets its own copy
        match column.data.clone() {
            ColumnData::Bool(v) => writer.new_branch(name, v.into_iter()),
            ColumnData::I32(v) => writer.new_branch(name, v.into_iter()),
            ColumnData::I64(v) => writer.new_branch(name, v.into_iter()),
            ColumnData::U32(v) => writer.new_branch(name, v.into_iter()),
            ColumnData::U64(v) => writer.new_branch(name, v.into_iter()),
            ColumnData::F32(v) => writer.new_branch(name, v.into_iter()),
            ColumnData::F64(v) => writer.new_branch(name, v.into_iter()),
        }
    }

    writer.write(&mut file).map_err(root_error)?;
    file.close().map_err(root_error)?;

    Ok(())
}

pub fn export_dataframe_to_rootfile<P: AsRef<Path>>(df: &DataFrame, filename: &str, tree: &str, folder: P) -> Result<PathBuf> {
    println!("\nExporting the table to a ROOT file as: {}", filename);
    let start = Instant::now();

    let path = folder.as_ref().join(filename);
    write_root_file(df, &path, tree)?;

    println!("{}", format!("Table written to a ROOT file as: {}", filename).bold());
    println!("Exporting time: {}\n", format_elapsed(start.elapsed()));

    Ok(path)
}
