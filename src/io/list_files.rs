/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/io/list_files.rs
 *
 * Authors: Jared Vann
 */

use std::path::{Path, PathBuf};

use glob::glob;

use crate::Result;

pub fn list_files_with_pattern<P: AsRef<Path>>(directory: P, pattern: &str) -> Result<Vec<PathBuf>> {
    let full_pattern = directory.as_ref().join(pattern);

    let files = glob(&full_pattern.to_string_lossy())?.collect::<std::result::Result<Vec<_>, _>>()?;

    println!("Number of files found: {}", files.len());
    println!("{:?}", files);

    Ok(files)
}
