/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/io/read_hdf5_data.rs
 *
 * Authors: Jared Vann
 */

use std::path::Path;
use std::time::Instant;

use hdf5::types::{FloatSize, IntSize, TypeDescriptor, VarLenUnicode};
use hdf5::Dataset;
use indicatif::{ProgressBar, ProgressStyle};
use separator::Separatable as _;

use crate::{
    apply_cuts, format_elapsed, Column, ColumnData, Cut, DataFrame, Error, Result, HDF5_EXTENSION, HDF5_KEY,
    PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE,
};

// Attribute on the table group listing the column datasets in order
pub(crate) const COLUMNS_ATTR: &str = "columns";

fn read_dataset(dataset: &Dataset, name: &str) -> Result<ColumnData> {
    let descriptor = dataset.dtype()?.to_descriptor()?;

    let data = match descriptor {
        TypeDescriptor::Boolean => ColumnData::Bool(dataset.read_raw()?),
        // Narrow integers are widened on read
        TypeDescriptor::Integer(IntSize::U1) => {
            ColumnData::I32(dataset.read_raw::<i8>()?.into_iter().map(i32::from).collect())
        }
        TypeDescriptor::Integer(IntSize::U2) => {
            ColumnData::I32(dataset.read_raw::<i16>()?.into_iter().map(i32::from).collect())
        }
        TypeDescriptor::Integer(IntSize::U4) => ColumnData::I32(dataset.read_raw()?),
        TypeDescriptor::Integer(IntSize::U8) => ColumnData::I64(dataset.read_raw()?),
        TypeDescriptor::Unsigned(IntSize::U1) => {
            ColumnData::U32(dataset.read_raw::<u8>()?.into_iter().map(u32::from).collect())
        }
        TypeDescriptor::Unsigned(IntSize::U2) => {
            ColumnData::U32(dataset.read_raw::<u16>()?.into_iter().map(u32::from).collect())
        }
        TypeDescriptor::Unsigned(IntSize::U4) => ColumnData::U32(dataset.read_raw()?),
        TypeDescriptor::Unsigned(IntSize::U8) => ColumnData::U64(dataset.read_raw()?),
        TypeDescriptor::Float(FloatSize::U4) => ColumnData::F32(dataset.read_raw()?),
        TypeDescriptor::Float(FloatSize::U8) => ColumnData::F64(dataset.read_raw()?),
        other => {
            return Err(Error::UnsupportedType {
                column: name.to_owned(),
                type_name: format!("{:?}", other),
            })
        }
    };

    Ok(data)
}

pub fn read_hdf5_file<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
    let file = hdf5::File::open(path)?;
    let group = file.group(HDF5_KEY)?;

    let names = group.attr(COLUMNS_ATTR)?.read_raw::<VarLenUnicode>()?;

    let mut columns = Vec::with_capacity(names.len());

    for name in &names {
        let dataset = group.dataset(name.as_str())?;
        columns.push(Column::new(name.as_str(), read_dataset(&dataset, name.as_str())?));
    }

    DataFrame::new(columns)
}

// Names without the .hdf5 extension are skipped
pub fn load_dataframes<S, P>(filelist: &[S], cuts: &[Cut], folder_path: P) -> Result<DataFrame>
where
    S: AsRef<str>,
    P: AsRef<Path>,
{
    let folder_path = folder_path.as_ref();
    let start = Instant::now();

    let progress_bar = ProgressBar::new(filelist.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .progress_chars(PROGRESS_BAR_CHARS),
    );

    let mut dfs = Vec::new();
    let mut rows_loaded = 0;

    for file in filelist {
        let file = file.as_ref();

        if file.ends_with(HDF5_EXTENSION) {
            progress_bar.set_message(&format!("| {} Rows Kept | {}", rows_loaded.separated_string(), file));

            let df = read_hdf5_file(folder_path.join(file))?;
            let df = apply_cuts(df, cuts)?;

            rows_loaded += df.height();
            dfs.push(df);
        }

        progress_bar.inc(1);
    }

    progress_bar.finish_with_message(&format!("| Done | {} Rows Kept", rows_loaded.separated_string()));

    let df_final = DataFrame::concat(dfs)?;

    println!("Loading time: {}\n", format_elapsed(start.elapsed()));

    Ok(df_final)
}
