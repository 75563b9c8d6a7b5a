/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/io/read_root_data.rs
 *
 * Authors: Jared Vann
 */

use std::cmp;
use std::convert::TryFrom;
use std::path::Path;
use std::time::Instant;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use oxyroot::{Branch, ReaderTree, RootFile};
use separator::Separatable as _;

use crate::error::root_error;
use crate::{format_elapsed, Column, ColumnData, DataFrame, Error, Result, PROGRESS_BAR_CHARS, PROGRESS_BAR_TEMPLATE};

type Values<'a, T> = Box<dyn Iterator<Item = T> + 'a>;

// Lazily decoded branch, handed out a window of entries at a time
enum BranchCursor<'a> {
    Bool(Values<'a, bool>),
    I32(Values<'a, i32>),
    I64(Values<'a, i64>),
    U32(Values<'a, u32>),
    U64(Values<'a, u64>),
    F32(Values<'a, f32>),
    F64(Values<'a, f64>),
}

impl<'a> BranchCursor<'a> {
    fn open(branch: &'a Branch) -> Result<BranchCursor<'a>> {
        let type_name = branch.item_type_name();

        let cursor = match type_name.as_str() {
            "bool" | "Bool_t" => BranchCursor::Bool(Box::new(branch.as_iter::<bool>().map_err(root_error)?)),
            // Narrow integers are widened, as in the HDF5 reader
            "int8_t" | "Char_t" => BranchCursor::I32(Box::new(branch.as_iter::<i8>().map_err(root_error)?.map(i32::from))),
            "int16_t" | "Short_t" => {
                BranchCursor::I32(Box::new(branch.as_iter::<i16>().map_err(root_error)?.map(i32::from)))
            }
            "uint8_t" | "UChar_t" => {
                BranchCursor::U32(Box::new(branch.as_iter::<u8>().map_err(root_error)?.map(u32::from)))
            }
            "uint16_t" | "UShort_t" => {
                BranchCursor::U32(Box::new(branch.as_iter::<u16>().map_err(root_error)?.map(u32::from)))
            }
            "int32_t" | "Int_t" => BranchCursor::I32(Box::new(branch.as_iter::<i32>().map_err(root_error)?)),
            "int64_t" | "Long64_t" => BranchCursor::I64(Box::new(branch.as_iter::<i64>().map_err(root_error)?)),
            "uint32_t" | "UInt_t" => BranchCursor::U32(Box::new(branch.as_iter::<u32>().map_err(root_error)?)),
            "uint64_t" | "ULong64_t" => BranchCursor::U64(Box::new(branch.as_iter::<u64>().map_err(root_error)?)),
            "float" | "Float_t" => BranchCursor::F32(Box::new(branch.as_iter::<f32>().map_err(root_error)?)),
            "double" | "Double_t" => BranchCursor::F64(Box::new(branch.as_iter::<f64>().map_err(root_error)?)),
            _ => {
                return Err(Error::UnsupportedType {
                    column: branch.name().to_owned(),
                    type_name,
                })
            }
        };

        Ok(cursor)
    }

    fn next_chunk(&mut self, n: usize) -> ColumnData {
        match self {
            BranchCursor::Bool(it) => ColumnData::Bool(it.by_ref().take(n).collect()),
            BranchCursor::I32(it) => ColumnData::I32(it.by_ref().take(n).collect()),
            BranchCursor::I64(it) => ColumnData::I64(it.by_ref().take(n).collect()),
            BranchCursor::U32(it) => ColumnData::U32(it.by_ref().take(n).collect()),
            BranchCursor::U64(it) => ColumnData::U64(it.by_ref().take(n).collect()),
            BranchCursor::F32(it) => ColumnData::F32(it.by_ref().take(n).collect()),
            BranchCursor::F64(it) => ColumnData::F64(it.by_ref().take(n).collect()),
        }
    }
}

fn branch_names(tree: &ReaderTree, columns: Option<&[&str]>) -> Vec<String> {
    match columns {
        Some(columns) => columns.iter().map(|c| (*c).to_owned()).collect(),
        None => tree.branches().map(|b| b.name().to_owned()).collect(),
    }
}

fn open_cursors<'a>(tree: &'a ReaderTree, names: &[String]) -> Result<Vec<BranchCursor<'a>>> {
    names
        .iter()
        .map(|name| {
            let branch = tree.branch(name).ok_or_else(|| Error::MissingColumn(name.clone()))?;
            BranchCursor::open(branch)
        })
        .collect()
}

fn read_window(names: &[String], cursors: &mut [BranchCursor], len: usize) -> Result<DataFrame> {
    let columns = names
        .iter()
        .zip(cursors.iter_mut())
        .map(|(name, cursor)| Column::new(name.as_str(), cursor.next_chunk(len)))
        .collect();

    DataFrame::new(columns)
}

pub fn load_root_file<P: AsRef<Path>>(rootfile: P, columns: Option<&[&str]>, tree: &str) -> Result<DataFrame> {
    let rootfile = rootfile.as_ref();

    println!("Loading the ROOT file: {}", rootfile.display());
    let start = Instant::now();

    let mut file = RootFile::open(rootfile).map_err(root_error)?;
    let tree = file.get_tree(tree).map_err(root_error)?;

    let names = branch_names(&tree, columns);
    let mut cursors = open_cursors(&tree, &names)?;
    let entries = usize::try_from(tree.entries()).unwrap_or(0);

    let df = read_window(&names, &mut cursors, entries)?;

    println!(
        "ROOT file imported as a table of {} rows in: {}",
        df.height().separated_string(),
        format_elapsed(start.elapsed())
    );

    Ok(df)
}

// Same rows as `load_root_file`, decoded `chunk_size` entries at a time
pub fn load_root_file_chunked<P: AsRef<Path>>(
    rootfile: P,
    columns: Option<&[&str]>,
    tree: &str,
    chunk_size: usize,
) -> Result<DataFrame> {
    if chunk_size == 0 {
        return Err(Error::InvalidChunkSize);
    }

    let rootfile = rootfile.as_ref();

    println!("Loading the ROOT file: {}", rootfile.display());
    let start = Instant::now();

    let mut file = RootFile::open(rootfile).map_err(root_error)?;
    let tree = file.get_tree(tree).map_err(root_error)?;

    let names = branch_names(&tree, columns);
    let mut cursors = open_cursors(&tree, &names)?;
    let entries = usize::try_from(tree.entries()).unwrap_or(0);

    let n_chunks = if entries == 0 { 0 } else { (entries - 1) / chunk_size + 1 };

    let progress_bar = ProgressBar::new(n_chunks as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(PROGRESS_BAR_TEMPLATE)
            .progress_chars(PROGRESS_BAR_CHARS),
    );
    progress_bar.set_message(&format!("| {} Entries | {}", entries.separated_string(), rootfile.display()));

    let mut fragments = Vec::with_capacity(cmp::max(n_chunks, 1));

    for offset in (0..entries).step_by(chunk_size) {
        let len = cmp::min(chunk_size, entries - offset);
        fragments.push(read_window(&names, &mut cursors, len)?);
        progress_bar.inc(1);
    }

    // An empty tree still yields its (empty) columns
    if fragments.is_empty() {
        fragments.push(read_window(&names, &mut cursors, 0)?);
    }

    progress_bar.finish_with_message(&format!("| Done | {} Chunks", n_chunks.separated_string()));

    let df = DataFrame::concat(fragments)?;

    if df.height() != entries {
        println!(
            "{}",
            format!("WARNING: Read {} rows but the tree reports {} entries!", df.height(), entries).yellow()
        );
    }

    println!(
        "ROOT file imported as a table of {} rows in: {}",
        df.height().separated_string(),
        format_elapsed(start.elapsed())
    );

    Ok(df)
}
