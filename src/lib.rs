/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/lib.rs
 *
 * Authors: Jared Vann
 */

use std::time::Duration;

use num_traits::Num;

mod cuts;
pub use cuts::{apply_cuts, Cut, CutKind, CutList};

mod error;
pub use error::{Error, Result};

mod frame;
pub use frame::{Column, ColumnData, DataFrame, Value};

mod io;
pub use io::*;

mod rename;
pub use rename::{rename_columns, rename_h5_columns, DEFAULT_RENAMES};

pub const DEFAULT_TREE: &str = "sel";

pub const DEFAULT_CHUNK_SIZE: usize = 100_000;

pub const HDF5_KEY: &str = "df";

pub const HDF5_EXTENSION: &str = ".hdf5";

pub static PROGRESS_BAR_TEMPLATE: &'static str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}";
pub static PROGRESS_BAR_CHARS: &'static str = "##-";

pub fn parse_human_readable_number<T: Num + std::str::FromStr + std::convert::TryFrom<u64>>(string: &str) -> Option<T> {
    let multiplier: u32 = match string.chars().rev().next()? {
        '0'..='9' => 1,
        'k' | 'K' => 1_000,
        'm' | 'M' => 1_000_000,
        'b' | 'B' => 1_000_000_000,
        _ => {
            return None;
        }
    };

    if multiplier == 1 {
        Some(string.parse::<T>().ok()?)
    } else {
        Some(T::try_from((string[0..string.len() - 1].parse::<f32>().ok()? * multiplier as f32) as u64).ok()?)
    }
}

/// Formats an elapsed time as `H:MM:SS.ffffff`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let elapsed = match chrono::Duration::from_std(elapsed) {
        Ok(d) => d,
        Err(_) => return format!("{}s", elapsed.as_secs()),
    };

    let whole_seconds = elapsed.num_seconds();
    let micros = (elapsed - chrono::Duration::seconds(whole_seconds)).num_microseconds().unwrap_or(0);

    format!(
        "{}:{:02}:{:02}.{:06}",
        elapsed.num_hours(),
        elapsed.num_minutes() % 60,
        whole_seconds % 60,
        micros
    )
}
