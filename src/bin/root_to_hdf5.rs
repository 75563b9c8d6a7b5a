/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * ---------------------------
 * ROOT to HDF5 Conversion Tool
 * ---------------------------
 *
 * event-table-io/src/bin/root_to_hdf5.rs
 *
 * Authors: Jared Vann
 */

use std::path::Path;

use clap;
use colored::Colorize;
use itertools::Itertools;
use separator::Separatable as _;

use event_table_io::*;

fn main() -> Result<()> {
    println!(
        "---------------------------\n{}\n---------------------------",
        "ROOT to HDF5 Conversion Tool".bold()
    );

    //
    // Generate command line option parser
    //
    let matches = clap::App::new("")
        // General options
        .arg(clap::Arg::with_name("INPUT").help("Sets the input ROOT file").required(true).index(1))
        .arg(clap::Arg::with_name("OUTPUT").help("Sets the output HDF5 file").required(true).index(2))
        .arg(
            clap::Arg::with_name("tree")
                .help("Name of the tree to read (default is 'sel')")
                .long("tree")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("columns")
                .help("Comma separated list of branches to read (default is all)")
                .long("columns")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("chunk-size")
                .help("Read the tree this many entries at a time (e.g. '100k')")
                .long("chunk-size")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("rename")
                .help("Rename RunID/EventID/TrigCount to run_id/frame_index/event_counter_trigger")
                .long("rename"),
        )
        .get_matches();

    //
    // Read command line options
    //
    let input_file_str = matches.value_of("INPUT").unwrap();
    let output_file_str = matches.value_of("OUTPUT").unwrap();
    let tree = matches.value_of("tree").unwrap_or(DEFAULT_TREE);

    let columns: Option<Vec<&str>> = matches
        .value_of("columns")
        .map(|s| s.split(',').map(str::trim).filter(|c| !c.is_empty()).collect());

    let chunk_size = match matches.value_of("chunk-size") {
        Some(s) => match parse_human_readable_number::<usize>(s) {
            Some(n) if n > 0 => Some(n),
            _ => {
                println!("{}", format!("Invalid chunk size '{}'", s).red());
                return Ok(());
            }
        },
        None => None,
    };

    let output_file_path = Path::new(output_file_str);

    let (output_dir, output_name) = match (output_file_path.parent(), output_file_path.file_name()) {
        (Some(dir), Some(name)) => (dir, name.to_string_lossy().into_owned()),
        _ => {
            println!("{}", format!("Invalid output file '{}'", output_file_str).red());
            return Ok(());
        }
    };

    if output_file_path.exists() {
        println!("{}", format!("Overwriting existing output file '{}'", output_file_str).yellow());
    }

    //
    // Convert
    //
    let df = match chunk_size {
        Some(n) => load_root_file_chunked(input_file_str, columns.as_deref(), tree, n)?,
        None => load_root_file(input_file_str, columns.as_deref(), tree)?,
    };

    let df = if matches.is_present("rename") { rename_h5_columns(&df)? } else { df };

    println!("Columns: {}", df.column_names().iter().join(", "));

    save_to_hdf5(&df, &output_name, output_dir)?;

    println!(
        "{}",
        format!(
            "Converted {} rows from {} to {}\n",
            df.height().separated_string(),
            input_file_str,
            output_file_str
        )
        .bold()
    );

    Ok(())
}
