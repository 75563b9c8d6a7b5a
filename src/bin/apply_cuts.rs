/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * ------------------------
 * Event Table Cut Selection
 * ------------------------
 *
 * event-table-io/src/bin/apply_cuts.rs
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
        "------------------------\n{}\n------------------------",
        "Event Table Cut Selection".bold()
    );

    //
    // Generate command line option parser
    //
    let matches = clap::App::new("")
        // General options
        .arg(
            clap::Arg::with_name("FOLDER")
                .help("Sets the folder holding the HDF5 tables")
                .required(true)
                .index(1),
        )
        .arg(clap::Arg::with_name("OUTPUT").help("Sets the output file").required(true).index(2))
        .arg(
            clap::Arg::with_name("pattern")
                .help("File pattern to match inside the folder (default is '*.hdf5')")
                .long("pattern")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("cuts")
                .help("TOML file holding a [[cuts]] list")
                .long("cuts")
                .takes_value(true),
        )
        .arg(
            clap::Arg::with_name("cut")
                .help("Extra cut such as 'energy>10', 'n_hits<50' or 'is_track==true' (repeatable)")
                .long("cut")
                .takes_value(true)
                .multiple(true)
                .number_of_values(1),
        )
        .arg(
            clap::Arg::with_name("root")
                .help("Write the selection to a ROOT file instead of HDF5")
                .long("root"),
        )
        .arg(
            clap::Arg::with_name("tree")
                .help("Name of the output tree when writing ROOT (default is 'sel')")
                .long("tree")
                .takes_value(true)
                .requires("root"),
        )
        .arg(
            clap::Arg::with_name("rename")
                .help("Rename RunID/EventID/TrigCount to run_id/frame_index/event_counter_trigger")
                .long("rename"),
        )
        .arg(
            clap::Arg::with_name("dry-run")
                .help("Shows which files and cuts would be used without loading any data")
                .long("dry-run"),
        )
        .get_matches();

    //
    // Read command line options
    //
    let folder_str = matches.value_of("FOLDER").unwrap();
    let output_file_str = matches.value_of("OUTPUT").unwrap();
    let pattern = matches.value_of("pattern").unwrap_or("*.hdf5");
    let tree = matches.value_of("tree").unwrap_or(DEFAULT_TREE);

    let mut cuts = match matches.value_of("cuts") {
        Some(path) => CutList::read(path)?.cuts,
        None => Vec::new(),
    };

    if let Some(values) = matches.values_of("cut") {
        for value in values {
            cuts.push(value.parse()?);
        }
    }

    //
    // Parse input file list
    //
    // Matched paths already carry the folder, so they are loaded relative to ""
    let input_files: Vec<String> = list_files_with_pattern(folder_str, pattern)?
        .iter()
        .map(|x| x.to_string_lossy().into_owned())
        .collect();

    if input_files.is_empty() {
        println!("No input files matched!");
        return Ok(());
    }

    println!("Matched {} input files", input_files.len());

    if cuts.is_empty() {
        println!("No cuts given, keeping every row");
    } else {
        println!("Cuts: {}", cuts.iter().join(" && "));
    }

    if matches.is_present("dry-run") {
        return Ok(());
    }

    let output_file_path = Path::new(output_file_str);

    let (output_dir, output_name) = match (output_file_path.parent(), output_file_path.file_name()) {
        (Some(dir), Some(name)) => (dir, name.to_string_lossy().into_owned()),
        _ => {
            println!("{}", format!("Invalid output file '{}'", output_file_str).red());
            return Ok(());
        }
    };

    //
    // Load, select and write
    //
    let df = load_dataframes(&input_files, &cuts, "")?;
    let df = if matches.is_present("rename") { rename_h5_columns(&df)? } else { df };

    println!("Selected {} rows", df.height().separated_string());

    if matches.is_present("root") {
        export_dataframe_to_rootfile(&df, &output_name, tree, output_dir)?;
    } else {
        save_to_hdf5(&df, &output_name, output_dir)?;
    }

    Ok(())
}
