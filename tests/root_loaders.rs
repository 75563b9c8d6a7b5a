use std::collections::HashMap;

use event_table_io::*;
use tempfile::{tempdir, TempDir};

const ENTRIES: usize = 1_037;

fn events() -> DataFrame {
    DataFrame::new(vec![
        Column::new("run_id", ColumnData::I32((0..ENTRIES as i32).map(|i| 100 + i / 250).collect())),
        Column::new("frame_index", ColumnData::I64((0..ENTRIES as i64).collect())),
        Column::new("energy", ColumnData::F64((0..ENTRIES).map(|i| i as f64 * 0.5).collect())),
        Column::new("cos_zenith", ColumnData::F32((0..ENTRIES).map(|i| (i % 20) as f32 / 10.0 - 1.0).collect())),
    ])
    .unwrap()
}

fn written_events() -> TempDir {
    let dir = tempdir().unwrap();
    export_dataframe_to_rootfile(&events(), "events.root", DEFAULT_TREE, dir.path()).unwrap();
    dir
}

#[test]
fn loads_whole_tree() {
    let dir = written_events();
    let df = load_root_file(dir.path().join("events.root"), None, DEFAULT_TREE).unwrap();

    assert_eq!(df, events());
}

#[test]
fn loads_column_subset_in_requested_order() {
    let dir = written_events();
    let df = load_root_file(dir.path().join("events.root"), Some(&["energy", "run_id"][..]), DEFAULT_TREE).unwrap();

    assert_eq!(df, events().select(&["energy", "run_id"]).unwrap());
}

#[test]
fn chunked_loading_matches_full_loading() {
    let dir = written_events();
    let path = dir.path().join("events.root");

    let full = load_root_file(&path, None, DEFAULT_TREE).unwrap();

    for &chunk_size in &[1, 7, 100, ENTRIES, ENTRIES + 1, DEFAULT_CHUNK_SIZE] {
        let chunked = load_root_file_chunked(&path, None, DEFAULT_TREE, chunk_size).unwrap();
        assert_eq!(chunked, full, "chunk size {}", chunk_size);
    }
}

#[test]
fn chunked_loading_honours_tree_name_and_columns() {
    let dir = tempdir().unwrap();
    export_dataframe_to_rootfile(&events(), "events.root", "reco", dir.path()).unwrap();

    let df = load_root_file_chunked(dir.path().join("events.root"), Some(&["frame_index"][..]), "reco", 64).unwrap();
    assert_eq!(df, events().select(&["frame_index"]).unwrap());
}

#[test]
fn zero_chunk_size_is_rejected() {
    let dir = written_events();
    let result = load_root_file_chunked(dir.path().join("events.root"), None, DEFAULT_TREE, 0);

    assert!(matches!(result, Err(Error::InvalidChunkSize)));
}

#[test]
fn missing_branch_and_tree_fail() {
    let dir = written_events();
    let path = dir.path().join("events.root");

    assert!(matches!(
        load_root_file(&path, Some(&["zenith"][..]), DEFAULT_TREE),
        Err(Error::MissingColumn(_))
    ));
    assert!(load_root_file(&path, None, "no_such_tree").is_err());
    assert!(load_root_file(dir.path().join("missing.root"), None, DEFAULT_TREE).is_err());
}

#[test]
fn hdf5_selection_exported_to_root_reads_back() {
    let dir = tempdir().unwrap();

    write_hdf5_file(&events(), dir.path().join("events.hdf5")).unwrap();

    let cuts = vec![Cut::new("cos_zenith", CutKind::Less, Value::Int(0))];
    let selected = load_dataframes(&["events.hdf5"], &cuts, dir.path()).unwrap();
    let mut renames = HashMap::new();
    renames.insert("energy", "energy_reco");
    let selected = rename_columns(&selected, &renames).unwrap();

    export_dataframe_to_rootfile(&selected, "selected.root", DEFAULT_TREE, dir.path()).unwrap();
    let loaded = load_root_file(dir.path().join("selected.root"), None, DEFAULT_TREE).unwrap();

    assert_eq!(loaded, selected);
    assert_eq!(loaded.height(), (0..ENTRIES).filter(|i| i % 20 < 10).count());
}

#[test]
fn narrow_integer_branches_are_widened() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("narrow.root");

    let mut file = oxyroot::RootFile::create(&path).unwrap();
    let mut tree = oxyroot::WriterTree::new(DEFAULT_TREE);
    tree.new_branch("energy", vec![1.5f64, 2.5, 3.5].into_iter());
    tree.new_branch("n_lines", vec![-3i16, 0, 12].into_iter());
    tree.new_branch("n_strings", vec![1u8, 2, 255].into_iter());
    tree.write(&mut file).unwrap();
    file.close().unwrap();

    let df = load_root_file(&path, None, DEFAULT_TREE).unwrap();
    assert_eq!(df.column("n_lines").unwrap().data, ColumnData::I32(vec![-3, 0, 12]));
    assert_eq!(df.column("n_strings").unwrap().data, ColumnData::U32(vec![1, 2, 255]));

    let chunked = load_root_file_chunked(&path, None, DEFAULT_TREE, 2).unwrap();
    assert_eq!(chunked, df);
}

#[test]
fn exporting_overwrites_existing_file() {
    let dir = written_events();
    let smaller = events().select(&["energy"]).unwrap();

    export_dataframe_to_rootfile(&smaller, "events.root", DEFAULT_TREE, dir.path()).unwrap();
    let df = load_root_file(dir.path().join("events.root"), None, DEFAULT_TREE).unwrap();

    assert_eq!(df, smaller);
}

#[test]
fn exporting_to_missing_folder_fails() {
    let dir = tempdir().unwrap();
    let result = export_dataframe_to_rootfile(&events(), "events.root", DEFAULT_TREE, dir.path().join("missing"));

    assert!(result.is_err());
}
