// Changes the working directory, so it lives in its own test binary

use std::env;
use std::fs;

use event_table_io::*;
use tempfile::tempdir;

#[test]
fn dot_prefixed_folder_finds_and_loads_tables() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();

    let df = DataFrame::new(vec![Column::new("energy", ColumnData::F64(vec![5.0, 20.0, 30.0]))]).unwrap();
    write_hdf5_file(&df, dir.path().join("sub").join("a.hdf5")).unwrap();

    env::set_current_dir(dir.path()).unwrap();

    for folder in &["./sub", "./sub/", "sub"] {
        let files: Vec<String> = list_files_with_pattern(folder, "*.hdf5")
            .unwrap()
            .iter()
            .map(|x| x.to_string_lossy().into_owned())
            .collect();
        assert_eq!(files.len(), 1, "folder {}", folder);

        let cuts = vec![Cut::new("energy", CutKind::Greater, Value::Int(10))];
        let selected = load_dataframes(&files, &cuts, "").unwrap();
        assert_eq!(selected.column("energy").unwrap().data, ColumnData::F64(vec![20.0, 30.0]));
    }
}
