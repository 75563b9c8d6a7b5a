/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/io/mod.rs
 *
 * Authors: Jared Vann
 */

mod list_files;
pub use list_files::list_files_with_pattern;

mod read_hdf5_data;
pub use read_hdf5_data::load_dataframes;
pub use read_hdf5_data::read_hdf5_file;

mod read_root_data;
pub use read_root_data::load_root_file;
pub use read_root_data::load_root_file_chunked;

mod write_hdf5_data;
pub use write_hdf5_data::save_to_hdf5;
pub use write_hdf5_data::write_hdf5_file;

mod write_root_data;
pub use write_root_data::export_dataframe_to_rootfile;
pub use write_root_data::write_root_file;
