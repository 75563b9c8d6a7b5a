/*
 * ARIADNE Experiment, Department of Physics, University of Liverpool
 *
 * event-table-io/src/error.rs
 *
 * Authors: Jared Vann
 */

use std::io;

use thiserror::Error;

use crate::Value;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("HDF5 error: {0}")]
    Hdf5(#[from] hdf5::Error),

    #[error("ROOT error: {0}")]
    Root(String),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("unreadable path while globbing: {0}")]
    Glob(#[from] glob::GlobError),

    #[error("invalid cut file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("column '{0}' not found")]
    MissingColumn(String),

    #[error("duplicate column '{0}'")]
    DuplicateColumn(String),

    #[error("column name '{0}' cannot be stored in an HDF5 file")]
    InvalidColumnName(String),

    #[error("column '{column}' has {found} rows, expected {expected}")]
    LengthMismatch { column: String, expected: usize, found: usize },

    #[error("tables do not share a schema: {0}")]
    SchemaMismatch(String),

    #[error("cannot compare column '{column}' of type {type_name} with {value}")]
    TypeMismatch {
        column: String,
        type_name: &'static str,
        value: Value,
    },

    #[error("column '{column}' has unsupported type {type_name}")]
    UnsupportedType { column: String, type_name: String },

    #[error("invalid cut type '{0}' (expected greater, less or equal)")]
    InvalidCutKind(String),

    #[error("invalid cut '{0}'")]
    InvalidCut(String),

    #[error("chunk size must be at least 1")]
    InvalidChunkSize,

    #[error("no tables to concatenate")]
    NoFrames,
}

pub(crate) fn root_error<E: std::fmt::Display>(err: E) -> Error {
    Error::Root(err.to_string())
}
