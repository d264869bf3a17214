use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("i/o error on {}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("short read in {layer}/{group}: expected {expected} elements, got {actual}")]
    ShortRead {
        layer: String,
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("mismatch in {layer}/{group} at element {index} (byte offset {offset})")]
    Mismatch {
        layer: String,
        group: &'static str,
        index: usize,
        offset: u64,
    },

    #[error("shape mismatch in {layer}/{group}: dimensions call for {expected} elements, array holds {actual}")]
    ShapeMismatch {
        layer: String,
        group: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("sparse index overrun: scanning {rows} rows needs more than the {len} entries present")]
    IndexOverrun { rows: usize, len: usize },

    #[error("sparse index block {block} has negative count {count}")]
    NegativeIndexCount { block: usize, count: i32 },

    #[error("element count overflow in layer {layer}")]
    DimensionOverflow { layer: String },

    #[error("artifact has {extra} trailing bytes after the last layer")]
    TrailingBytes { extra: u64 },

    #[error("layout mismatch at layer {position}: expected {expected}, got {actual}")]
    LayoutMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
}

impl FormatError {
    /// Adapter for `map_err` that attaches the artifact path to an I/O error.
    pub(crate) fn file(path: &Path) -> impl FnOnce(io::Error) -> FormatError + '_ {
        move |source| FormatError::File {
            path: path.to_path_buf(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, FormatError>;
