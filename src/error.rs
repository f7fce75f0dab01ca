//! Error taxonomy for a conversion run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a conversion run.
///
/// Symbol-lookup failures are deliberately absent: the ticker resolver
/// degrades them to a deterministic fallback symbol and the run continues.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The input export does not have the expected shape.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The input file could not be read.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The output file could not be written.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
