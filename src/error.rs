use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to run {}: {source}", .program.display())]
    Spawn { program: PathBuf, source: io::Error },

    /// The compiler exited with a failure status. `diagnostics` is the
    /// compiler's own text, untouched.
    #[error("{diagnostics}")]
    Compiler { code: Option<i32>, diagnostics: String },

    #[error("unexpected compiler output: {0}")]
    Output(#[from] serde_json::Error),

    #[error("no contracts found in {}", .path.display())]
    NoContracts { path: PathBuf },

    #[error("failed to write {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },
}
