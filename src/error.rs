use std::{io, path::PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile io: {0}")]
    Io(#[from] io::Error),

    #[error("profile parse: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid profile: {0}")]
    Invalid(String),
}
