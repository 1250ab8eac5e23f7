//! Errors surfaced by the CLI.

use std::{io, ops::Range};

use thiserror::Error;

use tensordraw::TensorDrawError;

use crate::config::ConfigError;

/// Everything [`run`](crate::run) can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid diagram description {path}: {message}")]
    Description {
        path: String,
        message: String,
        span: Option<Range<usize>>,
        src: String,
    },

    #[error(transparent)]
    TensorDraw(#[from] TensorDrawError),
}

impl CliError {
    /// Wraps a TOML error raised while reading the description at `path`.
    pub fn new_description_error(err: &toml::de::Error, path: &str, src: &str) -> Self {
        Self::Description {
            path: path.to_string(),
            message: err.message().to_string(),
            span: err.span(),
            src: src.to_string(),
        }
    }
}
