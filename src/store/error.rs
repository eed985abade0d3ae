use std::{io, path::PathBuf};

use thiserror::Error;

use crate::wiki_path::PagePathError;

/// Describes the potential error conditions that might arise from `Store` operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("git repository already exists at {}", .0.display())]
    GitDirShouldntExist(PathBuf),

    #[error("repository directory {} does not exist", .0.display())]
    WorkDirDoesntExist(PathBuf),

    #[error("no git repository found at {}", .0.display())]
    GitDirDoesntExist(PathBuf),

    #[error("failed to run `git {command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`git {command}` exited with status {}: {stderr}", display_status(.status))]
    CommandFailed {
        command: String,
        status: Option<i32>,
        stderr: String,
    },

    #[error("unexpected output from `git {command}`: {output:?}")]
    MalformedOutput { command: String, output: String },

    #[error(transparent)]
    InvalidPath(#[from] PagePathError),

    #[error(transparent)]
    IoError(#[from] io::Error),
}

fn display_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => code.to_string(),
        None => "(killed by signal)".to_string(),
    }
}

/// A specialized `Result` type for `Store` operations.
pub type Result<T> = std::result::Result<T, Error>;
