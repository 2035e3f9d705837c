//! Error types.
use std::{fmt::Display, path::PathBuf};

use svgpack_optimiser::JobsError;
use svgpack_sprite::SpriteError;

#[derive(Debug)]
/// Errors which end a run
pub enum Error {
    /// A task's source directory doesn't exist
    DirectoryNotFound(PathBuf),
    /// A file or directory couldn't be read
    ReadFailure {
        /// The path being read
        path: PathBuf,
        /// The cause of the failure
        source: std::io::Error,
    },
    /// A file or directory couldn't be written
    WriteFailure {
        /// The path being written
        path: PathBuf,
        /// The cause of the failure
        source: std::io::Error,
    },
    /// A document couldn't be optimised
    OptimizationFailure {
        /// The path of the document
        path: PathBuf,
        /// The cause of the failure
        source: JobsError,
    },
    /// A task's sprite couldn't be compiled
    SpriteCompilationFailure {
        /// The name of the task
        task: String,
        /// The cause of the failure
        source: SpriteError,
    },
    /// A config file couldn't be parsed
    Config {
        /// The path of the config
        path: PathBuf,
        /// The cause of the failure
        source: serde_json::Error,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryNotFound(path) => {
                f.write_fmt(format_args!("Directory not found: {}", path.display()))
            }
            Self::ReadFailure { path, .. } => {
                f.write_fmt(format_args!("Failed to read {}", path.display()))
            }
            Self::WriteFailure { path, .. } => {
                f.write_fmt(format_args!("Failed to write {}", path.display()))
            }
            Self::OptimizationFailure { path, .. } => {
                f.write_fmt(format_args!("Failed to optimise {}", path.display()))
            }
            Self::SpriteCompilationFailure { task, .. } => {
                f.write_fmt(format_args!("Failed to compile the sprite of task `{task}`"))
            }
            Self::Config { path, .. } => f.write_fmt(format_args!(
                "Configuration at {} cannot be parsed",
                path.display()
            )),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::DirectoryNotFound(_) => None,
            Self::ReadFailure { source, .. } | Self::WriteFailure { source, .. } => Some(source),
            Self::OptimizationFailure { source, .. } => Some(source),
            Self::SpriteCompilationFailure { source, .. } => Some(source),
            Self::Config { source, .. } => Some(source),
        }
    }
}
