//! Error types.
use std::fmt::Display;

use svgpack_ast::error::{ParseError, XmlWriterError};
use svgpack_optimiser::JobsError;

#[derive(Debug)]
/// Errors which may be generated while compiling a sprite
pub enum SpriteError {
    /// A shape couldn't be parsed
    Parse {
        /// The name the shape was added with
        name: String,
        /// The cause of the failure
        source: ParseError,
    },
    /// A shape's transform jobs failed
    Transform {
        /// The name the shape was added with
        name: String,
        /// The cause of the failure
        source: JobsError,
    },
    /// The sprite couldn't be serialized
    Serialize(XmlWriterError),
    /// Two shapes were given the same id
    DuplicateShape(String),
    /// Two shapes bind the same namespace prefix to different uris
    NamespaceConflict {
        /// The name of the shape which rebinds the prefix
        name: String,
        /// The prefix bound by both shapes
        prefix: String,
    },
    /// A shape has neither a `viewBox` nor a numeric `width` and `height`
    InvalidViewBox {
        /// The name the shape was added with
        name: String,
    },
}

impl Display for SpriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse { name, source } => {
                f.write_fmt(format_args!("Failed to parse shape `{name}`: {source}"))
            }
            Self::Transform { name, source } => {
                f.write_fmt(format_args!("Failed to transform shape `{name}`: {source}"))
            }
            Self::Serialize(e) => f.write_fmt(format_args!("Failed to serialize sprite: {e}")),
            Self::DuplicateShape(id) => {
                f.write_fmt(format_args!("A shape with the id `{id}` was already added"))
            }
            Self::NamespaceConflict { name, prefix } => f.write_fmt(format_args!(
                "Shape `{name}` binds the prefix `{prefix}` to a different namespace than an earlier shape"
            )),
            Self::InvalidViewBox { name } => f.write_fmt(format_args!(
                "Shape `{name}` needs a `viewBox`, or a numeric `width` and `height`"
            )),
        }
    }
}

impl std::error::Error for SpriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse { source, .. } => Some(source),
            Self::Transform { source, .. } => Some(source),
            Self::Serialize(e) => Some(e),
            Self::DuplicateShape(_)
            | Self::NamespaceConflict { .. }
            | Self::InvalidViewBox { .. } => None,
        }
    }
}

impl From<XmlWriterError> for SpriteError {
    fn from(value: XmlWriterError) -> Self {
        Self::Serialize(value)
    }
}
