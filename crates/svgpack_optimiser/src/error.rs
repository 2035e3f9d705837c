//! Error types.
use std::fmt::Display;

use svgpack_ast::error::{ParseError, XmlWriterError};

#[derive(Debug)]
/// Errors which may be generated when running optimisation jobs
pub enum JobsError {
    /// The document couldn't be parsed
    Parse(ParseError),
    /// The optimised document couldn't be serialized
    Serialize(XmlWriterError),
    /// There was an issue with a regex string in the configuration
    InvalidUserRegex(regex::Error),
}

impl Display for JobsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(e) => f.write_fmt(format_args!("Failed to parse document: {e}")),
            Self::Serialize(e) => f.write_fmt(format_args!("Failed to serialize document: {e}")),
            Self::InvalidUserRegex(e) => {
                f.write_fmt(format_args!("Invalid regex in configuration: {e}"))
            }
        }
    }
}

impl std::error::Error for JobsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(e) => Some(e),
            Self::Serialize(e) => Some(e),
            Self::InvalidUserRegex(e) => Some(e),
        }
    }
}

impl From<ParseError> for JobsError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<XmlWriterError> for JobsError {
    fn from(value: XmlWriterError) -> Self {
        Self::Serialize(value)
    }
}

impl From<regex::Error> for JobsError {
    fn from(value: regex::Error) -> Self {
        Self::InvalidUserRegex(value)
    }
}
