use crate::{document::ParseError, raster::RasterError};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    FileSystem,
    Parse,
    Rasterization,
}

/// A failed conversion. Every variant is transparent over the error reported
/// by the stage that failed.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error(transparent)]
    Network(#[from] reqwest::Error),

    #[error(transparent)]
    FileSystem(#[from] std::io::Error),

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Rasterization(#[from] RasterError),
}

impl ConvertError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConvertError::Network(_) => ErrorKind::Network,
            ConvertError::FileSystem(_) => ErrorKind::FileSystem,
            ConvertError::Parse(_) => ErrorKind::Parse,
            ConvertError::Rasterization(_) => ErrorKind::Rasterization,
        }
    }
}

pub fn format_error_chain(err: &dyn std::error::Error) -> String {
    let mut output = format!("{}", err);
    let mut source = err.source();
    while let Some(cause) = source {
        output.push_str(&format!("\nCaused by: {}", cause));
        source = cause.source();
    }

    output
}
