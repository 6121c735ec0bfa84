use thiserror::Error;

use crate::routing::NavigationMode;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Unknown location: {0}")]
    UnknownLocation(String),
    #[error("No {mode} route from {start} to {destination}")]
    Unreachable {
        start: String,
        destination: String,
        mode: NavigationMode,
    },
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("GeoJSON error: {0}")]
    GeoJsonError(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::InvalidData(format!("malformed JSON: {e}"))
    }
}
