use thiserror::Error;

/// Failure loading the station directory.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error("directory request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("directory returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("directory response could not be decoded: {0}")]
    Decode(String),
}
