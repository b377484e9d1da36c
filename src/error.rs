use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogoError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Download returned HTTP {status}")]
    DownloadStatus { status: reqwest::StatusCode },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Font error in {}: {message}", path.display())]
    FontError { path: PathBuf, message: String },

    #[error("Could not measure {text:?}: {message}")]
    MeasureError { text: String, message: String },
}
