use std::path::PathBuf;

use canvas_utils_canvas2d::Canvas2dError;

pub type CanvasUtilsResult<T> = Result<T, CanvasUtilsError>;

#[derive(Debug, thiserror::Error)]
pub enum CanvasUtilsError {
    #[error(transparent)]
    Canvas(#[from] Canvas2dError),

    #[error("Failed to read `{}`: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Failed to load image from url {url} with status code {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Empty response body from {url}")]
    EmptyBody { url: String },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Failed to register font `{}`: {source}", path.display())]
    FontRegistration {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid font manifest `{}`: {source}", path.display())]
    FontManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown anchor: `{0}`")]
    UnknownAnchor(String),

    #[error("Invalid hex color: `{0}`")]
    InvalidHexColor(String),
}
