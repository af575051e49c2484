use thiserror::Error;

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),

    #[error("Camera unavailable: {0}")]
    Camera(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Caption error: {0}")]
    Caption(String),
}

pub type Result<T> = std::result::Result<T, ArchiveError>;
