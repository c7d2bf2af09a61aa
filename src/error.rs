use thiserror::Error;

/// Library error type for carousel operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A jump targeted an index outside `[0, count)`.
    #[error("slide index {index} is out of range for {count} slides")]
    OutOfRange { index: usize, count: usize },

    /// The banner feed did not have the expected shape.
    #[error("{0}")]
    InvalidFeed(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// JSON decoding error from the banner feed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
