use thiserror::Error;

#[derive(Error, Debug)]
pub enum TerrainError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed settings: {0}")]
    Settings(#[from] toml::de::Error),
}

impl TerrainError {
    pub fn invalid_argument<T: ToString>(msg: T) -> Self {
        TerrainError::InvalidArgument(msg.to_string())
    }
}
