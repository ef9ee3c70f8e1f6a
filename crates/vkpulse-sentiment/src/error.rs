use thiserror::Error;

#[derive(Debug, Error)]
pub enum SentimentError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("classifier error: {0}")]
    Model(String),

    #[error("unknown sentiment label \"{0}\"")]
    UnknownLabel(String),

    #[error("classifier returned {got} results for {expected} texts")]
    LengthMismatch { expected: usize, got: usize },
}
