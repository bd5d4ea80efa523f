use thiserror::Error;

#[derive(Debug, Error)]
pub enum SignError {
    #[error("missing credential field: {0}")]
    MissingCredential(&'static str),

    #[error("invalid request URL: {0}")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, SignError>;
