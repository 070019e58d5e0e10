use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinderError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Search unavailable: {0}")]
    SearchUnavailable(String),

    #[error("Search error: {0}")]
    Search(String),

    #[error("API rate limit exceeded, retry after {retry_after:?} seconds")]
    ApiRateLimit { retry_after: Option<u64> },

    #[error("API authentication error: {0}")]
    ApiAuth(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, FinderError>;
