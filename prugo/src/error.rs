#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Request build error: {0}")]
    RequestBuildError(String),

    #[error("Transport error: {0}")]
    TransportError(#[source] reqwest::Error),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::RequestBuildError(err.to_string())
        } else {
            Error::TransportError(err)
        }
    }
}

pub type StdResult<T, E> = std::result::Result<T, E>;

pub type Result<T> = std::result::Result<T, Error>;
