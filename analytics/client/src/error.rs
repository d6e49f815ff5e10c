#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("http error: {0}")]
    Http(reqwest::Error),
    #[error("tracking did not return a success status: {0}")]
    Status(reqwest::StatusCode),
    #[error("request body cannot be empty")]
    EmptyPayload,
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),
    #[error("missing configuration setting: {0}")]
    MissingSetting(String),
    #[error(transparent)]
    Model(#[from] analytics_model::Error),
}

impl From<reqwest::Error> for Error {
    fn from(inner: reqwest::Error) -> Self {
        Self::Http(inner)
    }
}
