use thiserror::Error;

#[derive(Error, Debug)]
pub enum BreadError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. Carries the API's own message when it sent one.
    #[error("{0}")]
    Api(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    /// Rejected before anything was sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}
