use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("failed to execute search: {0}")]
    Http(#[from] reqwest::Error),
    #[error("failed to parse search results: {0}")]
    Decode(#[from] DecodeError),
    /// The service answered with a pseudo-entry titled "error".
    #[error("{0}")]
    Api(String),
}

impl SearchError {
    /// Message reported by the service, if this is an API error.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            SearchError::Api(msg) => Some(msg),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Xml(#[from] quick_xml::Error),
    #[error("expected end tag, found {0}")]
    ExpectedEnd(String),
    #[error("unexpected end of document")]
    UnexpectedEof,
}
