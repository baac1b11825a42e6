pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Intercom API error: {source}")]
    Intercom {
        source: IntercomError,
        body: Option<String>,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid HTTP header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("failed to build intercom client: {0}")]
    Build(String),

    #[error("missing Intercom access token, set {0}")]
    MissingToken(&'static str),

    #[error("search cursor has no next page")]
    NoNextPage,
}

/// Error reported by the Intercom API for a non-success response.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{} ({}{})", .message, .status_code.as_u16(), code_suffix(.code.as_deref()))]
pub struct IntercomError {
    pub status_code: StatusCode,

    /// Machine readable error code, e.g. `not_found` or `unauthorized`.
    pub code: Option<String>,
    pub message: String,
}

fn code_suffix(code: Option<&str>) -> String {
    code.map(|code| format!(", {code}")).unwrap_or_default()
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct StatusCode(u16);

impl StatusCode {
    #[must_use]
    pub const fn as_u16(self) -> u16 {
        self.0
    }

    #[must_use]
    pub(crate) const fn new(value: u16) -> Self {
        Self(value)
    }
}

impl PartialEq<u16> for StatusCode {
    fn eq(&self, other: &u16) -> bool {
        self.0 == *other
    }
}
