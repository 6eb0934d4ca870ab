use thiserror::Error;

/// Errors raised by the fallible edges of the crate.
///
/// Codec operations themselves never fail: a missing cookie is reported
/// through a fallback value. Only store parsing and date formatting
/// produce these.
#[derive(Debug, Error)]
pub enum CookieError {
    #[error("Invalid cookie line `{line}`: {reason}")]
    InvalidCookieLine { line: String, reason: String },
    #[error("Cookie rejected: {0}")]
    Rejected(&'static str),
    #[error("HTTP date formatting failed")]
    DateFormat(#[from] time::error::Format),
}

impl CookieError {
    pub fn invalid_line(line: impl Into<String>, reason: impl ToString) -> Self {
        CookieError::InvalidCookieLine {
            line: line.into(),
            reason: reason.to_string(),
        }
    }
}
