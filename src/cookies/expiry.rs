//! Cookie expiry values and HTTP-date formatting.

use crate::base::cookieerror::CookieError;
use std::time::SystemTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Duration, OffsetDateTime, PrimitiveDateTime, UtcOffset};

/// The expiry string that makes a browser drop a cookie immediately.
pub const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:01 GMT";

/// RFC 7231 IMF-fixdate.
const HTTP_DATE: &[BorrowedFormatItem<'static>] = format_description!(
    "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
);

/// When a cookie should expire.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Expiry {
    /// No `expires` attribute: the cookie lives for the session.
    #[default]
    Session,
    /// Whole days from the moment the cookie is written.
    Days(i64),
    /// An absolute point in time.
    At(OffsetDateTime),
    /// A preformatted date string, written as given.
    Raw(String),
}

impl Expiry {
    /// Normalize to the value of the `expires` attribute.
    ///
    /// `now` anchors [`Expiry::Days`]; day counts past the representable
    /// range clamp to the first or last representable second. Returns `None`
    /// for session cookies.
    pub fn resolve(&self, now: OffsetDateTime) -> Option<String> {
        let at = match self {
            Expiry::Session => return None,
            Expiry::Raw(raw) => return Some(raw.clone()),
            Expiry::At(at) => *at,
            Expiry::Days(days) => days
                .checked_mul(86_400)
                .and_then(|secs| now.checked_add(Duration::seconds(secs)))
                .unwrap_or_else(|| clamp(*days)),
        };

        match http_date(at) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(error = %e, "expiry dropped");
                None
            }
        }
    }
}

/// The representable bound in the direction of `sign`.
fn clamp(sign: i64) -> OffsetDateTime {
    if sign < 0 {
        PrimitiveDateTime::MIN.assume_utc()
    } else {
        PrimitiveDateTime::MAX.assume_utc()
    }
}

impl From<i64> for Expiry {
    fn from(days: i64) -> Self {
        Expiry::Days(days)
    }
}

impl From<i32> for Expiry {
    fn from(days: i32) -> Self {
        Expiry::Days(i64::from(days))
    }
}

impl From<OffsetDateTime> for Expiry {
    fn from(at: OffsetDateTime) -> Self {
        Expiry::At(at)
    }
}

impl From<SystemTime> for Expiry {
    fn from(at: SystemTime) -> Self {
        Expiry::At(OffsetDateTime::from(at))
    }
}

impl From<&str> for Expiry {
    fn from(raw: &str) -> Self {
        Expiry::Raw(raw.to_string())
    }
}

impl From<String> for Expiry {
    fn from(raw: String) -> Self {
        Expiry::Raw(raw)
    }
}

impl<T: Into<Expiry>> From<Option<T>> for Expiry {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Format a point in time as an IMF-fixdate (`Sun, 06 Nov 1994 08:49:37 GMT`).
///
/// The value is converted to UTC first, saturating at the representable
/// range; sub-second precision is dropped.
pub fn http_date(at: OffsetDateTime) -> Result<String, CookieError> {
    let utc = at
        .checked_to_offset(UtcOffset::UTC)
        .unwrap_or_else(|| clamp(-i64::from(at.offset().whole_seconds())));
    Ok(utc.format(HTTP_DATE)?)
}
