use crate::base::cookieerror::CookieError;
use crate::cookies::store::CookieStore;
use cookie::Cookie;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use time::{OffsetDateTime, PrimitiveDateTime};
use url::Url;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires: Option<OffsetDateTime>,
    secure: bool,
    /// Creation order; kept when a cookie is overwritten.
    created: u64,
}

impl Entry {
    fn is_expired(&self, now: OffsetDateTime) -> bool {
        self.expires.is_some_and(|e| e <= now)
    }
}

/// In-memory `document.cookie` for a single document.
///
/// Writes are parsed like a browser parses them: cookies are keyed by
/// (name, path), an expiry in the past deletes the cookie, `HttpOnly` lines
/// are refused and `Secure` cookies need a secure document. Reads return
/// the cookies visible to the document, longest path first, then oldest
/// first.
///
/// Clones share the same cookies.
#[derive(Debug, Clone)]
pub struct MemoryCookieStore {
    secure_context: bool,
    document_path: String,
    cookies: Arc<DashMap<(String, String), Entry>>,
    sequence: Arc<AtomicU64>,
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieStore {
    /// A store for a secure document at `/`.
    pub fn new() -> Self {
        Self {
            secure_context: true,
            document_path: "/".to_string(),
            cookies: Arc::new(DashMap::new()),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A store for the document at `url`.
    ///
    /// `https` documents and loopback hosts are secure contexts.
    pub fn for_url(url: &Url) -> Self {
        let secure_context = url.scheme() == "https"
            || matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"));

        Self {
            secure_context,
            document_path: url.path().to_string(),
            ..Self::new()
        }
    }

    /// Parse and apply one cookie line.
    pub fn try_write(&self, line: &str) -> Result<(), CookieError> {
        let parsed = Cookie::parse(line).map_err(|e| CookieError::invalid_line(line, e))?;

        if parsed.http_only().unwrap_or(false) {
            return Err(CookieError::Rejected(
                "HttpOnly cookies cannot be set from a document",
            ));
        }

        let secure = parsed.secure().unwrap_or(false);
        if secure && !self.secure_context {
            return Err(CookieError::Rejected(
                "Secure cookies need a secure document",
            ));
        }

        let path = match parsed.path() {
            Some(p) if p.starts_with('/') => p.to_string(),
            _ => default_path(&self.document_path),
        };

        let now = OffsetDateTime::now_utc();
        // Max-Age wins over Expires (RFC 6265 5.3 step 3).
        let expires = match parsed.max_age() {
            Some(age) => Some(now.checked_add(age).unwrap_or_else(|| {
                if age.is_negative() {
                    PrimitiveDateTime::MIN.assume_utc()
                } else {
                    PrimitiveDateTime::MAX.assume_utc()
                }
            })),
            None => parsed.expires_datetime(),
        };

        let key = (parsed.name().to_string(), path);

        if expires.is_some_and(|e| e <= now) {
            if self.cookies.remove(&key).is_some() {
                tracing::debug!(name = %key.0, path = %key.1, "cookie deleted");
            }
            return Ok(());
        }

        let created = self
            .cookies
            .get(&key)
            .map(|c| c.created)
            .unwrap_or_else(|| self.sequence.fetch_add(1, Ordering::Relaxed));

        tracing::debug!(name = %key.0, path = %key.1, session = expires.is_none(), "cookie stored");
        self.cookies.insert(
            key,
            Entry {
                value: parsed.value().to_string(),
                expires,
                secure,
                created,
            },
        );

        Ok(())
    }

    /// Number of stored cookies, including ones the document cannot see.
    pub fn len(&self) -> usize {
        self.purge_expired(OffsetDateTime::now_utc());
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Clear all cookies.
    pub fn clear(&self) {
        self.cookies.clear();
    }

    fn purge_expired(&self, now: OffsetDateTime) {
        self.cookies.retain(|_, c| !c.is_expired(now));
    }
}

impl CookieStore for MemoryCookieStore {
    fn read(&self) -> String {
        self.purge_expired(OffsetDateTime::now_utc());

        let mut visible: Vec<(usize, u64, String)> = self
            .cookies
            .iter()
            .filter(|e| self.secure_context || !e.value().secure)
            .filter(|e| path_matches(&e.key().1, &self.document_path))
            .map(|e| {
                let (name, path) = e.key();
                (
                    path.len(),
                    e.value().created,
                    format!("{}={}", name, e.value().value),
                )
            })
            .collect();

        // Longest path first, then creation order.
        visible.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        visible
            .into_iter()
            .map(|(_, _, pair)| pair)
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write(&self, line: &str) {
        if let Err(e) = self.try_write(line) {
            tracing::warn!(error = %e, "cookie line ignored");
        }
    }
}

/// Check if request path matches cookie path.
/// Implements RFC 6265 path matching.
fn path_matches(cookie_path: &str, request_path: &str) -> bool {
    if request_path == cookie_path {
        return true;
    }

    if let Some(rest) = request_path.strip_prefix(cookie_path) {
        return cookie_path.ends_with('/') || rest.starts_with('/');
    }

    false
}

/// RFC 6265 default-path: the document path up to its last `/`.
fn default_path(document_path: &str) -> String {
    if !document_path.starts_with('/') {
        return "/".to_string();
    }

    match document_path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => document_path[..i].to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_then_read() {
        let store = MemoryCookieStore::new();
        store.write("a=1; path=/");
        store.write("b=2; path=/");
        assert_eq!(store.read(), "a=1; b=2");
    }

    #[test]
    fn test_overwrite_keeps_creation_order() {
        let store = MemoryCookieStore::new();
        store.write("a=1");
        store.write("b=2");
        store.write("a=3");
        assert_eq!(store.read(), "a=3; b=2");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_past_expiry_deletes() {
        let store = MemoryCookieStore::new();
        store.write("a=1; path=/");
        store.write("a=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/");
        assert_eq!(store.read(), "");
        assert!(store.is_empty());
    }

    #[test]
    fn test_max_age_zero_deletes() {
        let store = MemoryCookieStore::new();
        store.write("a=1");
        store.write("a=1; Max-Age=0");
        assert!(store.is_empty());
    }

    #[test]
    fn test_same_name_different_path() {
        let url = Url::parse("https://example.com/app/page").unwrap();
        let store = MemoryCookieStore::for_url(&url);
        store.write("a=root; path=/");
        store.write("a=app; path=/app");
        store.write("a=other; path=/other");

        assert_eq!(store.read(), "a=app; a=root");
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_default_path_is_document_directory() {
        let url = Url::parse("https://example.com/app/page").unwrap();
        let store = MemoryCookieStore::for_url(&url);
        store.write("a=1");
        assert_eq!(store.read(), "a=1");

        // Only an expiry at the same (name, path) removes it.
        store.write("a=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/");
        assert_eq!(store.read(), "a=1");
        store.write("a=; expires=Thu, 01 Jan 1970 00:00:01 GMT; path=/app");
        assert!(store.is_empty());
    }

    #[test]
    fn test_huge_max_age_is_far_future() {
        let store = MemoryCookieStore::new();
        store.write("a=1; Max-Age=9223372036854775807");
        assert_eq!(store.read(), "a=1");

        store.write("a=1; Max-Age=-9223372036854775808");
        assert!(store.is_empty());
    }

    #[test]
    fn test_secure_needs_secure_document() {
        let url = Url::parse("http://example.com/").unwrap();
        let store = MemoryCookieStore::for_url(&url);

        let err = store.try_write("a=1; Secure").unwrap_err();
        assert!(matches!(err, CookieError::Rejected(_)));
        assert_eq!(store.read(), "");
    }

    #[test]
    fn test_localhost_is_secure_context() {
        let url = Url::parse("http://localhost:8080/").unwrap();
        let store = MemoryCookieStore::for_url(&url);
        store.write("a=1; Secure");
        assert_eq!(store.read(), "a=1");
    }

    #[test]
    fn test_http_only_rejected() {
        let store = MemoryCookieStore::new();
        assert!(store.try_write("a=1; HttpOnly").is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_unparseable_line_is_ignored() {
        let store = MemoryCookieStore::new();
        let err = store.try_write("no-equals-sign").unwrap_err();
        assert!(matches!(err, CookieError::InvalidCookieLine { .. }));

        store.write("=value");
        assert!(store.is_empty());
    }

    #[test]
    fn test_clones_share_cookies() {
        let store = MemoryCookieStore::new();
        let other = store.clone();
        other.write("a=1");
        assert_eq!(store.read(), "a=1");

        store.clear();
        assert!(other.is_empty());
    }

    #[test]
    fn test_path_matches() {
        assert!(path_matches("/", "/anything"));
        assert!(path_matches("/foo", "/foo"));
        assert!(path_matches("/foo", "/foo/bar"));
        assert!(!path_matches("/foo", "/foobar"));
        assert!(!path_matches("/foo", "/"));
    }

    #[test]
    fn test_default_path() {
        assert_eq!(default_path(""), "/");
        assert_eq!(default_path("/"), "/");
        assert_eq!(default_path("/page"), "/");
        assert_eq!(default_path("/app/page"), "/app");
        assert_eq!(default_path("/app/"), "/app");
    }
}
