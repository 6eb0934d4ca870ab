//! Namespaced cookie reads and writes over a [`CookieStore`].

use crate::cookies::attributes::AttributeMap;
use crate::cookies::encoding::{decode, encode_name, encode_value};
use crate::cookies::expiry::{Expiry, EXPIRED};
use crate::cookies::store::CookieStore;
use cookie::SameSite;
use time::OffsetDateTime;

/// Configuration for a [`CookieCodec`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodecConfig {
    /// Prefix prepended to every key (default: empty)
    pub namespace: String,
    /// Path used when none is given (default: "/")
    pub path: String,
    /// Default `SameSite` attribute (default: Lax)
    pub same_site: SameSite,
    /// Add `Secure=true` by default (default: true). When false the
    /// attribute is left out, since browsers treat any `Secure` as set.
    pub secure: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            path: "/".to_string(),
            same_site: SameSite::Lax,
            secure: true,
        }
    }
}

impl CodecConfig {
    /// Default configuration under `namespace`.
    pub fn namespaced(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            ..Default::default()
        }
    }
}

/// Reads and writes single cookies under a key namespace.
///
/// Values are percent-encoded on write and decoded on read, so any string
/// round-trips. The namespace is fixed for the lifetime of the codec;
/// several codecs with distinct namespaces can share one store.
///
/// # Example
/// ```rust
/// use nscookie::cookies::{CookieCodec, CookieStore, MemoryCookieStore};
///
/// let store = MemoryCookieStore::new();
/// let cookies = CookieCodec::with_namespace(&store, "app_");
///
/// cookies.set("theme", "dark mode", 30);
/// assert_eq!(cookies.get("theme").as_deref(), Some("dark mode"));
/// assert_eq!(store.read(), "app_theme=dark%20mode");
///
/// cookies.remove("theme");
/// assert!(!cookies.isset("theme"));
/// ```
#[derive(Debug, Clone)]
pub struct CookieCodec<S> {
    store: S,
    config: CodecConfig,
}

impl<S: CookieStore> CookieCodec<S> {
    /// A codec without a namespace.
    pub fn new(store: S) -> Self {
        Self::with_config(store, CodecConfig::default())
    }

    pub fn with_namespace(store: S, namespace: impl Into<String>) -> Self {
        Self::with_config(store, CodecConfig::namespaced(namespace))
    }

    pub fn with_config(store: S, config: CodecConfig) -> Self {
        Self { store, config }
    }

    pub fn namespace(&self) -> &str {
        &self.config.namespace
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// The cookie name used on the wire for `key`.
    pub fn qualify(&self, key: &str) -> String {
        encode_name(&format!("{}{}", self.config.namespace, key))
    }

    /// Set a cookie at the default path.
    pub fn set(&self, key: &str, value: &str, expires: impl Into<Expiry>) {
        let path = self.config.path.clone();
        self.set_with(key, value, expires, &path, &AttributeMap::new());
    }

    /// Set a cookie with an explicit path and extra attributes.
    ///
    /// `options` override the defaults, including `path`, `expires`,
    /// `SameSite` and `Secure`.
    pub fn set_with(
        &self,
        key: &str,
        value: &str,
        expires: impl Into<Expiry>,
        path: &str,
        options: &AttributeMap,
    ) {
        let line = self.serialize(
            key,
            value,
            &expires.into(),
            path,
            options,
            OffsetDateTime::now_utc(),
        );

        tracing::debug!(key = %key, namespace = %self.config.namespace, path = %path, "writing cookie");
        self.store.write(&line);
    }

    /// Build the cookie line `set_with` writes, with `now` anchoring
    /// relative expiry.
    ///
    /// Attributes are layered in order: the cookie pair, `expires` and
    /// `path`, then the `SameSite`/`Secure` defaults, then `options`. A later
    /// layer replaces a same-named attribute in place.
    pub fn serialize(
        &self,
        key: &str,
        value: &str,
        expires: &Expiry,
        path: &str,
        options: &AttributeMap,
        now: OffsetDateTime,
    ) -> String {
        let mut attributes = AttributeMap::new();
        attributes.insert(self.qualify(key), encode_value(value));
        if let Some(expires) = expires.resolve(now) {
            attributes.insert("expires", expires);
        }
        attributes.insert("path", path);
        attributes.insert("SameSite", self.config.same_site);
        if self.config.secure {
            attributes.insert("Secure", true);
        }
        attributes.merge(options);

        attributes.to_string()
    }

    /// The decoded value of `key`, if the cookie is set.
    pub fn get(&self, key: &str) -> Option<String> {
        let name = self.qualify(key);
        let cookies = self.store.read();
        let value = lookup(&cookies, &name).map(decode);

        tracing::trace!(name = %name, found = value.is_some(), "cookie lookup");
        value
    }

    /// The decoded value of `key`, or `fallback` untouched.
    pub fn get_or(&self, key: &str, fallback: impl Into<String>) -> String {
        self.get(key).unwrap_or_else(|| fallback.into())
    }

    /// Whether a non-empty cookie named `key` is visible.
    pub fn isset(&self, key: &str) -> bool {
        let name = self.qualify(key);
        lookup(&self.store.read(), &name).is_some()
    }

    /// Expire `key` at the default path.
    pub fn remove(&self, key: &str) {
        let path = self.config.path.clone();
        self.remove_at(key, &path);
    }

    /// Expire `key` at `path`.
    pub fn remove_at(&self, key: &str, path: &str) {
        tracing::debug!(key = %key, namespace = %self.config.namespace, path = %path, "removing cookie");
        self.set_with(key, "", EXPIRED, path, &AttributeMap::new());
    }
}

/// First non-empty value for `name` in a `name=value; name=value` string.
fn lookup<'a>(cookies: &'a str, name: &str) -> Option<&'a str> {
    cookies
        .split(';')
        .filter_map(|pair| {
            pair.trim_start_matches(' ').split_once('=')
        })
        .find(|(n, v)| *n == name && !v.is_empty())
        .map(|(_, v)| v)
}
