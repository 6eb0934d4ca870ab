//! Namespaced cookie access over a flat cookie string.
//!
//! This module provides:
//!
//! - **Codec**: [`CookieCodec`] qualifies keys with a namespace, encodes
//!   values and serializes cookie lines
//! - **Store seam**: [`CookieStore`], the `document.cookie`-like string the
//!   codec reads and writes
//! - **In-memory store**: [`MemoryCookieStore`], a browser-like document
//!   cookie string for tests and non-browser hosts
//!
//! # Architecture
//!
//! | Type | Responsibility |
//! |------|----------------|
//! | [`CookieCodec`] | Qualify, encode, serialize, match |
//! | [`AttributeMap`] | Ordered attributes with in-place override |
//! | [`Expiry`] | Session / days / absolute / raw expiry |
//! | [`CookieStore`] | Read and write the cookie string |
//! | [`MemoryCookieStore`] | (name, path) keyed store with expiry |
//!
//! # Example
//!
//! ```rust
//! use nscookie::cookies::{AttributeMap, CookieCodec, Expiry, MemoryCookieStore};
//!
//! let store = MemoryCookieStore::new();
//! let prefs = CookieCodec::with_namespace(store.clone(), "prefs.");
//!
//! prefs.set_with(
//!     "lang",
//!     "en-GB",
//!     Expiry::Days(365),
//!     "/",
//!     &AttributeMap::new().with("SameSite", "Strict"),
//! );
//! assert_eq!(prefs.get_or("lang", "en-US"), "en-GB");
//! assert_eq!(prefs.get_or("currency", "EUR"), "EUR");
//! ```

pub mod attributes;
pub mod codec;
pub mod encoding;
pub mod expiry;
pub mod memory;
pub mod store;

pub use attributes::AttributeMap;
pub use codec::{CodecConfig, CookieCodec};
pub use cookie::SameSite;
pub use expiry::{http_date, Expiry};
pub use memory::MemoryCookieStore;
pub use store::CookieStore;
