//! # nscookie
//!
//! Namespaced reads and writes of single cookies through a flat,
//! `document.cookie`-style string.
//!
//! `nscookie` owns the fiddly part of client-side cookie handling: qualifying
//! keys with a namespace, percent-encoding values so any string round-trips,
//! normalizing expiry values to HTTP dates, layering default and caller
//! attributes, and picking one cookie's value back out of the combined
//! cookie string.
//!
//! ## Quick Start
//!
//! ```rust
//! use nscookie::cookies::{CookieCodec, Expiry, MemoryCookieStore};
//!
//! let store = MemoryCookieStore::new();
//! let cookies = CookieCodec::with_namespace(store, "shop_");
//!
//! cookies.set("cart", "sku-1; sku-2", Expiry::Days(7));
//! assert!(cookies.isset("cart"));
//! assert_eq!(cookies.get("cart").as_deref(), Some("sku-1; sku-2"));
//! ```
//!
//! ## Modules
//!
//! - [`base`] - Error definitions
//! - [`cookies`] - Codec, store seam, and in-memory store

pub mod base;
pub mod cookies;
