//! Base types and error handling.
//!
//! - [`CookieError`](cookieerror::CookieError): errors from store parsing and date formatting

pub mod cookieerror;
