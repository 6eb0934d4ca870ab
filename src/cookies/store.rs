//! The cookie store seam.
//!
//! A [`CookieStore`] behaves like a browser's `document.cookie`: reading
//! yields every visible cookie as `name=value; name=value`, writing takes a
//! single `name=value; attr=val` line and updates only the named cookie.

use std::sync::Arc;

/// Host-provided flat cookie string.
pub trait CookieStore {
    /// All visible cookies, `name=value` pairs joined by `; `.
    fn read(&self) -> String;

    /// Set, update or delete one cookie from a full cookie line.
    fn write(&self, line: &str);
}

impl<S: CookieStore + ?Sized> CookieStore for &S {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, line: &str) {
        (**self).write(line)
    }
}

impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, line: &str) {
        (**self).write(line)
    }
}

impl<S: CookieStore + ?Sized> CookieStore for Box<S> {
    fn read(&self) -> String {
        (**self).read()
    }

    fn write(&self, line: &str) {
        (**self).write(line)
    }
}
