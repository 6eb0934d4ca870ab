//! Ordered cookie attributes and their `name=value; name=value` form.

use std::fmt;

/// Cookie attributes in insertion order.
///
/// Inserting a name that is already present replaces its value in place,
/// so the first inserted pair (the cookie itself) always serializes first.
/// Names are compared case-sensitively, as written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    attributes: Vec<(String, String)>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// Insert or replace an attribute.
    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) {
        let name = name.into();
        let value = value.to_string();

        if let Some((_, v)) = self.attributes.iter_mut().find(|(n, _)| *n == name) {
            *v = value;
        } else {
            self.attributes.push((name, value));
        }
    }

    /// Builder form of [`AttributeMap::insert`].
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    /// Insert every attribute of `other`, overriding same-named entries.
    pub fn merge(&mut self, other: &AttributeMap) {
        for (name, value) in &other.attributes {
            self.insert(name.as_str(), value);
        }
    }
}

/// Serializes as a cookie line: `name=value; name=value`.
impl fmt::Display for AttributeMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.attributes.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}={}", name, value)?;
        }
        Ok(())
    }
}

impl<N: Into<String>, V: ToString> FromIterator<(N, V)> for AttributeMap {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut map = AttributeMap::new();
        for (name, value) in iter {
            map.insert(name, value);
        }
        map
    }
}
