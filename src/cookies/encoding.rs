//! Percent-encoding for cookie names and values.
//!
//! Both sets start from what `encodeURIComponent` escapes and then leave a
//! few more characters literal, so stored cookies stay readable while `;`,
//! `,`, whitespace and `%` never reach the store unescaped.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters `encodeURIComponent` leaves alone.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Cookie names: token characters stay literal, parentheses do not.
const NAME: &AsciiSet = &URI_COMPONENT
    .add(b'(')
    .add(b')')
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'^')
    .remove(b'`')
    .remove(b'|');

/// Cookie values: everything allowed in a cookie-octet stays literal.
const VALUE: &AsciiSet = &URI_COMPONENT
    .remove(b'#')
    .remove(b'$')
    .remove(b'&')
    .remove(b'+')
    .remove(b'/')
    .remove(b':')
    .remove(b'<')
    .remove(b'=')
    .remove(b'>')
    .remove(b'?')
    .remove(b'@')
    .remove(b'[')
    .remove(b']')
    .remove(b'^')
    .remove(b'`')
    .remove(b'{')
    .remove(b'|')
    .remove(b'}');

/// Encode a qualified cookie name.
pub fn encode_name(name: &str) -> String {
    utf8_percent_encode(name, NAME).to_string()
}

/// Encode a cookie value.
pub fn encode_value(value: &str) -> String {
    utf8_percent_encode(value, VALUE).to_string()
}

/// Decode `%XX` escapes produced by [`encode_value`] or by another writer.
///
/// Malformed escapes are kept as they are. If the escapes do not decode to
/// valid UTF-8 the raw input is returned unchanged.
pub fn decode(raw: &str) -> String {
    if !raw.contains('%') {
        return raw.to_string();
    }

    match percent_decode_str(raw).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(e) => {
            tracing::debug!(value = %raw, error = %e, "cookie value is not valid UTF-8 once decoded");
            raw.to_string()
        }
    }
}
