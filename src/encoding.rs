//! Percent-encoding for jar keys and values.
//!
//! Only the characters that would break the `key=value; key=value` wire format are escaped:
//! `,` `;` `"` `\` `=` `%` and whitespace. Everything else, non-ASCII included, is written as is.
use crate::error::CookieError;
use percent_encoding::{percent_decode_str, percent_encode_byte};
use std::fmt::Display;

fn needs_escape(c: char) -> bool {
    matches!(c, ',' | ';' | '"' | '\\' | '=' | '%') || c.is_whitespace() || c == '\u{feff}'
}

/// Stringifies `value` and percent-escapes the reserved characters.
///
/// Multi-byte characters are escaped byte by byte from their UTF-8 form, so `decode` restores them.
pub fn encode<T: Display + ?Sized>(value: &T) -> String {
    let value = value.to_string();
    let mut encoded = String::with_capacity(value.len());
    let mut buf = [0u8; 4];

    for c in value.chars() {
        if needs_escape(c) {
            for byte in c.encode_utf8(&mut buf).bytes() {
                encoded.push_str(percent_encode_byte(byte));
            }
        } else {
            encoded.push(c);
        }
    }
    encoded
}

/// Percent-decodes `value`, failing when the decoded bytes are not valid UTF-8.
pub fn try_decode(value: &str) -> Result<String, CookieError> {
    percent_decode_str(value)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|_| CookieError::Decoding(value.to_string()))
}

/// Percent-decodes `value`, handing back the raw input when it cannot be decoded.
pub fn decode(value: &str) -> String {
    match try_decode(value) {
        Ok(decoded) => decoded,
        Err(e) => {
            tracing::warn!("{e}, keeping the raw value");
            value.to_string()
        }
    }
}
