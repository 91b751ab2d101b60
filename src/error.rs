use thiserror::Error;

/// The error returned by the strict parsing helpers and by typed [crate::cookies::Cookie] reads.
///
/// [crate::CookieStore] itself never fails; it degrades silently and logs instead.
#[derive(Error, Debug, PartialEq)]
pub enum CookieError {
    #[error("`{0}` does not exist")]
    NotFound(String),
    #[error("Failed to deserialize `{0}` to type `{1}`")]
    Deserialization(String, String),
    #[error("`{0}` is not a valid percent-encoded UTF-8 string")]
    Decoding(String),
    #[error("`{0}` cannot be parsed as an expiry date")]
    InvalidExpiry(String),
    #[error("Invalid cookie defaults: {0}")]
    Config(String),
}
