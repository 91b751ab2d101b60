//! Cookie lifetimes and their `expires` wire form.
use crate::error::CookieError;
use biscotti::time::{Timestamp, Zoned, civil, fmt::rfc2822, tz::TimeZone};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// When a cookie stops being valid.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Expiry {
    /// A session cookie: no `expires` attribute is written.
    #[default]
    Never,
    /// An absolute point in time.
    At(Timestamp),
    /// A number of days, possibly fractional or negative, counted from the moment of the write.
    InDays(f64),
}

impl Expiry {
    #[inline]
    pub fn in_days(days: f64) -> Self {
        Expiry::InDays(days)
    }

    /// Parses an absolute date.
    ///
    /// Accepted forms are HTTP/RFC 2822 dates (`Mon, 15 Jan 2024 00:00:00 GMT`), RFC 3339
    /// timestamps (`2024-01-15T00:00:00Z`) and civil dates or datetimes, which are read as UTC.
    /// An empty string means [Expiry::Never].
    pub fn parse(value: &str) -> Result<Self, CookieError> {
        let value = value.trim();
        if value.is_empty() {
            return Ok(Expiry::Never);
        }
        if let Ok(zoned) = rfc2822::parse(value) {
            return Ok(Expiry::At(zoned.timestamp()));
        }
        if let Ok(timestamp) = value.parse::<Timestamp>() {
            return Ok(Expiry::At(timestamp));
        }
        if let Ok(datetime) = value.parse::<civil::DateTime>() {
            if let Ok(zoned) = datetime.to_zoned(TimeZone::UTC) {
                return Ok(Expiry::At(zoned.timestamp()));
            }
        }
        if let Ok(date) = value.parse::<civil::Date>() {
            if let Ok(zoned) = date.at(0, 0, 0, 0).to_zoned(TimeZone::UTC) {
                return Ok(Expiry::At(zoned.timestamp()));
            }
        }
        Err(CookieError::InvalidExpiry(value.to_string()))
    }

    /// Like [Expiry::parse], but anything unparseable becomes [Expiry::Never].
    pub fn parse_lossy(value: &str) -> Self {
        Expiry::parse(value).unwrap_or_else(|e| {
            tracing::warn!("{e}, writing a session cookie instead");
            Expiry::Never
        })
    }

    /// The absolute expiry relative to `now`, or `None` when no `expires` attribute should be written.
    pub fn resolve(&self, now: Timestamp) -> Option<Timestamp> {
        match *self {
            Expiry::Never => None,
            Expiry::At(timestamp) => Some(timestamp),
            Expiry::InDays(days) => {
                let offset = days * MILLIS_PER_DAY;
                if !offset.is_finite() {
                    return None;
                }
                let millis = now.as_millisecond().checked_add(offset.round() as i64)?;
                Timestamp::from_millisecond(millis).ok()
            }
        }
    }
}

impl From<Timestamp> for Expiry {
    fn from(value: Timestamp) -> Self {
        Expiry::At(value)
    }
}
impl From<Zoned> for Expiry {
    fn from(value: Zoned) -> Self {
        Expiry::At(value.timestamp())
    }
}
impl From<f64> for Expiry {
    fn from(days: f64) -> Self {
        Expiry::InDays(days)
    }
}
impl From<i32> for Expiry {
    fn from(days: i32) -> Self {
        Expiry::InDays(days as f64)
    }
}

/// Formats a timestamp the way `expires` expects it, e.g. `Mon, 15 Jan 2024 00:00:00 GMT`.
pub(crate) fn http_date(timestamp: Timestamp) -> String {
    timestamp.strftime("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Parses an `expires` attribute value as written by [http_date] or by anyone else.
pub(crate) fn parse_http_date(value: &str) -> Option<Timestamp> {
    match Expiry::parse(value) {
        Ok(Expiry::At(timestamp)) => Some(timestamp),
        _ => None,
    }
}
