//! Process-wide write defaults, consulted on every [crate::CookieStore] write.
use std::borrow::Cow;

use biscotti::SameSite;
use serde::Deserialize;

use crate::error::CookieError;
use crate::expiry::Expiry;

#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub(crate) path: Cow<'static, str>,
    pub(crate) domain: Option<Cow<'static, str>>,
    pub(crate) secure: bool,
    pub(crate) same_site: Option<SameSite>,
    pub(crate) expires: Expiry,
}

impl Defaults {
    /// Defaults for a page served over an encrypted (`secure == true`) or plain transport.
    pub fn for_transport(secure: bool) -> Self {
        Defaults {
            secure,
            ..Defaults::default()
        }
    }

    /// Reads defaults from a JSON object such as
    /// `{"path": "/", "secure": true, "same_site": "Lax", "domain": "example.com", "expires_days": 7}`.
    ///
    /// Missing fields keep their usual default.
    pub fn from_json(json: &str) -> Result<Self, CookieError> {
        let raw: RawDefaults =
            serde_json::from_str(json).map_err(|e| CookieError::Config(e.to_string()))?;

        let same_site = match raw.same_site.as_deref() {
            None => None,
            Some(value) => Some(parse_same_site(value)?),
        };

        let mut defaults = Defaults::default();
        if let Some(path) = raw.path {
            defaults.path = path.into();
        }
        defaults.domain = raw.domain.filter(|d| !d.is_empty()).map(Cow::Owned);
        defaults.secure = raw.secure.unwrap_or(false);
        defaults.same_site = same_site;
        if let Some(days) = raw.expires_days {
            defaults.expires = Expiry::InDays(days);
        }
        Ok(defaults)
    }

    #[inline]
    pub fn path<T: Into<Cow<'static, str>>>(mut self, path: T) -> Self {
        self.path = path.into();
        self
    }
    #[inline]
    pub fn domain<T: Into<Cow<'static, str>>>(mut self, domain: T) -> Self {
        self.domain = Some(domain.into());
        self
    }
    #[inline]
    pub fn secure(mut self, value: bool) -> Self {
        self.secure = value;
        self
    }
    #[inline]
    pub fn same_site<T: Into<Option<SameSite>>>(mut self, value: T) -> Self {
        self.same_site = value.into();
        self
    }
    #[inline]
    pub fn expires<T: Into<Expiry>>(mut self, value: T) -> Self {
        self.expires = value.into();
        self
    }

    pub fn is_secure(&self) -> bool {
        self.secure
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Defaults {
            path: Cow::Borrowed("/"),
            domain: None,
            secure: false,
            same_site: None,
            expires: Expiry::Never,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDefaults {
    path: Option<String>,
    domain: Option<String>,
    secure: Option<bool>,
    same_site: Option<String>,
    expires_days: Option<f64>,
}

/// Case-insensitive `Strict` / `Lax` / `None`.
pub(crate) fn parse_same_site(value: &str) -> Result<SameSite, CookieError> {
    match value.to_ascii_lowercase().as_str() {
        "strict" => Ok(SameSite::Strict),
        "lax" => Ok(SameSite::Lax),
        "none" => Ok(SameSite::None),
        _ => Err(CookieError::Config(format!(
            "`{value}` is not a SameSite value, expected Strict, Lax or None"
        ))),
    }
}

pub(crate) fn same_site_str(value: SameSite) -> &'static str {
    match value {
        SameSite::Strict => "Strict",
        SameSite::Lax => "Lax",
        SameSite::None => "None",
    }
}
