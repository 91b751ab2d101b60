use std::borrow::Cow;
use biscotti::SameSite;

use crate::expiry::Expiry;

/// Per-call options for a jar write.
///
/// Every field left unset falls back to the store's [crate::Defaults].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes<'c> {
    pub(crate) path: Option<Cow<'c, str>>,
    pub(crate) domain: Option<Cow<'c, str>>,
    pub(crate) secure: Option<bool>,
    pub(crate) same_site: Option<Option<SameSite>>,
    pub(crate) expires: Option<Expiry>,
}
impl<'c> Attributes<'c> {

    pub fn new() -> Self {
        Attributes {
            path: None,
            domain: None,
            secure: None,
            same_site: None,
            expires: None,
        }
    }
    /// An empty path suppresses the `path` attribute entirely.
    #[inline]
    pub fn path<T: Into<Cow<'c, str>>>(mut self, path: T) -> Self {
        self.path = Some(path.into());
        self
    }
    /// An empty domain counts as unset.
    #[inline]
    pub fn domain<T: Into<Cow<'c, str>>>(mut self, domain: T) -> Self {
        self.domain = Some(domain.into());
        self
    }
    /// `Some(false)` omits `secure` even when the defaults ask for it, `None` defers to them.
    #[inline]
    pub fn secure<T: Into<Option<bool>>>(mut self, value: T) -> Self {
        self.secure = value.into();
        self
    }
    /// Passing `None` omits `SameSite` regardless of the defaults.
    #[inline]
    pub fn same_site<T: Into<Option<SameSite>>>(mut self, value: T) -> Self {
        self.same_site = Some(value.into());
        self
    }
    #[inline]
    pub fn expires<T: Into<Expiry>>(mut self, value: T) -> Self {
        self.expires = Some(value.into());
        self
    }
    /// Parses `value` with [Expiry::parse_lossy].
    #[inline]
    pub fn expires_at_str(self, value: &str) -> Self {
        self.expires(Expiry::parse_lossy(value))
    }
}

impl From<Expiry> for Attributes<'_> {
    fn from(expires: Expiry) -> Self {
        Attributes::new().expires(expires)
    }
}
