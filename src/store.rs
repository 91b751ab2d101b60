//! crumbjar's core functionality
use std::collections::HashMap;
use std::fmt::Display;

use biscotti::time::Timestamp;

use crate::attributes::Attributes;
use crate::config::{Defaults, same_site_str};
use crate::encoding::{decode, encode};
use crate::expiry::{Expiry, http_date};
use crate::jar::Jar;

/// Key written and removed by the [CookieStore::enabled] probe.
const PROBE_KEY: &str = "_";

/// Reads and writes a [Jar] with encoding applied to every key and value.
///
/// Every operation is best effort: writes the environment refuses are dropped silently, and
/// nothing here returns an error. Use [CookieStore::get] or [CookieStore::enabled] to find out
/// after the fact whether a write landed.
///
/// Writing methods take `&self` and return it, so calls chain:
/// ```
/// use crumbjar::{Attributes, CookieStore, MemoryJar};
///
/// let store = CookieStore::new(MemoryJar::new());
/// store
///     .set_one("theme", "dark", &Attributes::new())
///     .set_one("lang", "en", &Attributes::new().expires(30));
///
/// assert_eq!(store.get("theme").as_deref(), Some("dark"));
/// ```
pub struct CookieStore<J> {
    jar: J,
    defaults: Defaults,
}

impl<J: Jar> CookieStore<J> {
    /// Create a store whose defaults follow the jar's transport: `secure` is on for encrypted pages.
    pub fn new(jar: J) -> Self {
        let defaults = Defaults::for_transport(jar.is_secure_transport());
        CookieStore { jar, defaults }
    }

    pub fn with_defaults(jar: J, defaults: Defaults) -> Self {
        CookieStore { jar, defaults }
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn defaults_mut(&mut self) -> &mut Defaults {
        &mut self.defaults
    }

    pub fn jar(&self) -> &J {
        &self.jar
    }

    /// Writes a single entry, merging `attributes` over the store defaults.
    ///
    /// The written string has the form
    /// `key=value[;expires=...][;path=...][;domain=...][;secure][;SameSite=...]`.
    pub fn set_one<V: Display + ?Sized>(
        &self,
        key: &str,
        value: &V,
        attributes: &Attributes<'_>,
    ) -> &Self {
        let cookie = self.serialize(key, value, attributes, Timestamp::now());
        tracing::debug!(key, "writing `{cookie}`");
        self.jar.write_raw(&cookie);
        self
    }

    /// Writes every `(key, value)` pair with the same attributes.
    pub fn set_many<I, K, V>(&self, entries: I, attributes: &Attributes<'_>) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        for (key, value) in entries {
            self.set_one(key.as_ref(), &value, attributes);
        }
        self
    }

    /// Writes the entry only when `key` is not already in the jar, reporting whether it did.
    pub fn try_set_default<V: Display + ?Sized>(
        &self,
        key: &str,
        value: &V,
        attributes: &Attributes<'_>,
    ) -> bool {
        if self.get(key).is_some() {
            tracing::trace!(key, "already set, keeping the existing value");
            return false;
        }
        self.set_one(key, value, attributes);
        true
    }

    /// [CookieStore::try_set_default] for chaining.
    pub fn set_default_one<V: Display + ?Sized>(
        &self,
        key: &str,
        value: &V,
        attributes: &Attributes<'_>,
    ) -> &Self {
        self.try_set_default(key, value, attributes);
        self
    }

    /// Writes each pair whose key is not already in the jar.
    pub fn set_default_many<I, K, V>(&self, entries: I, attributes: &Attributes<'_>) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Display,
    {
        for (key, value) in entries {
            self.try_set_default(key.as_ref(), &value, attributes);
        }
        self
    }

    /// Expires every key immediately, using the store defaults for path and domain.
    pub fn remove<I, K>(&self, keys: I) -> &Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.remove_with(keys, &Attributes::new())
    }

    /// Expires every key using the caller's path, domain and SameSite.
    ///
    /// The environment only treats a write as the same cookie when name, path and domain all
    /// match, so entries written with a custom path or domain must be removed through here.
    /// Any expiry in `attributes` is ignored. `None` behaves like [CookieStore::remove].
    pub fn remove_specific<I, K>(&self, keys: I, attributes: Option<&Attributes<'_>>) -> &Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        match attributes {
            Some(attributes) => self.remove_with(keys, attributes),
            None => self.remove(keys),
        }
    }

    /// Removes every key currently visible in the jar.
    ///
    /// The keys are snapshotted first, so writes from elsewhere in between are not seen.
    pub fn empty(&self) -> &Self {
        let keys: Vec<String> = self.all().into_keys().collect();
        self.remove(keys)
    }

    /// The decoded value stored under `key`.
    pub fn get(&self, key: &str) -> Option<String> {
        self.all().remove(key)
    }

    pub fn get_or(&self, key: &str, fallback: &str) -> String {
        self.get(key).unwrap_or_else(|| fallback.to_string())
    }

    /// Looks up several keys against a single read of the jar.
    pub fn get_many<I, K>(&self, keys: I) -> HashMap<String, Option<String>>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let cookies = self.all();
        keys.into_iter()
            .map(|key| {
                let key = key.as_ref();
                (key.to_string(), cookies.get(key).cloned())
            })
            .collect()
    }

    pub fn get_many_or<I, K>(&self, keys: I, fallback: &str) -> HashMap<String, String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        self.get_many(keys)
            .into_iter()
            .map(|(key, value)| (key, value.unwrap_or_else(|| fallback.to_string())))
            .collect()
    }

    /// Every entry in the jar, decoded. When a key appears more than once, the last one wins.
    pub fn all(&self) -> HashMap<String, String> {
        let raw = self.jar.read_raw();
        tracing::trace!("read `{raw}`");

        let mut result = HashMap::new();
        if raw.is_empty() {
            return result;
        }

        for entry in raw.split("; ") {
            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            result.insert(decode(key), decode(value));
        }
        result
    }

    /// Whether the environment accepts cookie writes.
    ///
    /// Trusts the jar's own flag when it says yes; otherwise writes a probe entry, reads it
    /// back and removes it again.
    pub fn enabled(&self) -> bool {
        if self.jar.cookies_enabled() == Some(true) {
            return true;
        }

        let accepted = self
            .set_one(PROBE_KEY, PROBE_KEY, &Attributes::new())
            .get(PROBE_KEY)
            .is_some_and(|value| value == PROBE_KEY);
        self.remove([PROBE_KEY]);

        tracing::trace!(accepted, "cookie probe finished");
        accepted
    }

    fn remove_with<I, K>(&self, keys: I, attributes: &Attributes<'_>) -> &Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        let removal = attributes.clone().expires(Expiry::InDays(-1.0));
        for key in keys {
            tracing::debug!(key = key.as_ref(), "removing");
            self.set_one(key.as_ref(), "", &removal);
        }
        self
    }

    fn serialize<V: Display + ?Sized>(
        &self,
        key: &str,
        value: &V,
        attributes: &Attributes<'_>,
        now: Timestamp,
    ) -> String {
        let defaults = &self.defaults;
        let mut cookie = format!("{}={}", encode(key), encode(value));

        let expires = attributes.expires.unwrap_or(defaults.expires);
        if let Some(timestamp) = expires.resolve(now) {
            cookie.push_str(";expires=");
            cookie.push_str(&http_date(timestamp));
        }

        let path = attributes.path.as_deref().unwrap_or(&*defaults.path);
        if !path.is_empty() {
            cookie.push_str(";path=");
            cookie.push_str(path);
        }

        let domain = attributes
            .domain
            .as_deref()
            .filter(|domain| !domain.is_empty())
            .or(defaults.domain.as_deref().filter(|domain| !domain.is_empty()));
        if let Some(domain) = domain {
            cookie.push_str(";domain=");
            cookie.push_str(domain);
        }

        if attributes.secure.unwrap_or(defaults.secure) {
            cookie.push_str(";secure");
        }

        let same_site = attributes.same_site.unwrap_or(defaults.same_site);
        if let Some(same_site) = same_site {
            cookie.push_str(";SameSite=");
            cookie.push_str(same_site_str(same_site));
        }

        cookie
    }
}
