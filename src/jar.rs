//! The environment-maintained cookie string and an in-memory stand-in for it.
use std::{cell::RefCell, rc::Rc};

use biscotti::time::Timestamp;

use crate::expiry::parse_http_date;

/// Access to the ambient cookie string of the host environment.
///
/// Reads return every visible entry as `key1=value1; key2=value2`. A write takes one
/// `key=value;attr=...` string and may be silently dropped by the environment.
pub trait Jar {
    fn read_raw(&self) -> String;

    fn write_raw(&self, cookie: &str);

    /// Whether the current page was loaded over an encrypted transport.
    fn is_secure_transport(&self) -> bool {
        false
    }

    /// A direct "cookies enabled" flag, when the environment exposes one.
    fn cookies_enabled(&self) -> Option<bool> {
        None
    }
}

impl<J: Jar + ?Sized> Jar for &J {
    fn read_raw(&self) -> String {
        (**self).read_raw()
    }
    fn write_raw(&self, cookie: &str) {
        (**self).write_raw(cookie)
    }
    fn is_secure_transport(&self) -> bool {
        (**self).is_secure_transport()
    }
    fn cookies_enabled(&self) -> Option<bool> {
        (**self).cookies_enabled()
    }
}

#[derive(Debug, Clone, PartialEq)]
struct StoredCookie {
    name: String,
    value: String,
    path: String,
    domain: Option<String>,
    expires: Option<Timestamp>,
}

impl StoredCookie {
    fn same_identity(&self, other: &StoredCookie) -> bool {
        self.name == other.name && self.path == other.path && self.domain == other.domain
    }
    fn is_expired(&self, now: Timestamp) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

#[derive(Debug, Default)]
struct JarState {
    entries: Vec<StoredCookie>,
    writes: Vec<String>,
}

/// An in-memory [Jar] that behaves like a browser's cookie store.
///
/// Entries are matched by name, path and domain, an expiry in the past deletes the entry, and
/// `secure` writes are refused unless the jar was created for a secure transport.
/// Clones share the same entries.
#[derive(Debug, Clone)]
pub struct MemoryJar {
    state: Rc<RefCell<JarState>>,
    secure_transport: bool,
    accepts_writes: bool,
}

impl MemoryJar {
    pub fn new() -> Self {
        MemoryJar {
            state: Rc::new(RefCell::new(JarState::default())),
            secure_transport: false,
            accepts_writes: true,
        }
    }
    /// A jar on an encrypted transport.
    pub fn secure() -> Self {
        MemoryJar {
            secure_transport: true,
            ..MemoryJar::new()
        }
    }
    /// A jar whose environment has cookies turned off: every write is dropped.
    pub fn disabled() -> Self {
        MemoryJar {
            accepts_writes: false,
            ..MemoryJar::new()
        }
    }
    /// Every string handed to [Jar::write_raw], dropped ones included, oldest first.
    pub fn writes(&self) -> Vec<String> {
        self.state.borrow().writes.clone()
    }
    pub fn last_write(&self) -> Option<String> {
        self.state.borrow().writes.last().cloned()
    }
    /// Number of unexpired entries.
    pub fn len(&self) -> usize {
        let now = Timestamp::now();
        self.state
            .borrow()
            .entries
            .iter()
            .filter(|entry| !entry.is_expired(now))
            .count()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn parse_write(&self, cookie: &str, now: Timestamp) -> Option<(StoredCookie, bool)> {
        let mut parts = cookie.split(';');
        let pair = parts.next()?.trim();
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) => (name.trim(), value.trim()),
            None => ("", pair),
        };

        let mut stored = StoredCookie {
            name: name.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            domain: None,
            expires: None,
        };
        let mut secure = false;
        let mut max_age = None;

        for attribute in parts {
            let (key, value) = match attribute.split_once('=') {
                Some((key, value)) => (key.trim(), value.trim()),
                None => (attribute.trim(), ""),
            };
            match key.to_ascii_lowercase().as_str() {
                "expires" => stored.expires = parse_http_date(value),
                "max-age" => max_age = value.parse::<i64>().ok(),
                "path" if value.starts_with('/') => stored.path = value.to_string(),
                "domain" if !value.is_empty() => {
                    stored.domain = Some(value.trim_start_matches('.').to_ascii_lowercase())
                }
                "secure" => secure = true,
                _ => {}
            }
        }

        // max-age wins over expires
        if let Some(seconds) = max_age {
            let millis = now.as_millisecond().saturating_add(seconds.saturating_mul(1000));
            let fallback = if seconds > 0 { Timestamp::MAX } else { Timestamp::MIN };
            stored.expires = Some(Timestamp::from_millisecond(millis).unwrap_or(fallback));
        }

        Some((stored, secure))
    }
}

impl Default for MemoryJar {
    fn default() -> Self {
        MemoryJar::new()
    }
}

impl Jar for MemoryJar {
    fn read_raw(&self) -> String {
        let now = Timestamp::now();
        self.state
            .borrow()
            .entries
            .iter()
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| format!("{}={}", entry.name, entry.value))
            .collect::<Vec<_>>()
            .join("; ")
    }

    fn write_raw(&self, cookie: &str) {
        let mut state = self.state.borrow_mut();
        state.writes.push(cookie.to_string());

        if !self.accepts_writes {
            tracing::trace!("cookies are disabled, dropping `{cookie}`");
            return;
        }

        let now = Timestamp::now();
        let Some((stored, secure)) = self.parse_write(cookie, now) else {
            return;
        };
        if secure && !self.secure_transport {
            tracing::trace!("refusing secure cookie `{}` on an insecure transport", stored.name);
            return;
        }

        let existing = state.entries.iter().position(|entry| entry.same_identity(&stored));

        if stored.is_expired(now) {
            if let Some(index) = existing {
                state.entries.remove(index);
            }
            return;
        }
        match existing {
            Some(index) => state.entries[index] = stored,
            None => state.entries.push(stored),
        }
    }

    fn is_secure_transport(&self) -> bool {
        self.secure_transport
    }

    fn cookies_enabled(&self) -> Option<bool> {
        Some(self.accepts_writes)
    }
}
