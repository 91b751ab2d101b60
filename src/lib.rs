//! A small, best-effort helper for reading and writing a cookie jar string.
//!
//! crumbjar wraps the environment-maintained `key1=value1; key2=value2` string behind the [Jar]
//! trait and takes care of the fiddly parts around it: percent-encoding keys and values, merging
//! per-call [Attributes] over process-wide [Defaults], and turning an [Expiry] into an
//! `expires` attribute.
//!
//! # Features
//! - Every key and value is encoded before a write and decoded after a read.
//! - Lifetimes are explicit: [Expiry::Never], [Expiry::At] a timestamp, or [Expiry::InDays] from now.
//! - `secure` is switched on by default when the jar reports an encrypted transport.
//! - Nothing fails loudly: refused writes are dropped, use [CookieStore::enabled] to find out.
//! - Typed cookies bind a key to a Rust type stored as JSON, see [cookies].
//! - [MemoryJar] behaves like a browser cookie store and is what the tests run against.
//!
//! # Usage
//! ```
//! use crumbjar::{Attributes, CookieStore, MemoryJar, SameSite};
//!
//! let jar = MemoryJar::new();
//! let store = CookieStore::new(jar.clone());
//!
//! store.set_one("theme", "dark", &Attributes::new().same_site(SameSite::Lax));
//! assert_eq!(jar.last_write().as_deref(), Some("theme=dark;path=/;SameSite=Lax"));
//!
//! store.set_many([("a", "1"), ("b", "2")], &Attributes::new());
//! assert_eq!(store.get_or("missing", "fallback"), "fallback");
//!
//! store.empty();
//! assert!(store.all().is_empty());
//! ```
//!
//! Typed cookies are declared with the `cookie` attribute macro
//! ```
//! use crumbjar::crumbjar_macros::cookie;
//! use crumbjar::cookies::{Cookie, IncomingConfig, OutgoingConfig};
//! use crumbjar::{Attributes, CookieStore, MemoryJar};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq)]
//! pub struct Prefs {
//!     theme: String,
//! }
//!
//! #[cookie(name = "prefs")]
//! pub struct PrefsCookie;
//!
//! impl IncomingConfig for PrefsCookie {
//!     type Get = Prefs;
//! }
//! impl OutgoingConfig for PrefsCookie {
//!     type Insert = Prefs;
//!
//!     fn attributes<'c>() -> Attributes<'c> {
//!         Attributes::new().expires(365)
//!     }
//! }
//!
//! let store = CookieStore::new(MemoryJar::new());
//! let prefs = Cookie::<PrefsCookie, _>::new(&store);
//!
//! prefs.insert(Prefs { theme: "dark".to_string() });
//! assert_eq!(prefs.get(), Ok(Prefs { theme: "dark".to_string() }));
//! ```
extern crate self as crumbjar;

mod attributes;
mod config;
pub mod cookies;
mod encoding;
mod error;
mod expiry;
mod jar;
mod store;

pub use attributes::Attributes;
pub use biscotti::{SameSite, time};
pub use config::Defaults;
pub use crumbjar_macros;
pub use encoding::{decode, encode, try_decode};
pub use error::CookieError;
pub use expiry::Expiry;
pub use jar::{Jar, MemoryJar};
pub use store::CookieStore;
