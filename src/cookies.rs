//! Typed cookies: a jar key bound to a Rust type, stored as JSON.
use crate::attributes::Attributes;
use crate::error::CookieError;
use crate::jar::Jar;
use crate::store::CookieStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::any::type_name;

/// Base struct for cookie generic types
pub struct Cookie<'s, T, J> {
    store: &'s CookieStore<J>,
    attributes: Option<Attributes<'s>>,
    _marker: std::marker::PhantomData<T>,
}

impl<'s, T, J: Jar> Cookie<'s, T, J> {
    /// Create a cookie instance for any generic type parameter
    pub fn new(store: &'s CookieStore<J>) -> Self {
        Cookie {
            store,
            attributes: None,
            _marker: std::marker::PhantomData,
        }
    }

    /// Replaces the type's preset [OutgoingConfig::attributes] for this instance only.
    pub fn with_attributes(mut self, attributes: Attributes<'s>) -> Self {
        self.attributes = Some(attributes);
        self
    }
}

/// Provide the `get` method for any generic type parameter that implements [IncomingConfig]
impl<T: IncomingConfig, J: Jar> Cookie<'_, T, J> {
    /// Reads the entry named by [CookieName] and deserializes it into `Get`.
    ///
    /// # Example
    /// ```
    /// use crumbjar::crumbjar_macros::cookie;
    /// use crumbjar::cookies::{Cookie, IncomingConfig};
    /// use crumbjar::{Attributes, CookieStore, MemoryJar};
    ///
    /// #[cookie(name = "visits")]
    /// pub struct Visits;
    ///
    /// impl IncomingConfig for Visits {
    ///     type Get = u32;
    /// }
    ///
    /// let store = CookieStore::new(MemoryJar::new());
    /// store.set_one("visits", "3", &Attributes::new());
    ///
    /// assert_eq!(Cookie::<Visits, _>::new(&store).get(), Ok(3));
    /// ```
    pub fn get(&self) -> Result<T::Get, CookieError> {
        let data = self
            .store
            .get(T::COOKIE_NAME)
            .ok_or(CookieError::NotFound(T::COOKIE_NAME.to_string()))?;

        let data = serde_json::from_str(&data).map_err(|_| {
            CookieError::Deserialization(data.clone(), type_name::<T::Get>().to_string())
        })?;
        Ok(data)
    }
}

/// Provide `insert` and `remove` for any generic type parameter that implements [OutgoingConfig]
impl<T: OutgoingConfig, J: Jar> Cookie<'_, T, J> {
    /// Serializes `value` and writes it under the type's name.
    ///
    /// # Example
    /// ```
    /// use crumbjar::crumbjar_macros::cookie;
    /// use crumbjar::cookies::{Cookie, OutgoingConfig};
    /// use crumbjar::{CookieStore, MemoryJar};
    ///
    /// #[cookie(name = "greeting")]
    /// pub struct Greeting;
    ///
    /// impl OutgoingConfig for Greeting {
    ///     type Insert = String;
    /// }
    ///
    /// let store = CookieStore::new(MemoryJar::new());
    /// Cookie::<Greeting, _>::new(&store).insert("hi there".to_string());
    ///
    /// assert_eq!(store.get("greeting").as_deref(), Some("\"hi there\""));
    /// ```
    pub fn insert(&self, value: T::Insert) {
        let data = T::serialize(value);

        let attributes = match &self.attributes {
            Some(attributes) => attributes,
            None => &T::attributes(),
        };

        self.store.set_one(T::COOKIE_NAME, &data, attributes);
    }

    /// Expires the entry. Removal matches on name, path and domain, so the same attributes used
    /// by `insert` are applied.
    pub fn remove(&self) {
        let attributes = match &self.attributes {
            Some(attributes) => attributes,
            None => &T::attributes(),
        };

        self.store.remove_specific([T::COOKIE_NAME], Some(attributes));
    }
}

/// Configures `insert` and `remove` on [Cookie].
///
/// ```
/// use crumbjar::crumbjar_macros::cookie;
/// use crumbjar::cookies::OutgoingConfig;
/// use crumbjar::{Attributes, SameSite};
///
/// #[cookie(name = "__session")]
/// pub struct Session;
///
/// impl OutgoingConfig for Session {
///     type Insert = (String, u32);
///
///     fn attributes<'c>() -> Attributes<'c> {
///         Attributes::new().same_site(SameSite::Strict).expires(1)
///     }
/// }
/// ```
pub trait OutgoingConfig: CookieName {
    /// The serialization type when writing the cookie
    type Insert: Serialize;

    /// Provides default serialization for a cookie. This can be overwriting
    fn serialize(values: Self::Insert) -> Value {
        json!(values)
    }

    /// Provides preset attributes for a cookie. Unset fields fall back to the store defaults
    fn attributes<'c>() -> Attributes<'c> {
        Attributes::new()
    }
}

/// Configures `get` on [Cookie].
pub trait IncomingConfig: CookieName {
    /// The deserialization type when reading the cookie
    type Get: DeserializeOwned;
}

/// This is the base implementation of a cookie type
///
/// This is either implemented manually or with macro `#[cookie(name = "...")]`
pub trait CookieName {
    const COOKIE_NAME: &'static str;
}
