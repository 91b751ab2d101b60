use crumbjar::time::{Timestamp, civil::date, tz::TimeZone};
use crumbjar::{Attributes, CookieStore, Defaults, Expiry, Jar, MemoryJar, SameSite};
use std::collections::HashMap;

// A jar that does not expose a "cookies enabled" flag, so `enabled` has to probe.
struct NoFlagJar(MemoryJar);

impl Jar for NoFlagJar {
    fn read_raw(&self) -> String {
        self.0.read_raw()
    }
    fn write_raw(&self, cookie: &str) {
        self.0.write_raw(cookie)
    }
}

// Accepts writes but never shows them, like an environment that blocks third-party cookies.
struct BlackHoleJar;

impl Jar for BlackHoleJar {
    fn read_raw(&self) -> String {
        String::new()
    }
    fn write_raw(&self, _cookie: &str) {}
}

// A jar with a fixed cookie string that ignores writes.
struct FixedJar(&'static str);

impl Jar for FixedJar {
    fn read_raw(&self) -> String {
        self.0.to_string()
    }
    fn write_raw(&self, _cookie: &str) {}
}

#[test]
fn set_then_get() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_one("k", "v", &Attributes::new());

    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn set_accepts_any_displayable_value() {
    let store = CookieStore::new(MemoryJar::new());
    store
        .set_one("count", &42, &Attributes::new())
        .set_one("ratio", &0.5, &Attributes::new());

    assert_eq!(store.get("count").as_deref(), Some("42"));
    assert_eq!(store.get("ratio").as_deref(), Some("0.5"));
}

#[test]
fn negative_expiry_removes() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_one("k", "v", &Attributes::new());
    store.set_one("k", "v", &Attributes::new().expires(-1));

    assert_eq!(store.get_or("k", "fallback"), "fallback");
}

#[test]
fn remove_then_get_falls_back() {
    let store = CookieStore::new(MemoryJar::new());
    store
        .set_one("a", "1", &Attributes::new())
        .set_one("b", "2", &Attributes::new())
        .set_one("c", "3", &Attributes::new())
        .remove(["a", "b"]);

    assert_eq!(store.get_or("a", "fallback"), "fallback");
    assert_eq!(store.get_or("b", "fallback"), "fallback");
    assert_eq!(store.get("c").as_deref(), Some("3"));

    let keys = vec!["c".to_string()];
    store.remove(&keys);
    assert!(store.all().is_empty());
}

#[test]
fn set_many_writes_every_pair() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_many([("a", "1"), ("b", "2")], &Attributes::new());

    let all = store.all();
    assert_eq!(all.get("a").map(String::as_str), Some("1"));
    assert_eq!(all.get("b").map(String::as_str), Some("2"));
}

#[test]
fn get_many_with_fallback() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_one("a", "1", &Attributes::new());

    let expected = HashMap::from([
        ("a".to_string(), "1".to_string()),
        ("missing".to_string(), "x".to_string()),
    ]);
    assert_eq!(store.get_many_or(["a", "missing"], "x"), expected);

    let expected = HashMap::from([
        ("a".to_string(), Some("1".to_string())),
        ("missing".to_string(), None),
    ]);
    assert_eq!(store.get_many(["a", "missing"]), expected);
}

#[test]
fn empty_clears_the_jar() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_many([("a", "1"), ("b", "2"), ("c d", "3")], &Attributes::new());
    assert_eq!(store.all().len(), 3);

    store.empty();
    assert!(store.all().is_empty());
}

#[test]
fn theme_scenario() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());
    assert!(store.all().is_empty());

    store.set_one(
        "theme",
        "dark",
        &Attributes::new().path("/").same_site(SameSite::Lax),
    );

    assert_eq!(jar.last_write().as_deref(), Some("theme=dark;path=/;SameSite=Lax"));
    assert_eq!(
        store.all(),
        HashMap::from([("theme".to_string(), "dark".to_string())])
    );
}

#[test]
fn keys_and_values_round_trip_through_the_jar() {
    let store = CookieStore::new(MemoryJar::new());
    let key = "user name; role=\"admin\"";
    let value = "50% off, today only = great\\deal";
    store.set_one(key, value, &Attributes::new());

    assert_eq!(store.get(key).as_deref(), Some(value));
    assert_eq!(store.all().len(), 1);
}

#[test]
fn all_splits_each_entry_on_the_first_equals() {
    let store = CookieStore::new(FixedJar("token=a=b=c; flag; x%20y=1%3B2"));

    let expected = HashMap::from([
        ("token".to_string(), "a=b=c".to_string()),
        ("flag".to_string(), String::new()),
        ("x y".to_string(), "1;2".to_string()),
    ]);
    assert_eq!(store.all(), expected);
}

#[test]
fn set_default_only_writes_missing_keys() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_one("a", "original", &Attributes::new());

    assert!(!store.try_set_default("a", "replacement", &Attributes::new()));
    assert!(store.try_set_default("b", "fresh", &Attributes::new()));

    store
        .set_default_one("a", "again", &Attributes::new())
        .set_default_many([("a", "x"), ("c", "y")], &Attributes::new());

    assert_eq!(store.get("a").as_deref(), Some("original"));
    assert_eq!(store.get("b").as_deref(), Some("fresh"));
    assert_eq!(store.get("c").as_deref(), Some("y"));
}

#[test]
fn remove_specific_targets_path_and_domain() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());
    let scoped = Attributes::new().path("/docs").domain("example.com");

    store.set_one("k", "scoped", &scoped);
    store.set_one("k", "root", &Attributes::new());
    assert_eq!(jar.len(), 2);

    // a plain remove only matches the root cookie
    store.remove(["k"]);
    assert_eq!(store.get("k").as_deref(), Some("scoped"));

    store.remove_specific(["k"], Some(&scoped.clone().expires(30)));
    assert!(jar.is_empty());
}

#[test]
fn remove_specific_without_attributes_is_remove() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_one("k", "v", &Attributes::new());
    store.remove_specific(["k"], None);

    assert_eq!(store.get("k"), None);
}

#[test]
fn absolute_expiry_is_written_as_http_date() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());
    let far_future = date(2999, 1, 15)
        .at(0, 0, 0, 0)
        .to_zoned(TimeZone::UTC)
        .unwrap();

    store.set_one("k", "v", &Attributes::new().expires(far_future));
    assert_eq!(
        jar.last_write().as_deref(),
        Some("k=v;expires=Tue, 15 Jan 2999 00:00:00 GMT;path=/")
    );
    assert_eq!(store.get("k").as_deref(), Some("v"));

    store.set_one("k", "v", &Attributes::new().expires(Timestamp::UNIX_EPOCH));
    assert_eq!(store.get("k"), None);
}

#[test]
fn unparseable_expiry_string_writes_a_session_cookie() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());

    store.set_one("k", "v", &Attributes::new().expires_at_str("not a date"));
    assert_eq!(jar.last_write().as_deref(), Some("k=v;path=/"));
    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn relative_expiry_keeps_the_cookie_alive() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());

    store.set_one("k", "v", &Attributes::new().expires(Expiry::in_days(7.0)));
    assert!(jar.last_write().unwrap().contains(";expires="));
    assert_eq!(store.get("k").as_deref(), Some("v"));
}

#[test]
fn secure_defaults_follow_the_transport() {
    let jar = MemoryJar::secure();
    let store = CookieStore::new(jar.clone());

    store.set_one("k", "v", &Attributes::new());
    assert_eq!(jar.last_write().as_deref(), Some("k=v;path=/;secure"));
    assert_eq!(store.get("k").as_deref(), Some("v"));

    store.set_one("plain", "v", &Attributes::new().secure(false));
    assert_eq!(jar.last_write().as_deref(), Some("plain=v;path=/"));
}

#[test]
fn secure_cookie_on_plain_transport_is_dropped_silently() {
    let store = CookieStore::new(MemoryJar::new());
    store.set_one("k", "v", &Attributes::new().secure(true));

    assert_eq!(store.get("k"), None);
}

#[test]
fn defaults_from_json_apply_to_writes() {
    let jar = MemoryJar::new();
    let defaults =
        Defaults::from_json(r#"{"path": "/app", "same_site": "Strict", "domain": "example.com"}"#)
            .unwrap();
    let store = CookieStore::with_defaults(jar.clone(), defaults);

    store.set_one("k", "v", &Attributes::new());
    assert_eq!(
        jar.last_write().as_deref(),
        Some("k=v;path=/app;domain=example.com;SameSite=Strict")
    );

    store.set_one("k", "v", &Attributes::new().same_site(None));
    assert_eq!(
        jar.last_write().as_deref(),
        Some("k=v;path=/app;domain=example.com")
    );
}

#[test]
fn enabled_trusts_the_environment_flag() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(jar.clone());

    assert!(store.enabled());
    assert!(jar.writes().is_empty());
}

#[test]
fn enabled_probes_and_cleans_up() {
    let jar = MemoryJar::new();
    let store = CookieStore::new(NoFlagJar(jar.clone()));

    assert!(store.enabled());
    assert_eq!(jar.writes().len(), 2);
    assert!(jar.is_empty());
}

#[test]
fn disabled_environment_reports_disabled() {
    let jar = MemoryJar::disabled();
    let store = CookieStore::new(jar.clone());

    assert!(!store.enabled());
    store.set_one("k", "v", &Attributes::new());
    assert_eq!(store.get("k"), None);

    assert!(!CookieStore::new(BlackHoleJar).enabled());
}
