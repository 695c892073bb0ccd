//! Fields the registry sends in more than one JSON shape.
//!
//! Each public type here is a single structured value. Decoding goes through a
//! private untagged representation that tries the object shape first, then
//! the string shorthand, then falls back to a raw value, so a surprising shape
//! never fails the enclosing record. Whatever does not fit a typed field is
//! kept verbatim in `other` (an object's entries directly, anything else under
//! the `raw` key).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Author, maintainer, contributor or publisher
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PersonRepr")]
pub struct Person {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PersonRepr {
    Object(BTreeMap<String, Value>),
    Shorthand(String),
    Raw(Value),
}

impl From<PersonRepr> for Person {
    fn from(repr: PersonRepr) -> Self {
        match repr {
            PersonRepr::Object(mut other) => Self {
                name: take_string(&mut other, "name"),
                email: take_string(&mut other, "email"),
                url: take_string(&mut other, "url"),
                other,
            },
            PersonRepr::Shorthand(text) => Self::parse(&text),
            PersonRepr::Raw(value) => Self {
                other: raw_entry(value),
                ..Self::default()
            },
        }
    }
}

impl Person {
    /// Parse the package.json shorthand `"Name <email> (url)"`.
    ///
    /// Both the email and the url part are optional.
    pub fn parse(text: &str) -> Self {
        let (rest, url) = take_delimited(text, '(', ')');
        let (rest, email) = take_delimited(&rest, '<', '>');
        let name = rest.trim();

        Self {
            name: (!name.is_empty()).then(|| name.to_string()),
            email,
            url,
            other: BTreeMap::new(),
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if let Some(name) = &self.name {
            parts.push(name.clone());
        }
        if let Some(email) = &self.email {
            parts.push(format!("<{}>", email));
        }
        if let Some(url) = &self.url {
            parts.push(format!("({})", url));
        }
        write!(f, "{}", parts.join(" "))
    }
}

/// Remove `key` from `map` when it holds a string (or null). Values of any
/// other type stay in the map.
fn take_string(map: &mut BTreeMap<String, Value>, key: &str) -> Option<String> {
    match map.remove(key)? {
        Value::String(text) => Some(text),
        Value::Null => None,
        other => {
            map.insert(key.to_string(), other);
            None
        }
    }
}

/// `other` map for a value that is neither an object nor a string
fn raw_entry(value: Value) -> BTreeMap<String, Value> {
    match value {
        Value::Object(map) => map.into_iter().collect(),
        Value::Null => BTreeMap::new(),
        value => BTreeMap::from([("raw".to_string(), value)]),
    }
}

/// Split `open ... close` out of `text`, returning the remainder and the
/// trimmed inner part (if non-empty).
fn take_delimited(text: &str, open: char, close: char) -> (String, Option<String>) {
    if let Some(start) = text.find(open) {
        if let Some(len) = text[start + 1..].find(close) {
            let inner = text[start + 1..start + 1 + len].trim();
            let mut rest = String::with_capacity(text.len());
            rest.push_str(&text[..start]);
            rest.push_str(&text[start + len + 2..]);
            return (rest, (!inner.is_empty()).then(|| inner.to_string()));
        }
    }
    (text.to_string(), None)
}

/// Bug tracker reference
///
/// The registry sends either a bare URL string or an object with `url` and
/// `email`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BugsRepr")]
pub struct Bugs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BugsRepr {
    Object {
        #[serde(default)]
        url: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(flatten)]
        other: BTreeMap<String, Value>,
    },
    Url(String),
    Raw(Value),
}

impl From<BugsRepr> for Bugs {
    fn from(repr: BugsRepr) -> Self {
        match repr {
            BugsRepr::Object { url, email, other } => Self { url, email, other },
            BugsRepr::Url(url) => Self {
                url: Some(url),
                ..Self::default()
            },
            BugsRepr::Raw(value) => Self {
                other: raw_entry(value),
                ..Self::default()
            },
        }
    }
}

impl Bugs {
    /// Bug tracker pointing at `url`
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }
}

/// Source repository
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RepositoryRepr")]
pub struct Repository {
    /// Repository type (usually "git")
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Package location inside a monorepo
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RepositoryRepr {
    Object(BTreeMap<String, Value>),
    Url(String),
    Raw(Value),
}

impl From<RepositoryRepr> for Repository {
    fn from(repr: RepositoryRepr) -> Self {
        match repr {
            RepositoryRepr::Object(mut other) => Self {
                kind: take_string(&mut other, "type"),
                url: take_string(&mut other, "url"),
                directory: take_string(&mut other, "directory"),
                other,
            },
            RepositoryRepr::Url(url) => Self {
                url: Some(url),
                ..Self::default()
            },
            RepositoryRepr::Raw(value) => Self {
                other: raw_entry(value),
                ..Self::default()
            },
        }
    }
}

/// License declaration: an SPDX expression or the legacy `{type, url}` object
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "LicenseRepr")]
pub struct License {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LicenseRepr {
    Object(BTreeMap<String, Value>),
    Spdx(String),
    Raw(Value),
}

impl From<LicenseRepr> for License {
    fn from(repr: LicenseRepr) -> Self {
        match repr {
            LicenseRepr::Object(mut other) => Self {
                kind: take_string(&mut other, "type"),
                url: take_string(&mut other, "url"),
                other,
            },
            LicenseRepr::Spdx(kind) => Self {
                kind: Some(kind),
                ..Self::default()
            },
            LicenseRepr::Raw(value) => Self {
                other: raw_entry(value),
                ..Self::default()
            },
        }
    }
}
