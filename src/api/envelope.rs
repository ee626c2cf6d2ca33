//! JSON envelopes of the Redmine REST API.
//!
//! Redmine wraps every payload in an object named after the resource:
//! `{"issue": {...}}` for single entities and
//! `{"issues": [...], "total_count": N, "offset": O, "limit": L}` for lists.
//! The key names come from the [`Resource`] implementation of the payload.

use serde::de::{self, DeserializeOwned, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A kind of entity exposed by the Redmine API.
pub trait Resource: DeserializeOwned {
    /// Human-readable kind used in error messages, e.g. `"issue category"`.
    const KIND: &'static str;
    /// Envelope key for a single entity, e.g. `"issue_category"`.
    const SINGULAR: &'static str;
    /// Envelope key for lists, e.g. `"issue_categories"`.
    const PLURAL: &'static str;
}

/// A request body sent inside an envelope.
pub trait Payload: Serialize {
    /// The JSON object placed under the envelope key.
    fn to_payload(&self) -> serde_json::Result<Value> {
        serde_json::to_value(self)
    }
}

impl Payload for Value {}

/// Wrap `payload` as `{"<key>": payload}` and serialize it.
pub fn wrap<P: Payload + ?Sized>(key: &str, payload: &P) -> serde_json::Result<String> {
    let mut envelope = Map::new();
    envelope.insert(key.to_string(), payload.to_payload()?);
    serde_json::to_string(&Value::Object(envelope))
}

/// A single-entity response: `{"<singular>": {...}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T>(pub T);

impl<'de, T: Resource> Deserialize<'de> for Envelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::deserialize(deserializer)?;
        Ok(Envelope(take(&mut map, T::SINGULAR)?))
    }
}

/// One page of a paginated list response.
#[derive(Debug, Clone, PartialEq)]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    /// Number of matching entities on the server, across all pages.
    pub total_count: u64,
    pub offset: u64,
    pub limit: u64,
}

impl<'de, T: Resource> Deserialize<'de> for PageEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::deserialize(deserializer)?;
        Ok(PageEnvelope {
            items: take(&mut map, T::PLURAL)?,
            total_count: take(&mut map, "total_count")?,
            offset: take_or_default(&mut map, "offset")?,
            limit: take_or_default(&mut map, "limit")?,
        })
    }
}

/// An unpaginated list response: `{"<plural>": [...]}`.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEnvelope<T> {
    pub items: Vec<T>,
}

impl<'de, T: Resource> Deserialize<'de> for ListEnvelope<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut map = Map::deserialize(deserializer)?;
        Ok(ListEnvelope {
            items: take(&mut map, T::PLURAL)?,
        })
    }
}

fn take<V, E>(map: &mut Map<String, Value>, key: &'static str) -> Result<V, E>
where
    V: DeserializeOwned,
    E: de::Error,
{
    let value = map.remove(key).ok_or_else(|| E::missing_field(key))?;
    V::deserialize(value).map_err(E::custom)
}

fn take_or_default<V, E>(map: &mut Map<String, Value>, key: &'static str) -> Result<V, E>
where
    V: DeserializeOwned + Default,
    E: de::Error,
{
    match map.remove(key) {
        None | Some(Value::Null) => Ok(V::default()),
        Some(value) => V::deserialize(value).map_err(E::custom),
    }
}
