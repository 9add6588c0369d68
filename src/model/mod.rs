//! Server-owned records and the payloads sent to change them.
//!
//! Every record keeps the fields the server sends but this crate does not model in a
//! flattened `extra` map, so a record that round-trips through the store never loses data.
//! Ids accept `id`, `_id`, or both on input; when both are present `id` wins.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// Read a record's fields, folding a Mongo-style `_id` into `id`.
pub(crate) fn keyed_fields<'de, D>(deserializer: D) -> Result<Value, D::Error>
where
    D: Deserializer<'de>,
{
    let mut fields = Map::<String, Value>::deserialize(deserializer)?;
    if let Some(mongo_id) = fields.remove("_id") {
        fields.entry("id").or_insert(mongo_id);
    }
    Ok(Value::Object(fields))
}

/// Serde impls for a record whose derives carry `#[serde(remote = "Self")]`. Decoding goes
/// through [`keyed_fields`] first.
macro_rules! keyed_record {
    ($record:ident) => {
        impl serde::Serialize for $record {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                $record::serialize(self, serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $record {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let fields = crate::model::keyed_fields(deserializer)?;
                $record::deserialize(fields).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub mod booking;
pub mod property;
pub mod public_property;
pub mod user;

pub use booking::*;
pub use property::*;
pub use public_property::*;
pub use user::*;
