//! Keyed encoding for discriminated unions.
//!
//! Every union in the manifest is written as a table holding exactly one
//! discriminator key. Flag-only cases are written as `key = true`; cases with
//! a payload are written as `key = <payload>`.
//!
//! Decoding walks an ordered list of rules. The first rule whose key is
//! present (holding `true` for flags, or a non-null payload) decides the
//! variant. Keys no rule knows about are ignored, so a newer manifest with
//! an extra option next to a known one still decodes. A table with none of
//! the known keys is rejected with [`DecodeError::MalformedVariant`].

use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Map, Value};

use crate::DecodeError;

/// The format-neutral keyed structure unions are decoded from.
pub type Keyed = Map<String, Value>;

type PayloadFn<T> = Box<dyn Fn(&Value) -> Result<T, String>>;

enum Rule<T> {
    Flag(T),
    Payload(PayloadFn<T>),
}

/// Ordered decode table for one union type.
pub(crate) struct VariantTable<T> {
    type_name: &'static str,
    rules: Vec<(&'static str, Rule<T>)>,
}

impl<T: Clone + 'static> VariantTable<T> {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            rules: Vec::new(),
        }
    }

    /// A flag case selected by `key = true`.
    pub(crate) fn flag(mut self, key: &'static str, variant: T) -> Self {
        self.rules.push((key, Rule::Flag(variant)));
        self
    }

    /// A payload case selected by a non-null value under `key`.
    pub(crate) fn payload<P>(mut self, key: &'static str, construct: fn(P) -> T) -> Self
    where
        P: DeserializeOwned + 'static,
    {
        let decode = move |value: &Value| {
            P::deserialize(value)
                .map(construct)
                .map_err(|e| e.to_string())
        };
        self.rules.push((key, Rule::Payload(Box::new(decode))));
        self
    }

    /// A payload case with a hand-written payload decoder.
    pub(crate) fn payload_with(
        mut self,
        key: &'static str,
        decode: impl Fn(&Value) -> Result<T, String> + 'static,
    ) -> Self {
        self.rules.push((key, Rule::Payload(Box::new(decode))));
        self
    }

    /// Decode a keyed structure, first matching rule wins.
    pub(crate) fn decode(&self, keyed: &Keyed) -> Result<T, DecodeError> {
        for (key, rule) in &self.rules {
            let Some(value) = keyed.get(*key) else {
                continue;
            };

            match rule {
                Rule::Flag(variant) => match value {
                    Value::Bool(true) => return Ok(variant.clone()),
                    Value::Bool(false) | Value::Null => continue,
                    other => {
                        let reason = format!("expected `true`, found {}", kind(other));
                        return Err(self.invalid(key, reason));
                    }
                },
                Rule::Payload(decode) => {
                    if value.is_null() {
                        continue;
                    }
                    return decode(value).map_err(|reason| self.invalid(key, reason));
                }
            }
        }

        Err(DecodeError::MalformedVariant {
            type_name: self.type_name,
            keys: keyed.keys().cloned().collect(),
        })
    }

    fn invalid(&self, key: &str, reason: String) -> DecodeError {
        DecodeError::InvalidPayload {
            type_name: self.type_name,
            key: key.to_string(),
            reason,
        }
    }
}

/// Build a single-key table.
pub(crate) fn single(key: &str, value: Value) -> Keyed {
    let mut keyed = Keyed::new();
    keyed.insert(key.to_string(), value);
    keyed
}

/// Deserialize the keyed structure for a union from any serde format.
pub(crate) fn deserialize_keyed<'de, D>(deserializer: D) -> Result<Keyed, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Keyed::deserialize(deserializer)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "a table",
    }
}

/// Implement `Serialize`/`Deserialize` for a union through its
/// `encode`/`decode` pair.
macro_rules! keyed_serde {
    ($ty:ty) => {
        impl serde::Serialize for $ty {
            fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
            where
                S: serde::Serializer,
            {
                serde::Serialize::serialize(&self.encode(), serializer)
            }
        }

        impl<'de> serde::Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let keyed = $crate::variant::deserialize_keyed(deserializer)?;
                Self::decode(&keyed).map_err(serde::de::Error::custom)
            }
        }
    };
}

pub(crate) use keyed_serde;
