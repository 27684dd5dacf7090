use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Open-ended payload forwarded to Discord as-is.
pub type Fields = Map<String, Value>;

/// An optional argument that remembers whether the caller sent `null`.
///
/// Use with `#[serde(default)]`: a missing key stays [`Field::Absent`] and is
/// left out of the body, an explicit `null` is forwarded as `null`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field<T> {
    Absent,
    Null,
    Present(T),
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> Field<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Field<T> {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(v) => Self::Present(v),
            None => Self::Null,
        })
    }
}

/// JSON object builder that only contains what the caller supplied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonBody {
    map: Fields,
}

impl JsonBody {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from caller-supplied extra fields; named fields set afterwards
    /// take precedence over them.
    pub fn from_fields(fields: Fields) -> Self {
        Self { map: fields }
    }

    pub fn set(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.map.insert(key.to_string(), value.into());
        self
    }

    pub fn opt(self, key: &str, value: Option<impl Into<Value>>) -> Self {
        match value {
            Some(v) => self.set(key, v),
            None => self,
        }
    }

    pub fn field<T: Into<Value>>(self, key: &str, value: Field<T>) -> Self {
        match value {
            Field::Absent => self,
            Field::Null => self.set(key, Value::Null),
            Field::Present(v) => self.set(key, v),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn as_fields(&self) -> &Fields {
        &self.map
    }

    /// Checks `requirement` against the assembled body.
    pub fn require(self, requirement: Requirement) -> Result<Self> {
        requirement.check(&self.map)?;
        Ok(self)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.map)
    }
}

/// What an operation needs to find in its payload before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Requirement {
    Any,
    NonEmpty,
    AllOf(&'static [&'static str]),
    AnyOf(&'static [&'static str]),
}

impl Requirement {
    pub fn check(&self, fields: &Fields) -> Result<()> {
        match self {
            Self::Any => Ok(()),
            Self::NonEmpty if fields.is_empty() => {
                Err(Error::validation("at least one field must be provided"))
            }
            Self::NonEmpty => Ok(()),
            Self::AllOf(keys) => {
                let missing: Vec<&str> = keys
                    .iter()
                    .copied()
                    .filter(|k| !fields.contains_key(*k))
                    .collect();
                if missing.is_empty() {
                    Ok(())
                } else {
                    Err(Error::validation(format!(
                        "missing required fields: {}",
                        missing.join(", ")
                    )))
                }
            }
            Self::AnyOf(keys) if keys.iter().any(|k| fields.contains_key(*k)) => Ok(()),
            Self::AnyOf(keys) => Err(Error::validation(format!(
                "at least one of {} must be provided",
                keys.join(", ")
            ))),
        }
    }
}
