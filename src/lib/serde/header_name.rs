use http::header::HeaderName;
use serde::{Deserialize, Serialize, Serializer};

/// A [HeaderName] that can be used as a config map key.
/// Names are lowercased on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SHeaderName(#[serde(with = "super::header_name")] pub HeaderName);
crate::newtype!(SHeaderName => HeaderName);
crate::json_schema_as!(SHeaderName => String);

impl SHeaderName {
  pub const fn from_static(name: &'static str) -> Self {
    Self(HeaderName::from_static(name))
  }
}

pub fn serialize<S>(value: &HeaderName, ser: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  value.as_str().serialize(ser)
}

pub fn deserialize<'de, D>(de: D) -> Result<HeaderName, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let s: String = String::deserialize(de)?;
  HeaderName::try_from(s).map_err(|e| serde::de::Error::custom(format!("invalid header name: {e}")))
}
