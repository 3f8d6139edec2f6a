use http::header::HeaderValue;
use serde::{Deserialize, Serialize, Serializer};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SHeaderValue(#[serde(with = "super::header_value")] pub HeaderValue);

crate::newtype!(SHeaderValue => HeaderValue);
crate::json_schema_as!(SHeaderValue => String);

impl SHeaderValue {
  pub const fn from_static(value: &'static str) -> Self {
    Self(HeaderValue::from_static(value))
  }
}

/// values are only built from strings, so the bytes are always valid utf-8
impl std::fmt::Display for SHeaderValue {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&String::from_utf8_lossy(self.0.as_bytes()))
  }
}

pub fn serialize<S>(value: &HeaderValue, ser: S) -> Result<S::Ok, S::Error>
where
  S: Serializer,
{
  let helper = String::from_utf8_lossy(value.as_bytes());
  helper.serialize(ser)
}

pub fn deserialize<'de, D>(de: D) -> Result<HeaderValue, D::Error>
where
  D: serde::Deserializer<'de>,
{
  let s: String = String::deserialize(de)?;
  HeaderValue::try_from(s)
    .map_err(|e| serde::de::Error::custom(format!("invalid header value: {e}")))
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn serialize() {
    let value = SHeaderValue::from_static("1; mode=block");
    let actual = serde_json::to_string(&value).unwrap();
    assert_eq!(actual, "\"1; mode=block\"");
  }

  #[test]
  fn deserialize() {
    let actual = serde_json::from_str::<SHeaderValue>("\"nosniff\"").unwrap();
    assert_eq!(actual, SHeaderValue::from_static("nosniff"));
  }

  #[test]
  fn display_keeps_non_ascii_text() {
    let value = serde_json::from_str::<SHeaderValue>(r#""inline; filename=\u00e9t\u00e9.txt""#).unwrap();
    assert_eq!(value.to_string(), "inline; filename=été.txt");
    assert!(value.to_str().is_err());
  }

  #[test]
  fn deserialize_rejects_control_chars() {
    let err = serde_json::from_str::<SHeaderValue>("\"deny\\n\"").unwrap_err();
    assert!(err.to_string().contains("invalid header value"));
  }
}
