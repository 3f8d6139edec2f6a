//! The JSON event a viewer-request function is invoked with.
//!
//! The shape follows the edge platform event format:
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "context": { "eventType": "viewer-request" },
//!   "viewer": { "ip": "198.51.100.11" },
//!   "request": {
//!     "method": "GET",
//!     "uri": "/docs/",
//!     "querystring": {},
//!     "headers": { "host": { "value": "example.com" } },
//!     "cookies": {}
//!   }
//! }
//! ```
//!
//! Only `request.uri` is required. Every mapping keeps the order it was received in.
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const VIEWER_REQUEST: &str = "viewer-request";

/// Header, query string or cookie mapping, keyed by name.
pub type ValueMap = IndexMap<String, FieldValue>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub version: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub context: Option<EventContext>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub viewer: Option<Viewer>,

  pub request: Request,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventContext {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub event_type: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub distribution_id: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub distribution_domain_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub request_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewer {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ip: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub method: Option<String>,

  pub uri: String,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub querystring: Option<ValueMap>,

  #[serde(default)]
  pub headers: ValueMap,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub cookies: Option<ValueMap>,
}

impl Request {
  pub fn new(uri: impl Into<String>) -> Self {
    Self {
      uri: uri.into(),
      ..Default::default()
    }
  }

  pub fn header(&self, name: &str) -> Option<&str> {
    self.headers.get(name).map(|field| field.value.as_str())
  }

  /// set a single value header, replacing any previous value for the same name
  pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
    self.headers.insert(name.into(), FieldValue::new(value));
  }

  pub fn to_json_pretty(&self) -> Result<String, EventError> {
    serde_json::to_string_pretty(self).map_err(EventError::Render)
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldValue {
  pub value: String,

  #[serde(
    default,
    rename = "multiValue",
    skip_serializing_if = "Option::is_none"
  )]
  pub multi_value: Option<Vec<MultiValueItem>>,
}

impl FieldValue {
  pub fn new(value: impl Into<String>) -> Self {
    Self {
      value: value.into(),
      multi_value: None,
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiValueItem {
  pub value: String,
}

#[derive(Debug, thiserror::Error)]
pub enum EventError {
  #[error("malformed event: {0}")]
  Malformed(#[source] serde_json::Error),

  #[error("unsupported event type {0}, expected viewer-request")]
  UnsupportedEventType(String),

  #[error("error rendering request: {0}")]
  Render(#[source] serde_json::Error),
}

impl Event {
  pub fn new(request: Request) -> Self {
    Self {
      version: None,
      context: None,
      viewer: None,
      request,
    }
  }

  pub fn from_json(json: &str) -> Result<Self, EventError> {
    let event: Event = serde_json::from_str(json).map_err(EventError::Malformed)?;

    if let Some(event_type) = event.context.as_ref().and_then(|c| c.event_type.as_ref()) {
      if event_type != VIEWER_REQUEST {
        return Err(EventError::UnsupportedEventType(event_type.clone()));
      }
    }

    Ok(event)
  }
}
