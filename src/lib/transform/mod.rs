//! The viewer-request transform: security headers and index document uri normalization.
#![allow(clippy::declare_interior_mutable_const)]
pub mod http;

use crate::config::TransformConfig;
use crate::event::{Event, Request};
use crate::serde::{header_name::SHeaderName, header_value::SHeaderValue};

pub use self::http::TransformError;

pub const X_FRAME_OPTIONS: SHeaderName = SHeaderName::from_static("x-frame-options");
pub const X_CONTENT_TYPE_OPTIONS: SHeaderName = SHeaderName::from_static("x-content-type-options");
pub const X_XSS_PROTECTION: SHeaderName = SHeaderName::from_static("x-xss-protection");

pub const DENY: SHeaderValue = SHeaderValue::from_static("DENY");
pub const NOSNIFF: SHeaderValue = SHeaderValue::from_static("nosniff");
pub const XSS_MODE_BLOCK: SHeaderValue = SHeaderValue::from_static("1; mode=block");

pub const DEFAULT_INDEX_DOCUMENT: &str = "index.html";

/// returns the rewritten uri or None if the uri must be left as is
///
/// - `/foo/` => `/foo/index.html`
/// - `/foo` => `/foo/index.html`
/// - `/app.js` => None
///
/// a dot anywhere in the uri marks it as a file request, this includes dots in directory names
pub fn normalize_uri(uri: &str, index_document: &str) -> Option<String> {
  if uri.ends_with('/') {
    Some(format!("{uri}{index_document}"))
  } else if !uri.contains('.') {
    Some(format!("{uri}/{index_document}"))
  } else {
    None
  }
}

#[derive(Debug, Clone)]
pub struct RequestTransformer {
  headers: Vec<(SHeaderName, SHeaderValue)>,
  index_document: String,
}

impl RequestTransformer {
  pub fn new(config: &TransformConfig) -> Self {
    let headers = config
      .security_headers
      .iter()
      .map(|(name, value)| (name.clone(), value.clone()))
      .collect();

    Self {
      headers,
      index_document: config.index_document.clone(),
    }
  }

  pub fn index_document(&self) -> &str {
    &self.index_document
  }

  pub fn headers(&self) -> &[(SHeaderName, SHeaderValue)] {
    &self.headers
  }

  /// apply the transform in place
  pub fn transform(&self, request: &mut Request) {
    for (name, value) in &self.headers {
      request.set_header(name.as_str(), value.to_string());
    }

    if let Some(uri) = normalize_uri(&request.uri, &self.index_document) {
      log::debug!("uri rewrite {} => {}", request.uri, uri);
      request.uri = uri;
    }
  }

  /// the function entry point: takes the event and hands back its request
  pub fn handle(&self, event: Event) -> Request {
    let mut request = event.request;
    self.transform(&mut request);
    request
  }
}

impl Default for RequestTransformer {
  fn default() -> Self {
    Self::new(&TransformConfig::default())
  }
}

/// [RequestTransformer::handle] with the fixed header set and `index.html`
pub fn handler(event: Event) -> Request {
  RequestTransformer::default().handle(event)
}
