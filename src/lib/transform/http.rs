use http::uri::{InvalidUri, InvalidUriParts, PathAndQuery};
use http::{Request, Uri};

use super::{normalize_uri, RequestTransformer};

#[derive(Debug, thiserror::Error)]
pub enum TransformError {
  #[error("invalid rewritten path: {0}")]
  InvalidUri(#[from] InvalidUri),

  #[error("invalid rewritten uri: {0}")]
  InvalidUriParts(#[from] InvalidUriParts),
}

impl RequestTransformer {
  /// apply the transform to an http request
  ///
  /// header values replace every previous value of the same name,
  /// the uri rules apply to the path only and the query is kept.
  /// asterisk-form and authority-form targets are not rewritten
  pub fn transform_http<B>(&self, request: &mut Request<B>) -> Result<(), TransformError> {
    let headers = request.headers_mut();
    for (name, value) in self.headers() {
      headers.insert(name.0.clone(), value.0.clone());
    }

    let uri = request.uri();
    let path = uri.path();
    if !path.starts_with('/') {
      return Ok(());
    }

    let Some(new_path) = normalize_uri(path, self.index_document()) else {
      return Ok(());
    };

    let path_and_query = match uri.query() {
      Some(query) => PathAndQuery::try_from(format!("{new_path}?{query}"))?,
      None => PathAndQuery::try_from(new_path)?,
    };

    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(path_and_query);
    *request.uri_mut() = Uri::from_parts(parts)?;

    Ok(())
  }
}
