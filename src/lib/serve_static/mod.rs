use bytes::Bytes;
use headers::{ContentLength, ContentType, HeaderMapExt, LastModified};
use http::{HeaderMap, StatusCode};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub struct StaticFile {
  pub path: PathBuf,
  pub headers: HeaderMap,
  /// empty when the body was not requested
  pub body: Bytes,
}

#[derive(Debug, thiserror::Error)]
pub enum ServeStaticError {
  #[error("invalid root dir path component")]
  PathComponentRootDir,
  #[error("invalid prefix path component")]
  PathComponentPrefix,
  #[error("invalid current dir path component")]
  PathComponentCurDir,
  #[error("invalid parent dir path component")]
  PathComponentParentDir,
  #[error("invalid empty path component")]
  PathComponentEmpty,
  #[error("dotfiles ignored")]
  DotFilesIgnored,
  #[error("dotfiles error")]
  DotFilesError,
  #[error("target is a directory")]
  Directory,
  #[error("target is not a file")]
  NotAFile,
  #[error("canonicalize base error: {0}")]
  CanonicalizeBase(#[source] std::io::Error),
  #[error("canonicalize path error: {0}")]
  CanonicalizeTarget(#[source] std::io::Error),
  #[error("metadata error: {0}")]
  Metadata(#[source] std::io::Error),
  #[error("read file error: {0}")]
  Read(#[source] std::io::Error),
  #[error("file outside base directory")]
  OutsideBase,
}

impl ServeStaticError {
  pub fn is_not_found(&self) -> bool {
    use ServeStaticError as E;
    match self {
      E::DotFilesIgnored => true,
      E::CanonicalizeTarget(e) | E::Metadata(e) | E::Read(e) => {
        e.kind() == std::io::ErrorKind::NotFound
      }
      _ => false,
    }
  }

  pub fn status(&self) -> StatusCode {
    use ServeStaticError as E;
    if self.is_not_found() {
      return StatusCode::NOT_FOUND;
    }

    match self {
      E::PathComponentRootDir
      | E::PathComponentPrefix
      | E::PathComponentCurDir
      | E::PathComponentParentDir
      | E::PathComponentEmpty
      | E::DotFilesError
      | E::Directory
      | E::NotAFile
      | E::OutsideBase => StatusCode::FORBIDDEN,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub enum DotFiles {
  #[default]
  #[serde(rename = "ignore")]
  Ignore,
  #[serde(rename = "allow")]
  Allow,
  #[serde(rename = "error")]
  Error,
}

/// parameter path should not have the leading slash
pub async fn resolve(
  base_dir: &Path,
  path: &str,
  dot_files: DotFiles,
  read_body: bool,
) -> Result<StaticFile, ServeStaticError> {
  let base = tokio::fs::canonicalize(base_dir)
    .await
    .map_err(ServeStaticError::CanonicalizeBase)?;

  let target = if path.is_empty() {
    base.clone()
  } else {
    let target = PathBuf::from(path);
    for component in target.components() {
      use std::path::Component as C;
      // only allow normal path components: Eg: foo/bar/baz
      // not C:/ or /root or foo/../ or foo/./
      match component {
        C::CurDir => return Err(ServeStaticError::PathComponentCurDir),
        C::Prefix(_) => return Err(ServeStaticError::PathComponentPrefix),
        C::ParentDir => return Err(ServeStaticError::PathComponentParentDir),
        C::RootDir => return Err(ServeStaticError::PathComponentRootDir),
        C::Normal(component) => match component.as_encoded_bytes().first() {
          None => return Err(ServeStaticError::PathComponentEmpty),
          Some(b'.') => match dot_files {
            DotFiles::Ignore => return Err(ServeStaticError::DotFilesIgnored),
            DotFiles::Error => return Err(ServeStaticError::DotFilesError),
            DotFiles::Allow => {}
          },
          _ => {}
        },
      }
    }

    // Path::components skips empty segments so they are checked on the raw path
    if path.contains("//") {
      return Err(ServeStaticError::PathComponentEmpty);
    }

    let target = tokio::fs::canonicalize(base.join(target))
      .await
      .map_err(ServeStaticError::CanonicalizeTarget)?;

    // symlinks may point outside the base directory
    if !target.starts_with(&base) {
      return Err(ServeStaticError::OutsideBase);
    }

    target
  };

  let metadata = tokio::fs::metadata(&target)
    .await
    .map_err(ServeStaticError::Metadata)?;

  if metadata.is_dir() {
    return Err(ServeStaticError::Directory);
  }

  if !metadata.is_file() {
    return Err(ServeStaticError::NotAFile);
  }

  let mut headers = HeaderMap::new();

  match mime_guess::from_path(&target).first() {
    Some(mime) => match ContentType::from_str(mime.as_ref()) {
      Ok(content_type) => headers.typed_insert(content_type),
      Err(_) => headers.typed_insert(ContentType::octet_stream()),
    },
    None => headers.typed_insert(ContentType::octet_stream()),
  }

  if let Ok(modified) = metadata.modified() {
    headers.typed_insert(LastModified::from(modified));
  }

  headers.typed_insert(ContentLength(metadata.len()));

  let body = if read_body {
    let contents = tokio::fs::read(&target)
      .await
      .map_err(ServeStaticError::Read)?;
    Bytes::from(contents)
  } else {
    Bytes::new()
  };

  Ok(StaticFile {
    path: target,
    headers,
    body,
  })
}
