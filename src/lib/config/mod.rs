use std::net::SocketAddr;

use indexmap::IndexMap;
use schemars::gen::{SchemaGenerator, SchemaSettings};
use schemars::schema::RootSchema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::log::LevelFilter;
use crate::serde::header_name::SHeaderName;
use crate::serde::header_value::SHeaderValue;
use crate::serve_static::DotFiles;

pub type SecurityHeaders = IndexMap<SHeaderName, SHeaderValue>;

fn is_default<T: Default + PartialEq>(value: &T) -> bool {
  value == &T::default()
}

pub mod defaults {
  use super::*;
  use crate::transform;

  pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

  pub const DEFAULT_INDEX_DOCUMENT: &str = transform::DEFAULT_INDEX_DOCUMENT;

  pub const DEFAULT_SERVE_LISTEN: SocketAddr = SocketAddr::V4(std::net::SocketAddrV4::new(
    std::net::Ipv4Addr::LOCALHOST,
    8080,
  ));
  pub const DEFAULT_SERVE_ROOT: &str = "public";
  pub const DEFAULT_SERVE_DOT_FILES: DotFiles = DotFiles::Ignore;

  pub fn security_headers() -> SecurityHeaders {
    let mut headers = IndexMap::new();
    headers.insert(transform::X_FRAME_OPTIONS, transform::DENY);
    headers.insert(transform::X_CONTENT_TYPE_OPTIONS, transform::NOSNIFF);
    headers.insert(transform::X_XSS_PROTECTION, transform::XSS_MODE_BLOCK);
    headers
  }

  pub fn index_document() -> String {
    DEFAULT_INDEX_DOCUMENT.to_string()
  }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct Config {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub log_level: Option<LevelFilter>,

  #[serde(default, skip_serializing_if = "is_default")]
  pub transform: TransformConfig,

  /// read by `edgefn serve`, accepted in every build
  #[serde(default, skip_serializing_if = "is_default")]
  pub serve: ServeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct TransformConfig {
  /// headers set on every request, replacing previous values
  #[serde(default = "defaults::security_headers")]
  pub security_headers: SecurityHeaders,

  /// document appended to directory-style uris
  #[serde(default = "defaults::index_document")]
  pub index_document: String,
}

impl Default for TransformConfig {
  fn default() -> Self {
    Self {
      security_headers: defaults::security_headers(),
      index_document: defaults::index_document(),
    }
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct ServeConfig {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub listen: Option<SocketAddr>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub root: Option<String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub dot_files: Option<DotFiles>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub graceful_shutdown_timeout_secs: Option<u64>,
}

impl ServeConfig {
  pub fn graceful_shutdown_timeout(&self) -> Option<std::time::Duration> {
    self.graceful_shutdown_timeout_secs.map(std::time::Duration::from_secs)
  }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadConfigError {
  #[error("{0}")]
  Toml(#[from] toml::de::Error),

  #[error("{0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("{0}")]
  Json(#[from] serde_json::Error),

  #[error("{0}")]
  Io(#[from] std::io::Error),

  #[error("invalid index document {0:?}: must be a non empty file name without slashes")]
  InvalidIndexDocument(String),
}

pub fn validate_config(config: &Config) -> Result<(), LoadConfigError> {
  let index_document = &config.transform.index_document;
  if index_document.is_empty() || index_document.contains('/') {
    return Err(LoadConfigError::InvalidIndexDocument(index_document.clone()));
  }

  Ok(())
}

pub fn load(path: &str) -> Result<Config, LoadConfigError> {
  let string = std::fs::read_to_string(path)?;
  let config: Config = if path.ends_with(".yml") || path.ends_with(".yaml") {
    serde_yaml::from_str(&string)?
  } else if path.ends_with(".json") {
    serde_json::from_str(&string)?
  } else {
    toml::from_str(&string)?
  };

  validate_config(&config)?;

  Ok(config)
}

impl Config {
  pub fn schema() -> RootSchema {
    let mut settings = SchemaSettings::default();
    settings.option_add_null_type = false;
    let mut gen = SchemaGenerator::new(settings);
    gen.root_schema_for::<Self>()
  }
}

pub const SAMPLE_CONFIG: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.sample.yml"));

#[cfg(test)]
mod test {
  use super::*;

  fn write_tmp(name: &str, contents: &str) -> String {
    let rand: u64 = rand::random();
    let path = std::env::temp_dir().join(format!("edgefn-config-{rand}-{name}"));
    std::fs::write(&path, contents).unwrap();
    path.to_str().unwrap().to_string()
  }

  #[test]
  fn sample_config_is_valid() {
    let config: Config = serde_yaml::from_str(SAMPLE_CONFIG).expect("error parsing yaml config file");
    validate_config(&config).expect("error validating config");
    assert_eq!(config.transform, TransformConfig::default());
    assert_eq!(config.serve.listen, Some(defaults::DEFAULT_SERVE_LISTEN));
    assert_eq!(config.serve.dot_files, Some(defaults::DEFAULT_SERVE_DOT_FILES));
  }

  #[test]
  fn sample_config_loads_from_file() {
    let path = write_tmp("config.yml", SAMPLE_CONFIG);
    let config = load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.log_level, Some(LevelFilter::Info));
    assert_eq!(config.serve.root.as_deref(), Some(defaults::DEFAULT_SERVE_ROOT));
    assert_eq!(
      config.serve.graceful_shutdown_timeout(),
      Some(std::time::Duration::from_secs(10))
    );
  }

  #[test]
  fn empty_config_uses_defaults() {
    let config: Config = serde_yaml::from_str("{}").unwrap();
    assert_eq!(config.log_level, None);
    assert_eq!(config.transform.index_document, "index.html");
    let names = config
      .transform
      .security_headers
      .keys()
      .map(|name| name.as_str())
      .collect::<Vec<_>>();
    assert_eq!(
      names,
      ["x-frame-options", "x-content-type-options", "x-xss-protection"]
    );
  }

  #[test]
  fn load_formats() {
    let yaml = write_tmp(
      "config.yml",
      "log_level: debug\ntransform:\n  index_document: default.htm\n",
    );
    let json = write_tmp(
      "config.json",
      r#"{ "log_level": "debug", "transform": { "index_document": "default.htm" } }"#,
    );
    let toml = write_tmp(
      "config.toml",
      "log_level = \"debug\"\n[transform]\nindex_document = \"default.htm\"\n",
    );

    for path in [yaml, json, toml] {
      let config = load(&path).unwrap();
      assert_eq!(config.log_level, Some(LevelFilter::Debug), "{path}");
      assert_eq!(config.transform.index_document, "default.htm", "{path}");
      std::fs::remove_file(&path).unwrap();
    }
  }

  #[test]
  fn custom_security_headers() {
    let yaml = "transform:\n  security_headers:\n    X-Frame-Options: SAMEORIGIN\n    referrer-policy: no-referrer\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    let headers = &config.transform.security_headers;
    assert_eq!(headers.len(), 2);
    assert_eq!(
      headers[&SHeaderName::from_static("x-frame-options")],
      SHeaderValue::from_static("SAMEORIGIN")
    );
  }

  #[test]
  fn unknown_fields_are_rejected() {
    assert!(serde_yaml::from_str::<Config>("transform:\n  index: index.htm\n").is_err());
    assert!(serde_yaml::from_str::<Config>("unknown: 1\n").is_err());
  }

  #[test]
  fn invalid_index_document() {
    for index_document in ["", "docs/index.html"] {
      let mut config = Config::default();
      config.transform.index_document = index_document.to_string();
      assert!(matches!(
        validate_config(&config),
        Err(LoadConfigError::InvalidIndexDocument(_))
      ));
    }
  }

  #[test]
  fn schema_lists_sections() {
    let schema = serde_json::to_value(Config::schema()).unwrap();
    let properties = schema["properties"].as_object().unwrap();
    assert!(properties.contains_key("log_level"));
    assert!(properties.contains_key("transform"));
    assert!(properties.contains_key("serve"));
  }
}
