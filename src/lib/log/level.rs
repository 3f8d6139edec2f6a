use std::fmt::Display;

use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, JsonSchema, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LevelFilter {
  Off,
  Error,
  Warn,
  #[default]
  Info,
  Debug,
  Trace,
}

impl LevelFilter {
  pub fn as_str(&self) -> &'static str {
    match self {
      LevelFilter::Off => "off",
      LevelFilter::Error => "error",
      LevelFilter::Warn => "warn",
      LevelFilter::Info => "info",
      LevelFilter::Debug => "debug",
      LevelFilter::Trace => "trace",
    }
  }
}

impl Display for LevelFilter {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

// case insensitive, so LOG=Debug and log_level: DEBUG are both accepted
impl<'de> Deserialize<'de> for LevelFilter {
  fn deserialize<D>(de: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(de)?;
    match s.to_ascii_lowercase().as_str() {
      "off" => Ok(LevelFilter::Off),
      "error" => Ok(LevelFilter::Error),
      "warn" => Ok(LevelFilter::Warn),
      "info" => Ok(LevelFilter::Info),
      "debug" => Ok(LevelFilter::Debug),
      "trace" => Ok(LevelFilter::Trace),
      _ => Err(serde::de::Error::custom(format!(
        "invalid log level: {s}, expected one of off, error, warn, info, debug or trace"
      ))),
    }
  }
}

impl From<LevelFilter> for log::LevelFilter {
  fn from(level: LevelFilter) -> Self {
    match level {
      LevelFilter::Off => log::LevelFilter::Off,
      LevelFilter::Error => log::LevelFilter::Error,
      LevelFilter::Warn => log::LevelFilter::Warn,
      LevelFilter::Info => log::LevelFilter::Info,
      LevelFilter::Debug => log::LevelFilter::Debug,
      LevelFilter::Trace => log::LevelFilter::Trace,
    }
  }
}
