use std::net::SocketAddr;

use crate::log::LevelFilter;
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(
  author,
  version,
  about = "edgefn: viewer-request edge function, security headers and index document rewrites"
)]
pub struct Args {
  #[command(subcommand)]
  pub command: Command,
}

#[derive(Debug, Clone, Parser)]
pub enum Command {
  Test(Test),
  #[cfg(feature = "serve-static")]
  Serve(Serve),
  CreateConfig(CreateConfig),
  CreateConfigSchema(CreateConfigSchema),
}

/// Runs the function against a JSON event and prints the returned request.
#[derive(Debug, Clone, Parser)]
pub struct Test {
  /// Path to the event JSON file, `-` reads from stdin.
  #[arg(short, long, default_value = "-", env = "EDGEFN_EVENT")]
  pub event: String,

  /// Path to the configuration file, relative to cwd. Defaults are used if not specified.
  #[arg(short = 'c', long = "config", env = "EDGEFN_CONFIG")]
  pub config: Option<String>,

  /// Write the returned request to this file instead of stdout.
  #[arg(short, long, env = "EDGEFN_OUTPUT")]
  pub output: Option<String>,

  /// Log level, error, warn, info (default), debug or trace. This will take precedence over the config file log level.
  #[arg(short = 'l', long = "log", env = "EDGEFN_LOG")]
  pub log_level: Option<LevelFilter>,
}

/// Runs a local server that applies the function to every request before a static file origin.
#[cfg(feature = "serve-static")]
#[derive(Debug, Clone, Default, Parser)]
pub struct Serve {
  /// Path to the configuration file, relative to cwd. Defaults are used if not specified.
  #[arg(short = 'c', long = "config", env = "EDGEFN_CONFIG")]
  pub config: Option<String>,

  /// Address to listen on. This will take precedence over the config file serve.listen.
  #[arg(long, env = "EDGEFN_LISTEN")]
  pub listen: Option<SocketAddr>,

  /// Directory to serve files from. This will take precedence over the config file serve.root.
  #[arg(long, env = "EDGEFN_ROOT")]
  pub root: Option<String>,

  /// Log level, error, warn, info (default), debug or trace. This will take precedence over the config file log level.
  #[arg(short = 'l', long = "log", env = "EDGEFN_LOG")]
  pub log_level: Option<LevelFilter>,
}

/// Creates a default config file in YAML format at specified --output.
#[derive(Debug, Clone, Parser)]
pub struct CreateConfig {
  /// Path to place the output config file.
  #[arg(short, long, default_value = "config.yml")]
  pub output: String,
  /// Specifying true will skip the JSON schema file output.
  #[arg(long, default_value = "false")]
  pub omit_schema: bool,
}

/// Creates a JSON schema file for the edgefn configuration at specified --output.
#[derive(Debug, Clone, Parser)]
pub struct CreateConfigSchema {
  /// Path to place the output config schema file.
  #[arg(short, long, default_value = "config.schema.json")]
  pub output: String,
}

#[cfg(test)]
mod test {
  use super::*;

  #[test]
  fn parse_test() {
    let args = Args::try_parse_from([
      "edgefn", "test", "--event", "event.json", "-c", "config.yml", "--log", "debug",
    ])
    .unwrap();

    match args.command {
      Command::Test(test) => {
        assert_eq!(test.event, "event.json");
        assert_eq!(test.config.as_deref(), Some("config.yml"));
        assert_eq!(test.output, None);
        assert_eq!(test.log_level, Some(LevelFilter::Debug));
      }
      command => panic!("unexpected command {command:?}"),
    }
  }

  #[test]
  fn test_event_defaults_to_stdin() {
    let args = Args::try_parse_from(["edgefn", "test"]).unwrap();
    match args.command {
      Command::Test(test) => assert_eq!(test.event, "-"),
      command => panic!("unexpected command {command:?}"),
    }
  }

  #[cfg(feature = "serve-static")]
  #[test]
  fn parse_serve() {
    let args = Args::try_parse_from([
      "edgefn", "serve", "--listen", "0.0.0.0:9000", "--root", "dist",
    ])
    .unwrap();

    match args.command {
      Command::Serve(serve) => {
        assert_eq!(serve.listen, Some("0.0.0.0:9000".parse().unwrap()));
        assert_eq!(serve.root.as_deref(), Some("dist"));
        assert_eq!(serve.config, None);
      }
      command => panic!("unexpected command {command:?}"),
    }
  }

  #[test]
  fn invalid_log_level() {
    assert!(Args::try_parse_from(["edgefn", "test", "--log", "verbose"]).is_err());
  }
}
