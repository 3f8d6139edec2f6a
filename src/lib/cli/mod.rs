pub mod args;
pub mod cmd;

use args::Args;
use args::Command;

/// Run the application, from a parsed [`Args`] struct, usually parsed from the command line.
pub fn run(args: Args) -> Result<(), anyhow::Error> {
  match args.command {
    Command::Test(test) => cmd::test(test),
    #[cfg(feature = "serve-static")]
    Command::Serve(serve) => cmd::serve(serve),
    Command::CreateConfig(create_config) => cmd::create_config(create_config),
    Command::CreateConfigSchema(create_config_schema) => {
      cmd::create_config_schema(create_config_schema)
    }
  }
}

/// load the config file if any, defaults otherwise
pub(crate) fn load_config(path: Option<&str>) -> Result<crate::config::Config, anyhow::Error> {
  use anyhow::Context;
  match path {
    Some(path) => {
      crate::config::load(path).with_context(|| format!("error loading config file {path}"))
    }
    None => Ok(crate::config::Config::default()),
  }
}
