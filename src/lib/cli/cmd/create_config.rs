use std::path::{Path, PathBuf};

use crate::cli::args::CreateConfig;
use crate::config::{Config, SAMPLE_CONFIG};

pub fn create_config(args: CreateConfig) -> Result<(), anyhow::Error> {
  let CreateConfig {
    output,
    omit_schema,
  } = args;

  if Path::new(&output).exists() {
    anyhow::bail!("output file {} already exists, aborting", output);
  }

  std::fs::write(&output, SAMPLE_CONFIG)?;
  eprintln!("config file written to {}", output);

  if !omit_schema {
    let mut schema_path = PathBuf::from(output);
    schema_path.pop();
    schema_path.push("config.schema.json");
    std::fs::write(&schema_path, serde_json::to_string_pretty(&Config::schema())?)?;
    eprintln!("config JSON schema file written to {}", schema_path.display());
  }

  Ok(())
}
