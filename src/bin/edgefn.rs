use clap::Parser;
use edgefn::cli::{self, args::Args};

fn main() -> Result<(), anyhow::Error> {
  #[cfg(feature = "human-panic")]
  human_panic::setup_panic!();

  let args = Args::parse();
  cli::run(args)?;
  Ok(())
}
