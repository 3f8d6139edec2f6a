mod display;
mod level;
pub mod logger;

pub use display::{DisplayDate, DisplayDuration, DisplayLevel};
pub use level::LevelFilter;

use logger::Logger;

use crate::once;

/// install the process logger on the first call and set the max level on every call
pub fn init(level: LevelFilter) {
  if once!() {
    // another logger may already be installed, eg: by an embedding application
    if let Err(e) = log::set_boxed_logger(Box::new(Logger::new())) {
      eprintln!("error installing logger: {e}");
    }
  }

  log::set_max_level(level.into());
  log::debug!("log level set to {level}");
}
