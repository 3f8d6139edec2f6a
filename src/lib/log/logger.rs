use crate::log::{DisplayDate, DisplayLevel};

/// Writes `<date> <LEVEL> <target> > <message>` lines to stderr.
/// stdout is left for command output.
#[derive(Debug, Clone, Default)]
pub struct Logger {}

impl Logger {
  pub fn new() -> Self {
    Self {}
  }
}

impl log::Log for Logger {
  fn enabled(&self, meta: &log::Metadata) -> bool {
    meta.level() <= log::max_level()
  }

  fn log(&self, record: &log::Record) {
    if self.enabled(record.metadata()) {
      use owo_colors::OwoColorize;
      eprintln!(
        "{} {} {} > {}",
        DisplayDate::now(),
        DisplayLevel(record.level()),
        record.target().bold(),
        record.args()
      );
    }
  }

  fn flush(&self) {}
}
