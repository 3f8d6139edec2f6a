use std::{fmt::Display, time::Duration};
use time::{OffsetDateTime, UtcOffset};

// time can't read the local offset safely once threads are spawned, chrono can
#[static_init::dynamic]
static LOCAL_OFFSET: UtcOffset = {
  let secs = chrono::Local::now().offset().local_minus_utc();
  UtcOffset::from_whole_seconds(secs).unwrap_or(UtcOffset::UTC)
};

/// RFC 3339 date with millisecond precision in the local offset
pub struct DisplayDate(OffsetDateTime);

impl DisplayDate {
  #[inline(always)]
  pub fn now() -> Self {
    Self(OffsetDateTime::now_utc().to_offset(*LOCAL_OFFSET))
  }

  #[inline(always)]
  pub fn new(date: OffsetDateTime) -> Self {
    Self(date)
  }
}

impl Display for DisplayDate {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let date = self.0;
    let offset = date.offset();
    let (oh, om, _) = offset.as_hms();
    write!(
      f,
      "{}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}{}{:02}:{:02}",
      date.year(),
      date.month() as u8,
      date.day(),
      date.hour(),
      date.minute(),
      date.second(),
      date.millisecond(),
      if offset.is_negative() { '-' } else { '+' },
      oh.unsigned_abs(),
      om.unsigned_abs(),
    )
  }
}

pub struct DisplayLevel(pub log::Level);

impl Display for DisplayLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    use owo_colors::OwoColorize;
    match self.0 {
      log::Level::Error => "ERROR".red().fmt(f),
      log::Level::Warn => "WARN ".yellow().fmt(f),
      log::Level::Info => "INFO ".green().fmt(f),
      log::Level::Debug => "DEBUG".blue().fmt(f),
      log::Level::Trace => "TRACE".magenta().fmt(f),
    }
  }
}

/// compact request latency, eg: `0.012s`, `1.5s`
pub struct DisplayDuration(pub Duration);

impl Display for DisplayDuration {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let millis = self.0.as_millis();
    let secs = millis / 1000;
    let ms = millis % 1000;

    if secs >= 60 {
      let m = secs / 60;
      match secs % 60 {
        0 => write!(f, "{m}m"),
        s => write!(f, "{m}m {s}s"),
      }
    } else if secs > 0 && ms == 0 {
      write!(f, "{secs}s")
    } else {
      write!(f, "{secs}.{ms:03}s")
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use time::macros::datetime;

  #[test]
  fn display_date() {
    let date = datetime!(2024-03-07 09:05:01.042 -03:00);
    assert_eq!(
      DisplayDate::new(date).to_string(),
      "2024-03-07T09:05:01.042-03:00"
    );

    let date = datetime!(2024-12-31 23:59:59.999 UTC);
    assert_eq!(
      DisplayDate::new(date).to_string(),
      "2024-12-31T23:59:59.999+00:00"
    );
  }

  #[test]
  fn display_duration() {
    let cases = [
      (Duration::from_millis(12), "0.012s"),
      (Duration::from_millis(1136), "1.136s"),
      (Duration::from_secs(59), "59s"),
      (Duration::from_secs(60), "1m"),
      (Duration::from_secs(61), "1m 1s"),
    ];

    for (duration, expected) in cases {
      assert_eq!(DisplayDuration(duration).to_string(), expected);
    }
  }
}
