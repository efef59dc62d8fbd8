use std::{fmt, str::FromStr};

use thiserror::Error;
use time::{
    format_description::{well_known::Rfc3339, BorrowedFormatItem},
    macros::format_description,
    OffsetDateTime, UtcOffset,
};

const DISPLAY_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day] [hour]:[minute]");

/// A point in time as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(OffsetDateTime);

#[derive(Debug, Error)]
#[error("Invalid timestamp")]
pub struct TimestampParseError;

impl Timestamp {
    pub fn now() -> Self {
        Self(OffsetDateTime::now_utc())
    }

    pub fn from_secs(seconds: i64) -> Option<Self> {
        OffsetDateTime::from_unix_timestamp(seconds).ok().map(Self)
    }

    pub fn as_secs(&self) -> i64 {
        self.0.unix_timestamp()
    }

    pub fn to_rfc3339(&self) -> String {
        // Formatting a valid date time as RFC 3339 only fails
        // for years beyond 9999.
        self.0.format(&Rfc3339).unwrap_or_default()
    }

    /// Minute precision, e.g. `2024-03-01 09:05`.
    pub fn display_in(&self, offset: UtcOffset) -> String {
        self.0
            .to_offset(offset)
            .format(DISPLAY_FORMAT)
            .unwrap_or_default()
    }

    pub fn display_local(&self) -> String {
        let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
        self.display_in(offset)
    }
}

impl FromStr for Timestamp {
    type Err = TimestampParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OffsetDateTime::parse(s.trim(), &Rfc3339)
            .map(Self)
            .map_err(|_| TimestampParseError)
    }
}

impl From<OffsetDateTime> for Timestamp {
    fn from(from: OffsetDateTime) -> Self {
        Self(from)
    }
}

impl From<Timestamp> for OffsetDateTime {
    fn from(from: Timestamp) -> Self {
        from.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), std::fmt::Error> {
        f.write_str(&self.to_rfc3339())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::offset;

    #[test]
    fn parse_backend_timestamp() {
        let ts: Timestamp = "2024-03-01T09:05:33.123456+00:00".parse().unwrap();
        assert_eq!("2024-03-01 09:05", ts.display_in(UtcOffset::UTC));
        assert_eq!("2024-03-01 18:05", ts.display_in(offset!(+9)));
    }

    #[test]
    fn reject_garbage() {
        assert!("yesterday".parse::<Timestamp>().is_err());
    }

    #[test]
    fn convert_from_into_secs() {
        let t1 = Timestamp::from_secs(1_700_000_000).unwrap();
        assert_eq!(1_700_000_000, t1.as_secs());
        let t2: Timestamp = t1.to_rfc3339().parse().unwrap();
        assert_eq!(t1, t2);
    }
}
