use serde::{Deserialize, Serialize};
use std::{
    fmt::{self, Display},
    sync::OnceLock,
};
use time::{
    OffsetDateTime, UtcOffset, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339,
};

static BODY_FORMAT: OnceLock<Vec<BorrowedFormatItem<'static>>> = OnceLock::new();

// Fixed ISO-8601-style body shared by both date-time text forms. Nine
// subsecond digits keep the text width stable for any stored value.
fn body_format() -> &'static [BorrowedFormatItem<'static>] {
    BODY_FORMAT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:9]",
        )
        .expect("static format description parses")
    })
}

fn write_instant(f: &mut fmt::Formatter<'_>, instant: OffsetDateTime) -> fmt::Result {
    let text = instant.format(body_format()).map_err(|_| fmt::Error)?;
    f.write_str(&text)
}

///
/// DateTime
///
/// An absolute instant: nanoseconds since the Unix epoch, UTC. Covers
/// roughly 1677..2262, which brackets every date the store accepts.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(transparent)]
pub struct DateTime(i64);

impl DateTime {
    pub const STORED_SIZE: usize = 8;

    pub const EPOCH: Self = Self(0);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    #[must_use]
    pub const fn from_unix_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn from_unix_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(1_000))
    }

    #[must_use]
    pub const fn from_unix_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    #[must_use]
    pub const fn from_unix_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000_000))
    }

    #[must_use]
    pub const fn as_unix_nanos(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(i64::from_be_bytes(bytes))
    }

    /// Parse an RFC 3339 string, normalizing any offset to UTC.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        let parsed = OffsetDateTime::parse(s, &Rfc3339).ok()?;
        i64::try_from(parsed.unix_timestamp_nanos()).ok().map(Self)
    }

    fn to_offset_date_time(self) -> Option<OffsetDateTime> {
        OffsetDateTime::from_unix_timestamp_nanos(i128::from(self.0)).ok()
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let instant = self.to_offset_date_time().ok_or(fmt::Error)?;
        write_instant(f, instant)?;
        f.write_str("Z")
    }
}

///
/// DateTimeOffset
///
/// An absolute instant plus the civil offset it was recorded at. The offset
/// is carried for rendering only; ordering and cross-type comparison use the
/// normalized UTC instant.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub struct DateTimeOffset {
    instant: DateTime,
    offset_minutes: i16,
}

impl DateTimeOffset {
    pub const STORED_SIZE: usize = 10;

    /// Largest civil offset accepted, in minutes (14 hours either way).
    pub const MAX_OFFSET_MINUTES: i16 = 14 * 60;

    /// Offsets outside the accepted range are clamped, so a decoded value
    /// always renders.
    #[must_use]
    pub const fn new(instant: DateTime, offset_minutes: i16) -> Self {
        let clamped = if offset_minutes > Self::MAX_OFFSET_MINUTES {
            Self::MAX_OFFSET_MINUTES
        } else if offset_minutes < -Self::MAX_OFFSET_MINUTES {
            -Self::MAX_OFFSET_MINUTES
        } else {
            offset_minutes
        };

        Self {
            instant,
            offset_minutes: clamped,
        }
    }

    #[must_use]
    pub const fn instant(self) -> DateTime {
        self.instant
    }

    #[must_use]
    pub const fn offset_minutes(self) -> i16 {
        self.offset_minutes
    }
}

impl Display for DateTimeOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let utc = self.instant.to_offset_date_time().ok_or(fmt::Error)?;
        let offset = UtcOffset::from_whole_seconds(i32::from(self.offset_minutes) * 60)
            .map_err(|_| fmt::Error)?;
        write_instant(f, utc.to_offset(offset))?;

        let sign = if self.offset_minutes < 0 { '-' } else { '+' };
        let magnitude = self.offset_minutes.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", magnitude / 60, magnitude % 60)
    }
}

///
/// Duration
///
/// A signed span of time in nanoseconds.
///

#[derive(
    Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[repr(transparent)]
pub struct Duration(i64);

impl Duration {
    pub const STORED_SIZE: usize = 8;

    pub const ZERO: Self = Self(0);
    pub const MIN: Self = Self(i64::MIN);
    pub const MAX: Self = Self(i64::MAX);

    #[must_use]
    pub const fn from_nanos(nanos: i64) -> Self {
        Self(nanos)
    }

    #[must_use]
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros.saturating_mul(1_000))
    }

    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis.saturating_mul(1_000_000))
    }

    #[must_use]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1_000_000_000))
    }

    #[must_use]
    pub const fn as_nanos(self) -> i64 {
        self.0
    }

    #[must_use]
    pub const fn to_be_bytes(self) -> [u8; 8] {
        self.0.to_be_bytes()
    }

    #[must_use]
    pub const fn from_be_bytes(bytes: [u8; 8]) -> Self {
        Self(i64::from_be_bytes(bytes))
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let magnitude = self.0.unsigned_abs();
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{sign}{}.{:09}s",
            magnitude / 1_000_000_000,
            magnitude % 1_000_000_000
        )
    }
}

///
/// TESTS
///
