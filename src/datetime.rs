//! The crate's temporal result type and ISO-8601 parsing.

use std::fmt;

use time::{
    format_description::{self, well_known::Rfc3339},
    OffsetDateTime,
    PrimitiveDateTime,
    UtcOffset,
};

use crate::Mp4Error;

/// ISO-8601 with the colon-less `±HHMM` offset some
/// devices write (e.g. `2021-06-01T14:30:00-0700`),
/// which RFC 3339 rejects.
const COMPACT_OFFSET_FORMAT: &str =
    "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]";

/// Best-known creation/modification instant of an MP4 file.
///
/// `mvhd` timestamps are UTC with no timezone of their own.
/// When the metadata tree carries a creation-date item, the
/// instant is re-anchored to that item's UTC offset; the
/// instant itself never changes, only its display offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mp4DateTime {
    /// No timezone was recovered. UTC per the container spec.
    Naive(PrimitiveDateTime),
    /// Re-anchored to the offset recorded by the device.
    Local(OffsetDateTime),
}

impl Mp4DateTime {
    /// The recovered UTC offset, if any.
    pub fn offset(&self) -> Option<UtcOffset> {
        match self {
            Self::Naive(_) => None,
            Self::Local(dt) => Some(dt.offset()),
        }
    }

    /// Seconds since the Unix epoch. Naive values are
    /// taken as UTC.
    pub fn unix_timestamp(&self) -> i64 {
        match self {
            Self::Naive(dt) => dt.assume_utc().unix_timestamp(),
            Self::Local(dt) => dt.unix_timestamp(),
        }
    }

    /// Re-anchors to `offset`, preserving the instant.
    pub(crate) fn to_local(self, offset: UtcOffset) -> Self {
        match self {
            Self::Naive(dt) => Self::Local(dt.assume_utc().to_offset(offset)),
            Self::Local(dt) => Self::Local(dt.to_offset(offset)),
        }
    }
}

impl fmt::Display for Mp4DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Naive(dt) => write!(f, "{dt}"),
            Self::Local(dt) => write!(f, "{dt}"),
        }
    }
}

/// Parses ISO-8601 text with an explicit UTC offset,
/// RFC 3339 first, then the compact `±HHMM` offset variant.
///
/// Text without an offset is rejected: a creation-date
/// value only contributes timezone information.
pub(crate) fn parse_offset_datetime(value: &str) -> Result<OffsetDateTime, Mp4Error> {
    if let Ok(dt) = OffsetDateTime::parse(value, &Rfc3339) {
        return Ok(dt);
    }
    let compact = format_description::parse(COMPACT_OFFSET_FORMAT)
        .map_err(|_| Mp4Error::InvalidTimestampFormat(value.to_owned()))?;
    OffsetDateTime::parse(value, &compact)
        .map_err(|_| Mp4Error::InvalidTimestampFormat(value.to_owned()))
}
