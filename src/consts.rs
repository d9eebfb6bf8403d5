use time::{self, PrimitiveDateTime, Month};

/// Offset in seconds between the MP4 container epoch
/// (midnight, January 1, 1904 UTC) and the Unix epoch.
pub const EPOCH_ADJUSTER: i64 = 2_082_844_800;

/// QuickTime metadata key naming the timezone-aware
/// creation date on e.g. Apple devices
/// (`meta/ilst` entry, resolved via the `meta/keys` table).
pub const CREATION_DATE_KEY: &str = "com.apple.quicktime.creationdate";

/// Time zero for MP4 containers. Midnight January 1, 1904.
pub fn mp4_time_zero() -> PrimitiveDateTime {
    time::Date::from_calendar_date(1904, Month::January, 1).unwrap()
        .with_hms_milli(0, 0, 0, 0).unwrap()
}
