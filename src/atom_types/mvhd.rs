//! Movie header atom (`mvhd`).
//!
//! Location: `moov/mvhd`
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>

use std::io::Read;

use binrw::{BinRead, BinReaderExt};
use time::Duration;

use crate::{mp4_time_zero, reader::Mp4Reader, Mp4Error};

/// Movie header atom (`mvhd`).
///
/// Location: `moov/mvhd`
///
/// Only the leading timestamp fields are decoded;
/// time scale, duration, matrix etc. that follow are
/// discarded up to the atom's declared length.
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/movie_header_atom>
#[derive(Debug, BinRead)]
#[br(big)]
pub struct Mvhd {
    _version: u8,
    _flags: [u8; 3],
    /// Seconds since midnight, 1904-01-01 UTC
    pub creation_time: u32,
    /// Seconds since midnight, 1904-01-01 UTC
    pub modification_time: u32,
}

/// Decoded byte size of the fields above.
const MVHD_PREFIX_SIZE: u64 = 12;

impl Mvhd {
    /// Decodes an `mvhd` atom from `data_size` bytes at
    /// current position. Consumes exactly `data_size` bytes.
    pub(crate) fn parse<R: Read>(
        reader: &mut Mp4Reader<R>,
        data_size: u64,
    ) -> Result<Self, Mp4Error> {
        if data_size < MVHD_PREFIX_SIZE {
            return Err(Mp4Error::MalformedAtom {
                name: "mvhd".to_owned(),
                reason: format!("{data_size} byte data load cannot hold timestamp fields"),
            });
        }
        let mvhd = reader.cursor(MVHD_PREFIX_SIZE)?.read_be::<Self>()?;
        // Later mvhd fields are not needed
        reader.skip(data_size - MVHD_PREFIX_SIZE)?;
        Ok(mvhd)
    }

    /// Creation time as UTC datetime.
    /// May default to MP4 default time
    /// `1904-01-01 00:00:00` depending on device and settings.
    pub fn creation_time(&self) -> time::PrimitiveDateTime {
        mp4_time_zero() + Duration::seconds(self.creation_time as i64)
    }

    /// Modification time as UTC datetime.
    pub fn modification_time(&self) -> time::PrimitiveDateTime {
        mp4_time_zero() + Duration::seconds(self.modification_time as i64)
    }
}
