//! Core MP4 struct and the recursive atom walk that
//! recovers a file's timezone-correct creation timestamp.
//!
//! The coarse instant comes from `moov/mvhd` (seconds since
//! the 1904 container epoch, UTC, no timezone of its own).
//! Devices that record their timezone do so in a structurally
//! unrelated place: a `meta` subtree whose `keys` table names
//! `com.apple.quicktime.creationdate` and whose `ilst` holds
//! the ISO-8601 value. The walk collects both and combines
//! them at the `moov` level.
//!
//! ```rs
//! use mp4date::Mp4;
//! use std::path::Path;
//!
//! fn main() -> std::io::Result<()> {
//!     let mut mp4 = Mp4::new(Path::new("VIDEO.MP4"))?;
//!
//!     // `None` if the file holds no 'moov' atom.
//!     println!("{:?}", mp4.creation_time()?);
//!
//!     Ok(())
//! }
//! ```

use std::{
    fs::File,
    io::{BufReader, Read, Seek, SeekFrom},
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use time::UtcOffset;

use crate::{
    atom_types::{parse_ilst, Keys, Mvhd},
    reader::Mp4Reader,
    AtomHeader,
    FourCC,
    Mp4DateTime,
    Mp4Error,
    CREATION_DATE_KEY,
};

/// Walks deeper only for `moov` and `meta`; anything nested
/// further than this is not a valid layout for either.
const MAX_RECURSE_DEPTH: usize = 8;

/// Value one recursion level hands back to its caller.
///
/// The same `walk` call yields different semantic payloads
/// depending on the enclosing atom, so the payload is tagged
/// rather than inferred from context after the fact.
#[derive(Debug)]
enum ScanValue {
    /// Nothing usable found at this level.
    None,
    /// Creation/modification instant, from `mvhd` or bubbled
    /// up from `moov` (then already timezone-combined).
    CoarseTime(Mp4DateTime),
    /// UTC offset recovered from a `meta` subtree.
    Timezone(UtcOffset),
}

/// Enclosing context of one recursion level.
/// Decides what `walk` returns upward.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Enclosing {
    /// Top level of the file.
    Root,
    /// Inside a `moov` atom.
    Moov,
    /// Inside a `meta` atom.
    Meta,
}

impl Enclosing {
    fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Moov => "moov",
            Self::Meta => "meta",
        }
    }
}

/// Mp4 file.
#[derive(Debug)]
pub struct Mp4 {
    /// Open MP4 file.
    file: File,
    /// File size in bytes.
    len: u64,
    path: PathBuf,
}

impl Mp4 {
    /// New Mp4 from path.
    pub fn new(path: &Path) -> Result<Self, Mp4Error> {
        let file = File::open(path)?;
        let len = file.metadata()?.len(); // to avoid repeated sys calls
        Ok(Self {
            file,
            len,
            path: path.to_owned(),
        })
    }

    /// Returns MP4 file size in bytes.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file's best-known creation/modification
    /// time: the `mvhd` modification instant, timezone-aware
    /// if the metadata tree recorded an offset, naive (UTC)
    /// otherwise. `None` if the file holds no `moov` atom.
    pub fn creation_time(&mut self) -> Result<Option<Mp4DateTime>, Mp4Error> {
        self.file.seek(SeekFrom::Start(0))?;
        let reader = BufReader::new(&mut self.file);
        creation_time_from_reader(reader, self.len)
    }

    /// Creation times for many files, one independent
    /// traversal per file, run in parallel.
    pub fn creation_times<P: AsRef<Path> + Sync>(
        paths: &[P],
    ) -> Vec<Result<Option<Mp4DateTime>, Mp4Error>> {
        paths
            .par_iter()
            .map(|path| Mp4::new(path.as_ref())?.creation_time())
            .collect()
    }
}

/// Returns the best-known creation/modification time for any
/// byte source of known total size, read strictly forward
/// from offset 0. See [`Mp4::creation_time`].
pub fn creation_time_from_reader<R: Read>(
    reader: R,
    len: u64,
) -> Result<Option<Mp4DateTime>, Mp4Error> {
    let mut reader = Mp4Reader::new(reader, len);
    match walk(&mut reader, len, Enclosing::Root, 0)? {
        ScanValue::CoarseTime(datetime) => Ok(Some(datetime)),
        _ => Ok(None),
    }
}

/// One recursion level: reads atoms until `extent` bytes are
/// consumed exactly, dispatching by FourCC.
///
/// The key table decoded from a `keys` atom stays local to
/// this level, visible only to later siblings within the
/// same extent.
fn walk<R: Read>(
    reader: &mut Mp4Reader<R>,
    extent: u64,
    enclosing: Enclosing,
    depth: usize,
) -> Result<ScanValue, Mp4Error> {
    if depth > MAX_RECURSE_DEPTH {
        return Err(Mp4Error::MalformedAtom {
            name: enclosing.name().to_owned(),
            reason: format!("nesting depth {depth} exceeds max {MAX_RECURSE_DEPTH}"),
        });
    }

    let mut coarse: Option<Mp4DateTime> = None;
    let mut timezone: Option<UtcOffset> = None;
    let mut keys: Option<Keys> = None;
    let mut consumed: u64 = 0;

    while consumed < extent {
        let remaining = extent - consumed;
        if remaining < AtomHeader::SIZE {
            return Err(Mp4Error::MalformedAtom {
                name: enclosing.name().to_owned(),
                reason: format!("{remaining} byte tail cannot hold an atom header"),
            });
        }
        let header = reader.header()?;
        header.verify(remaining)?;
        let data_size = header.data_size();

        match header.name() {
            FourCC::Moov => {
                if let ScanValue::CoarseTime(datetime) =
                    walk(reader, data_size, Enclosing::Moov, depth + 1)?
                {
                    coarse = Some(datetime);
                }
            }
            FourCC::Meta => {
                if let ScanValue::Timezone(offset) =
                    walk(reader, data_size, Enclosing::Meta, depth + 1)?
                {
                    timezone = Some(offset);
                }
            }
            FourCC::Mvhd => {
                coarse = Some(Mp4DateTime::Naive(
                    Mvhd::parse(reader, data_size)?.modification_time(),
                ));
            }
            FourCC::Keys => keys = Some(Keys::parse(reader, data_size)?),
            FourCC::Ilst => match &keys {
                Some(table) if table.contains(CREATION_DATE_KEY) => {
                    if let Some(offset) = parse_ilst(reader, data_size, table)? {
                        timezone = Some(offset);
                    }
                }
                // No creation-date key can be resolved here,
                // so the item list has nothing to offer
                _ => reader.skip(data_size)?,
            },
            _ => reader.skip(data_size)?,
        }

        consumed += header.atom_size();
    }

    Ok(match enclosing {
        Enclosing::Meta => match timezone {
            Some(offset) => ScanValue::Timezone(offset),
            None => ScanValue::None,
        },
        // The combiner: a timezone found within this 'moov'
        // re-anchors the coarse instant; the instant itself
        // is exact either way.
        Enclosing::Moov => match (coarse, timezone) {
            (Some(datetime), Some(offset)) => ScanValue::CoarseTime(datetime.to_local(offset)),
            (Some(datetime), None) => ScanValue::CoarseTime(datetime),
            (None, _) => ScanValue::None,
        },
        Enclosing::Root => match coarse {
            Some(datetime) => ScanValue::CoarseTime(datetime),
            None => ScanValue::None,
        },
    })
}
