//! Recover the authoritative, timezone-correct creation
//! timestamp of a QuickTime/MP4 file from its atom tree.
//!
//! The `mvhd` movie header stores coarse timestamps as UTC
//! seconds since 1904-01-01 with no timezone. Devices that
//! record their timezone do so elsewhere: a `meta` subtree
//! whose `keys`/`ilst` pair carries
//! `com.apple.quicktime.creationdate` as ISO-8601 text with
//! a UTC offset. This crate walks the tree once, strictly
//! forward and bounds-checked, and combines the two.
//!
//! Does not and will not support any kind of video
//! de/encoding, atom writing, or fragmented (fMP4) layouts.
//!
//! The implementation was mostly done with help from
//! <https://developer.apple.com/library/archive/documentation/QuickTime/QTFF/QTFFPreface/qtffPreface.html>
//! (despite the warning on the front page above).
//!
//! ```rs
//! use mp4date::Mp4;
//! use std::path::Path;
//!
//! fn main() -> std::io::Result<()> {
//!     let mut mp4 = Mp4::new(Path::new("VIDEO.MP4"))?;
//!
//!     match mp4.creation_time()? {
//!         Some(datetime) => println!("{datetime}"),
//!         None => println!("no 'moov' atom"),
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod mp4;
pub mod fourcc;
pub mod atom;
pub mod atom_types;
pub mod consts;
pub mod datetime;
pub mod errors;
pub mod tests;

// Internal reader
pub(crate) mod reader;

pub use mp4::{creation_time_from_reader, Mp4};
pub use fourcc::FourCC;
pub use atom::AtomHeader;
pub use atom_types::{Keys, Mvhd};
pub use consts::{mp4_time_zero, CREATION_DATE_KEY, EPOCH_ADJUSTER};
pub use datetime::Mp4DateTime;
pub use errors::Mp4Error;
