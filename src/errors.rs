//! Various MP4-related read/parse errors.

use std::fmt;

/// Various MP4 related read/parse errors.
#[derive(Debug)]
pub enum Mp4Error {
    /// Converted `binrw` error.
    BinReadError(binrw::Error),
    /// Converted `Utf8Error`.
    Utf8Error(std::string::FromUtf8Error),
    /// IO error.
    IOError(std::io::Error),
    /// Fewer bytes remain in the current extent
    /// than a declared field requires.
    TruncatedInput{wanted: u64, available: u64},
    /// Declared atom or entry length inconsistent with
    /// the enclosing extent. Covers zero and sub-header
    /// sizes, and extents whose tail is too short to
    /// hold another atom header.
    MalformedAtom{name: String, reason: String},
    /// Metadata item references a 1-based key index
    /// absent from the current key table.
    KeyIndexOutOfRange{index: u32, len: usize},
    /// Creation-date value is not parseable as
    /// ISO-8601 text with an explicit UTC offset.
    InvalidTimestampFormat(String),
}

impl std::error::Error for Mp4Error {}

impl fmt::Display for Mp4Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mp4Error::BinReadError(err) => write!(f, "{err}"),
            Mp4Error::Utf8Error(err) => write!(f, "{err}"),
            Mp4Error::IOError(err) => write!(f, "IO error: {err}"),
            Mp4Error::TruncatedInput{wanted, available} => write!(f, "Truncated input: needed {wanted} bytes, {available} remain."),
            Mp4Error::MalformedAtom{name, reason} => write!(f, "Malformed '{name}' atom: {reason}."),
            Mp4Error::KeyIndexOutOfRange{index, len} => write!(f, "Key index {index} out of range for key table with {len} entries."),
            Mp4Error::InvalidTimestampFormat(value) => write!(f, "'{value}' is not an ISO-8601 datetime with UTC offset."),
        }
    }
}

/// Converts std::io::Error to Mp4Error
impl From<std::io::Error> for Mp4Error {
    fn from(err: std::io::Error) -> Self {
        Mp4Error::IOError(err)
    }
}

/// Converts std::string::FromUtf8Error to Mp4Error
/// (`&str` requires `std::str::Utf8Error`)
impl From<std::string::FromUtf8Error> for Mp4Error {
    fn from(err: std::string::FromUtf8Error) -> Mp4Error {
        Mp4Error::Utf8Error(err)
    }
}

/// Converts Mp4Error to std::io::Error
impl From<Mp4Error> for std::io::Error {
    fn from(err: Mp4Error) -> Self {
        std::io::Error::new(std::io::ErrorKind::Other, err)
    }
}

/// Converts binrw::Error to Mp4Error
impl From<binrw::Error> for Mp4Error {
    fn from(err: binrw::Error) -> Mp4Error {
        Mp4Error::BinReadError(err)
    }
}
