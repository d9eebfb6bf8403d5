use std::io::{self, Cursor, Read};

use binrw::BinReaderExt;

use crate::{AtomHeader, FourCC, Mp4Error};

/// Forward-only, bounds-checked reader over a byte
/// source of known size.
///
/// Every read is checked against the bytes remaining
/// before it is issued, so a corrupt length field can
/// never pull the cursor past the end of the declared
/// extent. There is no seeking, backward or otherwise.
#[derive(Debug)]
pub(crate) struct Mp4Reader<R: Read> {
    inner: R,
    /// Bytes remaining until the end of the source.
    remaining: u64,
}

impl<R: Read> Mp4Reader<R> {
    /// Creates a reader over `inner`, declared to hold
    /// exactly `len` readable bytes.
    pub(crate) fn new(inner: R, len: u64) -> Self {
        Self {
            inner,
            remaining: len,
        }
    }

    /// Returns remaining number of bytes in the source.
    pub(crate) fn remaining(&self) -> u64 {
        self.remaining
    }

    /// Reads exactly `len` bytes at current position.
    ///
    /// Fails with `TruncatedInput` if fewer than `len` bytes
    /// remain, or if the underlying source runs dry before
    /// its declared size.
    pub(crate) fn read_bytes(&mut self, len: u64) -> Result<Vec<u8>, Mp4Error> {
        if len > self.remaining {
            return Err(Mp4Error::TruncatedInput {
                wanted: len,
                available: self.remaining,
            });
        }
        let mut chunk = self.inner.by_ref().take(len);
        let mut data = Vec::with_capacity(len as usize);
        let read_len = chunk.read_to_end(&mut data)? as u64;
        self.remaining -= read_len;
        if read_len != len {
            return Err(Mp4Error::TruncatedInput {
                wanted: len,
                available: read_len,
            });
        }
        Ok(data)
    }

    /// Reads `len` bytes into `Cursor<Vec<u8>>`
    /// for field-level decoding.
    pub(crate) fn cursor(&mut self, len: u64) -> Result<Cursor<Vec<u8>>, Mp4Error> {
        Ok(Cursor::new(self.read_bytes(len)?))
    }

    /// Reads a Big Endian `u32` at current position.
    pub(crate) fn read_be_u32(&mut self) -> Result<u32, Mp4Error> {
        Ok(self.cursor(4)?.read_be::<u32>()?)
    }

    /// Reads a UTF-8 string of `len` bytes.
    pub(crate) fn read_string(&mut self, len: u64) -> Result<String, Mp4Error> {
        Ok(String::from_utf8(self.read_bytes(len)?)?)
    }

    /// Reads FourCC at current position.
    pub(crate) fn fourcc(&mut self) -> Result<FourCC, Mp4Error> {
        Ok(FourCC::from_u32(self.read_be_u32()?))
    }

    /// Reads an 8-byte MP4 atom header (32-bit Big Endian
    /// total size followed by FourCC) at current position.
    ///
    /// Does not verify that current position
    /// is at an atom boundary.
    pub(crate) fn header(&mut self) -> Result<AtomHeader, Mp4Error> {
        let atom_size = self.read_be_u32()? as u64;
        let name = self.fourcc()?;
        Ok(AtomHeader { atom_size, name })
    }

    /// Skips `len` bytes without retaining them.
    ///
    /// Skipped payloads (e.g. `mdat`) are streamed into a
    /// sink rather than buffered.
    pub(crate) fn skip(&mut self, len: u64) -> Result<(), Mp4Error> {
        if len > self.remaining {
            return Err(Mp4Error::TruncatedInput {
                wanted: len,
                available: self.remaining,
            });
        }
        let copied = io::copy(&mut self.inner.by_ref().take(len), &mut io::sink())?;
        self.remaining -= copied;
        if copied != len {
            return Err(Mp4Error::TruncatedInput {
                wanted: len,
                available: copied,
            });
        }
        Ok(())
    }
}
