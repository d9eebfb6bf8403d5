use crate::{FourCC, Mp4Error};

/// Atom header. 8 bytes in MP4.
///
/// ```ignore
/// | [X X X X] [Y Y Y Y] |
///    |         |
///    |         FourCC
///    32bit size
/// ```
///
/// 64-bit sized atoms (32-bit size set to `1`) are not
/// supported and are rejected by `verify()`, since a
/// declared size below the 8-byte header can never be
/// consistent with the enclosing extent.
#[derive(Debug, Clone, Default)]
pub struct AtomHeader {
    /// Total atom size in bytes including the 8 byte header.
    pub(crate) atom_size: u64,
    /// FourCC
    pub(crate) name: FourCC,
}

impl AtomHeader {
    /// Size of the encoded header in bytes.
    pub const SIZE: u64 = 8;

    pub fn atom_size(&self) -> u64 {
        self.atom_size
    }

    pub fn name(&self) -> &FourCC {
        &self.name
    }

    /// Size of data load (excludes header size).
    pub fn data_size(&self) -> u64 {
        self.atom_size - Self::SIZE
    }

    /// Checks the declared size against the 8-byte header
    /// minimum and against the bytes remaining in the
    /// enclosing extent.
    pub(crate) fn verify(&self, extent_remaining: u64) -> Result<(), Mp4Error> {
        if self.atom_size < Self::SIZE {
            return Err(Mp4Error::MalformedAtom {
                name: self.name.to_str().to_owned(),
                reason: format!("declared size {} below {} byte header", self.atom_size, Self::SIZE),
            });
        }
        if self.atom_size > extent_remaining {
            return Err(Mp4Error::MalformedAtom {
                name: self.name.to_str().to_owned(),
                reason: format!(
                    "declared size {} exceeds {} bytes left in enclosing atom",
                    self.atom_size, extent_remaining
                ),
            });
        }
        Ok(())
    }
}
