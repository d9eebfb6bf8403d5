//! Metadata item keys atom (`keys`).
//!
//! Location: `moov/meta/keys`
//!
//! Holds the ordered vocabulary of metadata key names
//! that `ilst` items reference by 1-based index.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/metadata_item_keys_atom>

use std::io::Read;

use crate::{reader::Mp4Reader, Mp4Error};

/// Metadata item keys atom (`keys`).
///
/// Location: `moov/meta/keys`
///
/// Layout: 1 byte version, 3 reserved bytes, Big Endian
/// `u32` entry count, then per entry a `u32` total size,
/// a 4-byte namespace (e.g. `mdta`), and `size - 8` bytes
/// of key name text.
///
/// See: <https://developer.apple.com/documentation/quicktime-file-format/metadata_item_keys_atom>
#[derive(Debug, Default)]
pub struct Keys {
    /// Key names in file order. An `ilst` item referencing
    /// index `i` (1-based) resolves to `keys[i - 1]`.
    keys: Vec<String>,
}

/// Version/flags + entry count.
const KEYS_PREFIX_SIZE: u64 = 8;
/// Entry size + namespace, preceding the key name text.
const ENTRY_HEADER_SIZE: u64 = 8;

impl Keys {
    /// Decodes a `keys` atom from `data_size` bytes at
    /// current position. Consumes exactly `data_size` bytes.
    pub(crate) fn parse<R: Read>(
        reader: &mut Mp4Reader<R>,
        data_size: u64,
    ) -> Result<Self, Mp4Error> {
        if data_size < KEYS_PREFIX_SIZE {
            return Err(Mp4Error::MalformedAtom {
                name: "keys".to_owned(),
                reason: format!("{data_size} byte data load cannot hold entry count"),
            });
        }
        // 1 byte version + 3 reserved bytes, unused
        reader.skip(4)?;
        let entry_count = reader.read_be_u32()?;
        let mut consumed = KEYS_PREFIX_SIZE;

        // entry_count is file-supplied; cap the allocation at
        // what the data load could possibly hold
        let max_entries = (data_size - KEYS_PREFIX_SIZE) / ENTRY_HEADER_SIZE;
        let mut keys: Vec<String> = Vec::with_capacity(entry_count.min(max_entries as u32) as usize);
        for _ in 0..entry_count {
            if data_size - consumed < ENTRY_HEADER_SIZE {
                return Err(Mp4Error::MalformedAtom {
                    name: "keys".to_owned(),
                    reason: format!("entry table overruns {data_size} byte data load"),
                });
            }
            let entry_size = reader.read_be_u32()? as u64;
            // Key namespace, not used for matching
            reader.skip(4)?;
            if entry_size < ENTRY_HEADER_SIZE {
                return Err(Mp4Error::MalformedAtom {
                    name: "keys".to_owned(),
                    reason: format!("entry size {entry_size} below {ENTRY_HEADER_SIZE} byte entry header"),
                });
            }
            if entry_size > data_size - consumed {
                return Err(Mp4Error::MalformedAtom {
                    name: "keys".to_owned(),
                    reason: format!("entry size {entry_size} overruns {data_size} byte data load"),
                });
            }
            keys.push(reader.read_string(entry_size - ENTRY_HEADER_SIZE)?);
            consumed += entry_size;
        }
        // Some writers pad after the last entry
        reader.skip(data_size - consumed)?;

        Ok(Self { keys })
    }

    /// Number of keys in the table.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Returns `true` if the table holds `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Resolves a 1-based key index as referenced by
    /// `ilst` items.
    pub fn get(&self, index: u32) -> Result<&str, Mp4Error> {
        if index == 0 || index as usize > self.keys.len() {
            return Err(Mp4Error::KeyIndexOutOfRange {
                index,
                len: self.keys.len(),
            });
        }
        Ok(self.keys[index as usize - 1].as_str())
    }
}
