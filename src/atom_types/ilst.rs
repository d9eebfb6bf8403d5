//! Metadata item list atom (`ilst`).
//!
//! Location: `moov/meta/ilst`
//!
//! Each item references a key in the sibling `keys` atom
//! by 1-based index and wraps its value in a nested `data`
//! atom. Only the creation-date item is interpreted; its
//! ISO-8601 value carries the UTC offset recorded by the
//! device. All other items are structurally consumed and
//! ignored.
//!
//! See: <https://developer.apple.com/documentation/quicktime-file-format/metadata_item_list_atom>

use std::io::Read;

use time::UtcOffset;

use crate::{
    datetime::parse_offset_datetime,
    reader::Mp4Reader,
    Keys,
    Mp4Error,
    CREATION_DATE_KEY,
};

/// Item size + key index.
const ITEM_HEADER_SIZE: u64 = 8;
/// Smallest well-formed item: item header, `data` atom
/// header, type code and locale, empty value.
const ITEM_MIN_SIZE: u64 = 24;
/// `data` atom header + type code + locale.
const DATA_MIN_SIZE: u64 = 16;

/// Decodes an `ilst` atom from `data_size` bytes at current
/// position, resolving each item's key index against `keys`.
/// Consumes exactly `data_size` bytes.
///
/// Returns the UTC offset recovered from the creation-date
/// item, or `None` if the list holds no such item. Should
/// a list carry several creation-date items, the last one
/// wins.
pub(crate) fn parse_ilst<R: Read>(
    reader: &mut Mp4Reader<R>,
    data_size: u64,
    keys: &Keys,
) -> Result<Option<UtcOffset>, Mp4Error> {
    let mut offset: Option<UtcOffset> = None;
    let mut consumed: u64 = 0;

    while consumed < data_size {
        let remaining = data_size - consumed;
        if remaining < ITEM_HEADER_SIZE {
            return Err(Mp4Error::MalformedAtom {
                name: "ilst".to_owned(),
                reason: format!("{remaining} byte tail cannot hold an item header"),
            });
        }
        let item_size = reader.read_be_u32()? as u64;
        let key_index = reader.read_be_u32()?;
        if item_size < ITEM_MIN_SIZE || item_size > remaining {
            return Err(Mp4Error::MalformedAtom {
                name: "ilst".to_owned(),
                reason: format!(
                    "item size {item_size} inconsistent with {remaining} bytes left in data load"
                ),
            });
        }

        // Nested value atom: u32 size, 'data' tag,
        // u32 type code, 4 byte locale, then the raw value.
        let data_atom_size = reader.read_be_u32()? as u64;
        let _data_tag = reader.fourcc()?;
        if data_atom_size < DATA_MIN_SIZE || data_atom_size + ITEM_HEADER_SIZE > item_size {
            return Err(Mp4Error::MalformedAtom {
                name: "ilst".to_owned(),
                reason: format!(
                    "value atom size {data_atom_size} inconsistent with item size {item_size}"
                ),
            });
        }
        let _type_code = reader.read_be_u32()?;
        let _locale = reader.read_bytes(4)?;
        let value = reader.read_bytes(data_atom_size - DATA_MIN_SIZE)?;

        if keys.get(key_index)? == CREATION_DATE_KEY {
            let text = String::from_utf8(value)?;
            offset = Some(parse_offset_datetime(text.trim_matches(char::from(0)).trim())?.offset());
        }

        // Anything between the value atom and the declared
        // item end (e.g. further data atoms) is discarded.
        reader.skip(item_size - data_atom_size - ITEM_HEADER_SIZE)?;
        consumed += item_size;
    }

    Ok(offset)
}
