#[cfg(test)]
mod tests {
    use crate::{
        creation_time_from_reader,
        Mp4DateTime,
        Mp4Error,
        CREATION_DATE_KEY,
        EPOCH_ADJUSTER,
    };
    use std::io::Cursor;
    use time::UtcOffset;

    const MAKE_KEY: &str = "com.apple.quicktime.make";

    /// 2021-06-01T21:30:00Z, i.e. 2021-06-01T14:30:00-07:00.
    const UNIX_SECONDS: i64 = 1_622_583_000;

    fn atom(tag: &[u8; 4], payload: &[u8]) -> Vec<u8> {
        let mut bytes = ((payload.len() + 8) as u32).to_be_bytes().to_vec();
        bytes.extend_from_slice(tag);
        bytes.extend_from_slice(payload);
        bytes
    }

    fn mvhd_payload(creation: u32, modification: u32) -> Vec<u8> {
        let mut payload = vec![0_u8; 4]; // version + flags
        payload.extend_from_slice(&creation.to_be_bytes());
        payload.extend_from_slice(&modification.to_be_bytes());
        payload.extend_from_slice(&[0_u8; 88]); // time scale, duration, matrix etc.
        payload
    }

    fn keys_payload(keys: &[&str]) -> Vec<u8> {
        let mut payload = vec![0_u8; 4]; // version + reserved
        payload.extend_from_slice(&(keys.len() as u32).to_be_bytes());
        for key in keys {
            payload.extend_from_slice(&((key.len() + 8) as u32).to_be_bytes());
            payload.extend_from_slice(b"mdta");
            payload.extend_from_slice(key.as_bytes());
        }
        payload
    }

    fn ilst_item(index: u32, value: &str) -> Vec<u8> {
        let data_size = (value.len() + 16) as u32;
        let mut item = (data_size + 8).to_be_bytes().to_vec();
        item.extend_from_slice(&index.to_be_bytes());
        item.extend_from_slice(&data_size.to_be_bytes());
        item.extend_from_slice(b"data");
        item.extend_from_slice(&1_u32.to_be_bytes()); // UTF-8 type code
        item.extend_from_slice(&[0_u8; 4]); // locale
        item.extend_from_slice(value.as_bytes());
        item
    }

    fn raw_mp4_seconds(unix: i64) -> u32 {
        (unix + EPOCH_ADJUSTER) as u32
    }

    fn scan(bytes: &[u8]) -> Result<Option<Mp4DateTime>, Mp4Error> {
        creation_time_from_reader(Cursor::new(bytes), bytes.len() as u64)
    }

    /// `moov` containing `mvhd` plus an optional `meta` subtree.
    fn movie(meta_children: Option<Vec<u8>>) -> Vec<u8> {
        let raw = raw_mp4_seconds(UNIX_SECONDS);
        let mut children = atom(b"mvhd", &mvhd_payload(raw, raw));
        if let Some(meta) = meta_children {
            children.extend_from_slice(&atom(b"meta", &meta));
        }
        atom(b"moov", &children)
    }

    #[test]
    fn mvhd_epoch_round_trip() {
        let result = scan(&movie(None)).unwrap().unwrap();
        assert!(matches!(result, Mp4DateTime::Naive(_)));
        assert_eq!(result.offset(), None);
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }

    #[test]
    fn creation_date_reanchors_to_recorded_offset() {
        let mut meta = atom(b"keys", &keys_payload(&[MAKE_KEY, CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(
            b"ilst",
            &ilst_item(2, "2021-06-01T14:30:00-07:00"),
        ));

        let result = scan(&movie(Some(meta))).unwrap().unwrap();
        assert_eq!(result.offset(), Some(UtcOffset::from_hms(-7, 0, 0).unwrap()));
        // Only the display offset changes, never the instant
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
        match result {
            Mp4DateTime::Local(datetime) => {
                assert_eq!((datetime.hour(), datetime.minute()), (14, 30));
            }
            Mp4DateTime::Naive(_) => panic!("expected timezone-aware result"),
        }
    }

    #[test]
    fn compact_offset_without_colon_parses() {
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(1, "2021-06-01T14:30:00-0700")));

        let result = scan(&movie(Some(meta))).unwrap().unwrap();
        assert_eq!(result.offset(), Some(UtcOffset::from_hms(-7, 0, 0).unwrap()));
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }

    #[test]
    fn key_index_zero_is_out_of_range() {
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(0, "Apple")));

        let result = scan(&movie(Some(meta)));
        assert!(matches!(
            result,
            Err(Mp4Error::KeyIndexOutOfRange { index: 0, len: 1 })
        ));
    }

    #[test]
    fn key_index_past_table_is_out_of_range() {
        let mut meta = atom(b"keys", &keys_payload(&[MAKE_KEY, CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(3, "Apple")));

        let result = scan(&movie(Some(meta)));
        assert!(matches!(
            result,
            Err(Mp4Error::KeyIndexOutOfRange { index: 3, len: 2 })
        ));
    }

    #[test]
    fn no_moov_yields_not_found() {
        let mut bytes = atom(b"ftyp", b"qt  \x00\x00\x02\x00qt  ");
        bytes.extend_from_slice(&atom(b"free", &[0_u8; 16]));
        bytes.extend_from_slice(&atom(b"mdat", &[0xab_u8; 64]));

        assert!(scan(&bytes).unwrap().is_none());
    }

    #[test]
    fn empty_input_yields_not_found() {
        assert!(scan(&[]).unwrap().is_none());
    }

    #[test]
    fn meta_without_keys_leaves_time_naive() {
        // 'ilst' present but no 'keys' table before it,
        // so the item list is skipped unread
        let meta = atom(b"ilst", &ilst_item(1, "2021-06-01T14:30:00-07:00"));

        let result = scan(&movie(Some(meta))).unwrap().unwrap();
        assert_eq!(result.offset(), None);
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }

    #[test]
    fn keys_without_creation_date_leaves_time_naive() {
        let mut meta = atom(b"keys", &keys_payload(&[MAKE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(1, "Apple")));

        let result = scan(&movie(Some(meta))).unwrap().unwrap();
        assert_eq!(result.offset(), None);
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }

    #[test]
    fn meta_outside_moov_does_not_adjust() {
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(1, "2021-06-01T14:30:00-07:00")));

        // meta subtree at root level, structurally unrelated
        // to the moov that follows
        let mut bytes = atom(b"meta", &meta);
        bytes.extend_from_slice(&movie(None));

        let result = scan(&bytes).unwrap().unwrap();
        assert_eq!(result.offset(), None);
    }

    #[test]
    fn last_creation_date_wins() {
        let mut items = ilst_item(1, "2021-06-01T14:30:00-07:00");
        items.extend_from_slice(&ilst_item(1, "2021-06-01T23:30:00+02:00"));
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &items));

        let result = scan(&movie(Some(meta))).unwrap().unwrap();
        assert_eq!(result.offset(), Some(UtcOffset::from_hms(2, 0, 0).unwrap()));
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }

    #[test]
    fn ilst_item_padding_is_skipped() {
        let mut item = ilst_item(1, "2021-06-01T14:30:00-07:00");
        // bump the declared item size to cover 4 pad bytes
        let padded_size = (u32::from_be_bytes([item[0], item[1], item[2], item[3]]) + 4).to_be_bytes();
        item[..4].copy_from_slice(&padded_size);
        item.extend_from_slice(&[0_u8; 4]);
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &item));

        let result = scan(&movie(Some(meta))).unwrap().unwrap();
        assert_eq!(result.offset(), Some(UtcOffset::from_hms(-7, 0, 0).unwrap()));
    }

    #[test]
    fn unparseable_creation_date_fails() {
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(1, "June 1st 2021, 2:30pm")));

        let result = scan(&movie(Some(meta)));
        assert!(matches!(result, Err(Mp4Error::InvalidTimestampFormat(_))));
    }

    #[test]
    fn creation_date_without_offset_fails() {
        let mut meta = atom(b"keys", &keys_payload(&[CREATION_DATE_KEY]));
        meta.extend_from_slice(&atom(b"ilst", &ilst_item(1, "2021-06-01T14:30:00")));

        let result = scan(&movie(Some(meta)));
        assert!(matches!(result, Err(Mp4Error::InvalidTimestampFormat(_))));
    }

    #[test]
    fn child_overrunning_enclosing_extent_is_malformed() {
        // moov declares an 8 byte data load, but its only
        // child claims 100 bytes
        let mut child_header = 100_u32.to_be_bytes().to_vec();
        child_header.extend_from_slice(b"mvhd");
        let bytes = atom(b"moov", &child_header);

        let result = scan(&bytes);
        assert!(matches!(result, Err(Mp4Error::MalformedAtom { .. })));
    }

    #[test]
    fn container_tail_shorter_than_header_is_malformed() {
        // child sizes no longer sum to the container's
        // inner size: 4 stray bytes remain
        let raw = raw_mp4_seconds(UNIX_SECONDS);
        let mut children = atom(b"mvhd", &mvhd_payload(raw, raw));
        children.extend_from_slice(&[0_u8; 4]);
        let bytes = atom(b"moov", &children);

        let result = scan(&bytes);
        assert!(matches!(result, Err(Mp4Error::MalformedAtom { .. })));
    }

    #[test]
    fn atom_size_below_header_size_is_malformed() {
        let mut bytes = 4_u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(b"free");
        bytes.extend_from_slice(&[0_u8; 8]);

        let result = scan(&bytes);
        assert!(matches!(result, Err(Mp4Error::MalformedAtom { .. })));
    }

    #[test]
    fn undersized_keys_entry_is_malformed() {
        // single entry declaring 4 bytes, below its own
        // 8 byte entry header
        let mut payload = vec![0_u8; 4];
        payload.extend_from_slice(&1_u32.to_be_bytes());
        payload.extend_from_slice(&4_u32.to_be_bytes());
        payload.extend_from_slice(b"mdta");
        let bytes = atom(b"moov", &atom(b"meta", &atom(b"keys", &payload)));

        let result = scan(&bytes);
        assert!(matches!(result, Err(Mp4Error::MalformedAtom { .. })));
    }

    #[test]
    fn stream_shorter_than_declared_is_truncated() {
        let mut bytes = movie(None);
        let declared = bytes.len() as u64;
        bytes.truncate(bytes.len() - 10);

        let result = creation_time_from_reader(Cursor::new(bytes.as_slice()), declared);
        assert!(matches!(result, Err(Mp4Error::TruncatedInput { .. })));
    }

    #[test]
    fn unknown_atoms_are_skipped() {
        let mut bytes = atom(b"ftyp", b"qt  \x00\x00\x02\x00qt  ");
        bytes.extend_from_slice(&atom(b"wide", &[]));
        bytes.extend_from_slice(&movie(None));
        bytes.extend_from_slice(&atom(b"mdat", &[0xab_u8; 256]));

        let result = scan(&bytes).unwrap().unwrap();
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }

    #[test]
    fn unknown_atoms_inside_moov_are_skipped() {
        let raw = raw_mp4_seconds(UNIX_SECONDS);
        let mut children = atom(b"udta", &atom(b"XYZ ", &[0_u8; 12]));
        children.extend_from_slice(&atom(b"mvhd", &mvhd_payload(raw, raw)));
        let bytes = atom(b"moov", &children);

        let result = scan(&bytes).unwrap().unwrap();
        assert_eq!(result.unix_timestamp(), UNIX_SECONDS);
    }
}
