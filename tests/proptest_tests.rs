//! Property-based tests using proptest.

mod common;

use proptest::prelude::*;
use zipmate::{Archive, DosDateTime, ExtractOptions, WriteOptions};

/// The representable DOS timestamp range in unix seconds:
/// 1980-01-01 00:00:00 through 2107-12-31 23:59:58.
const DOS_MIN_SECS: i64 = 315_532_800;
const DOS_MAX_SECS: i64 = 4_354_819_198;

proptest! {
    /// Converting unix seconds to a DOS timestamp and back loses at most
    /// the odd second (the format has 2-second resolution).
    #[test]
    fn timestamp_roundtrip_within_resolution(secs in DOS_MIN_SECS..=DOS_MAX_SECS) {
        let ts = DosDateTime::from_unix_secs(secs);
        let back = ts.as_unix_secs().expect("in-range timestamp must validate");
        prop_assert_eq!(back, secs - (secs % 2));
    }

    /// Raw header fields survive unchanged through construction.
    #[test]
    fn timestamp_raw_fields_preserved(date in 0u16..=u16::MAX, time in 0u16..=u16::MAX) {
        let ts = DosDateTime::from_raw(date, time);
        prop_assert_eq!(ts.raw(), (date, time));
    }

    /// Out-of-range inputs clamp to the representable range instead of
    /// wrapping or panicking.
    #[test]
    fn timestamp_clamps_out_of_range(secs in proptest::sample::select(vec![
        i64::MIN, -1, 0, DOS_MIN_SECS - 1, DOS_MAX_SECS + 1, i64::MAX,
    ])) {
        let ts = DosDateTime::from_unix_secs(secs);
        let back = ts.as_unix_secs().expect("clamped timestamp must validate");
        prop_assert!((DOS_MIN_SECS..=DOS_MAX_SECS).contains(&back));
    }
}

fn small_file_strategy() -> impl Strategy<Value = Vec<(String, Vec<u8>)>> {
    proptest::collection::vec(
        (
            "[a-z][a-z0-9]{0,7}\\.dat",
            proptest::collection::vec(any::<u8>(), 0..512),
        ),
        1..4,
    )
    .prop_filter("names must be distinct", |files| {
        let mut names: Vec<_> = files.iter().map(|(n, _)| n).collect();
        names.sort();
        names.dedup();
        names.len() == files.len()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Arbitrary small files survive a create/extract cycle bit-for-bit at
    /// any compression level.
    #[test]
    fn archive_roundtrip_preserves_contents(
        files in small_file_strategy(),
        level in 0u8..=9,
    ) {
        let entries: Vec<(&str, &[u8])> = files
            .iter()
            .map(|(name, data)| (name.as_str(), data.as_slice()))
            .collect();
        let (tmp, archive_path, result) = common::build_archive_with_result(
            &entries,
            WriteOptions::new().with_level(level).unwrap(),
        );
        prop_assert_eq!(result.entries_written, entries.len());

        let archive = Archive::open_path(&archive_path).unwrap();
        let dest = tmp.path().join("out");
        let extracted = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
        prop_assert!(extracted.is_complete());
        for (name, data) in &entries {
            prop_assert_eq!(&common::read_extracted(&dest, name), data);
        }
    }
}
