//! Round-trip integration tests: create an archive on disk, open it, and
//! extract everything back.

mod common;

use zipmate::{Archive, CompressionMethod, ExtractOptions, WriteOptions};

const ENTRIES: &[(&str, &[u8])] = &[
    ("readme.txt", b"hello zip world"),
    ("data/numbers.bin", &[0u8, 1, 2, 3, 4, 255, 254]),
    ("data/nested/deep.txt", b"deeply nested file"),
];

#[test]
fn test_create_open_extract() {
    let (tmp, archive_path, result) =
        common::build_archive_with_result(ENTRIES, WriteOptions::new());
    assert_eq!(result.entries_written, 3);
    assert_eq!(result.entries_failed, 0);
    assert!(result.is_complete());
    assert_eq!(result.bytes_read, ENTRIES.iter().map(|(_, d)| d.len() as u64).sum::<u64>());

    let archive = Archive::open_path(&archive_path).unwrap();
    assert_eq!(archive.len(), 3);
    assert!(!archive.has_encrypted_entries());

    let dest = tmp.path().join("out");
    let extracted = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert_eq!(extracted.entries_extracted, 3);
    assert!(extracted.is_complete());
    common::verify_extracted_tree(&dest, ENTRIES);
}

#[test]
fn test_listing_metadata() {
    let (_tmp, archive_path) = common::build_archive(ENTRIES);
    let archive = Archive::open_path(&archive_path).unwrap();

    let readme = archive
        .entries()
        .iter()
        .find(|e| e.path == "readme.txt")
        .expect("readme.txt missing from listing");
    assert!(readme.is_file());
    assert_eq!(readme.uncompressed_size, 15);
    assert!(!readme.is_encrypted);
    assert!(readme.modified.is_some(), "fresh files carry a timestamp");

    let info = archive.info();
    assert_eq!(info.file_count, 3);
    assert_eq!(info.total_size, 40);
    assert!(info.archive_size > 0);

    assert!(archive.entry(0).is_some());
    assert!(archive.entry(3).is_none());
}

#[test]
fn test_single_file_source() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("alone.txt");
    std::fs::write(&source, b"just one file").unwrap();
    let dest = tmp.path().join("single.zip");

    let result = zipmate::create_archive(&source, &dest, &mut WriteOptions::new()).unwrap();
    assert_eq!(result.entries_written, 1);

    let archive = Archive::open_path(&dest).unwrap();
    assert_eq!(archive.entries()[0].path, "alone.txt");

    let out = tmp.path().join("out");
    archive.extract(&out, &mut ExtractOptions::new()).unwrap();
    assert_eq!(common::read_extracted(&out, "alone.txt"), b"just one file");
}

#[test]
fn test_stored_level_zero() {
    let (tmp, archive_path, result) = common::build_archive_with_result(
        &[("plain.txt", b"uncompressed content")],
        WriteOptions::new().with_level(0).unwrap(),
    );
    assert_eq!(result.entries_written, 1);
    // Stored entries are written verbatim
    assert_eq!(result.bytes_written, result.bytes_read);

    let archive = Archive::open_path(&archive_path).unwrap();
    assert_eq!(archive.entries()[0].method(), CompressionMethod::Stored);

    let dest = tmp.path().join("out");
    archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert_eq!(
        common::read_extracted(&dest, "plain.txt"),
        b"uncompressed content"
    );
}

#[test]
fn test_empty_file_entry() {
    let entries: &[(&str, &[u8])] = &[("empty.txt", b""), ("full.txt", b"x")];
    let (tmp, archive_path) = common::build_archive(entries);

    let archive = Archive::open_path(&archive_path).unwrap();
    let empty = archive
        .entries()
        .iter()
        .find(|e| e.path == "empty.txt")
        .unwrap();
    assert_eq!(empty.uncompressed_size, 0);
    assert_eq!(empty.compression_ratio(), 0.0);

    let dest = tmp.path().join("out");
    let result = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert_eq!(result.entries_extracted, 2);
    common::verify_extracted_tree(&dest, entries);
}

#[test]
fn test_unicode_names() {
    let entries: &[(&str, &[u8])] = &[
        ("notes/caf\u{e9}.txt", b"accented"),
        ("\u{65e5}\u{672c}\u{8a9e}.md", b"multibyte"),
    ];
    let (tmp, archive_path) = common::build_archive(entries);

    let archive = Archive::open_path(&archive_path).unwrap();
    assert!(archive.entries().iter().any(|e| e.path.contains("caf\u{e9}")));

    let dest = tmp.path().join("out");
    let result = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert!(result.is_complete());
    common::verify_extracted_tree(&dest, entries);
}

#[test]
fn test_incompressible_data_roundtrips() {
    // Pseudo-random bytes deflate poorly; the entry may expand but must
    // still come back intact.
    let mut data = Vec::with_capacity(4096);
    let mut state = 0x2545F491_4F6CDD1Du64;
    for _ in 0..4096 {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        data.push(state as u8);
    }
    let entries: &[(&str, &[u8])] = &[("random.bin", &data)];
    let (tmp, archive_path) = common::build_archive(entries);

    let archive = Archive::open_path(&archive_path).unwrap();
    let dest = tmp.path().join("out");
    archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert_eq!(common::read_extracted(&dest, "random.bin"), data);
}

#[test]
fn test_mtime_restored() {
    let tmp = tempfile::TempDir::new().unwrap();
    let source = tmp.path().join("src");
    std::fs::create_dir_all(&source).unwrap();
    let file = source.join("old.txt");
    std::fs::write(&file, b"from the past").unwrap();
    // 2024-06-15 12:30:42 UTC
    filetime::set_file_mtime(&file, filetime::FileTime::from_unix_time(1_718_454_642, 0)).unwrap();

    let dest_zip = tmp.path().join("old.zip");
    zipmate::create_archive(&source, &dest_zip, &mut WriteOptions::new()).unwrap();

    let archive = Archive::open_path(&dest_zip).unwrap();
    let entry = &archive.entries()[0];
    let ts = entry.modified.expect("timestamp survives the roundtrip");
    assert_eq!(ts.to_string(), "2024-06-15 12:30:42");

    let out = tmp.path().join("out");
    archive.extract(&out, &mut ExtractOptions::new()).unwrap();
    let restored = std::fs::metadata(out.join("old.txt")).unwrap();
    let mtime = filetime::FileTime::from_last_modification_time(&restored);
    assert_eq!(mtime.unix_seconds(), 1_718_454_642);
}
