//! Password protection: creation, probing, authentication and extraction.

mod common;

use zipmate::{probe_password_required, Archive, Error, ExtractOptions};

const SECRET_ENTRIES: &[(&str, &[u8])] = &[
    ("secret/plan.txt", b"the plan"),
    ("secret/budget.csv", b"a,b,c\n1,2,3"),
];

#[test]
fn test_encrypted_roundtrip() {
    let (tmp, archive_path) = common::build_encrypted_archive(SECRET_ENTRIES, "hunter2");

    let archive = Archive::open_path_with_password(&archive_path, "hunter2").unwrap();
    assert!(archive.has_encrypted_entries());
    assert!(archive.entries().iter().all(|e| e.is_encrypted));

    let dest = tmp.path().join("out");
    let result = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert!(result.is_complete());
    common::verify_extracted_tree(&dest, SECRET_ENTRIES);
}

#[test]
fn test_wrong_password_fails_at_open() {
    let (_tmp, archive_path) = common::build_encrypted_archive(SECRET_ENTRIES, "hunter2");

    let err = Archive::open_path_with_password(&archive_path, "wrong-password").unwrap_err();
    assert!(err.is_password_error(), "got {:?}", err);
}

#[test]
fn test_listing_works_without_password() {
    // Metadata is never encrypted by ZipCrypto; only member data is.
    let (_tmp, archive_path) = common::build_encrypted_archive(SECRET_ENTRIES, "hunter2");

    let archive = Archive::open_path(&archive_path).unwrap();
    assert_eq!(archive.len(), 2);
    assert!(archive.entries().iter().all(|e| e.is_encrypted));
    assert!(archive.info().has_encrypted_entries);
}

#[test]
fn test_extraction_without_password_fails_per_member() {
    let (tmp, archive_path) = common::build_encrypted_archive(SECRET_ENTRIES, "hunter2");

    let archive = Archive::open_path(&archive_path).unwrap();
    let dest = tmp.path().join("out");
    let result = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();

    assert_eq!(result.entries_extracted, 0);
    assert_eq!(result.entries_failed, 2);
    assert!(!result.is_ok());
    assert_eq!(result.failures.len(), 2);
}

#[test]
fn test_probe_password_required() {
    let (_tmp_a, plain_path) = common::build_archive(&[("a.txt", b"plain")]);
    assert!(!probe_password_required(&plain_path));

    let (_tmp_b, enc_path) = common::build_encrypted_archive(SECRET_ENTRIES, "pw");
    assert!(probe_password_required(&enc_path));
}

#[test]
fn test_probe_is_conservative_on_errors() {
    let tmp = tempfile::TempDir::new().unwrap();
    let garbage = tmp.path().join("not-a-zip.zip");
    std::fs::write(&garbage, b"this is not an archive at all").unwrap();

    assert!(probe_password_required(&garbage));
    assert!(probe_password_required(tmp.path().join("missing.zip")));
}

#[test]
fn test_open_with_password_on_unencrypted_archive() {
    // Nothing to authenticate against; the password is accepted and unused.
    let (tmp, archive_path) = common::build_archive(&[("a.txt", b"plain")]);
    let archive = Archive::open_path_with_password(&archive_path, "irrelevant").unwrap();

    let dest = tmp.path().join("out");
    let result = archive.extract(&dest, &mut ExtractOptions::new()).unwrap();
    assert_eq!(result.entries_extracted, 1);
}

#[test]
fn test_selected_extraction_with_password() {
    let (tmp, archive_path) = common::build_encrypted_archive(SECRET_ENTRIES, "hunter2");
    let archive = Archive::open_path_with_password(&archive_path, "hunter2").unwrap();

    let dest = tmp.path().join("out");
    let result = archive
        .extract_indices(&dest, &[0], &mut ExtractOptions::new())
        .unwrap();
    assert_eq!(result.entries_extracted, 1);
    let name = &archive.entries()[0].path;
    assert!(dest.join(name).exists());
}

#[test]
fn test_missing_archive_reports_not_found() {
    let err = Archive::open_path_with_password("/no/such/archive.zip", "pw").unwrap_err();
    assert!(matches!(err, Error::NotFound { .. }));
}
