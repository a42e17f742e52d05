//! Output formatting for CLI operations.

use console::style;
use zipmate::{ArchiveInfo, Entry, ExtractResult, WriteResult};

/// Prints the entry listing as a table.
///
/// The technical view adds packed size, ratio and CRC columns.
pub fn print_list(entries: &[Entry], info: &ArchiveInfo, technical: bool) {
    if technical {
        println!(
            "{}",
            style(format!(
                "{:>5} {:>10} {:>10} {:>7} {:>8} {:>19}  {}",
                "Index", "Size", "Packed", "Ratio", "CRC", "Modified", "Name"
            ))
            .bold()
        );
    } else {
        println!(
            "{}",
            style(format!(
                "{:>5} {:>10} {:>19}  {}",
                "Index", "Size", "Modified", "Name"
            ))
            .bold()
        );
    }
    println!("{}", "-".repeat(72));

    for (index, entry) in entries.iter().enumerate() {
        let size_str = if entry.is_directory {
            String::new()
        } else {
            humanize_bytes(entry.uncompressed_size)
        };
        let name = if entry.is_encrypted {
            format!("{} {}", entry.path, style("*").red())
        } else {
            entry.path.clone()
        };

        if technical {
            println!(
                "{:>5} {:>10} {:>10} {:>6.1}% {:08X} {:>19}  {}",
                index,
                size_str,
                humanize_bytes(entry.compressed_size),
                entry.compression_ratio(),
                entry.crc32,
                entry.formatted_modified(),
                name
            );
        } else {
            println!(
                "{:>5} {:>10} {:>19}  {}",
                index,
                size_str,
                entry.formatted_modified(),
                name
            );
        }
    }

    println!("{}", "-".repeat(72));
    println!(
        "{} files, {} directories, {} total ({} packed, {:.1}% saved)",
        info.file_count,
        info.dir_count,
        humanize_bytes(info.total_size),
        humanize_bytes(info.total_compressed),
        info.compression_ratio()
    );
    if info.has_encrypted_entries {
        println!("{}", style("Archive contains encrypted entries (*)").yellow());
    }
}

/// Prints the outcome of an extraction.
pub fn print_extract_result(result: &ExtractResult) {
    if result.cancelled {
        println!(
            "{} after {} of {} entries ({} extracted)",
            style("Cancelled").yellow().bold(),
            result.entries_extracted + result.entries_failed + result.entries_skipped,
            result.total,
            humanize_bytes(result.bytes_extracted)
        );
    } else if result.is_complete() {
        println!(
            "{} {} entries ({})",
            style("Extracted").green().bold(),
            result.entries_extracted,
            humanize_bytes(result.bytes_extracted)
        );
    } else {
        println!(
            "Extracted {} of {} entries, {} failed",
            result.entries_extracted, result.total, result.entries_failed
        );
    }
    print_failures(&result.failures);
}

/// Prints the outcome of an archive creation.
pub fn print_write_result(result: &WriteResult, dest: &std::path::Path) {
    if result.cancelled {
        println!(
            "{}: '{}' finalized with {} of {} files",
            style("Cancelled").yellow().bold(),
            dest.display(),
            result.entries_written,
            result.total
        );
    } else if result.is_complete() {
        println!(
            "{} '{}': {} files, {} -> {} ({:.1}% saved)",
            style("Created").green().bold(),
            dest.display(),
            result.entries_written,
            humanize_bytes(result.bytes_read),
            humanize_bytes(result.bytes_written),
            result.space_savings()
        );
    } else {
        println!(
            "Created '{}' with {} of {} files, {} failed",
            dest.display(),
            result.entries_written,
            result.total,
            result.entries_failed
        );
    }
    print_failures(&result.failures);
}

fn print_failures(failures: &[(String, String)]) {
    if failures.is_empty() {
        return;
    }
    eprintln!("{}", style("Failures:").red().bold());
    for (path, reason) in failures {
        eprintln!("  {}: {}", path, reason);
    }
}

/// Converts bytes to a human-readable string
pub fn humanize_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;
    const TB: u64 = GB * 1024;

    if bytes >= TB {
        format!("{:.1} TB", bytes as f64 / TB as f64)
    } else if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_humanize_bytes() {
        assert_eq!(humanize_bytes(512), "512 B");
        assert_eq!(humanize_bytes(2048), "2.0 KB");
        assert_eq!(humanize_bytes(5 * 1024 * 1024), "5.0 MB");
    }
}
