//! Command implementations for the CLI.

use std::path::Path;

use console::style;
use zipmate::{
    create_archive, probe_password_required, Archive, CancelFlag, Error, ExtractOptions,
    Password, WriteOptions,
};

use crate::exit_codes::{error_to_exit_code, ExitCode};
use crate::output;
use crate::password;
use crate::progress::CliProgress;
use crate::selection;

pub struct ExtractConfig<'a> {
    pub archive_path: &'a Path,
    pub output_dir: &'a Path,
    pub indices: Option<String>,
    pub password: Option<String>,
    pub restore_mtime: bool,
    pub quiet: bool,
    pub cancel: CancelFlag,
}

pub struct CreateConfig<'a> {
    pub archive_path: &'a Path,
    pub source: &'a Path,
    pub level: u8,
    pub password: Option<String>,
    pub encrypt: bool,
    pub quiet: bool,
    pub cancel: CancelFlag,
}

fn print_error(error: &Error) {
    eprintln!("{} {}", style("error:").red().bold(), error);
}

fn warn_unusual_extension(path: &Path) {
    if path
        .extension()
        .is_none_or(|ext| !ext.eq_ignore_ascii_case("zip"))
    {
        eprintln!(
            "{} '{}' does not end in .zip",
            style("warning:").yellow().bold(),
            path.display()
        );
    }
}

/// Opens the archive, prompting for a password only when the archive needs
/// one and none was given on the command line.
///
/// The path is checked up front: probing a missing file conservatively
/// reports it as encrypted, which would turn a typo into a password prompt.
fn open_archive(path: &Path, provided: Option<String>) -> Result<Archive, Error> {
    if !path.is_file() {
        return Err(Error::NotFound {
            path: path.to_path_buf(),
        });
    }
    warn_unusual_extension(path);
    let needs_password = provided.is_some() || probe_password_required(path);
    match password::get_password(provided, needs_password) {
        Some(pwd) => Archive::open_path_with_password(path, pwd),
        None => Archive::open_path(path),
    }
}

pub fn list(
    archive_path: &Path,
    technical: bool,
    provided: Option<String>,
    _quiet: bool,
) -> ExitCode {
    let archive = match open_archive(archive_path, provided) {
        Ok(archive) => archive,
        Err(e) => {
            print_error(&e);
            return error_to_exit_code(&e);
        }
    };
    output::print_list(archive.entries(), &archive.info(), technical);
    ExitCode::Success
}

pub fn extract(config: ExtractConfig) -> ExitCode {
    let indices = match &config.indices {
        Some(raw) => match selection::parse_indices(raw) {
            Ok(list) => Some(list),
            Err(msg) => {
                eprintln!("{} {}", style("error:").red().bold(), msg);
                return ExitCode::BadArgs;
            }
        },
        None => None,
    };

    let archive = match open_archive(config.archive_path, config.password) {
        Ok(archive) => archive,
        Err(e) => {
            print_error(&e);
            return error_to_exit_code(&e);
        }
    };

    let reporter = CliProgress::new(config.quiet, config.cancel);
    let bar = reporter.bar_handle();
    let mut options = ExtractOptions::new()
        .with_progress(Box::new(reporter))
        .with_restore_mtime(config.restore_mtime);

    let run = match &indices {
        Some(list) => archive.extract_indices(config.output_dir, list, &mut options),
        None => archive.extract(config.output_dir, &mut options),
    };
    bar.finish_and_clear();

    match run {
        Ok(result) => {
            output::print_extract_result(&result);
            if result.cancelled {
                ExitCode::UserInterrupt
            } else if result.is_complete() {
                ExitCode::Success
            } else if result.is_ok() {
                ExitCode::Warning
            } else {
                ExitCode::FatalError
            }
        }
        Err(e) => {
            print_error(&e);
            error_to_exit_code(&e)
        }
    }
}

pub fn create(config: CreateConfig) -> ExitCode {
    warn_unusual_extension(config.archive_path);

    let pwd = match (config.password, config.encrypt) {
        (Some(provided), _) => Some(Password::new(provided)),
        (None, true) => match password::confirm_password() {
            Some(pwd) => Some(pwd),
            None => return ExitCode::BadArgs,
        },
        (None, false) => None,
    };

    let options = match WriteOptions::new().with_level(config.level) {
        Ok(options) => options,
        Err(e) => {
            print_error(&e);
            return ExitCode::BadArgs;
        }
    };
    let options = match pwd {
        Some(pwd) => options.with_password(pwd),
        None => options,
    };

    let reporter = CliProgress::new(config.quiet, config.cancel);
    let bar = reporter.bar_handle();
    let mut options = options.with_progress(Box::new(reporter));

    let run = create_archive(config.source, config.archive_path, &mut options);
    bar.finish_and_clear();

    match run {
        Ok(result) => {
            output::print_write_result(&result, config.archive_path);
            if result.cancelled {
                ExitCode::UserInterrupt
            } else if result.is_complete() {
                ExitCode::Success
            } else if result.is_ok() {
                ExitCode::Warning
            } else {
                ExitCode::FatalError
            }
        }
        Err(e) => {
            print_error(&e);
            error_to_exit_code(&e)
        }
    }
}

pub fn probe(archive_path: &Path) -> ExitCode {
    if !archive_path.is_file() {
        let e = Error::NotFound {
            path: archive_path.to_path_buf(),
        };
        print_error(&e);
        return error_to_exit_code(&e);
    }
    if probe_password_required(archive_path) {
        println!("Password required: {}", style("yes").yellow());
    } else {
        println!("Password required: no");
    }
    ExitCode::Success
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_archive_rejects_missing_path_without_prompting() {
        // Must fail fast on a missing file; probing it would conservatively
        // report "encrypted" and block on a password prompt.
        let err = open_archive(Path::new("/no/such/archive.zip"), None).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }
}
