//! CLI tool for zipmate archive operations.

mod commands;
mod exit_codes;
mod output;
mod password;
mod progress;
mod selection;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use zipmate::CancelFlag;

/// ZIP archive manager
#[derive(Parser)]
#[command(name = "zipmate")]
#[command(author, version, about = "ZIP archive manager", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Suppress progress output
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List archive contents (alias: l)
    #[command(alias = "l")]
    List {
        /// Archive file to list
        archive: PathBuf,

        /// Show packed sizes, ratios and CRCs
        #[arg(long)]
        technical: bool,

        /// Password (will prompt if needed and not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },

    /// Extract files from archive (alias: x)
    #[command(alias = "x")]
    Extract {
        /// Archive file to extract
        archive: PathBuf,

        /// Output directory
        #[arg(short = 'o', long, default_value = "extracted_files")]
        output: PathBuf,

        /// Listing indices to extract, e.g. "0,2,5-8" (omit for all)
        #[arg(short = 'i', long)]
        indices: Option<String>,

        /// Password (will prompt if needed and not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Do not restore modification times
        #[arg(long)]
        no_mtime: bool,
    },

    /// Create archive from a file or directory (alias: a)
    #[command(alias = "a")]
    Create {
        /// Archive file to create
        archive: PathBuf,

        /// File or directory to add
        source: PathBuf,

        /// Compression level (0-9, 0 = store)
        #[arg(short = 'l', long, default_value = "6")]
        level: u8,

        /// Encrypt with this password
        #[arg(short = 'p', long)]
        password: Option<String>,

        /// Prompt for a password with confirmation
        #[arg(long)]
        encrypt: bool,
    },

    /// Check whether an archive requires a password (alias: t)
    #[command(alias = "t")]
    Probe {
        /// Archive file to inspect
        archive: PathBuf,
    },
}

fn main() {
    env_logger::init();

    // Ctrl+C requests cooperative cancellation; the operation stops after
    // the member currently being processed.
    let cancel = CancelFlag::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || {
            eprintln!("\nInterrupted, finishing current entry...");
            cancel.cancel();
        })
        .ok();
    }

    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::List {
            archive,
            technical,
            password,
        } => commands::list(&archive, technical, password, cli.quiet),

        Commands::Extract {
            archive,
            output,
            indices,
            password,
            no_mtime,
        } => commands::extract(commands::ExtractConfig {
            archive_path: &archive,
            output_dir: &output,
            indices,
            password,
            restore_mtime: !no_mtime,
            quiet: cli.quiet,
            cancel: cancel.clone(),
        }),

        Commands::Create {
            archive,
            source,
            level,
            password,
            encrypt,
        } => commands::create(commands::CreateConfig {
            archive_path: &archive,
            source: &source,
            level,
            password,
            encrypt,
            quiet: cli.quiet,
            cancel: cancel.clone(),
        }),

        Commands::Probe { archive } => commands::probe(&archive),
    };

    std::process::exit(exit_code.code());
}
