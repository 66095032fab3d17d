#![allow(clippy::print_stderr, clippy::print_stdout)]

mod lex;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tlpin_lexer::{SourceBuffer, DEFAULT_READ_CHUNK_SIZE};
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

use lex::{lex_and_print, LexPrintConfig, LexTotals};

const SOURCE_EXTENSION: &str = "tlpin";
const STDIN_SOURCE_NAME: &str = "<stdin>";

#[derive(Parser)]
#[command(name = "tlpin lexer")]
#[command(version, author, about, long_about = None)]
/// Lex tlpin programs and dump their tokens
struct Cli {
    /// A file or folder path to read from. If not provided, reads from stdin.
    /// If a folder is provided, reads all files with the `.tlpin` extension.
    file_or_dir: Option<PathBuf>,

    /// Keep lexing after recoverable errors and report all of them.
    #[arg(long, env = "TLPIN_DEFERRED")]
    deferred: bool,

    /// How many bytes to read from the input at a time.
    #[arg(long, env = "TLPIN_READ_CHUNK_SIZE", default_value_t = DEFAULT_READ_CHUNK_SIZE)]
    chunk_size: usize,

    /// Print only errors, no tokens.
    #[arg(short, long)]
    err_only: bool,

    /// Turn debugging information on. Repeat for more detail.
    /// Ignored if `RUST_LOG` is set.
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

fn init_tracing(debug: u8) {
    let default_directive = match debug {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(path: &Path, chunk_size: usize) -> Result<SourceBuffer> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;

    SourceBuffer::from_reader(file, chunk_size)
        .with_context(|| format!("Failed to read {}", path.display()))
}

fn is_source_file(entry: &walkdir::DirEntry) -> bool {
    entry.file_type().is_file()
        && entry.path().extension().and_then(|ext| ext.to_str()) == Some(SOURCE_EXTENSION)
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_tracing(cli.debug);

    let config = LexPrintConfig {
        deferred: cli.deferred,
        print_tokens: !cli.err_only,
    };

    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr();
    let mut totals = LexTotals::default();

    match cli.file_or_dir.as_deref() {
        Some(dir) if dir.is_dir() => {
            for entry in WalkDir::new(dir).sort_by_file_name() {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(error) => {
                        tracing::warn!(%error, "Skipping unreadable directory entry");
                        continue;
                    }
                };

                if !is_source_file(&entry) {
                    continue;
                }

                let source_name = entry.path().display().to_string();

                match read_source(entry.path(), cli.chunk_size) {
                    Ok(source) => {
                        totals += lex_and_print(
                            source.as_bytes(),
                            &source_name,
                            &config,
                            &mut out,
                            &mut err,
                        )?;
                    }
                    Err(error) => {
                        eprintln!("{error:#}");
                        totals.failed_files += 1;
                    }
                }
            }

            out.flush()?;

            eprintln!(
                "Done! Lexed {} files, found {} tokens.",
                totals.files, totals.lexemes
            );

            if totals.failed_files > 0 {
                eprintln!(
                    "Files with errors: {}, total errors: {}",
                    totals.failed_files, totals.errors
                );
            }
        }
        Some(file) => {
            let source = read_source(file, cli.chunk_size)?;

            totals += lex_and_print(
                source.as_bytes(),
                &file.display().to_string(),
                &config,
                &mut out,
                &mut err,
            )?;
        }
        None => {
            let source = SourceBuffer::from_reader(io::stdin().lock(), cli.chunk_size)
                .context("Failed to read stdin")?;

            totals += lex_and_print(
                source.as_bytes(),
                STDIN_SOURCE_NAME,
                &config,
                &mut out,
                &mut err,
            )?;
        }
    }

    out.flush()?;

    if totals.failed_files > 0 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}
