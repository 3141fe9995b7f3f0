//! base-ex: stream standard input or a file through one of many base codecs.

mod args;

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process;

use anyhow::Context;
use log::debug;

use baseex_core::codecs::{Converter, FileMetadata};
use baseex_core::constants::TOOL_NAME;
use baseex_core::stream::{decode_stream, encode_stream, InputSource, OutputSink, StreamConfig};
use baseex_core::types::StreamError;

use crate::args::{parse_args, Cli, Command};

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_usage() {
    print!(
        "Usage: {tool} <CONVERTER> [OPTION]... [FILE]\n\
         Encode or decode FILE, or standard input, to standard output.\n\n\
         With no FILE, or when FILE is -, read standard input.\n\n\
         \x20 -d, --decode          decode data\n\
         \x20 -i, --ignore-garbage  when decoding, ignore non-alphabet characters\n\
         \x20 -u, --upper           upper-case output (case-insensitive converters)\n\
         \x20 -l, --lower           lower-case output (case-insensitive converters)\n\
         \x20 -w, --wrap=COLS       wrap encoded lines after COLS characters (default 76).\n\
         \x20                         Use 0 to disable line wrapping\n\
         \x20 -h, --help            display this help and exit\n\
         \x20 -V, --version         output version information and exit\n\n\
         Examples:\n\
         \x20 {tool} base64 photo.jpg\n\
         \x20 echo 'SGk=' | {tool} base64 -d\n\
         \x20 {tool} uuencode -w0 archive.tar\n\
         \x20 {tool} base32_crockford -l < key.bin\n\n\
         Run with an unknown CONVERTER to list every converter.\n",
        tool = TOOL_NAME
    );
}

/// Listing printed to stderr for an unknown converter.
fn converter_listing() -> String {
    let mut listing = String::from("\nConverters:\n");
    for name in Converter::names() {
        listing.push_str("  * ");
        listing.push_str(name);
        listing.push('\n');
    }
    listing.push_str("---------------------\n");
    listing.push_str("Unknown converter. See the options above.");
    listing
}

/// Envelope metadata for a file argument.
fn stat_input(path: &str) -> anyhow::Result<FileMetadata> {
    let meta = fs::metadata(path).with_context(|| format!("{path}: Cannot stat file"))?;
    let name = Path::new(path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string());
    Ok(FileMetadata { name, permissions: permissions_octal(&meta) })
}

/// A missing file gets its own message; every other stat failure keeps the context.
fn stat_failure_message(path: &str, err: &anyhow::Error) -> String {
    let missing = err
        .downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == ErrorKind::NotFound);
    if missing {
        format!("{path}: No such file or directory.")
    } else {
        err.to_string()
    }
}

#[cfg(unix)]
fn permissions_octal(meta: &fs::Metadata) -> String {
    use std::os::unix::fs::PermissionsExt;
    format!("{:o}", meta.permissions().mode() & 0o777)
}

#[cfg(not(unix))]
fn permissions_octal(_meta: &fs::Metadata) -> String {
    baseex_core::constants::stdin_meta::PERMISSIONS.to_string()
}

/// 2 for input failures, 0 when the reader of our output went away.
fn exit_code(err: &StreamError) -> i32 {
    match err {
        StreamError::Io(e) if e.kind() == ErrorKind::BrokenPipe => 0,
        StreamError::Read(_) => 2,
        _ => 1,
    }
}

fn run(cli: Cli) -> i32 {
    let Some(converter) = cli.converter.as_deref().and_then(Converter::resolve) else {
        eprintln!("{}", converter_listing());
        return 1;
    };

    let mut config = StreamConfig::default()
        .with_ignore_garbage(cli.ignore_garbage)
        .with_output_case(cli.case)
        .with_line_wrap(cli.wrap);

    let input = match cli.input_path() {
        None => InputSource::Reader(Box::new(io::stdin())),
        Some(path) => match stat_input(path) {
            Ok(meta) => {
                config = config.with_file(meta);
                InputSource::File(PathBuf::from(path))
            }
            Err(e) => {
                eprintln!("{TOOL_NAME}: {}", stat_failure_message(path, &e));
                return 1;
            }
        },
    };
    let output = OutputSink::Writer(Box::new(io::BufWriter::new(io::stdout())));

    let result = if cli.decode {
        decode_stream(converter, input, output, config)
    } else {
        encode_stream(converter, input, output, config)
    };

    match result {
        Ok(report) => {
            for diag in &report.diagnostics {
                eprintln!("{TOOL_NAME}: warning: {diag}");
            }
            match serde_json::to_string(&report.telemetry) {
                Ok(json) => debug!("[CLI] telemetry {json}"),
                Err(e) => debug!("[CLI] telemetry not serializable: {e}"),
            }
            0
        }
        Err(e) => {
            let code = exit_code(&e);
            if code != 0 {
                eprintln!("{TOOL_NAME}: {e}");
            }
            code
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let code = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(cli)) => run(cli),
        Ok(Command::Help) => {
            print_usage();
            0
        }
        Ok(Command::Version) => {
            println!("{TOOL_NAME} {VERSION}");
            0
        }
        Err(e) => {
            eprintln!("{TOOL_NAME}: {e}");
            eprintln!("Try '{TOOL_NAME} --help' for more information.");
            1
        }
    };
    process::exit(code);
}
