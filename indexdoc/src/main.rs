//! # indexdoc
//!
//! A CLI tool for turning a spreadsheet resource index into a sectioned,
//! banded index document.
//!
//! ## Overview
//!
//! indexdoc is built on top of indexdoclib. It reads an index spreadsheet
//! (topic / book / page / notes style rows), merges rows that describe the
//! same topic, sorts them and writes one heading plus one table per leading
//! letter.
//!
//! ## Features
//!
//! - **Recommended mode**: `--recommended` sorts by `Topic`, ignoring case and
//!   symbols, with every number-led topic under `#`
//! - **Any sort column**: `-s <column>` picks the sort key
//! - **Multiple output formats**: DOCX (default), Markdown, JSON
//!
//! ## Usage
//!
//! ```bash
//! # Recommended settings, titled
//! indexdoc -f index.xlsx --recommended -t My Study Index
//!
//! # Sort by a specific column, ignoring case
//! indexdoc -f index.xlsx -s Book -Ic
//!
//! # Markdown preview next to the spreadsheet
//! indexdoc -f index.xlsx --recommended -o index.md
//! ```

mod render;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use indexdoclib::{build_index, IndexOptions, SortOptions};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use render::{
    describe_target, ensure_writable_target, write_document_to, OutputFormat, DEFAULT_OUTPUT,
    FORMAT_NAMES,
};

/// Two-letter short flags accepted for compatibility, with their long forms
const LEGACY_FLAGS: [(&str, &str); 2] = [("-Ic", "--ignore-case"), ("-Is", "--ignore-symbols")];

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("indexdoc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Create an index document for any resource from an index spreadsheet")
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .value_name("FILENAME")
                .required(true)
                .help("Path to index spreadsheet (.xlsx, .xls, .ods)"),
        )
        .arg(
            Arg::new("recommended")
                .long("recommended")
                .action(ArgAction::SetTrue)
                .help("Use recommended settings: sort by Topic, ignore case and symbols, group numbers"),
        )
        .arg(
            Arg::new("sort")
                .short('s')
                .long("sort")
                .value_name("COLUMN")
                .help("Column to sort by (defaults to the first column, or Topic with --recommended)"),
        )
        .arg(
            Arg::new("title")
                .short('t')
                .long("title")
                .value_name("WORDS")
                .num_args(1..)
                .help("Title for the document"),
        )
        .arg(
            Arg::new("ignore-case")
                .long("ignore-case")
                .action(ArgAction::SetTrue)
                .help("Ignore case when sorting (also -Ic)"),
        )
        .arg(
            Arg::new("ignore-symbols")
                .long("ignore-symbols")
                .action(ArgAction::SetTrue)
                .help("Ignore symbols when sorting (also -Is)"),
        )
        .arg(
            Arg::new("group-numbers")
                .short('g')
                .long("group-numbers")
                .action(ArgAction::SetTrue)
                .help("Group all number-led entries under '#'"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .default_value(DEFAULT_OUTPUT)
                .help("Where to write the document"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .value_parser(FORMAT_NAMES)
                .help("Output format (defaults to the output file extension, else docx)"),
        )
        .arg(
            Arg::new("group-by")
                .long("group-by")
                .value_name("COLUMN")
                .help("Column whose equal values are merged into one entry (defaults to the first column)"),
        )
        .arg(
            Arg::new("notes")
                .long("notes")
                .value_name("COLUMN")
                .action(ArgAction::Append)
                .help("Free-text column joined with spaces when merging (default: Notes)"),
        )
        .arg(
            Arg::new("sheet")
                .long("sheet")
                .value_name("NAME")
                .help("Worksheet to read (defaults to the first sheet)"),
        )
        .arg(
            Arg::new("fixed-schema")
                .long("fixed-schema")
                .action(ArgAction::SetTrue)
                .help("Use exactly the Topic, Book, Page and Notes columns with recommended settings"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Log more (repeat for debug output)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Only print errors"),
        )
}

/// Rewrite legacy two-letter flags (`-Ic`, `-Is`) to their long forms
fn expand_legacy_flags<I>(args: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    args.into_iter()
        .map(|arg| {
            LEGACY_FLAGS
                .iter()
                .find(|(short, _)| *short == arg)
                .map(|(_, long)| long.to_string())
                .unwrap_or(arg)
        })
        .collect()
}

/// Build index options from matches
fn build_options(matches: &ArgMatches) -> IndexOptions {
    let mut options = if matches.get_flag("fixed-schema") {
        IndexOptions::fixed_schema()
    } else if matches.get_flag("recommended") {
        IndexOptions::recommended()
    } else {
        IndexOptions::new().sort(
            SortOptions::new()
                .with_ignore_case(matches.get_flag("ignore-case"))
                .with_ignore_symbols(matches.get_flag("ignore-symbols"))
                .with_group_numbers(matches.get_flag("group-numbers")),
        )
    };

    if let Some(sort) = matches.get_one::<String>("sort").filter(|s| !s.is_empty()) {
        options = options.sort_key(sort);
    }
    if let Some(group) = matches.get_one::<String>("group-by").filter(|s| !s.is_empty()) {
        options = options.group_key(group);
    }
    if let Some(notes) = matches.get_many::<String>("notes") {
        options = options.notes_columns(notes.cloned());
    }
    if let Some(sheet) = matches.get_one::<String>("sheet") {
        options = options.sheet(sheet);
    }

    let title = extract_title(matches);
    if !title.is_empty() {
        options = options.title(title);
    }

    options
}

/// Title words joined with spaces
fn extract_title(matches: &ArgMatches) -> String {
    matches
        .get_many::<String>("title")
        .map(|words| words.map(String::as_str).collect::<Vec<_>>().join(" "))
        .unwrap_or_default()
}

/// Output path and format from matches
fn extract_output(matches: &ArgMatches) -> (PathBuf, OutputFormat) {
    let path = PathBuf::from(
        matches
            .get_one::<String>("output")
            .map(String::as_str)
            .unwrap_or(DEFAULT_OUTPUT),
    );
    let format = matches
        .get_one::<String>("format")
        .and_then(|name| OutputFormat::from_name(name))
        .unwrap_or_else(|| OutputFormat::infer(&path));
    (path, format)
}

/// Install the tracing subscriber; `RUST_LOG` overrides the flags
fn init_logging(verbosity: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbosity {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run the CLI with parsed matches
fn run(matches: &ArgMatches) -> anyhow::Result<()> {
    let quiet = matches.get_flag("quiet");
    let input = matches
        .get_one::<String>("file")
        .context("an input file is required (-f)")?;
    let (output, format) = extract_output(matches);
    let options = build_options(matches);
    debug!(?options, ?format, output = %output.display(), "resolved options");

    if !quiet {
        println!(
            "Creating index based on {} in {}...",
            input,
            describe_target(&output, format)
        );
    }

    ensure_writable_target(&output)?;
    let doc = build_index(input, &options)?;
    write_document_to(&doc, format, &output)?;

    info!(
        entries = doc.row_count(),
        sections = doc.sections.len(),
        output = %output.display(),
        "index written"
    );
    if !quiet {
        println!("{}", style("Done.").green().bold());
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = expand_legacy_flags(std::env::args());
    let matches = build_command().get_matches_from(args);

    init_logging(matches.get_count("verbose"), matches.get_flag("quiet"));

    match run(&matches) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {e:#}", style("Error:").red().bold());
            ExitCode::FAILURE
        }
    }
}
