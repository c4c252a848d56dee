//! # frontsheet-cli
//!
//! Command-line interface for frontsheet: parses the worksheets of an xlsx
//! workbook and prints each one as JSON.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use frontsheet_core::{
    for_each_sheet, is_visible, parse_sheet_by_name, CoercionPolicy, Control, ParseOptions,
    ParsedWorksheet, WorkbookOptions,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// frontsheet - typed front matter, data tables and data lists from spreadsheets
#[derive(Parser, Debug)]
#[command(name = "frontsheet")]
#[command(author, version, about = "Parse typed worksheets from an xlsx workbook", long_about = None)]
struct Cli {
    /// Workbook to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Parse only the named worksheet
    #[arg(short, long, value_name = "NAME")]
    sheet: Option<String>,

    /// Row where every worksheet's content starts
    #[arg(long, value_name = "N", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    start_row: u32,

    /// JSON file with parse options (camelCase keys); flags override it
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,

    /// Do not log per-worksheet progress to stderr
    #[arg(long)]
    no_progress: bool,

    /// Do not report skipped front matter rows
    #[arg(long)]
    no_warnings: bool,

    /// First-cell value that ends a data body
    #[arg(long, value_name = "MARKER", conflicts_with = "no_terminator")]
    terminator: Option<String>,

    /// Stop data bodies only at blank rows
    #[arg(long)]
    no_terminator: bool,

    /// Keep parsing past bad cells and report them with the record
    #[arg(long)]
    collect_errors: bool,

    /// Treat empty non-string cells as errors
    #[arg(long)]
    strict_missing: bool,

    /// Also parse hidden worksheets
    #[arg(long)]
    include_hidden: bool,

    /// Print password values instead of a mask
    #[arg(long)]
    reveal_passwords: bool,

    /// Stop after this many worksheets
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    stop_after: Option<u32>,

    /// Print a single JSON array instead of one document per worksheet
    #[arg(long)]
    array: bool,

    /// Enable verbose output (row-level debug logs)
    #[arg(short, long)]
    verbose: bool,
}

/// Log filter used when `RUST_LOG` is unset; progress is logged at info.
fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

impl Cli {
    /// Resolve parse options: defaults, then the options file, then flags.
    fn parse_options(&self) -> Result<ParseOptions> {
        let mut opts = match &self.options {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read options file: {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("Invalid options file: {}", path.display()))?
            }
            None => ParseOptions::default(),
        };

        if self.no_progress {
            opts.report_progress = false;
        }
        if self.no_warnings {
            opts.report_warnings = false;
        }
        if self.no_terminator {
            opts.data_termination_row = None;
        } else if let Some(marker) = &self.terminator {
            opts.data_termination_row = Some(marker.clone());
        }
        if self.collect_errors {
            opts.coercion_policy = CoercionPolicy::Collect;
        }
        if self.strict_missing {
            opts.strict_missing_values = true;
        }
        Ok(opts)
    }

    fn workbook_options(&self) -> WorkbookOptions {
        let opts = WorkbookOptions::default().with_start_row(self.start_row as usize);
        if self.include_hidden {
            opts
        } else {
            opts.with_filter(is_visible)
        }
    }
}

/// Collects or prints parsed worksheets as they arrive.
struct Output {
    reveal_passwords: bool,
    array: bool,
    stop_after: Option<usize>,
    documents: Vec<serde_json::Value>,
    worksheets: usize,
    coercion_errors: usize,
}

impl Output {
    fn new(cli: &Cli) -> Self {
        Output {
            reveal_passwords: cli.reveal_passwords,
            array: cli.array,
            stop_after: cli.stop_after.map(|n| n as usize),
            documents: Vec::new(),
            worksheets: 0,
            coercion_errors: 0,
        }
    }

    fn handle(&mut self, parsed: ParsedWorksheet) -> Result<Control> {
        self.worksheets += 1;
        self.coercion_errors += parsed.coercion_errors().count();

        let document = parsed.to_json(self.reveal_passwords);
        if self.array {
            self.documents.push(document);
        } else {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        match self.stop_after {
            Some(limit) if self.worksheets >= limit => Ok(Control::Stop),
            _ => Ok(Control::Continue),
        }
    }

    fn finish(self) -> Result<()> {
        if self.array {
            println!("{}", serde_json::to_string_pretty(&self.documents)?);
        }
        if self.coercion_errors > 0 {
            eprintln!(
                "{} {} cell(s) could not be coerced; see \"errors\" in the output",
                "Warning:".yellow().bold(),
                self.coercion_errors
            );
        }
        Ok(())
    }
}

fn run(cli: &Cli) -> Result<()> {
    let parse_opts = cli.parse_options()?;
    tracing::debug!(?parse_opts, "resolved parse options");
    let mut output = Output::new(cli);

    if let Some(name) = &cli.sheet {
        let parsed = parse_sheet_by_name(&cli.file, name, &parse_opts, cli.start_row as usize)
            .with_context(|| format!("Failed to parse worksheet '{name}'"))?;
        output.handle(parsed)?;
    } else {
        for_each_sheet(
            &cli.file,
            &mut output,
            &parse_opts,
            &cli.workbook_options(),
            |parsed, output: &mut Output| output.handle(parsed),
        )
        .with_context(|| format!("Failed to parse workbook: {}", cli.file.display()))?;
    }

    output.finish()
}

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays valid JSON
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_level(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    }
}
