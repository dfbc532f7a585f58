//! Command line and environment configuration.
//!
//! Every flag can also come from a `SHEET_INGEST_*` environment variable;
//! flags win over the environment.

use std::path::{Path, PathBuf};

use anyhow::Result;
use chrono::Local;
use clap::{Parser, ValueEnum};

use crate::infra::sink::json::DEFAULT_JSON_PATH;
use crate::infra::sqlite::repo::default_db_path;
use crate::usecase::ports::source::RowOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SinkKind {
    /// Pretty-printed JSON array
    Json,
    /// Dataset in a SQLite database
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Anything calamine opens: xlsx, xlsm, xlsb, xls, ods.
    Workbook,
    Delimited { delimiter: u8 },
}

#[derive(Parser, Debug)]
#[command(name = "sheet-ingest")]
#[command(about = "Turn a spreadsheet export into clean, uniformly keyed records")]
#[command(version)]
pub struct Cli {
    /// Spreadsheet to ingest (xlsx, xlsm, xlsb, xls, ods, csv, tsv)
    #[arg(env = "SHEET_INGEST_INPUT")]
    pub input: PathBuf,

    /// Sheet to read; defaults to the first one
    #[arg(long, env = "SHEET_INGEST_SHEET")]
    pub sheet: Option<String>,

    /// Where the records go
    #[arg(long, value_enum, default_value = "json", env = "SHEET_INGEST_SINK")]
    pub sink: SinkKind,

    /// Output file (JSON) or database (SQLite)
    #[arg(long, short, env = "SHEET_INGEST_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Dataset label when storing to SQLite
    #[arg(long, env = "SHEET_INGEST_DATASET")]
    pub dataset_name: Option<String>,

    /// Keep rows without any cell instead of skipping them
    #[arg(long)]
    pub keep_blank_rows: bool,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestConfig {
    pub input: PathBuf,
    pub format: InputFormat,
    pub sheet: Option<String>,
    pub sink: SinkKind,
    pub output: PathBuf,
    pub dataset_name: String,
    pub row_options: RowOptions,
    pub verbose: bool,
}

impl IngestConfig {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let output = match (cli.output, cli.sink) {
            (Some(path), _) => path,
            (None, SinkKind::Json) => PathBuf::from(DEFAULT_JSON_PATH),
            (None, SinkKind::Sqlite) => default_db_path()?,
        };
        let dataset_name = cli
            .dataset_name
            .unwrap_or_else(|| default_dataset_name(&cli.input));

        Ok(Self {
            format: input_format(&cli.input),
            input: cli.input,
            sheet: cli.sheet,
            sink: cli.sink,
            output,
            dataset_name,
            row_options: RowOptions {
                skip_blank_rows: !cli.keep_blank_rows,
            },
            verbose: cli.verbose,
        })
    }

    /// Default `tracing` filter when `RUST_LOG` is not set.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

pub fn input_format(path: &Path) -> InputFormat {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("csv") => InputFormat::Delimited { delimiter: b',' },
        Some("tsv") | Some("tab") => InputFormat::Delimited { delimiter: b'\t' },
        _ => InputFormat::Workbook,
    }
}

/// File stem of the input, or `import-MMDD` when it has none.
pub fn default_dataset_name(path: &Path) -> String {
    path.file_stem()
        .and_then(|name| name.to_str())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("import-{}", Local::now().format("%m%d")))
}
