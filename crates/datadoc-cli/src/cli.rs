//! CLI argument definitions for the Datadoc editor.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use datadoc_model::{AlgorithmKind, DatasetField, PseudoField, VariableField};

#[derive(Parser)]
#[command(
    name = "datadoc",
    version,
    about = "Datadoc - Edit dataset and variable metadata",
    long_about = "Edit Datadoc metadata documents for tabular datasets.\n\n\
                  Opens CSV datasets, applies global variable edits with a change report,\n\
                  manages pseudonymization parameters and checks obligatory metadata."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(
        long = "log-level",
        value_enum,
        env = "DATADOC_LOG_LEVEL",
        global = true
    )]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Directory with unit_types.csv, measurement_units.csv and data_sources.csv.
    #[arg(
        long = "code-lists",
        value_name = "DIR",
        env = "DATADOC_CODE_LIST_DIR",
        global = true
    )]
    pub code_list_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Open a dataset, creating its metadata document when missing.
    Open(OpenArgs),

    /// Print the dataset summary and variable table.
    Show(DocumentArgs),

    /// List the globally editable fields and their options.
    Fields,

    /// Set fields on every variable at once.
    Global(GlobalArgs),

    /// Undo all global edits and clear the global edit state.
    GlobalReset(GlobalResetArgs),

    /// Select or remove the pseudonymization algorithm of a variable.
    Pseudo(PseudoArgs),

    /// Set one pseudonymization field of a variable.
    PseudoSet(PseudoSetArgs),

    /// Set one field of a variable.
    SetVariable(SetVariableArgs),

    /// Set one dataset field; inheritable values are copied to every variable.
    SetDataset(SetDatasetArgs),

    /// Report missing obligatory metadata.
    Check(DocumentArgs),
}

#[derive(Args)]
pub struct OpenArgs {
    /// Dataset CSV file or metadata document.
    #[arg(value_name = "DATASET", env = "DATADOC_DATASET_PATH")]
    pub dataset: PathBuf,
}

#[derive(Args)]
pub struct DocumentArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,
}

#[derive(Args)]
pub struct GlobalArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Field assignment, e.g. `unit_type=03`.
    ///
    /// Use DESELECT to undo a previous global value and DELETE_SELECTED to
    /// clear the field on every variable. A multiplication factor of 0
    /// also deselects.
    #[arg(long = "set", value_name = "FIELD=VALUE", required = true)]
    pub set: Vec<String>,

    /// Global edit state file (default: <STEM>__GLOBAL.json next to the document).
    #[arg(long = "state", value_name = "FILE")]
    pub state: Option<PathBuf>,
}

#[derive(Args)]
pub struct GlobalResetArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Global edit state file (default: <STEM>__GLOBAL.json next to the document).
    #[arg(long = "state", value_name = "FILE")]
    pub state: Option<PathBuf>,
}

#[derive(Args)]
pub struct PseudoArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Short name of the variable.
    #[arg(value_name = "SHORT_NAME")]
    pub short_name: String,

    /// Algorithm to apply, or `delete` to remove pseudonymization.
    #[arg(value_name = "ALGORITHM", value_enum)]
    pub algorithm: AlgorithmArg,
}

#[derive(Args)]
pub struct PseudoSetArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Short name of the variable.
    #[arg(value_name = "SHORT_NAME")]
    pub short_name: String,

    /// Pseudonymization field id, e.g. `stable_identifier_version`.
    #[arg(value_name = "FIELD")]
    pub field: PseudoField,

    /// New value; omit to clear.
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}

#[derive(Args)]
pub struct SetVariableArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Short name of the variable.
    #[arg(value_name = "SHORT_NAME")]
    pub short_name: String,

    /// Variable field id, e.g. `variable_role`.
    #[arg(value_name = "FIELD")]
    pub field: VariableField,

    /// New value; omit to clear.
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}

#[derive(Args)]
pub struct SetDatasetArgs {
    /// Metadata document, or the dataset it belongs to.
    #[arg(value_name = "DOCUMENT")]
    pub document: PathBuf,

    /// Dataset field id, e.g. `temporality_type`.
    #[arg(value_name = "FIELD")]
    pub field: DatasetField,

    /// New value; omit to clear.
    #[arg(value_name = "VALUE")]
    pub value: Option<String>,
}

/// Algorithm choices for the `pseudo` command.
#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    Papis,
    PapisStableId,
    Dapla,
    Custom,
    Delete,
}

impl AlgorithmArg {
    /// The algorithm kind, or `None` for `delete`.
    pub fn kind(self) -> Option<AlgorithmKind> {
        match self {
            AlgorithmArg::Papis => Some(AlgorithmKind::PapisWithoutStableId),
            AlgorithmArg::PapisStableId => Some(AlgorithmKind::PapisWithStableId),
            AlgorithmArg::Dapla => Some(AlgorithmKind::StandardDapla),
            AlgorithmArg::Custom => Some(AlgorithmKind::Custom),
            AlgorithmArg::Delete => None,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
