use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "formdetails",
    about = "formdetails: merge appendix fields into form documents and normalize them",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Append the appendix field list to every form's formFields
    Merge {
        #[command(flatten)]
        run: RunArgs,

        /// Appendix file with comma-joined field objects
        #[arg(long)]
        append_file: Option<String>,
    },

    /// Rewrite every document into the canonical form-detail shape
    Normalize {
        #[command(flatten)]
        run: RunArgs,
    },

    /// Run merge, then normalize, over the same input directory
    All {
        #[command(flatten)]
        run: RunArgs,

        /// Appendix file with comma-joined field objects
        #[arg(long)]
        append_file: Option<String>,
    },
}

/// Options shared by every pipeline command.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// TOML config path (default: ./formdetails.toml when present)
    #[arg(long)]
    pub config: Option<String>,

    /// Directory holding the input JSON documents
    #[arg(long)]
    pub input_dir: Option<String>,

    /// Directory receiving the output documents
    #[arg(long)]
    pub output_dir: Option<String>,

    /// Directory for the per-pipeline log files
    #[arg(long)]
    pub log_dir: Option<String>,

    /// Log to the console only
    #[arg(long)]
    pub no_log_file: bool,

    /// Output the batch report(s) as JSON
    #[arg(long)]
    pub json: bool,
}
