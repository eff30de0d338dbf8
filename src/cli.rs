use crate::config::{CliOverrides, Config};
use crate::error::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "salvage")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Recovery helpers for dump inspection and route-file repair")]
#[command(
    long_about = "Salvage bundles two one-shot maintenance tools: `inspect` pulls table \
                  contents out of a pg_dump logical backup for a quick visual check, and \
                  `fix-replies` repairs the `reply.send({ ... };` bracket mismatch in a \
                  known set of route files."
)]
#[command(after_help = "EXAMPLES:\n  \
    salvage inspect\n  \
    salvage inspect backups/extracted.sql --tables users,rentals --limit 20\n  \
    salvage fix-replies --dry-run\n  \
    salvage fix-replies backend/src/fastify/routes --files vehicles.ts\n  \
    salvage generate-config salvage.toml")]
#[command(arg_required_else_help = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, global = true, help = "Path to TOML configuration file")]
    pub config: Option<PathBuf>,

    /// Output format for results
    #[arg(long, value_enum, global = true, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-essential output)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract and pretty-print tables from a pg_dump logical backup
    Inspect {
        /// Dump file to read (defaults to the configured path)
        dump: Option<PathBuf>,

        /// Tables to extract (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        tables: Option<Vec<String>>,

        /// Maximum rows shown per table preview
        #[arg(long)]
        limit: Option<usize>,

        /// Maximum columns shown per preview row
        #[arg(long)]
        columns: Option<usize>,

        /// Table to print row-by-row detail for (empty string disables)
        #[arg(long)]
        detail: Option<String>,
    },

    /// Rewrite `reply.send({ ... };` closings to `});` in the target route files
    FixReplies {
        /// Directory containing the route files (defaults to the configured path)
        base_dir: Option<PathBuf>,

        /// File names to scan under the base directory (comma-separated)
        #[arg(short, long, value_delimiter = ',')]
        files: Option<Vec<String>>,

        /// Report what would change without writing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a sample configuration file
    GenerateConfig {
        /// Destination path (defaults to salvage.toml)
        path: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl Cli {
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load_with_defaults(self.config.as_ref())?;

        let overrides = self.create_cli_overrides();
        config.merge_with_cli_args(&overrides);
        config.validate()?;

        Ok(config)
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        match &self.command {
            Commands::Inspect {
                dump,
                tables,
                limit,
                columns,
                detail,
            } => CliOverrides::new()
                .with_dump_path(dump.clone())
                .with_tables(tables.clone())
                .with_row_limit(*limit)
                .with_column_limit(*columns)
                .with_detail_table(detail.clone()),
            Commands::FixReplies {
                base_dir, files, ..
            } => CliOverrides::new()
                .with_base_directory(base_dir.clone())
                .with_files(files.clone()),
            Commands::GenerateConfig { .. } => CliOverrides::new(),
        }
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
