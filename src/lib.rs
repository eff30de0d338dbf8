pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod fixer;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, Commands, OutputFormat};
pub use config::{CliOverrides, Config, ExtractConfig, FixConfig};
pub use error::{Result, SalvageError, UserFriendlyError};

// Core functionality re-exports
pub use extractor::{extract_table, DisplayLimits, InspectReport, TableCount, TableSnapshot};
pub use fixer::{fix_file, fix_source, FileOutcome, FixReport};
pub use ui::{OutputFormatter, OutputMode};

use chrono::Utc;
use extractor::report;

/// Main library interface: holds the resolved configuration and the output
/// formatter, and runs the two maintenance operations.
pub struct Salvage {
    config: Config,
    output_formatter: OutputFormatter,
}

impl Salvage {
    pub fn new(config: Config, output_mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);

        Self {
            config,
            output_formatter,
        }
    }

    /// Create a Salvage instance from parsed CLI arguments.
    pub fn from_cli(cli_args: &Cli) -> Result<Self> {
        let config = cli_args.load_config()?;
        let output_mode = match cli_args.output_format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        };

        Ok(Self::new(
            config,
            output_mode,
            cli_args.verbosity_level(),
            cli_args.quiet,
        ))
    }

    /// Read the configured dump file and walk the configured table list:
    /// preview each table that is present, warn about each that is not,
    /// print row-by-row detail for the detail table, and close with row
    /// counts sorted descending. An unreadable dump is fatal; a missing
    /// table never is.
    pub fn inspect_dump(&self) -> Result<InspectReport> {
        let extract = &self.config.extract;
        let dump_path = extract.dump_path.display().to_string();

        self.output_formatter.start_operation("Inspecting dump file");

        let dump = std::fs::read_to_string(&extract.dump_path).map_err(|source| {
            SalvageError::DumpUnreadable {
                path: dump_path.clone(),
                source,
            }
        })?;

        self.output_formatter
            .info(&format!("Loaded {} ({} bytes)", dump_path, dump.len()));

        let limits = DisplayLimits::from(extract);
        let mut missing = Vec::new();

        for table in &extract.tables {
            match extract_table(&dump, table)? {
                Some(snapshot) => {
                    self.output_formatter
                        .print_lines(&report::preview_lines(&snapshot, &limits));
                }
                None => {
                    missing.push(table.clone());
                    self.output_formatter
                        .warning(&format!("Table not found in dump: {}", table));
                }
            }
        }

        if let Some(ref detail_table) = extract.detail_table {
            if let Some(snapshot) = extract_table(&dump, detail_table)? {
                self.output_formatter
                    .print_lines(&report::detail_lines(&snapshot, extract.detail_columns));
            }
        }

        // Second extraction pass purely for the closing count summary.
        let mut counts = Vec::new();
        for table in &extract.tables {
            if let Some(snapshot) = extract_table(&dump, table)? {
                counts.push(TableCount {
                    table: table.clone(),
                    rows: snapshot.row_count(),
                });
            }
        }
        self.output_formatter
            .print_lines(&report::summary_lines(&counts));

        Ok(InspectReport {
            dump_path,
            dump_bytes: dump.len() as u64,
            generated_at: Utc::now(),
            tables: counts,
            missing,
        })
    }

    /// Walk the configured file list under the configured base directory
    /// and patch each file's `reply.send({` blocks. Entries that do not
    /// exist on disk are skipped without a warning; the changed counter
    /// only ever counts files whose content actually differed.
    pub fn fix_replies(&self, dry_run: bool) -> Result<FixReport> {
        let fix = &self.config.fix;

        if !fix.base_directory.is_dir() {
            return Err(SalvageError::InvalidPath {
                path: fix.base_directory.display().to_string(),
            });
        }

        self.output_formatter
            .start_operation("Scanning route files for reply.send bracket mismatches");

        let mut outcomes = Vec::new();
        let mut changed = 0usize;

        for name in &fix.files {
            let path = fix.base_directory.join(name);

            if !path.exists() {
                self.output_formatter
                    .debug(&format!("Skipping missing file: {}", path.display()));
                continue;
            }

            let outcome = if dry_run {
                let content = std::fs::read_to_string(&path)?;
                let (_, patched_lines) = fix_source(&content);
                FileOutcome {
                    file: name.clone(),
                    changed: patched_lines > 0,
                    patched_lines,
                }
            } else {
                fix_file(&path)?
            };

            if outcome.changed {
                changed += 1;
                self.output_formatter.success(&format!(
                    "{}: {} line{} {}",
                    name,
                    outcome.patched_lines,
                    if outcome.patched_lines == 1 { "" } else { "s" },
                    if dry_run { "would be rewritten" } else { "rewritten" }
                ));
            } else {
                self.output_formatter.debug(&format!("{}: not modified", name));
            }

            outcomes.push(outcome);
        }

        Ok(FixReport {
            base_directory: fix.base_directory.display().to_string(),
            generated_at: Utc::now(),
            examined: outcomes.len(),
            changed,
            dry_run,
            files: outcomes,
        })
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<std::path::Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config).map_err(SalvageError::Io)?;
        Ok(())
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &SalvageError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
