use clap::Parser;
use salvage::{Cli, Commands, OutputFormatter, OutputMode, Salvage, SalvageError, UserFriendlyError};
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if let Commands::GenerateConfig { ref path } = cli.command {
        return handle_generate_config(path.as_deref());
    }

    let salvage = match Salvage::from_cli(&cli) {
        Ok(salvage) => salvage,
        Err(e) => {
            print_startup_error(&e);
            return 2;
        }
    };

    let result = match cli.command {
        Commands::Inspect { .. } => salvage
            .inspect_dump()
            .map(|report| salvage.output_formatter().print_inspect_report(&report)),
        Commands::FixReplies { dry_run, .. } => salvage
            .fix_replies(dry_run)
            .map(|report| salvage.output_formatter().print_fix_report(&report)),
        Commands::GenerateConfig { .. } => unreachable!("handled above"),
    };

    match result {
        Ok(()) => 0,
        Err(e) => {
            salvage.handle_error(&e);

            match e {
                SalvageError::DumpUnreadable { .. } => 3,
                SalvageError::Config { .. } => 2,
                SalvageError::InvalidPath { .. } => 2,
                _ => 1,
            }
        }
    }
}

fn handle_generate_config(path: Option<&std::path::Path>) -> i32 {
    let config_path = path
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|| "salvage.toml".to_string());

    match Salvage::generate_sample_config(&config_path) {
        Ok(()) => {
            println!("Generated sample configuration file: {}", config_path);
            println!("\nTo use this configuration:");
            println!("  salvage inspect --config {}", config_path);
            println!("  salvage fix-replies --config {}", config_path);
            println!("\nEdit the file to customize targets and limits.");
            0
        }
        Err(e) => {
            eprintln!("Failed to generate configuration file: {}", e.user_message());
            if let Some(suggestion) = e.suggestion() {
                eprintln!("Suggestion: {}", suggestion);
            }
            1
        }
    }
}

fn print_startup_error(error: &SalvageError) {
    // Startup failures happen before the configured formatter exists.
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_generate_config_command() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("test.toml");

        let exit_code = handle_generate_config(Some(config_path.as_path()));
        assert_eq!(exit_code, 0);
        assert!(config_path.exists());

        let content = std::fs::read_to_string(&config_path).unwrap();
        assert!(content.contains("[extract]"));
        assert!(content.contains("[fix]"));
    }

    #[test]
    fn test_generate_config_bad_path() {
        let exit_code =
            handle_generate_config(Some(std::path::Path::new("/no/such/dir/salvage.toml")));
        assert_eq!(exit_code, 1);
    }
}
