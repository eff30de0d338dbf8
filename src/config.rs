use crate::error::{Result, SalvageError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    pub extract: ExtractConfig,
    pub fix: FixConfig,
}

/// Settings for the `inspect` subcommand. The defaults reproduce the
/// recovery run this tool was written for: the R2 backup dump and the
/// tables worth eyeballing after a restore.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExtractConfig {
    pub dump_path: PathBuf,
    pub tables: Vec<String>,
    pub row_limit: usize,
    pub column_limit: usize,
    pub detail_table: Option<String>,
    pub detail_columns: usize,
}

/// Settings for the `fix-replies` subcommand: the route files known to
/// carry the `reply.send({ ... };` mismatch and the directory they live in.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FixConfig {
    pub base_directory: PathBuf,
    pub files: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            dump_path: PathBuf::from("r2-recovered-backups/extracted-backup.sql"),
            tables: vec![
                "users".to_string(),
                "companies".to_string(),
                "vehicles".to_string(),
                "customers".to_string(),
                "rentals".to_string(),
                "expenses".to_string(),
                "insurances".to_string(),
                "settlements".to_string(),
                "protocols".to_string(),
            ],
            row_limit: 10,
            column_limit: 5,
            detail_table: Some("users".to_string()),
            detail_columns: 10,
        }
    }
}

impl Default for FixConfig {
    fn default() -> Self {
        Self {
            base_directory: PathBuf::from("backend/src/fastify/routes"),
            files: vec![
                "vehicles.ts".to_string(),
                "customers.ts".to_string(),
                "protocols.ts".to_string(),
                "files.ts".to_string(),
                "utility-maintenance-routes.ts".to_string(),
            ],
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(SalvageError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| SalvageError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| SalvageError::Config {
            message: format!("Failed to parse config file {}: {}", path.display(), e),
        })?;

        Ok(config)
    }

    pub fn load_with_defaults<P: AsRef<Path>>(config_path: Option<P>) -> Result<Self> {
        match config_path {
            Some(path) => Self::load_from_file(path),
            None => {
                let default_paths = ["salvage.toml", ".salvage.toml"];

                for default_path in &default_paths {
                    if Path::new(default_path).exists() {
                        return Self::load_from_file(default_path);
                    }
                }

                Ok(Self::default())
            }
        }
    }

    pub fn merge_with_cli_args(&mut self, overrides: &CliOverrides) {
        if let Some(ref dump_path) = overrides.dump_path {
            self.extract.dump_path = dump_path.clone();
        }

        if let Some(ref tables) = overrides.tables {
            self.extract.tables = tables.clone();
        }

        if let Some(row_limit) = overrides.row_limit {
            self.extract.row_limit = row_limit;
        }

        if let Some(column_limit) = overrides.column_limit {
            self.extract.column_limit = column_limit;
        }

        if let Some(ref detail_table) = overrides.detail_table {
            // An empty value on the command line disables the detail pass.
            self.extract.detail_table = if detail_table.is_empty() {
                None
            } else {
                Some(detail_table.clone())
            };
        }

        if let Some(ref base_directory) = overrides.base_directory {
            self.fix.base_directory = base_directory.clone();
        }

        if let Some(ref files) = overrides.files {
            self.fix.files = files.clone();
        }
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let content = toml::to_string_pretty(self).map_err(|e| SalvageError::Config {
            message: format!("Failed to serialize config: {}", e),
        })?;

        std::fs::write(path, content).map_err(|e| SalvageError::Config {
            message: format!("Failed to write config file {}: {}", path.display(), e),
        })?;

        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.extract.tables.is_empty() {
            return Err(SalvageError::Config {
                message: "At least one table must be listed under [extract]".to_string(),
            });
        }

        if self.extract.row_limit == 0 {
            return Err(SalvageError::Config {
                message: "Row display limit must be greater than 0".to_string(),
            });
        }

        if self.extract.column_limit == 0 {
            return Err(SalvageError::Config {
                message: "Column display limit must be greater than 0".to_string(),
            });
        }

        if self.fix.files.is_empty() {
            return Err(SalvageError::Config {
                message: "At least one file must be listed under [fix]".to_string(),
            });
        }

        Ok(())
    }

    pub fn create_sample_config() -> String {
        let sample_config = Self::default();
        toml::to_string_pretty(&sample_config).unwrap_or_else(|_| String::new())
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dump_path: Option<PathBuf>,
    pub tables: Option<Vec<String>>,
    pub row_limit: Option<usize>,
    pub column_limit: Option<usize>,
    pub detail_table: Option<String>,
    pub base_directory: Option<PathBuf>,
    pub files: Option<Vec<String>>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dump_path(mut self, dump_path: Option<PathBuf>) -> Self {
        self.dump_path = dump_path;
        self
    }

    pub fn with_tables(mut self, tables: Option<Vec<String>>) -> Self {
        self.tables = tables;
        self
    }

    pub fn with_row_limit(mut self, row_limit: Option<usize>) -> Self {
        self.row_limit = row_limit;
        self
    }

    pub fn with_column_limit(mut self, column_limit: Option<usize>) -> Self {
        self.column_limit = column_limit;
        self
    }

    pub fn with_detail_table(mut self, detail_table: Option<String>) -> Self {
        self.detail_table = detail_table;
        self
    }

    pub fn with_base_directory(mut self, base_directory: Option<PathBuf>) -> Self {
        self.base_directory = base_directory;
        self
    }

    pub fn with_files(mut self, files: Option<Vec<String>>) -> Self {
        self.files = files;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.extract.tables.contains(&"users".to_string()));
        assert_eq!(config.extract.row_limit, 10);
        assert_eq!(config.extract.column_limit, 5);
        assert_eq!(config.extract.detail_table.as_deref(), Some("users"));
        assert!(!config.fix.files.is_empty());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.extract.tables.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_file_operations() {
        let config = Config::default();
        let temp_file = NamedTempFile::new().unwrap();

        config.save_to_file(temp_file.path()).unwrap();

        let loaded_config = Config::load_from_file(temp_file.path()).unwrap();
        assert_eq!(config.extract.row_limit, loaded_config.extract.row_limit);
        assert_eq!(config.fix.files, loaded_config.fix.files);
    }

    #[test]
    fn test_missing_config_file() {
        let result = Config::load_from_file("does-not-exist.toml");
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[extract\nnot valid toml").unwrap();

        let result = Config::load_from_file(temp_file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = Config::default();

        let overrides = CliOverrides::new()
            .with_row_limit(Some(25))
            .with_tables(Some(vec!["rentals".to_string()]))
            .with_detail_table(Some(String::new()));

        config.merge_with_cli_args(&overrides);

        assert_eq!(config.extract.row_limit, 25);
        assert_eq!(config.extract.tables, vec!["rentals"]);
        assert!(config.extract.detail_table.is_none());
    }

    #[test]
    fn test_sample_config_generation() {
        let sample = Config::create_sample_config();
        assert!(!sample.is_empty());
        assert!(sample.contains("[extract]"));
        assert!(sample.contains("[fix]"));
    }
}
