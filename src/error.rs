use thiserror::Error;

#[derive(Error, Debug)]
pub enum SalvageError {
    #[error("Failed to read dump file: {path}")]
    DumpUnreadable {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid extraction pattern for table {table}: {message}")]
    Pattern { table: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SalvageError {
    fn user_message(&self) -> String {
        match self {
            SalvageError::DumpUnreadable { path, source } => {
                format!("Could not read dump file {}: {}", path, source)
            }
            SalvageError::Pattern { table, message } => {
                format!("Could not build extraction pattern for {}: {}", table, message)
            }
            SalvageError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            SalvageError::InvalidPath { path } => {
                format!("Invalid path: {}", path)
            }
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SalvageError::DumpUnreadable { .. } => Some(
                "Check that the dump file exists and is readable, or point at a different file with `salvage inspect <path>`.".to_string()
            ),
            SalvageError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate a starter file with `salvage generate-config`.".to_string()
            ),
            SalvageError::InvalidPath { .. } => Some(
                "Verify the path exists and points at the expected directory.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for SalvageError {
    fn from(error: toml::de::Error) -> Self {
        SalvageError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SalvageError>;
