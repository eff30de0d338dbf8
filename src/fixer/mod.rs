pub mod brace;

pub use brace::{fix_file, fix_source, FixReport, FileOutcome};
