pub mod dump;
pub mod report;

pub use dump::{extract_table, TableSnapshot, NULL_TOKEN};
pub use report::{format_value, DisplayLimits, InspectReport, TableCount};
