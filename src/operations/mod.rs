pub mod categorize;
pub mod import;
pub mod report;
