pub mod config;
pub mod error;
pub mod findings;

pub use config::Config;
pub use error::OtGuardError;
pub use findings::{read_findings, read_raw_findings, Cvss, Finding};
