//! # Reggie: professional registration status checking
//!
//! Reggie takes a list of people with a registration body and number each,
//! looks the registrations up through pluggable registry checkers, and emits
//! the results as JSON or CSV.
//!
//! Whatever a registry reports, every registration ends up with one status
//! from a closed taxonomy ([`RegistrationStatus`]):
//!
//! - exact canonical strings map directly
//! - bodies known to have no automated lookup get a manual-check message
//! - everything else is an error status to be checked by hand
//!
//! ## Example
//!
//! ```ignore
//! use reggie::{ProcessingConfig, RegistrationProcessor};
//!
//! let processor = RegistrationProcessor::new(ProcessingConfig::default());
//! let people = processor.process_csv("people.csv")?;
//! processor.save_json(&people, "results.json")?;
//! ```

// Core modules
pub mod status;
pub mod constants;
pub mod entity;
pub mod registration;
pub mod person;
pub mod config;
pub mod error;

// Registry lookups and processing
pub mod checker;
pub mod processor;
pub mod serialization;

// Re-export key types
pub use status::RegistrationStatus;
pub use entity::{Dict, Entity};
pub use registration::{Registration, StatusInput};
pub use person::Person;
pub use config::{OutputFormat, ProcessingConfig};
pub use error::{CheckError, ConfigError, ProcessError};
pub use checker::{
    CheckRequest, CheckResult, CheckerRegistry, CheckerSettings, RegistrationChecker,
};
pub use processor::{InputRow, RegistrationProcessor};
pub use serialization::{JsonArrayWriter, PersonCsvWriter};
