//! Row-by-row registration processing.
//!
//! Coordinates one run over tabular input:
//! - column resolution through [`ProcessingConfig`]
//! - registry lookups through a [`CheckerRegistry`]
//! - [`Registration`] / [`Person`] construction
//! - JSON or CSV output
//!
//! Checker failures never abort a run. They are logged and recorded as an
//! error status on the affected registration.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::checker::{CheckRequest, CheckerRegistry};
use crate::config::{OutputFormat, ProcessingConfig};
use crate::constants::result_keys;
use crate::entity::Dict;
use crate::error::ProcessError;
use crate::person::Person;
use crate::registration::Registration;
use crate::serialization::{JsonArrayWriter, PersonCsvWriter};
use crate::status::RegistrationStatus;

/// Semantic fields of one input row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    pub email: String,
    pub full_name: String,
    pub linked_in_url: Option<String>,
    pub reg_body: Option<String>,
    pub reg_number: Option<String>,
    pub state: Option<String>,
}

/// Positions of the configured columns within a row.
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    email: usize,
    full_name: usize,
    linked_in_url: Option<usize>,
    reg_body: Option<usize>,
    reg_number: Option<usize>,
    state: Option<usize>,
}

impl ColumnIndex {
    fn resolve(config: &ProcessingConfig, headers: &[String]) -> Result<Self, ProcessError> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| ProcessError::MissingColumn(name.to_string()))
        };

        Ok(Self {
            email: require(config.email_column.as_str())?,
            full_name: require(config.full_name_column.as_str())?,
            linked_in_url: find(config.linked_in_url_column.as_str()),
            reg_body: find(config.reg_body_column.as_str()),
            reg_number: find(config.reg_number_column.as_str()),
            state: find(config.state_column.as_str()),
        })
    }

    fn read(&self, record: &csv::StringRecord) -> InputRow {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| record.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        InputRow {
            email: cell(Some(self.email)).unwrap_or_default(),
            full_name: cell(Some(self.full_name)).unwrap_or_default(),
            linked_in_url: cell(self.linked_in_url),
            reg_body: cell(self.reg_body),
            reg_number: cell(self.reg_number),
            state: cell(self.state),
        }
    }
}

pub struct RegistrationProcessor {
    config: ProcessingConfig,
    checkers: CheckerRegistry,
}

impl RegistrationProcessor {
    /// Processor with no registry checkers.
    pub fn new(config: ProcessingConfig) -> Self {
        Self::with_checkers(config, CheckerRegistry::new())
    }

    pub fn with_checkers(config: ProcessingConfig, checkers: CheckerRegistry) -> Self {
        Self { config, checkers }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Registration bodies that have an automated checker.
    pub fn supported_bodies(&self) -> Vec<String> {
        self.checkers.supported_bodies()
    }

    /// Process a CSV file into people.
    pub fn process_csv<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Person>, ProcessError> {
        let path = path.as_ref();
        tracing::info!("Processing {}", path.display());
        let file = File::open(path)?;
        self.process_reader(file)
    }

    /// Process CSV data from any reader.
    ///
    /// With `column_names` configured the input is headerless and every row
    /// must have exactly that many fields. Otherwise the first row is the
    /// header.
    pub fn process_reader<R: Read>(&self, reader: R) -> Result<Vec<Person>, ProcessError> {
        let headerless = self.config.column_names.is_some();
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(!headerless)
            .flexible(true)
            .from_reader(reader);

        let headers: Vec<String> = match &self.config.column_names {
            Some(names) => names.clone(),
            None => csv_reader.headers()?.iter().map(|h| h.trim().to_string()).collect(),
        };
        let columns = ColumnIndex::resolve(&self.config, &headers)?;
        let first_data_row = if headerless { 1 } else { 2 };

        let mut people = Vec::new();
        for (idx, result) in csv_reader.records().enumerate() {
            let record = result?;
            let row = idx + first_data_row;

            if headerless && record.len() != headers.len() {
                return Err(ProcessError::ColumnCountMismatch {
                    row,
                    expected: headers.len(),
                    found: record.len(),
                });
            }

            tracing::debug!("Processing row {}", row);
            people.push(self.process_row(&columns.read(&record)));
        }

        let live: usize = people.iter().map(Person::live_rego_count).sum();
        tracing::info!(
            "Processed {} people, {} live registrations",
            people.len(),
            live
        );
        Ok(people)
    }

    /// Build a person from one input row, checking its registration if the
    /// row names a body or number.
    pub fn process_row(&self, row: &InputRow) -> Person {
        let mut person = Person::new(
            row.full_name.clone(),
            row.email.clone(),
            row.linked_in_url.clone(),
        );

        if row.reg_body.is_some() || row.reg_number.is_some() {
            person.add_registration(self.check_registration(row));
        }
        person
    }

    /// Look up one registration and normalize the outcome.
    pub fn check_registration(&self, row: &InputRow) -> Registration {
        let reg_body = row.reg_body.clone();
        let reg_number = row.reg_number.clone();

        if !self.config.check_registrations {
            return Registration::not_checked(reg_body, reg_number);
        }

        let Some(body) = row.reg_body.as_deref() else {
            return Registration::normalize(reg_body, reg_number, "", None);
        };

        let Some(checker) = self.checkers.get(body) else {
            tracing::debug!("No checker registered for '{}'", body);
            return Registration::normalize(reg_body, reg_number, "", None);
        };

        let request = CheckRequest {
            full_name: &row.full_name,
            reg_body: body,
            reg_number: row.reg_number.as_deref(),
            state: row.state.as_deref(),
        };

        match checker.check(&request, &self.config.checker_settings()) {
            Ok(mut result) => {
                let recognized = result.status.is_empty()
                    || RegistrationStatus::from_canonical(&result.status).is_some();
                if !recognized {
                    tracing::debug!("Unrecognized status '{}' from '{}'", result.status, body);
                    result
                        .details
                        .entry(result_keys::ORIGINAL_STATUS)
                        .or_insert_with(|| Value::String(result.status.clone()));
                }
                let details = (!result.details.is_empty()).then_some(result.details);
                Registration::normalize(reg_body, reg_number, &result.status, details)
            }
            Err(e) => {
                tracing::warn!(
                    "Check failed for {} with '{}': {}",
                    row.full_name,
                    body,
                    e
                );
                let mut details = Dict::new();
                details.insert(
                    result_keys::ERROR_MESSAGE.to_string(),
                    Value::String(e.to_string()),
                );
                Registration::normalize(
                    reg_body,
                    reg_number,
                    RegistrationStatus::Error.as_str(),
                    Some(details),
                )
            }
        }
    }

    /// Write people in the configured output format.
    pub fn write_output<W: Write>(
        &self,
        people: &[Person],
        writer: W,
    ) -> Result<(), ProcessError> {
        match self.config.output_format {
            OutputFormat::Json => {
                let mut json = JsonArrayWriter::new(writer)?;
                json.write_all(people)?;
                json.finish()
            }
            OutputFormat::Csv => {
                let mut csv = PersonCsvWriter::new(writer)?;
                csv.write_all(people)?;
                csv.finish()
            }
        }
    }

    pub fn save_json<P: AsRef<Path>>(
        &self,
        people: &[Person],
        path: P,
    ) -> Result<(), ProcessError> {
        let mut json = JsonArrayWriter::new(create_output(path.as_ref())?)?;
        json.write_all(people)?;
        json.finish()
    }

    pub fn save_csv<P: AsRef<Path>>(
        &self,
        people: &[Person],
        path: P,
    ) -> Result<(), ProcessError> {
        let mut csv = PersonCsvWriter::new(create_output(path.as_ref())?)?;
        csv.write_all(people)?;
        csv.finish()
    }

    /// Save to the configured `output_file` in the configured format.
    pub fn save(&self, people: &[Person]) -> Result<PathBuf, ProcessError> {
        let path = self
            .config
            .output_file
            .clone()
            .ok_or(ProcessError::NoOutputFile)?;

        match self.config.output_format {
            OutputFormat::Json => self.save_json(people, &path)?,
            OutputFormat::Csv => self.save_csv(people, &path)?,
        }
        tracing::info!("Wrote {} results to {}", people.len(), path.display());
        Ok(path)
    }
}

fn create_output(path: &Path) -> Result<BufWriter<File>, ProcessError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    Ok(BufWriter::new(File::create(path)?))
}
