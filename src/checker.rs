//! Registry checker boundary.
//!
//! Site-specific lookups live outside this crate. They plug in by
//! implementing [`RegistrationChecker`] and being registered against the
//! registration body name they handle. Closures of the right shape implement
//! the trait directly.

use indexmap::IndexMap;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::result_keys;
use crate::entity::Dict;
use crate::error::CheckError;

/// Lookup input for one registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckRequest<'a> {
    pub full_name: &'a str,
    pub reg_body: &'a str,
    pub reg_number: Option<&'a str>,
    pub state: Option<&'a str>,
}

/// Raw outcome of a lookup, before normalization.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CheckResult {
    /// Status text as the registry reported it.
    pub status: String,
    /// Extra fields carried through to the registration's additional data.
    pub details: Dict,
}

impl CheckResult {
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            details: Dict::new(),
        }
    }

    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Split a checker result dictionary into its `status` entry and the
    /// remaining details.
    pub fn from_map(mut map: Dict) -> Result<Self, CheckError> {
        match map.remove(result_keys::STATUS) {
            Some(Value::String(status)) => Ok(Self {
                status,
                details: map,
            }),
            Some(other) => Err(CheckError::Failed(format!(
                "checker returned a non-string status: {}",
                other
            ))),
            None => Err(CheckError::Failed(
                "checker result has no status".to_string(),
            )),
        }
    }
}

/// Browser automation settings a checker should honour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckerSettings {
    pub headless: bool,
    pub implicit_wait: Duration,
    pub driver_cache_dir: PathBuf,
}

/// A lookup against one registration body's online register.
pub trait RegistrationChecker: Send + Sync {
    fn check(
        &self,
        request: &CheckRequest<'_>,
        settings: &CheckerSettings,
    ) -> Result<CheckResult, CheckError>;
}

impl<F> RegistrationChecker for F
where
    F: Fn(&CheckRequest<'_>, &CheckerSettings) -> Result<CheckResult, CheckError> + Send + Sync,
{
    fn check(
        &self,
        request: &CheckRequest<'_>,
        settings: &CheckerSettings,
    ) -> Result<CheckResult, CheckError> {
        self(request, settings)
    }
}

/// Checkers keyed by the registration body they handle.
pub struct CheckerRegistry {
    checkers: IndexMap<String, Box<dyn RegistrationChecker>>,
}

impl CheckerRegistry {
    pub fn new() -> Self {
        Self {
            checkers: IndexMap::new(),
        }
    }

    /// Register a checker for `reg_body`, replacing any previous one.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use reggie::{CheckerRegistry, CheckResult};
    ///
    /// let mut registry = CheckerRegistry::new();
    /// registry.register("NSW Architects Registration Board", Box::new(|req, _settings| {
    ///     Ok(CheckResult::new("current and active"))
    /// }));
    /// ```
    pub fn register(
        &mut self,
        reg_body: impl Into<String>,
        checker: Box<dyn RegistrationChecker>,
    ) {
        self.checkers.insert(reg_body.into(), checker);
    }

    pub fn get(&self, reg_body: &str) -> Option<&dyn RegistrationChecker> {
        self.checkers.get(reg_body).map(|c| c.as_ref())
    }

    pub fn has_checker(&self, reg_body: &str) -> bool {
        self.checkers.contains_key(reg_body)
    }

    /// Body names with a registered checker, in registration order.
    pub fn supported_bodies(&self) -> Vec<String> {
        self.checkers.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.checkers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.checkers.is_empty()
    }
}

impl Default for CheckerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
