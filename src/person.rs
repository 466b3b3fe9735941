//! A person and the registrations found for them.

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::entity::{optional_string, Dict, Entity};
use crate::registration::Registration;

#[derive(Debug, Clone, PartialEq)]
pub struct Person {
    full_name: String,
    email: String,
    linked_in_url: Option<String>,
    registrations: Vec<Registration>,
}

impl Person {
    pub fn new(
        full_name: impl Into<String>,
        email: impl Into<String>,
        linked_in_url: Option<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
            linked_in_url,
            registrations: Vec::new(),
        }
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn linked_in_url(&self) -> Option<&str> {
        self.linked_in_url.as_deref()
    }

    /// Registrations in the order they were added.
    pub fn registrations(&self) -> &[Registration] {
        &self.registrations
    }

    /// Append a registration. Duplicates of the same body/number are kept.
    pub fn add_registration(&mut self, registration: Registration) {
        self.registrations.push(registration);
    }

    /// Number of registrations currently active. Computed on each call.
    pub fn live_rego_count(&self) -> usize {
        self.registrations
            .iter()
            .filter(|reg| reg.reg_status().is_live())
            .count()
    }

    pub fn has_live_registration(&self) -> bool {
        self.registrations.iter().any(|reg| reg.reg_status().is_live())
    }
}

impl Entity for Person {
    fn to_dict(&self) -> Dict {
        let mut dict = Dict::new();
        dict.insert("full_name".to_string(), Value::String(self.full_name.clone()));
        dict.insert("email".to_string(), Value::String(self.email.clone()));
        dict.insert("linked_in_url".to_string(), optional_string(self.linked_in_url()));
        dict.insert(
            "registrations".to_string(),
            Value::Array(self.registrations.iter().map(Entity::to_value).collect()),
        );
        dict.insert("live_rego_count".to_string(), Value::from(self.live_rego_count()));
        dict
    }
}

impl Serialize for Person {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}
