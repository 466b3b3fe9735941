//! A single registration lookup result.
//!
//! A [`Registration`] is built once from whatever a checker returned and is
//! read-only afterwards. Construction is where raw status text is folded into
//! the [`RegistrationStatus`] taxonomy:
//!
//! 1. a raw string equal to a canonical status string maps to that status
//! 2. otherwise a known-unchecked body maps to
//!    [`RegistrationStatus::NotCheckedAutomatically`] with a body-specific
//!    `status_message`
//! 3. otherwise the status is [`RegistrationStatus::Error`]

use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::constants::{is_known_unchecked, STATUS_MESSAGE_KEY};
use crate::entity::{optional_string, Dict, Entity};
use crate::status::RegistrationStatus;

/// Status as supplied to the constructor.
///
/// Raw text only exists at this boundary; a constructed [`Registration`]
/// always holds a taxonomy member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusInput {
    Raw(String),
    Known(RegistrationStatus),
}

impl From<&str> for StatusInput {
    fn from(raw: &str) -> Self {
        StatusInput::Raw(raw.to_string())
    }
}

impl From<String> for StatusInput {
    fn from(raw: String) -> Self {
        StatusInput::Raw(raw)
    }
}

impl From<RegistrationStatus> for StatusInput {
    fn from(status: RegistrationStatus) -> Self {
        StatusInput::Known(status)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    reg_body: Option<String>,
    reg_number: Option<String>,
    reg_status: RegistrationStatus,
    additional_data: Option<Dict>,
}

impl Registration {
    /// Build a registration, resolving raw status text through the fallback
    /// chain. A [`StatusInput::Known`] status is kept as given.
    pub fn new(
        reg_body: Option<String>,
        reg_number: Option<String>,
        status: impl Into<StatusInput>,
        additional_data: Option<Dict>,
    ) -> Self {
        match status.into() {
            StatusInput::Known(reg_status) => Self {
                reg_body,
                reg_number,
                reg_status,
                additional_data,
            },
            StatusInput::Raw(raw) => {
                Self::normalize(reg_body, reg_number, &raw, additional_data)
            }
        }
    }

    /// Map `raw_status` onto the taxonomy. Never fails.
    pub fn normalize(
        reg_body: Option<String>,
        reg_number: Option<String>,
        raw_status: &str,
        mut additional_data: Option<Dict>,
    ) -> Self {
        let unchecked_body = reg_body
            .as_deref()
            .filter(|b| !b.is_empty() && is_known_unchecked(b));

        let reg_status = if let Some(status) = RegistrationStatus::from_canonical(raw_status) {
            status
        } else if let Some(body) = unchecked_body {
            additional_data
                .get_or_insert_with(Dict::new)
                .insert(STATUS_MESSAGE_KEY.to_string(), manual_check_message(body));
            RegistrationStatus::NotCheckedAutomatically
        } else {
            RegistrationStatus::Error
        };

        Self {
            reg_body,
            reg_number,
            reg_status,
            additional_data,
        }
    }

    /// A registration that was deliberately not looked up.
    ///
    /// Known-unchecked bodies still get their body-specific message.
    pub fn not_checked(reg_body: Option<String>, reg_number: Option<String>) -> Self {
        let additional_data = reg_body
            .as_deref()
            .filter(|b| !b.is_empty() && is_known_unchecked(b))
            .map(|body| {
                let mut data = Dict::new();
                data.insert(STATUS_MESSAGE_KEY.to_string(), manual_check_message(body));
                data
            });

        Self {
            reg_body,
            reg_number,
            reg_status: RegistrationStatus::NotCheckedAutomatically,
            additional_data,
        }
    }

    pub fn reg_body(&self) -> Option<&str> {
        self.reg_body.as_deref()
    }

    pub fn reg_number(&self) -> Option<&str> {
        self.reg_number.as_deref()
    }

    pub fn reg_status(&self) -> RegistrationStatus {
        self.reg_status
    }

    pub fn additional_data(&self) -> Option<&Dict> {
        self.additional_data.as_ref()
    }

    /// Text to show for this registration's status.
    ///
    /// For a not-checked registration carrying a body-specific message that
    /// message wins; otherwise it is the canonical status string.
    pub fn status_message(&self) -> &str {
        if self.reg_status == RegistrationStatus::NotCheckedAutomatically {
            if let Some(message) = self
                .additional_data
                .as_ref()
                .and_then(|data| data.get(STATUS_MESSAGE_KEY))
                .and_then(Value::as_str)
            {
                return message;
            }
        }
        self.reg_status.as_str()
    }
}

fn manual_check_message(body: &str) -> Value {
    Value::String(format!(
        "{} is not checked automatically yet, check manually",
        body
    ))
}

/// Keys owned by the registration itself; additional data cannot replace them.
/// `status_message` is already surfaced as `reg_status`.
const RESERVED_KEYS: [&str; 4] = ["reg_body", "reg_number", "reg_status", STATUS_MESSAGE_KEY];

impl Entity for Registration {
    fn to_dict(&self) -> Dict {
        let mut dict = Dict::new();
        dict.insert("reg_body".to_string(), optional_string(self.reg_body()));
        dict.insert("reg_number".to_string(), optional_string(self.reg_number()));
        dict.insert(
            "reg_status".to_string(),
            Value::String(self.status_message().to_string()),
        );

        if let Some(data) = &self.additional_data {
            for (key, value) in data.iter().filter(|(k, _)| !RESERVED_KEYS.contains(&k.as_str())) {
                dict.insert(key.clone(), value.clone());
            }
        }
        dict
    }
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_dict().serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn reg(body: &str, raw: &str) -> Registration {
        Registration::normalize(Some(body.to_string()), Some("12345".to_string()), raw, None)
    }

    #[test]
    fn test_canonical_string_maps_to_member() {
        for status in RegistrationStatus::ALL {
            let r = reg("Unknown Board", status.as_str());
            assert_eq!(r.reg_status(), status);
        }
    }

    #[test]
    fn test_known_unchecked_body() {
        let r = reg("Victorian Architects Registration Board", "some unknown status");

        assert_eq!(r.reg_status(), RegistrationStatus::NotCheckedAutomatically);
        assert_eq!(
            r.status_message(),
            "Victorian Architects Registration Board is not checked automatically yet, \
             check manually"
        );
        assert!(r.additional_data().unwrap().contains_key(STATUS_MESSAGE_KEY));
    }

    #[test]
    fn test_unknown_body_falls_back_to_error() {
        let r = reg("Unknown Board", "some unknown status");

        assert_eq!(r.reg_status(), RegistrationStatus::Error);
        assert_eq!(r.status_message(), "error, check manually");
        assert!(r.additional_data().is_none());
    }

    #[test]
    fn test_valid_status_keeps_canonical_message() {
        let r = reg("NSW Board", "current and active");

        assert_eq!(r.reg_status(), RegistrationStatus::CurrentAndActive);
        assert_eq!(r.status_message(), "current and active");
    }

    #[test]
    fn test_canonical_match_beats_known_unchecked_body() {
        let r = reg("Engineers Australia", "expired");

        assert_eq!(r.reg_status(), RegistrationStatus::Expired);
        assert!(r.additional_data().is_none());
    }

    #[test]
    fn test_missing_or_empty_body_is_error() {
        let r = Registration::normalize(None, None, "whatever", None);
        assert_eq!(r.reg_status(), RegistrationStatus::Error);

        let r = Registration::normalize(Some(String::new()), None, "whatever", None);
        assert_eq!(r.reg_status(), RegistrationStatus::Error);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let r = reg("NSW Board", "Current And Active");
        assert_eq!(r.reg_status(), RegistrationStatus::Error);
    }

    #[test]
    fn test_known_status_input_is_kept() {
        let r = Registration::new(
            Some("Engineers Australia".to_string()),
            None,
            RegistrationStatus::NotCheckedAutomatically,
            None,
        );

        assert_eq!(r.reg_status(), RegistrationStatus::NotCheckedAutomatically);
        // No body message was attached, so the canonical text is shown
        assert_eq!(r.status_message(), "not checked automatically, check manually");
    }

    #[test]
    fn test_not_checked_attaches_body_message() {
        let r = Registration::not_checked(
            Some("Engineers Australia".to_string()),
            Some("E-1".to_string()),
        );

        assert_eq!(r.reg_status(), RegistrationStatus::NotCheckedAutomatically);
        assert_eq!(
            r.status_message(),
            "Engineers Australia is not checked automatically yet, check manually"
        );
    }

    #[test]
    fn test_not_checked_other_body_shows_canonical_text() {
        let r = Registration::not_checked(Some("NSW Board".to_string()), None);

        assert_eq!(r.reg_status(), RegistrationStatus::NotCheckedAutomatically);
        assert_eq!(r.status_message(), "not checked automatically, check manually");
        assert!(r.additional_data().is_none());
        assert!(!r.reg_status().is_live());
    }

    #[test]
    fn test_raw_status_input_goes_through_normalize() {
        let r = Registration::new(Some("NSW Board".to_string()), None, "retired", None);
        assert_eq!(r.reg_status(), RegistrationStatus::Retired);
    }

    #[test]
    fn test_status_message_key_ignored_for_other_statuses() {
        let mut data = Dict::new();
        data.insert(STATUS_MESSAGE_KEY.to_string(), json!("stale message"));

        let r = Registration::normalize(None, None, "suspended", Some(data));
        assert_eq!(r.status_message(), "suspended");
    }

    #[test]
    fn test_non_string_status_message_falls_back_to_canonical_text() {
        let mut data = Dict::new();
        data.insert(STATUS_MESSAGE_KEY.to_string(), json!(42));

        let r = Registration::new(
            Some("NSW Board".to_string()),
            None,
            RegistrationStatus::NotCheckedAutomatically,
            Some(data),
        );

        assert_eq!(r.status_message(), "not checked automatically, check manually");
        assert_eq!(r.to_dict()["reg_status"], json!(r.status_message()));
    }

    #[test]
    fn test_existing_additional_data_is_extended() {
        let mut data = Dict::new();
        data.insert("name".to_string(), json!("Jane Doe"));

        let r = Registration::normalize(
            Some("Tasmanian Architects Board".to_string()),
            Some("T-1".to_string()),
            "",
            Some(data),
        );

        let data = r.additional_data().unwrap();
        assert_eq!(data["name"], json!("Jane Doe"));
        assert!(data.contains_key(STATUS_MESSAGE_KEY));
    }

    #[test]
    fn test_to_dict_shape() {
        let mut data = Dict::new();
        data.insert("name".to_string(), json!("Jane Doe"));
        data.insert("original_status".to_string(), json!("Registered"));

        let r = Registration::normalize(
            Some("NSW Board".to_string()),
            Some("54321".to_string()),
            "current and active",
            Some(data),
        );

        assert_eq!(
            r.to_value(),
            json!({
                "reg_body": "NSW Board",
                "reg_number": "54321",
                "reg_status": "current and active",
                "name": "Jane Doe",
                "original_status": "Registered",
            })
        );
        let keys: Vec<_> = r.to_dict().keys().cloned().collect();
        assert_eq!(&keys[..3], ["reg_body", "reg_number", "reg_status"]);
    }

    #[test]
    fn test_additional_data_cannot_replace_core_fields() {
        let mut data = Dict::new();
        data.insert("reg_status".to_string(), Value::Null);
        data.insert("reg_body".to_string(), json!("Spoofed"));
        data.insert("reg_number".to_string(), json!("000"));
        data.insert("name".to_string(), json!("Jane Doe"));

        let r = Registration::normalize(
            Some("NSW Board".to_string()),
            None,
            "expired",
            Some(data),
        );

        assert_eq!(
            r.to_value(),
            json!({
                "reg_body": "NSW Board",
                "reg_number": null,
                "reg_status": "expired",
                "name": "Jane Doe",
            })
        );
    }

    #[test]
    fn test_to_dict_does_not_duplicate_status_message() {
        let r = reg("Engineers Australia", "pending");
        let dict = r.to_dict();

        assert!(!dict.contains_key(STATUS_MESSAGE_KEY));
        assert_eq!(
            dict["reg_status"],
            json!("Engineers Australia is not checked automatically yet, check manually")
        );
    }

    #[test]
    fn test_to_dict_with_missing_fields() {
        let r = Registration::normalize(None, None, "not found", None);
        assert_eq!(
            r.to_value(),
            json!({"reg_body": null, "reg_number": null, "reg_status": "not found"})
        );
    }

    #[test]
    fn test_serialize_matches_to_dict() {
        let r = reg("NSW Board", "expired");
        assert_eq!(serde_json::to_value(&r).unwrap(), r.to_value());
    }
}
