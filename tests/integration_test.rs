//! Integration tests for normalization, aggregation and file processing

use reggie::constants::{KNOWN_UNCHECKED_REGISTRATION_BODIES, STATUS_MESSAGE_KEY};
use reggie::{
    CheckError, CheckRequest, CheckResult, CheckerRegistry, CheckerSettings, Entity, Person,
    ProcessingConfig, Registration, RegistrationProcessor, RegistrationStatus,
};
use serde_json::{json, Value};
use std::io::Write;

fn normalize(body: &str, raw: &str) -> Registration {
    Registration::normalize(Some(body.to_string()), Some("12345".to_string()), raw, None)
}

#[test]
fn test_victorian_board_is_not_checked_automatically() {
    let reg = normalize("Victorian Architects Registration Board", "some unknown status");

    assert_eq!(reg.reg_status(), RegistrationStatus::NotCheckedAutomatically);
    assert_eq!(
        reg.status_message(),
        "Victorian Architects Registration Board is not checked automatically yet, check manually"
    );
}

#[test]
fn test_unknown_board_is_error() {
    let reg = normalize("Unknown Board", "some unknown status");
    assert_eq!(reg.reg_status(), RegistrationStatus::Error);
}

#[test]
fn test_canonical_status_for_any_body() {
    let reg = normalize("NSW Board", "current and active");

    assert_eq!(reg.reg_status(), RegistrationStatus::CurrentAndActive);
    assert_eq!(reg.status_message(), "current and active");
}

#[test]
fn test_every_known_unchecked_body_gets_its_own_message() {
    for body in KNOWN_UNCHECKED_REGISTRATION_BODIES {
        let reg = normalize(body, "captcha page");

        assert_eq!(reg.reg_status(), RegistrationStatus::NotCheckedAutomatically);
        assert!(reg.status_message().contains(body));

        let dict = reg.to_dict();
        assert!(!dict.contains_key(STATUS_MESSAGE_KEY));
        assert_eq!(dict["reg_status"], json!(reg.status_message()));
    }
}

#[test]
fn test_empty_person() {
    let person = Person::new("Nobody", "nobody@example.com", None);

    assert_eq!(person.live_rego_count(), 0);
    assert_eq!(person.to_dict()["registrations"], json!([]));
}

#[test]
fn test_live_count_increments_only_for_active() {
    let mut person = Person::new("Jane Doe", "jane@example.com", None);

    for (raw, expected) in [
        ("current and active", 1),
        ("expired", 1),
        ("not found", 1),
        ("not checked automatically, check manually", 1),
        ("current and active", 2),
    ] {
        person.add_registration(normalize("NSW Board", raw));
        assert_eq!(person.live_rego_count(), expected);
    }
}

#[test]
fn test_duplicate_registrations_both_serialized() {
    let mut person = Person::new("Jane Doe", "jane@example.com", None);
    person.add_registration(normalize("NSW Board", "current and active"));
    person.add_registration(normalize("NSW Board", "current and active"));

    let value = serde_json::to_value(&person).unwrap();
    assert_eq!(value["registrations"].as_array().unwrap().len(), 2);
    assert_eq!(value["live_rego_count"], json!(2));
}

fn registry() -> CheckerRegistry {
    let mut registry = CheckerRegistry::new();
    registry.register(
        "NSW Architects Registration Board",
        Box::new(
            |req: &CheckRequest<'_>, s: &CheckerSettings| -> Result<CheckResult, CheckError> {
                assert!(s.headless);
                match req.reg_number {
                    Some("100") => Ok(CheckResult::new("current and active")
                        .with_detail("original_status", "Registered")),
                    Some("200") => Err(CheckError::Timeout(s.implicit_wait)),
                    _ => Ok(CheckResult::new("not found")),
                }
            },
        ),
    );
    registry
}

#[test]
fn test_process_csv_file_end_to_end() {
    let dir = tempfile::tempdir().unwrap();
    let input_path = dir.path().join("people.csv");
    let mut input = std::fs::File::create(&input_path).unwrap();
    writeln!(input, "a@example.com,Alice,,NSW Architects Registration Board,100,NSW").unwrap();
    writeln!(input, "b@example.com,Bob,,NSW Architects Registration Board,200,NSW").unwrap();
    writeln!(input, "c@example.com,Cara,,Engineers Australia,E-3,VIC").unwrap();
    writeln!(input, "d@example.com,Dan,,Somewhere Else Board,X-4,QLD").unwrap();
    writeln!(input, "e@example.com,Eve,,,,").unwrap();
    drop(input);

    let output_path = dir.path().join("out").join("results.json");
    let config = ProcessingConfig::with_overrides(
        json!({"output_file": output_path.to_str().unwrap()})
            .as_object()
            .unwrap(),
    )
    .unwrap();
    let processor = RegistrationProcessor::with_checkers(config, registry());

    let people = processor.process_csv(&input_path).unwrap();
    let saved = processor.save(&people).unwrap();
    assert_eq!(saved, output_path);

    let contents = std::fs::read_to_string(&output_path).unwrap();
    let written: Value = serde_json::from_str(&contents).unwrap();
    let statuses: Vec<_> = written
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["registrations"].get(0).map(|r| r["reg_status"].clone()))
        .collect();

    assert_eq!(
        statuses,
        vec![
            Some(json!("current and active")),
            Some(json!("error, check manually")),
            Some(json!("Engineers Australia is not checked automatically yet, check manually")),
            Some(json!("error, check manually")),
            None,
        ]
    );
    assert_eq!(written[0]["registrations"][0]["original_status"], json!("Registered"));
    assert!(written[1]["registrations"][0]["error_message"]
        .as_str()
        .unwrap()
        .contains("Timed out"));
    assert_eq!(written[0]["live_rego_count"], json!(1));
    assert_eq!(written[4]["live_rego_count"], json!(0));
}

#[test]
fn test_save_csv_output() {
    let dir = tempfile::tempdir().unwrap();
    let output_path = dir.path().join("results.csv");

    let processor = RegistrationProcessor::with_checkers(ProcessingConfig::default(), registry());
    let people = processor
        .process_reader(
            "a@example.com,Alice,,NSW Architects Registration Board,100,NSW\n".as_bytes(),
        )
        .unwrap();
    processor.save_csv(&people, &output_path).unwrap();

    let contents = std::fs::read_to_string(&output_path).unwrap();
    let lines: Vec<&str> = contents.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "Alice,a@example.com,,1,NSW Architects Registration Board,100,current and active"
    );
}

#[test]
fn test_config_file_drives_processing() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "column_names: [Email, Name, Board, Number]").unwrap();
    writeln!(file, "email_column: Email").unwrap();
    writeln!(file, "full_name_column: Name").unwrap();
    writeln!(file, "reg_body_column: Board").unwrap();
    writeln!(file, "reg_number_column: Number").unwrap();
    writeln!(file, "check_registrations: false").unwrap();

    let config = ProcessingConfig::load_from_file(file.path()).unwrap();
    let processor = RegistrationProcessor::with_checkers(config, registry());

    let people = processor
        .process_reader("a@example.com,Alice,NSW Architects Registration Board,100\n".as_bytes())
        .unwrap();

    assert_eq!(people[0].full_name(), "Alice");
    assert_eq!(
        people[0].registrations()[0].reg_status(),
        RegistrationStatus::NotCheckedAutomatically
    );
    assert_eq!(people[0].live_rego_count(), 0);
}
