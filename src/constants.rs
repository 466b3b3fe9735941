//! Fixed tables shared across the crate: bodies without an automated lookup,
//! checker result keys, and the default configuration values.

/// Registration bodies for which no automated checker exists yet.
pub const KNOWN_UNCHECKED_REGISTRATION_BODIES: &[&str] = &[
    "Victorian Architects Registration Board",
    "South Australian Architects Board",
    "Western Australian Architects Board",
    "Tasmanian Architects Board",
    "Northern Territory Architects Registration Board",
    "ACT Architects Registration Board",
    "Engineers Australia",
    "Australian Institute of Building Surveyors",
];

/// Whether `reg_body` is one of [`KNOWN_UNCHECKED_REGISTRATION_BODIES`].
pub fn is_known_unchecked(reg_body: &str) -> bool {
    KNOWN_UNCHECKED_REGISTRATION_BODIES.contains(&reg_body)
}

/// Key under which a body-specific manual-check message is stored.
pub const STATUS_MESSAGE_KEY: &str = "status_message";

/// Standard keys used in checker result dictionaries.
pub mod result_keys {
    pub const STATUS: &str = "status";
    pub const NAME: &str = "name";
    pub const ORIGINAL_STATUS: &str = "original_status";
    pub const ERROR_MESSAGE: &str = "error_message";
}

// Default configuration table

pub const DEFAULT_EMAIL_COLUMN: &str = "email";
pub const DEFAULT_FULL_NAME_COLUMN: &str = "full_name";
pub const DEFAULT_LINKED_IN_URL_COLUMN: &str = "linkedin_url";
pub const DEFAULT_REG_BODY_COLUMN: &str = "reg_body";
pub const DEFAULT_REG_NUMBER_COLUMN: &str = "reg_number";
pub const DEFAULT_STATE_COLUMN: &str = "state_board_code";

/// Column order assumed for headerless input.
pub const DEFAULT_COLUMN_NAMES: &[&str] = &[
    DEFAULT_EMAIL_COLUMN,
    DEFAULT_FULL_NAME_COLUMN,
    DEFAULT_LINKED_IN_URL_COLUMN,
    DEFAULT_REG_BODY_COLUMN,
    DEFAULT_REG_NUMBER_COLUMN,
    DEFAULT_STATE_COLUMN,
];

pub const DEFAULT_CHECK_REGISTRATIONS: bool = true;
pub const DEFAULT_SELENIUM_HEADLESS: bool = true;
pub const DEFAULT_SELENIUM_IMPLICIT_WAIT_SECS: u64 = 10;
pub const DEFAULT_DRIVER_CACHE_DIR: &str = "driver";
