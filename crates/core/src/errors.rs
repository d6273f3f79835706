use thiserror::Error;

/// Errors raised while constructing a `Student` from user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Availability must be 168 hours long, got {actual}")]
    InvalidAvailabilityLength { actual: usize },

    #[error("Invalid availability character {character:?} at hour {index}")]
    InvalidAvailabilityCharacter { index: usize, character: char },

    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    #[error("Student name must not be empty")]
    EmptyName,
}

/// Reasons a schedule code could not be decoded.
///
/// `Student::from_encoded` swallows these; they only surface through
/// `Student::decode` and debug logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Schedule code is not valid base64")]
    InvalidBase64,

    #[error("Schedule code payload is truncated ({len} bytes)")]
    Truncated { len: usize },

    #[error("Schedule code checksum mismatch")]
    ChecksumMismatch,

    #[error("Unsupported schedule code version: {0}")]
    UnsupportedVersion(u8),

    #[error("Timezone index {0} is outside the registry")]
    TimezoneOutOfRange(u16),

    #[error("Schedule code contains an invalid student name")]
    InvalidName,
}

/// Call-level errors for group formation. These abort the whole call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Group size must be at least 1, got {0}")]
    InvalidGroupSize(usize),

    #[error("Unknown output timezone: {0}")]
    UnknownTimezone(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GroupsError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

pub type GroupsResult<T> = Result<T, GroupsError>;
