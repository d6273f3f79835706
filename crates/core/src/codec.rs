//! # Schedule Codes
//!
//! A schedule code packs everything needed to rebuild a [`Student`] into a
//! short token that survives copy and paste:
//!
//! ```text
//! base64url( version:u8 | timezone index:u16 BE | availability:21 bytes | name:UTF-8 | crc32:u32 BE )
//! ```
//!
//! The checksum covers every byte before it, seeded with the registry
//! fingerprint, so codes only decode against the catalogue they were written
//! with. Codes are emitted without base64
//! padding; padded input is accepted too.

use base64::alphabet;
use base64::engine::{DecodePaddingMode, Engine, GeneralPurpose, GeneralPurposeConfig};
use tracing::debug;

use crate::errors::DecodeError;
use crate::models::{AvailabilityVector, Student, AVAILABILITY_BYTES};
use crate::timezones::TimezoneRegistry;

/// Current schedule code format.
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = 1 + 2;
const CHECKSUM_LEN: usize = 4;
/// Smallest payload that can hold a one byte name.
const MIN_PAYLOAD_LEN: usize = HEADER_LEN + AVAILABILITY_BYTES + 1 + CHECKSUM_LEN;

const CODE_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Stripped from both ends of a pasted code, along with whitespace.
const QUOTES: [char; 3] = ['"', '\'', '`'];

fn payload_checksum(body: &[u8], registry: &TimezoneRegistry) -> u32 {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&registry.fingerprint().to_be_bytes());
    hasher.update(body);
    hasher.finalize()
}

/// Serializes `student` into a schedule code for `registry`.
pub fn encode(student: &Student, registry: &TimezoneRegistry) -> String {
    let name = student.name().as_bytes();
    let mut payload = Vec::with_capacity(HEADER_LEN + AVAILABILITY_BYTES + name.len() + CHECKSUM_LEN);

    payload.push(FORMAT_VERSION);
    payload.extend_from_slice(&student.timezone_id().index().to_be_bytes());
    payload.extend_from_slice(&student.availability().to_bytes());
    payload.extend_from_slice(name);

    let checksum = payload_checksum(&payload, registry);
    payload.extend_from_slice(&checksum.to_be_bytes());

    CODE_ENGINE.encode(payload)
}

/// Rebuilds a student from a schedule code, reporting why decoding failed.
pub fn decode(code: &str, registry: &TimezoneRegistry) -> Result<Student, DecodeError> {
    let code = code.trim_matches(|c: char| c.is_whitespace() || QUOTES.contains(&c));
    let payload = CODE_ENGINE
        .decode(code)
        .map_err(|_| DecodeError::InvalidBase64)?;

    if payload.len() < MIN_PAYLOAD_LEN {
        return Err(DecodeError::Truncated { len: payload.len() });
    }

    let (body, stored) = payload.split_at(payload.len() - CHECKSUM_LEN);
    let expected = u32::from_be_bytes([stored[0], stored[1], stored[2], stored[3]]);
    if payload_checksum(body, registry) != expected {
        return Err(DecodeError::ChecksumMismatch);
    }

    let version = body[0];
    if version != FORMAT_VERSION {
        return Err(DecodeError::UnsupportedVersion(version));
    }

    let timezone_index = u16::from_be_bytes([body[1], body[2]]);
    let timezone = registry
        .get(timezone_index)
        .ok_or(DecodeError::TimezoneOutOfRange(timezone_index))?;

    let mut availability = [0; AVAILABILITY_BYTES];
    availability.copy_from_slice(&body[HEADER_LEN..HEADER_LEN + AVAILABILITY_BYTES]);
    let availability = AvailabilityVector::from_bytes(availability);

    let name = std::str::from_utf8(&body[HEADER_LEN + AVAILABILITY_BYTES..])
        .map_err(|_| DecodeError::InvalidName)?;

    Student::from_parts(name, timezone, availability).map_err(|_| DecodeError::InvalidName)
}

impl Student {
    /// Encodes this student into a schedule code. Identical students always
    /// produce identical codes.
    pub fn encode(&self) -> String {
        encode(self, TimezoneRegistry::global())
    }

    /// Reconstructs a student from a code produced by [`Student::encode`], or
    /// explains why it could not.
    pub fn decode(code: &str) -> Result<Student, DecodeError> {
        decode(code, TimezoneRegistry::global())
    }

    /// Tolerant decode for hand-copied codes. Returns `None` for anything that
    /// is not a valid schedule code.
    pub fn from_encoded(code: &str) -> Option<Student> {
        Self::from_encoded_with(code, TimezoneRegistry::global())
    }

    /// Same as [`Student::from_encoded`], bounding timezones by `registry`.
    pub fn from_encoded_with(code: &str, registry: &TimezoneRegistry) -> Option<Student> {
        match decode(code, registry) {
            Ok(student) => Some(student),
            Err(err) => {
                debug!(code, error = %err, "Discarding schedule code");
                None
            }
        }
    }
}
