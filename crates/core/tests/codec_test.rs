use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE, URL_SAFE_NO_PAD};
use groupsync_core::codec::FORMAT_VERSION;
use groupsync_core::models::AVAILABILITY_BYTES;
use groupsync_core::{AvailabilityVector, DecodeError, Student, TimezoneRegistry, ValidationError};
use pretty_assertions::assert_eq;
use rstest::rstest;

const COMPLEX_AVAILABILITY: &str = "100000000000000000000000000000000001111000000000000000000000000111100000000000110000001000000000000000000000111111100000011000001100000000000000000000111111000000000000";

fn zeros() -> String {
    "0".repeat(168)
}

/// Builds a code by hand, checksummed for a catalogue with `fingerprint`.
fn raw_code_for(
    fingerprint: u32,
    version: u8,
    timezone: u16,
    availability: [u8; AVAILABILITY_BYTES],
    name: &[u8],
) -> String {
    let mut payload = vec![version];
    payload.extend_from_slice(&timezone.to_be_bytes());
    payload.extend_from_slice(&availability);
    payload.extend_from_slice(name);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&fingerprint.to_be_bytes());
    hasher.update(&payload);
    payload.extend_from_slice(&hasher.finalize().to_be_bytes());
    URL_SAFE_NO_PAD.encode(payload)
}

/// Builds a code by hand, with a valid checksum for the global registry.
fn raw_code(version: u8, timezone: u16, availability: [u8; AVAILABILITY_BYTES], name: &[u8]) -> String {
    raw_code_for(
        TimezoneRegistry::global().fingerprint(),
        version,
        timezone,
        availability,
        name,
    )
}

fn utc_index() -> u16 {
    TimezoneRegistry::global().resolve("UTC").unwrap().index()
}

#[rstest]
#[case("Test Student", "America/Los_Angeles", zeros())]
#[case("Test Student", "America/Los_Angeles", COMPLEX_AVAILABILITY.to_string())]
#[case("Zoë Ångström-Ñúñez", "Europe/Stockholm", "1".repeat(168))]
#[case("李小龙", "Asia/Shanghai", "01".repeat(84))]
#[case("a|b|c", "UTC", "0".repeat(167) + "1")]
fn test_round_trip(#[case] name: &str, #[case] timezone: &str, #[case] availability: String) {
    let student = Student::new(name, timezone, &availability).unwrap();

    let encoded = student.encode();
    let decoded = Student::from_encoded(&encoded);

    assert_eq!(decoded, Some(student.clone()));
    let decoded = decoded.unwrap();
    assert_eq!(decoded.name(), name);
    assert_eq!(decoded.timezone(), timezone);
    assert_eq!(decoded.availability().to_string(), availability);
}

#[test]
fn test_encoding_is_deterministic_and_url_safe() {
    let student = Student::new("Test Student", "Asia/Tokyo", COMPLEX_AVAILABILITY).unwrap();
    let encoded = student.encode();

    assert_eq!(encoded, student.encode());
    assert_eq!(encoded, student.clone().encode());
    assert!(
        encoded
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    );
}

#[test]
fn test_codes_differ_per_student() {
    let a = Student::new("A", "UTC", &zeros()).unwrap();
    let b = Student::new("B", "UTC", &zeros()).unwrap();
    let c = Student::new("A", "Asia/Tokyo", &zeros()).unwrap();

    assert_ne!(a.encode(), b.encode());
    assert_ne!(a.encode(), c.encode());
}

#[test]
fn test_decode_tolerates_whitespace_and_padding() {
    let student = Student::new("Padded", "UTC", COMPLEX_AVAILABILITY).unwrap();
    let unpadded = student.encode();
    let padded = URL_SAFE.encode(URL_SAFE_NO_PAD.decode(&unpadded).unwrap());

    assert_eq!(Student::from_encoded(&padded), Some(student.clone()));
    assert_eq!(Student::from_encoded(&format!("\t{unpadded} \r\n")), Some(student.clone()));
    assert_eq!(Student::from_encoded(&format!("'{unpadded}'")), Some(student));
}

#[test]
fn test_hand_built_code_matches_format() {
    let code = raw_code(FORMAT_VERSION, utc_index(), [0xFF; AVAILABILITY_BYTES], b"Raw");
    let student = Student::from_encoded(&code).unwrap();

    assert_eq!(student.name(), "Raw");
    assert_eq!(student.timezone(), "UTC");
    assert_eq!(student.availability(), &AvailabilityVector::full());
    assert_eq!(student.encode(), code);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("not a schedule code!")]
#[case("aGk")]
#[case("fHx8fHx8fHx8fHx8fHx8fHx8fHx8fHx8fHx8fHx8")]
fn test_junk_decodes_to_none(#[case] code: &str) {
    assert_eq!(Student::from_encoded(code), None);
}

#[test]
fn test_legacy_text_codes_are_rejected() {
    let legacy = STANDARD.encode("hi|America/Los_Angeles|1920|2147483768|7|0|0|0");
    assert_eq!(Student::from_encoded(&legacy), None);
}

#[test]
fn test_checksum_mismatch() {
    let code = Student::new("Tamper", "UTC", COMPLEX_AVAILABILITY).unwrap().encode();
    let mut payload = URL_SAFE_NO_PAD.decode(&code).unwrap();
    payload[5] ^= 0b0000_0100;
    let tampered = URL_SAFE_NO_PAD.encode(&payload);

    assert_eq!(Student::decode(&tampered), Err(DecodeError::ChecksumMismatch));
    assert_eq!(Student::from_encoded(&tampered), None);
}

#[test]
fn test_code_from_another_catalogue_is_rejected() {
    let fingerprint = TimezoneRegistry::global().fingerprint();
    let stale = raw_code_for(fingerprint ^ 1, FORMAT_VERSION, utc_index(), [0xFF; AVAILABILITY_BYTES], b"Stale");
    let current = raw_code_for(fingerprint, FORMAT_VERSION, utc_index(), [0xFF; AVAILABILITY_BYTES], b"Stale");

    assert_eq!(Student::decode(&stale), Err(DecodeError::ChecksumMismatch));
    assert_eq!(Student::from_encoded(&stale), None);
    assert!(Student::from_encoded(&current).is_some());
}

#[test]
fn test_truncated_code() {
    let code = Student::new("Short", "UTC", &zeros()).unwrap().encode();
    let payload = URL_SAFE_NO_PAD.decode(&code).unwrap();
    let truncated = URL_SAFE_NO_PAD.encode(&payload[..20]);

    assert_eq!(Student::decode(&truncated), Err(DecodeError::Truncated { len: 20 }));
}

#[test]
fn test_unsupported_version() {
    let code = raw_code(FORMAT_VERSION + 1, utc_index(), [0; AVAILABILITY_BYTES], b"Future");

    assert_eq!(
        Student::decode(&code),
        Err(DecodeError::UnsupportedVersion(FORMAT_VERSION + 1))
    );
    assert_eq!(Student::from_encoded(&code), None);
}

#[test]
fn test_timezone_out_of_range() {
    let code = raw_code(FORMAT_VERSION, u16::MAX, [0; AVAILABILITY_BYTES], b"Lost");

    assert_eq!(
        Student::decode(&code),
        Err(DecodeError::TimezoneOutOfRange(u16::MAX))
    );
    assert_eq!(Student::from_encoded(&code), None);
}

#[rstest]
#[case(b"   ".as_slice())]
#[case(&[0xFF, 0xFE, 0xFD])]
fn test_invalid_names(#[case] name: &[u8]) {
    let code = raw_code(FORMAT_VERSION, utc_index(), [0; AVAILABILITY_BYTES], name);
    assert_eq!(Student::decode(&code), Err(DecodeError::InvalidName));
}

#[test]
fn test_invalid_base64() {
    assert_eq!(Student::decode("***"), Err(DecodeError::InvalidBase64));
}

#[rstest]
#[case("0".repeat(167), ValidationError::InvalidAvailabilityLength { actual: 167 })]
#[case("0".repeat(169), ValidationError::InvalidAvailabilityLength { actual: 169 })]
#[case(String::new(), ValidationError::InvalidAvailabilityLength { actual: 0 })]
#[case("x".repeat(168), ValidationError::InvalidAvailabilityCharacter { index: 0, character: 'x' })]
#[case("0".repeat(100) + "2" + &"0".repeat(67), ValidationError::InvalidAvailabilityCharacter { index: 100, character: '2' })]
fn test_new_rejects_bad_availability(#[case] availability: String, #[case] expected: ValidationError) {
    assert_eq!(
        Student::new("Student", "America/Los_Angeles", &availability),
        Err(expected)
    );
}

#[test]
fn test_new_rejects_unknown_timezone() {
    assert_eq!(
        Student::new("Student", "yo", &zeros()),
        Err(ValidationError::UnknownTimezone("yo".to_string()))
    );
}

#[test]
fn test_length_is_checked_before_timezone() {
    assert_eq!(
        Student::new("Student", "yo", "111"),
        Err(ValidationError::InvalidAvailabilityLength { actual: 3 })
    );
}

#[rstest]
#[case("")]
#[case("  \t")]
fn test_new_rejects_empty_name(#[case] name: &str) {
    assert_eq!(Student::new(name, "UTC", &zeros()), Err(ValidationError::EmptyName));
}
