use chrono::{TimeZone, Utc};
use groupsync_core::timezones::{list_timezones, TimezoneRegistry};
use groupsync_core::ValidationError;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn january() -> TimezoneRegistry {
    TimezoneRegistry::new(Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap())
}

fn july() -> TimezoneRegistry {
    TimezoneRegistry::new(Utc.with_ymd_and_hms(2024, 7, 15, 12, 0, 0).unwrap())
}

#[test]
fn test_catalogue_is_sorted_and_stable() {
    let names = list_timezones();

    assert!(names.windows(2).all(|pair| pair[0] < pair[1]));
    assert!(names.contains(&"UTC"));
    assert!(names.contains(&"America/Los_Angeles"));
    assert_eq!(names, list_timezones());
    assert_eq!(names, january().names());
}

#[test]
fn test_list_and_resolve_agree() {
    let registry = january();
    let ids = registry.list_timezones();

    assert_eq!(ids.len(), registry.len());
    for (id, name) in ids.iter().zip(registry.names()) {
        assert_eq!(registry.name(*id), name);
        assert_eq!(registry.resolve(name), Ok(*id));
    }
}

#[test]
fn test_resolve_unknown_timezone() {
    let registry = january();

    assert_eq!(
        registry.resolve("Atlantis/Capital"),
        Err(ValidationError::UnknownTimezone("Atlantis/Capital".to_string()))
    );
    assert!(registry.resolve("").is_err());
    assert!(registry.resolve("utc").is_err());
}

#[test]
fn test_get_checks_bounds() {
    let registry = january();

    assert!(registry.get(0).is_some());
    assert!(registry.get(registry.len() as u16 - 1).is_some());
    assert_eq!(registry.get(registry.len() as u16), None);
    assert_eq!(registry.get(u16::MAX), None);
}

#[rstest]
#[case("UTC", 0, 0)]
#[case("America/Los_Angeles", -8, -7)]
#[case("America/Anchorage", -9, -8)]
#[case("Europe/Berlin", 1, 2)]
#[case("Asia/Tokyo", 9, 9)]
#[case("Asia/Kolkata", 6, 6)]
#[case("Australia/Sydney", 11, 10)]
fn test_offset_hours_at_reference_instant(
    #[case] name: &str,
    #[case] winter: i32,
    #[case] summer: i32,
) {
    let registry = january();
    assert_eq!(registry.offset_hours(registry.resolve(name).unwrap()), winter);

    let registry = july();
    assert_eq!(registry.offset_hours(registry.resolve(name).unwrap()), summer);
}

#[test]
fn test_reference_instant_is_kept() {
    let reference = Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap();
    assert_eq!(TimezoneRegistry::new(reference).reference_instant(), reference);

    let global = TimezoneRegistry::global();
    assert_eq!(global.reference_instant(), TimezoneRegistry::global().reference_instant());
}

#[test]
fn test_fingerprint_covers_catalogue_only() {
    let mut hasher = crc32fast::Hasher::new();
    for name in list_timezones() {
        hasher.update(name.as_bytes());
        hasher.update(b"\n");
    }

    assert_eq!(january().fingerprint(), hasher.finalize());
    assert_eq!(january().fingerprint(), july().fingerprint());
    assert_eq!(january().fingerprint(), TimezoneRegistry::global().fingerprint());
}
