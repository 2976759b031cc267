//! End-to-end scenarios against the public `CidrMatcher` API.

use cidrtrie::CidrMatcher;

#[test]
fn scenario_basic_ipv4() {
    let matcher = CidrMatcher::new();
    matcher.insert("192.168.1.0/24").unwrap();

    assert!(matcher.contains("192.168.1.1").unwrap());
    assert!(matcher.contains("192.168.1.255").unwrap());
    assert!(!matcher.contains("192.168.2.1").unwrap());
    assert!(!matcher.contains("10.0.0.1").unwrap());
}

#[test]
fn scenario_partial_byte_prefix() {
    let matcher = CidrMatcher::new();
    matcher.insert("172.16.0.0/12").unwrap();

    assert!(matcher.contains("172.16.0.1").unwrap());
    assert!(matcher.contains("172.31.255.254").unwrap());
    assert!(!matcher.contains("172.32.0.1").unwrap());
}

#[test]
fn scenario_overlapping_then_remove_outer() {
    let matcher = CidrMatcher::new();
    matcher.insert("10.0.0.0/8").unwrap();
    matcher.insert("10.10.0.0/16").unwrap();

    assert!(matcher.contains("10.5.5.5").unwrap());
    assert!(matcher.contains("10.10.5.5").unwrap());

    matcher.remove("10.0.0.0/8").unwrap();

    assert!(!matcher.contains("10.5.5.5").unwrap());
    assert!(matcher.contains("10.10.5.5").unwrap());
}

#[test]
fn scenario_wildcard() {
    let matcher = CidrMatcher::new();
    matcher.insert("0.0.0.0/0").unwrap();
    assert!(matcher.contains("1.2.3.4").unwrap());

    matcher.remove("0.0.0.0/0").unwrap();
    assert!(!matcher.contains("1.2.3.4").unwrap());
}

#[test]
fn scenario_ipv6() {
    let matcher = CidrMatcher::new();
    matcher.insert("2001:db8::/32").unwrap();

    assert!(matcher.contains("2001:db8::1").unwrap());
    assert!(!matcher.contains("2001:db9::1").unwrap());
}

#[test]
fn scenario_serialize_round_trip() {
    let matcher = CidrMatcher::new();
    matcher.insert("10.0.0.0/8").unwrap();
    matcher.insert("192.168.0.0/16").unwrap();
    matcher.insert("2001:db8::/32").unwrap();

    let bytes = matcher.dump();
    let loaded = CidrMatcher::load(&bytes, None).unwrap();

    for (addr, expected) in [
        ("10.1.2.3", true),
        ("192.168.5.5", true),
        ("2001:db8::1", true),
        ("8.8.8.8", false),
        ("2001:db9::1", false),
    ] {
        assert_eq!(loaded.contains(addr).unwrap(), expected, "mismatch for {addr}");
    }
}

#[test]
fn idempotent_insert_and_noop_remove() {
    let matcher = CidrMatcher::new();
    matcher.insert("192.168.1.0/24").unwrap();
    matcher.insert("192.168.1.0/24").unwrap();
    assert!(matcher.contains("192.168.1.5").unwrap());

    matcher.remove("10.0.0.0/8").unwrap();
    assert!(matcher.contains("192.168.1.5").unwrap());
}

#[test]
fn invalid_cidr_text_is_rejected() {
    let matcher = CidrMatcher::new();
    assert!(matcher.insert("not-a-cidr").is_err());
    assert!(matcher.insert("10.0.0.0/99").is_err());
}
