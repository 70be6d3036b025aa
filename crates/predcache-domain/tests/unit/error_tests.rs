//! Tests for the domain error type

use predcache_domain::Error;

#[test]
fn test_error_display() {
    let err = Error::timeout("GET", 250);
    assert_eq!(
        err.to_string(),
        "Timeout: GET did not complete within 250ms"
    );

    let err = Error::invalid_argument("bad glob");
    assert_eq!(err.to_string(), "Invalid argument: bad glob");
}

#[test]
fn test_network_error_keeps_source() {
    let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
    let err = Error::network_with_source("Redis GET failed", io);
    assert_eq!(err.to_string(), "Network error: Redis GET failed");
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err, Error::Json { .. }));
}
