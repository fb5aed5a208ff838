use std::path::PathBuf;
use std::time::Duration;

use webcompat_mover::tracker::parse_bug_response;
use webcompat_mover::{
    find_missing_required, ConfigError, FetchError, MoverConfig, RecordStatus, RequiredFieldSpec,
};

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn fixture(name: &str) -> String {
    std::fs::read_to_string(fixtures_root().join(name)).unwrap()
}

#[test]
fn parse_open_bug_fixture() {
    let record = parse_bug_response(&fixture("bug_open.json"), "1680000").unwrap();

    assert_eq!(record.id, "1680000");
    assert_eq!(record.url.as_deref(), Some("https://example.com/checkout"));
    assert_eq!(record.op_sys.as_deref(), Some("Android"));
    assert_eq!(record.platform.as_deref(), Some("ARM"));
    assert_eq!(record.version.as_deref(), Some("Firefox 84"));
    assert_eq!(record.status, RecordStatus::Unconfirmed);
    assert_eq!(record.comments.len(), 2);
    assert!(record.comments[0].text.starts_with("1. Open the checkout page"));
}

#[test]
fn unspecified_fixture_reports_missing_fields_in_order() {
    let record = parse_bug_response(&fixture("bug_unspecified.json"), "1").unwrap();
    let missing = find_missing_required(&record, &RequiredFieldSpec::default());

    assert_eq!(
        missing.descriptions(),
        [
            "OS (Categories > Platform > OS)",
            "Browser version (Categories > Version)"
        ]
    );
}

#[test]
fn empty_bug_list_is_not_found() {
    let result = parse_bug_response(&fixture("bug_empty.json"), "1");
    assert!(matches!(result, Err(FetchError::NotFound { .. })));
}

#[test]
fn malformed_body_is_a_decode_error() {
    let result = parse_bug_response("<html>Bugzilla is down</html>", "1");
    assert!(matches!(result, Err(FetchError::Decode(_))));
}

#[test]
fn load_config_fixture() {
    let config = MoverConfig::load(&fixtures_root().join("config.toml")).unwrap();

    assert_eq!(
        config.tracker_origin().as_str(),
        "https://bugzilla-dev.allizom.org/"
    );
    assert_eq!(
        config.intake_endpoint().as_str(),
        "https://staging.webcompat.com/issues/new"
    );
    assert_eq!(
        config.product_details_endpoint().as_str(),
        "https://product-details.mozilla.org/1.0/"
    );
    assert_eq!(config.fallback_message_format(), "See {{bug_url}} (bug {{bug_id}})");
    assert_eq!(config.timeout(), Duration::from_secs(10));
}

#[test]
fn load_config_rejects_bad_toml() {
    let result = MoverConfig::from_toml_str("tracker-origin = ", "inline");
    assert!(matches!(result, Err(ConfigError::TomlError { .. })));
}
