mod common;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::{fixture_types, DENY_REQUEST, STORE_USER_REQUEST};
use pretty_assertions::assert_eq;
use routemap::errors::InspectError;
use routemap::inspect::RequestInspector;
use routemap::rules::NormalizedRule;

#[test]
fn inspect_extracts_the_full_contract() {
    let types = fixture_types();
    let contract = RequestInspector::new(&types)
        .inspect(STORE_USER_REQUEST)
        .expect("request class exists");

    assert_eq!(contract.class, STORE_USER_REQUEST);
    assert_eq!(
        contract.file_path.as_deref().and_then(|p| p.to_str()),
        Some("app/Http/Requests/StoreUserRequest.php")
    );

    assert_eq!(contract.rules.len(), 3);
    assert_eq!(
        contract.rules["name"],
        vec![
            NormalizedRule::bare("required"),
            NormalizedRule::bare("string"),
            NormalizedRule::with_parameters("max", ["255"]),
        ]
    );
    assert_eq!(
        contract.rules["email"],
        vec![
            NormalizedRule::bare("required"),
            NormalizedRule::bare("email"),
            NormalizedRule::with_parameters("unique", ["users", "email"]),
        ]
    );
    assert_eq!(
        contract.rules["role"],
        vec![NormalizedRule::with_parameters(
            "in",
            ["admin", "editor", "viewer"]
        )]
    );

    assert_eq!(
        contract.messages.get("email.unique").map(String::as_str),
        Some("That email address is already taken.")
    );
    assert_eq!(
        contract.attributes.get("email").map(String::as_str),
        Some("email address")
    );

    assert!(contract.authorization.has_authorize);
    assert_eq!(contract.authorization.authorized, Some(true));
    assert_eq!(contract.authorization.error, None);
}

#[test]
fn missing_authorize_defaults_to_open() {
    let types = fixture_types();
    let contract = RequestInspector::new(&types)
        .inspect("App\\Models\\User")
        .expect("class exists");

    assert!(!contract.authorization.has_authorize);
    assert_eq!(contract.authorization.authorized, Some(true));
}

#[test]
fn failing_authorize_is_a_descriptive_fact_not_an_error() {
    let types = fixture_types();
    let contract = RequestInspector::new(&types)
        .inspect(DENY_REQUEST)
        .expect("inspection still succeeds");

    assert!(contract.authorization.has_authorize);
    assert_eq!(contract.authorization.authorized, None);
    assert_eq!(
        contract.authorization.error.as_deref(),
        Some("This action requires an authenticated admin.")
    );
}

#[test]
fn unknown_class_is_not_found() {
    let types = fixture_types();
    let err = RequestInspector::new(&types)
        .inspect("App\\Http\\Requests\\MissingRequest")
        .expect_err("unknown class");

    assert_eq!(
        err,
        InspectError::RequestClassNotFound("App\\Http\\Requests\\MissingRequest".to_string())
    );
    assert_eq!(
        err.to_string(),
        "Request class 'App\\Http\\Requests\\MissingRequest' does not exist."
    );
}

#[test]
fn slash_separated_identifier_normalizes() {
    let types = fixture_types();
    let contract = RequestInspector::new(&types)
        .inspect("App/Http/Requests/StoreUserRequest")
        .expect("slash form resolves");
    assert_eq!(contract.class, STORE_USER_REQUEST);
}

#[test]
fn base64_identifier_is_preferred_when_it_resolves() {
    let types = fixture_types();
    let encoded = BASE64.encode(STORE_USER_REQUEST);

    let contract = RequestInspector::new(&types)
        .inspect(&encoded)
        .expect("encoded form resolves");
    assert_eq!(contract.class, STORE_USER_REQUEST);

    // Decodable input that names no class falls back to the literal form.
    let err = RequestInspector::new(&types)
        .inspect("bm90L2EvY2xhc3M=")
        .expect_err("literal interpretation misses");
    assert!(matches!(err, InspectError::RequestClassNotFound(_)));
}
