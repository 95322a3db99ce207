//! HTTP response assertions.

use axum_test::TestResponse;
use serde_json::Value;

/// Asserts that the response has the expected status code.
pub fn assert_status(response: &TestResponse, expected: u16) {
    let actual = response.status_code().as_u16();
    assert_eq!(
        actual, expected,
        "Expected status {}, got {}",
        expected, actual
    );
}

/// Asserts that the response is a gateway error of the given kind and
/// returns its message.
pub fn assert_error_kind(response: &TestResponse, kind: &str) -> String {
    let body: Value = response.json();
    assert_eq!(
        body["error"]["kind"], kind,
        "Unexpected error body: {}",
        body
    );
    body["error"]["message"]
        .as_str()
        .expect("error message is a string")
        .to_string()
}
