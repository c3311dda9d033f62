use axum::http::StatusCode;
use axum_test::TestResponse;

use crate::error::ErrorResponse;

#[track_caller]
pub(crate) fn assert_error_response(
    response: &TestResponse,
    status_code: StatusCode,
    message_part: &str,
) {
    response.assert_status(status_code);

    let body: ErrorResponse = response.json();
    assert_eq!(body.status_code, status_code.as_u16());
    assert!(
        body.message.contains(message_part),
        "want error message containing \"{message_part}\", got \"{}\"",
        body.message
    );
}
