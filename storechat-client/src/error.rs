//! Internal error helpers for mapping HTTP/reqwest errors to [`ChatError`].

use std::time::Duration;

use storechat_types::ChatError;

/// Map a non-success status and its body to [`ChatError::TransportRejected`].
pub(crate) fn map_http_status(status: reqwest::StatusCode, body: &str) -> ChatError {
    ChatError::TransportRejected {
        status: status.as_u16(),
        message: rejection_message(status, body),
    }
}

/// Human-readable message for a rejected request.
///
/// Prefers a string `error` field, then `error.message`, then `Error: <status>`.
pub(crate) fn rejection_message(status: reqwest::StatusCode, body: &str) -> String {
    let parsed: serde_json::Value = serde_json::from_str(body).unwrap_or_default();
    let error = &parsed["error"];
    let message = error
        .as_str()
        .or_else(|| error["message"].as_str())
        .filter(|m| !m.trim().is_empty());
    match message {
        Some(m) => m.to_string(),
        None => format!("Error: {}", status.as_u16()),
    }
}

/// Map a [`reqwest::Error`] raised while sending to a [`ChatError`].
pub(crate) fn map_reqwest_error(err: reqwest::Error, timeout: Option<Duration>) -> ChatError {
    if err.is_timeout() {
        ChatError::Timeout(timeout.unwrap_or(Duration::from_secs(30)))
    } else {
        ChatError::Network(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;

    #[test]
    fn string_error_field_is_used() {
        let err = map_http_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            r#"{"error":"rate limited"}"#,
        );
        assert!(matches!(
            err,
            ChatError::TransportRejected { status: 500, ref message } if message == "rate limited"
        ));
    }

    #[test]
    fn nested_error_message_is_used() {
        let msg = rejection_message(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"type":"rate_limit_error","message":"Too many requests"}}"#,
        );
        assert_eq!(msg, "Too many requests");
    }

    #[test]
    fn non_json_body_falls_back_to_status() {
        let msg = rejection_message(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert_eq!(msg, "Error: 502");
    }

    #[test]
    fn empty_body_falls_back_to_status() {
        assert_eq!(rejection_message(StatusCode::UNAUTHORIZED, ""), "Error: 401");
    }

    #[test]
    fn empty_error_string_falls_back_to_status() {
        let msg = rejection_message(StatusCode::PAYMENT_REQUIRED, r#"{"error":""}"#);
        assert_eq!(msg, "Error: 402");
    }

    #[test]
    fn non_string_error_falls_back_to_status() {
        let msg = rejection_message(StatusCode::BAD_REQUEST, r#"{"error":true}"#);
        assert_eq!(msg, "Error: 400");
    }

    #[test]
    fn server_errors_are_retryable() {
        assert!(map_http_status(StatusCode::SERVICE_UNAVAILABLE, "").is_retryable());
        assert!(!map_http_status(StatusCode::FORBIDDEN, "").is_retryable());
    }
}
