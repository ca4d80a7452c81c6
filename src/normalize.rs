use axum::http::StatusCode;
use serde_json::Value;

use crate::types::ProxyResponse;

/// Field the try-on backend puts its generated images under.
pub const IMAGES_FIELD: &str = "viton_images";

#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamResponse {
    Success {
        images: Vec<String>,
        message: Option<String>,
    },
    Failure {
        message: Option<String>,
    },
}

impl UpstreamResponse {
    /// Classifies a parsed body purely by its shape. Any status the body
    /// itself reports is ignored.
    pub fn from_body(body: Option<&Value>) -> Self {
        let Some(object) = body.and_then(Value::as_object) else {
            return UpstreamResponse::Failure { message: None };
        };

        let message = object
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned);

        let images = object
            .get(IMAGES_FIELD)
            .and_then(Value::as_array)
            .and_then(|items| {
                items
                    .iter()
                    .map(|item| item.as_str().map(str::to_owned))
                    .collect::<Option<Vec<_>>>()
            });

        match images {
            Some(images) => UpstreamResponse::Success { images, message },
            None => UpstreamResponse::Failure { message },
        }
    }
}

pub fn upstream_error_message(status: u16) -> String {
    format!("업스트림 오류 ({status})")
}

/// Collapses an upstream status and body into the proxy envelope.
pub fn normalize(status: u16, body: Option<&Value>) -> (StatusCode, ProxyResponse) {
    let upstream_ok = (200..300).contains(&status);

    match UpstreamResponse::from_body(body) {
        UpstreamResponse::Success { images, message } if upstream_ok => (
            StatusCode::OK,
            ProxyResponse {
                images,
                message: message.unwrap_or_default(),
            },
        ),
        UpstreamResponse::Success { message, .. } | UpstreamResponse::Failure { message } => {
            let message = message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| upstream_error_message(status));
            (mirrored_status(status), ProxyResponse::failure(message))
        }
    }
}

fn mirrored_status(status: u16) -> StatusCode {
    match status {
        0 => StatusCode::INTERNAL_SERVER_ERROR,
        code => StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_passes_images_through() {
        let body = json!({ "viton_images": ["a", "b"] });
        let (status, envelope) = normalize(200, Some(&body));
        assert_eq!(status, StatusCode::OK);
        assert_eq!(envelope.images, vec!["a", "b"]);
        assert_eq!(envelope.message, "");
    }

    #[test]
    fn success_keeps_upstream_message() {
        let body = json!({ "viton_images": ["a"], "message": "done" });
        let (_, envelope) = normalize(201, Some(&body));
        assert_eq!(envelope.message, "done");
    }

    #[test]
    fn failure_status_is_mirrored_with_upstream_message() {
        let body = json!({ "message": "overloaded" });
        let (status, envelope) = normalize(503, Some(&body));
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(envelope, ProxyResponse::failure("overloaded"));
    }

    #[test]
    fn success_shape_with_error_status_is_a_failure() {
        let body = json!({ "viton_images": ["a"], "message": "partial" });
        let (status, envelope) = normalize(502, Some(&body));
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(envelope.images.is_empty());
        assert_eq!(envelope.message, "partial");
    }

    #[test]
    fn malformed_success_is_a_failure_with_generic_message() {
        let body = json!({ "viton_images": "not-an-array" });
        let (status, envelope) = normalize(200, Some(&body));
        assert_eq!(status, StatusCode::OK);
        assert!(envelope.images.is_empty());
        assert_eq!(envelope.message, "업스트림 오류 (200)");
    }

    #[test]
    fn mixed_array_is_not_success_shaped() {
        let body = json!({ "viton_images": ["a", 1] });
        assert_eq!(
            UpstreamResponse::from_body(Some(&body)),
            UpstreamResponse::Failure { message: None }
        );
    }

    #[test]
    fn non_json_body_uses_generic_message() {
        let (status, envelope) = normalize(500, None);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(envelope.message, "업스트림 오류 (500)");
    }

    #[test]
    fn empty_or_non_string_message_is_replaced() {
        let (_, envelope) = normalize(400, Some(&json!({ "message": "" })));
        assert_eq!(envelope.message, "업스트림 오류 (400)");

        let (_, envelope) = normalize(400, Some(&json!({ "message": 42 })));
        assert_eq!(envelope.message, "업스트림 오류 (400)");
    }

    #[test]
    fn zero_status_maps_to_internal_error() {
        let (status, _) = normalize(0, None);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn body_status_field_is_not_trusted() {
        let body = json!({ "status": "ok", "images": ["a"] });
        let (_, envelope) = normalize(200, Some(&body));
        assert!(envelope.images.is_empty());
    }

    #[test]
    fn normalize_is_deterministic() {
        let body = json!({ "viton_images": ["x"], "message": "m" });
        assert_eq!(normalize(200, Some(&body)), normalize(200, Some(&body)));
        let body = json!({ "detail": "boom" });
        assert_eq!(normalize(422, Some(&body)), normalize(422, Some(&body)));
    }
}
