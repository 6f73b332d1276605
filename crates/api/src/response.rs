//! Success response envelope.
//!
//! Every JSON success body carries `success`, `message` and optionally
//! `data`; error bodies mirror the shape with `error` instead of `data`.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Envelope with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Envelope without a payload, for acknowledgements.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_with_data() {
        let body = serde_json::to_value(ApiResponse::ok("Berhasil", vec![1, 2])).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Berhasil");
        assert_eq!(body["data"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_envelope_without_data_omits_field() {
        let body = serde_json::to_value(ApiResponse::message("Berhasil")).unwrap();
        assert!(body.get("data").is_none());
    }
}
