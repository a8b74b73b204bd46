use actix_web::{body::BoxBody, http::StatusCode, HttpRequest, HttpResponse, Responder};
use serde::Serialize;

/// Success envelope shared by every endpoint:
/// `{ statusCode, data, message, success }`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub data: T,
    pub message: String,
    pub success: bool,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(status: StatusCode, data: T, message: impl Into<String>) -> Self {
        Self {
            status_code: status.as_u16(),
            data,
            message: message.into(),
            success: status.as_u16() < 400,
        }
    }

    /// 200 OK
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::OK, data, message)
    }

    /// 201 Created
    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self::new(StatusCode::CREATED, data, message)
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::OK);
        HttpResponse::build(status).json(self)
    }
}

/// Empty `data` payload for toggle-off and delete responses.
pub fn empty() -> serde_json::Value {
    serde_json::json!({})
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_derived_from_status() {
        let ok = ApiResponse::ok(empty(), "fine");
        assert_eq!(ok.status_code, 200);
        assert!(ok.success);

        let created = ApiResponse::created(empty(), "made");
        assert_eq!(created.status_code, 201);
        assert!(created.success);
    }

    #[test]
    fn test_wire_field_names() {
        let body = serde_json::to_value(ApiResponse::ok(empty(), "msg")).unwrap();
        assert!(body.get("statusCode").is_some());
        assert!(body.get("data").is_some());
        assert!(body.get("message").is_some());
        assert_eq!(body["success"], serde_json::json!(true));
    }
}
