use serde::{Deserialize, Serialize};

use crate::ApiError;

/// Envelope used by backends that report success inline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponseWrapper<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl<T> ApiResponseWrapper<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: ApiError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }

    /// Converts the envelope into a `Result`.
    ///
    /// An unsuccessful envelope without an error payload becomes a generic
    /// [`ApiError`].
    pub fn into_result(self) -> Result<Option<T>, ApiError> {
        if self.success {
            return Ok(self.data);
        }
        Err(self
            .error
            .unwrap_or_else(|| ApiError::new("request was not successful")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let wrapper: ApiResponseWrapper<u32> = serde_json::from_value(json!({"success": true, "data": 3})).unwrap();
        assert_eq!(wrapper.into_result().unwrap(), Some(3));
    }

    #[test]
    fn test_failure_envelope_carries_error() {
        let wrapper: ApiResponseWrapper<u32> = serde_json::from_value(json!({
            "success": false,
            "error": {"message": "not allowed", "status": 403}
        }))
        .unwrap();

        let err = wrapper.into_result().unwrap_err();
        assert_eq!(err.status, Some(403));
    }

    #[test]
    fn test_failure_without_error_payload() {
        let wrapper: ApiResponseWrapper<u32> = serde_json::from_value(json!({"success": false})).unwrap();
        assert_eq!(wrapper.into_result().unwrap_err().message, "request was not successful");
    }

    #[test]
    fn test_ok_serializes_without_error_field() {
        let value = serde_json::to_value(ApiResponseWrapper::ok("x")).unwrap();
        assert_eq!(value, json!({"success": true, "data": "x"}));
    }
}
