//! JSON envelope for API and `--format json` output

use crate::error::ShelterError;
use petadopt_core::error::ErrorReport;
use petadopt_core::ErrorCode;
use serde::{Deserialize, Serialize};

/// Outcome class, following the JSend convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStatus {
    Success,
    /// Client error (4xx)
    Fail,
    /// Server error (5xx)
    Error,
}

/// Response body sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub status: ResponseStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Item count for list payloads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: None,
            results: None,
            data: Some(data),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl<T: Serialize> ApiResponse<Vec<T>> {
    /// Success with `results` set to the list length.
    pub fn list(items: Vec<T>) -> Self {
        let count = items.len();
        Self {
            results: Some(count),
            ..Self::success(items)
        }
    }
}

impl ApiResponse<()> {
    /// Success carrying only a message.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            status: ResponseStatus::Success,
            message: Some(message.into()),
            results: None,
            data: None,
        }
    }

    /// Error body plus the HTTP status to send it with.
    pub fn from_error(err: &ShelterError) -> (u16, Self) {
        let status = err.http_status();
        let class = if status >= 500 {
            ResponseStatus::Error
        } else {
            ResponseStatus::Fail
        };
        (
            status,
            Self {
                status: class,
                message: Some(err.to_string()),
                results: None,
                data: None,
            },
        )
    }
}

impl ApiResponse<ErrorReport> {
    /// Error body for a core failure, with the structured report as data.
    ///
    /// Bad input and rejected credentials are client faults; anything else
    /// (config, disk, corrupt data) is a server fault.
    pub fn from_report(report: ErrorReport) -> Self {
        let client_fault = matches!(report.category.as_str(), "Validation" | "Security")
            || matches!(
                report.code,
                ErrorCode::RecordNotFound | ErrorCode::DuplicateRecord
            );
        Self {
            status: if client_fault {
                ResponseStatus::Fail
            } else {
                ResponseStatus::Error
            },
            message: Some(report.message.clone()),
            results: None,
            data: Some(report),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_shape() {
        let body = serde_json::to_value(ApiResponse::list(vec!["a", "b"])).unwrap();
        assert_eq!(body["status"], "success");
        assert_eq!(body["results"], 2);
        assert_eq!(body["data"][1], "b");
        assert!(body.get("message").is_none());
    }

    #[test]
    fn test_error_shape() {
        let (status, body) = ApiResponse::from_error(&ShelterError::not_found("Animal", "42"));
        assert_eq!(status, 404);
        let body = serde_json::to_value(body).unwrap();
        assert_eq!(body["status"], "fail");
        assert_eq!(body["message"], "Animal not found: 42");
        assert!(body.get("data").is_none());

        let (status, body) = ApiResponse::from_error(&ShelterError::Delivery("down".into()));
        assert_eq!(status, 500);
        assert_eq!(body.status, ResponseStatus::Error);
    }

    #[test]
    fn test_message_only() {
        let body = serde_json::to_value(
            ApiResponse::message("Verification code sent"),
        )
        .unwrap();
        assert_eq!(body["message"], "Verification code sent");
        assert!(body.get("data").is_none());
    }

    #[test]
    fn test_report_shape() {
        let corrupt = petadopt_core::Error::new(ErrorCode::CorruptData, "JSON parse error")
            .with_context("Parsing data.json");
        let body = serde_json::to_value(ApiResponse::from_report(corrupt.to_report())).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["message"], "JSON parse error");
        assert_eq!(body["data"]["code_str"], "E4003");
        assert_eq!(body["data"]["context"], "Parsing data.json");

        let bad_input = petadopt_core::Error::validation("max_distance too large");
        let body = ApiResponse::from_report(bad_input.to_report());
        assert_eq!(body.status, ResponseStatus::Fail);
    }
}
