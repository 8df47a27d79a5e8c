// ABOUTME: The JSON envelope a web front end returns for an extraction request.
// ABOUTME: Success carries the ExtractionResult as data; failure carries the user-facing message.

use serde::{Deserialize, Serialize};

use crate::error::ExtractError;
use crate::result::ExtractionResult;

/// `{ success, data }` or `{ success, message }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub data: Option<ExtractionResult>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub message: Option<String>,
    /// HTTP status for the envelope; not part of the body.
    #[serde(skip)]
    pub status: u16,
}

impl ApiResponse {
    pub fn ok(result: ExtractionResult) -> Self {
        Self {
            success: true,
            data: Some(result),
            message: None,
            status: 200,
        }
    }

    pub fn error(err: &ExtractError) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(err.user_message().to_string()),
            status: err.code.http_status(),
        }
    }
}

impl From<Result<ExtractionResult, ExtractError>> for ApiResponse {
    fn from(res: Result<ExtractionResult, ExtractError>) -> Self {
        match res {
            Ok(result) => ApiResponse::ok(result),
            Err(err) => ApiResponse::error(&err),
        }
    }
}
