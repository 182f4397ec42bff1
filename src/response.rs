//! Uniform response envelope: `{"statusCode", "message", "data"?}`.

use serde::Serialize;

use crate::query::QueryError;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub status_code: u16,
    pub message: String,
    /// Omitted from the JSON when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            status_code,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok(data: T) -> Self {
        Self::new(200, "OK").with_data(data)
    }

    pub fn with_data(mut self, data: T) -> Self {
        self.data = Some(data);
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status_code)
    }
}

impl ApiResponse<()> {
    /// A 400 envelope carrying the validation message.
    pub fn from_error(err: &QueryError) -> Self {
        Self::new(400, err.to_string())
    }
}
