//! API models for the task-enqueue endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn default_upload_id() -> i64 {
    123
}

/// Payload for the OCR test dispatch. The upload identifier defaults to 123
/// so an empty JSON object `{}` is a valid request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OcrTestRequest {
    #[serde(default = "default_upload_id")]
    pub upload_id: i64,
}

impl Default for OcrTestRequest {
    fn default() -> Self {
        Self {
            upload_id: default_upload_id(),
        }
    }
}

/// Result of a dispatch attempt. `queued` is false when the task queue was
/// not available at process start; that is a degraded response, not an error.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OcrTestResponse {
    pub queued: bool,
    /// Tracking identifier assigned by the queue
    #[schema(value_type = Option<String>)]
    pub task_id: Option<serde_json::Value>,
}
