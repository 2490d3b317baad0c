use chrono::Utc;
use serde::{Deserialize, Serialize};

pub const SUCCESS_ERROR_CODE: &str = "0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Success,
    Failure,
}

/// Common response wrapper shared by both chat endpoints.
///
/// The payload is flattened next to the envelope fields, so an upload response
/// reads `{status, errorCode, message, timestamp, uploadedMedia}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<P> {
    pub status: Status,
    pub error_code: String,
    pub message: String,
    /// Epoch milliseconds at handling time.
    pub timestamp: i64,
    #[serde(flatten)]
    pub payload: P,
}

impl<P> Envelope<P> {
    pub fn success(payload: P) -> Self {
        Self {
            status: Status::Success,
            error_code: SUCCESS_ERROR_CODE.to_string(),
            message: String::new(),
            timestamp: Utc::now().timestamp_millis(),
            payload,
        }
    }

    pub fn failure(error_code: &str, message: String, payload: P) -> Self {
        Self {
            status: Status::Failure,
            error_code: error_code.to_string(),
            message,
            timestamp: Utc::now().timestamp_millis(),
            payload,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == Status::Success
    }
}

/// Payload of failure envelopes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NoPayload {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadItem {
    #[serde(rename = "type")]
    pub media_type: String,
    pub file_name: String,
    pub request_id: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaUploadRequest {
    pub session_id: String,
    pub customer_id: i64,
    pub medias: Vec<MediaUploadItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMediaItem {
    #[serde(rename = "type")]
    pub media_type: String,
    pub request_id: String,
    pub url: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedMediaPayload {
    pub uploaded_media: Vec<UploadedMediaItem>,
}

pub type MediaUploadResponse = Envelope<UploadedMediaPayload>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMediaItem {
    #[serde(rename = "type")]
    pub media_type: String,
    pub url: String,
    pub description: String,
}

impl From<&UploadedMediaItem> for ChatMediaItem {
    fn from(item: &UploadedMediaItem) -> Self {
        Self {
            media_type: item.media_type.clone(),
            url: item.url.clone(),
            description: item.description.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnalysisRequest {
    pub session_id: String,
    pub customer_id: i64,
    pub message: String,
    pub medias: Vec<ChatMediaItem>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedFollowUp {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatAnalysisBody {
    pub message: String,
    pub medias: Vec<ChatMediaItem>,
    pub suggested_follow_ups: Vec<SuggestedFollowUp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisPayload {
    #[serde(default)]
    pub body: Option<ChatAnalysisBody>,
}

pub type ChatAnalysisResponse = Envelope<AnalysisPayload>;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
