//! Typed HTTP client for the chat endpoints.
//!
//! Performs the same two-step flow a browser widget does: register media to
//! obtain their URLs, then ask for an analysis referencing those URLs.

use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::api::models::{
    ChatAnalysisBody, ChatAnalysisRequest, ChatAnalysisResponse, ChatMediaItem, Envelope,
    MediaUploadItem, MediaUploadRequest, MediaUploadResponse, NoPayload, UploadedMediaItem,
};
use crate::api::{CHAT_PATH, UPLOAD_PATH};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request rejected with {status} ({error_code}): {message}")]
    Rejected {
        status: StatusCode,
        error_code: String,
        message: String,
    },

    #[error("Unexpected response status {0}")]
    UnexpectedStatus(StatusCode),

    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Result of a full upload-then-analyze exchange.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub uploaded_media: Vec<UploadedMediaItem>,
    pub analysis: Option<ChatAnalysisBody>,
}

#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ChatClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Builds an image upload descriptor with a fresh random request id.
    pub fn image_item(file_name: impl Into<String>, description: impl Into<String>) -> MediaUploadItem {
        MediaUploadItem {
            media_type: "image".to_string(),
            file_name: file_name.into(),
            request_id: Uuid::new_v4().to_string(),
            description: description.into(),
        }
    }

    async fn post<Req, P>(&self, path: &str, body: &Req) -> Result<Envelope<P>, ClientError>
    where
        Req: Serialize + ?Sized,
        P: DeserializeOwned,
    {
        let mut request = self
            .http
            .post(format!("{}{}", self.base_url, path))
            .json(body);

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            return match serde_json::from_slice::<Envelope<NoPayload>>(&bytes) {
                Ok(envelope) => Err(ClientError::Rejected {
                    status,
                    error_code: envelope.error_code,
                    message: envelope.message,
                }),
                Err(_) => Err(ClientError::UnexpectedStatus(status)),
            };
        }

        Ok(serde_json::from_slice(&bytes)?)
    }

    pub async fn upload_media(
        &self,
        request: &MediaUploadRequest,
    ) -> Result<MediaUploadResponse, ClientError> {
        tracing::debug!(count = request.medias.len(), "Uploading media batch");
        self.post(UPLOAD_PATH, request).await
    }

    pub async fn analyze(
        &self,
        request: &ChatAnalysisRequest,
    ) -> Result<ChatAnalysisResponse, ClientError> {
        self.post(CHAT_PATH, request).await
    }

    /// Uploads the given file names as images, then asks for an analysis of them.
    pub async fn upload_and_analyze(
        &self,
        session_id: &str,
        customer_id: i64,
        file_names: &[&str],
        message: &str,
    ) -> Result<Conversation, ClientError> {
        let upload = MediaUploadRequest {
            session_id: session_id.to_string(),
            customer_id,
            medias: file_names
                .iter()
                .map(|name| Self::image_item(*name, "Portfolio screenshot"))
                .collect(),
        };

        let uploaded_media = self.upload_media(&upload).await?.payload.uploaded_media;

        let analysis_request = ChatAnalysisRequest {
            session_id: session_id.to_string(),
            customer_id,
            message: message.to_string(),
            medias: uploaded_media.iter().map(ChatMediaItem::from).collect(),
        };

        let analysis = self.analyze(&analysis_request).await?.payload.body;

        Ok(Conversation {
            uploaded_media,
            analysis,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_items_get_unique_request_ids() {
        let a = ChatClient::image_item("a.png", "d");
        let b = ChatClient::image_item("a.png", "d");

        assert_eq!(a.media_type, "image");
        assert_eq!(a.file_name, "a.png");
        assert!(!a.request_id.is_empty());
        assert_ne!(a.request_id, b.request_id);
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let client = ChatClient::new("http://localhost:3000/").with_token("t");
        assert_eq!(client.base_url, "http://localhost:3000");
        assert_eq!(client.token.as_deref(), Some("t"));
    }

    #[test]
    fn test_uploaded_item_to_chat_media() {
        let uploaded = UploadedMediaItem {
            media_type: "image".to_string(),
            request_id: "1".to_string(),
            url: "https://example.com/a.png".to_string(),
            description: "Portfolio image uploaded".to_string(),
        };

        let media = ChatMediaItem::from(&uploaded);
        assert_eq!(media.url, uploaded.url);
        assert_eq!(media.description, uploaded.description);
    }
}
