// Media location templating. Nothing is written anywhere: uploads only resolve
// to the URL the object would live at.
use crate::api::models::{MediaUploadRequest, UploadedMediaItem};
use crate::config::StorageConfig;

pub const UPLOADED_MEDIA_DESCRIPTION: &str = "Portfolio image uploaded";

#[derive(Debug, Clone)]
pub struct MediaStorage {
    base_url: String,
    prefix: String,
}

impl MediaStorage {
    pub fn new(base_url: impl Into<String>, prefix: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let prefix = prefix.into();

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            prefix: prefix.trim_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &StorageConfig) -> Self {
        Self::new(&config.base_url, &config.prefix)
    }

    // Session and file name are caller-supplied, so each is percent-encoded as a
    // single segment.
    fn get_full_key(&self, customer_id: i64, session_id: &str, file_name: &str) -> String {
        let session_id = urlencoding::encode(session_id);
        let file_name = urlencoding::encode(file_name);

        if self.prefix.is_empty() {
            format!("{}/{}/{}", customer_id, session_id, file_name)
        } else {
            format!(
                "{}/{}/{}/{}",
                self.prefix, customer_id, session_id, file_name
            )
        }
    }

    /// URL an object with this name would have for the given customer session.
    pub fn media_url(&self, customer_id: i64, session_id: &str, file_name: &str) -> String {
        format!(
            "{}/{}",
            self.base_url,
            self.get_full_key(customer_id, session_id, file_name)
        )
    }

    /// Resolves every item of the batch, keeping input order and request ids.
    pub fn register(&self, request: &MediaUploadRequest) -> Vec<UploadedMediaItem> {
        request
            .medias
            .iter()
            .map(|media| UploadedMediaItem {
                media_type: media.media_type.clone(),
                request_id: media.request_id.clone(),
                url: self.media_url(request.customer_id, &request.session_id, &media.file_name),
                description: UPLOADED_MEDIA_DESCRIPTION.to_string(),
            })
            .collect()
    }
}

impl Default for MediaStorage {
    fn default() -> Self {
        Self::from_config(&StorageConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::MediaUploadItem;

    fn item(file_name: &str, request_id: &str) -> MediaUploadItem {
        MediaUploadItem {
            media_type: "image".to_string(),
            file_name: file_name.to_string(),
            request_id: request_id.to_string(),
            description: "x".to_string(),
        }
    }

    #[test]
    fn test_default_url_template() {
        let storage = MediaStorage::default();
        assert_eq!(
            storage.media_url(42, "s1", "a.png"),
            "https://arth-s3-storage-prod.s3.amazonaws.com/images/42/s1/a.png"
        );
    }

    #[test]
    fn test_url_is_deterministic() {
        let storage = MediaStorage::default();
        assert_eq!(
            storage.media_url(7, "session", "photo.jpg"),
            storage.media_url(7, "session", "photo.jpg")
        );
        assert_ne!(
            storage.media_url(7, "session", "photo.jpg"),
            storage.media_url(7, "session", "other.jpg")
        );
    }

    #[test]
    fn test_slashes_are_normalized() {
        let storage = MediaStorage::new("https://cdn.example.com/", "/media/");
        assert_eq!(
            storage.media_url(1, "s", "f.png"),
            "https://cdn.example.com/media/1/s/f.png"
        );

        let storage = MediaStorage::new("https://cdn.example.com", "");
        assert_eq!(
            storage.media_url(1, "s", "f.png"),
            "https://cdn.example.com/1/s/f.png"
        );
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        let storage = MediaStorage::default();

        assert_eq!(
            storage.media_url(42, "my session", "photo 1.png"),
            "https://arth-s3-storage-prod.s3.amazonaws.com/images/42/my%20session/photo%201.png"
        );
        assert_eq!(
            storage.media_url(42, "s1", "a.png?1"),
            "https://arth-s3-storage-prod.s3.amazonaws.com/images/42/s1/a.png%3F1"
        );
        assert_ne!(
            storage.media_url(42, "s1", "a.png?1"),
            storage.media_url(42, "s1", "a.png?2")
        );
        assert!(storage.media_url(42, "s#1", "b.png").ends_with("/42/s%231/b.png"));
    }

    #[test]
    fn test_register_preserves_order_and_request_ids() {
        let storage = MediaStorage::default();
        let request = MediaUploadRequest {
            session_id: "s1".to_string(),
            customer_id: 42,
            medias: vec![item("c.png", "3"), item("a.png", "1"), item("b.png", "2")],
        };

        let uploaded = storage.register(&request);
        assert_eq!(uploaded.len(), 3);

        let ids: Vec<&str> = uploaded.iter().map(|m| m.request_id.as_str()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
        assert!(uploaded[0].url.ends_with("/images/42/s1/c.png"));
        assert!(uploaded
            .iter()
            .all(|m| m.description == UPLOADED_MEDIA_DESCRIPTION && m.media_type == "image"));
    }

    #[test]
    fn test_register_empty_batch() {
        let request = MediaUploadRequest {
            session_id: "s1".to_string(),
            customer_id: 42,
            medias: vec![],
        };

        assert!(MediaStorage::default().register(&request).is_empty());
    }
}
