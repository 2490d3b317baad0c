use std::collections::HashSet;

use crate::api::models::{ChatAnalysisRequest, MediaUploadRequest};
use crate::error::{ApiError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

fn validate_customer_id(customer_id: i64) -> Result<()> {
    if customer_id <= 0 {
        return Err(ApiError::validation(
            "customerId",
            format!("must be a positive number, got {}", customer_id),
        ));
    }
    Ok(())
}

fn require_non_blank(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ApiError::validation(field, "must not be blank"));
    }
    Ok(())
}

// Session ids and file names each become one URL path segment.
fn validate_path_segment(field: &str, value: &str) -> Result<()> {
    require_non_blank(field, value)?;
    if value.contains('/') || value.contains('\\') {
        return Err(ApiError::validation(field, "must not contain path separators"));
    }
    if value == "." || value == ".." {
        return Err(ApiError::validation(field, "must not be a relative path"));
    }
    Ok(())
}

impl Validate for MediaUploadRequest {
    fn validate(&self) -> Result<()> {
        validate_customer_id(self.customer_id)?;
        validate_path_segment("sessionId", &self.session_id)?;

        for (index, media) in self.medias.iter().enumerate() {
            require_non_blank(&format!("medias[{}].type", index), &media.media_type)?;
            require_non_blank(&format!("medias[{}].requestId", index), &media.request_id)?;
            validate_path_segment(&format!("medias[{}].fileName", index), &media.file_name)?;
        }

        let mut seen = HashSet::new();
        for media in &self.medias {
            if !seen.insert(media.request_id.as_str()) {
                tracing::warn!(
                    request_id = %media.request_id,
                    session_id = %self.session_id,
                    "Duplicate requestId in upload batch"
                );
            }
        }

        Ok(())
    }
}

impl Validate for ChatAnalysisRequest {
    fn validate(&self) -> Result<()> {
        validate_customer_id(self.customer_id)?;
        validate_path_segment("sessionId", &self.session_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{ChatMediaItem, MediaUploadItem};

    fn upload(customer_id: i64, session_id: &str, file_name: &str) -> MediaUploadRequest {
        MediaUploadRequest {
            session_id: session_id.to_string(),
            customer_id,
            medias: vec![MediaUploadItem {
                media_type: "image".to_string(),
                file_name: file_name.to_string(),
                request_id: "1".to_string(),
                description: "x".to_string(),
            }],
        }
    }

    fn invalid_field(result: Result<()>) -> String {
        match result {
            Err(ApiError::Validation { field, .. }) => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_upload() {
        assert!(upload(42, "s1", "a.png").validate().is_ok());
    }

    #[test]
    fn test_empty_batch_is_valid() {
        let mut request = upload(42, "s1", "a.png");
        request.medias.clear();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_malformed_customer_id() {
        assert_eq!(invalid_field(upload(0, "s1", "a.png").validate()), "customerId");
        assert_eq!(invalid_field(upload(-5, "s1", "a.png").validate()), "customerId");
    }

    #[test]
    fn test_bad_session_id() {
        for session_id in ["", "  ", "a/b", "a\\b", ".", ".."] {
            assert_eq!(
                invalid_field(upload(42, session_id, "a.png").validate()),
                "sessionId",
                "session id {:?}",
                session_id
            );
        }

        let request = ChatAnalysisRequest {
            session_id: "..".to_string(),
            customer_id: 42,
            message: String::new(),
            medias: vec![],
        };
        assert_eq!(invalid_field(request.validate()), "sessionId");
    }

    #[test]
    fn test_bad_file_names() {
        for name in ["", "../etc/passwd", "dir/a.png", "dir\\a.png", ".."] {
            assert_eq!(
                invalid_field(upload(42, "s1", name).validate()),
                "medias[0].fileName",
                "file name {:?}",
                name
            );
        }
    }

    #[test]
    fn test_missing_request_id() {
        let mut request = upload(42, "s1", "a.png");
        request.medias[0].request_id = String::new();
        assert_eq!(invalid_field(request.validate()), "medias[0].requestId");
    }

    #[test]
    fn test_missing_media_type() {
        let mut request = upload(42, "s1", "a.png");
        request.medias[0].media_type = " ".to_string();
        assert_eq!(invalid_field(request.validate()), "medias[0].type");
    }

    #[test]
    fn test_duplicate_request_ids_are_accepted() {
        let mut request = upload(42, "s1", "a.png");
        let mut second = request.medias[0].clone();
        second.file_name = "b.png".to_string();
        request.medias.push(second);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_analysis_request_ignores_content() {
        let request = ChatAnalysisRequest {
            session_id: "s1".to_string(),
            customer_id: 42,
            message: String::new(),
            medias: vec![ChatMediaItem {
                media_type: String::new(),
                url: String::new(),
                description: String::new(),
            }],
        };
        assert!(request.validate().is_ok());

        let request = ChatAnalysisRequest {
            customer_id: 0,
            ..request
        };
        assert_eq!(invalid_field(request.validate()), "customerId");
    }
}
