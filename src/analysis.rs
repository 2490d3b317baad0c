use async_trait::async_trait;

use crate::api::models::{ChatAnalysisBody, ChatAnalysisRequest, ChatMediaItem, SuggestedFollowUp};
use crate::error::Result;
use crate::storage::MediaStorage;

pub const ANALYSIS_MESSAGE: &str = "Analyze portfolio";
pub const ANALYSIS_RESULT_FILE: &str = "analysis_result.jpg";
pub const ANALYSIS_MEDIA_DESCRIPTION: &str = "portfolio";
pub const FOLLOW_UPS: [&str; 2] = [
    "Would you like me to focus on a specific aspect of the image, such as fund performance or diversification?",
    "What would you like to do next?",
];

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, request: &ChatAnalysisRequest) -> Result<ChatAnalysisBody>;
}

/// Answers every chat with the same portfolio analysis. Only the customer and
/// session select where the result image lives; message and medias are ignored.
pub struct CannedAnalyzer {
    storage: MediaStorage,
}

impl CannedAnalyzer {
    pub fn new(storage: MediaStorage) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl Analyzer for CannedAnalyzer {
    async fn analyze(&self, request: &ChatAnalysisRequest) -> Result<ChatAnalysisBody> {
        let result_url = self.storage.media_url(
            request.customer_id,
            &request.session_id,
            ANALYSIS_RESULT_FILE,
        );

        Ok(ChatAnalysisBody {
            message: ANALYSIS_MESSAGE.to_string(),
            medias: vec![ChatMediaItem {
                media_type: "image".to_string(),
                url: result_url,
                description: ANALYSIS_MEDIA_DESCRIPTION.to_string(),
            }],
            suggested_follow_ups: FOLLOW_UPS
                .iter()
                .map(|content| SuggestedFollowUp {
                    content: content.to_string(),
                })
                .collect(),
        })
    }
}
