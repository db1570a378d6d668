use crate::review::{
    ReviewError, ReviewProvider, ReviewProviderId, ReviewProviderMetadata, ReviewRequest,
    ReviewResponse,
};
use async_trait::async_trait;
use std::time::Duration;

pub struct MockReviewProvider {
    id: ReviewProviderId,
    name: String,
}

impl MockReviewProvider {
    pub fn new(id: ReviewProviderId) -> Self {
        Self {
            id,
            name: "MockReviewProvider".to_string(),
        }
    }
}

#[async_trait]
impl ReviewProvider for MockReviewProvider {
    fn metadata(&self) -> ReviewProviderMetadata {
        ReviewProviderMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            model: "mock".to_string(),
        }
    }

    async fn generate(&self, _request: ReviewRequest) -> Result<ReviewResponse, ReviewError> {
        let output = serde_json::json!({
            "valid": true,
            "score": 95,
            "issues": [],
            "summary": "Document reads well; no semantic defects found."
        })
        .to_string();

        Ok(ReviewResponse {
            model: "mock".to_string(),
            raw_output: output,
            latency: Duration::from_millis(5),
        })
    }
}
