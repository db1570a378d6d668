use crate::review::{
    ReviewError, ReviewProvider, ReviewProviderId, ReviewProviderMetadata, ReviewRequest,
    ReviewResponse,
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub struct OpenAiCompatibleProvider {
    id: ReviewProviderId,
    name: String,
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiCompatibleProvider {
    pub fn new(id: ReviewProviderId, base_url: String, api_key: String, model: String) -> Self {
        let client = reqwest::ClientBuilder::new()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(120))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            id,
            name: "OpenAiCompatibleProvider".to_string(),
            client,
            base_url,
            api_key,
            model,
        }
    }

    pub fn with_client(
        id: ReviewProviderId,
        base_url: String,
        api_key: String,
        model: String,
        client: Client,
    ) -> Self {
        Self {
            id,
            name: "OpenAiCompatibleProvider".to_string(),
            client,
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl ReviewProvider for OpenAiCompatibleProvider {
    fn metadata(&self) -> ReviewProviderMetadata {
        ReviewProviderMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            model: self.model.clone(),
        }
    }

    async fn generate(&self, request: ReviewRequest) -> Result<ReviewResponse, ReviewError> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let mut messages = Vec::<serde_json::Value>::new();
        if let Some(sys) = &request.prompt.system {
            messages.push(serde_json::json!({"role": "system", "content": sys}));
        }
        messages.push(serde_json::json!({"role": "user", "content": request.prompt.user}));

        let payload = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "temperature": 0.0,
        });

        let start = std::time::Instant::now();
        let resp = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ReviewError::Timeout
                } else {
                    ReviewError::Transport
                }
            })?;

        if !resp.status().is_success() {
            if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
                return Err(ReviewError::RateLimited);
            }
            return Err(ReviewError::InvalidResponse);
        }

        let body: serde_json::Value = resp
            .json()
            .await
            .map_err(|_| ReviewError::InvalidResponse)?;
        let content = body
            .pointer("/choices/0/message/content")
            .and_then(|v| v.as_str())
            .unwrap_or("");

        Ok(ReviewResponse {
            model: self.model.clone(),
            raw_output: content.to_string(),
            latency: start.elapsed(),
        })
    }
}
