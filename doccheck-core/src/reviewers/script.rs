use crate::review::{
    ReviewError, ReviewProvider, ReviewProviderId, ReviewProviderMetadata, ReviewRequest,
    ReviewResponse,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ScriptReviewConfig {
    pub command: String,
    pub args: Vec<String>,
    pub timeout_ms: Option<u64>,
}

pub struct ScriptReviewProvider {
    id: ReviewProviderId,
    name: String,
    config: ScriptReviewConfig,
}

impl ScriptReviewProvider {
    pub fn new(id: ReviewProviderId, config: ScriptReviewConfig) -> Self {
        Self {
            id,
            name: "ScriptReviewProvider".to_string(),
            config,
        }
    }
}

#[async_trait]
impl ReviewProvider for ScriptReviewProvider {
    fn metadata(&self) -> ReviewProviderMetadata {
        ReviewProviderMetadata {
            id: self.id.clone(),
            name: self.name.clone(),
            model: "external".to_string(),
        }
    }

    async fn generate(&self, request: ReviewRequest) -> Result<ReviewResponse, ReviewError> {
        let mut cmd = Command::new(&self.config.command);
        cmd.args(&self.config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd.spawn().map_err(|_| ReviewError::Unavailable)?;

        let stdin = child.stdin.as_mut().ok_or(ReviewError::Transport)?;
        let input_json = serde_json::to_string(&request).map_err(|_| ReviewError::Transport)?;
        stdin
            .write_all(input_json.as_bytes())
            .await
            .map_err(|_| ReviewError::Transport)?;
        drop(child.stdin.take());

        let start = std::time::Instant::now();
        let wait = child.wait_with_output();
        let output = match self.config.timeout_ms {
            Some(ms) => tokio::time::timeout(std::time::Duration::from_millis(ms), wait)
                .await
                .map_err(|_| ReviewError::Timeout)?,
            None => wait.await,
        }
        .map_err(|_| ReviewError::Transport)?;

        if !output.status.success() {
            return Err(ReviewError::InvalidResponse);
        }

        let raw_output =
            String::from_utf8(output.stdout).map_err(|_| ReviewError::InvalidResponse)?;

        Ok(ReviewResponse {
            model: "external".to_string(),
            raw_output,
            latency: start.elapsed(),
        })
    }
}
