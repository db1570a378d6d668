use crate::domain::{
    Dimension, IssueSource, PackageContext, Severity, StagedValidationResult, ValidationIssue,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub type ReviewProviderId = String;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewProviderMetadata {
    pub id: ReviewProviderId,
    pub name: String,
    pub model: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewPrompt {
    pub system: Option<String>,
    pub user: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewRequest {
    pub checker: String,
    pub prompt: ReviewPrompt,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    pub model: String,
    pub raw_output: String,
    pub latency: Duration,
}

#[derive(thiserror::Error, Debug)]
pub enum ReviewError {
    #[error("transport error")]
    Transport,
    #[error("request timed out")]
    Timeout,
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response")]
    InvalidResponse,
    #[error("provider unavailable")]
    Unavailable,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReviewConfig {
    OpenAiCompatible {
        id: ReviewProviderId,
        base_url: String,
        api_key: String,
        model: String,
    },
    Script {
        id: ReviewProviderId,
        command: String,
        args: Vec<String>,
        timeout_ms: Option<u64>,
    },
    Mock {
        id: ReviewProviderId,
    },
}

impl ReviewConfig {
    pub fn id(&self) -> &ReviewProviderId {
        match self {
            Self::OpenAiCompatible { id, .. } => id,
            Self::Script { id, .. } => id,
            Self::Mock { id } => id,
        }
    }
}

#[async_trait]
pub trait ReviewProvider: Send + Sync {
    fn metadata(&self) -> ReviewProviderMetadata;

    async fn generate(&self, request: ReviewRequest) -> Result<ReviewResponse, ReviewError>;

    async fn health_check(&self) -> Result<(), ReviewError> {
        Ok(())
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawReviewIssue {
    #[serde(default)]
    severity: String,
    #[serde(default)]
    location: String,
    #[serde(default)]
    message: String,
    #[serde(default)]
    suggestion: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawReview {
    valid: bool,
    #[serde(default = "default_score")]
    score: u8,
    #[serde(default)]
    issues: Vec<RawReviewIssue>,
    #[serde(default)]
    summary: String,
}

fn default_score() -> u8 {
    100
}

fn parse_severity(s: &str) -> Severity {
    match s.to_lowercase().as_str() {
        "critical" => Severity::Critical,
        "major" => Severity::Major,
        _ => Severity::Minor,
    }
}

// Models wrap JSON in prose or fences more often than not; take the outermost
// object and ignore the rest.
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&raw[start..=end])
}

// Malformed output is a warning, never an error: the deterministic pass still
// stands on its own.
pub fn parse_review_response(
    dimension: Dimension,
    raw: &str,
) -> Result<StagedValidationResult, String> {
    let Some(json) = extract_json_object(raw) else {
        return Err(format!(
            "semantic review for {} returned no JSON object",
            dimension.label()
        ));
    };
    let review: RawReview = serde_json::from_str(json).map_err(|e| {
        format!(
            "semantic review for {} returned malformed JSON: {e}",
            dimension.label()
        )
    })?;

    let issues = review
        .issues
        .into_iter()
        .map(|i| ValidationIssue {
            severity: parse_severity(&i.severity),
            category: dimension,
            location: if i.location.is_empty() {
                "Document".to_string()
            } else {
                i.location
            },
            message: i.message,
            suggestion: i.suggestion,
            source: IssueSource::Semantic,
        })
        .collect();

    let mut result = StagedValidationResult {
        dimension,
        valid: review.valid,
        score: review.score.min(100),
        issues,
        warnings: Vec::new(),
        suggestions: Vec::new(),
    };
    if !review.summary.is_empty() {
        result.suggestions.push(review.summary);
    }
    Ok(result)
}

fn context_summary(ctx: &PackageContext) -> String {
    let streams: Vec<String> = ctx
        .data_streams
        .iter()
        .map(|ds| format!("{} ({})", ds.name, ds.title))
        .collect();
    let inputs: Vec<&str> = ctx.input_types.iter().map(|s| s.as_str()).collect();
    format!(
        "Package: {} \"{}\" version {}\nData streams: {}\nInput types: {}",
        ctx.name,
        ctx.title,
        ctx.version,
        if streams.is_empty() { "none".to_string() } else { streams.join(", ") },
        if inputs.is_empty() { "none".to_string() } else { inputs.join(", ") },
    )
}

pub fn compose_review_prompt(
    checker_name: &str,
    dimension: Dimension,
    doc: &str,
    ctx: &PackageContext,
) -> ReviewPrompt {
    let system = format!(
        "You review generated documentation for software integration packages. \
         Judge only the {} dimension. Respond with a single JSON object: \
         {{\"valid\": bool, \"score\": 0-100, \"issues\": [{{\"severity\": \
         \"critical|major|minor\", \"location\": str, \"message\": str, \
         \"suggestion\": str}}], \"summary\": str}}.",
        dimension.label()
    );
    let user = format!(
        "Checker: {checker_name}\n\nGround truth:\n{}\n\nDocument:\n{}",
        context_summary(ctx),
        doc
    );
    ReviewPrompt {
        system: Some(system),
        user,
    }
}
