mod mock;
mod openai;
mod script;

pub use mock::MockReviewProvider;
pub use openai::OpenAiCompatibleProvider;
pub use script::{ScriptReviewConfig, ScriptReviewProvider};

use crate::review::{ReviewConfig, ReviewProvider};

pub fn create_review_provider(config: ReviewConfig) -> Box<dyn ReviewProvider> {
    match config {
        ReviewConfig::OpenAiCompatible {
            id,
            base_url,
            api_key,
            model,
        } => Box::new(OpenAiCompatibleProvider::new(id, base_url, api_key, model)),
        ReviewConfig::Script {
            id,
            command,
            args,
            timeout_ms,
        } => Box::new(ScriptReviewProvider::new(
            id,
            ScriptReviewConfig {
                command,
                args,
                timeout_ms,
            },
        )),
        ReviewConfig::Mock { id } => Box::new(MockReviewProvider::new(id)),
    }
}
