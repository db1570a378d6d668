use async_trait::async_trait;
use doccheck_core::checker::Checker;
use doccheck_core::domain::{
    Dimension, IssueSource, PackageContext, Severity, StagedValidationResult, ValidationIssue,
    VendorSetupContent,
};
use doccheck_core::logging::{BufferedFileEventLogger, NoopEventLogger};
use doccheck_core::metrics::{InMemoryMetrics, Metrics};
use doccheck_core::review::{
    ReviewError, ReviewProvider, ReviewProviderMetadata, ReviewRequest, ReviewResponse,
};
use doccheck_core::reviewers::MockReviewProvider;
use doccheck_core::runner::ValidationRunner;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use std::time::Duration;

fn mk_ctx() -> PackageContext {
    PackageContext {
        name: "cisco".to_string(),
        title: "Cisco".to_string(),
        version: "1.2.0".to_string(),
        data_streams: vec![],
        fields: HashMap::new(),
        input_types: BTreeSet::new(),
        advanced_settings: vec![],
        knowledge_base: None,
        service_info_links: vec![],
        vendor_setup: VendorSetupContent::default(),
        existing_readme: None,
    }
}

struct PassingChecker;

impl Checker for PassingChecker {
    fn name(&self) -> &str {
        "passing"
    }
    fn dimension(&self) -> Dimension {
        Dimension::Structure
    }
    fn check(&self, _doc: &str, _ctx: &PackageContext) -> StagedValidationResult {
        StagedValidationResult::passing(Dimension::Structure)
    }
}

struct FailingChecker;

impl Checker for FailingChecker {
    fn name(&self) -> &str {
        "failing"
    }
    fn dimension(&self) -> Dimension {
        Dimension::Completeness
    }
    fn check(&self, _doc: &str, _ctx: &PackageContext) -> StagedValidationResult {
        StagedValidationResult::from_issues(
            Dimension::Completeness,
            vec![ValidationIssue::new(
                Severity::Major,
                Dimension::Completeness,
                "Setup",
                "something is missing",
                "add it",
            )],
        )
    }
}

struct StaticOnlyChecker;

impl Checker for StaticOnlyChecker {
    fn name(&self) -> &str {
        "static_only"
    }
    fn dimension(&self) -> Dimension {
        Dimension::Style
    }
    fn semantic_supported(&self) -> bool {
        false
    }
    fn check(&self, _doc: &str, _ctx: &PackageContext) -> StagedValidationResult {
        StagedValidationResult::passing(Dimension::Style)
    }
}

struct CannedProvider {
    output: Result<String, ReviewError>,
    delay: Option<Duration>,
}

#[async_trait]
impl ReviewProvider for CannedProvider {
    fn metadata(&self) -> ReviewProviderMetadata {
        ReviewProviderMetadata {
            id: "canned".to_string(),
            name: "CannedProvider".to_string(),
            model: "canned".to_string(),
        }
    }

    async fn generate(&self, _request: ReviewRequest) -> Result<ReviewResponse, ReviewError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.output {
            Ok(raw) => Ok(ReviewResponse {
                model: "canned".to_string(),
                raw_output: raw.clone(),
                latency: Duration::from_millis(1),
            }),
            Err(ReviewError::Transport) => Err(ReviewError::Transport),
            Err(_) => Err(ReviewError::Unavailable),
        }
    }
}

fn mk_runner(
    provider: Option<Arc<dyn ReviewProvider>>,
    metrics: Arc<InMemoryMetrics>,
    timeout: Option<Duration>,
) -> ValidationRunner {
    ValidationRunner::new(provider, metrics, Arc::new(NoopEventLogger), timeout)
}

#[tokio::test]
async fn results_come_back_in_registry_order() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let runner = mk_runner(None, metrics.clone(), None);
    let results = runner.run("# Doc", &mk_ctx()).await.unwrap();
    let labels: Vec<&str> = results.iter().map(|r| r.dimension.label()).collect();
    assert_eq!(
        labels,
        vec![
            "structure",
            "completeness",
            "accuracy",
            "vendor_setup",
            "scaling",
            "accessibility",
            "style"
        ]
    );
    assert_eq!(metrics.snapshot().checks_run, 7);
}

#[tokio::test]
async fn mock_provider_result_is_merged() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let runner = mk_runner(
        Some(Arc::new(MockReviewProvider::new("mock".to_string()))),
        metrics.clone(),
        None,
    )
    .with_checkers(vec![Arc::new(PassingChecker)]);

    let results = runner.run("doc", &mk_ctx()).await.unwrap();
    assert_eq!(results.len(), 1);
    assert!(results[0].valid);
    assert_eq!(results[0].score, 95);
    assert!(results[0].suggestions.iter().any(|s| s.contains("reads well")));
    assert_eq!(metrics.snapshot().semantic_calls, 1);
    assert_eq!(metrics.snapshot().semantic_failures, 0);
}

#[tokio::test]
async fn provider_error_degrades_to_warning() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let provider = Arc::new(CannedProvider {
        output: Err(ReviewError::Transport),
        delay: None,
    });
    let runner = mk_runner(Some(provider), metrics.clone(), None)
        .with_checkers(vec![Arc::new(FailingChecker)]);

    let results = runner.run("doc", &mk_ctx()).await.unwrap();
    // the static verdict survives the semantic failure
    assert!(!results[0].valid);
    assert_eq!(results[0].issues.len(), 1);
    assert!(results[0].warnings.iter().any(|w| w.contains("failed")));
    assert_eq!(metrics.snapshot().semantic_failures, 1);
    assert_eq!(metrics.snapshot().issues_major, 1);
    assert_eq!(metrics.snapshot().checks_failed, 1);
}

#[tokio::test]
async fn malformed_review_output_is_a_warning() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let provider = Arc::new(CannedProvider {
        output: Ok("I could not form an opinion.".to_string()),
        delay: None,
    });
    let runner = mk_runner(Some(provider), metrics.clone(), None)
        .with_checkers(vec![Arc::new(PassingChecker)]);

    let results = runner.run("doc", &mk_ctx()).await.unwrap();
    assert!(results[0].valid);
    assert!(results[0].warnings.iter().any(|w| w.contains("no JSON object")));
    assert_eq!(metrics.snapshot().semantic_failures, 1);
}

#[tokio::test]
async fn slow_provider_times_out_into_a_warning() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let provider = Arc::new(CannedProvider {
        output: Ok("{\"valid\":true}".to_string()),
        delay: Some(Duration::from_secs(30)),
    });
    let runner = mk_runner(Some(provider), metrics.clone(), Some(Duration::from_millis(50)))
        .with_checkers(vec![Arc::new(PassingChecker)]);

    let results = runner.run("doc", &mk_ctx()).await.unwrap();
    assert!(results[0].valid);
    assert!(results[0].warnings.iter().any(|w| w.contains("timed out")));
    assert_eq!(metrics.snapshot().semantic_failures, 1);
}

#[tokio::test]
async fn semantic_verdict_can_fail_a_passing_dimension() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let raw = serde_json::json!({
        "valid": false,
        "score": 30,
        "issues": [{
            "severity": "major",
            "location": "Overview",
            "message": "overview contradicts the data streams",
            "suggestion": "rewrite the overview"
        }],
        "summary": ""
    })
    .to_string();
    let provider = Arc::new(CannedProvider { output: Ok(raw), delay: None });
    let runner = mk_runner(Some(provider), metrics.clone(), None)
        .with_checkers(vec![Arc::new(PassingChecker)]);

    let results = runner.run("doc", &mk_ctx()).await.unwrap();
    assert!(!results[0].valid);
    assert_eq!(results[0].score, 30);
    assert_eq!(results[0].issues.len(), 1);
    assert_eq!(results[0].issues[0].source, IssueSource::Semantic);
    assert_eq!(metrics.snapshot().checks_failed, 1);
}

#[tokio::test]
async fn runner_events_land_in_the_report_dir_file() {
    let dir = tempfile::tempdir().unwrap();
    let logger = Arc::new(BufferedFileEventLogger::new(64));
    let runner = ValidationRunner::new(None, Arc::new(InMemoryMetrics::new()), logger, None)
        .with_checkers(vec![Arc::new(PassingChecker)])
        .with_report_dir(dir.path().display().to_string());

    runner.run("doc", &mk_ctx()).await.unwrap();

    let contents = std::fs::read_to_string(dir.path().join("cisco.events.jsonl")).unwrap();
    assert!(contents.contains("runner.check.completed"), "{contents}");
    assert!(contents.contains("runner.completed"));
}

#[tokio::test]
async fn static_only_checkers_never_call_the_provider() {
    let metrics = Arc::new(InMemoryMetrics::new());
    let runner = mk_runner(
        Some(Arc::new(MockReviewProvider::new("mock".to_string()))),
        metrics.clone(),
        None,
    )
    .with_checkers(vec![Arc::new(StaticOnlyChecker)]);

    let results = runner.run("doc", &mk_ctx()).await.unwrap();
    assert!(results[0].valid);
    assert_eq!(results[0].score, 100);
    assert_eq!(metrics.snapshot().semantic_calls, 0);
}
