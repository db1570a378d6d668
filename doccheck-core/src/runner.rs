use crate::aggregate::merge_results;
use crate::checker::{registry, Checker};
use crate::domain::{PackageContext, StagedValidationResult};
use crate::logging::{LogEvent, LogLevel, SharedEventLogger};
use crate::metrics::Metrics;
use crate::review::{compose_review_prompt, parse_review_response, ReviewProvider, ReviewRequest};
use std::sync::Arc;
use tokio::time::Duration;

pub struct ValidationRunner {
    checkers: Vec<Arc<dyn Checker>>,
    review_provider: Option<Arc<dyn ReviewProvider>>,
    metrics: Arc<dyn Metrics>,
    logger: SharedEventLogger,
    semantic_timeout: Duration,
    report_dir: Option<String>,
}

impl ValidationRunner {
    pub fn new(
        review_provider: Option<Arc<dyn ReviewProvider>>,
        metrics: Arc<dyn Metrics>,
        logger: SharedEventLogger,
        semantic_timeout: Option<Duration>,
    ) -> Self {
        Self {
            checkers: registry(),
            review_provider,
            metrics,
            logger,
            semantic_timeout: semantic_timeout.unwrap_or(Duration::from_secs(120)),
            report_dir: None,
        }
    }

    pub fn with_checkers(mut self, checkers: Vec<Arc<dyn Checker>>) -> Self {
        self.checkers = checkers;
        self
    }

    pub fn with_report_dir(mut self, report_dir: impl Into<String>) -> Self {
        self.report_dir = Some(report_dir.into());
        self
    }

    // Events only persist to the per-package file when they carry the
    // report dir, so every runner event gets stamped with it.
    fn stamp(&self, event: LogEvent) -> LogEvent {
        match &self.report_dir {
            Some(dir) => event.with_report_dir(dir.clone()),
            None => event,
        }
    }

    // Checkers are pure over immutable inputs, so they fan out onto tasks
    // with no synchronization. Results come back in registry order.
    pub async fn run(
        &self,
        doc: &str,
        ctx: &PackageContext,
    ) -> anyhow::Result<Vec<StagedValidationResult>> {
        let doc: Arc<str> = Arc::from(doc);
        let ctx = Arc::new(ctx.clone());

        let mut handles = Vec::with_capacity(self.checkers.len());
        for checker in &self.checkers {
            let checker = checker.clone();
            let doc = doc.clone();
            let ctx = ctx.clone();
            handles.push(tokio::spawn(async move { checker.check(&doc, &ctx) }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for (checker, handle) in self.checkers.iter().zip(handles) {
            let static_result = handle.await?;
            self.metrics.inc_check_run();
            for issue in &static_result.issues {
                self.metrics.record_issue(issue.severity);
            }

            self.logger.log(
                self.stamp(
                    LogEvent::new(LogLevel::Debug, "runner.check.completed")
                        .with_package(ctx.name.clone())
                        .with_checker(checker.name())
                        .with_field("valid", static_result.valid.to_string())
                        .with_field("issues", static_result.issues.len().to_string()),
                ),
            );

            let (semantic_result, warning) = if checker.semantic_supported() {
                self.semantic_pass(checker.as_ref(), &doc, &ctx).await
            } else {
                (None, None)
            };

            let mut merged = merge_results(checker.dimension(), Some(static_result), semantic_result);
            if let Some(warning) = warning {
                merged.warnings.push(warning);
            }
            if !merged.valid {
                self.metrics.inc_check_failed();
            }
            results.push(merged);
        }

        self.logger.log(
            self.stamp(
                LogEvent::new(LogLevel::Info, "runner.completed")
                    .with_package(ctx.name.clone())
                    .with_field(
                        "failed_dimensions",
                        results.iter().filter(|r| !r.valid).count().to_string(),
                    ),
            ),
        );

        Ok(results)
    }

    // Any semantic failure degrades to "assume valid" with a warning; the
    // deterministic verdict is never blocked on a flaky review layer.
    async fn semantic_pass(
        &self,
        checker: &dyn Checker,
        doc: &str,
        ctx: &PackageContext,
    ) -> (Option<StagedValidationResult>, Option<String>) {
        let Some(provider) = &self.review_provider else {
            return (None, None);
        };

        self.metrics.inc_semantic_call();
        let request = ReviewRequest {
            checker: checker.name().to_string(),
            prompt: compose_review_prompt(checker.name(), checker.dimension(), doc, ctx),
        };

        let response =
            match tokio::time::timeout(self.semantic_timeout, provider.generate(request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    self.metrics.inc_semantic_failure();
                    let warning =
                        format!("semantic review for {} failed: {e}", checker.name());
                    self.log_semantic_failure(checker, ctx, &warning);
                    return (None, Some(warning));
                }
                Err(_) => {
                    self.metrics.inc_semantic_failure();
                    let warning = format!("semantic review for {} timed out", checker.name());
                    self.log_semantic_failure(checker, ctx, &warning);
                    return (None, Some(warning));
                }
            };

        match parse_review_response(checker.dimension(), &response.raw_output) {
            Ok(result) => (Some(result), None),
            Err(warning) => {
                self.metrics.inc_semantic_failure();
                self.log_semantic_failure(checker, ctx, &warning);
                (None, Some(warning))
            }
        }
    }

    fn log_semantic_failure(&self, checker: &dyn Checker, ctx: &PackageContext, warning: &str) {
        self.logger.log(
            self.stamp(
                LogEvent::new(LogLevel::Warn, "runner.semantic.failed")
                    .with_package(ctx.name.clone())
                    .with_checker(checker.name())
                    .with_field("warning", warning.to_string()),
            ),
        );
    }
}
