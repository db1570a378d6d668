use crate::checker::Checker;
use crate::checkers::contains_ci;
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

// Top-level namespaces that are always legitimate field prefixes even when
// the package does not redeclare them.
const ECS_NAMESPACES: &[&str] = &[
    "ecs", "event", "host", "source", "destination", "user", "agent", "cloud", "container",
    "file", "network", "process", "log", "error", "message", "observer", "related", "rule",
    "server", "client", "tls", "url", "http", "dns", "os", "group", "organization", "registry",
    "service", "threat", "trace", "transaction", "span", "labels", "tags", "data_stream", "base",
    "vulnerability", "package",
];

static BACKTICK_FIELD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"`([a-z0-9_@]+(?:\.[a-z0-9_@]+)+)`").unwrap());

// Only phrasings unambiguously about this package's version; platform or
// vendor product versions must not match.
static PACKAGE_VERSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:integration|package)\s+version\s+v?(\d+\.\d+(?:\.\d+)?)|version\s+v?(\d+\.\d+(?:\.\d+)?)\s+of\s+(?:this|the)\s+(?:integration|package)",
    )
    .unwrap()
});

pub struct AccuracyChecker;

impl AccuracyChecker {
    fn issue(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(severity, Dimension::Accuracy, location, message, suggestion)
    }
}

fn normalize_version(v: &str) -> String {
    // "1.2" and "1.2.0" are the same release
    let mut parts: Vec<&str> = v.split('.').collect();
    while parts.len() < 3 {
        parts.push("0");
    }
    parts.join(".")
}

impl Checker for AccuracyChecker {
    fn name(&self) -> &str {
        "accuracy"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Accuracy
    }

    fn check(&self, doc: &str, ctx: &PackageContext) -> StagedValidationResult {
        let mut issues = Vec::new();

        if !contains_ci(doc, &ctx.title) && !contains_ci(doc, &ctx.name) {
            issues.push(Self::issue(
                Severity::Major,
                "Document",
                format!("package title \"{}\" is never mentioned", ctx.title),
                "Name the integration at least once, ideally in the overview",
            ));
        }

        let known_fields: HashSet<&str> = ctx.all_fields().map(|f| f.name.as_str()).collect();
        let mut flagged: HashSet<String> = HashSet::new();
        for caps in BACKTICK_FIELD.captures_iter(doc) {
            let candidate = &caps[1];
            let prefix = candidate.split('.').next().unwrap_or(candidate);
            if ECS_NAMESPACES.contains(&prefix) {
                continue;
            }
            if known_fields.contains(candidate) {
                continue;
            }
            // Fields under the package's own namespace resolve through the
            // loaded field set; anything else dotted in backticks is suspect.
            if flagged.insert(candidate.to_string()) {
                issues.push(Self::issue(
                    Severity::Minor,
                    "Fields",
                    format!("field `{candidate}` is not a known ECS or package field"),
                    "Verify the field name against the package field definitions",
                ));
            }
        }

        for caps in PACKAGE_VERSION.captures_iter(doc) {
            let mentioned = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map(|m| m.as_str())
                .unwrap_or_default();
            if normalize_version(mentioned) != normalize_version(&ctx.version) {
                issues.push(Self::issue(
                    Severity::Minor,
                    "Version",
                    format!(
                        "document says package version {mentioned}, manifest says {}",
                        ctx.version
                    ),
                    format!("Update the version mention to {}", ctx.version),
                ));
            }
        }

        StagedValidationResult::from_issues(Dimension::Accuracy, issues)
    }
}
