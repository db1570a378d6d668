use crate::checker::Checker;
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use once_cell::sync::Lazy;
use regex::Regex;

const BRITISH_AMERICAN: &[(&str, &str)] = &[
    ("behaviour", "behavior"),
    ("colour", "color"),
    ("organise", "organize"),
    ("organisation", "organization"),
    ("analyse", "analyze"),
    ("catalogue", "catalog"),
    ("licence", "license"),
    ("optimise", "optimize"),
    ("customise", "customize"),
    ("centre", "center"),
    ("favour", "favor"),
    ("utilise", "utilize"),
    ("synchronise", "synchronize"),
    ("initialise", "initialize"),
    ("normalise", "normalize"),
    ("authorise", "authorize"),
    ("fibre", "fiber"),
];

static BOLD_CALLOUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*\*\*(Note|Warning|Important|Tip):?\*\*").unwrap());

static BOLD_LIST_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*[-*]\s+\*\*[^*]+:\*\*").unwrap());

pub struct StyleChecker;

impl StyleChecker {
    fn issue(
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(Severity::Minor, Dimension::Style, location, message, suggestion)
    }
}

// Spelling is checked outside fenced code blocks; config snippets may
// legitimately carry vendor spellings.
fn prose_only(doc: &str) -> String {
    let mut out = String::with_capacity(doc.len());
    let mut in_fence = false;
    for line in doc.lines() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if !in_fence {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}

impl Checker for StyleChecker {
    fn name(&self) -> &str {
        "style"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Style
    }

    fn semantic_supported(&self) -> bool {
        false
    }

    fn check(&self, doc: &str, _ctx: &PackageContext) -> StagedValidationResult {
        let mut issues = Vec::new();
        let prose = prose_only(doc);
        let lower = prose.to_lowercase();

        for (british, american) in BRITISH_AMERICAN {
            let count = lower.matches(british).count();
            if count > 0 {
                issues.push(Self::issue(
                    "Spelling",
                    format!("British spelling \"{british}\" used {count} time(s)"),
                    format!("Use the American spelling \"{american}\""),
                ));
            }
        }

        let callouts = BOLD_CALLOUT.find_iter(&prose).count();
        if callouts > 0 {
            issues.push(Self::issue(
                "Formatting",
                format!("{callouts} bold \"Note:\"/\"Warning:\" callout(s)"),
                "Use blockquote admonitions instead of bold text",
            ));
        }

        let labels = BOLD_LIST_LABEL.find_iter(&prose).count();
        if labels > 0 {
            issues.push(Self::issue(
                "Formatting",
                format!("{labels} list item(s) use bold text as a label"),
                "Use plain labels or subheadings for list items",
            ));
        }

        StagedValidationResult::from_issues(Dimension::Style, issues)
    }
}
