use crate::checker::Checker;
use crate::checkers::{contains_ci, SCALING_ALIASES};
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use crate::matching::input_type_is_mentioned;
use crate::scaling::scaling_info;
use crate::sections::extract_section;
use once_cell::sync::Lazy;
use regex::Regex;

// Phrases that acknowledge lossy delivery.
const DATA_LOSS_PHRASES: &[&str] = &[
    "data loss",
    "lost",
    "dropped",
    "drops",
    "no delivery guarantee",
    "unreliable",
    "without acknowledgement",
];

// Phrases that steer the reader toward a reliable transport.
const ALTERNATIVE_PHRASES: &[&str] = &[
    "tcp",
    "reliable transport",
    "more reliable",
    "consider using",
    "switch to",
    "instead of udp",
];

const HEDGE_PHRASES: &[&str] = &[
    "as needed",
    "may need to",
    "if necessary",
    "as appropriate",
    "consider adjusting",
    "as required",
];

// A section dominated by hedging with fewer concrete signals than hedges
// reads as filler rather than guidance.
const HEDGE_TOLERANCE: usize = 3;

static CONCRETE_SIGNAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+|`[a-z0-9_.]+`").unwrap());

pub struct ScalingChecker;

impl ScalingChecker {
    fn issue(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(severity, Dimension::Scaling, location, message, suggestion)
    }
}

impl Checker for ScalingChecker {
    fn name(&self) -> &str {
        "scaling"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Scaling
    }

    fn check(&self, doc: &str, ctx: &PackageContext) -> StagedValidationResult {
        let known: Vec<(&str, &'static crate::scaling::InputScalingInfo)> = ctx
            .input_types
            .iter()
            .filter_map(|t| scaling_info(t).map(|info| (t.as_str(), info)))
            .collect();

        if known.is_empty() {
            return StagedValidationResult::passing(Dimension::Scaling);
        }

        let mut issues = Vec::new();
        let section = extract_section(doc, SCALING_ALIASES);
        let scope = section.as_ref().map(|s| s.body.as_str()).unwrap_or(doc);

        for (ty, info) in &known {
            let scope_for_mention = section.as_ref().map(|s| s.body.as_str()).unwrap_or("");
            if !input_type_is_mentioned(ty, info.display_name, scope_for_mention) {
                issues.push(Self::issue(
                    Severity::Major,
                    "Performance and scaling",
                    format!(
                        "scaling section does not discuss the {} input",
                        info.display_name
                    ),
                    format!(
                        "Discuss {} scaling: {}",
                        info.display_name,
                        info.recommendations.first().unwrap_or(&info.fault_tolerance)
                    ),
                ));
            }

            // Lossy-by-default transports need an explicit warning or a push
            // toward a reliable alternative; either alone is enough.
            if info.suggest_alternative {
                let warned = DATA_LOSS_PHRASES.iter().any(|p| contains_ci(scope, p));
                let redirected = ALTERNATIVE_PHRASES.iter().any(|p| contains_ci(scope, p));
                if !warned && !redirected {
                    issues.push(Self::issue(
                        Severity::Critical,
                        "Performance and scaling",
                        format!(
                            "{} has no delivery guarantee, but the document neither warns about \
                             data loss nor recommends a reliable alternative",
                            info.display_name
                        ),
                        format!(
                            "Warn about silent data loss: {}",
                            info.critical_warnings.first().unwrap_or(&info.fault_tolerance)
                        ),
                    ));
                }
            }
        }

        if let Some(section) = &section {
            let lower = section.body.to_lowercase();
            let hedges: usize = HEDGE_PHRASES.iter().map(|p| lower.matches(p).count()).sum();
            let concrete = CONCRETE_SIGNAL.find_iter(&lower).count();
            if hedges >= HEDGE_TOLERANCE && concrete < hedges {
                issues.push(Self::issue(
                    Severity::Minor,
                    "Performance and scaling",
                    format!(
                        "scaling guidance hedges {hedges} times with only {concrete} concrete \
                         parameters or numbers"
                    ),
                    "Replace hedging with parameterized guidance (settings, thresholds, counts)",
                ));
            }
        }

        StagedValidationResult::from_issues(Dimension::Scaling, issues)
    }
}
