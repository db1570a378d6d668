use crate::checker::Checker;
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use once_cell::sync::Lazy;
use regex::Regex;

static IMAGE: Lazy<Regex> = Lazy::new(|| Regex::new(r"!\[([^\]]*)\]\(([^)]+)\)").unwrap());
static LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[^!])\[([^\]]+)\]\([^)]+\)").unwrap());

const GENERIC_ALT_TEXT: &[&str] = &["image", "img", "screenshot", "picture", "photo", "diagram"];

const BAD_LINK_TEXT: &[&str] = &["click here", "here", "read more", "learn more", "this link", "link"];

const DIRECTIONAL_PHRASES: &[&str] = &[
    "above",
    "below",
    "left-hand side",
    "right-hand side",
    "on the left",
    "on the right",
];

struct FlaggedTerm {
    term: &'static str,
    // A nearby exception phrase makes the usage technical rather than ableist
    // or violent ("kill the process").
    exceptions: &'static [&'static str],
}

const FLAGGED_TERMS: &[FlaggedTerm] = &[
    FlaggedTerm { term: "crazy", exceptions: &[] },
    FlaggedTerm { term: "insane", exceptions: &[] },
    FlaggedTerm { term: "sanity check", exceptions: &[] },
    FlaggedTerm { term: "crippl", exceptions: &[] },
    FlaggedTerm { term: "dumb", exceptions: &[] },
    FlaggedTerm { term: "kill", exceptions: &["process", "signal", "-9"] },
];

static GENDERED_PRONOUNS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(he/she|she/he|his/her|her/his|s/he|him/her)\b").unwrap());

// Window around a flagged term inside which an exception phrase counts.
const EXCEPTION_WINDOW: usize = 60;

pub struct AccessibilityChecker;

impl AccessibilityChecker {
    fn issue(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(severity, Dimension::Accessibility, location, message, suggestion)
    }
}

impl Checker for AccessibilityChecker {
    fn name(&self) -> &str {
        "accessibility"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Accessibility
    }

    fn check(&self, doc: &str, _ctx: &PackageContext) -> StagedValidationResult {
        let mut issues = Vec::new();
        let lower = doc.to_lowercase();

        for caps in IMAGE.captures_iter(doc) {
            let alt = caps[1].trim();
            let target = &caps[2];
            if alt.is_empty() {
                issues.push(Self::issue(
                    Severity::Major,
                    format!("Image {target}"),
                    "image has no alternative text",
                    "Describe what the image shows",
                ));
            } else if GENERIC_ALT_TEXT.contains(&alt.to_lowercase().as_str()) {
                issues.push(Self::issue(
                    Severity::Minor,
                    format!("Image {target}"),
                    format!("alternative text \"{alt}\" is generic"),
                    "Describe the content of the image, not its kind",
                ));
            }
        }

        for caps in LINK.captures_iter(doc) {
            let text = caps[1].trim().to_lowercase();
            if BAD_LINK_TEXT.contains(&text.as_str()) {
                issues.push(Self::issue(
                    Severity::Minor,
                    "Links",
                    format!("link text \"{}\" does not describe its target", caps[1].trim()),
                    "Use the target's title as the link text",
                ));
            }
        }

        for phrase in DIRECTIONAL_PHRASES {
            if lower.contains(phrase) {
                issues.push(Self::issue(
                    Severity::Minor,
                    "Document",
                    format!("directional reference \"{phrase}\""),
                    "Refer to named elements instead of screen positions",
                ));
            }
        }

        for flagged in FLAGGED_TERMS {
            for (pos, _) in lower.match_indices(flagged.term) {
                // prefix terms still need a word boundary on the left so
                // "skill" never matches "kill"
                let boundary = lower[..pos].chars().last().map_or(true, |c| !c.is_alphanumeric());
                if !boundary {
                    continue;
                }
                let mut window_start = pos.saturating_sub(EXCEPTION_WINDOW);
                while !lower.is_char_boundary(window_start) {
                    window_start -= 1;
                }
                let mut window_end = (pos + flagged.term.len() + EXCEPTION_WINDOW).min(lower.len());
                while !lower.is_char_boundary(window_end) {
                    window_end += 1;
                }
                let window = &lower[window_start..window_end];
                let excused = flagged.exceptions.iter().any(|e| window.contains(e));
                if !excused {
                    issues.push(Self::issue(
                        Severity::Major,
                        "Document",
                        format!("term \"{}\" should be avoided", flagged.term),
                        "Use neutral technical wording",
                    ));
                    break;
                }
            }
        }

        for caps in GENDERED_PRONOUNS.captures_iter(doc) {
            issues.push(Self::issue(
                Severity::Minor,
                "Document",
                format!("gendered construction \"{}\"", &caps[1]),
                "Use \"they\" or rephrase to address the reader directly",
            ));
        }

        StagedValidationResult::from_issues(Dimension::Accessibility, issues)
    }
}
