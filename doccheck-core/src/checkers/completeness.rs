use crate::checker::Checker;
use crate::checkers::{contains_ci, count_indicators, SETUP_ALIASES, TROUBLESHOOTING_ALIASES};
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use crate::matching::data_stream_is_mentioned;
use crate::scaling::is_network_sensitive;
use crate::sections::extract_section;
use once_cell::sync::Lazy;
use regex::Regex;

// Indicator thresholds are empirically chosen, not derived.
const VENDOR_SIDE_MIN: usize = 1;
const PLATFORM_SIDE_MIN: usize = 1;

const VENDOR_SIDE_INDICATORS: &[&str] = &[
    "vendor", "console", "portal", "appliance", "device", "server", "admin", "dashboard",
];
const PLATFORM_SIDE_INDICATORS: &[&str] = &[
    "agent", "integration", "policy", "fleet", "kibana", "elasticsearch",
];

const AI_DISCLOSURE_PHRASES: &[&str] = &[
    "ai-assisted",
    "ai-generated",
    "generated with the assistance of",
    "generated by an llm",
    "llm-generated",
    "machine-generated",
];

const NETWORK_INDICATORS: &[&str] = &[
    "firewall", "port", "network requirement", "reachab", "inbound", "outbound", "listen",
];

const GENERIC_REMEDIATION_INDICATORS: &[&str] = &[
    "troubleshooting guide",
    "common problems",
    "agent troubleshooting",
    "support",
];

static TEMPLATE_INVOCATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\{\{\s*(?:event|fields)\s+"([^"]+)"\s*\}\}"#).unwrap());

const PLACEHOLDER_TOKENS: &[&str] = &["data_stream_name", "<data_stream_name>", "datastream_name"];

pub struct CompletenessChecker;

impl CompletenessChecker {
    fn issue(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(severity, Dimension::Completeness, location, message, suggestion)
    }
}

impl Checker for CompletenessChecker {
    fn name(&self) -> &str {
        "completeness"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Completeness
    }

    fn check(&self, doc: &str, ctx: &PackageContext) -> StagedValidationResult {
        let mut issues = Vec::new();
        let mut suggestions = Vec::new();

        // Every ground-truth data stream must be mentioned somewhere.
        for ds in &ctx.data_streams {
            if !data_stream_is_mentioned(&ds.name, &ds.title, doc) {
                issues.push(Self::issue(
                    Severity::Critical,
                    "Data streams",
                    format!("data stream \"{}\" is not mentioned anywhere", ds.name),
                    format!("Document the \"{}\" data stream ({})", ds.name, ds.title),
                ));
            } else if !ds.has_sample_event {
                suggestions.push(format!(
                    "Data stream \"{}\" has no sample_event.json; consider adding one so the \
                     reference section can show an example event",
                    ds.name
                ));
            }
        }

        match extract_section(doc, SETUP_ALIASES) {
            None => {
                issues.push(Self::issue(
                    Severity::Major,
                    "Setup",
                    "no recognizable setup or deployment section",
                    "Add a setup section covering vendor and platform configuration",
                ));
            }
            Some(section) => {
                if count_indicators(&section.body, VENDOR_SIDE_INDICATORS) < VENDOR_SIDE_MIN {
                    issues.push(Self::issue(
                        Severity::Major,
                        "Setup",
                        "setup section shows no vendor-side configuration steps",
                        "Describe what must be configured on the vendor side",
                    ));
                }
                if count_indicators(&section.body, PLATFORM_SIDE_INDICATORS) < PLATFORM_SIDE_MIN {
                    issues.push(Self::issue(
                        Severity::Major,
                        "Setup",
                        "setup section shows no platform-side configuration steps",
                        "Describe how to add the integration and enroll an agent",
                    ));
                }
            }
        }

        if !AI_DISCLOSURE_PHRASES.iter().any(|p| contains_ci(doc, p)) {
            issues.push(Self::issue(
                Severity::Major,
                "Document",
                "no AI-generation disclosure phrase found",
                "State that the document was AI-assisted and reviewed by a human",
            ));
        }

        self.check_reference_templates(doc, ctx, &mut issues);

        let network_inputs: Vec<&str> = ctx
            .input_types
            .iter()
            .map(|t| t.as_str())
            .filter(|&t| is_network_sensitive(t))
            .collect();
        if !network_inputs.is_empty() && count_indicators(doc, NETWORK_INDICATORS) == 0 {
            issues.push(Self::issue(
                Severity::Major,
                "Requirements",
                format!(
                    "inputs {} need network documentation, but none was found",
                    network_inputs.join(", ")
                ),
                "Document required ports, protocols and firewall rules",
            ));
        }

        if let Some(section) = extract_section(doc, TROUBLESHOOTING_ALIASES) {
            let generic = count_indicators(&section.body, GENERIC_REMEDIATION_INDICATORS) > 0;
            let specific = contains_ci(&section.body, &ctx.name)
                || contains_ci(&section.body, &ctx.title)
                || ctx
                    .data_streams
                    .iter()
                    .any(|ds| data_stream_is_mentioned(&ds.name, &ds.title, &section.body));
            match (generic, specific) {
                (false, false) => issues.push(Self::issue(
                    Severity::Major,
                    "Troubleshooting",
                    "troubleshooting references neither a generic nor an integration-specific \
                     remediation path",
                    "Link the general troubleshooting guide and add integration-specific steps",
                )),
                (false, true) => issues.push(Self::issue(
                    Severity::Minor,
                    "Troubleshooting",
                    "troubleshooting lacks a generic remediation path",
                    "Link the general troubleshooting guide",
                )),
                (true, false) => issues.push(Self::issue(
                    Severity::Minor,
                    "Troubleshooting",
                    "troubleshooting lacks integration-specific remediation steps",
                    "Add steps specific to this integration's data sources",
                )),
                (true, true) => {}
            }
        }

        let mut result = StagedValidationResult::from_issues(Dimension::Completeness, issues);
        result.suggestions = suggestions;
        result
    }
}

impl CompletenessChecker {
    // Reference templates must invoke real data-stream names. A literal
    // placeholder is always reported as such, never as an unknown name.
    fn check_reference_templates(
        &self,
        doc: &str,
        ctx: &PackageContext,
        issues: &mut Vec<ValidationIssue>,
    ) {
        if ctx.data_streams.is_empty() {
            return;
        }

        let mut invoked: Vec<String> = Vec::new();
        for caps in TEMPLATE_INVOCATION.captures_iter(doc) {
            let arg = caps[1].to_string();
            let lower = arg.to_lowercase();
            if PLACEHOLDER_TOKENS.contains(&lower.as_str()) {
                issues.push(Self::issue(
                    Severity::Critical,
                    "Reference",
                    format!("reference template uses the literal placeholder \"{arg}\""),
                    "Replace the placeholder with the actual data stream name",
                ));
            } else if !ctx.data_streams.iter().any(|ds| ds.name == arg) {
                issues.push(Self::issue(
                    Severity::Major,
                    "Reference",
                    format!("reference template names unknown data stream \"{arg}\""),
                    "Use one of the package's data stream names",
                ));
            }
            invoked.push(lower);
        }

        for ds in &ctx.data_streams {
            if !invoked.iter().any(|name| *name == ds.name.to_lowercase()) {
                issues.push(Self::issue(
                    Severity::Major,
                    "Reference",
                    format!("no reference template for data stream \"{}\"", ds.name),
                    format!("Add {{{{event \"{}\"}}}} and {{{{fields \"{}\"}}}}", ds.name, ds.name),
                ));
            }
        }
    }
}
