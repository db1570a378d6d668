use crate::checker::Checker;
use crate::checkers::{count_indicators, SETUP_ALIASES, VALIDATION_ALIASES};
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use crate::sections::extract_section;

// Co-occurrence thresholds. Empirically chosen; tune against real documents
// rather than treating the boundaries as exact.
const VENDOR_STEPS_MIN: usize = 3;
const PREREQUISITES_MIN: usize = 2;
const ONBOARDING_MIN: usize = 2;
const VALIDATION_MIN: usize = 2;

const VENDOR_STEP_INDICATORS: &[&str] = &[
    "console", "portal", "dashboard", "admin", "navigate", "click", "select", "enable",
    "configure", "settings", "log in", "sign in",
];
const PREREQUISITE_INDICATORS: &[&str] = &[
    "prerequisite", "before", "require", "minimum", "version", "permission", "access", "license",
];
const ONBOARDING_INDICATORS: &[&str] = &[
    "agent", "fleet", "integration", "policy", "install", "enroll", "add",
];
const VALIDATION_INDICATORS: &[&str] = &[
    "verify", "validate", "confirm", "check", "discover", "dashboard", "expected",
];

pub struct VendorSetupChecker;

impl VendorSetupChecker {
    fn issue(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(severity, Dimension::VendorSetup, location, message, suggestion)
    }
}

impl Checker for VendorSetupChecker {
    fn name(&self) -> &str {
        "vendor_setup"
    }

    fn dimension(&self) -> Dimension {
        Dimension::VendorSetup
    }

    fn check(&self, doc: &str, ctx: &PackageContext) -> StagedValidationResult {
        // Without detectable setup content in the knowledge base there is no
        // ground truth to compare against.
        if !ctx.vendor_setup.has_setup_content() {
            return StagedValidationResult::passing(Dimension::VendorSetup);
        }

        let mut issues = Vec::new();

        let Some(setup) = extract_section(doc, SETUP_ALIASES) else {
            issues.push(Self::issue(
                Severity::Critical,
                "Setup",
                "knowledge base describes setup steps, but the document has no setup section",
                "Add a setup section covering the vendor-documented steps",
            ));
            return StagedValidationResult::from_issues(Dimension::VendorSetup, issues);
        };

        // Widen the validation search to its own section when present; some
        // templates hoist it out of setup.
        let validation_scope = extract_section(doc, VALIDATION_ALIASES)
            .map(|s| s.body)
            .unwrap_or_else(|| setup.body.clone());

        if ctx.vendor_setup.has_vendor_steps
            && count_indicators(&setup.body, VENDOR_STEP_INDICATORS) < VENDOR_STEPS_MIN
        {
            issues.push(Self::issue(
                Severity::Critical,
                "Setup",
                "vendor-side configuration steps from the knowledge base are not represented",
                "Carry the vendor console steps from the knowledge base into the setup section",
            ));
        }

        if ctx.vendor_setup.has_prerequisites
            && count_indicators(&setup.body, PREREQUISITE_INDICATORS) < PREREQUISITES_MIN
        {
            issues.push(Self::issue(
                Severity::Major,
                "Setup > Prerequisites",
                "prerequisites from the knowledge base are not represented",
                "List the documented prerequisites before the setup steps",
            ));
        }

        if ctx.vendor_setup.has_onboarding_steps
            && count_indicators(&setup.body, ONBOARDING_INDICATORS) < ONBOARDING_MIN
        {
            issues.push(Self::issue(
                Severity::Major,
                "Setup",
                "platform onboarding steps from the knowledge base are not represented",
                "Describe adding the integration and enrolling the agent",
            ));
        }

        if ctx.vendor_setup.has_validation_steps
            && count_indicators(&validation_scope, VALIDATION_INDICATORS) < VALIDATION_MIN
        {
            issues.push(Self::issue(
                Severity::Major,
                "Validation",
                "validation steps from the knowledge base are not represented",
                "Explain how to verify that events are flowing",
            ));
        }

        StagedValidationResult::from_issues(Dimension::VendorSetup, issues)
    }
}
