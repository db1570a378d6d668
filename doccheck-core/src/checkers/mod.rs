mod accessibility;
mod accuracy;
mod completeness;
mod scaling;
mod structure;
mod style;
mod vendor_setup;

pub use accessibility::AccessibilityChecker;
pub use accuracy::AccuracyChecker;
pub use completeness::CompletenessChecker;
pub use scaling::ScalingChecker;
pub use structure::StructureChecker;
pub use style::StyleChecker;
pub use vendor_setup::VendorSetupChecker;

// Heading aliases shared by several checkers when scoping their search.
pub(crate) const SETUP_ALIASES: &[&str] = &[
    "Setup",
    "Set up",
    "Getting started",
    "Installation",
    "How do I deploy this integration?",
];

pub(crate) const SCALING_ALIASES: &[&str] = &[
    "Performance and scaling",
    "Scaling and performance",
    "Scaling",
    "Performance",
];

pub(crate) const TROUBLESHOOTING_ALIASES: &[&str] =
    &["Troubleshooting", "Troubleshoot", "Common problems"];

pub(crate) const VALIDATION_ALIASES: &[&str] = &["Validation", "Validate", "Verify the data"];

pub(crate) fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub(crate) fn count_indicators(text: &str, indicators: &[&str]) -> usize {
    let lower = text.to_lowercase();
    indicators.iter().filter(|w| lower.contains(&w.to_lowercase())).count()
}
