use doccheck_core::checker::Checker;
use doccheck_core::checkers::VendorSetupChecker;
use doccheck_core::domain::{PackageContext, Severity, VendorSetupContent};
use std::collections::{BTreeSet, HashMap};

fn mk_ctx(vendor_setup: VendorSetupContent) -> PackageContext {
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
        vendor_setup,
        existing_readme: None,
    }
}

fn full_kb() -> VendorSetupContent {
    VendorSetupContent {
        has_prerequisites: true,
        has_vendor_steps: true,
        has_onboarding_steps: true,
        has_validation_steps: true,
        prerequisites_text: "An admin account is required".to_string(),
        vendor_steps_text: "Enable syslog in the console".to_string(),
        onboarding_steps_text: "Add the integration".to_string(),
        validation_steps_text: "Verify events arrive".to_string(),
        ..Default::default()
    }
}

const COVERED_DOC: &str = "\
# Cisco

## Setup

Before you begin, you require an admin account with access to the console and \
a minimum supported version.

Log in to the vendor console, navigate to the syslog settings, and click \
enable to start forwarding.

Then add the integration to an agent policy and enroll the agent with Fleet.

### Validation

Verify that events arrive and check the dashboard for the expected data.
";

#[test]
fn empty_knowledge_base_passes_vacuously() {
    let out = VendorSetupChecker.check("anything at all", &mk_ctx(VendorSetupContent::default()));
    assert!(out.valid);
    assert!(out.issues.is_empty());
}

#[test]
fn covered_knowledge_base_passes() {
    let out = VendorSetupChecker.check(COVERED_DOC, &mk_ctx(full_kb()));
    assert!(out.valid, "{:?}", out.issues);
}

#[test]
fn setup_content_without_setup_section_is_critical() {
    let out = VendorSetupChecker.check("# Cisco\n\n## Overview\n\nIntro.\n", &mk_ctx(full_kb()));
    assert!(!out.valid);
    assert_eq!(out.issues.len(), 1);
    assert_eq!(out.issues[0].severity, Severity::Critical);
    assert_eq!(out.issues[0].location, "Setup");
}

#[test]
fn missing_vendor_steps_is_critical() {
    let kb = VendorSetupContent {
        has_vendor_steps: true,
        vendor_steps_text: "Enable syslog in the console".to_string(),
        ..Default::default()
    };
    let doc = "# Cisco\n\n## Setup\n\nInstall it and you are done.\n";
    let out = VendorSetupChecker.check(doc, &mk_ctx(kb));
    assert!(out.issues.iter().any(|i| {
        i.severity == Severity::Critical && i.message.contains("vendor-side")
    }));
}

#[test]
fn missing_prerequisites_is_major() {
    let kb = VendorSetupContent {
        has_prerequisites: true,
        prerequisites_text: "An admin account is required".to_string(),
        ..Default::default()
    };
    let doc = "# Cisco\n\n## Setup\n\nJust turn it on.\n";
    let out = VendorSetupChecker.check(doc, &mk_ctx(kb));
    assert!(out.issues.iter().any(|i| {
        i.severity == Severity::Major && i.location == "Setup > Prerequisites"
    }));
}

#[test]
fn validation_steps_found_in_their_own_section() {
    // validation lives outside the setup section but still counts
    let kb = VendorSetupContent {
        has_validation_steps: true,
        validation_steps_text: "Verify events arrive".to_string(),
        ..Default::default()
    };
    let doc = "\
# Cisco

## Setup

Turn on forwarding.

## Validation

Verify that events arrive and confirm the dashboard shows data.
";
    let out = VendorSetupChecker.check(doc, &mk_ctx(kb));
    assert!(!out.issues.iter().any(|i| i.location == "Validation"), "{:?}", out.issues);
}

#[test]
fn missing_validation_steps_is_major() {
    let kb = VendorSetupContent {
        has_validation_steps: true,
        validation_steps_text: "Verify events arrive".to_string(),
        ..Default::default()
    };
    let doc = "# Cisco\n\n## Setup\n\nTurn on forwarding.\n";
    let out = VendorSetupChecker.check(doc, &mk_ctx(kb));
    assert!(out.issues.iter().any(|i| {
        i.severity == Severity::Major && i.location == "Validation"
    }));
}
