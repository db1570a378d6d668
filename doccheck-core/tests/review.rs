use doccheck_core::domain::{
    Dimension, IssueSource, PackageContext, Severity, VendorSetupContent,
};
use doccheck_core::review::{compose_review_prompt, parse_review_response};
use std::collections::{BTreeSet, HashMap};

fn mk_ctx() -> PackageContext {
    PackageContext {
        name: "cisco".to_string(),
        title: "Cisco".to_string(),
        version: "1.2.0".to_string(),
        data_streams: vec![],
        fields: HashMap::new(),
        input_types: BTreeSet::from(["udp".to_string()]),
        advanced_settings: vec![],
        knowledge_base: None,
        service_info_links: vec![],
        vendor_setup: VendorSetupContent::default(),
        existing_readme: None,
    }
}

#[test]
fn well_formed_review_parses() {
    let raw = r#"{"valid": false, "score": 60, "issues": [
        {"severity": "major", "location": "Setup", "message": "steps wrong", "suggestion": "fix"}
    ], "summary": "needs work"}"#;
    let out = parse_review_response(Dimension::Completeness, raw).unwrap();
    assert!(!out.valid);
    assert_eq!(out.score, 60);
    assert_eq!(out.issues.len(), 1);
    assert_eq!(out.issues[0].severity, Severity::Major);
    assert_eq!(out.issues[0].source, IssueSource::Semantic);
    assert_eq!(out.suggestions, vec!["needs work"]);
}

#[test]
fn json_wrapped_in_prose_or_fences_is_extracted() {
    let raw = "Sure! Here is my review:\n```json\n{\"valid\": true, \"score\": 90}\n```\nHope it helps.";
    let out = parse_review_response(Dimension::Structure, raw).unwrap();
    assert!(out.valid);
    assert_eq!(out.score, 90);
}

#[test]
fn missing_optional_fields_default_leniently() {
    let out = parse_review_response(Dimension::Style, r#"{"valid": true}"#).unwrap();
    assert!(out.valid);
    assert_eq!(out.score, 100);
    assert!(out.issues.is_empty());
    assert!(out.suggestions.is_empty());
}

#[test]
fn unknown_severity_defaults_to_minor_and_location_to_document() {
    let raw = r#"{"valid": true, "issues": [{"severity": "weird", "message": "hm"}]}"#;
    let out = parse_review_response(Dimension::Accuracy, raw).unwrap();
    assert_eq!(out.issues[0].severity, Severity::Minor);
    assert_eq!(out.issues[0].location, "Document");
}

#[test]
fn non_json_output_is_an_error_string() {
    let err = parse_review_response(Dimension::Scaling, "no opinion").unwrap_err();
    assert!(err.contains("no JSON object"));
    assert!(err.contains("scaling"));
}

#[test]
fn malformed_json_is_an_error_string() {
    let err = parse_review_response(Dimension::Scaling, "{\"valid\": }").unwrap_err();
    assert!(err.contains("malformed JSON"));
}

#[test]
fn scores_are_clamped_to_100() {
    let out = parse_review_response(Dimension::Style, r#"{"valid": true, "score": 150}"#).unwrap();
    assert_eq!(out.score, 100);
}

#[test]
fn prompt_carries_ground_truth_and_dimension() {
    let prompt = compose_review_prompt("structure", Dimension::Structure, "# Doc body", &mk_ctx());
    let system = prompt.system.unwrap();
    assert!(system.contains("structure"));
    assert!(system.contains("\"valid\""));
    assert!(prompt.user.contains("cisco"));
    assert!(prompt.user.contains("1.2.0"));
    assert!(prompt.user.contains("udp"));
    assert!(prompt.user.contains("# Doc body"));
}
