use doccheck_core::matching::{
    data_stream_is_mentioned, input_type_is_mentioned, link_is_referenced,
};

#[test]
fn link_exact_url_substring() {
    let doc = "See https://docs.vendor.com/en/setup-guide for details.";
    assert!(link_is_referenced(
        "https://docs.vendor.com/en/setup-guide",
        "Setup guide",
        doc
    ));
}

#[test]
fn link_article_id_match() {
    let doc = "Follow the steps in vendor article KB0012345.";
    assert!(link_is_referenced(
        "https://support.vendor.com/kb/KB0012345/view",
        "link",
        doc
    ));
}

#[test]
fn link_uppercase_ticket_id_match() {
    let doc = "Tracked in the vendor system as ABC-12345.";
    assert!(link_is_referenced(
        "https://tracker.vendor.com/browse/ABC-12345",
        "link",
        doc
    ));
}

#[test]
fn lowercase_path_segment_is_not_an_article_id() {
    // "guide-2024" echoes in the doc, but it is not a vendor identifier
    let doc = "Published in guide-2024.";
    assert!(!link_is_referenced(
        "https://docs.vendor.com/guide-2024/page",
        "link",
        doc
    ));
}

#[test]
fn link_domain_plus_significant_segment() {
    let doc = "Configuration is covered on docs.vendor.com under syslog-forwarding.";
    assert!(link_is_referenced(
        "https://docs.vendor.com/en-us/v2/syslog-forwarding",
        "link",
        doc
    ));
}

#[test]
fn link_stopword_segments_do_not_count() {
    // only locale/version/generic segments besides the domain; domain alone
    // is not enough
    let doc = "More at docs.vendor.com.";
    assert!(!link_is_referenced(
        "https://docs.vendor.com/en-us/v2/docs",
        "link",
        doc
    ));
}

#[test]
fn link_text_majority_of_words() {
    let doc = "You must enable audit logging for the firewall before events flow.";
    assert!(link_is_referenced(
        "https://vendor.example/p?id=9",
        "Enable audit logging on the firewall",
        doc
    ));
}

#[test]
fn generic_link_text_is_ignored() {
    let doc = "The word link appears here.";
    assert!(!link_is_referenced("https://vendor.example/p?id=9", "link", doc));
}

#[test]
fn long_path_segment_as_phrase() {
    let doc = "Refer to configure syslog forwarding rules in the vendor manual.";
    assert!(link_is_referenced(
        "https://other.example/x/configure-syslog-forwarding-rules-for-export",
        "link",
        doc
    ));
}

#[test]
fn unreferenced_link_is_reported_missing() {
    let doc = "Nothing relevant here.";
    assert!(!link_is_referenced(
        "https://docs.vendor.com/en/setup-guide",
        "Setup guide for products",
        doc
    ));
}

#[test]
fn input_type_code_and_display_name() {
    assert!(input_type_is_mentioned("udp", "UDP", "Listens on a UDP port."));
    assert!(input_type_is_mentioned(
        "filestream",
        "Log file",
        "Reads each log file from disk."
    ));
}

#[test]
fn input_type_slash_normalization() {
    assert!(input_type_is_mentioned(
        "httpjson",
        "API / HTTP JSON",
        "Polls the API  HTTP JSON interface."
    ));
}

#[test]
fn input_type_synonyms() {
    assert!(input_type_is_mentioned(
        "winlog",
        "Windows Event Log",
        "Collects channels from the Event Viewer."
    ));
    assert!(input_type_is_mentioned(
        "aws-s3",
        "AWS S3 / SQS",
        "Notifications arrive through an SQS queue."
    ));
}

#[test]
fn input_type_absent() {
    assert!(!input_type_is_mentioned("udp", "UDP", "Only talks about files."));
}

#[test]
fn matcher_is_idempotent() {
    let doc = "See https://docs.vendor.com/en/setup-guide and the UDP listener.";
    let first = link_is_referenced("https://docs.vendor.com/en/setup-guide", "x", doc);
    let second = link_is_referenced("https://docs.vendor.com/en/setup-guide", "x", doc);
    assert_eq!(first, second);
    let a = input_type_is_mentioned("udp", "UDP", doc);
    let b = input_type_is_mentioned("udp", "UDP", doc);
    assert_eq!(a, b);
}

#[test]
fn data_stream_name_or_title() {
    assert!(data_stream_is_mentioned("auth_logs", "Auth Logs", "collects auth_logs"));
    assert!(data_stream_is_mentioned("auth_logs", "Auth Logs", "the Auth Logs stream"));
    assert!(!data_stream_is_mentioned("auth_logs", "Auth Logs", "unrelated text"));
    // empty titles never match everything
    assert!(!data_stream_is_mentioned("auth_logs", "", "unrelated text"));
}
