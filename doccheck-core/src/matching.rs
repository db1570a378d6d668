use once_cell::sync::Lazy;
use regex::Regex;

// Path segments that carry no identity on their own: locale codes, version
// tokens and generic documentation words.
const PATH_STOPWORDS: &[&str] = &[
    "en", "en-us", "en-gb", "us", "de", "fr", "es", "ja", "ko", "pt", "zh", "www", "latest",
    "current", "stable", "v1", "v2", "v3", "docs", "doc", "documentation", "help", "article",
    "articles", "kb", "knowledge", "support", "page", "pages", "view", "index", "home", "content",
    "topics", "topic", "guide", "guides", "reference", "html", "htm", "php", "aspx",
];

const TEXT_STOPWORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "of", "to", "for", "in", "on", "with", "how", "your", "this",
    "that", "is", "are", "by", "at", "from", "into", "about",
];

// The ticket-id alternative stays case-sensitive; a lowercase path segment
// like "guide-2024" is not an identifier.
static ARTICLE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?i:(?:KB|kA|INC|DOC)[0-9A-Za-z]{4,})\b|\b[A-Z]{2,5}-[0-9]{3,}\b").unwrap());

static URL_PARTS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[a-z][a-z0-9+.-]*://([^/?#]+)([^?#]*)").unwrap());

fn words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| w.to_string())
        .collect()
}

fn significant_words(text: &str) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| !TEXT_STOPWORDS.contains(&w.as_str()))
        .collect()
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    !needle.is_empty() && haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn url_host_and_segments(url: &str) -> Option<(String, Vec<String>)> {
    let caps = URL_PARTS.captures(url)?;
    let host = caps
        .get(1)
        .map(|m| m.as_str().trim_start_matches("www.").to_lowercase())?;
    let segments = caps
        .get(2)
        .map(|m| {
            m.as_str()
                .split('/')
                .filter(|s| !s.is_empty())
                .map(|s| s.to_lowercase())
                .collect()
        })
        .unwrap_or_default();
    Some((host, segments))
}

fn is_significant_segment(segment: &str) -> bool {
    segment.len() > 3 && !PATH_STOPWORDS.contains(&segment)
}

// Layered link-presence match, most exact first. Each layer is more lenient
// than the last; the stack as a whole favors recall so a paraphrased but
// faithful document is not flagged as missing the reference.
pub fn link_is_referenced(url: &str, link_text: &str, doc: &str) -> bool {
    // (a) exact URL substring
    if contains_ci(doc, url) {
        return true;
    }

    // (b) vendor article identifier embedded in the URL
    if let Some(id) = ARTICLE_ID.find(url) {
        if contains_ci(doc, id.as_str()) {
            return true;
        }
    }

    // (c) domain plus a significant path segment
    if let Some((host, segments)) = url_host_and_segments(url) {
        if contains_ci(doc, &host)
            && segments
                .iter()
                .any(|s| is_significant_segment(s) && contains_ci(doc, s))
        {
            return true;
        }

        // (e) long descriptive path segment, hyphens normalized to spaces
        for segment in &segments {
            if segment.len() > 15 {
                let phrase = segment.replace('-', " ");
                if contains_ci(doc, &phrase) {
                    return true;
                }
                let first_three: Vec<&str> = phrase.split_whitespace().take(3).collect();
                if first_three.len() == 3 && contains_ci(doc, &first_three.join(" ")) {
                    return true;
                }
            }
        }
    }

    // (d) non-generic link text
    let text = link_text.trim();
    if !text.eq_ignore_ascii_case("link") && text.len() > 10 {
        if contains_ci(doc, text) {
            return true;
        }
        let significant = significant_words(text);
        if !significant.is_empty() {
            let needed = significant.len().div_ceil(2);
            let found = significant.iter().filter(|w| contains_ci(doc, w)).count();
            if found >= needed {
                return true;
            }
        }
    }

    false
}

// Hand-curated phrasings that count as mentioning a transport even when
// neither the type code nor the display name appears.
fn synonyms_for(input_type: &str) -> &'static [&'static str] {
    match input_type {
        "udp" => &["syslog over udp", "datagram", "udp listener", "udp port"],
        "tcp" => &["syslog over tcp", "tcp listener", "tcp port", "tcp connection"],
        "filestream" | "logfile" => &["log file", "log files", "file tailing", "tailing files"],
        "httpjson" => &["rest api", "api polling", "http api", "api endpoint"],
        "http_endpoint" => &["webhook", "incoming http", "http listener"],
        "aws-s3" => &["s3 bucket", "sqs queue", "s3 notification"],
        "gcs" => &["cloud storage bucket", "gcs bucket"],
        "azure-eventhub" => &["event hub", "event hubs"],
        "cel" => &["cel program", "common expression language"],
        "winlog" => &["windows event log", "event viewer", "event channel"],
        "journald" => &["systemd journal", "journal entries"],
        "netflow" => &["flow records", "ipfix", "flow export"],
        "redis" => &["redis slowlog", "redis keyspace"],
        "kafka" => &["kafka topic", "consumer group"],
        _ => &[],
    }
}

// Layered input-type mention match mirroring the link strategy: exact code,
// then display-name variants, then word majority, then curated synonyms.
pub fn input_type_is_mentioned(input_type: &str, display_name: &str, doc: &str) -> bool {
    if contains_ci(doc, input_type) {
        return true;
    }
    if contains_ci(doc, display_name) {
        return true;
    }
    if display_name.contains('/') {
        if contains_ci(doc, &display_name.replace('/', " "))
            || contains_ci(doc, &display_name.replace('/', "-"))
        {
            return true;
        }
    }
    let normalized = display_name.replace(['/', '-'], " ");
    let significant = significant_words(&normalized);
    if significant.len() > 1 {
        let needed = significant.len().div_ceil(2);
        let found = significant.iter().filter(|w| contains_ci(doc, w)).count();
        if found >= needed {
            return true;
        }
    }
    synonyms_for(input_type).iter().any(|s| contains_ci(doc, s))
}

// Whether either the stream name or its human title appears in the document.
pub fn data_stream_is_mentioned(name: &str, title: &str, doc: &str) -> bool {
    contains_ci(doc, name) || (!title.trim().is_empty() && contains_ci(doc, title))
}
