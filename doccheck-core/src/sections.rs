use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
    pub line: usize,
}

#[derive(Clone, Debug)]
pub struct Section {
    pub heading: Heading,
    pub body: String,
}

static ANCHOR_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*(\[[^\]]*\]|\{[^}]*\})\s*$").unwrap());

fn strip_anchor(text: &str) -> String {
    ANCHOR_SUFFIX.replace(text, "").trim().to_string()
}

// All ATX headings in document order. Fenced code blocks are skipped so a
// `# comment` inside a shell snippet is not mistaken for a heading.
pub fn headings(doc: &str) -> Vec<Heading> {
    let mut out = Vec::new();
    let mut in_fence = false;
    for (idx, line) in doc.lines().enumerate() {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }
        if !line.starts_with('#') {
            continue;
        }
        let level = line.chars().take_while(|c| *c == '#').count();
        if level == 0 || level > 6 {
            continue;
        }
        let rest = &line[level..];
        if !rest.starts_with(' ') && !rest.is_empty() {
            continue;
        }
        out.push(Heading {
            level,
            text: strip_anchor(rest.trim()),
            line: idx,
        });
    }
    out
}

fn heading_matches(heading: &Heading, alias: &str) -> bool {
    let normalized = alias
        .trim_start_matches('#')
        .trim()
        .to_lowercase();
    heading.text.to_lowercase() == normalized
}

// Returns the span from the first heading matching any alias (inclusive) to
// the next heading of the same or a higher level (exclusive). Absence of the
// section is `None`, never an error.
pub fn extract_section(doc: &str, aliases: &[&str]) -> Option<Section> {
    let all = headings(doc);
    let (pos, start) = all
        .iter()
        .enumerate()
        .find(|(_, h)| aliases.iter().any(|a| heading_matches(h, a)))?;

    let lines: Vec<&str> = doc.lines().collect();
    let end_line = all[pos + 1..]
        .iter()
        .find(|h| h.level <= start.level)
        .map(|h| h.line)
        .unwrap_or(lines.len());

    let body = lines[start.line..end_line].join("\n");
    Some(Section {
        heading: start.clone(),
        body,
    })
}

pub fn section_present(doc: &str, aliases: &[&str]) -> bool {
    extract_section(doc, aliases).is_some()
}
