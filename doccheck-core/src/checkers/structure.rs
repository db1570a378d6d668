use crate::checker::Checker;
use crate::domain::{Dimension, PackageContext, Severity, StagedValidationResult, ValidationIssue};
use crate::sections::{headings, Heading};
use std::collections::HashMap;

// A subsection repeated more often than this suggests the generator looped.
const MAX_SUBSECTION_REPEATS: usize = 3;

struct RequiredSection {
    canonical: &'static str,
    aliases: &'static [&'static str],
    subsections: &'static [RequiredSubsection],
}

struct RequiredSubsection {
    canonical: &'static str,
    aliases: &'static [&'static str],
}

const REQUIRED_SECTIONS: &[RequiredSection] = &[
    RequiredSection {
        canonical: "Overview",
        aliases: &["overview", "introduction"],
        subsections: &[],
    },
    RequiredSection {
        canonical: "Setup",
        aliases: &[
            "setup",
            "set up",
            "getting started",
            "installation",
            "how do i deploy this integration?",
        ],
        subsections: &[
            RequiredSubsection {
                canonical: "Prerequisites",
                aliases: &["prerequisites", "requirements", "before you begin"],
            },
            RequiredSubsection {
                canonical: "Validation",
                aliases: &["validation", "validate", "verify the data"],
            },
        ],
    },
    RequiredSection {
        canonical: "Reference",
        aliases: &["reference", "data reference", "fields reference"],
        subsections: &[],
    },
    RequiredSection {
        canonical: "Troubleshooting",
        aliases: &["troubleshooting", "troubleshoot", "common problems"],
        subsections: &[],
    },
    RequiredSection {
        canonical: "Performance and scaling",
        aliases: &[
            "performance and scaling",
            "scaling and performance",
            "scaling",
            "performance",
        ],
        subsections: &[],
    },
];

pub struct StructureChecker;

impl StructureChecker {
    fn issue(
        severity: Severity,
        location: impl Into<String>,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> ValidationIssue {
        ValidationIssue::new(severity, Dimension::Structure, location, message, suggestion)
    }
}

fn matches_alias(heading: &Heading, aliases: &[&str]) -> bool {
    let text = heading.text.to_lowercase();
    aliases.iter().any(|a| text == *a)
}

// Aliased headings fold onto their canonical section so "Setup" and
// "Getting started" count as the same section.
fn canonical_section_name<'a>(text: &'a str) -> &'a str {
    let lower = text.to_lowercase();
    REQUIRED_SECTIONS
        .iter()
        .find(|r| r.aliases.contains(&lower.as_str()))
        .map(|r| r.canonical)
        .unwrap_or(text)
}

fn find_section_range(all: &[Heading], idx: usize) -> usize {
    let level = all[idx].level;
    all[idx + 1..]
        .iter()
        .position(|h| h.level <= level)
        .map(|p| idx + 1 + p)
        .unwrap_or(all.len())
}

fn empty_code_blocks(doc: &str) -> usize {
    let mut count = 0;
    let mut in_fence = false;
    let mut fence_has_content = false;
    for line in doc.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
            if in_fence {
                if !fence_has_content {
                    count += 1;
                }
                in_fence = false;
            } else {
                in_fence = true;
                fence_has_content = false;
            }
        } else if in_fence && !trimmed.is_empty() {
            fence_has_content = true;
        }
    }
    count
}

impl Checker for StructureChecker {
    fn name(&self) -> &str {
        "structure"
    }

    fn dimension(&self) -> Dimension {
        Dimension::Structure
    }

    fn check(&self, doc: &str, _ctx: &PackageContext) -> StagedValidationResult {
        let mut issues = Vec::new();
        let all = headings(doc);

        if all.is_empty() {
            issues.push(Self::issue(
                Severity::Critical,
                "Document",
                "document contains no headings",
                "Regenerate the document with the expected section template",
            ));
            return StagedValidationResult::from_issues(Dimension::Structure, issues);
        }

        let titles = all.iter().filter(|h| h.level == 1).count();
        if titles > 1 {
            issues.push(Self::issue(
                Severity::Critical,
                "Document",
                format!("document has {titles} top-level titles, expected at most one"),
                "Keep a single level-1 title and demote the others",
            ));
        }

        // Required top-level sections: exactly one critical issue per absence.
        for required in REQUIRED_SECTIONS {
            let positions: Vec<usize> = all
                .iter()
                .enumerate()
                .filter(|(_, h)| h.level == 2 && matches_alias(h, required.aliases))
                .map(|(i, _)| i)
                .collect();

            if positions.is_empty() {
                issues.push(Self::issue(
                    Severity::Critical,
                    required.canonical,
                    format!("required section \"{}\" is missing", required.canonical),
                    format!("Add a \"## {}\" section", required.canonical),
                ));
                continue;
            }

            let start = positions[0];
            let end = find_section_range(&all, start);
            for sub in required.subsections {
                let present = all[start + 1..end]
                    .iter()
                    .any(|h| h.level == 3 && matches_alias(h, sub.aliases));
                if !present {
                    issues.push(Self::issue(
                        Severity::Major,
                        format!("{} > {}", required.canonical, sub.canonical),
                        format!(
                            "required subsection \"{}\" is missing under \"{}\"",
                            sub.canonical, required.canonical
                        ),
                        format!("Add a \"### {}\" subsection", sub.canonical),
                    ));
                }
            }
        }

        // Any repeated top-level section is a defect, required or not.
        let mut sec_counts: HashMap<String, (String, usize)> = HashMap::new();
        for h in all.iter().filter(|h| h.level == 2) {
            let canonical = canonical_section_name(&h.text);
            let entry = sec_counts
                .entry(canonical.to_lowercase())
                .or_insert_with(|| (canonical.to_string(), 0));
            entry.1 += 1;
        }
        for (display, count) in sec_counts.into_values() {
            if count > 1 {
                issues.push(Self::issue(
                    Severity::Critical,
                    display.clone(),
                    format!("section \"{display}\" appears {count} times"),
                    "Merge the duplicated sections into one",
                ));
            }
        }

        // Runaway subsection repetition points at generation loops.
        let mut sub_counts: HashMap<String, usize> = HashMap::new();
        for h in all.iter().filter(|h| h.level == 3) {
            *sub_counts.entry(h.text.to_lowercase()).or_default() += 1;
        }
        for (text, count) in sub_counts {
            if count > MAX_SUBSECTION_REPEATS {
                issues.push(Self::issue(
                    Severity::Major,
                    "Document",
                    format!("subsection \"{text}\" is repeated {count} times"),
                    "Deduplicate the repeated subsections",
                ));
            }
        }

        for pair in all.windows(2) {
            if pair[1].level > pair[0].level + 1 {
                issues.push(Self::issue(
                    Severity::Minor,
                    pair[1].text.clone(),
                    format!(
                        "heading level jumps from {} to {}",
                        pair[0].level, pair[1].level
                    ),
                    "Use sequential heading levels",
                ));
            }
        }

        let empty_fences = empty_code_blocks(doc);
        if empty_fences > 0 {
            issues.push(Self::issue(
                Severity::Minor,
                "Document",
                format!("{empty_fences} empty fenced code block(s)"),
                "Fill in or remove empty code blocks",
            ));
        }

        StagedValidationResult::from_issues(Dimension::Structure, issues)
    }
}
