use crate::domain::{Dimension, StagedValidationResult};

// Merge policy: validity is the AND of both passes, issues concatenate with
// their provenance tags intact, and the semantic score wins when present
// since it judges the document as a whole.
pub fn merge_results(
    dimension: Dimension,
    static_result: Option<StagedValidationResult>,
    semantic_result: Option<StagedValidationResult>,
) -> StagedValidationResult {
    match (static_result, semantic_result) {
        (None, None) => StagedValidationResult::passing(dimension),
        (Some(r), None) | (None, Some(r)) => r,
        (Some(stat), Some(sem)) => {
            let mut issues = stat.issues;
            issues.extend(sem.issues);

            let mut warnings = stat.warnings;
            warnings.extend(sem.warnings);

            let mut suggestions = stat.suggestions;
            for s in sem.suggestions {
                if !suggestions.contains(&s) {
                    suggestions.push(s);
                }
            }

            StagedValidationResult {
                dimension,
                valid: stat.valid && sem.valid,
                score: sem.score,
                issues,
                warnings,
                suggestions,
            }
        }
    }
}

pub fn render_feedback(results: &[StagedValidationResult]) -> String {
    let mut out = String::new();
    let failed = results.iter().filter(|r| !r.valid).count();
    if failed == 0 {
        out.push_str("# Documentation check: PASS\n");
    } else {
        out.push_str(&format!(
            "# Documentation check: FAIL ({failed} of {} dimensions)\n",
            results.len()
        ));
    }

    for result in results {
        out.push_str(&format!(
            "\n## {} — {} (score {})\n",
            result.dimension.label(),
            if result.valid { "valid" } else { "invalid" },
            result.score
        ));
        for issue in &result.issues {
            out.push_str(&format!(
                "- [{}] {}: {} → Fix: {}\n",
                issue.severity.label(),
                issue.location,
                issue.message,
                issue.suggestion
            ));
        }
        for warning in &result.warnings {
            out.push_str(&format!("- [WARN] {warning}\n"));
        }
        for suggestion in &result.suggestions {
            out.push_str(&format!("- Suggestion: {suggestion}\n"));
        }
    }
    out
}
