//! Remediation prompt assembly.
//!
//! Builds the natural-language instruction handed to the external drafting
//! capability for a citation-fix revision pass. Pure formatting: no network
//! and no model calls happen here.

use crate::registry::SourceRegistry;
use crate::result::CitationValidationResult;

/// Keep the remediation prompt readable: at most this many existence errors.
const MAX_EXISTENCE_ERRORS: usize = 10;
/// At most this many accessibility findings; they are advisory anyway.
const MAX_ACCESSIBILITY_ERRORS: usize = 5;

/// Assemble the citation-fix instruction for a report that failed validation.
///
/// Lists the critical findings (existence capped at 10, format uncapped),
/// up to 5 accessibility findings, and the full enumerable citation list
/// from the registry, then appends the fixed editing rules.
pub fn build_fix_prompt(
    report: &str,
    result: &CitationValidationResult,
    registry: Option<&SourceRegistry>,
) -> String {
    let mut fix_instructions = Vec::new();

    if !result.source_existence_errors.is_empty() {
        fix_instructions.push(format!(
            "SOURCE EXISTENCE ERRORS (CRITICAL - must fix):\n{}",
            bullet_list(&result.source_existence_errors, MAX_EXISTENCE_ERRORS)
        ));
    }

    if !result.format_errors.is_empty() {
        fix_instructions.push(format!(
            "FORMAT ERRORS (CRITICAL - must fix):\n{}",
            bullet_list(&result.format_errors, result.format_errors.len())
        ));
    }

    if !result.url_accessibility_errors.is_empty() {
        fix_instructions.push(format!(
            "URL ACCESSIBILITY WARNINGS:\n{}",
            bullet_list(&result.url_accessibility_errors, MAX_ACCESSIBILITY_ERRORS)
        ));
    }

    let available_sources = match registry {
        Some(reg) if !reg.is_empty() => reg.to_citation_list(),
        _ => "No sources available".to_string(),
    };

    format!(
        "You are fixing citation issues in a research report.\n\
         \n\
         CURRENT REPORT:\n\
         {report}\n\
         \n\
         VALIDATION ERRORS TO FIX:\n\
         {fix_instructions}\n\
         \n\
         AVAILABLE SOURCES (these are the ONLY valid sources you can cite):\n\
         {available_sources}\n\
         \n\
         INSTRUCTIONS:\n\
         1. Remove or replace any citations that reference non-existent sources\n\
         2. Use markdown hyperlinks for all citations: [Source Title](URL)\n\
         3. Each citation should be a clickable link directly in the text\n\
         4. Ensure all citations in the body have corresponding entries in the Sources section\n\
         5. Do NOT invent new sources - only use sources from the AVAILABLE SOURCES list\n\
         6. If a claim cannot be properly cited, either remove it or clearly mark it as unverified\n\
         7. Maintain the overall structure and content of the report\n\
         8. Keep the Sources section at the end as a list of markdown hyperlinks:\n\
         \x20  - [Source Title 1](URL1)\n\
         \x20  - [Source Title 2](URL2)\n\
         \n\
         Output the corrected report in full.",
        fix_instructions = fix_instructions.join("\n")
    )
}

fn bullet_list(items: &[String], cap: usize) -> String {
    items
        .iter()
        .take(cap)
        .map(|e| format!("- {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
