use std::sync::LazyLock;

use regex::Regex;

static HORIZONTAL_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid whitespace regex"));
static EXCESS_NEWLINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid newline regex"));

/// Cleans extracted résumé text before analysis. Total and idempotent.
///
/// Horizontal whitespace runs become one space, every line is trimmed, and
/// runs of three or more newlines shrink to a single blank line.
pub fn normalize_extracted_text(text: &str) -> String {
    let collapsed = HORIZONTAL_WHITESPACE.replace_all(text, " ");

    let trimmed_lines = collapsed
        .split('\n')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join("\n");

    EXCESS_NEWLINES
        .replace_all(&trimmed_lines, "\n\n")
        .trim()
        .to_string()
}
