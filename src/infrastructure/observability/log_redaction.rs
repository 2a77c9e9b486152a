use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex")
});
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\+?\d[\d\- ]{8,}\d").expect("valid phone regex")
});
static CREDENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(bearer |api_key=|key=|password=|secret=|token=)[^\s&"']+"#)
        .expect("valid credential regex")
});

/// Short preview of résumé text or a model reply that is safe to log:
/// truncated, with contact details and credentials masked.
pub fn redact_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let masked = CREDENTIAL.replace_all(trimmed, "${1}[REDACTED]");
    let masked = EMAIL.replace_all(&masked, "[EMAIL]");
    let masked = PHONE.replace_all(&masked, "[PHONE]");

    let total_chars = trimmed.chars().count();
    if total_chars > MAX_VISIBLE_CHARS {
        let head: String = masked.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{head}... ({total_chars} chars total)")
    } else {
        masked.into_owned()
    }
}
