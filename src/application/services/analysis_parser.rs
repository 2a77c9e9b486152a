use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use crate::domain::{AiAnalysis, Education, WorkExperience};

static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```(?i:json)?\n?").expect("valid fence regex"));

/// Pulls the JSON object out of a model reply that may carry code fences or
/// surrounding prose. Returns `None` when no `{ ... }` span parses.
pub fn parse_analysis_response(reply: &str) -> Option<Value> {
    let stripped = CODE_FENCE.replace_all(reply, "");
    let stripped = stripped.trim();

    let start = stripped.find('{')?;
    let end = stripped.rfind('}')?;
    if end < start {
        return None;
    }

    serde_json::from_str(&stripped[start..=end]).ok()
}

/// Coerces any JSON value into a well-formed `AiAnalysis`. Never fails:
/// wrong-typed strings become `""`, wrong-typed arrays become `[]`, and
/// non-object entries of object arrays are dropped.
pub fn normalize_analysis(value: &Value) -> AiAnalysis {
    AiAnalysis {
        summary: string_field(value.get("summary")),
        skills: string_array(value.get("skills")),
        experience: object_array(value.get("experience"), |item| WorkExperience {
            company: string_field(item.get("company")),
            position: string_field(item.get("position")),
            period: string_field(item.get("period")),
            description: string_field(item.get("description")),
        }),
        education: object_array(value.get("education"), |item| Education {
            school: string_field(item.get("school")),
            degree: string_field(item.get("degree")),
            period: string_field(item.get("period")),
        }),
        certifications: string_array(value.get("certifications")),
    }
}

fn string_field(value: Option<&Value>) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn string_array(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_owned)
                .collect()
        })
        .unwrap_or_default()
}

fn object_array<T>(value: Option<&Value>, map: impl Fn(&Map<String, Value>) -> T) -> Vec<T> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().filter_map(Value::as_object).map(&map).collect())
        .unwrap_or_default()
}
