use serde::{Deserialize, Serialize};

/// Structured candidate data produced from a résumé's text.
///
/// Replaced wholesale on every successful analysis, never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiAnalysis {
    pub summary: String,
    pub skills: Vec<String>,
    pub experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub period: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub period: String,
}
