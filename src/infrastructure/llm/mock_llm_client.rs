use std::time::Duration;

use crate::application::ports::{LlmClient, LlmClientError};
use crate::application::services::RESUME_ANALYSIS_PROMPT;
use crate::domain::{AiAnalysis, Education, WorkExperience};

const KEYWORD_SKILLS: [(&str, &str); 4] = [
    ("javascript", "JavaScript"),
    ("typescript", "TypeScript"),
    ("react", "React"),
    ("python", "Python"),
];
const FALLBACK_SKILLS: [&str; 2] = ["コミュニケーション", "問題解決"];

/// Offline stand-in for a hosted model. Replies with a canned analysis whose
/// skills are sniffed from the résumé text in the prompt.
#[derive(Default)]
pub struct MockLlmClient {
    delay: Duration,
}

impl MockLlmClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn analysis_for(resume_text: &str) -> AiAnalysis {
        let lowered = resume_text.to_lowercase();
        let mut skills: Vec<String> = KEYWORD_SKILLS
            .iter()
            .filter(|(needle, _)| lowered.contains(needle))
            .map(|(_, skill)| skill.to_string())
            .collect();
        if skills.is_empty() {
            skills = FALLBACK_SKILLS.iter().map(|s| s.to_string()).collect();
        }

        AiAnalysis {
            summary: "【モック解析結果】Webアプリケーション開発の経験を持つエンジニアです。\
                      フロントエンドからバックエンドまで幅広く担当してきました。"
                .to_string(),
            skills,
            experience: vec![
                WorkExperience {
                    company: "株式会社サンプル".to_string(),
                    position: "ソフトウェアエンジニア".to_string(),
                    period: "2020年4月 - 現在".to_string(),
                    description: "Webアプリケーションの設計・開発・運用を担当".to_string(),
                },
                WorkExperience {
                    company: "テスト株式会社".to_string(),
                    position: "プログラマー".to_string(),
                    period: "2018年4月 - 2020年3月".to_string(),
                    description: "業務システムの開発と保守".to_string(),
                },
            ],
            education: vec![Education {
                school: "サンプル大学".to_string(),
                degree: "情報工学部".to_string(),
                period: "2014年4月 - 2018年3月".to_string(),
            }],
            certifications: vec!["基本情報技術者".to_string(), "応用情報技術者".to_string()],
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let resume_text = prompt
            .strip_prefix(RESUME_ANALYSIS_PROMPT)
            .unwrap_or(prompt);
        serde_json::to_string(&Self::analysis_for(resume_text))
            .map_err(|e| LlmClientError::InvalidResponse(e.to_string()))
    }
}
