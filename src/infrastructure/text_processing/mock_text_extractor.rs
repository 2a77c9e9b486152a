use async_trait::async_trait;

use crate::application::ports::{ExtractedText, ExtractionError, TextExtractor};

pub const MOCK_RESUME_TEXT: &str = "【モック抽出テキスト】
山田 太郎
taro.yamada@example.com
090-1234-5678

【職務経歴】
株式会社サンプル（2020年4月 - 現在）
ソフトウェアエンジニアとしてWebアプリケーション開発に従事

【スキル】
JavaScript, TypeScript, React, Node.js, Python

【学歴】
東京工業大学 情報工学部（2014年4月 - 2018年3月）

【資格】
基本情報技術者、応用情報技術者";

/// Returns a fixed résumé text regardless of input. Used for offline runs.
pub struct MockTextExtractor {
    text: String,
}

impl Default for MockTextExtractor {
    fn default() -> Self {
        Self::new(MOCK_RESUME_TEXT)
    }
}

impl MockTextExtractor {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl TextExtractor for MockTextExtractor {
    async fn extract(&self, _data: &[u8]) -> Result<ExtractedText, ExtractionError> {
        Ok(ExtractedText {
            text: self.text.clone(),
            page_count: 1,
        })
    }
}
