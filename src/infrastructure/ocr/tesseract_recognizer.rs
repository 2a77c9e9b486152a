use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;

use crate::application::ports::OcrError;

use super::{RecognizedPage, TextRecognizer};

pub const DEFAULT_LANGUAGES: &str = "jpn+eng";
const PAGE_TIMEOUT: Duration = Duration::from_secs(120);
const WORD_LEVEL: &str = "5";

/// Runs the `tesseract` CLI on one page image and reads its TSV output.
pub struct TesseractRecognizer {
    executable: String,
    languages: String,
}

impl TesseractRecognizer {
    pub fn new(executable: impl Into<String>, languages: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
            languages: languages.into(),
        }
    }
}

#[async_trait]
impl TextRecognizer for TesseractRecognizer {
    #[tracing::instrument(skip(self, png), fields(bytes = png.len(), languages = %self.languages))]
    async fn recognize(&self, png: &[u8]) -> Result<RecognizedPage, OcrError> {
        image::load_from_memory(png)
            .map_err(|e| OcrError::InvalidImage(format!("could not decode page image: {e}")))?;

        let temp_dir = tempfile::Builder::new()
            .prefix("resume-ocr-")
            .tempdir()
            .map_err(|e| OcrError::OcrFailed(format!("failed to create temp dir: {e}")))?;
        let input_path = temp_dir.path().join("page.png");
        tokio::fs::write(&input_path, png)
            .await
            .map_err(|e| OcrError::OcrFailed(format!("failed to write page image: {e}")))?;

        let mut command = Command::new(&self.executable);
        command
            .arg(&input_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .arg("tsv")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = tokio::time::timeout(PAGE_TIMEOUT, command.output())
            .await
            .map_err(|_| OcrError::OcrFailed("tesseract timed out".to_string()))?
            .map_err(|e| OcrError::OcrFailed(format!("failed to run {}: {e}", self.executable)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if stderr.contains("Could not load") || stderr.contains("cannot be read") {
                return Err(OcrError::InvalidImage(stderr.trim().to_string()));
            }
            return Err(OcrError::OcrFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(parse_tsv(&String::from_utf8_lossy(&output.stdout)))
    }
}

struct TsvWord<'a> {
    block: &'a str,
    paragraph: &'a str,
    line: &'a str,
    confidence: f32,
    text: &'a str,
}

/// Rebuilds page text from tesseract TSV rows: words on a line join with a
/// space (none between CJK characters), lines with a newline, paragraphs
/// with a blank line. Confidence is the mean over recognized words.
pub fn parse_tsv(tsv: &str) -> RecognizedPage {
    let words: Vec<TsvWord<'_>> = tsv
        .lines()
        .skip(1)
        .filter_map(|row| {
            let cols: Vec<&str> = row.split('\t').collect();
            if cols.len() < 11 || cols[0] != WORD_LEVEL {
                return None;
            }
            let text = cols.get(11).copied().unwrap_or("").trim();
            let confidence = cols[10].trim().parse::<f32>().ok()?;
            if text.is_empty() || confidence < 0.0 {
                return None;
            }
            Some(TsvWord {
                block: cols[2],
                paragraph: cols[3],
                line: cols[4],
                confidence,
                text,
            })
        })
        .collect();

    if words.is_empty() {
        return RecognizedPage {
            text: String::new(),
            confidence: 0.0,
        };
    }

    let confidence = words.iter().map(|w| w.confidence).sum::<f32>() / words.len() as f32;

    let mut text = String::new();
    let mut previous: Option<&TsvWord<'_>> = None;
    for word in &words {
        if let Some(prev) = previous {
            if (prev.block, prev.paragraph) != (word.block, word.paragraph) {
                text.push_str("\n\n");
            } else if prev.line != word.line {
                text.push('\n');
            } else if !(ends_with_cjk(prev.text) && starts_with_cjk(word.text)) {
                text.push(' ');
            }
        }
        text.push_str(word.text);
        previous = Some(word);
    }

    RecognizedPage { text, confidence }
}

fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}'
        | '\u{3040}'..='\u{309F}'
        | '\u{30A0}'..='\u{30FF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{FF00}'..='\u{FFEF}')
}

fn starts_with_cjk(s: &str) -> bool {
    s.chars().next().is_some_and(is_cjk)
}

fn ends_with_cjk(s: &str) -> bool {
    s.chars().next_back().is_some_and(is_cjk)
}
