use resume_pipeline::application::ports::OcrError;
use resume_pipeline::infrastructure::ocr::{DEFAULT_LANGUAGES, TesseractRecognizer, TextRecognizer};

use crate::helpers::png_image;

#[test]
fn given_default_languages_then_cover_japanese_and_english() {
    assert_eq!(DEFAULT_LANGUAGES, "jpn+eng");
}

#[tokio::test]
async fn given_bytes_that_are_not_an_image_when_recognizing_then_returns_invalid_image() {
    let recognizer = TesseractRecognizer::new("tesseract", DEFAULT_LANGUAGES);

    let result = recognizer.recognize(b"definitely not a png").await;

    assert!(matches!(result, Err(OcrError::InvalidImage(_))));
}

#[tokio::test]
async fn given_missing_tesseract_binary_when_recognizing_then_returns_ocr_failed() {
    let recognizer =
        TesseractRecognizer::new("/nonexistent/bin/tesseract-missing", DEFAULT_LANGUAGES);

    let result = recognizer.recognize(&png_image(8, 8)).await;

    assert!(matches!(result, Err(OcrError::OcrFailed(_))));
}
