use config::{Config, File, FileFormat};

use resume_pipeline::domain::MAX_RESUME_BYTES;
use resume_pipeline::presentation::config::{
    Environment, LlmProvider, OcrProvider, RepositoryProvider, Settings, StorageProvider,
    TextExtractorProvider,
};

fn parse(toml: &str) -> Settings {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

#[test]
fn given_no_overrides_when_defaulting_then_uses_production_backends() {
    let settings = Settings::default();

    assert_eq!(settings.server.port, 3000);
    assert_eq!(settings.database.provider, RepositoryProvider::Postgres);
    assert_eq!(settings.storage.provider, StorageProvider::Local);
    assert_eq!(settings.extraction.provider, TextExtractorProvider::Pdf);
    assert_eq!(settings.ocr.provider, OcrProvider::Tesseract);
    assert_eq!(settings.ocr.languages, "jpn+eng");
    assert_eq!(settings.llm.provider, LlmProvider::Gemini);
    assert_eq!(settings.llm.model, "gemini-2.5-flash");
    assert_eq!(settings.upload.max_bytes, MAX_RESUME_BYTES);
}

#[test]
fn given_partial_toml_when_deserializing_then_fills_remaining_defaults() {
    let settings = parse(
        r#"
        [server]
        port = 8080

        [llm]
        provider = "openai"
        model = "gpt-4o-mini"
        base_url = "http://localhost:1234"

        [ocr]
        provider = "disabled"
        "#,
    );

    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.server.host, "0.0.0.0");
    assert_eq!(settings.llm.provider, LlmProvider::OpenAi);
    assert_eq!(settings.llm.base_url.as_deref(), Some("http://localhost:1234"));
    assert_eq!(settings.llm.timeout_secs, 120);
    assert_eq!(settings.ocr.provider, OcrProvider::Disabled);
    assert_eq!(settings.ocr.tesseract_path, "tesseract");
}

#[test]
fn given_memory_backends_when_deserializing_then_selects_them() {
    let settings = parse(
        r#"
        [database]
        provider = "memory"

        [storage]
        provider = "memory"

        [extraction]
        provider = "mock"

        [llm]
        provider = "mock"
        mock_delay_ms = 50
        "#,
    );

    assert_eq!(settings.database.provider, RepositoryProvider::Memory);
    assert_eq!(settings.storage.provider, StorageProvider::Memory);
    assert_eq!(settings.extraction.provider, TextExtractorProvider::Mock);
    assert_eq!(settings.llm.provider, LlmProvider::Mock);
    assert_eq!(settings.llm.mock_delay_ms, 50);
}

#[test]
fn given_unknown_provider_when_deserializing_then_fails() {
    let result = Config::builder()
        .add_source(File::from_str("[llm]\nprovider = \"claude\"", FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize::<Settings>();

    assert!(result.is_err());
}

#[test]
fn given_environment_names_when_parsing_then_accepts_aliases() {
    assert_eq!(Environment::try_from("Production".to_string()), Ok(Environment::Prod));
    assert_eq!(Environment::try_from(" test ".to_string()), Ok(Environment::Test));
    assert_eq!(Environment::try_from("dev".to_string()), Ok(Environment::Local));
    assert!(Environment::try_from("staging".to_string()).is_err());
}

#[test]
fn given_environment_when_naming_overlay_then_uses_lowercase_file() {
    assert_eq!(Environment::Test.settings_file(), "appsettings.test");
    assert_eq!(Environment::default(), Environment::Local);
}
