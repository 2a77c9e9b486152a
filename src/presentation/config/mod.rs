mod environment;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    DatabaseSettings, ExtractionSettings, LlmProvider, LlmSettings, LoggingSettings, OcrProvider,
    OcrSettings, RepositoryProvider, ServerSettings, Settings, SettingsError, StorageProvider,
    StorageSettings, TextExtractorProvider, UploadSettings,
};
