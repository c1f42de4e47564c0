use thiserror::Error;

/// Rejected configuration: bad option values, unsupported settings, or an
/// unreadable options file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid theme \"{0}\": must be \"light\" or \"dark\"")]
    InvalidTheme(String),

    #[error("unsupported language \"{requested}\" (supported: {supported})")]
    UnsupportedLanguage { requested: String, supported: String },

    #[error("invalid zoom configuration: {0}")]
    InvalidZoom(String),

    #[error("failed to read options file {path}: {source}")]
    OptionsFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse options file: {0}")]
    OptionsFileParse(#[from] serde_yaml::Error),

    #[error("invalid widget options: {0}")]
    OptionsParse(#[from] serde_json::Error),

    #[error("invalid translation table: {0}")]
    Translations(String),
}

/// Remote payloads that cannot be turned into store records.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("response has no \"data\" array")]
    MissingData,
}
