use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipekitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Required environment variable(s) not set: {}", .0.join(", "))]
    MissingEnv(Vec<String>),

    #[error("Process error: {0}")]
    Proc(String),

    #[error("Unsupported unit {0}")]
    UnsupportedUnit(String),
}

pub type Result<T> = std::result::Result<T, PipekitError>;
