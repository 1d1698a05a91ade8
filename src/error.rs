use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Ruleset error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("Cannot build a unique shorthand for category: {0}")]
    UnresolvableShorthand(String),

    #[error("No account files found in {0}")]
    NoData(String),

    #[error("Bad record in {file}: {reason}")]
    BadRecord { file: String, reason: String },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;
