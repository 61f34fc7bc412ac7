use thiserror::Error;

#[derive(Error, Debug)]
pub enum GrammarError {
    #[error("Grammar field '{0}' must not be empty")]
    EmptyField(&'static str),

    #[error("Invalid pattern in '{field}': {source}")]
    InvalidPattern {
        field: &'static str,
        #[source]
        source: regex::Error,
    },

    #[error("Failed to read grammar descriptor: {0}")]
    Descriptor(#[from] serde_json::Error),
}
