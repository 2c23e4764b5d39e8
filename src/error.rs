use thiserror::Error;

/// Typed failures of the data layer.
///
/// Everything except [`DataError::MissingOptionalColumn`] is fatal when it
/// happens during start-up loading.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingRequiredColumn(String),
    #[error("line {line}, column '{column}': '{value}' is not a number")]
    InvalidNumber {
        line: usize,
        column: String,
        value: String,
    },
    #[error("line {line}: empty cluster label")]
    EmptyCluster { line: usize },
    #[error("column '{0}' is not present in the loaded data")]
    MissingOptionalColumn(&'static str),
}
