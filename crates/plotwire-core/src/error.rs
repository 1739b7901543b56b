pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Invalid value for {argument}: {value}")]
    InvalidSeries {
        argument: &'static str,
        value: String,
    },

    #[error("Non-numeric value for {argument} at index {index}")]
    NonNumeric { argument: &'static str, index: usize },

    #[error("Length mismatch for {what}: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid color: {0}")]
    InvalidColor(String),
}
