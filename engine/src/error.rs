use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CheckError {
    /// A variant name that the threshold table does not know.
    #[error("unknown variant '{variant}' for system '{system}'")]
    Configuration { system: String, variant: String },

    #[error("unknown game system '{0}'")]
    UnknownSystem(String),

    /// Numeric input outside what a check accepts (dice count, die size, faces).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A threshold table that failed to parse or validate.
    #[error("threshold table: {0}")]
    Table(String),
}

impl CheckError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn table(msg: impl Into<String>) -> Self {
        Self::Table(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, CheckError>;
