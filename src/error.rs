use std::io;

/// Errors raised while configuring or running an ASE session.
#[derive(Debug, thiserror::Error)]
pub enum AseError {
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration { reason: String },

    #[error("entropy width queried on an empty table")]
    EmptyTableEntropyQuery,

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

impl AseError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration { reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, AseError>;
