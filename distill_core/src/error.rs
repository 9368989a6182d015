use std::time::Duration;

use thiserror::Error;

use crate::provider::ProviderKind;

pub type Result<T> = std::result::Result<T, DistillError>;

#[derive(Debug, Error)]
pub enum DistillError {
    #[error("No provider registered for kind: {0}")]
    ProviderNotRegistered(ProviderKind),

    #[error("Provider {name} is unavailable: {reason}")]
    ProviderUnavailable { name: String, reason: String },

    #[error("Provider {name} timed out after {timeout:?}")]
    ProviderTimeout { name: String, timeout: Duration },

    #[error("Provider {name} failed: {source}")]
    ProviderFailed {
        name: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid category signature: {0}")]
    InvalidSignature(#[from] regex::Error),

    #[error("Invalid compression policy: {0}")]
    InvalidPolicy(String),

    #[error("No usable sentences found")]
    NoSentences,

    #[error("Sentence selection produced no output")]
    EmptySelection,
}
