#![deny(unsafe_code)]

use std::path::PathBuf;

use ivr_model::DocumentType;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML definition {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid definition {path}: {message}")]
    InvalidDefinition { path: PathBuf, message: String },

    #[error("no configuration registered for manufacturer '{manufacturer}'")]
    ConfigurationNotFound { manufacturer: String },

    #[error(
        "manufacturer '{manufacturer}' has no {document_type} template configured"
    )]
    TemplateNotFound {
        manufacturer: String,
        document_type: DocumentType,
    },
}

impl RegistryError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidDefinition {
            path: path.into(),
            message: message.into(),
        }
    }

    /// True for the recoverable "known manufacturer, no template for this
    /// document type" condition. Callers may fall back to the generic
    /// configuration; every other variant is fatal.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::TemplateNotFound { .. })
    }
}
