use confmark_core::MacroError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures reported by a [`crate::ContentClient`] implementation.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request could not be sent or no response was received.
    #[error("Request failed: {0}")]
    Request(String),
    /// The platform answered with an error status.
    #[error("Platform returned status {status}: {message}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response message
        message: String,
    },
    /// A response body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Errors raised while publishing pages or attachments.
#[derive(Debug, Error)]
pub enum PublishError {
    /// The parent page lookup returned no results.
    #[error("Parent page not found: {space}/{title}")]
    ParentNotFound {
        /// Space key
        space: String,
        /// Page title
        title: String,
    },
    /// The parent page has no content id.
    #[error("Parent page {space}/{title} has no id")]
    ParentWithoutId {
        /// Space key
        space: String,
        /// Page title
        title: String,
    },
    /// An attachment file could not be read.
    #[error("Unable to read attachment {}: {source}", path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The Markdown source document could not be read.
    #[error("Unable to read source document {}: {source}", path.display())]
    Source {
        /// File path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },
    /// The content client failed.
    #[error("Upload failed: {0}")]
    Client(#[from] ClientError),
    /// Page body could not be generated.
    #[error(transparent)]
    Macro(#[from] MacroError),
    /// Publish configuration could not be loaded.
    #[error("Invalid publish configuration: {0}")]
    Config(String),
}

/// Result alias for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_not_found_message() {
        let err = PublishError::ParentNotFound {
            space: "DOCS".to_string(),
            title: "Home".to_string(),
        };
        assert_eq!(err.to_string(), "Parent page not found: DOCS/Home");
    }

    #[test]
    fn read_failures_name_the_file_kind() {
        let attachment = PublishError::Io {
            path: PathBuf::from("build.log"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(
            attachment
                .to_string()
                .starts_with("Unable to read attachment build.log: ")
        );

        let source = PublishError::Source {
            path: PathBuf::from("guide.md"),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        assert!(
            source
                .to_string()
                .starts_with("Unable to read source document guide.md: ")
        );
    }

    #[test]
    fn client_errors_convert() {
        let err: PublishError = ClientError::Status {
            status: 403,
            message: "forbidden".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Upload failed: Platform returned status 403: forbidden"
        );
    }
}
