use thiserror::Error;

/// Source location information for error reporting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Optional file path
    pub file: Option<String>,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl SourceLocation {
    /// Create a new source location
    pub fn new(line: usize, column: usize) -> Self {
        Self {
            file: None,
            line,
            column,
        }
    }

    /// Attach a file path to this location
    pub fn in_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(file) = &self.file {
            write!(f, "{}:{}:{}", file, self.line, self.column)
        } else {
            write!(f, "{}:{}", self.line, self.column)
        }
    }
}

/// Errors that can occur while building macros or reading their inputs.
#[derive(Debug, Error)]
pub enum MacroError {
    /// `build()` was called before a body was supplied.
    #[error("Incomplete macro: '{macro_name}' has no body")]
    IncompleteMacro {
        /// Macro type identifier (e.g. `code`).
        macro_name: &'static str,
    },
    /// A language name outside the supported set.
    #[error("Unknown code block language: {0}")]
    UnknownLanguage(String),
    /// A theme name outside the supported set.
    #[error("Unknown code block theme: {0}")]
    UnknownTheme(String),
    /// markdown-rs parser error surfaced through the fence extractor.
    #[error("Markdown error at {location}: {message}")]
    Markdown {
        /// Error message
        message: String,
        /// Source location
        location: SourceLocation,
    },
    /// Macro options could not be decoded.
    #[error("Invalid macro options: {0}")]
    Options(String),
}

impl MacroError {
    /// Create a markdown error with location
    pub fn markdown(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self::Markdown {
            message: message.into(),
            location: SourceLocation::new(line, column),
        }
    }

    /// Attach the document path to a markdown error; other errors are
    /// returned unchanged.
    pub fn in_file(self, file: impl Into<String>) -> Self {
        match self {
            Self::Markdown { message, location } => Self::Markdown {
                message,
                location: location.in_file(file),
            },
            other => other,
        }
    }
}
