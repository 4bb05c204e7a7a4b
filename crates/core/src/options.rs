//! Declarative code block options, loadable from YAML.

use crate::code_block::{CodeBlockBuilder, Language, Theme};
use crate::error::MacroError;
use serde::{Deserialize, Serialize};

/// Code block settings that can be stored in configuration and applied to a
/// builder in one step.
///
/// ```
/// use confmark_core::{CodeBlockOptions, Language, ParameterName};
///
/// let options = CodeBlockOptions::from_yaml("language: c#\nlineNumbers: true\nfirstLine: 10\n")
///     .unwrap();
/// assert_eq!(options.language, Some(Language::CSharp));
///
/// let code = options.apply(confmark_core::CodeBlockMacro::builder())
///     .with_body("var x = 1;")
///     .build()
///     .unwrap();
/// assert_eq!(code.parameters().get(ParameterName::FirstLine), Some("10"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawCodeBlockOptions")]
pub struct CodeBlockOptions {
    /// Highlighting language (wire string, e.g. `xml`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Theme display name (e.g. `Midnight`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    /// Render collapsed.
    #[serde(default)]
    pub collapse: bool,
    /// Show line numbers.
    #[serde(default)]
    pub line_numbers: bool,
    /// First line number; ignored unless `line_numbers` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<u32>,
    /// Title shown above the code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Options as written in YAML; names are resolved through `FromStr`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawCodeBlockOptions {
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    collapse: bool,
    #[serde(default)]
    line_numbers: bool,
    #[serde(default)]
    first_line: Option<u32>,
    #[serde(default)]
    title: Option<String>,
}

impl TryFrom<RawCodeBlockOptions> for CodeBlockOptions {
    type Error = MacroError;

    fn try_from(raw: RawCodeBlockOptions) -> Result<Self, Self::Error> {
        Ok(Self {
            language: raw.language.as_deref().map(str::parse).transpose()?,
            theme: raw.theme.as_deref().map(str::parse).transpose()?,
            collapse: raw.collapse,
            line_numbers: raw.line_numbers,
            first_line: raw.first_line,
            title: raw.title,
        })
    }
}

impl CodeBlockOptions {
    /// Parses options from a YAML mapping. An empty document yields defaults.
    ///
    /// Unrecognised language or theme names fail with
    /// [`MacroError::UnknownLanguage`] / [`MacroError::UnknownTheme`]; other
    /// malformed input is [`MacroError::Options`].
    pub fn from_yaml(input: &str) -> Result<Self, MacroError> {
        if input.trim().is_empty() {
            return Ok(Self::default());
        }
        let raw: RawCodeBlockOptions =
            serde_yaml::from_str(input).map_err(|err| MacroError::Options(err.to_string()))?;
        raw.try_into()
    }

    /// Fills every unset field from `defaults`; fields already set here win.
    pub fn merged_over(self, defaults: &CodeBlockOptions) -> Self {
        Self {
            language: self.language.or(defaults.language),
            theme: self.theme.or(defaults.theme),
            collapse: self.collapse || defaults.collapse,
            line_numbers: self.line_numbers || defaults.line_numbers,
            first_line: self.first_line.or(defaults.first_line),
            title: self.title.or_else(|| defaults.title.clone()),
        }
    }

    /// Applies these options to `builder`.
    ///
    /// Line numbers are enabled before the first line is set so a configured
    /// `first_line` is honoured. Values already present on the builder win.
    pub fn apply(&self, mut builder: CodeBlockBuilder) -> CodeBlockBuilder {
        if let Some(language) = self.language {
            builder = builder.with_language(language);
        }
        if self.collapse {
            builder = builder.enable_collapse();
        }
        if self.line_numbers {
            builder = builder.enable_line_numbers();
        }
        if let Some(first) = self.first_line {
            builder = builder.with_first_line(first);
        }
        if let Some(theme) = self.theme {
            builder = builder.with_theme(theme);
        }
        if let Some(title) = &self.title {
            builder = builder.with_title(title.as_str());
        }
        builder
    }
}
