//! The code block macro: closed option enumerations, builder and frozen value.

use crate::error::MacroError;
use crate::parameters::{ParameterName, ParameterSet};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Opening marker of the raw-literal envelope around the body.
pub const CDATA_OPEN: &str = "<![CDATA[";
/// Closing marker of the raw-literal envelope around the body.
pub const CDATA_CLOSE: &str = "]]>";

/// Languages supported by the code block macro.
///
/// (De)serializes as its wire string through [`FromStr`] and
/// [`Language::wire_str`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Language {
    ActionScript3,
    Bash,
    CSharp,
    ColdFusion,
    Cpp,
    Css,
    Delphi,
    Diff,
    Erlang,
    Groovy,
    /// HTML and XML share the `xml` highlighter.
    HtmlXml,
    Java,
    JavaFx,
    JavaScript,
    /// No syntax highlighting.
    None,
    Perl,
    Php,
    PowerShell,
    Python,
    Ruby,
    Scala,
    Sql,
    Vb,
}

impl Language {
    /// Every supported language, in declaration order.
    pub const ALL: [Language; 23] = [
        Language::ActionScript3,
        Language::Bash,
        Language::CSharp,
        Language::ColdFusion,
        Language::Cpp,
        Language::Css,
        Language::Delphi,
        Language::Diff,
        Language::Erlang,
        Language::Groovy,
        Language::HtmlXml,
        Language::Java,
        Language::JavaFx,
        Language::JavaScript,
        Language::None,
        Language::Perl,
        Language::Php,
        Language::PowerShell,
        Language::Python,
        Language::Ruby,
        Language::Scala,
        Language::Sql,
        Language::Vb,
    ];

    /// The value written into the `language` parameter.
    pub const fn wire_str(self) -> &'static str {
        match self {
            Language::ActionScript3 => "actionscript3",
            Language::Bash => "bash",
            Language::CSharp => "c#",
            Language::ColdFusion => "coldfusion",
            Language::Cpp => "cpp",
            Language::Css => "css",
            Language::Delphi => "delphi",
            Language::Diff => "diff",
            Language::Erlang => "erlang",
            Language::Groovy => "groovy",
            Language::HtmlXml => "xml",
            Language::Java => "java",
            Language::JavaFx => "javafx",
            Language::JavaScript => "js",
            Language::None => "none",
            Language::Perl => "perl",
            Language::Php => "php",
            Language::PowerShell => "powershell",
            Language::Python => "python",
            Language::Ruby => "ruby",
            Language::Scala => "scala",
            Language::Sql => "sql",
            Language::Vb => "vb",
        }
    }

    /// Maps a Markdown fence info language (e.g. `javascript`, `c++`) to a
    /// supported language.
    ///
    /// # Examples
    ///
    /// ```
    /// use confmark_core::Language;
    ///
    /// assert_eq!(Language::from_fence_lang("TypeScript"), None);
    /// assert_eq!(Language::from_fence_lang("csharp"), Some(Language::CSharp));
    /// assert_eq!(Language::from_fence_lang("html"), Some(Language::HtmlXml));
    /// ```
    pub fn from_fence_lang(lang: &str) -> Option<Self> {
        let lower = lang.trim().to_ascii_lowercase();
        let language = match lower.as_str() {
            "actionscript3" | "actionscript" | "as3" => Language::ActionScript3,
            "bash" | "sh" | "shell" | "zsh" => Language::Bash,
            "c#" | "csharp" | "cs" => Language::CSharp,
            "coldfusion" | "cfm" | "cfc" => Language::ColdFusion,
            "cpp" | "c++" | "cxx" | "cc" | "c" | "h" | "hpp" => Language::Cpp,
            "css" => Language::Css,
            "delphi" | "pascal" | "pas" => Language::Delphi,
            "diff" | "patch" => Language::Diff,
            "erlang" | "erl" => Language::Erlang,
            "groovy" | "gradle" => Language::Groovy,
            "xml" | "html" | "xhtml" | "svg" => Language::HtmlXml,
            "java" => Language::Java,
            "javafx" | "jfx" => Language::JavaFx,
            "js" | "javascript" | "jsx" | "mjs" => Language::JavaScript,
            "none" | "text" | "plain" | "plaintext" | "txt" => Language::None,
            "perl" | "pl" => Language::Perl,
            "php" => Language::Php,
            "powershell" | "ps1" | "pwsh" | "ps" => Language::PowerShell,
            "python" | "py" => Language::Python,
            "ruby" | "rb" => Language::Ruby,
            "scala" => Language::Scala,
            "sql" => Language::Sql,
            "vb" | "vbnet" | "vba" => Language::Vb,
            _ => return None,
        };
        Some(language)
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_str())
    }
}

impl FromStr for Language {
    type Err = MacroError;

    /// Parses an exact wire string (`c#`, `xml`, `js`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|language| language.wire_str() == s)
            .ok_or_else(|| MacroError::UnknownLanguage(s.to_string()))
    }
}

impl TryFrom<String> for Language {
    type Error = MacroError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Language> for &'static str {
    fn from(language: Language) -> Self {
        language.wire_str()
    }
}

/// Colour schemes available for the `theme` parameter.
///
/// Serializes as its display name and deserializes through [`FromStr`].
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "&'static str")]
pub enum Theme {
    DJango,
    Emacs,
    FadeToGrey,
    Midnight,
    RDark,
    Eclipse,
    /// The platform default (black and coloured text on a blank background).
    Confluence,
}

impl Theme {
    /// Every theme, in declaration order.
    pub const ALL: [Theme; 7] = [
        Theme::DJango,
        Theme::Emacs,
        Theme::FadeToGrey,
        Theme::Midnight,
        Theme::RDark,
        Theme::Eclipse,
        Theme::Confluence,
    ];

    /// Upper-case, underscore-separated identifier (e.g. `FADE_TO_GREY`).
    pub const fn identifier(self) -> &'static str {
        match self {
            Theme::DJango => "D_JANGO",
            Theme::Emacs => "EMACS",
            Theme::FadeToGrey => "FADE_TO_GREY",
            Theme::Midnight => "MIDNIGHT",
            Theme::RDark => "R_DARK",
            Theme::Eclipse => "ECLIPSE",
            Theme::Confluence => "CONFLUENCE",
        }
    }

    /// Upper-camel display name written into the `theme` parameter.
    pub const fn display_name(self) -> &'static str {
        match self {
            Theme::DJango => "DJango",
            Theme::Emacs => "Emacs",
            Theme::FadeToGrey => "FadeToGrey",
            Theme::Midnight => "Midnight",
            Theme::RDark => "RDark",
            Theme::Eclipse => "Eclipse",
            Theme::Confluence => "Confluence",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Theme {
    type Err = MacroError;

    /// Accepts the display name (`FadeToGrey`) or identifier (`FADE_TO_GREY`),
    /// ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Theme::ALL
            .into_iter()
            .find(|theme| {
                theme.display_name().eq_ignore_ascii_case(s)
                    || theme.identifier().eq_ignore_ascii_case(s)
            })
            .ok_or_else(|| MacroError::UnknownTheme(s.to_string()))
    }
}

impl TryFrom<String> for Theme {
    type Error = MacroError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Theme> for &'static str {
    fn from(theme: Theme) -> Self {
        theme.display_name()
    }
}

/// Macro body wrapped in the CDATA envelope.
///
/// The envelope declares the enclosed text opaque; nothing inside is escaped.
/// Code that itself contains `]]>` ends the section early and corrupts the
/// surrounding markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainTextBody {
    wrapped: String,
}

impl PlainTextBody {
    /// Wraps `code` in `<![CDATA[` ... `]]>`.
    pub fn wrap(code: &str) -> Self {
        if code.contains(CDATA_CLOSE) {
            log::warn!(
                "Code block body contains '{CDATA_CLOSE}'; the generated markup will be malformed"
            );
        }
        let mut wrapped = String::with_capacity(CDATA_OPEN.len() + code.len() + CDATA_CLOSE.len());
        wrapped.push_str(CDATA_OPEN);
        wrapped.push_str(code);
        wrapped.push_str(CDATA_CLOSE);
        Self { wrapped }
    }

    /// The enveloped text, exactly as it is serialized.
    pub fn as_str(&self) -> &str {
        &self.wrapped
    }

    /// The original code without the envelope.
    pub fn code(&self) -> &str {
        &self.wrapped[CDATA_OPEN.len()..self.wrapped.len() - CDATA_CLOSE.len()]
    }

    /// Returns true if the code contains the envelope terminator.
    pub fn is_terminator_unsafe(&self) -> bool {
        self.code().contains(CDATA_CLOSE)
    }
}

/// Fluent accumulator for a [`CodeBlockMacro`].
///
/// Every parameter setter keeps the first value it receives, so setters may be
/// called repeatedly and in any order. The one ordering dependency is
/// [`with_first_line`](Self::with_first_line), which only takes effect after
/// [`enable_line_numbers`](Self::enable_line_numbers).
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct CodeBlockBuilder {
    parameters: ParameterSet,
    body: Option<PlainTextBody>,
}

impl CodeBlockBuilder {
    /// Creates an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the highlighting language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.parameters
            .set(ParameterName::Language, language.wire_str());
        self
    }

    /// Makes the block collapsible.
    pub fn enable_collapse(mut self) -> Self {
        self.parameters.set(ParameterName::Collapse, "true");
        self
    }

    /// Shows line numbers.
    pub fn enable_line_numbers(mut self) -> Self {
        self.parameters.set(ParameterName::LineNumbers, "true");
        self
    }

    /// Sets the number of the first line.
    ///
    /// Dropped unless line numbers are already enabled.
    pub fn with_first_line(mut self, first: u32) -> Self {
        if self.parameters.has(ParameterName::LineNumbers) {
            self.parameters
                .set(ParameterName::FirstLine, first.to_string());
        } else {
            log::debug!("Ignoring first line {first}: line numbers are not enabled");
        }
        self
    }

    /// Sets the colour scheme.
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.parameters
            .set(ParameterName::Theme, theme.display_name());
        self
    }

    /// Sets the title shown above the code.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.parameters.set(ParameterName::Title, title);
        self
    }

    /// Sets the code to display.
    pub fn with_body(mut self, code: impl AsRef<str>) -> Self {
        self.body = Some(PlainTextBody::wrap(code.as_ref()));
        self
    }

    /// Freezes the accumulated state.
    ///
    /// # Errors
    ///
    /// [`MacroError::IncompleteMacro`] if no body was supplied.
    pub fn build(self) -> Result<CodeBlockMacro, MacroError> {
        let body = self.body.ok_or(MacroError::IncompleteMacro {
            macro_name: CodeBlockMacro::MACRO_NAME,
        })?;
        Ok(CodeBlockMacro {
            parameters: self.parameters,
            body,
        })
    }
}

/// An immutable code block macro ready for serialization.
///
/// # Examples
///
/// ```
/// use confmark_core::{CodeBlockMacro, Language};
///
/// let code = CodeBlockMacro::builder()
///     .with_language(Language::HtmlXml)
///     .with_body("<a/>")
///     .build()
///     .unwrap();
/// assert_eq!(
///     code.to_markup(),
///     "<ac:structured-macro ac:name=\"code\">\
///      <ac:parameter ac:name=\"language\">xml</ac:parameter>\
///      <ac:plain-text-body><![CDATA[<a/>]]></ac:plain-text-body>\
///      </ac:structured-macro>"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlockMacro {
    parameters: ParameterSet,
    body: PlainTextBody,
}

impl CodeBlockMacro {
    /// Macro type identifier written into `ac:name`.
    pub const MACRO_NAME: &'static str = "code";

    /// Starts a new builder.
    pub fn builder() -> CodeBlockBuilder {
        CodeBlockBuilder::new()
    }

    /// The frozen parameters.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// The enveloped body.
    pub fn body(&self) -> &PlainTextBody {
        &self.body
    }

    /// Serializes to storage-format markup.
    pub fn to_markup(&self) -> String {
        crate::serialize::render(self)
    }
}

impl std::fmt::Display for CodeBlockMacro {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_markup())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upper_camel(identifier: &str) -> String {
        identifier
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => {
                        first.to_ascii_uppercase().to_string() + &chars.as_str().to_lowercase()
                    }
                    None => String::new(),
                }
            })
            .collect()
    }

    #[test]
    fn theme_display_names_are_upper_camel_identifiers() {
        for theme in Theme::ALL {
            assert_eq!(theme.display_name(), upper_camel(theme.identifier()));
        }
    }

    #[test]
    fn language_wire_strings_round_trip_through_from_str() {
        for language in Language::ALL {
            assert_eq!(language.wire_str().parse::<Language>().unwrap(), language);
        }
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = "rust".parse::<Language>().unwrap_err();
        assert!(matches!(err, MacroError::UnknownLanguage(ref name) if name == "rust"));
    }

    #[test]
    fn theme_parses_display_name_and_identifier() {
        assert_eq!("FadeToGrey".parse::<Theme>().unwrap(), Theme::FadeToGrey);
        assert_eq!("fade_to_grey".parse::<Theme>().unwrap(), Theme::FadeToGrey);
        assert!(matches!(
            "Solarized".parse::<Theme>(),
            Err(MacroError::UnknownTheme(_))
        ));
    }

    #[test]
    fn fence_aliases() {
        assert_eq!(Language::from_fence_lang("c++"), Some(Language::Cpp));
        assert_eq!(Language::from_fence_lang("JavaScript"), Some(Language::JavaScript));
        assert_eq!(Language::from_fence_lang("sh"), Some(Language::Bash));
        assert_eq!(Language::from_fence_lang("py"), Some(Language::Python));
        assert_eq!(Language::from_fence_lang("rust"), None);
    }

    #[test]
    fn body_envelope() {
        let body = PlainTextBody::wrap("int x = 1;");
        assert_eq!(body.as_str(), "<![CDATA[int x = 1;]]>");
        assert_eq!(body.code(), "int x = 1;");
        assert!(!body.is_terminator_unsafe());
        assert!(PlainTextBody::wrap("a]]>b").is_terminator_unsafe());
    }

    #[test]
    fn build_without_body_is_incomplete() {
        let err = CodeBlockMacro::builder()
            .with_title("No body")
            .build()
            .unwrap_err();
        assert!(matches!(err, MacroError::IncompleteMacro { macro_name: "code" }));
    }

    #[test]
    fn build_with_body_succeeds() {
        let code = CodeBlockMacro::builder().with_body("x").build().unwrap();
        assert_eq!(code.body().code(), "x");
        assert!(code.parameters().is_empty());
    }

    #[test]
    fn repeated_setters_are_idempotent() {
        let once = CodeBlockMacro::builder()
            .enable_collapse()
            .with_body("x")
            .build()
            .unwrap();
        let twice = CodeBlockMacro::builder()
            .enable_collapse()
            .enable_collapse()
            .with_body("x")
            .build()
            .unwrap();
        assert_eq!(once, twice);

        let once = CodeBlockMacro::builder()
            .enable_line_numbers()
            .with_body("x")
            .build()
            .unwrap();
        let twice = CodeBlockMacro::builder()
            .enable_line_numbers()
            .enable_line_numbers()
            .with_body("x")
            .build()
            .unwrap();
        assert_eq!(once, twice);
        assert_eq!(twice.parameters().len(), 1);
    }

    #[test]
    fn first_first_line_wins() {
        let code = CodeBlockMacro::builder()
            .enable_line_numbers()
            .with_first_line(5)
            .with_first_line(7)
            .with_body("x")
            .build()
            .unwrap();
        assert_eq!(code.parameters().get(ParameterName::FirstLine), Some("5"));
    }

    #[test]
    fn first_title_wins() {
        let code = CodeBlockMacro::builder()
            .with_title("A")
            .with_title("B")
            .with_body("x")
            .build()
            .unwrap();
        assert_eq!(code.parameters().get(ParameterName::Title), Some("A"));
    }

    #[test]
    fn first_language_and_theme_win() {
        let code = CodeBlockMacro::builder()
            .with_theme(Theme::RDark)
            .with_language(Language::CSharp)
            .with_language(Language::Java)
            .with_theme(Theme::Emacs)
            .with_body("x")
            .build()
            .unwrap();
        assert_eq!(code.parameters().get(ParameterName::Language), Some("c#"));
        assert_eq!(code.parameters().get(ParameterName::Theme), Some("RDark"));
    }

    #[test]
    fn first_line_requires_line_numbers() {
        let gated = CodeBlockMacro::builder()
            .with_first_line(5)
            .with_body("x")
            .build()
            .unwrap();
        assert!(!gated.parameters().has(ParameterName::FirstLine));

        let applied = CodeBlockMacro::builder()
            .enable_line_numbers()
            .with_first_line(5)
            .with_body("x")
            .build()
            .unwrap();
        assert_eq!(applied.parameters().get(ParameterName::FirstLine), Some("5"));
    }

    #[test]
    fn first_line_before_line_numbers_stays_dropped() {
        let code = CodeBlockMacro::builder()
            .with_first_line(5)
            .enable_line_numbers()
            .with_body("x")
            .build()
            .unwrap();
        assert!(code.parameters().has(ParameterName::LineNumbers));
        assert!(!code.parameters().has(ParameterName::FirstLine));
    }

    #[test]
    fn later_body_replaces_earlier_body() {
        let code = CodeBlockMacro::builder()
            .with_body("first")
            .with_body("second")
            .build()
            .unwrap();
        assert_eq!(code.body().code(), "second");
    }

    #[test]
    fn built_macro_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CodeBlockMacro>();
    }
}
