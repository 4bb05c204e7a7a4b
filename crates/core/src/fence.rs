//! Markdown code blocks as code block macros.
//!
//! Fenced blocks are read from the mdast produced by markdown-rs. The info
//! string supplies the language and an optional meta string:
//!
//! ````markdown
//! ```java title="Example" showLineNumbers startLineNumber=10 collapse theme=Midnight
//! class A {}
//! ```
//! ````

use crate::code_block::{CodeBlockMacro, Language, Theme};
use crate::error::MacroError;
use crate::options::CodeBlockOptions;
use markdown::mdast::{Code, Node};
use markdown::message::{Message, Place};

/// A code block found in a Markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FencedCode {
    /// Language from the info string, as written.
    pub lang: Option<String>,
    /// Remainder of the info string after the language.
    pub meta: Option<String>,
    /// Code content without the fences.
    pub code: String,
    /// Line of the opening fence (1-indexed), when known.
    pub line: Option<usize>,
}

impl FencedCode {
    fn from_node(code: &Code) -> Self {
        Self {
            lang: code.lang.clone(),
            meta: code.meta.clone(),
            code: code.value.clone(),
            line: code.position.as_ref().map(|position| position.start.line),
        }
    }

    /// Interprets the info string as macro options.
    ///
    /// Unsupported languages fall back to [`Language::None`]; unknown meta
    /// keys are skipped.
    pub fn options(&self) -> CodeBlockOptions {
        let mut options = CodeBlockOptions::default();

        if let Some(lang) = self.lang.as_deref() {
            let language = Language::from_fence_lang(lang).unwrap_or_else(|| {
                log::warn!(
                    "Unsupported code block language '{}'{}; highlighting disabled",
                    lang,
                    self.line_suffix()
                );
                Language::None
            });
            options.language = Some(language);
        }

        let Some(meta) = self.meta.as_deref() else {
            return options;
        };

        for (key, value) in meta_tokens(meta) {
            match key.to_ascii_lowercase().as_str() {
                "title" => {
                    if options.title.is_none() {
                        options.title = value;
                    }
                }
                "showlinenumbers" | "linenumbers" => options.line_numbers = true,
                "startlinenumber" | "firstline" => {
                    match value.as_deref().map(str::parse::<u32>) {
                        Some(Ok(first)) => {
                            options.line_numbers = true;
                            options.first_line = Some(first);
                        }
                        _ => log::debug!("Ignoring invalid first line value {value:?}"),
                    }
                }
                "collapse" => options.collapse = true,
                "theme" => match value.as_deref().map(str::parse::<Theme>) {
                    Some(Ok(theme)) => options.theme = Some(theme),
                    Some(Err(err)) => log::warn!("{err}{}", self.line_suffix()),
                    None => log::debug!("Ignoring theme without a value"),
                },
                other => log::debug!("Ignoring code block meta key '{other}'"),
            }
        }

        options
    }

    /// Builds a code block macro from this block, filling unset options from
    /// `defaults`.
    pub fn to_macro(&self, defaults: &CodeBlockOptions) -> Result<CodeBlockMacro, MacroError> {
        self.options()
            .merged_over(defaults)
            .apply(CodeBlockMacro::builder())
            .with_body(&self.code)
            .build()
    }

    fn line_suffix(&self) -> String {
        self.line
            .map(|line| format!(" at line {line}"))
            .unwrap_or_default()
    }
}

/// Collects every code block of `input` in document order.
pub fn extract_code_blocks(input: &str) -> Result<Vec<FencedCode>, MacroError> {
    let root = markdown::to_mdast(input, &markdown::ParseOptions::gfm()).map_err(|err| {
        let (line, column) = message_position(&err);
        MacroError::markdown(err.to_string(), line, column)
    })?;

    let mut blocks = Vec::new();
    collect_code(&root, &mut blocks);
    Ok(blocks)
}

/// Converts every code block of `input` into a code block macro.
///
/// ```
/// use confmark_core::{CodeBlockOptions, markdown_to_code_macros};
///
/// let macros = markdown_to_code_macros("```py\nprint(1)\n```\n", &CodeBlockOptions::default())
///     .unwrap();
/// assert_eq!(macros.len(), 1);
/// assert!(macros[0].to_markup().contains("<![CDATA[print(1)]]>"));
/// ```
pub fn markdown_to_code_macros(
    input: &str,
    defaults: &CodeBlockOptions,
) -> Result<Vec<CodeBlockMacro>, MacroError> {
    extract_code_blocks(input)?
        .iter()
        .map(|block| block.to_macro(defaults))
        .collect()
}

fn collect_code(node: &Node, out: &mut Vec<FencedCode>) {
    if let Node::Code(code) = node {
        out.push(FencedCode::from_node(code));
    }
    if let Some(children) = node.children() {
        for child in children {
            collect_code(child, out);
        }
    }
}

fn message_position(message: &Message) -> (usize, usize) {
    match &message.place {
        Some(place) => match place.as_ref() {
            Place::Point(point) => (point.line, point.column),
            Place::Position(position) => (position.start.line, position.start.column),
        },
        None => (1, 1),
    }
}

/// Splits a meta string into `key` / `key=value` tokens. Values may be
/// wrapped in single or double quotes.
fn meta_tokens(meta: &str) -> Vec<(String, Option<String>)> {
    let mut tokens = Vec::new();
    let mut chars = meta.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut key = String::new();
        while let Some(c) = chars.next_if(|c| !c.is_whitespace() && *c != '=') {
            key.push(c);
        }

        let value = if chars.next_if_eq(&'=').is_some() {
            let mut value = String::new();
            match chars.next_if(|c| *c == '"' || *c == '\'') {
                Some(quote) => {
                    for c in chars.by_ref() {
                        if c == quote {
                            break;
                        }
                        value.push(c);
                    }
                }
                None => {
                    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
                        value.push(c);
                    }
                }
            }
            Some(value)
        } else {
            None
        };

        if !key.is_empty() {
            tokens.push((key, value));
        }
    }

    tokens
}
