#![deny(missing_docs)]
//! confmark core: code block macros for wiki storage-format markup.
//!
//! A [`CodeBlockBuilder`] collects parameters (first write wins) and a body,
//! [`CodeBlockBuilder::build`] freezes them into a [`CodeBlockMacro`], and
//! [`serialize::render`] turns any [`StructuredMacro`] into markup.
//!
//! ```
//! use confmark_core::{CodeBlockMacro, Language};
//!
//! let markup = CodeBlockMacro::builder()
//!     .with_language(Language::Java)
//!     .enable_line_numbers()
//!     .with_first_line(1)
//!     .with_title("Example")
//!     .with_body("class A {}")
//!     .build()
//!     .unwrap()
//!     .to_markup();
//! assert!(markup.starts_with(r#"<ac:structured-macro ac:name="code">"#));
//! ```

/// Code block macro, builder, and option enumerations.
pub mod code_block;
/// Core error types.
pub mod error;
/// Markdown code block extraction.
pub mod fence;
/// Declarative code block options.
pub mod options;
/// Parameter names and the first-write-wins parameter set.
pub mod parameters;
/// Storage-format serialization.
pub mod serialize;

pub use code_block::{
    CDATA_CLOSE, CDATA_OPEN, CodeBlockBuilder, CodeBlockMacro, Language, PlainTextBody, Theme,
};
pub use error::{MacroError, SourceLocation};
pub use fence::{FencedCode, extract_code_blocks, markdown_to_code_macros};
pub use options::CodeBlockOptions;
pub use parameters::{ParameterName, ParameterSet};
pub use serialize::{MarkupWriter, StructuredMacro, render, render_all};
