//! Storage-format serialization of structured macros.
//!
//! Output is a single unbroken string: no whitespace between elements and
//! no escaping of parameter values or body text.

use crate::code_block::CodeBlockMacro;

/// A macro that can be rendered as an `ac:structured-macro` element.
pub trait StructuredMacro {
    /// Macro type identifier written into `ac:name` (e.g. `code`).
    fn macro_name(&self) -> &str;

    /// Parameters as `(wire name, value)` pairs, in output order.
    fn parameter_pairs(&self) -> Vec<(&str, &str)>;

    /// Body text, already wrapped in its envelope.
    fn plain_text_body(&self) -> &str;
}

impl StructuredMacro for CodeBlockMacro {
    fn macro_name(&self) -> &str {
        Self::MACRO_NAME
    }

    fn parameter_pairs(&self) -> Vec<(&str, &str)> {
        self.parameters()
            .entries()
            .map(|(name, value)| (name.wire_name(), value))
            .collect()
    }

    fn plain_text_body(&self) -> &str {
        self.body().as_str()
    }
}

/// Append-only buffer for storage-format markup.
#[derive(Debug, Default)]
pub struct MarkupWriter {
    out: String,
}

impl MarkupWriter {
    /// Creates an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes one complete structured macro.
    pub fn write_macro<M: StructuredMacro + ?Sized>(&mut self, item: &M) {
        self.out.push_str("<ac:structured-macro ac:name=\"");
        self.out.push_str(item.macro_name());
        self.out.push_str("\">");
        for (name, value) in item.parameter_pairs() {
            self.out.push_str("<ac:parameter ac:name=\"");
            self.out.push_str(name);
            self.out.push_str("\">");
            self.out.push_str(value);
            self.out.push_str("</ac:parameter>");
        }
        self.out.push_str("<ac:plain-text-body>");
        self.out.push_str(item.plain_text_body());
        self.out.push_str("</ac:plain-text-body>");
        self.out.push_str("</ac:structured-macro>");
    }

    /// Returns the markup written so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consumes the writer and returns its markup.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Renders a single macro.
pub fn render<M: StructuredMacro + ?Sized>(item: &M) -> String {
    let mut writer = MarkupWriter::new();
    writer.write_macro(item);
    writer.finish()
}

/// Renders several macros back to back, e.g. as one page body.
pub fn render_all<'a, M, I>(items: I) -> String
where
    M: StructuredMacro + 'a,
    I: IntoIterator<Item = &'a M>,
{
    let mut writer = MarkupWriter::new();
    for item in items {
        writer.write_macro(item);
    }
    writer.finish()
}
