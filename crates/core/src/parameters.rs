//! Code block macro parameters and the first-write-wins parameter set.

use std::collections::BTreeMap;

/// Options that control the content or format of a code block macro.
///
/// Declaration order is the serialization order: `Ord` is derived, so the
/// variants below must stay in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ParameterName {
    /// Render the block collapsed. Default: false.
    Collapse,
    /// Number of the first line when line numbers are shown. Default: 1.
    FirstLine,
    /// Syntax highlighting language. See [`crate::Language`].
    Language,
    /// Show line numbers to the left of the code. Default: false.
    LineNumbers,
    /// Colour scheme. See [`crate::Theme`].
    Theme,
    /// Title shown in a header row above the code.
    Title,
}

impl ParameterName {
    /// All parameters in declaration order.
    pub const ALL: [ParameterName; 6] = [
        ParameterName::Collapse,
        ParameterName::FirstLine,
        ParameterName::Language,
        ParameterName::LineNumbers,
        ParameterName::Theme,
        ParameterName::Title,
    ];

    /// Upper-case identifier as used by the platform documentation.
    pub const fn identifier(self) -> &'static str {
        match self {
            ParameterName::Collapse => "COLLAPSE",
            ParameterName::FirstLine => "FIRSTLINE",
            ParameterName::Language => "LANGUAGE",
            ParameterName::LineNumbers => "LINENUMBERS",
            ParameterName::Theme => "THEME",
            ParameterName::Title => "TITLE",
        }
    }

    /// Name written into the `ac:name` attribute.
    ///
    /// Derived from [`identifier`](Self::identifier): `_` becomes `/`, then
    /// lower-cased.
    pub const fn wire_name(self) -> &'static str {
        match self {
            ParameterName::Collapse => "collapse",
            ParameterName::FirstLine => "firstline",
            ParameterName::Language => "language",
            ParameterName::LineNumbers => "linenumbers",
            ParameterName::Theme => "theme",
            ParameterName::Title => "title",
        }
    }
}

impl std::fmt::Display for ParameterName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.wire_name())
    }
}

/// Working set of macro parameters.
///
/// Writes are insert-if-absent: the first value stored under a name is kept
/// and later writes are dropped. Iteration follows [`ParameterName`]
/// declaration order regardless of the order values were set in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    values: BTreeMap<ParameterName, String>,
}

impl ParameterSet {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `value` under `name` unless a value is already present.
    ///
    /// Returns `true` when the value was stored.
    pub fn set(&mut self, name: ParameterName, value: impl Into<String>) -> bool {
        if self.values.contains_key(&name) {
            log::debug!("Parameter '{name}' already set; ignoring new value");
            return false;
        }
        self.values.insert(name, value.into());
        true
    }

    /// Returns whether `name` currently has a value.
    pub fn has(&self, name: ParameterName) -> bool {
        self.values.contains_key(&name)
    }

    /// Returns the value stored under `name`.
    pub fn get(&self, name: ParameterName) -> Option<&str> {
        self.values.get(&name).map(String::as_str)
    }

    /// Iterates `(name, value)` pairs in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (ParameterName, &str)> + Clone + '_ {
        self.values
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    /// Number of parameters set.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_follow_identifier_rule() {
        for name in ParameterName::ALL {
            let derived = name.identifier().replace('_', "/").to_lowercase();
            assert_eq!(name.wire_name(), derived);
        }
    }

    #[test]
    fn all_is_in_declaration_order() {
        let mut sorted = ParameterName::ALL;
        sorted.sort();
        assert_eq!(sorted, ParameterName::ALL);
    }

    #[test]
    fn first_write_wins() {
        let mut set = ParameterSet::new();
        assert!(set.set(ParameterName::Title, "A"));
        assert!(!set.set(ParameterName::Title, "B"));
        assert_eq!(set.get(ParameterName::Title), Some("A"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn has_reports_presence() {
        let mut set = ParameterSet::new();
        assert!(!set.has(ParameterName::LineNumbers));
        set.set(ParameterName::LineNumbers, "true");
        assert!(set.has(ParameterName::LineNumbers));
        assert!(!set.has(ParameterName::FirstLine));
    }

    #[test]
    fn entries_use_declaration_order_not_insertion_order() {
        let mut set = ParameterSet::new();
        set.set(ParameterName::Title, "Example");
        set.set(ParameterName::LineNumbers, "true");
        set.set(ParameterName::Collapse, "true");
        set.set(ParameterName::Language, "java");

        let names: Vec<_> = set.entries().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            vec![
                ParameterName::Collapse,
                ParameterName::Language,
                ParameterName::LineNumbers,
                ParameterName::Title,
            ]
        );
    }

    #[test]
    fn entries_are_restartable() {
        let mut set = ParameterSet::new();
        set.set(ParameterName::Theme, "Midnight");
        let entries = set.entries();
        let first: Vec<_> = entries.clone().collect();
        let second: Vec<_> = entries.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![(ParameterName::Theme, "Midnight")]);
    }
}
