//! Section - the unit of structure of a PIX document.

use super::property::{PropValue, Property};
use super::row::DataRow;

/// Section type that is written as raw comment lines instead of a block.
pub const COMMENT_SECTION: &str = "#comment";

/// Named block holding ordered properties, data rows and child sections.
///
/// Insertion order of everything is kept and decides the written order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    /// Section type written before the opening brace.
    pub kind: String,
    pub props: Vec<Property>,
    pub data: Vec<DataRow>,
    pub sections: Vec<Section>,
}

impl Section {
    /// Create an empty section of the given type.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Default::default()
        }
    }

    /// Top-level block of raw comment lines, written verbatim one per line.
    pub fn comment_block<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut section = Self::new(COMMENT_SECTION);
        for line in lines {
            section.props.push(Property::comment(line));
        }
        section
    }

    /// Check if this is a raw comment block.
    pub fn is_comment_block(&self) -> bool {
        self.kind == COMMENT_SECTION
    }

    /// Append a property.
    pub fn add_prop(&mut self, key: impl Into<String>, value: impl Into<PropValue>) -> &mut Self {
        self.props.push(Property::new(key, value));
        self
    }

    /// Builder form of [`Section::add_prop`].
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.add_prop(key, value);
        self
    }

    /// Append a data row.
    pub fn add_row(&mut self, row: impl Into<DataRow>) -> &mut Self {
        self.data.push(row.into());
        self
    }

    /// Append a child section.
    pub fn add_section(&mut self, section: Section) -> &mut Self {
        self.sections.push(section);
        self
    }

    /// Builder form of [`Section::add_section`].
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// First property value with the given key.
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.props.iter().find(|p| p.key == key).map(|p| &p.value)
    }

    /// Integer property value.
    pub fn prop_int(&self, key: &str) -> Option<i64> {
        match self.prop(key)? {
            PropValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Text of a string or token property.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            PropValue::Str(s) | PropValue::Token(s) => Some(s),
            _ => None,
        }
    }

    /// Direct children of the given type.
    pub fn children<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a Section> + 'a {
        self.sections.iter().filter(move |s| s.kind == kind)
    }

    /// Number of sections in this subtree, including this one.
    pub fn tree_size(&self) -> usize {
        1 + self.sections.iter().map(Section::tree_size).sum::<usize>()
    }
}
