//! Section properties and their value shapes.
//!
//! The value shape alone selects the text grammar a property is written
//! with, so every shape the format knows is one variant of [`PropValue`].

/// Format-name tokens written without quotes even when stored as strings.
///
/// Besides the element format names this includes the skin stream tags,
/// which the format also treats as bare identifiers.
pub const RESERVED_TOKENS: &[&str] = &[
    "FLOAT", "FLOAT2", "FLOAT3", "FLOAT4", "FLOAT5", "FLOAT6", "FLOAT7", "FLOAT8", "FLOAT9",
    "FLOAT4x4", "INT", "INT2", "STRING", "_POSITION", "_NORMAL", "_TANGENT",
];

/// Property key that turns a string property into a comment line.
pub const COMMENT_KEY: &str = "#";

/// Check whether a string is written bare rather than quoted.
#[inline]
pub fn is_reserved_token(s: &str) -> bool {
    RESERVED_TOKENS.contains(&s)
}

/// Discriminator of a tagged list property.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ListTag {
    /// `&` - elements written bare, floats as hex.
    Hex,
    /// `&&` - like [`ListTag::Hex`] but parenthesized.
    ParenHex,
    /// `i` - space-joined without padding, floats in decimal, parenthesized.
    Ints,
    /// `ii` - integers left-justified to 5 columns, floats as hex, parenthesized.
    PaddedInts,
    /// `#` - property written as a commented-out key.
    Commented,
}

impl ListTag {
    /// Marker string used by exporters to select this grammar.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Hex => "&",
            Self::ParenHex => "&&",
            Self::Ints => "i",
            Self::PaddedInts => "ii",
            Self::Commented => "#",
        }
    }

    /// Parse a marker string.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "&" => Some(Self::Hex),
            "&&" => Some(Self::ParenHex),
            "i" => Some(Self::Ints),
            "ii" => Some(Self::PaddedInts),
            "#" => Some(Self::Commented),
            _ => None,
        }
    }
}

/// Homogeneous sequence of values, shared by list properties and plain rows.
#[derive(Clone, Debug, PartialEq)]
pub enum Values {
    Float(Vec<f32>),
    Int(Vec<i64>),
    Str(Vec<String>),
}

impl Values {
    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::Float(v) => v.len(),
            Self::Int(v) => v.len(),
            Self::Str(v) => v.len(),
        }
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Element kind name, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Str(_) => "string",
        }
    }
}

impl From<Vec<f32>> for Values {
    fn from(v: Vec<f32>) -> Self {
        Self::Float(v)
    }
}

impl From<Vec<i64>> for Values {
    fn from(v: Vec<i64>) -> Self {
        Self::Int(v)
    }
}

impl From<Vec<String>> for Values {
    fn from(v: Vec<String>) -> Self {
        Self::Str(v)
    }
}

impl<const N: usize> From<[f32; N]> for Values {
    fn from(v: [f32; N]) -> Self {
        Self::Float(v.to_vec())
    }
}

impl<const N: usize> From<[i64; N]> for Values {
    fn from(v: [i64; N]) -> Self {
        Self::Int(v.to_vec())
    }
}

/// Single element of an untagged legacy tuple.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Value of a section property.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// No value: `Key:`
    Empty,
    /// Text, quoted unless it is a reserved token.
    Str(String),
    /// Bare identifier, never quoted: `Tag: _POSITION`
    Token(String),
    Int(i64),
    Float(f64),
    /// Tagged list written with the grammar its tag selects.
    List { tag: ListTag, values: Values },
    /// Untagged list written as a space separated tuple.
    Tuple(Vec<Scalar>),
}

impl PropValue {
    /// Tagged list shorthand.
    pub fn list(tag: ListTag, values: impl Into<Values>) -> Self {
        Self::List {
            tag,
            values: values.into(),
        }
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for PropValue {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<i64> for PropValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for PropValue {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<u32> for PropValue {
    fn from(v: u32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<usize> for PropValue {
    fn from(v: usize) -> Self {
        Self::Int(v as i64)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for PropValue {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

/// Named property of a section.
#[derive(Clone, Debug, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: PropValue,
}

impl Property {
    /// Create a property.
    pub fn new(key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Property without a value.
    pub fn empty(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: PropValue::Empty,
        }
    }

    /// Comment line: `# text`.
    pub fn comment(text: impl Into<String>) -> Self {
        Self::new(COMMENT_KEY, PropValue::Str(text.into()))
    }

    /// Blank line used for spacing.
    pub fn blank() -> Self {
        Self::new("", PropValue::Str(String::new()))
    }

    /// True for comment lines created by [`Property::comment`].
    pub fn is_comment(&self) -> bool {
        self.key == COMMENT_KEY && matches!(self.value, PropValue::Str(_))
    }

    /// True for spacing lines created by [`Property::blank`].
    pub fn is_blank(&self) -> bool {
        self.key.is_empty() && matches!(self.value, PropValue::Str(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_tokens() {
        assert!(is_reserved_token("FLOAT3"));
        assert!(is_reserved_token("FLOAT4x4"));
        assert!(is_reserved_token("_POSITION"));
        assert!(!is_reserved_token("FLOAT10"));
        assert!(!is_reserved_token("float3"));
        assert!(!is_reserved_token("Wheel_01"));
    }

    #[test]
    fn test_list_tag_markers() {
        for tag in [
            ListTag::Hex,
            ListTag::ParenHex,
            ListTag::Ints,
            ListTag::PaddedInts,
            ListTag::Commented,
        ] {
            assert_eq!(ListTag::from_marker(tag.marker()), Some(tag));
        }
        assert_eq!(ListTag::from_marker("x"), None);
    }

    #[test]
    fn test_property_constructors() {
        let p = Property::new("ItemCount", 3usize);
        assert_eq!(p.value, PropValue::Int(3));

        let p = Property::new("Name", "Wheel_01");
        assert_eq!(p.value, PropValue::Str("Wheel_01".into()));

        assert!(Property::comment("hello").is_comment());
        assert!(Property::blank().is_blank());
        assert!(!Property::empty("Key").is_blank());
    }

    #[test]
    fn test_values_kind() {
        let v: Values = [1.0f32, 2.0].into();
        assert_eq!(v.len(), 2);
        assert_eq!(v.kind_name(), "float");
        assert!(Values::Str(vec![]).is_empty());
    }
}
