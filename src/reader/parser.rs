//! Recursive section parser.

use tracing::trace;

use super::lexer::{tokenize, unquote, Cursor, Line};
use crate::core::{
    is_reserved_token, BoneRow, DataRow, ListTag, Matrix, PropValue, Property, Scalar, Section,
    SkinRow, Values,
};
use crate::util::{Error, Result};

/// Longest matrix the format writes (4x4).
const MAX_MATRIX_ROWS: usize = 4;

type ValueResult<T> = std::result::Result<T, String>;

/// Parse a whole document.
pub(crate) fn parse_document(text: &str) -> Result<Vec<Section>> {
    let mut cursor = Cursor::new(text);
    let mut sections = Vec::new();
    let mut comments: Vec<String> = Vec::new();

    while let Some(line) = cursor.next_line() {
        match line? {
            Line::Blank => {}
            Line::Comment(text) => comments.push(text.to_string()),
            Line::Open(kind) => {
                flush_comments(&mut sections, &mut comments);
                sections.push(parse_section(&mut cursor, kind)?);
            }
            Line::Close => return Err(cursor.error("unexpected '}' outside of a section")),
            Line::Row(_) | Line::Prop(_) => return Err(cursor.error("content outside of a section")),
        }
    }
    flush_comments(&mut sections, &mut comments);

    Ok(sections)
}

/// Top-level comment lines become a `#comment` block.
fn flush_comments(sections: &mut Vec<Section>, comments: &mut Vec<String>) {
    if !comments.is_empty() {
        sections.push(Section::comment_block(comments.drain(..)));
    }
}

fn parse_section(cursor: &mut Cursor<'_>, kind: &str) -> Result<Section> {
    let start = cursor.line_no();
    let mut section = Section::new(kind);

    loop {
        let line = match cursor.next_line() {
            Some(line) => line?,
            None => return Err(Error::parse(start, format!("section '{}' is not closed", kind))),
        };

        match line {
            Line::Blank => section.props.push(Property::blank()),
            Line::Comment(text) => section.props.push(Property::comment(comment_text(text))),
            Line::Open(child) => {
                let child = parse_section(cursor, child)?;
                section.add_section(child);
            }
            Line::Close => break,
            Line::Row(text) => {
                let row = parse_row(cursor, text, section.data.len())?;
                section.data.push(row);
            }
            Line::Prop(text) => {
                let prop = parse_property(text).map_err(|m| cursor.error(m))?;
                section.props.push(prop);
            }
        }
    }

    trace!(
        section = %section.kind,
        line = start,
        props = section.props.len(),
        rows = section.data.len(),
        "parsed section"
    );
    Ok(section)
}

/// `# text` -> `text`
fn comment_text(line: &str) -> &str {
    let text = line.trim_start_matches('#');
    text.strip_prefix(' ').unwrap_or(text)
}

// ==================== Properties ====================

fn parse_property(line: &str) -> ValueResult<Property> {
    let (key, value) = line
        .split_once(':')
        .ok_or_else(|| format!("missing ':' in '{}'", line))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("property without a key: '{}'", line));
    }
    Ok(Property::new(key, parse_value(value.trim())?))
}

/// Classify a property value by its text shape.
pub(crate) fn parse_value(value: &str) -> ValueResult<PropValue> {
    if value.is_empty() {
        return Ok(PropValue::Empty);
    }
    if let Some(inner) = value.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return parse_paren_list(inner);
    }

    let tokens = tokenize(value)?;
    match tokens.as_slice() {
        [single] => parse_single(single),
        _ => parse_sequence(&tokens),
    }
}

fn parse_single(token: &str) -> ValueResult<PropValue> {
    if let Some(text) = unquote(token) {
        return Ok(PropValue::Str(text.to_string()));
    }
    if is_reserved_token(token) {
        return Ok(PropValue::Str(token.to_string()));
    }

    match Element::parse(token) {
        Ok(Element::Int(n)) => Ok(PropValue::Int(n)),
        Ok(Element::Float(f)) => Ok(PropValue::Float(f)),
        Ok(Element::Hex(f)) => Ok(PropValue::list(ListTag::Hex, vec![f])),
        Ok(Element::Str(_)) => unreachable!("quoted tokens handled above"),
        Err(_) if is_bare_word(token) => Ok(PropValue::Token(token.to_string())),
        Err(e) => Err(e),
    }
}

/// Unparenthesized sequence: hex floats, quoted strings or a legacy tuple.
fn parse_sequence(tokens: &[&str]) -> ValueResult<PropValue> {
    let elements = tokens
        .iter()
        .map(|t| Element::parse(t))
        .collect::<ValueResult<Vec<_>>>()?;

    if let Some(floats) = all_hex(&elements) {
        return Ok(PropValue::list(ListTag::Hex, floats));
    }
    if let Some(strings) = all_str(&elements) {
        return Ok(PropValue::list(ListTag::Hex, strings));
    }

    elements
        .into_iter()
        .map(|e| match e {
            Element::Int(n) => Ok(Scalar::Int(n)),
            Element::Float(f) => Ok(Scalar::Float(f)),
            Element::Str(s) => Ok(Scalar::Str(s)),
            Element::Hex(_) => Err(format!("hex float mixed with other values in '{}'", tokens.join(" "))),
        })
        .collect::<ValueResult<Vec<_>>>()
        .map(PropValue::Tuple)
}

fn parse_paren_list(inner: &str) -> ValueResult<PropValue> {
    let tokens = tokenize(inner)?;
    let first = match tokens.as_slice() {
        [] => return Err("empty list".to_string()),
        [first] => *first,
        _ => "",
    };

    // A lone bare element is written by `&&` without quotes or hex.
    if tokens.len() == 1 && !first.starts_with('&') && unquote(first).is_none() {
        let values = match Element::parse(first) {
            Ok(Element::Int(n)) => Values::Int(vec![n]),
            Ok(Element::Float(f)) => Values::Float(vec![f as f32]),
            _ if is_bare_word(first) => Values::Str(vec![first.to_string()]),
            _ => return Err(format!("cannot read list element '{}'", first)),
        };
        return Ok(PropValue::list(ListTag::ParenHex, values));
    }

    let elements = tokens
        .iter()
        .map(|t| Element::parse(t))
        .collect::<ValueResult<Vec<_>>>()?;

    // `&&` prints a lone element bare, `ii` keeps hex and quotes for it.
    let keep_form = if elements.len() == 1 {
        ListTag::PaddedInts
    } else {
        ListTag::ParenHex
    };

    if let Some(floats) = all_hex(&elements) {
        return Ok(PropValue::list(keep_form, floats));
    }
    if let Some(strings) = all_str(&elements) {
        return Ok(PropValue::list(keep_form, strings));
    }
    if let Some(ints) = all_int(&elements) {
        let unpadded = format!(" {} ", tokens.join(" "));
        let tag = if inner == unpadded {
            ListTag::Ints
        } else {
            ListTag::PaddedInts
        };
        return Ok(PropValue::list(tag, ints));
    }
    if let Some(floats) = all_decimal(&elements) {
        return Ok(PropValue::list(ListTag::Ints, floats));
    }

    Err(format!("list mixes element kinds: '({})'", inner))
}

fn is_bare_word(token: &str) -> bool {
    !token.is_empty()
        && token
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '.' | '-' | '/'))
}

/// Single list or row element.
#[derive(Clone, Debug, PartialEq)]
enum Element {
    Hex(f32),
    Int(i64),
    Float(f64),
    Str(String),
}

impl Element {
    fn parse(token: &str) -> ValueResult<Self> {
        if let Some(text) = unquote(token) {
            return Ok(Self::Str(text.to_string()));
        }
        if token.starts_with(hexfloat::HEX_PREFIX) {
            return hexfloat::decode_f32(token)
                .map(Self::Hex)
                .map_err(|e| e.to_string());
        }
        if let Ok(n) = token.parse::<i64>() {
            return Ok(Self::Int(n));
        }
        if let Ok(f) = token.parse::<f64>() {
            return Ok(Self::Float(f));
        }
        Err(format!("cannot classify value '{}'", token))
    }
}

fn all_hex(elements: &[Element]) -> Option<Vec<f32>> {
    elements
        .iter()
        .map(|e| match e {
            Element::Hex(f) => Some(*f),
            _ => None,
        })
        .collect()
}

fn all_str(elements: &[Element]) -> Option<Vec<String>> {
    elements
        .iter()
        .map(|e| match e {
            Element::Str(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

fn all_int(elements: &[Element]) -> Option<Vec<i64>> {
    elements
        .iter()
        .map(|e| match e {
            Element::Int(n) => Some(*n),
            _ => None,
        })
        .collect()
}

/// Decimal numbers, integers included.
fn all_decimal(elements: &[Element]) -> Option<Vec<f32>> {
    elements
        .iter()
        .map(|e| match e {
            Element::Int(n) => Some(*n as f32),
            Element::Float(f) => Some(*f as f32),
            _ => None,
        })
        .collect()
}

// ==================== Data rows ====================

fn parse_row(cursor: &mut Cursor<'_>, line: &str, expected: usize) -> Result<DataRow> {
    let digits = line
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(line.len());
    let index: usize = line[..digits]
        .parse()
        .map_err(|_| cursor.error(format!("invalid row index in '{}'", line)))?;
    if index != expected {
        return Err(cursor.error(format!(
            "row index {} out of sequence, expected {}",
            index, expected
        )));
    }

    let body = line[digits..]
        .trim_start()
        .strip_prefix('(')
        .ok_or_else(|| cursor.error("expected '(' after row index"))?
        .trim();

    if body.starts_with('(') {
        return parse_skin_row(cursor, body).map(DataRow::Skin);
    }
    if let Some(name) = body.strip_prefix("Name:") {
        return parse_bone_row(cursor, name.trim()).map(DataRow::Bone);
    }
    if let Some(inner) = body.strip_suffix(')') {
        return parse_plain_row(inner).map_err(|m| cursor.error(m));
    }

    parse_matrix(cursor, body).map(DataRow::Matrix)
}

fn parse_plain_row(inner: &str) -> ValueResult<DataRow> {
    let tokens = tokenize(inner)?;
    if tokens.is_empty() {
        return Err("empty data row".to_string());
    }
    if let [single] = tokens.as_slice() {
        if let Some(text) = unquote(single) {
            return Ok(DataRow::Str(text.to_string()));
        }
    }

    let elements: Vec<Element> = tokens
        .iter()
        .map(|t| match Element::parse(t) {
            Err(_) if is_bare_word(t) => Ok(Element::Str(t.to_string())),
            other => other,
        })
        .collect::<ValueResult<_>>()?;

    let values = if let Some(floats) = all_hex(&elements) {
        Values::Float(floats)
    } else if let Some(ints) = all_int(&elements) {
        Values::Int(ints)
    } else if let Some(floats) = all_decimal(&elements) {
        Values::Float(floats)
    } else if let Some(strings) = all_str(&elements) {
        Values::Str(strings)
    } else {
        return Err(format!("data row mixes element kinds: '({})'", inner));
    };

    Ok(DataRow::Plain(values))
}

fn decode(cursor: &Cursor<'_>, token: &str) -> Result<f32> {
    hexfloat::decode_f32(token).map_err(|e| cursor.error(e.to_string()))
}

/// Matrix rows from `first` on, continuing over following lines until one
/// ends with `)`.
fn parse_matrix(cursor: &mut Cursor<'_>, first: &str) -> Result<Matrix> {
    let mut rows = Vec::with_capacity(MAX_MATRIX_ROWS);
    let mut line = first;

    loop {
        let (text, last) = match line.strip_suffix(')') {
            Some(text) => (text, true),
            None => (line, false),
        };
        let row = text
            .split_whitespace()
            .map(|t| decode(cursor, t))
            .collect::<Result<Vec<f32>>>()?;
        rows.push(row);

        if last {
            break;
        }
        if rows.len() == MAX_MATRIX_ROWS {
            return Err(cursor.error("matrix is not closed with ')'"));
        }
        line = cursor.expect_raw("matrix row")?;
    }

    Ok(Matrix::from_rows(rows))
}

/// Remainder of `line` after `label`, or a parse error naming it.
fn labeled<'a>(cursor: &Cursor<'_>, line: &'a str, label: &str) -> Result<&'a str> {
    line.strip_prefix(label)
        .map(str::trim)
        .ok_or_else(|| cursor.error(format!("expected '{}', found '{}'", label, line)))
}

fn expect_close(cursor: &mut Cursor<'_>) -> Result<()> {
    let line = cursor.expect_raw("')'")?;
    if line != ")" {
        return Err(cursor.error(format!("expected ')', found '{}'", line)));
    }
    Ok(())
}

/// Counted list `<n> v v ...`, `n` values of `width` tokens each.
fn counted<'a>(cursor: &Cursor<'_>, text: &'a str, width: usize) -> Result<Vec<&'a str>> {
    let mut tokens = text.split_whitespace();
    let count: usize = tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| cursor.error(format!("missing count in '{}'", text)))?;
    let expected = count
        .checked_mul(width)
        .ok_or_else(|| cursor.error(format!("count {} out of range", count)))?;
    let values: Vec<&str> = tokens.collect();
    if values.len() != expected {
        return Err(cursor.error(format!(
            "count {} does not match {} values",
            count,
            values.len() / width.max(1)
        )));
    }
    Ok(values)
}

fn parse_skin_row(cursor: &mut Cursor<'_>, body: &str) -> Result<SkinRow> {
    let inner = body
        .strip_prefix('(')
        .and_then(|b| b.strip_suffix(')'))
        .ok_or_else(|| cursor.error("malformed skin position"))?;
    let position: Vec<f32> = inner
        .split_whitespace()
        .map(|t| decode(cursor, t))
        .collect::<Result<_>>()?;
    let position: [f32; 3] = position
        .try_into()
        .map_err(|_| cursor.error("skin position needs three values"))?;

    let line = cursor.expect_raw("Weights")?;
    let values = counted(cursor, labeled(cursor, line, "Weights:")?, 2)?;
    let weights = values
        .chunks(2)
        .map(|pair| -> Result<(u32, f32)> {
            let bone = pair[0]
                .parse::<u32>()
                .map_err(|_| cursor.error(format!("invalid bone index '{}'", pair[0])))?;
            Ok((bone, decode(cursor, pair[1])?))
        })
        .collect::<Result<Vec<_>>>()?;

    let line = cursor.expect_raw("VertexIndices")?;
    let values = counted(cursor, labeled(cursor, line, "VertexIndices:")?, 1)?;
    let vertex_indices = values
        .iter()
        .map(|t| {
            t.parse::<u32>()
                .map_err(|_| cursor.error(format!("invalid vertex index '{}'", t)))
        })
        .collect::<Result<Vec<_>>>()?;

    expect_close(cursor)?;

    Ok(SkinRow {
        position,
        weights,
        vertex_indices,
    })
}

fn parse_bone_row(cursor: &mut Cursor<'_>, name: &str) -> Result<BoneRow> {
    let name = unquote(name).ok_or_else(|| cursor.error("bone name must be quoted"))?;

    let line = cursor.expect_raw("Parent")?;
    let parent = labeled(cursor, line, "Parent:")?;
    let parent = unquote(parent).ok_or_else(|| cursor.error("bone parent must be quoted"))?;

    let line = cursor.expect_raw("Matrix")?;
    let first = labeled(cursor, line, "Matrix:")?;
    let first = first
        .strip_prefix('(')
        .ok_or_else(|| cursor.error("expected '(' after 'Matrix:'"))?;
    let matrix = parse_matrix(cursor, first)?;

    expect_close(cursor)?;

    let parent = (!parent.is_empty()).then_some(parent);
    Ok(BoneRow::new(name, parent, matrix))
}
