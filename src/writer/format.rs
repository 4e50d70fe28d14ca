//! Text grammars for properties and data rows.
//!
//! Everything here appends to a `String`; the only failures are values that
//! break the data contract (empty tagged lists, mixed plain rows).

use hexfloat::push_f32;
use tracing::trace;

use crate::core::{
    is_reserved_token, BoneRow, DataRow, ListTag, Matrix, PropValue, Property, Scalar, Section,
    SkinRow, Values, COMMENT_KEY,
};
use crate::util::{fmt_float, fmt_float32, Error, Result};

/// Column width of the row index for plain, string, matrix and time rows.
const ROW_INDEX_WIDTH: usize = 5;
/// Column width of the row index for bone and skin rows.
const WIDE_ROW_INDEX_WIDTH: usize = 6;
/// Padding of padded integer values and weight bone indices.
const VALUE_PAD: usize = 5;
/// Padding of skin vertex indices.
const VERTEX_INDEX_PAD: usize = 6;
/// Padding of the count column in skin rows.
const COUNT_PAD: usize = 7;
/// Indent of the second and later lines of bone and skin rows, relative to the row.
const ROW_BODY_INDENT: &str = "        ";
/// Alignment of bone matrix continuation lines (`        Matrix: (`).
const BONE_MATRIX_OFFSET: &str = "                 ";
/// Alignment of matrix row continuation lines (`0    ( `).
const MATRIX_ROW_OFFSET: &str = "       ";

/// Write a section block `<kind> {` ... `}` at indent `ind`.
///
/// Contents are indented one `unit` deeper; the closing brace stays at `ind`.
pub(crate) fn write_section(out: &mut String, section: &Section, ind: &str, unit: &str) -> Result<()> {
    trace!(
        section = %section.kind,
        props = section.props.len(),
        rows = section.data.len(),
        children = section.sections.len(),
        "writing section"
    );

    out.push_str(ind);
    out.push_str(&section.kind);
    out.push_str(" {\n");

    let inner = format!("{}{}", ind, unit);
    write_body(out, section, &inner, unit).map_err(|e| e.in_section(&section.kind))?;

    out.push_str(ind);
    out.push_str("}\n");
    Ok(())
}

fn write_body(out: &mut String, section: &Section, ind: &str, unit: &str) -> Result<()> {
    for prop in &section.props {
        write_property(out, prop, ind)?;
    }
    write_rows(out, &section.data, ind)?;
    for child in &section.sections {
        write_section(out, child, ind, unit)?;
    }
    Ok(())
}

/// Write a `#comment` section: every property value verbatim on its own line.
pub(crate) fn write_comment_block(out: &mut String, section: &Section) {
    for prop in &section.props {
        out.push_str(&raw_text(&prop.value));
        out.push('\n');
    }
}

fn raw_text(value: &PropValue) -> String {
    match value {
        PropValue::Empty => String::new(),
        PropValue::Str(s) | PropValue::Token(s) => s.clone(),
        PropValue::Int(n) => n.to_string(),
        PropValue::Float(f) => fmt_float(*f),
        PropValue::List { values, .. } => format_values(values, 0, false),
        PropValue::Tuple(items) => tuple_text(items),
    }
}

// ==================== Properties ====================

/// Write one property line.
pub(crate) fn write_property(out: &mut String, prop: &Property, ind: &str) -> Result<()> {
    let key = prop.key.as_str();

    match &prop.value {
        PropValue::Empty => {
            push_line(out, ind, &format!("{}:", key));
        }
        PropValue::Str(s) if !is_reserved_token(s) => {
            if key == COMMENT_KEY {
                push_line(out, ind, &format!("# {}", s));
            } else if key.is_empty() {
                out.push('\n');
            } else {
                push_line(out, ind, &format!("{}: \"{}\"", key, s));
            }
        }
        PropValue::Str(s) | PropValue::Token(s) => {
            push_line(out, ind, &format!("{}: {}", key, s));
        }
        PropValue::Int(n) => {
            push_line(out, ind, &format!("{}: {}", key, n));
        }
        PropValue::Float(f) => {
            push_line(out, ind, &format!("{}: {}", key, fmt_float(*f)));
        }
        PropValue::List { tag: ListTag::Commented, .. } => {
            push_line(out, ind, &format!("# {}", key));
        }
        PropValue::List { tag, values } => {
            if values.is_empty() {
                return Err(Error::EmptyList { key: key.to_string() });
            }
            let text = match tag {
                ListTag::Hex => format_values(values, VALUE_PAD, true),
                ListTag::ParenHex if values.len() == 1 => paren(&bare_first(values)),
                ListTag::ParenHex | ListTag::PaddedInts => paren(&format_values(values, VALUE_PAD, true)),
                ListTag::Ints => paren(&format_values(values, 0, false)),
                ListTag::Commented => unreachable!("handled above"),
            };
            push_line(out, ind, &format!("{}: {}", key, text));
        }
        PropValue::Tuple(items) => {
            if items.is_empty() {
                return Err(Error::EmptyList { key: key.to_string() });
            }
            push_line(out, ind, &format!("{}: {}", key, tuple_text(items)));
        }
    }

    Ok(())
}

fn push_line(out: &mut String, ind: &str, line: &str) {
    out.push_str(ind);
    out.push_str(line);
    out.push('\n');
}

fn paren(text: &str) -> String {
    format!("( {} )", text)
}

/// Join values: floats as hex (or decimal), strings quoted, integers
/// left-justified to `pad` columns (`0` for no padding).
fn format_values(values: &Values, pad: usize, hex: bool) -> String {
    match values {
        Values::Float(v) if hex => hexfloat::encode_array(v),
        Values::Float(v) => join(v.iter().map(|x| fmt_float32(*x))),
        Values::Str(v) => join(v.iter().map(|s| format!("\"{}\"", s))),
        Values::Int(v) => join(v.iter().map(|n| format!("{:<pad$}", n, pad = pad))),
    }
}

/// Values of a plain row in a block whose element kind is unknown.
fn format_untyped(values: &Values) -> String {
    match values {
        Values::Float(v) => join(v.iter().map(|x| format!("{:<5}", fmt_float32(*x)))),
        Values::Int(v) => join(v.iter().map(|n| format!("{:<5}", n))),
        Values::Str(v) => join(v.iter().map(|s| format!("{:<5}", s))),
    }
}

fn bare_first(values: &Values) -> String {
    match values {
        Values::Float(v) => v.first().map(|x| fmt_float32(*x)),
        Values::Int(v) => v.first().map(|n| n.to_string()),
        Values::Str(v) => v.first().cloned(),
    }
    .unwrap_or_default()
}

fn join(items: impl Iterator<Item = String>) -> String {
    items.collect::<Vec<_>>().join(" ")
}

/// Untagged list: elements space separated, strings double quoted, commas dropped.
fn tuple_text(items: &[Scalar]) -> String {
    let text = items
        .iter()
        .map(|item| match item {
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => fmt_float(*f),
            Scalar::Str(s) => format!("\"{}\"", s),
        })
        .collect::<Vec<_>>()
        .join(", ");
    text.replace(',', "")
}

// ==================== Data rows ====================

/// Write all data rows of a section, each prefixed by its index.
pub(crate) fn write_rows(out: &mut String, rows: &[DataRow], ind: &str) -> Result<()> {
    // Element kind of plain rows, fixed by the first row when it is plain.
    let mut block_kind: Option<&'static str> = None;

    for (i, row) in rows.iter().enumerate() {
        match row {
            DataRow::Plain(values) => {
                if i == 0 {
                    block_kind = Some(values.kind_name());
                }
                let text = match block_kind {
                    Some(expected) if expected != values.kind_name() => {
                        return Err(Error::MixedRowKind {
                            row: i,
                            expected,
                            found: values.kind_name(),
                        });
                    }
                    Some(_) => format_values(values, VALUE_PAD, true),
                    None => format_untyped(values),
                };
                out.push_str(&format!("{}{:<w$}( {} )\n", ind, i, text, w = ROW_INDEX_WIDTH));
            }
            DataRow::Str(s) => {
                out.push_str(&format!("{}{:<w$}( \"{}\" )\n", ind, i, s, w = ROW_INDEX_WIDTH));
            }
            DataRow::Time(t) => {
                out.push_str(&format!(
                    "{}{:<w$}( {} )\n",
                    ind,
                    i,
                    hexfloat::encode_f32(*t),
                    w = ROW_INDEX_WIDTH
                ));
            }
            DataRow::Matrix(m) => {
                out.push_str(&format!(
                    "{}{:<w$}( {} )\n",
                    ind,
                    i,
                    format_matrix(m, ind, MATRIX_ROW_OFFSET),
                    w = ROW_INDEX_WIDTH
                ));
            }
            DataRow::Bone(bone) => write_bone(out, i, bone, ind),
            DataRow::Skin(skin) => write_skin(out, i, skin, ind),
        }
    }

    Ok(())
}

/// Matrix rows as ` v  v  v  v ` lines; continuation lines start at
/// `ind + offset` and drop their trailing space.
fn format_matrix(matrix: &Matrix, ind: &str, offset: &str) -> String {
    let mut text = String::new();

    for row in matrix.rows() {
        let mut line = String::new();
        for &value in row {
            line.push(' ');
            push_f32(&mut line, value);
            line.push(' ');
        }

        if text.is_empty() {
            text = line;
        } else {
            text.push('\n');
            text.push_str(ind);
            text.push_str(offset);
            text.push_str(line.strip_suffix(' ').unwrap_or(&line));
        }
    }

    text
}

fn write_bone(out: &mut String, index: usize, bone: &BoneRow, ind: &str) {
    let parent = bone.parent.as_deref().unwrap_or("");

    out.push_str(&format!(
        "{}{:<w$}( Name:  \"{}\"\n",
        ind,
        index,
        bone.name,
        w = WIDE_ROW_INDEX_WIDTH
    ));
    out.push_str(&format!("{}{}Parent: \"{}\"\n", ind, ROW_BODY_INDENT, parent));
    out.push_str(&format!(
        "{}{}Matrix: ({} )\n",
        ind,
        ROW_BODY_INDENT,
        format_matrix(&bone.matrix, ind, BONE_MATRIX_OFFSET)
    ));
    out.push_str(ind);
    out.push_str("   )\n");
}

fn write_skin(out: &mut String, index: usize, skin: &SkinRow, ind: &str) {
    let [x, y, z] = skin.position;
    out.push_str(&format!(
        "{}{:<w$}( ( {}  {}  {} )\n",
        ind,
        index,
        hexfloat::encode_f32(x),
        hexfloat::encode_f32(y),
        hexfloat::encode_f32(z),
        w = WIDE_ROW_INDEX_WIDTH
    ));

    let mut weights = String::new();
    for (i, (bone, weight)) in skin.weights.iter().enumerate() {
        if i > 0 {
            weights.push_str("   ");
        }
        weights.push_str(&format!("{:<w$}", bone, w = VALUE_PAD));
        push_f32(&mut weights, *weight);
    }
    out.push_str(&format!(
        "{}{}Weights: {:<w$}{}\n",
        ind,
        ROW_BODY_INDENT,
        skin.weights.len(),
        weights,
        w = COUNT_PAD
    ));

    let mut indices = String::new();
    for vertex in &skin.vertex_indices {
        indices.push_str(&format!("{:<w$}", vertex, w = VERTEX_INDEX_PAD));
    }
    out.push_str(&format!(
        "{}{}VertexIndices: {:<w$}{}\n",
        ind,
        ROW_BODY_INDENT,
        skin.vertex_indices.len(),
        indices,
        w = COUNT_PAD
    ));

    out.push_str(ind);
    out.push_str("      )\n");
}
