//! Integration tests for reading PIX text.

use std::io::Write;

use pix::core::{DataRow, ListTag, PropValue, Scalar, Section, Values};
use pix::reader::{read_file, read_str};
use pix::Error;

use tempfile::NamedTempFile;

const MODEL: &str = r#"# model file
Header {
    FormatVersion: 4    # current version
    Source: "exporter #2"
    Type: "Model"
    Name: "wheel"
}
Global {
    VertexCount: 2
    Skeleton: "/vehicle/truck/wheel.pis"
    Flag: true
}
Piece {
    Index: 0
    Material: 0

    # positions
    Stream {
        Format: FLOAT3
        Tag: _POSITION
        0    ( &3f800000 &40000000 &40400000 )
        1    ( &00000000 &00000000 &bf800000 )
    }
    Triangles {
        0    ( 0     1     2     )
    }
}
Bones {
    0     ( Name:  "root"
            Parent: ""
            Matrix: ( &3f800000  &00000000  &00000000  &00000000
                      &00000000  &3f800000  &00000000  &00000000
                      &00000000  &00000000  &3f800000  &00000000
                      &00000000  &00000000  &00000000  &3f800000 )
       )
}
PieceSkinStream {
    Format: FLOAT3
    Tag: _POSITION
    ItemCount: 1
    TotalWeightCount: 2
    TotalVertexIndexCount: 3
    0     ( ( &3f800000  &40000000  &40400000 )
            Weights: 2      0    &3f000000   3    &3f000000
            VertexIndices: 3      7     8     9
          )
}

"#;

fn model() -> Vec<Section> {
    read_str(MODEL).expect("Failed to parse model")
}

#[test]
fn test_top_level_layout() {
    let sections = model();
    let kinds: Vec<&str> = sections.iter().map(|s| s.kind.as_str()).collect();
    assert_eq!(kinds, ["#comment", "Header", "Global", "Piece", "Bones", "PieceSkinStream"]);
    assert!(sections[0].is_comment_block());
}

#[test]
fn test_header_values() {
    let sections = model();
    let header = &sections[1];

    assert_eq!(header.prop_int("FormatVersion"), Some(4));
    assert_eq!(header.prop_str("Source"), Some("exporter #2"));
    assert_eq!(header.prop_str("Type"), Some("Model"));
    assert_eq!(sections[2].prop("Flag"), Some(&PropValue::Token("true".into())));
}

#[test]
fn test_nested_sections_and_rows() {
    let sections = model();
    let piece = &sections[3];

    assert!(piece.props.iter().any(|p| p.is_blank()));
    assert!(piece.props.iter().any(|p| p.is_comment()));

    let stream = piece.children("Stream").next().expect("No stream");
    assert_eq!(stream.prop_str("Tag"), Some("_POSITION"));
    assert_eq!(stream.data.len(), 2);
    assert_eq!(stream.data[1], DataRow::Plain(Values::Float(vec![0.0, 0.0, -1.0])));

    let triangles = piece.children("Triangles").next().expect("No triangles");
    assert_eq!(triangles.data[0], DataRow::Plain(Values::Int(vec![0, 1, 2])));
}

#[test]
fn test_bone_and_skin_rows() {
    let sections = model();

    match &sections[4].data[0] {
        DataRow::Bone(bone) => {
            assert_eq!(bone.name, "root");
            assert_eq!(bone.parent, None);
            assert_eq!(bone.matrix.row_count(), 4);
            assert_eq!(bone.matrix.rows()[2], vec![0.0, 0.0, 1.0, 0.0]);
        }
        other => panic!("unexpected row: {:?}", other),
    }

    match &sections[5].data[0] {
        DataRow::Skin(skin) => {
            assert_eq!(skin.position, [1.0, 2.0, 3.0]);
            assert_eq!(skin.weights, vec![(0, 0.5), (3, 0.5)]);
            assert_eq!(skin.vertex_indices, vec![7, 8, 9]);
        }
        other => panic!("unexpected row: {:?}", other),
    }
}

#[test]
fn test_list_property_shapes() {
    let text = concat!(
        "Look {\n",
        "    Aux: ( &3f800000 &00000000 )\n",
        "    Names: \"a\" \"b c\"\n",
        "    Order: ( 2 0 1 )\n",
        "    Legacy: 1 2.5 \"x\"\n",
        "}\n",
    );
    let sections = read_str(text).expect("Failed to parse");
    let look = &sections[0];

    assert_eq!(look.prop("Aux"), Some(&PropValue::list(ListTag::ParenHex, vec![1.0f32, 0.0])));
    assert_eq!(
        look.prop("Names"),
        Some(&PropValue::list(ListTag::Hex, vec!["a".to_string(), "b c".to_string()]))
    );
    assert_eq!(look.prop("Order"), Some(&PropValue::list(ListTag::Ints, vec![2i64, 0, 1])));
    assert_eq!(
        look.prop("Legacy"),
        Some(&PropValue::Tuple(vec![Scalar::Int(1), Scalar::Float(2.5), Scalar::Str("x".into())]))
    );
}

#[test]
fn test_crlf_input() {
    let text = "Header {\r\n    FormatVersion: 1\r\n}\r\n";
    let sections = read_str(text).expect("Failed to parse CRLF text");
    assert_eq!(sections[0].prop_int("FormatVersion"), Some(1));
}

#[test]
fn test_errors_carry_line_numbers() {
    let cases = [
        ("A {\n    X: ( 1 \"a\" )\n}\n", 2),
        ("A {\n    0    ( 1 )\n    2    ( 1 )\n}\n", 3),
        ("A {\n    X: 1\n", 1),
        ("}\n", 1),
        ("A {\n    0     ( ( &3f800000 &3f800000 )\n}\n", 2),
        ("A {\n    X: &3f80\n}\n", 2),
    ];

    for (text, line) in cases {
        match read_str(text) {
            Err(Error::Parse { line: found, message }) => {
                println!("{}: {}", found, message);
                assert_eq!(found, line, "wrong line for {:?}", text);
            }
            other => panic!("expected parse error for {:?}, got {:?}", text, other),
        }
    }
}

#[test]
fn test_oversized_count_is_parse_error() {
    let text = concat!(
        "PieceSkinStream {\n",
        "    0     ( ( &3f800000  &3f800000  &3f800000 )\n",
        "            Weights: 18446744073709551615 0 &3f800000\n",
        "            VertexIndices: 1      0\n",
        "          )\n",
        "}\n",
    );

    match read_str(text) {
        Err(Error::Parse { message, .. }) => println!("{}", message),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_read_file() {
    let mut temp = NamedTempFile::new().expect("Failed to create temp file");
    temp.write_all(MODEL.as_bytes()).expect("Failed to write temp file");
    temp.flush().expect("Failed to flush");

    let sections = read_file(temp.path()).expect("Failed to read file");
    assert_eq!(sections, model());
}

#[test]
fn test_read_missing_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let err = read_file(dir.path().join("missing.pix")).unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
}
