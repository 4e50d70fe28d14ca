//! Integration tests for writing PIX files and reading them back.

use pix::builders::Header;
use pix::core::{BoneRow, DataRow, ListTag, Matrix, PropValue, Property, Section, Values};
use pix::reader::{read_file, read_str};
use pix::skin::{PieceSkin, SkinEntry, SkinStream, SkinStreamKind};
use pix::writer::{render_document, write_file, write_file_with_progress, WriteOptions};

use tempfile::NamedTempFile;

/// Document touching every property grammar and row kind.
fn sample_document() -> Vec<Section> {
    let header = Header::prefab(1, "crossing").with_source("pix test").render();

    let mut global = Section::new("Global");
    global
        .add_prop("VertexCount", 4)
        .add_prop("Scale", 0.25f64)
        .add_prop("Format", "FLOAT3")
        .add_prop("Effect", PropValue::Token("eut2.dif.spec".into()))
        .add_prop("Skeleton", "models/truck.pis");
    global.props.push(Property::blank());
    global.props.push(Property::comment("lookup tables"));
    global.props.push(Property::empty("Aliases"));

    let mut lists = Section::new("Lists");
    lists
        .add_prop("Center", PropValue::list(ListTag::ParenHex, [0.5f32, -1.0, 2.0]))
        .add_prop("Radius", PropValue::list(ListTag::Hex, [3.5f32]))
        .add_prop("Looks", PropValue::list(ListTag::ParenHex, vec!["day".to_string(), "night".to_string()]))
        .add_prop("Single", PropValue::list(ListTag::ParenHex, vec!["chrome".to_string()]))
        .add_prop("Indices", PropValue::list(ListTag::Ints, [0i64, 1, 2]))
        .add_prop("Padded", PropValue::list(ListTag::PaddedInts, [3i64, 44, 555]));

    let mut stream = Section::new("Stream");
    stream
        .add_prop("Format", "FLOAT3")
        .add_prop("Tag", "_POSITION")
        .add_row(Values::from([0.0f32, 1.0, 2.0]))
        .add_row(Values::from([-0.0f32, f32::MIN_POSITIVE, 1.0e-40]));

    let mut names = Section::new("Names");
    names.add_row(DataRow::Str("idle".into())).add_row(DataRow::Str("run".into()));

    let mut bones = Section::new("Bones");
    bones
        .add_row(BoneRow::new("root", None, Matrix::identity()))
        .add_row(BoneRow::new(
            "wheel",
            Some("root"),
            glam::Mat4::from_translation(glam::Vec3::new(1.5, 0.0, -2.0)),
        ));

    let mut keys = Section::new("Frame");
    keys.add_row(DataRow::Matrix(Matrix::from(glam::Mat4::from_scale(glam::Vec3::splat(2.0)))));

    let mut position = SkinStream::new(SkinStreamKind::Position);
    for (vertex, x) in [(0, 0.0f32), (1, 1.0), (2, 0.0), (3, 1.0)] {
        let entry = SkinEntry::new(vertex, [x, 0.0, 0.0], [(1, 0.3), (0, 0.7)], 1.0)
            .expect("Failed to create skin entry");
        position.add_entry(entry);
    }
    let skin = PieceSkin::new(0, position).render();

    let piece = Section::new("Piece")
        .with_prop("Index", 0)
        .with_section(stream)
        .with_section(names);

    vec![
        Section::comment_block(["# exported for tests"]),
        header,
        global,
        lists,
        piece,
        bones,
        keys,
        skin,
    ]
}

#[test]
fn test_roundtrip_through_file() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let path = temp.path();
    let doc = sample_document();

    write_file(path, &doc, &WriteOptions::default()).expect("Failed to write file");

    let read = read_file(path).expect("Failed to read file");
    assert_eq!(read, doc);
}

#[test]
fn test_rewrite_is_byte_identical() {
    let options = WriteOptions::default();
    let first = render_document(&sample_document(), &options).expect("Failed to render");

    let reread = read_str(&first).expect("Failed to parse");
    let second = render_document(&reread, &options).expect("Failed to render");

    assert_eq!(first, second);
}

#[test]
fn test_rewrite_with_tabs() {
    let options = WriteOptions::new().with_tabs();
    let text = render_document(&sample_document(), &options).expect("Failed to render");
    assert!(text.contains("\n\tStream {\n\t\tFormat: FLOAT3\n"));

    let reread = read_str(&text).expect("Failed to parse tab indented text");
    assert_eq!(reread, sample_document());
}

#[test]
fn test_float_bits_survive_file() {
    let values = [0.0f32, -0.0, f32::MIN_POSITIVE / 4.0, f32::INFINITY, f32::NEG_INFINITY, f32::NAN];

    let mut section = Section::new("Floats");
    section.add_row(Values::from(values));

    let temp = NamedTempFile::new().expect("Failed to create temp file");
    write_file(temp.path(), &[section], &WriteOptions::default()).expect("Failed to write file");
    let read = read_file(temp.path()).expect("Failed to read file");

    match &read[0].data[0] {
        DataRow::Plain(Values::Float(back)) => {
            let bits: Vec<u32> = back.iter().map(|f| f.to_bits()).collect();
            let expected: Vec<u32> = values.iter().map(|f| f.to_bits()).collect();
            assert_eq!(bits, expected);
        }
        other => panic!("unexpected row: {:?}", other),
    }
}

#[test]
fn test_progress_callback() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let doc = sample_document();

    let mut reports = Vec::new();
    write_file_with_progress(temp.path(), &doc, &WriteOptions::default(), |p| {
        reports.push(p.percent())
    })
    .expect("Failed to write file");

    assert_eq!(reports.len(), doc.len());
    assert_eq!(reports.last(), Some(&100));
    assert!(reports.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_file_ends_with_blank_line() {
    let temp = NamedTempFile::new().expect("Failed to create temp file");
    write_file(temp.path(), &sample_document(), &WriteOptions::default()).expect("Failed to write file");

    let text = std::fs::read_to_string(temp.path()).expect("Failed to read back");
    assert!(text.ends_with("}\n\n"));
    assert!(text.starts_with("# exported for tests\nHeader {\n"));
}

#[test]
fn test_failed_write_names_section() {
    let bad = Section::new("Piece").with_section(
        Section::new("Stream").with_prop("Aliases", PropValue::list(ListTag::Hex, Vec::<f32>::new())),
    );

    let temp = NamedTempFile::new().expect("Failed to create temp file");
    let err = write_file(temp.path(), &[bad], &WriteOptions::default()).unwrap_err();

    println!("error: {}", err);
    assert!(err.is_contract_violation());
    assert_eq!(err.section_path(), Some("Piece/Stream"));
}
