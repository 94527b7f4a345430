//! Integration tests for file loading and saving.

use flate2::write::GzEncoder;
use flate2::Compression;
use std::fs;
use std::io::Write;
use textquill::document::parser::parse_json;
use textquill::document::serializer::{serialize, IndentSpec};
use textquill::file::loader::{load_text, FileReadError};
use textquill::file::saver::{export_html, save_text};
use textquill::render::highlight::highlight;

#[test]
fn test_load_parse_render_cycle() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(&path, r#"{"name": "fixture", "items": [1, 2]}"#).unwrap();

    let text = load_text(&path).unwrap();
    let value = parse_json(&text).unwrap();
    assert_eq!(value.child_count(), 2);
}

#[test]
fn test_load_gzipped_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json.gz");

    let file = fs::File::create(&path).unwrap();
    let mut encoder = GzEncoder::new(file, Compression::default());
    encoder.write_all(br#"{"compressed": true}"#).unwrap();
    encoder.finish().unwrap();

    let text = load_text(&path).unwrap();
    let value = parse_json(&text).unwrap();
    assert!(value.is_object());
}

#[test]
fn test_wrong_extension_surfaced_not_retried() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.csv");
    fs::write(&path, "a,b,c").unwrap();

    let err = load_text(&path).unwrap_err();
    assert!(matches!(err, FileReadError::UnsupportedExtension { .. }));
    assert!(err.to_string().contains("unsupported file type"));
}

#[test]
fn test_save_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.json");

    let value = parse_json(r#"{"a":[1,2,3]}"#).unwrap();
    let pretty = serialize(&value, IndentSpec::Spaces(2));
    save_text(&path, &pretty).unwrap();

    let reloaded = load_text(&path).unwrap();
    assert_eq!(parse_json(&reloaded).unwrap(), value);
}

#[test]
fn test_export_html_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.html");

    let value = parse_json(r#"{"n": 1, "ok": true}"#).unwrap();
    let body = highlight(&serialize(&value, IndentSpec::Spaces(2)));
    export_html(&path, "fixture", &body).unwrap();

    let html = fs::read_to_string(&path).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains(r#"<span class="json-number">1</span>"#));
    assert!(html.contains(r#"<span class="json-boolean">true</span>"#));
}
