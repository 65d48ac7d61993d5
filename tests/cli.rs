//! CLI integration tests for base437
//!
//! Tests the binary as a user would interact with it.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;

fn base437() -> Command {
    let mut cmd = Command::cargo_bin("base437").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("BASE437_LOG");
    cmd
}

fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
    let path = std::env::temp_dir().join(format!("base437-{}-{}", std::process::id(), name));
    fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Basic Commands
// ============================================================================

#[test]
fn test_help() {
    base437()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("code page 437"));
}

#[test]
fn test_version() {
    base437()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("base437"));
}

#[test]
fn test_list_mappings() {
    base437()
        .arg("--list")
        .assert()
        .success()
        .stdout(predicate::str::contains("base437"))
        .stdout(predicate::str::contains("html"))
        .stdout(predicate::str::contains("34=U+201C"));
}

#[test]
fn test_table_grid() {
    base437()
        .args(["--table", "--map", "1=U+2603"])
        .assert()
        .success()
        .stdout(predicate::str::contains(" 0 1 2 3 4 5 6 7 8 9 A B C D E F"))
        .stdout(predicate::str::contains("☃"))
        .stdout(predicate::str::contains("byte   1 -> U+2603"));
}

#[test]
fn test_export_mapping() {
    base437()
        .args(["--export-mapping", "--mapping", "html"])
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""0": "U+2060""#))
        .stdout(predicate::str::contains(r#""34": "U+201C""#))
        .stdout(predicate::str::contains(r#""255": "U+00A0""#));
}

// ============================================================================
// Encode/Decode
// ============================================================================

#[test]
fn test_encode_stdin() {
    base437()
        .write_stdin(&b"\x00\x01Hi\xff"[..])
        .assert()
        .success()
        .stdout("\u{2060}☺Hi\u{00A0}");
}

#[test]
fn test_encode_file() {
    let path = temp_file("encode.bin", &[0x89, b'P', b'N', b'G']);
    base437()
        .arg(&path)
        .assert()
        .success()
        .stdout("ëPNG");
    fs::remove_file(path).ok();
}

#[test]
fn test_decode_stdin() {
    base437()
        .arg("--decode")
        .write_stdin("\u{2060}☺Hi\u{00A0}")
        .assert()
        .success()
        .stdout(predicate::eq(&b"\x00\x01Hi\xff"[..]));
}

#[test]
fn test_decode_strips_trailing_newline() {
    base437()
        .arg("-d")
        .write_stdin("☺Hi\n")
        .assert()
        .success()
        .stdout(predicate::eq(&b"\x01Hi"[..]));
}

#[test]
fn test_decode_rejects_lone_carriage_return() {
    base437()
        .arg("-d")
        .write_stdin("Hi\r")
        .assert()
        .failure()
        .stderr(predicate::str::contains("at position 2"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_decode_integer_sequence() {
    base437()
        .args(["-d", "--output", "integer_sequence"])
        .write_stdin("☺Hi")
        .assert()
        .success()
        .stdout("[1,72,105]\n");
}

#[test]
fn test_decode_text_output() {
    base437()
        .args(["-d", "--output", "text"])
        .write_stdin("├⌐")
        .assert()
        .success()
        .stdout("é");
}

#[test]
fn test_decode_unknown_shape() {
    base437()
        .args(["-d", "--output", "blob"])
        .write_stdin("Hi")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported output shape 'blob'"));
}

#[test]
fn test_decode_invalid_character() {
    base437()
        .arg("-d")
        .write_stdin("Hello\u{1F600}World")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: invalid character"))
        .stderr(predicate::str::contains("U+1F600"))
        .stderr(predicate::str::contains("at position 5"))
        .stderr(predicate::str::contains("       ^"))
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_round_trip_html_mapping() {
    let encoded = base437()
        .args(["--mapping", "html"])
        .write_stdin(r#"<a href="x">"#)
        .assert()
        .success()
        .stdout("<a href=“x“>")
        .get_output()
        .stdout
        .clone();

    base437()
        .args(["-d", "-m", "html"])
        .write_stdin(encoded)
        .assert()
        .success()
        .stdout(r#"<a href="x">"#);
}

#[test]
fn test_map_override() {
    base437()
        .args(["--map", "0=U+200B"])
        .write_stdin(&[0u8, 0][..])
        .assert()
        .success()
        .stdout("\u{200B}\u{200B}");
}

#[test]
fn test_map_duplicate_rejected() {
    base437()
        .args(["--map", "5=U+2660"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate code point U+2660"));
}

#[test]
fn test_map_malformed_literal() {
    base437()
        .args(["--map", "34=201C"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed code point literal"));
}

#[test]
fn test_unknown_mapping_suggests() {
    base437()
        .args(["--mapping", "htlm"])
        .write_stdin("x")
        .assert()
        .failure()
        .stderr(predicate::str::contains("did you mean 'html'?"));
}

#[test]
fn test_mapping_file() {
    let path = temp_file("mapping.json", br#"{"65": "U+0391", "97": "U+03B1x"}"#);
    base437()
        .arg("--mapping-file")
        .arg(&path)
        .write_stdin("A")
        .assert()
        .failure()
        .stderr(predicate::str::contains("U+03B1x"));
    fs::remove_file(&path).ok();

    let path = temp_file("mapping-ok.json", br#"{"65": "U+0391"}"#);
    base437()
        .arg("--mapping-file")
        .arg(&path)
        .write_stdin("AB")
        .assert()
        .success()
        .stdout("ΑB");
    fs::remove_file(path).ok();
}

#[test]
fn test_max_size() {
    base437()
        .args(["--max-size", "4"])
        .write_stdin("12345")
        .assert()
        .failure()
        .stderr(predicate::str::contains("exceeds maximum"));

    base437()
        .args(["--max-size", "4", "--force"])
        .write_stdin("12345")
        .assert()
        .success()
        .stdout("12345");
}

// ============================================================================
// Data URLs
// ============================================================================

#[test]
fn test_data_url_output() {
    base437()
        .args(["--data-url", "application/octet-stream"])
        .write_stdin(&[1u8, 2, 3][..])
        .assert()
        .success()
        .stdout("data:application/octet-stream;base437,☺☻♥");
}

#[test]
fn test_to_base64_url() {
    base437()
        .arg("--to-base64-url")
        .write_stdin("data:application/octet-stream;base437,☺☻♥\n")
        .assert()
        .success()
        .stdout("data:application/octet-stream;base64,AQID\n");
}

#[test]
fn test_from_base64_url() {
    base437()
        .arg("--from-base64-url")
        .write_stdin("data:text/plain;base64,SGkh\n")
        .assert()
        .success()
        .stdout("data:text/plain;base437,Hi!\n");
}

#[test]
fn test_to_base64_url_wrong_tag() {
    base437()
        .arg("--to-base64-url")
        .write_stdin("data:text/plain;base64,SGkh")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tagged 'base64', expected 'base437'"));
}

#[test]
fn test_to_base64_url_not_a_data_url() {
    base437()
        .arg("--to-base64-url")
        .write_stdin("Hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a data URL"));
}
