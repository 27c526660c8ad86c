use assert_cmd::cargo::cargo_bin_cmd;
use lopdf::{dictionary, Document, Object, Stream};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

fn write_pdf(dir: &Path, name: &str, pages: u32) -> PathBuf {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids: Vec<Object> = Vec::new();
    for _ in 0..pages {
        let content_id = doc.add_object(Stream::new(dictionary! {}, Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), 400.into(), 600.into()],
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => i64::from(pages),
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    let path = dir.join(name);
    doc.save(&path).expect("fixture PDF should be written");
    path
}

#[test]
fn info_reports_page_geometry() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let pdf = write_pdf(temp.path(), "mushaf.pdf", 3);

    let output = cargo_bin_cmd!("quran-unix-cli")
        .arg("info")
        .arg(&pdf)
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    assert_eq!(value["page_count"], 3);
    assert_eq!(value["madinah_layout"], false);
    assert_eq!(value["page_size_pt"]["width"].as_f64(), Some(400.0));
    assert_eq!(value["page_size_pt"]["height"].as_f64(), Some(600.0));
}

#[test]
fn settings_emits_stable_json_contract() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    fs::write(temp.path().join("config.json"), r#"{"last_page": 5, "dark_mode": true}"#)
        .expect("settings fixture should be written");

    let output = cargo_bin_cmd!("quran-unix-cli")
        .arg("settings")
        .arg("--config-dir")
        .arg(temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let mut value: Value =
        serde_json::from_slice(&output).expect("stdout should contain valid json");
    value["path"] = Value::String("<CONFIG>".to_owned());

    insta::assert_json_snapshot!(value, @r#"
    {
      "dark_mode": true,
      "last_page": 5,
      "path": "<CONFIG>"
    }
    "#);
}

#[test]
fn malformed_settings_fall_back_to_defaults() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    fs::write(temp.path().join("config.json"), "{oops").expect("settings fixture should be written");

    let output = cargo_bin_cmd!("quran-unix-cli")
        .arg("settings")
        .env("QURAN_UNIX_CONFIG_DIR", temp.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    assert_eq!(value["last_page"], 0);
    assert_eq!(value["dark_mode"], false);
}

#[test]
fn surah_resolves_page_to_chapter() {
    cargo_bin_cmd!("quran-unix-cli")
        .arg("surah")
        .arg("50")
        .assert()
        .success()
        .stdout("3\tآل عمران\t50\n");
}

#[test]
fn surah_json_includes_metadata() {
    let output = cargo_bin_cmd!("quran-unix-cli")
        .args(["surah", "300", "--json"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let value: Value = serde_json::from_slice(&output).expect("stdout should contain valid json");
    assert_eq!(value["number"], 18);
    assert_eq!(value["start_page"], 293);
    assert_eq!(value["verse_count"], 110);
}

#[test]
fn surah_rejects_page_zero() {
    cargo_bin_cmd!("quran-unix-cli")
        .args(["surah", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be >= 1"));
}

#[test]
fn search_remaps_latin_keys() {
    cargo_bin_cmd!("quran-unix-cli")
        .args(["search", "--remap", "ds"])
        .assert()
        .success()
        .stdout("36\tيس\t440\n");
}

#[test]
fn search_by_number_is_exact() {
    cargo_bin_cmd!("quran-unix-cli")
        .args(["search", "2"])
        .assert()
        .success()
        .stdout("2\tالبقرة\t2\n");
}

#[test]
fn search_without_match_fails() {
    cargo_bin_cmd!("quran-unix-cli")
        .args(["search", "zzz"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no surah matches"));
}

#[test]
fn render_writes_inverted_png() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let pdf = write_pdf(temp.path(), "mushaf.pdf", 2);
    let output_path = temp.path().join("out").join("page.png");

    cargo_bin_cmd!("quran-unix-cli")
        .arg("render")
        .arg(&pdf)
        .args(["--page", "2", "--scale", "0.5", "--dark", "--output"])
        .arg(&output_path)
        .assert()
        .success();

    let image = image::open(&output_path).expect("render should be a readable image").to_rgba8();
    assert_eq!(image.dimensions(), (200, 300));
    assert_eq!(image.get_pixel(10, 10).0, [0, 0, 0, 255]);
}

#[test]
fn render_rejects_page_past_end() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let pdf = write_pdf(temp.path(), "mushaf.pdf", 1);

    cargo_bin_cmd!("quran-unix-cli")
        .arg("render")
        .arg(&pdf)
        .args(["--page", "4"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));
}

#[test]
fn open_supports_dry_run_for_tests() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let pdf = write_pdf(temp.path(), "mushaf.pdf", 1);

    cargo_bin_cmd!("quran-unix-cli")
        .arg("open")
        .arg(&pdf)
        .args(["--page", "77"])
        .env("QURAN_UNIX_TEST_NO_SPAWN", "1")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("open:--pdf "))
        .stdout(predicate::str::contains("--page 77"));
}

#[test]
fn info_fails_for_missing_file() {
    let temp = tempfile::tempdir().expect("temp dir should be created");

    cargo_bin_cmd!("quran-unix-cli")
        .arg("info")
        .arg(temp.path().join("missing.pdf"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("file does not exist"));
}

#[test]
fn info_fails_for_invalid_pdf() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = temp.path().join("invalid.pdf");
    fs::write(&path, b"this is not a pdf").expect("fixture should be written");

    cargo_bin_cmd!("quran-unix-cli")
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to open PDF"));
}

#[test]
fn info_fails_for_encrypted_marker_pdf() {
    let temp = tempfile::tempdir().expect("temp dir should be created");
    let path = temp.path().join("encrypted.pdf");
    fs::write(&path, b"%PDF-1.5\n1 0 obj << /Encrypt 2 0 R >> endobj\n")
        .expect("fixture should be written");

    cargo_bin_cmd!("quran-unix-cli")
        .arg("info")
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("encrypted PDFs are not supported"));
}
