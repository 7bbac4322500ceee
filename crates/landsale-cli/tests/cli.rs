use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::Value;
use tempfile::TempDir;

const ELECTRONIC_NOTICE: &str = "\
Oznaka dokumenta: 330-1841-2024
Parcelna številka: 1204/3
Parcelna številka: 1204/5
Cena/EUR: 4500.00
Cena/EUR: 3100.00
Površina (m²): 1800
Površina (m²): 1240
Cena skupaj: 7.600,00 EUR
KUPEC JE ZNAN
DOKUMENT JE ELEKTRONSKO PODPISAN
";

const GENERIC_NOTICE: &str = "Objava ponudbe za parcelo 845/2 v k.o. Brezje.";

/// Temp workspace with an empty config file so the user's config is never read.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let config = dir.path().join("config.json");
        fs::write(&config, "{}").unwrap();
        Self { dir, config }
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("landsale").unwrap();
        cmd.arg("--config").arg(&self.config);
        cmd
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn process_prints_json() {
    let ws = Workspace::new();
    let input = ws.write("notice_17.txt", ELECTRONIC_NOTICE);

    let output = ws.cmd().arg("process").arg(&input).output().unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["document_id"], "notice_17");
    assert_eq!(json["template_type"], "electronic_form");
    assert_eq!(json["plots"].as_array().unwrap().len(), 2);
    assert_eq!(json["plots"][0]["parcel_id"], "1204/3");
    assert_eq!(json["plots"][0]["share"], "1/1");
    assert_eq!(json["total_area_m2"], 3040);
    assert_eq!(json["total_price"], 7600.0);
    assert_eq!(json["buyer_known"], true);
}

#[test]
fn process_text_format_uses_european_prices() {
    let ws = Workspace::new();
    let input = ws.write("notice.txt", ELECTRONIC_NOTICE);

    ws.cmd()
        .args(["process", "--format", "text", "--id", "E-9"])
        .arg(&input)
        .assert()
        .success()
        .stdout(predicate::str::contains("Document: E-9"))
        .stdout(predicate::str::contains("4.500,00 EUR"))
        .stdout(predicate::str::contains("Total price: 7.600,00 EUR"));
}

#[test]
fn process_reads_stdin() {
    let ws = Workspace::new();

    let output = ws
        .cmd()
        .args(["process", "-"])
        .write_stdin(GENERIC_NOTICE)
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["document_id"], "stdin");
    assert_eq!(json["template_type"], "generic");
    assert_eq!(json["total_price"], Value::Null);
}

#[test]
fn process_writes_output_file() {
    let ws = Workspace::new();
    let input = ws.write("notice.txt", GENERIC_NOTICE);
    let out = ws.path().join("result.json");

    ws.cmd()
        .arg("process")
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    assert_eq!(read_json(&out)["plots"][0]["parcel_id"], "845/2");
}

#[test]
fn process_missing_file_fails() {
    let ws = Workspace::new();

    ws.cmd()
        .args(["process", "does-not-exist.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn batch_writes_results_in_path_order() {
    let ws = Workspace::new();
    ws.write("notices/b.txt", GENERIC_NOTICE);
    ws.write("notices/a.txt", ELECTRONIC_NOTICE);
    ws.write("notices/c.txt", "");
    ws.write("notices/skip.md", GENERIC_NOTICE);
    let out = ws.path().join("all.json");
    let summary = ws.path().join("summary.csv");

    ws.cmd()
        .arg("batch")
        .arg(ws.path().join("notices"))
        .arg("-o")
        .arg(&out)
        .arg("--summary")
        .arg(&summary)
        .args(["--jobs", "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Extraction statistics"));

    let json = read_json(&out);
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["document_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
    assert_eq!(json[2]["confidence_score"], 0.1);

    let csv = fs::read_to_string(&summary).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("document_id,filename,status,template_type"));
    assert!(lines[1].starts_with("a,a.txt,success,electronic_form,2,2,3040,"));
}

#[test]
fn batch_limit_and_stdout() {
    let ws = Workspace::new();
    ws.write("in/one.txt", GENERIC_NOTICE);
    ws.write("in/two.txt", GENERIC_NOTICE);
    ws.write("in/three.txt", GENERIC_NOTICE);

    let pattern = format!("{}/in/*.txt", ws.path().display());
    let output = ws
        .cmd()
        .args(["batch", &pattern, "--limit", "2"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["document_id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["one", "three"]);
}

#[test]
fn batch_without_inputs_fails() {
    let ws = Workspace::new();
    fs::create_dir_all(ws.path().join("empty")).unwrap();

    ws.cmd()
        .arg("batch")
        .arg(ws.path().join("empty"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("No matching files"));
}

#[test]
fn update_skips_stored_documents() {
    let ws = Workspace::new();
    ws.write("in/a.txt", ELECTRONIC_NOTICE);
    let db = ws.path().join("db.json");

    ws.cmd()
        .arg("update")
        .arg(ws.path().join("in"))
        .arg("--database")
        .arg(&db)
        .assert()
        .success();

    let json = read_json(&db);
    assert_eq!(json["metadata"]["total_extractions"], 1);
    assert_eq!(json["extractions"]["a"]["template_type"], "electronic_form");
    let created = json["metadata"]["created_at"].clone();

    ws.write("in/b.txt", GENERIC_NOTICE);
    ws.cmd()
        .arg("update")
        .arg(ws.path().join("in"))
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stderr(predicate::str::contains("2 files, 1 to extract"));

    let json = read_json(&db);
    assert_eq!(json["metadata"]["total_extractions"], 2);
    assert_eq!(json["metadata"]["created_at"], created);

    ws.cmd()
        .arg("update")
        .arg(ws.path().join("in"))
        .arg("--database")
        .arg(&db)
        .assert()
        .success()
        .stderr(predicate::str::contains("up to date"));

    ws.cmd()
        .arg("update")
        .arg(ws.path().join("in"))
        .arg("--database")
        .arg(&db)
        .arg("--force")
        .assert()
        .success()
        .stderr(predicate::str::contains("2 files, 2 to extract"));
}

#[test]
fn config_init_get_set() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("nested").join("config.json");
    let landsale = || {
        let mut cmd = Command::cargo_bin("landsale").unwrap();
        cmd.arg("--config").arg(&config);
        cmd
    };

    landsale().args(["config", "init"]).assert().success();
    assert!(config.exists());

    landsale()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    landsale()
        .args(["config", "get", "batch.jobs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("4\n"));

    landsale()
        .args(["config", "set", "batch.jobs", "8"])
        .assert()
        .success();
    landsale()
        .args(["config", "get", "batch.jobs"])
        .assert()
        .success()
        .stdout(predicate::str::diff("8\n"));

    landsale()
        .args(["config", "set", "batch.jobs", "0"])
        .assert()
        .failure();

    landsale()
        .args(["config", "get", "batch.nothing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn strict_alignment_config_drops_notes() {
    let ws = Workspace::new();
    fs::write(
        &ws.config,
        r#"{"extraction": {"anchor_electronic_fields": false, "note_aligned_fields": false}}"#,
    )
    .unwrap();
    let input = ws.write(
        "n.txt",
        "Parcelna številka: 1/1\nParcelna številka: 2/1\nCena/EUR: 100.00\nDOKUMENT JE ELEKTRONSKO PODPISAN\n",
    );

    let output = ws.cmd().arg("process").arg(&input).output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["notes"], Value::Array(vec![]));
    assert_eq!(json["plots"][0]["price_eur"], 100.0);
    assert_eq!(json["plots"][1]["price_eur"], Value::Null);
}
