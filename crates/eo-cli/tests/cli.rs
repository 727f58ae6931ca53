use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;

const CATALOG: &str = r#"{
  "eos": [
    {
      "eo_number": 14001,
      "title": "Modernizing Federal Permitting",
      "summary": "Streamlines environmental review for infrastructure projects.",
      "signing_date": "2025-01-20",
      "original_url": "https://example.gov/eo1"
    },
    {
      "eo_number": 14002,
      "title": "Restoring Energy Dominance",
      "summary": "Expands domestic oil and gas production.",
      "categories": { "policy_domain": "Energy" }
    },
    {
      "eo_number": 14003,
      "title": "Energy Emergency Declaration"
    }
  ],
  "build_time": "2025-03-01T12:00:00Z"
}"#;

struct Sandbox {
    dir: TempDir,
    catalog: String,
}

impl Sandbox {
    fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let catalog = dir.child("catalog.json");
        catalog.write_str(CATALOG).unwrap();
        let catalog = catalog.path().display().to_string();
        Self { dir, catalog }
    }

    /// `eo` with an isolated home/config dir and no inherited catalog source
    fn eo(&self) -> Command {
        let mut cmd = Command::cargo_bin("eo").unwrap();
        cmd.current_dir(self.dir.path())
            .env("HOME", self.dir.path())
            .env("XDG_CONFIG_HOME", self.dir.child("config").path())
            .env("NO_COLOR", "1")
            .env_remove("EO_CATALOG_SOURCE")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn stdout(cmd: &mut Command) -> String {
    let output = cmd.assert().success().get_output().stdout.clone();
    String::from_utf8(output).unwrap()
}

fn stderr_of_failure(cmd: &mut Command) -> String {
    let output = cmd.assert().failure().get_output().stderr.clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn search_prints_message_and_table() {
    let sb = Sandbox::new();
    let out = stdout(sb.eo().args(["--source", sb.catalog.as_str(), "search", "Permiting"]));
    assert!(out.contains("Found 1 result for \"Permiting\""), "{out}");
    assert!(out.contains("Modernizing Federal Permitting"), "{out}");
    assert!(out.contains("14001"), "{out}");
}

#[test]
fn search_json_is_ranked() {
    let sb = Sandbox::new();
    let out = stdout(sb.eo().args(["--source", sb.catalog.as_str(), "search", "energy", "--json"]));
    let hits: serde_json::Value = serde_json::from_str(&out).unwrap();
    let numbers: Vec<u64> = hits
        .as_array()
        .unwrap()
        .iter()
        .map(|h| h["eo_number"].as_u64().unwrap())
        .collect();
    assert_eq!(numbers, vec![14002, 14003]);
}

#[test]
fn search_limit_and_no_results() {
    let sb = Sandbox::new();
    let out = stdout(sb.eo().args([
        "--source",
        sb.catalog.as_str(),
        "search",
        "energy",
        "--json",
        "--limit",
        "1",
    ]));
    let hits: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(hits.as_array().unwrap().len(), 1);

    let out = stdout(sb.eo().args(["--source", sb.catalog.as_str(), "search", "Quantum", "Cryptography"]));
    assert_eq!(out.trim(), "Found 0 results for \"Quantum Cryptography\"");
}

#[test]
fn search_rejects_blank_query() {
    let sb = Sandbox::new();
    let err = stderr_of_failure(sb.eo().args(["--source", sb.catalog.as_str(), "search", " "]));
    assert!(err.contains("Search query is empty"), "{err}");
}

#[test]
fn source_from_environment() {
    let sb = Sandbox::new();
    let out = stdout(
        sb.eo()
            .env("EO_CATALOG_SOURCE", &sb.catalog)
            .args(["search", "energy"]),
    );
    assert!(out.contains("Found 2 results"), "{out}");
}

#[test]
fn show_renders_placeholders_and_links() {
    let sb = Sandbox::new();
    let out = stdout(sb.eo().args(["--source", sb.catalog.as_str(), "show", "14001"]));
    assert!(out.starts_with("Modernizing Federal Permitting\nEO 14001\n"), "{out}");
    assert!(out.contains("Click Here <https://example.gov/eo1>"), "{out}");
    assert!(out.contains("2025-01-20"), "{out}");
    assert!(out.lines().any(|l| l.trim_start().starts_with("Purpose") && l.trim_end().ends_with(" -")));
}

#[test]
fn show_unknown_order_fails() {
    let sb = Sandbox::new();
    let err = stderr_of_failure(sb.eo().args(["--source", sb.catalog.as_str(), "show", "999"]));
    assert!(err.starts_with("Error:"), "{err}");
    assert!(err.contains("999"), "{err}");
}

#[test]
fn missing_catalog_fails_with_cause() {
    let sb = Sandbox::new();
    let err = stderr_of_failure(sb.eo().args(["--source", "nope.json", "search", "energy"]));
    assert!(err.contains("Failed to load catalog from nope.json"), "{err}");
    assert!(err.contains("Failed to read nope.json"), "{err}");
}

#[test]
fn render_writes_page() {
    let sb = Sandbox::new();
    sb.eo()
        .args([
            "--source",
            sb.catalog.as_str(),
            "render",
            "--query",
            "energy",
            "--output",
            "site/index.html",
        ])
        .assert()
        .success();

    let page = std::fs::read_to_string(sb.dir.child("site/index.html").path()).unwrap();
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(page.contains(r#"<div id="eos">"#));
    assert!(page.contains("Found 2 results for &quot;energy&quot;"));
    assert!(!page.contains("Modernizing Federal Permitting"));
}

#[test]
fn assemble_then_search() {
    let sb = Sandbox::new();
    let eo = sb.dir.child("eo");
    eo.child("14001.json")
        .write_str(r#"{"eo_number": 14001, "title": "Modernizing Federal Permitting"}"#)
        .unwrap();
    eo.child("14002.json")
        .write_str(r#"{"eo_number": 14002, "title": "Restoring Energy Dominance"}"#)
        .unwrap();
    eo.child("broken.json").write_str("{").unwrap();

    let output = sb.eo().arg("assemble").assert().success().get_output().clone();
    let err = String::from_utf8(output.stderr).unwrap();
    assert!(err.contains("broken.json"), "{err}");
    assert!(err.contains("Assembled 2 orders"), "{err}");
    assert!(eo.child("eo.json").path().exists());

    // default source is eo/eo.json
    let out = stdout(sb.eo().args(["search", "dominance", "--json"]));
    assert!(out.contains("14002"), "{out}");
}

#[test]
fn config_file_threshold_is_validated() {
    let sb = Sandbox::new();
    sb.dir
        .child("config/eo-catalog/config.toml")
        .write_str("threshold = 2.0\n")
        .unwrap();

    let err = stderr_of_failure(sb.eo().args(["--source", sb.catalog.as_str(), "fields"]));
    assert!(err.contains("threshold must be between 0 and 1"), "{err}");
}

#[test]
fn fields_lists_schema_and_keys() {
    let sb = Sandbox::new();
    let out = stdout(sb.eo().arg("fields"));
    assert!(out.contains("categories.policy_domain"));
    assert!(out.contains("Original Document"));
    assert!(out.contains("key_industries"));
    assert!(out.contains("Match threshold: 0.3"));
}
