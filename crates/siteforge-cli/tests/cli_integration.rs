//! Runs the `siteforge` binary end to end. Model access is always offline.

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn siteforge(project: &std::path::Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_siteforge"))
        .arg("--project")
        .arg(project)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> serde_json::Value {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_generate_offline_writes_project() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("site");
    let output = siteforge(
        tmp.path(),
        &[
            "generate",
            "Create a tournament website with leaderboard and 50000 prize pool",
            "--offline",
            "--out",
            out.to_str().unwrap(),
        ],
    );
    assert!(output.status.success());

    for path in [
        "src/App.js",
        "src/index.js",
        "src/styles.css",
        "public/index.html",
        "package.json",
    ] {
        assert!(out.join(path).is_file(), "missing {path}");
    }
    let app = std::fs::read_to_string(out.join("src/App.js")).unwrap();
    assert!(app.contains("Leaderboard"));

    let manifest = std::fs::read_to_string(out.join("package.json")).unwrap();
    let manifest: serde_json::Value = serde_json::from_str(&manifest).unwrap();
    assert!(manifest["dependencies"]["react"].is_string());
}

#[test]
fn test_classify_prints_requirements() {
    let tmp = tempfile::tempdir().unwrap();
    let value = stdout_json(&siteforge(
        tmp.path(),
        &["classify", "Build an online store for handmade candles"],
    ));
    assert_eq!(value["websiteType"], "ecommerce");
}

#[test]
fn test_recover_from_stdin() {
    let tmp = tempfile::tempdir().unwrap();
    let raw = "```json\n{\"/src/App.js\": {\"code\": \"export default function App() { return <main aria-label=\"home\">Hi</main>; }\"}, \
               \"/src/index.js\": {\"code\": \"import App from './App';\"}, \
               \"/src/styles.css\": {\"code\": \"body { margin: 0; }\"}, \
               \"/public/index.html\": {\"code\": \"<title>Hi</title>\"}, \
               \"/package.json\": {\"code\": \"{}\"}}\n```";

    let mut child = Command::new(env!("CARGO_BIN_EXE_siteforge"))
        .arg("--project")
        .arg(tmp.path())
        .args(["recover", "-"])
        .env("RUST_LOG", "error")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(raw.as_bytes())
        .unwrap();
    let output = child.wait_with_output().unwrap();

    let value = stdout_json(&output);
    assert_eq!(
        value["/src/App.js"]["code"],
        "export default function App() { return <main aria-label=\"home\">Hi</main>; }"
    );
}

#[test]
fn test_recover_prose_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let input = tmp.path().join("raw.txt");
    std::fs::write(&input, "I cannot help with that.").unwrap();

    let output = siteforge(tmp.path(), &["recover", input.to_str().unwrap()]);
    assert!(!output.status.success());
}

#[test]
fn test_score_synthesized_site() {
    let tmp = tempfile::tempdir().unwrap();
    let synthesized = siteforge(tmp.path(), &["synthesize", "A family dental clinic"]);
    assert!(synthesized.status.success());

    let artifact = tmp.path().join("artifact.json");
    std::fs::write(&artifact, &synthesized.stdout).unwrap();

    let report = stdout_json(&siteforge(
        tmp.path(),
        &["score", artifact.to_str().unwrap()],
    ));
    assert!(report["score"].as_u64().unwrap() >= 70);
    assert_eq!(report["hasSEO"], true);
}
