#![allow(dead_code)]

use std::path::Path;
use std::process::{Command, Output};

use serde_json::{Value, json};
use url::Url;

const CONFIG_VARS: [&str; 6] = [
    "FOLIO_ENDPOINT",
    "CONTENTFUL_ENDPOINT",
    "CONTENTFUL_SPACE_ID",
    "CONTENTFUL_ACCESS_TOKEN",
    "CONTENTFUL_PREVIEW_ACCESS_TOKEN",
    "CONTENTFUL_ENVIRONMENT",
];

/// file:// URL for a fixture directory.
pub fn file_url(path: &Path) -> String {
    Url::from_directory_path(path)
        .expect("Failed to convert path to file URL")
        .to_string()
}

/// Run the CLI binary with a clean content configuration.
pub fn run_cli(args: &[&str]) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_folio"));
    cmd.args(args);
    for var in CONFIG_VARS {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// JSON objects printed one per line, skipping any other output.
pub fn json_lines(stdout: &str) -> Vec<Value> {
    stdout
        .lines()
        .filter(|line| line.starts_with('{'))
        .map(|line| serde_json::from_str(line).expect("Invalid JSON line"))
        .collect()
}

/// Write a small insights fixture: five items across two categories plus
/// one entry with a body.
pub fn write_fixture(root: &Path) {
    let items = json!([
        item("a", "Branding", "2024-02-01T00:00:00Z"),
        item("b", "Digital", "2024-02-02T00:00:00Z"),
        item("c", "Branding", "2024-02-03T00:00:00Z"),
        item("d", "Culture", "2024-02-04T00:00:00Z"),
        item("e", "Digital", "2024-02-05T00:00:00Z"),
    ]);
    std::fs::create_dir_all(root).unwrap();
    std::fs::write(root.join("insights.json"), items.to_string()).unwrap();

    let mut entry = item("c", "Branding", "2024-02-03T00:00:00Z");
    entry["body"] = json!([
        { "__typename": "BlockQuote", "text": "Less, but better.", "attribution": "D. Rams" },
        { "__typename": "BlockVideo", "url": "https://example.com/reel.mp4" }
    ]);
    write_entry(root, "c", &entry);
}

pub fn item(id: &str, category: &str, published_at: &str) -> Value {
    json!({
        "id": id,
        "category": category,
        "publishedAt": published_at,
        "title": format!("Insight {}", id),
        "slug": format!("insight-{}", id),
    })
}

pub fn write_entry(root: &Path, id: &str, entry: &Value) {
    let dir = root.join("entries").join("insights");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join(format!("insight-{}.json", id)), entry.to_string()).unwrap();
}
