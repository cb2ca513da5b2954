//! End-to-end runs of the `flavour` binary.
//!
//! Only paths that never reach a real provider: startup failures, warnings,
//! validation errors, canned jokes and exports of local text.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const OLLAMA_CONFIG: &str = r#"
[provider]
provider_type = "ollama"
model = "llama3"
endpoint = "http://127.0.0.1:9"

[kitchen]
jokes = "canned"
"#;

/// Run the binary with an isolated HOME / XDG_CONFIG_HOME and no API key.
fn flavour(temp: &TempDir, args: &[&str]) -> Output {
    let home = temp.path().join("home");
    let config_home = temp.path().join("xdg_config");
    fs::create_dir_all(&home).unwrap();
    fs::create_dir_all(&config_home).unwrap();

    Command::new(env!("CARGO_BIN_EXE_flavour"))
        .env("HOME", &home)
        .env("XDG_CONFIG_HOME", &config_home)
        .env_remove("GEMINI_API_KEY")
        .env_remove("FLAVOUR_ENV")
        .env_remove("FLAVOUR_LOG")
        .env_remove("FLAVOUR_LOG_FORMAT")
        .env_remove("FLAVOUR_LOG_OUTPUT")
        .args(args)
        .output()
        .unwrap()
}

/// Workspace whose config selects the local provider, so no key is needed.
fn ollama_workspace(temp: &TempDir) -> String {
    let workspace = temp.path().join("ws");
    fs::create_dir_all(workspace.join("config")).unwrap();
    fs::write(workspace.join("config").join("config.toml"), OLLAMA_CONFIG).unwrap();
    workspace.to_string_lossy().to_string()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_missing_api_key_is_fatal() {
    let temp = TempDir::new().unwrap();
    let workspace = temp.path().join("ws");
    fs::create_dir_all(&workspace).unwrap();

    let output = flavour(&temp, &["--workspace", workspace.to_str().unwrap(), "joke"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(
        stderr(&output)
            .contains("API key not found! Please set GEMINI_API_KEY in the environment or config file."),
        "stderr was: {}",
        stderr(&output)
    );
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_api_key_from_config_file_is_accepted() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("flavour.toml");
    fs::write(
        &config,
        "[provider]\napi_key = \"from-file\"\n\n[kitchen]\njokes = \"canned\"\n",
    )
    .unwrap();
    let workspace = temp.path().join("ws");
    fs::create_dir_all(&workspace).unwrap();

    let output = flavour(
        &temp,
        &[
            "--workspace",
            workspace.to_str().unwrap(),
            "--config",
            config.to_str().unwrap(),
            "joke",
        ],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("Joke of the day"));
}

#[test]
fn test_empty_recipe_input_is_a_warning() {
    let temp = TempDir::new().unwrap();
    let workspace = ollama_workspace(&temp);

    let output = flavour(&temp, &["--workspace", &workspace, "recipe"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("Please enter either a recipe topic or ingredients!"));
}

#[test]
fn test_out_of_range_option_exits_one() {
    let temp = TempDir::new().unwrap();
    let workspace = ollama_workspace(&temp);

    let output = flavour(
        &temp,
        &["--workspace", &workspace, "recipe", "--topic", "soup", "--word-count", "5"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Word count must be between 100 and 2000"));
}

#[test]
fn test_export_requires_shopping_list() {
    let temp = TempDir::new().unwrap();
    let workspace = ollama_workspace(&temp);

    let output = flavour(&temp, &["--workspace", &workspace, "export"]);

    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("No shopping list yet"));
}

#[test]
fn test_export_text_file_to_png() {
    let temp = TempDir::new().unwrap();
    let workspace = ollama_workspace(&temp);
    let list = temp.path().join("list.txt");
    fs::write(&list, "Eggs\nMilk\nFlour\n").unwrap();
    let out_dir = temp.path().join("out");

    let output = flavour(
        &temp,
        &[
            "--workspace",
            &workspace,
            "export",
            "--format",
            "png",
            "--input",
            list.to_str().unwrap(),
            "--output",
            out_dir.to_str().unwrap(),
        ],
    );

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(stdout(&output).contains("shopping_list.png"));
    let bytes = fs::read(Path::new(&out_dir).join("shopping_list.png")).unwrap();
    let image = image::load_from_memory(&bytes).unwrap();
    assert_eq!((image.width(), image.height()), (600, 800));
}

#[test]
fn test_status_json_reports_empty_session() {
    let temp = TempDir::new().unwrap();
    let workspace = ollama_workspace(&temp);

    let output = flavour(&temp, &["--workspace", &workspace, "status", "--format", "json"]);

    assert!(output.status.success(), "stderr: {}", stderr(&output));
    let report: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(report["provider"], "ollama");
    assert_eq!(report["model"], "llama3");
    assert!(report["documents"]
        .as_array()
        .unwrap()
        .iter()
        .all(|doc| doc["present"] == false));
}
