//! Integration tests for the notesmith CLI using a fixture vault.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Get the path to a fixture vault.
fn fixture_path(name: &str) -> PathBuf {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    PathBuf::from(manifest_dir)
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

/// Copy a fixture vault into a temp dir so commands can modify it.
fn scratch_vault(name: &str) -> TempDir {
    fn copy_dir(from: &Path, to: &Path) {
        fs::create_dir_all(to).unwrap();
        for entry in fs::read_dir(from).unwrap() {
            let entry = entry.unwrap();
            let target = to.join(entry.file_name());
            if entry.file_type().unwrap().is_dir() {
                copy_dir(&entry.path(), &target);
            } else {
                fs::copy(entry.path(), &target).unwrap();
            }
        }
    }

    let dir = TempDir::new().unwrap();
    copy_dir(&fixture_path(name), dir.path());
    dir
}

fn command(vault: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_notesmith"));
    cmd.arg("--vault")
        .arg(vault)
        .args(args)
        .env("NOTESMITH_CONFIG", vault.join("no-such-config.toml"))
        .env_remove("NOTESMITH_VAULT")
        .env_remove("RUST_LOG");
    cmd
}

/// Run a command and return (stdout, stderr, exit code).
fn run_in(vault: &Path, args: &[&str]) -> (String, String, i32) {
    let output = command(vault, args)
        .output()
        .expect("Failed to execute notesmith");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_fixture(args: &[&str]) -> (String, String, i32) {
    run_in(&fixture_path("project"), args)
}

fn json(stdout: &str) -> serde_json::Value {
    serde_json::from_str(stdout).expect("stdout is JSON")
}

mod list_command {
    use super::*;

    #[test]
    fn list_skips_hidden_notes() {
        let (stdout, _, code) = run_fixture(&["list"]);
        assert_eq!(code, 0);
        let value = json(&stdout);
        assert_eq!(value["total"], 3);
        assert_eq!(
            value["notes"],
            serde_json::json!(["Daily/2024-01-05.md", "Ideas.md", "Project.md"])
        );
    }

    #[test]
    fn list_folder() {
        let (stdout, _, code) = run_fixture(&["list", "Daily"]);
        assert_eq!(code, 0);
        assert_eq!(json(&stdout)["notes"], serde_json::json!(["Daily/2024-01-05.md"]));
    }

    #[test]
    fn list_as_yaml() {
        let (stdout, _, code) = run_fixture(&["--yaml", "list"]);
        assert_eq!(code, 0);
        assert!(stdout.contains("total: 3"));
    }
}

mod search_command {
    use super::*;

    #[test]
    fn search_ranks_by_count() {
        let (stdout, _, code) = run_fixture(&["search", "ALPHA"]);
        assert_eq!(code, 0);
        let value = json(&stdout);
        assert_eq!(value["total"], 2);
        assert_eq!(value["results"][0]["path"], "Project.md");
        assert_eq!(value["results"][0]["score"], 3);
        assert_eq!(value["results"][1]["path"], "Ideas.md");
        assert_eq!(value["results"][1]["score"], 1);
    }

    #[test]
    fn search_respects_limits() {
        let (stdout, _, code) = run_fixture(&["search", "alpha", "-n", "1", "-c", "12"]);
        assert_eq!(code, 0);
        let value = json(&stdout);
        assert_eq!(value["total"], 1);
        let snippet = value["results"][0]["snippet"].as_str().unwrap();
        assert_eq!(snippet.chars().count(), 12);
        assert!(!snippet.contains('\n'));
    }

    #[test]
    fn search_unicode_snippet() {
        let (stdout, _, code) = run_fixture(&["search", "RÉSUMÉ", "-c", "9"]);
        assert_eq!(code, 0);
        let value = json(&stdout);
        assert_eq!(value["results"][0]["path"], "Ideas.md");
        assert!(value["results"][0]["snippet"].as_str().unwrap().contains("résumé"));
    }

    #[test]
    fn search_without_match_is_empty() {
        let (stdout, _, code) = run_fixture(&["search", "zeta"]);
        assert_eq!(code, 0);
        assert_eq!(json(&stdout)["total"], 0);
    }
}

mod get_command {
    use super::*;

    #[test]
    fn get_returns_structure() {
        let (stdout, _, code) = run_fixture(&["get", "Project"]);
        assert_eq!(code, 0);
        let value = json(&stdout);
        assert_eq!(value["path"], "Project.md");
        assert_eq!(value["frontmatter"]["status"], "draft");
        assert_eq!(value["frontmatter"]["tags"], serde_json::json!(["rust", "notes"]));
        assert_eq!(value["headings"][0]["text"], "Project");
        assert_eq!(value["headings"][0]["children"][1]["text"], "Log");
        assert_eq!(value["headings"][1]["text"], "Archive");
        assert_eq!(value["blocks"][0]["id"], "task-list");
        assert!(value["content"].as_str().unwrap().starts_with("---\n"));
    }

    #[test]
    fn get_metadata_only() {
        let (stdout, _, code) = run_fixture(&["get", "Project", "--metadata-only"]);
        assert_eq!(code, 0);
        assert!(json(&stdout).get("content").is_none());
    }

    #[test]
    fn get_max_chars() {
        let (stdout, _, code) = run_fixture(&["get", "Ideas", "--max-chars", "7"]);
        assert_eq!(code, 0);
        let value = json(&stdout);
        assert_eq!(value["content"], "# Ideas\n...[truncated]");
        assert_eq!(value["truncated"], true);
    }

    #[test]
    fn get_not_found() {
        let (_, stderr, code) = run_fixture(&["get", "NonExistent"]);
        assert_eq!(code, 2);
        assert!(stderr.contains("not found"));
    }

    #[test]
    fn get_rejects_escaping_path() {
        let (_, _, code) = run_fixture(&["get", "../secrets"]);
        assert_eq!(code, 5);
    }
}

mod write_commands {
    use super::*;

    #[test]
    fn create_then_conflict_then_force() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(vault.path(), &["create", "New", "--content", "hello\\nworld"]);
        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(vault.path().join("New.md")).unwrap(), "hello\nworld");

        let (_, _, code) = run_in(vault.path(), &["create", "New", "--content", "x"]);
        assert_eq!(code, 3);

        let (_, _, code) = run_in(vault.path(), &["create", "New", "--content", "x", "--force"]);
        assert_eq!(code, 0);
        assert_eq!(fs::read_to_string(vault.path().join("New.md")).unwrap(), "x");
    }

    #[test]
    fn append_from_stdin() {
        let vault = scratch_vault("project");
        let mut child = command(vault.path(), &["append", "Ideas", "--stdin"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .unwrap();
        child.stdin.take().unwrap().write_all(b"Another idea.\n").unwrap();
        let status = child.wait().unwrap();
        assert!(status.success());

        let content = fs::read_to_string(vault.path().join("Ideas.md")).unwrap();
        assert!(content.ends_with("handling.\nAnother idea.\n"));
    }

    #[test]
    fn append_requires_content() {
        let vault = scratch_vault("project");
        let (_, stderr, code) = run_in(vault.path(), &["append", "Ideas"]);
        assert_eq!(code, 5);
        assert!(stderr.contains("No content provided"));
    }

    #[test]
    fn patch_heading_append() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(
            vault.path(),
            &["patch", "Project", "--heading", "Project::Tasks", "--content", "- write tests"],
        );
        assert_eq!(code, 0);
        let content = fs::read_to_string(vault.path().join("Project.md")).unwrap();
        assert!(content.contains("- write parser ^task-list\n\n- write tests\n## Log"));
    }

    #[test]
    fn patch_parent_heading_appends_after_children() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(
            vault.path(),
            &["patch", "Project", "--heading", "Project", "--content", "Closing note."],
        );
        assert_eq!(code, 0);
        let content = fs::read_to_string(vault.path().join("Project.md")).unwrap();
        assert!(content.contains(
            "## Log\n\nStarted work on the alpha release.\n\nClosing note.\n# Archive\n"
        ));
        assert!(content.contains("- write parser ^task-list\n\n## Log"));
    }

    #[test]
    fn patch_frontmatter_replace() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(
            vault.path(),
            &["patch", "Project", "--frontmatter", "status", "-o", "replace", "--content", "\"done\""],
        );
        assert_eq!(code, 0);
        let content = fs::read_to_string(vault.path().join("Project.md")).unwrap();
        assert!(content.starts_with("---\ntitle: Project\nstatus: done\ntags:\n  - rust\n"));
    }

    #[test]
    fn patch_block_replace_keeps_anchor() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(
            vault.path(),
            &["patch", "Project", "--block", "^task-list", "-o", "replace", "--content", "- done"],
        );
        assert_eq!(code, 0);
        let content = fs::read_to_string(vault.path().join("Project.md")).unwrap();
        assert!(content.contains("\n- done ^task-list\n"));
    }

    #[test]
    fn patch_missing_target_leaves_note() {
        let vault = scratch_vault("project");
        let before = fs::read_to_string(vault.path().join("Project.md")).unwrap();
        let (_, stderr, code) = run_in(
            vault.path(),
            &["patch", "Project", "--heading", "Nope", "--content", "x"],
        );
        assert_eq!(code, 4);
        assert!(stderr.contains("Heading not found"));
        assert_eq!(fs::read_to_string(vault.path().join("Project.md")).unwrap(), before);
    }

    #[test]
    fn patch_dry_run_does_not_write() {
        let vault = scratch_vault("project");
        let before = fs::read_to_string(vault.path().join("Ideas.md")).unwrap();
        let (stdout, _, code) = run_in(
            vault.path(),
            &["patch", "Ideas", "--heading", "Ideas", "-o", "prepend", "--content", "x", "--dry-run"],
        );
        assert_eq!(code, 0);
        assert_eq!(json(&stdout)["content"], "# Ideas\nx\n\nAn alpha idea about café résumé handling.\n");
        assert_eq!(fs::read_to_string(vault.path().join("Ideas.md")).unwrap(), before);
    }

    #[test]
    fn daily_appends_to_existing_note() {
        let vault = scratch_vault("project");
        let config = vault.path().join("config.toml");
        fs::write(&config, "[periodic.daily]\nfolder = \"Daily\"\n").unwrap();

        let output = command(vault.path(), &["daily", "--date", "2024-01-05", "--content", "Wrote tests."])
            .env("NOTESMITH_CONFIG", &config)
            .output()
            .unwrap();
        assert!(output.status.success());

        let content = fs::read_to_string(vault.path().join("Daily/2024-01-05.md")).unwrap();
        assert_eq!(content, "Met with the team.\nWrote tests.\n");
    }

    #[test]
    fn daily_weekly_creates_note() {
        let vault = scratch_vault("project");
        let (stdout, _, code) = run_in(
            vault.path(),
            &["daily", "--period", "weekly", "--date", "2024-01-05", "--content", "week one"],
        );
        assert_eq!(code, 0);
        assert_eq!(json(&stdout)["path"], "2024-W01.md");
        assert_eq!(fs::read_to_string(vault.path().join("2024-W01.md")).unwrap(), "week one\n");
    }

    #[test]
    fn daily_invalid_date() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(vault.path(), &["daily", "--date", "05/01/2024", "--content", "x"]);
        assert_eq!(code, 5);
    }

    #[test]
    fn delete_note() {
        let vault = scratch_vault("project");
        let (_, _, code) = run_in(vault.path(), &["delete", "Ideas"]);
        assert_eq!(code, 0);
        assert!(!vault.path().join("Ideas.md").exists());

        let (_, _, code) = run_in(vault.path(), &["delete", "Ideas"]);
        assert_eq!(code, 2);
    }
}

mod errors {
    use super::*;

    #[test]
    fn missing_vault() {
        let dir = TempDir::new().unwrap();
        let (_, stderr, code) = run_in(&dir.path().join("missing"), &["list"]);
        assert_eq!(code, 1);
        assert!(stderr.contains("Vault not found"));
    }

    #[test]
    fn quiet_suppresses_error_message() {
        let (_, stderr, code) = run_fixture(&["-q", "get", "NonExistent"]);
        assert_eq!(code, 2);
        assert!(stderr.is_empty());
    }
}
