//! End-to-end tests for the `projconf` binary.
//!
//! Every run uses closed-source settings so no homepage is fetched.

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Temporary workspace with an empty config file and a project directory.
struct Workspace {
    dir: TempDir,
}

impl Workspace {
    fn new(project: &str) -> Self {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("config.toml"), "[identity]\ncode_owner = \"acme\"\n").unwrap();
        let scripts = dir.path().join(project).join("scripts");
        fs::create_dir_all(&scripts).unwrap();
        fs::write(scripts.join("version.txt"), "2.0.0\n").unwrap();
        Self { dir }
    }

    fn project(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn config(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    fn cmd(&self) -> Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("projconf");
        cmd.current_dir(self.dir.path())
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .arg("-c")
            .arg(self.config());
        cmd
    }
}

fn exists(root: &Path, relative: &str) -> bool {
    root.join(relative).exists()
}

#[test]
fn help_lists_subcommands() {
    assert_cmd::cargo::cargo_bin_cmd!("projconf")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("attributes"));
}

#[test]
fn version_is_printed() {
    assert_cmd::cargo::cargo_bin_cmd!("projconf")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn generate_closed_source_java_project() {
    let ws = Workspace::new("billing");
    let project = ws.project("billing");

    ws.cmd()
        .args(["generate", "-e", "java", "-C"])
        .arg(&project)
        .args(["--set", "is_opensource=false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pom.xml"))
        .stdout(predicate::str::contains("3 written, 0 removed"));

    assert!(exists(&project, "pom.xml"));
    assert!(exists(&project, "README.md"));
    assert!(exists(&project, ".gitignore"));
    assert!(!exists(&project, "LICENSE"));

    let pom = fs::read_to_string(project.join("pom.xml")).unwrap();
    assert!(pom.contains("<version>2.0.0</version>"));
    assert!(pom.contains("<groupId>com.example.billing</groupId>"));
}

#[test]
fn settings_file_in_scripts_is_picked_up() {
    let ws = Workspace::new("billing");
    let project = ws.project("billing");
    fs::write(
        project.join("scripts/projconf.toml"),
        "is_opensource = false\npretty_name = \"Billing Engine\"\n",
    )
    .unwrap();

    ws.cmd()
        .args(["generate", "-e", "java", "-C"])
        .arg(&project)
        .assert()
        .success();

    let readme = fs::read_to_string(project.join("README.md")).unwrap();
    assert!(readme.contains("# Billing Engine"));
}

#[test]
fn dry_run_writes_nothing() {
    let ws = Workspace::new("billing");
    let project = ws.project("billing");

    ws.cmd()
        .args(["generate", "--dry-run", "-e", "java", "-C"])
        .arg(&project)
        .args(["--set", "is_opensource=false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("write  pom.xml"));

    assert!(!exists(&project, "pom.xml"));
}

#[test]
fn plan_as_json() {
    let ws = Workspace::new("Ledger");
    let project = ws.project("Ledger");

    let assert = ws
        .cmd()
        .args(["--output-format", "json", "plan", "-e", "net", "-C"])
        .arg(&project)
        .args(["--set", "is_opensource=false"])
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(json["ecosystem"], "net");
    let actions = json["actions"].as_array().unwrap();
    assert!(!actions.is_empty());
    assert!(!exists(&project, "Ledger.sln"));
}

#[test]
fn show_resolves_attributes() {
    let ws = Workspace::new("Ledger");

    ws.cmd()
        .args(["show", "-e", "net", "-C"])
        .arg(ws.project("Ledger"))
        .args(["pretty_name", "repository_url"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pretty_name = \"Ledger\""))
        .stdout(predicate::str::contains("github.com/acme/Ledger"));
}

#[test]
fn attributes_lists_layer_stack() {
    let ws = Workspace::new("Ledger");

    ws.cmd()
        .args(["attributes", "-e", "fvc", "-C"])
        .arg(ws.project("Ledger"))
        .assert()
        .success()
        .stdout(predicate::str::contains("identity > common > net > fvc"))
        .stdout(predicate::str::contains("root_namespace"));
}

#[test]
fn missing_ecosystem_is_a_user_error() {
    let ws = Workspace::new("billing");

    ws.cmd()
        .args(["plan", "-C"])
        .arg(ws.project("billing"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--ecosystem"));
}

#[test]
fn missing_project_directory_is_not_found() {
    let ws = Workspace::new("billing");

    ws.cmd()
        .args(["plan", "-e", "java", "-C"])
        .arg(ws.project("nowhere"))
        .assert()
        .code(3);
}

#[test]
fn unknown_attribute_is_reported() {
    let ws = Workspace::new("billing");

    ws.cmd()
        .args(["show", "-e", "java", "-C"])
        .arg(ws.project("billing"))
        .arg("no_such_attribute")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no_such_attribute"));
}

#[test]
fn config_get_reads_file_values() {
    let ws = Workspace::new("billing");

    ws.cmd()
        .args(["config", "get", "identity.code_owner"])
        .assert()
        .success()
        .stdout("acme\n");
}

#[test]
fn explicit_config_must_exist() {
    assert_cmd::cargo::cargo_bin_cmd!("projconf")
        .args(["-c", "/definitely/not/here.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let ws = Workspace::new("billing");

    ws.cmd().arg("init").assert().success();
    let text = fs::read_to_string(ws.config()).unwrap();
    assert_eq!(text, "[identity]\ncode_owner = \"acme\"\n");

    ws.cmd().args(["init", "--force"]).assert().success();
    let text = fs::read_to_string(ws.config()).unwrap();
    assert!(text.contains("settings_file = \"scripts/projconf.toml\""));
}

#[test]
fn completions_are_generated() {
    assert_cmd::cargo::cargo_bin_cmd!("projconf")
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("projconf"));
}
