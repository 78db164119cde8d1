use assert_cmd::Command;
use predicates::prelude::*;
use rstest::*;
use std::path::PathBuf;
use tempfile::TempDir;

/// A scratch home directory holding one fresh database
struct Workspace {
    dir: TempDir,
    db: PathBuf,
}

impl Workspace {
    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("tagmarks").unwrap();
        cmd.env("HOME", self.dir.path())
            .env("TAGMARKS_DB_URL", &self.db)
            .env_remove("TAGMARKS_USER")
            .env_remove("TAGMARKS_PAGE_SIZE")
            .arg("--no-color");
        cmd
    }

    fn as_user(&self, user: i32) -> Command {
        let mut cmd = self.cmd();
        cmd.args(["--user", &user.to_string()]);
        cmd
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = tempfile::tempdir().unwrap();
    let db = dir.path().join("tagmarks.db");
    let ws = Workspace { dir, db };
    ws.cmd()
        .args(["create-db", ws.db.to_str().unwrap()])
        .assert()
        .success()
        .stderr(predicate::str::contains("Database created"));
    ws.cmd()
        .args(["create-user", "alice@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with ID 1"));
    ws.cmd()
        .args(["create-user", "bob@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("with ID 2"));
    ws
}

#[rstest]
fn test_debug_mode() {
    let mut cmd = Command::cargo_bin("tagmarks").unwrap();
    cmd.args(["-d", "-d"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Debug mode: debug"));
}

#[rstest]
fn test_generate_config() {
    let mut cmd = Command::cargo_bin("tagmarks").unwrap();
    cmd.arg("--generate-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("page_size = 20"));
}

#[rstest]
fn test_create_db_refuses_existing_file(workspace: Workspace) {
    workspace
        .cmd()
        .args(["create-db", workspace.db.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

#[rstest]
fn test_missing_database_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut cmd = Command::cargo_bin("tagmarks").unwrap();
    cmd.env("HOME", dir.path())
        .env("TAGMARKS_DB_URL", dir.path().join("none.db"))
        .args(["--user", "1", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Opening bookmark database"))
        .stderr(predicate::str::contains("create-db"));
}

#[rstest]
fn test_bookmark_command_requires_user(workspace: Workspace) {
    workspace
        .cmd()
        .arg("list")
        .assert()
        .code(64)
        .stderr(predicate::str::contains("No user selected"));
}

#[rstest]
fn test_add_list_and_filter_by_tag(workspace: Workspace) {
    workspace
        .as_user(1)
        .args(["add", "--title", "rust", "--url", "https://rust-lang.org"])
        .args(["--tags", "lang, systems,lang"])
        .assert()
        .success()
        .stderr(predicate::str::contains("The bookmark has been saved."));
    workspace
        .as_user(1)
        .args(["add", "--title", "untagged", "--url", "https://example.org"])
        .assert()
        .success();

    workspace
        .as_user(1)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("rust"))
        .stdout(predicate::str::contains("lang, systems"))
        .stdout(predicate::str::contains("2 bookmark(s) total"));

    workspace
        .as_user(1)
        .args(["tags", "systems", "nothing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rust"))
        .stdout(predicate::str::contains("untagged").not());

    workspace
        .as_user(1)
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("untagged"))
        .stdout(predicate::str::contains("https://rust-lang.org").not());
}

#[rstest]
fn test_page_far_beyond_the_end_is_empty(workspace: Workspace) {
    workspace
        .as_user(1)
        .args(["add", "--title", "only"])
        .assert()
        .success();

    workspace
        .as_user(1)
        .args(["list", "--page", &usize::MAX.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("No bookmarks to display"))
        .stdout(predicate::str::contains("1 bookmark(s) total"));
}

#[rstest]
fn test_normalize_tags_previews_without_storing(workspace: Workspace) {
    workspace
        .as_user(1)
        .args(["add", "--title", "rust", "--tags", "lang"])
        .assert()
        .success();

    workspace
        .cmd()
        .args(["normalize-tags", " new, lang ,new,,"])
        .assert()
        .success()
        .stdout(predicate::str::diff("lang (existing, ID 1)\nnew (new)\n"));

    // the preview created nothing
    workspace
        .cmd()
        .args(["normalize-tags", "new"])
        .assert()
        .success()
        .stdout(predicate::str::contains("new (new)"));
}

#[rstest]
fn test_other_users_bookmark_is_denied(workspace: Workspace) {
    workspace
        .as_user(1)
        .args(["add", "--title", "private"])
        .assert()
        .success();

    workspace
        .as_user(2)
        .args(["edit", "1", "--title", "stolen"])
        .assert()
        .code(77)
        .stderr(predicate::str::contains(
            "You are not authorized to access that location.",
        ));
    workspace.as_user(2).args(["delete", "1"]).assert().code(77);

    workspace
        .as_user(1)
        .args(["show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("private"))
        .stdout(predicate::str::contains("alice@example.com"));
}

#[rstest]
fn test_missing_bookmark_is_not_found(workspace: Workspace) {
    workspace.as_user(1).args(["show", "99"]).assert().code(66);
    workspace.as_user(1).args(["show", "abc"]).assert().code(66);
}

#[rstest]
fn test_invalid_title_is_rejected(workspace: Workspace) {
    workspace
        .as_user(1)
        .args(["add", "--title", &"x".repeat(51)])
        .assert()
        .code(65)
        .stderr(predicate::str::contains(
            "The bookmark could not be saved. Please, try again.",
        ))
        .stdout(predicate::str::contains("title"));

    workspace
        .as_user(1)
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("0 bookmark(s) total"));
}

#[rstest]
fn test_edit_and_delete_own_bookmark(workspace: Workspace) {
    workspace
        .as_user(1)
        .args(["add", "--title", "draft", "--tags", "a,b"])
        .assert()
        .success();

    workspace
        .as_user(1)
        .args(["edit", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("a, b"));

    workspace
        .as_user(1)
        .args(["edit", "1", "--title", "final"])
        .assert()
        .success();

    workspace
        .as_user(1)
        .args(["--json", "show", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"final\""))
        .stdout(predicate::str::contains("\"view\": \"detail\""));

    workspace
        .as_user(1)
        .args(["delete", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("The bookmark has been deleted."));
    workspace.as_user(1).args(["show", "1"]).assert().code(66);
}
