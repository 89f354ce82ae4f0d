#![allow(clippy::unwrap_used)]
#![allow(deprecated)]

use predicates::prelude::*;

use super::test_context::TestContext;

#[test]
fn test_config_prints_effective_settings() {
    let ctx = TestContext::new();

    ctx.command()
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("api_url"))
        .stdout(predicate::str::contains("127.0.0.1:9"))
        .stdout(predicate::str::contains("logged_in = false"));
}

#[test]
fn test_whoami_without_session_fails() {
    TestContext::new()
        .command()
        .arg("whoami")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not logged in"));
}

#[test]
fn test_whoami_prints_session_user() {
    TestContext::logged_in()
        .command()
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("Username: dana"))
        .stdout(predicate::str::contains("Email: dana@example.com"));
}

#[test]
fn test_logout_without_session() {
    TestContext::new()
        .command()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("No active session."));
}

#[test]
fn test_logout_removes_session_file() {
    let ctx = TestContext::logged_in();

    ctx.command()
        .arg("logout")
        .assert()
        .success()
        .stdout(predicate::str::contains("Logged out."));

    assert!(!ctx.session_path.exists());
}

#[test]
fn test_register_validates_before_any_request() {
    // the API is unreachable, so these messages can only come from the
    // client-side validation pass
    let username = format!("user_{}", uuid::Uuid::new_v4().simple());

    TestContext::new()
        .command()
        .args([
            "register",
            "--username",
            &username,
            "--password",
            "hunter2",
            "--display-name",
            "User",
            "--email",
            "not-an-email",
            "--phone",
            "call me",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid email"))
        .stderr(predicate::str::contains("Invalid phone number"));
}

#[test]
fn test_login_network_failure_is_reported() {
    TestContext::new()
        .command()
        .args(["login", "--username", "dana", "--password", "hunter2"])
        .assert()
        .failure();
}

#[test]
fn test_favorites_require_login() {
    TestContext::new()
        .command()
        .args(["favorites", "add", "3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("logged in to manage favorites"));
}

#[test]
fn test_seek_rejects_unknown_category() {
    TestContext::new()
        .command()
        .args(["seek", "--category", "Dragon"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown category: Dragon"));
}

#[test]
fn test_ad_create_requires_login() {
    TestContext::new()
        .command()
        .args([
            "ad", "create", "--category", "Cat", "--name", "Whiskers", "--age", "1",
            "--gender", "female", "--content", "Playful.",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Must be a registered user"));
}

#[test]
fn test_ad_create_rejects_oversized_image() {
    let ctx = TestContext::logged_in();
    let image = ctx.temp_dir.path().join("pet.jpg");
    std::fs::write(&image, vec![0u8; 1_048_577]).unwrap();

    ctx.command()
        .args([
            "ad",
            "create",
            "--category",
            "Cat",
            "--name",
            "Whiskers",
            "--age",
            "1",
            "--gender",
            "female",
            "--content",
            "Playful.",
            "--image",
            image.to_str().unwrap(),
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("should not exceed 1MB"));
}

#[test]
fn test_interactive_seek_shows_error_and_keeps_running() {
    // the fetch fails against the dead service; the view reports the error
    // on stderr and stays up until 'q'
    TestContext::new()
        .command()
        .args(["seek", "--interactive", "--output", "plain"])
        .write_stdin("q\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Page 1 of 1"))
        .stderr(predicate::str::contains("Error:"));
}

#[test]
fn test_completion_generates_script() {
    TestContext::new()
        .command()
        .args(["completion", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rehome"));
}
