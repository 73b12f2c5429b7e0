#![allow(clippy::unwrap_used)]
#![allow(missing_docs)]

use std::path::Path;

use assert_cmd::cargo_bin_cmd;
use predicates::prelude::*;

/// Writes a config.toml pointing the client at `base_url`.
fn write_config(dir: &Path, base_url: &str) {
    std::fs::write(
        dir.join("config.toml"),
        format!("[omdb]\napi_key = \"test-key\"\nbase_url = \"{base_url}/\"\n"),
    )
    .unwrap();
}

#[test]
fn test_help_lists_subcommands() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("browse"))
        .stdout(predicate::str::contains("search"))
        .stdout(predicate::str::contains("rate"));
}

#[test]
fn test_search_requires_query() {
    // Arrange & Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--query"));
}

#[test]
fn test_rate_rejects_out_of_range_stars() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["rate", "--id", "tt0372784", "--stars", "6", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--stars"));
}

#[test]
fn test_search_without_api_key_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    let mut cmd = cargo_bin_cmd!("cinesearch");
    cmd.args(["search", "--query", "batman", "--dir"])
        .arg(dir.path())
        .env_remove("OMDB_API_KEY")
        .assert()
        .failure()
        .stderr(predicate::str::contains("OMDB_API_KEY"));
}

#[test]
fn test_rate_and_comment_persist_in_store() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    cargo_bin_cmd!("cinesearch")
        .args(["rate", "--id", "tt0372784", "--stars", "4", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Rated tt0372784: 4/5"));
    cargo_bin_cmd!("cinesearch")
        .args(["comment", "--id", "tt0372784", "--text", "dark", "--dir"])
        .arg(dir.path())
        .assert()
        .success();
    cargo_bin_cmd!("cinesearch")
        .args(["comment", "--id", "tt0372784", "--text", "great", "--dir"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("2 total"));

    // Assert
    assert!(dir.path().join("cinesearch.db").exists());
}

#[test]
fn test_blank_comment_fails() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act & Assert
    cargo_bin_cmd!("cinesearch")
        .args(["comment", "--id", "tt0372784", "--text", "   ", "--dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("comment text must not be empty"));
}

#[test]
fn test_config_set_api_key_then_show_masks_it() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();

    // Act
    cargo_bin_cmd!("cinesearch")
        .args(["config", "set-api-key", "--key", "abcdef123", "--dir"])
        .arg(dir.path())
        .assert()
        .success();

    // Assert
    cargo_bin_cmd!("cinesearch")
        .args(["config", "show", "--dir"])
        .arg(dir.path())
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("****23"))
        .stdout(predicate::str::contains("abcdef123").not());
}

#[test]
fn test_search_unreachable_service_prints_no_movie_found() {
    // Arrange
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), "http://127.0.0.1:1");

    // Act & Assert
    cargo_bin_cmd!("cinesearch")
        .args(["search", "--query", "batman", "--dir"])
        .arg(dir.path())
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("No movie found!"))
        .stdout(predicate::str::contains("test-key").not())
        .stderr(predicate::str::contains("test-key").not());
}

#[tokio::test]
async fn test_search_prints_results_and_pages() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let json_body = include_str!("../../../fixtures/omdb/search_batman_p1.json");
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::query_param("s", "batman"))
        .and(wiremock::matchers::query_param("page", "1"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());

    // Act & Assert
    cargo_bin_cmd!("cinesearch")
        .args(["search", "--query", "batman", "--dir"])
        .arg(dir.path())
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Batman Begins"))
        .stdout(predicate::str::contains("Page 1 of 3 (23 results): [1] 2 3"));
}

#[tokio::test]
async fn test_search_not_found_prints_message() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let json_body = include_str!("../../../fixtures/omdb/search_not_found.json");
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());

    // Act & Assert
    cargo_bin_cmd!("cinesearch")
        .args(["search", "--query", "zzzzzz", "--dir"])
        .arg(dir.path())
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("No movie found!"));
}

#[tokio::test]
async fn test_detail_shows_stored_annotations() {
    // Arrange
    let mock_server = wiremock::MockServer::start().await;
    let json_body = include_str!("../../../fixtures/omdb/detail_tt0372784.json");
    wiremock::Mock::given(wiremock::matchers::method("GET"))
        .and(wiremock::matchers::query_param("i", "tt0372784"))
        .respond_with(wiremock::ResponseTemplate::new(200).set_body_string(json_body))
        .mount(&mock_server)
        .await;
    let dir = tempfile::tempdir().unwrap();
    write_config(dir.path(), &mock_server.uri());
    cargo_bin_cmd!("cinesearch")
        .args(["comment", "--id", "tt0372784", "--text", "great", "--dir"])
        .arg(dir.path())
        .assert()
        .success();

    // Act & Assert
    cargo_bin_cmd!("cinesearch")
        .args(["detail", "--id", "tt0372784", "--dir"])
        .arg(dir.path())
        .env_remove("OMDB_API_KEY")
        .assert()
        .success()
        .stdout(predicate::str::contains("Christopher Nolan"))
        .stdout(predicate::str::contains("Your rating: -"))
        .stdout(predicate::str::contains("- great"));
}
