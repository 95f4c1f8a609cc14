use core_logic::{append_line, load_lines, ProxyManager, TokenManager};
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_load_lines_trims_and_drops_blanks() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "alpha\n\n  beta  \n\t\ngamma\n   \ndelta"
    )
    .unwrap();

    let lines = load_lines(file.path()).unwrap();
    assert_eq!(lines, vec!["alpha", "beta", "gamma", "delta"]);
}

#[test]
fn test_load_lines_empty_file() {
    let file = NamedTempFile::new().unwrap();
    let lines = load_lines(file.path()).unwrap();
    assert!(lines.is_empty());
}

#[test]
fn test_load_lines_missing_file() {
    let result = load_lines(std::path::Path::new("definitely/not/here.txt"));
    assert!(result.is_err());
}

#[test]
fn test_token_manager_degrades_to_empty_on_missing_file() {
    let tokens = TokenManager::load("definitely/not/here.txt");
    assert!(tokens.is_empty());
}

#[test]
fn test_proxy_manager_degrades_to_empty_on_missing_file() {
    let proxies = ProxyManager::load("definitely/not/here.txt");
    assert!(proxies.is_empty());
}

#[test]
fn test_token_manager_preserves_order() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "tok-1\ntok-2\n\ntok-3\n").unwrap();

    let tokens = TokenManager::load(file.path().to_str().unwrap());
    assert_eq!(tokens, vec!["tok-1", "tok-2", "tok-3"]);
}

#[test]
fn test_append_line_creates_and_appends() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.txt");

    append_line(&path, "first").unwrap();
    append_line(&path, "second").unwrap();

    let lines = load_lines(&path).unwrap();
    assert_eq!(lines, vec!["first", "second"]);
}
