//! CLI argument parsing tests

use envscan::app::cli::args::Args;
use serial_test::serial;

fn parse(argv: &[&str]) -> Result<Args, clap::Error> {
    Args::try_parse_styled(argv.iter().copied(), false)
}

#[test]
#[serial]
fn test_all_flags() {
    std::env::remove_var("GITHUB_TOKEN");
    let args = parse(&[
        "envscan",
        "--token",
        "abc",
        "--api-url",
        "http://localhost:8080",
        "--batch-size",
        "4",
        "--log-level",
        "debug",
        "--log-format",
        "ext",
        "--log-file",
        "none",
        "--json",
        "--color",
        "octocat",
    ])
    .expect("should parse");

    assert_eq!(args.username, "octocat");
    assert_eq!(args.token.as_deref(), Some("abc"));
    assert_eq!(args.api_url.as_deref(), Some("http://localhost:8080"));
    assert_eq!(args.batch_size, Some(4));
    assert_eq!(args.log_level.as_deref(), Some("debug"));
    assert_eq!(args.log_format.as_deref(), Some("ext"));
    assert_eq!(args.log_file.as_deref(), Some("none"));
    assert!(args.json);
    assert_eq!(args.color_choice(), Some(true));
}

#[test]
fn test_rejects_unknown_log_level() {
    assert!(parse(&["envscan", "octocat", "--log-level", "verbose"]).is_err());
}

#[test]
fn test_rejects_non_numeric_batch_size() {
    assert!(parse(&["envscan", "octocat", "--batch-size", "many"]).is_err());
    assert!(parse(&["envscan", "octocat", "--batch-size", "-3"]).is_err());
}

#[test]
fn test_single_username_only() {
    assert!(parse(&["envscan", "alice", "bob"]).is_err());
}

#[test]
fn test_help_and_version_are_reported_as_errors() {
    let help = parse(&["envscan", "--help"]).expect_err("help short-circuits");
    assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);

    let version = parse(&["envscan", "--version"]).expect_err("version short-circuits");
    assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
}
