//! Integration tests for CLI argument handling
//!
//! Drives the binary's argument surface; the TUI itself is not started
//! because --help and bad flags exit before terminal setup.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_lunchglance"))
        .args(args)
        .output()
        .expect("Failed to execute lunchglance")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("lunchglance"),
        "Help should mention lunchglance"
    );
    assert!(
        stdout.contains("refresh"),
        "Help should mention the --refresh flag"
    );
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lunchglance"));
}

#[test]
fn test_unknown_flag_prints_error_and_exits() {
    let output = run_cli(&["--definitely-not-a-flag"]);
    assert!(!output.status.success(), "Expected unknown flag to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("unexpected") || stderr.contains("error"),
        "Should print an argument error: {}",
        stderr
    );
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use lunchglance::cli::Cli;

    #[test]
    fn test_cli_no_args_defaults_to_cached() {
        let cli = Cli::parse_from(["lunchglance"]);
        assert!(!cli.refresh);
    }

    #[test]
    fn test_cli_refresh_flag_sets_refresh() {
        let cli = Cli::parse_from(["lunchglance", "--refresh"]);
        assert!(cli.refresh);
    }
}
