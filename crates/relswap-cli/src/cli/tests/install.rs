//! Tests for install and download subcommands.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::Parser;
use std::path::Path;

#[test]
fn cli_parse_install_minimal() {
    match parse(&[
        "relswap", "install", "v1.2.3", "--asset", "tool-linux", "--dest", "/usr/local/bin/tool",
    ]) {
        CliCommand::Install { tag, asset, swap } => {
            assert_eq!(tag, "v1.2.3");
            assert_eq!(asset, "tool-linux");
            assert_eq!(swap.dest, Path::new("/usr/local/bin/tool"));
            assert!(!swap.gunzip);
            assert!(swap.mode.is_none());
            assert!(swap.proxy.is_none());
        }
        _ => panic!("expected Install"),
    }
}

#[test]
fn cli_parse_install_all_flags() {
    match parse(&[
        "relswap",
        "install",
        "v2.0.0",
        "--asset",
        "tool.gz",
        "--dest",
        "bin/tool",
        "--gunzip",
        "--mode",
        "755",
        "--proxy",
        "http://proxy.local:3128",
    ]) {
        CliCommand::Install { swap, .. } => {
            assert!(swap.gunzip);
            assert_eq!(swap.mode, Some(0o755));
            assert_eq!(swap.proxy.as_deref(), Some("http://proxy.local:3128"));
        }
        _ => panic!("expected Install with flags"),
    }
}

#[test]
fn cli_install_requires_asset_and_dest() {
    assert!(Cli::try_parse_from(["relswap", "install", "v1"]).is_err());
    assert!(Cli::try_parse_from(["relswap", "install", "v1", "--asset", "a"]).is_err());
    assert!(Cli::try_parse_from(["relswap", "install", "v1", "--dest", "d"]).is_err());
}

#[test]
fn cli_parse_download() {
    match parse(&[
        "relswap",
        "download",
        "https://example.com/tool",
        "--dest",
        "./tool",
        "--mode",
        "0o700",
    ]) {
        CliCommand::Download { url, swap } => {
            assert_eq!(url, "https://example.com/tool");
            assert_eq!(swap.dest, Path::new("./tool"));
            assert_eq!(swap.mode, Some(0o700));
        }
        _ => panic!("expected Download"),
    }
}

#[test]
fn cli_rejects_non_octal_mode() {
    let res = Cli::try_parse_from([
        "relswap", "download", "https://x/t", "--dest", "t", "--mode", "789",
    ]);
    assert!(res.is_err());
}
