//! Integration tests for the fluent-regex pipeline.
//!
//! These tests exercise the public surface end to end: the builder's fluent
//! chain and terminal operations, the built-in validator, config-defined rules,
//! and the command runner with real config files in a temp directory.

use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use clap::Parser;

use fluent_regex::cli::Args;
use fluent_regex::config::load_config;
use fluent_regex::rule::registry::RuleRegistry;
use fluent_regex::{CommonValidator, CompileOptions, PatternBuilder, PatternError, execute};

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Run the command with `argv` (program name added) and return (exit code, stdout).
fn run_cli(argv: &[&str], stdin: &str) -> (i32, String) {
    let args = Args::parse_from(std::iter::once("fluent-regex").chain(argv.iter().copied()));
    let mut out = Vec::new();
    let code = execute(args, Cursor::new(stdin.to_string()), &mut out).unwrap();
    (code, String::from_utf8(out).unwrap())
}

const ZIP_CONFIG: &str = "\
Rules:
  zip:
    Description: US ZIP code
    Steps:
      - start
      - digit
      - exactly: 5
      - non_capturing_group:
          - literal: \"-\"
          - digit
          - exactly: 4
      - optional
      - end
  greeting:
    CaseInsensitive: true
    Steps:
      - literal: hello
";

// ---------- Builder ----------

#[test]
fn fluent_chain_builds_and_matches() -> Result<(), PatternError> {
    let mut b = PatternBuilder::new();
    b.start()?
        .literal("User")?
        .whitespace()?
        .digit()?
        .one_or_more()?
        .literal("@example.com")?
        .end()?;
    assert_eq!(b.build(), r"^User\s\d+@example\.com$");
    assert!(b.matches("User 123@example.com")?);
    assert!(!b.matches("User abc@example.com")?);
    Ok(())
}

#[test]
fn compiled_matcher_is_shareable_across_threads() -> Result<(), PatternError> {
    let mut b = PatternBuilder::new();
    b.word()?.one_or_more()?;
    let locked = PatternBuilder::precompiled(b.compile()?, b.compile_options())?;
    let locked = &locked;
    std::thread::scope(|s| {
        let handles: Vec<_> = ["abc", "a b", "z_9"]
            .into_iter()
            .map(|input| s.spawn(move || locked.matches(input).unwrap()))
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![true, false, true]);
    });
    Ok(())
}

#[test]
fn locked_builder_rejects_fragments() {
    let regex = regex::Regex::new("a+").unwrap();
    let mut b = PatternBuilder::precompiled(regex, CompileOptions::default()).unwrap();
    assert!(matches!(
        b.literal("x"),
        Err(PatternError::InvalidState { operation: "literal" })
    ));
    assert_eq!(b.extract(), "a+");
    assert!(b.matches("aaa").unwrap());
}

#[test]
fn locked_builder_keeps_engine_options() {
    let options = CompileOptions {
        case_insensitive: true,
        ..CompileOptions::default()
    };
    let regex = regex::RegexBuilder::new("hello").case_insensitive(true).build().unwrap();
    let b = PatternBuilder::precompiled(regex, options).unwrap();
    assert!(b.compile().unwrap().is_match("HELLO"));
    assert!(b.matches("HELLO").unwrap());
    assert!(b.matches("hElLo").unwrap());
}

#[test]
fn tag_stripping() -> Result<(), PatternError> {
    let mut b = PatternBuilder::new();
    b.literal("<")?.any_character_except(">")?.one_or_more()?.literal(">")?;
    assert_eq!(b.replace_all("<tag>('Hello')</tag>", "")?, "('Hello')");
    Ok(())
}

// ---------- Validator ----------

#[test]
fn validator_checks() {
    assert!(CommonValidator::validate_username("user_1"));
    assert!(!CommonValidator::validate_username("user 1"));
    assert!(CommonValidator::validate_email("me@mail.org"));
    assert!(!CommonValidator::validate_email("me@mail"));
}

// ---------- Config rules ----------

#[test]
fn config_rules_join_registry() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "rules.yml", ZIP_CONFIG);
    let config = load_config(Some(&path)).unwrap();
    let registry = RuleRegistry::with_config(&config).unwrap();

    assert_eq!(registry.names(), vec!["username", "email", "zip", "greeting"]);
    let zip = registry.get("zip").unwrap();
    assert_eq!(zip.pattern().extract(), r"^\d{5}(?:\-\d{4})?$");
    assert!(zip.check("12345").unwrap());
    assert!(zip.check("12345-6789").unwrap());
    assert!(!zip.check("1234").unwrap());

    let greeting = registry.get("greeting").unwrap();
    assert!(greeting.check("HeLLo").unwrap());
    assert!(!greeting.check("hello!").unwrap());
}

#[test]
fn config_rule_with_bad_pattern_fails_to_register() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "rules.yml",
        "Rules:\n  broken:\n    Steps:\n      - any_of: \"\"\n",
    );
    let config = load_config(Some(&path)).unwrap();
    let err = RuleRegistry::with_config(&config).err().unwrap();
    assert!(format!("{err:#}").contains("rule `broken` does not compile"));
}

// ---------- Command runner ----------

#[test]
fn all_valid_exits_zero() {
    let (code, out) = run_cli(&["alice", "bob_2"], "");
    assert_eq!(code, 0);
    assert!(out.contains("alice: ok"));
    assert!(out.contains("2 inputs checked, 0 invalid"));
}

#[test]
fn invalid_input_exits_one() {
    let (code, out) = run_cli(&["-r", "email", "a@b.co", "nope"], "");
    assert_eq!(code, 1);
    assert!(out.contains("nope: invalid (email)"));
}

#[test]
fn unknown_rule_exits_two() {
    let (code, out) = run_cli(&["-r", "phone", "123"], "");
    assert_eq!(code, 2);
    assert!(out.is_empty());
}

#[test]
fn stdin_inputs_are_appended() {
    let (code, out) = run_cli(&["--stdin", "-f", "json", "first"], "second\nthird fails\n");
    assert_eq!(code, 1);
    let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(parsed["metadata"]["inputs_checked"], 3);
    assert_eq!(parsed["metadata"]["invalid_count"], 1);
    assert_eq!(parsed["verdicts"][2]["input"], "third fails");
}

#[test]
fn stdin_ignored_without_flag() {
    let (code, out) = run_cli(&["ok"], "not read\n");
    assert_eq!(code, 0);
    assert!(out.contains("1 input checked, 0 invalid"));
}

#[test]
fn list_rules_includes_config_rules() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "rules.yml", ZIP_CONFIG);
    let (code, out) = run_cli(&["-c", path.to_str().unwrap(), "--list-rules"], "");
    assert_eq!(code, 0);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "username\t^\\w+$\tone or more word characters");
    assert!(lines[2].starts_with("zip\t"));
    assert!(lines[3].starts_with("greeting\t(?i)hello"));
}

#[test]
fn print_pattern() {
    let (code, out) = run_cli(&["-r", "email", "--print-pattern"], "");
    assert_eq!(code, 0);
    assert_eq!(out, "^\\w+@\\w+\\.\\w+$\n");
}

#[test]
fn replace_mode_rewrites_inputs() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "rules.yml",
        "Rules:\n  tag:\n    Steps:\n      - literal: \"<\"\n      - any_character_except: \">\"\n      - one_or_more\n      - literal: \">\"\n",
    );
    let (code, out) = run_cli(
        &["-c", path.to_str().unwrap(), "-r", "tag", "--replace", "", "<b>bold</b>", "plain"],
        "",
    );
    assert_eq!(code, 0);
    assert_eq!(out, "bold\nplain\n");
}

#[test]
fn quiet_format_is_silent_when_valid() {
    let (code, out) = run_cli(&["-f", "quiet", "fine"], "");
    assert_eq!(code, 0);
    assert!(out.is_empty());
}

#[test]
fn broken_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "rules.yml", "Rules:\n  r:\n    Steps: [nonsense]\n");
    let args = Args::parse_from(["fluent-regex", "-c", path.to_str().unwrap(), "x"]);
    let mut out = Vec::new();
    let err = execute(args, Cursor::new(String::new()), &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("unknown step `nonsense`"));
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.yml");
    let args = Args::parse_from(["fluent-regex", "-c", path.to_str().unwrap(), "x"]);
    let mut out = Vec::new();
    let err = execute(args, Cursor::new(String::new()), &mut out).unwrap_err();
    assert!(format!("{err:#}").contains("config file not found"));
    assert!(out.is_empty());
}
