//! Resolution of the shared DB options: flag > environment > default.
//!
//! These tests mutate process environment, so every one runs under `#[serial]`.

use std::env;

use clap::FromArgMatches;
use rstest::rstest;
use serial_test::serial;

use mzt::cli::args::{Commands, ConfigCommands};
use mzt::cli::{build_command, BaseOpt, Cli, DbArgs};

/// Run `f` with exactly `vars` set among the catalog's environment variables.
fn with_env<T>(vars: &[(&str, &str)], f: impl FnOnce() -> T) -> T {
    let saved: Vec<(&str, Option<String>)> = BaseOpt::env_vars()
        .iter()
        .map(|name| (*name, env::var(name).ok()))
        .collect();
    for name in BaseOpt::env_vars() {
        env::remove_var(name);
    }
    for (name, value) in vars {
        env::set_var(name, value);
    }

    let result = f();

    for (name, value) in saved {
        match value {
            Some(v) => env::set_var(name, v),
            None => env::remove_var(name),
        }
    }
    result
}

fn try_resolve(extra: &[&str]) -> Result<DbArgs, clap::Error> {
    let mut argv = vec!["mzt", "config", "show"];
    argv.extend_from_slice(extra);
    let matches = build_command().try_get_matches_from(argv)?;
    let cli = Cli::from_arg_matches(&matches)?;
    match cli.command {
        Some(Commands::Config {
            command: ConfigCommands::Show { db },
        }) => Ok(db),
        other => panic!("unexpected command: {other:?}"),
    }
}

fn resolve(extra: &[&str]) -> DbArgs {
    try_resolve(extra).expect("parse")
}

// ============================================================
// Defaults
// ============================================================

#[test]
#[serial]
fn given_no_flags_and_no_env_when_resolve_then_defaults() {
    let db = with_env(&[], || resolve(&[]));

    assert_eq!(db.db_port, 6875);
    assert_eq!(db.db_host, "localhost");
    assert_eq!(db.db_name, "materialize");
    assert_eq!(db.db_user, "materialize");
    assert_eq!(db.db_pass, None);
    assert!(!db.db_require_ssl);
    assert_eq!(db, DbArgs::default());
}

// ============================================================
// Environment overrides default
// ============================================================

#[test]
#[serial]
fn given_env_vars_when_resolve_then_env_values_win_over_defaults() {
    let db = with_env(
        &[
            ("MZT_DB_PORT", "5432"),
            ("MZT_DB_HOST", "db.internal"),
            ("MZT_DB_NAME", "analytics"),
            ("MZT_DB_USER", "alice"),
            ("MZT_DB_PASS", "s3cret"),
            ("MZT_DB_REQUIRE_SSL", "true"),
        ],
        || resolve(&[]),
    );

    assert_eq!(db.db_port, 5432);
    assert_eq!(db.db_host, "db.internal");
    assert_eq!(db.db_name, "analytics");
    assert_eq!(db.db_user, "alice");
    assert_eq!(db.db_pass.as_deref(), Some("s3cret"));
    assert!(db.db_require_ssl);
}

#[rstest]
#[case("1", true)]
#[case("yes", true)]
#[case("on", true)]
#[case("0", false)]
#[case("false", false)]
#[case("off", false)]
#[serial]
fn given_boolish_env_when_resolve_then_require_ssl_follows(
    #[case] raw: &str,
    #[case] expected: bool,
) {
    let db = with_env(&[("MZT_DB_REQUIRE_SSL", raw)], || resolve(&[]));
    assert_eq!(db.db_require_ssl, expected);
}

// ============================================================
// Flag overrides environment and default
// ============================================================

#[test]
#[serial]
fn given_flags_and_env_when_resolve_then_flags_win() {
    let db = with_env(
        &[
            ("MZT_DB_PORT", "5432"),
            ("MZT_DB_HOST", "db.internal"),
            ("MZT_DB_NAME", "analytics"),
            ("MZT_DB_USER", "alice"),
            ("MZT_DB_PASS", "s3cret"),
            ("MZT_DB_REQUIRE_SSL", "false"),
        ],
        || {
            resolve(&[
                "--db-port",
                "7000",
                "--db-host",
                "cli.host",
                "--db-name",
                "cli_db",
                "--db-user",
                "bob",
                "--db-pass",
                "cli-pass",
                "--db-require-ssl",
            ])
        },
    );

    assert_eq!(db.db_port, 7000);
    assert_eq!(db.db_host, "cli.host");
    assert_eq!(db.db_name, "cli_db");
    assert_eq!(db.db_user, "bob");
    assert_eq!(db.db_pass.as_deref(), Some("cli-pass"));
    assert!(db.db_require_ssl);
}

#[test]
#[serial]
fn given_flag_without_env_when_resolve_then_flag_wins_over_default() {
    let db = with_env(&[], || resolve(&["--db-port", "7000"]));
    assert_eq!(db.db_port, 7000);
    assert_eq!(db.db_host, "localhost");
}

#[test]
#[serial]
fn given_empty_password_flag_when_resolve_then_distinct_from_absent() {
    let db = with_env(&[], || resolve(&["--db-pass", ""]));
    assert_eq!(db.db_pass.as_deref(), Some(""));
    assert_ne!(db, DbArgs::default());
}

// ============================================================
// Empty environment values count as unset
// ============================================================

#[test]
#[serial]
fn given_empty_env_vars_when_resolve_then_defaults() {
    let db = with_env(
        &[
            ("MZT_DB_PORT", ""),
            ("MZT_DB_HOST", ""),
            ("MZT_DB_NAME", ""),
            ("MZT_DB_USER", ""),
            ("MZT_DB_PASS", ""),
            ("MZT_DB_REQUIRE_SSL", ""),
        ],
        || resolve(&[]),
    );

    assert_eq!(db, DbArgs::default());
}

#[rstest]
#[case("MZT_DB_PORT")]
#[case("MZT_DB_HOST")]
#[case("MZT_DB_PASS")]
#[case("MZT_DB_REQUIRE_SSL")]
#[serial]
fn given_single_empty_env_var_when_resolve_then_option_keeps_default(#[case] name: &str) {
    let db = with_env(&[(name, "")], || try_resolve(&[]))
        .unwrap_or_else(|e| panic!("{name}=\"\" must not fail parsing: {e}"));

    assert_eq!(db.db_port, 6875);
    assert_eq!(db.db_host, "localhost");
    assert_eq!(db.db_pass, None);
    assert!(!db.db_require_ssl);
}

#[test]
#[serial]
fn given_empty_env_and_empty_flags_when_resolve_then_flags_keep_empty_values() {
    let db = with_env(&[("MZT_DB_HOST", ""), ("MZT_DB_PASS", "")], || {
        resolve(&["--db-host", "", "--db-pass", ""])
    });

    assert_eq!(db.db_host, "");
    assert_eq!(db.db_pass.as_deref(), Some(""));
}

// ============================================================
// Parse failures
// ============================================================

#[test]
#[serial]
fn given_non_numeric_port_env_when_resolve_then_parse_error_names_option() {
    let err = with_env(&[("MZT_DB_PORT", "notanumber")], || try_resolve(&[]))
        .expect_err("port must not parse");

    assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    let msg = err.to_string();
    assert!(msg.contains("db-port"), "message should name option: {msg}");
    assert!(msg.contains("notanumber"), "message should echo value: {msg}");
}

#[test]
#[serial]
fn given_non_numeric_port_env_and_valid_flag_when_resolve_then_flag_wins() {
    let db = with_env(&[("MZT_DB_PORT", "notanumber")], || {
        resolve(&["--db-port", "7000"])
    });
    assert_eq!(db.db_port, 7000);
}

#[test]
#[serial]
fn given_unparseable_boolean_env_when_resolve_then_parse_error() {
    let err = with_env(&[("MZT_DB_REQUIRE_SSL", "maybe")], || try_resolve(&[]))
        .expect_err("boolean must not parse");
    assert!(err.to_string().contains("db-require-ssl"));
}
